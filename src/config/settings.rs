//! User settings for finance-tracker
//!
//! Manages display preferences, the insight defaults and the advice
//! generator settings. Credentials are never written here; the API key comes
//! from the environment (see [`crate::advice::AdviceConfig`]).

use serde::{Deserialize, Serialize};

use super::paths::FinancePaths;
use crate::error::TrackerError;

/// Settings for the external advice generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceSettings {
    /// Model name passed to the generator
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the generateContent API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// How many months of history go into the prompt
    #[serde(default = "default_months_window")]
    pub months_window: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    "gemini-1.5-pro".to_string()
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_months_window() -> u32 {
    3
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for AdviceSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
            months_window: default_months_window(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// User settings for finance-tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Number of categories shown as "top expenses"
    #[serde(default = "default_top_expenses")]
    pub top_expenses: usize,

    /// Advice generator settings
    #[serde(default)]
    pub advice: AdviceSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_top_expenses() -> usize {
    3
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            top_expenses: default_top_expenses(),
            advice: AdviceSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &FinancePaths) -> Result<Self, TrackerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| TrackerError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                TrackerError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FinancePaths) -> Result<(), TrackerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| TrackerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| TrackerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
