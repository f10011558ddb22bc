//! Advice CLI command

use clap::Args;

use crate::advice::{build_prompt, request_advice, AdviceConfig, API_KEY_ENV};
use crate::config::Settings;
use crate::error::TrackerResult;
use crate::reports::TransactionFilter;
use crate::storage::{RecordStore, Storage};

use super::evaluation_date;

/// Arguments for `advice`
#[derive(Args)]
pub struct AdviceArgs {
    /// Months of history to summarize
    #[arg(long)]
    pub months: Option<u32>,

    /// Model name
    #[arg(long)]
    pub model: Option<String>,

    /// Print the prompt instead of sending it
    #[arg(long)]
    pub prompt_only: bool,

    /// Evaluation date (YYYY-MM-DD)
    #[arg(long)]
    pub today: Option<String>,

    /// API key for the advice generator
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,
}

/// Handle the advice command
pub fn handle_advice_command(storage: &Storage, settings: &Settings, args: AdviceArgs) -> TrackerResult<()> {
    let mut config = AdviceConfig::from_settings(&settings.advice, args.api_key);
    if let Some(model) = args.model {
        config = config.with_model(model);
    }
    if let Some(months) = args.months {
        config = config.with_months_window(months);
    }

    let today = evaluation_date(args.today.as_deref())?;
    let entries = storage.query_transactions(&TransactionFilter::all())?;
    let prompt = build_prompt(&entries, config.months_window, today);

    if args.prompt_only {
        println!("{}", prompt);
    } else {
        println!("{}", request_advice(&config, &prompt));
    }

    Ok(())
}
