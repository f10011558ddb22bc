//! Budgeting advice
//!
//! Builds a text prompt from recent transactions and hands it to an
//! external text generator.

pub mod client;
pub mod prompt;

pub use client::{
    advice_or_message, request_advice, AdviceConfig, AdviceGenerator, GeminiClient, API_KEY_ENV,
};
pub use prompt::{build_prompt, recent_entries, window_start, NO_DATA_PROMPT};
