//! callscribe - Call-center transcript summaries and sentiment, kept in a CSV log
//!
//! A submitted transcript is validated, summarized and classified by a hosted
//! LLM, then appended to the log shown on the web page.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod llm;
pub mod storage;
pub mod web;

/// Application name
pub const APP_NAME: &str = "callscribe";
