//! LLM module for callscribe
//!
//! Chat-completion access for transcript summaries and sentiment labels.

mod client;
mod groq;
pub mod prompts;

pub use client::{build_provider, CompletionRequest, LlmProvider};
pub use groq::GroqClient;
