//! Analysis module for callscribe
//!
//! Validates submitted transcripts, asks the LLM for a summary and a
//! sentiment label, and records the result.

mod analyzer;
mod pipeline;
mod sentiment;
mod transcript;

pub use analyzer::{AnalysisError, AnalysisResult, CallAnalyzer};
pub use pipeline::{AnalysisPipeline, SubmitError};
pub use sentiment::Sentiment;
pub use transcript::{Transcript, ValidationError, MIN_TRANSCRIPT_CHARS};
