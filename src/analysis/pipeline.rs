//! Submission pipeline: validate, analyze, record

use std::sync::Arc;
use thiserror::Error;

use crate::analysis::analyzer::{AnalysisError, CallAnalyzer};
use crate::analysis::transcript::{Transcript, ValidationError};
use crate::storage::{LogRecord, LogStore, LogStoreError};

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Failed to save analysis: {0}")]
    Storage(#[from] LogStoreError),
}

/// Runs a submitted transcript through analysis and into the log
pub struct AnalysisPipeline {
    analyzer: CallAnalyzer,
    store: Arc<LogStore>,
}

impl AnalysisPipeline {
    pub fn new(analyzer: CallAnalyzer, store: Arc<LogStore>) -> Self {
        Self { analyzer, store }
    }

    /// The log this pipeline appends to
    pub fn store(&self) -> &Arc<LogStore> {
        &self.store
    }

    /// Validate and analyze `raw`, then append exactly one record.
    ///
    /// Nothing is written unless both analysis steps succeed.
    pub async fn submit(&self, raw: &str) -> Result<LogRecord, SubmitError> {
        let transcript = Transcript::parse(raw).inspect_err(|e| {
            tracing::debug!("Rejected transcript: {}", e);
        })?;

        let result = self.analyzer.analyze(&transcript).await.inspect_err(|e| {
            tracing::warn!("Analysis failed: {}", e);
        })?;

        let record = LogRecord::new(transcript.as_str(), result.summary, result.sentiment);
        let record = self.store.append_async(record).await?;

        tracing::info!(
            "Logged analysis ({} sentiment, {} chars)",
            record.sentiment,
            record.transcript.chars().count()
        );

        Ok(record)
    }
}
