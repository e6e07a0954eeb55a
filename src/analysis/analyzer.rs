//! Two-step transcript analysis: summary, then sentiment

use serde::Serialize;
use thiserror::Error;

use crate::analysis::sentiment::Sentiment;
use crate::analysis::transcript::Transcript;
use crate::llm::prompts::{
    SENTIMENT_INSTRUCTION, SENTIMENT_MAX_TOKENS, SENTIMENT_TEMPERATURE, SUMMARY_INSTRUCTION,
    SUMMARY_MAX_TOKENS, SUMMARY_TEMPERATURE,
};
use crate::llm::{CompletionRequest, LlmProvider};

/// Outcome of a successful analysis. Never partially filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub summary: String,
    pub sentiment: Sentiment,
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("summary request failed: {0}")]
    Summary(String),

    #[error("sentiment request failed: {0}")]
    Sentiment(String),

    #[error("unexpected sentiment label '{0}'")]
    UnexpectedSentiment(String),
}

/// Issues the summary and sentiment requests for one transcript
pub struct CallAnalyzer {
    provider: Box<dyn LlmProvider>,
}

impl CallAnalyzer {
    pub fn new(provider: Box<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Summarize the transcript, then classify its sentiment.
    ///
    /// Both requests see the original transcript. The first failure aborts
    /// the whole analysis.
    pub async fn analyze(&self, transcript: &Transcript) -> Result<AnalysisResult, AnalysisError> {
        let summary = self
            .complete(
                SUMMARY_INSTRUCTION,
                transcript,
                SUMMARY_TEMPERATURE,
                SUMMARY_MAX_TOKENS,
            )
            .await
            .map_err(AnalysisError::Summary)?;
        tracing::debug!("Summary received ({} chars)", summary.len());

        let label = self
            .complete(
                SENTIMENT_INSTRUCTION,
                transcript,
                SENTIMENT_TEMPERATURE,
                SENTIMENT_MAX_TOKENS,
            )
            .await
            .map_err(AnalysisError::Sentiment)?;

        let sentiment =
            Sentiment::parse(&label).ok_or(AnalysisError::UnexpectedSentiment(label))?;

        Ok(AnalysisResult { summary, sentiment })
    }

    async fn complete(
        &self,
        system: &str,
        transcript: &Transcript,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, String> {
        let text = self
            .provider
            .complete(CompletionRequest {
                system,
                user: transcript.as_str(),
                temperature,
                max_tokens,
            })
            .await
            .map_err(|e| format!("{:#}", e))?;

        let text = text.trim();
        if text.is_empty() {
            return Err("model returned an empty response".to_string());
        }
        Ok(text.to_string())
    }
}
