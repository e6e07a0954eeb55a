use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tempfile::TempDir;

use callscribe::analysis::{AnalysisPipeline, CallAnalyzer};
use callscribe::llm::prompts::SUMMARY_INSTRUCTION;
use callscribe::llm::{CompletionRequest, LlmProvider};
use callscribe::storage::LogStore;
use callscribe::web::AppState;

#[allow(dead_code)]
pub fn run_callscribe(args: &[&str]) -> Output {
    TestEnv::new().run(args)
}

#[allow(dead_code)]
pub struct TestEnv {
    home: TempDir,
    config: TempDir,
    data: TempDir,
}

#[allow(dead_code)]
impl TestEnv {
    pub fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("create temporary HOME dir"),
            config: tempfile::tempdir().expect("create temporary XDG config dir"),
            data: tempfile::tempdir().expect("create temporary XDG data dir"),
        }
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env: &[(&str, &str)]) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_callscribe"));
        cmd.args(args)
            .current_dir(self.home.path())
            .env("HOME", self.home.path())
            .env("XDG_CONFIG_HOME", self.config.path())
            .env("XDG_DATA_HOME", self.data.path())
            .env_remove("CALLSCRIBE_GROQ_API_KEY")
            .env_remove("GROQ_API_KEY");
        for (key, value) in env {
            cmd.env(key, value);
        }
        cmd.output().expect("failed to execute callscribe binary")
    }

    pub fn data_dir(&self) -> &Path {
        self.data.path()
    }
}

/// Provider that answers the summary and sentiment requests with canned replies.
#[allow(dead_code)]
pub struct StubProvider {
    summary: std::result::Result<String, String>,
    sentiment: std::result::Result<String, String>,
    calls: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl StubProvider {
    pub fn ok(summary: &str, sentiment: &str) -> Self {
        Self {
            summary: Ok(summary.to_string()),
            sentiment: Ok(sentiment.to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing_summary(reason: &str) -> Self {
        Self {
            summary: Err(reason.to_string()),
            sentiment: Ok("Neutral".to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing_sentiment(summary: &str, reason: &str) -> Self {
        Self {
            summary: Ok(summary.to_string()),
            sentiment: Err(reason.to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl LlmProvider for StubProvider {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = if request.system == SUMMARY_INSTRUCTION {
            &self.summary
        } else {
            &self.sentiment
        };
        reply.clone().map_err(|reason| anyhow::anyhow!(reason))
    }
}

#[allow(dead_code)]
pub fn log_path(dir: &Path) -> PathBuf {
    dir.join("call_analysis.csv")
}

/// Web state backed by a log in `dir` and the given provider.
#[allow(dead_code)]
pub fn app_state(dir: &Path, provider: StubProvider) -> Arc<AppState> {
    let store = Arc::new(LogStore::open(log_path(dir)).expect("open log store"));
    Arc::new(AppState {
        pipeline: AnalysisPipeline::new(CallAnalyzer::new(Box::new(provider)), store),
        download_name: "call_analysis.csv".to_string(),
    })
}

/// Encode a single form field as `application/x-www-form-urlencoded`.
#[allow(dead_code)]
pub fn form_body(field: &str, value: &str) -> String {
    format!(
        "{}={}",
        urlencoding::encode(field),
        urlencoding::encode(value)
    )
}
