//! Route handlers

use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use serde::Deserialize;
use std::sync::Arc;

use crate::analysis::SubmitError;
use crate::storage::{LogRecord, LogStore};
use crate::web::page::{render, PageView};
use crate::web::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SubmitForm {
    #[serde(default)]
    transcript: String,
}

// ── GET / ──

pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let mut errors = Vec::new();
    let records = load_records(state.pipeline.store(), &mut errors).await;

    Html(render(&PageView {
        errors,
        records: &records,
        ..Default::default()
    }))
}

// ── POST / ──

pub async fn submit(
    State(state): State<Arc<AppState>>,
    form: Result<Form<SubmitForm>, FormRejection>,
) -> Html<String> {
    // A body that is not a urlencoded form carries no transcript field.
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::debug!("Unreadable form submission: {}", rejection);
            SubmitForm::default()
        }
    };

    let mut errors = Vec::new();

    let (result, draft) = match state.pipeline.submit(&form.transcript).await {
        Ok(record) => (Some(record), None),
        Err(e) => {
            if let SubmitError::Storage(ref inner) = e {
                tracing::error!("Failed to append to analysis log: {}", inner);
            }
            errors.push(e.to_string());
            (None, Some(form.transcript.as_str()))
        }
    };

    let records = load_records(state.pipeline.store(), &mut errors).await;

    Html(render(&PageView {
        result: result.as_ref(),
        errors,
        draft,
        records: &records,
    }))
}

// ── GET /download ──

pub async fn download(State(state): State<Arc<AppState>>) -> Response {
    match state.pipeline.store().raw_bytes_async().await {
        Ok(Some(bytes)) => {
            let disposition = format!("attachment; filename=\"{}\"", state.download_name);
            (
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                bytes,
            )
                .into_response()
        }
        Ok(None) => (StatusCode::NOT_FOUND, "Analysis log not found").into_response(),
        Err(e) => {
            tracing::error!("Failed to read analysis log: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to read analysis log",
            )
                .into_response()
        }
    }
}

async fn load_records(store: &Arc<LogStore>, errors: &mut Vec<String>) -> Vec<LogRecord> {
    match store.read_all_async().await {
        Ok(records) => records,
        Err(e) => {
            tracing::error!("Failed to load analysis log: {}", e);
            errors.push(format!("Could not load analysis log: {}", e));
            Vec::new()
        }
    }
}
