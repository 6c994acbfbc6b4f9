//! HTTP surface: analyze and suggest endpoints over the core.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use taskrank_core::{
    Analysis, DEFAULT_SUGGESTIONS, ScoringPolicy, SortStrategy, Suggestion, analyze_tasks_with,
    rank, suggest, today_in,
};
use taskrank_ingest::{IngestError, tasks_from_value};
use tracing::{error, info};

use crate::config::Config;

const BAD_INPUT: &str = "Expected a JSON array of tasks.";
const SUGGEST_NOTES: &str = "Demo suggestions computed from a built-in sample batch.";

#[derive(Debug, Clone)]
pub struct AppState {
    pub policy: ScoringPolicy,
    pub timezone: String,
}

impl AppState {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            policy: cfg.scoring,
            timezone: cfg.clock.timezone.clone(),
        }
    }

    fn reference_date(&self, explicit: Option<NaiveDate>) -> Result<NaiveDate> {
        match explicit {
            Some(d) => Ok(d),
            None => today_in(&self.timezone),
        }
    }
}

/// Error body with a status code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: Value,
}

impl ApiError {
    fn bad_request(detail: &str, error: impl ToString) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: json!({ "detail": detail, "error": error.to_string() }),
        }
    }

    fn internal(detail: &str, error: impl ToString) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: json!({ "detail": detail, "error": error.to_string() }),
        }
    }
}

impl From<IngestError> for ApiError {
    fn from(e: IngestError) -> Self {
        if e.is_client_error() {
            ApiError::bad_request(BAD_INPUT, e)
        } else {
            ApiError::internal("Error analyzing tasks", e)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeParams {
    pub sort: Option<SortStrategy>,
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SuggestParams {
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub top_3: Vec<Suggestion>,
    pub notes: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub build: &'static str,
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AnalyzeParams>,
    body: Bytes,
) -> Result<Json<Analysis>, ApiError> {
    let value: Value = serde_json::from_slice(&body).map_err(IngestError::from)?;
    let tasks = tasks_from_value(&value)?;

    let today = state
        .reference_date(params.today)
        .map_err(|e| ApiError::internal("Error analyzing tasks", e))?;

    let mut analysis = catch_unwind(AssertUnwindSafe(|| {
        analyze_tasks_with(&tasks, today, &state.policy)
    }))
    .map_err(|payload| {
        let msg = panic_message(payload.as_ref());
        error!(error = %msg, "analysis failed");
        ApiError::internal("Error analyzing tasks", msg)
    })?;

    if let Some(strategy) = params.sort {
        rank(&mut analysis.tasks, strategy);
    }

    info!(
        tasks = analysis.tasks.len(),
        warnings = analysis.warnings.len(),
        "analyzed batch"
    );
    Ok(Json(analysis))
}

pub async fn suggest_top(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SuggestParams>,
) -> Result<Json<SuggestResponse>, ApiError> {
    let today = state
        .reference_date(params.today)
        .map_err(|e| ApiError::internal("Error suggesting tasks", e))?;

    Ok(Json(SuggestResponse {
        top_3: suggest(today, DEFAULT_SUGGESTIONS, &state.policy),
        notes: SUGGEST_NOTES,
    }))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        build: env!("TASKRANK_BUILD_SHA"),
    })
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/tasks/analyze", post(analyze))
        .route("/api/tasks/analyze/", post(analyze))
        .route("/api/tasks/suggest", get(suggest_top))
        .route("/api/tasks/suggest/", get(suggest_top))
        .with_state(state)
}

pub async fn serve(cfg: &Config, host: &str, port: u16) -> Result<()> {
    // Fail fast on a bad zone instead of on the first request.
    today_in(&cfg.clock.timezone)?;

    let state = Arc::new(AppState::from_config(cfg));
    let app = build_router(state);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    info!("listening on http://{addr}");
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
