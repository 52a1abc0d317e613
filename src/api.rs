//! HTTP shell over the triage pipeline. The handlers add no semantics: they
//! deserialize a batch, run the core once, and hand back the structured
//! result. Anything display-related (filtering, sorting, export) belongs to
//! the consumer.

use std::sync::{Arc, RwLock};

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::classify::classify;
use crate::config::KeywordConfig;
use crate::email::{EmailRecord, Label, ScoredEmail};
use crate::pipeline::{process_batch, BatchReport};
use crate::summarize::{build_summarizer, DynSummarizer};

#[derive(Clone)]
pub struct AppState {
    pub keywords: Arc<RwLock<KeywordConfig>>,
    pub summarizer: DynSummarizer,
}

impl AppState {
    /// Keyword config from the environment, summarizer from `config/`.
    pub fn from_env() -> Self {
        Self {
            keywords: Arc::new(RwLock::new(KeywordConfig::from_env())),
            summarizer: build_summarizer(),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/classify", post(classify_one))
        .route("/analyze", post(analyze_batch))
        .route("/report", post(report_batch))
        .route("/debug/keywords", get(debug_keywords))
        .route("/admin/reload-keywords", get(admin_reload_keywords))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Default, serde::Deserialize)]
#[serde(default)]
struct ClassifyReq {
    subject: String,
    body: String,
    sender: String,
}

#[derive(serde::Serialize)]
struct ClassifyResp {
    label: Label,
}

/// Label a single record. No batch → no frequency context, so no score here;
/// the batch endpoints return scores.
async fn classify_one(
    State(state): State<AppState>,
    Json(body): Json<ClassifyReq>,
) -> Json<ClassifyResp> {
    let label = {
        let kw = state.keywords.read().expect("rwlock poisoned");
        classify(&body.subject, &body.body, &body.sender, &kw)
    };
    Json(ClassifyResp { label })
}

/// Score a batch and return the per-email table only.
async fn analyze_batch(
    State(state): State<AppState>,
    Json(records): Json<Vec<EmailRecord>>,
) -> Json<Vec<ScoredEmail>> {
    let report = run(&state, &records);
    Json(report.emails)
}

/// Score a batch and return the full report (emails + clutter rows).
async fn report_batch(
    State(state): State<AppState>,
    Json(records): Json<Vec<EmailRecord>>,
) -> Json<BatchReport> {
    Json(run(&state, &records))
}

fn run(state: &AppState, records: &[EmailRecord]) -> BatchReport {
    let kw = state.keywords.read().expect("rwlock poisoned");
    process_batch(records, &kw, state.summarizer.as_ref())
}

async fn debug_keywords(State(state): State<AppState>) -> String {
    let kw = state.keywords.read().expect("rwlock poisoned");
    format!(
        "urgent={} promotional={} notification={} critical={}",
        kw.urgent.len(),
        kw.promotional.len(),
        kw.notification.len(),
        kw.critical.len()
    )
}

async fn admin_reload_keywords(State(state): State<AppState>) -> String {
    let fresh = KeywordConfig::from_env();
    match state.keywords.write() {
        Ok(mut kw) => {
            *kw = fresh;
            "reloaded".to_string()
        }
        Err(_) => "failed: lock poisoned".to_string(),
    }
}
