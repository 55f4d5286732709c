use anyhow::Result;
use axum::{extract::{Query, State}, http::{HeaderMap, HeaderValue, StatusCode}, routing::{get, post}, Json, Router};
use boolret_core::{CorpusConfig, Engine, QueryKind};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer, AllowOrigin};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub kind: QueryKind,
    pub took_ms: u128,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<String>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub query: String,
    pub error: String,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub num_docs: usize,
    pub num_terms: usize,
}

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RwLock<Arc<Engine>>>,
    pub corpus: Arc<CorpusConfig>,
    pub admin_token: Option<String>,
}

impl AppState {
    /// Cheap snapshot; the lock is held only to clone the `Arc`.
    fn snapshot(&self) -> Arc<Engine> {
        self.engine.read().clone()
    }
}

/// `admin_token` guards `POST /index/rebuild`; with `None` every rebuild is refused.
pub fn build_app(corpus: CorpusConfig, admin_token: Option<String>) -> Result<Router> {
    // Build the indexes once at startup
    let engine = corpus.load_engine()?;
    tracing::info!(num_docs = engine.num_docs(), num_terms = engine.num_terms(), "engine ready");
    let app_state = AppState { engine: Arc::new(RwLock::new(Arc::new(engine))), corpus: Arc::new(corpus), admin_token };
    let cors = cors_layer(std::env::var("CORS_ALLOW_ORIGIN").ok().as_deref());

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/stats", get(stats_handler))
        .route("/index/rebuild", post(rebuild_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());
    Ok(app)
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, (StatusCode, Json<ErrorResponse>)> {
    let start = std::time::Instant::now();
    let engine = state.snapshot();
    match engine.search(&params.q) {
        Ok(outcome) => {
            let elapsed = start.elapsed();
            let results: Vec<String> = outcome.docs.into_iter().collect();
            Ok(Json(SearchResponse {
                query: params.q,
                kind: outcome.kind,
                took_ms: elapsed.as_millis(),
                took_s: elapsed.as_secs_f64(),
                total_hits: results.len(),
                results,
            }))
        }
        Err(e) => {
            tracing::debug!(query = %params.q, error = %e, "rejected query");
            Err((StatusCode::BAD_REQUEST, Json(ErrorResponse { query: params.q, error: e.to_string() })))
        }
    }
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let engine = state.snapshot();
    Json(StatsResponse { num_docs: engine.num_docs(), num_terms: engine.num_terms() })
}

/// Re-read the corpus and swap in fresh indexes. Queries already running keep
/// the snapshot they started with.
async fn rebuild_handler(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<StatsResponse>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    let corpus = state.corpus.clone();
    let engine = tokio::task::spawn_blocking(move || corpus.load_engine())
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}")))?;
    let stats = StatsResponse { num_docs: engine.num_docs(), num_terms: engine.num_terms() };
    *state.engine.write() = Arc::new(engine);
    tracing::info!(num_docs = stats.num_docs, num_terms = stats.num_terms, "indexes rebuilt");
    Ok(Json(stats))
}

/// Comma-separated origins, or any origin when unset or nothing parses.
fn cors_layer(allow_origin: Option<&str>) -> CorsLayer {
    let origins: Vec<HeaderValue> = allow_origin
        .map(|val| val.split(',').filter_map(|s| s.trim().parse().ok()).collect())
        .unwrap_or_default();
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err((StatusCode::UNAUTHORIZED, "ADMIN_TOKEN not set".into())),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}
