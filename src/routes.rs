use axum::{
    body::Bytes,
    extract::State,
    routing::{get, post},
    Json,
    Router,
};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::error::ApiResponse;
use crate::state::AppState;
use crate::translate::{validate_text, ProxyHealth, TranslationResult};

/// Full proxy application: routes, CORS, request tracing
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(create_routes(&state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub fn create_routes(state: &AppState) -> Router<AppState> {
    let router = Router::new()
        .route("/api/translate", post(translate))
        .route("/api/health", get(health_check));

    match &state.config.system_config.static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    }
}

/// Forward a translation to the upstream service. Always answers 200; the
/// envelope's `success` carries the outcome.
async fn translate(
    State(state): State<AppState>,
    body: Bytes,
) -> Json<ApiResponse<TranslationResult>> {
    let request_id = state.generate_request_id();

    // A body that isn't JSON (or isn't even UTF-8) is treated the same as one without text
    let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let text = payload.get("text").and_then(|v| v.as_str()).unwrap_or("");

    let text = match validate_text(text) {
        Ok(text) => text,
        Err(e) => {
            warn!(%request_id, "Rejected translation request: {}", e);
            return Json(e.into());
        }
    };

    match state.upstream.translate(text).await {
        Ok(result) => {
            info!(%request_id, "Translated in {}ms", result.processing_time_ms);
            Json(ApiResponse::ok(result))
        }
        Err(e) => {
            warn!(%request_id, "Upstream translation failed: {}", e);
            Json(e.into())
        }
    }
}

async fn health_check(State(state): State<AppState>) -> Json<ProxyHealth> {
    let report = state.upstream.check_health().await;
    info!("Upstream health: {}", report.status);
    Json(report.into())
}
