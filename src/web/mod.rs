use crate::core::engine::LookupEngine;
use crate::core::{CrmLookup, FieldExtractor};
use crate::utils::error::{ErrorCategory, LookupError};
use crate::view;
use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub const INDEX_ROUTE: &str = "/";
pub const RUN_ROUTE: &str = "/run";

/// Shared state for the request handlers.
pub struct ApiState<E: FieldExtractor, C: CrmLookup> {
    pub engine: LookupEngine<E, C>,
}

/// Form body of the lookup action.
#[derive(Debug, Deserialize)]
pub struct RunRequest {
    pub document: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

pub fn create_router<E, C>(state: Arc<ApiState<E, C>>) -> Router
where
    E: FieldExtractor + 'static,
    C: CrmLookup + 'static,
{
    Router::new()
        .route(INDEX_ROUTE, get(index))
        .route(RUN_ROUTE, post(run_lookup::<E, C>))
        .route("/health", get(health_check))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Entry page with the document form.
async fn index() -> Html<String> {
    Html(view::index_page(RUN_ROUTE))
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Run one lookup and respond with the rendered results page.
async fn run_lookup<E, C>(
    State(state): State<Arc<ApiState<E, C>>>,
    Form(request): Form<RunRequest>,
) -> Result<Html<String>, (StatusCode, String)>
where
    E: FieldExtractor + 'static,
    C: CrmLookup + 'static,
{
    if request.document.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Document reference cannot be empty".to_string(),
        ));
    }

    let page = state
        .engine
        .run(request.document.trim())
        .await
        .map_err(error_response)?;
    let html = view::results_page(&page, INDEX_ROUTE).map_err(error_response)?;
    Ok(Html(html))
}

fn error_response(err: LookupError) -> (StatusCode, String) {
    tracing::error!(
        "❌ Lookup request failed: {} (Category: {:?})",
        err,
        err.category()
    );
    tracing::error!("💡 {}", err.recovery_suggestion());

    let status = match err.category() {
        ErrorCategory::Network => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.user_friendly_message())
}
