use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    Json, Router,
};
use serde_json::json;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod error;
pub mod products;
pub mod state;

pub use state::AppState;

use error::AppError;

pub fn app(state: AppState) -> Router {
    // CORS response headers for the allowlisted origins. The allowlist
    // enforcement itself lives in the middleware below, which can return
    // an actual 403 body instead of just withholding headers.
    let origins: Vec<HeaderValue> = state
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("ignoring unparseable allowed origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::USER_AGENT]);

    Router::new()
        .merge(products::routes())
        .fallback(route_not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            origin_allowlist_middleware,
        ))
        .with_state(state)
}

/// Admit requests without an Origin header (server-to-server, curl),
/// admit allowlisted origins, reject everything else with a 403 body.
async fn origin_allowlist_middleware(
    State(state): State<AppState>,
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> Result<impl IntoResponse, AppError> {
    if let Some(origin) = req.headers().get(header::ORIGIN) {
        let origin = origin.to_str().unwrap_or_default();
        if !state.allowed_origins.contains(origin) {
            return Err(AppError::CorsBlocked(format!(
                "CORS blocked for origin: {origin}"
            )));
        }
    }
    Ok(next.run(req).await)
}

async fn route_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Route not found" })),
    )
}
