use axum::{
    extract::State,
    http::{HeaderValue, Method, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use super::admin;
use super::health;
use super::hooks;
use super::middleware::metrics_middleware;
use super::state::AppState;
use crate::config::AppConfig;

/// Create the full router with application state
pub fn create_router(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        // Channel webhooks
        .route("/hooks/web", post(hooks::web_hook))
        .route("/hooks/sms", post(hooks::sms_hook))
        .route("/hooks/whatsapp", post(hooks::whatsapp_hook))
        // Admin API
        .nest("/admin", admin::create_admin_router());

    if state.metrics.is_some() {
        router = router.route(&config.metrics.path, get(metrics_handler));
    }

    router
        .with_state(state)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(cors_layer(&config.server.cors_origins))
        .layer(TraceLayer::new_for_http())
}

async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.metrics {
        Some(metrics) => (StatusCode::OK, metrics.render()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}
