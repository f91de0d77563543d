//! Request metrics for the webhook and admin routes

use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::infrastructure::observability::record_http_request;

/// Health checks are polled constantly and would drown the real traffic
const HEALTH_ROUTES: &[&str] = &["/health", "/ready"];

pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let route = route_label(&request);
    if HEALTH_ROUTES.contains(&route.as_str()) {
        return next.run(request).await;
    }

    let method = request.method().as_str().to_owned();
    let started = Instant::now();
    let response = next.run(request).await;

    record_http_request(&method, &route, response.status().as_u16(), started.elapsed());
    response
}

/// Route template when matched, raw path otherwise (sanitised by the recorder)
fn route_label(request: &Request<Body>) -> String {
    match request.extensions().get::<MatchedPath>() {
        Some(matched) => matched.as_str().to_owned(),
        None => request.uri().path().to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, Router};
    use tower::ServiceExt;

    #[test]
    fn test_unmatched_request_uses_raw_path() {
        let request = Request::builder()
            .uri("/hooks/web?debug=1")
            .body(Body::empty())
            .unwrap();

        assert_eq!(route_label(&request), "/hooks/web");
    }

    #[tokio::test]
    async fn test_health_checks_pass_through() {
        let app = Router::new()
            .route("/health", get(|| async { "ok" }))
            .layer(axum::middleware::from_fn(metrics_middleware));

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), axum::http::StatusCode::OK);
    }
}
