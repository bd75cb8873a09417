use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;

use common::types::Health;

use crate::{observability, soap_endpoint, state::AppState};

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the application router: SOAP endpoint + WSDL, health, metrics and
/// the static enrollment form as fallback.
pub fn build_router(state: AppState, soap_path: &str, public_dir: &str, cors: CorsLayer) -> Router {
    let index = format!("{}/index.html", public_dir.trim_end_matches('/'));
    let static_dir = ServeDir::new(public_dir).fallback(ServeFile::new(index));

    Router::new()
        .route(soap_path, get(soap_endpoint::wsdl).post(soap_endpoint::soap_call))
        .route("/health", get(health))
        .route("/metrics", get(observability::metrics))
        .fallback_service(static_dir)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // SOAP Fault 走 500，同样以 ERROR 记录
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
