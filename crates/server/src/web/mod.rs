use axum::{
    Json, Router,
    http::Method,
    response::{IntoResponse, Response},
    routing::get,
};
use linkshelf_common::ApiResponse;
use serde::Serialize;
use std::any::Any;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as CorsAny, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::metadata::MetadataFetcher;
use crate::store::SharedStore;
use crate::version::VERSION;

pub mod error;
pub mod routes;

pub use error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub metadata: Arc<dyn MetadataFetcher>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(
        store: SharedStore,
        metadata: Arc<dyn MetadataFetcher>,
        config: Arc<ServerConfig>,
    ) -> Arc<Self> {
        Arc::new(Self {
            store,
            metadata,
            config,
        })
    }
}

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    version: &'static str,
}

async fn health_check_handler() -> Json<ApiResponse<HealthStatus>> {
    Json(ApiResponse::ok(HealthStatus {
        status: "ok",
        version: VERSION,
    }))
}

async fn route_not_found_handler() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

async fn method_not_allowed_handler() -> AppError {
    AppError::MethodNotAllowed
}

/// Turns a handler panic into the generic 500 envelope.
fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    AppError::InternalServerError(format!("handler panicked: {detail}")).into_response()
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check_handler))
        .merge(routes::bookmark_routes::create_bookmarks_router())
}

pub fn create_axum_router(app_state: Arc<AppState>) -> Router {
    let cors = if app_state.config.cors_allow_any_origin {
        CorsLayer::new()
            .allow_origin(CorsAny)
            .allow_methods(vec![Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
            .allow_headers(CorsAny)
    } else {
        CorsLayer::new()
    };

    let router = Router::new()
        .merge(api_routes())
        .nest("/api", api_routes())
        .fallback(route_not_found_handler)
        .method_not_allowed_fallback(method_not_allowed_handler)
        .with_state(app_state);
    with_service_layers(router, cors)
}

/// Request tracing, panic-to-500 conversion and CORS, outermost first.
fn with_service_layers(router: Router, cors: CorsLayer) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(cors),
    )
}
