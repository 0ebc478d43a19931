use axum::{extract::Request, http::StatusCode, response::IntoResponse, routing::get, Router};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::upstream::MovieSource;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Catalog,
    /// `None` when the provider's credential is missing.
    pub source: Option<Arc<dyn MovieSource>>,
}

impl AppState {
    pub fn new(config: Config, source: Option<Arc<dyn MovieSource>>) -> Self {
        let catalog = Catalog::for_provider(config.provider);
        Self {
            config: Arc::new(config),
            catalog,
            source,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(crate::handlers::index))
        .route("/api/movies", get(crate::handlers::movies))
        .route("/healthz", get(crate::handlers::healthz))
        .route("/robots.txt", get(robots_txt_handler))
        .fallback(fallback_handler)
        .layer(axum::middleware::from_fn(crate::middleware::log_request))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn robots_txt_handler() -> &'static str {
    "User-agent: *\nDisallow: /\n"
}

async fn fallback_handler(req: Request) -> impl IntoResponse {
    // CORS preflight for paths without a route
    if req.method() == axum::http::Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    StatusCode::NOT_FOUND.into_response()
}
