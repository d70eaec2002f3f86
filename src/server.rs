//! HTTP service: the revalidation webhook and the format endpoint.

mod cache;
mod render;
mod revalidate;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

pub use cache::{CachedPage, RenderCache};

use crate::config::RevalidateConfig;
use crate::format::ContentFormatter;

#[derive(thiserror::Error, Debug)]
pub enum ServerError {
    #[error("invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("formatting task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub formatter: Arc<ContentFormatter>,
    pub cache: Arc<RenderCache>,
    pub revalidate: Arc<RevalidateConfig>,
}

impl AppState {
    pub fn new(formatter: ContentFormatter, revalidate: RevalidateConfig) -> Self {
        Self {
            formatter: Arc::new(formatter),
            cache: Arc::new(RenderCache::new()),
            revalidate: Arc::new(revalidate),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/revalidate",
            get(revalidate::liveness).post(revalidate::revalidate),
        )
        .route("/api/format", post(render::format_content))
        .route("/api/highlight.css", get(render::stylesheet))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
