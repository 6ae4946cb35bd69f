mod error;
pub mod handlers;
mod middleware;
pub mod models;

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::get,
};

use crate::application::render::RenderService;
use crate::infra::assets;

pub use error::{ApiError, ApiErrorBody, TextSource, codes};

#[derive(Clone)]
pub struct HttpState {
    pub render: Arc<RenderService>,
}

/// Build the public router: JSON API, health probe and the embedded client.
pub fn build_router(state: HttpState, max_body_bytes: usize) -> Router {
    Router::new()
        .route(
            "/health",
            get(handlers::health).fallback(handlers::not_found),
        )
        .route(
            "/api/ascii",
            get(handlers::render_query)
                .post(handlers::render_body)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/fonts",
            get(handlers::list_fonts).fallback(handlers::not_found),
        )
        .route(
            "/",
            get(assets::serve_index).fallback(handlers::not_found),
        )
        .route(
            "/static/{*path}",
            get(assets::serve_public).fallback(handlers::not_found),
        )
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(from_fn(middleware::catch_panics))
        .layer(from_fn(middleware::log_responses))
        .layer(from_fn(middleware::set_request_context))
}
