use axum::Router;

use crate::bootstrap::app_context::AppContext;

pub mod applications;
pub mod auth;
pub mod error;
pub mod extract;
pub mod health;

/// All `/api` routes, without CORS, tracing or docs layers.
pub fn api_router(ctx: AppContext) -> Router {
    Router::new()
        .nest("/api", health::routes(ctx.clone()))
        .nest("/api/auth", auth::routes(ctx.clone()))
        .nest("/api", applications::routes(ctx))
}
