//! Route definitions for the `/generic` dispatch resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::dispatch;
use crate::state::AppState;

/// Routes mounted at `/generic`.
///
/// ```text
/// GET|POST  /        -> synchronous dispatch
/// GET|POST  /async   -> asynchronous submission
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(dispatch::dispatch_sync_query).post(dispatch::dispatch_sync),
        )
        .route(
            "/async",
            get(dispatch::dispatch_async_query).post(dispatch::dispatch_async),
        )
}
