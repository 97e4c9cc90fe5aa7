pub mod dispatch;
pub mod health;
pub mod status;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                      WebSocket (job completion push)
///
/// /generic                 synchronous dispatch (GET, POST)
/// /generic/async           asynchronous submission (GET, POST)
///
/// /status?id=<token>       polling status check
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .nest("/generic", dispatch::router())
        .nest("/status", status::router())
}
