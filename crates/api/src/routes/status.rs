//! Route definitions for the `/status` polling resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::status;
use crate::state::AppState;

/// Routes mounted at `/status`.
///
/// ```text
/// GET  /?id=<token>  -> job status / one-shot result delivery
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(status::job_status))
}
