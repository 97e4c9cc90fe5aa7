use std::sync::Arc;

use dispatchd_core::dispatcher::Dispatcher;
use dispatchd_core::tracker::JobTracker;
use dispatchd_events::EventBus;

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// The single dispatch engine behind every HTTP calling convention.
    pub dispatcher: Arc<Dispatcher>,
    /// In-memory ledger of asynchronous jobs, keyed by token.
    pub tracker: Arc<JobTracker>,
    /// WebSocket connection manager (browser clients).
    pub ws_manager: Arc<WsManager>,
    /// Centralized event bus for job lifecycle events.
    pub event_bus: Arc<EventBus>,
}
