//! Event-to-WebSocket forwarding.
//!
//! [`JobNotifier`] subscribes to the event bus and pushes job completion
//! announcements to every connected WebSocket client. Best-effort only:
//! clients that miss a push still learn the outcome through the polling
//! endpoint.

use std::sync::Arc;

use axum::extract::ws::Message;
use tokio::sync::broadcast;

use dispatchd_events::JobEvent;

use crate::ws::WsManager;

/// Message type tag pushed to WebSocket clients when a job finishes.
const MSG_TYPE_JOB_COMPLETED: &str = "job_completed";

/// Forwards job lifecycle events from the event bus to WebSocket clients.
pub struct JobNotifier {
    ws_manager: Arc<WsManager>,
}

impl JobNotifier {
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run the forwarding loop.
    ///
    /// Consumes events from `receiver` until the channel is closed (i.e.
    /// the [`EventBus`](dispatchd_events::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<JobEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => self.forward(&event).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Job notifier lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, job notifier shutting down");
                    break;
                }
            }
        }
    }

    async fn forward(&self, event: &JobEvent) {
        // Only token-bearing events are meaningful to browser clients.
        let Some(token) = event.token else { return };

        let payload = serde_json::json!({
            "type": MSG_TYPE_JOB_COMPLETED,
            "id": token,
            "event": event.event_type,
            "operation": event.operation,
        });

        tracing::debug!(token = %token, "Pushing job completion to WebSocket clients");
        self.ws_manager
            .broadcast(Message::Text(payload.to_string().into()))
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dispatchd_core::types::Token;
    use dispatchd_events::EventBus;

    #[tokio::test]
    async fn completion_events_are_pushed_to_clients() {
        let ws_manager = Arc::new(WsManager::new());
        let mut rx = ws_manager.add("conn-1".to_string()).await;

        let bus = EventBus::default();
        let notifier = JobNotifier::new(Arc::clone(&ws_manager));
        let subscription = bus.subscribe();
        let handle = tokio::spawn(notifier.run(subscription));

        let token = Token::now_v7();
        bus.publish(JobEvent::job_completed(token).with_operation("deploy"));

        let message = rx.recv().await.expect("client should receive a push");
        let Message::Text(text) = message else {
            panic!("expected a text frame");
        };
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["type"], "job_completed");
        assert_eq!(json["id"], token.to_string());
        assert_eq!(json["operation"], "deploy");

        // Dropping the bus ends the forwarding loop.
        drop(bus);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn tokenless_events_are_ignored() {
        let ws_manager = Arc::new(WsManager::new());
        let mut rx = ws_manager.add("conn-1".to_string()).await;

        let bus = EventBus::default();
        let notifier = JobNotifier::new(Arc::clone(&ws_manager));
        let subscription = bus.subscribe();
        let handle = tokio::spawn(notifier.run(subscription));

        bus.publish(JobEvent::new("job.enqueued"));
        drop(bus);
        handle.await.unwrap();

        // Channel drained without any push having been sent.
        assert!(rx.try_recv().is_err());
    }
}
