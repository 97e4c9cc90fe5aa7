//! Dispatchd in-process event infrastructure.
//!
//! - [`EventBus`]: publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`JobEvent`]: the canonical job lifecycle event envelope.
//!
//! Completion of a tracked job is announced here as a best-effort side
//! channel; pollers never depend on it.

pub mod bus;

pub use bus::{EventBus, JobEvent, EVENT_JOB_COMPLETED};
