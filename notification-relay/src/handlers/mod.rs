//! HTTP handlers for notification-relay.

pub mod health;
pub mod send;

pub use health::{health_check, metrics_endpoint, readiness_check};
pub use send::{send_notification, SECRET_HEADER};
