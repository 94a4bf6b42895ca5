//! notification-relay: forwards authenticated push requests to Firebase Cloud Messaging.
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
