use super::{ProviderError, ProviderResponse, PushProvider};
use crate::models::ProviderMessage;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// In-process provider used when FCM is disabled and in tests.
///
/// The default mode only counts sends. `recording()` additionally keeps every
/// message passed to `send`, including rejected ones; it is meant for tests.
#[derive(Default)]
pub struct MockPushProvider {
    failure: Option<String>,
    send_count: AtomicU64,
    recorded: Option<Mutex<Vec<ProviderMessage>>>,
}

impl MockPushProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider that keeps a copy of every message it is asked to send.
    pub fn recording() -> Self {
        Self {
            recorded: Some(Mutex::new(Vec::new())),
            ..Self::default()
        }
    }

    /// A provider whose every send fails with `SendFailed(message)`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn send_count(&self) -> u64 {
        self.send_count.load(Ordering::SeqCst)
    }

    /// Recorded messages; always empty unless built with `recording()`.
    pub fn sent_messages(&self) -> Vec<ProviderMessage> {
        self.recorded
            .as_ref()
            .map(|recorded| {
                recorded
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .clone()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl PushProvider for MockPushProvider {
    async fn send(&self, message: &ProviderMessage) -> Result<ProviderResponse, ProviderError> {
        let count = self.send_count.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(recorded) = &self.recorded {
            recorded
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .push(message.clone());
        }

        if let Some(failure) = &self.failure {
            return Err(ProviderError::SendFailed(failure.clone()));
        }

        tracing::info!(
            method = message.target.method(),
            title = %message.notification.title,
            "[MOCK] Push notification would be sent"
        );

        Ok(ProviderResponse::success(Some(format!("mock-push-{}", count))))
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
