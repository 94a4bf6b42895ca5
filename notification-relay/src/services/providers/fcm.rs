use super::{ProviderError, ProviderResponse, PushProvider};
use crate::config::FcmConfig;
use crate::models::ProviderMessage;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

const METADATA_TOKEN_PATH: &str = "/computeMetadata/v1/instance/service-accounts/default/token";

/// Metadata tokens are refreshed this long before they expire.
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Firebase Cloud Messaging HTTP v1 client.
pub struct FcmProvider {
    config: FcmConfig,
    client: Client,
    cached_token: Mutex<Option<CachedToken>>,
}

struct CachedToken {
    access_token: String,
    refresh_at: Instant,
}

#[derive(Debug, Serialize)]
struct FcmRequest<'a> {
    message: &'a ProviderMessage,
}

#[derive(Debug, Deserialize)]
struct FcmResponse {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MetadataToken {
    access_token: String,
    #[serde(default)]
    expires_in: u64,
}

impl FcmProvider {
    pub fn new(config: FcmConfig) -> Self {
        Self {
            config,
            client: Client::new(),
            cached_token: Mutex::new(None),
        }
    }

    fn send_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/messages:send",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.project_id
        )
    }

    async fn access_token(&self) -> Result<String, ProviderError> {
        if let Some(token) = &self.config.access_token {
            return Ok(token.expose_secret().clone());
        }

        // Held across the fetch so concurrent sends share one refresh.
        let mut cached = self.cached_token.lock().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.refresh_at {
                return Ok(token.access_token.clone());
            }
        }

        let token = self.fetch_metadata_token().await?;
        let access_token = token.access_token.clone();
        *cached = Some(CachedToken {
            refresh_at: Instant::now()
                + Duration::from_secs(token.expires_in).saturating_sub(TOKEN_REFRESH_MARGIN),
            access_token: token.access_token,
        });

        Ok(access_token)
    }

    /// Default service account credentials, as on Cloud Functions / Cloud Run.
    async fn fetch_metadata_token(&self) -> Result<MetadataToken, ProviderError> {
        let url = format!(
            "{}{}",
            self.config.metadata_url.trim_end_matches('/'),
            METADATA_TOKEN_PATH
        );

        let response = self
            .client
            .get(&url)
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .map_err(|e| {
                ProviderError::Authentication(format!("Failed to reach metadata server: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(ProviderError::Authentication(format!(
                "Metadata server returned status {}",
                response.status()
            )));
        }

        response.json().await.map_err(|e| {
            ProviderError::Authentication(format!("Failed to parse metadata token: {}", e))
        })
    }
}

#[async_trait]
impl PushProvider for FcmProvider {
    async fn send(&self, message: &ProviderMessage) -> Result<ProviderResponse, ProviderError> {
        if self.config.project_id.is_empty() {
            return Err(ProviderError::Configuration(
                "FCM project_id is not configured".to_string(),
            ));
        }

        let access_token = self.access_token().await?;

        let response = self
            .client
            .post(self.send_url())
            .bearer_auth(&access_token)
            .json(&FcmRequest { message })
            .send()
            .await
            .map_err(|e| ProviderError::Connection(format!("Failed to connect to FCM: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::SendFailed(format!(
                "FCM API returned error status {}: {}",
                status, body
            )));
        }

        let fcm_response: FcmResponse = response.json().await.map_err(|e| {
            ProviderError::SendFailed(format!("Failed to parse FCM response: {}", e))
        })?;

        tracing::info!(
            method = message.target.method(),
            message_name = fcm_response.name.as_deref().unwrap_or_default(),
            "Push notification sent via FCM"
        );

        Ok(ProviderResponse::success(fcm_response.name))
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.config.project_id.is_empty() {
            return Err(ProviderError::Configuration(
                "FCM project_id is not configured".to_string(),
            ));
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "fcm"
    }
}
