#![allow(dead_code)]

use notification_relay::config::{FcmConfig, RelayConfig, WeatherConfig};
use notification_relay::handlers::SECRET_HEADER;
use notification_relay::services::MockPushProvider;
use notification_relay::startup::Application;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;

pub const SECRET: &str = "s3cr3t";

pub fn test_config(secret: Option<&str>) -> RelayConfig {
    RelayConfig {
        // Use random port for testing (port 0)
        common: CoreConfig { port: 0 },
        weather: secret.map(WeatherConfig::with_secret).unwrap_or_default(),
        fcm: FcmConfig::default(),
    }
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub provider: Arc<MockPushProvider>,
    client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(Some(SECRET), MockPushProvider::recording()).await
    }

    pub async fn spawn_with(secret: Option<&str>, provider: MockPushProvider) -> Self {
        let provider = Arc::new(provider);

        let app = Application::build_with_provider(test_config(secret), provider.clone())
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            provider,
            client,
        }
    }

    /// POST a JSON body to `/send`, optionally with the secret header.
    pub async fn send(
        &self,
        secret_header: Option<&str>,
        body: &serde_json::Value,
    ) -> reqwest::Response {
        let mut request = self
            .client
            .post(format!("{}/send", self.address))
            .json(body);

        if let Some(secret) = secret_header {
            request = request.header(SECRET_HEADER, secret);
        }

        request.send().await.expect("Failed to execute request")
    }
}
