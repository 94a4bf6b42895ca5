use notification_relay::config::RelayConfig;
use notification_relay::startup::Application;
use service_core::config::{env_or, non_empty_env};
use service_core::observability::{init_metrics, init_tracing};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let log_level = env_or("LOG_LEVEL", "info");
    let otlp_endpoint = non_empty_env("OTLP_ENDPOINT");
    init_tracing("notification-relay", &log_level, otlp_endpoint.as_deref());

    init_metrics();

    let config = RelayConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    tracing::info!(port = app.port(), "Starting notification-relay");

    app.run_until_stopped().await
}
