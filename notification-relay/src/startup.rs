//! Application startup and lifecycle management.

use crate::config::{FcmConfig, RelayConfig};
use crate::handlers::{health_check, metrics_endpoint, readiness_check, send_notification};
use crate::services::{FcmProvider, MockPushProvider, PushProvider};
use axum::{
    http::Method,
    middleware,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{metrics_middleware, request_id_middleware};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub provider: Arc<dyn PushProvider>,
}

impl AppState {
    pub fn new(config: RelayConfig, provider: Arc<dyn PushProvider>) -> Self {
        Self {
            config: Arc::new(config),
            provider,
        }
    }
}

/// FCM when enabled, otherwise the logging mock.
pub fn select_provider(config: &FcmConfig) -> Arc<dyn PushProvider> {
    if config.enabled {
        tracing::info!(project_id = %config.project_id, "FCM push provider initialized");
        Arc::new(FcmProvider::new(config.clone()))
    } else {
        tracing::warn!(
            "FCM provider disabled, using mock push provider; notifications will not be delivered"
        );
        Arc::new(MockPushProvider::new())
    }
}

/// Reflects the caller's origin and requested headers.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(AllowHeaders::mirror_request())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_endpoint))
        .route("/send", post(send_notification))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer())
                .layer(middleware::from_fn(request_id_middleware))
                .layer(middleware::from_fn(metrics_middleware)),
        )
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application, choosing the push provider from configuration.
    pub async fn build(config: RelayConfig) -> Result<Self, AppError> {
        let provider = select_provider(&config.fcm);
        Self::build_with_provider(config, provider).await
    }

    /// Build the application around an already constructed provider.
    pub async fn build_with_provider(
        config: RelayConfig,
        provider: Arc<dyn PushProvider>,
    ) -> Result<Self, AppError> {
        if config.weather.secret.is_none() {
            tracing::warn!("No secret configured for weather notifications; /send will answer 500");
        }

        // Port 0 binds a random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(port, provider = provider.name(), "Notification relay bound");

        let router = build_router(AppState::new(config, provider));

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
