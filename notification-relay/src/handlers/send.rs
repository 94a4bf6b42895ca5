use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use secrecy::ExposeSecret;
use service_core::utils::secrets_match;

use crate::config::WeatherConfig;
use crate::error::{RelayError, INVALID_BODY, TARGET_REQUIRED, TITLE_AND_BODY_REQUIRED};
use crate::models::{NotificationRequest, ProviderMessage, SendResponse};
use crate::services::record_send;
use crate::startup::AppState;

pub const SECRET_HEADER: &str = "x-weather-secret";

/// `POST /send`: authenticate, validate, dispatch exactly once.
#[tracing::instrument(skip_all)]
pub async fn send_notification(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<SendResponse>), RelayError> {
    authorize(&state.config.weather, &headers, &body)?;

    let request = parse_request(&body)?;

    let (title, text) = request.content().map_err(|e| {
        tracing::debug!(error = %e, "Rejected request without title or body");
        RelayError::BadRequest(TITLE_AND_BODY_REQUIRED)
    })?;
    let target = request
        .target()
        .ok_or(RelayError::BadRequest(TARGET_REQUIRED))?;

    if request.has_both_targets() {
        // Topic silently wins; the token is dropped.
        tracing::debug!("Both topic and token supplied, dispatching to topic");
    }

    let message = ProviderMessage::new(
        title,
        text,
        request.data.clone().unwrap_or_default(),
        target.clone(),
    );

    match state.provider.send(&message).await {
        Ok(response) => {
            record_send(target.method(), "sent");
            tracing::info!(
                provider = state.provider.name(),
                method = target.method(),
                provider_id = response.provider_id.as_deref().unwrap_or_default(),
                "Notification dispatched"
            );
            Ok((StatusCode::ACCEPTED, Json(SendResponse::accepted(&target))))
        }
        Err(e) => {
            record_send(target.method(), "failed");
            tracing::error!(
                provider = state.provider.name(),
                method = target.method(),
                error = %e,
                "Send failed"
            );
            Err(RelayError::Provider(e))
        }
    }
}

/// Shared-secret gate. Runs before the payload is decoded.
pub fn authorize(config: &WeatherConfig, headers: &HeaderMap, body: &[u8]) -> Result<(), RelayError> {
    let Some(expected) = config.secret.as_ref() else {
        tracing::warn!("No secret configured for weather notifications");
        return Err(RelayError::ServerMisconfigured);
    };

    let candidate = header_secret(headers).or_else(|| body_secret(body));

    match candidate {
        Some(candidate) if secrets_match(expected.expose_secret(), &candidate) => Ok(()),
        _ => {
            tracing::debug!("Rejected request with missing or mismatched secret");
            Err(RelayError::Unauthorized)
        }
    }
}

fn header_secret(headers: &HeaderMap) -> Option<String> {
    headers
        .get(SECRET_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

/// Only the `secret` string field is looked at; anything undecodable yields nothing.
fn body_secret(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()?
        .get("secret")?
        .as_str()
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

fn parse_request(body: &[u8]) -> Result<NotificationRequest, RelayError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(NotificationRequest::default());
    }

    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "Rejected undecodable request body");
        RelayError::BadRequest(INVALID_BODY)
    })
}
