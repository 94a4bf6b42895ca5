use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::{Validate, ValidationErrors};

/// Inbound `/send` payload. Every field is optional on the wire; presence rules
/// are applied by the handler so each gap maps to its own error.
#[derive(Debug, Default, Clone, Deserialize, Validate)]
pub struct NotificationRequest {
    #[validate(required, length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    #[validate(required, length(min = 1, message = "Body cannot be empty"))]
    pub body: Option<String>,
    pub topic: Option<String>,
    pub token: Option<String>,
    pub data: Option<HashMap<String, String>>,
    pub secret: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl NotificationRequest {
    /// Validated title and body.
    pub fn content(&self) -> Result<(&str, &str), ValidationErrors> {
        self.validate()?;
        Ok((
            self.title.as_deref().unwrap_or_default(),
            self.body.as_deref().unwrap_or_default(),
        ))
    }

    /// Topic wins over token when both are supplied.
    pub fn target(&self) -> Option<DeliveryTarget> {
        present(&self.topic)
            .map(|topic| DeliveryTarget::Topic(topic.to_string()))
            .or_else(|| present(&self.token).map(|token| DeliveryTarget::Token(token.to_string())))
    }

    pub fn has_both_targets(&self) -> bool {
        present(&self.topic).is_some() && present(&self.token).is_some()
    }
}

/// Where the provider delivers a message. Serialized as a top-level `topic` or `token` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryTarget {
    Topic(String),
    Token(String),
}

impl DeliveryTarget {
    pub fn method(&self) -> &'static str {
        match self {
            DeliveryTarget::Topic(_) => "topic",
            DeliveryTarget::Token(_) => "token",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushNotification {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AndroidConfig {
    pub priority: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApnsConfig {
    pub headers: ApnsHeaders,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApnsHeaders {
    #[serde(rename = "apns-priority")]
    pub apns_priority: &'static str,
}

/// Outbound message in the FCM HTTP v1 `message` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderMessage {
    pub notification: PushNotification,
    pub android: AndroidConfig,
    pub apns: ApnsConfig,
    pub data: HashMap<String, String>,
    #[serde(flatten)]
    pub target: DeliveryTarget,
}

impl ProviderMessage {
    /// Builds a message with the fixed high-priority hints for Android and APNs.
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        data: HashMap<String, String>,
        target: DeliveryTarget,
    ) -> Self {
        Self {
            notification: PushNotification {
                title: title.into(),
                body: body.into(),
            },
            android: AndroidConfig { priority: "high" },
            apns: ApnsConfig {
                headers: ApnsHeaders {
                    apns_priority: "10",
                },
            },
            data,
            target,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendResponse {
    pub ok: bool,
    pub method: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

impl SendResponse {
    pub fn accepted(target: &DeliveryTarget) -> Self {
        Self {
            ok: true,
            method: target.method(),
            topic: match target {
                DeliveryTarget::Topic(topic) => Some(topic.clone()),
                DeliveryTarget::Token(_) => None,
            },
        }
    }
}
