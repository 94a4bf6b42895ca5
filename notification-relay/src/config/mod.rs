use config::Config as Layered;
use secrecy::SecretString;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

pub const DEFAULT_FCM_API_BASE_URL: &str = "https://fcm.googleapis.com";
pub const DEFAULT_METADATA_URL: &str = "http://metadata.google.internal";

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub common: core_config::Config,
    pub weather: WeatherConfig,
    pub fcm: FcmConfig,
}

#[derive(Debug, Clone, Default)]
pub struct WeatherConfig {
    /// Shared secret callers must present. `None` means the relay is not configured
    /// and every `/send` request is answered with 500.
    pub secret: Option<SecretString>,
}

#[derive(Debug, Clone)]
pub struct FcmConfig {
    pub enabled: bool,
    pub project_id: String,
    /// Static OAuth2 bearer token. When absent the token is fetched from the
    /// Google Cloud metadata server on each send.
    pub access_token: Option<SecretString>,
    pub api_base_url: String,
    pub metadata_url: String,
}

impl Default for FcmConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            project_id: String::new(),
            access_token: None,
            api_base_url: DEFAULT_FCM_API_BASE_URL.to_string(),
            metadata_url: DEFAULT_METADATA_URL.to_string(),
        }
    }
}

impl WeatherConfig {
    pub fn with_secret(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        Self {
            secret: (!secret.is_empty()).then(|| SecretString::new(secret)),
        }
    }
}

impl RelayConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_sources(core_config::layered()?, |key| env::var(key).ok())
    }

    /// Resolves the relay configuration from the layered file/`APP__*` source
    /// and a process environment lookup. Empty values count as unset.
    pub fn from_sources(
        layered: Layered,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let var = |key: &str| env(key).filter(|v| !v.is_empty());

        // The configuration file wins over the environment variable.
        let secret = layered
            .get_string("weather.secret")
            .ok()
            .filter(|s| !s.is_empty())
            .or_else(|| var("WEATHER_NOTIFICATION_SECRET"))
            .map(SecretString::new);

        let common: core_config::Config = layered.try_deserialize()?;

        let fcm = FcmConfig {
            enabled: var("FCM_ENABLED")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            project_id: var("FCM_PROJECT_ID").unwrap_or_default(),
            access_token: var("FCM_ACCESS_TOKEN").map(SecretString::new),
            api_base_url: var("FCM_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_FCM_API_BASE_URL.to_string()),
            metadata_url: var("FCM_METADATA_URL")
                .unwrap_or_else(|| DEFAULT_METADATA_URL.to_string()),
        };

        if fcm.enabled && fcm.project_id.is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "FCM_PROJECT_ID is required when FCM_ENABLED=true"
            )));
        }

        Ok(RelayConfig {
            common,
            weather: WeatherConfig { secret },
            fcm,
        })
    }
}
