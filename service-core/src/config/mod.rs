use crate::error::AppError;
use config::{Config as Cfg, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8080
}

/// Optional `configuration.{toml,yaml,json}` file overlaid with `APP__*` environment variables.
///
/// Services read their own sections (e.g. `weather.secret`) from the same source.
pub fn layered() -> Result<Cfg, AppError> {
    let config = Cfg::builder()
        .add_source(File::with_name("configuration").required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    Ok(config)
}

/// Reads an environment variable, treating unset and empty the same way.
pub fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

pub fn env_or(key: &str, default: &str) -> String {
    non_empty_env(key).unwrap_or_else(|| default.to_string())
}
