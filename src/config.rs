// src/config.rs
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Docker-secret mount checked first; the env var is the fallback.
pub const SECRET_CONFIG_PATH: &str = "/run/secrets/config.json";
pub const ENV_CONFIG: &str = "CONFIG_JSON";

fn default_trigger_hours() -> Vec<u32> {
    vec![10, 16, 21]
}

/// Immutable runtime configuration, loaded once at startup and passed by
/// reference into the watcher and reporter.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Searched location, e.g. "Konstancin-Jeziorna".
    pub city: String,
    /// Street-name substring looked up in the outage panel.
    pub destination: String,
    /// Primary monitoring endpoint. Pinged bare on NotFound, with a `/fail`
    /// suffix on Found.
    pub healthcheck_url: String,
    /// Secondary endpoint pinged when the check attempt itself fails.
    #[serde(default)]
    pub error_healthcheck_url: Option<String>,
    /// Daily UTC trigger hours.
    #[serde(default = "default_trigger_hours")]
    pub trigger_hours: Vec<u32>,
}

impl Config {
    /// Load from the secret mount, falling back to $CONFIG_JSON.
    pub fn load() -> Result<Config> {
        Self::load_from(Path::new(SECRET_CONFIG_PATH))
    }

    pub fn load_from(path: &Path) -> Result<Config> {
        let raw = if path.exists() {
            std::fs::read_to_string(path)
                .with_context(|| format!("reading config from {}", path.display()))?
        } else {
            std::env::var(ENV_CONFIG).map_err(|_| {
                anyhow!(
                    "no config found: {} is absent and {} is unset",
                    path.display(),
                    ENV_CONFIG
                )
            })?
        };
        let config: Config = serde_json::from_str(&raw).context("parsing config JSON")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.city.trim().is_empty() {
            return Err(anyhow!("config field `city` is empty"));
        }
        if self.destination.trim().is_empty() {
            return Err(anyhow!("config field `destination` is empty"));
        }
        if self.healthcheck_url.trim().is_empty() {
            return Err(anyhow!("config field `healthcheck_url` is empty"));
        }
        crate::schedule::TriggerHours::new(&self.trigger_hours)
            .context("config field `trigger_hours`")?;
        Ok(())
    }
}
