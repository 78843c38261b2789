// src/notify/mod.rs
use std::time::Duration;

use reqwest::Client;

use crate::check::CheckOutcome;
use crate::config::Config;

/// Bound on every outbound ping.
const PING_TIMEOUT: Duration = Duration::from_secs(10);

/// Issues the per-outcome healthcheck pings. Delivery is best-effort: a
/// failed request is logged, never bubbled into the check result.
pub struct HealthcheckReporter {
    client: Client,
    healthcheck_url: String,
    error_healthcheck_url: Option<String>,
}

impl HealthcheckReporter {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            healthcheck_url: config.healthcheck_url.trim_end_matches('/').to_string(),
            error_healthcheck_url: config.error_healthcheck_url.clone(),
        }
    }

    /// Issue exactly one ping for `outcome`.
    ///
    /// The mapping is inverted for `Found`: a listed outage is the condition
    /// the monitoring side should alarm on, so it targets the `/fail`
    /// variant, while `NotFound` is the ordinary heartbeat.
    pub async fn report(&self, outcome: &CheckOutcome) {
        match outcome {
            CheckOutcome::Found => {
                self.ping(&format!("{}/fail", self.healthcheck_url)).await;
            }
            CheckOutcome::NotFound => {
                self.ping(&self.healthcheck_url).await;
            }
            CheckOutcome::Error(e) => match &self.error_healthcheck_url {
                Some(url) => self.ping(url).await,
                None => {
                    tracing::debug!(error = %e, "no error healthcheck configured, skipping ping")
                }
            },
        }
    }

    /// Fire-and-forget GET; the response is logged, not inspected further.
    async fn ping(&self, url: &str) {
        match self.client.get(url).timeout(PING_TIMEOUT).send().await {
            Ok(rsp) => {
                tracing::debug!(url, status = %rsp.status(), "healthcheck ping delivered")
            }
            Err(e) => tracing::warn!(url, error = %e, "healthcheck ping failed"),
        }
    }
}
