// src/watcher.rs
use chrono::{Duration as ChronoDuration, Utc};

use crate::check::{classify, CheckOutcome, OutageInspector};
use crate::config::Config;
use crate::notify::HealthcheckReporter;
use crate::schedule::{next_trigger, TriggerHours};

/// One full attempt: inspect, classify, report. Never fails; faults are
/// folded into the returned outcome.
pub async fn run_check(
    inspector: &dyn OutageInspector,
    reporter: &HealthcheckReporter,
    config: &Config,
) -> CheckOutcome {
    tracing::info!(
        city = %config.city,
        destination = %config.destination,
        "checking tomorrow's outage panel"
    );
    let outcome = classify(inspector.check(&config.city, &config.destination).await);
    match &outcome {
        CheckOutcome::Found => {
            tracing::info!(
                destination = %config.destination,
                "destination listed in tomorrow's planned outages"
            )
        }
        CheckOutcome::NotFound => {
            tracing::info!(destination = %config.destination, "destination not listed")
        }
        CheckOutcome::Error(e) => tracing::error!(error = %e, "check attempt failed"),
    }
    reporter.report(&outcome).await;
    outcome
}

/// Unbounded daily loop over the configured trigger hours. Each slot fires at
/// most once; a slow attempt never shifts later slots, which stay anchored to
/// wall-clock time. Attempt-level faults are reported and the loop continues.
pub async fn run_scheduled(
    inspector: &dyn OutageInspector,
    reporter: &HealthcheckReporter,
    config: &Config,
    hours: &TriggerHours,
) {
    let mut basis = Utc::now();
    loop {
        let slot = next_trigger(basis, hours);
        let wait = (slot - Utc::now()).to_std().unwrap_or_default();
        tracing::info!(slot = %slot, wait_secs = wait.as_secs(), "sleeping until next check");
        tokio::time::sleep(wait).await;

        run_check(inspector, reporter, config).await;

        // advance past the fired slot so it can never re-fire
        basis = Utc::now().max(slot + ChronoDuration::seconds(1));
    }
}
