// tests/healthcheck_pings.rs
use httpmock::prelude::*;
use outage_watch::check::{CheckOutcome, InspectError};
use outage_watch::config::Config;
use outage_watch::notify::HealthcheckReporter;

fn config_for(server: &MockServer, with_error_endpoint: bool) -> Config {
    Config {
        city: "Konstancin-Jeziorna".into(),
        destination: "Warszawska".into(),
        healthcheck_url: server.url("/ping"),
        error_healthcheck_url: with_error_endpoint.then(|| server.url("/ping-err")),
        trigger_hours: vec![10, 16, 21],
    }
}

#[tokio::test]
async fn found_targets_only_the_alarm_variant() {
    let server = MockServer::start_async().await;
    let alarm = server
        .mock_async(|when, then| {
            when.method(GET).path("/ping/fail");
            then.status(200);
        })
        .await;
    let heartbeat = server
        .mock_async(|when, then| {
            when.method(GET).path("/ping");
            then.status(200);
        })
        .await;

    let reporter = HealthcheckReporter::new(&config_for(&server, false));
    reporter.report(&CheckOutcome::Found).await;

    alarm.assert_async().await;
    heartbeat.assert_hits_async(0).await;
}

#[tokio::test]
async fn not_found_targets_only_the_heartbeat() {
    let server = MockServer::start_async().await;
    let alarm = server
        .mock_async(|when, then| {
            when.method(GET).path("/ping/fail");
            then.status(200);
        })
        .await;
    let heartbeat = server
        .mock_async(|when, then| {
            when.method(GET).path("/ping");
            then.status(200);
        })
        .await;

    let reporter = HealthcheckReporter::new(&config_for(&server, false));
    reporter.report(&CheckOutcome::NotFound).await;

    heartbeat.assert_async().await;
    alarm.assert_hits_async(0).await;
}

#[tokio::test]
async fn error_targets_the_error_endpoint_when_configured() {
    let server = MockServer::start_async().await;
    let error_endpoint = server
        .mock_async(|when, then| {
            when.method(GET).path("/ping-err");
            then.status(200);
        })
        .await;
    let heartbeat = server
        .mock_async(|when, then| {
            when.method(GET).path("/ping");
            then.status(200);
        })
        .await;

    let reporter = HealthcheckReporter::new(&config_for(&server, true));
    let outcome = CheckOutcome::Error(InspectError::ElementTimeout {
        what: "consent dialog".into(),
    });
    reporter.report(&outcome).await;

    error_endpoint.assert_async().await;
    heartbeat.assert_hits_async(0).await;
}

#[tokio::test]
async fn error_without_error_endpoint_pings_nothing() {
    let server = MockServer::start_async().await;
    let heartbeat = server
        .mock_async(|when, then| {
            when.method(GET).path("/ping");
            then.status(200);
        })
        .await;
    let alarm = server
        .mock_async(|when, then| {
            when.method(GET).path("/ping/fail");
            then.status(200);
        })
        .await;

    let reporter = HealthcheckReporter::new(&config_for(&server, false));
    let outcome = CheckOutcome::Error(InspectError::Session("connection refused".into()));
    reporter.report(&outcome).await;

    heartbeat.assert_hits_async(0).await;
    alarm.assert_hits_async(0).await;
}

#[tokio::test]
async fn ping_failures_are_swallowed() {
    // Non-2xx responses are not errors for a fire-and-forget ping.
    let server = MockServer::start_async().await;
    let heartbeat = server
        .mock_async(|when, then| {
            when.method(GET).path("/ping");
            then.status(500);
        })
        .await;

    let reporter = HealthcheckReporter::new(&config_for(&server, false));
    reporter.report(&CheckOutcome::NotFound).await;
    heartbeat.assert_async().await;

    // An unreachable endpoint must not propagate either.
    let dead = Config {
        city: "Konstancin-Jeziorna".into(),
        destination: "Warszawska".into(),
        healthcheck_url: "http://127.0.0.1:1/ping".into(),
        error_healthcheck_url: None,
        trigger_hours: vec![10, 16, 21],
    };
    HealthcheckReporter::new(&dead)
        .report(&CheckOutcome::NotFound)
        .await;
}

#[tokio::test]
async fn trailing_slash_on_the_base_url_is_tolerated() {
    let server = MockServer::start_async().await;
    let alarm = server
        .mock_async(|when, then| {
            when.method(GET).path("/ping/fail");
            then.status(200);
        })
        .await;

    let mut config = config_for(&server, false);
    config.healthcheck_url = format!("{}/", config.healthcheck_url);
    let reporter = HealthcheckReporter::new(&config);
    reporter.report(&CheckOutcome::Found).await;

    alarm.assert_async().await;
}
