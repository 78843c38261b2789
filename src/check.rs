// src/check.rs
use async_trait::async_trait;
use thiserror::Error;

/// Faults raised while driving the outage page. The split matters: element
/// waits that run out of budget and everything else map to different exit
/// codes in single-run mode.
#[derive(Debug, Error)]
pub enum InspectError {
    #[error("timed out waiting for {what}")]
    ElementTimeout { what: String },
    #[error("webdriver session could not be established: {0}")]
    Session(String),
    #[error("browser interaction failed: {0}")]
    Command(String),
}

/// Result of one scheduled check attempt. Produced once per run, consumed
/// immediately by the reporter, never persisted.
#[derive(Debug)]
pub enum CheckOutcome {
    /// Destination appears (and is visible) in the outage panel.
    Found,
    /// Destination absent or not visible.
    NotFound,
    /// The attempt could not complete.
    Error(InspectError),
}

impl CheckOutcome {
    /// Process exit code for single-run mode. The scheduled loop never exits
    /// on an outcome; it logs the same classification and moves on.
    pub fn exit_code(&self) -> u8 {
        match self {
            CheckOutcome::Found | CheckOutcome::NotFound => 0,
            CheckOutcome::Error(InspectError::ElementTimeout { .. }) => 2,
            CheckOutcome::Error(_) => 3,
        }
    }
}

/// Narrow capability interface over the browser-driven page interaction.
/// The watcher and reporter carry no dependency on how the page is driven.
#[async_trait]
pub trait OutageInspector: Send + Sync {
    /// `Ok(true)` iff `destination` is listed and visible for `city` on
    /// tomorrow's planned-outage panel.
    async fn check(&self, city: &str, destination: &str) -> Result<bool, InspectError>;
}

pub fn classify(result: Result<bool, InspectError>) -> CheckOutcome {
    match result {
        Ok(true) => CheckOutcome::Found,
        Ok(false) => CheckOutcome::NotFound,
        Err(e) => CheckOutcome::Error(e),
    }
}

// --- Test helper ---
/// Scripted inspector that plays back queued results and counts how many
/// sessions it opened and released.
pub struct MockInspector {
    script: std::sync::Mutex<std::collections::VecDeque<Result<bool, InspectError>>>,
    pub sessions_opened: std::sync::atomic::AtomicUsize,
    pub sessions_released: std::sync::atomic::AtomicUsize,
}

impl MockInspector {
    pub fn new(script: Vec<Result<bool, InspectError>>) -> Self {
        Self {
            script: std::sync::Mutex::new(script.into()),
            sessions_opened: std::sync::atomic::AtomicUsize::new(0),
            sessions_released: std::sync::atomic::AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl OutageInspector for MockInspector {
    async fn check(&self, _city: &str, _destination: &str) -> Result<bool, InspectError> {
        use std::sync::atomic::Ordering;
        self.sessions_opened.fetch_add(1, Ordering::SeqCst);
        let result = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(false));
        self.sessions_released.fetch_add(1, Ordering::SeqCst);
        result
    }
}
