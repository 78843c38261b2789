// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod check;
pub mod config;
pub mod inspector;
pub mod notify;
pub mod schedule;
pub mod watcher;

// ---- Re-exports for stable public API ----
pub use crate::check::{classify, CheckOutcome, InspectError, OutageInspector};
pub use crate::config::Config;
pub use crate::notify::HealthcheckReporter;
pub use crate::schedule::{next_trigger, TriggerHours};
