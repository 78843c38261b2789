//! Planned-outage watcher binary entrypoint.
//! Loads configuration, then either runs a single check (`--once`) or the
//! continuous daily scheduler.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use outage_watch::config::Config;
use outage_watch::inspector::PgeOutagePage;
use outage_watch::notify::HealthcheckReporter;
use outage_watch::schedule::TriggerHours;
use outage_watch::watcher;

/// Exit code for configuration faults at startup. Check outcomes map to
/// their own codes in `--once` mode; the scheduled loop never exits on them.
const CONFIG_FAULT_EXIT: u8 = 1;

#[derive(Parser)]
#[command(name = "outage-watch")]
#[command(
    about = "Watches the PGE planned-outage page for a street and pings a healthcheck",
    long_about = None
)]
struct Cli {
    /// Run a single check and exit with the outcome's code instead of looping
    #[arg(long)]
    once: bool,

    /// WebDriver endpoint driving the headless browser
    #[arg(long, env = "WEBDRIVER_URL", default_value = "http://localhost:4444")]
    webdriver_url: String,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("outage_watch=info,warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("configuration fault: {e:#}");
            return ExitCode::from(CONFIG_FAULT_EXIT);
        }
    };
    // already validated at load time; constructed here to normalize ordering
    let hours = match TriggerHours::new(&config.trigger_hours) {
        Ok(hours) => hours,
        Err(e) => {
            tracing::error!("configuration fault: {e}");
            return ExitCode::from(CONFIG_FAULT_EXIT);
        }
    };

    tracing::info!(
        city = %config.city,
        destination = %config.destination,
        once = cli.once,
        "outage watcher starting"
    );

    let inspector = PgeOutagePage::new(cli.webdriver_url.clone());
    let reporter = HealthcheckReporter::new(&config);

    if cli.once {
        let outcome = watcher::run_check(&inspector, &reporter, &config).await;
        return ExitCode::from(outcome.exit_code());
    }

    watcher::run_scheduled(&inspector, &reporter, &config, &hours).await;
    ExitCode::SUCCESS
}
