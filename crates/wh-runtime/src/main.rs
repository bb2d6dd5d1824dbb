//! # WeakHands Runtime
//!
//! Runs one scenario against a fresh local deployment and prints the report
//! as JSON.
//!
//! ## Configuration
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `WH_SCENARIO` | built-in price unlock | Scenario file |
//! | `WH_FEED_DECIMALS` | `8` | Decimals of the local feed |
//! | `WH_INITIAL_PRICE` | `2000` | First feed answer in USD |
//! | `WH_START_TIME` | wall clock | Simulated chain start |
//! | `WH_ORACLE_MAX_PRICE_AGE_SECS` | disabled | Reject older answers |
//! | `WH_METRICS` | `false` | Print Prometheus metrics after the run |
//!
//! Logging is configured through the `wh-telemetry` variables.

use anyhow::{bail, Context, Result};
use tracing::info;
use wh_runtime::{RuntimeConfig, Scenario, ScenarioRunner, VaultContainer};
use wh_telemetry::init_telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    let config = RuntimeConfig::from_env().context("Invalid runtime configuration")?;

    let _telemetry = init_telemetry(config.telemetry.clone())
        .await
        .context("Failed to initialize telemetry")?;

    info!("===========================================");
    info!("  WeakHands Runtime v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let container = VaultContainer::new(&config).context("Failed to wire components")?;
    let description = container
        .oracle
        .verify_feed()
        .await
        .context("Price feed verification failed")?;
    info!(feed = %description, "[wh-runtime] price feed verified");

    let scenario = match &config.scenario_path {
        Some(path) => Scenario::load(path)
            .with_context(|| format!("Failed to load scenario {}", path.display()))?,
        None => Scenario::price_unlock(),
    };

    let report = ScenarioRunner::new(&container)
        .run(&scenario)
        .await
        .with_context(|| format!("Scenario '{}' aborted", scenario.name))?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    if config.print_metrics {
        print!("{}", wh_02_lock_vault::metrics::render());
    }

    if !report.passed {
        bail!("Scenario '{}' failed its expectations", report.name);
    }
    Ok(())
}
