//! REAPER — Automated Daily Reward Claim Agent
//!
//! Entry point. Loads configuration, initialises structured logging,
//! builds the platform client, and hands control to the cycle runner,
//! which loops forever: claim every account's daily reward, then sleep
//! until the next cycle boundary.

use anyhow::Result;
use tracing::info;

use reaper::config::AppConfig;
use reaper::engine::runner::CycleRunner;
use reaper::platform::humanity::HumanityClient;
use reaper::platform::RewardPlatform;

const BANNER: &str = r#"
 ____  _____    _    ____  _____ ____
|  _ \| ____|  / \  |  _ \| ____|  _ \
| |_) |  _|   / _ \ | |_) |  _| | |_) |
|  _ <| |___ / ___ \|  __/| |___|  _ <
|_| \_\_____/_/   \_\_|   |_____|_| \_\

  Recurring Extraction Agent for Periodic Earned Rewards
  v0.1.0 — Unattended Claim Agent
"#;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    // Initialise structured logging before anything that may log
    init_logging();

    // Load configuration from TOML (defaults when absent)
    let cfg = AppConfig::load("config.toml")?;

    // Print startup banner
    println!("{BANNER}");

    let platform = HumanityClient::new(&cfg.api)?;
    info!(
        platform = platform.name(),
        base_url = %cfg.api.base_url,
        cycle_hours = cfg.claimer.cycle_hours,
        "REAPER starting up"
    );

    // Runs forever; returns only on fatal startup conditions
    // (unreadable token file, empty credential list).
    let runner = CycleRunner::new(platform, cfg);
    runner.run().await
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("reaper=info"));

    let json_logging = std::env::var("REAPER_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
