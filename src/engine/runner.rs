//! Cycle loop.
//!
//! Loads the credential list, drives the token processor over every
//! account in order with randomized pacing in between, then sleeps until
//! the next fixed-interval cycle boundary. Runs until the process is
//! killed; the only exits are the fatal startup conditions (unreadable
//! token file, empty credential list), which re-apply every cycle since
//! the list is re-read fresh.

use anyhow::Result;
use chrono::Local;
use rust_decimal::Decimal;
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;
use tracing::info;

use super::pacing;
use super::processor::{ProcessOutcome, TokenProcessor};
use super::retry::RetryPolicy;
use crate::accounts;
use crate::config::AppConfig;
use crate::platform::RewardPlatform;
use crate::types::Credential;

// ---------------------------------------------------------------------------
// Cycle report
// ---------------------------------------------------------------------------

/// Summary of a single pass over all accounts.
#[derive(Debug, Clone, Default)]
pub struct CycleReport {
    pub processed: u64,
    pub claimed: u64,
    pub skipped: u64,
    pub failed: u64,
    pub total_claimed: Decimal,
}

impl fmt::Display for CycleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "processed={} claimed={} skipped={} failed={} total_claimed={}",
            self.processed, self.claimed, self.skipped, self.failed, self.total_claimed,
        )
    }
}

// ---------------------------------------------------------------------------
// Runner
// ---------------------------------------------------------------------------

pub struct CycleRunner<P> {
    processor: TokenProcessor<P>,
    config: AppConfig,
}

impl<P: RewardPlatform> CycleRunner<P> {
    pub fn new(platform: P, config: AppConfig) -> Self {
        let retry = RetryPolicy::from(&config.retry);
        Self {
            processor: TokenProcessor::new(platform, retry),
            config,
        }
    }

    /// Run cycles forever.
    ///
    /// Returns only on the fatal startup conditions; everything per-account
    /// is absorbed below this level.
    pub async fn run(&self) -> Result<()> {
        let interval = Duration::from_secs(self.config.claimer.cycle_hours * 3600);

        info!(
            cycle_hours = self.config.claimer.cycle_hours,
            token_file = %self.config.claimer.token_file,
            "Entering claim loop"
        );

        loop {
            // Re-read every cycle so external edits take effect.
            let credentials = accounts::load_credentials(&self.config.claimer.token_file)?;
            if credentials.is_empty() {
                anyhow::bail!(
                    "No credentials found in {}",
                    self.config.claimer.token_file
                );
            }

            let cycle_start = Instant::now();
            info!(
                started_at = %Local::now().format("%Y-%m-%d %H:%M:%S"),
                accounts = credentials.len(),
                "Cycle started"
            );

            let report = self.run_cycle(&credentials).await;

            let elapsed = cycle_start.elapsed();
            info!(
                elapsed_secs = format!("{:.1}", elapsed.as_secs_f64()),
                report = %report,
                "Cycle complete"
            );

            let sleep = pacing::next_cycle_sleep(cycle_start, interval, Instant::now());
            let wake_at = Local::now()
                + chrono::Duration::from_std(sleep).unwrap_or_else(|_| chrono::Duration::zero());
            info!(
                next_cycle_at = %wake_at.format("%Y-%m-%d %H:%M:%S"),
                sleep_hours = format!("{:.2}", sleep.as_secs_f64() / 3600.0),
                "Sleeping until next cycle"
            );
            tokio::time::sleep(sleep).await;
        }
    }

    /// Process every credential in list order, pacing between consecutive
    /// accounts (not after the last).
    pub async fn run_cycle(&self, credentials: &[Credential]) -> CycleReport {
        let mut report = CycleReport::default();

        for (index, credential) in credentials.iter().enumerate() {
            match self.processor.process(credential).await {
                ProcessOutcome::Claimed { amount } => {
                    report.claimed += 1;
                    report.total_claimed += amount;
                }
                ProcessOutcome::NotAvailable => report.skipped += 1,
                ProcessOutcome::Failed { .. } => report.failed += 1,
            }
            report.processed += 1;

            if index + 1 < credentials.len() {
                let wait_secs = pacing::random_delay_secs(
                    self.config.pacing.min_delay_secs,
                    self.config.pacing.max_delay_secs,
                );
                info!(wait_secs, "Waiting before next account");
                tokio::time::sleep(Duration::from_secs(wait_secs)).await;
            }
        }

        report
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
