//! End-to-end cycle scenarios over the mock platform.
//!
//! All timing-sensitive tests run on tokio's paused clock, so pacing and
//! backoff sleeps auto-advance instead of burning wall-clock time.

use rust_decimal_macros::dec;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

use reaper::config::{AppConfig, PacingConfig};
use reaper::engine::runner::CycleRunner;
use reaper::types::Credential;

use crate::mock_platform::MockPlatform;

type CallLog = Arc<Mutex<Vec<(String, String)>>>;

fn creds(tokens: &[&str]) -> Vec<Credential> {
    tokens.iter().map(|t| Credential::new(*t)).collect()
}

fn count(log: &CallLog, operation: &str, token: &str) -> usize {
    log.lock()
        .unwrap()
        .iter()
        .filter(|(op, tok)| op == operation && tok == token)
        .count()
}

/// Config with deterministic pacing so elapsed time is exact.
fn fixed_pacing_config(delay_secs: u64) -> AppConfig {
    AppConfig {
        pacing: PacingConfig {
            min_delay_secs: delay_secs,
            max_delay_secs: delay_secs,
        },
        ..AppConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Ordering and pacing
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn test_accounts_processed_in_list_order() {
    let platform = MockPlatform::new();
    platform.set_available("tokA", false);
    platform.set_available("tokB", false);
    platform.set_available("tokC", false);
    let log = platform.call_log();

    let runner = CycleRunner::new(platform, AppConfig::default());
    let report = runner.run_cycle(&creds(&["tokA", "tokB", "tokC"])).await;

    assert_eq!(report.processed, 3);
    assert_eq!(
        *log.lock().unwrap(),
        vec![
            ("status".to_string(), "tokA".to_string()),
            ("status".to_string(), "tokB".to_string()),
            ("status".to_string(), "tokC".to_string()),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_pacing_delays_stay_within_bounds() {
    let platform = MockPlatform::new();
    platform.set_available("tokA", false);
    platform.set_available("tokB", false);
    platform.set_available("tokC", false);

    // Stock pacing bounds: two delays, each in [30, 60] seconds.
    let runner = CycleRunner::new(platform, AppConfig::default());
    let started = Instant::now();
    runner.run_cycle(&creds(&["tokA", "tokB", "tokC"])).await;

    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(60), "elapsed {elapsed:?}");
    assert!(elapsed <= Duration::from_secs(120), "elapsed {elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn test_exactly_n_minus_1_pacing_delays() {
    let platform = MockPlatform::new();
    platform.set_available("tokA", false);
    platform.set_available("tokB", false);
    platform.set_available("tokC", false);

    let runner = CycleRunner::new(platform, fixed_pacing_config(30));
    let started = Instant::now();
    runner.run_cycle(&creds(&["tokA", "tokB", "tokC"])).await;

    // Two pacing sleeps of exactly 30s; none after the last account.
    assert_eq!(started.elapsed(), Duration::from_secs(60));
}

// ---------------------------------------------------------------------------
// Claim decisions
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn test_unavailable_skips_claim_available_claims_once() {
    let platform = MockPlatform::new();
    platform.set_available("tokA", false);
    platform.set_available("tokB", true);
    platform.set_claim_amount("tokB", dec!(13.7));
    let log = platform.call_log();

    let runner = CycleRunner::new(platform, fixed_pacing_config(0));
    let report = runner.run_cycle(&creds(&["tokA", "tokB"])).await;

    assert_eq!(count(&log, "claim", "tokA"), 0);
    assert_eq!(count(&log, "claim", "tokB"), 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.claimed, 1);
    assert_eq!(report.total_claimed, dec!(13.7));
}

#[tokio::test(start_paused = true)]
async fn test_duplicates_are_processed_redundantly() {
    let platform = MockPlatform::new();
    platform.set_available("tokA", false);
    let log = platform.call_log();

    let runner = CycleRunner::new(platform, fixed_pacing_config(0));
    let report = runner.run_cycle(&creds(&["tokA", "tokA"])).await;

    assert_eq!(report.processed, 2);
    assert_eq!(count(&log, "status", "tokA"), 2);
}

#[tokio::test]
async fn test_empty_credential_list_is_empty_report() {
    let runner = CycleRunner::new(MockPlatform::new(), AppConfig::default());
    let report = runner.run_cycle(&[]).await;
    assert_eq!(report.processed, 0);
    assert_eq!(report.claimed, 0);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.failed, 0);
}

// ---------------------------------------------------------------------------
// Failure isolation
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn test_one_account_failure_does_not_abort_cycle() {
    let platform = MockPlatform::new();
    platform.fail_status_for("tokA");
    platform.set_available("tokB", true);
    let log = platform.call_log();

    let runner = CycleRunner::new(platform, fixed_pacing_config(0));
    let report = runner.run_cycle(&creds(&["tokA", "tokB"])).await;

    assert_eq!(report.failed, 1);
    assert_eq!(report.claimed, 1);
    assert_eq!(count(&log, "status", "tokB"), 1);
    assert_eq!(count(&log, "claim", "tokB"), 1);
}

#[tokio::test(start_paused = true)]
async fn test_claim_failure_counts_as_failed() {
    let platform = MockPlatform::new();
    platform.set_available("tokA", true);
    platform.fail_claim_for("tokA");

    let runner = CycleRunner::new(platform, fixed_pacing_config(0));
    let report = runner.run_cycle(&creds(&["tokA"])).await;

    assert_eq!(report.failed, 1);
    assert_eq!(report.claimed, 0);
}

#[tokio::test(start_paused = true)]
async fn test_forced_outage_fails_every_account() {
    let platform = MockPlatform::new();
    platform.set_error("simulated outage");
    let log = platform.call_log();

    let runner = CycleRunner::new(platform, fixed_pacing_config(0));
    let report = runner.run_cycle(&creds(&["tokA", "tokB"])).await;

    assert_eq!(report.failed, 2);
    assert_eq!(count(&log, "claim", "tokA"), 0);
    assert_eq!(count(&log, "claim", "tokB"), 0);
}

// ---------------------------------------------------------------------------
// Fatal startup conditions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_missing_token_file_aborts_before_any_processing() {
    let platform = MockPlatform::new();
    let log = platform.call_log();

    let mut config = AppConfig::default();
    config.claimer.token_file = "definitely-missing-tokens.txt".to_string();

    let runner = CycleRunner::new(platform, config);
    let err = runner.run().await.unwrap_err();

    assert!(err.to_string().contains("Failed to read token file"));
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_token_file_aborts() {
    let mut path = std::env::temp_dir();
    path.push(format!("reaper_it_empty_{}.txt", uuid::Uuid::new_v4()));
    std::fs::write(&path, "\n  \n").unwrap();

    let mut config = AppConfig::default();
    config.claimer.token_file = path.to_string_lossy().to_string();

    let runner = CycleRunner::new(MockPlatform::new(), config);
    let err = runner.run().await.unwrap_err();
    assert!(err.to_string().contains("No credentials found"));

    std::fs::remove_file(&path).unwrap();
}
