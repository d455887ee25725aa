//! Delay scheduling.
//!
//! Two pure computations: the randomized inter-account pacing delay and
//! the end-of-cycle sleep. The actual suspension is `tokio::time::sleep`
//! at the call sites, so the clock can be paused in tests.

use rand::Rng;
use std::time::Duration;
use tokio::time::Instant;

/// A uniformly distributed delay over the closed interval `[min, max]`,
/// in whole seconds. Degenerate bounds (`min >= max`) yield `min`.
pub fn random_delay_secs(min: u64, max: u64) -> u64 {
    if min >= max {
        return min;
    }
    rand::thread_rng().gen_range(min..=max)
}

/// Time remaining until the next cycle boundary: `cycle_start + interval`
/// measured against `now`, saturating at zero when processing overran the
/// interval (the next cycle then starts immediately).
pub fn next_cycle_sleep(cycle_start: Instant, interval: Duration, now: Instant) -> Duration {
    (cycle_start + interval).saturating_duration_since(now)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
