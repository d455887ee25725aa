//! Per-account claim workflow.
//!
//! Fetches the account's reward status and, if the daily reward is
//! available, claims it — both through the retry executor. This is the
//! error boundary for one account: every failure is logged and absorbed
//! here, so one account can never take down the cycle.

use rust_decimal::Decimal;
use tracing::{error, info};

use super::retry::{execute_with_retry, RetryPolicy};
use crate::platform::RewardPlatform;
use crate::types::Credential;

/// What happened to one account during a cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessOutcome {
    /// The daily reward was claimed.
    Claimed { amount: Decimal },
    /// The daily reward was not available — normal, no claim attempted.
    NotAvailable,
    /// Status fetch or claim failed terminally for this account.
    Failed { reason: String },
}

/// Drives the fetch-status → conditionally-claim workflow for single
/// accounts against a reward platform.
pub struct TokenProcessor<P> {
    platform: P,
    retry: RetryPolicy,
}

impl<P: RewardPlatform> TokenProcessor<P> {
    pub fn new(platform: P, retry: RetryPolicy) -> Self {
        Self { platform, retry }
    }

    /// Process one account. Never propagates errors — the returned
    /// outcome is for the cycle report only.
    pub async fn process(&self, credential: &Credential) -> ProcessOutcome {
        let account = credential.preview();
        info!(account = %account, "Processing account");

        let status = match execute_with_retry(&self.retry, "User info", || {
            self.platform.fetch_status(credential)
        })
        .await
        {
            Ok(status) => status,
            Err(e) => {
                error!(account = %account, error = %e, "Status fetch failed");
                return ProcessOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        };

        info!(
            account = %account,
            user = %status.nickname,
            total_rewards = %status.total_rewards,
            "Account status fetched"
        );

        if !status.daily_reward_available {
            info!(account = %account, "Daily reward not available, skipping");
            return ProcessOutcome::NotAvailable;
        }

        info!(account = %account, "Daily reward available, claiming");

        match execute_with_retry(&self.retry, "Claim reward", || {
            self.platform.claim_daily(credential)
        })
        .await
        {
            Ok(receipt) => {
                info!(account = %account, amount = %receipt.amount, "Daily reward claimed");
                ProcessOutcome::Claimed {
                    amount: receipt.amount,
                }
            }
            Err(e) => {
                error!(account = %account, error = %e, "Claim failed");
                ProcessOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
