//! Shared types for the REAPER agent.
//!
//! These types form the data model used across all modules: the account
//! credential and the transient results of the two remote operations.
//! Nothing here is persisted — statuses and receipts are consumed
//! immediately after each call.

use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use std::fmt;

// ---------------------------------------------------------------------------
// Credential
// ---------------------------------------------------------------------------

/// How many leading characters of a credential may appear in log output.
const PREVIEW_LEN: usize = 8;

/// An opaque bearer token identifying one remote account.
///
/// Wrapped in [`SecretString`] so the full token never leaks through
/// `Debug` or accidental formatting. Log lines use [`Credential::preview`].
#[derive(Clone)]
pub struct Credential(SecretString);

impl Credential {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(SecretString::new(raw.into()))
    }

    /// The full token, for attaching to an `Authorization` header.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// A short prefix safe for log lines, never the full token.
    pub fn preview(&self) -> String {
        let raw = self.0.expose_secret();
        let head: String = raw.chars().take(PREVIEW_LEN).collect();
        if raw.chars().count() > PREVIEW_LEN {
            format!("{head}…")
        } else {
            head
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential({}[REDACTED])", self.preview())
    }
}

// ---------------------------------------------------------------------------
// Remote-call results
// ---------------------------------------------------------------------------

/// Result of a status query for one account. Consumed immediately after
/// each fetch; never stored between accounts or cycles.
#[derive(Debug, Clone)]
pub struct AccountStatus {
    pub nickname: String,
    /// Cumulative rewards earned by this account so far.
    pub total_rewards: Decimal,
    /// Whether today's reward can currently be claimed.
    pub daily_reward_available: bool,
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (total: {} | daily: {})",
            self.nickname,
            self.total_rewards,
            if self.daily_reward_available { "available" } else { "claimed" },
        )
    }
}

/// Result of a successful claim: the amount granted.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimReceipt {
    pub amount: Decimal,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
