//! Remote reward platform integration.
//!
//! Defines the `RewardPlatform` trait and its error taxonomy, and provides
//! the Humanity testnet implementation. The trait is the seam between the
//! claim engine and the transport: the engine only ever sees tagged
//! `PlatformError` variants, never transport-specific error shapes.

pub mod humanity;

use async_trait::async_trait;

use crate::types::{AccountStatus, ClaimReceipt, Credential};

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Errors surfaced by a reward platform.
///
/// `Timeout` is the only retryable class — the request deadline was
/// exceeded or the transport reported a timeout condition. Everything
/// else fails the current account immediately.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("request timed out")]
    Timeout,

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("{operation} failed after {attempts} retries")]
    RetryExhausted { operation: String, attempts: u32 },
}

impl PlatformError {
    /// Whether the retry executor may try this call again.
    pub fn is_timeout(&self) -> bool {
        matches!(self, PlatformError::Timeout)
    }
}

// ---------------------------------------------------------------------------
// Platform trait
// ---------------------------------------------------------------------------

/// Abstraction over the remote reward service.
///
/// Implementors attach the credential as a bearer token to every call and
/// classify failures into [`PlatformError`] variants.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RewardPlatform: Send + Sync {
    /// Query the reward status for one account.
    async fn fetch_status(&self, credential: &Credential)
        -> Result<AccountStatus, PlatformError>;

    /// Claim the daily reward for one account.
    async fn claim_daily(&self, credential: &Credential)
        -> Result<ClaimReceipt, PlatformError>;

    /// Platform name for logging and identification.
    fn name(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
