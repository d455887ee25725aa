//! Humanity Protocol testnet integration.
//!
//! Both operations are bodyless POSTs (an empty JSON object on the wire)
//! authenticated with `Authorization: Bearer <token>`. Each request
//! carries its own fixed deadline; exceeding it surfaces as
//! `PlatformError::Timeout`, the sole retryable failure class.
//!
//! Base URL: https://testnet.humanity.org/api
//! Endpoints: POST /user/userInfo, POST /rewards/daily/claim

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{PlatformError, RewardPlatform};
use crate::config::ApiConfig;
use crate::types::{AccountStatus, ClaimReceipt, Credential};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

const PLATFORM_NAME: &str = "humanity";

// ---------------------------------------------------------------------------
// API response types (Humanity JSON → Rust)
// ---------------------------------------------------------------------------

/// Envelope returned by `/user/userInfo`.
#[derive(Debug, Deserialize)]
struct UserInfoResponse {
    data: UserInfoData,
}

/// The API mixes conventions: `nickName`/`totalRewards` are camelCase
/// while `daily_reward` is snake_case. We only deserialize the fields
/// we need.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserInfoData {
    #[serde(default)]
    nick_name: String,

    #[serde(default)]
    total_rewards: Decimal,

    #[serde(rename = "daily_reward")]
    daily_reward: DailyReward,
}

#[derive(Debug, Deserialize)]
struct DailyReward {
    available: bool,
}

/// Response from `/rewards/daily/claim`.
#[derive(Debug, Deserialize)]
struct ClaimResponse {
    amount: Decimal,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Humanity testnet platform client.
pub struct HumanityClient {
    http: Client,
    base_url: String,
}

impl HumanityClient {
    /// Create a new Humanity client.
    ///
    /// The per-request deadline is set on the underlying `reqwest::Client`
    /// so every call through this client inherits it.
    pub fn new(cfg: &ApiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_millis(cfg.request_timeout_ms))
            .user_agent("REAPER/0.1.0 (daily-reward-agent)")
            .build()
            .context("Failed to build HTTP client for Humanity")?;

        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
        })
    }

    // -- Internal helpers ------------------------------------------------

    /// POST an empty JSON body to `path` with the credential attached as a
    /// bearer token, and deserialize the response.
    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        credential: &Credential,
    ) -> Result<T, PlatformError> {
        let url = format!("{}{path}", self.base_url);

        debug!(url = %url, account = %credential.preview(), "Humanity API request");

        let resp = self
            .http
            .post(&url)
            .bearer_auth(credential.expose())
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(classify)?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(PlatformError::Api { status, body });
        }

        resp.json::<T>().await.map_err(classify)
    }

    fn to_account_status(resp: UserInfoResponse) -> AccountStatus {
        AccountStatus {
            nickname: resp.data.nick_name,
            total_rewards: resp.data.total_rewards,
            daily_reward_available: resp.data.daily_reward.available,
        }
    }
}

/// Map a transport error onto the platform taxonomy. Timeouts (request
/// deadline exceeded, including connect timeouts) are the retryable class;
/// undecodable bodies are `Malformed`; everything else is `Transport`.
fn classify(err: reqwest::Error) -> PlatformError {
    if err.is_timeout() {
        PlatformError::Timeout
    } else if err.is_decode() {
        PlatformError::Malformed(err.to_string())
    } else {
        PlatformError::Transport(err.to_string())
    }
}

// ---------------------------------------------------------------------------
// RewardPlatform trait implementation
// ---------------------------------------------------------------------------

#[async_trait]
impl RewardPlatform for HumanityClient {
    async fn fetch_status(
        &self,
        credential: &Credential,
    ) -> Result<AccountStatus, PlatformError> {
        let resp: UserInfoResponse = self.post_json("/user/userInfo", credential).await?;
        Ok(Self::to_account_status(resp))
    }

    async fn claim_daily(
        &self,
        credential: &Credential,
    ) -> Result<ClaimReceipt, PlatformError> {
        let resp: ClaimResponse = self.post_json("/rewards/daily/claim", credential).await?;
        Ok(ClaimReceipt { amount: resp.amount })
    }

    fn name(&self) -> &str {
        PLATFORM_NAME
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
