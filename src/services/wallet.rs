//! Wallet connector service implementation
//!
//! Account discovery and transaction signing are delegated to an external
//! wallet connector. A Telegram user links a wallet by opening the connect
//! link; the connector then reports the linked account for that user and
//! relays signing requests to the wallet for confirmation.

use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::settings::WalletConfig;
use crate::models::payout::SigningRequest;
use crate::utils::errors::{VolunteerPayError, WalletError, WalletResult, Result};
use crate::utils::logging::log_api_error;

pub type SharedWalletConnector = Arc<dyn WalletConnector>;

/// A Telegram user together with the wallet account they connected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSession {
    pub user_id: i64,
    pub account: String,
}

#[derive(Debug, Deserialize)]
struct ChallengeResponse {
    message: String,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    account: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SignResponse {
    txid: String,
}

#[async_trait]
pub trait WalletConnector: Send + Sync {
    /// Session challenge issued by the connector at startup
    async fn fetch_challenge(&self) -> WalletResult<String>;

    /// Account connected by `user_id`, if any
    async fn connected_account(&self, user_id: i64) -> WalletResult<Option<String>>;

    /// Ask the wallet of `user_id` to sign `request` and submit it to the node.
    /// Resolves to the transaction id once the user confirms.
    async fn sign_and_submit(&self, user_id: i64, request: &SigningRequest) -> WalletResult<String>;

    /// Link the user opens to connect a wallet
    fn connect_url(&self, user_id: i64, challenge: Option<&str>) -> String;

    /// Node URL and network genesis transactions are submitted to
    fn network(&self) -> (String, String);

    async fn session(&self, user_id: i64) -> WalletResult<Option<WalletSession>> {
        Ok(self
            .connected_account(user_id)
            .await?
            .map(|account| WalletSession { user_id, account }))
    }
}

/// HTTP client for the wallet connector service
#[derive(Clone, Debug)]
pub struct WalletConnectorClient {
    client: Client,
    config: WalletConfig,
}

impl WalletConnectorClient {
    pub fn new(config: WalletConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("VolunteerPay-Bot/1.0")
            .build()
            .map_err(VolunteerPayError::Http)?;

        Ok(Self { client, config })
    }

    fn base_url(&self) -> &str {
        self.config.connector_url.trim_end_matches('/')
    }

    fn map_send_error(e: reqwest::Error) -> WalletError {
        if e.is_timeout() {
            WalletError::Timeout
        } else if e.is_connect() {
            WalletError::ServiceUnavailable
        } else {
            WalletError::RequestFailed(e.to_string())
        }
    }

    async fn parse_json<T: for<'de> Deserialize<'de>>(response: reqwest::Response) -> WalletResult<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| WalletError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl WalletConnector for WalletConnectorClient {
    async fn fetch_challenge(&self) -> WalletResult<String> {
        let url = format!("{}/api/challenge", self.base_url());
        debug!(url = %url, "Fetching wallet connector challenge");

        let response = self.client
            .get(&url)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            let message = format!("HTTP {}: {}", status, error_text);
            log_api_error("wallet_connector", &message, Some(url.as_str()));
            return Err(WalletError::RequestFailed(message));
        }

        let body: ChallengeResponse = Self::parse_json(response).await?;
        info!("Wallet connector challenge received");
        Ok(body.message)
    }

    async fn connected_account(&self, user_id: i64) -> WalletResult<Option<String>> {
        let url = format!("{}/sessions/{}", self.base_url(), user_id);
        debug!(user_id = user_id, "Looking up connected wallet");

        let response = self.client
            .get(&url)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            let message = format!("HTTP {}: {}", status, error_text);
            log_api_error("wallet_connector", &message, Some(url.as_str()));
            return Err(WalletError::RequestFailed(message));
        }

        let body: SessionResponse = Self::parse_json(response).await?;
        Ok(body.account.filter(|account| !account.is_empty()))
    }

    async fn sign_and_submit(&self, user_id: i64, request: &SigningRequest) -> WalletResult<String> {
        let url = format!("{}/sessions/{}/sign/tx", self.base_url(), user_id);
        info!(
            user_id = user_id,
            signer = %request.signer,
            clauses = request.clauses.len(),
            "Requesting transaction signature"
        );

        let response = self.client
            .post(&url)
            .timeout(Duration::from_secs(self.config.signing_timeout_seconds))
            .json(request)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            warn!(user_id = user_id, "Signing session not found");
            return Err(WalletError::NotConnected);
        }
        if status.is_client_error() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(user_id = user_id, status = %status, "Signing request rejected");
            return Err(WalletError::Rejected(if error_text.is_empty() {
                status.to_string()
            } else {
                error_text
            }));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = format!("HTTP {}: {}", status, error_text);
            log_api_error("wallet_connector", &message, Some(url.as_str()));
            return Err(WalletError::RequestFailed(message));
        }

        let body: SignResponse = Self::parse_json(response).await?;
        if body.txid.is_empty() {
            return Err(WalletError::InvalidResponse("empty transaction id".to_string()));
        }
        Ok(body.txid)
    }

    fn connect_url(&self, user_id: i64, challenge: Option<&str>) -> String {
        let mut link = format!(
            "{}/connect?session={}&genesis={}",
            self.base_url(),
            user_id,
            urlencoding::encode(&self.config.genesis)
        );
        if let Some(challenge) = challenge {
            link.push_str("&challenge=");
            link.push_str(&urlencoding::encode(challenge));
        }
        link
    }

    fn network(&self) -> (String, String) {
        (self.config.node_url.clone(), self.config.genesis.clone())
    }
}
