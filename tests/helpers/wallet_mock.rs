//! Scripted wallet connector

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use VolunteerPay::models::SigningRequest;
use VolunteerPay::services::{SharedWalletConnector, WalletConnector};
use VolunteerPay::utils::errors::{WalletError, WalletResult};

pub const TEST_NODE_URL: &str = "https://testnet.vechain.org";

#[derive(Default)]
pub struct MockWalletConnector {
    accounts: Mutex<HashMap<i64, String>>,
    sign_responses: Mutex<VecDeque<WalletResult<String>>>,
    sign_requests: Mutex<Vec<(i64, SigningRequest)>>,
    challenge: Mutex<Option<String>>,
}

impl MockWalletConnector {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn shared(self: &Arc<Self>) -> SharedWalletConnector {
        self.clone()
    }

    pub fn connect(&self, user_id: i64, account: &str) {
        self.accounts.lock().unwrap().insert(user_id, account.to_string());
    }

    pub fn set_challenge(&self, challenge: &str) {
        *self.challenge.lock().unwrap() = Some(challenge.to_string());
    }

    /// Queue the result of the next signing request
    pub fn add_sign_response(&self, response: WalletResult<String>) {
        self.sign_responses.lock().unwrap().push_back(response);
    }

    pub fn sign_requests(&self) -> Vec<(i64, SigningRequest)> {
        self.sign_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl WalletConnector for MockWalletConnector {
    async fn fetch_challenge(&self) -> WalletResult<String> {
        self.challenge
            .lock()
            .unwrap()
            .clone()
            .ok_or(WalletError::ServiceUnavailable)
    }

    async fn connected_account(&self, user_id: i64) -> WalletResult<Option<String>> {
        Ok(self.accounts.lock().unwrap().get(&user_id).cloned())
    }

    async fn sign_and_submit(&self, user_id: i64, request: &SigningRequest) -> WalletResult<String> {
        self.sign_requests.lock().unwrap().push((user_id, request.clone()));
        // Give concurrent callers a chance to interleave while "the user confirms"
        tokio::task::yield_now().await;
        self.sign_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(WalletError::RequestFailed("no scripted response".to_string())))
    }

    fn connect_url(&self, user_id: i64, challenge: Option<&str>) -> String {
        format!("http://connector.test/connect?session={}&challenge={}", user_id, challenge.unwrap_or(""))
    }

    fn network(&self) -> (String, String) {
        (TEST_NODE_URL.to_string(), "test".to_string())
    }
}
