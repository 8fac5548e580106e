//! Payout transaction model
//!
//! A payout is one multi-clause VeChain transaction: one fixed-value VET
//! transfer per participant, signed by the administrator's connected wallet.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::errors::{VolunteerPayError, Result};
use crate::utils::helpers::is_valid_wallet_address;
use super::participant::Participant;

/// VET paid to every participant of an event
pub const PAYOUT_AMOUNT_VET: u128 = 100;

/// Smallest VET unit: 1 VET = 10^18 wei
pub const WEI_PER_VET: u128 = 1_000_000_000_000_000_000;

/// A single transfer instruction within a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferClause {
    pub to: String,
    /// Amount in wei, `0x`-prefixed hex
    pub value: String,
    pub data: String,
}

impl TransferClause {
    /// Plain VET transfer of `amount_vet` to `to`
    pub fn transfer_vet(to: &str, amount_vet: u128) -> Result<Self> {
        if !is_valid_wallet_address(to) {
            return Err(VolunteerPayError::InvalidInput(format!(
                "Invalid wallet address: {}",
                to
            )));
        }
        let wei = amount_vet.checked_mul(WEI_PER_VET).ok_or_else(|| {
            VolunteerPayError::InvalidInput(format!("Transfer amount overflows: {} VET", amount_vet))
        })?;

        Ok(Self {
            to: to.to_lowercase(),
            value: format!("0x{:x}", wei),
            data: "0x".to_string(),
        })
    }

    /// Transfer value in wei
    pub fn value_wei(&self) -> Option<u128> {
        u128::from_str_radix(self.value.trim_start_matches("0x"), 16).ok()
    }
}

/// Build one fixed-amount transfer clause per participant, in participant order.
///
/// Every attached participant is paid regardless of participant status.
pub fn build_payout_clauses(participants: &[Participant]) -> Result<Vec<TransferClause>> {
    participants
        .iter()
        .map(|participant| TransferClause::transfer_vet(&participant.wallet_address, PAYOUT_AMOUNT_VET))
        .collect()
}

/// Request handed to the wallet connector for signing and submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningRequest {
    /// Account required to sign; the connector may not substitute another one
    pub signer: String,
    pub clauses: Vec<TransferClause>,
    pub node_url: String,
    pub genesis: String,
}

/// Outcome of a submitted payout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoutReceipt {
    pub event_id: Uuid,
    pub tx_id: String,
    pub clauses: Vec<TransferClause>,
}
