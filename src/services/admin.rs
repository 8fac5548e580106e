//! Admin service implementation
//!
//! Moderates submitted events and pays out approved ones.

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::database::SharedEventStore;
use crate::models::payout::build_payout_clauses;
use crate::models::{AdminAction, EventStatus, EventWithParticipants, PayoutReceipt, SigningRequest};
use crate::services::wallet::SharedWalletConnector;
use crate::utils::errors::{VolunteerPayError, WalletError, Result};
use crate::utils::logging::{log_admin_action, log_payout};

/// An event as shown to the administrator, with the actions its status allows
#[derive(Debug, Clone)]
pub struct AdminEventView {
    pub event: EventWithParticipants,
    pub actions: &'static [AdminAction],
}

impl From<EventWithParticipants> for AdminEventView {
    fn from(event: EventWithParticipants) -> Self {
        let actions = event.status().admin_actions();
        Self { event, actions }
    }
}

#[derive(Clone)]
pub struct AdminService {
    store: SharedEventStore,
    wallet: SharedWalletConnector,
}

impl AdminService {
    pub fn new(store: SharedEventStore, wallet: SharedWalletConnector) -> Self {
        Self { store, wallet }
    }

    /// All events, most recent first
    pub async fn load(&self) -> Result<Vec<AdminEventView>> {
        let mut events = self.store.list_events().await?;
        events.reverse();
        Ok(events.into_iter().map(AdminEventView::from).collect())
    }

    /// Re-read one event after a change
    pub async fn view(&self, event_id: Uuid) -> Result<AdminEventView> {
        self.store
            .find_event(event_id)
            .await?
            .map(AdminEventView::from)
            .ok_or(VolunteerPayError::EventNotFound { event_id })
    }

    pub async fn approve(&self, admin_id: i64, event_id: Uuid) -> Result<AdminEventView> {
        self.apply(admin_id, event_id, AdminAction::Approve).await
    }

    pub async fn reject(&self, admin_id: i64, event_id: Uuid) -> Result<AdminEventView> {
        self.apply(admin_id, event_id, AdminAction::Reject).await
    }

    /// Settle a `paying` event whose transaction the admin found on chain
    pub async fn mark_paid(&self, admin_id: i64, event_id: Uuid) -> Result<AdminEventView> {
        self.apply(admin_id, event_id, AdminAction::MarkPaid).await
    }

    /// Return a `paying` event to `approved` once no transaction went out
    pub async fn release(&self, admin_id: i64, event_id: Uuid) -> Result<AdminEventView> {
        self.apply(admin_id, event_id, AdminAction::Release).await
    }

    /// Dispatch an action picked from the admin keyboard
    pub async fn perform(&self, admin_id: i64, event_id: Uuid, action: AdminAction) -> Result<ActionResult> {
        match action {
            AdminAction::Payout => {
                let receipt = self.payout(admin_id, event_id).await?;
                let view = self.view(event_id).await?;
                Ok(ActionResult::PaidOut { receipt, view })
            }
            _ => {
                let view = self.apply(admin_id, event_id, action).await?;
                Ok(ActionResult::Updated(view))
            }
        }
    }

    async fn apply(&self, admin_id: i64, event_id: Uuid, action: AdminAction) -> Result<AdminEventView> {
        self.transition(event_id, action.source_status(), action.target_status())
            .await?;

        if matches!(action, AdminAction::MarkPaid | AdminAction::Release) {
            warn!(admin_id = admin_id, event_id = %event_id, action = action.callback_key(), "Payout claim settled by hand");
        }
        log_admin_action(admin_id, action.callback_key(), Some(&event_id.to_string()), None);
        self.view(event_id).await
    }

    /// Pay every participant of an approved event in one multi-clause transaction.
    ///
    /// The event is claimed (`approved → paying`) before signing so a second
    /// trigger cannot submit another transaction. The claim is released only
    /// when the request certainly never reached the chain. Otherwise the event
    /// stays `paying` and the admin settles it with `MarkPaid` or `Release`.
    pub async fn payout(&self, admin_id: i64, event_id: Uuid) -> Result<PayoutReceipt> {
        let session = self
            .wallet
            .session(admin_id)
            .await?
            .ok_or(VolunteerPayError::Wallet(WalletError::NotConnected))?;

        let current = self
            .store
            .find_event(event_id)
            .await?
            .ok_or(VolunteerPayError::EventNotFound { event_id })?;
        if current.status() != EventStatus::Approved {
            return Err(VolunteerPayError::InvalidStateTransition {
                from: current.status().to_string(),
                to: EventStatus::Paying.to_string(),
            });
        }
        if current.participants.is_empty() {
            return Err(VolunteerPayError::InvalidInput(
                "Event has no participants to pay".to_string(),
            ));
        }

        self.transition(event_id, EventStatus::Approved, EventStatus::Paying)
            .await?;

        let receipt = match self.sign_payout(admin_id, event_id, &session.account).await {
            Ok(receipt) => receipt,
            Err(e) => return Err(self.fail_claim(event_id, e).await),
        };

        log_payout(event_id, &session.account, receipt.clauses.len(), &receipt.tx_id);
        log_admin_action(admin_id, "payout", Some(&event_id.to_string()), Some(&receipt.tx_id));

        if let Err(e) = self.transition(event_id, EventStatus::Paying, EventStatus::Paid).await {
            error!(
                event_id = %event_id,
                tx_id = %receipt.tx_id,
                error = %e,
                "Payout submitted but event could not be marked paid"
            );
        }
        Ok(receipt)
    }

    /// Decide what happens to the claim after signing failed
    async fn fail_claim(&self, event_id: Uuid, error: VolunteerPayError) -> VolunteerPayError {
        if matches!(&error, VolunteerPayError::Wallet(wallet) if wallet.may_have_submitted()) {
            error!(event_id = %event_id, error = %error, "Payout outcome unknown, event stays paying");
            return VolunteerPayError::PayoutUnconfirmed {
                event_id,
                reason: error.to_string(),
            };
        }

        error!(event_id = %event_id, error = %error, "Payout failed, releasing claim");
        if let Err(revert) = self
            .transition(event_id, EventStatus::Paying, EventStatus::Approved)
            .await
        {
            error!(event_id = %event_id, error = %revert, "Failed to release payout claim");
        }
        error
    }

    async fn sign_payout(&self, admin_id: i64, event_id: Uuid, signer: &str) -> Result<PayoutReceipt> {
        // Participants are read after the claim so late joins are included.
        let event = self
            .store
            .find_event(event_id)
            .await?
            .ok_or(VolunteerPayError::EventNotFound { event_id })?;
        let clauses = build_payout_clauses(&event.participants)?;
        if clauses.is_empty() {
            return Err(VolunteerPayError::InvalidInput(
                "Event has no participants to pay".to_string(),
            ));
        }

        let (node_url, genesis) = self.wallet.network();
        let request = SigningRequest {
            signer: signer.to_string(),
            clauses,
            node_url,
            genesis,
        };

        let tx_id = self.wallet.sign_and_submit(admin_id, &request).await?;
        info!(event_id = %event_id, tx_id = %tx_id, "Payout transaction accepted");

        Ok(PayoutReceipt {
            event_id,
            tx_id,
            clauses: request.clauses,
        })
    }

    /// Conditional status update, refused up front if the status machine forbids it
    async fn transition(&self, event_id: Uuid, from: EventStatus, to: EventStatus) -> Result<()> {
        if !from.can_transition_to(to) {
            return Err(VolunteerPayError::InvalidStateTransition {
                from: from.to_string(),
                to: to.to_string(),
            });
        }

        match self.store.transition_event_status(event_id, from, to).await? {
            Some(_) => Ok(()),
            None => Err(self.rejected_transition(event_id, to).await),
        }
    }

    async fn rejected_transition(&self, event_id: Uuid, to: EventStatus) -> VolunteerPayError {
        match self.store.find_event(event_id).await {
            Ok(Some(event)) => VolunteerPayError::InvalidStateTransition {
                from: event.status().to_string(),
                to: to.to_string(),
            },
            Ok(None) => VolunteerPayError::EventNotFound { event_id },
            Err(e) => e,
        }
    }
}

/// Result of an admin keyboard action
#[derive(Debug, Clone)]
pub enum ActionResult {
    Updated(AdminEventView),
    PaidOut {
        receipt: PayoutReceipt,
        view: AdminEventView,
    },
}
