//! Event listing and join flow tests

mod helpers;

use assert_matches::assert_matches;
use helpers::*;
use VolunteerPay::models::EventStatus;
use VolunteerPay::services::{EventListingService, JoinForm, JoinOutcome, JoinStart};
use VolunteerPay::VolunteerPayError;

fn listing(store: &std::sync::Arc<InMemoryEventStore>, wallet: &std::sync::Arc<MockWalletConnector>) -> EventListingService {
    EventListingService::new(store.shared(), wallet.shared())
}

#[tokio::test]
async fn test_join_enabled_only_for_approved_events() {
    let store = InMemoryEventStore::new();
    let wallet = MockWalletConnector::new();
    for status in EventStatus::ALL {
        store.seed_event(status.as_str(), status);
    }

    let cards = listing(&store, &wallet).load().await.unwrap();

    assert_eq!(cards.len(), EventStatus::ALL.len());
    for card in cards {
        assert_eq!(card.join_enabled, card.event.status() == EventStatus::Approved);
    }
}

#[tokio::test]
async fn test_listing_keeps_creation_order_and_participants() {
    let store = InMemoryEventStore::new();
    let wallet = MockWalletConnector::new();
    let first = store.seed_event("Park cleanup", EventStatus::Approved);
    let second = store.seed_event("Library reading", EventStatus::Pending);
    store.seed_participant(first.id, "Ann", &random_wallet());

    let cards = listing(&store, &wallet).load().await.unwrap();

    assert_eq!(cards[0].event.id(), first.id);
    assert_eq!(cards[0].event.participants.len(), 1);
    assert_eq!(cards[1].event.id(), second.id);
    assert!(cards[1].event.participants.is_empty());
}

#[tokio::test]
async fn test_join_requires_connected_wallet() {
    let store = InMemoryEventStore::new();
    let wallet = MockWalletConnector::new();
    let event = store.seed_event("Park cleanup", EventStatus::Approved);
    let service = listing(&store, &wallet);

    let start = service.begin_join(VOLUNTEER_ID, event.id).await.unwrap();
    assert_matches!(start, JoinStart::Blocked(JoinOutcome::WalletRequired));

    let outcome = service.join(VOLUNTEER_ID, event.id, join_form()).await.unwrap();
    assert_matches!(outcome, JoinOutcome::WalletRequired);
    assert!(store.participants_of(event.id).is_empty());
}

#[tokio::test]
async fn test_join_rejects_blank_fields() {
    let store = InMemoryEventStore::new();
    let wallet = MockWalletConnector::new();
    wallet.connect(VOLUNTEER_ID, &random_wallet());
    let event = store.seed_event("Park cleanup", EventStatus::Approved);
    let service = listing(&store, &wallet);

    let result = service.join(VOLUNTEER_ID, event.id, JoinForm::new("Ann", "   ")).await;

    assert_matches!(result, Err(VolunteerPayError::InvalidInput(message)) => {
        assert_eq!(message, "Please enter both name and contact number");
    });
    assert!(store.participants_of(event.id).is_empty());
}

#[tokio::test]
async fn test_successful_join_records_pending_participant() {
    let store = InMemoryEventStore::new();
    let wallet = MockWalletConnector::new();
    let account = random_wallet();
    wallet.connect(VOLUNTEER_ID, &account);
    let event = store.seed_event("Park cleanup", EventStatus::Approved);
    let service = listing(&store, &wallet);

    assert_matches!(
        service.begin_join(VOLUNTEER_ID, event.id).await.unwrap(),
        JoinStart::Ready(session) if session.account == account
    );

    let outcome = service
        .join(VOLUNTEER_ID, event.id, JoinForm::new("  Ann Lee ", "555-0100"))
        .await
        .unwrap();

    assert_matches!(outcome, JoinOutcome::Joined(participant) => {
        assert_eq!(participant.name, "Ann Lee");
        assert_eq!(participant.wallet_address, account);
        assert_eq!(participant.status, "pending");
    });
    assert_eq!(store.participants_of(event.id).len(), 1);
}

#[tokio::test]
async fn test_second_join_with_same_wallet_is_refused() {
    let store = InMemoryEventStore::new();
    let wallet = MockWalletConnector::new();
    wallet.connect(VOLUNTEER_ID, &random_wallet());
    let event = store.seed_event("Park cleanup", EventStatus::Approved);
    let service = listing(&store, &wallet);

    service.join(VOLUNTEER_ID, event.id, join_form()).await.unwrap();

    assert_matches!(
        service.begin_join(VOLUNTEER_ID, event.id).await.unwrap(),
        JoinStart::Blocked(JoinOutcome::AlreadyJoined)
    );
    assert_matches!(
        service.join(VOLUNTEER_ID, event.id, join_form()).await.unwrap(),
        JoinOutcome::AlreadyJoined
    );
    assert_eq!(store.participants_of(event.id).len(), 1);
}

#[tokio::test]
async fn test_unique_constraint_reports_already_joined() {
    let store = InMemoryEventStore::new();
    let wallet = MockWalletConnector::new();
    wallet.connect(VOLUNTEER_ID, &random_wallet());
    let event = store.seed_event("Park cleanup", EventStatus::Approved);
    let service = listing(&store, &wallet);

    service.join(VOLUNTEER_ID, event.id, join_form()).await.unwrap();
    store.skip_duplicate_lookup(true);

    let outcome = service.join(VOLUNTEER_ID, event.id, join_form()).await.unwrap();

    assert_matches!(outcome, JoinOutcome::AlreadyJoined);
    assert_eq!(store.participants_of(event.id).len(), 1);
}

#[tokio::test]
async fn test_join_refused_once_event_leaves_approved() {
    let store = InMemoryEventStore::new();
    let wallet = MockWalletConnector::new();
    wallet.connect(VOLUNTEER_ID, &random_wallet());
    let service = listing(&store, &wallet);

    for status in [EventStatus::Pending, EventStatus::Disapproved, EventStatus::Paying, EventStatus::Paid] {
        let event = store.seed_event("Closed event", status);
        let outcome = service.join(VOLUNTEER_ID, event.id, join_form()).await.unwrap();
        assert_matches!(outcome, JoinOutcome::EventNotOpen);
        assert!(store.participants_of(event.id).is_empty());
    }
}

#[tokio::test]
async fn test_join_unknown_event() {
    let store = InMemoryEventStore::new();
    let wallet = MockWalletConnector::new();
    wallet.connect(VOLUNTEER_ID, &random_wallet());

    let missing = uuid::Uuid::new_v4();
    let result = listing(&store, &wallet).join(VOLUNTEER_ID, missing, join_form()).await;

    assert_matches!(result, Err(VolunteerPayError::EventNotFound { event_id }) if event_id == missing);
}

#[tokio::test]
async fn test_different_wallets_join_same_event() {
    let store = InMemoryEventStore::new();
    let wallet = MockWalletConnector::new();
    wallet.connect(VOLUNTEER_ID, &random_wallet());
    wallet.connect(VOLUNTEER_ID + 1, &random_wallet());
    let event = store.seed_event("Park cleanup", EventStatus::Approved);
    let service = listing(&store, &wallet);

    service.join(VOLUNTEER_ID, event.id, join_form()).await.unwrap();
    service.join(VOLUNTEER_ID + 1, event.id, join_form()).await.unwrap();

    assert_eq!(store.participants_of(event.id).len(), 2);
}

#[tokio::test]
async fn test_malformed_connected_account_cannot_join() {
    let store = InMemoryEventStore::new();
    let wallet = MockWalletConnector::new();
    wallet.connect(VOLUNTEER_ID, "not-a-wallet");
    let event = store.seed_event("Park cleanup", EventStatus::Approved);
    let service = listing(&store, &wallet);

    let start = service.begin_join(VOLUNTEER_ID, event.id).await;
    let outcome = service.join(VOLUNTEER_ID, event.id, join_form()).await;

    assert_matches!(start, Err(VolunteerPayError::InvalidInput(message)) if message.contains("not-a-wallet"));
    assert_matches!(outcome, Err(VolunteerPayError::InvalidInput(_)));
    assert!(store.participants_of(event.id).is_empty());
}

#[tokio::test]
async fn test_checksummed_account_is_stored_lowercase() {
    let store = InMemoryEventStore::new();
    let wallet = MockWalletConnector::new();
    let account = random_wallet();
    wallet.connect(VOLUNTEER_ID, &format!("0x{}", account[2..].to_uppercase()));
    let event = store.seed_event("Park cleanup", EventStatus::Approved);
    store.seed_participant(event.id, "Earlier", &account);
    let service = listing(&store, &wallet);

    let outcome = service.join(VOLUNTEER_ID, event.id, join_form()).await.unwrap();

    assert_matches!(outcome, JoinOutcome::AlreadyJoined);
    assert_eq!(store.participants_of(event.id).len(), 1);
}
