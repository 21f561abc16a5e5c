//! Player ledger integration tests.

mod common;

use chrono::{Duration, Utc};
use common::TestHarness;

use clicker_core::{Money, ServerId, UpgradeTrack};
use clicker_service::handlers::ledger;
use clicker_service::ServiceError;
use clicker_store::Store;

// ============================================================================
// Start & Profile
// ============================================================================

#[test]
fn start_creates_default_player() {
    let harness = TestHarness::new();
    let profile = ledger::start(&harness.state, TestHarness::key(1)).unwrap();

    assert_eq!(profile.money, Money::ZERO);
    assert_eq!(profile.level, 1);
    assert_eq!(profile.income_per_click, 1);
    assert_eq!(profile.income_per_sec, 0);
    assert_eq!(profile.click_upgrade_cost, Money::coins(50));
    assert_eq!(profile.idle_upgrade_cost, Money::coins(100));
}

#[test]
fn start_twice_conflicts() {
    let harness = TestHarness::new();
    ledger::start(&harness.state, TestHarness::key(1)).unwrap();

    let err = ledger::start(&harness.state, TestHarness::key(1)).unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
}

#[test]
fn profile_of_unknown_player_not_found() {
    let harness = TestHarness::new();
    let err = ledger::profile(&harness.state, TestHarness::key(9)).unwrap_err();
    assert_eq!(err.code(), "not_found");
}

// ============================================================================
// Click & Upgrade
// ============================================================================

#[test]
fn click_respects_cooldown() {
    let harness = TestHarness::new();
    let key = harness.funded_player(1, 0);
    let start = Utc::now();

    let first = ledger::click_at(&harness.state, key, start).unwrap();
    assert_eq!(first.balance_after, Money::coins(1));

    let err = ledger::click_at(&harness.state, key, start + Duration::milliseconds(200));
    assert!(matches!(err, Err(ServiceError::Cooldown { remaining_ms: 300 })));

    let later = ledger::click_at(&harness.state, key, start + Duration::milliseconds(500)).unwrap();
    assert_eq!(later.balance_after, Money::coins(2));
}

#[test]
fn upgrade_scenario() {
    let harness = TestHarness::new();
    let key = harness.funded_player(1, 0);

    let err = ledger::upgrade(&harness.state, key, UpgradeTrack::Click).unwrap_err();
    assert!(matches!(err, ServiceError::InsufficientFunds { .. }));

    harness
        .state
        .store
        .update_player(key, clicker_store::PlayerChange::SetMoney(50))
        .unwrap();
    let receipt = ledger::upgrade(&harness.state, key, UpgradeTrack::Click).unwrap();
    assert_eq!(receipt.balance_after, Money::ZERO);
    assert_eq!(receipt.level, 2);
    assert_eq!(receipt.income_per_click, 2);
    assert_eq!(receipt.next_cost, Money::coins(60));
}

#[test]
fn idle_upgrade_keeps_level() {
    let harness = TestHarness::new();
    let key = harness.funded_player(1, 150);

    let receipt = ledger::upgrade(&harness.state, key, UpgradeTrack::Idle).unwrap();
    assert_eq!(receipt.cost, Money::coins(100));
    assert_eq!(receipt.level, 1);
    assert_eq!(receipt.income_per_sec, 1);
    assert_eq!(receipt.balance_after, Money::coins(50));
}

// ============================================================================
// Leaderboards & Certificates
// ============================================================================

#[test]
fn server_top_orders_by_money() {
    let harness = TestHarness::new();
    harness.funded_player(1, 10);
    harness.funded_player(2, 300);
    harness.funded_player(3, 20);
    harness
        .state
        .store
        .create_player(clicker_core::PlayerKey::new(4, 7), Utc::now())
        .unwrap();

    let top = ledger::server_top(&harness.state, ServerId::new(common::SERVER), 2).unwrap();
    let users: Vec<u64> = top.iter().map(|entry| entry.user_id.get()).collect();
    assert_eq!(users, vec![2, 3]);
    assert_eq!(top[0].position, 1);
    assert_eq!(top[1].position, 2);
}

#[test]
fn certificates_are_listed_per_server() {
    let harness = TestHarness::new();
    let key = harness.funded_player(1, 0);
    harness.funded_player(2, 0);

    let profile = ledger::issue_certificate(&harness.state, key).unwrap();
    assert!(profile.has_certificate);
    assert!(profile.certificate_date.is_some());

    let certified =
        ledger::certified(&harness.state, &harness.owner(), ServerId::new(common::SERVER))
            .unwrap();
    assert_eq!(certified.len(), 1);
    assert_eq!(certified[0].user_id.get(), 1);
}

#[test]
fn profile_serializes_money_as_number() {
    let harness = TestHarness::new();
    let key = harness.funded_player(1, 75);

    let profile = ledger::profile(&harness.state, key).unwrap();
    let json = serde_json::to_value(&profile).unwrap();
    assert_eq!(json["money"], 75);
    assert_eq!(json["level"], 1);
}
