//! Business integration tests.

mod common;

use common::TestHarness;

use clicker_core::Money;
use clicker_service::handlers::business;
use clicker_service::{income, ServiceError};
use clicker_store::Store;

#[test]
fn catalog_is_numbered_from_one() {
    let catalog = business::catalog();
    assert_eq!(catalog.len(), 10);
    assert_eq!(catalog[0].number, 1);
    assert_eq!(catalog[0].key, "park");
    assert_eq!(catalog[2].price, Money::coins(8_000));
    assert_eq!(catalog[2].profit_per_tick, Money::coins(20));
}

#[test]
fn buy_debits_price_and_counts_units() {
    let harness = TestHarness::new();
    let key = harness.funded_player(1, 20_000);

    let receipt = business::buy(&harness.state, key, 3).unwrap();
    assert_eq!(receipt.business_key, "tattoo");
    assert_eq!(receipt.count, 1);
    assert_eq!(receipt.balance_after, Money::coins(12_000));

    let receipt = business::buy(&harness.state, key, 3).unwrap();
    assert_eq!(receipt.count, 2);

    let portfolio = business::portfolio(&harness.state, key).unwrap();
    assert_eq!(portfolio.unit_count, 2);
    assert_eq!(portfolio.profit_per_tick, Money::coins(40));
    assert_eq!(portfolio.interval_secs, 15);
}

#[test]
fn buy_rejections_change_nothing() {
    let harness = TestHarness::new();
    let key = harness.funded_player(1, 4_999);

    let err = business::buy(&harness.state, key, 8).unwrap_err();
    assert!(matches!(err, ServiceError::InsufficientFunds { .. }));

    let err = business::buy(&harness.state, key, 0).unwrap_err();
    assert!(matches!(err, ServiceError::BadRequest(_)));
    let err = business::buy(&harness.state, key, 11).unwrap_err();
    assert!(matches!(err, ServiceError::BadRequest(_)));

    let player = harness.state.store.get_player(key).unwrap().unwrap();
    assert_eq!(player.money, Money::coins(4_999));
    assert!(business::portfolio(&harness.state, key)
        .unwrap()
        .holdings
        .is_empty());
}

#[test]
fn income_tick_is_additive_across_businesses() {
    let harness = TestHarness::new();
    let key = harness.funded_player(1, 13_000);
    business::buy(&harness.state, key, 3).unwrap(); // tattoo, 20 per tick
    business::buy(&harness.state, key, 8).unwrap(); // barber, 12.5 per tick

    let report = income::run_income_tick(harness.state.store.as_ref()).unwrap();
    assert_eq!(report.players_credited, 1);
    assert_eq!(report.total_credited, Money::from_f64(32.5));

    let player = harness.state.store.get_player(key).unwrap().unwrap();
    assert_eq!(player.money, Money::from_f64(32.5));
}

#[test]
fn reset_businesses_is_idempotent() {
    let harness = TestHarness::new();
    let key = harness.funded_player(1, 5_000);
    business::buy(&harness.state, key, 9).unwrap();

    business::reset(&harness.state, &harness.owner(), key).unwrap();
    business::reset(&harness.state, &harness.owner(), key).unwrap();
    assert_eq!(
        business::profit_per_tick(&harness.state, key).unwrap(),
        Money::ZERO
    );
}

#[test]
fn fractional_balance_survives_reopen() {
    let harness = TestHarness::new();
    let key = harness.funded_player(1, 5_000);
    business::buy(&harness.state, key, 8).unwrap();
    income::run_income_tick(harness.state.store.as_ref()).unwrap();
    harness.state.store.flush().unwrap();

    let raw = std::fs::read_to_string(harness.temp_dir.path().join("game_data.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["users"]["1-42"]["money"], 12.5);

    let reopened = harness.reopen();
    let player = reopened.get_player(key).unwrap().unwrap();
    assert_eq!(player.money, Money::from_f64(12.5));
}
