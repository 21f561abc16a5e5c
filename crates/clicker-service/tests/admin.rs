//! Admin integration tests.

mod common;

use common::{TestHarness, OWNER};

use clicker_core::{Money, UserId};
use clicker_service::auth::is_authorized;
use clicker_service::handlers::{admin, business, casino};
use clicker_service::{AdminAuth, ServiceError};
use clicker_store::Store;

#[test]
fn owner_manages_roster() {
    let harness = TestHarness::new();
    let owner = harness.owner();
    assert!(owner.is_owner);

    assert!(admin::grant_admin(&harness.state, &owner, UserId::new(5)).unwrap());
    assert!(!admin::grant_admin(&harness.state, &owner, UserId::new(5)).unwrap());

    let roster = admin::list_admins(&harness.state).unwrap();
    assert_eq!(roster.owner_id, Some(UserId::new(OWNER)));
    assert_eq!(roster.admins, vec![UserId::new(5)]);

    assert!(admin::revoke_admin(&harness.state, &owner, UserId::new(5)).unwrap());
    assert!(!is_authorized(&harness.state, UserId::new(5)).unwrap());
}

#[test]
fn roster_admin_cannot_grant() {
    let harness = TestHarness::new();
    admin::grant_admin(&harness.state, &harness.owner(), UserId::new(5)).unwrap();

    let auth = AdminAuth::authorize(&harness.state, UserId::new(5)).unwrap();
    assert!(!auth.is_owner);

    let err = admin::grant_admin(&harness.state, &auth, UserId::new(6)).unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden));
}

#[test]
fn strangers_are_forbidden() {
    let harness = TestHarness::new();
    let err = AdminAuth::authorize(&harness.state, UserId::new(77)).unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden));
    assert!(AdminAuth::authorize_owner(&harness.state, UserId::new(77)).is_err());
}

#[test]
fn money_edits_clamp_at_zero() {
    let harness = TestHarness::new();
    let owner = harness.owner();
    let key = harness.funded_player(1, 100);

    let profile = admin::add_money(&harness.state, &owner, key, 50).unwrap();
    assert_eq!(profile.money, Money::coins(150));

    let profile = admin::remove_money(&harness.state, &owner, key, 1_000).unwrap();
    assert_eq!(profile.money, Money::ZERO);

    let err = admin::add_money(&harness.state, &owner, key, -5).unwrap_err();
    assert!(matches!(err, ServiceError::BadRequest(_)));

    let profile = admin::set_money(&harness.state, &owner, key, 999).unwrap();
    assert_eq!(profile.money, Money::coins(999));
}

#[test]
fn level_and_income_edits_validate() {
    let harness = TestHarness::new();
    let owner = harness.owner();
    let key = harness.funded_player(1, 0);

    assert!(admin::set_level(&harness.state, &owner, key, 0).is_err());
    assert!(admin::set_income_per_click(&harness.state, &owner, key, 0).is_err());
    assert!(admin::set_income_per_sec(&harness.state, &owner, key, -1).is_err());

    let profile = admin::set_level(&harness.state, &owner, key, 3).unwrap();
    assert_eq!(profile.level, 3);
    assert_eq!(profile.click_upgrade_cost, Money::coins(72));

    let profile = admin::set_income_per_click(&harness.state, &owner, key, 9).unwrap();
    assert_eq!(profile.income_per_click, 9);
    let profile = admin::set_income_per_sec(&harness.state, &owner, key, 4).unwrap();
    assert_eq!(profile.income_per_sec, 4);
}

#[test]
fn edits_of_unknown_player_not_found() {
    let harness = TestHarness::new();
    let err = admin::set_money(&harness.state, &harness.owner(), TestHarness::key(9), 1)
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[test]
fn full_reset_clears_every_domain() {
    let harness = TestHarness::new();
    let owner = harness.owner();
    let key = harness.funded_player(1, 10_000);
    business::buy(&harness.state, key, 8).unwrap();
    let play = casino::place_bet(&harness.state, key, clicker_core::CasinoPlay::new(), 100)
        .and_then(|play| casino::choose_color(play, clicker_core::BetColor::Black))
        .and_then(|play| casino::choose_multiplier(play, 2))
        .unwrap();
    casino::spin(&harness.state, key, play).unwrap();

    let first = admin::reset_player(&harness.state, &owner, key).unwrap();
    let second = admin::reset_player(&harness.state, &owner, key).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.money, Money::ZERO);
    assert_eq!(first.level, 1);
    assert_eq!(first.income_per_click, 1);

    assert!(harness.state.store.get_portfolio(key).unwrap().is_empty());
    assert!(harness.state.store.get_casino_stats(key).unwrap().is_none());
}
