//! Balance reconciliation: the stored account balance must equal the
//! opening balance plus the delta the books imply. `derived_balance`
//! replays the recharge and settlement history so drift is detectable.

use giftledger_core::model::{
    Host, HostType, PaymentMethod, Player, RechargeRequest, SettlementRequest,
};
use giftledger_core::{LedgerError, LedgerStore};

fn build() -> LedgerStore {
    let _ = env_logger::builder().is_test(true).try_init();
    let store = LedgerStore::in_memory().expect("in_memory store");
    store.add_player(&Player::new("p1", 0.9)).unwrap();
    store
        .add_host(&Host {
            host_id: "h1".into(),
            host_type: HostType::Host,
            discount: 0.8,
            gift_value_balance: None,
        })
        .unwrap();
    store
}

fn recharge(amount: f64) -> RechargeRequest {
    RechargeRequest {
        player_id: "p1".into(),
        amount,
        payment_method: PaymentMethod::BankTransfer,
        receiving_host: "front-desk".into(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: a mixed history reconciles exactly
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn derived_balance_matches_stored_balance_after_mixed_history() {
    let mut store = build();

    store.apply_recharge(&recharge(500.0)).unwrap();
    store
        .apply_settlement(&SettlementRequest::new("p1", "h1", 1000.0))
        .unwrap();
    store.apply_recharge(&recharge(250.0)).unwrap();
    store
        .apply_settlement(&SettlementRequest::new("p1", "h1", 2000.0).with_predeposit_transfer(50.0))
        .unwrap();

    // 500 - 90 + 250 - (180 - 50)
    let p1 = store.player("p1").unwrap().unwrap();
    assert_eq!(p1.account_balance, 530.0);
    assert_eq!(store.derived_balance("p1").unwrap(), 530.0);
    assert_eq!(p1.predeposit, 50.0);
}

#[test]
fn derived_balance_is_zero_for_an_untouched_player() {
    let store = build();
    assert_eq!(store.derived_balance("p1").unwrap(), 0.0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: drift shows when the stored balance is edited by hand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn manual_balance_edit_shows_up_as_drift() {
    let mut store = build();
    store.apply_recharge(&recharge(100.0)).unwrap();

    let mut p1 = store.player("p1").unwrap().unwrap();
    p1.account_balance += 7.0;
    store.update_player(&p1).unwrap();

    let stored = store.player("p1").unwrap().unwrap().account_balance;
    let derived = store.derived_balance("p1").unwrap();
    assert_eq!(stored - derived, 7.0);
}

#[test]
fn derived_balance_of_missing_player_is_not_found() {
    let store = build();
    let err = store.derived_balance("ghost").unwrap_err();
    assert!(matches!(err, LedgerError::NotFound { entity: "player", .. }));
}
