//! Host income logging:
//! 1. Gift-value income settles at the host's own rate
//! 2. Gift-value income is gated to host-type accounts
//! 3. Shift income pays the configured rate per unit plus ad-hoc income
//! 4. Coin replenishments reference a real host account

use giftledger_core::model::{
    Host, HostType, IncomeDetail, IncomeRequest, IncomeSource, ReplenishmentRequest,
};
use giftledger_core::{LedgerError, LedgerStore};

fn build() -> LedgerStore {
    let _ = env_logger::builder().is_test(true).try_init();
    let store = LedgerStore::in_memory().expect("in_memory store");
    store
        .add_host(&Host {
            host_id: "h1".into(),
            host_type: HostType::Host,
            discount: 0.8,
            gift_value_balance: None,
        })
        .unwrap();
    store
        .add_host(&Host {
            host_id: "x1".into(),
            host_type: HostType::Recharge,
            discount: 0.95,
            gift_value_balance: Some(2000.0),
        })
        .unwrap();
    store
}

fn gift_income(host_id: &str, gift_value: f64) -> IncomeRequest {
    IncomeRequest {
        host_id: host_id.into(),
        work_time_period: "19:00-23:00".into(),
        source: IncomeSource::GiftValue { gift_value },
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: gift-value income math
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn gift_value_income_settles_at_the_hosts_rate() {
    let store = build();

    let entry = store.add_host_income(&gift_income("h1", 1000.0)).unwrap();
    // 1000 / 10 * 0.8
    assert_eq!(
        entry.detail,
        IncomeDetail::GiftValue {
            gift_value: 1000.0,
            income: 80.0
        }
    );
    assert_eq!(entry.host_id, "h1");
    assert_eq!(entry.work_time_period, "19:00-23:00");

    let book = store.host_incomes().unwrap();
    assert_eq!(book.len(), 1);
    assert_eq!(book[0], entry);
}

#[test]
fn gift_value_income_requires_a_host_type_account() {
    let store = build();

    let err = store.add_host_income(&gift_income("x1", 1000.0)).unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));
    assert!(store.host_incomes().unwrap().is_empty());
}

#[test]
fn negative_gift_value_is_rejected() {
    let store = build();
    let err = store.add_host_income(&gift_income("h1", -5.0)).unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: shift income math
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn shift_income_pays_per_unit_plus_other() {
    let store = build();
    let rate = store.config().shift_income_rate;

    let entry = store
        .add_host_income(&IncomeRequest {
            host_id: "x1".into(),
            work_time_period: "10:00-18:00".into(),
            source: IncomeSource::Shift {
                quantity: 50_000.0,
                other_income: 20.0,
            },
        })
        .unwrap();

    assert_eq!(
        entry.detail,
        IncomeDetail::Shift {
            quantity: 50_000.0,
            other_income: 20.0,
            daily_income: 50_000.0 * rate + 20.0,
        }
    );
}

#[test]
fn shift_income_accepts_any_host_type() {
    let store = build();
    for id in ["h1", "x1"] {
        store
            .add_host_income(&IncomeRequest {
                host_id: id.into(),
                work_time_period: "10:00-18:00".into(),
                source: IncomeSource::Shift {
                    quantity: 1000.0,
                    other_income: 0.0,
                },
            })
            .unwrap();
    }
    assert_eq!(store.host_incomes().unwrap().len(), 2);
}

#[test]
fn unknown_host_is_an_invalid_reference() {
    let store = build();
    let err = store.add_host_income(&gift_income("ghost", 100.0)).unwrap_err();
    assert!(matches!(
        err,
        LedgerError::InvalidReference { entity: "host", .. }
    ));
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: coin replenishments
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn replenishment_is_appended_with_id_and_timestamp() {
    let store = build();
    let r = store
        .add_coin_replenishment(&ReplenishmentRequest {
            replenishment_amount: 10_000.0,
            remaining_coins: 12_000.0,
            replenishment_account: "x1".into(),
        })
        .unwrap();
    assert!(!r.replenishment_id.is_empty());
    assert!(!r.replenishment_time.is_empty());

    let book = store.coin_replenishments().unwrap();
    assert_eq!(book.len(), 1);
    assert_eq!(book[0], r);
}

#[test]
fn replenishment_for_unknown_account_is_rejected() {
    let store = build();
    let err = store
        .add_coin_replenishment(&ReplenishmentRequest {
            replenishment_amount: 10_000.0,
            remaining_coins: 12_000.0,
            replenishment_account: "ghost".into(),
        })
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::InvalidReference { entity: "host", .. }
    ));
    assert!(store.coin_replenishments().unwrap().is_empty());
}
