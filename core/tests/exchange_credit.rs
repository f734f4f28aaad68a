//! Exchange and credit side-books:
//! 1. Each exchange record carries the day's running quantity total
//! 2. The running total restarts when the calendar day rolls over
//! 3. Credits append with offsets and stay immutable

use chrono::NaiveDateTime;
use giftledger_core::clock::DATE_TIME_FORMAT;
use giftledger_core::model::{CreditRequest, ExchangeRequest};
use giftledger_core::{FixedClock, LedgerConfig, LedgerError, LedgerStore};
use std::rc::Rc;

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, DATE_TIME_FORMAT).unwrap()
}

fn build(start: &str) -> (Rc<FixedClock>, LedgerStore) {
    let _ = env_logger::builder().is_test(true).try_init();
    let clock = Rc::new(FixedClock::at(at(start)));
    let store = LedgerStore::with_clock(clock.clone(), LedgerConfig::default())
        .expect("in_memory store");
    (clock, store)
}

fn exchange(quantity: f64) -> ExchangeRequest {
    ExchangeRequest {
        exchange_account: "x1".into(),
        quantity,
        discount: 0.95,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: the day total accumulates within a day
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn today_total_accumulates_within_the_day() {
    let (clock, store) = build("2026-08-29 09:00:00");

    let a = store.add_exchange(&exchange(10_000.0)).unwrap();
    assert_eq!(a.today_exchange_total, 10_000.0);

    clock.set(at("2026-08-29 15:30:00"));
    let b = store.add_exchange(&exchange(5_000.0)).unwrap();
    assert_eq!(b.today_exchange_total, 15_000.0);

    clock.set(at("2026-08-29 23:59:59"));
    let c = store.add_exchange(&exchange(500.0)).unwrap();
    assert_eq!(c.today_exchange_total, 15_500.0);

    // Earlier records keep the total they were written with.
    let book = store.exchanges().unwrap();
    assert_eq!(book.len(), 3);
    assert_eq!(book[0].today_exchange_total, 10_000.0);
    assert_eq!(book[1].today_exchange_total, 15_000.0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: the total restarts at midnight
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn today_total_restarts_on_day_rollover() {
    let (clock, store) = build("2026-08-28 23:00:00");

    store.add_exchange(&exchange(7_000.0)).unwrap();

    clock.set(at("2026-08-29 00:01:00"));
    let next_day = store.add_exchange(&exchange(300.0)).unwrap();
    assert_eq!(next_day.today_exchange_total, 300.0);
}

#[test]
fn bad_exchange_inputs_are_rejected() {
    let (_clock, store) = build("2026-08-29 09:00:00");

    let err = store.add_exchange(&exchange(-1.0)).unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));

    let err = store
        .add_exchange(&ExchangeRequest {
            discount: 1.2,
            ..exchange(100.0)
        })
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));
    assert!(store.exchanges().unwrap().is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: credits
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn credits_append_in_order() {
    let (_clock, store) = build("2026-08-29 09:00:00");

    let first = store
        .add_credit(&CreditRequest {
            credit_account: "vip-lounge".into(),
            credit_amount: 600.0,
            is_repaid: false,
            goods_offset: 100.0,
            funds_offset: 50.0,
        })
        .unwrap();
    let second = store
        .add_credit(&CreditRequest {
            credit_account: "vip-lounge".into(),
            credit_amount: 200.0,
            is_repaid: true,
            goods_offset: 0.0,
            funds_offset: 200.0,
        })
        .unwrap();

    let book = store.credits().unwrap();
    assert_eq!(book, vec![first.clone(), second]);
    assert!(!first.is_repaid);
    assert_eq!(first.goods_offset, 100.0);
}

#[test]
fn negative_credit_fields_are_rejected() {
    let (_clock, store) = build("2026-08-29 09:00:00");

    let err = store
        .add_credit(&CreditRequest {
            credit_account: "vip-lounge".into(),
            credit_amount: -600.0,
            is_repaid: false,
            goods_offset: 0.0,
            funds_offset: 0.0,
        })
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));
    assert!(store.credits().unwrap().is_empty());
}
