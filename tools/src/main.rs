//! ledger-desk: headless demo driver for the gift-economy ledger.
//!
//! Usage:
//!   ledger-desk [--config tariff.json]
//!
//! Seeds a small book — two players, two hosts — then applies recharges,
//! a settlement, an income entry and a coin restock, and prints the
//! settlement totals and the daily revenue report.

use anyhow::Result;
use giftledger_core::model::{
    Host, HostType, IncomeRequest, IncomeSource, PaymentMethod, Player, RechargeRequest,
    ReplenishmentRequest, SettlementRequest,
};
use giftledger_core::{Clock, LedgerConfig, LedgerStore, SystemClock};
use std::env;
use std::rc::Rc;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config = match args.windows(2).find(|w| w[0] == "--config") {
        Some(w) => LedgerConfig::load(&w[1])?,
        None => LedgerConfig::default(),
    };

    println!("ledger-desk");
    println!("  settlement_unit:   {}", config.settlement_unit);
    println!("  shift_income_rate: {}", config.shift_income_rate);
    println!();

    let mut store = LedgerStore::with_clock(Rc::new(SystemClock), config)?;

    // Seed the book.
    store.add_player(&Player::new("p-ruby", 0.9))?;
    store.add_player(&Player::new("p-jade", 0.75))?;
    store.add_host(&Host {
        host_id: "h-star".into(),
        host_type: HostType::Host,
        discount: 0.8,
        gift_value_balance: None,
    })?;
    store.add_host(&Host {
        host_id: "h-mint".into(),
        host_type: HostType::Recharge,
        discount: 0.95,
        gift_value_balance: Some(5_000.0),
    })?;

    // A day at the desk.
    store.apply_recharge(&RechargeRequest {
        player_id: "p-ruby".into(),
        amount: 600.0,
        payment_method: PaymentMethod::Wechat,
        receiving_host: "h-mint".into(),
    })?;
    store.apply_recharge(&RechargeRequest {
        player_id: "p-jade".into(),
        amount: 250.0,
        payment_method: PaymentMethod::Alipay,
        receiving_host: "h-mint".into(),
    })?;
    let settlement = store.apply_settlement(&SettlementRequest::new("p-ruby", "h-star", 4_000.0))?;
    store.add_host_income(&IncomeRequest {
        host_id: "h-star".into(),
        work_time_period: "19:00-23:00".into(),
        source: IncomeSource::GiftValue { gift_value: 4_000.0 },
    })?;
    store.add_coin_replenishment(&ReplenishmentRequest {
        replenishment_amount: 2_000.0,
        remaining_coins: 7_000.0,
        replenishment_account: "h-mint".into(),
    })?;

    println!("settlement {} at {}", settlement.settlement_id, settlement.date_time);
    println!(
        "  player owes {:.2}, host earns {:.2}, profit {:.2}",
        settlement.player_settlement, settlement.host_settlement, settlement.profit
    );
    println!();

    println!("players:");
    for p in store.players()? {
        println!(
            "  {:<8} balance {:>10.2}  predeposit {:>8.2}  today {:>8.2}",
            p.player_id, p.account_balance, p.predeposit, p.today_recharge_total
        );
    }
    println!();

    let totals = store.settlement_totals()?;
    println!(
        "settled: gift {:.0}, player side {:.2}, host side {:.2}, profit {:.2}",
        totals.gift_value, totals.player_settlement, totals.host_settlement, totals.profit
    );
    println!();

    let now = SystemClock.now();
    println!("daily revenue ({}):", now.format("%Y-%m-%d"));
    for bucket in store.daily_revenue()? {
        if bucket.gift_value > 0.0 {
            println!("  {}  {:>10.0}", bucket.hour, bucket.gift_value);
        }
    }
    log::info!("demo run complete");
    Ok(())
}
