//! Record model for the five ledger collections plus the exchange and
//! credit side-books.
//!
//! Records are plain data. The balance side effects they imply live in
//! the store; the one piece of pure arithmetic — the settlement tariff —
//! lives here so it can be unit-tested in isolation.

use crate::types::{Amount, EntityId};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::ToSql;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Player ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub player_id: EntityId,
    /// Tariff multiplier ∈ [0, 1]: the player's cost rate per settlement
    /// unit of gift value.
    pub discount: f64,
    pub predeposit: Amount,
    pub credit: Amount,
    pub today_recharge_total: Amount,
    pub month_recharge_total: Amount,
    pub account_balance: Amount,
}

impl Player {
    /// A fresh account: everything zero except the identity and tariff.
    pub fn new(player_id: impl Into<EntityId>, discount: f64) -> Self {
        Self {
            player_id: player_id.into(),
            discount,
            predeposit: 0.0,
            credit: 0.0,
            today_recharge_total: 0.0,
            month_recharge_total: 0.0,
            account_balance: 0.0,
        }
    }
}

// ── Host ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostType {
    /// Currency-exchange account; carries a coin inventory.
    Recharge,
    /// Streaming host; the only type eligible for gift-value income.
    Host,
    /// Room owner; carries a coin inventory.
    Owner,
}

impl HostType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Recharge => "recharge",
            Self::Host => "host",
            Self::Owner => "owner",
        }
    }
}

impl fmt::Display for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HostType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recharge" => Ok(Self::Recharge),
            "host" => Ok(Self::Host),
            "owner" => Ok(Self::Owner),
            other => Err(format!("unknown host type '{other}'")),
        }
    }
}

impl ToSql for HostType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for HostType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: String| FromSqlError::Other(e.into()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Host {
    pub host_id: EntityId,
    pub host_type: HostType,
    /// Tariff multiplier ∈ [0, 1]: the host's payout rate per settlement
    /// unit of gift value. Same mechanics as the player discount, opposite
    /// economic direction — that asymmetry is the whole margin model.
    pub discount: f64,
    /// Coin inventory, meaningful for recharge/owner accounts. Settlements
    /// credit it unconditionally, starting absent inventories at zero.
    pub gift_value_balance: Option<Amount>,
}

// ── Recharge ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Wechat,
    Alipay,
    BankTransfer,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wechat => "wechat",
            Self::Alipay => "alipay",
            Self::BankTransfer => "bank_transfer",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wechat" => Ok(Self::Wechat),
            "alipay" => Ok(Self::Alipay),
            "bank_transfer" => Ok(Self::BankTransfer),
            other => Err(format!("unknown payment method '{other}'")),
        }
    }
}

impl ToSql for PaymentMethod {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for PaymentMethod {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: String| FromSqlError::Other(e.into()))
    }
}

/// Append-only record of one top-up. ID and timestamp are stamped by the
/// store when the request is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recharge {
    pub recharge_id: EntityId,
    pub date_time: String,
    pub player_id: EntityId,
    pub amount: Amount,
    pub payment_method: PaymentMethod,
    pub receiving_host: String,
}

#[derive(Debug, Clone)]
pub struct RechargeRequest {
    pub player_id: EntityId,
    pub amount: Amount,
    pub payment_method: PaymentMethod,
    pub receiving_host: String,
}

// ── Settlement ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub settlement_id: EntityId,
    pub date_time: String,
    pub player_id: EntityId,
    pub host_id: EntityId,
    pub gift_value: Amount,
    pub player_settlement: Amount,
    pub host_settlement: Amount,
    pub profit: Amount,
    pub transfer_to_predeposit: bool,
    pub transfer_amount: Amount,
}

#[derive(Debug, Clone)]
pub struct SettlementRequest {
    pub player_id: EntityId,
    pub host_id: EntityId,
    pub gift_value: Amount,
    pub transfer_to_predeposit: bool,
    /// Portion routed into the player's predeposit instead of debiting the
    /// account balance. Ignored unless `transfer_to_predeposit` is set.
    pub transfer_amount: Amount,
}

impl SettlementRequest {
    pub fn new(
        player_id: impl Into<EntityId>,
        host_id: impl Into<EntityId>,
        gift_value: Amount,
    ) -> Self {
        Self {
            player_id: player_id.into(),
            host_id: host_id.into(),
            gift_value,
            transfer_to_predeposit: false,
            transfer_amount: 0.0,
        }
    }

    pub fn with_predeposit_transfer(mut self, amount: Amount) -> Self {
        self.transfer_to_predeposit = true;
        self.transfer_amount = amount;
        self
    }
}

/// The settlement tariff, computed once per settlement and stored on the
/// record verbatim.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettlementBreakdown {
    /// Currency owed by the player.
    pub player_settlement: Amount,
    /// Currency owed to the host.
    pub host_settlement: Amount,
    /// Desk margin: host side minus player side. Negative when the player's
    /// rate is the better one.
    pub profit: Amount,
}

impl SettlementBreakdown {
    pub fn compute(
        gift_value: Amount,
        player_discount: f64,
        host_discount: f64,
        settlement_unit: f64,
    ) -> Self {
        let player_settlement = gift_value / settlement_unit * player_discount;
        let host_settlement = gift_value / settlement_unit * host_discount;
        Self {
            player_settlement,
            host_settlement,
            profit: host_settlement - player_settlement,
        }
    }
}

// ── Coin replenishment ────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinReplenishment {
    pub replenishment_id: EntityId,
    pub replenishment_time: String,
    pub replenishment_amount: Amount,
    pub remaining_coins: Amount,
    /// Host account whose inventory was restocked.
    pub replenishment_account: EntityId,
}

#[derive(Debug, Clone)]
pub struct ReplenishmentRequest {
    pub replenishment_amount: Amount,
    pub remaining_coins: Amount,
    pub replenishment_account: EntityId,
}

// ── Host income ───────────────────────────────────────────────────

/// The two income shapes the desk logs, kept as a tagged variant rather
/// than one struct full of optionals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IncomeDetail {
    /// Gift value settled at the host's own discount rate.
    GiftValue { gift_value: Amount, income: Amount },
    /// Goods volume for a work shift, paid per unit, plus ad-hoc income.
    Shift {
        quantity: Amount,
        other_income: Amount,
        daily_income: Amount,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostIncome {
    pub income_id: EntityId,
    pub date_time: String,
    pub host_id: EntityId,
    /// Free-text interval, e.g. "10:00-18:00".
    pub work_time_period: String,
    #[serde(flatten)]
    pub detail: IncomeDetail,
}

#[derive(Debug, Clone)]
pub struct IncomeRequest {
    pub host_id: EntityId,
    pub work_time_period: String,
    pub source: IncomeSource,
}

#[derive(Debug, Clone)]
pub enum IncomeSource {
    GiftValue { gift_value: Amount },
    Shift { quantity: Amount, other_income: Amount },
}

// ── Exchange ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    pub exchange_id: EntityId,
    pub date_time: String,
    pub exchange_account: String,
    pub quantity: Amount,
    pub discount: f64,
    /// Running total of quantity over the record's calendar day, this
    /// record included.
    pub today_exchange_total: Amount,
}

#[derive(Debug, Clone)]
pub struct ExchangeRequest {
    pub exchange_account: String,
    pub quantity: Amount,
    pub discount: f64,
}

// ── Credit ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credit {
    pub credit_id: EntityId,
    pub date_time: String,
    pub credit_account: String,
    pub credit_amount: Amount,
    pub is_repaid: bool,
    pub goods_offset: Amount,
    pub funds_offset: Amount,
}

#[derive(Debug, Clone)]
pub struct CreditRequest {
    pub credit_account: String,
    pub credit_amount: Amount,
    pub is_repaid: bool,
    pub goods_offset: Amount,
    pub funds_offset: Amount,
}

// ── Reports ───────────────────────────────────────────────────────

/// One hourly bucket of the daily revenue report. `hour` is `"00:00"`
/// through `"23:00"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyRevenue {
    pub hour: String,
    pub gift_value: Amount,
}

/// Column totals over the full settlement book.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SettlementTotals {
    pub gift_value: Amount,
    pub player_settlement: Amount,
    pub host_settlement: Amount,
    pub profit: Amount,
}
