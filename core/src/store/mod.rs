//! The ledger store.
//!
//! RULE: Only store/ talks to the database. Callers go through the
//! command/query surface — they never execute SQL and never patch a
//! balance by hand.
//!
//! The backing database is an in-memory SQLite connection that lives and
//! dies with the store: the desk keeps no durable state. SQLite is here
//! for its transactions — the settlement and recharge commands are
//! read-modify-write across several rows and must land all-or-nothing.

mod coin;
mod credit;
mod exchange;
mod host;
mod income;
mod player;
mod recharge;
mod settlement;

use crate::{
    clock::{Clock, SystemClock, DATE_FORMAT, DATE_TIME_FORMAT},
    config::LedgerConfig,
    error::{LedgerError, LedgerResult},
};
use rusqlite::Connection;
use std::rc::Rc;
use uuid::Uuid;

pub struct LedgerStore {
    conn: Connection,
    clock: Rc<dyn Clock>,
    config: LedgerConfig,
}

impl LedgerStore {
    /// Open a fresh ledger on the system clock with the default tariff.
    pub fn in_memory() -> LedgerResult<Self> {
        Self::with_clock(Rc::new(SystemClock), LedgerConfig::default())
    }

    /// Open a fresh ledger with an injected clock and tariff (used in
    /// tests, and by tools that load a tariff file).
    pub fn with_clock(clock: Rc<dyn Clock>, config: LedgerConfig) -> LedgerResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(include_str!("../../../migrations/001_ledger.sql"))?;
        Ok(Self {
            conn,
            clock,
            config,
        })
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    // ── Utilities ─────────────────────────────────────────────────

    /// A process-unique opaque identifier. UUIDv4 — the one place the
    /// ledger is allowed to be random.
    pub fn generate_id(&self) -> String {
        Uuid::new_v4().to_string()
    }

    /// Normalized local timestamp, `YYYY-MM-DD HH:MM:SS`.
    pub fn current_date_time(&self) -> String {
        self.clock.now().format(DATE_TIME_FORMAT).to_string()
    }

    /// `YYYY-MM-DD` of the clock's current day, the key for all
    /// today-window queries.
    pub(crate) fn today(&self) -> String {
        self.clock.now().format(DATE_FORMAT).to_string()
    }
}

// ── Shared validation ─────────────────────────────────────────────

pub(crate) fn require_amount(field: &str, value: f64) -> LedgerResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(LedgerError::Validation(format!(
            "{field} must be a non-negative amount (got {value})"
        )));
    }
    Ok(())
}

pub(crate) fn require_discount(value: f64) -> LedgerResult<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(LedgerError::Validation(format!(
            "discount must be within [0, 1] (got {value})"
        )));
    }
    Ok(())
}
