//! giftledger-core — the bookkeeping core of a live-streaming gift-economy
//! desk: player accounts, recharges, host payouts, coin restocking, and the
//! settlement transactions that reconcile gift value between the two sides.
//!
//! RULES:
//!   - The `LedgerStore` owns every balance-update invariant. Callers submit
//!     requests; they never patch balances themselves.
//!   - Multi-record mutations (settlement, recharge) apply atomically —
//!     all rows change or none do.
//!   - Every command validates and resolves its references before the first
//!     write. There are no silent no-ops.

pub mod clock;
pub mod config;
pub mod error;
pub mod model;
pub mod store;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::LedgerConfig;
pub use error::{LedgerError, LedgerResult};
pub use store::LedgerStore;
