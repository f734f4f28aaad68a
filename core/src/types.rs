//! Shared primitive types used across the entire ledger.

/// A stable, opaque identifier for any ledger entity.
pub type EntityId = String;

/// A decimal amount. The books run on floating point; rounding to two
/// decimals is a display concern, never applied inside the store.
pub type Amount = f64;
