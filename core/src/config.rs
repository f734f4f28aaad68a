//! Tariff constants for the desk.
//!
//! The shift income rate is a provisional figure pending a real payroll
//! tariff, which is why it lives here rather than as a hardcoded
//! constant.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Gift-value units per currency unit: a settlement converts
    /// `gift_value / settlement_unit` into currency before applying each
    /// side's discount.
    #[serde(default = "default_settlement_unit")]
    pub settlement_unit: f64,

    /// Currency earned per unit of goods volume on a shift income entry.
    #[serde(default = "default_shift_income_rate")]
    pub shift_income_rate: f64,
}

fn default_settlement_unit() -> f64 {
    10.0
}

fn default_shift_income_rate() -> f64 {
    0.0001
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            settlement_unit: default_settlement_unit(),
            shift_income_rate: default_shift_income_rate(),
        }
    }
}

impl LedgerConfig {
    /// Load from a JSON file. Missing keys fall back to the defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: LedgerConfig = serde_json::from_str(&content)?;
        if config.settlement_unit <= 0.0 {
            anyhow::bail!("settlement_unit must be positive");
        }
        Ok(config)
    }
}
