use super::{require_amount, LedgerStore};
use crate::{
    error::LedgerResult,
    model::{CoinReplenishment, ReplenishmentRequest},
};
use rusqlite::{params, Row};

fn replenishment_from_row(row: &Row<'_>) -> rusqlite::Result<CoinReplenishment> {
    Ok(CoinReplenishment {
        replenishment_id: row.get(0)?,
        replenishment_time: row.get(1)?,
        replenishment_amount: row.get(2)?,
        remaining_coins: row.get(3)?,
        replenishment_account: row.get(4)?,
    })
}

impl LedgerStore {
    // ── Coin replenishment ────────────────────────────────────────

    /// Log a restock of a host account's coin inventory.
    pub fn add_coin_replenishment(
        &self,
        req: &ReplenishmentRequest,
    ) -> LedgerResult<CoinReplenishment> {
        require_amount("replenishment_amount", req.replenishment_amount)?;
        require_amount("remaining_coins", req.remaining_coins)?;
        self.require_host("replenishment_account", &req.replenishment_account)?;

        let replenishment = CoinReplenishment {
            replenishment_id: self.generate_id(),
            replenishment_time: self.current_date_time(),
            replenishment_amount: req.replenishment_amount,
            remaining_coins: req.remaining_coins,
            replenishment_account: req.replenishment_account.clone(),
        };
        self.conn.execute(
            "INSERT INTO coin_replenishment (replenishment_id, replenishment_time,
                 replenishment_amount, remaining_coins, replenishment_account)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                replenishment.replenishment_id,
                replenishment.replenishment_time,
                replenishment.replenishment_amount,
                replenishment.remaining_coins,
                replenishment.replenishment_account,
            ],
        )?;
        Ok(replenishment)
    }

    /// All replenishments, insertion-ordered, as an owned snapshot.
    pub fn coin_replenishments(&self) -> LedgerResult<Vec<CoinReplenishment>> {
        let mut stmt = self.conn.prepare(
            "SELECT replenishment_id, replenishment_time, replenishment_amount,
                 remaining_coins, replenishment_account
             FROM coin_replenishment ORDER BY rowid ASC",
        )?;
        let rows = stmt.query_map([], replenishment_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
