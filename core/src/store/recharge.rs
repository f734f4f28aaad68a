use super::{require_amount, LedgerStore};
use crate::{
    error::LedgerResult,
    model::{Recharge, RechargeRequest},
};
use rusqlite::{params, Row};

fn recharge_from_row(row: &Row<'_>) -> rusqlite::Result<Recharge> {
    Ok(Recharge {
        recharge_id: row.get(0)?,
        date_time: row.get(1)?,
        player_id: row.get(2)?,
        amount: row.get(3)?,
        payment_method: row.get(4)?,
        receiving_host: row.get(5)?,
    })
}

impl LedgerStore {
    // ── Recharge ──────────────────────────────────────────────────

    /// Append a recharge and apply its side effects on the player —
    /// `today_recharge_total`, `month_recharge_total` and `account_balance`
    /// each grow by the amount, exactly once, in the same transaction as
    /// the append.
    pub fn apply_recharge(&mut self, req: &RechargeRequest) -> LedgerResult<Recharge> {
        require_amount("amount", req.amount)?;
        self.require_player("player_id", &req.player_id)?;

        let recharge = Recharge {
            recharge_id: self.generate_id(),
            date_time: self.current_date_time(),
            player_id: req.player_id.clone(),
            amount: req.amount,
            payment_method: req.payment_method,
            receiving_host: req.receiving_host.clone(),
        };

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO recharge (recharge_id, date_time, player_id, amount,
                 payment_method, receiving_host)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                recharge.recharge_id,
                recharge.date_time,
                recharge.player_id,
                recharge.amount,
                recharge.payment_method,
                recharge.receiving_host,
            ],
        )?;
        // The increments run in SQL against the stored row, never against a
        // detached copy of the player.
        tx.execute(
            "UPDATE player SET today_recharge_total = today_recharge_total + ?1,
                 month_recharge_total = month_recharge_total + ?1,
                 account_balance = account_balance + ?1
             WHERE player_id = ?2",
            params![req.amount, req.player_id],
        )?;
        tx.commit()?;

        log::debug!(
            "recharge {}: player '{}' +{} via {}",
            recharge.recharge_id,
            recharge.player_id,
            recharge.amount,
            recharge.payment_method
        );
        Ok(recharge)
    }

    /// All recharges, insertion-ordered, as an owned snapshot.
    pub fn recharges(&self) -> LedgerResult<Vec<Recharge>> {
        let mut stmt = self.conn.prepare(
            "SELECT recharge_id, date_time, player_id, amount, payment_method,
                 receiving_host
             FROM recharge ORDER BY rowid ASC",
        )?;
        let rows = stmt.query_map([], recharge_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
