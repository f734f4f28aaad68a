use super::{require_amount, LedgerStore};
use crate::{
    error::LedgerResult,
    model::{HourlyRevenue, Settlement, SettlementBreakdown, SettlementRequest, SettlementTotals},
};
use rusqlite::{params, Row};

fn settlement_from_row(row: &Row<'_>) -> rusqlite::Result<Settlement> {
    Ok(Settlement {
        settlement_id: row.get(0)?,
        date_time: row.get(1)?,
        player_id: row.get(2)?,
        host_id: row.get(3)?,
        gift_value: row.get(4)?,
        player_settlement: row.get(5)?,
        host_settlement: row.get(6)?,
        profit: row.get(7)?,
        transfer_to_predeposit: row.get(8)?,
        transfer_amount: row.get(9)?,
    })
}

impl LedgerStore {
    // ── Settlement ────────────────────────────────────────────────

    /// Reconcile a gift value between a player and a host.
    ///
    /// Computes the tariff breakdown from each side's discount, appends
    /// the settlement record, debits the player (optionally routing part
    /// of the debit into predeposit) and credits the host's coin
    /// inventory. The three writes commit as one transaction; a failed
    /// settlement leaves every balance untouched.
    pub fn apply_settlement(&mut self, req: &SettlementRequest) -> LedgerResult<Settlement> {
        require_amount("gift_value", req.gift_value)?;
        require_amount("transfer_amount", req.transfer_amount)?;
        let player = self.require_player("player_id", &req.player_id)?;
        let host = self.require_host("host_id", &req.host_id)?;

        let breakdown = SettlementBreakdown::compute(
            req.gift_value,
            player.discount,
            host.discount,
            self.config.settlement_unit,
        );
        // A transfer amount without the flag is meaningless; normalize to 0.
        let transfer_amount = if req.transfer_to_predeposit {
            req.transfer_amount
        } else {
            0.0
        };

        let settlement = Settlement {
            settlement_id: self.generate_id(),
            date_time: self.current_date_time(),
            player_id: req.player_id.clone(),
            host_id: req.host_id.clone(),
            gift_value: req.gift_value,
            player_settlement: breakdown.player_settlement,
            host_settlement: breakdown.host_settlement,
            profit: breakdown.profit,
            transfer_to_predeposit: req.transfer_to_predeposit,
            transfer_amount,
        };

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO settlement (settlement_id, date_time, player_id, host_id,
                 gift_value, player_settlement, host_settlement, profit,
                 transfer_to_predeposit, transfer_amount)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                settlement.settlement_id,
                settlement.date_time,
                settlement.player_id,
                settlement.host_id,
                settlement.gift_value,
                settlement.player_settlement,
                settlement.host_settlement,
                settlement.profit,
                settlement.transfer_to_predeposit,
                settlement.transfer_amount,
            ],
        )?;
        if settlement.transfer_to_predeposit {
            tx.execute(
                "UPDATE player SET predeposit = predeposit + ?1,
                     account_balance = account_balance - (?2 - ?1)
                 WHERE player_id = ?3",
                params![transfer_amount, breakdown.player_settlement, req.player_id],
            )?;
        } else {
            tx.execute(
                "UPDATE player SET account_balance = account_balance - ?1
                 WHERE player_id = ?2",
                params![breakdown.player_settlement, req.player_id],
            )?;
        }
        // Credited regardless of host type; a host without a coin inventory
        // starts one at zero.
        tx.execute(
            "UPDATE host SET gift_value_balance = COALESCE(gift_value_balance, 0.0) + ?1
             WHERE host_id = ?2",
            params![req.gift_value, req.host_id],
        )?;
        tx.commit()?;

        log::debug!(
            "settlement {}: gift {} -> player '{}' owes {:.2}, host '{}' earns {:.2}, profit {:.2}",
            settlement.settlement_id,
            settlement.gift_value,
            settlement.player_id,
            settlement.player_settlement,
            settlement.host_id,
            settlement.host_settlement,
            settlement.profit,
        );
        Ok(settlement)
    }

    /// All settlements, insertion-ordered, as an owned snapshot.
    pub fn settlements(&self) -> LedgerResult<Vec<Settlement>> {
        let mut stmt = self.conn.prepare(
            "SELECT settlement_id, date_time, player_id, host_id, gift_value,
                 player_settlement, host_settlement, profit,
                 transfer_to_predeposit, transfer_amount
             FROM settlement ORDER BY rowid ASC",
        )?;
        let rows = stmt.query_map([], settlement_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    // ── Reports ───────────────────────────────────────────────────

    /// Gift value settled today, bucketed by hour. Always exactly 24
    /// entries, `"00:00"` through `"23:00"`, zero-filled; "today" is the
    /// clock's current local calendar day, evaluated at call time.
    pub fn daily_revenue(&self) -> LedgerResult<Vec<HourlyRevenue>> {
        let mut buckets = [0.0f64; 24];
        let mut stmt = self.conn.prepare(
            "SELECT CAST(substr(date_time, 12, 2) AS INTEGER) AS hour,
                    SUM(gift_value)
             FROM settlement
             WHERE substr(date_time, 1, 10) = ?1
             GROUP BY hour",
        )?;
        let rows = stmt.query_map(params![self.today()], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, f64>(1)?))
        })?;
        for row in rows {
            let (hour, total) = row?;
            if (0..24).contains(&hour) {
                buckets[hour as usize] = total;
            }
        }
        Ok(buckets
            .iter()
            .enumerate()
            .map(|(hour, &gift_value)| HourlyRevenue {
                hour: format!("{hour:02}:00"),
                gift_value,
            })
            .collect())
    }

    /// Column totals over the full settlement book (the footer row of the
    /// settlement page).
    pub fn settlement_totals(&self) -> LedgerResult<SettlementTotals> {
        self.conn
            .query_row(
                "SELECT COALESCE(SUM(gift_value), 0.0),
                        COALESCE(SUM(player_settlement), 0.0),
                        COALESCE(SUM(host_settlement), 0.0),
                        COALESCE(SUM(profit), 0.0)
                 FROM settlement",
                [],
                |row| {
                    Ok(SettlementTotals {
                        gift_value: row.get(0)?,
                        player_settlement: row.get(1)?,
                        host_settlement: row.get(2)?,
                        profit: row.get(3)?,
                    })
                },
            )
            .map_err(Into::into)
    }
}
