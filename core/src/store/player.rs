use super::{require_discount, LedgerStore};
use crate::{
    error::{LedgerError, LedgerResult},
    model::Player,
    types::Amount,
};
use rusqlite::{params, OptionalExtension, Row};

fn player_from_row(row: &Row<'_>) -> rusqlite::Result<Player> {
    Ok(Player {
        player_id: row.get(0)?,
        discount: row.get(1)?,
        predeposit: row.get(2)?,
        credit: row.get(3)?,
        today_recharge_total: row.get(4)?,
        month_recharge_total: row.get(5)?,
        account_balance: row.get(6)?,
    })
}

const PLAYER_COLUMNS: &str = "player_id, discount, predeposit, credit, \
     today_recharge_total, month_recharge_total, account_balance";

impl LedgerStore {
    // ── Player ────────────────────────────────────────────────────

    pub fn add_player(&self, p: &Player) -> LedgerResult<()> {
        require_discount(p.discount)?;
        if self.player(&p.player_id)?.is_some() {
            return Err(LedgerError::DuplicateKey {
                entity: "player",
                id: p.player_id.clone(),
            });
        }
        self.conn.execute(
            "INSERT INTO player (player_id, discount, predeposit, credit,
                 today_recharge_total, month_recharge_total, account_balance)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                p.player_id,
                p.discount,
                p.predeposit,
                p.credit,
                p.today_recharge_total,
                p.month_recharge_total,
                p.account_balance,
            ],
        )?;
        log::debug!("player '{}' added (discount {})", p.player_id, p.discount);
        Ok(())
    }

    /// Replace the record keyed by `p.player_id`.
    pub fn update_player(&self, p: &Player) -> LedgerResult<()> {
        require_discount(p.discount)?;
        let changed = self.conn.execute(
            "UPDATE player SET discount = ?2, predeposit = ?3, credit = ?4,
                 today_recharge_total = ?5, month_recharge_total = ?6,
                 account_balance = ?7
             WHERE player_id = ?1",
            params![
                p.player_id,
                p.discount,
                p.predeposit,
                p.credit,
                p.today_recharge_total,
                p.month_recharge_total,
                p.account_balance,
            ],
        )?;
        if changed == 0 {
            return Err(LedgerError::NotFound {
                entity: "player",
                id: p.player_id.clone(),
            });
        }
        Ok(())
    }

    /// Remove the player record. Transaction history referencing the id is
    /// kept — the books stay append-only.
    pub fn delete_player(&self, player_id: &str) -> LedgerResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM player WHERE player_id = ?1", params![player_id])?;
        if changed == 0 {
            return Err(LedgerError::NotFound {
                entity: "player",
                id: player_id.to_string(),
            });
        }
        log::debug!("player '{player_id}' deleted");
        Ok(())
    }

    /// All players, insertion-ordered, as an owned snapshot.
    pub fn players(&self) -> LedgerResult<Vec<Player>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PLAYER_COLUMNS} FROM player ORDER BY rowid ASC"
        ))?;
        let rows = stmt.query_map([], player_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn player(&self, player_id: &str) -> LedgerResult<Option<Player>> {
        self.conn
            .query_row(
                &format!("SELECT {PLAYER_COLUMNS} FROM player WHERE player_id = ?1"),
                params![player_id],
                player_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// The account-balance delta implied by the player's full recharge and
    /// settlement history, assuming a zero opening balance. Used to detect
    /// drift between the stored balance and the books.
    pub fn derived_balance(&self, player_id: &str) -> LedgerResult<Amount> {
        if self.player(player_id)?.is_none() {
            return Err(LedgerError::NotFound {
                entity: "player",
                id: player_id.to_string(),
            });
        }
        let delta: f64 = self.conn.query_row(
            "SELECT COALESCE((SELECT SUM(amount) FROM recharge
                              WHERE player_id = ?1), 0.0)
                  - COALESCE((SELECT SUM(player_settlement
                                         - CASE WHEN transfer_to_predeposit = 1
                                                THEN transfer_amount ELSE 0.0 END)
                              FROM settlement WHERE player_id = ?1), 0.0)",
            params![player_id],
            |row| row.get(0),
        )?;
        Ok(delta)
    }

    pub(crate) fn require_player(&self, field: &'static str, player_id: &str) -> LedgerResult<Player> {
        self.player(player_id)?.ok_or(LedgerError::InvalidReference {
            entity: "player",
            field,
            id: player_id.to_string(),
        })
    }
}
