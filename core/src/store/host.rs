use super::{require_discount, LedgerStore};
use crate::{
    error::{LedgerError, LedgerResult},
    model::Host,
};
use rusqlite::{params, OptionalExtension, Row};

fn host_from_row(row: &Row<'_>) -> rusqlite::Result<Host> {
    Ok(Host {
        host_id: row.get(0)?,
        host_type: row.get(1)?,
        discount: row.get(2)?,
        gift_value_balance: row.get(3)?,
    })
}

impl LedgerStore {
    // ── Host ──────────────────────────────────────────────────────

    pub fn add_host(&self, h: &Host) -> LedgerResult<()> {
        require_discount(h.discount)?;
        if self.host(&h.host_id)?.is_some() {
            return Err(LedgerError::DuplicateKey {
                entity: "host",
                id: h.host_id.clone(),
            });
        }
        self.conn.execute(
            "INSERT INTO host (host_id, host_type, discount, gift_value_balance)
             VALUES (?1, ?2, ?3, ?4)",
            params![h.host_id, h.host_type, h.discount, h.gift_value_balance],
        )?;
        log::debug!("host '{}' added ({})", h.host_id, h.host_type);
        Ok(())
    }

    /// Replace the record keyed by `h.host_id`.
    pub fn update_host(&self, h: &Host) -> LedgerResult<()> {
        require_discount(h.discount)?;
        let changed = self.conn.execute(
            "UPDATE host SET host_type = ?2, discount = ?3, gift_value_balance = ?4
             WHERE host_id = ?1",
            params![h.host_id, h.host_type, h.discount, h.gift_value_balance],
        )?;
        if changed == 0 {
            return Err(LedgerError::NotFound {
                entity: "host",
                id: h.host_id.clone(),
            });
        }
        Ok(())
    }

    /// All hosts, insertion-ordered, as an owned snapshot.
    pub fn hosts(&self) -> LedgerResult<Vec<Host>> {
        let mut stmt = self.conn.prepare(
            "SELECT host_id, host_type, discount, gift_value_balance
             FROM host ORDER BY rowid ASC",
        )?;
        let rows = stmt.query_map([], host_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn host(&self, host_id: &str) -> LedgerResult<Option<Host>> {
        self.conn
            .query_row(
                "SELECT host_id, host_type, discount, gift_value_balance
                 FROM host WHERE host_id = ?1",
                params![host_id],
                host_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    pub(crate) fn require_host(&self, field: &'static str, host_id: &str) -> LedgerResult<Host> {
        self.host(host_id)?.ok_or(LedgerError::InvalidReference {
            entity: "host",
            field,
            id: host_id.to_string(),
        })
    }
}
