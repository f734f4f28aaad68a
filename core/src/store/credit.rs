use super::{require_amount, LedgerStore};
use crate::{
    error::LedgerResult,
    model::{Credit, CreditRequest},
};
use rusqlite::{params, Row};

fn credit_from_row(row: &Row<'_>) -> rusqlite::Result<Credit> {
    Ok(Credit {
        credit_id: row.get(0)?,
        date_time: row.get(1)?,
        credit_account: row.get(2)?,
        credit_amount: row.get(3)?,
        is_repaid: row.get(4)?,
        goods_offset: row.get(5)?,
        funds_offset: row.get(6)?,
    })
}

impl LedgerStore {
    // ── Credit ────────────────────────────────────────────────────

    /// Log a credit (tab) entry. Credits are immutable once written.
    pub fn add_credit(&self, req: &CreditRequest) -> LedgerResult<Credit> {
        require_amount("credit_amount", req.credit_amount)?;
        require_amount("goods_offset", req.goods_offset)?;
        require_amount("funds_offset", req.funds_offset)?;

        let credit = Credit {
            credit_id: self.generate_id(),
            date_time: self.current_date_time(),
            credit_account: req.credit_account.clone(),
            credit_amount: req.credit_amount,
            is_repaid: req.is_repaid,
            goods_offset: req.goods_offset,
            funds_offset: req.funds_offset,
        };
        self.conn.execute(
            "INSERT INTO credit (credit_id, date_time, credit_account, credit_amount,
                 is_repaid, goods_offset, funds_offset)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                credit.credit_id,
                credit.date_time,
                credit.credit_account,
                credit.credit_amount,
                credit.is_repaid,
                credit.goods_offset,
                credit.funds_offset,
            ],
        )?;
        Ok(credit)
    }

    /// All credits, insertion-ordered, as an owned snapshot.
    pub fn credits(&self) -> LedgerResult<Vec<Credit>> {
        let mut stmt = self.conn.prepare(
            "SELECT credit_id, date_time, credit_account, credit_amount, is_repaid,
                 goods_offset, funds_offset
             FROM credit ORDER BY rowid ASC",
        )?;
        let rows = stmt.query_map([], credit_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
