use super::{require_amount, require_discount, LedgerStore};
use crate::{
    error::LedgerResult,
    model::{Exchange, ExchangeRequest},
};
use rusqlite::{params, Row};

fn exchange_from_row(row: &Row<'_>) -> rusqlite::Result<Exchange> {
    Ok(Exchange {
        exchange_id: row.get(0)?,
        date_time: row.get(1)?,
        exchange_account: row.get(2)?,
        quantity: row.get(3)?,
        discount: row.get(4)?,
        today_exchange_total: row.get(5)?,
    })
}

impl LedgerStore {
    // ── Exchange ──────────────────────────────────────────────────

    /// Log an exchange top-up. The record carries the day's running
    /// quantity total, summed over the clock's current calendar day so a
    /// day rollover restarts the count.
    pub fn add_exchange(&self, req: &ExchangeRequest) -> LedgerResult<Exchange> {
        require_amount("quantity", req.quantity)?;
        require_discount(req.discount)?;

        let date_time = self.current_date_time();
        let prior_today: f64 = self.conn.query_row(
            "SELECT COALESCE(SUM(quantity), 0.0) FROM exchange
             WHERE substr(date_time, 1, 10) = ?1",
            params![self.today()],
            |row| row.get(0),
        )?;

        let exchange = Exchange {
            exchange_id: self.generate_id(),
            date_time,
            exchange_account: req.exchange_account.clone(),
            quantity: req.quantity,
            discount: req.discount,
            today_exchange_total: prior_today + req.quantity,
        };
        self.conn.execute(
            "INSERT INTO exchange (exchange_id, date_time, exchange_account,
                 quantity, discount, today_exchange_total)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                exchange.exchange_id,
                exchange.date_time,
                exchange.exchange_account,
                exchange.quantity,
                exchange.discount,
                exchange.today_exchange_total,
            ],
        )?;
        Ok(exchange)
    }

    /// All exchanges, insertion-ordered, as an owned snapshot.
    pub fn exchanges(&self) -> LedgerResult<Vec<Exchange>> {
        let mut stmt = self.conn.prepare(
            "SELECT exchange_id, date_time, exchange_account, quantity, discount,
                 today_exchange_total
             FROM exchange ORDER BY rowid ASC",
        )?;
        let rows = stmt.query_map([], exchange_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
