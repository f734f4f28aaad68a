use super::{require_amount, LedgerStore};
use crate::{
    error::{LedgerError, LedgerResult},
    model::{HostIncome, HostType, IncomeDetail, IncomeRequest, IncomeSource},
};
use rusqlite::{params, types::Type, Row};

fn income_from_row(row: &Row<'_>) -> rusqlite::Result<HostIncome> {
    let kind: String = row.get(4)?;
    let detail = match kind.as_str() {
        "gift_value" => IncomeDetail::GiftValue {
            gift_value: row.get(5)?,
            income: row.get(6)?,
        },
        "shift" => IncomeDetail::Shift {
            quantity: row.get(7)?,
            other_income: row.get(8)?,
            daily_income: row.get(9)?,
        },
        other => {
            return Err(rusqlite::Error::FromSqlConversionFailure(
                4,
                Type::Text,
                format!("unknown income kind '{other}'").into(),
            ))
        }
    };
    Ok(HostIncome {
        income_id: row.get(0)?,
        date_time: row.get(1)?,
        host_id: row.get(2)?,
        work_time_period: row.get(3)?,
        detail,
    })
}

impl LedgerStore {
    // ── Host income ───────────────────────────────────────────────

    /// Log one income entry for a host. The store computes the derived
    /// figure for either shape:
    ///
    /// - gift-value income settles at the host's own discount rate and is
    ///   restricted to host-type accounts;
    /// - shift income pays the configured rate per unit of goods volume
    ///   plus the ad-hoc amount.
    pub fn add_host_income(&self, req: &IncomeRequest) -> LedgerResult<HostIncome> {
        let host = self.require_host("host_id", &req.host_id)?;

        let detail = match req.source {
            IncomeSource::GiftValue { gift_value } => {
                require_amount("gift_value", gift_value)?;
                if host.host_type != HostType::Host {
                    return Err(LedgerError::Validation(format!(
                        "gift-value income requires a host-type account; '{}' is {}",
                        host.host_id, host.host_type
                    )));
                }
                let income = gift_value / self.config.settlement_unit * host.discount;
                IncomeDetail::GiftValue { gift_value, income }
            }
            IncomeSource::Shift {
                quantity,
                other_income,
            } => {
                require_amount("quantity", quantity)?;
                require_amount("other_income", other_income)?;
                let daily_income = quantity * self.config.shift_income_rate + other_income;
                IncomeDetail::Shift {
                    quantity,
                    other_income,
                    daily_income,
                }
            }
        };

        let income = HostIncome {
            income_id: self.generate_id(),
            date_time: self.current_date_time(),
            host_id: req.host_id.clone(),
            work_time_period: req.work_time_period.clone(),
            detail,
        };

        let (kind, gift_value, earned, quantity, other_income, daily_income) = match income.detail {
            IncomeDetail::GiftValue { gift_value, income } => {
                ("gift_value", Some(gift_value), Some(income), None, None, None)
            }
            IncomeDetail::Shift {
                quantity,
                other_income,
                daily_income,
            } => (
                "shift",
                None,
                None,
                Some(quantity),
                Some(other_income),
                Some(daily_income),
            ),
        };
        self.conn.execute(
            "INSERT INTO host_income (income_id, date_time, host_id, work_time_period,
                 kind, gift_value, income, quantity, other_income, daily_income)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                income.income_id,
                income.date_time,
                income.host_id,
                income.work_time_period,
                kind,
                gift_value,
                earned,
                quantity,
                other_income,
                daily_income,
            ],
        )?;
        log::debug!("income {} logged for host '{}'", income.income_id, income.host_id);
        Ok(income)
    }

    /// All income entries, insertion-ordered, as an owned snapshot.
    pub fn host_incomes(&self) -> LedgerResult<Vec<HostIncome>> {
        let mut stmt = self.conn.prepare(
            "SELECT income_id, date_time, host_id, work_time_period, kind,
                 gift_value, income, quantity, other_income, daily_income
             FROM host_income ORDER BY rowid ASC",
        )?;
        let rows = stmt.query_map([], income_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
