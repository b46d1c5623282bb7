use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::utils::duration::{fractional_hours, parse_hhmm};

/// One logged shift. Entries are append-only: created by check-in, never
/// edited, and only removed by a full store reset. Times keep the HH:MM
/// form they are stored in.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LedgerEntry {
    pub entry: i64,
    pub ledger_key: String,
    pub date: NaiveDate,
    pub in_time: String,
    pub out_time: String,
}

impl LedgerEntry {
    /// Fractional hours worked in this shift.
    pub fn hours(&self) -> Result<f64> {
        let t_in = parse_hhmm(&self.in_time)?;
        let t_out = parse_hhmm(&self.out_time)?;
        Ok(fractional_hours(t_in, t_out))
    }
}
