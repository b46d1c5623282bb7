use sqlx::SqlitePool;

use crate::error::{Result, TimeLogError};

/// Derives the next free ledger key for a first/last name pair.
///
/// Keys have the form `{first}_{last}_{NN}` with a two-digit suffix.
/// Descending string order over same-name keys surfaces the highest
/// suffix first, so one row is enough to find it. Pure lookup; the caller
/// performs the actual insert.
pub async fn next_ledger_key(pool: &SqlitePool, first: &str, last: &str) -> Result<String> {
    let top: Option<String> = sqlx::query_scalar(
        r#"
        SELECT ledger_key
        FROM users
        WHERE first_name LIKE ? AND last_name LIKE ?
        ORDER BY ledger_key DESC
        LIMIT 1
        "#,
    )
    .bind(first)
    .bind(last)
    .fetch_optional(pool)
    .await?;

    let suffix = match top {
        None => 0,
        Some(key) => {
            let current = key
                .rsplit_once('_')
                .and_then(|(_, suffix)| suffix.parse::<u32>().ok())
                .ok_or_else(|| {
                    TimeLogError::Validation(format!("ledger key '{key}' has no numeric suffix"))
                })?;
            if current >= 99 {
                return Err(TimeLogError::LedgerKeyExhausted {
                    first: first.to_string(),
                    last: last.to_string(),
                });
            }
            current + 1
        }
    };

    Ok(format!("{first}_{last}_{suffix:02}"))
}
