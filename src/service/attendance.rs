use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::{debug, instrument};

use crate::error::{Result, TimeLogError};
use crate::model::entry::LedgerEntry;
use crate::utils::duration::{fractional_hours, parse_hhmm};

/// Logs one shift for a user and folds its hours into their lifetime
/// total. Returns the fractional hours worked so the caller can confirm
/// them to the operator.
///
/// The ledger append and the total update commit as one transaction; a
/// crash in between can never leave the entry without the total or the
/// other way round.
#[instrument(skip(pool))]
pub async fn check_in(
    pool: &SqlitePool,
    ledger_key: &str,
    work_date: NaiveDate,
    in_time: &str,
    out_time: &str,
) -> Result<f64> {
    let t_in = parse_hhmm(in_time)?;
    let t_out = parse_hhmm(out_time)?;
    if t_out <= t_in {
        return Err(TimeLogError::Validation(
            "check out time must be after check in".to_string(),
        ));
    }
    let hours = fractional_hours(t_in, t_out);

    let mut tx = pool.begin().await?;

    let affected = sqlx::query(
        "UPDATE users SET life_time_total = life_time_total + ? WHERE ledger_key = ?",
    )
    .bind(hours)
    .bind(ledger_key)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    // Dropping the transaction on the error path rolls the update back.
    if affected == 0 {
        return Err(TimeLogError::UserNotFound(ledger_key.to_string()));
    }

    sqlx::query("INSERT INTO time_entries (ledger_key, date, in_time, out_time) VALUES (?, ?, ?, ?)")
        .bind(ledger_key)
        .bind(work_date)
        .bind(t_in.format("%H:%M").to_string())
        .bind(t_out.format("%H:%M").to_string())
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    debug!(%ledger_key, %work_date, hours, "shift logged");
    Ok(hours)
}

/// A user's full session log in entry order.
pub async fn ledger_entries(pool: &SqlitePool, ledger_key: &str) -> Result<Vec<LedgerEntry>> {
    let entries = sqlx::query_as::<_, LedgerEntry>(
        "SELECT * FROM time_entries WHERE ledger_key = ? ORDER BY entry",
    )
    .bind(ledger_key)
    .fetch_all(pool)
    .await?;
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::model::user::UserRecord;
    use crate::service::registry::register;

    async fn pool_with_user() -> (SqlitePool, String) {
        let pool = db::init_db("sqlite::memory:").await.unwrap();
        let key = register(&pool, "Jane", "Doe", "Volunteer", None, None)
            .await
            .unwrap();
        (pool, key)
    }

    async fn lifetime_total(pool: &SqlitePool, key: &str) -> f64 {
        let user: UserRecord = sqlx::query_as("SELECT * FROM users WHERE ledger_key = ?")
            .bind(key)
            .fetch_one(pool)
            .await
            .unwrap();
        user.life_time_total
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn check_in_appends_entry_and_updates_total() {
        let (pool, key) = pool_with_user().await;

        let hours = check_in(&pool, &key, day(2026, 3, 2), "09:00", "17:15")
            .await
            .unwrap();
        assert_eq!(hours, 8.25);

        let entries = ledger_entries(&pool, &key).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].in_time, "09:00");
        assert_eq!(entries[0].out_time, "17:15");
        assert_eq!(entries[0].date, day(2026, 3, 2));
        assert_eq!(lifetime_total(&pool, &key).await, 8.25);

        check_in(&pool, &key, day(2026, 3, 3), "10:00", "12:30")
            .await
            .unwrap();
        let entries = ledger_entries(&pool, &key).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[1].entry > entries[0].entry);
        assert_eq!(lifetime_total(&pool, &key).await, 10.75);
    }

    #[tokio::test]
    async fn rejects_checkout_not_after_checkin_with_no_writes() {
        let (pool, key) = pool_with_user().await;

        for (t_in, t_out) in [("17:00", "09:00"), ("09:00", "09:00")] {
            let err = check_in(&pool, &key, day(2026, 3, 2), t_in, t_out)
                .await
                .unwrap_err();
            assert!(matches!(err, TimeLogError::Validation(_)));
        }

        assert!(ledger_entries(&pool, &key).await.unwrap().is_empty());
        assert_eq!(lifetime_total(&pool, &key).await, 0.0);
    }

    #[tokio::test]
    async fn rejects_malformed_times() {
        let (pool, key) = pool_with_user().await;
        let err = check_in(&pool, &key, day(2026, 3, 2), "nine", "17:00")
            .await
            .unwrap_err();
        assert!(matches!(err, TimeLogError::Validation(_)));
    }

    #[tokio::test]
    async fn unknown_key_is_not_found() {
        let (pool, _) = pool_with_user().await;
        let err = check_in(&pool, "Nobody_Here_00", day(2026, 3, 2), "09:00", "10:00")
            .await
            .unwrap_err();
        assert!(matches!(err, TimeLogError::UserNotFound(_)));
    }

    #[tokio::test]
    async fn failed_append_rolls_back_the_total() {
        let (pool, key) = pool_with_user().await;

        // Force the second write of the transaction to fail.
        sqlx::query("DROP TABLE time_entries")
            .execute(&pool)
            .await
            .unwrap();

        let err = check_in(&pool, &key, day(2026, 3, 2), "09:00", "12:00")
            .await
            .unwrap_err();
        assert!(matches!(err, TimeLogError::Storage(_)));
        assert_eq!(lifetime_total(&pool, &key).await, 0.0);
    }
}
