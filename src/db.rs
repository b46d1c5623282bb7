use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

use crate::error::Result;

/// Opens the time log store and makes sure the schema exists.
///
/// The store is owned by a single operator process, so the pool is capped
/// at one connection; that also keeps every mutation serialized.
pub async fn init_db(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    setup(&pool).await?;
    Ok(pool)
}

/// Creates the registry and session tables if they do not exist.
///
/// Sessions live in one shared table keyed by `ledger_key` rather than in
/// a table per user; `entry` is globally sequential, which keeps entry ids
/// strictly increasing within each user's ledger.
pub async fn setup(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            ledger_key      TEXT PRIMARY KEY,
            last_name       TEXT NOT NULL,
            first_name      TEXT NOT NULL,
            status          INTEGER NOT NULL,
            email           TEXT,
            role            TEXT NOT NULL,
            phone_number    TEXT,
            life_time_total REAL NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS time_entries (
            entry      INTEGER PRIMARY KEY AUTOINCREMENT,
            ledger_key TEXT NOT NULL REFERENCES users(ledger_key),
            date       TEXT NOT NULL,
            in_time    TEXT NOT NULL,
            out_time   TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Explicit commit point. Every mutation already commits its own
/// transaction, so this only forces a WAL checkpoint and is idempotent.
pub async fn save(pool: &SqlitePool) -> Result<()> {
    sqlx::query("PRAGMA wal_checkpoint(FULL)").execute(pool).await?;
    Ok(())
}

/// Wipes every user and every session log. Irreversible; confirming with
/// the operator is the caller's job.
pub async fn reset(pool: &SqlitePool) -> Result<()> {
    let mut tx = pool.begin().await?;
    sqlx::query("DROP TABLE IF EXISTS time_entries")
        .execute(&mut *tx)
        .await?;
    sqlx::query("DROP TABLE IF EXISTS users")
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    // Recreate the empty schema so later lookups see zero rows instead of
    // a missing table.
    setup(pool).await?;
    info!("time log store reset");
    Ok(())
}

/// Orderly shutdown: flush and close the store.
pub async fn close(pool: &SqlitePool) -> Result<()> {
    save(pool).await?;
    pool.close().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::model::user::{UserRecord, UserStatus};
    use crate::service::attendance::{check_in, ledger_entries};
    use crate::service::registry::{find_users, list_roles, register};
    use crate::utils::filter::UserFilter;

    async fn populated_pool() -> (SqlitePool, String) {
        let pool = init_db("sqlite::memory:").await.unwrap();
        let key = register(&pool, "Jane", "Doe", "Volunteer", None, None)
            .await
            .unwrap();
        check_in(
            &pool,
            &key,
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            "09:00",
            "12:00",
        )
        .await
        .unwrap();
        (pool, key)
    }

    #[tokio::test]
    async fn reset_wipes_registry_and_ledgers() {
        let (pool, key) = populated_pool().await;

        reset(&pool).await.unwrap();

        assert!(find_users(&pool, &UserFilter::default()).await.unwrap().is_empty());
        assert!(
            find_users(&pool, &UserFilter::by_status(UserStatus::Active))
                .await
                .unwrap()
                .is_empty()
        );
        assert!(list_roles(&pool, UserStatus::Active).await.unwrap().is_empty());
        assert!(ledger_entries(&pool, &key).await.unwrap().is_empty());

        // The store stays usable: the same name starts over at suffix 00.
        let key = register(&pool, "Jane", "Doe", "Volunteer", None, None)
            .await
            .unwrap();
        assert_eq!(key, "Jane_Doe_00");
    }

    #[tokio::test]
    async fn save_is_idempotent() {
        let (pool, key) = populated_pool().await;

        let snapshot = |pool: SqlitePool, key: String| async move {
            let user: UserRecord = sqlx::query_as("SELECT * FROM users WHERE ledger_key = ?")
                .bind(&key)
                .fetch_one(&pool)
                .await
                .unwrap();
            let entries = ledger_entries(&pool, &key).await.unwrap().len();
            (user.life_time_total, entries)
        };

        let before = snapshot(pool.clone(), key.clone()).await;
        save(&pool).await.unwrap();
        save(&pool).await.unwrap();
        let after = snapshot(pool.clone(), key.clone()).await;

        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn setup_is_reentrant() {
        let pool = init_db("sqlite::memory:").await.unwrap();
        setup(&pool).await.unwrap();
        setup(&pool).await.unwrap();
    }
}
