use sqlx::SqlitePool;
use tracing::{info, instrument};

use crate::error::{Result, TimeLogError};
use crate::model::user::{UserRecord, UserStatus};
use crate::service::identity::next_ledger_key;
use crate::utils::filter::{BindValue, UserFilter, sanitize};

/// Adds a person to the registry as active with a zero lifetime total and
/// returns their new ledger key. Their session log starts out empty.
///
/// First name, last name and role are required; all text inputs get the
/// same quote-stripping the entry forms apply.
#[instrument(skip(pool))]
pub async fn register(
    pool: &SqlitePool,
    first: &str,
    last: &str,
    role: &str,
    email: Option<&str>,
    phone: Option<&str>,
) -> Result<String> {
    let first = sanitize(first);
    let last = sanitize(last);
    let role = sanitize(role);

    if first.trim().is_empty() || last.trim().is_empty() || role.trim().is_empty() {
        return Err(TimeLogError::Validation(
            "first name, last name and role are required".to_string(),
        ));
    }

    let email = email.map(sanitize).filter(|v| !v.trim().is_empty());
    let phone = phone.map(sanitize).filter(|v| !v.trim().is_empty());

    let ledger_key = next_ledger_key(pool, &first, &last).await?;

    sqlx::query(
        r#"
        INSERT INTO users (ledger_key, last_name, first_name, status, email, role, phone_number, life_time_total)
        VALUES (?, ?, ?, ?, ?, ?, ?, 0)
        "#,
    )
    .bind(&ledger_key)
    .bind(&last)
    .bind(&first)
    .bind(UserStatus::Active.as_i64())
    .bind(&email)
    .bind(&role)
    .bind(&phone)
    .execute(pool)
    .await?;

    info!(%ledger_key, "user registered");
    Ok(ledger_key)
}

/// Distinct roles among users with the given status; drives the role
/// dropdown.
pub async fn list_roles(pool: &SqlitePool, status: UserStatus) -> Result<Vec<String>> {
    let roles = sqlx::query_scalar("SELECT DISTINCT role FROM users WHERE status = ?")
        .bind(status.as_i64())
        .fetch_all(pool)
        .await?;
    Ok(roles)
}

/// Users matching the filter, newest ledger key first.
pub async fn find_users(pool: &SqlitePool, filter: &UserFilter) -> Result<Vec<UserRecord>> {
    let (where_clause, bindings) = filter.where_clause();
    let sql = format!("SELECT * FROM users {where_clause} ORDER BY ledger_key DESC");

    let mut query = sqlx::query_as::<_, UserRecord>(&sql);
    for binding in bindings {
        query = match binding {
            BindValue::Int(v) => query.bind(v),
            BindValue::Text(v) => query.bind(v),
        };
    }

    Ok(query.fetch_all(pool).await?)
}

/// Activates or deactivates a user. Their ledger and lifetime total are
/// untouched either way.
#[instrument(skip(pool))]
pub async fn set_status(pool: &SqlitePool, ledger_key: &str, status: UserStatus) -> Result<()> {
    let affected = sqlx::query("UPDATE users SET status = ? WHERE ledger_key = ?")
        .bind(status.as_i64())
        .bind(ledger_key)
        .execute(pool)
        .await?
        .rows_affected();

    if affected == 0 {
        return Err(TimeLogError::UserNotFound(ledger_key.to_string()));
    }
    Ok(())
}
