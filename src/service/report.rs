use std::path::Path;

use chrono::{Duration, Local, NaiveDate};
use sqlx::SqlitePool;
use tracing::{info, instrument};

use crate::error::Result;
use crate::service::attendance::ledger_entries;

const HEADER: &str = "Last Name\tFirst Name\tWeekly Total\tMonthly Total\tTotal Hours\n";

/// Renders the hours report as tab-separated text: one row per user
/// (active and inactive alike) with weekly / monthly / all-time totals,
/// then a trailing block summing each column across all users.
///
/// The 7-day and 30-day windows are inclusive of their boundary date and
/// overlap: a shift inside the last week counts in both totals.
pub async fn render_report(pool: &SqlitePool, today: NaiveDate) -> Result<String> {
    let one_week = today - Duration::days(7);
    let one_month = today - Duration::days(30);

    let users: Vec<(String, String, String)> = sqlx::query_as(
        "SELECT first_name, last_name, ledger_key FROM users ORDER BY last_name DESC",
    )
    .fetch_all(pool)
    .await?;

    let mut out = String::from(HEADER);
    let mut total_week = 0.0;
    let mut total_month = 0.0;
    let mut total_time = 0.0;

    for (first_name, last_name, ledger_key) in users {
        let mut user_week = 0.0;
        let mut user_month = 0.0;
        let mut user_total = 0.0;

        for entry in ledger_entries(pool, &ledger_key).await? {
            let hours = entry.hours()?;
            user_total += hours;
            if entry.date >= one_week {
                user_week += hours;
            }
            if entry.date >= one_month {
                user_month += hours;
            }
        }

        total_week += user_week;
        total_month += user_month;
        total_time += user_total;

        out.push_str(&format!(
            "{last_name}\t{first_name}\t{user_week}\t{user_month}\t{user_total}\n"
        ));
    }

    out.push_str(&format!(
        "\nWeekly Total\t{total_week}\nMonthly total\t{total_month}\nTotal\t{total_time}"
    ));
    Ok(out)
}

/// Writes the report for today's date to `path` (the caller picked it in
/// a save dialog).
#[instrument(skip(pool))]
pub async fn export_time(pool: &SqlitePool, path: &Path) -> Result<()> {
    let report = render_report(pool, Local::now().date_naive()).await?;
    std::fs::write(path, report)?;
    info!(path = %path.display(), "time data exported");
    Ok(())
}
