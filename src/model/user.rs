use serde::{Deserialize, Serialize};

/// Registry row status. Stored as 0/1 in the `status` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserStatus {
    Inactive = 0,
    Active = 1,
}

impl UserStatus {
    pub fn as_i64(self) -> i64 {
        self as i64
    }
}

/// One registered person. The ledger key doubles as the handle for their
/// session log and never changes once assigned; deactivation flips
/// `status` but keeps the record and its ledger.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRecord {
    pub ledger_key: String,
    pub last_name: String,
    pub first_name: String,
    pub status: i64,
    pub email: Option<String>,
    pub role: String,
    pub phone_number: Option<String>,
    pub life_time_total: f64,
}

impl UserRecord {
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active.as_i64()
    }

    /// Display label for selection dropdowns: `"Doe, Jane (jd@x.org)"`,
    /// or `"Doe, Jane"` when no email is on file.
    pub fn label(&self) -> String {
        match self.email.as_deref() {
            Some(email) if !email.trim().is_empty() => {
                format!("{}, {} ({})", self.last_name, self.first_name, email)
            }
            _ => format!("{}, {}", self.last_name, self.first_name),
        }
    }
}
