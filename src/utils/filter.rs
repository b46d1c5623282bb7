use crate::model::user::UserStatus;

/// Strips quote characters from operator-entered text, mirroring the
/// sanitization the entry forms apply before anything reaches the store.
pub fn sanitize(input: &str) -> String {
    input.replace(['\'', '"'], " ")
}

/// Bindable value for a dynamically assembled WHERE clause.
#[derive(Debug, Clone)]
pub enum BindValue {
    Int(i64),
    Text(String),
}

/// AND-conjunction of field constraints over the user registry. Fields
/// left as `None` are omitted from the query entirely rather than matched
/// against an empty string. Text fields use `LIKE`, which behaves as
/// case-insensitive equality unless the caller supplies wildcards.
#[derive(Debug, Default, Clone)]
pub struct UserFilter {
    pub status: Option<UserStatus>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub phone: Option<String>,
}

impl UserFilter {
    pub fn by_status(status: UserStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Filter backing the main check-in dropdowns: one role, active users.
    pub fn active_role(role: &str) -> Self {
        Self {
            status: Some(UserStatus::Active),
            role: Some(role.to_string()),
            ..Self::default()
        }
    }

    /// Renders the filter as a WHERE clause plus its bindings. An empty
    /// filter yields an empty clause (match everything).
    pub fn where_clause(&self) -> (String, Vec<BindValue>) {
        let mut conditions: Vec<String> = Vec::new();
        let mut bindings = Vec::new();

        if let Some(status) = self.status {
            conditions.push("status = ?".to_string());
            bindings.push(BindValue::Int(status.as_i64()));
        }

        let text_fields = [
            ("last_name", &self.last_name),
            ("first_name", &self.first_name),
            ("email", &self.email),
            ("role", &self.role),
            ("phone_number", &self.phone),
        ];
        for (column, value) in text_fields {
            if let Some(value) = value {
                conditions.push(format!("{column} LIKE ?"));
                bindings.push(BindValue::Text(value.clone()));
            }
        }

        let clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        (clause, bindings)
    }
}
