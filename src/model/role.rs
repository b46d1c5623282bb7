use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// The roles the clinic staffs. The registry stores role as plain text
/// and does not enforce this set; it is the list the selection UI offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
pub enum Role {
    #[strum(serialize = "OMS")]
    Oms,
    #[strum(serialize = "Staff")]
    Staff,
    #[strum(serialize = "Public Health Services")]
    PublicHealthServices,
    #[strum(serialize = "Volunteer")]
    Volunteer,
}

impl Role {
    pub fn all() -> Vec<String> {
        Role::iter().map(|r| r.to_string()).collect()
    }
}
