//! User roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of account a user signs in with.
///
/// The role decides which navigation shell and dashboard are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Building management staff.
    Admin,
    /// Apartment resident.
    Resident,
    /// Accounting staff.
    Accountant,
    /// Local authority officer.
    Authority,
}

impl Role {
    /// All roles, in the order they are offered on the login screen.
    pub const ALL: [Role; 4] = [Role::Admin, Role::Resident, Role::Accountant, Role::Authority];

    /// Stable identifier used in CLI arguments and logs.
    pub fn id(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Resident => "resident",
            Role::Accountant => "accountant",
            Role::Authority => "authority",
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Quản trị viên",
            Role::Resident => "Cư dân",
            Role::Accountant => "Kế toán",
            Role::Authority => "Cơ quan chức năng",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "resident" => Ok(Role::Resident),
            "accountant" | "accounting" => Ok(Role::Accountant),
            "authority" => Ok(Role::Authority),
            other => Err(format!(
                "unknown role '{}' (expected admin, resident, accountant or authority)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_accounting_alias() {
        assert_eq!("accounting".parse::<Role>().unwrap(), Role::Accountant);
        assert_eq!(" Admin ".parse::<Role>().unwrap(), Role::Admin);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "janitor".parse::<Role>().unwrap_err();
        assert!(err.contains("janitor"));
    }

    #[test]
    fn test_display_matches_id() {
        for role in Role::ALL {
            assert_eq!(role.to_string(), role.id());
            assert_eq!(role.id().parse::<Role>().unwrap(), role);
        }
    }
}
