use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Account role, as issued by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Works on assigned tasks
    Developer,
    /// Creates tasks and manages a team
    #[value(alias = "lead")]
    LeadDeveloper,
}

impl Role {
    /// Parse the wire form (`DEVELOPER`, `LEAD_DEVELOPER`).
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "DEVELOPER" => Some(Role::Developer),
            "LEAD_DEVELOPER" => Some(Role::LeadDeveloper),
            _ => None,
        }
    }

    pub fn as_wire(self) -> &'static str {
        match self {
            Role::Developer => "DEVELOPER",
            Role::LeadDeveloper => "LEAD_DEVELOPER",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Developer => "Developer",
            Role::LeadDeveloper => "Lead Developer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_round_trip_through_serde() {
        let json = serde_json::to_string(&Role::LeadDeveloper).unwrap();
        assert_eq!(json, "\"LEAD_DEVELOPER\"");
        let role: Role = serde_json::from_str("\"DEVELOPER\"").unwrap();
        assert_eq!(role, Role::Developer);
    }

    #[test]
    fn from_wire_rejects_unknown_roles() {
        assert_eq!(Role::from_wire("LEAD_DEVELOPER"), Some(Role::LeadDeveloper));
        assert_eq!(Role::from_wire("leadDeveloper"), None);
    }
}
