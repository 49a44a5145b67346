use serde::{Deserialize, Serialize};

use super::Role;

/// The logged-in user as cached in the session file.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub token: String,
}
