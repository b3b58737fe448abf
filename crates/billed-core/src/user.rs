use serde::{Deserialize, Serialize};

/// The logged-in user as persisted in the session, e.g.
/// `{"type": "Employee", "email": "employee@test.tld"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(rename = "type")]
    pub user_type: String,
    #[serde(default)]
    pub email: String,
}
