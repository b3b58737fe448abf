use std::collections::HashMap;

use billed_core::user::SessionUser;
use thiserror::Error;

/// Key under which the logged-in user is persisted.
pub const USER_KEY: &str = "user";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no user in session")]
    Missing,

    #[error("malformed session user: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Read access to the persisted session. Injected into controllers so
/// they never reach for an ambient global.
pub trait SessionReader: Send + Sync {
    fn read(&self, key: &str) -> Option<String>;
}

/// Parse the current user out of the session.
pub fn current_user(session: &dyn SessionReader) -> Result<SessionUser, SessionError> {
    let raw = session.read(USER_KEY).ok_or(SessionError::Missing)?;
    Ok(serde_json::from_str(&raw)?)
}

/// In-memory key/value session, used by tests and the CLI.
#[derive(Default)]
pub struct MemorySession {
    values: HashMap<String, String>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session already holding a logged-in user.
    pub fn with_user(user_type: &str, email: &str) -> Self {
        let mut session = Self::default();
        session.set(
            USER_KEY,
            serde_json::json!({ "type": user_type, "email": email }).to_string(),
        );
        session
    }

    pub fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }
}

impl SessionReader for MemorySession {
    fn read(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}
