//! Local session store.
//!
//! Holds the logged-in [`User`] as JSON next to the config file. The backend stays the
//! source of truth; this is only a cache read once per command. A session whose token
//! has passed its `exp` claim is discarded when read.

use std::path::PathBuf;

use chrono::Utc;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Result, TaskboardError};
use crate::jwt;
use crate::types::{Role, User};

const SESSION_FILE: &str = "session.json";

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn open() -> Result<Self> {
        Ok(Self::at(Config::config_dir()?.join(SESSION_FILE)))
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Current session, or `None` when there is none or it has expired.
    pub fn load(&self) -> Result<Option<User>> {
        match self.read()? {
            Some(user) if is_expired(&user) => {
                info!(email = %user.email, "discarding expired session");
                self.clear()?;
                Ok(None)
            }
            other => Ok(other),
        }
    }

    /// Current session, failing with a reason when there is none.
    pub fn require(&self) -> Result<User> {
        match self.read()? {
            None => Err(TaskboardError::NotLoggedIn),
            Some(user) if is_expired(&user) => {
                self.clear()?;
                Err(TaskboardError::SessionExpired)
            }
            Some(user) => Ok(user),
        }
    }

    /// Current session, which must belong to `role`.
    pub fn require_role(&self, role: Role) -> Result<User> {
        let user = self.require()?;
        if user.role != role {
            return Err(TaskboardError::WrongRole {
                required: role.label(),
            });
        }
        Ok(user)
    }

    pub fn save(&self, user: &User) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let contents = serde_json::to_string_pretty(user).map_err(|e| TaskboardError::SessionParse {
            path: self.path.clone(),
            source: e,
        })?;

        std::fs::write(&self.path, contents).map_err(|e| self.io_error(e))?;
        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    /// Remove the session. Removing a missing session is not an error.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "session cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn read(&self) -> Result<Option<User>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|e| TaskboardError::SessionParse {
                path: self.path.clone(),
                source: e,
            })
    }

    fn io_error(&self, source: std::io::Error) -> TaskboardError {
        TaskboardError::SessionIo {
            path: self.path.clone(),
            source,
        }
    }
}

fn is_expired(user: &User) -> bool {
    // Tokens we cannot read are left for the backend to reject.
    jwt::decode_claims(&user.token)
        .map(|claims| claims.is_expired(Utc::now().timestamp()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn user_with_exp(exp: i64) -> User {
        User {
            email: "dev@example.com".to_string(),
            full_name: "Dev One".to_string(),
            role: Role::Developer,
            token: jwt::encode_unsigned(&json!({
                "sub": "dev@example.com",
                "role": "DEVELOPER",
                "name": "Dev One",
                "exp": exp
            })),
        }
    }

    fn store(dir: &TempDir) -> SessionStore {
        SessionStore::at(dir.path().join("nested").join(SESSION_FILE))
    }

    #[test]
    fn save_then_load_returns_same_user() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let user = user_with_exp(Utc::now().timestamp() + 3600);

        store.save(&user).unwrap();
        assert_eq!(store.load().unwrap(), Some(user.clone()));
        assert_eq!(store.require().unwrap(), user);
    }

    #[test]
    fn session_file_uses_camel_case_fields() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save(&user_with_exp(Utc::now().timestamp() + 3600)).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["fullName"], "Dev One");
        assert_eq!(raw["role"], "DEVELOPER");
    }

    #[test]
    fn expired_session_is_discarded() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save(&user_with_exp(Utc::now().timestamp() - 60)).unwrap();

        assert_eq!(store.load().unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn require_reports_expiry_and_absence() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        assert!(matches!(store.require(), Err(TaskboardError::NotLoggedIn)));

        store.save(&user_with_exp(Utc::now().timestamp() - 60)).unwrap();
        assert!(matches!(store.require(), Err(TaskboardError::SessionExpired)));
        assert!(matches!(store.require(), Err(TaskboardError::NotLoggedIn)));
    }

    #[test]
    fn require_role_rejects_other_roles() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save(&user_with_exp(Utc::now().timestamp() + 3600)).unwrap();

        assert!(store.require_role(Role::Developer).is_ok());
        assert!(matches!(
            store.require_role(Role::LeadDeveloper),
            Err(TaskboardError::WrongRole { .. })
        ));
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save(&user_with_exp(Utc::now().timestamp() + 3600)).unwrap();

        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn corrupt_session_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "{not json").unwrap();

        assert!(matches!(
            store.load(),
            Err(TaskboardError::SessionParse { .. })
        ));
    }
}
