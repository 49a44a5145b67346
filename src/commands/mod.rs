pub mod auth;
pub mod board;
pub mod dashboard;
pub mod developers;
pub mod init;
pub mod tasks;
pub mod team;

use dialoguer::Password;
use url::Url;

use crate::client::TaskboardClient;
use crate::error::Result;
use crate::session::SessionStore;
use crate::types::{Role, Task, User};

/// The logged-in user and a client carrying their token.
pub struct Session {
    pub user: User,
    pub client: TaskboardClient,
}

impl Session {
    pub fn open(base: Url, store: &SessionStore) -> Result<Self> {
        Ok(Self::from_user(base, store.require()?))
    }

    /// Open the session, failing unless it belongs to `role`.
    pub fn open_as(base: Url, store: &SessionStore, role: Role) -> Result<Self> {
        Ok(Self::from_user(base, store.require_role(role)?))
    }

    pub fn from_user(base: Url, user: User) -> Self {
        let client = TaskboardClient::with_token(base, user.token.clone());
        Self { user, client }
    }

    /// Tasks a lead created, or tasks assigned to a developer.
    pub async fn own_tasks(&self) -> Result<Vec<Task>> {
        match self.user.role {
            Role::LeadDeveloper => self.client.lead_tasks(&self.user.email).await,
            Role::Developer => self.client.developer_tasks(&self.user.email).await,
        }
    }
}

/// Use the given password or ask for it without echo.
fn password_or_prompt(given: Option<String>, prompt: &str) -> Result<String> {
    match given {
        Some(password) => Ok(password),
        None => Ok(Password::new().with_prompt(prompt).interact()?),
    }
}
