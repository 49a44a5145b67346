use std::path::PathBuf;
use thiserror::Error;

/// Shown when the backend rejects a login without a message.
pub const DEFAULT_LOGIN_ERROR: &str = "Invalid email or password";

#[derive(Error, Debug)]
pub enum TaskboardError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to read input: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("{} (status {status})", .message.as_deref().unwrap_or("Request failed"))]
    Api {
        status: u16,
        message: Option<String>,
    },

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to access session file at {path}: {source}")]
    SessionIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse session file at {path}: {source}")]
    SessionParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Not logged in. Run 'taskboard login' first")]
    NotLoggedIn,

    #[error("Session expired. Run 'taskboard login' again")]
    SessionExpired,

    #[error("This command requires the {required} role")]
    WrongRole { required: &'static str },

    #[error("Invalid token returned by backend: {0}")]
    InvalidToken(String),

    #[error("{0}")]
    Validation(String),

    #[error("Task not found: {0}")]
    TaskNotFound(i64),

    #[error("{}", .0.as_deref().unwrap_or(DEFAULT_LOGIN_ERROR))]
    LoginRejected(Option<String>),

    /// The backend was unreachable or answered with something other than JSON.
    #[error("Login failed. Please try again.")]
    LoginUnavailable(#[source] Option<reqwest::Error>),

    #[error("Status change for task {0} was rolled back")]
    MoveRolledBack(i64),
}

impl TaskboardError {
    /// Fill in `default` when the backend rejected a request without saying why.
    pub fn or_message(self, default: &str) -> Self {
        match self {
            TaskboardError::Api {
                status,
                message: None,
            } => TaskboardError::Api {
                status,
                message: Some(default.to_string()),
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, TaskboardError>;
