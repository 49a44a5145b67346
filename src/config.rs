use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Deserialize;
use url::Url;

use crate::error::{Result, TaskboardError};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080/api";

#[derive(Deserialize, Default)]
pub struct Config {
    pub backend_url: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).map_err(|e| TaskboardError::ConfigRead {
                path: config_path.clone(),
                source: e,
            })?;

        toml::from_str(&contents).map_err(|e| TaskboardError::ConfigParse {
            path: config_path,
            source: e,
        })
    }

    /// Directory holding `config.toml` and the session file.
    ///
    /// `TASKBOARD_CONFIG_DIR` overrides the platform location.
    pub fn config_dir() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var("TASKBOARD_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }

        ProjectDirs::from("", "", "taskboard")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or(TaskboardError::NoConfigDir)
    }

    pub fn config_path() -> Result<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get backend URL with env var taking precedence over config file
    pub fn backend_url(&self) -> Result<Url> {
        let raw = std::env::var("TASKBOARD_BACKEND_URL")
            .ok()
            .or_else(|| self.backend_url.clone())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        parse_backend_url(&raw)
    }
}

/// Parse a base URL, normalizing it to end in `/` so relative paths join below it.
pub fn parse_backend_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    let normalized = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };

    let url = Url::parse(&normalized).map_err(|_| TaskboardError::InvalidUrl(raw.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(TaskboardError::InvalidUrl(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_url_gets_trailing_slash() {
        let url = parse_backend_url("http://localhost:8080/api").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/");
        assert_eq!(
            url.join("auth/login").unwrap().as_str(),
            "http://localhost:8080/api/auth/login"
        );
    }

    #[test]
    fn backend_url_rejects_other_schemes() {
        assert!(matches!(
            parse_backend_url("ftp://example.com"),
            Err(TaskboardError::InvalidUrl(_))
        ));
        assert!(parse_backend_url("not a url").is_err());
    }

    #[test]
    fn config_parses_backend_url() {
        let config: Config = toml::from_str("backend_url = \"https://tasks.example.com/api\"").unwrap();
        assert_eq!(
            config.backend_url.as_deref(),
            Some("https://tasks.example.com/api")
        );
    }
}
