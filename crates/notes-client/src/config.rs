use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub share: ShareConfig,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub missing_token: MissingTokenPolicy,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct SessionConfig {
    pub login_route: String,
    pub storage_path: Option<PathBuf>,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ShareConfig {
    pub base_url: String,
}

/// What to do when an auth-required call is made without a token.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MissingTokenPolicy {
    /// Send the request without credentials and let the backend answer.
    #[default]
    Send,
    /// Fail locally with `ClientError::NotAuthenticated`.
    Reject,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".into(),
            timeout_secs: 30,
            missing_token: MissingTokenPolicy::default(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            login_route: "/login".into(),
            storage_path: None,
        }
    }
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            base_url: "https://example.com".into(),
        }
    }
}

pub fn load(path: &str) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("failed to parse config {path}: {e}, using defaults");
                Config::default()
            }
        },
        Err(e) => {
            tracing::warn!("failed to read config {path}: {e}, using defaults");
            Config::default()
        }
    }
}
