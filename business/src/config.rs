use std::any::Any;
use std::env::vars;

use accounts_states::{SnapshotClone, State};
use serde::Deserialize;

use crate::Session;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:4000";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read environment: {0}")]
    Env(#[from] serde_env::Error),
}

/// Raw environment variables, before defaults are applied.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    accounts_api_base_url: Option<String>,
    accounts_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessConfig {
    pub api_base_url: String,
}

impl BusinessConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            api_base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// URL of an endpoint under `/api/v1/auth`.
    pub fn auth_url(&self, endpoint: &str) -> String {
        format!("{}/api/v1/auth/{endpoint}", self.api_base_url)
    }

    /// Loads `.env` (if any) and reads `ACCOUNTS_API_BASE_URL` / `ACCOUNTS_TOKEN`.
    pub fn from_env() -> Result<(Self, Session), ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => log::info!("Loaded environment from {}", path.display()),
            Err(err) if err.not_found() => {}
            Err(err) => log::warn!("Ignoring unreadable .env file: {err}"),
        }
        Self::from_vars(vars())
    }

    /// Same as [`BusinessConfig::from_env`] over an explicit set of variables.
    pub fn from_vars<I, S>(vars: I) -> Result<(Self, Session), ConfigError>
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let RawConfig {
            accounts_api_base_url,
            accounts_token,
        } = serde_env::from_iter(vars)?;

        let config = match accounts_api_base_url {
            Some(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => {
                log::info!("ACCOUNTS_API_BASE_URL not set, using {DEFAULT_API_BASE_URL}");
                Self::default()
            }
        };
        Ok((config, Session::new(accounts_token)))
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

impl SnapshotClone for BusinessConfig {
    fn clone_boxed(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}

impl State for BusinessConfig {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
