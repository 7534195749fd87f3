use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use log::warn;
use serde::{Deserialize, Serialize};
use trainlog_domain as domain;

pub const ENV_REMOTE_URL: &str = "TRAINLOG_REMOTE_URL";
pub const ENV_REMOTE_API_KEY: &str = "TRAINLOG_REMOTE_API_KEY";

#[allow(async_fn_in_trait)]
pub trait SettingsRepository {
    async fn read_settings(&self) -> Result<Settings, Error>;
    async fn write_settings(&self, settings: &Settings) -> Result<(), Error>;
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to access settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub sync_token: Option<String>,
    pub remote_url: Option<String>,
    pub remote_api_key: Option<String>,
    pub database: Option<PathBuf>,
}

impl Settings {
    /// Override the remote configuration by the environment.
    #[must_use]
    pub fn with_env(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = var(ENV_REMOTE_URL) {
            self.remote_url = Some(url);
        }
        if let Some(api_key) = var(ENV_REMOTE_API_KEY) {
            self.remote_api_key = Some(api_key);
        }
        self
    }

    /// URL and API key of the remote replica, if it is fully configured.
    #[must_use]
    pub fn remote(&self) -> Option<(&str, &str)> {
        let url = self.remote_url.as_deref()?.trim();
        let api_key = self.remote_api_key.as_deref()?.trim();
        if url.starts_with("http") && !api_key.is_empty() {
            Some((url, api_key))
        } else {
            None
        }
    }

    #[must_use]
    pub fn sync_token(&self) -> Option<domain::SyncToken> {
        let token = self.sync_token.as_deref()?;
        match domain::SyncToken::new(token) {
            Ok(token) => Some(token),
            Err(err) => {
                warn!("ignoring stored sync code: {err}");
                None
            }
        }
    }
}

pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsRepository for SettingsFile {
    async fn read_settings(&self) -> Result<Settings, Error> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Settings::default()),
            Err(err) => Err(err.into()),
        }
    }

    async fn write_settings(&self, settings: &Settings) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(settings)?)?;
        Ok(())
    }
}
