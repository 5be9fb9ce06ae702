use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::horizon::Horizon;
use crate::i18n::Language;
use crate::storage::STATE_KEY;

const APP_NAME: &str = "tasklist";
pub const DEFAULT_SERVER: &str = "http://localhost:3000";

/// Whether every screen shares one preference key or each gets its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PreferenceScope {
    #[default]
    Shared,
    PerScreen,
}

impl PreferenceScope {
    pub fn key(self, horizon: Horizon) -> String {
        match self {
            PreferenceScope::Shared => STATE_KEY.to_string(),
            PreferenceScope::PerScreen => format!("{}.{}", STATE_KEY, horizon.key()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: String,
    pub token: Option<String>,
    pub timeout_secs: u64,
    pub language: Language,
    pub preference_scope: PreferenceScope,
    /// Screen shown first; accepts 0, 1, 7 or 30.
    pub days_ahead: Horizon,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            token: None,
            timeout_secs: 10,
            language: Language::default(),
            preference_scope: PreferenceScope::default(),
            days_ahead: Horizon::Today,
            log_file: None,
        }
    }
}

impl Config {
    /// Loads the config file, if any, then applies `TASKLIST_SERVER`.
    pub fn load(path_override: Option<&Path>) -> Result<Config> {
        let path = match path_override {
            Some(p) => Some(p.to_path_buf()),
            None => config_file(),
        };

        let mut config = match path {
            Some(path) if path.exists() => {
                info!(path = %path.display(), "loading config");
                Config::from_file(&path)?
            }
            _ => {
                debug!("no config file; using defaults");
                Config::default()
            }
        };

        if let Ok(server) = std::env::var("TASKLIST_SERVER") {
            config.server = server;
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path)?;
        Config::parse(&contents).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(contents: &str) -> std::result::Result<Config, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// `TASKLIST_CONFIG`, else `<config_dir>/tasklist/config.toml`.
pub fn config_file() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("TASKLIST_CONFIG") {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join("config.toml"))
}
