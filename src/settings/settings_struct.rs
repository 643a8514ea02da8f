use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::utils::http::DEFAULT_TIMEOUT;
use crate::utils::{file_exists, file_get};

/// Subscription URL used when none is configured
pub const DEFAULT_SUBSCRIPTION_URL: &str = "http://127.0.0.1:8000/sub";
/// Template read on every conversion
pub const DEFAULT_TEMPLATE_PATH: &str = "resources/out-template.yaml";

/// Directories searched for a config file, in order
const CONFIG_DIRS: [&str; 2] = [".", "./configs"];
const CONFIG_NAMES: [&str; 3] = ["config.yaml", "config.yml", "config.toml"];

pub const ENV_URL: &str = "SUBCONV_URL";
pub const ENV_LISTEN: &str = "SUBCONV_LISTEN";
pub const ENV_PORT: &str = "SUBCONV_PORT";

fn default_url() -> String {
    DEFAULT_SUBSCRIPTION_URL.to_string()
}

fn default_listen_address() -> String {
    "0.0.0.0".to_string()
}

fn default_listen_port() -> u16 {
    8088
}

fn default_template_path() -> String {
    DEFAULT_TEMPLATE_PATH.to_string()
}

fn default_fetch_timeout() -> u64 {
    DEFAULT_TIMEOUT
}

fn default_info_log_level() -> String {
    "info".to_string()
}

/// Process settings. Loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Subscription URL
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_listen_address")]
    pub listen_address: String,
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,
    #[serde(default = "default_template_path")]
    pub template_path: String,
    /// Subscription fetch timeout in seconds
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout: u64,
    #[serde(default = "default_info_log_level")]
    pub log_level: String,

    /// Where the settings were loaded from, empty for defaults
    #[serde(skip)]
    pub pref_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            url: default_url(),
            listen_address: default_listen_address(),
            listen_port: default_listen_port(),
            template_path: default_template_path(),
            fetch_timeout: default_fetch_timeout(),
            log_level: default_info_log_level(),
            pref_path: String::new(),
        }
    }
}

impl Settings {
    /// Parse settings from YAML or TOML text.
    ///
    /// `extension` picks the format when known; otherwise YAML is tried first.
    pub fn load_from_content(
        content: &str,
        extension: Option<&str>,
    ) -> Result<Self, SettingsError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        match extension {
            Some("toml") => Ok(toml::from_str(content)?),
            Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(content)?),
            _ => match serde_yaml::from_str::<Self>(content) {
                Ok(settings) => Ok(settings),
                Err(yaml_err) => toml::from_str(content).map_err(|_| yaml_err.into()),
            },
        }
    }

    /// Load settings from a file
    pub fn load_from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = file_get(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let extension = path.extension().and_then(|e| e.to_str());
        let mut settings = Self::load_from_content(&content, extension)?;
        settings.pref_path = path.display().to_string();
        Ok(settings)
    }

    /// First config file found in the search path
    pub fn find_config_file() -> Option<PathBuf> {
        CONFIG_DIRS
            .iter()
            .flat_map(|dir| CONFIG_NAMES.iter().map(move |name| Path::new(dir).join(name)))
            .find(|path| path.to_str().is_some_and(file_exists))
    }

    /// Load settings for the process.
    ///
    /// An explicit path must exist. Without one, the search path is used and a
    /// missing file means defaults. Environment overrides are applied last.
    pub fn load(config_path: Option<&str>) -> Result<Self, SettingsError> {
        let mut settings = match config_path {
            Some(path) => Self::load_from_file(Path::new(path))?,
            None => match Self::find_config_file() {
                Some(path) => Self::load_from_file(&path)?,
                None => Self::default(),
            },
        };
        settings.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Apply overrides looked up by environment variable name
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_URL).filter(|v| !v.trim().is_empty()) {
            self.url = url.trim().to_string();
        }
        if let Some(address) = lookup(ENV_LISTEN).filter(|v| !v.trim().is_empty()) {
            self.listen_address = address.trim().to_string();
        }
        if let Some(port) = lookup(ENV_PORT).filter(|v| !v.trim().is_empty()) {
            self.listen_port = port.trim().parse().map_err(|_| SettingsError::InvalidValue {
                key: ENV_PORT.to_string(),
                value: port.clone(),
            })?;
        }
        Ok(())
    }

    /// Address the HTTP server binds to
    pub fn listen_addr(&self) -> String {
        let address = self.listen_address.trim();
        if address.is_empty() {
            format!("{}:{}", default_listen_address(), self.listen_port)
        } else if address.contains(':') {
            // Already has a port, use as is
            address.to_string()
        } else {
            format!("{}:{}", address, self.listen_port)
        }
    }
}
