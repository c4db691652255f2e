// sitedeploy: SFTP Deployment Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Deployment settings persisted between runs.
//!
//! # Settings File
//!
//! ```text
//! deployment_config.json (flat JSON object, 4-space indent)
//!
//!   load() --> Settings --> missing_keys() --> prompt::fill_missing()
//!                 ^                                     |
//!                 +----------------- save() <-----------+
//! ```
//!
//! A key is "missing" when it is absent or empty. Which keys are required
//! depends on the two deploy flags:
//!
//! ```text
//! always           deploy_react, deploy_laravel
//! any deploy       server_*, base_url, winscp_path
//! deploy_react     react_path, remote_react_path, npm_path
//! deploy_laravel   laravel_path, remote_laravel_path, php_path
//! ```
//!
//! Keys this tool does not know about are kept and written back unchanged.

pub mod keys;
pub mod prompt;


use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::ConfigError;

pub use keys::{KeyScope, SettingKey, ValueKind};

/// Default settings file name, resolved against the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "deployment_config.json";

/// Default frontend build output directory, relative to `react_path`.
pub const DEFAULT_BUILD_DIR: &str = "build";

/// Flat key-value settings record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deploy_react: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deploy_laravel: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_host: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_port",
        skip_serializing_if = "Option::is_none"
    )]
    pub server_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_pass: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub react_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_react_path: Option<String>,
    /// Frontend build output directory, relative to `react_path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub react_build_dir: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub laravel_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_laravel_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub npm_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub php_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winscp_path: Option<PathBuf>,

    /// Unknown keys, preserved across load/save.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// SFTP connection parameters, all present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PortRepr {
    Number(u64),
    Text(String),
}

fn deserialize_port<'de, D>(deserializer: D) -> std::result::Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<PortRepr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(PortRepr::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(PortRepr::Text(text)) => parse_port(&text)
            .map(Some)
            .map_err(|e| serde::de::Error::custom(e.to_string())),
        Some(PortRepr::Number(n)) => u16::try_from(n)
            .ok()
            .filter(|p| *p != 0)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("port out of range: {n}"))),
    }
}

fn parse_port(raw: &str) -> std::result::Result<u16, ConfigError> {
    raw.trim()
        .parse::<u16>()
        .ok()
        .filter(|p| *p != 0)
        .ok_or_else(|| ConfigError::InvalidValue {
            key: SettingKey::ServerPort.as_str().to_string(),
            message: format!("expected a port number between 1 and 65535, got '{}'", raw.trim()),
        })
}

/// Interprets a yes/no answer; anything unrecognized means "no".
#[must_use]
pub fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_lowercase().as_str(),
        "yes" | "y" | "true" | "1"
    )
}

/// Strips whitespace and one pair of surrounding quotes from a pasted path.
fn clean_path(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed)
        .trim()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

fn non_empty_path(value: Option<&PathBuf>) -> Option<&Path> {
    value
        .map(PathBuf::as_path)
        .filter(|p| !p.as_os_str().is_empty())
}

impl Settings {
    /// Loads settings from `path`; a missing file yields empty settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadError` if the file exists but cannot be read,
    /// or `ConfigError::ParseError` if it is not a valid settings object.
    pub fn load(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, starting empty");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content).map_err(|e| match e {
            ConfigError::ParseError { message, .. } => ConfigError::ParseError {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    /// Parses settings from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParseError` if the text is not a valid settings object.
    pub fn parse(content: &str) -> std::result::Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Renders the settings as 4-space indented JSON.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if serialization fails.
    pub fn to_json(&self) -> std::result::Result<String, ConfigError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)
            .map_err(|e| ConfigError::InvalidValue {
                key: "<settings>".to_string(),
                message: e.to_string(),
            })?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Writes the settings to `path`, replacing the previous file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::WriteError` if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> std::result::Result<(), ConfigError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| ConfigError::WriteError {
            path: path.display().to_string(),
            source,
        })?;
        info!(path = %path.display(), "Configuration saved");
        Ok(())
    }

    #[must_use]
    pub fn deploy_react(&self) -> bool {
        self.deploy_react.unwrap_or(false)
    }

    #[must_use]
    pub fn deploy_laravel(&self) -> bool {
        self.deploy_laravel.unwrap_or(false)
    }

    /// Current value of `key` as text, `None` when absent or empty.
    #[must_use]
    pub fn value(&self, key: SettingKey) -> Option<String> {
        match key {
            SettingKey::DeployReact => self.deploy_react.map(|b| b.to_string()),
            SettingKey::DeployLaravel => self.deploy_laravel.map(|b| b.to_string()),
            SettingKey::ServerPort => self.server_port.map(|p| p.to_string()),
            SettingKey::ServerHost
            | SettingKey::ServerUser
            | SettingKey::ServerPass
            | SettingKey::BaseUrl
            | SettingKey::RemoteReactPath
            | SettingKey::RemoteLaravelPath => {
                non_empty(self.text_slot(key)).map(str::to_string)
            }
            SettingKey::ReactPath
            | SettingKey::LaravelPath
            | SettingKey::NpmPath
            | SettingKey::PhpPath
            | SettingKey::WinscpPath => {
                non_empty_path(self.path_slot(key)).map(|p| p.display().to_string())
            }
        }
    }

    fn text_slot(&self, key: SettingKey) -> Option<&str> {
        match key {
            SettingKey::ServerHost => self.server_host.as_deref(),
            SettingKey::ServerUser => self.server_user.as_deref(),
            SettingKey::ServerPass => self.server_pass.as_deref(),
            SettingKey::RemoteReactPath => self.remote_react_path.as_deref(),
            SettingKey::RemoteLaravelPath => self.remote_laravel_path.as_deref(),
            _ => self.base_url.as_deref(),
        }
    }

    const fn text_slot_mut(&mut self, key: SettingKey) -> &mut Option<String> {
        match key {
            SettingKey::ServerHost => &mut self.server_host,
            SettingKey::ServerUser => &mut self.server_user,
            SettingKey::ServerPass => &mut self.server_pass,
            SettingKey::RemoteReactPath => &mut self.remote_react_path,
            SettingKey::RemoteLaravelPath => &mut self.remote_laravel_path,
            _ => &mut self.base_url,
        }
    }

    fn path_slot(&self, key: SettingKey) -> Option<&PathBuf> {
        match key {
            SettingKey::ReactPath => self.react_path.as_ref(),
            SettingKey::LaravelPath => self.laravel_path.as_ref(),
            SettingKey::NpmPath => self.npm_path.as_ref(),
            SettingKey::PhpPath => self.php_path.as_ref(),
            _ => self.winscp_path.as_ref(),
        }
    }

    const fn path_slot_mut(&mut self, key: SettingKey) -> &mut Option<PathBuf> {
        match key {
            SettingKey::ReactPath => &mut self.react_path,
            SettingKey::LaravelPath => &mut self.laravel_path,
            SettingKey::NpmPath => &mut self.npm_path,
            SettingKey::PhpPath => &mut self.php_path,
            _ => &mut self.winscp_path,
        }
    }

    /// Parses `raw` according to the key's kind and stores it.
    ///
    /// Empty text clears the key. Secrets are stored verbatim.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a port is not in 1-65535.
    pub fn set(&mut self, key: SettingKey, raw: &str) -> std::result::Result<(), ConfigError> {
        match key.kind() {
            ValueKind::Flag => {
                let flag = Some(parse_flag(raw));
                if key == SettingKey::DeployReact {
                    self.deploy_react = flag;
                } else {
                    self.deploy_laravel = flag;
                }
            }
            ValueKind::Port => {
                self.server_port = if raw.trim().is_empty() {
                    None
                } else {
                    Some(parse_port(raw)?)
                };
            }
            ValueKind::Secret => {
                *self.text_slot_mut(key) = Some(raw.to_string()).filter(|s| !s.is_empty());
            }
            ValueKind::Text => {
                *self.text_slot_mut(key) = Some(raw.trim().to_string()).filter(|s| !s.is_empty());
            }
            ValueKind::Path => {
                let cleaned = clean_path(raw);
                *self.path_slot_mut(key) = (!cleaned.is_empty()).then(|| PathBuf::from(cleaned));
            }
        }
        Ok(())
    }

    /// Whether `key` is needed given the current deploy flags.
    #[must_use]
    pub fn is_required(&self, key: SettingKey) -> bool {
        match key.scope() {
            KeyScope::Always => true,
            KeyScope::Server => self.deploy_react() || self.deploy_laravel(),
            KeyScope::Frontend => self.deploy_react(),
            KeyScope::Backend => self.deploy_laravel(),
        }
    }

    /// Keys needed given the current deploy flags, in prompt order.
    #[must_use]
    pub fn required_keys(&self) -> Vec<SettingKey> {
        SettingKey::ALL
            .into_iter()
            .filter(|key| self.is_required(*key))
            .collect()
    }

    /// Required keys that are absent or empty, in prompt order.
    #[must_use]
    pub fn missing_keys(&self) -> Vec<SettingKey> {
        SettingKey::ALL
            .into_iter()
            .filter(|key| self.is_required(*key) && self.value(*key).is_none())
            .collect()
    }

    /// Returns the value of a required text or path key.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` if the key is absent or empty.
    pub fn require(&self, key: SettingKey) -> std::result::Result<String, ConfigError> {
        self.value(key).ok_or_else(|| ConfigError::MissingKey {
            key: key.as_str().to_string(),
        })
    }

    /// Returns a required path key.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` if the key is absent or empty.
    pub fn require_path(&self, key: SettingKey) -> std::result::Result<PathBuf, ConfigError> {
        self.require(key).map(PathBuf::from)
    }

    /// Gathers the SFTP connection parameters.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` for the first absent server key.
    pub fn connection(&self) -> std::result::Result<Connection, ConfigError> {
        Ok(Connection {
            host: self.require(SettingKey::ServerHost)?,
            port: self.server_port.ok_or_else(|| ConfigError::MissingKey {
                key: SettingKey::ServerPort.as_str().to_string(),
            })?,
            user: self.require(SettingKey::ServerUser)?,
            password: self.require(SettingKey::ServerPass)?,
        })
    }

    /// Frontend build output directory name.
    #[must_use]
    pub fn react_build_dir(&self) -> &str {
        non_empty(self.react_build_dir.as_deref()).unwrap_or(DEFAULT_BUILD_DIR)
    }

    /// Formats every known key for display, secrets hidden.
    #[must_use]
    pub fn display_lines(&self) -> Vec<String> {
        let mut rows: Vec<(String, String)> = SettingKey::ALL
            .into_iter()
            .map(|key| {
                let shown = match (key.kind(), self.value(key)) {
                    (_, None) => "<unset>".to_string(),
                    (ValueKind::Secret, Some(_)) => "[hidden]".to_string(),
                    (_, Some(value)) => value,
                };
                (key.as_str().to_string(), shown)
            })
            .collect();
        rows.push((
            "react_build_dir".to_string(),
            self.react_build_dir().to_string(),
        ));
        for (key, value) in &self.extra {
            rows.push((key.clone(), value.to_string()));
        }

        let width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
        rows.into_iter()
            .map(|(key, value)| format!("{key:<width$} = {value}"))
            .collect()
    }
}
