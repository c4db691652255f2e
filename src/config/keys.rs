// sitedeploy: SFTP Deployment Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Setting keys and their prompt metadata.
//!
//! ```text
//! SettingKey    json key             kind    scope
//! DeployReact   deploy_react         Flag    Always
//! DeployLaravel deploy_laravel       Flag    Always
//! ServerHost .. WinscpPath           ...     Server
//! ReactPath  .. NpmPath              ...     Frontend
//! LaravelPath.. PhpPath              ...     Backend
//! ```

/// How a value is entered and validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// yes/no question.
    Flag,
    /// Free text.
    Text,
    /// Hidden input.
    Secret,
    /// TCP port, 1-65535.
    Port,
    /// Local filesystem path.
    Path,
}

/// When a key has to be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyScope {
    Always,
    /// Needed when at least one target is deployed.
    Server,
    /// Needed when the frontend is deployed.
    Frontend,
    /// Needed when the backend is deployed.
    Backend,
}

/// Every prompted key of the settings file, in prompt order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SettingKey {
    DeployReact,
    DeployLaravel,
    ServerHost,
    ServerPort,
    ServerUser,
    ServerPass,
    BaseUrl,
    WinscpPath,
    ReactPath,
    RemoteReactPath,
    NpmPath,
    LaravelPath,
    RemoteLaravelPath,
    PhpPath,
}

impl SettingKey {
    pub const ALL: [Self; 14] = [
        Self::DeployReact,
        Self::DeployLaravel,
        Self::ServerHost,
        Self::ServerPort,
        Self::ServerUser,
        Self::ServerPass,
        Self::BaseUrl,
        Self::WinscpPath,
        Self::ReactPath,
        Self::RemoteReactPath,
        Self::NpmPath,
        Self::LaravelPath,
        Self::RemoteLaravelPath,
        Self::PhpPath,
    ];

    /// Key as written in the JSON file.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DeployReact => "deploy_react",
            Self::DeployLaravel => "deploy_laravel",
            Self::ServerHost => "server_host",
            Self::ServerPort => "server_port",
            Self::ServerUser => "server_user",
            Self::ServerPass => "server_pass",
            Self::BaseUrl => "base_url",
            Self::WinscpPath => "winscp_path",
            Self::ReactPath => "react_path",
            Self::RemoteReactPath => "remote_react_path",
            Self::NpmPath => "npm_path",
            Self::LaravelPath => "laravel_path",
            Self::RemoteLaravelPath => "remote_laravel_path",
            Self::PhpPath => "php_path",
        }
    }

    #[must_use]
    pub const fn kind(self) -> ValueKind {
        match self {
            Self::DeployReact | Self::DeployLaravel => ValueKind::Flag,
            Self::ServerPass => ValueKind::Secret,
            Self::ServerPort => ValueKind::Port,
            Self::WinscpPath
            | Self::ReactPath
            | Self::NpmPath
            | Self::LaravelPath
            | Self::PhpPath => ValueKind::Path,
            Self::ServerHost
            | Self::ServerUser
            | Self::BaseUrl
            | Self::RemoteReactPath
            | Self::RemoteLaravelPath => ValueKind::Text,
        }
    }

    #[must_use]
    pub const fn scope(self) -> KeyScope {
        match self {
            Self::DeployReact | Self::DeployLaravel => KeyScope::Always,
            Self::ServerHost
            | Self::ServerPort
            | Self::ServerUser
            | Self::ServerPass
            | Self::BaseUrl
            | Self::WinscpPath => KeyScope::Server,
            Self::ReactPath | Self::RemoteReactPath | Self::NpmPath => KeyScope::Frontend,
            Self::LaravelPath | Self::RemoteLaravelPath | Self::PhpPath => KeyScope::Backend,
        }
    }

    /// Question shown to the user.
    #[must_use]
    pub const fn prompt(self) -> &'static str {
        match self {
            Self::DeployReact => "Do you want to deploy React?",
            Self::DeployLaravel => "Do you want to deploy Laravel?",
            Self::ServerHost => "Server host",
            Self::ServerPort => "Server SFTP port",
            Self::ServerUser => "Server user",
            Self::ServerPass => "Server password",
            Self::BaseUrl => "Base URL of the deployed site",
            Self::WinscpPath => "Path to WinSCP.com",
            Self::ReactPath => "Local React project path",
            Self::RemoteReactPath => "Remote React path",
            Self::NpmPath => "Path to npm",
            Self::LaravelPath => "Local Laravel project path",
            Self::RemoteLaravelPath => "Remote Laravel path",
            Self::PhpPath => "Path to php",
        }
    }
}

impl std::fmt::Display for SettingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
