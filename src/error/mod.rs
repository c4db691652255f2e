// sitedeploy: SFTP Deployment Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! Typed errors for each failure domain, carried through `anyhow` with
//! `.context()` added at I/O and process boundaries.
//!
//! ```text
//!   ConfigError   ReadError, ParseError, WriteError, InvalidValue, MissingKey
//!   ProcessError  ExecutableNotFound, SpawnFailed, NonZeroExit, Interrupted
//!   FsError       NotFound, NotADirectory, IoError
//!   SyncError     ScriptWrite, Transfer, Join
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

// --- Config Errors ---

/// Settings file and value errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the settings file.
    #[error("failed to read settings file '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not a flat JSON object.
    #[error("failed to parse settings file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Failed to write the settings file.
    #[error("failed to write settings file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Value rejected for a key.
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Required key still absent when it was needed.
    #[error("missing required setting '{key}'")]
    MissingKey { key: String },
}

// --- Process Errors ---

/// External process errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with a status outside its success codes.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },

    /// Process was killed because the run was cancelled.
    #[error("process '{command}' was interrupted")]
    Interrupted { command: String },
}

// --- Filesystem Errors ---

/// Filesystem errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// Path exists but is not a directory.
    #[error("not a directory: {0}")]
    NotADirectory(String),

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Sync Errors ---

/// Per-unit transfer errors.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Transfer script could not be written.
    #[error("failed to write transfer script '{script}': {source}")]
    ScriptWrite {
        script: String,
        #[source]
        source: std::io::Error,
    },

    /// Transfer process failed.
    #[error("transfer '{unit}' failed: {message}")]
    Transfer { unit: String, message: String },

    /// Worker task panicked or was aborted.
    #[error("transfer worker '{unit}' did not finish: {message}")]
    Join { unit: String, message: String },
}
