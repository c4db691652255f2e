// sitedeploy: SFTP Deployment Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! ```text
//! -c, --config FILE  settings file (default deployment_config.json)
//! --dry              log builds and transfers instead of running them
//! -l, --log-level N  console verbosity (0-6)
//! --file-log-level   file verbosity (defaults to --log-level)
//! --log-file FILE    also log to FILE
//! --script-dir DIR   where transfer scripts and session logs go
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::config::DEFAULT_SETTINGS_FILE;

/// Global options available for all commands.
#[derive(Debug, Clone, Args)]
pub struct GlobalOptions {
    /// Settings file to read and update.
    #[arg(short = 'c', long = "config", value_name = "FILE", default_value = DEFAULT_SETTINGS_FILE)]
    pub config: PathBuf,

    /// Logs the builds and transfers that would run without running them.
    /// No transfer scripts are written.
    #[arg(long)]
    pub dry: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Directory for WinSCP scripts and session logs (default: current directory).
    #[arg(long = "script-dir", value_name = "DIR")]
    pub script_dir: Option<PathBuf>,
}

impl Default for GlobalOptions {
    fn default() -> Self {
        Self {
            config: PathBuf::from(DEFAULT_SETTINGS_FILE),
            dry: false,
            log_level: None,
            file_log_level: None,
            log_file: None,
            script_dir: None,
        }
    }
}

impl GlobalOptions {
    /// Script directory, the current directory unless overridden.
    #[must_use]
    pub fn script_dir(&self) -> PathBuf {
        self.script_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}
