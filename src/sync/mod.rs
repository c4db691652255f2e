// sitedeploy: SFTP Deployment Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Splitting a project into transfer units and running them.
//!
//! ```text
//! project root
//!   |
//!   v
//! partition()  one level deep
//!   app/  config/  public/  ...  artisan composer.json .env
//!    |       |        |             \______________________/
//!    v       v        v                        v
//!  unit    unit     unit               standalone unit (files only)
//!   |
//!   v
//! dispatch()  one WinSCP process per unit, all at once
//!   script -> WinSCP.com /script=.. /log=..
//!   progress bar += 1 per finished unit
//!   --> SyncReport { succeeded, failed }
//! ```

pub mod dispatch;
pub mod partition;
pub mod script;


use std::path::{Path, PathBuf};

/// One local directory synchronized to one remote directory by one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncUnit {
    name: String,
    local: PathBuf,
    remote: String,
    script_name: String,
    file_mask: Option<String>,
}

impl SyncUnit {
    pub fn new(
        name: impl Into<String>,
        local: impl AsRef<Path>,
        remote: impl Into<String>,
        script_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            local: local.as_ref().to_path_buf(),
            remote: remote.into(),
            script_name: script_name.into(),
            file_mask: None,
        }
    }

    /// Restricts the transfer with a WinSCP file mask.
    #[must_use]
    pub fn with_file_mask(mut self, mask: impl Into<String>) -> Self {
        self.file_mask = Some(mask.into());
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn local(&self) -> &Path {
        &self.local
    }

    #[must_use]
    pub fn remote(&self) -> &str {
        &self.remote
    }

    /// File name of the transfer script, relative to the script directory.
    #[must_use]
    pub fn script_name(&self) -> &str {
        &self.script_name
    }

    #[must_use]
    pub fn file_mask(&self) -> Option<&str> {
        self.file_mask.as_deref()
    }
}

/// Outcome of one batch of transfers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    succeeded: Vec<String>,
    failed: Vec<(String, String)>,
}

impl SyncReport {
    pub fn record_success(&mut self, unit: impl Into<String>) {
        self.succeeded.push(unit.into());
    }

    pub fn record_failure(&mut self, unit: impl Into<String>, reason: impl Into<String>) {
        self.failed.push((unit.into(), reason.into()));
    }

    /// Sorts both lists by unit name.
    pub(crate) fn sort(&mut self) {
        self.succeeded.sort();
        self.failed.sort();
    }

    #[must_use]
    pub fn succeeded(&self) -> &[String] {
        &self.succeeded
    }

    /// Failed units with the reason for each.
    #[must_use]
    pub fn failed(&self) -> &[(String, String)] {
        &self.failed
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Joins a remote base directory and one path segment with `/`.
#[must_use]
pub fn remote_join(base: &str, segment: &str) -> String {
    let base = base.trim_end_matches('/');
    format!("{base}/{segment}")
}
