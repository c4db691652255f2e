// sitedeploy: SFTP Deployment Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! WinSCP console runner.
//!
//! ```text
//! script.txt --> WinSCP.com /ini=nul /script=script.txt /log=script.log
//! ```
//!
//! `/ini=nul` keeps concurrent instances from fighting over one
//! configuration store.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info};

use super::{BoxFuture, Tool, ToolContext, configured_binary};
use crate::config::SettingKey;
use crate::core::process::builder::ProcessBuilder;
use crate::error::{ProcessError, Result};

const COMMON_PATHS: [&str; 4] = [
    r"C:\Program Files (x86)\WinSCP\WinSCP.com",
    r"C:\Program Files\WinSCP\WinSCP.com",
    r"C:\Program Files (x86)\WinSCP\WinSCP.exe",
    r"C:\Program Files\WinSCP\WinSCP.exe",
];

/// Runs one WinSCP script.
#[derive(Debug, Clone, Default)]
pub struct WinScpTool {
    script: Option<PathBuf>,
}

impl WinScpTool {
    #[must_use]
    pub const fn new() -> Self {
        Self { script: None }
    }

    #[must_use]
    pub fn script(mut self, path: impl AsRef<Path>) -> Self {
        self.script = Some(path.as_ref().to_path_buf());
        self
    }

    /// Looks for WinSCP on PATH, then in the default install locations.
    #[must_use]
    pub fn locate() -> Option<PathBuf> {
        ProcessBuilder::find("WinSCP.com")
            .or_else(|| ProcessBuilder::find("winscp.com"))
            .or_else(|| ProcessBuilder::find("WinSCP"))
            .or_else(|| {
                COMMON_PATHS
                    .iter()
                    .map(PathBuf::from)
                    .find(|p| p.exists())
            })
    }

    fn binary(ctx: &ToolContext) -> Result<PathBuf> {
        configured_binary(ctx, SettingKey::WinscpPath, "WinSCP.com", Self::locate)
    }

    /// The process this tool would start.
    ///
    /// # Errors
    ///
    /// Returns an error if no script is set or WinSCP cannot be found.
    pub fn process(&self, ctx: &ToolContext) -> Result<ProcessBuilder> {
        let script = self
            .script
            .as_ref()
            .context("WinScpTool: script path is required")?;
        let log = script.with_extension("log");
        let name = script
            .file_stem()
            .map_or_else(|| "winscp".to_string(), |s| s.to_string_lossy().into_owned());

        Ok(ProcessBuilder::new(Self::binary(ctx)?)
            .arg("/ini=nul")
            .arg(format!("/script={}", script.display()))
            .arg(format!("/log={}", log.display()))
            .name(name))
    }
}

impl Tool for WinScpTool {
    fn name(&self) -> &str {
        "winscp"
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let process = self.process(ctx)?;

            if ctx.is_dry_run() {
                info!(cmd = %process.command_line(), "[dry-run] Would run WinSCP script");
                return Ok(());
            }

            debug!(cmd = %process.command_line(), "Running WinSCP script");
            let command = process.command_line();
            let output = process
                .run_with_cancellation(ctx.cancel_token().clone())
                .await?;

            if output.is_interrupted() {
                return Err(ProcessError::Interrupted { command }.into());
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests;
