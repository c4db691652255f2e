// sitedeploy: SFTP Deployment Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Laravel artisan commands through the PHP CLI.
//!
//! ```text
//! php -d memory_limit=-1 -d max_execution_time=300 -f <project>/artisan optimize
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::info;

use super::{BoxFuture, Tool, ToolContext, configured_binary};
use crate::config::SettingKey;
use crate::core::process::builder::ProcessBuilder;
use crate::error::{ProcessError, Result};

/// PHP ini overrides applied to every artisan call.
const PHP_INI_OVERRIDES: [(&str, &str); 2] =
    [("memory_limit", "-1"), ("max_execution_time", "300")];

/// Runs one artisan command of a Laravel project.
#[derive(Debug, Clone)]
pub struct ArtisanTool {
    project: PathBuf,
    command: String,
}

impl ArtisanTool {
    #[must_use]
    pub fn new(project: impl AsRef<Path>) -> Self {
        Self {
            project: project.as_ref().to_path_buf(),
            command: "optimize".to_string(),
        }
    }

    #[must_use]
    pub fn command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    fn binary(ctx: &ToolContext) -> Result<PathBuf> {
        configured_binary(ctx, SettingKey::PhpPath, "php", || ProcessBuilder::find("php"))
    }

    /// The process this tool would start.
    ///
    /// # Errors
    ///
    /// Returns an error if no PHP binary is configured or on PATH.
    pub fn process(&self, ctx: &ToolContext) -> Result<ProcessBuilder> {
        let mut builder = ProcessBuilder::new(Self::binary(ctx)?);
        for (key, value) in PHP_INI_OVERRIDES {
            builder = builder.arg("-d").arg(format!("{key}={value}"));
        }
        Ok(builder
            .arg("-f")
            .arg(self.project.join("artisan"))
            .arg(&self.command)
            .cwd(&self.project)
            .name(format!("artisan {}", self.command)))
    }
}

impl Tool for ArtisanTool {
    fn name(&self) -> &str {
        "php"
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            if ctx.is_dry_run() {
                info!(
                    project = %self.project.display(),
                    command = %self.command,
                    "[dry-run] Would run artisan"
                );
                return Ok(());
            }

            let process = self.process(ctx)?;
            info!(cmd = %process.command_line(), "Executing");
            let output = process
                .run_with_cancellation(ctx.cancel_token().clone())
                .await
                .with_context(|| format!("artisan {} failed", self.command))?;

            if output.is_interrupted() {
                return Err(ProcessError::Interrupted {
                    command: format!("artisan {}", self.command),
                }
                .into());
            }
            Ok(())
        })
    }
}
