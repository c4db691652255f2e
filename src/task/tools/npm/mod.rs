// sitedeploy: SFTP Deployment Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! npm script runner for the frontend build.
//!
//! ```text
//! <react_path>$ npm run build
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::info;

use super::{BoxFuture, Tool, ToolContext, configured_binary};
use crate::config::SettingKey;
use crate::core::process::builder::ProcessBuilder;
use crate::error::{ProcessError, Result};

/// Runs `npm run <script>` inside the frontend project.
#[derive(Debug, Clone)]
pub struct NpmTool {
    project: PathBuf,
    script: String,
}

impl NpmTool {
    #[must_use]
    pub fn new(project: impl AsRef<Path>) -> Self {
        Self {
            project: project.as_ref().to_path_buf(),
            script: "build".to_string(),
        }
    }

    #[must_use]
    pub fn script(mut self, script: impl Into<String>) -> Self {
        self.script = script.into();
        self
    }

    fn binary(ctx: &ToolContext) -> Result<PathBuf> {
        configured_binary(ctx, SettingKey::NpmPath, "npm", || ProcessBuilder::find("npm"))
    }

    /// The process this tool would start.
    ///
    /// # Errors
    ///
    /// Returns an error if no npm binary is configured or on PATH.
    pub fn process(&self, ctx: &ToolContext) -> Result<ProcessBuilder> {
        Ok(ProcessBuilder::new(Self::binary(ctx)?)
            .args(["run", self.script.as_str()])
            .cwd(&self.project)
            .name(format!("npm run {}", self.script)))
    }
}

impl Tool for NpmTool {
    fn name(&self) -> &str {
        "npm"
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            if ctx.is_dry_run() {
                info!(
                    project = %self.project.display(),
                    script = %self.script,
                    "[dry-run] Would run npm script"
                );
                return Ok(());
            }

            let process = self.process(ctx)?;
            info!(cmd = %process.command_line(), "Executing");
            let output = process
                .run_with_cancellation(ctx.cancel_token().clone())
                .await
                .with_context(|| format!("npm run {} failed", self.script))?;

            if output.is_interrupted() {
                return Err(ProcessError::Interrupted {
                    command: format!("npm run {}", self.script),
                }
                .into());
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests;
