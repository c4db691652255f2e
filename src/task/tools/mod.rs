// sitedeploy: SFTP Deployment Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! External tools driven by the deployment tasks.
//!
//! ```text
//! Task --> ToolContext --> ProcessBuilder --> Tools
//!   npm run build, php artisan optimize, WinSCP.com /script=..
//! ToolContext: settings, cancel token, dry-run, script dir
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use futures_util::future::BoxFuture;
use tokio_util::sync::CancellationToken;

use crate::config::{SettingKey, Settings};
use crate::core::process::builder::ProcessBuilder;
use crate::error::{ProcessError, Result};

pub mod artisan;
pub mod npm;
pub mod winscp;

/// Context provided to tools during execution.
#[derive(Debug, Clone)]
pub struct ToolContext {
    settings: Arc<Settings>,
    cancel_token: CancellationToken,
    /// When true, tools log what they would do and return.
    dry_run: bool,
    /// Where transfer scripts and their logs are written.
    script_dir: PathBuf,
}

impl ToolContext {
    #[must_use]
    pub fn new(
        settings: Arc<Settings>,
        cancel_token: CancellationToken,
        dry_run: bool,
        script_dir: impl AsRef<Path>,
    ) -> Self {
        Self {
            settings,
            cancel_token,
            dry_run,
            script_dir: script_dir.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub const fn settings(&self) -> &Arc<Settings> {
        &self.settings
    }

    #[must_use]
    pub const fn cancel_token(&self) -> &CancellationToken {
        &self.cancel_token
    }

    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    #[must_use]
    pub fn script_dir(&self) -> &Path {
        &self.script_dir
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}

/// Executable configured under `key`, or `fallback()` when the key is unset.
///
/// A configured bare name such as `npm` is looked up on PATH so that
/// Windows `.cmd` shims resolve.
fn configured_binary(
    ctx: &ToolContext,
    key: SettingKey,
    default_name: &str,
    fallback: impl FnOnce() -> Option<PathBuf>,
) -> Result<PathBuf> {
    if let Ok(path) = ctx.settings().require_path(key) {
        return Ok(ProcessBuilder::resolve(&path));
    }
    fallback()
        .ok_or_else(|| ProcessError::ExecutableNotFound {
            name: default_name.to_string(),
        })
        .with_context(|| format!("{key} is not set"))
}

/// One external program invocation.
///
/// Implementations run through `ProcessBuilder::run_with_cancellation()` and
/// only log when `ctx.is_dry_run()`.
pub trait Tool: Send + Sync {
    /// Short name for logs ("npm", "php", "winscp").
    fn name(&self) -> &str;

    /// Runs the tool to completion.
    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>>;
}

#[cfg(test)]
pub(crate) mod test_utils;
#[cfg(test)]
mod tests;
