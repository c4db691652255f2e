// sitedeploy: SFTP Deployment Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Deployment targets.
//!
//! # Architecture
//!
//! ```text
//! TaskManager
//!      |
//!      v
//!   Task enum ----> TaskContext (settings, cancel token, script dir)
//!      |
//!      v
//!    Steps
//!   /     \
//!  v       v
//! Build   Sync
//!  |        |
//!  v        v
//! npm /   partition --> dispatch
//! artisan              WinSCP x N
//!
//! Task variants: Frontend (React), Backend (Laravel)
//! ```
//!
//! # Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`TaskManager`](manager::TaskManager) | Runs the targets in order and collects a report |
//! | [`Task`] | Enum dispatching to the concrete targets |
//! | [`Taskable`] | Trait defining the common target interface |
//! | [`TaskContext`] | Settings, cancellation token and run flags |
//!
//! A failed build is logged and the sync step still runs, so a target
//! always reports what it transferred.

pub mod manager;
pub mod tasks;
pub mod tools;

use futures_util::future::BoxFuture;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::config::Settings;
use crate::error::Result;
use crate::sync::SyncReport;
use crate::task::tools::ToolContext;

use tasks::backend::BackendTask;
use tasks::frontend::FrontendTask;

/// Trait for deployment targets.
///
/// Implemented by every target and by [`Task`] itself, which delegates to
/// the inner type through `impl_taskable_for_task!`.
pub trait Taskable {
    /// Returns the target name used in logs and reports.
    fn name(&self) -> &str;

    /// Returns whether this target should be deployed.
    fn enabled(&self, _ctx: &TaskContext) -> bool {
        true
    }

    /// Produces the deployable artifacts.
    fn build<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<()>>;

    /// Transfers the target to the server.
    ///
    /// Individual transfer failures end up in the report; an `Err` means the
    /// target could not be synchronized at all.
    fn sync<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<SyncReport>>;
}

/// Context provided to tasks during execution.
#[derive(Debug, Clone)]
pub struct TaskContext {
    settings: Arc<Settings>,
    cancel_token: CancellationToken,
    dry_run: bool,
    script_dir: PathBuf,
}

impl TaskContext {
    /// Creates a context writing scripts to the current directory.
    #[must_use]
    pub fn new(settings: Arc<Settings>, cancel_token: CancellationToken) -> Self {
        Self {
            settings,
            cancel_token,
            dry_run: false,
            script_dir: PathBuf::from("."),
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
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Sets where transfer scripts and session logs are written.
    #[must_use]
    pub fn with_script_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.script_dir = dir.as_ref().to_path_buf();
        self
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    /// Creates a `ToolContext` from this `TaskContext`.
    #[must_use]
    pub fn tool_context(&self) -> ToolContext {
        ToolContext::new(
            Arc::clone(&self.settings),
            self.cancel_token.clone(),
            self.dry_run,
            &self.script_dir,
        )
    }
}

/// Outcome of one target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetReport {
    name: String,
    build_error: Option<String>,
    sync_error: Option<String>,
    sync: SyncReport,
    interrupted: bool,
}

impl TargetReport {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Replaces the transfer outcome.
    #[must_use]
    pub fn with_sync(mut self, sync: SyncReport) -> Self {
        self.sync = sync;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Why the build step failed, if it did.
    #[must_use]
    pub fn build_error(&self) -> Option<&str> {
        self.build_error.as_deref()
    }

    /// Why the target could not be synchronized at all, if so.
    #[must_use]
    pub fn sync_error(&self) -> Option<&str> {
        self.sync_error.as_deref()
    }

    #[must_use]
    pub const fn sync(&self) -> &SyncReport {
        &self.sync
    }

    /// Whether the run was cancelled while this target was in progress.
    #[must_use]
    pub const fn is_interrupted(&self) -> bool {
        self.interrupted
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        !self.interrupted
            && self.build_error.is_none()
            && self.sync_error.is_none()
            && self.sync.is_success()
    }
}

/// A deployment target.
#[derive(Debug, Clone)]
pub enum Task {
    /// React single-page app: `npm run build`, then one transfer.
    Frontend(FrontendTask),
    /// Laravel app: `artisan optimize`, then one transfer per top-level entry.
    Backend(BackendTask),
}

impl Task {
    /// Runs build then sync.
    ///
    /// Returns `Ok(None)` when the target is disabled. A failed build is
    /// logged and recorded, and the sync step runs regardless unless the run
    /// was cancelled meanwhile; then no scripts are written and the report
    /// carries the interruption as its sync error.
    ///
    /// # Errors
    ///
    /// Returns an error only if the run was cancelled before the target
    /// started.
    pub async fn run(&self, ctx: &TaskContext) -> Result<Option<TargetReport>> {
        let name = Taskable::name(self);
        if !Taskable::enabled(self, ctx) {
            info!("{name} deployment is disabled");
            return Ok(None);
        }
        if ctx.is_cancelled() {
            anyhow::bail!("{name} deployment interrupted before build");
        }

        let mut report = TargetReport::new(name);

        info!(target_name = %name, "Building");
        if let Err(e) = Taskable::build(self, ctx).await {
            let message = format!("{e:#}");
            error!(target_name = %name, error = %message, "Build failed, syncing anyway");
            report.build_error = Some(message);
        }

        if ctx.is_cancelled() {
            warn!(target_name = %name, "Interrupted, skipping sync");
            report.sync_error = Some("interrupted before sync".to_string());
            report.interrupted = true;
            return Ok(Some(report));
        }

        info!(target_name = %name, "Synchronizing");
        match Taskable::sync(self, ctx).await {
            Ok(sync) => report.sync = sync,
            Err(e) => {
                let message = format!("{e:#}");
                error!(target_name = %name, error = %message, "Sync failed");
                report.sync_error = Some(message);
            }
        }
        report.interrupted = ctx.is_cancelled();

        Ok(Some(report))
    }
}

/// Implements `Taskable` for `Task` by delegating to inner types.
macro_rules! impl_taskable_for_task {
    ($($variant:ident),+ $(,)?) => {
        impl Taskable for Task {
            fn name(&self) -> &str {
                match self {
                    $(Task::$variant(t) => Taskable::name(t),)+
                }
            }

            fn enabled(&self, ctx: &TaskContext) -> bool {
                match self {
                    $(Task::$variant(t) => Taskable::enabled(t, ctx),)+
                }
            }

            fn build<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<()>> {
                match self {
                    $(Task::$variant(t) => Taskable::build(t, ctx),)+
                }
            }

            fn sync<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<SyncReport>> {
                match self {
                    $(Task::$variant(t) => Taskable::sync(t, ctx),)+
                }
            }
        }
    };
}

impl_taskable_for_task!(Frontend, Backend);

#[cfg(test)]
mod tests;
