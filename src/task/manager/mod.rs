// sitedeploy: SFTP Deployment Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Task manager for running the deployment targets.
//!
//! ```text
//! TaskManager::new(settings)
//!   .add()  .with_dry_run()  .with_script_dir()
//!   .run_all().await
//!       per target: Build --> Sync (failed build still syncs)
//!       --> DeployReport
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::Result;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::Settings;

use super::tasks::backend::BackendTask;
use super::tasks::frontend::FrontendTask;
use super::{TargetReport, Task, TaskContext, Taskable};

/// Outcome of a whole deployment run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployReport {
    targets: Vec<TargetReport>,
    skipped: Vec<String>,
    /// Targets that never started because the run was cancelled.
    not_started: Vec<String>,
}

impl DeployReport {
    pub fn record_target(&mut self, target: TargetReport) {
        self.targets.push(target);
    }

    pub fn record_skipped(&mut self, name: impl Into<String>) {
        self.skipped.push(name.into());
    }

    pub fn record_not_started(&mut self, name: impl Into<String>) {
        self.not_started.push(name.into());
    }

    /// Reports of the targets that ran, in execution order.
    #[must_use]
    pub fn targets(&self) -> &[TargetReport] {
        &self.targets
    }

    /// Names of disabled targets.
    #[must_use]
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// Names of targets left out by a cancellation.
    #[must_use]
    pub fn not_started(&self) -> &[String] {
        &self.not_started
    }

    #[must_use]
    pub fn is_interrupted(&self) -> bool {
        !self.not_started.is_empty() || self.targets.iter().any(TargetReport::is_interrupted)
    }

    #[must_use]
    pub fn target(&self, name: &str) -> Option<&TargetReport> {
        self.targets.iter().find(|t| t.name() == name)
    }

    /// Total number of transfer units across all targets.
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.targets.iter().map(|t| t.sync().total()).sum()
    }

    /// Total number of failed transfer units across all targets.
    #[must_use]
    pub fn failed_unit_count(&self) -> usize {
        self.targets.iter().map(|t| t.sync().failed().len()).sum()
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.not_started.is_empty() && self.targets.iter().all(TargetReport::is_success)
    }
}

/// Manager for running deployment targets.
///
/// Targets run sequentially in the order they were added.
pub struct TaskManager {
    tasks: Vec<Task>,
    cancel_token: CancellationToken,
    settings: Arc<Settings>,
    dry_run: bool,
    script_dir: PathBuf,
}

impl TaskManager {
    #[must_use]
    pub fn new(settings: Arc<Settings>) -> Self {
        Self {
            tasks: Vec::new(),
            cancel_token: CancellationToken::new(),
            settings,
            dry_run: false,
            script_dir: PathBuf::from("."),
        }
    }

    /// Manager with the standard targets: frontend first, then backend.
    #[must_use]
    pub fn with_default_targets(settings: Arc<Settings>) -> Self {
        let mut manager = Self::new(settings);
        manager.add(Task::Frontend(FrontendTask::new()));
        manager.add(Task::Backend(BackendTask::new()));
        manager
    }

    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    #[must_use]
    pub fn with_script_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.script_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Adds a target to be run.
    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    #[must_use]
    pub const fn task_count(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    /// Returns the cancellation token, e.g. for a Ctrl+C handler.
    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Signals running transfers to stop.
    pub fn interrupt_all(&self) {
        info!("Interrupting all tasks");
        self.cancel_token.cancel();
    }

    fn create_context(&self) -> TaskContext {
        TaskContext::new(Arc::clone(&self.settings), self.cancel_token.clone())
            .with_dry_run(self.dry_run)
            .with_script_dir(&self.script_dir)
    }

    /// Runs all targets sequentially.
    ///
    /// Checks for cancellation between targets; targets not started by then
    /// are listed in [`DeployReport::not_started`] next to the reports of
    /// those that ran. Failed builds and failed transfers are logged and
    /// recorded, never returned as errors.
    ///
    /// # Errors
    ///
    /// Returns an error only if a target itself refuses to start.
    pub async fn run_all(&self) -> Result<DeployReport> {
        let mut report = DeployReport::default();
        if self.tasks.is_empty() {
            tracing::debug!("No tasks to run");
            return Ok(report);
        }

        info!(task_count = self.tasks.len(), dry_run = self.dry_run, "Starting deployment");
        let ctx = self.create_context();

        for (i, task) in self.tasks.iter().enumerate() {
            if self.is_cancelled() {
                if task.enabled(&ctx) {
                    warn!(task = %task.name(), "Deployment interrupted, target not started");
                    report.record_not_started(task.name());
                } else {
                    report.record_skipped(task.name());
                }
                continue;
            }

            info!(
                task = %task.name(),
                index = i + 1,
                total = self.tasks.len(),
                "Running task"
            );

            match task.run(&ctx).await? {
                Some(target) => report.record_target(target),
                None => report.record_skipped(task.name()),
            }
        }

        if report.is_interrupted() {
            warn!(
                units = report.unit_count(),
                not_started = report.not_started().len(),
                "Deployment interrupted"
            );
        } else if report.is_success() {
            info!(units = report.unit_count(), "Deployment completed");
        } else {
            warn!(
                units = report.unit_count(),
                failed = report.failed_unit_count(),
                "Deployment completed with failures"
            );
        }
        Ok(report)
    }
}
