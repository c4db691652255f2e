// sitedeploy: SFTP Deployment Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Laravel backend target.
//!
//! ```text
//! BackendTask
//! Build: php -d memory_limit=-1 -d max_execution_time=300 -f artisan optimize
//! Sync:  partition(<laravel_path>)
//!          app/ --> <remote>/app      laravel_sync_app.txt
//!          ...
//!          loose files --> <remote>   laravel_sync_standalone_files.txt
//!        dispatch() all units at once
//! ```

use anyhow::Context;
use futures_util::future::BoxFuture;
use tracing::info;

use crate::config::SettingKey;
use crate::error::Result;
use crate::sync::dispatch::dispatch;
use crate::sync::partition::partition;
use crate::sync::SyncReport;
use crate::task::tools::Tool;
use crate::task::tools::artisan::ArtisanTool;
use crate::task::{TaskContext, Taskable};

/// Prefix of every backend script name.
pub const SCRIPT_PREFIX: &str = "laravel";

/// Optimizes the Laravel app and uploads it one top-level entry per process.
#[derive(Debug, Clone)]
pub struct BackendTask {
    name: String,
    artisan_command: String,
}

impl Default for BackendTask {
    fn default() -> Self {
        Self::new()
    }
}

impl BackendTask {
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: "Laravel".to_string(),
            artisan_command: "optimize".to_string(),
        }
    }

    async fn build(&self, ctx: &TaskContext) -> Result<()> {
        let project = ctx.settings().require_path(SettingKey::LaravelPath)?;
        ArtisanTool::new(project)
            .command(&self.artisan_command)
            .run(&ctx.tool_context())
            .await
    }

    async fn sync(&self, ctx: &TaskContext) -> Result<SyncReport> {
        let settings = ctx.settings();
        let connection = settings.connection()?;
        let root = settings.require_path(SettingKey::LaravelPath)?;
        let remote = settings.require(SettingKey::RemoteLaravelPath)?;

        let partition = partition(&root, &remote, SCRIPT_PREFIX)
            .with_context(|| format!("cannot split {} into transfer units", root.display()))?;
        info!(
            target_name = %self.name,
            units = partition.units().len(),
            standalone = partition.has_standalone(),
            "Prepared transfer units"
        );

        let tool_ctx = ctx.tool_context();
        Ok(dispatch(&tool_ctx, &connection, partition.into_units(), &self.name).await)
    }
}

impl Taskable for BackendTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn enabled(&self, ctx: &TaskContext) -> bool {
        ctx.settings().deploy_laravel()
    }

    fn build<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.build(ctx))
    }

    fn sync<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<SyncReport>> {
        Box::pin(self.sync(ctx))
    }
}
