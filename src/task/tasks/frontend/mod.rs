// sitedeploy: SFTP Deployment Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! React frontend target.
//!
//! ```text
//! FrontendTask
//! Build: <react_path>$ npm run build
//! Sync:  <react_path>/<react_build_dir> --> <remote_react_path>
//!        one unit, script react_sync_script.txt
//! ```

use std::path::PathBuf;

use crate::error::Result;
use futures_util::future::BoxFuture;
use tracing::warn;

use crate::config::{SettingKey, Settings};
use crate::sync::dispatch::dispatch;
use crate::sync::{SyncReport, SyncUnit};
use crate::task::tools::Tool;
use crate::task::tools::npm::NpmTool;
use crate::task::{TaskContext, Taskable};

/// Script file used for the frontend transfer.
pub const SCRIPT_NAME: &str = "react_sync_script.txt";

/// Builds the React app and uploads its build output.
#[derive(Debug, Clone)]
pub struct FrontendTask {
    name: String,
    npm_script: String,
}

impl Default for FrontendTask {
    fn default() -> Self {
        Self::new()
    }
}

impl FrontendTask {
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: "React".to_string(),
            npm_script: "build".to_string(),
        }
    }

    /// The single transfer unit of this target.
    ///
    /// # Errors
    ///
    /// Returns an error if `react_path` or `remote_react_path` is not set.
    pub fn unit(settings: &Settings) -> Result<SyncUnit> {
        let project = settings.require_path(SettingKey::ReactPath)?;
        let remote = settings.require(SettingKey::RemoteReactPath)?;
        let local: PathBuf = project.join(settings.react_build_dir());
        Ok(SyncUnit::new("react_build", local, remote, SCRIPT_NAME))
    }

    async fn build(&self, ctx: &TaskContext) -> Result<()> {
        let project = ctx.settings().require_path(SettingKey::ReactPath)?;
        NpmTool::new(project)
            .script(&self.npm_script)
            .run(&ctx.tool_context())
            .await
    }

    async fn sync(&self, ctx: &TaskContext) -> Result<SyncReport> {
        let settings = ctx.settings();
        let connection = settings.connection()?;
        let unit = Self::unit(settings)?;

        if !ctx.is_dry_run() && !unit.local().is_dir() {
            warn!(
                path = %unit.local().display(),
                "Build output not found, the transfer will likely fail"
            );
        }

        let tool_ctx = ctx.tool_context();
        Ok(dispatch(&tool_ctx, &connection, vec![unit], &self.name).await)
    }
}

impl Taskable for FrontendTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn enabled(&self, ctx: &TaskContext) -> bool {
        ctx.settings().deploy_react()
    }

    fn build<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.build(ctx))
    }

    fn sync<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<SyncReport>> {
        Box::pin(self.sync(ctx))
    }
}
