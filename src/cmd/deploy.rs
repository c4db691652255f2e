// sitedeploy: SFTP Deployment Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Deploy command implementation for sitedeploy.
//!
//! ```text
//! load settings --> prompt for missing --> save (if anything changed)
//!      --> TaskManager (React, Laravel) --> summary
//! ```

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use crate::cli::global::GlobalOptions;
use crate::config::prompt::{Prompter, TerminalPrompter, fill_missing};
use crate::config::{SettingKey, Settings};
use crate::error::Result;
use crate::task::manager::{DeployReport, TaskManager};

/// Main handler for the deploy command.
///
/// Transfer failures are reported in the summary and do not make this fail.
///
/// # Errors
///
/// Returns an error if the settings cannot be loaded, completed or saved, or
/// after the summary if the run was interrupted with Ctrl+C.
pub async fn run_deploy_command(global: &GlobalOptions) -> Result<()> {
    let settings = prepare_settings(&global.config, &mut TerminalPrompter)?;
    let base_url = settings.value(SettingKey::BaseUrl);

    let manager = TaskManager::with_default_targets(Arc::new(settings))
        .with_dry_run(global.dry)
        .with_script_dir(global.script_dir());

    let cancel_token = manager.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Received Ctrl+C, interrupting transfers...");
            cancel_token.cancel();
        }
    });

    let report = manager.run_all().await?;
    for line in summary_lines(&report, base_url.as_deref()) {
        println!("{line}");
    }
    if report.is_interrupted() {
        anyhow::bail!("deployment interrupted");
    }
    Ok(())
}

/// Loads the settings file and asks for whatever is missing.
///
/// The file is rewritten only when at least one value was filled in.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or written, or if
/// prompting fails.
pub fn prepare_settings(path: &Path, prompter: &mut dyn Prompter) -> Result<Settings> {
    let mut settings = Settings::load(path)?;
    let filled = fill_missing(&mut settings, prompter).context("failed to complete settings")?;
    if filled > 0 {
        settings.save(path)?;
        info!(path = %path.display(), filled, "Configuration updated");
    }
    Ok(settings)
}

/// Human-readable outcome of a run.
#[must_use]
pub fn summary_lines(report: &DeployReport, base_url: Option<&str>) -> Vec<String> {
    let mut lines = Vec::new();
    for name in report.skipped() {
        lines.push(format!("{name}: disabled"));
    }
    for target in report.targets() {
        let sync = target.sync();
        let status = if target.is_interrupted() {
            "INTERRUPTED"
        } else if target.is_success() {
            "ok"
        } else {
            "FAILED"
        };
        lines.push(format!(
            "{}: {status} ({}/{} units transferred)",
            target.name(),
            sync.succeeded().len(),
            sync.total()
        ));
        if let Some(err) = target.build_error() {
            lines.push(format!("  build: {err}"));
        }
        if let Some(err) = target.sync_error() {
            lines.push(format!("  sync: {err}"));
        }
        for (unit, reason) in sync.failed() {
            lines.push(format!("  {unit}: {reason}"));
        }
    }
    for name in report.not_started() {
        lines.push(format!("{name}: not started (interrupted)"));
    }
    if let Some(url) = base_url.filter(|_| report.is_success() && !report.targets().is_empty()) {
        lines.push(format!("Deployed to {url}"));
    }
    lines
}
