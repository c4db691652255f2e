// sitedeploy: SFTP Deployment Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Concurrent execution of transfer units.
//!
//! ```text
//! units --> write scripts --> JoinSet (one WinSCP per unit)
//!                                   |
//!                     join_next_with_id + id->unit map
//!                                   |
//!                      progress += 1, SyncReport
//! ```

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::OnceLock;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::task::{Id, JoinSet};
use tracing::{error, info, warn};

use super::script::WinScpScript;
use super::{SyncReport, SyncUnit};
use crate::config::Connection;
use crate::error::SyncError;
use crate::task::tools::winscp::WinScpTool;
use crate::task::tools::{Tool, ToolContext};

fn bar_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] {msg} [{wide_bar:.cyan/blue}] {pos}/{len} units",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-")
        })
        .clone()
}

fn progress_bar(len: usize, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(u64::try_from(len).unwrap_or(u64::MAX));
    pb.set_style(bar_style());
    pb.set_message(label.to_string());
    pb
}

/// A unit whose script is on disk and ready to run.
struct Prepared {
    name: String,
    script: PathBuf,
}

/// Writes every script before anything is started.
fn prepare(
    ctx: &ToolContext,
    connection: &Connection,
    units: &[SyncUnit],
    report: &mut SyncReport,
    pb: &ProgressBar,
) -> Vec<Prepared> {
    let dir = ctx.script_dir();
    if let Err(source) = std::fs::create_dir_all(dir) {
        for unit in units {
            let err = SyncError::ScriptWrite {
                script: dir.display().to_string(),
                source: std::io::Error::new(source.kind(), source.to_string()),
            };
            error!(unit = %unit.name(), error = %err, "Cannot create script directory");
            report.record_failure(unit.name(), err.to_string());
            pb.inc(1);
        }
        return Vec::new();
    }

    let mut prepared = Vec::with_capacity(units.len());
    for unit in units {
        let script = dir.join(unit.script_name());
        match WinScpScript::new(connection, unit).write_to(&script) {
            Ok(()) => prepared.push(Prepared {
                name: unit.name().to_string(),
                script,
            }),
            Err(source) => {
                let err = SyncError::ScriptWrite {
                    script: script.display().to_string(),
                    source,
                };
                error!(unit = %unit.name(), error = %err, "Failed to write transfer script");
                report.record_failure(unit.name(), err.to_string());
                pb.inc(1);
            }
        }
    }
    prepared
}

/// Synchronizes every unit at once and waits for all of them.
///
/// Each unit runs its own WinSCP process with its own script and log file.
/// A failing unit is recorded and logged; its siblings keep running. The
/// progress bar advances once per unit regardless of outcome.
///
/// In dry-run mode nothing is written or started and every unit counts as
/// synchronized. After cancellation nothing is written either and every
/// unit counts as failed; running transfers are killed and fail the same way.
pub async fn dispatch(
    ctx: &ToolContext,
    connection: &Connection,
    units: Vec<SyncUnit>,
    label: &str,
) -> SyncReport {
    let mut report = SyncReport::default();
    if units.is_empty() {
        info!(target_name = %label, "Nothing to synchronize");
        return report;
    }

    if ctx.is_dry_run() {
        for unit in &units {
            info!(
                target_name = %label,
                unit = %unit.name(),
                local = %unit.local().display(),
                remote = %unit.remote(),
                script = %unit.script_name(),
                "[dry-run] Would sync"
            );
            report.record_success(unit.name());
        }
        report.sort();
        return report;
    }

    if ctx.is_cancelled() {
        warn!(target_name = %label, units = units.len(), "Interrupted, no transfer started");
        for unit in &units {
            report.record_failure(unit.name(), "interrupted before start");
        }
        report.sort();
        return report;
    }

    let pb = progress_bar(units.len(), label);
    let prepared = prepare(ctx, connection, &units, &mut report, &pb);

    let mut set = JoinSet::new();
    let mut names: HashMap<Id, String> = HashMap::with_capacity(prepared.len());
    for Prepared { name, script } in prepared {
        info!(target_name = %label, unit = %name, script = %script.display(), "Starting transfer");
        let ctx = ctx.clone();
        let unit = name.clone();
        let handle = set.spawn(async move {
            let tool = WinScpTool::new().script(&script);
            let result = tool.run(&ctx).await;
            (unit, result)
        });
        names.insert(handle.id(), name);
    }

    while let Some(joined) = set.join_next_with_id().await {
        match joined {
            Ok((_, (unit, Ok(())))) => {
                info!(target_name = %label, unit = %unit, "Transfer finished");
                report.record_success(unit);
            }
            Ok((_, (unit, Err(e)))) => {
                let err = SyncError::Transfer {
                    unit: unit.clone(),
                    message: format!("{e:#}"),
                };
                error!(target_name = %label, unit = %unit, error = %err, "Transfer failed");
                report.record_failure(unit, err.to_string());
            }
            Err(join_err) => {
                let unit = names
                    .get(&join_err.id())
                    .cloned()
                    .unwrap_or_else(|| "<unknown>".to_string());
                let err = SyncError::Join {
                    unit: unit.clone(),
                    message: join_err.to_string(),
                };
                error!(target_name = %label, unit = %unit, error = %err, "Transfer task aborted");
                report.record_failure(unit, err.to_string());
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message(format!("{label} done"));
    report.sort();

    if report.is_success() {
        info!(target_name = %label, units = report.total(), "All transfers finished");
    } else {
        warn!(
            target_name = %label,
            failed = report.failed().len(),
            units = report.total(),
            "Some transfers failed"
        );
    }
    report
}
