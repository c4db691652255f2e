// sitedeploy: SFTP Deployment Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::tasks::backend::BackendTask;
use super::tasks::frontend::FrontendTask;
use super::{TargetReport, Task, TaskContext, Taskable};
use crate::config::{SettingKey, Settings};
use crate::task::tools::test_utils::{capture_logs, connected_settings};
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

fn test_settings() -> Arc<Settings> {
    Arc::new(Settings::default())
}

#[test]
fn test_task_context_defaults() {
    let ctx = TaskContext::new(test_settings(), CancellationToken::new());

    assert!(!ctx.is_dry_run());
    assert!(!ctx.is_cancelled());
    assert_eq!(ctx.script_dir(), Path::new("."));
}

#[test]
fn test_task_context_builder() {
    let ctx = TaskContext::new(test_settings(), CancellationToken::new())
        .with_dry_run(true)
        .with_script_dir("deploy-scripts");

    let tool_ctx = ctx.tool_context();
    assert!(tool_ctx.is_dry_run());
    assert_eq!(tool_ctx.script_dir(), Path::new("deploy-scripts"));
}

#[test]
fn test_tool_context_shares_cancellation() {
    let token = CancellationToken::new();
    let ctx = TaskContext::new(test_settings(), token.clone());
    let tool_ctx = ctx.tool_context();

    token.cancel();
    assert!(ctx.is_cancelled());
    assert!(tool_ctx.is_cancelled());
}

#[test]
fn test_task_enum_delegates() {
    let frontend = Task::Frontend(FrontendTask::new());
    let backend = Task::Backend(BackendTask::new());
    assert_eq!(frontend.name(), "React");
    assert_eq!(backend.name(), "Laravel");

    let mut settings = Settings::default();
    settings.set(SettingKey::DeployLaravel, "true").unwrap();
    let ctx = TaskContext::new(Arc::new(settings), CancellationToken::new());
    assert!(!frontend.enabled(&ctx));
    assert!(backend.enabled(&ctx));
}

#[tokio::test]
async fn test_disabled_task_is_skipped() {
    let ctx = TaskContext::new(test_settings(), CancellationToken::new());
    let task = Task::Frontend(FrontendTask::new());

    let (result, logs) = capture_logs(task.run(&ctx)).await;
    assert!(result.unwrap().is_none());
    assert!(logs.contains("React deployment is disabled"), "{logs}");
}

#[tokio::test]
async fn test_failed_build_still_syncs() {
    // No react_path: build and sync both fail, and both are recorded.
    let mut settings = connected_settings();
    settings.set(SettingKey::DeployReact, "yes").unwrap();
    let ctx = TaskContext::new(Arc::new(settings), CancellationToken::new()).with_dry_run(true);

    let report = Task::Frontend(FrontendTask::new())
        .run(&ctx)
        .await
        .unwrap()
        .unwrap();
    assert!(report.build_error().is_some());
    assert!(report.sync_error().is_some());
    assert!(!report.is_success());
}

#[tokio::test]
async fn test_run_cancelled_before_start() {
    let mut settings = Settings::default();
    settings.set(SettingKey::DeployReact, "yes").unwrap();
    let token = CancellationToken::new();
    token.cancel();
    let ctx = TaskContext::new(Arc::new(settings), token);

    let err = Task::Frontend(FrontendTask::new())
        .run(&ctx)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("interrupted"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_cancel_during_build_skips_sync() {
    use std::os::unix::fs::PermissionsExt;
    use std::time::Duration;
    use tempfile::TempDir;

    let project = TempDir::new().unwrap();
    let bin = TempDir::new().unwrap();
    let scripts = TempDir::new().unwrap();
    let npm = bin.path().join("npm.sh");
    std::fs::write(&npm, "#!/bin/sh\nsleep 30\n").unwrap();
    std::fs::set_permissions(&npm, std::fs::Permissions::from_mode(0o755)).unwrap();

    let mut settings = connected_settings();
    for (key, value) in [
        (SettingKey::DeployReact, "yes".to_string()),
        (SettingKey::ReactPath, project.path().display().to_string()),
        (SettingKey::RemoteReactPath, "/var/www/html".to_string()),
        (SettingKey::NpmPath, npm.display().to_string()),
    ] {
        settings.set(key, &value).unwrap();
    }
    let token = CancellationToken::new();
    let ctx = TaskContext::new(Arc::new(settings), token.clone()).with_script_dir(scripts.path());

    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(300)).await;
        canceller.cancel();
    });

    let report = tokio::time::timeout(
        Duration::from_secs(10),
        Task::Frontend(FrontendTask::new()).run(&ctx),
    )
    .await
    .expect("cancellation should stop the build")
    .unwrap()
    .unwrap();

    assert!(report.is_interrupted());
    assert!(!report.is_success());
    assert_eq!(report.sync_error(), Some("interrupted before sync"));
    assert!(report.build_error().is_some_and(|e| e.contains("interrupted")));
    assert_eq!(std::fs::read_dir(scripts.path()).unwrap().count(), 0);
}

#[test]
fn test_target_report_success() {
    let mut report = TargetReport::new("Laravel");
    assert!(report.is_success());
    report.sync.record_failure("vendor", "exit code 1");
    assert!(!report.is_success());
}
