// sitedeploy: SFTP Deployment Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;

use super::WinScpTool;
use crate::config::{SettingKey, Settings};
use crate::task::tools::Tool;
use crate::task::tools::test_utils::{capture_logs, tool_context};

fn settings_with_winscp() -> Settings {
    let mut settings = Settings::default();
    settings
        .set(SettingKey::WinscpPath, "/opt/winscp/WinSCP.com")
        .unwrap();
    settings
}

#[test]
fn test_winscp_tool_name() {
    assert_eq!(WinScpTool::new().name(), "winscp");
}

#[test]
fn test_winscp_log_defaults_to_script_stem() {
    let ctx = tool_context(settings_with_winscp(), false, Path::new("."));
    let process = WinScpTool::new()
        .script("/tmp/scripts/laravel_sync_app.txt")
        .process(&ctx)
        .unwrap();
    insta::assert_snapshot!(
        process.command_line(),
        @"/opt/winscp/WinSCP.com /ini=nul /script=/tmp/scripts/laravel_sync_app.txt /log=/tmp/scripts/laravel_sync_app.log"
    );
    assert_eq!(process.display_name(), "laravel_sync_app");
}

fn settings_with_bare_winscp(name: &str) -> Settings {
    let mut settings = Settings::default();
    settings.set(SettingKey::WinscpPath, name).unwrap();
    settings
}

#[test]
fn test_winscp_requires_script() {
    let ctx = tool_context(settings_with_winscp(), false, Path::new("."));
    let err = WinScpTool::new().process(&ctx).unwrap_err();
    assert!(err.to_string().contains("script path is required"));
}

#[tokio::test]
async fn test_winscp_dry_run_only_logs() {
    let ctx = tool_context(settings_with_winscp(), true, Path::new("."));
    let tool = WinScpTool::new().script("react_sync_script.txt");

    let (result, logs) = capture_logs(tool.run(&ctx)).await;
    assert!(result.is_ok());
    assert!(logs.contains("[dry-run] Would run WinSCP script"), "{logs}");
}

#[cfg(unix)]
#[tokio::test]
async fn test_winscp_nonzero_exit_is_error() {
    let ctx = tool_context(settings_with_bare_winscp("false"), false, Path::new("."));
    let tool = WinScpTool::new().script("unit.txt");

    assert!(tool.run(&ctx).await.is_err());
}

#[cfg(unix)]
#[tokio::test]
async fn test_winscp_cancelled_before_start() {
    let ctx = tool_context(settings_with_bare_winscp("true"), false, Path::new("."));
    ctx.cancel_token().cancel();
    let tool = WinScpTool::new().script("unit.txt");

    let err = tool.run(&ctx).await.unwrap_err();
    assert!(err.to_string().contains("interrupted"), "{err}");
}
