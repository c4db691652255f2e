// sitedeploy: SFTP Deployment Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;

use super::NpmTool;
use crate::config::{SettingKey, Settings};
use crate::task::tools::Tool;
use crate::task::tools::test_utils::{capture_logs, tool_context};

#[test]
fn test_npm_tool_name() {
    assert_eq!(NpmTool::new("/srv/web").name(), "npm");
}

#[test]
fn test_npm_process_uses_configured_binary() {
    let mut settings = Settings::default();
    settings.set(SettingKey::NpmPath, "/opt/node/bin/npm").unwrap();
    let ctx = tool_context(settings, false, Path::new("."));

    let process = NpmTool::new("/srv/web").process(&ctx).unwrap();
    insta::assert_snapshot!(process.command_line(), @"/opt/node/bin/npm run build");
    assert_eq!(process.working_dir(), Some(Path::new("/srv/web")));
}

#[test]
fn test_npm_custom_script() {
    let mut settings = Settings::default();
    settings.set(SettingKey::NpmPath, "/usr/local/bin/npm").unwrap();
    let ctx = tool_context(settings, false, Path::new("."));
    let process = NpmTool::new("/srv/web")
        .script("build:prod")
        .process(&ctx)
        .unwrap();
    insta::assert_snapshot!(process.command_line(), @"/usr/local/bin/npm run build:prod");
}

#[cfg(unix)]
#[test]
fn test_npm_bare_name_is_looked_up_on_path() {
    // Settings files commonly hold just "npm"; "sh" stands in for it here.
    let mut settings = Settings::default();
    settings.set(SettingKey::NpmPath, "sh").unwrap();
    let ctx = tool_context(settings, false, Path::new("."));

    let process = NpmTool::new("/srv/web").process(&ctx).unwrap();
    assert!(process.program().is_absolute(), "{}", process.program().display());
    assert_eq!(process.program().file_name().and_then(|n| n.to_str()), Some("sh"));
}

#[tokio::test]
async fn test_npm_dry_run_only_logs() {
    let mut settings = Settings::default();
    settings.set(SettingKey::NpmPath, "/nonexistent/npm").unwrap();
    let ctx = tool_context(settings, true, Path::new("."));
    let tool = NpmTool::new("/srv/web");

    let (result, logs) = capture_logs(tool.run(&ctx)).await;
    assert!(result.is_ok());
    assert!(logs.contains("[dry-run] Would run npm script"), "{logs}");
    assert!(logs.contains("script=build"), "{logs}");
}

#[tokio::test]
async fn test_npm_missing_binary_fails() {
    let mut settings = Settings::default();
    settings.set(SettingKey::NpmPath, "/nonexistent/bin/npm-7f3a").unwrap();
    let ctx = tool_context(settings, false, Path::new("."));
    let tool = NpmTool::new("/srv/web");

    assert!(tool.run(&ctx).await.is_err());
}
