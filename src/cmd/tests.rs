// sitedeploy: SFTP Deployment Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fs;

use tempfile::TempDir;

use super::deploy::{prepare_settings, summary_lines};
use crate::config::Settings;
use crate::config::prompt::scripted::ScriptedPrompter;
use crate::sync::SyncReport;
use crate::task::TargetReport;
use crate::task::manager::DeployReport;

#[test]
fn test_prepare_settings_complete_file_is_untouched() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deployment_config.json");
    let original = r#"{"deploy_react": false, "deploy_laravel": false}"#;
    fs::write(&path, original).unwrap();

    let mut prompter = ScriptedPrompter::new(Vec::<String>::new());
    let settings = prepare_settings(&path, &mut prompter).unwrap();

    assert!(!settings.deploy_react());
    assert!(prompter.asked.is_empty());
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn test_prepare_settings_saves_answers() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deployment_config.json");

    let mut prompter = ScriptedPrompter::new(["no", "no"]);
    prepare_settings(&path, &mut prompter).unwrap();

    let saved = Settings::load(&path).unwrap();
    assert_eq!(saved.deploy_react, Some(false));
    assert_eq!(saved.deploy_laravel, Some(false));
}

#[test]
fn test_prepare_settings_prompt_failure() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deployment_config.json");

    let mut prompter = ScriptedPrompter::new(["yes"]);
    let err = prepare_settings(&path, &mut prompter).unwrap_err();
    assert!(err.to_string().contains("failed to complete settings"));
    assert!(!path.exists());
}

#[test]
fn test_summary_lines() {
    let mut sync = SyncReport::default();
    sync.record_success("app");
    sync.record_failure("vendor", "transfer 'vendor' failed: exit code 1");
    let mut report = DeployReport::default();
    report.record_skipped("React");
    report.record_target(TargetReport::new("Laravel").with_sync(sync));

    insta::assert_snapshot!(summary_lines(&report, Some("https://example.com")).join("\n"), @r"
    React: disabled
    Laravel: FAILED (1/2 units transferred)
      vendor: transfer 'vendor' failed: exit code 1
    ");
}

#[test]
fn test_summary_lines_success_shows_url() {
    let mut sync = SyncReport::default();
    sync.record_success("react_build");
    let mut report = DeployReport::default();
    report.record_target(TargetReport::new("React").with_sync(sync));

    insta::assert_snapshot!(summary_lines(&report, Some("https://example.com")).join("\n"), @r"
    React: ok (1/1 units transferred)
    Deployed to https://example.com
    ");
}

#[test]
fn test_summary_lines_interrupted_run() {
    let mut sync = SyncReport::default();
    sync.record_success("react_build");
    let mut report = DeployReport::default();
    report.record_target(TargetReport::new("React").with_sync(sync));
    report.record_not_started("Laravel");

    insta::assert_snapshot!(summary_lines(&report, Some("https://example.com")).join("\n"), @r"
    React: ok (1/1 units transferred)
    Laravel: not started (interrupted)
    ");
}
