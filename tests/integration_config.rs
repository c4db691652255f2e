// sitedeploy: SFTP Deployment Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the settings file and the prompt pass.

use std::collections::VecDeque;
use std::fs;

use sitedeploy::config::prompt::{Prompter, fill_missing};
use sitedeploy::config::{SettingKey, Settings};
use sitedeploy::error::Result;
use tempfile::TempDir;

/// Answers from a fixed list; an empty answer takes the default.
struct Answers(VecDeque<&'static str>);

impl Answers {
    fn next(&mut self) -> Result<String> {
        self.0
            .pop_front()
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("out of answers"))
    }
}

impl Prompter for Answers {
    fn confirm(&mut self, _prompt: &str, _default: bool) -> Result<bool> {
        Ok(self.next()? == "yes")
    }

    fn input(&mut self, _prompt: &str, default: Option<&str>) -> Result<String> {
        let answer = self.next()?;
        Ok(match default {
            Some(default) if answer.is_empty() => default.to_string(),
            _ => answer,
        })
    }

    fn password(&mut self, _prompt: &str) -> Result<String> {
        self.next()
    }
}

// =============================================================================
// Settings file
// =============================================================================

#[test]
fn settings_file_written_by_older_version() {
    // Port stored as text, Windows paths, a key this tool doesn't know.
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deployment_config.json");
    fs::write(
        &path,
        r#"{
    "deploy_react": true,
    "deploy_laravel": false,
    "server_host": "example.com",
    "server_port": "22",
    "server_user": "deploy",
    "server_pass": "p@ss word",
    "base_url": "https://example.com",
    "winscp_path": "C:\\Program Files (x86)\\WinSCP\\WinSCP.com",
    "react_path": "C:\\work\\frontend",
    "remote_react_path": "/var/www/html",
    "npm_path": "npm",
    "last_deploy": "2024-05-01"
}"#,
    )
    .unwrap();

    let settings = Settings::load(&path).unwrap();
    assert!(settings.missing_keys().is_empty());
    assert_eq!(settings.server_port, Some(22));
    assert_eq!(
        settings.value(SettingKey::WinscpPath).as_deref(),
        Some(r"C:\Program Files (x86)\WinSCP\WinSCP.com")
    );

    settings.save(&path).unwrap();
    let saved = fs::read_to_string(&path).unwrap();
    assert!(saved.contains("\"last_deploy\": \"2024-05-01\""));
    assert!(saved.contains("\"server_port\": 22"));
}

#[test]
fn settings_malformed_file_is_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deployment_config.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(Settings::load(&path).is_err());
}

// =============================================================================
// Prompt pass
// =============================================================================

#[test]
fn prompt_pass_completes_frontend_settings() {
    let mut settings = Settings::default();
    let mut answers = Answers(VecDeque::from([
        "yes", // deploy_react
        "no",  // deploy_laravel
        "deploy.example.org",
        "2222",
        "web",
        "secret",
        "", // base_url
        "/usr/local/bin/winscp",
        "/home/web/frontend",
        "/var/www/html",
        "/usr/bin/npm",
    ]));

    let filled = fill_missing(&mut settings, &mut answers).unwrap();
    assert_eq!(filled, 11);
    assert!(settings.missing_keys().is_empty());
    assert_eq!(
        settings.value(SettingKey::BaseUrl).as_deref(),
        Some("https://deploy.example.org")
    );

    let connection = settings.connection().unwrap();
    assert_eq!(connection.port, 2222);
    assert_eq!(connection.user, "web");
}

#[test]
fn prompt_pass_nothing_enabled_asks_only_flags() {
    let mut settings = Settings::default();
    let mut answers = Answers(VecDeque::from(["no", "no"]));

    assert_eq!(fill_missing(&mut settings, &mut answers).unwrap(), 2);
    assert!(!settings.deploy_react());
    assert!(!settings.deploy_laravel());
    assert!(settings.required_keys().len() == 2);
}
