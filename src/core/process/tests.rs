// sitedeploy: SFTP Deployment Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::builder::ProcessBuilder;
use crate::error::ProcessError;

#[test]
fn test_command_line_quotes_spaces() {
    let builder = ProcessBuilder::new("WinSCP.com")
        .arg("/script=C:/deploy scripts/a.txt")
        .arg("/log=a.log");
    insta::assert_snapshot!(builder.command_line(), @r#"WinSCP.com "/script=C:/deploy scripts/a.txt" /log=a.log"#);
}

#[test]
fn test_display_name() {
    assert_eq!(
        ProcessBuilder::new("/usr/bin/php").display_name(),
        "php"
    );
    assert_eq!(
        ProcessBuilder::new("npm").name("npm build").display_name(),
        "npm build"
    );
}

#[test]
fn test_find_missing_executable() {
    assert!(ProcessBuilder::find("definitely-not-a-real-binary-7f3a").is_none());
}

#[test]
fn test_resolve_keeps_paths_with_a_directory() {
    let program = Path::new("/opt/node/bin/npm");
    assert_eq!(ProcessBuilder::resolve(program), program);
    let relative = Path::new("tools/WinSCP.com");
    assert_eq!(ProcessBuilder::resolve(relative), relative);
}

#[test]
fn test_resolve_unknown_bare_name_is_unchanged() {
    let program = Path::new("definitely-not-a-real-binary-7f3a");
    assert_eq!(ProcessBuilder::resolve(program), program);
}

#[cfg(unix)]
#[test]
fn test_resolve_bare_name_through_path() {
    let resolved = ProcessBuilder::resolve(Path::new("sh"));
    assert!(resolved.is_absolute(), "{}", resolved.display());
    assert_eq!(resolved.file_name().and_then(|n| n.to_str()), Some("sh"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_keeps_stderr() {
    let output = ProcessBuilder::new("/bin/sh")
        .args(["-c", "echo out; echo first >&2; echo second >&2"])
        .run()
        .await
        .expect("sh should succeed");

    assert!(output.success());
    insta::assert_snapshot!(output.stderr(), @r"
    first
    second
    ");
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_nonzero_exit_is_error() {
    let err = ProcessBuilder::new("/bin/sh")
        .args(["-c", "exit 3"])
        .name("failing")
        .run()
        .await
        .unwrap_err();

    match err.downcast_ref::<ProcessError>() {
        Some(ProcessError::NonZeroExit { command, code }) => {
            assert_eq!(command, "failing");
            assert_eq!(*code, 3);
        }
        other => panic!("expected NonZeroExit, got {other:?}"),
    }
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_cwd() {
    let dir = tempfile::tempdir().unwrap();
    let missing = ProcessBuilder::new("/bin/sh")
        .args(["-c", "test -f marker.txt"])
        .cwd(dir.path())
        .run()
        .await;
    assert!(missing.is_err());

    std::fs::write(dir.path().join("marker.txt"), "x").unwrap();
    let output = ProcessBuilder::new("/bin/sh")
        .args(["-c", "test -f marker.txt"])
        .cwd(dir.path())
        .run()
        .await
        .unwrap();
    assert_eq!(output.exit_code(), 0);
}

#[tokio::test]
async fn test_spawn_failure() {
    let err = ProcessBuilder::new("definitely-not-a-real-binary-7f3a")
        .run()
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ProcessError>(),
        Some(ProcessError::SpawnFailed { .. })
    ));
}

#[tokio::test]
async fn test_cancelled_before_spawn() {
    let token = CancellationToken::new();
    token.cancel();
    let output = ProcessBuilder::new("definitely-not-a-real-binary-7f3a")
        .run_with_cancellation(token)
        .await
        .unwrap();
    assert!(output.is_interrupted());
}

#[cfg(unix)]
#[tokio::test]
async fn test_cancel_kills_running_process() {
    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        canceller.cancel();
    });

    let output = tokio::time::timeout(
        Duration::from_secs(10),
        ProcessBuilder::new("sleep")
            .arg("30")
            .run_with_cancellation(token),
    )
    .await
    .expect("cancellation should end the process")
    .unwrap();

    assert!(output.is_interrupted());
}
