// sitedeploy: SFTP Deployment Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::ToolContext;
use crate::config::Settings;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[test]
fn test_tool_context_creation() {
    let ctx = ToolContext::new(
        Arc::new(Settings::default()),
        CancellationToken::new(),
        false,
        "scripts",
    );

    assert!(!ctx.is_cancelled());
    assert!(!ctx.is_dry_run());
    assert_eq!(ctx.script_dir(), Path::new("scripts"));
}

#[test]
fn test_tool_context_cancellation() {
    let token = CancellationToken::new();
    let ctx = ToolContext::new(Arc::new(Settings::default()), token.clone(), false, ".");

    assert!(!ctx.is_cancelled());
    token.cancel();
    assert!(ctx.is_cancelled());
    assert!(ctx.clone().is_cancelled());
}

#[test]
fn test_tool_context_dry_run() {
    let ctx = ToolContext::new(
        Arc::new(Settings::default()),
        CancellationToken::new(),
        true,
        ".",
    );
    assert!(ctx.is_dry_run());
}
