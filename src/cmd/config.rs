// sitedeploy: SFTP Deployment Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config-related commands for sitedeploy.

use std::path::Path;

use crate::config::Settings;
use crate::error::Result;

/// Display the current settings, secrets hidden.
///
/// # Errors
///
/// Returns an error if the settings file exists but cannot be read or parsed.
pub fn run_config_command(path: &Path) -> Result<()> {
    let settings = Settings::load(path)?;
    println!("# {}", path.display());
    for line in settings.display_lines() {
        println!("{line}");
    }
    Ok(())
}
