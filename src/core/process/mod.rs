// sitedeploy: SFTP Deployment Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning.
//!
//! ```text
//! ProcessBuilder::new("WinSCP.com")
//!   .args() .cwd() .name()
//!   .run() / .run_with_cancellation()
//!       --> tokio::process::Command
//!           stream stdout/stderr to the log
//!       --> ProcessOutput { exit_code, stderr, interrupted }
//! ```

pub mod builder;
mod io;
mod runner;
#[cfg(test)]
mod tests;
