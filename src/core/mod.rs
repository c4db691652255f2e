// sitedeploy: SFTP Deployment Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core process plumbing shared by every external tool.
//!
//! ```text
//!      core
//!       |
//!    process
//!       |
//!  ProcessBuilder --> tokio::process --> ProcessOutput
//! ```

pub mod process;
