// sitedeploy: SFTP Deployment Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for sitedeploy using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! sitedeploy [global options] [command]
//! deploy     (default) prompt for missing settings, build, upload
//! config     print the current settings
//! version
//! ```

pub mod global;


use crate::cli::global::GlobalOptions;
use clap::{Parser, Subcommand};

/// React + Laravel SFTP deployment tool.
#[derive(Debug, Parser)]
#[command(
    name = "sitedeploy",
    author,
    version,
    about = "Builds a React frontend and a Laravel backend and uploads both over SFTP",
    long_about = "sitedeploy Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Builds the React app with npm, optimizes the Laravel app with\n\
                  artisan and synchronizes both to the server through WinSCP.\n\
                  The Laravel project is uploaded one top-level directory per\n\
                  WinSCP process, all at once.",
    after_help = "SETTINGS FILE:\n\n\
                  Settings are read from deployment_config.json in the current\n\
                  directory (see --config). Missing values are asked for\n\
                  interactively and written back to the file."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute; defaults to `deploy`
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Builds and uploads the enabled targets.
    Deploy,

    /// Prints the current settings, password hidden.
    Config,
}

impl Cli {
    /// The command to run, `deploy` when none was given.
    #[must_use]
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Deploy)
    }
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
