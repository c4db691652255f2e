// sitedeploy: SFTP Deployment Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |              deploy / config
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |  JSON settings + prompts  |
//!              '-------------+-------------'
//!                            |
//!                            v
//!                          task
//!                        manager
//!                           |
//!                +----------+----------+
//!                v                     v
//!             tasks                  sync
//!        React / Laravel     partition, script,
//!             |                 dispatch
//!             v                     |
//!           tools <-----------------+
//!      npm / artisan / WinSCP
//!
//!   +-----------------------------------------+
//!   |  core      process spawning             |
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod sync;
pub mod task;
