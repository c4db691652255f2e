// sitedeploy: SFTP Deployment Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Concrete deployment targets.
//!
//! ```text
//! task::tasks
//! FrontendTask: npm run build --> <react_path>/build  --> 1 unit
//! BackendTask:  artisan optimize --> <laravel_path>/* --> N units
//! ```

pub mod backend;
pub mod frontend;
