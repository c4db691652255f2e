// sitedeploy: SFTP Deployment Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Interactive completion of missing settings.
//!
//! ```text
//! fill_missing(settings, prompter)
//!   loop: next missing key (flags first)
//!           Flag   --> confirm()
//!           Secret --> password()
//!           other  --> input(default)
//!         settings.set(key, answer)   (invalid -> ask again)
//!   --> number of keys filled
//! ```

use dialoguer::{Confirm, Input, Password};
use tracing::warn;

use super::{Settings, SettingKey, ValueKind};
use crate::core::process::builder::ProcessBuilder;
use crate::error::Result;
use crate::task::tools::winscp::WinScpTool;

/// Source of answers for missing settings.
pub trait Prompter {
    /// Asks a yes/no question.
    ///
    /// # Errors
    ///
    /// Returns an error if no answer can be read.
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;

    /// Asks for a line of text; an empty answer takes `default` when given.
    ///
    /// # Errors
    ///
    /// Returns an error if no answer can be read.
    fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<String>;

    /// Asks for a secret without echoing it.
    ///
    /// # Errors
    ///
    /// Returns an error if no answer can be read.
    fn password(&mut self, prompt: &str) -> Result<String>;
}

/// Prompts on the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        Ok(Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    }

    fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<String> {
        let mut input = Input::<String>::new().with_prompt(prompt);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        Ok(input.interact_text()?)
    }

    fn password(&mut self, prompt: &str) -> Result<String> {
        Ok(Password::new().with_prompt(prompt).interact()?)
    }
}

/// Suggested answer for `key`, derived from other settings or the system.
#[must_use]
pub fn suggested_default(settings: &Settings, key: SettingKey) -> Option<String> {
    match key {
        SettingKey::ServerPort => Some("22".to_string()),
        SettingKey::BaseUrl => settings
            .value(SettingKey::ServerHost)
            .map(|host| format!("https://{host}")),
        SettingKey::NpmPath => ProcessBuilder::find("npm").map(|p| p.display().to_string()),
        SettingKey::PhpPath => ProcessBuilder::find("php").map(|p| p.display().to_string()),
        SettingKey::WinscpPath => WinScpTool::locate().map(|p| p.display().to_string()),
        _ => None,
    }
}

/// Asks for every missing required key and stores the answers.
///
/// Required keys are recomputed after each answer, so enabling a target
/// pulls in its keys during the same pass.
///
/// # Errors
///
/// Returns an error if the prompter fails.
pub fn fill_missing(settings: &mut Settings, prompter: &mut dyn Prompter) -> Result<usize> {
    let mut filled = 0;
    while let Some(key) = settings.missing_keys().first().copied() {
        ask(settings, key, prompter)?;
        filled += 1;
    }
    Ok(filled)
}

fn ask(settings: &mut Settings, key: SettingKey, prompter: &mut dyn Prompter) -> Result<()> {
    if key.kind() == ValueKind::Flag {
        let answer = prompter.confirm(key.prompt(), false)?;
        settings.set(key, if answer { "yes" } else { "no" })?;
        return Ok(());
    }

    let default = suggested_default(settings, key);
    loop {
        let answer = if key.kind() == ValueKind::Secret {
            prompter.password(key.prompt())?
        } else {
            prompter.input(key.prompt(), default.as_deref())?
        };

        match settings.set(key, &answer) {
            Ok(()) if settings.value(key).is_some() => return Ok(()),
            Ok(()) => warn!(key = %key, "a value is required"),
            Err(e) => warn!(key = %key, error = %e, "invalid answer"),
        }
    }
}

#[cfg(test)]
pub(crate) mod scripted {
    use std::collections::VecDeque;

    use super::Prompter;
    use crate::error::Result;

    /// Replays canned answers and records every prompt it was shown.
    #[derive(Debug, Default)]
    pub(crate) struct ScriptedPrompter {
        answers: VecDeque<String>,
        pub(crate) asked: Vec<String>,
    }

    impl ScriptedPrompter {
        pub(crate) fn new<I, S>(answers: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self {
                answers: answers.into_iter().map(Into::into).collect(),
                asked: Vec::new(),
            }
        }

        fn next(&mut self, prompt: &str) -> Result<String> {
            self.asked.push(prompt.to_string());
            self.answers
                .pop_front()
                .ok_or_else(|| anyhow::anyhow!("no scripted answer for '{prompt}'"))
        }
    }

    impl Prompter for ScriptedPrompter {
        fn confirm(&mut self, prompt: &str, _default: bool) -> Result<bool> {
            Ok(crate::config::parse_flag(&self.next(prompt)?))
        }

        fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<String> {
            let answer = self.next(prompt)?;
            Ok(match default {
                Some(default) if answer.is_empty() => default.to_string(),
                _ => answer,
            })
        }

        fn password(&mut self, prompt: &str) -> Result<String> {
            self.next(prompt)
        }
    }
}
