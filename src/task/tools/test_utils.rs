// sitedeploy: SFTP Deployment Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Test helpers shared by tool, task and sync tests.

use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};

use tokio_util::sync::CancellationToken;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

use super::ToolContext;
use crate::config::{SettingKey, Settings};

#[derive(Clone)]
struct BufferWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer
            .lock()
            .map_err(|_| std::io::Error::other("buffer poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for BufferWriter {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Awaits `fut` with a thread-local subscriber and returns its output
/// together with everything logged at info level or above.
///
/// Only works on a current-thread runtime (the `#[tokio::test]` default).
pub(crate) async fn capture_logs<F, T>(fut: F) -> (T, String)
where
    F: std::future::Future<Output = T>,
{
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_writer(BufferWriter {
            buffer: Arc::clone(&buffer),
        })
        .with_max_level(Level::INFO)
        .with_ansi(false)
        .with_target(false)
        .with_level(false)
        .without_time()
        .finish();

    let _guard = tracing::subscriber::set_default(subscriber);
    let out = fut.await;

    let logs = buffer
        .lock()
        .map(|b| String::from_utf8_lossy(&b).into_owned())
        .unwrap_or_default();
    (out, logs)
}

/// Settings with every connection key filled.
pub(crate) fn connected_settings() -> Settings {
    let mut settings = Settings::default();
    for (key, value) in [
        (SettingKey::ServerHost, "example.com"),
        (SettingKey::ServerPort, "22"),
        (SettingKey::ServerUser, "deploy"),
        (SettingKey::ServerPass, "secret"),
    ] {
        settings.set(key, value).unwrap();
    }
    settings
}

pub(crate) fn tool_context(settings: Settings, dry_run: bool, script_dir: &Path) -> ToolContext {
    ToolContext::new(
        Arc::new(settings),
        CancellationToken::new(),
        dry_run,
        script_dir,
    )
}
