// sitedeploy: SFTP Deployment Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Output streaming for running processes.
//!
//! ```text
//! run_child_with_cancellation()
//!   stdout reader: lines -> debug log
//!   stderr reader: lines -> debug log + kept for ProcessOutput
//!   select! { wait, token.cancelled() -> kill }
//! ```

use bitflags::bitflags;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::builder::{ProcessBuilder, ProcessOutput};
use crate::error::Result;

bitflags! {
    /// What happens to each line of a child stream.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct StreamFlags: u8 {
        const FORWARD_TO_LOG = 0x01;
        const KEEP_IN_STRING = 0x02;
    }
}

const STDOUT_FLAGS: StreamFlags = StreamFlags::FORWARD_TO_LOG;
const STDERR_FLAGS: StreamFlags = StreamFlags::FORWARD_TO_LOG.union(StreamFlags::KEEP_IN_STRING);

fn spawn_reader<R>(
    stream: Option<R>,
    flags: StreamFlags,
    process_name: &str,
    stream_name: &'static str,
) -> Option<JoinHandle<String>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let name = process_name.to_string();
    stream.map(|stream| tokio::spawn(read_lines(stream, flags, name, stream_name)))
}

async fn read_lines<R>(
    stream: R,
    flags: StreamFlags,
    process_name: String,
    stream_name: &'static str,
) -> String
where
    R: AsyncRead + Unpin,
{
    let mut kept = String::new();
    let mut lines = BufReader::new(stream).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if flags.contains(StreamFlags::FORWARD_TO_LOG) {
                    debug!(process = %process_name, stream = stream_name, "{line}");
                }
                if flags.contains(StreamFlags::KEEP_IN_STRING) {
                    if !kept.is_empty() {
                        kept.push('\n');
                    }
                    kept.push_str(&line);
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!(process = %process_name, stream = stream_name, error = %e, "error reading stream");
                break;
            }
        }
    }
    kept
}

async fn join_reader(handle: Option<JoinHandle<String>>) -> String {
    match handle {
        Some(handle) => handle.await.unwrap_or_default(),
        None => String::new(),
    }
}

impl ProcessBuilder {
    pub(super) async fn run_child_with_cancellation(
        &self,
        name: &str,
        child: &mut Child,
        token: CancellationToken,
    ) -> Result<ProcessOutput> {
        let stdout = spawn_reader(child.stdout.take(), STDOUT_FLAGS, name, "stdout");
        let stderr = spawn_reader(child.stderr.take(), STDERR_FLAGS, name, "stderr");

        let (status, interrupted) = tokio::select! {
            status = child.wait() => (status?, false),
            () = token.cancelled() => {
                warn!(process = %name, "cancellation requested, killing process");
                child.kill().await.ok();
                (child.wait().await?, true)
            }
        };

        join_reader(stdout).await;
        Ok(ProcessOutput::new(
            status.code().unwrap_or(-1),
            join_reader(stderr).await,
            interrupted,
        ))
    }
}
