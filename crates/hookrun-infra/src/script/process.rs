//! Child-process script executor.
//!
//! Implements [`ScriptExecutor`] by spawning the trigger's script directly
//! (no shell, no arguments) with the script's directory as working
//! directory. Stdout and stderr are forwarded line by line to the log as
//! they arrive; the run resolves when the process exits.

use std::process::Stdio;

use hookrun_core::task::executor::{ScriptExecutor, ScriptExit};
use hookrun_types::error::RunError;
use hookrun_types::trigger::Trigger;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tracing::Instrument;

use crate::script::executable::is_executable;

/// Runs trigger scripts as child processes.
#[derive(Debug, Clone, Default)]
pub struct ProcessScriptExecutor;

impl ProcessScriptExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl ScriptExecutor for ProcessScriptExecutor {
    async fn execute(&self, trigger: &Trigger) -> Result<ScriptExit, RunError> {
        // The file may have changed since the trigger file was loaded.
        if !is_executable(&trigger.script) {
            return Err(RunError::NotExecutable(trigger.script.clone()));
        }

        tracing::info!(script = %trigger.script.display(), "Starting {}", trigger.script.display());

        let mut child = Command::new(&trigger.script)
            .current_dir(trigger.working_dir())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| RunError::Spawn {
                script: trigger.script.clone(),
                source,
            })?;

        if let Some(stdout) = child.stdout.take() {
            tokio::spawn(forward_lines(stdout, "stdout").in_current_span());
        }
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(forward_lines(stderr, "stderr").in_current_span());
        }

        let status = child.wait().await.map_err(RunError::Wait)?;
        Ok(ScriptExit {
            code: status.code(),
        })
    }
}

/// Log each line read from `pipe` until EOF.
///
/// Invalid UTF-8 is replaced rather than ending the stream.
async fn forward_lines<R>(pipe: R, stream: &'static str)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(pipe);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                let line = line.trim_end_matches(['\n', '\r']);
                tracing::info!(stream, "{line}");
            }
            Err(e) => {
                tracing::warn!(stream, error = %e, "failed to read script output");
                break;
            }
        }
    }
}
