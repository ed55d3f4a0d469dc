//! Launch commands handed to the applet and the CLI tool.
//!
//! The applet runs the `cmd` string of a model record verbatim through
//! `bash -c`, so the template below is a compatibility contract with
//! `/usr/bin/openclaw` and must not change.

use std::process::{Command, Stdio};
use thiserror::Error;

pub const OPENCLAW_BIN: &str = "/usr/bin/openclaw";
const SESSION_TARGET: &str = "agent:main:main";

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the command that switches the running session to `model_id`.
pub fn launch_command(model_id: &str) -> String {
    format!(
        "{bin} sessions patch {target} --model {model_id} && {bin} sessions clear",
        bin = OPENCLAW_BIN,
        target = SESSION_TARGET,
        model_id = model_id,
    )
}

/// Result of running a launch command.
#[derive(Debug, Clone)]
pub struct LaunchResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub success: bool,
}

/// Runs shell command lines the way the applet does (`bash -c '<cmd>'`).
pub struct LaunchRunner {
    shell: String,
}

impl LaunchRunner {
    pub fn new() -> Self {
        Self {
            shell: "bash".to_string(),
        }
    }

    /// Use a different shell binary.
    pub fn shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    /// Run a command line and capture its output.
    pub fn run(&self, command_line: &str) -> Result<LaunchResult, LaunchError> {
        tracing::debug!(shell = %self.shell, command = %command_line, "Running launch command");

        let output = Command::new(&self.shell)
            .arg("-c")
            .arg(command_line)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        Ok(LaunchResult {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
            success: output.status.success(),
        })
    }
}

impl Default for LaunchRunner {
    fn default() -> Self {
        Self::new()
    }
}
