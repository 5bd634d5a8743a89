// mrdev-rs: Development Source Checkout Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Executable invoker.
//!
//! ```text
//! GitRunner::execute(args, cwd)
//!        |
//!        v
//! ShellRunner --> <git> <args...>   (cwd, no stdin, prompts disabled)
//!        |
//!        v
//! ExecOutput { status, stdout, stderr }   (fully captured, no streaming)
//! ```
//!
//! `Command::output` drains both pipes concurrently, so a clone that writes
//! a lot to either stream cannot block on a full pipe.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, trace};

use crate::error::{DevResult, ProcessError};

/// Raw result of one external invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    /// Exit status; `-1` when the process was killed by a signal.
    pub status: i32,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ExecOutput {
    /// Successful invocation with the given stdout.
    #[must_use]
    pub fn ok(stdout: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 0,
            stdout: stdout.into(),
            stderr: Vec::new(),
        }
    }

    /// Failed invocation with the given exit status and stderr.
    #[must_use]
    pub fn failed(status: i32, stderr: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            stdout: Vec::new(),
            stderr: stderr.into(),
        }
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.status == 0
    }

    #[must_use]
    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    #[must_use]
    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// Runs the version-control executable.
///
/// Implementations never interpret the exit status; the driver does.
pub trait GitRunner {
    /// Path of the executable, prepended to every command line.
    fn program(&self) -> &Path;

    /// Run the executable with `args`, in `cwd` when given.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` only when the process cannot be started.
    fn execute(&self, args: &[String], cwd: Option<&Path>) -> DevResult<ExecOutput>;
}

/// Runs the real executable as a child process.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    program: PathBuf,
}

impl ShellRunner {
    /// Use `program` exactly as given.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Resolve `program` through `PATH`.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` if it cannot be found.
    pub fn locate(program: &Path) -> DevResult<Self> {
        let resolved = which::which(program).map_err(|_| ProcessError::ExecutableNotFound {
            name: program.display().to_string(),
        })?;
        trace!(program = %resolved.display(), "resolved executable");
        Ok(Self::new(resolved))
    }
}

impl GitRunner for ShellRunner {
    fn program(&self) -> &Path {
        &self.program
    }

    fn execute(&self, args: &[String], cwd: Option<&Path>) -> DevResult<ExecOutput> {
        let command_line = command_line(&self.program, args);
        if let Some(cwd) = cwd {
            trace!(cwd = %cwd.display(), "cd");
        }
        debug!(cmd = %command_line, "exec");

        let mut command = Command::new(&self.program);
        command
            .args(args)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null());
        if let Some(cwd) = cwd {
            command.current_dir(cwd);
        }

        let output = command.output().map_err(|source| ProcessError::SpawnFailed {
            command: command_line.clone(),
            source,
        })?;

        let status = output.status.code().unwrap_or(-1);
        trace!(cmd = %command_line, status, "completed");
        Ok(ExecOutput {
            status,
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

/// Full command line for logs and error messages.
#[must_use]
pub fn command_line(program: &Path, args: &[String]) -> String {
    let mut line = program.display().to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}
