//! Child process handling.
//!
//! Launching is behind the [`Launcher`] trait so that dispatch can be driven
//! without spawning anything (`--dry-run`, tests).

use crate::error::ExecutionFailure;
use crate::interpreter;
use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use tracing::{info, warn};

/// A fully assembled invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub working_dir: PathBuf,
}

fn quote(value: &str) -> String {
    if value.is_empty() || value.chars().any(|c| c.is_whitespace() || c == '\'' || c == '"') {
        format!("'{}'", value.replace('\'', r"'\''"))
    } else {
        value.to_string()
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.program.to_string_lossy()))?;
        for arg in &self.args {
            write!(f, " {}", quote(&arg.to_string_lossy()))?;
        }
        Ok(())
    }
}

/// How a child finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildStatus {
    /// Exit code, `None` if the child was terminated by a signal.
    pub code: Option<i32>,
}

impl ChildStatus {
    pub const SUCCESS: Self = Self { code: Some(0) };

    #[must_use]
    pub fn success(self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for ChildStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

impl fmt::Display for ChildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exited with status {code}"),
            None => write!(f, "terminated by signal"),
        }
    }
}

/// A running child whose standard streams are the parent's own.
pub struct ChildProcess {
    inner: Child,
}

impl ChildProcess {
    /// Spawn `command` in its working directory with inherited stdio.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the program cannot be started.
    pub fn spawn(command: &CommandSpec) -> io::Result<Self> {
        let inner = Command::new(&command.program)
            .args(&command.args)
            .current_dir(&command.working_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()?;
        Ok(Self { inner })
    }

    #[must_use]
    pub fn id(&self) -> u32 {
        self.inner.id()
    }

    /// Block until the child exits.
    ///
    /// # Errors
    ///
    /// Returns the OS error if waiting fails.
    pub fn wait(mut self) -> io::Result<ChildStatus> {
        self.inner.wait().map(ChildStatus::from)
    }
}

/// Runs a command to completion.
pub trait Launcher {
    /// Launch `command` and wait for it.
    ///
    /// # Errors
    ///
    /// [`ExecutionFailure::Launch`] if the child cannot be started,
    /// [`ExecutionFailure::Wait`] if it started but could not be waited on. A
    /// child that runs and exits non-zero is reported through the returned status.
    fn launch(&mut self, command: &CommandSpec) -> Result<ChildStatus, ExecutionFailure>;
}

/// Spawns real processes.
#[derive(Debug, Default)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn launch(&mut self, command: &CommandSpec) -> Result<ChildStatus, ExecutionFailure> {
        let child = ChildProcess::spawn(command).map_err(|source| ExecutionFailure::Launch {
            program: command.program.clone(),
            source,
        })?;
        info!(
            pid = child.id(),
            command = %command,
            cwd = %command.working_dir.display(),
            "launched"
        );
        let status = child.wait().map_err(|source| ExecutionFailure::Wait {
            program: command.program.clone(),
            source,
        })?;
        info!(%status, "child finished");
        Ok(status)
    }
}

/// Prints commands instead of running them.
#[derive(Debug, Default)]
pub struct DryRunLauncher;

impl Launcher for DryRunLauncher {
    fn launch(&mut self, command: &CommandSpec) -> Result<ChildStatus, ExecutionFailure> {
        if interpreter::locate(&command.program).is_none() {
            warn!(
                program = %command.program.display(),
                "interpreter not found on this machine"
            );
        }
        println!("  {command}");
        println!("    in {}", command.working_dir.display());
        Ok(ChildStatus::SUCCESS)
    }
}
