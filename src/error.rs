//! Error types for manifest loading and script execution.

use crate::process::ChildStatus;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can stop a run.
///
/// All variants are terminal for the current invocation: nothing is retried,
/// and in batch mode the first error aborts the remaining scripts.
#[derive(Debug, Error)]
pub enum Error {
    /// The manifest could not be read (missing, permission denied, ...).
    #[error("failed to read config '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The manifest is not a well-formed document.
    #[error("failed to parse config '{}'", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No script with the requested name exists in the manifest.
    #[error("script '{name}' not found")]
    NotFound { name: String },

    /// Two or more scripts share a name.
    #[error("duplicate script name '{name}' in config")]
    DuplicateName { name: String },

    /// The script's `type` is neither `python` nor `powershell`.
    #[error("unknown script type '{kind}' for script '{script}'")]
    UnknownType { script: String, kind: String },

    /// The child could not be launched or exited unsuccessfully.
    #[error("script '{script}' failed")]
    Execution {
        script: String,
        #[source]
        source: ExecutionFailure,
    },
}

/// Underlying cause of an [`Error::Execution`].
#[derive(Debug, Error)]
pub enum ExecutionFailure {
    #[error("failed to launch '{}'", program.display())]
    Launch {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The child started but could not be waited on.
    #[error("failed waiting for '{}' after it started", program.display())]
    Wait {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{0}")]
    Exit(ChildStatus),
}

/// Render an error together with its chain of sources, `outer: inner: ...`.
#[must_use]
pub fn report(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
