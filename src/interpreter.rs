//! Interpreter resolution for the supported script types.

use crate::config::ExecutorConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Python executable used when the manifest does not set `python_path`.
pub const DEFAULT_PYTHON: &str = "python3";

/// PowerShell executable used when the manifest does not set `powershell_path`.
pub const DEFAULT_POWERSHELL: &str = "pwsh";

/// Interpreter locations inside a virtual environment, in probe order.
const VENV_PYTHON_CANDIDATES: [&[&str]; 2] = [&["Scripts", "python.exe"], &["bin", "python"]];

/// Supported script types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptKind {
    Python,
    PowerShell,
}

impl ScriptKind {
    /// Parse a manifest `type` value, ignoring case.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("python") {
            Some(Self::Python)
        } else if raw.eq_ignore_ascii_case("powershell") {
            Some(Self::PowerShell)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::PowerShell => "powershell",
        }
    }
}

/// Interpreter for a script of the given kind.
///
/// Bare names are left unqualified; the OS search path resolves them when the
/// child is spawned.
#[must_use]
pub fn resolve(config: &ExecutorConfig, kind: ScriptKind) -> PathBuf {
    match kind {
        ScriptKind::Python => resolve_python(config),
        ScriptKind::PowerShell => config.powershell_path.clone(),
    }
}

/// Python from the configured virtual environment, falling back to `python_path`.
#[must_use]
pub fn resolve_python(config: &ExecutorConfig) -> PathBuf {
    if let Some(python) = config.python_env.as_deref().and_then(venv_python) {
        debug!(python = %python.display(), "using virtual environment interpreter");
        return python;
    }
    config.python_path.clone()
}

/// Probe a virtual environment directory for its Python interpreter.
///
/// Returns `None` if the directory does not exist or holds neither the
/// Windows (`Scripts/python.exe`) nor the Unix (`bin/python`) layout. The
/// interpreter found is made absolute, since the child runs in the script's
/// working directory rather than the launcher's.
#[must_use]
pub fn venv_python(env: &Path) -> Option<PathBuf> {
    if !env.exists() {
        debug!(env = %env.display(), "virtual environment not found, skipping probe");
        return None;
    }

    let found = VENV_PYTHON_CANDIDATES
        .iter()
        .map(|parts| parts.iter().fold(env.to_path_buf(), |path, part| path.join(part)))
        .find(|candidate| candidate.exists())
        .map(|candidate| std::path::absolute(&candidate).unwrap_or(candidate));

    if found.is_none() {
        debug!(env = %env.display(), "no interpreter in virtual environment");
    }
    found
}

/// Where `program` would be found on this machine, if anywhere.
///
/// Paths containing a separator are checked directly; bare names are looked up
/// on `PATH`.
#[must_use]
pub fn locate(program: &Path) -> Option<PathBuf> {
    which::which(program).ok()
}
