//! Manifest loading.
//!
//! The manifest is a JSON document describing the interpreters to use and the
//! ordered list of scripts that can be run:
//!
//! ```json
//! {
//!   "python_env": ".venv",
//!   "scripts": [
//!     { "name": "build", "type": "python", "script_path": "build.py", "working_dir": "tools", "args": ["setup.py"] },
//!     { "name": "deploy", "type": "powershell", "script_path": "deploy.ps1" }
//!   ]
//! }
//! ```
//!
//! `script_path` is handed to the interpreter as written, and the interpreter
//! runs in `working_dir` (the script's parent directory by default), so a
//! relative `script_path` is read relative to that directory.

use crate::error::{Error, Result};
use crate::interpreter::{DEFAULT_POWERSHELL, DEFAULT_PYTHON};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One runnable script from the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScriptConfig {
    pub name: String,
    /// Raw `type` field. Only checked when the script is executed.
    #[serde(rename = "type")]
    pub script_type: String,
    pub script_path: PathBuf,
    /// Informational only; never installed.
    #[serde(default)]
    pub python_deps: Vec<String>,
    /// Informational only; never imported.
    #[serde(default)]
    pub ps_modules: Vec<String>,
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
    #[serde(default)]
    pub args: Vec<String>,
}

/// The loaded manifest with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorConfig {
    pub python_path: PathBuf,
    /// Virtual environment to probe for a Python interpreter.
    pub python_env: Option<PathBuf>,
    pub powershell_path: PathBuf,
    pub scripts: Vec<ScriptConfig>,
}

/// On-disk shape of the manifest. Empty strings count as unset.
#[derive(Deserialize)]
struct Manifest {
    #[serde(default)]
    python_path: Option<String>,
    #[serde(default)]
    python_env: Option<String>,
    #[serde(default)]
    powershell_path: Option<String>,
    scripts: Vec<ScriptConfig>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl From<Manifest> for ExecutorConfig {
    fn from(manifest: Manifest) -> Self {
        let scripts = manifest
            .scripts
            .into_iter()
            .map(|mut script| {
                if script
                    .working_dir
                    .as_ref()
                    .is_some_and(|dir| dir.as_os_str().is_empty())
                {
                    script.working_dir = None;
                }
                script
            })
            .collect();

        Self {
            python_path: PathBuf::from(
                non_empty(manifest.python_path).unwrap_or_else(|| DEFAULT_PYTHON.to_string()),
            ),
            python_env: non_empty(manifest.python_env).map(PathBuf::from),
            powershell_path: PathBuf::from(
                non_empty(manifest.powershell_path)
                    .unwrap_or_else(|| DEFAULT_POWERSHELL.to_string()),
            ),
            scripts,
        }
    }
}

impl ExecutorConfig {
    /// Parse a manifest from its JSON text and apply defaults.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if the document is malformed or lacks `scripts`.
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        let manifest: Manifest = serde_json::from_str(content)?;
        Ok(manifest.into())
    }

    /// First script whose name equals `name`.
    #[must_use]
    pub fn find_script(&self, name: &str) -> Option<&ScriptConfig> {
        self.scripts.iter().find(|script| script.name == name)
    }

    /// Check that every script name is unique.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateName`] for the first name seen twice.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for script in &self.scripts {
            if !seen.insert(script.name.as_str()) {
                return Err(Error::DuplicateName {
                    name: script.name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Read and parse the manifest at `path`.
///
/// Script entries are not validated here; unknown types and missing script
/// files only surface when a script is executed.
///
/// # Errors
///
/// [`Error::Read`] if the file cannot be read, [`Error::Parse`] if it is malformed.
pub fn load(path: &Path) -> Result<ExecutorConfig> {
    let content = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let config = ExecutorConfig::from_json(&content).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        path = %path.display(),
        scripts = config.scripts.len(),
        "loaded config"
    );
    Ok(config)
}
