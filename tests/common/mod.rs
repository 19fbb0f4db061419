//! Common test helpers shared across integration tests

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(dead_code)] // Not all helpers are used by every test file

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Path of the compiled binary under test
pub fn get_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_scripts-executor"))
}

/// Helper to create a temporary directory for tests
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Write a manifest into `dir` and return its path
pub fn write_manifest(dir: &Path, manifest: &serde_json::Value) -> PathBuf {
    let path = dir.join("scripts.json");
    fs::write(&path, serde_json::to_string_pretty(manifest).unwrap()).unwrap();
    path
}

/// Write a script file into `dir` and return its path
pub fn write_script(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Make a file executable
#[cfg(unix)]
pub fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).unwrap();
}

/// Run the binary with `args` from `cwd`
pub fn run_executor(cwd: &Path, args: &[&str]) -> Output {
    Command::new(get_binary_path())
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("Failed to execute command")
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Package version for testing --version flag
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");
