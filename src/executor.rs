//! Command assembly and script dispatch.

use crate::config::{ExecutorConfig, ScriptConfig};
use crate::error::{Error, ExecutionFailure, Result};
use crate::interpreter::{self, ScriptKind};
use crate::process::{CommandSpec, Launcher};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::{debug, info, trace};

/// Directory the script runs in: `working_dir` if set, else the script's parent.
#[must_use]
pub fn working_dir(script: &ScriptConfig) -> PathBuf {
    if let Some(dir) = &script.working_dir {
        return dir.clone();
    }
    match script.script_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Build the invocation for `script`, appending `extra_args` after its declared args.
///
/// # Errors
///
/// Returns [`Error::UnknownType`] if the script's type is not recognised.
pub fn build_command(
    config: &ExecutorConfig,
    script: &ScriptConfig,
    extra_args: &[String],
) -> Result<CommandSpec> {
    let kind = ScriptKind::parse(&script.script_type).ok_or_else(|| Error::UnknownType {
        script: script.name.clone(),
        kind: script.script_type.clone(),
    })?;
    trace!(script = %script.name, kind = kind.as_str(), "resolved script type");

    let mut args: Vec<OsString> = Vec::with_capacity(script.args.len() + extra_args.len() + 2);
    if kind == ScriptKind::PowerShell {
        args.push(OsString::from("-File"));
    }
    args.push(script.script_path.clone().into_os_string());
    args.extend(script.args.iter().map(OsString::from));
    args.extend(extra_args.iter().map(OsString::from));

    Ok(CommandSpec {
        program: interpreter::resolve(config, kind),
        args,
        working_dir: working_dir(script),
    })
}

/// Run a single script to completion.
///
/// # Errors
///
/// [`Error::UnknownType`] before anything is launched, or [`Error::Execution`]
/// if the child cannot be started or exits unsuccessfully.
pub fn execute(
    config: &ExecutorConfig,
    script: &ScriptConfig,
    extra_args: &[String],
    launcher: &mut impl Launcher,
) -> Result<()> {
    let command = build_command(config, script, extra_args)?;
    debug!(script = %script.name, command = %command, "executing");

    let status = launcher
        .launch(&command)
        .map_err(|source| Error::Execution {
            script: script.name.clone(),
            source,
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(Error::Execution {
            script: script.name.clone(),
            source: ExecutionFailure::Exit(status),
        })
    }
}

/// Run the first script called `name` with `args` appended.
///
/// # Errors
///
/// [`Error::NotFound`] if no script has that name, otherwise as [`execute`].
pub fn run_named(
    config: &ExecutorConfig,
    name: &str,
    args: &[String],
    launcher: &mut impl Launcher,
) -> Result<()> {
    let script = config.find_script(name).ok_or_else(|| Error::NotFound {
        name: name.to_string(),
    })?;
    execute(config, script, args, launcher)
}

/// Run every script in declared order, stopping at the first failure.
///
/// # Errors
///
/// The first error from [`execute`]; later scripts are not run.
pub fn run_all(config: &ExecutorConfig, launcher: &mut impl Launcher) -> Result<()> {
    for script in &config.scripts {
        println!("Running script: {}", script.name);
        execute(config, script, &[], launcher)?;
    }
    info!(count = config.scripts.len(), "all scripts completed");
    Ok(())
}

/// Human-readable listing of the configured scripts.
#[must_use]
pub fn describe_scripts(config: &ExecutorConfig) -> String {
    if config.scripts.is_empty() {
        return "No scripts defined in config.".to_string();
    }

    let mut lines = vec!["Available scripts:".to_string()];
    for script in &config.scripts {
        lines.push(format!(
            "  {} ({}) {}",
            script.name,
            script.script_type,
            script.script_path.display()
        ));
        if !script.python_deps.is_empty() {
            lines.push(format!("      python deps: {}", script.python_deps.join(", ")));
        }
        if !script.ps_modules.is_empty() {
            lines.push(format!("      ps modules: {}", script.ps_modules.join(", ")));
        }
    }
    lines.join("\n")
}
