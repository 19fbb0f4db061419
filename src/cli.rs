//! CLI module containing the main entry point logic.

use crate::error::{Result, report};
use crate::process::{DryRunLauncher, Launcher, SystemLauncher};
use crate::{config, executor};
use clap::Parser as ClapParser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI arguments for the scripts executor.
#[derive(ClapParser, Debug)]
#[command(name = "scripts-executor")]
#[command(version = PKG_VERSION)]
#[command(about = "Run Python and PowerShell scripts declared in a JSON manifest", long_about = None)]
struct Cli {
    /// Path to the JSON manifest
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Script to run; runs every script in order when omitted
    #[arg(value_name = "SCRIPT")]
    script: Option<String>,

    /// Extra arguments appended after the script's own args
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,

    /// List the configured scripts and exit
    #[arg(short, long)]
    list: bool,

    /// Print the commands that would run without running them
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Accept manifests where several scripts share a name (first one wins)
    #[arg(long)]
    allow_duplicates: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Parse arguments, exiting with status 1 on usage errors.
fn parse_args() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are "errors" that go to stdout
            let code = i32::from(e.use_stderr());
            let _ = e.print();
            std::process::exit(code);
        }
    }
}

fn init_logging(level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn dispatch(cli: &Cli, config: &config::ExecutorConfig, launcher: &mut impl Launcher) -> Result<()> {
    match &cli.script {
        Some(name) => executor::run_named(config, name, &cli.args, launcher),
        None => executor::run_all(config, launcher),
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = config::load(&cli.config)?;

    if cli.list {
        println!("{}", executor::describe_scripts(&config));
        return Ok(());
    }

    if !cli.allow_duplicates {
        config.validate()?;
    }

    if cli.dry_run {
        dispatch(cli, &config, &mut DryRunLauncher)
    } else {
        dispatch(cli, &config, &mut SystemLauncher)
    }
}

/// Main CLI logic.
pub fn run_cli() {
    let cli = parse_args();
    init_logging(cli.log_level());

    if let Err(e) = run(&cli) {
        crate::fatal_error(&format!("Error: {}", report(&e)));
    }
}
