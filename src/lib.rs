//! # scripts-executor
//!
//! Launch Python and PowerShell scripts declared in a JSON manifest, either one
//! by name or all of them in order, stopping at the first failure.

pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod interpreter;
pub mod process;

pub use error::{Error, Result};

/// Print an error message and exit with code 1.
pub fn fatal_error(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}
