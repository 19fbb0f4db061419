//! # scripts-executor
//!
//! Run the scripts listed in a JSON manifest.
//!
//! ## Usage
//!
//! - Run every script in order: `scripts-executor config.json`
//! - Run one script: `scripts-executor config.json build`
//! - Pass extra arguments: `scripts-executor config.json build --release`
//! - Show what would run: `scripts-executor --dry-run config.json`

/// Entry point for the CLI tool.
fn main() {
    scripts_executor::cli::run_cli();
}
