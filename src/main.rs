//! ccbuild - build driver for Conan + CMake C++ projects
//!
//! ## Architecture
//!
//! ```text
//! cli.rs → build/pipeline.rs → exec/subprocess.rs → conan / cmake
//! ```

mod build;
mod cli;
mod config;
mod error;
mod exec;
mod utils;

use std::process::ExitCode;

use clap::Parser;

use cli::Cli;
use error::BuildError;
use utils::terminal::print_error;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err),
    }
}

/// Print `err` and pick the process exit code
fn report(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<BuildError>() {
        Some(build_err) => {
            // Context attached on top of the typed error
            for cause in err.chain().take_while(|c| !c.is::<BuildError>()) {
                print_error(&cause.to_string());
            }
            build_err.display_with_hints();
            ExitCode::from(build_err.exit_code())
        }
        None => {
            print_error(&format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
