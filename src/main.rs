//! i18n-scan CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use i18n_scan::cli::{run_cli, Arguments, ExitStatus};

fn main() -> ExitCode {
    let args = Arguments::parse();

    match run_cli(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitStatus::Error.into()
        }
    }
}
