//! Dispatches a parsed [`Arguments`] to the matching command handler.

use anyhow::Result;

use super::args::{Arguments, Command};
use super::commands::{init, pseudo_translate, scan};
use super::ExitStatus;

pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Scan(args)) => scan::run(args),
        Some(Command::PseudoTranslate(args)) => pseudo_translate::run(args),
        Some(Command::Init) => init::run(),
        None => anyhow::bail!("no command provided; use --help to see available commands"),
    }
}
