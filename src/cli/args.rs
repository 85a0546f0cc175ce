//! CLI argument definitions using clap.
//!
//! - `scan`: walk a source tree and report i18n issues
//! - `pseudo-translate`: rewrite a gettext catalog's translations for layout/encoding testing
//! - `init`: write a default `.i18nlintrc.json`

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

use crate::pseudo::Method;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Returns `Some(self)` if a subcommand was given, otherwise prints help and returns `None`.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan a source tree and report internationalization issues
    Scan(ScanArgs),
    /// Pseudo-translate a gettext catalog for layout/encoding testing
    PseudoTranslate(PseudoTranslateArgs),
    /// Write a default `.i18nlintrc.json` configuration file
    Init,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Root directory to scan
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Enable specific checks only (repeatable); defaults to every non-resource-file check.
    /// See the config file's `style` field for the accepted names.
    #[arg(long = "style")]
    pub style: Vec<String>,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    pub format: ReportFormat,

    /// Override the minimum word count for the "not available for localization" check
    #[arg(long)]
    pub min_words: Option<usize>,

    /// Override the minimum C++ standard version assumed for language features
    #[arg(long)]
    pub min_cpp_version: Option<u32>,

    /// Treat strings thrown as exceptions as translatable
    #[arg(long)]
    pub exceptions_translatable: bool,

    /// Treat strings passed to logging functions as translatable
    #[arg(long)]
    pub log_messages_translatable: bool,

    /// Collapse adjacent double-quoted string-literal pieces before classifying them
    #[arg(long)]
    pub collapse_double_quotes: bool,

    /// Print a summary of files scanned/skipped to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MethodArg {
    Accented,
    European,
    Cyrillic,
    Greek,
}

impl From<MethodArg> for Method {
    fn from(method: MethodArg) -> Self {
        match method {
            MethodArg::Accented => Method::Accented,
            MethodArg::European => Method::European,
            MethodArg::Cyrillic => Method::Cyrillic,
            MethodArg::Greek => Method::Greek,
        }
    }
}

#[derive(Debug, Args)]
pub struct PseudoTranslateArgs {
    /// PO/POT catalog files to pseudo-translate
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Character-substitution method
    #[arg(long, value_enum, default_value = "accented")]
    pub method: MethodArg,

    /// Wrap each translated value in brackets
    #[arg(long)]
    pub brackets: bool,

    /// Percentage to grow (positive) or shrink (negative) each value's length
    #[arg(long, default_value_t = 0)]
    pub width_change: i8,

    /// Prefix each translated value with a zero-padded tracking id
    #[arg(long)]
    pub tracking_ids: bool,
}
