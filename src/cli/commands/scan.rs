//! `scan` command: runs the batch driver (C11) over a directory and renders the result.

use anyhow::Result;

use crate::cli::args::{ReportFormat, ScanArgs};
use crate::cli::report;
use crate::cli::ExitStatus;
use crate::config::load_config;
use crate::core::ResultBuckets;
use crate::driver;

pub fn run(args: ScanArgs) -> Result<ExitStatus> {
    let start_dir = args.path.canonicalize().unwrap_or_else(|_| args.path.clone());
    let mut config = load_config(&start_dir)?.config;
    apply_overrides(&mut config, &args);
    config.validate()?;

    let session = driver::run(&args.path, &config);

    match args.format {
        ReportFormat::Text => report::print_text(&session.buckets),
        ReportFormat::Json => report::print_json(&session.buckets)?,
    }

    if args.verbose {
        eprintln!(
            "scanned {} file(s), {} skipped, in {:.2?}",
            session.stats.files_scanned, session.stats.files_skipped, session.stats.elapsed
        );
    }

    Ok(exit_status_for(&session.buckets))
}

fn apply_overrides(config: &mut crate::config::Config, args: &ScanArgs) {
    if !args.style.is_empty() {
        config.style = args.style.clone();
    }
    if let Some(min_words) = args.min_words {
        config.min_words_for_unavailable = min_words;
    }
    if let Some(min_cpp_version) = args.min_cpp_version {
        config.min_cpp_version = min_cpp_version;
    }
    if args.exceptions_translatable {
        config.exceptions_should_be_translatable = true;
    }
    if args.log_messages_translatable {
        config.log_messages_can_be_translatable = true;
    }
    if args.collapse_double_quotes {
        config.collapse_double_quotes = true;
    }
}

fn exit_status_for(buckets: &ResultBuckets) -> ExitStatus {
    if !buckets.error_log.is_empty() {
        return ExitStatus::Error;
    }

    let has_findings = !buckets.not_available_for_l10n.is_empty()
        || !buckets.unsafe_localizable.is_empty()
        || !buckets.marked_as_non_localizable.is_empty()
        || !buckets.deprecated_macros.is_empty()
        || !buckets.duplicate_ids.is_empty()
        || !buckets.ids_assigned_number.is_empty()
        || !buckets.malformed.is_empty();

    if has_findings {
        ExitStatus::Failure
    } else {
        ExitStatus::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn exit_status_is_success_when_nothing_found() {
        let buckets = ResultBuckets::new();
        assert_eq!(exit_status_for(&buckets), ExitStatus::Success);
    }

    #[test]
    fn exit_status_is_error_when_error_log_has_entries() {
        let mut buckets = ResultBuckets::new();
        buckets.error_log.push(crate::core::StringEntry::new(
            "read failed",
            crate::core::Usage::orphan(),
            "a.cpp".into(),
            crate::core::Position::new(1, 1),
        ));
        assert_eq!(exit_status_for(&buckets), ExitStatus::Error);
    }

    #[test]
    fn overrides_apply_cli_flags_over_config_defaults() {
        let mut config = Config::default();
        let args = ScanArgs {
            path: ".".into(),
            style: vec!["tabs".to_string()],
            format: ReportFormat::Text,
            min_words: Some(5),
            min_cpp_version: None,
            exceptions_translatable: true,
            log_messages_translatable: false,
            collapse_double_quotes: false,
            verbose: false,
        };
        apply_overrides(&mut config, &args);
        assert_eq!(config.style, vec!["tabs".to_string()]);
        assert_eq!(config.min_words_for_unavailable, 5);
        assert!(config.exceptions_should_be_translatable);
    }
}
