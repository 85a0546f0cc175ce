//! Scanner façade (C7): the single entry point the driver (C11) and the resource-file harvesters
//! (C9) use to run a file through the scanner/classifier and accumulate results.
//!
//! A [`Reviewer`] owns one file's worth of mutable state plus the buckets accumulated so far.
//! The concurrency model (see the crate's design notes) gives each parallel worker its own
//! `Reviewer`; the driver merges them in file-path order once every file has been processed, then
//! calls [`Reviewer::finalize`] exactly once on the merged result.

pub mod backscan;
pub mod classify;
pub mod model;
pub mod review;
pub mod rulesets;
pub mod scan;
pub mod style;
pub mod textutil;

use std::path::Path;

pub use classify::ClassifierConfig;
pub use model::{Position, ResultBuckets, StringEntry, Usage, UsageKind, VariableInfo};
pub use review::ScannedFile;
pub use style::{CheckFlag, ReviewStyle};

/// Accumulates scan results across one or more files, then runs the aggregate review pipeline.
///
/// `scan` drives a file through the full C5 state machine; `classify` is the lighter-weight path
/// used by the resource-file harvesters, which already know each string's usage without needing
/// the backscan resolver. Both end up filing into the same [`ResultBuckets`].
pub struct Reviewer {
    config: ClassifierConfig,
    max_line_width: usize,
    buckets: ResultBuckets,
    files: Vec<ScannedFile>,
    app_init_seen: bool,
    locale_init_seen: bool,
}

impl Reviewer {
    pub fn new(config: ClassifierConfig, max_line_width: usize) -> Self {
        Self {
            config,
            max_line_width,
            buckets: ResultBuckets::new(),
            files: Vec::new(),
            app_init_seen: false,
            locale_init_seen: false,
        }
    }

    pub fn style(&self) -> &ReviewStyle {
        &self.config.style
    }

    /// Runs the full C5 scanner over `text`, filing every literal it finds and remembering the
    /// erased working buffer for the C6 whole-buffer sweeps.
    pub fn scan(&mut self, text: &str, path: &Path) {
        let scanner = scan::Scanner::new(&self.config, self.max_line_width);
        let outcome = scanner.scan(text, path, &mut self.buckets);
        self.app_init_seen |= outcome.app_init_seen;
        self.locale_init_seen |= outcome.locale_init_seen;
        self.files.push(ScannedFile::new(path.to_path_buf(), outcome.erased_text));
    }

    /// Files a single already-extracted `(literal, usage)` pair straight through the C3
    /// classifier - the path the resource-file harvesters (RC/plist/PO) use, since they recover
    /// usage themselves rather than relying on the backscan resolver.
    pub fn classify(&mut self, text: &str, usage: Usage, path: &Path, position: Position) {
        let classifier = classify::Classifier::new(&self.config);
        classifier.classify(text, usage, path.to_path_buf(), position, &mut self.buckets);
    }

    /// Runs the C6 aggregate review pipeline once over everything scanned so far.
    pub fn finalize(&mut self) {
        review::finalize(
            &mut self.buckets,
            &self.files,
            &self.config.style,
            self.app_init_seen,
            self.locale_init_seen,
        );
    }

    pub fn buckets(&self) -> &ResultBuckets {
        &self.buckets
    }

    pub fn into_buckets(self) -> ResultBuckets {
        self.buckets
    }

    /// Absorbs another `Reviewer`'s results - used by the driver to fold each worker's
    /// per-file reviewer into the session-wide one before calling `finalize`.
    pub fn merge(&mut self, other: Reviewer) {
        self.buckets.merge(other.buckets);
        self.files.extend(other.files);
        self.app_init_seen |= other.app_init_seen;
        self.locale_init_seen |= other.locale_init_seen;
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
        self.files.clear();
        self.app_init_seen = false;
        self.locale_init_seen = false;
    }

    /// Records a failure that kept a file from being scanned at all (unreadable, undecodable,
    /// ...) to the error-log bucket. Mirrors the core's no-panic contract: the driver never lets
    /// a single bad file abort the walk, it files the failure as data instead.
    pub fn record_error(&mut self, path: &Path, message: impl Into<String>) {
        self.buckets
            .error_log
            .push(StringEntry::new(message.into(), Usage::orphan(), path.to_path_buf(), Position::new(1, 1)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_then_finalize_files_a_localizable_string() {
        let config = ClassifierConfig::default();
        let mut reviewer = Reviewer::new(config, 120);
        reviewer.scan(r#"_("Open File");"#, Path::new("main.cpp"));
        reviewer.finalize();
        assert_eq!(reviewer.buckets().localizable.len(), 1);
        assert_eq!(reviewer.buckets().localizable[0].text, "Open File");
    }

    #[test]
    fn classify_files_a_harvested_string_without_scanning() {
        let config = ClassifierConfig::default();
        let mut reviewer = Reviewer::new(config, 120);
        reviewer.classify("Open File", Usage::orphan(), Path::new("strings.po"), Position::new(3, 1));
        reviewer.finalize();
        assert_eq!(reviewer.buckets().localizable.len(), 1);
    }

    #[test]
    fn merge_combines_two_reviewers_buckets() {
        let config = ClassifierConfig::default();
        let mut a = Reviewer::new(config.clone(), 120);
        a.scan(r#"_("Open File");"#, Path::new("a.cpp"));
        let mut b = Reviewer::new(config, 120);
        b.scan(r#"_("Save As");"#, Path::new("b.cpp"));
        a.merge(b);
        a.finalize();
        assert_eq!(a.buckets().localizable.len(), 2);
    }

    #[test]
    fn clear_resets_every_bucket_and_flag() {
        let config = ClassifierConfig::default();
        let mut reviewer = Reviewer::new(config, 120);
        reviewer.scan(r#"_("Open File");"#, Path::new("a.cpp"));
        reviewer.clear();
        assert!(reviewer.buckets().localizable.is_empty());
        reviewer.finalize();
        assert!(reviewer.buckets().localizable.is_empty());
    }
}
