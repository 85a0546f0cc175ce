//! Core data types shared by the scanner, backscan resolver, and classifier.
//!
//! These mirror the data model in the i18n review's design: a [`StringEntry`] is created once
//! per logical string literal and is immutable afterwards; the aggregate review pipeline in
//! [`crate::core::review`] only ever adds the same entry to additional buckets, it never mutates
//! the entry itself.

use std::path::PathBuf;

/// A 1-indexed (line, column) position of the opening quote of a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// How a string literal is being used at its call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageKind {
    /// The literal is an argument to a function call, e.g. `_("Hello")`.
    Function,
    /// The literal is the right-hand side of a variable assignment or declaration.
    Variable,
    /// The literal appears on its own, not captured by a call or assignment the backscan
    /// resolver recognizes (e.g. a bare expression statement, a `return "x";`).
    Orphan,
}

/// Information about the variable (or assignment target) a literal is attached to.
///
/// Populated by the backscan resolver (`core::backscan`) when a literal follows `=`, or is
/// adjacent to a concatenation/comparison operator that the classifier needs to see.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableInfo {
    pub name: String,
    /// Declared or inferred type of the variable, e.g. `std::string`, `wxString`, `QRegExp`.
    pub ty: String,
    /// The syntactic operator immediately preceding the literal: one of
    /// `=`, `+=`, `==`, `!=`, `+`, `?`, `:`, `<`, `>`, or empty if none was seen.
    pub operator: String,
}

/// The resolved usage context of a string literal, as recovered by the backscan resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Usage {
    pub kind: Option<UsageKind>,
    /// The enclosing function name when `kind == Function`; empty otherwise.
    pub value: String,
    pub variable: VariableInfo,
    /// True when a `TRANSLATORS:`/Qt `:`-comment is attached, or the enclosing i18n function
    /// is a with-context variant (e.g. `QApplication::translate`, `i18nc`).
    pub has_context: bool,
    /// 0-based position of the literal among the enclosing call's comma-separated arguments.
    pub parameter_position: usize,
    /// Set by the backscan resolver when a deprecated constructor/macro (e.g. `_T`, `TEXT`)
    /// transparently wraps the literal.
    pub wrapped_by_deprecated_macro: bool,
}

impl Usage {
    pub fn orphan() -> Self {
        Self {
            kind: Some(UsageKind::Orphan),
            ..Default::default()
        }
    }

    pub fn function(name: impl Into<String>) -> Self {
        Self {
            kind: Some(UsageKind::Function),
            value: name.into(),
            ..Default::default()
        }
    }

    pub fn variable(info: VariableInfo) -> Self {
        Self {
            kind: Some(UsageKind::Variable),
            variable: info,
            ..Default::default()
        }
    }
}

/// A single string literal discovered by the scanner, along with its resolved usage context.
///
/// Immutable after creation: the aggregate review pipeline files the same entry (by clone) into
/// additional secondary buckets, it never edits `text`, `usage`, `file`, or `position`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringEntry {
    pub text: String,
    pub usage: Usage,
    pub file: PathBuf,
    pub position: Position,
    /// Free-form explanation attached by a classifier/post-pass check, rendered in reports.
    /// For example the ID-assignment pass records why a value is out of range here.
    pub note: Option<String>,
}

impl StringEntry {
    pub fn new(text: impl Into<String>, usage: Usage, file: PathBuf, position: Position) -> Self {
        Self {
            text: text.into(),
            usage,
            file,
            position,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// The ordered result buckets a review session accumulates. Every literal lands in exactly one
/// primary bucket; the cross-cutting buckets (url, multipart, halfwidth, ...) hold clones of
/// entries that are already filed primarily elsewhere.
#[derive(Debug, Clone, Default)]
pub struct ResultBuckets {
    pub localizable: Vec<StringEntry>,
    pub localizable_with_url: Vec<StringEntry>,
    pub localizable_with_excessive_nonl10n: Vec<StringEntry>,
    pub localizable_needing_context: Vec<StringEntry>,
    pub localizable_in_internal_call: Vec<StringEntry>,
    pub localizable_being_concatenated: Vec<StringEntry>,
    pub literal_l10n_being_compared: Vec<StringEntry>,
    pub localizable_with_halfwidth: Vec<StringEntry>,
    pub multipart: Vec<StringEntry>,
    pub faux_plural: Vec<StringEntry>,
    pub article_issue: Vec<StringEntry>,
    pub not_available_for_l10n: Vec<StringEntry>,
    pub marked_as_non_localizable: Vec<StringEntry>,
    pub internal: Vec<StringEntry>,
    pub unsafe_localizable: Vec<StringEntry>,
    pub deprecated_macros: Vec<StringEntry>,
    pub unencoded_ext_ascii: Vec<StringEntry>,
    pub printf_single_numbers: Vec<StringEntry>,
    pub ids_assigned_number: Vec<StringEntry>,
    pub duplicate_ids: Vec<StringEntry>,
    pub malformed: Vec<StringEntry>,
    pub trailing_spaces: Vec<StringEntry>,
    pub tabs: Vec<StringEntry>,
    pub wide_lines: Vec<StringEntry>,
    pub comments_missing_space: Vec<StringEntry>,
    pub suspect_i18n_usage: Vec<StringEntry>,
    pub error_log: Vec<StringEntry>,
}

impl ResultBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Concatenates `other` onto `self`, bucket by bucket, preserving the file-path order the
    /// caller already sorted `other` into. Used by the driver to merge one `Reviewer` per worker.
    pub fn merge(&mut self, mut other: Self) {
        self.localizable.append(&mut other.localizable);
        self.localizable_with_url.append(&mut other.localizable_with_url);
        self.localizable_with_excessive_nonl10n
            .append(&mut other.localizable_with_excessive_nonl10n);
        self.localizable_needing_context
            .append(&mut other.localizable_needing_context);
        self.localizable_in_internal_call
            .append(&mut other.localizable_in_internal_call);
        self.localizable_being_concatenated
            .append(&mut other.localizable_being_concatenated);
        self.literal_l10n_being_compared
            .append(&mut other.literal_l10n_being_compared);
        self.localizable_with_halfwidth
            .append(&mut other.localizable_with_halfwidth);
        self.multipart.append(&mut other.multipart);
        self.faux_plural.append(&mut other.faux_plural);
        self.article_issue.append(&mut other.article_issue);
        self.not_available_for_l10n.append(&mut other.not_available_for_l10n);
        self.marked_as_non_localizable
            .append(&mut other.marked_as_non_localizable);
        self.internal.append(&mut other.internal);
        self.unsafe_localizable.append(&mut other.unsafe_localizable);
        self.deprecated_macros.append(&mut other.deprecated_macros);
        self.unencoded_ext_ascii.append(&mut other.unencoded_ext_ascii);
        self.printf_single_numbers.append(&mut other.printf_single_numbers);
        self.ids_assigned_number.append(&mut other.ids_assigned_number);
        self.duplicate_ids.append(&mut other.duplicate_ids);
        self.malformed.append(&mut other.malformed);
        self.trailing_spaces.append(&mut other.trailing_spaces);
        self.tabs.append(&mut other.tabs);
        self.wide_lines.append(&mut other.wide_lines);
        self.comments_missing_space.append(&mut other.comments_missing_space);
        self.suspect_i18n_usage.append(&mut other.suspect_i18n_usage);
        self.error_log.append(&mut other.error_log);
    }

    /// Empties every bucket, keeping the allocations - mirrors the façade's `clear()`.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
