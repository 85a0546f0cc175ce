//! Aggregate review pipeline (C6): cross-cutting passes that run once after every file in a
//! session has been scanned, over the merged [`ResultBuckets`].
//!
//! Unlike the per-literal checks in `core::classify`, these passes either need the whole session
//! in view (duplicate ID detection, framework-init cross-check) or need to re-scan a file's
//! erased working buffer for patterns that don't belong to any single string literal (the
//! deprecated-API sweep, the ID-assignment sweep, the suspect-usage sweep).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::core::classify;
use crate::core::model::{Position, ResultBuckets, StringEntry, Usage, UsageKind};
use crate::core::rulesets::DEPRECATED_MACROS;
use crate::core::style::{CheckFlag, ReviewStyle};

/// A file's erased working buffer plus the position index needed to convert an offset found by
/// a whole-buffer regex sweep back into a line/column. The driver retains one of these per file
/// (see `core::Reviewer`) specifically so `finalize` can run these sweeps.
pub struct ScannedFile {
    pub path: PathBuf,
    pub erased_text: String,
    pub line_starts: Vec<usize>,
}

impl ScannedFile {
    pub fn new(path: PathBuf, erased_text: String) -> Self {
        let line_starts = compute_line_starts(&erased_text);
        Self { path, erased_text, line_starts }
    }

    fn position_at(&self, byte_offset: usize) -> Position {
        let line = self.line_starts.partition_point(|&s| s <= byte_offset);
        let line_start = self.line_starts[line.saturating_sub(1)];
        Position::new(line.max(1), byte_offset - line_start + 1)
    }
}

fn compute_line_starts(text: &str) -> Vec<usize> {
    let mut starts = vec![0usize];
    for (i, b) in text.bytes().enumerate() {
        if b == b'\n' {
            starts.push(i + 1);
        }
    }
    starts
}

/// Runs every aggregate pass over `buckets`, consulting `files` for the whole-buffer sweeps and
/// `app_init_seen`/`locale_init_seen` for the framework-init cross-check. Mutates `buckets` in
/// place, appending newly-discovered entries to the relevant secondary buckets.
pub fn finalize(
    buckets: &mut ResultBuckets,
    files: &[ScannedFile],
    style: &ReviewStyle,
    app_init_seen: bool,
    locale_init_seen: bool,
) {
    collapse_multiline_continuations(buckets);
    run_cross_bucket_observations(buckets, style);
    run_printf_single_number_pass(buckets, style);
    run_year_pattern_pass(buckets, style);
    run_framework_init_check(buckets, style, app_init_seen, locale_init_seen);
    run_id_assignment_pass(buckets, files, style);
    run_deprecated_api_pass(buckets, files, style);
    run_suspect_usage_pass(buckets, files, style);
    run_diagnostics_sweep(buckets);
}

static ADJACENT_QUOTED_PIECES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""\s*"\s*""#).expect("adjacent quoted pieces pattern"));

/// Collapses any `"..."  "..."` artifact left in a literal's text (e.g. from a harvester that
/// didn't itself join multi-piece strings) down to one piece, and collapses doubled `""` down to
/// a single `"` for dialects using that as a raw-escape (gettext PO).
fn collapse_multiline_continuations(buckets: &mut ResultBuckets) {
    for_each_bucket_mut(buckets, |entries| {
        for entry in entries {
            if ADJACENT_QUOTED_PIECES.is_match(&entry.text) {
                entry.text = ADJACENT_QUOTED_PIECES.replace_all(&entry.text, "").into_owned();
            }
            if entry.text.contains("\"\"") {
                entry.text = entry.text.replace("\"\"", "\"");
            }
        }
    });
}

/// Runs a closure over every primary bucket that can hold "real" message text - the ones the
/// secondary passes below scan. Cross-cutting buckets (url, multipart, ...) are themselves built
/// by these passes, so they're excluded here to avoid re-deriving from already-derived entries.
fn for_each_bucket_mut(buckets: &mut ResultBuckets, mut f: impl FnMut(&mut Vec<StringEntry>)) {
    f(&mut buckets.localizable);
    f(&mut buckets.not_available_for_l10n);
    f(&mut buckets.internal);
    f(&mut buckets.localizable_in_internal_call);
}

/// The secondary observations deferred from `core::classify` (§4.4): multipart, faux-plural,
/// article/pronoun, ambiguity, concatenation, halfwidth, URL, and excessive-non-l10n-content.
/// Only run over the *localizable* bucket - these are all about whether a message marked for
/// translation is safe to translate, which doesn't apply to strings already routed elsewhere.
fn run_cross_bucket_observations(buckets: &mut ResultBuckets, style: &ReviewStyle) {
    let mut multipart = Vec::new();
    let mut faux_plural = Vec::new();
    let mut article_issue = Vec::new();
    let mut needing_context = Vec::new();
    let mut concatenated = Vec::new();
    let mut halfwidth = Vec::new();
    let mut with_url = Vec::new();
    let mut excessive = Vec::new();

    for entry in &buckets.localizable {
        if style.is_enabled(CheckFlag::MultipartStrings) && classify::is_multipart(&entry.text) {
            multipart.push(entry.clone());
        }
        if style.is_enabled(CheckFlag::Pluralization) && classify::is_faux_plural(&entry.text, entry.usage.has_context) {
            faux_plural.push(entry.clone());
        }
        if style.is_enabled(CheckFlag::ArticlesProceedingPlaceholder) && classify::has_article_or_pronoun_issue(&entry.text) {
            article_issue.push(entry.clone());
        }
        if style.is_enabled(CheckFlag::NeedingContext) && classify::needs_translator_context(&entry.text, entry.usage.has_context) {
            needing_context.push(entry.clone());
        }
        if style.is_enabled(CheckFlag::L10nConcatenatedStrings) && classify::is_concatenated(&entry.text, &entry.usage) {
            concatenated.push(entry.clone());
        }
        if style.is_enabled(CheckFlag::Halfwidth) && crate::core::textutil::contains_halfwidth_form(&entry.text) {
            halfwidth.push(entry.clone());
        }
        if style.is_enabled(CheckFlag::L10nContainsUrl) && classify::contains_url_email_or_phone(&entry.text) {
            with_url.push(entry.clone());
        }
        if style.is_enabled(CheckFlag::L10nContainsExcessiveNonL10nContent)
            && classify::has_excessive_non_l10n_content(&entry.text)
        {
            excessive.push(entry.clone());
        }
    }

    buckets.multipart.extend(multipart);
    buckets.faux_plural.extend(faux_plural);
    buckets.article_issue.extend(article_issue);
    buckets.localizable_needing_context.extend(needing_context);
    buckets.localizable_being_concatenated.extend(concatenated);
    buckets.localizable_with_halfwidth.extend(halfwidth);
    buckets.localizable_with_url.extend(with_url);
    buckets.localizable_with_excessive_nonl10n.extend(excessive);

    if style.is_enabled(CheckFlag::L10nStrings) {
        let mut unsafe_localizable = Vec::new();
        for entry in &buckets.localizable {
            if classify::is_untranslatable(&entry.text, false, 0, true) {
                unsafe_localizable.push(entry.clone());
            }
        }
        buckets.unsafe_localizable.extend(unsafe_localizable);
    }

    // `localizable_in_internal_call` itself is populated at classification time
    // (`core::classify::Classifier::file_internal_call_argument`), gated on the same flag; there
    // is nothing further to do here.
}

static SINGLE_NUMBER_CONVERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*%[-+ 0#]*[0-9.*]*(?:hh|h|ll|l|j|z|t|L)?[dioxXufFeEgG]\s*$").expect("single number conversion pattern"));

/// Internal and localizable-in-internal-call strings that are *only* a single integer/float
/// conversion specifier, nothing else - these are classic "don't bother translating a bare %d".
fn run_printf_single_number_pass(buckets: &mut ResultBuckets, style: &ReviewStyle) {
    if !style.is_enabled(CheckFlag::PrintfSingleNumber) {
        return;
    }
    let mut found = Vec::new();
    for entry in buckets.internal.iter().chain(buckets.localizable_in_internal_call.iter()) {
        if SINGLE_NUMBER_CONVERSION.is_match(&entry.text) {
            found.push(entry.clone());
        }
    }
    buckets.printf_single_numbers.extend(found);
}

static STRFTIME_FUNCTIONS: &[&str] = &["strftime", "wcsftime", "QDateTime::toString", "wxDateTime::Format"];
static YEAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"%[gyC]").expect("year pattern"));

/// A `strftime`-family format string using the locale-sensitive two-digit-year / century
/// specifiers (`%g`, `%y`, `%C`) - these don't round-trip across locales and are worth a flag.
fn run_year_pattern_pass(buckets: &mut ResultBuckets, style: &ReviewStyle) {
    if !style.is_enabled(CheckFlag::SuspectI18nUsage) {
        return;
    }
    let mut found = Vec::new();
    for entry in buckets.localizable.iter().chain(buckets.not_available_for_l10n.iter()).chain(buckets.internal.iter()) {
        if matches!(entry.usage.kind, Some(UsageKind::Function))
            && STRFTIME_FUNCTIONS.contains(&entry.usage.value.as_str())
            && YEAR_PATTERN.is_match(&entry.text)
        {
            found.push(
                entry
                    .clone()
                    .with_note("strftime-family format uses a locale-sensitive year/century specifier"),
            );
        }
    }
    buckets.suspect_i18n_usage.extend(found);
}

/// If this tree has an app-init fingerprint but no matching locale-init fingerprint anywhere, the
/// application likely never initializes translation at all - a tree-wide, not per-file, concern.
fn run_framework_init_check(buckets: &mut ResultBuckets, style: &ReviewStyle, app_init_seen: bool, locale_init_seen: bool) {
    if !style.is_enabled(CheckFlag::SuspectI18nUsage) {
        return;
    }
    if app_init_seen && !locale_init_seen {
        buckets.suspect_i18n_usage.push(
            StringEntry::new(
                "application entry point found without a matching locale/translator initialization",
                Usage::orphan(),
                PathBuf::new(),
                Position::new(0, 0),
            )
            .with_note("no wxLocale/QLocale/QTranslator/setlocale/bindtextdomain call was seen anywhere in the tree"),
        );
    }
}

static ID_ASSIGNMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(IDC_[A-Za-z0-9_]+|IDS_[A-Za-z0-9_]+|IDD_[A-Za-z0-9_]+|ID_[A-Za-z0-9_]+)\s+(-?0[xX][0-9A-Fa-f]+|-?[0-9]+)\b").expect("id assignment pattern"));

/// Idiomatic sentinel values that never count as a "real" assigned ID for the duplicate-value
/// check: `-1` (not-found), `0` (none/ANY), and framework `_ANY`-style placeholders.
const IGNORED_ID_SENTINELS: &[i64] = &[-1, 0];

/// Acceptable numeric ranges per ID-name prefix family - values outside get flagged as "out of
/// the expected range" even though they parse fine as plain integers.
fn expected_range_for(prefix: &str) -> Option<(i64, i64)> {
    match prefix {
        "IDC_" => Some((1000, 32767)),
        "IDS_" => Some((1, 32767)),
        "IDD_" => Some((1, 32767)),
        "ID_" => Some((1, 65535)),
        _ => None,
    }
}

fn id_prefix(name: &str) -> &str {
    for prefix in ["IDC_", "IDS_", "IDD_", "ID_"] {
        if name.starts_with(prefix) {
            return prefix;
        }
    }
    ""
}

fn parse_id_value(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16).ok()
    } else if let Some(rest) = raw.strip_prefix("-0x").or_else(|| raw.strip_prefix("-0X")) {
        i64::from_str_radix(rest, 16).ok().map(|v| -v)
    } else {
        raw.parse::<i64>().ok()
    }
}

/// Sweeps every file's erased working buffer for hard-coded `NAME value` ID assignments,
/// flagging out-of-range values and collecting duplicate value->name mappings across the whole
/// session (ignoring sentinels and same-name redeclarations).
fn run_id_assignment_pass(buckets: &mut ResultBuckets, files: &[ScannedFile], style: &ReviewStyle) {
    if !style.is_enabled(CheckFlag::NumberAssignedToId) && !style.is_enabled(CheckFlag::DuplicateValueAssignedToIds) {
        return;
    }

    let mut value_to_names: HashMap<i64, Vec<(String, PathBuf, Position)>> = HashMap::new();

    for file in files {
        for cap in ID_ASSIGNMENT.captures_iter(&file.erased_text) {
            let whole = cap.get(0).unwrap();
            let name = &cap[1];
            let Some(value) = parse_id_value(&cap[2]) else { continue };
            let pos = file.position_at(whole.start());

            if style.is_enabled(CheckFlag::NumberAssignedToId) {
                let prefix = id_prefix(name);
                if let Some((low, high)) = expected_range_for(prefix) {
                    if value < low || value > high {
                        buckets.ids_assigned_number.push(
                            StringEntry::new(
                                format!("{name} {value}"),
                                Usage::function("RC"),
                                file.path.clone(),
                                pos,
                            )
                            .with_note(format!("value {value} is out of the expected range {low}..={high} for {prefix}*")),
                        );
                    }
                }
            }

            if style.is_enabled(CheckFlag::DuplicateValueAssignedToIds) && !IGNORED_ID_SENTINELS.contains(&value) {
                value_to_names.entry(value).or_default().push((name.to_string(), file.path.clone(), pos));
            }
        }
    }

    if style.is_enabled(CheckFlag::DuplicateValueAssignedToIds) {
        for (value, mut names) in value_to_names {
            names.dedup_by(|a, b| a.0 == b.0);
            if names.len() < 2 {
                continue;
            }
            for (name, path, pos) in names {
                buckets.duplicate_ids.push(
                    StringEntry::new(format!("{name} = {value}"), Usage::function("RC"), path, pos)
                        .with_note(format!("value {value} is also assigned to another distinct ID name")),
                );
            }
        }
    }
}

/// Word-boundary scan for each deprecated API name (§4.4 "Deprecated-API pass"), one entry per
/// occurrence, carrying the replacement suggestion.
fn run_deprecated_api_pass(buckets: &mut ResultBuckets, files: &[ScannedFile], style: &ReviewStyle) {
    if !style.is_enabled(CheckFlag::DeprecatedMacros) {
        return;
    }
    for file in files {
        for (name, replacement) in DEPRECATED_MACROS.iter() {
            let pattern = word_boundary_pattern(name);
            for m in pattern.find_iter(&file.erased_text) {
                let pos = file.position_at(m.start());
                buckets.deprecated_macros.push(
                    StringEntry::new(name.to_string(), Usage::orphan(), file.path.clone(), pos)
                        .with_note(format!("deprecated; prefer {replacement}")),
                );
            }
        }
    }
}

fn word_boundary_pattern(name: &str) -> Regex {
    Regex::new(&format!(r"\b{}\b", regex::escape(name))).expect("deprecated macro word-boundary pattern")
}

static LOAD_STRING_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:::)?LoadString[AW]?\s*\(").expect("load string call pattern"));
static NON_LITERAL_I18N_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:_|wxPLURAL)\s*\(\s*([A-Za-z_][A-Za-z0-9_]*)\s*[,)]").expect("non-literal i18n call pattern"));

/// `LoadString`/`LoadStringA`/`LoadStringW` calls (a raw resource-ID lookup bypassing the i18n
/// layer entirely), and `_(`/`wxPLURAL(` calls whose first argument is a bare identifier rather
/// than a string literal - both bypass the classifier's normal per-literal path since there's no
/// literal to classify, so they're only catchable here.
fn run_suspect_usage_pass(buckets: &mut ResultBuckets, files: &[ScannedFile], style: &ReviewStyle) {
    if !style.is_enabled(CheckFlag::SuspectI18nUsage) {
        return;
    }
    for file in files {
        for m in LOAD_STRING_CALL.find_iter(&file.erased_text) {
            let pos = file.position_at(m.start());
            buckets.suspect_i18n_usage.push(
                StringEntry::new(m.as_str().to_string(), Usage::orphan(), file.path.clone(), pos)
                    .with_note("LoadString bypasses the translation layer; resource strings should flow through it"),
            );
        }
        for cap in NON_LITERAL_I18N_CALL.captures_iter(&file.erased_text) {
            let whole = cap.get(0).unwrap();
            let pos = file.position_at(whole.start());
            buckets.suspect_i18n_usage.push(
                StringEntry::new(cap[1].to_string(), Usage::orphan(), file.path.clone(), pos)
                    .with_note("i18n call's first argument is an identifier, not a string literal"),
            );
        }
    }
}

/// If a collected entry has an empty `usage.value` but its kind isn't Orphan, the classifier
/// produced a context-free Function/Variable usage - a self-diagnostic, not a user-facing bug.
fn run_diagnostics_sweep(buckets: &mut ResultBuckets) {
    let mut diagnostics = Vec::new();
    for_each_bucket_mut(buckets, |entries| {
        for entry in entries.iter() {
            let is_empty_context = match entry.usage.kind {
                Some(UsageKind::Function) => entry.usage.value.is_empty(),
                Some(UsageKind::Variable) => entry.usage.variable.name.is_empty(),
                _ => false,
            };
            if is_empty_context {
                diagnostics.push(
                    StringEntry::new(entry.text.clone(), entry.usage.clone(), entry.file.clone(), entry.position)
                        .with_note("classifier produced a non-Orphan usage with no recovered name"),
                );
            }
        }
    });
    buckets.error_log.extend(diagnostics);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::VariableInfo;

    fn entry(text: &str, usage: Usage) -> StringEntry {
        StringEntry::new(text, usage, PathBuf::from("a.cpp"), Position::new(1, 1))
    }

    #[test]
    fn collapse_multiline_continuations_merges_adjacent_pieces() {
        let mut buckets = ResultBuckets::new();
        buckets.localizable.push(entry(r#""Hello, " "world!""#, Usage::function("_")));
        collapse_multiline_continuations(&mut buckets);
        assert_eq!(buckets.localizable[0].text, "Hello, world!");
    }

    #[test]
    fn cross_bucket_observations_detect_multipart_in_localizable() {
        let mut buckets = ResultBuckets::new();
        buckets.localizable.push(entry("Save  Cancel", Usage::function("_")));
        run_cross_bucket_observations(&mut buckets, &ReviewStyle::all());
        assert_eq!(buckets.multipart.len(), 1);
    }

    #[test]
    fn printf_single_number_flags_bare_conversion() {
        let mut buckets = ResultBuckets::new();
        buckets.internal.push(entry("%d", Usage::function("printf")));
        run_printf_single_number_pass(&mut buckets, &ReviewStyle::all());
        assert_eq!(buckets.printf_single_numbers.len(), 1);
    }

    #[test]
    fn framework_init_check_flags_missing_locale_init() {
        let mut buckets = ResultBuckets::new();
        run_framework_init_check(&mut buckets, &ReviewStyle::all(), true, false);
        assert_eq!(buckets.suspect_i18n_usage.len(), 1);
    }

    #[test]
    fn framework_init_check_silent_when_locale_init_present() {
        let mut buckets = ResultBuckets::new();
        run_framework_init_check(&mut buckets, &ReviewStyle::all(), true, true);
        assert!(buckets.suspect_i18n_usage.is_empty());
    }

    #[test]
    fn id_assignment_pass_flags_out_of_range_value() {
        let mut buckets = ResultBuckets::new();
        let files = vec![ScannedFile::new(PathBuf::from("resource.h"), "#define IDC_FOO 32784\n".to_string())];
        run_id_assignment_pass(&mut buckets, &files, &ReviewStyle::all());
        assert_eq!(buckets.ids_assigned_number.len(), 1);
    }

    #[test]
    fn id_assignment_pass_flags_duplicate_values() {
        let mut buckets = ResultBuckets::new();
        let files = vec![ScannedFile::new(
            PathBuf::from("resource.h"),
            "#define IDC_FOO 2000\n#define IDC_BAR 2000\n".to_string(),
        )];
        run_id_assignment_pass(&mut buckets, &files, &ReviewStyle::all());
        assert_eq!(buckets.duplicate_ids.len(), 2);
    }

    #[test]
    fn id_assignment_pass_ignores_sentinel_values() {
        let mut buckets = ResultBuckets::new();
        let files = vec![ScannedFile::new(
            PathBuf::from("resource.h"),
            "#define IDC_FOO -1\n#define IDC_BAR -1\n".to_string(),
        )];
        run_id_assignment_pass(&mut buckets, &files, &ReviewStyle::all());
        assert!(buckets.duplicate_ids.is_empty());
    }

    #[test]
    fn deprecated_api_pass_flags_each_occurrence() {
        let mut buckets = ResultBuckets::new();
        let files = vec![ScannedFile::new(
            PathBuf::from("a.cpp"),
            "auto s = _T(\"x\"); auto t = _T(\"y\");".to_string(),
        )];
        run_deprecated_api_pass(&mut buckets, &files, &ReviewStyle::all());
        assert_eq!(buckets.deprecated_macros.len(), 2);
    }

    #[test]
    fn suspect_usage_pass_flags_load_string_call() {
        let mut buckets = ResultBuckets::new();
        let files = vec![ScannedFile::new(PathBuf::from("a.cpp"), "LoadStringW(hInst, IDS_FOO, buf, len);".to_string())];
        run_suspect_usage_pass(&mut buckets, &files, &ReviewStyle::all());
        assert_eq!(buckets.suspect_i18n_usage.len(), 1);
    }

    #[test]
    fn suspect_usage_pass_flags_non_literal_i18n_argument() {
        let mut buckets = ResultBuckets::new();
        let files = vec![ScannedFile::new(PathBuf::from("a.cpp"), "auto s = _(someIdentifier);".to_string())];
        run_suspect_usage_pass(&mut buckets, &files, &ReviewStyle::all());
        assert_eq!(buckets.suspect_i18n_usage.len(), 1);
    }

    #[test]
    fn diagnostics_sweep_flags_empty_function_name() {
        let mut buckets = ResultBuckets::new();
        buckets.not_available_for_l10n.push(entry(
            "oops",
            Usage::variable(VariableInfo { name: String::new(), ty: String::new(), operator: String::new() }),
        ));
        run_diagnostics_sweep(&mut buckets);
        assert_eq!(buckets.error_log.len(), 1);
    }

    #[test]
    fn diagnostics_sweep_ignores_orphans() {
        let mut buckets = ResultBuckets::new();
        buckets.not_available_for_l10n.push(entry("oops", Usage::orphan()));
        run_diagnostics_sweep(&mut buckets);
        assert!(buckets.error_log.is_empty());
    }
}
