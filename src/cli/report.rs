//! Report formatting and printing.
//!
//! Renders a review session's result buckets as tab-separated text rows
//! (`file\tline\tcolumn\tvalue\texplanation\twarning-id`) or as a JSON array, for consumption by
//! an editor, CI log, or another tool. Separate from `core` so the core can stay a plain library
//! with no notion of stdout.

use std::io::{self, Write};

use anyhow::Result;
use colored::Colorize;

use crate::core::{ResultBuckets, StringEntry};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓
/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

#[derive(Debug, Clone, serde::Serialize)]
pub struct ReportRow {
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub value: String,
    pub explanation: String,
    pub warning_id: String,
}

/// `(bucket accessor, warning id, fallback explanation)` - in report order. A note attached by a
/// classifier/post-pass check (`StringEntry::note`) always wins over the fallback text here.
type BucketSpec<'a> = (&'a [StringEntry], &'static str, &'static str);

fn bucket_specs(buckets: &ResultBuckets) -> Vec<BucketSpec<'_>> {
    vec![
        (
            &buckets.not_available_for_l10n,
            "[notL10NAvailable]",
            "string looks user-facing but is not marked for localization",
        ),
        (
            &buckets.marked_as_non_localizable,
            "[markedNonL10N]",
            "explicitly marked as not for localization",
        ),
        (
            &buckets.unsafe_localizable,
            "[unsafeL10N]",
            "marked for translation but looks like code, markup, or a path rather than prose",
        ),
        (
            &buckets.localizable_with_url,
            "[l10nContainsUrl]",
            "translatable string contains a URL, email, or phone number",
        ),
        (
            &buckets.localizable_with_excessive_nonl10n,
            "[excessiveNonL10NContent]",
            "translatable string is mostly format codes or markup, not prose",
        ),
        (
            &buckets.localizable_needing_context,
            "[needingContext]",
            "ambiguous string with no translator context attached",
        ),
        (
            &buckets.localizable_in_internal_call,
            "[suspectL10NString]",
            "translatable string used inside a diagnostic or internal-only call",
        ),
        (
            &buckets.localizable_being_concatenated,
            "[concatenatedL10N]",
            "string appears to be concatenated from multiple pieces",
        ),
        (
            &buckets.literal_l10n_being_compared,
            "[l10nStringComparison]",
            "translatable string is compared exactly; will break once translated",
        ),
        (
            &buckets.localizable_with_halfwidth,
            "[halfwidthChars]",
            "translatable string contains halfwidth-form characters",
        ),
        (
            &buckets.multipart,
            "[multipartString]",
            "one string splices together several logical messages",
        ),
        (
            &buckets.faux_plural,
            "[fauxPlural]",
            "uses \"(s)\" to fake pluralization; breaks for languages with more plural forms",
        ),
        (
            &buckets.article_issue,
            "[articleIssue]",
            "article immediately precedes a placeholder, or a bare pronoun is used",
        ),
        (&buckets.deprecated_macros, "[deprecatedMacro]", "deprecated API"),
        (
            &buckets.unencoded_ext_ascii,
            "[unencodedExtAscii]",
            "string contains unencoded extended-ASCII bytes",
        ),
        (
            &buckets.printf_single_numbers,
            "[printfSingleNumber]",
            "string is a single bare numeric conversion",
        ),
        (
            &buckets.ids_assigned_number,
            "[idNumberOutOfRange]",
            "hard-coded ID value is outside the expected range",
        ),
        (
            &buckets.duplicate_ids,
            "[duplicateIdValue]",
            "value is also assigned to another, differently-named ID",
        ),
        (&buckets.malformed, "[malformedMarkup]", "malformed HTML/XML entity reference"),
        (&buckets.trailing_spaces, "[trailingSpaces]", "trailing whitespace before newline"),
        (&buckets.tabs, "[tabCharacter]", "tab character"),
        (&buckets.wide_lines, "[wideLine]", "line exceeds the configured width"),
        (
            &buckets.comments_missing_space,
            "[commentMissingSpace]",
            "no space after the comment marker",
        ),
        (&buckets.suspect_i18n_usage, "[suspectI18NUsage]", "suspicious i18n usage"),
        (&buckets.error_log, "[internalError]", "internal diagnostic"),
    ]
}

pub fn collect_rows(buckets: &ResultBuckets) -> Vec<ReportRow> {
    let mut rows = Vec::new();
    for (entries, warning_id, fallback) in bucket_specs(buckets) {
        for entry in entries {
            rows.push(ReportRow {
                file: entry.file.display().to_string(),
                line: entry.position.line,
                column: entry.position.column,
                value: entry.text.clone(),
                explanation: entry.note.clone().unwrap_or_else(|| fallback.to_string()),
                warning_id: warning_id.to_string(),
            });
        }
    }
    rows
}

pub fn print_text(buckets: &ResultBuckets) {
    print_text_to(buckets, &mut io::stdout().lock());
}

pub fn print_text_to<W: Write>(buckets: &ResultBuckets, writer: &mut W) {
    let rows = collect_rows(buckets);
    if rows.is_empty() {
        print_success_to(writer);
        return;
    }
    for row in &rows {
        let _ = writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}",
            row.file, row.line, row.column, row.value, row.explanation, row.warning_id
        );
    }
    print_summary_to(&rows, writer);
}

pub fn print_json(buckets: &ResultBuckets) -> Result<()> {
    print_json_to(buckets, &mut io::stdout().lock())
}

pub fn print_json_to<W: Write>(buckets: &ResultBuckets, writer: &mut W) -> Result<()> {
    let rows = collect_rows(buckets);
    serde_json::to_writer_pretty(&mut *writer, &rows)?;
    writeln!(writer)?;
    Ok(())
}

fn print_success_to<W: Write>(writer: &mut W) {
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), "no issues found".green());
}

fn print_summary_to<W: Write>(rows: &[ReportRow], writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        FAILURE_MARK.red(),
        format!("{} issue{} found", rows.len(), if rows.len() == 1 { "" } else { "s" }).red()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ClassifierConfig, Reviewer};
    use std::path::Path;

    #[test]
    fn empty_buckets_print_success() {
        let buckets = ResultBuckets::new();
        let mut out = Vec::new();
        print_text_to(&buckets, &mut out);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("no issues found"));
    }

    #[test]
    fn not_available_rows_render_with_warning_id() {
        let mut reviewer = Reviewer::new(ClassifierConfig::default(), 120);
        reviewer.scan("\"Please enter your full name here\";\n", Path::new("a.cpp"));
        reviewer.finalize();
        let rows = collect_rows(reviewer.buckets());
        assert!(rows.iter().any(|r| r.warning_id == "[notL10NAvailable]"));
    }

    #[test]
    fn json_report_is_an_array() {
        let buckets = ResultBuckets::new();
        let mut out = Vec::new();
        print_json_to(&buckets, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.trim_start().starts_with('['));
    }
}
