//! String classifier (C3): given a literal plus its resolved usage context, decides which
//! primary bucket it belongs to and records the secondary observations that don't need
//! whole-session context (those that do - multipart, faux-plural, ambiguity, ... - are deferred
//! to the aggregate review pipeline in `core::review`, per the design notes).

use std::path::PathBuf;

use regex::Regex;
use std::sync::LazyLock;

use crate::core::model::{Position, ResultBuckets, StringEntry, Usage, UsageKind};
use crate::core::rulesets::{
    self, DIAGNOSTIC_FUNCTIONS, EXCEPTION_TYPES, FILE_EXTENSIONS, FONT_NAMES,
    I18N_CONTEXT_FUNCTIONS, I18N_FUNCTIONS, I18N_ID_ONLY_FUNCTIONS, IGNORED_VARIABLE_TYPES,
    INTERNAL_VARIABLE_NAME_PATTERNS, KEYWORDS, LOG_FUNCTIONS, NON_I18N_EXPLICIT_FUNCTIONS,
    SEARCH_COMPARE_FUNCTIONS, TRANSLATABLE_EXCEPTIONS, TRANSLATABLE_WHITELIST,
};
use crate::core::style::CheckFlag;
use crate::core::textutil;

/// Policy knobs that affect classification (the C13 config fields that reach C3).
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub style: crate::core::style::ReviewStyle,
    pub min_words_for_unavailable: usize,
    pub exceptions_should_be_translatable: bool,
    pub log_messages_can_be_translatable: bool,
    pub allow_translating_punctuation_only: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            style: crate::core::style::ReviewStyle::default(),
            min_words_for_unavailable: 2,
            exceptions_should_be_translatable: false,
            log_messages_can_be_translatable: false,
            allow_translating_punctuation_only: false,
        }
    }
}

pub struct Classifier<'a> {
    pub config: &'a ClassifierConfig,
}

impl<'a> Classifier<'a> {
    pub fn new(config: &'a ClassifierConfig) -> Self {
        Self { config }
    }

    /// Files `text` into the appropriate bucket of `buckets`, consulting `usage` for the
    /// call/assignment context the backscan resolver recovered.
    pub fn classify(
        &self,
        text: &str,
        usage: Usage,
        file: PathBuf,
        position: Position,
        buckets: &mut ResultBuckets,
    ) {
        match usage.kind {
            Some(UsageKind::Function) => self.classify_function_usage(text, usage, file, position, buckets),
            Some(UsageKind::Variable) => self.classify_variable_usage(text, usage, file, position, buckets),
            Some(UsageKind::Orphan) | None => {
                self.run_not_marked_pipeline(text, usage, file, position, buckets)
            }
        }
    }

    fn classify_function_usage(
        &self,
        text: &str,
        usage: Usage,
        file: PathBuf,
        position: Position,
        buckets: &mut ResultBuckets,
    ) {
        let name = usage.value.as_str();

        // Deprecated-CTOR wrapping (`usage.wrapped_by_deprecated_macro`) is not handled here:
        // the aggregate pass's whole-buffer regex sweep (core::review) already catches every
        // occurrence of a deprecated name, so recording it again per-literal would double-count.

        if DIAGNOSTIC_FUNCTIONS.contains(name) || rulesets::has_diagnostic_suffix(name) {
            self.file_internal_call_argument(text, usage, file, position, buckets);
            return;
        }
        if LOG_FUNCTIONS.contains(name) && !self.config.log_messages_can_be_translatable {
            self.file_internal_call_argument(text, usage, file, position, buckets);
            return;
        }

        if I18N_FUNCTIONS.contains(name) {
            self.classify_i18n_call(text, usage, file, position, buckets);
            return;
        }

        if NON_I18N_EXPLICIT_FUNCTIONS.contains(name) {
            buckets
                .marked_as_non_localizable
                .push(StringEntry::new(text, usage, file, position));
            return;
        }

        if KEYWORDS.contains(name) {
            // Keyword "callers" (if/return/throw/...) carry no real usage context; fall through
            // to the not-marked pipeline as if this were an orphan literal.
            self.run_not_marked_pipeline(text, usage, file, position, buckets);
            return;
        }

        self.run_not_marked_pipeline(text, usage, file, position, buckets);
    }

    /// Files a string argument to a diagnostic/log/internal call: `localizable_in_internal_call`
    /// when `check_suspect_l10n_string_usage` is on and the text isn't untranslatable, `internal`
    /// otherwise.
    fn file_internal_call_argument(
        &self,
        text: &str,
        usage: Usage,
        file: PathBuf,
        position: Position,
        buckets: &mut ResultBuckets,
    ) {
        if self.config.style.is_enabled(CheckFlag::SuspectL10nStringUsage)
            && !is_untranslatable(text, true, self.config.min_words_for_unavailable, self.config.allow_translating_punctuation_only)
        {
            buckets
                .localizable_in_internal_call
                .push(StringEntry::new(text, usage, file, position));
        } else {
            buckets.internal.push(StringEntry::new(text, usage, file, position));
        }
    }

    fn classify_i18n_call(
        &self,
        text: &str,
        mut usage: Usage,
        file: PathBuf,
        position: Position,
        buckets: &mut ResultBuckets,
    ) {
        let name = usage.value.clone();

        if I18N_CONTEXT_FUNCTIONS.contains(name.as_str()) {
            if usage.parameter_position == 0 {
                // The context/disambiguator argument itself - never shown to a translator.
                buckets.internal.push(StringEntry::new(text, usage, file, position));
                return;
            }
            usage.has_context = true;
        }

        if I18N_ID_ONLY_FUNCTIONS.contains(name.as_str()) && text.chars().count() > 32 {
            if self.config.style.is_enabled(CheckFlag::SuspectI18nUsage) {
                buckets.suspect_i18n_usage.push(StringEntry::new(
                    text,
                    usage.clone(),
                    file.clone(),
                    position,
                ).with_note("QT_TRID/qtTrId expects a short identifier, not a full message"));
            }
        }

        let entry = StringEntry::new(text, usage.clone(), file.clone(), position);

        if self.config.style.is_enabled(CheckFlag::LiteralL10nStringComparison)
            && is_being_compared(&usage)
        {
            buckets.literal_l10n_being_compared.push(entry.clone());
        }

        buckets.localizable.push(entry);
    }

    fn classify_variable_usage(
        &self,
        text: &str,
        usage: Usage,
        file: PathBuf,
        position: Position,
        buckets: &mut ResultBuckets,
    ) {
        if IGNORED_VARIABLE_TYPES.contains(usage.variable.ty.as_str()) {
            buckets.internal.push(StringEntry::new(text, usage, file, position));
            return;
        }
        if INTERNAL_VARIABLE_NAME_PATTERNS
            .iter()
            .any(|re| re.is_match(&usage.variable.name))
        {
            buckets.internal.push(StringEntry::new(text, usage, file, position));
            return;
        }
        self.run_not_marked_pipeline(text, usage, file, position, buckets);
    }

    fn run_not_marked_pipeline(
        &self,
        text: &str,
        usage: Usage,
        file: PathBuf,
        position: Position,
        buckets: &mut ResultBuckets,
    ) {
        let is_exception = matches!(usage.kind, Some(UsageKind::Function))
            && EXCEPTION_TYPES.contains(usage.value.as_str())
            || matches!(usage.kind, Some(UsageKind::Variable))
                && EXCEPTION_TYPES.contains(usage.variable.ty.as_str());

        if is_exception {
            if self.config.exceptions_should_be_translatable {
                buckets
                    .not_available_for_l10n
                    .push(StringEntry::new(text, usage, file, position));
            } else {
                buckets.internal.push(StringEntry::new(text, usage, file, position));
            }
            return;
        }

        if is_untranslatable(
            text,
            true,
            self.config.min_words_for_unavailable,
            self.config.allow_translating_punctuation_only,
        ) {
            buckets.internal.push(StringEntry::new(text, usage, file, position));
        } else {
            let entry = StringEntry::new(text, usage, file, position);

            if self.config.style.is_enabled(CheckFlag::MalformedStrings) && is_malformed_markup(text) {
                buckets.malformed.push(entry.clone());
            }
            if self.config.style.is_enabled(CheckFlag::UnencodedExtAscii) && has_ext_ascii_byte(text) {
                buckets.unencoded_ext_ascii.push(entry.clone());
            }

            buckets.not_available_for_l10n.push(entry);
        }
    }
}

/// The `is_untranslatable` heuristic (§4.3). Order matters - each step can return early.
pub fn is_untranslatable(text: &str, limit_word_count: bool, min_words: usize, allow_punct_only: bool) -> bool {
    // 1. Very long single-word strings.
    if !text.chars().any(|c| c.is_whitespace()) && text.chars().count() >= 32 {
        return true;
    }

    // 2. Known translatable exceptions win outright.
    if TRANSLATABLE_EXCEPTIONS.iter().any(|re| re.is_match(text)) {
        return false;
    }

    // 3. Normalize.
    let normalized = normalize_for_untranslatable_check(text);

    // 4. Digits/punctuation/space only.
    if normalized.chars().all(|c| c.is_ascii_digit() || c.is_whitespace() || c.is_ascii_punctuation())
        && !normalized.is_empty()
        && !allow_punct_only
    {
        if normalized == "..." || text.contains("%%") {
            return false;
        }
        return true;
    }

    // 5. HTML/XML: recognize markup and strip it, re-evaluating; a single unknown tag name in
    // angle brackets is treated as a real (mistranslated) message rather than markup.
    if let Some(tag) = single_angle_bracket_tag(&normalized) {
        if !is_known_html_element(&tag) {
            return false;
        }
    }
    if looks_like_markup(&normalized) {
        let stripped = strip_markup(&normalized);
        if stripped.trim() != normalized.trim() {
            return is_untranslatable(stripped.trim(), limit_word_count, min_words, allow_punct_only);
        }
    }

    // 6. Word count.
    if limit_word_count {
        let word_count = WORD_PATTERN.find_iter(&normalized).count();
        if word_count < min_words {
            return true;
        }
    }

    // 7. Curated untranslatable patterns.
    if rulesets::matches_untranslatable_pattern(normalized.trim()) {
        return true;
    }

    // 8. Short translatable whitelist.
    if TRANSLATABLE_WHITELIST.contains(normalized.trim()) {
        return false;
    }

    // 9. Font names, file extensions, file addresses.
    let trimmed = normalized.trim();
    if FONT_NAMES.contains(trimmed) {
        return true;
    }
    if FILE_EXTENSIONS.contains(trimmed.trim_start_matches('.')) {
        return true;
    }
    if textutil::is_file_address(trimmed) {
        return true;
    }

    // 10. Nothing matched: it's a real message.
    false
}

fn normalize_for_untranslatable_check(text: &str) -> String {
    let s = textutil::unescape_control_chars(text);
    let s = textutil::strip_hex_colors(&s);
    let s = textutil::strip_printf_commands(&s);
    let s = textutil::strip_positional_commands(&s);
    let s = textutil::strip_escaped_unicode(&s);
    let s = s.replace(['\n', '\t'], " ");
    s.trim().to_string()
}

static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\p{L}+").expect("word pattern"));

static SINGLE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<([A-Za-z][A-Za-z0-9]*)>$").expect("single tag pattern"));

fn single_angle_bracket_tag(text: &str) -> Option<String> {
    SINGLE_TAG.captures(text).map(|c| c[1].to_string())
}

fn is_known_html_element(tag: &str) -> bool {
    const KNOWN: &[&str] = &[
        "a", "b", "i", "u", "p", "br", "div", "span", "html", "body", "ul", "ol", "li", "table",
        "tr", "td", "th", "h1", "h2", "h3", "code", "pre", "em", "strong", "xml",
    ];
    KNOWN.contains(&tag.to_ascii_lowercase().as_str())
}

static MARKUP_HINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^<>]+>|&[A-Za-z#][A-Za-z0-9]*;").expect("markup hint pattern"));
static TAG_OR_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^<>]+>|&[A-Za-z#][A-Za-z0-9]*;").expect("tag or entity pattern"));

fn looks_like_markup(text: &str) -> bool {
    MARKUP_HINT.is_match(text)
}

fn strip_markup(text: &str) -> String {
    TAG_OR_ENTITY.replace_all(text, " ").into_owned()
}

static MALFORMED_ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:[A-Za-z]{2,10}|#[0-9]{1,5})[^A-Za-z0-9;]").expect("malformed entity pattern")
});

/// Broken HTML entity reference: `&amp ` (missing the terminating `;`) rather than `&amp;`.
pub fn is_malformed_markup(text: &str) -> bool {
    MALFORMED_ENTITY.is_match(text)
}

/// Any byte `>= 128` in the raw UTF-8 encoding - i.e. any non-ASCII character.
pub fn has_ext_ascii_byte(text: &str) -> bool {
    text.bytes().any(|b| b >= 128)
}

/// URL, email address, or phone-number-shaped substring inside `text`.
static URL_OR_EMAIL_OR_PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[a-z]+://\S+|[a-zA-Z0-9.+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}|\b\d{3}[-.\s]\d{3}[-.\s]\d{4}\b")
        .expect("url/email/phone pattern")
});

pub fn contains_url_email_or_phone(text: &str) -> bool {
    URL_OR_EMAIL_OR_PHONE.is_match(text)
}

/// A single string using `(s)` to paper over plural forms, with no translator context attached.
pub fn is_faux_plural(text: &str, has_context: bool) -> bool {
    !has_context && text.contains("(s)")
}

static MULTI_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"  +").expect("multi space pattern"));
static MULTI_TAB: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\t{3,}").expect("multi tab pattern"));

/// Multiple consecutive spaces, or three-or-more tab characters in a row - a sign that one
/// source string is actually several logical messages spliced together.
pub fn is_multipart(text: &str) -> bool {
    MULTI_SPACE.is_match(text) || MULTI_TAB.is_match(text)
}

static ARTICLE_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(a|an|the)\s+[%{]").expect("article placeholder pattern"));

const BARE_PRONOUNS: &[&str] = &["it", "he", "she", "they", "this", "that"];

/// Article immediately preceding a placeholder (`"the %s"`), or a bare pronoun with nothing
/// else - both break for languages whose grammar doesn't match English's.
pub fn has_article_or_pronoun_issue(text: &str) -> bool {
    if ARTICLE_PLACEHOLDER.is_match(text) {
        return true;
    }
    BARE_PRONOUNS.contains(&text.trim().to_ascii_lowercase().as_str())
}

static LABEL_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[\p{L} ]+:\s*%[a-zA-Z]$").expect("label format pattern"));
static ALL_CAPS_OR_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9\s[:punct:]]+$").expect("all caps pattern"));
static ABBREVIATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{2,5}\b").expect("abbreviation pattern"));

/// The ambiguity heuristic: strings likely to confuse a translator without extra context.
/// Thresholds (3/2/1 commands crossed with lengths 16/10) are empirical and kept exact per the
/// design notes' open question - do not round them.
pub fn needs_translator_context(text: &str, has_context: bool) -> bool {
    if has_context {
        return false;
    }

    let len = text.chars().count();
    if !text.contains(' ') && len >= 32 {
        return true;
    }
    if ALL_CAPS_OR_PUNCT.is_match(text) && text.chars().any(|c| c.is_alphabetic()) {
        return true;
    }

    let command_count = textutil::count_printf_commands(text);
    if !LABEL_FORMAT.is_match(text) {
        if command_count >= 3 {
            return true;
        }
        if command_count >= 2 && len < 16 {
            return true;
        }
        if command_count >= 1 && len < 10 {
            return true;
        }
    }

    if ABBREVIATION.find_iter(text).count() >= 2 {
        return true;
    }

    false
}

/// Leading/trailing whitespace in the literal, or a concatenation-shaped adjacent operator
/// (`+`, `?`, `:`) - a sign the literal is one piece of a larger assembled message.
pub fn is_concatenated(text: &str, usage: &Usage) -> bool {
    let padded = text.starts_with(' ') || text.starts_with('\t') || text.ends_with(' ') || text.ends_with('\t');
    padded || matches!(usage.variable.operator.as_str(), "+" | "?" | ":")
}

/// `==`/`!=` captured as the adjacent operator, or the literal is an argument to a known
/// search/compare function - either way the literal is compared exactly, which breaks once
/// translated.
pub fn is_being_compared(usage: &Usage) -> bool {
    matches!(usage.variable.operator.as_str(), "==" | "!=")
        || (matches!(usage.kind, Some(UsageKind::Function))
            && SEARCH_COMPARE_FUNCTIONS.contains(usage.value.as_str()))
}

/// Ratio check for "excessive non-l10n content": once normalization strips format commands,
/// colors, and escapes, less than a third of the original text remains actual prose.
pub fn has_excessive_non_l10n_content(text: &str) -> bool {
    let raw_len = text.chars().count();
    if raw_len == 0 {
        return false;
    }
    let stripped_len = normalize_for_untranslatable_check(text).chars().count();
    stripped_len * 3 < raw_len
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::VariableInfo;

    fn buckets() -> ResultBuckets {
        ResultBuckets::new()
    }

    #[test]
    fn i18n_call_argument_is_localizable() {
        let config = ClassifierConfig::default();
        let classifier = Classifier::new(&config);
        let mut b = buckets();
        classifier.classify(
            "Hello, world!",
            Usage::function("_"),
            PathBuf::from("a.cpp"),
            Position::new(1, 1),
            &mut b,
        );
        assert_eq!(b.localizable.len(), 1);
    }

    #[test]
    fn context_function_first_argument_is_internal() {
        let config = ClassifierConfig::default();
        let classifier = Classifier::new(&config);
        let mut b = buckets();
        let mut usage = Usage::function("i18nc");
        usage.parameter_position = 0;
        classifier.classify("menu-item", usage, PathBuf::from("a.cpp"), Position::new(1, 1), &mut b);
        assert_eq!(b.internal.len(), 1);
        assert!(b.localizable.is_empty());
    }

    #[test]
    fn context_function_second_argument_is_localizable_with_context() {
        let config = ClassifierConfig::default();
        let classifier = Classifier::new(&config);
        let mut b = buckets();
        let mut usage = Usage::function("i18nc");
        usage.parameter_position = 1;
        classifier.classify("Open", usage, PathBuf::from("a.cpp"), Position::new(1, 1), &mut b);
        assert_eq!(b.localizable.len(), 1);
        assert!(b.localizable[0].usage.has_context);
    }

    #[test]
    fn diagnostic_function_with_untranslatable_argument_is_internal() {
        let config = ClassifierConfig::default();
        let classifier = Classifier::new(&config);
        let mut b = buckets();
        classifier.classify(
            "%d",
            Usage::function("wxASSERT_MSG"),
            PathBuf::from("a.cpp"),
            Position::new(1, 1),
            &mut b,
        );
        assert_eq!(b.internal.len(), 1);
        assert!(b.localizable_in_internal_call.is_empty());
    }

    #[test]
    fn diagnostic_function_with_translatable_argument_is_suspect() {
        let config = ClassifierConfig::default();
        let classifier = Classifier::new(&config);
        let mut b = buckets();
        classifier.classify(
            "Internal failure: %d",
            Usage::function("wxASSERT_MSG"),
            PathBuf::from("a.cpp"),
            Position::new(1, 1),
            &mut b,
        );
        assert_eq!(b.localizable_in_internal_call.len(), 1);
        assert!(b.internal.is_empty());
    }

    #[test]
    fn diagnostic_function_argument_stays_internal_when_suspect_check_is_off() {
        let style = crate::core::style::ReviewStyle::new(
            CheckFlag::ALL.iter().copied().filter(|f| *f != CheckFlag::SuspectL10nStringUsage),
        );
        let config = ClassifierConfig { style, ..ClassifierConfig::default() };
        let classifier = Classifier::new(&config);
        let mut b = buckets();
        classifier.classify(
            "Internal failure: %d",
            Usage::function("wxASSERT_MSG"),
            PathBuf::from("a.cpp"),
            Position::new(1, 1),
            &mut b,
        );
        assert_eq!(b.internal.len(), 1);
        assert!(b.localizable_in_internal_call.is_empty());
    }

    #[test]
    fn ignored_variable_type_is_internal() {
        let config = ClassifierConfig::default();
        let classifier = Classifier::new(&config);
        let mut b = buckets();
        let usage = Usage::variable(VariableInfo {
            name: "pattern".into(),
            ty: "std::regex".into(),
            operator: "=".into(),
        });
        classifier.classify(r"^\d+$", usage, PathBuf::from("a.cpp"), Position::new(1, 1), &mut b);
        assert_eq!(b.internal.len(), 1);
    }

    #[test]
    fn debug_variable_name_pattern_is_internal() {
        let config = ClassifierConfig::default();
        let classifier = Classifier::new(&config);
        let mut b = buckets();
        let usage = Usage::variable(VariableInfo {
            name: "dbgMsg".into(),
            ty: "const char*".into(),
            operator: "=".into(),
        });
        classifier.classify(
            "Internal failure: %d",
            usage,
            PathBuf::from("a.cpp"),
            Position::new(1, 1),
            &mut b,
        );
        assert_eq!(b.internal.len(), 1);
        assert!(b.not_available_for_l10n.is_empty());
    }

    #[test]
    fn snake_case_literal_is_internal_not_unavailable() {
        let config = ClassifierConfig::default();
        let classifier = Classifier::new(&config);
        let mut b = buckets();
        classifier.classify(
            "user_level_permission",
            Usage::orphan(),
            PathBuf::from("a.cpp"),
            Position::new(1, 1),
            &mut b,
        );
        assert_eq!(b.internal.len(), 1);
        assert!(b.not_available_for_l10n.is_empty());
    }

    #[test]
    fn real_message_not_wrapped_is_not_available_for_l10n() {
        let config = ClassifierConfig::default();
        let classifier = Classifier::new(&config);
        let mut b = buckets();
        classifier.classify(
            "Save changes before closing?",
            Usage::function("wxMessageBox"),
            PathBuf::from("a.cpp"),
            Position::new(1, 1),
            &mut b,
        );
        assert_eq!(b.not_available_for_l10n.len(), 1);
    }

    #[test]
    fn exception_ctor_routes_to_internal_by_default() {
        let config = ClassifierConfig::default();
        let classifier = Classifier::new(&config);
        let mut b = buckets();
        classifier.classify(
            "index out of range",
            Usage::function("std::out_of_range"),
            PathBuf::from("a.cpp"),
            Position::new(1, 1),
            &mut b,
        );
        assert_eq!(b.internal.len(), 1);
    }

    #[test]
    fn exception_ctor_routes_to_not_available_when_policy_enabled() {
        let mut config = ClassifierConfig::default();
        config.exceptions_should_be_translatable = true;
        let classifier = Classifier::new(&config);
        let mut b = buckets();
        classifier.classify(
            "index out of range",
            Usage::function("std::out_of_range"),
            PathBuf::from("a.cpp"),
            Position::new(1, 1),
            &mut b,
        );
        assert_eq!(b.not_available_for_l10n.len(), 1);
    }

    #[test]
    fn is_untranslatable_recognizes_long_single_word() {
        assert!(is_untranslatable("abcdefghijklmnopqrstuvwxyz012345", true, 2, false));
    }

    #[test]
    fn is_untranslatable_accepts_real_message() {
        assert!(!is_untranslatable("Save changes before closing?", true, 2, false));
    }

    #[test]
    fn is_untranslatable_rejects_pure_punctuation() {
        assert!(is_untranslatable("...---...", true, 2, false));
    }

    #[test]
    fn is_untranslatable_allows_ellipsis_literal() {
        assert!(!is_untranslatable("...", true, 2, false));
    }

    #[test]
    fn is_untranslatable_allows_digits_with_escaped_percent() {
        assert!(!is_untranslatable("50%%", true, 2, false));
    }

    #[test]
    fn is_untranslatable_respects_word_count_floor() {
        assert!(is_untranslatable("Cancel", true, 2, false));
        assert!(!is_untranslatable("Cancel", true, 1, false));
    }

    #[test]
    fn faux_plural_detection() {
        assert!(is_faux_plural("You have 1 message(s)", false));
        assert!(!is_faux_plural("You have 1 message(s)", true));
    }

    #[test]
    fn multipart_detects_double_spaces() {
        assert!(is_multipart("Save  Cancel"));
        assert!(!is_multipart("Save Cancel"));
    }

    #[test]
    fn article_placeholder_detection() {
        assert!(has_article_or_pronoun_issue("Delete the %s?"));
        assert!(has_article_or_pronoun_issue("This"));
        assert!(!has_article_or_pronoun_issue("Delete item?"));
    }

    #[test]
    fn ambiguity_detects_cryptic_format_strings() {
        assert!(needs_translator_context("%d %d %d", false));
        assert!(!needs_translator_context("%d %d %d", true));
    }

    #[test]
    fn concatenation_detects_padded_literal_and_operator() {
        let mut usage = Usage::orphan();
        assert!(is_concatenated(" padded", &usage));
        usage.variable.operator = "+".into();
        assert!(is_concatenated("unpadded", &usage));
    }

    #[test]
    fn comparison_detects_equality_operator() {
        let mut usage = Usage::orphan();
        usage.variable.operator = "==".into();
        assert!(is_being_compared(&usage));
    }

    #[test]
    fn malformed_entity_detection() {
        assert!(is_malformed_markup("Tom &amp Jerry"));
        assert!(!is_malformed_markup("Tom &amp; Jerry"));
    }

    #[test]
    fn ext_ascii_detection() {
        assert!(has_ext_ascii_byte("caf\u{e9}"));
        assert!(!has_ext_ascii_byte("cafe"));
    }

    #[test]
    fn excessive_non_l10n_content_ratio() {
        assert!(has_excessive_non_l10n_content("%d%d%d%d%d%d abc"));
        assert!(!has_excessive_non_l10n_content("Save changes before closing?"));
    }
}
