//! Curated rule sets used by the classifier: function-name sets, variable-type sets, and the
//! large "untranslatable" regex list.
//!
//! These are read-only after first use and shared by reference across scanner instances (see
//! the concurrency model in the design doc) - built once behind `LazyLock` rather than per file,
//! since `regex::Regex` construction is comparatively expensive.
//!
//! The untranslatable regex list intentionally stays a plain `Vec<Regex>` tested linearly rather
//! than fused into one alternation: a single match tells you *which* rule fired, which matters
//! for diagnostic quality, and a fused alternation throws that away.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Functions whose string argument is collected for translation.
pub static I18N_FUNCTIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "_",
        "gettext",
        "ngettext",
        "pgettext",
        "npgettext",
        "translate",
        "QApplication::translate",
        "tr",
        "trUtf8",
        "QT_TR_NOOP",
        "QT_TRANSLATE_NOOP",
        "QT_TRID_NOOP",
        "qtTrId",
        "i18n",
        "i18nc",
        "i18np",
        "i18ncp",
        "ki18n",
        "ki18nc",
        "ki18np",
        "ki18ncp",
        "wxGetTranslation",
        "wxGETTEXT_IN_CONTEXT",
        "wxTRANSLATE",
        "_N",
        "_n",
        "L10N",
    ]
    .into_iter()
    .collect()
});

/// i18n functions that take an explicit context/disambiguator argument, where the *first*
/// argument is the context (routed to `internal`) and the *message* argument is the text to
/// translate.
pub static I18N_CONTEXT_FUNCTIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "translate",
        "QApplication::translate",
        "i18nc",
        "ki18nc",
        "i18ncp",
        "ki18ncp",
        "wxGETTEXT_IN_CONTEXT",
        "pgettext",
        "npgettext",
    ]
    .into_iter()
    .collect()
});

/// `QT_TRID_*`/`qtTrId`-style functions that expect a short translation *ID*, not a full
/// message - long arguments to these are suspect.
pub static I18N_ID_ONLY_FUNCTIONS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ["QT_TRID_NOOP", "qtTrId"].into_iter().collect());

/// Diagnostic/internal functions: asserts, debug printfs, registry/system APIs, test macros.
/// Strings passed to these are implementation detail, never user-facing.
pub static DIAGNOSTIC_FUNCTIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "assert",
        "wxASSERT",
        "wxASSERT_MSG",
        "wxFAIL_MSG",
        "static_assert",
        "ATLASSERT",
        "_ASSERT",
        "_ASSERTE",
        "NSAssert",
        "printf",
        "fprintf",
        "sprintf",
        "wxLogDebug",
        "wxLogTrace",
        "wxLogError",
        "wxLogWarning",
        "wxLogMessage",
        "wxLogStatus",
        "wxLogVerbose",
        "OutputDebugString",
        "OutputDebugStringA",
        "OutputDebugStringW",
        "RegOpenKeyEx",
        "RegSetValueEx",
        "RegQueryValueEx",
        "CreateFile",
        "CFSTR",
        "SetWindowText",
        "GetModuleHandle",
        "dlopen",
        "dlsym",
        "TRACE",
        "ATLTRACE",
        "LOG",
        "LOG_IF",
        "CHECK",
        "DCHECK",
        "QVERIFY",
        "QCOMPARE",
        "EXPECT_EQ",
        "EXPECT_TRUE",
        "ASSERT_EQ",
        "ASSERT_TRUE",
        "TEST",
        "TEST_F",
    ]
    .into_iter()
    .collect()
});

/// `*_DEBUG`/`*_TRACE` suffix also routes to internal even when not in [`DIAGNOSTIC_FUNCTIONS`].
pub fn has_diagnostic_suffix(function_name: &str) -> bool {
    function_name.ends_with("_DEBUG")
        || function_name.ends_with("_TRACE")
        || function_name.ends_with("Debug")
        || function_name.ends_with("Trace")
}

/// Functions that log messages - routed to `internal` unless `log_messages_can_be_translatable`
/// is enabled.
pub static LOG_FUNCTIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    ["log", "Log", "LogMessage", "syslog", "wxLogGeneric", "spdlog", "qDebug", "qWarning", "qCritical"]
        .into_iter()
        .collect()
});

/// Functions explicitly marking a string as "known, not for localization"
/// (`gettext_noop`-family): routed straight to `marked-as-non-localizable`.
pub static NON_I18N_EXPLICIT_FUNCTIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    ["_DT", "gettext_noop", "N_", "NOOP", "wxTRANSLATE_NOOP"]
        .into_iter()
        .collect()
});

/// Control-flow keywords recognized by the backscan resolver as a (non-)function name.
pub static KEYWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "if", "else", "while", "for", "switch", "case", "return", "new", "delete", "throw",
        "goto", "catch", "do",
    ]
    .into_iter()
    .collect()
});

/// String-wrapper CTORs that are transparent to the backscan resolver: `wxT("x")`,
/// `std::string("x")`, etc. - the walker continues past these looking for the *real* enclosing
/// call or assignment.
pub static TRANSPARENT_CTORS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "std::string",
        "std::wstring",
        "wxT",
        "wxS",
        "_T",
        "TEXT",
        "QString",
        "QStringLiteral",
        "QLatin1String",
        "CFSTR",
        "L",
        "make_shared",
        "std::make_shared",
        "shared_ptr",
        "std::shared_ptr",
    ]
    .into_iter()
    .collect()
});

/// CTORs in [`TRANSPARENT_CTORS`] that are themselves deprecated APIs - seeing one sets
/// `deprecated_macro_seen` during backscan.
pub static DEPRECATED_CTORS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ["_T", "TEXT"].into_iter().collect());

/// Variable types whose string content is never user-facing (regex objects, file streams,
/// color/font objects, renderer types, ...).
pub static IGNORED_VARIABLE_TYPES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "std::regex",
        "wxRegEx",
        "QRegExp",
        "QRegularExpression",
        "std::ifstream",
        "std::ofstream",
        "std::fstream",
        "wxColour",
        "QColor",
        "wxFont",
        "QFont",
        "wxDC",
        "wxGraphicsContext",
        "wxBitmap",
        "QPixmap",
        "wxImage",
    ]
    .into_iter()
    .collect()
});

/// Regexes against a variable *name* that mark it as internal regardless of its declared type
/// (debug buffers, stack traces, XPM data, SQL statements, log sinks, ...).
pub static INTERNAL_VARIABLE_NAME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)^dbg.*",
        r"(?i)^debug.*",
        r"(?i).*stack[_]?trace.*",
        r"(?i)^xpm.*",
        r"(?i).*_?xpm$",
        r"(?i)^sql.*",
        r"(?i).*_?sql$",
        r"(?i)^log.*",
        r"(?i).*console$",
        r"(?i)^stmt.*",
        r"(?i)^query.*",
    ]
    .into_iter()
    .map(|p| Regex::new(p).expect("internal variable name pattern"))
    .collect()
});

/// Search/comparison functions: a literal passed as an argument here is being matched against
/// exactly, which is usually a bug if the literal is also marked for translation.
pub static SEARCH_COMPARE_FUNCTIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    ["strcmp", "wcscmp", "_stricmp", "strcmpi", "strcasecmp", "QString::compare", "compare", "Cmp", "find"]
        .into_iter()
        .collect()
});

/// Exception types (`std::runtime_error`, ...) whose CTOR argument is policy-gated between
/// `internal` and `not-available-for-l10n` via `exceptions_should_be_translatable`.
pub static EXCEPTION_TYPES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "std::runtime_error",
        "std::logic_error",
        "std::invalid_argument",
        "std::domain_error",
        "std::length_error",
        "std::out_of_range",
        "std::range_error",
        "std::overflow_error",
        "std::underflow_error",
        "std::exception",
    ]
    .into_iter()
    .collect()
});

/// Deprecated API -> suggested replacement, swept over the whole buffer in the aggregate review
/// pass (§4.4 "Deprecated-API pass").
pub static DEPRECATED_MACROS: LazyLock<Vec<(&'static str, &'static str)>> = LazyLock::new(|| {
    vec![
        ("_T", "use a plain UTF-8 string literal"),
        ("TEXT", "use a plain UTF-8 string literal"),
        ("AfxMessageBox", "CWnd::MessageBox"),
        ("wxGetTranslation", "wxGETTEXT_IN_CONTEXT or _()"),
        ("ATLTRACE", "a structured logging call"),
        ("ASSERT", "a typed assertion macro"),
        ("wxFileName::GetCwd", "std::filesystem::current_path"),
    ]
});

/// Debug-only `#ifdef`/`#if` patterns: regions guarded by these are dead in release builds and
/// their literals are erased rather than scanned.
pub static DEBUG_ONLY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"^_*DEBUG_*$", r"^DEBUG_LEVEL$", r"^0$"]
        .into_iter()
        .map(|p| Regex::new(p).expect("debug-only pattern"))
        .collect()
});

/// Release-only `#ifndef` patterns (`NDEBUG`, `RELEASE`): the region between the matching
/// `#ifndef`/`#endif` is erased the same way, since it represents debug-only code reachable only
/// when `NDEBUG` is undefined.
pub static RELEASE_ONLY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"^NDEBUG$", r"^_*RELEASE_*$"]
        .into_iter()
        .map(|p| Regex::new(p).expect("release-only pattern"))
        .collect()
});

/// Strings that look untranslatable by the generic rules below but are known real messages.
pub static TRANSLATABLE_EXCEPTIONS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"^Q[0-9](F|A)Y.*$"]
        .into_iter()
        .map(|p| Regex::new(p).expect("translatable exception pattern"))
        .collect()
});

/// Short, specific translatable whitelist (step 8 of `is_untranslatable`).
pub static TRANSLATABLE_WHITELIST: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ["N/A", "O&K", "O&n"].into_iter().collect());

/// Known font family names (step 9 of `is_untranslatable`).
pub static FONT_NAMES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "Arial",
        "Helvetica",
        "Times New Roman",
        "Courier New",
        "Verdana",
        "Tahoma",
        "Calibri",
        "Georgia",
        "Consolas",
        "Segoe UI",
        "Menlo",
        "Monaco",
        "Courier",
    ]
    .into_iter()
    .collect()
});

/// Known file extensions (without the dot), used by the untranslatable heuristic and by the
/// file-address check.
pub static FILE_EXTENSIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "txt", "log", "ini", "cfg", "conf", "json", "xml", "yaml", "yml", "csv", "dat", "bin",
        "exe", "dll", "so", "dylib", "png", "jpg", "jpeg", "gif", "bmp", "ico", "svg", "ttf",
        "otf", "woff", "woff2", "html", "htm", "css", "js", "ts", "cpp", "cxx", "cc", "h", "hpp",
        "cs", "py", "rs", "po", "pot", "mo", "rc", "plist", "db", "sqlite",
    ]
    .into_iter()
    .collect()
});

/// The ~60 "this is not a user-facing message" patterns (file paths, CSS/JS fragments, SQL,
/// registry keys, GUIDs, MIME types, URLs/emails, PostScript, XML fragments, CLI flags, encoding
/// names, OS names, hashtags, keyboard shortcuts, camel/Pascal/snake identifiers,
/// function-signature calls, version tags, placeholder runs like "XXXX", ...). A representative,
/// curated subset of the original's regex list (see `i18n_review.cpp`), grouped by family.
pub static UNTRANSLATABLE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // digits/space/punctuation/control only
        r"^[\d\s[:punct:]]+$",
        // SQL
        r"(?i)^(INSERT INTO|DELETE (\*\s)?FROM).*$",
        r"(?i)^ORDER BY .*$",
        r"(?i)^SELECT\s+(COUNT|MIN|MAX|SUM|AVG|DISTINCT)\(.*$",
        r"^DSN=.*$",
        // qualified identifiers / function signatures
        r"^[A-Za-z0-9_]+::[A-Za-z0-9_]+(::[A-Za-z0-9_]+)?$",
        r"^[A-Za-z0-9_]{3,}\(\)$",
        r"^[A-Za-z0-9_]{3,}::[A-Za-z0-9_]{3,}\(\)$",
        // printf/cpp/qt format hints
        r"(?i)^(possible-)?(c|cpp|kde|qt)-(plural-)?format$",
        // HTML/XML
        r"^<!DOCTYPE html.*$",
        r"^&#?x?[A-Za-z0-9]+;$",
        r"(?i)^<a href=.*$",
        r"^<!--.*$",
        r"(?i)^<\??xml[ a-zA-Z0-9=\x22'%.\-]*\??>.*$",
        r"^<[A-Za-z]+([A-Za-z0-9_/\\.'\x22=;:#\s-])+>?$",
        r"^\s*xmlns(:[[:alnum:]]+)?=.*$",
        // CSS/JS fragments
        r"(?i)^a:(hover|link)$",
        r"(?i)^(width|height)\s*:\s*%?[a-z]{2,4};$",
        r"^[a-z][a-z0-9_]*-[a-z0-9_]+(-[a-z0-9_]+)*$",
        r"^class\s*=\s*['\x22][A-Za-z0-9\- _]*['\x22]$",
        // file paths / extensions
        r"^([A-Z]+|[bB]itmap)\s\(\*\.[A-Za-z0-9]{1,7}\)$",
        r"^(\*\.[A-Za-z0-9]{1,7};?\s*)+$",
        // command line flags
        r"^--[a-z0-9]+([-=][a-z0-9]+)*$",
        r"^-[A-Z_]{2,}[ =].*$",
        r"^--?[a-z]{2,}[ :].*$",
        // registry keys
        r"(?i)^SOFTWARE\\{1,2}(Policies|Microsoft|Classes).*$",
        r"(?i)^SYSTEM\\{1,2}CurrentControlSet.*$",
        r"^HKEY_.*$",
        // URLs / content headers / MIME
        r"(?i)^[a-z]+://\S+$",
        r"(?i)^[a-zA-Z0-9.+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$",
        r"(?i)^content-type:\s*[a-zA-Z]{3,}/.*$",
        r"(?i)^content-disposition:\s*[a-zA-Z-]{3,};.*$",
        r"(?i)^charset\s*=.*$",
        // GUID
        r"(?i)^\{?[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}\}?$",
        // version tags, encoding/OS names
        r"^[a-zA-Z-]+\sv(ersion)?\s?[0-9.]+$",
        r"(?i)^(utf-8|utf-16|iso-8859-1|windows-1252|ascii|us-ascii)$",
        r"(?i)^(windows|linux|macos|freebsd|android|ios)\s?[0-9.]*$",
        // hashtags / keyboard shortcuts
        r"^#[a-zA-Z0-9_-]{3,}$",
        r"^(Ctrl|Alt|Shift|Cmd)\+[A-Za-z0-9]+$",
        // camelCase / PascalCase / snake_case identifiers
        r"^[[:punct:]]*[A-Z]+[a-z0-9]+([A-Z]+[a-z0-9]+)+[[:punct:]]*$",
        r"^[[:punct:]]*[a-z]+[0-9]*([A-Z]+[a-z0-9]*)+[[:punct:]]*$",
        r"^[_]*[a-z0-9]+(_[a-z0-9]+)+[_]*$",
        r"^[_]*[A-Z0-9]+(_[A-Z0-9]+)+[_]*$",
        // character-class placeholders
        r"^[Xx]{3,}$",
        // pure punctuation runs (e.g. "...", "---")
        r"^[[:punct:]]{2,}$",
    ]
    .into_iter()
    .map(|p| Regex::new(p).expect("untranslatable pattern"))
    .collect()
});

/// Substrings that indicate an application entry point / GUI app object construction - used by
/// the framework-init cross-check (§4.4): if a tree has one of these but none of
/// [`LOCALE_INIT_FINGERPRINTS`], that's a suspicious sign the app never initializes its locale.
pub const APP_INIT_FINGERPRINTS: &[&str] = &[
    "wxApp::OnInit",
    "QApplication app(",
    "QApplication a(",
    "int main(",
    "WinMain(",
    "IMPLEMENT_APP(",
];

/// Substrings showing a locale/translation runtime was initialized.
pub const LOCALE_INIT_FINGERPRINTS: &[&str] = &[
    "wxLocale",
    "QLocale",
    "QTranslator",
    "setlocale(",
    "std::locale::global",
    "bindtextdomain(",
    "i18n_init",
];

/// The `PRI*`-family integer-format macros recognized between adjacent string-literal pieces
/// during multi-piece joining (§4.1). Built as an exact set, not a permissive regex, so a
/// near-miss like `PRIu46` is correctly rejected rather than accidentally matched.
pub static PRINTF_INT_MACROS: LazyLock<HashSet<String>> = LazyLock::new(|| {
    let mut set = HashSet::new();
    for conv in ["d", "i", "o", "u", "x", "X"] {
        for width in ["8", "16", "32", "64"] {
            set.insert(format!("PRI{conv}{width}"));
            set.insert(format!("PRI{conv}FAST{width}"));
            set.insert(format!("PRI{conv}LEAST{width}"));
        }
        set.insert(format!("PRI{conv}MAX"));
        set.insert(format!("PRI{conv}PTR"));
    }
    set
});

/// Returns `true` if `text` matches any of the curated untranslatable regex patterns.
///
/// Deliberately linear (not a fused alternation) so a future caller could report *which* rule
/// matched; see the design notes on diagnostic quality.
pub fn matches_untranslatable_pattern(text: &str) -> bool {
    UNTRANSLATABLE_PATTERNS.iter().any(|re| re.is_match(text))
}
