//! Text utilities shared by the classifier's heuristics: halfwidth/fullwidth digit conversion,
//! printf-command stripping, file-address detection, and escape unescaping.

use std::sync::LazyLock;

use regex::Regex;

/// Halfwidth CJK form range (U+FF00-U+FFEF covers halfwidth/fullwidth forms; the digits sit at
/// U+FF10-U+FF19).
const FULLWIDTH_DIGIT_START: u32 = 0xFF10;
const HALFWIDTH_DIGIT_START: u32 = 0x0030;

/// Returns `true` if `text` contains any halfwidth-form character (U+FF61-U+FFDC, the halfwidth
/// Katakana/Hangul block) - flagged by the `check_halfwidth` rule since these are usually
/// mistaken fullwidth-expected glyphs.
pub fn contains_halfwidth_form(text: &str) -> bool {
    text.chars().any(|c| {
        let cp = c as u32;
        (0xFF61..=0xFFDC).contains(&cp)
    })
}

/// Converts fullwidth digits (U+FF10-U+FF19) in `text` to their halfwidth ASCII equivalents.
pub fn fullwidth_to_halfwidth_digits(text: &str) -> String {
    text.chars()
        .map(|c| {
            let cp = c as u32;
            if (FULLWIDTH_DIGIT_START..=FULLWIDTH_DIGIT_START + 9).contains(&cp) {
                char::from_u32(HALFWIDTH_DIGIT_START + (cp - FULLWIDTH_DIGIT_START)).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// Converts halfwidth ASCII digits in `text` to their fullwidth form - used when generating
/// pseudo-translated catalogs so digit-heavy strings visibly differ from the source.
pub fn halfwidth_to_fullwidth_digits(text: &str) -> String {
    text.chars()
        .map(|c| {
            let cp = c as u32;
            if (HALFWIDTH_DIGIT_START..=HALFWIDTH_DIGIT_START + 9).contains(&cp) {
                char::from_u32(FULLWIDTH_DIGIT_START + (cp - HALFWIDTH_DIGIT_START)).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

static PRINTF_COMMAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%(\d+\$)?[-+ 0#]*\d*(\.\d+)?(hh|h|ll|l|L|j|z|t)?[diouxXeEfFgGaAcspn%]")
        .expect("printf command pattern")
});

/// Strips printf-style conversion commands (`%d`, `%-5.2f`, `%1$s`, `%%`) from `text`,
/// replacing each with a single space, leaving the surrounding prose intact for further
/// analysis.
pub fn strip_printf_commands(text: &str) -> String {
    PRINTF_COMMAND.replace_all(text, " ").into_owned()
}

/// Counts the printf-style conversion commands in `text` (used by the ambiguity heuristic).
pub fn count_printf_commands(text: &str) -> usize {
    PRINTF_COMMAND.find_iter(text).count()
}

static POSITIONAL_COMMAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\d+(:[^}]*)?\}").expect("positional command pattern"));

/// Strips `.NET`/ICU-style positional format commands (`{0}`, `{1:D2}`) from `text`.
pub fn strip_positional_commands(text: &str) -> String {
    POSITIONAL_COMMAND.replace_all(text, " ").into_owned()
}

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[0-9a-fA-F]{3,8}\b").expect("hex color pattern"));

/// Strips `#RRGGBB`-style hex color codes from `text`.
pub fn strip_hex_colors(text: &str) -> String {
    HEX_COLOR.replace_all(text, " ").into_owned()
}

static ESCAPED_UNICODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\u[0-9a-fA-F]{4}").expect("escaped unicode pattern"));

/// Strips `\uXXXX`-style escaped unicode sequences from `text`.
pub fn strip_escaped_unicode(text: &str) -> String {
    ESCAPED_UNICODE.replace_all(text, " ").into_owned()
}

/// Unescapes the small set of control-character escapes the classifier cares about
/// (`\n`, `\r`, `\t`), replacing each with a literal space so word-boundary heuristics don't
/// trip on escape syntax.
pub fn unescape_control_chars(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some('n') | Some('r') | Some('t') => {
                    chars.next();
                    out.push(' ');
                    continue;
                }
                _ => {}
            }
        }
        out.push(c);
    }
    out
}

static FILE_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([a-z]:\\|\\\\|/|\.{1,2}/)[^\s]*\.[a-zA-Z0-9]{1,7}$")
        .expect("file address pattern")
});

/// Heuristic: does `text` look like a filesystem path (drive letter, UNC share, or relative
/// path ending in a short extension)?
pub fn is_file_address(text: &str) -> bool {
    FILE_ADDRESS.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fullwidth_digits_convert_to_halfwidth() {
        assert_eq!(fullwidth_to_halfwidth_digits("\u{ff11}\u{ff12}\u{ff13}"), "123");
    }

    #[test]
    fn halfwidth_digits_convert_to_fullwidth() {
        assert_eq!(halfwidth_to_fullwidth_digits("123"), "\u{ff11}\u{ff12}\u{ff13}");
    }

    #[test]
    fn strip_printf_commands_removes_conversions() {
        assert_eq!(strip_printf_commands("Found %d items in %s"), "Found   items in  ");
    }

    #[test]
    fn count_printf_commands_counts_conversions() {
        assert_eq!(count_printf_commands("%d of %d (%s)"), 3);
    }

    #[test]
    fn strip_positional_commands_removes_braces() {
        assert_eq!(strip_positional_commands("Hello {0}, you have {1:D2}"), "Hello  , you have  ");
    }

    #[test]
    fn is_file_address_detects_paths() {
        assert!(is_file_address("C:\\Windows\\system.ini"));
        assert!(is_file_address("./config/app.json"));
        assert!(!is_file_address("Hello, world!"));
    }

    #[test]
    fn unescape_control_chars_replaces_with_space() {
        assert_eq!(unescape_control_chars(r"a\nb\tc"), "a b c");
    }
}
