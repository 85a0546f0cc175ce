//! Pseudo-translation (C10): rewrites a gettext catalog's `msgstr` values into a fake "translated"
//! form for layout and encoding testing, leaving `msgid`, comments, and everything else in the
//! file untouched. Four independent transformations, always applied in this order: character
//! substitution, width change, bracket-wrapping, then a tracking-id prefix.

use crate::resource::po::{self, parse_entries};

/// Which character-substitution table to use. Each maps plain ASCII letters to visually similar
/// characters from a different script/accent family, so a pseudo-translated string still reads
/// roughly the same while exercising non-ASCII rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Accented Latin letters, e.g. `a` -> `á`, `e` -> `é`.
    Accented,
    /// Wider Latin-1 supplement letters, e.g. `a` -> `ä`, `o` -> `ø`.
    European,
    /// Visually similar Cyrillic letters, e.g. `a` -> `а`, `p` -> `р`.
    Cyrillic,
    /// Visually similar Greek letters, e.g. `a` -> `α`, `p` -> `ρ`.
    Greek,
}

#[derive(Debug, Clone)]
pub struct PseudoOptions {
    pub method: Method,
    pub add_brackets: bool,
    /// Percentage by which to grow (positive) or shrink (negative) the string's length, e.g.
    /// `30` makes the text ~30% longer. Clamped so the result is never shorter than one character.
    pub width_change: i8,
    pub add_tracking_ids: bool,
}

impl Default for PseudoOptions {
    fn default() -> Self {
        Self {
            method: Method::Accented,
            add_brackets: false,
            width_change: 0,
            add_tracking_ids: false,
        }
    }
}

/// Rewrites every `msgstr`/`msgstr[n]` value in `po_text`, returning the transformed catalog.
/// Each block collapses to a single output line; multi-line `msgstr` bodies in the input are
/// rewritten onto one line rather than preserved across several.
pub fn pseudo_translate(po_text: &str, options: &PseudoOptions) -> String {
    let entries = parse_entries(po_text);
    let original_lines: Vec<&str> = po_text.lines().collect();
    let mut rewritten: Vec<String> = original_lines.iter().map(|l| l.to_string()).collect();
    let mut drop_line = vec![false; original_lines.len()];

    let mut counter = 0usize;
    for entry in &entries {
        for block in &entry.msgstr_blocks {
            if block.value.is_empty() {
                continue;
            }
            counter += 1;
            let transformed = transform(&block.value, options, counter);
            rewritten[block.line_range.start] = format!("{} \"{}\"", block.keyword, po::escape(&transformed));
            for idx in block.line_range.start + 1..block.line_range.end {
                drop_line[idx] = true;
            }
        }
    }

    let mut out = String::new();
    for (i, line) in rewritten.into_iter().enumerate() {
        if drop_line[i] {
            continue;
        }
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn transform(value: &str, options: &PseudoOptions, tracking_id: usize) -> String {
    let mut s = substitute(value, options.method);
    s = apply_width_change(&s, options.width_change);
    if options.add_brackets {
        s = format!("[{s}]");
    }
    if options.add_tracking_ids {
        s = format!("{tracking_id:04}|{s}");
    }
    s
}

fn substitute(value: &str, method: Method) -> String {
    value.chars().map(|c| substitute_char(c, method)).collect()
}

fn substitute_char(c: char, method: Method) -> char {
    let lower = c.to_ascii_lowercase();
    if !lower.is_ascii_alphabetic() {
        return c;
    }
    let replacement = match method {
        Method::Accented => accented(lower),
        Method::European => european(lower),
        Method::Cyrillic => cyrillic(lower),
        Method::Greek => greek(lower),
    };
    match replacement {
        // every substitution table maps to a single code point, so `to_uppercase` never needs
        // more than its first item here.
        Some(r) if c.is_ascii_uppercase() => r.to_uppercase().next().unwrap_or(r),
        Some(r) => r,
        None => c,
    }
}

fn accented(lower: char) -> Option<char> {
    Some(match lower {
        'a' => 'á',
        'e' => 'é',
        'i' => 'í',
        'o' => 'ó',
        'u' => 'ú',
        'n' => 'ñ',
        'c' => 'ç',
        'y' => 'ý',
        _ => return None,
    })
}

fn european(lower: char) -> Option<char> {
    Some(match lower {
        'a' => 'ä',
        'e' => 'ë',
        'i' => 'ï',
        'o' => 'ø',
        'u' => 'ü',
        's' => 'ß',
        'd' => 'đ',
        'l' => 'ł',
        _ => return None,
    })
}

fn cyrillic(lower: char) -> Option<char> {
    Some(match lower {
        'a' => 'а',
        'e' => 'е',
        'o' => 'о',
        'p' => 'р',
        'c' => 'с',
        'x' => 'х',
        'y' => 'у',
        'h' => 'н',
        'k' => 'к',
        'm' => 'м',
        't' => 'т',
        'b' => 'в',
        _ => return None,
    })
}

fn greek(lower: char) -> Option<char> {
    Some(match lower {
        'a' => 'α',
        'e' => 'ε',
        'o' => 'ο',
        'p' => 'ρ',
        'n' => 'η',
        'i' => 'ι',
        'k' => 'κ',
        'x' => 'χ',
        'u' => 'υ',
        't' => 'τ',
        _ => return None,
    })
}

/// Grows or shrinks `s` by roughly `pct` percent, repeating characters cyclically to extend and
/// truncating to shrink. Never returns an empty string for non-empty input.
fn apply_width_change(s: &str, pct: i8) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.is_empty() {
        return s.to_string();
    }
    let len = chars.len() as i64;
    let delta = (len * pct as i64) / 100;
    let target = (len + delta).max(1) as usize;
    if target <= chars.len() {
        chars[..target].iter().collect()
    } else {
        (0..target).map(|i| chars[i % chars.len()]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn po(msgstr: &str) -> String {
        format!("msgid \"Open File\"\nmsgstr \"{msgstr}\"\n")
    }

    #[test]
    fn leaves_msgid_and_structure_untouched() {
        let input = po("Abrir archivo");
        let out = pseudo_translate(&input, &PseudoOptions::default());
        assert!(out.contains("msgid \"Open File\""));
    }

    #[test]
    fn accented_method_substitutes_vowels() {
        let out = pseudo_translate(&po("banana"), &PseudoOptions { method: Method::Accented, ..Default::default() });
        assert!(out.contains("bánáná"));
    }

    #[test]
    fn brackets_wrap_the_whole_value() {
        let options = PseudoOptions { add_brackets: true, ..Default::default() };
        let out = pseudo_translate(&po("hello"), &options);
        assert!(out.contains('['));
        assert!(out.contains(']'));
    }

    #[test]
    fn tracking_ids_prefix_each_translated_value() {
        let input = "msgid \"a\"\nmsgstr \"alpha\"\n\nmsgid \"b\"\nmsgstr \"beta\"\n";
        let options = PseudoOptions { add_tracking_ids: true, ..Default::default() };
        let out = pseudo_translate(input, &options);
        assert!(out.contains("0001|"));
        assert!(out.contains("0002|"));
    }

    #[test]
    fn width_change_grows_the_string() {
        let grown = apply_width_change("abcdefghij", 50);
        assert_eq!(grown.chars().count(), 15);
    }

    #[test]
    fn width_change_shrinks_but_never_to_empty() {
        let shrunk = apply_width_change("ab", -90);
        assert_eq!(shrunk.chars().count(), 1);
    }

    #[test]
    fn empty_msgstr_is_left_alone() {
        let input = "msgid \"x\"\nmsgstr \"\"\n";
        let out = pseudo_translate(input, &PseudoOptions::default());
        assert!(out.contains("msgstr \"\""));
    }

    #[test]
    fn plural_blocks_are_each_transformed() {
        let input = "msgid \"file\"\nmsgid_plural \"files\"\nmsgstr[0] \"archivo\"\nmsgstr[1] \"archivos\"\n";
        let out = pseudo_translate(input, &PseudoOptions::default());
        assert!(out.contains("msgstr[0]"));
        assert!(out.contains("msgstr[1]"));
    }
}
