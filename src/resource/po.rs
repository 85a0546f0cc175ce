//! gettext `.po`/`.pot` harvester: pulls `msgid "…"` strings (joining adjacent quoted
//! continuation lines, per the gettext convention of wrapping long strings across several
//! quoted pieces) and forwards each as Orphan usage - a `msgid` is already the user-facing
//! source string, with no call or assignment around it.
//!
//! Also exposes [`parse_entries`], a lower-level parse shared with the pseudo-translation
//! transformer (`crate::pseudo`), which needs each `msgstr`/`msgstr[n]` value's exact line span
//! so it can rewrite just the translation, leaving everything else in the file untouched.

use std::ops::Range;

use crate::core::{Position, Usage};
use crate::resource::Harvested;

/// One `msgstr` or `msgstr[n]` line (plus any quoted continuation lines that follow it).
#[derive(Debug, Clone)]
pub struct MsgstrBlock {
    /// `"msgstr"` or `"msgstr[0]"`, `"msgstr[1]"`, ...
    pub keyword: String,
    pub value: String,
    /// 0-based, end-exclusive range of lines in the source text this block occupies.
    pub line_range: Range<usize>,
}

#[derive(Debug, Clone)]
pub struct PoEntry {
    pub msgid: String,
    pub msgid_line: usize,
    pub msgstr_blocks: Vec<MsgstrBlock>,
}

pub fn harvest(text: &str) -> Vec<Harvested> {
    parse_entries(text)
        .into_iter()
        .filter(|entry| !entry.msgid.is_empty())
        .map(|entry| Harvested {
            text: entry.msgid,
            usage: Usage::orphan(),
            position: Position::new(entry.msgid_line, 1),
        })
        .collect()
}

/// Parses every `msgid`/`msgstr[...]` entry in `text`. Comments, headers, and `msgid_plural`
/// bodies are skipped over (not reported) but don't interrupt parsing of the entries around them.
pub fn parse_entries(text: &str) -> Vec<PoEntry> {
    let lines: Vec<&str> = text.lines().collect();
    let mut entries = Vec::new();
    let mut i = 0usize;

    while i < lines.len() {
        let trimmed = lines[i].trim_start();
        if trimmed.starts_with("msgid ") || trimmed == "msgid" {
            let msgid_line = i + 1;
            let mut msgid = extract_quoted(trimmed.trim_start_matches("msgid").trim_start());
            i += 1;
            i = consume_continuations(&lines, i, &mut msgid);

            // `msgid_plural "..."` bodies belong to this entry but aren't reported themselves.
            if i < lines.len() && lines[i].trim_start().starts_with("msgid_plural") {
                i += 1;
                let mut discard = String::new();
                i = consume_continuations(&lines, i, &mut discard);
            }

            let mut blocks = Vec::new();
            while i < lines.len() {
                let t = lines[i].trim_start();
                if let Some(rest) = t.strip_prefix("msgstr") {
                    let (keyword_suffix, value_part) = split_msgstr_keyword(rest);
                    let block_start = i;
                    let mut value = extract_quoted(value_part);
                    i += 1;
                    i = consume_continuations(&lines, i, &mut value);
                    blocks.push(MsgstrBlock {
                        keyword: format!("msgstr{keyword_suffix}"),
                        value,
                        line_range: block_start..i,
                    });
                } else {
                    break;
                }
            }

            entries.push(PoEntry { msgid, msgid_line, msgstr_blocks: blocks });
        } else {
            i += 1;
        }
    }

    entries
}

fn consume_continuations(lines: &[&str], mut i: usize, value: &mut String) -> usize {
    while i < lines.len() && lines[i].trim_start().starts_with('"') {
        value.push_str(&extract_quoted(lines[i].trim_start()));
        i += 1;
    }
    i
}

/// Splits `"[0] "..."` (what's left of `msgstr` after stripping the keyword) into the `"[0]"`
/// suffix (empty for a plain `msgstr`) and the remaining quoted-value text.
fn split_msgstr_keyword(rest: &str) -> (String, &str) {
    let rest = rest.trim_start();
    if let Some(close) = rest.strip_prefix('[').and_then(|r| r.find(']')) {
        let suffix = format!("[{}]", &rest[1..close + 1].trim_end_matches(']'));
        (suffix, rest[close + 2..].trim_start())
    } else {
        (String::new(), rest)
    }
}

fn extract_quoted(s: &str) -> String {
    let s = s.trim();
    let Some(rest) = s.strip_prefix('"') else {
        return String::new();
    };
    let Some(end) = rest.rfind('"') else {
        return String::new();
    };
    unescape(&rest[..end])
}

fn unescape(s: &str) -> String {
    s.replace("\\n", "\n")
        .replace("\\t", "\t")
        .replace("\\\"", "\"")
        .replace("\\\\", "\\")
}

/// Escapes a value for embedding back into a PO `"..."` literal.
pub fn escape(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\t', "\\t")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn harvests_simple_msgid() {
        let po = "msgid \"Open File\"\nmsgstr \"\"\n";
        let found = harvest(po);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "Open File");
    }

    #[test]
    fn joins_continuation_lines() {
        let po = "msgid \"\"\n\"Hello, \"\n\"world!\"\nmsgstr \"\"\n";
        let found = harvest(po);
        assert_eq!(found[0].text, "Hello, world!");
    }

    #[test]
    fn skips_empty_msgid_header_entry() {
        let po = "msgid \"\"\nmsgstr \"Project-Id-Version: x\\n\"\n\nmsgid \"Save\"\nmsgstr \"Guardar\"\n";
        let found = harvest(po);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "Save");
    }

    #[test]
    fn parse_entries_captures_msgstr_value_and_span() {
        let po = "msgid \"Save\"\nmsgstr \"Guardar\"\n";
        let entries = parse_entries(po);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].msgstr_blocks.len(), 1);
        assert_eq!(entries[0].msgstr_blocks[0].value, "Guardar");
        assert_eq!(entries[0].msgstr_blocks[0].keyword, "msgstr");
    }

    #[test]
    fn parse_entries_handles_plural_msgstr_blocks() {
        let po = "msgid \"file\"\nmsgid_plural \"files\"\nmsgstr[0] \"archivo\"\nmsgstr[1] \"archivos\"\n";
        let entries = parse_entries(po);
        assert_eq!(entries[0].msgstr_blocks.len(), 2);
        assert_eq!(entries[0].msgstr_blocks[0].keyword, "msgstr[0]");
        assert_eq!(entries[0].msgstr_blocks[1].keyword, "msgstr[1]");
    }

    #[test]
    fn escape_round_trips_through_extract_quoted() {
        let original = "quote \" and \\ and newline\nhere";
        let escaped = escape(original);
        assert_eq!(extract_quoted(&format!("\"{escaped}\"")), original);
    }
}
