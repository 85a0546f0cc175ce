//! Resource-file classification and harvesting (C9). Windows `.rc`, macOS `.plist`, and gettext
//! `.po`/`.pot` files don't have C/C++/C# syntax for the C5 scanner to walk, but they carry
//! user-facing strings all the same - these lightweight, line-oriented harvesters pull them out
//! and feed them through the same C3 classifier pipeline as everything the scanner finds.

pub mod plist;
pub mod po;
pub mod rc;

use std::path::Path;

use crate::core::{Position, Usage};

/// What kind of file a path (and, for ambiguous extensions, its content) turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Cpp,
    CSharp,
    ResourceRc,
    ResourcePlist,
    ResourcePo,
    ResourcePot,
    Other,
}

const CPP_EXTENSIONS: &[&str] = &["c", "cc", "cpp", "cxx", "h", "hh", "hpp", "hxx", "m", "mm"];

/// Classifies a file by extension, falling back to a content sniff for `.plist` (only files
/// actually named `Info.plist` or that look like a plist document are treated as one - a
/// same-extension file that doesn't match either is scanned as ordinary source instead).
pub fn classify_file_kind(path: &Path, content: &str) -> FileKind {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_ascii_lowercase());

    match extension.as_deref() {
        Some("rc") => FileKind::ResourceRc,
        Some("po") => FileKind::ResourcePo,
        Some("pot") => FileKind::ResourcePot,
        Some("cs") => FileKind::CSharp,
        Some("plist") => {
            if is_info_plist_name(path) || looks_like_plist(content) {
                FileKind::ResourcePlist
            } else {
                FileKind::Other
            }
        }
        Some(ext) if CPP_EXTENSIONS.contains(&ext) => FileKind::Cpp,
        _ => FileKind::Other,
    }
}

fn is_info_plist_name(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| name.eq_ignore_ascii_case("info.plist"))
}

fn looks_like_plist(content: &str) -> bool {
    content.contains("<!DOCTYPE plist") || content.contains("<plist")
}

/// One string pulled out of a resource file, ready to hand to `Reviewer::classify`.
pub struct Harvested {
    pub text: String,
    pub usage: Usage,
    pub position: Position,
}

/// Converts a byte offset into `text` back into a 1-indexed line/column, for harvesters that
/// locate matches with a regex over the whole file rather than walking char-by-char.
fn position_at(text: &str, byte_offset: usize) -> Position {
    let mut line = 1usize;
    let mut line_start = 0usize;
    for (i, b) in text.as_bytes().iter().enumerate() {
        if i >= byte_offset {
            break;
        }
        if *b == b'\n' {
            line += 1;
            line_start = i + 1;
        }
    }
    Position::new(line, byte_offset - line_start + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn classifies_by_extension() {
        assert_eq!(classify_file_kind(&PathBuf::from("a.rc"), ""), FileKind::ResourceRc);
        assert_eq!(classify_file_kind(&PathBuf::from("a.po"), ""), FileKind::ResourcePo);
        assert_eq!(classify_file_kind(&PathBuf::from("a.pot"), ""), FileKind::ResourcePot);
        assert_eq!(classify_file_kind(&PathBuf::from("a.cs"), ""), FileKind::CSharp);
        assert_eq!(classify_file_kind(&PathBuf::from("a.cpp"), ""), FileKind::Cpp);
        assert_eq!(classify_file_kind(&PathBuf::from("a.txt"), ""), FileKind::Other);
    }

    #[test]
    fn classifies_info_plist_by_name_alone() {
        let kind = classify_file_kind(&PathBuf::from("Info.plist"), "not xml at all");
        assert_eq!(kind, FileKind::ResourcePlist);
    }

    #[test]
    fn classifies_other_plist_by_content_sniff() {
        let xml = "<?xml version=\"1.0\"?>\n<!DOCTYPE plist PUBLIC \"-//Apple\">\n<plist></plist>";
        let kind = classify_file_kind(&PathBuf::from("Localizable.plist"), xml);
        assert_eq!(kind, FileKind::ResourcePlist);
    }

    #[test]
    fn non_plist_looking_dot_plist_file_is_other() {
        let kind = classify_file_kind(&PathBuf::from("notes.plist"), "just some text");
        assert_eq!(kind, FileKind::Other);
    }

    #[test]
    fn position_at_finds_second_line() {
        let text = "first\nsecond line\nthird";
        let offset = text.find("second").unwrap();
        let pos = position_at(text, offset);
        assert_eq!(pos.line, 2);
        assert_eq!(pos.column, 1);
    }
}
