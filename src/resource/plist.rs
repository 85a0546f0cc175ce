//! macOS `.plist` harvester: pulls `<key>…</key><string>…</string>` pairs. The value is forwarded
//! as Orphan usage - a plist entry has no enclosing call or assignment for the backscan resolver
//! to recover, it's just a bare user-facing string.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::Usage;
use crate::resource::{position_at, Harvested};

static KEY_STRING_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<key>[^<]*</key>\s*<string>(.*?)</string>").expect("plist key/string pattern"));

pub fn harvest(text: &str) -> Vec<Harvested> {
    KEY_STRING_PAIR
        .captures_iter(text)
        .filter_map(|cap| {
            let whole = cap.get(0)?;
            let value = unescape_entities(&cap[1]);
            if value.trim().is_empty() {
                return None;
            }
            Some(Harvested {
                text: value,
                usage: Usage::orphan(),
                position: position_at(text, whole.start()),
            })
        })
        .collect()
}

fn unescape_entities(s: &str) -> String {
    s.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn harvests_key_string_pairs() {
        let plist = r#"<?xml version="1.0"?>
<!DOCTYPE plist PUBLIC "-//Apple">
<plist>
<dict>
    <key>CFBundleName</key>
    <string>My App</string>
    <key>NSCameraUsageDescription</key>
    <string>Needed to take photos</string>
</dict>
</plist>"#;
        let found = harvest(plist);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].text, "My App");
        assert_eq!(found[1].text, "Needed to take photos");
    }

    #[test]
    fn unescapes_xml_entities() {
        let plist = "<key>k</key><string>Tom &amp; Jerry</string>";
        let found = harvest(plist);
        assert_eq!(found[0].text, "Tom & Jerry");
    }

    #[test]
    fn skips_empty_string_values() {
        let plist = "<key>k</key><string></string>";
        assert!(harvest(plist).is_empty());
    }

    #[test]
    fn non_key_string_pairs_are_ignored() {
        let plist = "<dict><integer>5</integer></dict>";
        assert!(harvest(plist).is_empty());
    }
}
