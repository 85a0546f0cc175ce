//! Windows `.rc` resource-script harvester: pulls `IDS_xxx "text"`/`IDC_xxx "text"` pairs out of
//! `STRINGTABLE` blocks (and anywhere else they appear - the harvester doesn't track `BEGIN`/`END`
//! nesting, since the pattern is unambiguous on its own). Each string is forwarded as a Function
//! usage named `"RC"`, so it reads as "called from a resource table" the same way the classifier
//! would read a call like `LoadString(IDS_FOO)`.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::Usage;
use crate::resource::{position_at, Harvested};

static ID_STRING_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*(IDS_[A-Za-z0-9_]+|IDC_[A-Za-z0-9_]+)[ \t]+"((?:[^"\\]|\\.)*)"[ \t]*$"#)
        .expect("rc id/string pair pattern")
});

pub fn harvest(text: &str) -> Vec<Harvested> {
    ID_STRING_PAIR
        .captures_iter(text)
        .filter_map(|cap| {
            let whole = cap.get(0)?;
            let value = unescape(&cap[2]);
            if value.is_empty() {
                return None;
            }
            Some(Harvested {
                text: value,
                usage: Usage::function("RC"),
                position: position_at(text, whole.start()),
            })
        })
        .collect()
}

fn unescape(s: &str) -> String {
    s.replace("\\\"", "\"").replace("\\\\", "\\")
}
