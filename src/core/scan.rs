//! Scanner state machine (C5): walks a decoded source buffer once, left to right, handling
//! comments, preprocessor regions, inline assembly, and string literals, dispatching every
//! literal it finds to the backscan resolver (C4) and then the classifier (C3).
//!
//! Destructive by design: the scanner works on an owned `Vec<char>` copy of the input, and
//! overwrites every region it has already handled with spaces (preserving newlines) so that
//! whole-buffer passes downstream don't re-trip on text already accounted for. The caller's
//! original text is never touched.

use std::path::Path;

use crate::core::backscan::resolve_usage;
use crate::core::classify::{Classifier, ClassifierConfig};
use crate::core::model::{Position, ResultBuckets, StringEntry, Usage, VariableInfo};
use crate::core::rulesets::{DEBUG_ONLY_PATTERNS, PRINTF_INT_MACROS, RELEASE_ONLY_PATTERNS};
use crate::core::style::CheckFlag;

/// What the end-of-scan framework-init fingerprint probe found in one file; folded into the
/// session-wide totals the aggregate review pipeline (C6) consults.
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub app_init_seen: bool,
    pub locale_init_seen: bool,
    /// The working buffer after every comment/preprocessor/asm/quote region has been overwritten
    /// with spaces - what `core::review`'s whole-buffer sweeps (ID-assignment, deprecated-API,
    /// suspect-usage) scan instead of the caller's original text.
    pub erased_text: String,
}

/// The one-bit-of-state-per-concern carried across tokens during a single file's scan: whether a
/// translator-context comment applies to the next i18n call, and whether we're inside a
/// `quneiform-suppress-begin`/`-end` region (which silences every emission, not just comments).
#[derive(Debug, Clone, Copy, Default)]
struct ScanState {
    context_comment_active: bool,
    suppressed: bool,
}

pub struct Scanner<'a> {
    classifier: Classifier<'a>,
    max_line_width: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(config: &'a ClassifierConfig, max_line_width: usize) -> Self {
        Self {
            classifier: Classifier::new(config),
            max_line_width,
        }
    }

    fn style(&self) -> &crate::core::style::ReviewStyle {
        &self.classifier.config.style
    }

    /// Scans `text` (already decoded) once, filing every literal it finds into `buckets`.
    /// Returns the framework-init fingerprint probe result for this file.
    pub fn scan(&self, text: &str, path: &Path, buckets: &mut ResultBuckets) -> ScanOutcome {
        let original: Vec<char> = text.chars().collect();
        let mut buf = original.clone();
        let line_starts = compute_line_starts(&original);
        let len = buf.len();

        let mut i = 0usize;
        let mut state = ScanState::default();

        while i < len {
            let c = buf[i];

            if c == '/' && i + 1 < len && buf[i + 1] == '/' {
                i = self.handle_line_comment(&mut buf, i, &line_starts, path, &mut state, buckets);
                continue;
            }
            if c == '/' && i + 1 < len && buf[i + 1] == '*' {
                match self.handle_block_comment(&mut buf, i, &line_starts, path, &mut state, buckets) {
                    Some(end) => {
                        i = end;
                        continue;
                    }
                    None => break, // unterminated block comment: unrecoverable, stop scanning.
                }
            }
            if c == '#' && is_line_leading_hash(&buf, i) {
                i = self.handle_preprocessor_directive(&mut buf, i, &line_starts, path, state.suppressed, buckets);
                continue;
            }
            if is_asm_keyword_at(&buf, i) {
                i = self.handle_inline_asm(&mut buf, i);
                continue;
            }
            if c == '\'' {
                i = skip_char_literal(&buf, i);
                continue;
            }
            if c == '"' && !preceded_by_odd_backslashes(&buf, i) {
                i = self.handle_string_literal(&mut buf, i, &line_starts, path, &mut state, buckets);
                continue;
            }
            if c == '\t' && !state.suppressed && self.style().is_enabled(CheckFlag::Tabs) {
                let pos = position_at(&line_starts, i);
                buckets
                    .tabs
                    .push(StringEntry::new("\t", Usage::orphan(), path.to_path_buf(), pos));
                i += 1;
                continue;
            }
            if c == '\n' {
                if !state.suppressed {
                    self.handle_end_of_line(&original, i, &line_starts, path, buckets);
                }
                i += 1;
                continue;
            }
            i += 1;
        }

        let mut outcome = self.probe_framework_init(&original);
        outcome.erased_text = buf.iter().collect();
        outcome
    }

    fn probe_framework_init(&self, original: &[char]) -> ScanOutcome {
        let text: String = original.iter().collect();
        let app_init_seen = crate::core::rulesets::APP_INIT_FINGERPRINTS
            .iter()
            .any(|needle| text.contains(needle));
        let locale_init_seen = crate::core::rulesets::LOCALE_INIT_FINGERPRINTS
            .iter()
            .any(|needle| text.contains(needle));
        ScanOutcome { app_init_seen, locale_init_seen }
    }

    fn handle_line_comment(
        &self,
        buf: &mut [char],
        start: usize,
        line_starts: &[usize],
        path: &Path,
        state: &mut ScanState,
        buckets: &mut ResultBuckets,
    ) -> usize {
        let end = buf[start..]
            .iter()
            .position(|&c| c == '\n')
            .map(|p| start + p)
            .unwrap_or(buf.len());
        let body: String = buf[start + 2..end].iter().collect();
        self.inspect_comment_body(&body, start, line_starts, path, state, buckets);
        erase_range(buf, start, end);
        end
    }

    fn handle_block_comment(
        &self,
        buf: &mut [char],
        start: usize,
        line_starts: &[usize],
        path: &Path,
        state: &mut ScanState,
        buckets: &mut ResultBuckets,
    ) -> Option<usize> {
        let close_rel = find_subsequence(&buf[start + 2..], &['*', '/'])?;
        let close = start + 2 + close_rel;
        let body: String = buf[start + 2..close].iter().collect();
        self.inspect_comment_body(&body, start, line_starts, path, state, buckets);
        let end = close + 2;
        erase_range(buf, start, end);
        Some(end)
    }

    fn inspect_comment_body(
        &self,
        body: &str,
        start: usize,
        line_starts: &[usize],
        path: &Path,
        state: &mut ScanState,
        buckets: &mut ResultBuckets,
    ) {
        let trimmed = body.trim_start();

        if trimmed.contains("quneiform-suppress-begin") {
            state.suppressed = true;
            state.context_comment_active = false;
            return;
        }
        if trimmed.contains("quneiform-suppress-end") {
            state.suppressed = false;
            return;
        }
        if state.suppressed {
            return;
        }

        let upper_prefix_is_translators = trimmed.to_uppercase().starts_with("TRANSLATORS:");
        let is_qt_context_comment = trimmed.starts_with(':');

        if upper_prefix_is_translators || is_qt_context_comment {
            state.context_comment_active = true;
        } else if !trimmed.is_empty() {
            // Any other non-empty comment, once it is *not* a continuation `//` line, clears the
            // flag. Consecutive `//` comments are handled by the caller re-entering this
            // function without an intervening non-comment token, so the flag naturally survives
            // runs of translator-comment lines.
        }

        if self.style().is_enabled(CheckFlag::SpaceAfterComment) {
            if let Some(first) = trimmed.chars().next() {
                if first.is_alphanumeric() {
                    let pos = position_at(line_starts, start);
                    buckets.comments_missing_space.push(
                        StringEntry::new(body.to_string(), Usage::orphan(), path.to_path_buf(), pos)
                            .with_note("no space after comment marker"),
                    );
                }
            }
        }
    }

    fn handle_preprocessor_directive(
        &self,
        buf: &mut [char],
        start: usize,
        line_starts: &[usize],
        path: &Path,
        suppressed: bool,
        buckets: &mut ResultBuckets,
    ) -> usize {
        let line_end = consume_logical_line(buf, start);
        let directive_text: String = buf[start..line_end].iter().collect();
        let keyword = directive_keyword(&directive_text);

        match keyword.as_deref() {
            Some("define") => {
                self.handle_define_directive(buf, start, line_end, &directive_text, line_starts, path, suppressed, buckets)
            }
            Some("ifdef") | Some("ifndef") | Some("if") => {
                let condition = directive_condition(&directive_text, keyword.as_deref().unwrap());
                let is_ifndef = keyword.as_deref() == Some("ifndef");
                let matches_debug = DEBUG_ONLY_PATTERNS.iter().any(|re| re.is_match(&condition));
                let matches_release = RELEASE_ONLY_PATTERNS.iter().any(|re| re.is_match(&condition));
                let erase_body = (!is_ifndef && matches_debug) || (is_ifndef && matches_release);
                erase_range(buf, start, line_end);
                if erase_body {
                    let body_end = find_matching_conditional_end(buf, line_end);
                    erase_range(buf, line_end, body_end);
                    body_end
                } else {
                    line_end
                }
            }
            _ => {
                erase_range(buf, start, line_end);
                line_end
            }
        }
    }

    fn handle_define_directive(
        &self,
        buf: &mut [char],
        start: usize,
        line_end: usize,
        directive_text: &str,
        line_starts: &[usize],
        path: &Path,
        suppressed: bool,
        buckets: &mut ResultBuckets,
    ) -> usize {
        // Erase just the "#define" keyword token; the macro name and value tail stay visible so
        // the aggregate ID-assignment pass can still find e.g. `IDC_FOO 32784`.
        let keyword_end = start + directive_text.find("define").map(|p| p + 6).unwrap_or(1);
        erase_range(buf, start, keyword_end);

        let Some((name, value_start)) = parse_define_name(buf, keyword_end, line_end) else {
            return line_end;
        };

        if value_start < line_end && buf[value_start] == '(' {
            // Function-like macro: no simple assignment target to forward.
            return line_end;
        }

        if value_start < line_end && buf[value_start] == '"' {
            let pos = position_at(line_starts, value_start);
            let (text, end) = self.read_quoted_literal(buf, value_start);
            if !suppressed {
                let usage = Usage::variable(VariableInfo {
                    name,
                    ty: String::new(),
                    operator: "=".into(),
                });
                self.classifier.classify(&text, usage, path.to_path_buf(), pos, buckets);
            }
            erase_range(buf, value_start, end);
            return line_end.max(end);
        }

        line_end
    }

    fn handle_inline_asm(&self, buf: &mut [char], start: usize) -> usize {
        let mut i = consume_identifier_forward(buf, start);
        i = skip_ws_forward(buf, i);
        if matches_word_at(buf, i, "volatile") {
            i = skip_ws_forward(buf, i + "volatile".len());
        } else if matches_word_at(buf, i, "__volatile__") {
            i = skip_ws_forward(buf, i + "__volatile__".len());
        }
        let end = if i < buf.len() && (buf[i] == '(' || buf[i] == '{') {
            let (open, close) = (buf[i], if buf[i] == '(' { ')' } else { '}' });
            skip_balanced_forward(buf, open, close, i).unwrap_or(buf.len())
        } else {
            buf[i..].iter().position(|&c| c == '\n').map(|p| i + p).unwrap_or(buf.len())
        };
        erase_range(buf, start, end);
        end
    }

    /// Reads a (possibly prefixed/raw/triple-quoted) string literal piece starting at the quote
    /// character `quote_idx`, returning its decoded content and the index just past the closing
    /// quote. Does not erase or join multi-piece literals - see `handle_string_literal` for that.
    fn read_quoted_literal(&self, buf: &[char], quote_idx: usize) -> (String, usize) {
        if buf[quote_idx..].starts_with(&['"', '"', '"']) {
            if let Some(close_rel) = find_subsequence(&buf[quote_idx + 3..], &['"', '"', '"']) {
                let close = quote_idx + 3 + close_rel;
                let text: String = buf[quote_idx + 3..close].iter().collect();
                return (text, close + 3);
            }
            return (String::new(), buf.len());
        }

        let mut j = quote_idx + 1;
        let mut text = String::new();
        while j < buf.len() {
            match buf[j] {
                '\\' if j + 1 < buf.len() => {
                    text.push(buf[j]);
                    text.push(buf[j + 1]);
                    j += 2;
                }
                '"' => {
                    j += 1;
                    break;
                }
                c => {
                    text.push(c);
                    j += 1;
                }
            }
        }
        (text, j)
    }

    fn handle_string_literal(
        &self,
        buf: &mut [char],
        quote_idx: usize,
        line_starts: &[usize],
        path: &Path,
        state: &mut ScanState,
        buckets: &mut ResultBuckets,
    ) -> usize {
        let (literal_start, is_raw) = locate_literal_start_and_rawness(buf, quote_idx);

        let (mut text, mut end) = if is_raw {
            self.read_raw_literal(buf, quote_idx)
        } else {
            self.read_quoted_literal(buf, quote_idx)
        };

        // Multi-piece joining: keep absorbing adjacent quoted pieces separated only by
        // whitespace, comments, PRI*-macros, or backslash-newline continuations.
        loop {
            let Some(next_quote) = skip_joinable_gap(buf, end) else { break };
            let is_raw_piece = locate_literal_start_and_rawness(buf, next_quote).1;
            let (piece_text, piece_end) = if is_raw_piece {
                self.read_raw_literal(buf, next_quote)
            } else {
                self.read_quoted_literal(buf, next_quote)
            };
            text.push_str(&piece_text);
            end = piece_end;
        }

        if !state.suppressed {
            let mut usage = resolve_usage(buf, literal_start);
            if state.context_comment_active {
                usage.has_context = true;
            }
            let pos = position_at(line_starts, literal_start);
            self.classifier.classify(&text, usage, path.to_path_buf(), pos, buckets);
        }
        state.context_comment_active = false;

        erase_range(buf, literal_start, end);
        end
    }

    fn read_raw_literal(&self, buf: &[char], quote_idx: usize) -> (String, usize) {
        // `R"delim(...)delim"` - read the delimiter up to '(', then scan for ")delim\"".
        let mut j = quote_idx + 1;
        let delim_start = j;
        while j < buf.len() && buf[j] != '(' {
            j += 1;
        }
        if j >= buf.len() {
            return (String::new(), buf.len());
        }
        let delimiter: Vec<char> = buf[delim_start..j].to_vec();
        let content_start = j + 1;

        let mut closer = vec![')'];
        closer.extend_from_slice(&delimiter);
        closer.push('"');

        match find_subsequence(&buf[content_start..], &closer) {
            Some(rel) => {
                let content_end = content_start + rel;
                let text: String = buf[content_start..content_end].iter().collect();
                (text, content_end + closer.len())
            }
            None => (String::new(), buf.len()),
        }
    }

    fn handle_end_of_line(
        &self,
        original: &[char],
        newline_idx: usize,
        line_starts: &[usize],
        path: &Path,
        buckets: &mut ResultBuckets,
    ) {
        let line_start = line_starts
            .iter()
            .rev()
            .find(|&&s| s <= newline_idx)
            .copied()
            .unwrap_or(0);
        let line: &[char] = &original[line_start..newline_idx];
        let line_len = line.len();

        if self.style().is_enabled(CheckFlag::TrailingSpaces) {
            let trimmed_end = line.iter().rposition(|c| !c.is_whitespace()).map(|p| p + 1).unwrap_or(0);
            if trimmed_end < line_len {
                let text: String = line.iter().collect();
                buckets.trailing_spaces.push(StringEntry::new(
                    text.trim_start().to_string(),
                    Usage::orphan(),
                    path.to_path_buf(),
                    position_at(line_starts, line_start),
                ));
            }
        }

        if self.style().is_enabled(CheckFlag::LineWidth) && line_len > self.max_line_width {
            let has_raw_marker = line.iter().collect::<String>().contains('|')
                || line.windows(2).any(|w| w == ['R', '"']);
            if !has_raw_marker {
                buckets.wide_lines.push(
                    StringEntry::new(
                        line.iter().collect::<String>(),
                        Usage::orphan(),
                        path.to_path_buf(),
                        position_at(line_starts, line_start),
                    )
                    .with_note(format!("line is {line_len} characters wide")),
                );
            }
        }
    }
}

fn compute_line_starts(buf: &[char]) -> Vec<usize> {
    let mut starts = vec![0usize];
    for (i, &c) in buf.iter().enumerate() {
        if c == '\n' {
            starts.push(i + 1);
        }
    }
    starts
}

fn position_at(line_starts: &[usize], idx: usize) -> Position {
    let line = line_starts.partition_point(|&s| s <= idx);
    let line_start = line_starts[line - 1];
    Position::new(line, idx - line_start + 1)
}

fn erase_range(buf: &mut [char], start: usize, end: usize) {
    for c in &mut buf[start..end.min(buf.len())] {
        if *c != '\n' {
            *c = ' ';
        }
    }
}

fn find_subsequence(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn preceded_by_odd_backslashes(buf: &[char], i: usize) -> bool {
    let mut count = 0;
    let mut j = i;
    while j > 0 && buf[j - 1] == '\\' {
        count += 1;
        j -= 1;
    }
    count % 2 == 1
}

fn skip_char_literal(buf: &[char], start: usize) -> usize {
    let mut j = start + 1;
    while j < buf.len() {
        match buf[j] {
            '\\' if j + 1 < buf.len() => j += 2,
            '\'' => {
                j += 1;
                break;
            }
            '\n' => break, // malformed char literal - bail without consuming the newline.
            _ => j += 1,
        }
    }
    j
}

fn is_line_leading_hash(buf: &[char], i: usize) -> bool {
    let mut j = i;
    while j > 0 {
        j -= 1;
        match buf[j] {
            ' ' | '\t' => continue,
            '\n' => return true,
            _ => return false,
        }
    }
    true
}

fn consume_logical_line(buf: &[char], start: usize) -> usize {
    let mut j = start;
    loop {
        match buf[j..].iter().position(|&c| c == '\n') {
            Some(rel) => {
                let nl = j + rel;
                if nl > 0 && buf[nl - 1] == '\\' {
                    j = nl + 1;
                    continue;
                }
                return nl;
            }
            None => return buf.len(),
        }
    }
}

fn directive_keyword(directive_text: &str) -> Option<String> {
    let after_hash = directive_text.trim_start().strip_prefix('#')?;
    let word: String = after_hash
        .trim_start()
        .chars()
        .take_while(|c| c.is_alphanumeric())
        .collect();
    if word.is_empty() {
        None
    } else {
        Some(word)
    }
}

fn directive_condition(directive_text: &str, keyword: &str) -> String {
    let after_hash = directive_text.trim_start().trim_start_matches('#').trim_start();
    let rest = after_hash.strip_prefix(keyword).unwrap_or(after_hash).trim();
    let rest = rest.strip_prefix("defined").unwrap_or(rest).trim();
    let rest = rest.trim_start_matches('(').trim_end_matches(')');
    rest.trim().to_string()
}

fn find_matching_conditional_end(buf: &[char], start: usize) -> usize {
    let mut depth = 0i32;
    let mut i = start;
    let len = buf.len();
    while i < len {
        if buf[i] == '\n' || i == start {
            let probe = if i == start { i } else { i + 1 };
            if probe < len && is_line_leading_hash(buf, probe) && buf.get(probe) == Some(&'#') {
                let line_end = consume_logical_line(buf, probe);
                let text: String = buf[probe..line_end].iter().collect();
                if let Some(kw) = directive_keyword(&text) {
                    match kw.as_str() {
                        "if" | "ifdef" | "ifndef" => depth += 1,
                        "endif" => {
                            if depth == 0 {
                                return probe;
                            }
                            depth -= 1;
                        }
                        "elif" | "else" => {
                            if depth == 0 {
                                return probe;
                            }
                        }
                        _ => {}
                    }
                }
                i = line_end;
                continue;
            }
        }
        i += 1;
    }
    len
}

fn parse_define_name(buf: &[char], keyword_end: usize, line_end: usize) -> Option<(String, usize)> {
    let mut j = skip_ws_forward(buf, keyword_end);
    let name_start = j;
    while j < line_end && is_ident_char(buf[j]) {
        j += 1;
    }
    if j == name_start {
        return None;
    }
    let name: String = buf[name_start..j].iter().collect();
    let value_start = skip_ws_forward(buf, j);
    Some((name, value_start))
}

fn skip_ws_forward(buf: &[char], mut i: usize) -> usize {
    while i < buf.len() && (buf[i] == ' ' || buf[i] == '\t') {
        i += 1;
    }
    i
}

fn consume_identifier_forward(buf: &[char], mut i: usize) -> usize {
    while i < buf.len() && is_ident_char(buf[i]) {
        i += 1;
    }
    i
}

fn matches_word_at(buf: &[char], i: usize, word: &str) -> bool {
    let word_chars: Vec<char> = word.chars().collect();
    if i + word_chars.len() > buf.len() {
        return false;
    }
    buf[i..i + word_chars.len()] == word_chars[..]
}

fn is_asm_keyword_at(buf: &[char], i: usize) -> bool {
    if i > 0 && is_ident_char(buf[i - 1]) {
        return false;
    }
    for word in ["__asm__", "__asm", "asm"] {
        if matches_word_at(buf, i, word) {
            let end = i + word.len();
            if end >= buf.len() || !is_ident_char(buf[end]) {
                return true;
            }
        }
    }
    false
}

fn skip_balanced_forward(buf: &[char], open: char, close: char, i: usize) -> Option<usize> {
    let mut depth = 0i32;
    let mut j = i;
    while j < buf.len() {
        if buf[j] == open {
            depth += 1;
        } else if buf[j] == close {
            depth -= 1;
            if depth == 0 {
                return Some(j + 1);
            }
        }
        j += 1;
    }
    None
}

/// Given the index of a `"` (or the first `"` of a `"""` triple), walks backward over any
/// prefix tokens (`L`, `u`, `U`, `u8`, `R`) to find the true start of the literal, and reports
/// whether it is a raw string.
fn locate_literal_start_and_rawness(buf: &[char], quote_idx: usize) -> (usize, bool) {
    let mut start = quote_idx;
    let mut is_raw = false;

    if start > 0 && buf[start - 1] == 'R' && (start < 2 || !is_ident_char(buf[start - 2])) {
        is_raw = true;
        start -= 1;
    }

    if start > 0 {
        match buf[start - 1] {
            'L' | 'u' | 'U' if start < 2 || !is_ident_char(buf[start - 2]) => {
                start -= 1;
            }
            '8' if start > 1 && buf[start - 2] == 'u' && (start < 3 || !is_ident_char(buf[start - 3])) => {
                start -= 2;
            }
            _ => {}
        }
    }

    (start, is_raw)
}

/// Multi-piece join: from `end` (just past a closing quote), skips whitespace, line/block
/// comments, exact `PRI*`-family macros, and backslash-newline continuations. Returns the index
/// of the next string's opening quote if one immediately follows, else `None`.
fn skip_joinable_gap(buf: &[char], mut i: usize) -> Option<usize> {
    loop {
        let before = i;

        while i < buf.len() && buf[i].is_whitespace() {
            i += 1;
        }
        if i + 1 < buf.len() && buf[i] == '\\' && buf[i + 1] == '\n' {
            i += 2;
            continue;
        }
        if i + 1 < buf.len() && buf[i] == '/' && buf[i + 1] == '/' {
            i = buf[i..].iter().position(|&c| c == '\n').map(|p| i + p).unwrap_or(buf.len());
            continue;
        }
        if i + 1 < buf.len() && buf[i] == '/' && buf[i + 1] == '*' {
            if let Some(rel) = find_subsequence(&buf[i + 2..], &['*', '/']) {
                i = i + 2 + rel + 2;
                continue;
            }
            return None;
        }
        if i < buf.len() && buf[i].is_alphabetic() {
            let ident_end = consume_identifier_forward(buf, i);
            let word: String = buf[i..ident_end].iter().collect();
            if PRINTF_INT_MACROS.contains(&word) {
                i = ident_end;
                continue;
            }
        }

        if i == before {
            break;
        }
    }

    if i < buf.len() && buf[i] == '"' {
        Some(i)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::style::ReviewStyle;

    fn scan_str(src: &str) -> ResultBuckets {
        let config = ClassifierConfig {
            style: ReviewStyle::all(),
            ..ClassifierConfig::default()
        };
        let scanner = Scanner::new(&config, 120);
        let mut buckets = ResultBuckets::new();
        scanner.scan(src, Path::new("test.cpp"), &mut buckets);
        buckets
    }

    #[test]
    fn simple_i18n_call_is_localizable() {
        let buckets = scan_str(r#"wxMessageBox(_("Hello, world!"));"#);
        assert_eq!(buckets.localizable.len(), 1);
        assert_eq!(buckets.localizable[0].text, "Hello, world!");
        assert_eq!(buckets.localizable[0].usage.value, "_");
    }

    #[test]
    fn translators_comment_attaches_context_to_next_call_only() {
        let src = "// TRANSLATORS: greeting\ntr(\"Hi\");\ntr(\"Bye\");\n";
        let buckets = scan_str(src);
        assert_eq!(buckets.localizable.len(), 2);
        assert!(buckets.localizable[0].usage.has_context);
        assert!(!buckets.localizable[1].usage.has_context);
    }

    #[test]
    fn block_comment_is_erased_and_produces_no_entries() {
        let buckets = scan_str("/* just a comment with \"a string\" inside */");
        assert!(buckets.localizable.is_empty());
        assert!(buckets.not_available_for_l10n.is_empty());
    }

    #[test]
    fn debug_ifdef_region_is_erased() {
        let src = "#ifdef DEBUG\nconst char* x = \"debug only message here\";\n#endif\n";
        let buckets = scan_str(src);
        assert!(buckets.not_available_for_l10n.is_empty());
        assert!(buckets.internal.is_empty());
    }

    #[test]
    fn define_string_is_forwarded_as_variable_assignment() {
        let buckets = scan_str("#define GREETING \"Hello there\"\n");
        assert_eq!(buckets.not_available_for_l10n.len(), 1);
        assert_eq!(buckets.not_available_for_l10n[0].usage.variable.name, "GREETING");
    }

    #[test]
    fn tab_character_is_recorded() {
        let buckets = scan_str("\tconst char* x = \"ok this is fine\";\n");
        assert_eq!(buckets.tabs.len(), 1);
    }

    #[test]
    fn empty_input_produces_no_entries() {
        let buckets = scan_str("");
        assert!(buckets.localizable.is_empty());
        assert!(buckets.tabs.is_empty());
    }

    #[test]
    fn suppressed_region_yields_no_entries() {
        let src = concat!(
            "tr(\"Before\");\n",
            "// quneiform-suppress-begin\n",
            "tr(\"Hidden\");\n",
            "// quneiform-suppress-end\n",
            "tr(\"After\");\n",
        );
        let buckets = scan_str(src);
        assert_eq!(buckets.localizable.len(), 2);
        assert_eq!(buckets.localizable[0].text, "Before");
        assert_eq!(buckets.localizable[1].text, "After");
    }

    #[test]
    fn raw_string_delimiter_terminates_not_naive_quote() {
        let buckets = scan_str(r#"auto s = R"DELIM(a ")" b)DELIM";"#);
        assert_eq!(buckets.not_available_for_l10n.len(), 1);
        assert_eq!(buckets.not_available_for_l10n[0].text, "a \")\" b");
    }
}
