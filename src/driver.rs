//! Batch driver (C11): walks a directory tree, decodes each file, classifies its kind, and
//! dispatches it to the C5 scanner or a C9 resource harvester. Every file gets its own
//! [`core::Reviewer`] so no mutable state is shared across the `rayon` worker pool; results are
//! merged in file-path order once the walk completes, then `finalize()` (C6) runs exactly once
//! over the merged session - the same collect-then-sequentially-merge shape the teacher uses for
//! its own parallel registry/comment collection.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use glob::Pattern;
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::config::Config;
use crate::core::classify::ClassifierConfig;
use crate::core::{ResultBuckets, Reviewer};
use crate::decode::decode;
use crate::resource::{self, FileKind};

const SCANNABLE_EXTENSIONS: &[&str] = &[
    "c", "cc", "cpp", "cxx", "h", "hh", "hpp", "hxx", "m", "mm", "cs", "rc", "plist", "po", "pot",
];

#[derive(Debug, Clone, Default)]
pub struct SessionStats {
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub elapsed: Duration,
}

pub struct ReviewSession {
    pub buckets: ResultBuckets,
    pub stats: SessionStats,
}

/// Mirrors the original analyzer's `resetCallback`/`callback` cancellation hook: `reset` is
/// called once with the total file count, then `on_file` is called before each file is
/// processed - returning `false` aborts the remainder of the walk. The CLI doesn't use this
/// itself; it exists so an embedder (an editor plugin, say) can interrupt a long scan.
pub trait ProgressCallback: Sync {
    fn reset(&self, total: usize);
    fn on_file(&self, index: usize, path: &Path) -> bool;
}

pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn reset(&self, _total: usize) {}
    fn on_file(&self, _index: usize, _path: &Path) -> bool {
        true
    }
}

pub fn run(root: &Path, config: &Config) -> ReviewSession {
    run_with_progress(root, config, &NoopProgress)
}

pub fn run_with_progress(root: &Path, config: &Config, progress: &dyn ProgressCallback) -> ReviewSession {
    let start = Instant::now();
    let files = collect_files(root, config);
    progress.reset(files.len());

    let classifier_config = ClassifierConfig {
        style: config.review_style(),
        min_words_for_unavailable: config.min_words_for_unavailable,
        exceptions_should_be_translatable: config.exceptions_should_be_translatable,
        log_messages_can_be_translatable: config.log_messages_can_be_translatable,
        allow_translating_punctuation_only: config.allow_translating_punctuation_only,
    };

    let aborted = AtomicBool::new(false);

    let mut reviewers: Vec<(PathBuf, Reviewer)> = files
        .par_iter()
        .enumerate()
        .filter_map(|(index, path)| {
            if aborted.load(Ordering::Relaxed) {
                return None;
            }
            if !progress.on_file(index, path) {
                aborted.store(true, Ordering::Relaxed);
                return None;
            }

            let mut reviewer = Reviewer::new(classifier_config.clone(), config.max_line_width);
            match std::fs::read(path) {
                Ok(bytes) => {
                    let decoded = decode(&bytes);
                    dispatch_file(&mut reviewer, path, &decoded.text);
                    Some((path.clone(), reviewer))
                }
                Err(err) => {
                    reviewer.record_error(path, err.to_string());
                    Some((path.clone(), reviewer))
                }
            }
        })
        .collect();

    let files_scanned = reviewers.len();
    let files_skipped = files.len() - files_scanned;
    reviewers.sort_by(|a, b| a.0.cmp(&b.0));

    let mut session = Reviewer::new(classifier_config, config.max_line_width);
    for (_, reviewer) in reviewers {
        session.merge(reviewer);
    }
    session.finalize();

    ReviewSession {
        buckets: session.into_buckets(),
        stats: SessionStats {
            files_scanned,
            files_skipped,
            elapsed: start.elapsed(),
        },
    }
}

fn dispatch_file(reviewer: &mut Reviewer, path: &Path, text: &str) {
    match resource::classify_file_kind(path, text) {
        FileKind::ResourceRc => {
            for harvested in resource::rc::harvest(text) {
                reviewer.classify(&harvested.text, harvested.usage, path, harvested.position);
            }
        }
        FileKind::ResourcePlist => {
            for harvested in resource::plist::harvest(text) {
                reviewer.classify(&harvested.text, harvested.usage, path, harvested.position);
            }
        }
        FileKind::ResourcePo | FileKind::ResourcePot => {
            for harvested in resource::po::harvest(text) {
                reviewer.classify(&harvested.text, harvested.usage, path, harvested.position);
            }
        }
        FileKind::Cpp | FileKind::CSharp | FileKind::Other => {
            reviewer.scan(text, path);
        }
    }
}

fn collect_files(root: &Path, config: &Config) -> Vec<PathBuf> {
    let ignore_patterns: Vec<Pattern> = config.ignores.iter().filter_map(|p| Pattern::new(p).ok()).collect();
    let include_patterns: Vec<Pattern> = config.includes.iter().filter_map(|p| Pattern::new(p).ok()).collect();

    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            let path_str = path.to_string_lossy();
            if ignore_patterns.iter().any(|pattern| pattern.matches(&path_str)) {
                return false;
            }
            if !include_patterns.is_empty() && !include_patterns.iter().any(|pattern| pattern.matches(&path_str)) {
                return false;
            }
            is_scannable_extension(path)
        })
        .collect()
}

fn is_scannable_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| SCANNABLE_EXTENSIONS.contains(&ext.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn scans_a_simple_tree_and_finds_localizable_strings() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("main.cpp"), r#"_("Open File");"#).unwrap();
        let config = Config::default();
        let session = run(dir.path(), &config);
        assert_eq!(session.buckets.localizable.len(), 1);
        assert_eq!(session.stats.files_scanned, 1);
    }

    #[test]
    fn ignores_match_skip_files() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("vendor")).unwrap();
        fs::write(dir.path().join("vendor/lib.cpp"), r#"_("Vendored");"#).unwrap();
        fs::write(dir.path().join("main.cpp"), r#"_("Mine");"#).unwrap();
        let config = Config { ignores: vec!["*/vendor/*".to_string()], ..Default::default() };
        let session = run(dir.path(), &config);
        assert_eq!(session.buckets.localizable.len(), 1);
        assert_eq!(session.buckets.localizable[0].text, "Mine");
    }

    #[test]
    fn non_scannable_extensions_are_skipped() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("readme.md"), r#"_("Not scanned");"#).unwrap();
        let config = Config::default();
        let session = run(dir.path(), &config);
        assert!(session.buckets.localizable.is_empty());
    }

    #[test]
    fn po_files_are_harvested_not_scanned() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("strings.po"), "msgid \"Open File\"\nmsgstr \"\"\n").unwrap();
        let config = Config::default();
        let session = run(dir.path(), &config);
        assert_eq!(session.buckets.localizable.len(), 1);
    }

    #[test]
    fn merges_results_from_multiple_files_in_path_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.cpp"), r#"_("First");"#).unwrap();
        fs::write(dir.path().join("b.cpp"), r#"_("Second");"#).unwrap();
        let config = Config::default();
        let session = run(dir.path(), &config);
        let mut values: Vec<&str> = session.buckets.localizable.iter().map(|e| e.text.as_str()).collect();
        values.sort();
        assert_eq!(values, vec!["First", "Second"]);
    }
}
