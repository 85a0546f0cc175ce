//! Configuration (C13): style flags, thresholds, and ignore/include globs, loaded with
//! CLI-args > config-file > defaults priority. The discovery walk (`find_config_file`) and the
//! overall `load_config`/`validate` shape mirror the teacher's own config layer.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::{CheckFlag, ReviewStyle};

pub const CONFIG_FILE_NAME: &str = ".i18nlintrc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Check names to enable; an empty list means "every non-resource-file check"
    /// (`ReviewStyle::default()`). See `core::style::CheckFlag::parse` for the accepted names.
    #[serde(default)]
    pub style: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default = "default_min_words_for_unavailable")]
    pub min_words_for_unavailable: usize,
    #[serde(default)]
    pub min_cpp_version: u32,
    #[serde(default)]
    pub exceptions_should_be_translatable: bool,
    #[serde(default)]
    pub log_messages_can_be_translatable: bool,
    #[serde(default)]
    pub allow_translating_punctuation_only: bool,
    #[serde(default)]
    pub collapse_double_quotes: bool,
    #[serde(default = "default_max_line_width")]
    pub max_line_width: usize,
}

fn default_min_words_for_unavailable() -> usize {
    2
}

fn default_max_line_width() -> usize {
    120
}

impl Default for Config {
    fn default() -> Self {
        Self {
            style: Vec::new(),
            ignores: Vec::new(),
            includes: Vec::new(),
            min_words_for_unavailable: default_min_words_for_unavailable(),
            min_cpp_version: 0,
            exceptions_should_be_translatable: false,
            log_messages_can_be_translatable: false,
            allow_translating_punctuation_only: false,
            collapse_double_quotes: false,
            max_line_width: default_max_line_width(),
        }
    }
}

impl Config {
    /// Checks that every glob pattern actually parses. Unknown `style` names are tolerated here
    /// (and simply have no effect) rather than rejected, matching the core's log-and-skip
    /// recovery policy for unrecognized configuration.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern).with_context(|| format!("invalid glob pattern in 'ignores': \"{pattern}\""))?;
        }
        for pattern in &self.includes {
            Pattern::new(pattern).with_context(|| format!("invalid glob pattern in 'includes': \"{pattern}\""))?;
        }
        Ok(())
    }

    /// Builds the `ReviewStyle` this config selects, falling back to the default set when
    /// `style` is empty.
    pub fn review_style(&self) -> ReviewStyle {
        if self.style.is_empty() {
            return ReviewStyle::default();
        }
        let mut style = ReviewStyle::new([]);
        for name in &self.style {
            if let Some(flag) = CheckFlag::parse(name) {
                style.enable(flag);
            }
        }
        style
    }
}

pub fn default_config_json() -> Result<String> {
    serde_json::to_string_pretty(&Config::default()).context("failed to generate default config")
}

/// Walks up from `start_dir` looking for `.i18nlintrc.json`, stopping once it reaches a
/// directory containing `.git` (the project root) without finding one.
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

pub struct ConfigLoadResult {
    pub config: Config,
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("failed to parse config file: {}", path.display()))?;
            config.validate()?;
            Ok(ConfigLoadResult { config, from_file: true })
        }
        None => Ok(ConfigLoadResult { config: Config::default(), from_file: false }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_are_sensible() {
        let config = Config::default();
        assert_eq!(config.min_words_for_unavailable, 2);
        assert!(config.style.is_empty());
        assert!(config.ignores.is_empty());
    }

    #[test]
    fn parses_a_partial_config() {
        let json = r#"{"ignores": ["vendor/*"], "minWordsForUnavailable": 4}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.ignores, vec!["vendor/*"]);
        assert_eq!(config.min_words_for_unavailable, 4);
        assert!(config.includes.is_empty());
    }

    #[test]
    fn serializes_with_camel_case_field_names() {
        let json = default_config_json().unwrap();
        assert!(json.contains("minWordsForUnavailable"));
        assert!(json.contains("exceptionsShouldBeTranslatable"));
    }

    #[test]
    fn validate_rejects_bad_glob_pattern() {
        let config = Config { ignores: vec!["[unterminated".to_string()], ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_accepts_good_glob_patterns() {
        let config = Config { ignores: vec!["vendor/**".to_string()], includes: vec!["src/*.cpp".to_string()], ..Default::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn find_config_file_locates_file_in_parent_directory() {
        let root = tempdir().unwrap();
        fs::write(root.path().join(CONFIG_FILE_NAME), "{}").unwrap();
        let nested = root.path().join("src").join("lib");
        fs::create_dir_all(&nested).unwrap();
        let found = find_config_file(&nested).unwrap();
        assert_eq!(found, root.path().join(CONFIG_FILE_NAME));
    }

    #[test]
    fn find_config_file_stops_at_git_root() {
        let root = tempdir().unwrap();
        fs::create_dir_all(root.path().join(".git")).unwrap();
        let nested = root.path().join("src");
        fs::create_dir_all(&nested).unwrap();
        assert!(find_config_file(&nested).is_none());
    }

    #[test]
    fn load_config_falls_back_to_defaults_when_no_file_found() {
        let root = tempdir().unwrap();
        fs::create_dir_all(root.path().join(".git")).unwrap();
        let result = load_config(root.path()).unwrap();
        assert!(!result.from_file);
        assert_eq!(result.config.min_words_for_unavailable, 2);
    }

    #[test]
    fn load_config_reads_from_discovered_file() {
        let root = tempdir().unwrap();
        fs::write(root.path().join(CONFIG_FILE_NAME), r#"{"minWordsForUnavailable": 5}"#).unwrap();
        let result = load_config(root.path()).unwrap();
        assert!(result.from_file);
        assert_eq!(result.config.min_words_for_unavailable, 5);
    }

    #[test]
    fn review_style_defaults_when_empty() {
        let config = Config::default();
        let style = config.review_style();
        assert!(style.is_enabled(CheckFlag::L10nStrings));
    }

    #[test]
    fn review_style_honors_explicit_flags_only() {
        let config = Config { style: vec!["l10n_strings".to_string()], ..Default::default() };
        let style = config.review_style();
        assert!(style.is_enabled(CheckFlag::L10nStrings));
        assert!(!style.is_enabled(CheckFlag::Tabs));
    }
}
