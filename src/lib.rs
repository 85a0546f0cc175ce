//! i18n-scan - a static analyzer for internationalization issues in source trees.
//!
//! i18n-scan walks a source tree (C/C++/C#, plus gettext/RC/plist catalogs), classifies every
//! string literal it finds into one of several result buckets (translatable, should-be-
//! localized-but-isn't, internal, unsafe-for-localization, ...), and reports the findings.
//! It can also generate pseudo-translated catalogs for layout/encoding testing.
//!
//! ## Module Structure
//!
//! - `core`: the scanner, backscan resolver, classifier, rule sets, and aggregate review
//!   pipeline - the heart of the analysis.
//! - `decode`: turns raw file bytes into text (UTF-8/UTF-16, with or without a BOM).
//! - `resource`: classification and harvesting for non-source files (RC/plist/PO/POT catalogs).
//! - `pseudo`: pseudo-translation for layout/encoding testing of gettext catalogs.
//! - `driver`: walks a directory tree in parallel, decodes files, and dispatches them into
//!   `core` or `resource`.
//! - `config`: configuration file loading and parsing.
//! - `cli`: command-line interface layer (argument parsing, commands, report formatting).

pub mod cli;
pub mod config;
pub mod core;
pub mod decode;
pub mod driver;
pub mod pseudo;
pub mod resource;
