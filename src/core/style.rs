//! Review style flags (the `ReviewStyle` bitset from the design).
//!
//! Each flag is independent; components consult the active set to decide whether to run a given
//! subcheck. Represented as a plain `HashSet<CheckFlag>` rather than a bitflags type, following
//! the rest of this codebase's preference for serde-friendly collections over bit-packed types.

use std::collections::HashSet;
use std::fmt;

/// One independently-togglable check category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CheckFlag {
    L10nStrings,
    SuspectI18nUsage,
    SuspectL10nStringUsage,
    MismatchingPrintfCommands,
    Accelerators,
    Consistency,
    Halfwidth,
    Numbers,
    Length,
    NeedingContext,
    L10nContainsUrl,
    MultipartStrings,
    Pluralization,
    ArticlesProceedingPlaceholder,
    L10nContainsExcessiveNonL10nContent,
    L10nConcatenatedStrings,
    LiteralL10nStringComparison,
    NotAvailableForL10n,
    DeprecatedMacros,
    Utf8Encoded,
    Utf8WithSignature,
    UnencodedExtAscii,
    PrintfSingleNumber,
    NumberAssignedToId,
    DuplicateValueAssignedToIds,
    MalformedStrings,
    Fonts,
    TrailingSpaces,
    Tabs,
    LineWidth,
    SpaceAfterComment,
}

impl CheckFlag {
    /// All check flags, in the order they appear in the design's configuration table.
    pub const ALL: &'static [CheckFlag] = &[
        CheckFlag::L10nStrings,
        CheckFlag::SuspectI18nUsage,
        CheckFlag::SuspectL10nStringUsage,
        CheckFlag::MismatchingPrintfCommands,
        CheckFlag::Accelerators,
        CheckFlag::Consistency,
        CheckFlag::Halfwidth,
        CheckFlag::Numbers,
        CheckFlag::Length,
        CheckFlag::NeedingContext,
        CheckFlag::L10nContainsUrl,
        CheckFlag::MultipartStrings,
        CheckFlag::Pluralization,
        CheckFlag::ArticlesProceedingPlaceholder,
        CheckFlag::L10nContainsExcessiveNonL10nContent,
        CheckFlag::L10nConcatenatedStrings,
        CheckFlag::LiteralL10nStringComparison,
        CheckFlag::NotAvailableForL10n,
        CheckFlag::DeprecatedMacros,
        CheckFlag::Utf8Encoded,
        CheckFlag::Utf8WithSignature,
        CheckFlag::UnencodedExtAscii,
        CheckFlag::PrintfSingleNumber,
        CheckFlag::NumberAssignedToId,
        CheckFlag::DuplicateValueAssignedToIds,
        CheckFlag::MalformedStrings,
        CheckFlag::Fonts,
        CheckFlag::TrailingSpaces,
        CheckFlag::Tabs,
        CheckFlag::LineWidth,
        CheckFlag::SpaceAfterComment,
    ];

    /// Parse a flag from its config-file name (case insensitive), e.g. `"check_halfwidth"` or
    /// `"halfwidth"`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        let s = s.strip_prefix("check_").unwrap_or(&s);
        Some(match s {
            "l10n_strings" => Self::L10nStrings,
            "suspect_i18n_usage" => Self::SuspectI18nUsage,
            "suspect_l10n_string_usage" => Self::SuspectL10nStringUsage,
            "mismatching_printf_commands" => Self::MismatchingPrintfCommands,
            "accelerators" => Self::Accelerators,
            "consistency" => Self::Consistency,
            "halfwidth" => Self::Halfwidth,
            "numbers" => Self::Numbers,
            "length" => Self::Length,
            "needing_context" => Self::NeedingContext,
            "l10n_contains_url" => Self::L10nContainsUrl,
            "multipart_strings" => Self::MultipartStrings,
            "pluaralization" | "pluralization" => Self::Pluralization,
            "articles_proceeding_placeholder" => Self::ArticlesProceedingPlaceholder,
            "l10n_contains_excessive_nonl10n_content" => Self::L10nContainsExcessiveNonL10nContent,
            "l10n_concatenated_strings" => Self::L10nConcatenatedStrings,
            "literal_l10n_string_comparison" => Self::LiteralL10nStringComparison,
            "not_available_for_l10n" => Self::NotAvailableForL10n,
            "deprecated_macros" => Self::DeprecatedMacros,
            "utf8_encoded" => Self::Utf8Encoded,
            "utf8_with_signature" => Self::Utf8WithSignature,
            "unencoded_ext_ascii" => Self::UnencodedExtAscii,
            "printf_single_number" => Self::PrintfSingleNumber,
            "number_assigned_to_id" => Self::NumberAssignedToId,
            "duplicate_value_assigned_to_ids" => Self::DuplicateValueAssignedToIds,
            "malformed_strings" => Self::MalformedStrings,
            "fonts" => Self::Fonts,
            "trailing_spaces" => Self::TrailingSpaces,
            "tabs" => Self::Tabs,
            "line_width" => Self::LineWidth,
            "space_after_comment" => Self::SpaceAfterComment,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::L10nStrings => "l10n_strings",
            Self::SuspectI18nUsage => "suspect_i18n_usage",
            Self::SuspectL10nStringUsage => "suspect_l10n_string_usage",
            Self::MismatchingPrintfCommands => "mismatching_printf_commands",
            Self::Accelerators => "accelerators",
            Self::Consistency => "consistency",
            Self::Halfwidth => "halfwidth",
            Self::Numbers => "numbers",
            Self::Length => "length",
            Self::NeedingContext => "needing_context",
            Self::L10nContainsUrl => "l10n_contains_url",
            Self::MultipartStrings => "multipart_strings",
            Self::Pluralization => "pluaralization",
            Self::ArticlesProceedingPlaceholder => "articles_proceeding_placeholder",
            Self::L10nContainsExcessiveNonL10nContent => "l10n_contains_excessive_nonl10n_content",
            Self::L10nConcatenatedStrings => "l10n_concatenated_strings",
            Self::LiteralL10nStringComparison => "literal_l10n_string_comparison",
            Self::NotAvailableForL10n => "not_available_for_l10n",
            Self::DeprecatedMacros => "deprecated_macros",
            Self::Utf8Encoded => "utf8_encoded",
            Self::Utf8WithSignature => "utf8_with_signature",
            Self::UnencodedExtAscii => "unencoded_ext_ascii",
            Self::PrintfSingleNumber => "printf_single_number",
            Self::NumberAssignedToId => "number_assigned_to_id",
            Self::DuplicateValueAssignedToIds => "duplicate_value_assigned_to_ids",
            Self::MalformedStrings => "malformed_strings",
            Self::Fonts => "fonts",
            Self::TrailingSpaces => "trailing_spaces",
            Self::Tabs => "tabs",
            Self::LineWidth => "line_width",
            Self::SpaceAfterComment => "space_after_comment",
        }
    }
}

impl fmt::Display for CheckFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The active set of enabled checks for a review session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewStyle(HashSet<CheckFlag>);

impl ReviewStyle {
    pub fn new(flags: impl IntoIterator<Item = CheckFlag>) -> Self {
        Self(flags.into_iter().collect())
    }

    /// Every check enabled - used by `scan --all` and by tests that want the full battery.
    pub fn all() -> Self {
        Self(CheckFlag::ALL.iter().copied().collect())
    }

    pub fn is_enabled(&self, flag: CheckFlag) -> bool {
        self.0.contains(&flag)
    }

    pub fn enable(&mut self, flag: CheckFlag) {
        self.0.insert(flag);
    }
}

impl Default for ReviewStyle {
    /// The sensible-defaults subset: everything except the resource-file-only checks
    /// (`Accelerators`, `Consistency`, `Numbers`, `Length`, `Fonts`,
    /// `MismatchingPrintfCommands`), which only apply when scanning RC/resx catalogs and are
    /// opt-in.
    fn default() -> Self {
        Self::new(CheckFlag::ALL.iter().copied().filter(|f| {
            !matches!(
                f,
                CheckFlag::Accelerators
                    | CheckFlag::Consistency
                    | CheckFlag::Numbers
                    | CheckFlag::Length
                    | CheckFlag::Fonts
                    | CheckFlag::MismatchingPrintfCommands
            )
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_bare_and_prefixed_names() {
        assert_eq!(CheckFlag::parse("halfwidth"), Some(CheckFlag::Halfwidth));
        assert_eq!(
            CheckFlag::parse("check_halfwidth"),
            Some(CheckFlag::Halfwidth)
        );
        assert_eq!(
            CheckFlag::parse("CHECK_HALFWIDTH"),
            Some(CheckFlag::Halfwidth)
        );
    }

    #[test]
    fn parse_rejects_unknown_names() {
        assert_eq!(CheckFlag::parse("not_a_real_check"), None);
    }

    #[test]
    fn all_flags_round_trip_through_as_str_and_parse() {
        for flag in CheckFlag::ALL {
            assert_eq!(CheckFlag::parse(flag.as_str()), Some(*flag));
        }
    }

    #[test]
    fn default_style_excludes_resource_only_checks() {
        let style = ReviewStyle::default();
        assert!(!style.is_enabled(CheckFlag::Accelerators));
        assert!(style.is_enabled(CheckFlag::Halfwidth));
        assert!(style.is_enabled(CheckFlag::NotAvailableForL10n));
    }

    #[test]
    fn enable_adds_a_flag() {
        let mut style = ReviewStyle::new([]);
        assert!(!style.is_enabled(CheckFlag::Tabs));
        style.enable(CheckFlag::Tabs);
        assert!(style.is_enabled(CheckFlag::Tabs));
    }
}
