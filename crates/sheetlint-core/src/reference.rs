//! Keyword reference data consulted by rules.
//!
//! Rules receive a [`KeywordSets`] at construction instead of reading
//! module-level tables, so tests can substitute their own.

use std::collections::HashSet;

/// Keywords valid for every property.
pub const BASIC_KEYWORDS: &[&str] = &["initial", "inherit", "unset", "revert", "revert-layer"];

/// Relative and absolute font-weight keywords, excluding `normal`.
pub const FONT_WEIGHT_RELATIVE_KEYWORDS: &[&str] = &["bolder", "lighter"];

/// Absolute font-weight keywords.
pub const FONT_WEIGHT_ABSOLUTE_KEYWORDS: &[&str] = &["bold"];

/// Numeric font weights.
pub const FONT_WEIGHT_NUMBERS: &[&str] = &[
    "100", "200", "300", "400", "500", "600", "700", "800", "900",
];

/// Numeric weights that have a keyword spelling (`400` is `normal`, `700` is `bold`).
pub const WEIGHTS_WITH_KEYWORD_EQUIVALENTS: &[&str] = &["400", "700"];

/// The `normal` keyword, which doubles as a font-style and font-variant value.
pub const NORMAL_KEYWORD: &str = "normal";

/// Read-only keyword tables. All entries are lower-case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSets {
    /// Keywords exempt from every value check.
    pub basic_keywords: HashSet<String>,
    /// Everything accepted as a font-weight keyword.
    pub font_weight_keywords: HashSet<String>,
    /// Numeric weights with a named equivalent.
    pub weights_with_keyword_equivalents: HashSet<String>,
}

impl Default for KeywordSets {
    fn default() -> Self {
        let font_weight_keywords = BASIC_KEYWORDS
            .iter()
            .chain(FONT_WEIGHT_RELATIVE_KEYWORDS)
            .chain(FONT_WEIGHT_ABSOLUTE_KEYWORDS)
            .chain(FONT_WEIGHT_NUMBERS)
            .chain(std::iter::once(&NORMAL_KEYWORD));

        Self {
            basic_keywords: to_set(BASIC_KEYWORDS.iter()),
            font_weight_keywords: to_set(font_weight_keywords),
            weights_with_keyword_equivalents: to_set(WEIGHTS_WITH_KEYWORD_EQUIVALENTS.iter()),
        }
    }
}

impl KeywordSets {
    /// Returns true if `value` is a basic keyword (case-insensitive).
    #[must_use]
    pub fn is_basic_keyword(&self, value: &str) -> bool {
        self.basic_keywords.contains(&value.to_ascii_lowercase())
    }

    /// Returns true if `value` is a font-weight keyword (case-insensitive).
    #[must_use]
    pub fn is_font_weight_keyword(&self, value: &str) -> bool {
        self.font_weight_keywords
            .contains(&value.to_ascii_lowercase())
    }

    /// Returns true if the numeric weight `value` has a keyword spelling.
    #[must_use]
    pub fn has_keyword_equivalent(&self, value: &str) -> bool {
        self.weights_with_keyword_equivalents.contains(value)
    }
}

fn to_set<'a>(words: impl Iterator<Item = &'a &'a str>) -> HashSet<String> {
    words.map(|w| (*w).to_string()).collect()
}
