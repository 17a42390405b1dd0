//! Rule to require numeric or named font-weight notation.
//!
//! # Options
//!
//! - primary: `"numeric"` or `"named-where-possible"`
//! - `ignore-values`: values to skip, as strings or `/patterns/`
//!
//! # Detected Patterns
//!
//! - `font-weight: bold` under `"numeric"`
//! - `font: bold 14px Arial` under `"numeric"`
//! - `font-weight: 700` under `"named-where-possible"` (should be `bold`)
//! - `font-weight: heavy` under `"named-where-possible"` (not a weight keyword)
//!
//! Inside `@font-face` a `font-weight` may be a range such as `100 900`;
//! under `"numeric"` every part must be a number.
//!
//! # Suppression
//!
//! - `/* sheetlint: allow(font-weight-notation) reason="..." */`

use sheetlint_core::ast::{list, Declaration};
use sheetlint_core::options::{is_string_or_pattern, validate_options, Accept, SecondarySpec};
use sheetlint_core::reference::NORMAL_KEYWORD;
use sheetlint_core::utils::{is_numbery, is_standard_syntax_value, is_variable, AllowList};
use sheetlint_core::{
    KeywordSets, NodeKind, Reporter, Root, Rule, RuleMessage, RuleOptions, Severity,
};
use std::fmt;
use std::str::FromStr;

/// Rule code for font-weight-notation.
pub const CODE: &str = "SL001";

/// Rule name for font-weight-notation.
pub const NAME: &str = "font-weight-notation";

const PRIMARY: &[Accept] = &[
    Accept::Value("numeric"),
    Accept::Value("named-where-possible"),
];

const IGNORE_VALUE: &[Accept] = &[Accept::Satisfies(is_string_or_pattern)];

const SECONDARY: SecondarySpec = &[(
    "ignore-values",
    &[
        Accept::Satisfies(is_string_or_pattern),
        Accept::ListOf(IGNORE_VALUE),
    ],
)];

/// The configured notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    /// Every weight must be a number.
    Numeric,
    /// Weights with a keyword spelling must use it.
    NamedWherePossible,
}

impl FromStr for Expectation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "numeric" => Ok(Self::Numeric),
            "named-where-possible" => Ok(Self::NamedWherePossible),
            other => Err(format!("unknown font-weight notation \"{other}\"")),
        }
    }
}

/// Where a weight token was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenContext {
    /// The whole value of a `font-weight` declaration.
    PlainDeclaration,
    /// One part of a `font` shorthand value.
    FontShorthand,
}

/// A font-weight candidate with its byte offset inside the declaration value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightToken<'a> {
    /// Token text as written.
    pub text: &'a str,
    /// Offset of `text` within the declaration value.
    pub offset: usize,
    /// Where the token came from.
    pub context: TokenContext,
}

/// Messages reported by this rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// The value uses the wrong notation; carries `"numeric"` or `"named"`.
    Expected(&'static str),
    /// A non-numeric value is not a font-weight keyword.
    InvalidNamed(String),
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expected(notation) => write!(f, "Expected {notation} font-weight notation"),
            Self::InvalidNamed(name) => write!(f, "Unexpected invalid font-weight name \"{name}\""),
        }
    }
}

impl RuleMessage for Message {
    fn key(&self) -> &'static str {
        match self {
            Self::Expected(_) => "expected",
            Self::InvalidNamed(_) => "invalid-named",
        }
    }
}

/// Result of classifying one weight token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The token follows the expectation.
    Compliant,
    /// The token breaks it.
    Violation(Message),
}

/// Requires a consistent font-weight notation.
#[derive(Debug, Clone, Default)]
pub struct FontWeightNotation {
    keywords: KeywordSets,
}

impl FontWeightNotation {
    /// Creates a new rule with the standard keyword tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the keyword tables.
    #[must_use]
    pub fn with_keywords(mut self, keywords: KeywordSets) -> Self {
        self.keywords = keywords;
        self
    }

    /// Finds the weight token of a `font-weight` or `font` declaration.
    ///
    /// For the `font` shorthand the first part that can only be a weight is
    /// taken: a number, a weight keyword, or `normal` when no number is present
    /// (otherwise `normal` may be the style or variant).
    #[must_use]
    pub fn extract<'a>(&self, decl: &'a Declaration) -> Option<WeightToken<'a>> {
        if decl.prop.eq_ignore_ascii_case("font-weight") {
            return Some(WeightToken {
                text: &decl.value,
                offset: 0,
                context: TokenContext::PlainDeclaration,
            });
        }
        if !decl.prop.eq_ignore_ascii_case("font") {
            return None;
        }

        // A unitless line-height only appears after `/`, so it never splits out as its own part.
        let parts = list::space(&decl.value);
        let has_numeric_weight = parts.iter().any(|part| is_numbery(part.text));

        parts
            .into_iter()
            .find(|part| {
                let is_normal = part.text.eq_ignore_ascii_case(NORMAL_KEYWORD);
                (is_normal && !has_numeric_weight)
                    || is_numbery(part.text)
                    || (!is_normal && self.keywords.is_font_weight_keyword(part.text))
            })
            .map(|part| WeightToken {
                text: part.text,
                offset: part.offset,
                context: TokenContext::FontShorthand,
            })
    }

    /// Returns true if the token is skipped without classification.
    #[must_use]
    pub fn is_exempt(&self, token: &str, ignore: &AllowList) -> bool {
        !is_standard_syntax_value(token)
            || is_variable(token)
            || self.keywords.is_basic_keyword(token)
            || ignore.matches(&token.to_ascii_lowercase())
    }

    /// Classifies a weight token.
    #[must_use]
    pub fn classify(&self, token: &str, expectation: Expectation, in_font_face: bool) -> Outcome {
        match expectation {
            Expectation::Numeric => {
                let numeric = if in_font_face {
                    list::space(token).iter().all(|part| is_numbery(part.text))
                } else {
                    is_numbery(token)
                };
                if numeric {
                    Outcome::Compliant
                } else {
                    Outcome::Violation(Message::Expected("numeric"))
                }
            }
            Expectation::NamedWherePossible => {
                if is_numbery(token) {
                    if self.keywords.has_keyword_equivalent(token) {
                        Outcome::Violation(Message::Expected("named"))
                    } else {
                        Outcome::Compliant
                    }
                } else if self.keywords.is_font_weight_keyword(token)
                    || token.eq_ignore_ascii_case(NORMAL_KEYWORD)
                {
                    Outcome::Compliant
                } else {
                    Outcome::Violation(Message::InvalidNamed(token.to_string()))
                }
            }
        }
    }
}

impl Rule for FontWeightNotation {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires numeric or named (where possible) font-weight values"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, root: &Root, options: &RuleOptions, reporter: &mut Reporter<'_>) {
        if !validate_options(reporter, options, PRIMARY, SECONDARY) {
            return;
        }
        let Some(expectation) = options
            .primary_str()
            .and_then(|p| p.parse::<Expectation>().ok())
        else {
            return;
        };
        let ignore = match options.secondary("ignore-values").map(AllowList::from_value) {
            None => AllowList::default(),
            Some(Ok(list)) => list,
            Some(Err(e)) => {
                tracing::warn!(rule = NAME, "{e}");
                return;
            }
        };

        root.walk_decls(|decl, parent| {
            let Some(token) = self.extract(decl) else {
                return;
            };
            if self.is_exempt(token.text, &ignore) {
                return;
            }

            let in_font_face = parent.is_at_rule_named("font-face");
            if let Outcome::Violation(message) =
                self.classify(token.text, expectation, in_font_face)
            {
                reporter.report(
                    &message,
                    NodeKind::Declaration,
                    decl.value_map.source_offset(token.offset),
                );
            }
        });
    }
}
