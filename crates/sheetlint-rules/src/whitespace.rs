//! Whitespace expectations around a token boundary.

use std::str::FromStr;

/// Whether a single space must follow a token, or no whitespace at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceExpectation {
    /// Exactly one space.
    Always,
    /// No whitespace.
    Never,
}

impl FromStr for SpaceExpectation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            other => Err(format!("unknown whitespace expectation \"{other}\"")),
        }
    }
}

/// How the text after a boundary breaks the expectation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceViolation {
    /// A single space was required.
    ExpectedAfter,
    /// Whitespace was present but forbidden.
    RejectedAfter,
}

/// Checks the characters starting at `boundary` in `source`.
///
/// `Always` accepts one space not followed by further whitespace; any other
/// arrangement is [`SpaceViolation::ExpectedAfter`]. `Never` rejects any
/// whitespace character. Nothing after the boundary is always compliant.
#[must_use]
pub fn check_after(
    source: &str,
    boundary: usize,
    expectation: SpaceExpectation,
) -> Option<SpaceViolation> {
    let bytes = source.as_bytes();
    let first = *bytes.get(boundary)?;
    let second = bytes.get(boundary + 1).copied();

    match expectation {
        SpaceExpectation::Always => {
            if first == b' ' && !second.is_some_and(is_whitespace) {
                None
            } else {
                Some(SpaceViolation::ExpectedAfter)
            }
        }
        SpaceExpectation::Never => is_whitespace(first).then_some(SpaceViolation::RejectedAfter),
    }
}

fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\n' | b'\t' | b'\r' | b'\x0c')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_accepts_exactly_one_space() {
        assert_eq!(check_after("a b", 1, SpaceExpectation::Always), None);
        assert_eq!(
            check_after("ab", 1, SpaceExpectation::Always),
            Some(SpaceViolation::ExpectedAfter)
        );
        assert_eq!(
            check_after("a  b", 1, SpaceExpectation::Always),
            Some(SpaceViolation::ExpectedAfter)
        );
        assert_eq!(
            check_after("a\nb", 1, SpaceExpectation::Always),
            Some(SpaceViolation::ExpectedAfter)
        );
    }

    #[test]
    fn never_rejects_any_whitespace() {
        assert_eq!(check_after("ab", 1, SpaceExpectation::Never), None);
        assert_eq!(
            check_after("a\tb", 1, SpaceExpectation::Never),
            Some(SpaceViolation::RejectedAfter)
        );
    }

    #[test]
    fn end_of_source_is_compliant() {
        assert_eq!(check_after("a", 1, SpaceExpectation::Always), None);
        assert_eq!(check_after("a ", 1, SpaceExpectation::Always), None);
        assert_eq!(check_after("a", 1, SpaceExpectation::Never), None);
    }

    #[test]
    fn parses_expectation() {
        assert_eq!("always".parse(), Ok(SpaceExpectation::Always));
        assert!("sometimes".parse::<SpaceExpectation>().is_err());
    }
}
