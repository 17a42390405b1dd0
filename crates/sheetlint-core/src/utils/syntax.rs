//! Predicates that classify raw syntax before a rule looks at it.
//!
//! Values and selectors written in a preprocessor dialect (SCSS, Less) or
//! using template syntax are "non-standard"; rules exempt them silently.

use crate::ast::StyleRule;

/// Returns true if `value` has the lexical form of a CSS `<number>`.
///
/// Surrounding whitespace is ignored. Units are not allowed: `400` and `1.5e2`
/// are numbery, `12px` is not.
#[must_use]
pub fn is_numbery(value: &str) -> bool {
    let bytes = value.trim().as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_digits = count_digits(&bytes[i..]);
    i += int_digits;

    let mut frac_digits = 0;
    if bytes.get(i) == Some(&b'.') {
        frac_digits = count_digits(&bytes[i + 1..]);
        if frac_digits == 0 {
            return false;
        }
        i += 1 + frac_digits;
    }

    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_digits = count_digits(&bytes[i..]);
        if exp_digits == 0 {
            return false;
        }
        i += exp_digits;
    }

    i == bytes.len()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Returns false for values using preprocessor or template syntax.
#[must_use]
pub fn is_standard_syntax_value(value: &str) -> bool {
    // Operators before variables (e.g. `-$var`)
    let normalized = match value.chars().next() {
        Some('-' | '+' | '*' | '/') => &value[1..],
        _ => value,
    };

    // SCSS variable
    if normalized.starts_with('$') {
        return false;
    }
    // SCSS namespaced variable (e.g. `ns.$var`)
    if value.find(".$").is_some_and(|i| i > 0) {
        return false;
    }
    // Less variable
    if normalized.starts_with('@') {
        return false;
    }
    if has_interpolation(normalized) {
        return false;
    }
    // WebExtension replacement keyword
    if value.contains("__MSG_") {
        return false;
    }
    true
}

/// Returns false for rules whose selector uses preprocessor or template syntax.
#[must_use]
pub fn is_standard_syntax_rule(rule: &StyleRule) -> bool {
    let selector = rule.selector.as_str();

    if has_interpolation(selector) {
        return false;
    }
    // SCSS placeholder
    if selector.starts_with('%') {
        return false;
    }
    // SCSS nested properties, custom property sets, Less detached rulesets
    if selector.ends_with(':') {
        return false;
    }
    // Less :extend
    if selector.contains(":extend") {
        return false;
    }
    // Less non-outputting mixin definition (e.g. `.mixin() {}`)
    if selector.ends_with(')') && !selector.contains(':') {
        return false;
    }
    // Less parametric mixin (e.g. `.mixin(@a: 1) {}`)
    if selector.ends_with(')') && selector.contains("(@") {
        return false;
    }
    // ERB template tags
    if selector.contains("<%") || selector.contains("%>") {
        return false;
    }
    // SCSS and Less line comments
    if selector.contains("//") {
        return false;
    }
    true
}

/// Returns true for `var(...)` references.
#[must_use]
pub fn is_variable(value: &str) -> bool {
    value
        .get(..4)
        .is_some_and(|head| head.eq_ignore_ascii_case("var("))
}

/// Strips a vendor prefix such as `-webkit-` or `-moz-`.
#[must_use]
pub fn vendor_unprefixed(name: &str) -> &str {
    let Some(rest) = name.strip_prefix('-') else {
        return name;
    };
    let word_len = rest
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count();
    if word_len > 0 && rest.as_bytes().get(word_len) == Some(&b'-') {
        &rest[word_len + 1..]
    } else {
        name
    }
}

fn has_interpolation(text: &str) -> bool {
    text.contains("#{") || text.contains("@{") || text.contains("$(")
}
