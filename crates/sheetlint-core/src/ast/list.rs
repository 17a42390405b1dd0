//! Value list splitting that keeps track of where each part starts.

/// One part of a split value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Part<'a> {
    /// The part text.
    pub text: &'a str,
    /// Byte offset of `text` within the split value.
    pub offset: usize,
}

/// Splits a value on runs of whitespace, as `font: italic 400 12px/1.5 serif`.
///
/// Whitespace inside quotes or parentheses, or escaped with `\`, does not split.
#[must_use]
pub fn space(value: &str) -> Vec<Part<'_>> {
    let mut parts = Vec::new();
    let mut start: Option<usize> = None;
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in value.char_indices() {
        let separator = if escaped {
            escaped = false;
            false
        } else if c == '\\' {
            escaped = true;
            false
        } else if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            false
        } else if c == '"' || c == '\'' {
            quote = Some(c);
            false
        } else if c == '(' {
            depth += 1;
            false
        } else if c == ')' {
            depth = depth.saturating_sub(1);
            false
        } else {
            depth == 0 && matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0c')
        };

        if separator {
            if let Some(s) = start.take() {
                parts.push(Part {
                    text: &value[s..i],
                    offset: s,
                });
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }

    if let Some(s) = start {
        parts.push(Part {
            text: &value[s..],
            offset: s,
        });
    }
    parts
}
