//! Stylesheet parser producing a raw-preserving [`Root`].

use super::{AtRule, Comment, Declaration, Node, OffsetMap, Root, Span, StyleRule};
use thiserror::Error;

/// Errors produced while parsing a stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A `{` was never closed.
    #[error("Unclosed block at offset {offset}")]
    UnclosedBlock {
        /// Offset of the opening brace.
        offset: usize,
    },

    /// A `/*` was never closed.
    #[error("Unclosed comment at offset {offset}")]
    UnclosedComment {
        /// Offset of the comment start.
        offset: usize,
    },

    /// A quoted string was never closed.
    #[error("Unclosed string at offset {offset}")]
    UnclosedString {
        /// Offset of the opening quote.
        offset: usize,
    },

    /// A `}` appeared without a matching `{`.
    #[error("Unexpected }} at offset {offset}")]
    UnexpectedClose {
        /// Offset of the closing brace.
        offset: usize,
    },

    /// A statement is neither a declaration nor a rule.
    #[error("Unknown word \"{word}\" at offset {offset}")]
    UnknownWord {
        /// Offset of the statement start.
        offset: usize,
        /// The offending text.
        word: String,
    },
}

impl ParseError {
    /// Returns the source offset the error points at.
    #[must_use]
    pub fn offset(&self) -> usize {
        match self {
            Self::UnclosedBlock { offset }
            | Self::UnclosedComment { offset }
            | Self::UnclosedString { offset }
            | Self::UnexpectedClose { offset }
            | Self::UnknownWord { offset, .. } => *offset,
        }
    }
}

/// Parses stylesheet source into a [`Root`].
///
/// # Errors
///
/// Returns a [`ParseError`] for unbalanced blocks, comments or strings, and
/// for statements that are neither declarations nor rules.
pub fn parse(source: &str) -> Result<Root, ParseError> {
    let mut parser = Parser {
        src: source,
        bytes: source.as_bytes(),
        pos: 0,
    };
    let nodes = parser.parse_nodes(None)?;
    Ok(Root::new(source.to_string(), nodes))
}

struct Parser<'s> {
    src: &'s str,
    bytes: &'s [u8],
    pos: usize,
}

impl Parser<'_> {
    /// Parses nodes until EOF (top level) or the `}` closing the block opened at `open`.
    fn parse_nodes(&mut self, open: Option<usize>) -> Result<Vec<Node>, ParseError> {
        let mut nodes = Vec::new();
        loop {
            self.skip_whitespace();
            let Some(&byte) = self.bytes.get(self.pos) else {
                return match open {
                    Some(offset) => Err(ParseError::UnclosedBlock { offset }),
                    None => Ok(nodes),
                };
            };

            match byte {
                b'}' => {
                    if open.is_none() {
                        return Err(ParseError::UnexpectedClose { offset: self.pos });
                    }
                    self.pos += 1;
                    return Ok(nodes);
                }
                b';' => self.pos += 1,
                b'/' if self.bytes.get(self.pos + 1) == Some(&b'*') => {
                    nodes.push(Node::Comment(self.parse_comment()?));
                }
                b'@' => nodes.push(self.parse_at_rule()?),
                _ => nodes.push(self.parse_statement()?),
            }
        }
    }

    fn parse_comment(&mut self) -> Result<Comment, ParseError> {
        let start = self.pos;
        let end = self.skip_comment(start)?;
        self.pos = end;
        Ok(Comment {
            text: self.src[start + 2..end - 2].trim().to_string(),
            span: Span::new(start, end),
        })
    }

    fn parse_at_rule(&mut self) -> Result<Node, ParseError> {
        let start = self.pos;
        let mut name_end = start + 1;
        while let Some(&b) = self.bytes.get(name_end) {
            if b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || !b.is_ascii() {
                name_end += 1;
            } else {
                break;
            }
        }
        let name = self.src[start + 1..name_end].to_string();

        self.pos = name_end;
        let (end, terminator) = self.scan_prelude()?;
        let (params, params_map) = self.clean(name_end, end)?;

        let nodes = match terminator {
            Some(b'{') => {
                self.pos = end + 1;
                Some(self.parse_nodes(Some(end))?)
            }
            Some(b';') => {
                self.pos = end + 1;
                None
            }
            _ => {
                self.pos = end;
                None
            }
        };

        Ok(Node::AtRule(AtRule {
            name,
            params,
            params_offset: params_map.source_offset(0),
            params_map,
            span: Span::new(start, self.pos),
            nodes,
        }))
    }

    fn parse_statement(&mut self) -> Result<Node, ParseError> {
        let start = self.pos;
        let (end, terminator) = self.scan_prelude()?;

        if terminator == Some(b'{') {
            let (selector, selector_map) = self.clean(start, end)?;
            self.pos = end + 1;
            let nodes = self.parse_nodes(Some(end))?;
            return Ok(Node::Rule(StyleRule {
                selector,
                selector_offset: selector_map.source_offset(0),
                selector_map,
                span: Span::new(start, self.pos),
                nodes,
            }));
        }

        let decl = self.declaration(start, end)?;
        // A `}` terminator belongs to the enclosing block.
        self.pos = if terminator == Some(b';') { end + 1 } else { end };
        Ok(Node::Decl(decl))
    }

    fn declaration(&self, start: usize, end: usize) -> Result<Declaration, ParseError> {
        let text = self.src[start..end].trim_end();
        let Some(colon) = text.find(':') else {
            return Err(ParseError::UnknownWord {
                offset: start,
                word: text.to_string(),
            });
        };

        let (prop, _) = self.clean(start, start + colon)?;
        let (mut value, value_map) = self.clean(start + colon + 1, start + text.len())?;
        let mut important = false;

        if let Some(bang) = value.rfind('!') {
            if value[bang + 1..].trim().eq_ignore_ascii_case("important") {
                important = true;
                value.truncate(value[..bang].trim_end().len());
            }
        }

        Ok(Declaration {
            prop,
            value,
            important,
            span: Span::new(start, start + text.len()),
            value_offset: value_map.source_offset(0),
            value_map,
        })
    }

    /// Copies `start..end` without comments and surrounding whitespace.
    ///
    /// Comments inside strings are kept. The returned map takes indices in the
    /// copy back to source offsets.
    fn clean(&self, start: usize, end: usize) -> Result<(String, OffsetMap), ParseError> {
        let mut text = String::with_capacity(end - start);
        let mut gaps = Vec::new();
        let mut copied = start;
        let mut i = start;

        while i < end {
            match self.bytes[i] {
                b'\\' => i += 2,
                b'"' | b'\'' => i = self.skip_string(i)?,
                b'/' if self.bytes.get(i + 1) == Some(&b'*') => {
                    text.push_str(&self.src[copied..i]);
                    let after = self.skip_comment(i)?.min(end);
                    gaps.push((text.len(), after - i));
                    copied = after;
                    i = after;
                }
                _ => i += 1,
            }
        }
        text.push_str(&self.src[copied..end.max(copied)]);

        let lead = text.len() - text.trim_start().len();
        text.truncate(text.trim_end().len());
        text.drain(..lead.min(text.len()));

        let mut map_start = start + lead;
        let mut shifted = Vec::with_capacity(gaps.len());
        for (at, len) in gaps {
            if at <= lead {
                map_start += len;
            } else {
                shifted.push((at - lead, len));
            }
        }
        Ok((text, OffsetMap::with_gaps(map_start, shifted)))
    }

    /// Finds the next `;`, `{` or `}` outside strings, comments and brackets.
    ///
    /// Returns the offset and the terminator byte, or the source length and
    /// `None` at end of input.
    fn scan_prelude(&self) -> Result<(usize, Option<u8>), ParseError> {
        let mut depth = 0usize;
        let mut i = self.pos;
        while let Some(&b) = self.bytes.get(i) {
            match b {
                b'\\' => {
                    i += 2;
                    continue;
                }
                b'"' | b'\'' => {
                    i = self.skip_string(i)?;
                    continue;
                }
                b'/' if self.bytes.get(i + 1) == Some(&b'*') => {
                    i = self.skip_comment(i)?;
                    continue;
                }
                b'#' | b'@' if self.bytes.get(i + 1) == Some(&b'{') => {
                    // preprocessor interpolation: `#{$var}`, `@{var}`
                    i = self.src[i + 2..]
                        .find('}')
                        .map_or(self.bytes.len(), |p| i + 2 + p + 1);
                    continue;
                }
                b'(' | b'[' => depth += 1,
                b')' | b']' => depth = depth.saturating_sub(1),
                b';' | b'{' | b'}' if depth == 0 => return Ok((i, Some(b))),
                _ => {}
            }
            i += 1;
        }
        Ok((self.bytes.len(), None))
    }

    /// Returns the offset just past the string starting at `start`.
    fn skip_string(&self, start: usize) -> Result<usize, ParseError> {
        let quote = self.bytes[start];
        let mut i = start + 1;
        while let Some(&b) = self.bytes.get(i) {
            if b == b'\\' {
                i += 2;
                continue;
            }
            if b == quote {
                return Ok(i + 1);
            }
            i += 1;
        }
        Err(ParseError::UnclosedString { offset: start })
    }

    /// Returns the offset just past the comment starting at `start`.
    fn skip_comment(&self, start: usize) -> Result<usize, ParseError> {
        self.src[start + 2..]
            .find("*/")
            .map(|p| start + 2 + p + 2)
            .ok_or(ParseError::UnclosedComment { offset: start })
    }

    fn skip_whitespace(&mut self) {
        while self
            .bytes
            .get(self.pos)
            .is_some_and(u8::is_ascii_whitespace)
        {
            self.pos += 1;
        }
    }
}
