//! Selector sub-parser.
//!
//! Parses a rule's selector text into a small tree, enough to locate
//! pseudo-classes and pseudo-elements with their offsets. Offsets
//! (`source_index`) are relative to the selector text that was parsed.

use thiserror::Error;

/// Pseudo-classes whose arguments are themselves selector lists.
const SELECTOR_ARGUMENT_PSEUDOS: &[&str] = &[
    "any",
    "current",
    "deep",
    "future",
    "global",
    "has",
    "host",
    "host-context",
    "is",
    "local",
    "matches",
    "not",
    "past",
    "slotted",
    "where",
];

/// Errors produced while parsing a selector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// A compound selector was empty (e.g. `a,,b`).
    #[error("Expected a selector at offset {offset}")]
    EmptySelector {
        /// Offset where a selector was expected.
        offset: usize,
    },

    /// A `:` or `.` or `#` was not followed by a name.
    #[error("Expected a name at offset {offset}")]
    ExpectedName {
        /// Offset of the prefix character.
        offset: usize,
    },

    /// A `(` or `[` was never closed.
    #[error("Unclosed bracket at offset {offset}")]
    Unclosed {
        /// Offset of the opening bracket.
        offset: usize,
    },

    /// A character that cannot start a selector component.
    #[error("Unexpected character '{ch}' at offset {offset}")]
    UnexpectedCharacter {
        /// The character.
        ch: char,
        /// Its offset.
        offset: usize,
    },
}

/// A comma-separated list of selectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    /// The selectors, in source order.
    pub selectors: Vec<Selector>,
}

/// One complex selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// Components, including combinators, in source order.
    pub components: Vec<Component>,
    /// Offset of the first component.
    pub source_index: usize,
}

/// Kind of a selector component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    /// `div`, `svg|rect`, `50%`
    Tag,
    /// `*`
    Universal,
    /// `.name`
    Class,
    /// `#name`
    Id,
    /// `[attr=value]`
    Attribute,
    /// `&`
    Nesting,
    /// ` `, `>`, `+`, `~`
    Combinator,
    /// `:hover`, `::before`
    Pseudo,
}

/// A single selector component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    /// What this component is.
    pub kind: ComponentKind,
    /// Textual form, including any prefix (`.`, `#`, `:`, `::`).
    pub value: String,
    /// Offset of the first character of `value`.
    pub source_index: usize,
    /// Parsed arguments for pseudos such as `:not(...)`.
    pub arguments: Option<SelectorList>,
}

impl SelectorList {
    /// Visits every pseudo component, including those nested in pseudo arguments.
    pub fn walk_pseudos<'a, F>(&'a self, mut f: F)
    where
        F: FnMut(&'a Component),
    {
        walk_pseudos_in(self, &mut f);
    }
}

fn walk_pseudos_in<'a>(list: &'a SelectorList, f: &mut dyn FnMut(&'a Component)) {
    for selector in &list.selectors {
        for component in &selector.components {
            if component.kind == ComponentKind::Pseudo {
                f(component);
            }
            if let Some(arguments) = &component.arguments {
                walk_pseudos_in(arguments, f);
            }
        }
    }
}

/// Parses selector text.
///
/// # Errors
///
/// Returns a [`SelectorError`] when the text is not a well-formed selector list.
pub fn parse(selector: &str) -> Result<SelectorList, SelectorError> {
    let mut parser = SelectorParser {
        src: selector,
        pos: 0,
    };
    parser.parse_list(None)
}

struct SelectorParser<'s> {
    src: &'s str,
    pos: usize,
}

impl SelectorParser<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_whitespace) {
            self.bump();
        }
    }

    /// Parses selectors up to EOF, or up to the `)` matching the `(` at `open`.
    fn parse_list(&mut self, open: Option<usize>) -> Result<SelectorList, SelectorError> {
        let mut selectors = Vec::new();
        loop {
            selectors.push(self.parse_selector()?);
            match (self.peek(), open) {
                (Some(','), _) => self.bump(),
                (Some(')'), Some(_)) => {
                    self.bump();
                    return Ok(SelectorList { selectors });
                }
                (None, None) => return Ok(SelectorList { selectors }),
                (None, Some(offset)) => return Err(SelectorError::Unclosed { offset }),
                (Some(ch), _) => {
                    return Err(SelectorError::UnexpectedCharacter {
                        ch,
                        offset: self.pos,
                    })
                }
            }
        }
    }

    fn parse_selector(&mut self) -> Result<Selector, SelectorError> {
        self.skip_whitespace();
        let source_index = self.pos;
        let mut components = Vec::new();

        while let Some(c) = self.peek() {
            let start = self.pos;
            match c {
                ',' | ')' => break,
                c if is_whitespace(c) || matches!(c, '>' | '+' | '~') => {
                    self.skip_whitespace();
                    let value = match self.peek() {
                        Some(op @ ('>' | '+' | '~')) => {
                            self.bump();
                            self.skip_whitespace();
                            op.to_string()
                        }
                        Some(',' | ')') | None => break,
                        Some(_) => " ".to_string(),
                    };
                    components.push(self.component(ComponentKind::Combinator, value, start));
                }
                '.' | '#' => {
                    self.bump();
                    if self.read_ident() == 0 {
                        return Err(SelectorError::ExpectedName { offset: start });
                    }
                    let kind = if c == '.' {
                        ComponentKind::Class
                    } else {
                        ComponentKind::Id
                    };
                    let value = self.src[start..self.pos].to_string();
                    components.push(self.component(kind, value, start));
                }
                '*' => {
                    self.bump();
                    components.push(self.component(ComponentKind::Universal, "*".into(), start));
                }
                '&' => {
                    self.bump();
                    components.push(self.component(ComponentKind::Nesting, "&".into(), start));
                }
                '[' => {
                    self.skip_balanced(start, '[', ']')?;
                    let value = self.src[start..self.pos].to_string();
                    components.push(self.component(ComponentKind::Attribute, value, start));
                }
                ':' => components.push(self.parse_pseudo()?),
                c if is_ident_char(c) => {
                    self.read_ident();
                    let value = self.src[start..self.pos].to_string();
                    components.push(self.component(ComponentKind::Tag, value, start));
                }
                ch => {
                    return Err(SelectorError::UnexpectedCharacter { ch, offset: start });
                }
            }
        }

        if components.is_empty() {
            return Err(SelectorError::EmptySelector {
                offset: source_index,
            });
        }
        Ok(Selector {
            components,
            source_index,
        })
    }

    fn parse_pseudo(&mut self) -> Result<Component, SelectorError> {
        let start = self.pos;
        self.bump();
        if self.peek() == Some(':') {
            self.bump();
        }
        let name_start = self.pos;
        if self.read_ident() == 0 {
            return Err(SelectorError::ExpectedName { offset: start });
        }
        let value = self.src[start..self.pos].to_string();
        let name = self.src[name_start..self.pos].to_ascii_lowercase();

        let mut arguments = None;
        if self.peek() == Some('(') {
            let open = self.pos;
            if SELECTOR_ARGUMENT_PSEUDOS.contains(&crate::utils::syntax::vendor_unprefixed(&name)) {
                self.bump();
                arguments = Some(self.parse_list(Some(open))?);
            } else {
                self.skip_balanced(open, '(', ')')?;
            }
        }

        Ok(Component {
            kind: ComponentKind::Pseudo,
            value,
            source_index: start,
            arguments,
        })
    }

    fn component(&self, kind: ComponentKind, value: String, source_index: usize) -> Component {
        Component {
            kind,
            value,
            source_index,
            arguments: None,
        }
    }

    /// Consumes identifier characters and escapes; returns the number of bytes read.
    fn read_ident(&mut self) -> usize {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == '\\' {
                self.bump();
                self.bump();
            } else if is_ident_char(c) {
                self.bump();
            } else {
                break;
            }
        }
        self.pos - start
    }

    /// Consumes a bracketed group starting at `open`, honoring quotes and nesting.
    fn skip_balanced(&mut self, open: usize, left: char, right: char) -> Result<(), SelectorError> {
        let mut depth = 0usize;
        let mut quote: Option<char> = None;
        while let Some(c) = self.peek() {
            self.bump();
            match (quote, c) {
                (_, '\\') => self.bump(),
                (Some(q), c) if c == q => quote = None,
                (Some(_), _) => {}
                (None, '"' | '\'') => quote = Some(c),
                (None, c) if c == left => depth += 1,
                (None, c) if c == right => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                (None, _) => {}
            }
        }
        Err(SelectorError::Unclosed { offset: open })
    }
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0c')
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '|' | '%') || !c.is_ascii()
}
