//! Raw-preserving stylesheet syntax tree.
//!
//! Every node keeps absolute byte offsets into the original source so that
//! rules can point diagnostics at the exact character of an offending token.
//!
//! ```text
//! source text
//!   ↓ parse()
//! Root { nodes: [Rule | AtRule | Decl | Comment] }
//!   ↓ walk_decls() / walk_rules() / walk_at_rules()
//! rule callbacks
//! ```

mod line_index;
pub mod list;
mod parser;
pub mod selector;

pub use line_index::LineIndex;
pub use parser::{parse, ParseError};

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Half-open byte range `[start, end)` into the stylesheet source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    /// Offset of the first byte.
    pub start: usize,
    /// Offset one past the last byte.
    pub end: usize,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the span as a `Range` usable for slicing.
    #[must_use]
    pub fn range(self) -> Range<usize> {
        self.start..self.end
    }
}

/// Maps indices in comment-free node text back to source offsets.
///
/// `selector`, `params` and `value` have their comments removed, so an index
/// into them is not a fixed distance from the node start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OffsetMap {
    start: usize,
    /// `(index in the cleaned text, removed byte count)`, ascending.
    gaps: Vec<(usize, usize)>,
}

impl OffsetMap {
    /// A map for text copied verbatim from `start`.
    #[must_use]
    pub fn contiguous(start: usize) -> Self {
        Self {
            start,
            gaps: Vec::new(),
        }
    }

    pub(crate) fn with_gaps(start: usize, gaps: Vec<(usize, usize)>) -> Self {
        Self { start, gaps }
    }

    /// Returns the source offset of `index` in the cleaned text.
    #[must_use]
    pub fn source_offset(&self, index: usize) -> usize {
        let removed: usize = self
            .gaps
            .iter()
            .take_while(|&&(at, _)| at <= index)
            .map(|&(_, len)| len)
            .sum();
        self.start + index + removed
    }
}

/// The kind of node a diagnostic is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    /// A `prop: value` declaration.
    Declaration,
    /// A style rule (`selector { ... }`).
    Rule,
    /// An at-rule (`@name params { ... }` or `@name params;`).
    AtRule,
    /// A `/* ... */` comment.
    Comment,
}

/// A parsed stylesheet. Owns its source text.
#[derive(Debug, Clone, Default)]
pub struct Root {
    source: String,
    /// Top-level nodes in source order.
    pub nodes: Vec<Node>,
}

/// A node of the syntax tree.
#[derive(Debug, Clone)]
pub enum Node {
    /// Style rule.
    Rule(StyleRule),
    /// At-rule.
    AtRule(AtRule),
    /// Declaration.
    Decl(Declaration),
    /// Comment.
    Comment(Comment),
}

impl Node {
    /// Returns the kind of this node.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Rule(_) => NodeKind::Rule,
            Self::AtRule(_) => NodeKind::AtRule,
            Self::Decl(_) => NodeKind::Declaration,
            Self::Comment(_) => NodeKind::Comment,
        }
    }

    /// Returns the source span of this node.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Rule(r) => r.span,
            Self::AtRule(a) => a.span,
            Self::Decl(d) => d.span,
            Self::Comment(c) => c.span,
        }
    }
}

/// A style rule such as `a:hover { color: red }`.
#[derive(Debug, Clone)]
pub struct StyleRule {
    /// Selector text without comments and surrounding whitespace.
    pub selector: String,
    /// Absolute offset of the first selector character.
    pub selector_offset: usize,
    /// Source offsets of `selector` indices.
    pub selector_map: OffsetMap,
    /// Span from the selector start through the closing brace.
    pub span: Span,
    /// Child nodes inside the block.
    pub nodes: Vec<Node>,
}

/// An at-rule such as `@media (width >= 600px) { ... }`.
#[derive(Debug, Clone)]
pub struct AtRule {
    /// Name without the leading `@`.
    pub name: String,
    /// Parameters without comments and surrounding whitespace.
    pub params: String,
    /// Absolute offset of the first parameter character.
    pub params_offset: usize,
    /// Source offsets of `params` indices.
    pub params_map: OffsetMap,
    /// Span from the `@` through the closing brace or semicolon.
    pub span: Span,
    /// Child nodes, or `None` for statement at-rules like `@import`.
    pub nodes: Option<Vec<Node>>,
}

/// A declaration such as `font-weight: bold !important`.
#[derive(Debug, Clone)]
pub struct Declaration {
    /// Property name as written.
    pub prop: String,
    /// Value without comments, the `!important` flag and surrounding whitespace.
    pub value: String,
    /// Whether the declaration carried `!important`.
    pub important: bool,
    /// Span from the property start through the end of the value.
    pub span: Span,
    /// Absolute offset of the first value character.
    pub value_offset: usize,
    /// Source offsets of `value` indices.
    pub value_map: OffsetMap,
}

/// A comment, including its delimiters in `span`.
#[derive(Debug, Clone)]
pub struct Comment {
    /// Text between `/*` and `*/`, trimmed.
    pub text: String,
    /// Span of the whole comment.
    pub span: Span,
}

/// The container a node sits in.
#[derive(Debug, Clone, Copy)]
pub enum Parent<'a> {
    /// Top level of the stylesheet.
    Root,
    /// Inside a style rule block.
    Rule(&'a StyleRule),
    /// Inside an at-rule block.
    AtRule(&'a AtRule),
}

impl Parent<'_> {
    /// Returns true if the parent is an at-rule with the given name (ASCII case-insensitive).
    #[must_use]
    pub fn is_at_rule_named(&self, name: &str) -> bool {
        matches!(self, Self::AtRule(at_rule) if at_rule.name.eq_ignore_ascii_case(name))
    }
}

impl Root {
    pub(crate) fn new(source: String, nodes: Vec<Node>) -> Self {
        Self { source, nodes }
    }

    /// Returns the full source text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the source text covered by `span`, or `""` if out of range.
    #[must_use]
    pub fn slice(&self, span: Span) -> &str {
        self.source.get(span.range()).unwrap_or_default()
    }

    /// Visits every declaration in document order together with its container.
    pub fn walk_decls<'a, F>(&'a self, mut f: F)
    where
        F: FnMut(&'a Declaration, Parent<'a>),
    {
        walk_decls_in(&self.nodes, Parent::Root, &mut f);
    }

    /// Visits every comment in document order, including those inside blocks.
    pub fn walk_comments<'a, F>(&'a self, mut f: F)
    where
        F: FnMut(&'a Comment),
    {
        walk_comments_in(&self.nodes, &mut f);
    }

    /// Visits every style rule in document order, including nested ones.
    pub fn walk_rules<'a, F>(&'a self, mut f: F)
    where
        F: FnMut(&'a StyleRule),
    {
        walk_rules_in(&self.nodes, &mut f);
    }

    /// Visits every at-rule in document order, including nested ones.
    pub fn walk_at_rules<'a, F>(&'a self, mut f: F)
    where
        F: FnMut(&'a AtRule),
    {
        walk_at_rules_in(&self.nodes, &mut f);
    }
}

fn children(node: &Node) -> &[Node] {
    match node {
        Node::Rule(rule) => &rule.nodes,
        Node::AtRule(at_rule) => at_rule.nodes.as_deref().unwrap_or_default(),
        Node::Decl(_) | Node::Comment(_) => &[],
    }
}

fn walk_decls_in<'a>(
    nodes: &'a [Node],
    parent: Parent<'a>,
    f: &mut dyn FnMut(&'a Declaration, Parent<'a>),
) {
    for node in nodes {
        match node {
            Node::Decl(decl) => f(decl, parent),
            Node::Rule(rule) => walk_decls_in(&rule.nodes, Parent::Rule(rule), f),
            Node::AtRule(at_rule) => {
                if let Some(nodes) = &at_rule.nodes {
                    walk_decls_in(nodes, Parent::AtRule(at_rule), f);
                }
            }
            Node::Comment(_) => {}
        }
    }
}

fn walk_comments_in<'a>(nodes: &'a [Node], f: &mut dyn FnMut(&'a Comment)) {
    for node in nodes {
        if let Node::Comment(comment) = node {
            f(comment);
        }
        walk_comments_in(children(node), f);
    }
}

fn walk_rules_in<'a>(nodes: &'a [Node], f: &mut dyn FnMut(&'a StyleRule)) {
    for node in nodes {
        if let Node::Rule(rule) = node {
            f(rule);
        }
        walk_rules_in(children(node), f);
    }
}

fn walk_at_rules_in<'a>(nodes: &'a [Node], f: &mut dyn FnMut(&'a AtRule)) {
    for node in nodes {
        if let Node::AtRule(at_rule) = node {
            f(at_rule);
        }
        walk_at_rules_in(children(node), f);
    }
}
