//! Owned syntax trees consumed by the scoring engine.
//!
//! The engine never parses text. A [`TreeProvider`] turns source into a
//! [`SyntaxTree`]: an immutable tree of [`SyntaxNode`]s tagged with a closed
//! [`NodeKind`], byte spans into the source, and a parse-error flag.

mod java;

use std::ops::Range;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Result, SourceFile};

pub use java::JavaTreeProvider;

/// Closed set of node categories the rule policies dispatch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    If,
    For,
    While,
    Do,
    Switch,
    Catch,
    Ternary,
    /// A `case` label; `default` labels map to `Other`.
    SwitchLabel,
    BinaryExpression,
    LabeledStatement,
    MethodInvocation,
    Annotation,
    AssertStatement,
    MethodDeclaration,
    ConstructorDeclaration,
    Error,
    Other,
}

impl NodeKind {
    /// Whether this kind declares a named, scorable method body.
    pub fn is_method(self) -> bool {
        matches!(self, Self::MethodDeclaration | Self::ConstructorDeclaration)
    }
}

/// A node of an owned syntax tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    /// Node category.
    pub kind: NodeKind,
    /// Byte span in the tree's source.
    pub span: Range<usize>,
    /// Byte span of the node's `name` field, when the grammar has one.
    pub name: Option<Range<usize>>,
    /// Zero-indexed start row.
    pub start_row: usize,
    /// Zero-indexed end row.
    pub end_row: usize,
    /// Children in source order.
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    /// Create a childless node.
    pub fn new(kind: NodeKind, span: Range<usize>) -> Self {
        Self {
            kind,
            span,
            name: None,
            start_row: 0,
            end_row: 0,
            children: Vec::new(),
        }
    }

    /// Set the span of the `name` field.
    pub fn with_name(mut self, name: Range<usize>) -> Self {
        self.name = Some(name);
        self
    }

    /// Append a child.
    pub fn with_child(mut self, child: SyntaxNode) -> Self {
        self.children.push(child);
        self
    }

    /// Set the row range.
    pub fn with_rows(mut self, start_row: usize, end_row: usize) -> Self {
        self.start_row = start_row;
        self.end_row = end_row;
        self
    }

    /// Source text covered by this node.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.span.clone()).unwrap_or("")
    }

    /// Source text of the `name` field, if any.
    pub fn name_text<'s>(&self, source: &'s str) -> Option<&'s str> {
        self.name.clone().and_then(|range| source.get(range))
    }

    /// Iterate over this node and all descendants in pre-order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

// Generated inputs can nest thousands of levels deep; drop without recursing.
impl Drop for SyntaxNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Pre-order iterator over a subtree, backed by an explicit stack.
pub struct Descendants<'a> {
    stack: Vec<&'a SyntaxNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Location of a syntax error reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxErrorSite {
    /// Grammar node type at the error (`ERROR` or the missing node's type).
    pub kind: String,
    /// Zero-indexed (row, column) of the start.
    pub start: (usize, usize),
    /// Zero-indexed (row, column) of the end.
    pub end: (usize, usize),
}

/// A parsed source file.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    /// Root node.
    pub root: SyntaxNode,
    /// Source text the spans index into.
    pub source: String,
    /// Whether the provider reported any parse error.
    pub has_error: bool,
    /// Error and missing-node locations.
    pub errors: Vec<SyntaxErrorSite>,
}

impl SyntaxTree {
    /// Build a tree from a hand-made root (no parse errors).
    pub fn new(root: SyntaxNode, source: impl Into<String>) -> Self {
        Self {
            root,
            source: source.into(),
            has_error: false,
            errors: Vec::new(),
        }
    }

    /// Number of non-blank lines in the source.
    pub fn lines_of_code(&self) -> usize {
        self.source
            .lines()
            .filter(|line| !line.trim().is_empty())
            .count()
    }

    /// Number of lines that open, continue or close a comment.
    pub fn comment_lines(&self) -> usize {
        self.source
            .lines()
            .map(str::trim)
            .filter(|line| line.starts_with("//") || line.starts_with("/*") || line.ends_with("*/"))
            .count()
    }
}

/// Source of syntax trees.
pub trait TreeProvider: Send + Sync {
    /// Parse source text into an owned tree.
    ///
    /// Trees with syntax errors are still returned with `has_error` set;
    /// `path` is only used for diagnostics.
    fn parse(&self, source: &str, path: &Path) -> Result<SyntaxTree>;

    /// Parse a loaded source file.
    fn parse_source(&self, file: &SourceFile) -> Result<SyntaxTree> {
        self.parse(&file.content, &file.path)
    }
}
