//! Tree-sitter backed provider for Java sources.

use std::path::Path;

use parking_lot::Mutex;
use tree_sitter::{Language as TsLanguage, Node, Parser as TsParser, TreeCursor};

use super::{NodeKind, SyntaxErrorSite, SyntaxNode, SyntaxTree, TreeProvider};
use crate::core::{Error, Result};

/// Thread-safe Java parser pool.
///
/// Each `parse` call checks a parser out of the pool and returns it
/// afterwards, so rayon workers never wait on one another's parse.
pub struct JavaTreeProvider {
    language: TsLanguage,
    pool: Mutex<Vec<TsParser>>,
}

impl JavaTreeProvider {
    /// Create a provider, failing if the Java grammar cannot be loaded.
    pub fn new() -> Result<Self> {
        let provider = Self {
            language: tree_sitter_java::LANGUAGE.into(),
            pool: Mutex::new(Vec::new()),
        };
        let parser = provider.new_parser()?;
        provider.pool.lock().push(parser);
        Ok(provider)
    }

    fn new_parser(&self) -> Result<TsParser> {
        let mut parser = TsParser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| Error::Provider(e.to_string()))?;
        Ok(parser)
    }

    fn checkout(&self) -> Result<TsParser> {
        let pooled = self.pool.lock().pop();
        match pooled {
            Some(parser) => Ok(parser),
            None => self.new_parser(),
        }
    }
}

impl TreeProvider for JavaTreeProvider {
    fn parse(&self, source: &str, path: &Path) -> Result<SyntaxTree> {
        let mut parser = self.checkout()?;
        let parsed = parser.parse(source, None);
        self.pool.lock().push(parser);

        let tree = parsed.ok_or_else(|| Error::Parse {
            path: path.to_path_buf(),
            message: "Failed to parse file".to_string(),
        })?;

        let root = tree.root_node();
        let mut errors = Vec::new();
        let owned = convert(&mut tree.walk(), source, &mut errors);

        Ok(SyntaxTree {
            root: owned,
            source: source.to_string(),
            has_error: root.has_error(),
            errors,
        })
    }
}

/// Convert a tree-sitter tree into an owned tree.
///
/// Walks with the cursor and a stack of partially built nodes instead of
/// recursing, so deeply nested inputs cannot exhaust the call stack.
fn convert(cursor: &mut TreeCursor<'_>, source: &str, errors: &mut Vec<SyntaxErrorSite>) -> SyntaxNode {
    let mut stack = vec![owned_node(cursor.node(), source, errors)];

    loop {
        if cursor.goto_first_child() {
            stack.push(owned_node(cursor.node(), source, errors));
            continue;
        }

        loop {
            if cursor.goto_next_sibling() {
                attach_top(&mut stack);
                stack.push(owned_node(cursor.node(), source, errors));
                break;
            }
            if !cursor.goto_parent() {
                // Back at the root: everything below has been attached.
                return stack.pop().unwrap_or_else(|| SyntaxNode::new(NodeKind::Other, 0..0));
            }
            attach_top(&mut stack);
        }
    }
}

/// Pop the finished node on top of the stack into its parent.
fn attach_top(stack: &mut Vec<SyntaxNode>) {
    if stack.len() < 2 {
        return;
    }
    if let Some(done) = stack.pop() {
        if let Some(parent) = stack.last_mut() {
            parent.children.push(done);
        }
    }
}

fn owned_node(node: Node<'_>, source: &str, errors: &mut Vec<SyntaxErrorSite>) -> SyntaxNode {
    if node.is_error() || node.is_missing() {
        let start = node.start_position();
        let end = node.end_position();
        errors.push(SyntaxErrorSite {
            kind: node.kind().to_string(),
            start: (start.row, start.column),
            end: (end.row, end.column),
        });
    }

    let span = node.start_byte()..node.end_byte();
    let kind = classify(node, source);
    let name = match kind {
        NodeKind::MethodInvocation
        | NodeKind::Annotation
        | NodeKind::MethodDeclaration
        | NodeKind::ConstructorDeclaration => node
            .child_by_field_name("name")
            .map(|n| n.start_byte()..n.end_byte()),
        _ => None,
    };

    SyntaxNode {
        kind,
        span,
        name,
        start_row: node.start_position().row,
        end_row: node.end_position().row,
        children: Vec::new(),
    }
}

/// Map a tree-sitter-java node type onto the closed kind set.
fn classify(node: Node<'_>, source: &str) -> NodeKind {
    if node.is_error() {
        return NodeKind::Error;
    }
    match node.kind() {
        "if_statement" => NodeKind::If,
        "for_statement" | "enhanced_for_statement" => NodeKind::For,
        "while_statement" => NodeKind::While,
        "do_statement" => NodeKind::Do,
        "switch_expression" | "switch_statement" => NodeKind::Switch,
        "catch_clause" => NodeKind::Catch,
        "ternary_expression" => NodeKind::Ternary,
        "switch_label" => {
            let text = source.get(node.start_byte()..node.end_byte()).unwrap_or("");
            if text.trim_start().starts_with("case") {
                NodeKind::SwitchLabel
            } else {
                NodeKind::Other
            }
        }
        "binary_expression" => NodeKind::BinaryExpression,
        "labeled_statement" => NodeKind::LabeledStatement,
        "method_invocation" => NodeKind::MethodInvocation,
        "annotation" | "marker_annotation" => NodeKind::Annotation,
        "assert_statement" => NodeKind::AssertStatement,
        "method_declaration" => NodeKind::MethodDeclaration,
        "constructor_declaration" | "compact_constructor_declaration" => {
            NodeKind::ConstructorDeclaration
        }
        _ => NodeKind::Other,
    }
}
