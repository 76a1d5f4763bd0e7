//! Complexity scoring over owned syntax trees.
//!
//! The engine walks a tree once, asks the [`Policy`] which rules apply to
//! each node and tracks nesting depth. All language knowledge lives in the
//! [`crate::tree`] provider and all scoring knowledge lives in the policy
//! table, so this module is only the traversal.

pub mod policy;

use serde::{Deserialize, Serialize};

use crate::tree::{SyntaxNode, SyntaxTree};

pub use policy::{Effect, Matcher, Policy, PolicyKind, Rule};

/// Traversal strategy.
///
/// Both strategies produce the same score; `Iterative` keeps its state on
/// the heap and is safe for arbitrarily deep trees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Traversal {
    Recursive,
    #[default]
    Iterative,
}

/// Mutable state threaded through one scoring run.
#[derive(Debug, Clone, Default)]
pub struct ScoringContext<'a> {
    /// Accumulated score.
    pub score: u32,
    /// Current nesting depth.
    pub depth: u32,
    /// Name of the method being scored, for recursion detection.
    pub enclosing: Option<&'a str>,
}

impl<'a> ScoringContext<'a> {
    pub fn new(enclosing: Option<&'a str>) -> Self {
        Self {
            score: 0,
            depth: 0,
            enclosing,
        }
    }

    /// Apply every matching rule to `node` and report whether it nests.
    fn visit(&mut self, node: &SyntaxNode, source: &str, policy: &Policy) -> bool {
        for rule in policy.rules_for(node.kind) {
            if rule.matcher.matches(node, source, self.enclosing) {
                let weight = match rule.effect {
                    Effect::Flat(weight) => weight,
                    Effect::Nested => self.depth.saturating_add(1),
                };
                self.score = self.score.saturating_add(weight);
            }
        }
        policy.nests(node.kind)
    }

    fn enter(&mut self) {
        self.depth = self.depth.saturating_add(1);
    }

    fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

/// Score of one method or constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodScore {
    pub name: String,
    /// One-indexed first line.
    pub start_line: usize,
    /// One-indexed last line.
    pub end_line: usize,
    pub score: u32,
}

/// Score the descendants of `root` with the default traversal.
///
/// `root` itself is never evaluated, only its children and below.
pub fn score(root: &SyntaxNode, source: &str, policy: &Policy, enclosing: Option<&str>) -> u32 {
    score_with(root, source, policy, enclosing, Traversal::default())
}

/// Score the descendants of `root` with an explicit traversal strategy.
pub fn score_with(
    root: &SyntaxNode,
    source: &str,
    policy: &Policy,
    enclosing: Option<&str>,
    traversal: Traversal,
) -> u32 {
    let mut ctx = ScoringContext::new(enclosing);
    match traversal {
        Traversal::Recursive => walk_recursive(root, source, policy, &mut ctx),
        Traversal::Iterative => walk_iterative(root, source, policy, &mut ctx),
    }
    ctx.score
}

/// File-level score of a whole tree, with no enclosing method.
pub fn score_tree(tree: &SyntaxTree, policy: &Policy, traversal: Traversal) -> u32 {
    score_with(&tree.root, &tree.source, policy, None, traversal)
}

/// Score every method and constructor in a tree, each with its own name as
/// the enclosing method. Results are in source order.
pub fn method_scores(tree: &SyntaxTree, policy: &Policy, traversal: Traversal) -> Vec<MethodScore> {
    tree.root
        .descendants()
        .filter(|node| node.kind.is_method())
        .map(|node| {
            let name = node.name_text(&tree.source).unwrap_or("<anonymous>");
            MethodScore {
                name: name.to_string(),
                start_line: node.start_row + 1,
                end_line: node.end_row + 1,
                score: score_with(node, &tree.source, policy, Some(name), traversal),
            }
        })
        .collect()
}

fn walk_recursive(node: &SyntaxNode, source: &str, policy: &Policy, ctx: &mut ScoringContext<'_>) {
    for child in &node.children {
        if ctx.visit(child, source, policy) {
            ctx.enter();
            walk_recursive(child, source, policy, ctx);
            ctx.leave();
        } else {
            walk_recursive(child, source, policy, ctx);
        }
    }
}

enum Frame<'n> {
    Enter(&'n SyntaxNode),
    Leave,
}

fn walk_iterative(root: &SyntaxNode, source: &str, policy: &Policy, ctx: &mut ScoringContext<'_>) {
    let mut stack: Vec<Frame<'_>> = root.children.iter().rev().map(Frame::Enter).collect();

    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Leave => ctx.leave(),
            Frame::Enter(node) => {
                if ctx.visit(node, source, policy) {
                    ctx.enter();
                    stack.push(Frame::Leave);
                }
                stack.extend(node.children.iter().rev().map(Frame::Enter));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeKind;

    fn node(kind: NodeKind) -> SyntaxNode {
        SyntaxNode::new(kind, 0..0)
    }

    fn both(root: &SyntaxNode, source: &str, policy: &Policy, enclosing: Option<&str>) -> u32 {
        let recursive = score_with(root, source, policy, enclosing, Traversal::Recursive);
        let iterative = score_with(root, source, policy, enclosing, Traversal::Iterative);
        assert_eq!(recursive, iterative);
        iterative
    }

    #[test]
    fn test_empty_tree_scores_zero() {
        let root = node(NodeKind::Other);
        for kind in PolicyKind::ALL {
            assert_eq!(both(&root, "", &kind.policy(), None), 0);
        }
    }

    #[test]
    fn test_root_is_not_evaluated() {
        let root = node(NodeKind::If);
        assert_eq!(both(&root, "", &Policy::structural(), None), 0);
    }

    #[test]
    fn test_single_conditional() {
        let root = node(NodeKind::Other).with_child(node(NodeKind::If));
        assert_eq!(both(&root, "", &Policy::structural(), None), 1);
    }

    #[test]
    fn test_nested_conditional_adds_depth() {
        let root = node(NodeKind::Other)
            .with_child(node(NodeKind::If).with_child(node(NodeKind::If)));
        assert_eq!(both(&root, "", &Policy::structural(), None), 3);
        assert_eq!(both(&root, "", &Policy::cyclomatic(), None), 2);
    }

    #[test]
    fn test_siblings_do_not_nest() {
        let root = node(NodeKind::Other)
            .with_child(node(NodeKind::For))
            .with_child(node(NodeKind::While))
            .with_child(node(NodeKind::Catch));
        assert_eq!(both(&root, "", &Policy::structural(), None), 3);
    }

    #[test]
    fn test_non_nesting_parent_keeps_depth() {
        let inner = node(NodeKind::Other).with_child(node(NodeKind::Switch));
        let root = node(NodeKind::Other)
            .with_child(node(NodeKind::If).with_child(node(NodeKind::Other).with_child(inner)));
        assert_eq!(both(&root, "", &Policy::structural(), None), 1 + 2);
    }

    #[test]
    fn test_logical_operator_is_flat() {
        let source = "a && b";
        let root = node(NodeKind::Other).with_child(
            node(NodeKind::If).with_child(SyntaxNode::new(NodeKind::BinaryExpression, 0..6)),
        );
        assert_eq!(both(&root, source, &Policy::structural(), None), 2);

        let plain = "a + b";
        let root = node(NodeKind::Other).with_child(SyntaxNode::new(NodeKind::BinaryExpression, 0..5));
        assert_eq!(both(&root, plain, &Policy::structural(), None), 0);
    }

    #[test]
    fn test_labeled_jump() {
        let source = "outer: for (;;) { break outer; }";
        let root = node(NodeKind::Other).with_child(
            SyntaxNode::new(NodeKind::LabeledStatement, 0..source.len())
                .with_child(SyntaxNode::new(NodeKind::For, 7..source.len())),
        );
        // +1 labeled jump, +1 loop at depth 0
        assert_eq!(both(&root, source, &Policy::structural(), None), 2);
    }

    #[test]
    fn test_recursion_requires_enclosing_name() {
        let source = "fact(n - 1)";
        let root = node(NodeKind::Other)
            .with_child(SyntaxNode::new(NodeKind::MethodInvocation, 0..11).with_name(0..4));
        let policy = Policy::structural();
        assert_eq!(both(&root, source, &policy, Some("fact")), 1);
        assert_eq!(both(&root, source, &policy, Some("other")), 0);
        assert_eq!(both(&root, source, &policy, None), 0);
    }

    #[test]
    fn test_test_aware_idioms() {
        let source = "@Test @ParameterizedTest @BeforeEach when(x) verify(y) assertTrue(z) fail()";
        let span = |s: &str| {
            let start = source.find(s).unwrap();
            start..start + s.len()
        };
        let annotation = |s: &str| {
            let name = span(s);
            SyntaxNode::new(NodeKind::Annotation, name.start - 1..name.end).with_name(name)
        };
        let call = |s: &str| SyntaxNode::new(NodeKind::MethodInvocation, span(s)).with_name(span(s));

        let root = node(NodeKind::Other)
            .with_child(annotation("Test"))
            .with_child(annotation("ParameterizedTest"))
            .with_child(annotation("BeforeEach"))
            .with_child(call("when"))
            .with_child(call("verify"))
            .with_child(call("assertTrue"))
            .with_child(call("fail"))
            .with_child(node(NodeKind::AssertStatement));

        assert_eq!(both(&root, source, &Policy::structural(), None), 0);
        // 1 + 2 + 1 + 1 + 1 + 1 + 1 + 1
        assert_eq!(both(&root, source, &Policy::test_aware(), None), 9);
    }

    #[test]
    fn test_test_aware_never_below_structural() {
        let source = "assertEquals(a && b)";
        let root = node(NodeKind::Other).with_child(
            node(NodeKind::If).with_child(
                SyntaxNode::new(NodeKind::MethodInvocation, 0..20)
                    .with_name(0..12)
                    .with_child(SyntaxNode::new(NodeKind::BinaryExpression, 13..19)),
            ),
        );
        let structural = both(&root, source, &Policy::structural(), None);
        let test_aware = both(&root, source, &Policy::test_aware(), None);
        assert_eq!(structural, 2);
        assert_eq!(test_aware, 3);
    }

    #[test]
    fn test_cyclomatic_counts_decisions() {
        let source = "x ? a || b : c";
        let root = node(NodeKind::Other)
            .with_child(
                SyntaxNode::new(NodeKind::Ternary, 0..14)
                    .with_child(SyntaxNode::new(NodeKind::BinaryExpression, 4..10)),
            )
            .with_child(
                node(NodeKind::Switch)
                    .with_child(node(NodeKind::SwitchLabel))
                    .with_child(node(NodeKind::SwitchLabel)),
            );
        assert_eq!(both(&root, source, &Policy::cyclomatic(), None), 4);
    }

    #[test]
    fn test_deep_nesting_iterative() {
        let depth = 5_000u32;
        let mut current = node(NodeKind::If);
        for _ in 1..depth {
            current = node(NodeKind::If).with_child(current);
        }
        let root = node(NodeKind::Other).with_child(current);
        let got = score_with(&root, "", &Policy::structural(), None, Traversal::Iterative);
        // 1 + 2 + ... + depth
        assert_eq!(got, depth * (depth + 1) / 2);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let root = node(NodeKind::Other)
            .with_child(node(NodeKind::If).with_child(node(NodeKind::For)))
            .with_child(node(NodeKind::Do));
        let policy = Policy::test_aware();
        let first = score(&root, "", &policy, None);
        assert_eq!(first, score(&root, "", &policy, None));
        assert_eq!(first, 4);
    }

    #[test]
    fn test_method_scores_use_method_name() {
        let source = "int fact(int n) { if (n > 1) return fact(n - 1); return 1; }";
        let call_start = source.find("fact(n").unwrap();
        let method = SyntaxNode::new(NodeKind::MethodDeclaration, 0..source.len())
            .with_name(4..8)
            .with_rows(2, 4)
            .with_child(
                SyntaxNode::new(NodeKind::If, 18..48).with_child(
                    SyntaxNode::new(NodeKind::MethodInvocation, call_start..call_start + 11)
                        .with_name(call_start..call_start + 4),
                ),
            );
        let tree = SyntaxTree::new(node(NodeKind::Other).with_child(method), source);

        let scores = method_scores(&tree, &Policy::structural(), Traversal::Iterative);
        assert_eq!(
            scores,
            vec![MethodScore {
                name: "fact".to_string(),
                start_line: 3,
                end_line: 5,
                score: 2,
            }]
        );
        // At file level there is no enclosing method, so no recursion bonus.
        assert_eq!(score_tree(&tree, &Policy::structural(), Traversal::Iterative), 1);
    }

    #[test]
    fn test_traversal_serde() {
        let t: Traversal = serde_json::from_str("\"recursive\"").unwrap();
        assert_eq!(t, Traversal::Recursive);
        assert_eq!(Traversal::default(), Traversal::Iterative);
    }
}
