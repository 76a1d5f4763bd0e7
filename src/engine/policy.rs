//! Rule policies: data tables that drive the scoring traversal.
//!
//! A [`Policy`] is an ordered list of [`Rule`]s plus the set of node kinds
//! that open a nesting level. The traversal in [`super`] knows nothing about
//! individual rules, so new policies need no engine changes.

use serde::{Deserialize, Serialize};

use crate::aggregate::Metric;
use crate::tree::{NodeKind, SyntaxNode};

/// Control-flow constructs that open a nesting level in cognitive scoring.
const NESTING_KINDS: &[NodeKind] = &[
    NodeKind::If,
    NodeKind::For,
    NodeKind::While,
    NodeKind::Do,
    NodeKind::Switch,
    NodeKind::Catch,
];

/// Decision points counted by the cyclomatic policy.
const DECISION_KINDS: &[NodeKind] = &[
    NodeKind::If,
    NodeKind::For,
    NodeKind::While,
    NodeKind::Do,
    NodeKind::Catch,
    NodeKind::Ternary,
    NodeKind::SwitchLabel,
];

const LOGICAL_OPERATORS: &[&str] = &["&&", "||"];
const JUMP_KEYWORDS: &[&str] = &["break", "continue", "goto"];

const TEST_MARKERS: &[&str] = &["Test"];
const PARAMETERIZED_MARKERS: &[&str] = &["ParameterizedTest"];
const LIFECYCLE_MARKERS: &[&str] = &[
    "BeforeEach",
    "AfterEach",
    "BeforeAll",
    "AfterAll",
    "Before",
    "After",
    "BeforeClass",
    "AfterClass",
];
const MOCKING_CALLS: &[&str] = &["mock", "spy", "when", "verify"];
const ASSERTION_PREFIXES: &[&str] = &["assert"];
const FAILURE_CALLS: &[&str] = &["fail"];

/// What a matching rule adds to the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Add a fixed weight.
    Flat(u32),
    /// Add `1 + current nesting depth`.
    Nested,
}

/// Predicate over a node's text or name, checked after the kind matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// Every node of the rule's kind.
    Always,
    /// The node's source text contains any of the tokens.
    TextContainsAny(Vec<String>),
    /// The last `.` segment of the node's name equals one of the names.
    NameIn(Vec<String>),
    /// The last `.` segment of the node's name starts with one of the prefixes.
    NamePrefixIn(Vec<String>),
    /// The node's text contains the enclosing method's name.
    ///
    /// Approximate: `foo()` inside `foobar` is not recursion but `foobar()`
    /// inside `foo` matches. Kept as a substring check on purpose.
    ApproximateRecursion,
}

impl Matcher {
    fn text_contains_any(tokens: &[&str]) -> Self {
        Self::TextContainsAny(tokens.iter().map(|t| t.to_string()).collect())
    }

    fn name_in(names: &[&str]) -> Self {
        Self::NameIn(names.iter().map(|n| n.to_string()).collect())
    }

    fn name_prefix_in(prefixes: &[&str]) -> Self {
        Self::NamePrefixIn(prefixes.iter().map(|p| p.to_string()).collect())
    }

    /// Check the predicate against a node.
    pub fn matches(&self, node: &SyntaxNode, source: &str, enclosing: Option<&str>) -> bool {
        match self {
            Self::Always => true,
            Self::TextContainsAny(tokens) => {
                let text = node.text(source);
                tokens.iter().any(|t| text.contains(t.as_str()))
            }
            Self::NameIn(names) => {
                short_name(node, source).is_some_and(|name| names.iter().any(|n| n == name))
            }
            Self::NamePrefixIn(prefixes) => short_name(node, source)
                .is_some_and(|name| prefixes.iter().any(|p| name.starts_with(p.as_str()))),
            Self::ApproximateRecursion => enclosing
                .filter(|method| !method.is_empty())
                .is_some_and(|method| node.text(source).contains(method)),
        }
    }
}

/// Last `.`-separated segment of a node's name (`org.junit.Test` -> `Test`).
fn short_name<'s>(node: &SyntaxNode, source: &'s str) -> Option<&'s str> {
    node.name_text(source)
        .and_then(|name| name.rsplit('.').next())
        .map(str::trim)
}

/// One entry of a policy table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Short identifier used in diagnostics.
    pub name: String,
    /// Node kind the rule applies to.
    pub kind: NodeKind,
    /// Additional predicate.
    pub matcher: Matcher,
    /// Score contribution when the rule matches.
    pub effect: Effect,
}

impl Rule {
    pub fn new(name: impl Into<String>, kind: NodeKind, matcher: Matcher, effect: Effect) -> Self {
        Self {
            name: name.into(),
            kind,
            matcher,
            effect,
        }
    }
}

/// A scoring policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    name: String,
    rules: Vec<Rule>,
    nesting: Vec<NodeKind>,
}

impl Policy {
    /// Create an empty policy.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
            nesting: Vec::new(),
        }
    }

    /// Append a rule.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Mark a kind as nesting-inducing.
    pub fn with_nesting(mut self, kind: NodeKind) -> Self {
        if !self.nesting.contains(&kind) {
            self.nesting.push(kind);
        }
        self
    }

    /// Policy name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Whether `kind` opens a nesting level.
    pub fn nests(&self, kind: NodeKind) -> bool {
        self.nesting.contains(&kind)
    }

    /// Rules whose kind matches.
    pub fn rules_for(&self, kind: NodeKind) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(move |rule| rule.kind == kind)
    }

    /// Sonar-style cognitive complexity.
    pub fn structural() -> Self {
        let mut policy = Self::new("structural");
        for &kind in NESTING_KINDS {
            policy = policy
                .with_nesting(kind)
                .with_rule(Rule::new("control-flow", kind, Matcher::Always, Effect::Nested));
        }
        policy
            .with_rule(Rule::new(
                "logical-operator",
                NodeKind::BinaryExpression,
                Matcher::text_contains_any(LOGICAL_OPERATORS),
                Effect::Flat(1),
            ))
            .with_rule(Rule::new(
                "labeled-jump",
                NodeKind::LabeledStatement,
                Matcher::text_contains_any(JUMP_KEYWORDS),
                Effect::Flat(1),
            ))
            .with_rule(Rule::new(
                "recursion",
                NodeKind::MethodInvocation,
                Matcher::ApproximateRecursion,
                Effect::Flat(1),
            ))
    }

    /// Structural rules plus weights for test-framework idioms.
    pub fn test_aware() -> Self {
        let mut policy = Self::structural();
        policy.name = "test_aware".to_string();
        policy
            .with_rule(Rule::new(
                "test-marker",
                NodeKind::Annotation,
                Matcher::name_in(TEST_MARKERS),
                Effect::Flat(1),
            ))
            .with_rule(Rule::new(
                "parameterized-test",
                NodeKind::Annotation,
                Matcher::name_in(PARAMETERIZED_MARKERS),
                Effect::Flat(2),
            ))
            .with_rule(Rule::new(
                "lifecycle",
                NodeKind::Annotation,
                Matcher::name_in(LIFECYCLE_MARKERS),
                Effect::Flat(1),
            ))
            .with_rule(Rule::new(
                "mocking",
                NodeKind::MethodInvocation,
                Matcher::name_in(MOCKING_CALLS),
                Effect::Flat(1),
            ))
            .with_rule(Rule::new(
                "assertion",
                NodeKind::MethodInvocation,
                Matcher::name_prefix_in(ASSERTION_PREFIXES),
                Effect::Flat(1),
            ))
            .with_rule(Rule::new(
                "explicit-failure",
                NodeKind::MethodInvocation,
                Matcher::name_in(FAILURE_CALLS),
                Effect::Flat(1),
            ))
            .with_rule(Rule::new(
                "assert-statement",
                NodeKind::AssertStatement,
                Matcher::Always,
                Effect::Flat(1),
            ))
    }

    /// Decision-point count without nesting weights.
    pub fn cyclomatic() -> Self {
        let mut policy = Self::new("cyclomatic");
        for &kind in DECISION_KINDS {
            policy = policy.with_rule(Rule::new(
                "decision",
                kind,
                Matcher::Always,
                Effect::Flat(1),
            ));
        }
        policy.with_rule(Rule::new(
            "logical-operator",
            NodeKind::BinaryExpression,
            Matcher::text_contains_any(LOGICAL_OPERATORS),
            Effect::Flat(1),
        ))
    }
}

/// Built-in policy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    Structural,
    TestAware,
    Cyclomatic,
}

impl PolicyKind {
    /// All built-in policies.
    pub const ALL: [PolicyKind; 3] = [Self::Structural, Self::TestAware, Self::Cyclomatic];

    /// Build the policy table.
    pub fn policy(self) -> Policy {
        match self {
            Self::Structural => Policy::structural(),
            Self::TestAware => Policy::test_aware(),
            Self::Cyclomatic => Policy::cyclomatic(),
        }
    }

    /// Metric produced by scoring with this policy.
    pub fn metric(self) -> Metric {
        match self {
            Self::Structural => Metric::Cognitive,
            Self::TestAware => Metric::TestAware,
            Self::Cyclomatic => Metric::Cyclomatic,
        }
    }
}
