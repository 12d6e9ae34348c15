//! Keyword classifier — decides which skill of an agent handles a query.
//!
//! Precedence lives in ordered rule tables: the first rule whose predicate
//! holds decides. Keyword signals are computed once per query.

use std::sync::Arc;

use tracing::debug;

use crate::trig::calc::function_keywords;
use crate::trig::identities::{IdentityCatalog, GENERIC_IDENTITY_PHRASES};
use crate::trig::parse_angle;

/// Any of these marks a request for code.
pub const CODE_KEYWORDS: &[&str] = &[
    "code",
    "python",
    "generate code",
    "write code",
    "function",
    "script",
    "program",
];

/// Phrases that ask for a numeric evaluation (in addition to function names).
pub const CALCULATION_PHRASES: &[&str] =
    &["calculate", "value of", "evaluate", "what is", "find the"];

/// Tie-breakers toward identities when a query looks like both.
pub const STRONG_IDENTITY_PHRASES: &[&str] = &[
    "identity",
    "identities",
    "formula",
    "formulas",
    "list",
    "show",
    "tell me about",
];

/// Trigonometry topics the coding agent accepts.
pub const CODING_TOPIC_KEYWORDS: &[&str] = &[
    "sin",
    "sine",
    "cos",
    "cosine",
    "tan",
    "tangent",
    "trigonometry",
    "angle sum",
    "double angle",
    "half angle",
    "identity",
];

/// Phrases that send a code-looking query back to calculation or identities.
pub const CODING_EXCLUDED_PHRASES: &[&str] = &[
    "calculate",
    "value of",
    "what is",
    "list",
    "show",
    "tell me about",
    "formula",
    "identities",
];

/// Which agent is classifying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentRole {
    Trigonometry,
    Coding,
}

/// Classification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Code request on an agent that does not write code.
    RejectAsCode,
    Calculation,
    Identity,
    AmbiguousPreferIdentity,
    AmbiguousPreferCalculation,
    GenerateCode,
    Unrecognized,
}

/// Keyword facts about one query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Signals {
    pub code_request: bool,
    /// Function name or calculation phrase, and an angle parsed.
    pub calculation: bool,
    pub identity: bool,
    pub strong_identity: bool,
    pub coding_topic: bool,
    pub coding_excluded: bool,
}

fn contains_any<'a>(text: &str, keywords: impl IntoIterator<Item = &'a str>) -> bool {
    keywords.into_iter().any(|k| text.contains(k))
}

impl Signals {
    /// Gather signals from lower-cased, trimmed text.
    pub fn gather(text: &str, catalog: &IdentityCatalog) -> Self {
        let mentions_calculation = contains_any(text, function_keywords())
            || contains_any(text, CALCULATION_PHRASES.iter().copied());

        Self {
            code_request: contains_any(text, CODE_KEYWORDS.iter().copied()),
            calculation: mentions_calculation && parse_angle(text).is_some(),
            identity: contains_any(text, catalog.keywords())
                || contains_any(text, GENERIC_IDENTITY_PHRASES.iter().copied()),
            strong_identity: contains_any(text, STRONG_IDENTITY_PHRASES.iter().copied()),
            coding_topic: contains_any(text, CODING_TOPIC_KEYWORDS.iter().copied()),
            coding_excluded: contains_any(text, CODING_EXCLUDED_PHRASES.iter().copied()),
        }
    }
}

/// One row of a rule table.
pub struct Rule {
    pub name: &'static str,
    pub applies: fn(&Signals) -> bool,
    pub intent: Intent,
}

/// Trigonometry agent precedence.
pub const TRIGONOMETRY_RULES: &[Rule] = &[
    Rule {
        name: "reject-code",
        applies: |s| s.code_request,
        intent: Intent::RejectAsCode,
    },
    Rule {
        name: "calculation-only",
        applies: |s| s.calculation && !s.identity,
        intent: Intent::Calculation,
    },
    Rule {
        name: "identity-only",
        applies: |s| s.identity && !s.calculation,
        intent: Intent::Identity,
    },
    Rule {
        name: "ambiguous-identity",
        applies: |s| s.calculation && s.identity && s.strong_identity,
        intent: Intent::AmbiguousPreferIdentity,
    },
    Rule {
        name: "ambiguous-calculation",
        applies: |s| s.calculation && s.identity,
        intent: Intent::AmbiguousPreferCalculation,
    },
];

/// Coding agent precedence.
pub const CODING_RULES: &[Rule] = &[Rule {
    name: "generate-code",
    applies: |s| s.code_request && s.coding_topic && !s.coding_excluded,
    intent: Intent::GenerateCode,
}];

/// Rule-table classifier for one agent role.
#[derive(Debug, Clone)]
pub struct Classifier {
    role: AgentRole,
    catalog: Arc<IdentityCatalog>,
}

impl Classifier {
    pub fn new(role: AgentRole, catalog: Arc<IdentityCatalog>) -> Self {
        Self { role, catalog }
    }

    pub fn role(&self) -> AgentRole {
        self.role
    }

    fn rules(&self) -> &'static [Rule] {
        match self.role {
            AgentRole::Trigonometry => TRIGONOMETRY_RULES,
            AgentRole::Coding => CODING_RULES,
        }
    }

    /// Classify raw query text. Lower-cases and trims first.
    pub fn classify(&self, query: &str) -> Intent {
        let text = query.trim().to_lowercase();
        let signals = Signals::gather(&text, &self.catalog);
        let rule = self.rules().iter().find(|r| (r.applies)(&signals));
        debug!(
            "classified '{text}' as {:?} via {} ({signals:?})",
            rule.map(|r| r.intent).unwrap_or(Intent::Unrecognized),
            rule.map(|r| r.name).unwrap_or("fallthrough"),
        );
        rule.map(|r| r.intent).unwrap_or(Intent::Unrecognized)
    }
}
