//! Non-fatal problems found while generating the tables.

use crate::{
    grammar::{Grammar, NonterminalID, RuleID, TerminalID},
    lalr::lr0::StateID,
    util::{count, display_fn},
};
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConflictKind {
    ShiftReduce,
    ReduceReduce,
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShiftReduce => f.write_str("shift/reduce"),
            Self::ReduceReduce => f.write_str("reduce/reduce"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DiagnosticKind {
    /// A nonterminal is used but never defined by any rule.
    NonterminalWithoutRules { nonterminal: NonterminalID },

    /// Resolved in favor of the shift since either side lacks precedence.
    ShiftReduceConflict {
        state: StateID,
        terminal: TerminalID,
        shift: StateID,
        rule: RuleID,
    },

    /// Resolved in favor of the rule declared later.
    ReduceReduceConflict {
        state: StateID,
        terminal: TerminalID,
        kept: RuleID,
        discarded: RuleID,
    },

    /// The rule is never reduced by the generated tables.
    UselessRule { rule: RuleID },

    /// The number of conflicts differs from `%expect` / `%expect-rr`.
    UnexpectedConflictCount {
        conflict: ConflictKind,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind) -> Self {
        let severity = match kind {
            DiagnosticKind::UnexpectedConflictCount { .. } => Severity::Error,
            _ => Severity::Warning,
        };
        Self { severity, kind }
    }

    pub fn display<'g>(&'g self, g: &'g Grammar) -> impl fmt::Display + 'g {
        display_fn(move |f| {
            write!(f, "{}: ", self.severity)?;
            match self.kind {
                DiagnosticKind::NonterminalWithoutRules { nonterminal } => write!(
                    f,
                    "the nonterminal `{}' has no rules",
                    g.nonterminals[&nonterminal]
                ),
                DiagnosticKind::ShiftReduceConflict {
                    state,
                    terminal,
                    shift,
                    rule,
                } => write!(
                    f,
                    "shift/reduce conflict in {:?} on `{}': shift to {:?} instead of reducing `{}'",
                    state,
                    g.terminals[&terminal],
                    shift,
                    g.rule(rule).display(g)
                ),
                DiagnosticKind::ReduceReduceConflict {
                    state,
                    terminal,
                    kept,
                    discarded,
                } => write!(
                    f,
                    "reduce/reduce conflict in {:?} on `{}': rule {} wins over rule {}",
                    state,
                    g.terminals[&terminal],
                    kept.into_raw(),
                    discarded.into_raw()
                ),
                DiagnosticKind::UselessRule { rule } => write!(
                    f,
                    "rule {} is useless in the parser: `{}'",
                    rule.into_raw(),
                    g.rule(rule).display(g)
                ),
                DiagnosticKind::UnexpectedConflictCount {
                    conflict,
                    expected,
                    found,
                } => write!(
                    f,
                    "expected {} but found {}",
                    count(expected, &format!("{} conflict", conflict)),
                    found
                ),
            }
        })
    }
}

/// The accumulated diagnostics, logged as they are recorded.
#[derive(Debug, Default)]
pub struct Diagnostics {
    inner: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn push(&mut self, g: &Grammar, kind: DiagnosticKind) {
        let diagnostic = Diagnostic::new(kind);
        match diagnostic.severity {
            Severity::Warning => tracing::warn!("{}", diagnostic.display(g)),
            Severity::Error => tracing::error!("{}", diagnostic.display(g)),
        }
        self.inner.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.inner
    }
}
