//! LALR(1) parse table generation.
//!
//! The lookahead sets are computed by DeRemer and Pennello's method over
//! the canonical LR(0) collection.

pub mod compress;
pub mod digraph;
pub mod lookahead;
pub mod lr0;
pub mod nullable;
pub mod relations;
pub mod table;

use self::{
    lookahead::Reduce,
    lr0::{State, StateID},
    relations::Goto,
    table::ParseTable,
};
use crate::{
    diagnostic::{Diagnostic, DiagnosticKind, Diagnostics},
    grammar::{Grammar, NonterminalID, RuleID},
    types::{Map, Set, TerminalSet},
    util::display_fn,
};
use std::fmt;

/// The LR(0) automaton annotated with LALR(1) lookaheads.
#[derive(Debug)]
pub struct Automaton {
    pub states: Map<StateID, State>,
    pub start: StateID,
    pub nullables: Set<NonterminalID>,
    /// `Read(p,A)` for every nonterminal transition.
    pub reads: Map<Goto, TerminalSet>,
    /// `Follow(p,A)` for every nonterminal transition.
    pub follows: Map<Goto, TerminalSet>,
    pub lookbacks: Map<Reduce, Set<Goto>>,
    pub lookaheads: Map<Reduce, TerminalSet>,
    pub default_reduces: Map<StateID, RuleID>,
}

impl Automaton {
    pub fn build(g: &Grammar) -> Self {
        let lr0 = lr0::lr0(g);
        tracing::debug!("LR(0) automaton: {} states", lr0.states.len());

        let nullables = nullable::nullables(g);
        let relations = relations::relations(g, &lr0, &nullables);
        let lookbacks = lookahead::lookbacks(g, &lr0, &relations.gotos);
        let lookaheads = lookahead::lookaheads(&lr0, &lookbacks, &relations.follows);
        let default_reduces = lookahead::default_reduces(g, &lookaheads);

        Self {
            states: lr0.states,
            start: lr0.start,
            nullables,
            reads: relations.reads,
            follows: relations.follows,
            lookbacks,
            lookaheads,
            default_reduces,
        }
    }

    pub fn display<'g>(&'g self, g: &'g Grammar) -> impl fmt::Display + 'g {
        display_fn(move |f| {
            for (i, (&id, state)) in self.states.iter().enumerate() {
                if i > 0 {
                    writeln!(f)?;
                }
                writeln!(f, "#### State {:?}", id)?;
                write!(f, "{}", state.display(g))?;
                if !state.reduces.is_empty() {
                    writeln!(f, "## lookaheads:")?;
                }
                for &rule in &state.reduces {
                    let lookahead = self.lookaheads.get(&Reduce { state: id, rule });
                    write!(f, "- {} :", g.rule(rule).display(g))?;
                    for t in lookahead.into_iter().flat_map(|set| set.iter()) {
                        write!(f, " {}", g.terminals[&t])?;
                    }
                    writeln!(f)?;
                }
            }
            Ok(())
        })
    }
}

/// The switches of the table generation.
#[derive(Debug, Clone)]
pub struct Config {
    default_reductions: bool,
    default_gotos: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_reductions: true,
            default_gotos: true,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether to replace the most frequent reduction of each state with
    /// a default reduction.
    pub fn default_reductions(mut self, enabled: bool) -> Self {
        self.default_reductions = enabled;
        self
    }

    /// Whether to replace the most frequent target of each goto column
    /// with a default goto.
    pub fn default_gotos(mut self, enabled: bool) -> Self {
        self.default_gotos = enabled;
        self
    }

    pub fn generate(&self, g: &Grammar) -> Output {
        let mut diagnostics = Diagnostics::default();
        for (&nonterminal, rules) in &g.rule_map {
            if rules.is_empty() {
                diagnostics.push(g, DiagnosticKind::NonterminalWithoutRules { nonterminal });
            }
        }

        let automaton = Automaton::build(g);
        let table = table::generate(g, &automaton, self, &mut diagnostics);
        let tables = compress::tables(g, &table);

        Output {
            automaton,
            table,
            tables,
            diagnostics: diagnostics.into_vec(),
        }
    }
}

#[derive(Debug)]
pub struct Output {
    pub automaton: Automaton,
    pub table: ParseTable,
    pub tables: lalrgen_runtime::Tables,
    pub diagnostics: Vec<Diagnostic>,
}

/// Generate the tables with the default configuration.
pub fn generate(g: &Grammar) -> Output {
    Config::default().generate(g)
}
