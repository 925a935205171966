//! Dense action/goto tables with conflict resolution.

use super::{
    lookahead::Reduce,
    lr0::StateID,
    Automaton, Config,
};
use crate::{
    diagnostic::{ConflictKind, DiagnosticKind, Diagnostics},
    grammar::{Assoc, Grammar, NonterminalID, Precedence, RuleID, TerminalID},
    types::{Map, TerminalSet},
    util::display_fn,
};
use std::{cmp::Ordering, fmt};

/// A decoded cell of the action table.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    Shift(StateID),
    Reduce(RuleID),
    Error,
}

impl Action {
    /// `+state` for shifts, `-(rule + 1)` for reductions and `0` for errors.
    pub fn encode(self) -> i32 {
        match self {
            Self::Shift(next) => next.into_raw() as i32,
            Self::Reduce(rule) => -(i32::from(rule.into_raw()) + 1),
            Self::Error => 0,
        }
    }

    pub fn decode(value: i32) -> Self {
        match value.cmp(&0) {
            Ordering::Greater => Self::Shift(StateID::from_raw(value as u32)),
            Ordering::Less => Self::Reduce(RuleID::from_raw((-value - 1) as u16)),
            Ordering::Equal => Self::Error,
        }
    }
}

#[derive(Debug)]
pub struct ParseTable {
    /// `action[state][terminal]`, encoded as in `Action::encode`.
    pub action: Vec<Vec<i32>>,
    /// `goto[state][nonterminal]`, the target state or `0`.
    pub goto: Vec<Vec<i32>>,
    /// `rule + 1` of the default reduction for each state, or `0`.
    pub action_default: Vec<i32>,
    /// The most common goto target for each nonterminal, or `0`.
    pub goto_default: Vec<i32>,
    pub accept_state: StateID,
    pub shift_reduce_conflicts: usize,
    pub reduce_reduce_conflicts: usize,
    pub useless_rules: Vec<RuleID>,
}

impl ParseTable {
    pub fn action(&self, state: StateID, terminal: TerminalID) -> Action {
        self.action
            .get(state.index())
            .and_then(|row| row.get(terminal.index()))
            .map_or(Action::Error, |&value| Action::decode(value))
    }

    pub fn default_reduce(&self, state: StateID) -> Option<RuleID> {
        match self.action_default.get(state.index()) {
            Some(&value) if value > 0 => Some(RuleID::from_raw((value - 1) as u16)),
            _ => None,
        }
    }

    /// The goto target after the default compaction has been undone.
    pub fn goto(&self, state: StateID, nonterminal: NonterminalID) -> Option<StateID> {
        let value = self
            .goto
            .get(state.index())
            .and_then(|row| row.get(nonterminal.index()))
            .copied()
            .unwrap_or(0);
        let value = match value {
            0 => self.goto_default.get(nonterminal.index()).copied().unwrap_or(0),
            value => value,
        };
        (value > 0).then(|| StateID::from_raw(value as u32))
    }

    pub fn display<'g>(&'g self, g: &'g Grammar) -> impl fmt::Display + 'g {
        display_fn(move |f| {
            for (i, (actions, gotos)) in self.action.iter().zip(&self.goto).enumerate() {
                if i > 0 {
                    writeln!(f)?;
                }
                let state = StateID::from_raw(i as u32);
                writeln!(f, "#### State {:?}", state)?;

                writeln!(f, "## actions")?;
                for (terminal, &value) in g.terminals.values().zip(actions) {
                    match Action::decode(value) {
                        Action::Shift(next) if next == self.accept_state => {
                            writeln!(f, "- {} => accept", terminal)?;
                        }
                        Action::Shift(next) => writeln!(f, "- {} => shift({:?})", terminal, next)?,
                        Action::Reduce(rule) => {
                            writeln!(f, "- {} => reduce({})", terminal, g.rule(rule).display(g))?;
                        }
                        Action::Error => (),
                    }
                }
                if let Some(rule) = self.default_reduce(state) {
                    writeln!(f, "- (default) => reduce({})", g.rule(rule).display(g))?;
                }

                writeln!(f, "## gotos")?;
                for (nonterminal, &value) in g.nonterminals.values().zip(gotos) {
                    if value != 0 {
                        writeln!(f, "- {} => goto(S#{:03})", nonterminal, value)?;
                    }
                }
            }
            Ok(())
        })
    }
}

/// Build the dense tables from the LALR(1) automaton.
pub fn generate(
    g: &Grammar,
    automaton: &Automaton,
    config: &Config,
    diagnostics: &mut Diagnostics,
) -> ParseTable {
    let states = automaton.states.len();
    let goal = g.goal_rule();

    let mut action = vec![vec![0i32; g.terminals.len()]; states];
    let mut goto = vec![vec![0i32; g.nonterminals.len()]; states];
    // Cells erased by %nonassoc; nothing else may be written there.
    let mut erased = vec![TerminalSet::default(); states];
    let mut accept_state = None;
    let mut shift_reduce_conflicts = 0;
    let mut reduce_reduce_conflicts = 0;

    for (&id, state) in &automaton.states {
        let q = id.index();
        for (t, &next) in &state.shifts {
            action[q][t.index()] = Action::Shift(next).encode();
        }
        for (n, &next) in &state.gotos {
            goto[q][n.index()] = next.into_raw() as i32;
        }

        for &rule in &state.reduces {
            if rule == goal {
                accept_state = Some(id);
                continue;
            }
            let Some(lookahead) = automaton.lookaheads.get(&Reduce { state: id, rule }) else {
                continue;
            };
            for t in lookahead.iter() {
                if erased[q].contains(t) {
                    continue;
                }
                let cell = &mut action[q][t.index()];
                match Action::decode(*cell) {
                    Action::Error => *cell = Action::Reduce(rule).encode(),

                    Action::Reduce(other) => {
                        reduce_reduce_conflicts += 1;
                        let (kept, discarded) = if rule > other {
                            (rule, other)
                        } else {
                            (other, rule)
                        };
                        *cell = Action::Reduce(kept).encode();
                        diagnostics.push(
                            g,
                            DiagnosticKind::ReduceReduceConflict {
                                state: id,
                                terminal: t,
                                kept,
                                discarded,
                            },
                        );
                    }

                    Action::Shift(next) => {
                        let shift_prec = g.terminals[&t].precedence();
                        let reduce_prec = g.rule(rule).precedence(g);
                        match resolve(shift_prec, reduce_prec) {
                            Some(Resolution::Shift) => (),
                            Some(Resolution::Reduce) => *cell = Action::Reduce(rule).encode(),
                            Some(Resolution::Error) => {
                                *cell = 0;
                                erased[q].insert(t);
                            }
                            None => {
                                shift_reduce_conflicts += 1;
                                diagnostics.push(
                                    g,
                                    DiagnosticKind::ShiftReduceConflict {
                                        state: id,
                                        terminal: t,
                                        shift: next,
                                        rule,
                                    },
                                );
                            }
                        }
                    }
                }
            }
        }
    }

    debug_assert!(accept_state.is_some(), "no state reduces the goal rule");
    let accept_state = accept_state
        .or_else(|| eoi_target(automaton, g))
        .unwrap_or(automaton.start);

    let mut reduced = vec![false; g.rules.len()];
    for &value in action.iter().flatten() {
        if let Action::Reduce(rule) = Action::decode(value) {
            reduced[rule.index()] = true;
        }
    }
    let useless_rules: Vec<_> = g
        .rules
        .keys()
        .copied()
        .filter(|&rule| rule != goal && !reduced[rule.index()])
        .collect();
    for &rule in &useless_rules {
        diagnostics.push(g, DiagnosticKind::UselessRule { rule });
    }

    let mut action_default = vec![0i32; states];
    if config.default_reductions {
        for (&id, &rule) in &automaton.default_reduces {
            let q = id.index();
            if !erased[q].is_empty() {
                continue;
            }
            let value = Action::Reduce(rule).encode();
            let row = &mut action[q];
            if !row.contains(&value) {
                continue;
            }
            for cell in row.iter_mut().filter(|cell| **cell == value) {
                *cell = 0;
            }
            action_default[q] = -value;
        }
    }

    let mut goto_default = vec![0i32; g.nonterminals.len()];
    if config.default_gotos {
        for (n, default) in goto_default.iter_mut().enumerate() {
            let mut counts = Map::<i32, usize>::default();
            for row in &goto {
                if row[n] != 0 {
                    *counts.entry(row[n]).or_default() += 1;
                }
            }
            let mode = counts
                .iter()
                .max_by(|(s1, c1), (s2, c2)| c1.cmp(c2).then_with(|| s2.cmp(s1)))
                .map(|(&state, _)| state);
            if let Some(mode) = mode {
                *default = mode;
                for row in &mut goto {
                    if row[n] == mode {
                        row[n] = 0;
                    }
                }
            }
        }
    }

    for (conflict, expected, found) in [
        (
            ConflictKind::ShiftReduce,
            g.expected_shift_reduce,
            shift_reduce_conflicts,
        ),
        (
            ConflictKind::ReduceReduce,
            g.expected_reduce_reduce,
            reduce_reduce_conflicts,
        ),
    ] {
        if expected != found {
            diagnostics.push(
                g,
                DiagnosticKind::UnexpectedConflictCount {
                    conflict,
                    expected,
                    found,
                },
            );
        }
    }

    tracing::debug!(
        "{} shift/reduce and {} reduce/reduce conflicts, {} useless rules",
        shift_reduce_conflicts,
        reduce_reduce_conflicts,
        useless_rules.len()
    );

    ParseTable {
        action,
        goto,
        action_default,
        goto_default,
        accept_state,
        shift_reduce_conflicts,
        reduce_reduce_conflicts,
        useless_rules,
    }
}

/// The state entered by shifting `$end` after the start symbol.
fn eoi_target(automaton: &Automaton, g: &Grammar) -> Option<StateID> {
    let after_start = automaton.states.get(&automaton.start)?.gotos.get(&g.start_symbol)?;
    automaton
        .states
        .get(after_start)?
        .shifts
        .get(&TerminalID::EOI)
        .copied()
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Resolution {
    Shift,
    Reduce,
    Error,
}

/// Decide a shift/reduce conflict from the precedence of the lookahead and the rule.
fn resolve(shift_prec: Option<Precedence>, reduce_prec: Option<Precedence>) -> Option<Resolution> {
    let (shift, reduce) = (shift_prec?, reduce_prec?);
    Some(match Ord::cmp(&shift.priority, &reduce.priority) {
        Ordering::Greater => Resolution::Shift,
        Ordering::Less => Resolution::Reduce,
        Ordering::Equal => match shift.assoc {
            Assoc::Left => Resolution::Reduce,
            Assoc::Right => Resolution::Shift,
            Assoc::Nonassoc => Resolution::Error,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding() {
        assert_eq!(Action::Shift(StateID::from_raw(3)).encode(), 3);
        assert_eq!(Action::Reduce(RuleID::from_raw(0)).encode(), -1);
        assert_eq!(Action::Reduce(RuleID::from_raw(4)).encode(), -5);
        assert_eq!(Action::Error.encode(), 0);
        assert_eq!(Action::decode(-1), Action::Reduce(RuleID::from_raw(0)));
        assert_eq!(Action::decode(7), Action::Shift(StateID::from_raw(7)));
        assert_eq!(Action::decode(0), Action::Error);
    }

    #[test]
    fn precedence_resolution() {
        let p = |priority, assoc| Some(Precedence::new(priority, assoc));
        assert_eq!(resolve(p(2, Assoc::Left), p(1, Assoc::Left)), Some(Resolution::Shift));
        assert_eq!(resolve(p(1, Assoc::Left), p(2, Assoc::Left)), Some(Resolution::Reduce));
        assert_eq!(resolve(p(1, Assoc::Left), p(1, Assoc::Left)), Some(Resolution::Reduce));
        assert_eq!(resolve(p(1, Assoc::Right), p(1, Assoc::Right)), Some(Resolution::Shift));
        assert_eq!(
            resolve(p(1, Assoc::Nonassoc), p(1, Assoc::Nonassoc)),
            Some(Resolution::Error)
        );
        assert_eq!(resolve(None, p(1, Assoc::Left)), None);
        assert_eq!(resolve(p(1, Assoc::Left), None), None);
    }

    #[test]
    fn accept_state_is_entered_by_eoi() {
        use crate::grammar::examples;
        for define in [examples::arithmetic, examples::nullable_chain, examples::dangling_else] {
            let grammar = Grammar::define(define).unwrap();
            let automaton = Automaton::build(&grammar);
            let mut diagnostics = Diagnostics::default();
            let table = generate(&grammar, &automaton, &Config::default(), &mut diagnostics);

            let accept = table.accept_state;
            assert_eq!(eoi_target(&automaton, &grammar), Some(accept));
            assert!(automaton.states[&accept].reduces.contains(&grammar.goal_rule()));
        }
    }
}
