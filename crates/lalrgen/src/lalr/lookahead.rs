//! Lookback relation and the LALR(1) lookahead sets.

use super::{
    lr0::{LR0Automaton, StateID},
    relations::Goto,
};
use crate::{
    grammar::{Grammar, RuleID},
    types::{Map, Set, TerminalSet},
};
use std::fmt;

/// A reduce item `A ::= ω .` in the state `state`.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Reduce {
    pub state: StateID,
    pub rule: RuleID,
}

impl fmt::Debug for Reduce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?},{:?})", self.state, self.rule)
    }
}

/// `(q, A ::= ω) lookback (p,A) <==> p --(ω)--> q`
pub fn lookbacks(g: &Grammar, lr0: &LR0Automaton, gotos: &Map<Goto, StateID>) -> Map<Reduce, Set<Goto>> {
    let mut lookbacks = Map::<Reduce, Set<Goto>>::default();
    for goto in gotos.keys() {
        for &rule in g.rules_of(goto.symbol) {
            let Some(path) = lr0.walk(goto.from, g.rule(rule).right()) else {
                continue;
            };
            let Some(&state) = path.last() else {
                continue;
            };
            tracing::trace!("({:?},{:?}) lookback {:?}", state, rule, goto);
            lookbacks
                .entry(Reduce { state, rule })
                .or_default()
                .insert(*goto);
        }
    }
    lookbacks
}

/// `LA(q, A ::= ω) = ⋃ { Follow(p,A) | (q, A ::= ω) lookback (p,A) }`
///
/// Every reduce item of the automaton has an entry, in state order.
pub fn lookaheads(
    lr0: &LR0Automaton,
    lookbacks: &Map<Reduce, Set<Goto>>,
    follows: &Map<Goto, TerminalSet>,
) -> Map<Reduce, TerminalSet> {
    let mut lookaheads = Map::<Reduce, TerminalSet>::default();
    for (&state, lr0_state) in &lr0.states {
        for &rule in &lr0_state.reduces {
            let key = Reduce { state, rule };
            let lookahead = lookaheads.entry(key).or_default();
            for goto in lookbacks.get(&key).into_iter().flatten() {
                if let Some(follow) = follows.get(goto) {
                    lookahead.union_with(follow);
                }
            }
        }
    }
    lookaheads
}

/// Pick the reduction with the largest lookahead set in each state.
///
/// Ties go to the reduce item appearing first in the closure. The goal
/// rule and reductions without lookaheads are never chosen.
pub fn default_reduces(g: &Grammar, lookaheads: &Map<Reduce, TerminalSet>) -> Map<StateID, RuleID> {
    let goal = g.goal_rule();
    let mut defaults = Map::<StateID, (RuleID, usize)>::default();
    for (reduce, lookahead) in lookaheads {
        if reduce.rule == goal || lookahead.is_empty() {
            continue;
        }
        let size = lookahead.len();
        match defaults.get_mut(&reduce.state) {
            Some((rule, max)) if size > *max => {
                *rule = reduce.rule;
                *max = size;
            }
            Some(..) => (),
            None => {
                defaults.insert(reduce.state, (reduce.rule, size));
            }
        }
    }
    defaults
        .into_iter()
        .map(|(state, (rule, _))| (state, rule))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        grammar::{examples, SymbolID},
        lalr::{lr0::lr0, nullable::nullables, relations::relations},
    };

    fn names(g: &Grammar, set: &TerminalSet) -> Vec<String> {
        set.iter().map(|t| g.terminals[&t].name().to_owned()).collect()
    }

    #[test]
    fn arithmetic_lookaheads() {
        let grammar = Grammar::define(examples::arithmetic).unwrap();
        let lr0 = lr0(&grammar);
        let relations = relations(&grammar, &lr0, &nullables(&grammar));
        let lookbacks = lookbacks(&grammar, &lr0, &relations.gotos);
        let lookaheads = lookaheads(&lr0, &lookbacks, &relations.follows);

        // F ::= id .
        let Some(SymbolID::T(id)) = grammar.lookup("id") else {
            panic!()
        };
        let after_id = lr0.states[&lr0.start].shifts[&id];
        let reduce = Reduce {
            state: after_id,
            rule: RuleID::from_raw(5),
        };
        assert_eq!(names(&grammar, &lookaheads[&reduce]), ["$end", "+", "*", ")"]);

        // The goal rule never has lookaheads.
        let goal = lookaheads
            .iter()
            .find(|(reduce, _)| reduce.rule == grammar.goal_rule())
            .unwrap();
        assert!(goal.1.is_empty());

        let defaults = default_reduces(&grammar, &lookaheads);
        assert_eq!(defaults[&after_id], RuleID::from_raw(5));
        assert!(!defaults.values().any(|&rule| rule == grammar.goal_rule()));
    }

    #[test]
    fn largest_lookahead_wins() {
        // stmt ::= if cond then stmt .
        // stmt ::= if cond then stmt . else stmt
        let grammar = Grammar::define(examples::dangling_else).unwrap();
        let lr0 = lr0(&grammar);
        let relations = relations(&grammar, &lr0, &nullables(&grammar));
        let lookbacks = lookbacks(&grammar, &lr0, &relations.gotos);
        let lookaheads = lookaheads(&lr0, &lookbacks, &relations.follows);
        let defaults = default_reduces(&grammar, &lookaheads);

        for (reduce, lookahead) in &lookaheads {
            if reduce.rule == grammar.goal_rule() {
                continue;
            }
            let Some(&default) = defaults.get(&reduce.state) else {
                assert!(lookahead.is_empty(), "{:?}", reduce);
                continue;
            };
            let max = lookaheads[&Reduce {
                state: reduce.state,
                rule: default,
            }]
            .len();
            assert!(lookahead.len() <= max);
        }
    }

    #[test]
    fn lookahead_through_nullable_chain() {
        let grammar = Grammar::define(examples::nullable_chain).unwrap();
        let lr0 = lr0(&grammar);
        let relations = relations(&grammar, &lr0, &nullables(&grammar));
        let lookbacks = lookbacks(&grammar, &lr0, &relations.gotos);
        let lookaheads = lookaheads(&lr0, &lookbacks, &relations.follows);

        // C ::= . in the start state
        let reduce = Reduce {
            state: lr0.start,
            rule: RuleID::from_raw(2),
        };
        assert_eq!(names(&grammar, &lookaheads[&reduce]), ["$end"]);
    }
}
