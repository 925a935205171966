//! Canonical LR(0) collection.

use crate::{
    grammar::{Grammar, NonterminalID, RuleID, SymbolID, TerminalID},
    types::{Map, Set},
    util::display_fn,
};
use std::{collections::VecDeque, fmt};

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct StateID(u32);

impl fmt::Debug for StateID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S#{:03}", self.0)
    }
}

impl StateID {
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn into_raw(self) -> u32 {
        self.0
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A production rule with a dot position, `A ::= α . β`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Item {
    pub rule: RuleID,
    pub dot: u16,
}

impl Item {
    /// The symbol right after the dot, or `None` for a reduce item.
    pub fn next_symbol(&self, g: &Grammar) -> Option<SymbolID> {
        g.rule(self.rule).right().get(usize::from(self.dot)).copied()
    }

    pub fn is_reduce(&self, g: &Grammar) -> bool {
        usize::from(self.dot) >= g.rule(self.rule).right().len()
    }

    fn advance(self) -> Self {
        Self {
            dot: self.dot + 1,
            ..self
        }
    }

    pub fn display<'g>(&'g self, g: &'g Grammar) -> impl fmt::Display + 'g {
        display_fn(move |f| {
            let rule = g.rule(self.rule);
            write!(f, "{} ::=", g.nonterminals[&rule.left()])?;
            for (i, symbol) in rule.right().iter().enumerate() {
                if i == usize::from(self.dot) {
                    f.write_str(" .")?;
                }
                write!(f, " {}", g.symbol_name(*symbol))?;
            }
            if self.is_reduce(g) {
                f.write_str(" .")?;
            }
            Ok(())
        })
    }
}

#[derive(Debug, Clone)]
pub struct State {
    /// The items that produced this state, sorted.
    pub kernel: Vec<Item>,
    /// The kernel followed by the items added by expanding it.
    pub closure: Vec<Item>,
    pub shifts: Map<TerminalID, StateID>,
    pub gotos: Map<NonterminalID, StateID>,
    /// The rules of the reduce items in closure order.
    pub reduces: Vec<RuleID>,
}

impl State {
    pub fn transition(&self, symbol: SymbolID) -> Option<StateID> {
        match symbol {
            SymbolID::T(t) => self.shifts.get(&t).copied(),
            SymbolID::N(n) => self.gotos.get(&n).copied(),
        }
    }

    pub fn display<'g>(&'g self, g: &'g Grammar) -> impl fmt::Display + 'g {
        display_fn(move |f| {
            writeln!(f, "## items:")?;
            for (i, item) in self.closure.iter().enumerate() {
                let mark = if i < self.kernel.len() { '*' } else { '-' };
                writeln!(f, "{} {}", mark, item.display(g))?;
            }
            if !self.shifts.is_empty() {
                writeln!(f, "## shifts:")?;
                for (t, next) in &self.shifts {
                    writeln!(f, "- {} => {:?}", g.terminals[t], next)?;
                }
            }
            if !self.gotos.is_empty() {
                writeln!(f, "## gotos:")?;
                for (n, next) in &self.gotos {
                    writeln!(f, "- {} => {:?}", g.nonterminals[n], next)?;
                }
            }
            Ok(())
        })
    }
}

#[derive(Debug)]
pub struct LR0Automaton {
    pub states: Map<StateID, State>,
    pub start: StateID,
}

impl LR0Automaton {
    /// Follow the transitions from `from` over `symbols`.
    ///
    /// Returns the visited states, `from` included, or `None` if some
    /// transition is missing.
    pub fn walk(&self, from: StateID, symbols: &[SymbolID]) -> Option<Vec<StateID>> {
        let mut path = Vec::with_capacity(symbols.len() + 1);
        path.push(from);
        let mut current = from;
        for &symbol in symbols {
            current = self.states.get(&current)?.transition(symbol)?;
            path.push(current);
        }
        Some(path)
    }
}

/// Calculate the canonical LR(0) collection of the specified grammar.
pub fn lr0(g: &Grammar) -> LR0Automaton {
    let mut states = Map::<StateID, State>::default();
    let mut next_state_id = 0u32;
    let mut state_id = move || {
        let id = StateID(next_state_id);
        next_state_id += 1;
        id
    };

    let start = state_id();
    let mut pending_states = VecDeque::<(StateID, Vec<Item>)>::new();
    pending_states.push_back((
        start,
        vec![Item {
            rule: g.goal_rule(),
            dot: 0,
        }],
    ));

    let mut isocores = Map::<Vec<Item>, StateID>::default();
    while let Some((current, kernel)) = pending_states.pop_front() {
        let closure = closure(g, &kernel);

        let mut new_kernels = Map::<SymbolID, Vec<Item>>::default();
        let mut reduces = vec![];
        for item in &closure {
            match item.next_symbol(g) {
                Some(symbol) => new_kernels.entry(symbol).or_default().push(item.advance()),
                None => reduces.push(item.rule),
            }
        }

        let mut shifts = Map::default();
        let mut gotos = Map::default();
        for (symbol, mut new_kernel) in new_kernels {
            new_kernel.sort();
            let next = match isocores.get(&new_kernel) {
                Some(id) => *id,
                None => {
                    let id = state_id();
                    tracing::trace!("new state {:?} via {:?}", id, symbol);
                    isocores.insert(new_kernel.clone(), id);
                    pending_states.push_back((id, new_kernel));
                    id
                }
            };
            match symbol {
                SymbolID::T(t) => {
                    shifts.insert(t, next);
                }
                SymbolID::N(n) => {
                    gotos.insert(n, next);
                }
            }
        }

        states.insert(
            current,
            State {
                kernel,
                closure,
                shifts,
                gotos,
                reduces,
            },
        );
    }

    LR0Automaton { states, start }
}

fn closure(g: &Grammar, kernel: &[Item]) -> Vec<Item> {
    let mut items: Set<Item> = kernel.iter().copied().collect();
    let mut i = 0;
    while let Some(item) = items.get_index(i).copied() {
        i += 1;
        if let Some(SymbolID::N(n)) = item.next_symbol(g) {
            items.extend(g.rules_of(n).iter().map(|&rule| Item { rule, dot: 0 }));
        }
    }
    items.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::examples;

    #[test]
    fn arithmetic_states() {
        let grammar = Grammar::define(examples::arithmetic).unwrap();
        let lr0 = lr0(&grammar);
        for (id, state) in &lr0.states {
            eprintln!("#### {:?}\n{}", id, state.display(&grammar));
        }

        // The twelve textbook states and the one reached by `$end`.
        assert_eq!(lr0.states.len(), 13);
        assert_eq!(lr0.start, StateID::from_raw(0));

        let start = &lr0.states[&lr0.start];
        assert_eq!(
            start.kernel,
            [Item {
                rule: grammar.goal_rule(),
                dot: 0
            }]
        );
        // $accept, E, E, T, T, F, F
        assert_eq!(start.closure.len(), 7);
        assert!(start.reduces.is_empty());
    }

    #[test]
    fn kernels_are_unique() {
        let grammar = Grammar::define(examples::with_nullable).unwrap();
        let lr0 = lr0(&grammar);
        let mut kernels = Set::default();
        for state in lr0.states.values() {
            assert!(kernels.insert(state.kernel.clone()), "{:?}", state.kernel);
        }
    }

    #[test]
    fn empty_rule_reduces_in_closure() {
        let grammar = Grammar::define(examples::nullable_chain).unwrap();
        let lr0 = lr0(&grammar);
        let start = &lr0.states[&lr0.start];
        // C ::= .
        assert_eq!(start.reduces, [RuleID::from_raw(2)]);
    }

    #[test]
    fn walk_follows_transitions() {
        let grammar = Grammar::define(examples::arithmetic).unwrap();
        let lr0 = lr0(&grammar);
        let goal = grammar.rule(grammar.goal_rule());

        let path = lr0.walk(lr0.start, goal.right()).unwrap();
        assert_eq!(path.len(), 3);
        let accept = &lr0.states[&path[2]];
        assert_eq!(accept.reduces, [grammar.goal_rule()]);

        let Some(SymbolID::T(plus)) = grammar.lookup("+") else {
            panic!()
        };
        assert!(lr0.walk(lr0.start, &[SymbolID::T(plus)]).is_none());
    }

    #[test]
    fn item_display() {
        let grammar = Grammar::define(examples::arithmetic).unwrap();
        let item = Item {
            rule: RuleID::from_raw(0),
            dot: 1,
        };
        assert_eq!(item.display(&grammar).to_string(), "E ::= E . + T");
        let item = Item { dot: 3, ..item };
        assert_eq!(item.display(&grammar).to_string(), "E ::= E + T .");
    }
}
