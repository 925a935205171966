//! The `reads` and `includes` relations over nonterminal transitions.
//!
//! See DeRemer and Pennello, Efficient Computation of LALR(1) Look-Ahead Sets
//! <https://dl.acm.org/doi/10.1145/69622.357187>

use super::{
    digraph::Digraph,
    lr0::{LR0Automaton, StateID},
};
use crate::{
    grammar::{Grammar, NonterminalID, SymbolID},
    types::{Map, Set, TerminalSet},
};
use std::fmt;

/// A nonterminal transition `(p,A)`.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Goto {
    pub from: StateID,
    pub symbol: NonterminalID,
}

impl fmt::Debug for Goto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?},{:?})", self.from, self.symbol)
    }
}

#[derive(Debug)]
pub struct Relations {
    /// The target state of every nonterminal transition, in state order.
    pub gotos: Map<Goto, StateID>,
    pub direct_reads: Map<Goto, TerminalSet>,
    /// `Read(p,A)`: the terminals readable after the transition, skipping nullable nonterminals.
    pub reads: Map<Goto, TerminalSet>,
    /// `Follow(p,A)`
    pub follows: Map<Goto, TerminalSet>,
    pub read_edges: usize,
    pub include_edges: usize,
}

pub fn relations(g: &Grammar, lr0: &LR0Automaton, nullables: &Set<NonterminalID>) -> Relations {
    // DR(p,A) = { t | p --(A)--> r --(t)--> }
    let mut gotos = Map::default();
    let mut direct_reads = Map::<Goto, TerminalSet>::default();
    for (&from, state) in &lr0.states {
        for (&symbol, &to) in &state.gotos {
            let key = Goto { from, symbol };
            gotos.insert(key, to);
            let shifts = lr0.states.get(&to).map(|to| to.shifts.keys().copied());
            direct_reads.insert(key, shifts.into_iter().flatten().collect());
        }
    }

    // (p,A) reads (r,C) <==> p --(A)--> r --(C)--> && C =>* ε
    let mut reads_graph = Digraph::<Goto, TerminalSet>::new();
    for (key, dr) in &direct_reads {
        reads_graph.node(*key, || dr.clone());
    }
    for (key, to) in &gotos {
        let Some(state) = lr0.states.get(to) else {
            continue;
        };
        for &c in state.gotos.keys() {
            if nullables.contains(&c) {
                reads_graph.add_edge(key, &Goto { from: *to, symbol: c });
            }
        }
    }
    let read_edges = reads_graph.edge_count();
    reads_graph.traverse();
    let reads = reads_graph.into_map();

    // (p,A) includes (p',B) <==> B -> βAγ, γ =>* ε, p' --(β)--> p
    let mut includes_graph = Digraph::<Goto, TerminalSet>::new();
    for (key, read) in &reads {
        includes_graph.node(*key, || read.clone());
    }
    for target in gotos.keys() {
        for &rule in g.rules_of(target.symbol) {
            let right = g.rule(rule).right();
            let Some(path) = lr0.walk(target.from, right) else {
                continue;
            };
            for (i, symbol) in right.iter().enumerate().rev() {
                let SymbolID::N(n) = *symbol else {
                    break;
                };
                let source = Goto {
                    from: path[i],
                    symbol: n,
                };
                if includes_graph.add_edge(&source, target) {
                    tracing::trace!("{:?} includes {:?}", source, target);
                }
                if !nullables.contains(&n) {
                    break;
                }
            }
        }
    }
    let include_edges = includes_graph.edge_count();
    includes_graph.traverse();
    let follows = includes_graph.into_map();

    tracing::debug!(
        "{} nonterminal transitions, {} reads edges, {} includes edges",
        gotos.len(),
        read_edges,
        include_edges
    );

    Relations {
        gotos,
        direct_reads,
        reads,
        follows,
        read_edges,
        include_edges,
    }
}
