//! The digraph algorithm for propagating sets along a relation.
//!
//! `F(x) = F'(x) ∪ ⋃ { F(y) | x R y }` is solved in one depth-first
//! traversal, closing each strongly connected component as a whole.

use crate::types::Map;
use std::{cmp, hash::Hash};

pub trait Set {
    fn union_with(&mut self, other: &Self);
}

impl<T> Set for crate::types::Set<T>
where
    T: Clone + Eq + Hash,
{
    fn union_with(&mut self, other: &Self) {
        self.extend(other.iter().cloned())
    }
}

#[derive(Debug)]
struct Node<T> {
    value: T,
    edges: Vec<usize>,
    /// No edge targets this node.
    root: bool,
    /// `0` until visited, the stack depth while on the stack, `usize::MAX` once closed.
    dfn: usize,
}

/// A relation graph whose nodes are interned by key.
#[derive(Debug)]
pub struct Digraph<K, T> {
    keys: crate::types::Set<K>,
    nodes: Vec<Node<T>>,
    stack: Vec<usize>,
}

impl<K, T> Default for Digraph<K, T> {
    fn default() -> Self {
        Self {
            keys: crate::types::Set::default(),
            nodes: vec![],
            stack: vec![],
        }
    }
}

impl<K, T> Digraph<K, T>
where
    K: Eq + Hash,
    T: Set,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the node for `key`, returning its index.
    pub fn node(&mut self, key: K, init: impl FnOnce() -> T) -> usize {
        let (index, added) = self.keys.insert_full(key);
        if added {
            self.nodes.push(Node {
                value: init(),
                edges: vec![],
                root: true,
                dfn: 0,
            });
        }
        index
    }

    pub fn get(&self, key: &K) -> Option<&T> {
        let index = self.keys.get_index_of(key)?;
        Some(&self.nodes[index].value)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add the edge `from -> to`, meaning that `F(from)` includes `F(to)`.
    ///
    /// Returns `false` if either node does not exist or the edge is already present.
    pub fn add_edge(&mut self, from: &K, to: &K) -> bool {
        let (Some(x), Some(y)) = (self.keys.get_index_of(from), self.keys.get_index_of(to)) else {
            return false;
        };
        if self.nodes[x].edges.contains(&y) {
            return false;
        }
        self.nodes[x].edges.push(y);
        self.nodes[y].root = false;
        true
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|node| node.edges.len()).sum()
    }

    /// Propagate the values along the edges.
    ///
    /// Root nodes are visited first, then whatever remains unvisited
    /// (components only reachable through cycles).
    pub fn traverse(&mut self) {
        for x in 0..self.nodes.len() {
            if self.nodes[x].root && self.nodes[x].dfn == 0 {
                self.visit(x);
            }
        }
        for x in 0..self.nodes.len() {
            if self.nodes[x].dfn == 0 {
                self.visit(x);
            }
        }
    }

    fn visit(&mut self, x: usize) {
        self.stack.push(x);
        let d = self.stack.len();
        self.nodes[x].dfn = d;

        for i in 0..self.nodes[x].edges.len() {
            let y = self.nodes[x].edges[i];
            if self.nodes[y].dfn == 0 {
                self.visit(y);
            }
            self.nodes[x].dfn = cmp::min(self.nodes[x].dfn, self.nodes[y].dfn);

            if x != y {
                // F(x) <- F(x) ∪ F(y)
                let (slot, added) = get_two_mut(&mut self.nodes, x, y);
                slot.value.union_with(&added.value);
            }
        }

        if self.nodes[x].dfn != d {
            return;
        }

        while let Some(s) = self.stack.pop() {
            self.nodes[s].dfn = usize::MAX;
            if s == x {
                break;
            }
            // F(s) <- F(x)
            let (slot, added) = get_two_mut(&mut self.nodes, s, x);
            slot.value.union_with(&added.value);
        }
    }

    pub fn into_map(self) -> Map<K, T> {
        self.keys
            .into_iter()
            .zip(self.nodes.into_iter().map(|node| node.value))
            .collect()
    }
}

fn get_two_mut<V>(slice: &mut [V], x: usize, y: usize) -> (&mut V, &mut V) {
    assert!(
        x != y && cmp::max(x, y) < slice.len(),
        "index condition not satisfied"
    );
    let i = (x + y) / 2 + 1;
    let (a, b) = slice.split_at_mut(i);
    if x < y {
        (&mut a[x], &mut b[y - i])
    } else {
        (&mut b[x - i], &mut a[y])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Values = crate::types::Set<u32>;

    fn graph(nodes: &[(&'static str, u32)], edges: &[(&'static str, &'static str)]) -> Digraph<&'static str, Values> {
        let mut graph = Digraph::new();
        for &(key, value) in nodes {
            graph.node(key, || Some(value).into_iter().collect());
        }
        for (from, to) in edges {
            assert!(graph.add_edge(from, to));
        }
        graph
    }

    fn sorted(graph: &Digraph<&'static str, Values>, key: &'static str) -> Vec<u32> {
        let mut values: Vec<_> = graph.get(&key).unwrap().iter().copied().collect();
        values.sort();
        values
    }

    #[test]
    fn chain() {
        let mut g = graph(&[("a", 1), ("b", 2), ("c", 3)], &[("a", "b"), ("b", "c")]);
        g.traverse();
        assert_eq!(sorted(&g, "a"), [1, 2, 3]);
        assert_eq!(sorted(&g, "b"), [2, 3]);
        assert_eq!(sorted(&g, "c"), [3]);
    }

    #[test]
    fn cycle_is_closed_together() {
        let mut g = graph(
            &[("a", 1), ("b", 2), ("c", 3), ("d", 4)],
            &[("d", "a"), ("a", "b"), ("b", "a"), ("b", "c")],
        );
        g.traverse();
        assert_eq!(sorted(&g, "a"), [1, 2, 3]);
        assert_eq!(sorted(&g, "b"), [1, 2, 3]);
        assert_eq!(sorted(&g, "c"), [3]);
        assert_eq!(sorted(&g, "d"), [1, 2, 3, 4]);
    }

    #[test]
    fn cycle_without_roots() {
        let mut g = graph(
            &[("x", 1), ("y", 2), ("z", 3)],
            &[("x", "y"), ("y", "x"), ("z", "z")],
        );
        g.traverse();
        assert_eq!(sorted(&g, "x"), [1, 2]);
        assert_eq!(sorted(&g, "y"), [1, 2]);
        assert_eq!(sorted(&g, "z"), [3]);
    }

    #[test]
    fn edges_are_deduplicated() {
        let mut g = graph(&[("a", 1), ("b", 2)], &[("a", "b")]);
        assert!(!g.add_edge(&"a", &"b"));
        assert!(!g.add_edge(&"a", &"nothing"));
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.len(), 2);

        g.traverse();
        let map = g.into_map();
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn test_get_two_mut() {
        let mut slice = ["a", "b", "c", "d"];
        assert!(matches!(get_two_mut(&mut slice, 0, 1), t if *t.0=="a" && *t.1=="b"));
        assert!(matches!(get_two_mut(&mut slice, 1, 0), t if *t.0=="b" && *t.1=="a"));
        assert!(matches!(get_two_mut(&mut slice, 0, 2), t if *t.0=="a" && *t.1=="c"));
        assert!(matches!(get_two_mut(&mut slice, 2, 1), t if *t.0=="c" && *t.1=="b"));
        assert!(matches!(get_two_mut(&mut slice, 3, 2), t if *t.0=="d" && *t.1=="c"));
    }
}
