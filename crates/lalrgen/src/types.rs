//! Utility types.

use crate::grammar::TerminalID;

type BuildHasher = std::hash::BuildHasherDefault<rustc_hash::FxHasher>;

pub type Map<K, V> = indexmap::IndexMap<K, V, BuildHasher>;
pub type Set<T> = indexmap::IndexSet<T, BuildHasher>;

/// A set of terminal symbols, stored as a bit set over the terminal indices.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TerminalSet {
    inner: bit_set::BitSet,
}

impl TerminalSet {
    pub fn contains(&self, id: TerminalID) -> bool {
        self.inner.contains(id.index())
    }
    pub fn insert(&mut self, id: TerminalID) -> bool {
        self.inner.insert(id.index())
    }
    pub fn union_with(&mut self, other: &Self) {
        self.inner.union_with(&other.inner)
    }
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
    /// The number of terminals in this set.
    pub fn len(&self) -> usize {
        self.inner.len()
    }
    /// Iterate over the terminals in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = TerminalID> + '_ {
        self.inner
            .iter()
            .filter_map(|raw| u16::try_from(raw).ok().map(TerminalID::from_raw))
    }
}

impl FromIterator<TerminalID> for TerminalSet {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = TerminalID>,
    {
        Self {
            inner: iter.into_iter().map(TerminalID::index).collect(),
        }
    }
}

impl crate::lalr::digraph::Set for TerminalSet {
    fn union_with(&mut self, other: &Self) {
        self.union_with(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_set_basics() {
        let mut set: TerminalSet = [3, 1, 4].into_iter().map(TerminalID::from_raw).collect();
        assert_eq!(set.len(), 3);
        assert!(!set.insert(TerminalID::from_raw(1)));
        assert!(set.insert(TerminalID::EOI));

        let other: TerminalSet = [5].into_iter().map(TerminalID::from_raw).collect();
        set.union_with(&other);
        let raw: Vec<_> = set.iter().map(TerminalID::into_raw).collect();
        assert_eq!(raw, [0, 1, 3, 4, 5]);
        assert!(set.contains(TerminalID::from_raw(5)));
        assert!(!TerminalSet::default().contains(TerminalID::EOI));
    }
}
