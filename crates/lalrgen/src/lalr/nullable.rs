use crate::{
    grammar::{Grammar, NonterminalID, SymbolID},
    types::Set,
};

/// Calculate the set of nonterminals deriving the empty string.
pub fn nullables(g: &Grammar) -> Set<NonterminalID> {
    let mut nullables = Set::default();
    loop {
        let mut changed = false;
        for rule in g.rules.values() {
            if nullables.contains(&rule.left()) {
                continue;
            }
            let is_nullable = rule
                .right()
                .iter()
                .all(|s| matches!(s, SymbolID::N(n) if nullables.contains(n)));
            if is_nullable {
                changed |= nullables.insert(rule.left());
            }
        }
        if !changed {
            break;
        }
    }
    nullables
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::examples;

    fn nonterminal(g: &Grammar, name: &str) -> NonterminalID {
        match g.lookup(name) {
            Some(SymbolID::N(n)) => n,
            _ => panic!("{} is not a nonterminal", name),
        }
    }

    #[test]
    fn nullable_chain() {
        let grammar = Grammar::define(examples::nullable_chain).unwrap();
        let nullables = nullables(&grammar);
        for name in ["A", "B", "C"] {
            assert!(nullables.contains(&nonterminal(&grammar, name)), "{}", name);
        }
        assert!(!nullables.contains(&NonterminalID::ACCEPT));
    }

    #[test]
    fn not_nullable() {
        let grammar = Grammar::define(examples::not_nullable).unwrap();
        let nullables = nullables(&grammar);
        assert!(nullables.is_empty());
    }

    #[test]
    fn nullable_in_the_middle() {
        let grammar = Grammar::define(examples::with_nullable).unwrap();
        let nullables = nullables(&grammar);
        assert_eq!(nullables.len(), 1);
        assert!(nullables.contains(&nonterminal(&grammar, "n")));
    }
}
