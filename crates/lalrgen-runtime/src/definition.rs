//! Parser definition.

/// The trait for abstracting the generated LALR(1) parse table.
pub trait ParseTable {
    /// Return the initial state number.
    fn initial_state(&self) -> u32;

    /// Return the action corresponding to the specified state number and
    /// lookahead terminal.
    ///
    /// The end of input is passed as the terminal `0` (`$end`).
    fn action(&self, current: u32, lookahead: u16) -> ParseAction;

    /// Return the state to transition to after reducing to `symbol`
    /// in the state `current`.
    fn goto(&self, current: u32, symbol: u16) -> Option<u32>;
}

impl<T: ?Sized> ParseTable for &T
where
    T: ParseTable,
{
    fn initial_state(&self) -> u32 {
        (**self).initial_state()
    }

    fn action(&self, current: u32, lookahead: u16) -> ParseAction {
        (**self).action(current, lookahead)
    }

    fn goto(&self, current: u32, symbol: u16) -> Option<u32> {
        (**self).goto(current, symbol)
    }
}

impl<T: ?Sized> ParseTable for std::rc::Rc<T>
where
    T: ParseTable,
{
    fn initial_state(&self) -> u32 {
        (**self).initial_state()
    }

    fn action(&self, current: u32, lookahead: u16) -> ParseAction {
        (**self).action(current, lookahead)
    }

    fn goto(&self, current: u32, symbol: u16) -> Option<u32> {
        (**self).goto(current, symbol)
    }
}

impl<T: ?Sized> ParseTable for std::sync::Arc<T>
where
    T: ParseTable,
{
    fn initial_state(&self) -> u32 {
        (**self).initial_state()
    }

    fn action(&self, current: u32, lookahead: u16) -> ParseAction {
        (**self).action(current, lookahead)
    }

    fn goto(&self, current: u32, symbol: u16) -> Option<u32> {
        (**self).goto(current, symbol)
    }
}

/// The decoded action for a pair of state and lookahead terminal.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseAction {
    /// Consume the lookahead terminal and push the specified state.
    Shift(u32),

    /// Reduce by the specified rule.
    Reduce {
        rule: u16,
        /// The left-hand side nonterminal of the rule.
        lhs: u16,
        /// The number of symbols on the right-hand side.
        len: usize,
    },

    Accept,

    /// There is no action for the lookahead terminal.
    Error,
}
