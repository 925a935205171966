//! Parser.

use crate::definition::{ParseAction, ParseTable};
use std::fmt;

/// A trait for abstracting token symbols.
pub trait Token {
    /// Return the terminal number corresponding to this token.
    fn terminal(&self) -> u16;
}

impl Token for u16 {
    fn terminal(&self) -> u16 {
        *self
    }
}

/// The terminal number passed to the tables at the end of input.
const EOI: u16 = 0;

/// The shift/reduce driver based on the generated parse table.
#[derive(Debug)]
pub struct Parser<TDef, TTok>
where
    TDef: ParseTable,
    TTok: Token,
{
    definition: TDef,
    state_stack: Vec<u32>,
    // `Some(None)` means that the end of input has been peeked.
    peeked_token: Option<Option<TTok>>,
    accepted: bool,
}

impl<TDef, TTok> Parser<TDef, TTok>
where
    TDef: ParseTable,
    TTok: Token,
{
    /// Create an instance of `Parser` using the specified parse table.
    pub fn new(definition: TDef) -> Self {
        let initial_state = definition.initial_state();
        Self {
            definition,
            state_stack: vec![initial_state],
            peeked_token: None,
            accepted: false,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// The states currently on the stack, bottom first.
    pub fn states(&self) -> &[u32] {
        &self.state_stack[..]
    }

    /// Consume at most one token and drive the state machine by one step.
    pub fn next_event<I, E>(&mut self, tokens: &mut I) -> Result<ParseEvent<TTok>, ParseError<E>>
    where
        I: Iterator<Item = Result<TTok, E>>,
        E: fmt::Display,
    {
        if self.accepted {
            return Err(ParseError::AlreadyAccepted);
        }

        let current = self
            .state_stack
            .last()
            .copied()
            .ok_or(ParseError::EmptyStateStack)?;

        if self.peeked_token.is_none() {
            let token = tokens.next().transpose().map_err(ParseError::Lexer)?;
            self.peeked_token = Some(token);
        }
        let lookahead = match self.peeked_token {
            Some(Some(ref token)) => token.terminal(),
            _ => EOI,
        };

        match self.definition.action(current, lookahead) {
            ParseAction::Shift(next) => match self.peeked_token.take().flatten() {
                Some(token) => {
                    self.state_stack.push(next);
                    Ok(ParseEvent::Shift(token))
                }
                None => Err(ParseError::UnexpectedEOI { state: current }),
            },

            ParseAction::Reduce { rule, lhs, len } => {
                if len >= self.state_stack.len() {
                    return Err(ParseError::EmptyStateStack);
                }
                self.state_stack.truncate(self.state_stack.len() - len);
                let top = self
                    .state_stack
                    .last()
                    .copied()
                    .ok_or(ParseError::EmptyStateStack)?;
                let next = self
                    .definition
                    .goto(top, lhs)
                    .ok_or(ParseError::InvalidGoto {
                        state: top,
                        nonterminal: lhs,
                    })?;
                self.state_stack.push(next);
                Ok(ParseEvent::Reduce { rule, lhs, len })
            }

            ParseAction::Accept => {
                self.accepted = true;
                Ok(ParseEvent::Accept)
            }

            ParseAction::Error => match self.peeked_token {
                Some(Some(..)) => Err(ParseError::UnexpectedToken {
                    state: current,
                    terminal: lookahead,
                }),
                _ => Err(ParseError::UnexpectedEOI { state: current }),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEvent<TTok> {
    Shift(TTok),
    Reduce { rule: u16, lhs: u16, len: usize },
    Accept,
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError<L: fmt::Display> {
    #[error("from lexer: {}", _0)]
    Lexer(L),

    #[error("unexpected terminal {} in state {}", terminal, state)]
    UnexpectedToken { state: u32, terminal: u16 },

    #[error("unexpected end of input in state {}", state)]
    UnexpectedEOI { state: u32 },

    #[error("missing goto on nonterminal {} in state {}", nonterminal, state)]
    InvalidGoto { state: u32, nonterminal: u16 },

    #[error("empty state stack")]
    EmptyStateStack,

    #[error("already accepted")]
    AlreadyAccepted,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::tests::single_token;
    use std::convert::Infallible;

    fn run(input: &[u16]) -> Result<Vec<ParseEvent<u16>>, ParseError<Infallible>> {
        let tables = single_token();
        let mut parser = Parser::new(&tables);
        let mut tokens = input.iter().copied().map(Ok::<_, Infallible>);
        let mut events = vec![];
        loop {
            let event = parser.next_event(&mut tokens)?;
            let accepted = event == ParseEvent::Accept;
            events.push(event);
            if accepted {
                return Ok(events);
            }
        }
    }

    #[test]
    fn accepts_single_token() {
        let events = run(&[1]).unwrap();
        assert_eq!(
            events,
            vec![
                ParseEvent::Shift(1),
                ParseEvent::Reduce {
                    rule: 0,
                    lhs: 1,
                    len: 1
                },
                ParseEvent::Accept,
            ]
        );
    }

    #[test]
    fn rejects_trailing_token() {
        let err = run(&[1, 1]).unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnexpectedToken {
                state: 1,
                terminal: 1
            }
        ));
    }

    #[test]
    fn rejects_empty_input() {
        let err = run(&[]).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEOI { state: 0 }));
    }

    #[test]
    fn lexer_errors_are_forwarded() {
        let tables = single_token();
        let mut parser = Parser::<_, u16>::new(&tables);
        let mut tokens = std::iter::once(Err::<u16, _>("bad byte"));
        let err = parser.next_event(&mut tokens).unwrap_err();
        assert!(matches!(err, ParseError::Lexer("bad byte")));
    }

    #[test]
    fn no_events_after_accept() {
        let tables = single_token();
        let mut parser = Parser::new(&tables);
        let mut tokens = [1u16].into_iter().map(Ok::<_, Infallible>);
        while parser.next_event(&mut tokens).unwrap() != ParseEvent::Accept {}
        assert!(parser.is_accepted());
        assert!(matches!(
            parser.next_event(&mut tokens),
            Err(ParseError::AlreadyAccepted)
        ));
    }
}
