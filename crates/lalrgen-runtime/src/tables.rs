//! Compressed LALR(1) parse tables.
//!
//! The action and goto tables are stored in a row-displacement encoding
//! that shares one triple of `index`/`info`/`check` arrays. The goto part
//! of each array starts at the corresponding `goto_*_offset`.
//!
//! Table values are encoded as follows:
//!
//! * `act > 0` shifts the lookahead and moves to state `act`,
//!   except that `act == accept_state` accepts the input.
//! * `act < 0` reduces by the rule `-act - 1`.
//! * `act == 0` is a syntax error.

use crate::definition::{ParseAction, ParseTable};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tables {
    /// The number of terminal symbols, `$end` included.
    pub terminal_count: usize,
    /// The number of nonterminal symbols, `$accept` included.
    pub nonterminal_count: usize,
    /// The state reached by shifting `$end` after a complete start symbol.
    pub accept_state: i32,

    pub goto_index_offset: usize,
    pub goto_info_offset: usize,
    pub goto_check_offset: usize,

    pub action_index: Vec<i32>,
    pub action_info: Vec<i32>,
    pub action_check: Vec<i32>,

    /// `rule + 1` of the default reduction for each state, or `0`.
    pub action_default: Vec<i32>,
    /// The fallback goto target for each nonterminal, or `0`.
    pub goto_default: Vec<i32>,

    /// The left-hand side nonterminal of each rule.
    pub rule_lhs: Vec<u16>,
    /// The length of the right-hand side of each rule.
    pub rule_rhs_len: Vec<u16>,
}

impl Tables {
    pub fn state_count(&self) -> usize {
        self.goto_index_offset
    }

    /// Look up the action for the pair of `state` and `token`.
    pub fn t_action(&self, state: u32, token: u16) -> i32 {
        let state = state as usize;
        let default = || -self.action_default.get(state).copied().unwrap_or(0);

        let Some(&base) = self.action_index.get(state) else {
            return 0;
        };
        let yyn = i64::from(base) + i64::from(token);
        if yyn < 0 || yyn as usize >= self.goto_check_offset {
            return default();
        }
        let yyn = yyn as usize;
        if self.action_check.get(yyn).copied() != Some(i32::from(token)) {
            return default();
        }
        self.action_info.get(yyn).copied().unwrap_or(0)
    }

    /// Look up the goto target for the pair of `state` and nonterminal `nt`.
    pub fn nt_action(&self, state: u32, nt: u16) -> i32 {
        let default = || self.goto_default.get(usize::from(nt)).copied().unwrap_or(0);

        let Some(&base) = self.action_index.get(self.goto_index_offset + state as usize) else {
            return 0;
        };
        let yyn = i64::from(base) + i64::from(nt);
        if yyn < 0 {
            return default();
        }
        let yyn = yyn as usize;
        if self.action_check.get(self.goto_check_offset + yyn).copied() != Some(i32::from(nt)) {
            return default();
        }
        self.action_info
            .get(self.goto_info_offset + yyn)
            .copied()
            .unwrap_or(0)
    }
}

impl ParseTable for Tables {
    fn initial_state(&self) -> u32 {
        0
    }

    fn action(&self, current: u32, lookahead: u16) -> ParseAction {
        let act = self.t_action(current, lookahead);
        if act == self.accept_state {
            return ParseAction::Accept;
        }
        match act {
            0 => ParseAction::Error,
            act if act > 0 => ParseAction::Shift(act as u32),
            act => {
                let rule = (-act - 1) as usize;
                match (self.rule_lhs.get(rule), self.rule_rhs_len.get(rule)) {
                    (Some(&lhs), Some(&len)) => ParseAction::Reduce {
                        rule: rule as u16,
                        lhs,
                        len: usize::from(len),
                    },
                    _ => ParseAction::Error,
                }
            }
        }
    }

    fn goto(&self, current: u32, symbol: u16) -> Option<u32> {
        match self.nt_action(current, symbol) {
            next if next > 0 => Some(next as u32),
            _ => None,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Tables for the grammar `S := a`, with terminals `$end = 0, a = 1`
    /// and nonterminals `$accept = 0, S = 1`.
    pub(crate) fn single_token() -> Tables {
        Tables {
            terminal_count: 2,
            nonterminal_count: 2,
            accept_state: 3,
            goto_index_offset: 4,
            goto_info_offset: 3,
            goto_check_offset: 3,
            action_index: vec![-1, 1, -2, -2, -2, -2, -2, -2],
            action_info: vec![2, 3, 0],
            action_check: vec![1, 0, -1],
            action_default: vec![0, 0, 1, 0],
            goto_default: vec![0, 1],
            rule_lhs: vec![1, 0],
            rule_rhs_len: vec![1, 2],
        }
    }

    #[test]
    fn t_action_hits_and_misses() {
        let tables = single_token();
        assert_eq!(tables.t_action(0, 1), 2);
        assert_eq!(tables.t_action(0, 0), 0);
        assert_eq!(tables.t_action(1, 0), 3);
        assert_eq!(tables.t_action(1, 1), 0);
        assert_eq!(tables.t_action(2, 0), -1);
        assert_eq!(tables.t_action(2, 1), -1);
        assert_eq!(tables.t_action(3, 1), 0);
    }

    #[test]
    fn nt_action_falls_back_to_default() {
        let tables = single_token();
        assert_eq!(tables.nt_action(0, 1), 1);
        assert_eq!(tables.nt_action(0, 0), 0);
    }

    #[test]
    fn decoded_actions() {
        let tables = single_token();
        assert_eq!(tables.action(0, 1), ParseAction::Shift(2));
        assert_eq!(tables.action(1, 0), ParseAction::Accept);
        assert_eq!(
            tables.action(2, 0),
            ParseAction::Reduce {
                rule: 0,
                lhs: 1,
                len: 1
            }
        );
        assert_eq!(tables.action(0, 0), ParseAction::Error);
        assert_eq!(tables.goto(0, 1), Some(1));
        assert_eq!(tables.goto(0, 0), None);
    }

    #[test]
    fn out_of_range_state() {
        let tables = single_token();
        assert_eq!(tables.t_action(42, 1), 0);
        assert_eq!(tables.nt_action(42, 1), 0);
    }
}
