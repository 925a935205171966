//! Row-displacement compression of the dense tables.

use super::table::ParseTable;
use crate::{
    grammar::Grammar,
    types::{Map, Set},
};
use lalrgen_runtime::Tables;

/// A compressed table, looked up as `check[index[row] + col] == col ? info[..] : miss`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Compressed {
    pub index: Vec<i32>,
    pub info: Vec<i32>,
    /// The column stored in each slot, or `-1` for an unused slot.
    pub check: Vec<i32>,
}

impl Compressed {
    /// The stored value for `(row, col)`, or `None` on a miss.
    pub fn get(&self, row: usize, col: usize) -> Option<i32> {
        let yyn = i64::from(*self.index.get(row)?) + col as i64;
        let yyn = usize::try_from(yyn).ok()?;
        match self.check.get(yyn) {
            Some(&check) if check == col as i32 => self.info.get(yyn).copied(),
            _ => None,
        }
    }
}

/// Pack the non-zero cells of `rows` into shared `info`/`check` arrays.
///
/// Rows are placed densest first. A row with exactly the same cells as an
/// already placed row reuses its offset; any other row gets an offset of
/// its own, the lowest one at which all of its cells land on free slots.
/// Empty rows get the index `-columns` so that every lookup misses.
pub fn compress(rows: &[Vec<i32>], columns: usize) -> Compressed {
    let columns = columns as i32;
    let mut index = vec![-columns; rows.len()];
    let mut info = Vec::<i32>::new();
    let mut check = Vec::<i32>::new();

    let entries: Vec<Vec<(i32, i32)>> = rows
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .filter(|(_, value)| **value != 0)
                .map(|(col, &value)| (col as i32, value))
                .collect()
        })
        .collect();

    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.sort_by(|&a, &b| entries[b].len().cmp(&entries[a].len()));

    let mut placed = Map::<&[(i32, i32)], i32>::default();
    let mut offsets = Set::<i32>::default();
    let mut max_offset = None::<i32>;
    for r in order {
        let cells = &entries[r][..];
        let Some(&(first, _)) = cells.first() else {
            continue;
        };
        if let Some(&offset) = placed.get(cells) {
            index[r] = offset;
            continue;
        }

        let is_free = |offset: i32| {
            cells.iter().all(|&(col, _)| {
                check
                    .get((offset + col) as usize)
                    .map_or(true, |&slot| slot == -1)
            })
        };
        let mut offset = -first;
        while offsets.contains(&offset) || !is_free(offset) {
            offset += 1;
        }

        for &(col, value) in cells {
            let slot = (offset + col) as usize;
            if slot >= check.len() {
                info.resize(slot + 1, 0);
                check.resize(slot + 1, -1);
            }
            info[slot] = value;
            check[slot] = col;
        }
        index[r] = offset;
        offsets.insert(offset);
        placed.insert(cells, offset);
        max_offset = Some(max_offset.map_or(offset, |max| max.max(offset)));
    }

    if let Some(max) = max_offset {
        let len = (max + columns) as usize;
        if len > check.len() {
            info.resize(len, 0);
            check.resize(len, -1);
        }
    }

    Compressed { index, info, check }
}

/// Compress the action and goto tables into the arrays used at runtime.
///
/// The goto arrays are appended after the action arrays.
pub fn tables(g: &Grammar, table: &ParseTable) -> Tables {
    let action = compress(&table.action, g.terminals.len());
    let goto = compress(&table.goto, g.nonterminals.len());
    tracing::debug!(
        "compressed: {} action slots, {} goto slots",
        action.info.len(),
        goto.info.len()
    );

    let goto_index_offset = action.index.len();
    let goto_info_offset = action.info.len();
    let goto_check_offset = action.check.len();

    Tables {
        terminal_count: g.terminals.len(),
        nonterminal_count: g.nonterminals.len(),
        accept_state: table.accept_state.into_raw() as i32,
        goto_index_offset,
        goto_info_offset,
        goto_check_offset,
        action_index: [action.index, goto.index].concat(),
        action_info: [action.info, goto.info].concat(),
        action_check: [action.check, goto.check].concat(),
        action_default: table.action_default.clone(),
        goto_default: table.goto_default.clone(),
        rule_lhs: g.rules.values().map(|rule| rule.left().into_raw()).collect(),
        rule_rhs_len: g
            .rules
            .values()
            .map(|rule| rule.right().len() as u16)
            .collect(),
    }
}
