//! Rowspan reconstruction.
//!
//! The TRA transfer table shares one leg across several options by merging
//! its cells vertically. Reconstruction replays those merged cells into every
//! row they cover, so each output row describes one complete option.
//!
//! The two directions render the shared leg in different places:
//!
//! - TRA → THSR: the shared leg is the first leg. Its cells lead the row
//!   that introduces them and are missing from the rows below.
//! - THSR → TRA: the shared leg is the second leg. Its cells sit in the
//!   middle of the row; continuation rows only carry the first leg and the
//!   per-option total duration, which must stay in last position.
//!
//! Each layout is a [`MergeStrategy`]. The row sequence is folded through
//! the strategy with an explicit [`Carry`] state, so the two directions never
//! share state and each one can be tested on its own.

use crate::domain::{Cell, Direction, FlatRow, RawRow};

/// Values carried from the most recent merged cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Carry {
    /// Rows still covered by the merged cells.
    pub remaining: u32,
    /// Contents of the merged cells, in column order.
    pub values: Vec<String>,
}

impl Carry {
    fn is_active(&self) -> bool {
        self.remaining > 0
    }

    /// Record a merged cell seen in the current row.
    fn capture(&mut self, cell: &Cell) {
        self.remaining = cell.span() - 1;
        self.values.push(cell.content().to_string());
    }

    /// Consume one covered row.
    fn step(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}

/// How merged cells are replayed for one table layout.
pub trait MergeStrategy {
    /// Expand one raw row given the carry left by the rows above it.
    ///
    /// Returns the carry for the next row and the flattened row.
    fn merge_row(&self, carry: Carry, row: &[Cell]) -> (Carry, FlatRow);
}

/// TRA → THSR layout: carried cells are prepended to continuation rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeadingCarry;

impl MergeStrategy for LeadingCarry {
    fn merge_row(&self, carry: Carry, row: &[Cell]) -> (Carry, FlatRow) {
        let (mut carry, mut out) = if carry.is_active() {
            let out = carry.values.clone();
            let mut carry = carry;
            carry.step();
            (carry, out)
        } else {
            (Carry::default(), Vec::with_capacity(row.len()))
        };

        for cell in row {
            out.push(cell.content().to_string());
            if cell.is_spanning() {
                carry.capture(cell);
            }
        }

        (carry, out)
    }
}

/// THSR → TRA layout: carried cells are spliced in before the row's own
/// trailing total-duration field.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrailingSplice;

impl MergeStrategy for TrailingSplice {
    fn merge_row(&self, carry: Carry, row: &[Cell]) -> (Carry, FlatRow) {
        let mut carry = if carry.is_active() {
            carry
        } else {
            Carry::default()
        };
        let mut out = Vec::with_capacity(row.len() + carry.values.len());
        let mut introduced_span = false;

        for cell in row {
            out.push(cell.content().to_string());
            if cell.is_spanning() {
                carry.capture(cell);
                introduced_span = true;
            }
        }

        if !introduced_span && carry.is_active() {
            let total = out.pop();
            out.extend(carry.values.iter().cloned());
            out.extend(total);
            carry.step();
        }

        (carry, out)
    }
}

/// The merge strategy for a direction's table layout.
pub fn strategy_for(direction: Direction) -> &'static dyn MergeStrategy {
    match direction {
        Direction::TraToThsr => &LeadingCarry,
        Direction::ThsrToTra => &TrailingSplice,
    }
}

/// Reconstruct flat rows from the table body (header rows already removed).
///
/// Total over any input; an empty table yields no rows.
pub fn reconstruct(rows: &[RawRow], direction: Direction) -> Vec<FlatRow> {
    reconstruct_with(strategy_for(direction), rows)
}

/// Reconstruct with an explicit strategy.
pub fn reconstruct_with<S: MergeStrategy + ?Sized>(strategy: &S, rows: &[RawRow]) -> Vec<FlatRow> {
    let (_, out) = rows.iter().fold(
        (Carry::default(), Vec::with_capacity(rows.len())),
        |(carry, mut out), row| {
            let (carry, flat) = strategy.merge_row(carry, row);
            out.push(flat);
            (carry, out)
        },
    );
    out
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// A block of rows sharing one leg: the number of rows it covers and the
    /// per-row own cells.
    #[derive(Debug, Clone)]
    struct Block {
        shared: Vec<String>,
        rows: Vec<Vec<String>>,
    }

    fn text() -> impl Strategy<Value = String> {
        "[0-9A-Z:]{1,6}"
    }

    fn block(shared_width: usize, own_width: usize) -> impl Strategy<Value = Block> {
        (
            prop::collection::vec(text(), shared_width),
            prop::collection::vec(prop::collection::vec(text(), own_width), 1..5),
        )
            .prop_map(|(shared, rows)| Block { shared, rows })
    }

    /// TRA → THSR: shared first-leg cells lead the first row of each block.
    fn leading_rows(blocks: &[Block]) -> Vec<RawRow> {
        let mut rows = Vec::new();
        for b in blocks {
            let span = b.rows.len() as u32;
            for (i, own) in b.rows.iter().enumerate() {
                let mut row: RawRow = Vec::new();
                if i == 0 {
                    row.extend(b.shared.iter().map(|s| Cell::new(s.clone(), span)));
                }
                row.extend(own.iter().map(|s| Cell::single(s.clone())));
                rows.push(row);
            }
        }
        rows
    }

    /// THSR → TRA: shared second-leg cells sit between the first leg and the
    /// total duration of each block's first row.
    fn trailing_rows(blocks: &[Block]) -> Vec<RawRow> {
        let mut rows = Vec::new();
        for b in blocks {
            let span = b.rows.len() as u32;
            for (i, own) in b.rows.iter().enumerate() {
                let (first_leg, total) = own.split_at(own.len() - 1);
                let mut row: RawRow = first_leg.iter().map(|s| Cell::single(s.clone())).collect();
                if i == 0 {
                    row.extend(b.shared.iter().map(|s| Cell::new(s.clone(), span)));
                }
                row.extend(total.iter().map(|s| Cell::single(s.clone())));
                rows.push(row);
            }
        }
        rows
    }

    proptest! {
        #[test]
        fn leading_carry_conservation(blocks in prop::collection::vec(block(1, 8), 0..6)) {
            let out = reconstruct(&leading_rows(&blocks), Direction::TraToThsr);
            let expected: Vec<FlatRow> = blocks
                .iter()
                .flat_map(|b| {
                    b.rows.iter().map(move |own| {
                        b.shared.iter().chain(own.iter()).cloned().collect()
                    })
                })
                .collect();
            prop_assert_eq!(out, expected);
        }

        #[test]
        fn trailing_splice_conservation(blocks in prop::collection::vec(block(4, 5), 0..6)) {
            let out = reconstruct(&trailing_rows(&blocks), Direction::ThsrToTra);
            let expected: Vec<FlatRow> = blocks
                .iter()
                .flat_map(|b| {
                    b.rows.iter().map(move |own| {
                        let (first_leg, total) = own.split_at(own.len() - 1);
                        first_leg
                            .iter()
                            .chain(b.shared.iter())
                            .chain(total.iter())
                            .cloned()
                            .collect()
                    })
                })
                .collect();
            prop_assert_eq!(out, expected);
        }

        #[test]
        fn reconstruct_is_total_and_preserves_row_count(
            rows in prop::collection::vec(
                prop::collection::vec((text(), 0u32..5), 0..10),
                0..12,
            )
        ) {
            let rows: Vec<RawRow> = rows
                .into_iter()
                .map(|r| r.into_iter().map(|(c, s)| Cell::new(c, s)).collect())
                .collect();
            for dir in Direction::ALL {
                let out = reconstruct(&rows, dir);
                prop_assert_eq!(out.len(), rows.len());
            }
        }
    }
}
