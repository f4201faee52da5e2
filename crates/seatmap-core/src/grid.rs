// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Grid coordinates and the row-major cell sequencer used during map builds.

use core::iter::FusedIterator;
use serde::{Deserialize, Serialize};

/// A single cell of the seat grid.
///
/// Two positions are equal iff both `column` and `row` match. Ordering is
/// row-major (`row` first), which is also the build order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    /// Zero-based column (x axis).
    pub column: u32,
    /// Zero-based row (receding along -z).
    pub row: u32,
}

impl GridPosition {
    /// Creates a position from `(column, row)`.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Row-major flat index for a grid that is `columns` wide.
    #[must_use]
    pub fn flat_index(&self, columns: u32) -> u64 {
        u64::from(self.column) + u64::from(self.row) * u64::from(columns)
    }
}

impl PartialOrd for GridPosition {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GridPosition {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        (self.row, self.column).cmp(&(other.row, other.column))
    }
}

impl core::fmt::Display for GridPosition {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Iteration bounds of a seat grid. Zero in either dimension is an empty map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    /// Number of columns.
    pub columns: u32,
    /// Number of rows.
    pub rows: u32,
}

impl GridSize {
    /// Creates a size from `(columns, rows)`.
    #[must_use]
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// `true` when the grid has no cells.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.columns == 0 || self.rows == 0
    }

    /// Total number of cells.
    #[must_use]
    pub fn cell_count(&self) -> u64 {
        u64::from(self.columns) * u64::from(self.rows)
    }

    /// `true` when `position` lies inside the grid.
    #[must_use]
    pub const fn contains(&self, position: GridPosition) -> bool {
        position.column < self.columns && position.row < self.rows
    }

    /// A fresh row-major sequence over every cell.
    ///
    /// Each call starts over; the size itself is never consumed.
    #[must_use]
    pub const fn cells(&self) -> GridSequence {
        GridSequence {
            size: *self,
            row: 0,
            column: 0,
        }
    }
}

impl IntoIterator for GridSize {
    type Item = (u32, u32);
    type IntoIter = GridSequence;

    fn into_iter(self) -> Self::IntoIter {
        self.cells()
    }
}

/// Lazy row-major walk over a [`GridSize`], yielding `(row, column)` pairs.
///
/// Rows are the outer loop, columns the inner one; every pair is produced
/// exactly once.
#[derive(Clone, Debug)]
pub struct GridSequence {
    size: GridSize,
    row: u32,
    column: u32,
}

impl GridSequence {
    fn remaining(&self) -> u64 {
        if self.size.is_empty() || self.row >= self.size.rows {
            return 0;
        }
        let visited = GridPosition::new(self.column, self.row).flat_index(self.size.columns);
        self.size.cell_count() - visited
    }
}

impl Iterator for GridSequence {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.size.is_empty() || self.row >= self.size.rows {
            return None;
        }
        let item = (self.row, self.column);
        self.column += 1;
        if self.column == self.size.columns {
            self.column = 0;
            self.row += 1;
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining()) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl FusedIterator for GridSequence {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn visits_row_major() {
        let cells: Vec<_> = GridSize::new(3, 2).cells().collect();
        assert_eq!(cells, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn zero_sized_grids_are_empty() {
        assert_eq!(GridSize::new(0, 0).cells().count(), 0);
        assert_eq!(GridSize::new(4, 0).cells().count(), 0);
        assert_eq!(GridSize::new(0, 4).cells().count(), 0);
    }

    #[test]
    fn sequence_restarts_from_the_size() {
        let size = GridSize::new(2, 2);
        let first: Vec<_> = size.cells().collect();
        let second: Vec<_> = size.into_iter().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn positions_order_row_major() {
        let mut v = vec![
            GridPosition::new(1, 1),
            GridPosition::new(5, 0),
            GridPosition::new(0, 1),
        ];
        v.sort();
        assert_eq!(
            v,
            vec![
                GridPosition::new(5, 0),
                GridPosition::new(0, 1),
                GridPosition::new(1, 1)
            ]
        );
    }

    proptest! {
        #[test]
        fn visits_every_cell_exactly_once(columns in 0u32..24, rows in 0u32..24) {
            let size = GridSize::new(columns, rows);
            let seq = size.cells();
            prop_assert_eq!(seq.size_hint().0 as u64, size.cell_count());
            let cells: Vec<_> = seq.collect();
            prop_assert_eq!(cells.len() as u64, size.cell_count());
            let unique: HashSet<_> = cells.iter().copied().collect();
            prop_assert_eq!(unique.len(), cells.len());
            let mut sorted = cells.clone();
            sorted.sort_unstable();
            prop_assert_eq!(sorted, cells);
        }
    }
}
