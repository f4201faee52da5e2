// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Text seating plans.
//!
//! One line per row, first line is row 0 (nearest the camera). Glyphs:
//!
//! | glyph          | cell            |
//! |----------------|-----------------|
//! | `A` / `a`      | available seat  |
//! | `X` / `x`      | occupied seat   |
//! | `.` `_` space  | aisle (no seat) |
//!
//! The column count is the longest line; short lines are padded with aisle.
//! Trailing blank lines are ignored.

use seatmap_core::{
    BoxSeatFactory, GridPosition, GridSize, SeatAsset, SeatDataSource, SeatFactory, SeatVariant,
};
use std::str::FromStr;
use thiserror::Error;

/// Plan parsing failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    /// A character outside the plan alphabet.
    #[error("unknown glyph {glyph:?} at column {column}, row {row}")]
    UnknownGlyph {
        /// Offending character.
        glyph: char,
        /// Zero-based column.
        column: u32,
        /// Zero-based row.
        row: u32,
    },
    /// More rows or columns than a grid can address.
    #[error("plan too large: {0}")]
    TooLarge(String),
}

/// A parsed seating plan; serves seats to a view.
#[derive(Debug, Clone)]
pub struct Plan {
    rows: Vec<Vec<Option<SeatVariant>>>,
    size: GridSize,
    factory: BoxSeatFactory,
}

impl Plan {
    /// Parses plan text.
    pub fn parse(text: &str) -> Result<Self, PlanError> {
        let mut lines: Vec<&str> = text.lines().collect();
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }
        let mut rows = Vec::with_capacity(lines.len());
        for (r, line) in lines.iter().enumerate() {
            let row = u32::try_from(r).map_err(|_| PlanError::TooLarge("rows".into()))?;
            let mut cells = Vec::new();
            for (c, glyph) in line.chars().enumerate() {
                let column =
                    u32::try_from(c).map_err(|_| PlanError::TooLarge("columns".into()))?;
                let cell = match glyph {
                    'A' | 'a' => Some(SeatVariant::Available),
                    'X' | 'x' => Some(SeatVariant::Occupied),
                    '.' | '_' | ' ' => None,
                    _ => return Err(PlanError::UnknownGlyph { glyph, column, row }),
                };
                cells.push(cell);
            }
            rows.push(cells);
        }
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        let size = GridSize::new(
            u32::try_from(columns).map_err(|_| PlanError::TooLarge("columns".into()))?,
            u32::try_from(rows.len()).map_err(|_| PlanError::TooLarge("rows".into()))?,
        );
        Ok(Self {
            rows,
            size,
            factory: BoxSeatFactory::default(),
        })
    }

    /// Grid dimensions.
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Seat variant at `position`; `None` for aisles and out-of-range cells.
    pub fn variant_at(&self, position: GridPosition) -> Option<SeatVariant> {
        let row = self.rows.get(usize::try_from(position.row).ok()?)?;
        row.get(usize::try_from(position.column).ok()?).copied().flatten()
    }

    /// Number of seats, either variant.
    pub fn seat_count(&self) -> usize {
        self.rows.iter().flatten().filter(|c| c.is_some()).count()
    }
}

impl FromStr for Plan {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl SeatDataSource for Plan {
    fn grid_size(&self) -> GridSize {
        self.size
    }

    fn asset_at(&self, position: GridPosition) -> Option<SeatAsset> {
        self.variant_at(position).map(|v| self.factory.assemble(v))
    }
}
