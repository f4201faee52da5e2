// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Collaborator ports: where the seat map pulls its data from and whom it
//! tells about selection changes.
//!
//! Both are held weakly by the view; implementors use interior mutability
//! for any bookkeeping they need.

use crate::asset::SeatAsset;
use crate::grid::{GridPosition, GridSize};

/// Pull-side collaborator, consulted on every build and reload.
pub trait SeatDataSource {
    /// Bounds of the grid to walk.
    fn grid_size(&self) -> GridSize;

    /// Visual for one cell; `None` leaves the cell empty.
    fn asset_at(&self, position: GridPosition) -> Option<SeatAsset>;
}

/// Push-side collaborator, told about every selection change.
pub trait SeatDelegate {
    /// Whether the seat at `position` may be toggled at all.
    fn can_select_seat_at(&self, position: GridPosition) -> bool;

    /// The seat at `position` became selected.
    fn did_select(&self, asset: &SeatAsset, position: GridPosition);

    /// The seat at `position` became unselected.
    fn did_deselect(&self, asset: &SeatAsset, position: GridPosition);
}
