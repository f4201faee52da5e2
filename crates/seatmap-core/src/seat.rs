// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The seat node: one placed seat, its grid identity and its selection flag.

use crate::asset::SeatAsset;
use crate::grid::GridPosition;
use crate::scene::EntityId;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Index of a seat within the current [`SeatMap`](crate::layout::SeatMap).
///
/// Only valid until the next rebuild.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeatIndex(pub usize);

/// Per-seat selection state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatState {
    /// Initial state.
    #[default]
    Unselected,
    /// Picked by the user.
    Selected,
}

impl SeatState {
    /// The other state.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Unselected => Self::Selected,
            Self::Selected => Self::Unselected,
        }
    }
}

/// A seat placed in the scene.
///
/// `position`, the asset and the resting transform are fixed at creation;
/// `state` is the only mutable field and it is changed exclusively by the
/// selection state machine.
#[derive(Clone, Debug)]
pub struct SeatNode {
    position: GridPosition,
    state: SeatState,
    asset: SeatAsset,
    entity: EntityId,
    asset_root: EntityId,
    world_position: Vec3,
}

impl SeatNode {
    pub(crate) fn new(
        position: GridPosition,
        asset: SeatAsset,
        entity: EntityId,
        asset_root: EntityId,
        world_position: Vec3,
    ) -> Self {
        Self {
            position,
            state: SeatState::Unselected,
            asset,
            entity,
            asset_root,
            world_position,
        }
    }

    /// Grid identity.
    pub fn position(&self) -> GridPosition {
        self.position
    }

    /// Current selection state.
    pub fn state(&self) -> SeatState {
        self.state
    }

    /// Shorthand for `state() == Selected`.
    pub fn is_selected(&self) -> bool {
        self.state == SeatState::Selected
    }

    /// The visual this seat owns.
    pub fn asset(&self) -> &SeatAsset {
        &self.asset
    }

    /// Seat container entity in the scene.
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    /// Entity the asset parts hang from; the container's sole child.
    pub fn asset_root(&self) -> EntityId {
        self.asset_root
    }

    /// Resting placement computed by layout (ignores any rise transition).
    pub fn world_position(&self) -> Vec3 {
        self.world_position
    }

    pub(crate) fn set_state(&mut self, state: SeatState) {
        self.state = state;
    }
}
