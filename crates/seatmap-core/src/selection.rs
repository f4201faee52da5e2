// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Pure selection transitions: pick the target seat, flip its state, and
//! describe the side effects for the caller to run in order.

use crate::asset::SeatAsset;
use crate::grid::GridPosition;
use crate::layout::SeatMap;
use crate::seat::{SeatIndex, SeatState};
use crate::transition::TransitionOptions;
use tracing::debug;

/// Direction of a selection change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// `Unselected -> Selected`.
    Selected,
    /// `Selected -> Unselected`.
    Deselected,
}

/// A seat that just changed state.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionChange {
    /// What happened.
    pub kind: ChangeKind,
    /// Seat index in the current map.
    pub seat: SeatIndex,
    /// Grid identity of the seat.
    pub position: GridPosition,
    /// The seat's visual.
    pub asset: SeatAsset,
}

/// Side effect of a toggle, in the order it must run.
#[derive(Clone, Debug, PartialEq)]
pub enum SelectionEffect {
    /// Tell the delegate.
    Notify(SelectionChange),
    /// Move the seat to `target_lift` above its resting placement.
    Transition {
        /// Seat to move.
        seat: SeatIndex,
        /// Lift to end at.
        target_lift: f32,
    },
}

/// First candidate the permission check accepts.
///
/// `candidates` must already be ordered nearest first. The check runs lazily
/// and stops at the first accepted seat.
pub fn choose<F>(map: &SeatMap, candidates: &[SeatIndex], mut can_select: F) -> Option<SeatIndex>
where
    F: FnMut(GridPosition) -> bool,
{
    candidates.iter().copied().find(|index| {
        let Some(seat) = map.seat(*index) else {
            return false;
        };
        let allowed = can_select(seat.position());
        if !allowed {
            debug!(position = %seat.position(), "selection refused");
        }
        allowed
    })
}

/// Flips `seat` and returns its effects: notification first, then motion.
///
/// Unknown indices produce no effects.
pub fn toggle(map: &mut SeatMap, seat: SeatIndex, options: &TransitionOptions) -> Vec<SelectionEffect> {
    let Some(node) = map.seat_mut(seat) else {
        return Vec::new();
    };
    let next = node.state().toggled();
    node.set_state(next);
    let (kind, target_lift) = match next {
        SeatState::Selected => (ChangeKind::Selected, options.rise),
        SeatState::Unselected => (ChangeKind::Deselected, 0.0),
    };
    debug!(position = %node.position(), ?kind, "seat toggled");
    vec![
        SelectionEffect::Notify(SelectionChange {
            kind,
            seat,
            position: node.position(),
            asset: node.asset().clone(),
        }),
        SelectionEffect::Transition { seat, target_lift },
    ]
}
