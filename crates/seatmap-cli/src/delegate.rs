// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Delegate that books against a [`Plan`]: occupied seats are refused and
//! every change is recorded for printing.

use crate::plan::Plan;
use seatmap_core::{GridPosition, SeatAsset, SeatDelegate, SeatVariant};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info};

/// What a delegate callback reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatEventKind {
    /// `did_select` fired.
    Selected,
    /// `did_deselect` fired.
    Deselected,
}

/// One recorded delegate notification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SeatEvent {
    /// Callback that fired.
    pub kind: SeatEventKind,
    /// Seat it fired for.
    pub position: GridPosition,
    /// Asset label of that seat.
    pub label: String,
}

impl core::fmt::Display for SeatEvent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let verb = match self.kind {
            SeatEventKind::Selected => "selected",
            SeatEventKind::Deselected => "deselected",
        };
        write!(f, "{verb} {} {}", self.position, self.label)
    }
}

/// Booking rules and event log for one plan.
#[derive(Debug)]
pub struct PlanDelegate {
    plan: Rc<Plan>,
    events: RefCell<Vec<SeatEvent>>,
}

impl PlanDelegate {
    /// Delegate for `plan`.
    pub fn new(plan: Rc<Plan>) -> Self {
        Self {
            plan,
            events: RefCell::new(Vec::new()),
        }
    }

    /// Removes and returns everything recorded so far.
    pub fn take_events(&self) -> Vec<SeatEvent> {
        self.events.take()
    }

    fn record(&self, kind: SeatEventKind, asset: &SeatAsset, position: GridPosition) {
        let event = SeatEvent {
            kind,
            position,
            label: asset.label().to_owned(),
        };
        info!(%event, "seat changed");
        self.events.borrow_mut().push(event);
    }
}

impl SeatDelegate for PlanDelegate {
    fn can_select_seat_at(&self, position: GridPosition) -> bool {
        let variant = self.plan.variant_at(position);
        let allowed = variant == Some(SeatVariant::Available);
        if !allowed {
            debug!(%position, ?variant, "selection refused");
        }
        allowed
    }

    fn did_select(&self, asset: &SeatAsset, position: GridPosition) {
        self.record(SeatEventKind::Selected, asset, position);
    }

    fn did_deselect(&self, asset: &SeatAsset, position: GridPosition) {
        self.record(SeatEventKind::Deselected, asset, position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seatmap_core::{BoxSeatFactory, SeatFactory};

    #[test]
    fn refuses_occupied_and_aisle_cells() {
        let plan = Rc::new(Plan::parse("AX.").unwrap());
        let delegate = PlanDelegate::new(plan);
        assert!(delegate.can_select_seat_at(GridPosition::new(0, 0)));
        assert!(!delegate.can_select_seat_at(GridPosition::new(1, 0)));
        assert!(!delegate.can_select_seat_at(GridPosition::new(2, 0)));
    }

    #[test]
    fn events_drain_in_order() {
        let delegate = PlanDelegate::new(Rc::new(Plan::parse("A").unwrap()));
        let asset = BoxSeatFactory::default().assemble(SeatVariant::Available);
        let pos = GridPosition::new(0, 0);
        delegate.did_select(&asset, pos);
        delegate.did_deselect(&asset, pos);
        let events = delegate.take_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].to_string(), "selected (0, 0) chair.available");
        assert_eq!(events[1].kind, SeatEventKind::Deselected);
        assert!(delegate.take_events().is_empty());
    }
}
