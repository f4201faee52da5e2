// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Seat geometry factory: available/occupied seat and rest parts.

use crate::asset::{AssetPart, SeatAsset};
use glam::Vec3;
use seatmap_geom::Aabb;
use serde::{Deserialize, Serialize};

/// Booking state a seat visual represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatVariant {
    /// Free to book.
    Available,
    /// Already taken.
    Occupied,
}

impl SeatVariant {
    /// Lowercase tag used in part labels.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Occupied => "occupied",
        }
    }
}

impl core::fmt::Display for SeatVariant {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Supplies seat visuals per variant.
pub trait SeatFactory {
    /// The cushion part.
    fn seat(&self, variant: SeatVariant) -> AssetPart;

    /// The backrest part.
    fn rest(&self, variant: SeatVariant) -> AssetPart;

    /// A complete chair: cushion then backrest.
    fn assemble(&self, variant: SeatVariant) -> SeatAsset {
        SeatAsset::new(
            format!("chair.{variant}"),
            vec![self.seat(variant), self.rest(variant)],
        )
    }
}

/// Box-shaped chairs centered on the origin.
///
/// The cushion straddles `y = 0` on purpose; layout lifts every asset so its
/// lowest point rests on the floor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxSeatFactory {
    /// Cushion width (x).
    pub width: f32,
    /// Cushion depth (z).
    pub depth: f32,
    /// Cushion height (y).
    pub seat_height: f32,
    /// Backrest height above the cushion.
    pub rest_height: f32,
    /// Backrest thickness (z).
    pub rest_thickness: f32,
}

impl Default for BoxSeatFactory {
    fn default() -> Self {
        Self {
            width: 0.8,
            depth: 0.8,
            seat_height: 0.45,
            rest_height: 0.55,
            rest_thickness: 0.1,
        }
    }
}

impl SeatFactory for BoxSeatFactory {
    fn seat(&self, variant: SeatVariant) -> AssetPart {
        let bounds = Aabb::from_center_half_extents(
            Vec3::ZERO,
            self.width * 0.5,
            self.seat_height * 0.5,
            self.depth * 0.5,
        );
        AssetPart::new(format!("seat.{variant}"), bounds)
    }

    fn rest(&self, variant: SeatVariant) -> AssetPart {
        // Backrest sits on the far (-z) edge of the cushion.
        let top = self.seat_height * 0.5;
        let back = -self.depth * 0.5;
        let bounds = Aabb::new(
            Vec3::new(-self.width * 0.5, top, back),
            Vec3::new(self.width * 0.5, top + self.rest_height, back + self.rest_thickness),
        );
        AssetPart::new(format!("rest.{variant}"), bounds)
    }
}
