// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Seat map core: lays seats out in 3D from a row/column grid, frames a
//! camera onto them, and turns taps into per-seat selection changes.
//!
//! # Data flow
//!
//! - A [`SeatDataSource`] supplies the grid size and one optional
//!   [`SeatAsset`] per cell.
//! - The [`LayoutEngine`] places a [`SeatNode`] per present asset under the
//!   seat-map origin and reports the [`BoundingExtent`].
//! - [`camera::frame`] centers the camera over that extent.
//! - A tap becomes a [`Ray`](seatmap_geom::Ray); hits resolve to seats via
//!   back-references ([`hit`]), the [`SeatDelegate`] vets the nearest one, and
//!   [`selection`] flips it and emits the notification and transition.
//!
//! The renderer and input system are outside this crate; [`Scene`] and
//! [`RayCaster`] are the seams they plug into.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp))]

pub mod asset;
pub mod camera;
pub mod config;
pub mod factory;
pub mod grid;
pub mod hit;
pub mod layout;
pub mod picking;
pub mod ports;
pub mod scene;
pub mod seat;
pub mod selection;
pub mod transition;
pub mod view;

pub use asset::{AssetPart, SeatAsset};
pub use camera::{Camera, FramingOptions, Viewport};
pub use config::{SceneOptions, SeatMapConfig};
pub use factory::{BoxSeatFactory, SeatFactory, SeatVariant};
pub use grid::{GridPosition, GridSequence, GridSize};
pub use layout::{BoundingExtent, LayoutEngine, LayoutOptions, SeatMap};
pub use picking::{BoundsRayCaster, RayCaster, RayHit};
pub use ports::{SeatDataSource, SeatDelegate};
pub use scene::{EntityId, EntityKind, LightKind, Scene};
pub use seat::{SeatIndex, SeatNode, SeatState};
pub use selection::{ChangeKind, SelectionChange, SelectionEffect};
pub use transition::{Animator, Easing, TransitionOptions};
pub use view::SeatBookingView;
