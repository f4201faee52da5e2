// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Layout engine: turns a grid size plus per-cell assets into positioned seat
//! nodes under the seat-map origin, and reports the map's bounding extent.
//!
//! Placement rules:
//! - `x = column * (asset width + horizontal gap)`
//! - `y = -asset min y` so the asset's lowest point rests on `y = 0`
//! - `z = -row * (asset depth + depth gap)` so row 0 is nearest the camera

use crate::asset::SeatAsset;
use crate::grid::{GridPosition, GridSize};
use crate::scene::{EntityId, EntityKind, Scene};
use crate::seat::{SeatIndex, SeatNode};
use glam::Vec3;
use seatmap_geom::{Aabb, Transform};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Spacing between neighbouring seats.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Gap between columns (x), added to the asset width.
    pub horizontal_gap: f32,
    /// Gap between rows (z), added to the asset depth.
    pub depth_gap: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            horizontal_gap: 0.2,
            depth_gap: 1.0,
        }
    }
}

/// Resting translation for an asset with local `bounds` placed at `position`.
pub fn seat_translation(position: GridPosition, bounds: &Aabb, options: &LayoutOptions) -> Vec3 {
    let size = bounds.size();
    Vec3::new(
        position.column as f32 * (size.x + options.horizontal_gap),
        -bounds.min().y,
        -(position.row as f32) * (size.z + options.depth_gap),
    )
}

/// Corner pair spanning the placed seats.
///
/// `min` is the translation of the first seat and `max` the translation of
/// the last seat in row-major order (`column + row * columns`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingExtent {
    /// Translation of the first seat.
    pub min: Vec3,
    /// Translation of the last seat.
    pub max: Vec3,
}

impl BoundingExtent {
    /// Horizontal span, `max.x - min.x`.
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }
}

/// The seats currently placed under one origin entity.
///
/// Besides the seats themselves the map keeps two lookups: grid position to
/// seat, and owned entity (container, asset root, every asset part) to seat.
/// The second one is what hit resolution consults.
#[derive(Clone, Debug)]
pub struct SeatMap {
    origin: EntityId,
    size: GridSize,
    seats: Vec<SeatNode>,
    by_position: BTreeMap<GridPosition, SeatIndex>,
    owners: BTreeMap<EntityId, SeatIndex>,
}

impl SeatMap {
    /// Empty map whose seats will hang from `origin`.
    pub fn new(origin: EntityId) -> Self {
        Self {
            origin,
            size: GridSize::default(),
            seats: Vec::new(),
            by_position: BTreeMap::new(),
            owners: BTreeMap::new(),
        }
    }

    /// Entity every seat container is attached to.
    pub fn origin(&self) -> EntityId {
        self.origin
    }

    /// Grid size of the last build.
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Number of placed seats.
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    /// `true` when no seat is placed.
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Seats in placement (row-major) order.
    pub fn seats(&self) -> &[SeatNode] {
        &self.seats
    }

    /// Seat by index.
    pub fn seat(&self, index: SeatIndex) -> Option<&SeatNode> {
        self.seats.get(index.0)
    }

    pub(crate) fn seat_mut(&mut self, index: SeatIndex) -> Option<&mut SeatNode> {
        self.seats.get_mut(index.0)
    }

    /// Index of the seat at `position`, if one was placed there.
    pub fn index_of(&self, position: GridPosition) -> Option<SeatIndex> {
        self.by_position.get(&position).copied()
    }

    /// Seat at `position`, if one was placed there.
    pub fn seat_at(&self, position: GridPosition) -> Option<&SeatNode> {
        self.index_of(position).and_then(|i| self.seat(i))
    }

    /// Seat owning `entity` directly (container, asset root or part).
    pub fn owner_of(&self, entity: EntityId) -> Option<SeatIndex> {
        self.owners.get(&entity).copied()
    }

    /// Detaches every seat from the scene and forgets them.
    ///
    /// Returns the number of scene entities removed.
    pub fn clear(&mut self, scene: &mut Scene) -> usize {
        let removed = scene.despawn_children(self.origin);
        self.seats.clear();
        self.by_position.clear();
        self.owners.clear();
        removed
    }

    /// Bounding extent of the placed seats, `None` when the map is empty.
    pub fn extent(&self) -> Option<BoundingExtent> {
        let columns = self.size.columns;
        let key = |s: &&SeatNode| s.position().flat_index(columns);
        let first = self.seats.iter().min_by_key(key)?;
        let last = self.seats.iter().max_by_key(key)?;
        Some(BoundingExtent {
            min: first.world_position(),
            max: last.world_position(),
        })
    }
}

/// Builds seat maps with fixed spacing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutEngine {
    options: LayoutOptions,
}

impl LayoutEngine {
    /// Engine with the given spacing.
    pub fn new(options: LayoutOptions) -> Self {
        Self { options }
    }

    /// Spacing in use.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Rebuilds `map` from scratch.
    ///
    /// Every existing seat is detached first. Then each cell of `size` is
    /// visited in row-major order; cells for which `asset_at` yields `None`
    /// stay empty (aisles, gaps). Returns the new extent, `None` when nothing
    /// was placed.
    pub fn build<F>(
        &self,
        scene: &mut Scene,
        map: &mut SeatMap,
        size: GridSize,
        mut asset_at: F,
    ) -> Option<BoundingExtent>
    where
        F: FnMut(GridPosition) -> Option<SeatAsset>,
    {
        let removed = map.clear(scene);
        if removed > 0 {
            debug!(removed, "detached previous seat map");
        }
        map.size = size;
        for (row, column) in size.cells() {
            let position = GridPosition::new(column, row);
            if let Some(asset) = asset_at(position) {
                self.place(scene, map, position, asset);
            } else {
                trace!(%position, "no asset; leaving cell empty");
            }
        }
        let extent = map.extent();
        debug!(
            columns = size.columns,
            rows = size.rows,
            seats = map.len(),
            ?extent,
            "seat map built"
        );
        extent
    }

    fn place(
        &self,
        scene: &mut Scene,
        map: &mut SeatMap,
        position: GridPosition,
        asset: SeatAsset,
    ) -> Option<SeatIndex> {
        if map.by_position.contains_key(&position) {
            return None;
        }
        let translation = seat_translation(position, &asset.bounding_box(), &self.options);
        let entity = scene.spawn(
            map.origin,
            EntityKind::Seat,
            Transform::from_translation(translation),
            format!("seat {position}"),
        )?;
        let asset_root = scene.spawn(
            entity,
            EntityKind::Group,
            Transform::identity(),
            asset.label(),
        )?;
        let index = SeatIndex(map.seats.len());
        map.owners.insert(entity, index);
        map.owners.insert(asset_root, index);
        for part in asset.parts() {
            let part_id = scene.spawn(
                asset_root,
                EntityKind::Primitive {
                    bounds: part.bounds(),
                },
                Transform::identity(),
                part.label(),
            )?;
            map.owners.insert(part_id, index);
        }
        map.by_position.insert(position, index);
        map.seats
            .push(SeatNode::new(position, asset, entity, asset_root, translation));
        trace!(%position, %entity, ?translation, "placed seat");
        Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn unit_asset() -> SeatAsset {
        // 1 x 1 x 1 cube centered on the origin.
        SeatAsset::single(
            "cube",
            Aabb::from_center_half_extents(Vec3::ZERO, 0.5, 0.5, 0.5),
        )
    }

    fn fresh() -> (Scene, SeatMap) {
        let mut scene = Scene::new();
        let root = scene.root();
        let origin = scene
            .spawn(root, EntityKind::Group, Transform::identity(), "origin")
            .unwrap();
        (scene, SeatMap::new(origin))
    }

    #[test]
    fn translation_follows_placement_rules() {
        let bounds = Aabb::from_center_half_extents(Vec3::ZERO, 0.5, 0.25, 0.5);
        let t = seat_translation(GridPosition::new(2, 3), &bounds, &LayoutOptions::default());
        assert_relative_eq!(t.x, 2.0 * 1.2);
        assert_relative_eq!(t.y, 0.25);
        assert_relative_eq!(t.z, -3.0 * 2.0);
    }

    #[test]
    fn sparse_grid_skips_absent_cells() {
        let (mut scene, mut map) = fresh();
        let engine = LayoutEngine::default();
        let extent = engine.build(&mut scene, &mut map, GridSize::new(2, 1), |p| {
            (p.column == 0).then(unit_asset)
        });
        assert_eq!(map.len(), 1);
        assert!(map.seat_at(GridPosition::new(0, 0)).is_some());
        assert!(map.seat_at(GridPosition::new(1, 0)).is_none());
        let extent = extent.unwrap();
        assert_eq!(extent.min, extent.max);
    }

    #[test]
    fn empty_grid_has_no_extent() {
        let (mut scene, mut map) = fresh();
        let extent =
            LayoutEngine::default().build(&mut scene, &mut map, GridSize::new(0, 0), |_| {
                Some(unit_asset())
            });
        assert!(extent.is_none());
        assert!(map.is_empty());
    }

    #[test]
    fn rebuild_replaces_previous_seats() {
        let (mut scene, mut map) = fresh();
        let engine = LayoutEngine::default();
        engine.build(&mut scene, &mut map, GridSize::new(3, 3), |_| Some(unit_asset()));
        assert_eq!(map.len(), 9);
        engine.build(&mut scene, &mut map, GridSize::new(2, 1), |_| Some(unit_asset()));
        assert_eq!(map.len(), 2);
        assert_eq!(scene.children(map.origin()).len(), 2);
        // root + origin + 2 * (container + asset root + 1 part)
        assert_eq!(scene.len(), 2 + 2 * 3);
    }

    #[test]
    fn every_owned_entity_maps_back_to_its_seat() {
        let (mut scene, mut map) = fresh();
        LayoutEngine::default().build(&mut scene, &mut map, GridSize::new(2, 2), |_| {
            Some(unit_asset())
        });
        for (i, seat) in map.seats().iter().enumerate() {
            assert_eq!(map.owner_of(seat.entity()), Some(SeatIndex(i)));
            assert_eq!(map.owner_of(seat.asset_root()), Some(SeatIndex(i)));
            for part in scene.children(seat.asset_root()) {
                assert_eq!(map.owner_of(*part), Some(SeatIndex(i)));
            }
            assert_eq!(scene.children(seat.entity()), &[seat.asset_root()]);
        }
    }

    #[test]
    fn extent_uses_row_major_first_and_last_seat() {
        let (mut scene, mut map) = fresh();
        let extent = LayoutEngine::default()
            .build(&mut scene, &mut map, GridSize::new(3, 2), |_| Some(unit_asset()))
            .unwrap();
        // first = (0,0), last = (2,1)
        assert_relative_eq!(extent.min.x, 0.0);
        assert_relative_eq!(extent.max.x, 2.0 * 1.2);
        assert_relative_eq!(extent.max.z, -2.0);
        assert_relative_eq!(extent.width(), 2.4);
    }

    proptest! {
        #[test]
        fn seats_spread_along_x_and_recede_along_z(columns in 1u32..8, rows in 1u32..8) {
            let (mut scene, mut map) = fresh();
            LayoutEngine::default().build(
                &mut scene,
                &mut map,
                GridSize::new(columns, rows),
                |_| Some(unit_asset()),
            );
            prop_assert_eq!(map.len() as u64, GridSize::new(columns, rows).cell_count());
            for row in 0..rows {
                for column in 1..columns {
                    let a = map.seat_at(GridPosition::new(column - 1, row)).unwrap();
                    let b = map.seat_at(GridPosition::new(column, row)).unwrap();
                    prop_assert!(b.world_position().x > a.world_position().x);
                }
            }
            for column in 0..columns {
                for row in 1..rows {
                    let a = map.seat_at(GridPosition::new(column, row - 1)).unwrap();
                    let b = map.seat_at(GridPosition::new(column, row)).unwrap();
                    prop_assert!(b.world_position().z < a.world_position().z);
                }
            }
        }
    }
}
