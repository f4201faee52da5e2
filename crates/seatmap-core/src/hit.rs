// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Hit resolution: from the innermost struck entity to the seat that owns it.

use crate::layout::SeatMap;
use crate::picking::RayHit;
use crate::scene::{EntityId, Scene};
use crate::seat::SeatIndex;
use tracing::trace;

/// Seat owning `entity`, or `None` when the entity belongs to no seat.
///
/// Entities attached by layout resolve through the map's back-references in
/// one lookup. Anything else (say, a decoration a renderer hung under an
/// asset part) is resolved by walking up its ancestors until an owned entity
/// appears; the walk is bounded by [`MAX_DEPTH`](crate::scene::MAX_DEPTH).
pub fn resolve(scene: &Scene, map: &SeatMap, entity: EntityId) -> Option<SeatIndex> {
    if let Some(index) = map.owner_of(entity) {
        return Some(index);
    }
    scene.ancestors(entity).find_map(|a| map.owner_of(a))
}

/// Resolves a distance-ordered hit list, dropping misses and keeping order.
///
/// A seat struck through several of its parts appears once, at its nearest
/// hit.
pub fn resolve_hits(scene: &Scene, map: &SeatMap, hits: &[RayHit]) -> Vec<SeatIndex> {
    let mut seats: Vec<SeatIndex> = Vec::with_capacity(hits.len());
    for hit in hits {
        match resolve(scene, map, hit.entity) {
            Some(index) if !seats.contains(&index) => seats.push(index),
            Some(_) => {}
            None => trace!(entity = %hit.entity, "hit outside any seat"),
        }
    }
    seats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::SeatAsset;
    use crate::grid::{GridPosition, GridSize};
    use crate::layout::LayoutEngine;
    use crate::scene::EntityKind;
    use glam::Vec3;
    use seatmap_geom::{Aabb, Transform};

    fn built() -> (Scene, SeatMap) {
        let mut scene = Scene::new();
        let root = scene.root();
        let origin = scene
            .spawn(root, EntityKind::Group, Transform::identity(), "origin")
            .unwrap();
        let mut map = SeatMap::new(origin);
        LayoutEngine::default().build(&mut scene, &mut map, GridSize::new(2, 1), |_| {
            Some(SeatAsset::single(
                "cube",
                Aabb::from_center_half_extents(Vec3::ZERO, 0.5, 0.5, 0.5),
            ))
        });
        (scene, map)
    }

    #[test]
    fn part_resolves_to_its_seat() {
        let (scene, map) = built();
        let seat = map.seat_at(GridPosition::new(1, 0)).unwrap();
        let part = scene.children(seat.asset_root())[0];
        assert_eq!(resolve(&scene, &map, part), map.index_of(GridPosition::new(1, 0)));
    }

    #[test]
    fn foreign_child_walks_up_to_owner() {
        let (mut scene, map) = built();
        let seat = map.seat_at(GridPosition::new(0, 0)).unwrap();
        let part = scene.children(seat.asset_root())[0];
        let decal = scene
            .spawn(part, EntityKind::Group, Transform::identity(), "decal")
            .unwrap();
        let deeper = scene
            .spawn(decal, EntityKind::Group, Transform::identity(), "decal.inner")
            .unwrap();
        assert_eq!(resolve(&scene, &map, deeper), map.index_of(GridPosition::new(0, 0)));
    }

    #[test]
    fn unowned_entities_resolve_to_none() {
        let (mut scene, map) = built();
        let root = scene.root();
        let floor = scene
            .spawn(
                root,
                EntityKind::Floor {
                    color: [0.6, 0.6, 0.6, 1.0],
                },
                Transform::identity(),
                "floor",
            )
            .unwrap();
        assert_eq!(resolve(&scene, &map, floor), None);
        assert_eq!(resolve(&scene, &map, map.origin()), None);
    }

    #[test]
    fn hits_collapse_per_seat_in_order() {
        let (scene, map) = built();
        let a = map.seat_at(GridPosition::new(0, 0)).unwrap();
        let b = map.seat_at(GridPosition::new(1, 0)).unwrap();
        let hits = [
            RayHit { entity: scene.children(b.asset_root())[0], distance: 1.0 },
            RayHit { entity: scene.root(), distance: 1.5 },
            RayHit { entity: b.entity(), distance: 2.0 },
            RayHit { entity: scene.children(a.asset_root())[0], distance: 3.0 },
        ];
        let seats = resolve_hits(&scene, &map, &hits);
        assert_eq!(
            seats,
            vec![
                map.index_of(GridPosition::new(1, 0)).unwrap(),
                map.index_of(GridPosition::new(0, 0)).unwrap()
            ]
        );
    }
}
