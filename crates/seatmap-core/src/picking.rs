// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Ray casting against the scene's pickable primitives.

use crate::scene::{EntityId, Scene};
use seatmap_geom::Ray;

/// One entity struck by a ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// The innermost entity hit (usually an asset part).
    pub entity: EntityId,
    /// Distance from the ray origin to the entry point.
    pub distance: f32,
}

/// Hit-test port. Renderers with their own picking implement this; the
/// default works on primitive bounds.
pub trait RayCaster {
    /// Every entity struck by `ray`, nearest first.
    fn cast(&self, scene: &Scene, ray: &Ray) -> Vec<RayHit>;
}

/// Slab-tests each primitive's world-space bounding box.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoundsRayCaster;

impl RayCaster for BoundsRayCaster {
    fn cast(&self, scene: &Scene, ray: &Ray) -> Vec<RayHit> {
        let mut hits: Vec<RayHit> = scene
            .primitives()
            .filter_map(|(entity, local)| {
                let world = local.transformed(&scene.world_matrix(entity)?);
                let distance = world.ray_intersection(ray)?;
                Some(RayHit { entity, distance })
            })
            .collect();
        hits.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then_with(|| a.entity.cmp(&b.entity))
        });
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::EntityKind;
    use glam::Vec3;
    use seatmap_geom::{Aabb, Transform};

    #[test]
    fn hits_come_back_nearest_first() {
        let mut scene = Scene::new();
        let root = scene.root();
        let unit = Aabb::from_center_half_extents(Vec3::ZERO, 0.5, 0.5, 0.5);
        let far = scene
            .spawn(
                root,
                EntityKind::Primitive { bounds: unit },
                Transform::from_translation(Vec3::new(0.0, 0.0, -10.0)),
                "far",
            )
            .unwrap();
        let near = scene
            .spawn(
                root,
                EntityKind::Primitive { bounds: unit },
                Transform::from_translation(Vec3::new(0.0, 0.0, -3.0)),
                "near",
            )
            .unwrap();
        scene
            .spawn(
                root,
                EntityKind::Primitive { bounds: unit },
                Transform::from_translation(Vec3::new(5.0, 0.0, -3.0)),
                "off-axis",
            )
            .unwrap();
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z).unwrap();
        let hits = BoundsRayCaster.cast(&scene, &ray);
        let order: Vec<_> = hits.iter().map(|h| h.entity).collect();
        assert_eq!(order, vec![near, far]);
    }
}
