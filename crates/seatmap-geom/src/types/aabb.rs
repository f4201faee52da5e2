// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::types::ray::Ray;

/// Axis-aligned bounding box.
///
/// Invariants:
/// - `min` components are less than or equal to `max` components.
/// - Values are `f32` in scene length units.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    min: Vec3,
    max: Vec3,
}

impl Aabb {
    /// Constructs an AABB spanning two opposite corners.
    ///
    /// The corners may be given in any order; each axis is sorted so the
    /// `min <= max` invariant always holds.
    #[must_use]
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Returns the minimum corner.
    #[must_use]
    pub fn min(&self) -> Vec3 {
        self.min
    }

    /// Returns the maximum corner.
    #[must_use]
    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Edge lengths along each axis.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Midpoint of the box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Builds an AABB centered at `center` with half-extents `hx, hy, hz`.
    #[must_use]
    pub fn from_center_half_extents(center: Vec3, hx: f32, hy: f32, hz: f32) -> Self {
        let he = Vec3::new(hx, hy, hz).abs();
        Self::new(center - he, center + he)
    }

    /// Returns `true` if this AABB overlaps another (inclusive on faces).
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }

    /// Returns `true` if `p` lies inside or on the box.
    #[must_use]
    pub fn contains_point(&self, p: Vec3) -> bool {
        self.min.cmple(p).all() && p.cmple(self.max).all()
    }

    /// Returns the union of two AABBs.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Returns the box shifted by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Computes the AABB that bounds this box after transformation by `mat`.
    ///
    /// Evaluates the eight corners under the affine transform and builds a
    /// new axis-aligned box containing them.
    #[must_use]
    pub fn transformed(&self, mat: &Mat4) -> Self {
        let (lo, hi) = (self.min, self.max);
        let corners = [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ];
        let first = mat.transform_point3(corners[0]);
        let (min, max) = corners[1..].iter().fold((first, first), |(mi, ma), c| {
            let p = mat.transform_point3(*c);
            (mi.min(p), ma.max(p))
        });
        Self { min, max }
    }

    /// Builds the minimal AABB that contains all `points`.
    ///
    /// Returns `None` when `points` is empty.
    #[must_use]
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(mi, ma), p| (mi.min(*p), ma.max(*p)));
        Some(Self { min, max })
    }

    /// Slab test against `ray`.
    ///
    /// Returns the distance along the ray to the entry point, or `None` when
    /// the ray misses or the box lies entirely behind the origin. A ray whose
    /// origin is inside the box reports a distance of `0.0`.
    #[must_use]
    pub fn ray_intersection(&self, ray: &Ray) -> Option<f32> {
        let origin = ray.origin().to_array();
        let dir = ray.direction().to_array();
        let lo = self.min.to_array();
        let hi = self.max.to_array();
        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;
        for axis in 0..3 {
            if dir[axis].abs() < f32::EPSILON {
                // Parallel to this slab: must already be between the planes.
                if origin[axis] < lo[axis] || origin[axis] > hi[axis] {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / dir[axis];
            let t1 = (lo[axis] - origin[axis]) * inv;
            let t2 = (hi[axis] - origin[axis]) * inv;
            t_near = t_near.max(t1.min(t2));
            t_far = t_far.min(t1.max(t2));
            if t_near > t_far || t_far < 0.0 {
                return None;
            }
        }
        Some(t_near.max(0.0))
    }
}
