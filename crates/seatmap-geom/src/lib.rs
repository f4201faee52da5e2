// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Geometry primitives for seat maps.

This crate provides:
- Axis-aligned bounding boxes (`Aabb`).
- Rigid transforms (`Transform`).
- Rays and the slab test used for picking (`Ray`, `Aabb::ray_intersection`).

Design notes:
- Float32 throughout, built on `glam`.
- Y is up; rows of a seat map recede along -Z.
"]

/// Foundational geometric types.
pub mod types;

pub use types::aabb::Aabb;
pub use types::ray::Ray;
pub use types::transform::Transform;
