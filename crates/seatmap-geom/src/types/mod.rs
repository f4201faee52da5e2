// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Core geometry types (transform, AABB, ray).
//!
//! Overlap and ray tests are inclusive on faces: a ray grazing a box edge
//! counts as a hit, so adjacent seats never leave a pick gap between them.

#[doc = "Axis-aligned bounding boxes."]
pub mod aabb;
#[doc = "Half-lines used for picking."]
pub mod ray;
#[doc = "Rigid transforms with non-uniform scale."]
pub mod transform;
