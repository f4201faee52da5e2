// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs, clippy::unwrap_used)]
//! Integration tests for seatmap-geom ray picking and transformed bounds.

use approx::assert_relative_eq;
use core::f32::consts::FRAC_PI_2;
use glam::{Quat, Vec3};
use seatmap_geom::{Aabb, Ray, Transform};

#[test]
fn ray_hits_box_in_front_and_reports_entry_distance() {
    let b = Aabb::from_center_half_extents(Vec3::new(0.0, 0.0, -10.0), 1.0, 1.0, 1.0);
    let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0)).unwrap();
    let t = b.ray_intersection(&ray).unwrap();
    assert_relative_eq!(t, 9.0);
    assert_relative_eq!(ray.at(t).z, -9.0);
}

#[test]
fn ray_misses_box_behind_origin() {
    let b = Aabb::from_center_half_extents(Vec3::new(0.0, 0.0, 10.0), 1.0, 1.0, 1.0);
    let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0)).unwrap();
    assert!(b.ray_intersection(&ray).is_none());
}

#[test]
fn parallel_ray_outside_slab_misses() {
    let b = Aabb::new(Vec3::new(-1.0, 0.0, -5.0), Vec3::new(1.0, 1.0, -4.0));
    let above = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, 0.0, -1.0)).unwrap();
    let through = Ray::new(Vec3::new(0.0, 0.5, 0.0), Vec3::new(0.0, 0.0, -1.0)).unwrap();
    assert!(b.ray_intersection(&above).is_none());
    assert!(b.ray_intersection(&through).is_some());
}

#[test]
fn origin_inside_box_reports_zero() {
    let b = Aabb::from_center_half_extents(Vec3::ZERO, 1.0, 1.0, 1.0);
    let ray = Ray::new(Vec3::ZERO, Vec3::X).unwrap();
    assert_relative_eq!(b.ray_intersection(&ray).unwrap(), 0.0);
}

#[test]
fn zero_direction_is_rejected() {
    assert!(Ray::new(Vec3::ZERO, Vec3::ZERO).is_none());
}

#[test]
fn transformed_box_follows_translation_and_rotation() {
    // Rod along +X from 0..2, rotated a quarter turn about Z, then lifted.
    let local = Aabb::from_center_half_extents(Vec3::new(1.0, 0.0, 0.0), 1.0, 0.1, 0.1);
    let t = Transform::new(
        Vec3::new(0.0, 5.0, 0.0),
        Quat::from_axis_angle(Vec3::Z, FRAC_PI_2),
        Vec3::ONE,
    );
    let world = local.transformed(&t.to_mat4());
    assert_relative_eq!(world.min().y, 5.0, epsilon = 1e-5);
    assert_relative_eq!(world.max().y, 7.0, epsilon = 1e-5);
    assert_relative_eq!(world.min().x, -0.1, epsilon = 1e-5);
    assert_relative_eq!(world.max().x, 0.1, epsilon = 1e-5);
}

#[test]
fn union_and_translate_compose() {
    let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
    let b = a.translated(Vec3::new(3.0, 0.0, 0.0));
    let u = a.union(&b);
    assert_eq!(u.min(), Vec3::ZERO);
    assert_eq!(u.max(), Vec3::new(4.0, 1.0, 1.0));
    assert_eq!(u.size(), Vec3::new(4.0, 1.0, 1.0));
    assert!(u.contains_point(Vec3::new(2.0, 0.5, 0.5)));
}
