// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Camera math, picking rays and auto-framing onto a seat map.

use crate::layout::BoundingExtent;
use glam::{Mat4, Quat, Vec2, Vec3};
use seatmap_geom::Ray;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Pixel size of the view the camera renders into.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in view points.
    pub width: f32,
    /// Height in view points.
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl Viewport {
    /// Creates a viewport.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width over height, clamped away from zero.
    pub fn aspect(&self) -> f32 {
        (self.width / self.height.max(1.0)).max(0.1)
    }

    /// View point (origin top-left, y down) to normalized device coordinates.
    pub fn to_ndc(&self, point: Vec2) -> Vec2 {
        let w = self.width.max(1.0);
        let h = self.height.max(1.0);
        Vec2::new(point.x / w * 2.0 - 1.0, 1.0 - point.y / h * 2.0)
    }

    /// Normalized device coordinates back to a view point.
    ///
    /// Uses the same clamped size as [`to_ndc`](Self::to_ndc), so the two
    /// round-trip even for a collapsed viewport.
    pub fn from_ndc(&self, ndc: Vec2) -> Vec2 {
        let w = self.width.max(1.0);
        let h = self.height.max(1.0);
        Vec2::new((ndc.x + 1.0) * 0.5 * w, (1.0 - ndc.y) * 0.5 * h)
    }
}

/// Perspective camera looking down its local -Z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// World-space position.
    pub position: Vec3,
    /// World-space orientation.
    pub orientation: Quat,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Near clip distance.
    pub z_near: f32,
    /// Far clip distance.
    pub z_far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(5.0, 60.0, 20.0),
            orientation: Quat::IDENTITY,
            fov_y: 60f32.to_radians(),
            z_near: 0.1,
            z_far: 500.0,
        }
    }
}

impl Camera {
    fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let forward = self.orientation * -Vec3::Z;
        let right = self.orientation * Vec3::X;
        let up = self.orientation * Vec3::Y;
        (forward, right, up)
    }

    /// Unit vector the camera looks along.
    pub fn forward(&self) -> Vec3 {
        self.basis().0
    }

    /// View-projection matrix for a viewport of the given aspect ratio.
    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        let (f, _, u) = self.basis();
        let view = Mat4::look_to_rh(self.position, f, u);
        let proj = Mat4::perspective_rh(self.fov_y, aspect.max(0.1), self.z_near, self.z_far);
        proj * view
    }

    /// World-space ray through `ndc`.
    pub fn pick_ray(&self, ndc: Vec2, aspect: f32) -> Option<Ray> {
        let (f, r, u) = self.basis();
        let t = (self.fov_y * 0.5).tan();
        Ray::new(self.position, f + r * (ndc.x * t * aspect) + u * (ndc.y * t))
    }

    /// Projects a world point to a view point.
    ///
    /// Returns `None` for points behind the camera.
    pub fn project(&self, world: Vec3, viewport: &Viewport) -> Option<Vec2> {
        let clip = self.view_proj(viewport.aspect()) * world.extend(1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        let ndc = Vec2::new(clip.x / clip.w, clip.y / clip.w);
        Some(viewport.from_ndc(ndc))
    }
}

/// Where an auto-framed camera goes relative to the seat map.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FramingOptions {
    /// Camera height above the floor.
    pub height: f32,
    /// Distance in front of row 0 (along +z).
    pub forward_offset: f32,
    /// Downward tilt about the x axis, in degrees.
    pub pitch_degrees: f32,
}

impl Default for FramingOptions {
    fn default() -> Self {
        Self {
            height: 10.0,
            forward_offset: 3.0,
            pitch_degrees: 60.0,
        }
    }
}

impl FramingOptions {
    /// The fixed downward tilt as a rotation.
    pub fn orientation(&self) -> Quat {
        Quat::from_axis_angle(Vec3::X, -self.pitch_degrees.to_radians())
    }
}

/// Centers `camera` horizontally over `extent`.
///
/// Only the x position adapts to the map: height, forward offset and tilt
/// are fixed. With no extent the camera is left untouched and `false` is
/// returned.
pub fn frame(camera: &mut Camera, extent: Option<&BoundingExtent>, options: &FramingOptions) -> bool {
    let Some(extent) = extent else {
        debug!("no seats placed; keeping camera");
        return false;
    };
    let width = extent.width();
    camera.position = Vec3::new(width / 2.0, options.height, options.forward_offset);
    camera.orientation = options.orientation();
    debug!(position = ?camera.position, width, "camera framed");
    true
}
