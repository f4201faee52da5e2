// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use glam::Vec3;

/// Half-line starting at `origin`, extending along a unit `direction`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
}

impl Ray {
    /// Creates a ray; `direction` is normalized.
    ///
    /// Returns `None` when `direction` has zero or non-finite length.
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.try_normalize()?;
        Some(Self { origin, direction })
    }

    /// Start point.
    #[must_use]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Unit direction.
    #[must_use]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Point at distance `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
