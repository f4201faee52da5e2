// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Rigid transform with non-uniform scale used for scene placement.
///
/// Conventions:
/// - `translation` in scene length units, relative to the parent.
/// - `rotation` as a unit quaternion.
/// - `scale` is non-uniform and applied before rotation/translation.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    translation: Vec3,
    rotation: Quat,
    scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Identity transform (no translation, no rotation, unit scale).
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    /// Creates a transform from components.
    #[must_use]
    pub const fn new(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// Pure translation.
    #[must_use]
    pub const fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    /// Translation component.
    #[must_use]
    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    /// Rotation component.
    #[must_use]
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Scale component.
    #[must_use]
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Replaces the translation, keeping rotation and scale.
    pub fn set_translation(&mut self, translation: Vec3) {
        self.translation = translation;
    }

    /// Replaces the rotation, keeping translation and scale.
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation.normalize();
    }

    /// Returns the column-major `Mat4` for `M = T * R * S`.
    #[must_use]
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}
