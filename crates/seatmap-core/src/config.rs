// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Tunables for a seat booking view, serializable so tools can persist them.

use crate::camera::FramingOptions;
use crate::layout::LayoutOptions;
use crate::transition::TransitionOptions;
use serde::{Deserialize, Serialize};

/// Fixed scene furniture: floor, camera lens and the pre-framing pose.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneOptions {
    /// RGBA floor color.
    pub floor_color: [f32; 4],
    /// Far clip distance of the camera.
    pub camera_far: f32,
    /// Vertical field of view, in degrees.
    pub fov_y_degrees: f32,
    /// Camera position before the first framing.
    pub camera_start: [f32; 3],
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            floor_color: [0.6, 0.6, 0.6, 1.0],
            camera_far: 500.0,
            fov_y_degrees: 60.0,
            camera_start: [5.0, 60.0, 20.0],
        }
    }
}

/// Everything a [`SeatBookingView`](crate::view::SeatBookingView) can be tuned with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeatMapConfig {
    /// Seat spacing.
    pub layout: LayoutOptions,
    /// Auto-framing pose.
    pub framing: FramingOptions,
    /// Selection transition.
    pub transition: TransitionOptions,
    /// Scene furniture.
    pub scene: SceneOptions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: SeatMapConfig =
            serde_json::from_str(r#"{ "layout": { "depth_gap": 2.5 } }"#).unwrap();
        assert_eq!(cfg.layout.depth_gap, 2.5);
        assert_eq!(cfg.layout.horizontal_gap, 0.2);
        assert_eq!(cfg.framing, FramingOptions::default());
        assert_eq!(cfg.scene.camera_far, 500.0);
    }

    #[test]
    fn empty_object_is_the_default() {
        let cfg: SeatMapConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, SeatMapConfig::default());
    }
}
