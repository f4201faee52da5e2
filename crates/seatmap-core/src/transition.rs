// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Rise/settle transitions for selected seats.
//!
//! A seat's lift is its current height above its resting placement. The
//! animator keeps at most one transition per seat entity; starting another
//! one replaces it and continues from wherever the seat currently is.

use crate::scene::{EntityId, Scene};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::trace;

/// Timing curve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Accelerates from rest.
    EaseIn,
    /// Decelerates into the target.
    #[default]
    EaseOut,
    /// Accelerates then decelerates.
    EaseInOut,
}

impl Easing {
    /// Maps linear progress `t` in `[0, 1]` onto the curve.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => t * (2.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

/// Shape of the selection transition.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionOptions {
    /// How far a selected seat rises.
    pub rise: f32,
    /// Seconds a full transition takes.
    pub duration_secs: f32,
    /// Timing curve.
    pub easing: Easing,
}

impl Default for TransitionOptions {
    fn default() -> Self {
        Self {
            rise: 0.5,
            duration_secs: 1.0,
            easing: Easing::EaseOut,
        }
    }
}

/// One in-flight lift change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    rest: Vec3,
    from: f32,
    to: f32,
    elapsed: f32,
    duration: f32,
    easing: Easing,
}

impl Transition {
    /// Lift at the current point in time.
    pub fn lift(&self) -> f32 {
        if self.duration <= 0.0 {
            return self.to;
        }
        let t = self.easing.apply(self.elapsed / self.duration);
        self.from + (self.to - self.from) * t
    }

    /// Lift this transition ends at.
    pub fn target(&self) -> f32 {
        self.to
    }

    /// `true` once the full duration has elapsed.
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Drives seat transitions, one slot per seat entity.
#[derive(Clone, Debug, Default)]
pub struct Animator {
    active: BTreeMap<EntityId, Transition>,
}

impl Animator {
    /// Idle animator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts moving `seat` toward `target` lift above `rest`.
    ///
    /// Any transition already running on `seat` is replaced; the new one
    /// starts from the seat's current lift, so reversing mid-flight never
    /// jumps.
    pub fn start(
        &mut self,
        scene: &Scene,
        seat: EntityId,
        rest: Vec3,
        target: f32,
        options: &TransitionOptions,
    ) {
        let from = scene
            .translation(seat)
            .map_or(0.0, |t| t.y - rest.y);
        let replaced = self
            .active
            .insert(
                seat,
                Transition {
                    rest,
                    from,
                    to: target,
                    elapsed: 0.0,
                    duration: options.duration_secs.max(0.0),
                    easing: options.easing,
                },
            )
            .is_some();
        trace!(%seat, from, target, replaced, "transition started");
    }

    /// Advances every transition by `dt` seconds and writes the new lifts
    /// into `scene`. Finished transitions are dropped.
    pub fn advance(&mut self, scene: &mut Scene, dt: f32) {
        let dt = dt.max(0.0);
        for (seat, tr) in &mut self.active {
            tr.elapsed = (tr.elapsed + dt).min(tr.duration);
            scene.set_translation(*seat, tr.rest + Vec3::Y * tr.lift());
        }
        self.active.retain(|seat, tr| {
            let keep = !tr.is_finished() && scene.contains(*seat);
            if !keep {
                trace!(%seat, "transition finished");
            }
            keep
        });
    }

    /// The transition running on `seat`, if any.
    pub fn get(&self, seat: EntityId) -> Option<&Transition> {
        self.active.get(&seat)
    }

    /// `true` while `seat` is moving.
    pub fn is_animating(&self, seat: EntityId) -> bool {
        self.active.contains_key(&seat)
    }

    /// Number of seats in motion.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// `true` when nothing is moving.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Drops every transition without touching the scene.
    pub fn clear(&mut self) {
        self.active.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::EntityKind;
    use approx::assert_relative_eq;
    use seatmap_geom::Transform;

    fn seat_scene(rest: Vec3) -> (Scene, EntityId) {
        let mut scene = Scene::new();
        let root = scene.root();
        let seat = scene
            .spawn(root, EntityKind::Seat, Transform::from_translation(rest), "seat")
            .unwrap();
        (scene, seat)
    }

    #[test]
    fn easing_endpoints_are_fixed() {
        for e in [Easing::Linear, Easing::EaseIn, Easing::EaseOut, Easing::EaseInOut] {
            assert_relative_eq!(e.apply(0.0), 0.0);
            assert_relative_eq!(e.apply(1.0), 1.0);
        }
        // Ease-out covers more than half the distance in the first half.
        assert!(Easing::EaseOut.apply(0.5) > 0.5);
    }

    #[test]
    fn rise_reaches_target_then_retires() {
        let rest = Vec3::new(1.0, 0.25, -2.0);
        let (mut scene, seat) = seat_scene(rest);
        let mut anim = Animator::new();
        let opts = TransitionOptions::default();
        anim.start(&scene, seat, rest, opts.rise, &opts);
        anim.advance(&mut scene, 0.5);
        let mid = scene.translation(seat).unwrap();
        assert_relative_eq!(mid.y, 0.25 + 0.5 * 0.75);
        assert!(anim.is_animating(seat));
        anim.advance(&mut scene, 0.6);
        assert_relative_eq!(scene.translation(seat).unwrap().y, 0.75);
        assert!(anim.is_empty());
    }

    #[test]
    fn reversal_mid_flight_starts_from_current_lift() {
        let rest = Vec3::ZERO;
        let (mut scene, seat) = seat_scene(rest);
        let mut anim = Animator::new();
        let opts = TransitionOptions {
            easing: Easing::Linear,
            ..TransitionOptions::default()
        };
        anim.start(&scene, seat, rest, 0.5, &opts);
        anim.advance(&mut scene, 0.5);
        assert_relative_eq!(scene.translation(seat).unwrap().y, 0.25);
        anim.start(&scene, seat, rest, 0.0, &opts);
        assert_eq!(anim.len(), 1);
        anim.advance(&mut scene, 0.5);
        assert_relative_eq!(scene.translation(seat).unwrap().y, 0.125);
        anim.advance(&mut scene, 0.5);
        assert_relative_eq!(scene.translation(seat).unwrap().y, 0.0);
        assert!(anim.is_empty());
    }

    #[test]
    fn despawned_seats_are_dropped() {
        let rest = Vec3::ZERO;
        let (mut scene, seat) = seat_scene(rest);
        let mut anim = Animator::new();
        anim.start(&scene, seat, rest, 0.5, &TransitionOptions::default());
        scene.despawn(seat);
        anim.advance(&mut scene, 0.1);
        assert!(anim.is_empty());
    }
}
