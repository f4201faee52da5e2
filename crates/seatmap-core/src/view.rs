// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The seat booking view: owns the scene, wires data source and delegate,
//! and routes taps through picking, hit resolution and selection.

use crate::camera::{self, Camera, Viewport};
use crate::config::SeatMapConfig;
use crate::grid::GridPosition;
use crate::hit;
use crate::layout::{BoundingExtent, LayoutEngine, SeatMap};
use crate::picking::{BoundsRayCaster, RayCaster};
use crate::ports::{SeatDataSource, SeatDelegate};
use crate::scene::{EntityId, EntityKind, LightKind, Scene};
use crate::seat::SeatNode;
use crate::selection::{self, ChangeKind, SelectionChange, SelectionEffect};
use crate::transition::Animator;
use glam::{Vec2, Vec3};
use seatmap_geom::{Ray, Transform};
use std::rc::{Rc, Weak};
use tracing::{debug, trace};

/// Interactive 3D seat map.
///
/// Rebuilding and tap handling both take `&mut self`, so they can never
/// interleave on one view. Everything runs on the thread that owns the view.
pub struct SeatBookingView {
    scene: Scene,
    seat_map: SeatMap,
    camera_entity: EntityId,
    light: EntityId,
    floor: EntityId,
    camera: Camera,
    viewport: Viewport,
    config: SeatMapConfig,
    layout: LayoutEngine,
    animator: Animator,
    ray_caster: Box<dyn RayCaster>,
    data_source: Option<Weak<dyn SeatDataSource>>,
    delegate: Option<Weak<dyn SeatDelegate>>,
}

impl core::fmt::Debug for SeatBookingView {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SeatBookingView")
            .field("seats", &self.seat_map.len())
            .field("camera", &self.camera)
            .field("viewport", &self.viewport)
            .field("animating", &self.animator.len())
            .finish_non_exhaustive()
    }
}

impl SeatBookingView {
    /// Empty view with its scene furniture in place: seat-map origin, camera
    /// (carrying a directional light) and floor.
    pub fn new(config: SeatMapConfig, viewport: Viewport) -> Self {
        let mut scene = Scene::new();
        let origin = scene.spawn_top_level(EntityKind::Group, Transform::identity(), "seat map");
        let camera = Camera {
            position: Vec3::from_array(config.scene.camera_start),
            fov_y: config.scene.fov_y_degrees.to_radians(),
            z_far: config.scene.camera_far,
            ..Camera::default()
        };
        let camera_entity = scene.spawn_top_level(
            EntityKind::Camera,
            Transform::new(camera.position, camera.orientation, Vec3::ONE),
            "camera",
        );
        let light = scene
            .spawn(
                camera_entity,
                EntityKind::Light(LightKind::Directional),
                Transform::identity(),
                "key light",
            )
            .unwrap_or(camera_entity);
        let floor = scene.spawn_top_level(
            EntityKind::Floor {
                color: config.scene.floor_color,
            },
            Transform::identity(),
            "floor",
        );
        Self {
            scene,
            seat_map: SeatMap::new(origin),
            camera_entity,
            light,
            floor,
            camera,
            viewport,
            config,
            layout: LayoutEngine::new(config.layout),
            animator: Animator::new(),
            ray_caster: Box::new(BoundsRayCaster),
            data_source: None,
            delegate: None,
        }
    }

    /// Swaps the hit-test implementation.
    pub fn with_ray_caster(mut self, ray_caster: Box<dyn RayCaster>) -> Self {
        self.ray_caster = ray_caster;
        self
    }

    /// Points the view at `source` (held weakly) and rebuilds the map.
    pub fn set_data_source<D>(&mut self, source: &Rc<D>) -> Option<BoundingExtent>
    where
        D: SeatDataSource + 'static,
    {
        let weak: Weak<D> = Rc::downgrade(source);
        self.data_source = Some(weak);
        self.reload_data()
    }

    /// Forgets the data source. The current map stays until the next reload.
    pub fn clear_data_source(&mut self) {
        self.data_source = None;
    }

    /// Points the view at `delegate` (held weakly).
    pub fn set_delegate<D>(&mut self, delegate: &Rc<D>)
    where
        D: SeatDelegate + 'static,
    {
        let weak: Weak<D> = Rc::downgrade(delegate);
        self.delegate = Some(weak);
    }

    /// Forgets the delegate; taps become no-ops.
    pub fn clear_delegate(&mut self) {
        self.delegate = None;
    }

    fn data_source(&self) -> Option<Rc<dyn SeatDataSource>> {
        self.data_source.as_ref().and_then(Weak::upgrade)
    }

    fn delegate(&self) -> Option<Rc<dyn SeatDelegate>> {
        self.delegate.as_ref().and_then(Weak::upgrade)
    }

    /// Detaches every seat, rebuilds from the data source and reframes the
    /// camera.
    ///
    /// Without a live data source the map is left empty and the camera
    /// keeps its pose. Returns the new extent.
    pub fn reload_data(&mut self) -> Option<BoundingExtent> {
        self.animator.clear();
        let Some(source) = self.data_source() else {
            let removed = self.seat_map.clear(&mut self.scene);
            debug!(removed, "reload without a data source");
            return None;
        };
        let size = source.grid_size();
        let extent = self
            .layout
            .build(&mut self.scene, &mut self.seat_map, size, |p| source.asset_at(p));
        self.frame(extent.as_ref());
        extent
    }

    fn frame(&mut self, extent: Option<&BoundingExtent>) {
        if camera::frame(&mut self.camera, extent, &self.config.framing) {
            self.scene.set_transform(
                self.camera_entity,
                Transform::new(self.camera.position, self.camera.orientation, Vec3::ONE),
            );
        }
    }

    /// World ray under a view point.
    pub fn ray_at(&self, point: Vec2) -> Option<Ray> {
        self.camera
            .pick_ray(self.viewport.to_ndc(point), self.viewport.aspect())
    }

    /// Handles a tap at `point` (view space, origin top-left).
    ///
    /// Casts a ray, resolves every struck entity to its seat, keeps the
    /// nearest seat the delegate allows, toggles it, notifies the delegate
    /// and starts the rise/settle transition, in that order. Returns the
    /// change, or `None` when nothing was toggled.
    pub fn handle_tap(&mut self, point: Vec2) -> Option<SelectionChange> {
        let ray = self.ray_at(point)?;
        self.select_along(&ray)
    }

    /// Same as [`handle_tap`](Self::handle_tap) for an explicit world ray.
    pub fn select_along(&mut self, ray: &Ray) -> Option<SelectionChange> {
        let hits = self.ray_caster.cast(&self.scene, ray);
        trace!(hits = hits.len(), "ray cast");
        let candidates = hit::resolve_hits(&self.scene, &self.seat_map, &hits);
        if candidates.is_empty() {
            return None;
        }
        let Some(delegate) = self.delegate() else {
            debug!("tap ignored: no delegate");
            return None;
        };
        let chosen = selection::choose(&self.seat_map, &candidates, |p| {
            delegate.can_select_seat_at(p)
        })?;
        let effects = selection::toggle(&mut self.seat_map, chosen, &self.config.transition);
        let mut change = None;
        for effect in effects {
            match effect {
                SelectionEffect::Notify(c) => {
                    match c.kind {
                        ChangeKind::Selected => delegate.did_select(&c.asset, c.position),
                        ChangeKind::Deselected => delegate.did_deselect(&c.asset, c.position),
                    }
                    change = Some(c);
                }
                SelectionEffect::Transition { seat, target_lift } => {
                    if let Some(node) = self.seat_map.seat(seat) {
                        self.animator.start(
                            &self.scene,
                            node.entity(),
                            node.world_position(),
                            target_lift,
                            &self.config.transition,
                        );
                    }
                }
            }
        }
        change
    }

    /// View point over the center of the seat at `position`, if it is placed
    /// and in front of the camera.
    pub fn seat_screen_point(&self, position: GridPosition) -> Option<Vec2> {
        let seat = self.seat_map.seat_at(position)?;
        let world = self.scene.world_matrix(seat.entity())?;
        let center = world.transform_point3(seat.asset().bounding_box().center());
        self.camera.project(center, &self.viewport)
    }

    /// Taps the center of the seat at `position`.
    ///
    /// A nearer seat in line of sight wins, exactly as with a real tap.
    pub fn tap_seat(&mut self, position: GridPosition) -> Option<SelectionChange> {
        let point = self.seat_screen_point(position)?;
        self.handle_tap(point)
    }

    /// Advances running transitions by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.animator.advance(&mut self.scene, dt);
    }

    /// Updates the view size used for picking.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// The scene graph.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Current seats and their lookups.
    pub fn seat_map(&self) -> &SeatMap {
        &self.seat_map
    }

    /// Seats in placement order.
    pub fn seats(&self) -> &[SeatNode] {
        self.seat_map.seats()
    }

    /// Seat at `position`.
    pub fn seat_at(&self, position: GridPosition) -> Option<&SeatNode> {
        self.seat_map.seat_at(position)
    }

    /// Positions of every selected seat, row-major.
    pub fn selected_positions(&self) -> Vec<GridPosition> {
        self.seat_map
            .seats()
            .iter()
            .filter(|s| s.is_selected())
            .map(SeatNode::position)
            .collect()
    }

    /// Extent of the current map.
    pub fn extent(&self) -> Option<BoundingExtent> {
        self.seat_map.extent()
    }

    /// Camera pose.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Camera entity in the scene.
    pub fn camera_entity(&self) -> EntityId {
        self.camera_entity
    }

    /// Light attached to the camera.
    pub fn light(&self) -> EntityId {
        self.light
    }

    /// Floor entity.
    pub fn floor(&self) -> EntityId {
        self.floor
    }

    /// View size.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Active configuration.
    pub fn config(&self) -> &SeatMapConfig {
        &self.config
    }

    /// Transition driver.
    pub fn animator(&self) -> &Animator {
        &self.animator
    }
}
