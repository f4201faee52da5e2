// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Minimal scene graph: an arena of entities with parent links, ordered
//! children and local transforms.
//!
//! This is the seam to the rendering engine. A renderer mirrors the arena; the
//! seat map only needs attach/detach, transforms and world-space bounds for
//! picking.

use glam::{Mat4, Vec3};
use seatmap_geom::{Aabb, Transform};
use std::collections::BTreeMap;

/// Upper bound on any upward walk through the graph.
///
/// The arena never creates cycles, but a walk that exceeds this depth stops
/// and reports failure instead of spinning.
pub const MAX_DEPTH: usize = 64;

/// Stable entity handle. Ids are never reused within one scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(u64);

impl EntityId {
    /// Raw id value.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for EntityId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Light flavors the scene can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightKind {
    /// Parallel rays along the owner's forward axis.
    Directional,
}

/// What an entity is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EntityKind {
    /// Scene root; exactly one per scene.
    Root,
    /// Plain grouping node.
    Group,
    /// Logical seat container.
    Seat,
    /// Renderable leaf with local-space bounds; the only pickable kind.
    Primitive {
        /// Local-space bounds.
        bounds: Aabb,
    },
    /// Camera mount.
    Camera,
    /// Light source.
    Light(LightKind),
    /// Infinite ground plane at the owner's origin.
    Floor {
        /// RGBA diffuse color.
        color: [f32; 4],
    },
}

/// One node of the arena.
#[derive(Clone, Debug)]
pub struct Entity {
    kind: EntityKind,
    label: String,
    parent: Option<EntityId>,
    children: Vec<EntityId>,
    local: Transform,
}

impl Entity {
    /// Entity kind.
    pub fn kind(&self) -> &EntityKind {
        &self.kind
    }

    /// Debug label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Owning entity, `None` only for the root.
    pub fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[EntityId] {
        &self.children
    }

    /// Transform relative to the parent.
    pub fn local(&self) -> &Transform {
        &self.local
    }
}

/// Entity arena rooted at a single [`EntityKind::Root`].
#[derive(Clone, Debug)]
pub struct Scene {
    entities: BTreeMap<EntityId, Entity>,
    root: EntityId,
    next_id: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Empty scene holding only the root.
    pub fn new() -> Self {
        let root = EntityId(0);
        let mut entities = BTreeMap::new();
        entities.insert(
            root,
            Entity {
                kind: EntityKind::Root,
                label: "root".into(),
                parent: None,
                children: Vec::new(),
                local: Transform::identity(),
            },
        );
        Self {
            entities,
            root,
            next_id: 1,
        }
    }

    /// The root entity.
    pub fn root(&self) -> EntityId {
        self.root
    }

    /// Number of live entities, root included.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// `true` when only the root remains.
    pub fn is_empty(&self) -> bool {
        self.entities.len() == 1
    }

    /// Looks up an entity.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// `true` if `id` is alive.
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Attaches a new entity as the last child of `parent`.
    ///
    /// Returns `None` when `parent` is not alive.
    pub fn spawn(
        &mut self,
        parent: EntityId,
        kind: EntityKind,
        local: Transform,
        label: impl Into<String>,
    ) -> Option<EntityId> {
        let id = EntityId(self.next_id);
        self.entities.get_mut(&parent)?.children.push(id);
        self.next_id += 1;
        self.entities.insert(
            id,
            Entity {
                kind,
                label: label.into(),
                parent: Some(parent),
                children: Vec::new(),
                local,
            },
        );
        Some(id)
    }

    /// Attaches a new entity directly under the root.
    ///
    /// The root is never despawned, so this cannot fail.
    pub fn spawn_top_level(
        &mut self,
        kind: EntityKind,
        local: Transform,
        label: impl Into<String>,
    ) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        if let Some(root) = self.entities.get_mut(&self.root) {
            root.children.push(id);
        }
        self.entities.insert(
            id,
            Entity {
                kind,
                label: label.into(),
                parent: Some(self.root),
                children: Vec::new(),
                local,
            },
        );
        id
    }

    /// Detaches `id` from its parent and drops its whole subtree.
    ///
    /// Returns the number of entities removed. The root cannot be despawned.
    pub fn despawn(&mut self, id: EntityId) -> usize {
        if id == self.root {
            return 0;
        }
        let Some(entity) = self.entities.get(&id) else {
            return 0;
        };
        if let Some(parent) = entity.parent.and_then(|p| self.entities.get_mut(&p)) {
            parent.children.retain(|c| *c != id);
        }
        let mut removed = 0;
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(e) = self.entities.remove(&next) {
                stack.extend(e.children);
                removed += 1;
            }
        }
        removed
    }

    /// Drops every child of `id`, keeping `id` itself.
    pub fn despawn_children(&mut self, id: EntityId) -> usize {
        let children = self
            .entities
            .get(&id)
            .map(|e| e.children.clone())
            .unwrap_or_default();
        children.into_iter().map(|c| self.despawn(c)).sum()
    }

    /// Parent of `id`.
    pub fn parent(&self, id: EntityId) -> Option<EntityId> {
        self.entities.get(&id).and_then(|e| e.parent)
    }

    /// Children of `id` in insertion order (empty for unknown ids).
    pub fn children(&self, id: EntityId) -> &[EntityId] {
        self.entities.get(&id).map_or(&[], |e| e.children.as_slice())
    }

    /// Local translation of `id`.
    pub fn translation(&self, id: EntityId) -> Option<Vec3> {
        self.entities.get(&id).map(|e| e.local.translation())
    }

    /// Moves `id` relative to its parent. Unknown ids are ignored.
    pub fn set_translation(&mut self, id: EntityId, translation: Vec3) {
        if let Some(e) = self.entities.get_mut(&id) {
            e.local.set_translation(translation);
        }
    }

    /// Replaces the local transform of `id`. Unknown ids are ignored.
    pub fn set_transform(&mut self, id: EntityId, local: Transform) {
        if let Some(e) = self.entities.get_mut(&id) {
            e.local = local;
        }
    }

    /// Ancestors of `id`, nearest first, excluding `id`.
    ///
    /// Stops after [`MAX_DEPTH`] steps.
    pub fn ancestors(&self, id: EntityId) -> impl Iterator<Item = EntityId> + '_ {
        let mut cursor = self.parent(id);
        core::iter::from_fn(move || {
            let current = cursor?;
            cursor = self.parent(current);
            Some(current)
        })
        .take(MAX_DEPTH)
    }

    /// World matrix of `id`: the product of every ancestor's local transform.
    ///
    /// Returns `None` for unknown ids or chains deeper than [`MAX_DEPTH`].
    pub fn world_matrix(&self, id: EntityId) -> Option<Mat4> {
        let mut mat = self.entities.get(&id)?.local.to_mat4();
        let mut cursor = self.parent(id);
        for _ in 0..MAX_DEPTH {
            let Some(current) = cursor else {
                return Some(mat);
            };
            let entity = self.entities.get(&current)?;
            mat = entity.local.to_mat4() * mat;
            cursor = entity.parent;
        }
        None
    }

    /// World-space position of `id`'s origin.
    pub fn world_position(&self, id: EntityId) -> Option<Vec3> {
        self.world_matrix(id).map(|m| m.transform_point3(Vec3::ZERO))
    }

    /// Every pickable entity with its local bounds.
    pub fn primitives(&self) -> impl Iterator<Item = (EntityId, Aabb)> + '_ {
        self.entities.iter().filter_map(|(id, e)| match e.kind {
            EntityKind::Primitive { bounds } => Some((*id, bounds)),
            _ => None,
        })
    }
}
