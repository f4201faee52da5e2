// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Opaque seat visuals handed in by the data source.

use glam::Vec3;
use seatmap_geom::Aabb;
use std::sync::Arc;

/// One renderable piece of a seat asset (cushion, backrest, ...).
#[derive(Clone, Debug, PartialEq)]
pub struct AssetPart {
    label: String,
    bounds: Aabb,
}

impl AssetPart {
    /// Creates a part with local-space `bounds`.
    pub fn new(label: impl Into<String>, bounds: Aabb) -> Self {
        Self {
            label: label.into(),
            bounds,
        }
    }

    /// Short descriptive label, e.g. `seat.available`.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Local-space bounds of this part.
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }
}

#[derive(Debug, PartialEq)]
struct AssetInner {
    label: String,
    parts: Vec<AssetPart>,
}

/// Cheaply clonable handle to a seat visual.
///
/// The core never looks inside beyond the parts' bounds; it only attaches the
/// parts under the owning seat and hands the handle back in delegate
/// notifications.
#[derive(Clone, Debug)]
pub struct SeatAsset {
    inner: Arc<AssetInner>,
}

impl PartialEq for SeatAsset {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.inner == other.inner
    }
}

impl SeatAsset {
    /// Builds an asset from its parts.
    pub fn new(label: impl Into<String>, parts: Vec<AssetPart>) -> Self {
        Self {
            inner: Arc::new(AssetInner {
                label: label.into(),
                parts,
            }),
        }
    }

    /// Single-part asset.
    pub fn single(label: impl Into<String>, bounds: Aabb) -> Self {
        let label = label.into();
        let part = AssetPart::new(label.clone(), bounds);
        Self::new(label, vec![part])
    }

    /// Asset label.
    pub fn label(&self) -> &str {
        &self.inner.label
    }

    /// Renderable parts, in attach order.
    pub fn parts(&self) -> &[AssetPart] {
        &self.inner.parts
    }

    /// Local bounding box: the union of every part.
    ///
    /// A part-less asset collapses to a point at the origin.
    pub fn bounding_box(&self) -> Aabb {
        self.inner
            .parts
            .iter()
            .map(AssetPart::bounds)
            .reduce(|acc, b| acc.union(&b))
            .unwrap_or_else(|| Aabb::new(Vec3::ZERO, Vec3::ZERO))
    }

    /// `true` when both handles point at the same allocation.
    pub fn same_handle(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_box_unions_parts() {
        let asset = SeatAsset::new(
            "chair",
            vec![
                AssetPart::new("seat", Aabb::new(Vec3::new(-0.5, -0.2, -0.5), Vec3::new(0.5, 0.2, 0.5))),
                AssetPart::new("rest", Aabb::new(Vec3::new(-0.5, 0.2, -0.5), Vec3::new(0.5, 0.9, -0.4))),
            ],
        );
        let bb = asset.bounding_box();
        assert_eq!(bb.min(), Vec3::new(-0.5, -0.2, -0.5));
        assert_eq!(bb.max(), Vec3::new(0.5, 0.9, 0.5));
    }

    #[test]
    fn clones_share_the_handle() {
        let a = SeatAsset::single("cube", Aabb::new(Vec3::ZERO, Vec3::ONE));
        let b = a.clone();
        let c = SeatAsset::single("cube", Aabb::new(Vec3::ZERO, Vec3::ONE));
        assert!(a.same_handle(&b));
        assert!(!a.same_handle(&c));
        assert_eq!(a, c);
    }
}
