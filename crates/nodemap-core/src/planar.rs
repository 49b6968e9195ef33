//! Canvas mapping and hit testing for the 2D adapter.
//!
//! The 3D adapter gets picking from its engine; the 2D canvas has none, so it
//! maps the cursor back into the orbit plane and compares squared pixel
//! distances against a per-kind threshold.

use glam::Vec2;

use crate::layers::VisibleGraph;
use crate::policy::planar;
use crate::world::World;

/// Canvas width the pixel scale is tuned for.
pub const REFERENCE_WIDTH: f32 = 1280.0;

/// Pixels per world unit at [`REFERENCE_WIDTH`].
pub const BASE_SCALE: f32 = 6.0;

/// Hit radius as a multiple of the drawn radius.
pub const HIT_RADIUS_FACTOR: f32 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasTransform {
    /// Canvas pixel the world origin maps to.
    pub origin: Vec2,
    /// Pixels per world unit.
    pub scale: f32,
}

impl CanvasTransform {
    pub fn for_canvas(min: Vec2, size: Vec2) -> Self {
        let width = size.x.max(1.0);
        Self {
            origin: min + size * 0.5,
            scale: BASE_SCALE * width / REFERENCE_WIDTH,
        }
    }

    pub fn to_canvas(&self, p: Vec2) -> Vec2 {
        self.origin + p * self.scale
    }

    pub fn to_plane(&self, px: Vec2) -> Vec2 {
        (px - self.origin) / self.scale
    }

    /// Drawn radius in pixels for a node of the given visual weight.
    pub fn radius_px(&self, visual_weight: f32) -> f32 {
        visual_weight * self.scale
    }
}

/// Canvas position of node `i` for the current frame.
pub fn node_canvas_pos(world: &World, t: &CanvasTransform, i: usize) -> Vec2 {
    t.to_canvas(planar(world.nodes[i].position))
}

/// Nearest visible node within its hit radius of `cursor`, as a node index.
pub fn hit_test(world: &World, visible: &VisibleGraph, t: &CanvasTransform, cursor: Vec2) -> Option<usize> {
    let p = t.to_plane(cursor);
    let mut best: Option<(f32, usize)> = None;
    for &i in &visible.nodes {
        let node = &world.nodes[i];
        let d2 = (planar(node.position) - p).length_squared() * t.scale * t.scale;
        let r = HIT_RADIUS_FACTOR * t.radius_px(node.visual_weight);
        if d2 <= r * r && best.map(|(bd, _)| d2 < bd).unwrap_or(true) {
            best = Some((d2, i));
        }
    }
    best.map(|(_, i)| i)
}
