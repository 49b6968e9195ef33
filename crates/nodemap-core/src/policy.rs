//! Physics policy shared by both render adapters.
//!
//! The radius/speed tables and the orbit placement formula live here and
//! nowhere else. The 3D adapter draws integrated positions directly; the 2D
//! adapter projects them with [`planar`], which for a node sitting on its
//! orbit yields exactly [`orbit_target_planar`].

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::city::City;
use crate::model::NodeKind;

/// Fixed vertical compression the 2D adapter substitutes for per-node tilt.
pub const VERTICAL_COMPRESSION: f32 = 0.35;

/// Anchors sit on the x axis, this far apart.
pub const ANCHOR_SPACING: f32 = 60.0;

/// Half-extent of the random offset new nodes are seeded with.
pub const SEED_JITTER: f32 = 8.0;

/// Range of the per-node orbit plane tilt.
pub const MAX_TILT: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KindTable {
    pub location: f32,
    pub project: f32,
    pub provider: f32,
}

impl KindTable {
    pub fn get(&self, kind: NodeKind) -> f32 {
        match kind {
            NodeKind::CityAnchor => 0.0,
            NodeKind::Location => self.location,
            NodeKind::Project => self.project,
            NodeKind::Provider => self.provider,
        }
    }
}

/// Empirically tuned constants. Exposed as configuration rather than derived
/// from any model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub orbit_radius: KindTable,
    /// Radians per tick.
    pub angular_speed: KindTable,
    pub attraction: f32,
    pub damping: f32,
    pub boost_attraction: f32,
    pub boost_damping: f32,
    /// Per-component velocity cap, world units per tick.
    pub max_velocity: f32,
    pub boost_duration_ms: u64,
    pub unlinked_probability: f64,
    pub cross_city_probability: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            orbit_radius: KindTable {
                location: 14.0,
                project: 24.0,
                provider: 34.0,
            },
            angular_speed: KindTable {
                location: 0.006,
                project: 0.0045,
                provider: 0.003,
            },
            attraction: 0.08,
            damping: 0.88,
            boost_attraction: 0.22,
            boost_damping: 0.78,
            max_velocity: 3.0,
            boost_duration_ms: 2000,
            unlinked_probability: 0.45,
            cross_city_probability: 0.2,
        }
    }
}

impl PhysicsConfig {
    pub fn orbit_radius(&self, kind: NodeKind) -> f32 {
        self.orbit_radius.get(kind)
    }

    pub fn angular_speed(&self, kind: NodeKind) -> f32 {
        self.angular_speed.get(kind)
    }

    pub fn boost_duration(&self) -> Duration {
        Duration::from_millis(self.boost_duration_ms)
    }

    /// Clamps values that would make the integrator diverge or the sampler panic.
    pub fn sanitized(mut self) -> Self {
        let d = Self::default();
        self.damping = self.damping.clamp(0.0, 0.99);
        self.boost_damping = self.boost_damping.clamp(0.0, 0.99);
        self.attraction = self.attraction.clamp(0.0, 1.0);
        self.boost_attraction = self.boost_attraction.clamp(0.0, 1.0);
        if !(self.max_velocity.is_finite() && self.max_velocity > 0.0) {
            self.max_velocity = d.max_velocity;
        }
        self.unlinked_probability = self.unlinked_probability.clamp(0.0, 1.0);
        self.cross_city_probability = self.cross_city_probability.clamp(0.0, 1.0);
        let r = self.orbit_radius;
        if !(r.location > 0.0 && r.location < r.project && r.project < r.provider) {
            self.orbit_radius = d.orbit_radius;
        }
        self
    }
}

pub fn anchor_position(city: City) -> Vec3 {
    Vec3::new((city.index() as f32 - 1.0) * ANCHOR_SPACING, 0.0, 0.0)
}

pub fn orbit_target(anchor: Vec3, angle: f32, radius: f32, tilt: f32) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    anchor + Vec3::new(cos * radius, sin * radius * tilt, sin * radius)
}

pub fn orbit_target_planar(anchor: Vec2, angle: f32, radius: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    anchor + Vec2::new(cos * radius, sin * radius * VERTICAL_COMPRESSION)
}

/// Drops the vertical (tilt) axis and compresses depth into the 2D y axis.
pub fn planar(position: Vec3) -> Vec2 {
    Vec2::new(position.x, position.z * VERTICAL_COMPRESSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radii_strictly_increase_by_kind() {
        let cfg = PhysicsConfig::default();
        assert!(cfg.orbit_radius(NodeKind::Location) < cfg.orbit_radius(NodeKind::Project));
        assert!(cfg.orbit_radius(NodeKind::Project) < cfg.orbit_radius(NodeKind::Provider));
        assert_eq!(cfg.orbit_radius(NodeKind::CityAnchor), 0.0);
    }

    #[test]
    fn anchors_are_distinct_points_on_one_axis() {
        let xs: Vec<Vec3> = City::ALL.iter().map(|c| anchor_position(*c)).collect();
        assert!(xs.iter().all(|p| p.y == 0.0 && p.z == 0.0));
        assert!(xs[0].x < xs[1].x && xs[1].x < xs[2].x);
    }

    #[test]
    fn planar_projection_agrees_with_planar_placement() {
        let anchor = anchor_position(City::Concepcion);
        for i in 0..16 {
            let angle = i as f32 * 0.41;
            let on_orbit = orbit_target(anchor, angle, 24.0, 0.13);
            let projected = planar(on_orbit);
            let placed = orbit_target_planar(planar(anchor), angle, 24.0);
            assert!((projected - placed).length() < 1e-4);
        }
    }

    #[test]
    fn sanitized_restores_broken_radius_table() {
        let mut cfg = PhysicsConfig::default();
        cfg.orbit_radius.project = 100.0;
        cfg.damping = 3.0;
        let cfg = cfg.sanitized();
        assert_eq!(cfg.orbit_radius, PhysicsConfig::default().orbit_radius);
        assert!(cfg.damping < 1.0);
    }
}
