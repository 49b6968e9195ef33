//! Damped-spring integrator.
//!
//! Each non-anchor node is pulled toward a moving target: a point on its
//! anchor's orbit ellipse (Orbit) or the anchor itself (Boost). Nodes never
//! act on each other.

use glam::Vec3;
use std::f32::consts::TAU;
use std::time::Instant;

use crate::policy::orbit_target;
use crate::world::World;

/// Fixed simulation step; all per-tick constants are tuned for 60 Hz.
pub const TICK_SECONDS: f32 = 1.0 / 60.0;

/// Ticks run per frame before leftover time is dropped.
pub const MAX_TICKS_PER_FRAME: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Orbit,
    Boost,
}

#[derive(Debug, Default)]
pub struct Integrator {
    boost_until: Option<Instant>,
    accumulator: f32,
}

impl Integrator {
    /// Enters Boost until `now + duration`. A second call replaces the
    /// deadline rather than adding to it.
    pub fn boost(&mut self, world: &World, now: Instant) {
        self.boost_until = Some(now + world.physics.boost_duration());
    }

    pub fn boost_until(&self) -> Option<Instant> {
        self.boost_until
    }

    /// Lazy Boost→Orbit transition: evaluated on demand, never signalled.
    pub fn mode(&mut self, now: Instant) -> Mode {
        match self.boost_until {
            Some(until) if now <= until => Mode::Boost,
            Some(_) => {
                self.boost_until = None;
                Mode::Orbit
            }
            None => Mode::Orbit,
        }
    }

    pub fn step(&mut self, world: &mut World, now: Instant) {
        let mode = self.mode(now);
        tick(world, mode);
    }

    /// Runs as many whole ticks as `dt` covers, so the spring behaves the
    /// same at any frame rate. Returns the number of ticks run.
    pub fn advance(&mut self, world: &mut World, dt: f32, now: Instant) -> u32 {
        if dt.is_finite() && dt > 0.0 {
            self.accumulator += dt;
        }
        let mut ticks = 0;
        while self.accumulator >= TICK_SECONDS && ticks < MAX_TICKS_PER_FRAME {
            self.accumulator -= TICK_SECONDS;
            self.step(world, now);
            ticks += 1;
        }
        if ticks == MAX_TICKS_PER_FRAME {
            self.accumulator = self.accumulator.min(TICK_SECONDS);
        }
        ticks
    }
}

/// One integration step for every non-anchor node.
pub fn tick(world: &mut World, mode: Mode) {
    let cfg = world.physics;
    let anchors = world.anchor_positions();
    let cap = Vec3::splat(cfg.max_velocity);

    for node in world.nodes.iter_mut().filter(|n| !n.is_anchor()) {
        let anchor = anchors[node.city.index()];
        let (target, k, damping) = match mode {
            Mode::Orbit => {
                node.angle = (node.angle + cfg.angular_speed(node.kind)).rem_euclid(TAU);
                let target = orbit_target(anchor, node.angle, cfg.orbit_radius(node.kind), node.tilt);
                (target, cfg.attraction, cfg.damping)
            }
            Mode::Boost => (anchor, cfg.boost_attraction, cfg.boost_damping),
        };
        let v = (node.velocity + (target - node.position) * k) * damping;
        node.velocity = v.clamp(-cap, cap);
        node.position += node.velocity;
    }
}
