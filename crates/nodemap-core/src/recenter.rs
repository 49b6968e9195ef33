use glam::Vec3;
use std::time::{Duration, Instant};

use crate::physics::Integrator;
use crate::waves::{Wave, WaveQueue};
use crate::world::World;

pub const CAMERA_TRANSITION: Duration = Duration::from_millis(1200);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub look_at: Vec3,
}

pub const OVERVIEW_POSE: CameraPose = CameraPose {
    eye: Vec3::new(0.0, 70.0, 150.0),
    look_at: Vec3::ZERO,
};

/// Eased interpolation between two poses over a fixed duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTween {
    pub from: CameraPose,
    pub to: CameraPose,
    pub started: Instant,
    pub duration: Duration,
}

impl CameraTween {
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let t = now.saturating_duration_since(self.started).as_secs_f32() / self.duration.as_secs_f32();
        t.clamp(0.0, 1.0)
    }

    pub fn is_done(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    pub fn pose_at(&self, now: Instant) -> CameraPose {
        let t = ease_in_out(self.progress(now));
        CameraPose {
            eye: self.from.eye.lerp(self.to.eye, t),
            look_at: self.from.look_at.lerp(self.to.look_at, t),
        }
    }
}

fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Everything one recenter action produced.
#[derive(Debug, Clone)]
pub struct Recentered {
    pub camera: CameraTween,
    pub wave: Wave,
}

/// Animate the camera home, gather nodes (Boost) and emit one wave.
pub fn reset_camera(
    world: &World,
    integrator: &mut Integrator,
    waves: &mut WaveQueue,
    current: CameraPose,
    now: Instant,
) -> Recentered {
    integrator.boost(world, now);
    let wave = waves.push(now);
    tracing::info!(wave = wave.id, "recenter");
    Recentered {
        camera: CameraTween {
            from: current,
            to: OVERVIEW_POSE,
            started: now,
            duration: CAMERA_TRANSITION,
        },
        wave,
    }
}
