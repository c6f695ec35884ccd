//! Orbiting streak particles.
//!
//! Each streak is a bright head followed by a fading tail chain, riding a
//! circular orbit that is itself rotated about a per-streak axis by half the
//! orbital angle. The tilt grows with the angle, so the orbit precesses
//! instead of tracing a flat ring.

use std::f32::consts::TAU;

use glam::{Quat, Vec3};

use crate::kinematics::REF_FPS;

/// Tail segments per streak.
pub const TAIL_SEGMENTS: usize = 15;
/// Angular gap between consecutive tail segments, radians.
pub const TAIL_STEP: f32 = 0.02;
/// Head sphere radius in world units.
pub const HEAD_RADIUS: f32 = 0.015;

/// Static parameters of one streak.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreakConfig {
    /// Orbit radius in world units.
    pub radius: f32,
    /// Linear RGB head color; tail segments inherit it with falling alpha.
    pub color: [f32; 3],
    /// Angular advance in radians per frame.
    pub speed: f32,
    /// Orbit tilt axis (unit length).
    pub axis: Vec3,
}

/// The four streaks of the reference scene.
#[must_use]
pub fn default_streaks() -> [StreakConfig; 4] {
    [
        StreakConfig {
            radius: 1.3,
            color: [1.0, 1.0, 1.0],
            speed: 0.02,
            axis: Vec3::Y,
        },
        StreakConfig {
            radius: 1.4,
            color: [0.8, 0.866, 1.0],
            speed: 0.015,
            axis: Vec3::new(1.0, 0.5, 0.0).normalize(),
        },
        StreakConfig {
            radius: 1.5,
            color: [1.0, 0.8, 0.866],
            speed: 0.018,
            axis: Vec3::new(0.5, 0.0, 1.0).normalize(),
        },
        StreakConfig {
            radius: 1.35,
            color: [0.866, 1.0, 0.8],
            speed: 0.012,
            axis: Vec3::new(1.0, 1.0, 0.0).normalize(),
        },
    ]
}

/// Radius of tail segment `index` (0 = closest to the head).
#[must_use]
pub fn tail_radius(index: usize) -> f32 {
    HEAD_RADIUS - index as f32 * 0.0003
}

/// Alpha of tail segment `index`, fading toward the tail end.
#[must_use]
pub fn tail_alpha(index: usize) -> f32 {
    1.0 - (index as f32 / TAIL_SEGMENTS as f32) * 0.9
}

/// Per-frame state of one streak.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreakState {
    /// Current orbital angle in `[0, 2π)`.
    pub angle: f32,
    /// Angular advance per frame.
    pub speed: f32,
    /// Orbit radius.
    pub radius: f32,
    /// Orbit tilt axis.
    pub axis: Vec3,
}

impl StreakState {
    /// Start a streak at angle zero.
    #[must_use]
    pub fn new(config: &StreakConfig) -> Self {
        Self {
            angle: 0.0,
            speed: config.speed,
            radius: config.radius,
            axis: config.axis,
        }
    }

    /// Advance the orbital angle by `speed` per reference frame, wrapping
    /// mod 2π so the angle never accumulates unbounded.
    pub fn advance(&mut self, dt: f32) {
        self.angle = (self.angle + self.speed * dt * REF_FPS).rem_euclid(TAU);
    }

    /// Position on the tilted orbit at angle `theta`: a point on the base
    /// circle, rotated about the streak axis by `theta / 2`.
    #[must_use]
    pub fn orbit_position(&self, theta: f32) -> Vec3 {
        let base = Vec3::new(theta.cos() * self.radius, 0.0, theta.sin() * self.radius);
        Quat::from_axis_angle(self.axis, theta * 0.5) * base
    }

    /// Current head position.
    #[must_use]
    pub fn head_position(&self) -> Vec3 {
        self.orbit_position(self.angle)
    }

    /// Position of tail segment `index` (0 = closest to the head), trailing
    /// the head along the same orbit.
    #[must_use]
    pub fn tail_position(&self, index: usize) -> Vec3 {
        self.orbit_position(self.angle - (index as f32 + 1.0) * TAIL_STEP)
    }
}
