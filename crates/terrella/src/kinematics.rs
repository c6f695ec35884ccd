//! Per-frame convergence for the camera rig and globe orientation.
//!
//! All smoothing uses exponential convergence: every frame the current value
//! moves a fixed fraction of the remaining distance toward its target. There
//! are no timers or easing curves, so retargeting mid-flight just moves the
//! goalpost and convergence continues from wherever the state is.
//!
//! Rates are defined per frame at 60 Hz and rescaled for the actual `dt` by
//! [`rate_for_dt`], so a 30 Hz frame takes a proportionally larger step.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::sections::{SectionPreset, section_preset};

/// Reference frame rate the per-frame constants are defined against.
pub const REF_FPS: f32 = 60.0;

/// Camera position convergence per frame.
pub const CAMERA_RATE: f32 = 0.009;
/// Look-at point convergence per frame.
pub const LOOK_RATE: f32 = 0.009;
/// Orientation convergence per frame while the globe is locked to a target.
pub const LOCK_RATE: f32 = 0.09;
/// X/Z relaxation back to level per frame while free-spinning.
pub const RELAX_RATE: f32 = 0.03;
/// Free-spin advance in radians per frame.
pub const SPIN_PER_FRAME: f32 = 0.001;

/// Rescale a per-frame convergence fraction to an arbitrary timestep.
///
/// At `dt = 1/60` this returns `rate` exactly; for larger steps it compounds
/// so that convergence speed is independent of frame rate.
#[must_use]
pub fn rate_for_dt(rate: f32, dt: f32) -> f32 {
    1.0 - (1.0 - rate).powf(dt * REF_FPS)
}

/// One exponential convergence step for a scalar.
#[must_use]
pub fn approach(current: f32, target: f32, rate: f32) -> f32 {
    current + (target - current) * rate
}

/// One exponential convergence step for a vector.
#[must_use]
pub fn approach_vec3(current: Vec3, target: Vec3, rate: f32) -> Vec3 {
    current + (target - current) * rate
}

/// Camera position and look-at point, with their section-driven targets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigState {
    /// Current camera position.
    pub position: Vec3,
    /// Current look-at point.
    pub look_at: Vec3,
    /// Target camera position.
    pub target_position: Vec3,
    /// Target look-at point.
    pub target_look_at: Vec3,
}

impl RigState {
    /// Rig resting at the home section framing.
    #[must_use]
    pub fn home() -> Self {
        let preset = section_preset(0);
        Self {
            position: preset.position,
            look_at: preset.look_at,
            target_position: preset.position,
            target_look_at: preset.look_at,
        }
    }

    /// Point the rig at a new framing. Current state is untouched; the next
    /// [`step`](Self::step) calls converge toward it.
    pub fn retarget(&mut self, preset: SectionPreset) {
        self.target_position = preset.position;
        self.target_look_at = preset.look_at;
    }

    /// Advance one frame of convergence.
    pub fn step(&mut self, dt: f32) {
        self.position = approach_vec3(
            self.position,
            self.target_position,
            rate_for_dt(CAMERA_RATE, dt),
        );
        self.look_at = approach_vec3(
            self.look_at,
            self.target_look_at,
            rate_for_dt(LOOK_RATE, dt),
        );
    }
}

impl Default for RigState {
    fn default() -> Self {
        Self::home()
    }
}

/// Globe orientation as XYZ euler angles, either free-spinning or locked to
/// a section-provided target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationState {
    /// Current rotation in radians.
    pub rotation: Vec3,
    /// Orientation target; meaningful only while locked.
    pub target: Vec3,
    /// Whether the landmark section has pinned the orientation.
    pub locked: bool,
}

impl OrientationState {
    /// Pin the orientation to a target; convergence starts next step.
    pub fn lock(&mut self, target: Vec3) {
        self.target = target;
        self.locked = true;
    }

    /// Release the pin; the globe resumes its free spin and levels out.
    pub fn unlock(&mut self) {
        self.locked = false;
    }

    /// Advance one frame: converge to the target while locked, otherwise
    /// spin about Y and relax X/Z back to level.
    pub fn step(&mut self, dt: f32) {
        if self.locked {
            let rate = rate_for_dt(LOCK_RATE, dt);
            self.rotation = approach_vec3(self.rotation, self.target, rate);
        } else {
            self.rotation.y = (self.rotation.y + SPIN_PER_FRAME * dt * REF_FPS).rem_euclid(TAU);
            let rate = rate_for_dt(RELAX_RATE, dt);
            self.rotation.x = approach(self.rotation.x, 0.0, rate);
            self.rotation.z = approach(self.rotation.z, 0.0, rate);
        }
    }
}

impl Default for OrientationState {
    fn default() -> Self {
        Self {
            rotation: Vec3::ZERO,
            target: Vec3::ZERO,
            locked: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    #[test]
    fn test_rate_for_dt_reference_frame() {
        // At the reference timestep the documented per-frame rate applies.
        assert!((rate_for_dt(0.009, FRAME) - 0.009).abs() < 1e-6);
        assert!((rate_for_dt(0.09, FRAME) - 0.09).abs() < 1e-6);
        // A double-length frame compounds two steps.
        let two = rate_for_dt(0.09, 2.0 * FRAME);
        assert!((two - (1.0 - 0.91_f32 * 0.91)).abs() < 1e-6);
    }

    #[test]
    fn test_rig_distance_strictly_decreases() {
        let mut rig = RigState::home();
        rig.retarget(section_preset(4));

        let mut previous = (rig.position - rig.target_position).length();
        for _ in 0..50 {
            rig.step(FRAME);
            let distance = (rig.position - rig.target_position).length();
            assert!(distance < previous, "{distance} did not shrink");
            previous = distance;
        }
    }

    #[test]
    fn test_rig_converges_for_any_pair() {
        let pairs = [
            (Vec3::new(7.0, 0.0, 4.0), Vec3::new(20.0, 15.0, 20.0)),
            (Vec3::new(-100.0, 3.0, 9.0), Vec3::ZERO),
            (Vec3::new(0.1, 0.1, 0.1), Vec3::new(0.2, 0.1, 0.1)),
        ];
        for (start, target) in pairs {
            let mut rig = RigState {
                position: start,
                look_at: start,
                target_position: target,
                target_look_at: target,
            };
            // The farthest pair starts ~100 units out; at 0.009 per frame it
            // needs a little over 1000 steps to get under the tolerance.
            for _ in 0..1200 {
                rig.step(FRAME);
            }
            let distance = (rig.position - rig.target_position).length();
            assert!(distance < 1e-2, "{start:?} -> {target:?} left {distance}");
        }
    }

    #[test]
    fn test_rig_retarget_mid_flight() {
        let mut rig = RigState::home();
        rig.retarget(section_preset(2));
        for _ in 0..100 {
            rig.step(FRAME);
        }
        // Move the goalposts; convergence continues from the current state.
        rig.retarget(section_preset(4));
        let mut previous = (rig.position - rig.target_position).length();
        for _ in 0..50 {
            rig.step(FRAME);
            let distance = (rig.position - rig.target_position).length();
            assert!(distance < previous);
            previous = distance;
        }
    }

    #[test]
    fn test_orientation_free_spin_advances_exactly() {
        let mut orientation = OrientationState::default();
        for frame in 1..=100 {
            orientation.step(FRAME);
            let expected = (SPIN_PER_FRAME * frame as f32).rem_euclid(TAU);
            assert!(
                (orientation.rotation.y - expected).abs() < 1e-4,
                "frame {frame}: {} vs {expected}",
                orientation.rotation.y
            );
        }
    }

    #[test]
    fn test_orientation_lock_converges() {
        let mut orientation = OrientationState::default();
        orientation.lock(Vec3::new(1.5707964, 4.198, 1.5707964));
        for _ in 0..500 {
            orientation.step(FRAME);
        }
        assert!((orientation.rotation - orientation.target).length() < 1e-3);
    }

    #[test]
    fn test_orientation_unlock_levels_out() {
        let mut orientation = OrientationState::default();
        orientation.lock(Vec3::new(1.5, 2.0, 1.5));
        for _ in 0..500 {
            orientation.step(FRAME);
        }
        orientation.unlock();
        for _ in 0..500 {
            orientation.step(FRAME);
        }
        // X and Z relax back toward level; Y keeps spinning.
        assert!(orientation.rotation.x.abs() < 1e-3);
        assert!(orientation.rotation.z.abs() < 1e-3);
        assert!(orientation.rotation.y > 0.0);
    }
}
