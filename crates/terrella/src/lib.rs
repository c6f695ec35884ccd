//! Scene-state model for the terrella globe.
//!
//! This crate holds everything about the scene that can be computed without
//! an engine: geographic projection onto the globe, the section-indexed
//! camera preset table, exponential-convergence kinematics for the camera rig
//! and globe orientation, streak orbit math, starfield scattering, the
//! surface point lattice, and screen/ray projection math.
//!
//! The viewer crate owns rendering and input; it drives these types once per
//! frame and copies the results into engine state. Keeping the model pure
//! makes every per-frame rule testable with plain asserts and fixed `dt`.
//!
//! # Frame-rate independence
//!
//! The reference behavior is defined per frame at 60 Hz. Stepping functions
//! take a `dt` in seconds and scale internally so that `dt = 1/60` reproduces
//! the documented per-frame constants exactly.

pub mod geo;
pub mod kinematics;
pub mod project;
pub mod sections;
pub mod starfield;
pub mod streaks;
pub mod surface;

pub use geo::{Marker, project, sphere_uv};
pub use kinematics::{OrientationState, RigState, approach, approach_vec3, rate_for_dt};
pub use project::{
    Ray, home_pointer_ray, pointer_look_target, pointer_ray, project_to_screen,
    ray_sphere_intersect,
};
pub use sections::{
    FOCUS, GLOBE_OFFSET, LANDMARK_SECTION, SECTION_COUNT, SectionPreset, default_landmark,
    landmark_look_at, landmark_orientation, section_preset,
};
pub use starfield::{Star, scatter};
pub use streaks::{StreakConfig, StreakState, default_streaks, tail_alpha, tail_radius};
pub use surface::{SurfacePoint, point_lattice};
