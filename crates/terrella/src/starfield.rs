//! Background starfield scattering.
//!
//! Stars are scattered uniformly over a spherical shell well outside the
//! globe, with a cool blue-white palette and slightly varied sprite sizes.
//! Scattering is seeded so a given seed always produces the same field.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Inner radius of the star shell.
pub const SHELL_MIN_RADIUS: f32 = 25.0;
/// Outer radius of the star shell.
pub const SHELL_MAX_RADIUS: f32 = 50.0;
/// Fixed hue of the palette (blue).
const STAR_HUE: f32 = 0.6;

/// One background star.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    /// World position on the shell.
    pub position: Vec3,
    /// Linear RGBA sprite tint.
    pub color: [f32; 4],
    /// Sprite size in world units.
    pub size: f32,
}

/// Scatter `count` stars deterministically for the given seed.
#[must_use]
pub fn scatter(count: usize, seed: u64) -> Vec<Star> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            // Uniform direction: uniform azimuth, uniform cos(inclination).
            let theta = rng.random_range(0.0..TAU);
            let cos_phi = rng.random_range(-1.0_f32..1.0);
            let sin_phi = (1.0 - cos_phi * cos_phi).sqrt();
            let direction = Vec3::new(sin_phi * theta.cos(), cos_phi, sin_phi * theta.sin());

            let radius = rng.random_range(SHELL_MIN_RADIUS..SHELL_MAX_RADIUS);
            let lightness = rng.random_range(0.3..1.0);
            let [r, g, b] = hsl_to_rgb(STAR_HUE, 1.0, lightness);

            Star {
                position: direction * radius,
                color: [r, g, b, 1.0],
                size: rng.random_range(0.15..0.3),
            }
        })
        .collect()
}

/// Convert HSL (all components in `[0, 1]`) to linear-ish RGB.
fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let h6 = (h.rem_euclid(1.0)) * 6.0;
    let x = c * (1.0 - (h6.rem_euclid(2.0) - 1.0).abs());
    let (r, g, b) = match h6 as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    [r + m, g + m, b + m]
}
