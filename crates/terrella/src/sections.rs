//! Section-indexed camera presets.
//!
//! The page that hosts the scene reports a discrete section index as the
//! user scrolls; each recognized index maps to a fixed camera position and
//! look-at pair. The landmark section additionally pins the globe's
//! orientation so the landmark faces the camera.

use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

use crate::geo::{Marker, project};

/// World offset of the globe pivot.
pub const GLOBE_OFFSET: Vec3 = Vec3::new(-6.0, 0.0, -0.5);

/// Focus point the camera orbits; also the origin the landmark look-at is
/// expressed against.
pub const FOCUS: Vec3 = Vec3::new(-7.7, 0.0, 0.0);

/// Section index that frames the landmark and locks globe orientation.
pub const LANDMARK_SECTION: u32 = 3;

/// Number of recognized sections.
pub const SECTION_COUNT: u32 = 5;

/// Camera framing for one section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionPreset {
    /// Target camera position.
    pub position: Vec3,
    /// Target look-at point.
    pub look_at: Vec3,
}

const PRESETS: [SectionPreset; SECTION_COUNT as usize] = [
    SectionPreset {
        position: Vec3::new(7.0, 0.0, 4.0),
        look_at: Vec3::new(-7.7, 0.0, 0.0),
    },
    SectionPreset {
        position: Vec3::new(6.0, -4.0, 2.0),
        look_at: Vec3::new(-7.7, 1.0, -0.85),
    },
    SectionPreset {
        position: Vec3::new(12.0, 0.0, -24.0),
        look_at: Vec3::new(-7.7, 0.0, 0.0),
    },
    SectionPreset {
        position: Vec3::new(10.0, -3.0, 1.0),
        look_at: Vec3::new(-7.7, 0.0, 10.0),
    },
    SectionPreset {
        position: Vec3::new(20.0, 15.0, 20.0),
        look_at: Vec3::new(30.0, 20.0, 30.0),
    },
];

/// Look up the camera preset for a section index.
///
/// Unrecognized indices fall back to section 0 rather than failing.
#[must_use]
pub fn section_preset(index: u32) -> SectionPreset {
    PRESETS
        .get(index as usize)
        .copied()
        .unwrap_or(PRESETS[0])
}

/// The fixed landmark whose projection drives the overlay.
#[must_use]
pub fn default_landmark() -> Marker {
    Marker {
        lat: 43.4643,
        long: -80.5204,
        label: Some("Waterloo, Canada".to_owned()),
        color: None,
    }
}

/// World-space look-at target for the landmark section: the landmark's
/// unit-sphere projection carried by the camera focus point.
#[must_use]
pub fn landmark_look_at(landmark: &Marker) -> Vec3 {
    FOCUS + project(landmark.lat, landmark.long, 1.0)
}

/// Globe orientation target (XYZ euler radians) that turns the landmark's
/// longitude toward the camera while tipping the globe onto its side.
#[must_use]
pub fn landmark_orientation(landmark: &Marker) -> Vec3 {
    Vec3::new(
        FRAC_PI_2,
        (-landmark.long + 160.0).to_radians(),
        FRAC_PI_2,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_table_literals() {
        // The five documented framings, asserted exactly.
        let expected = [
            (Vec3::new(7.0, 0.0, 4.0), Vec3::new(-7.7, 0.0, 0.0)),
            (Vec3::new(6.0, -4.0, 2.0), Vec3::new(-7.7, 1.0, -0.85)),
            (Vec3::new(12.0, 0.0, -24.0), Vec3::new(-7.7, 0.0, 0.0)),
            (Vec3::new(10.0, -3.0, 1.0), Vec3::new(-7.7, 0.0, 10.0)),
            (Vec3::new(20.0, 15.0, 20.0), Vec3::new(30.0, 20.0, 30.0)),
        ];
        for (index, (position, look_at)) in expected.into_iter().enumerate() {
            let preset = section_preset(index as u32);
            assert_eq!(preset.position, position, "position for section {index}");
            assert_eq!(preset.look_at, look_at, "look-at for section {index}");
        }
    }

    #[test]
    fn test_unrecognized_index_falls_back_to_home() {
        assert_eq!(section_preset(99), section_preset(0));
        assert_eq!(section_preset(u32::MAX), section_preset(0));
        assert_eq!(section_preset(SECTION_COUNT), section_preset(0));
    }

    #[test]
    fn test_landmark_look_at_offsets_projection() {
        let landmark = default_landmark();
        let target = landmark_look_at(&landmark);
        // The target sits on the unit sphere around the focus point.
        assert!(((target - FOCUS).length() - 1.0).abs() < 1e-5);
        assert_eq!(target.y, project(landmark.lat, landmark.long, 1.0).y);
    }

    #[test]
    fn test_landmark_orientation_turns_longitude_to_camera() {
        let orientation = landmark_orientation(&default_landmark());
        assert!((orientation.y - (80.5204_f32 + 160.0).to_radians()).abs() < 1e-6);
        assert!((orientation.x - FRAC_PI_2).abs() < 1e-6);
        assert!((orientation.z - FRAC_PI_2).abs() < 1e-6);
    }
}
