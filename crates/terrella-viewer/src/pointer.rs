//! Pointer tracking shared by the surface highlight and the figure controller.

use bevy::ecs::message::MessageReader;
use bevy::window::{CursorMoved, PrimaryWindow};
use bevy::prelude::*;

/// Pointer position in normalized device coordinates, both axes in [-1, 1].
///
/// Written from cursor-move events, read once per frame by the surface
/// highlight raycast and the figure look-at computation. Holds the last
/// known position between events, so both consumers keep tracking even
/// while the pointer rests.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct PointerState {
    pub ndc: Vec2,
}

/// Plugin that folds cursor events into [`PointerState`].
pub struct PointerPlugin;

impl Plugin for PointerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerState>()
            .add_systems(PreUpdate, track_pointer);
    }
}

/// Keep only the newest cursor position for this frame.
fn track_pointer(
    mut moves: MessageReader<CursorMoved>,
    window: Single<&Window, With<PrimaryWindow>>,
    mut pointer: ResMut<PointerState>,
) {
    let Some(event) = moves.read().last() else {
        return;
    };
    let size = Vec2::new(window.width(), window.height());
    pointer.ndc = cursor_to_ndc(event.position, size);
}

/// Convert a window cursor position (origin top-left, y down) to normalized
/// device coordinates (origin center, y up).
#[must_use]
pub fn cursor_to_ndc(cursor: Vec2, window_size: Vec2) -> Vec2 {
    Vec2::new(
        (cursor.x / window_size.x) * 2.0 - 1.0,
        -((cursor.y / window_size.y) * 2.0 - 1.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_to_ndc_center() {
        let ndc = cursor_to_ndc(Vec2::new(640.0, 360.0), Vec2::new(1280.0, 720.0));
        assert!(ndc.abs_diff_eq(Vec2::ZERO, 1e-6));
    }

    #[test]
    fn test_cursor_to_ndc_corners() {
        let size = Vec2::new(1280.0, 720.0);
        // Top-left of the window is (-1, 1): x left, y up in NDC.
        assert!(cursor_to_ndc(Vec2::ZERO, size).abs_diff_eq(Vec2::new(-1.0, 1.0), 1e-6));
        assert!(cursor_to_ndc(size, size).abs_diff_eq(Vec2::new(1.0, -1.0), 1e-6));
    }

    #[test]
    fn test_cursor_to_ndc_is_linear_in_cursor() {
        let size = Vec2::new(800.0, 600.0);
        let quarter = cursor_to_ndc(Vec2::new(200.0, 150.0), size);
        assert!(quarter.abs_diff_eq(Vec2::new(-0.5, 0.5), 1e-6));
    }
}
