//! Centralized input action definitions.
//!
//! Defines all viewer actions using `leafwing-input-manager` for declarative,
//! rebindable input mapping. The host page normally drives the section index;
//! these bindings stand in for that scroll signal.

use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

// ============================================================================
// Action enum
// ============================================================================

/// Actions for section navigation and scene control.
#[derive(Actionlike, PartialEq, Eq, Hash, Clone, Copy, Debug, Reflect)]
pub enum ViewerAction {
    /// Advance to the next section (Down / Page Down).
    NextSection,
    /// Return to the previous section (Up / Page Up).
    PreviousSection,
    /// Toggle UI visibility (Q).
    ToggleUi,
    /// Tear down and rebuild the scene (R).
    RebuildScene,
    /// Orbit the camera around its focus while held (left mouse).
    OrbitDrag,
}

// ============================================================================
// Input map
// ============================================================================

/// Create the default input map for viewer actions.
pub fn default_input_map() -> InputMap<ViewerAction> {
    InputMap::default()
        .with(ViewerAction::NextSection, KeyCode::ArrowDown)
        .with(ViewerAction::NextSection, KeyCode::PageDown)
        .with(ViewerAction::PreviousSection, KeyCode::ArrowUp)
        .with(ViewerAction::PreviousSection, KeyCode::PageUp)
        .with(ViewerAction::ToggleUi, KeyCode::KeyQ)
        .with(ViewerAction::RebuildScene, KeyCode::KeyR)
        .with(ViewerAction::OrbitDrag, MouseButton::Left)
}

// ============================================================================
// Plugin
// ============================================================================

/// Plugin that registers the viewer action type and spawns its input map.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(InputManagerPlugin::<ViewerAction>::default())
            .add_systems(Startup, spawn_input_map);
    }
}

/// Spawn the action map; `ActionState` comes along as a required component.
fn spawn_input_map(mut commands: Commands) {
    commands.spawn(default_input_map());
}
