//! Viewer UI: section navigation bar, landmark overlay card, debug panel.
//!
//! The navigation bar stands in for the host page's scroll position; the
//! overlay card follows the projected landmark the way the page's DOM
//! overlay does. Only the debug panel is a viewer-side extra, toggled with Q.

use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPlugin, EguiPrimaryContextPass, egui};
use leafwing_input_manager::prelude::*;
use terrella::LANDMARK_SECTION;

use crate::bridge::LandmarkScreenPosition;
use crate::figure::FigureState;
use crate::input::ViewerAction;
use crate::rig::{CameraRig, CurrentSection};
use crate::scene::{RebuildScene, SceneConfig, TeardownScene};

/// Offset from the projected landmark pixel to the card anchor.
const CARD_OFFSET: Vec2 = Vec2::new(100.0, -150.0);

/// Nav labels for the recognized sections, in section-index order.
const SECTION_LABELS: [&str; 5] = ["Hero", "Features", "About", "Team", "Contact"];

/// Resource controlling whether the debug panel is visible.
#[derive(Resource)]
pub struct UiVisible(pub bool);

impl Default for UiVisible {
    fn default() -> Self {
        Self(true)
    }
}

/// Plugin for the viewer UI overlay.
pub struct ViewerUiPlugin;

impl Plugin for ViewerUiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin::default())
            .add_plugins(FrameTimeDiagnosticsPlugin::default())
            .init_resource::<UiVisible>()
            .add_systems(Update, toggle_ui_visible)
            .add_systems(
                EguiPrimaryContextPass,
                (
                    navigation_bar,
                    landmark_card,
                    debug_panel.run_if(|visible: Res<UiVisible>| visible.0),
                )
                    .chain(),
            );
    }
}

/// Toggle the debug panel with Q.
fn toggle_ui_visible(
    action_query: Query<&ActionState<ViewerAction>>,
    mut visible: ResMut<UiVisible>,
) {
    let Ok(action_state) = action_query.single() else {
        return;
    };

    if action_state.just_pressed(&ViewerAction::ToggleUi) {
        visible.0 = !visible.0;
    }
}

/// Section buttons along the top edge.
fn navigation_bar(mut contexts: EguiContexts, mut section: ResMut<CurrentSection>) -> Result {
    let ctx = contexts.ctx_mut()?;

    egui::TopBottomPanel::top("navigation").show(ctx, |ui| {
        ui.horizontal(|ui| {
            for (index, label) in SECTION_LABELS.iter().enumerate() {
                let index = index as u32;
                if ui.selectable_label(section.0 == index, *label).clicked() {
                    section.0 = index;
                }
            }
        });
    });

    Ok(())
}

/// Landmark card anchored to the projected screen position.
fn landmark_card(
    mut contexts: EguiContexts,
    section: Res<CurrentSection>,
    config: Res<SceneConfig>,
    screen: Res<LandmarkScreenPosition>,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    if section.0 != LANDMARK_SECTION {
        return Ok(());
    }
    let Some(pixel) = screen.pixel else {
        return Ok(());
    };

    let anchor = pixel + CARD_OFFSET;
    egui::Window::new("landmark-card")
        .title_bar(false)
        .resizable(false)
        .fixed_pos([anchor.x, anchor.y])
        .show(ctx, |ui| {
            let landmark = &config.landmark;
            if let Some(label) = &landmark.label {
                ui.heading(label);
            }
            ui.label(format_coordinates(landmark.lat, landmark.long));
        });

    Ok(())
}

/// Render the debug panel.
fn debug_panel(
    mut contexts: EguiContexts,
    diagnostics: Res<DiagnosticsStore>,
    section: Res<CurrentSection>,
    rig: Res<CameraRig>,
    figure: Res<FigureState>,
    mut rebuilds: MessageWriter<RebuildScene>,
    mut teardowns: MessageWriter<TeardownScene>,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    egui::Window::new("Debug")
        .default_pos([10.0, 40.0])
        .show(ctx, |ui| {
            let fps = diagnostics
                .get(&FrameTimeDiagnosticsPlugin::FPS)
                .and_then(bevy::diagnostic::Diagnostic::smoothed)
                .unwrap_or(0.0);
            ui.label(format!("FPS: {fps:.0}"));
            ui.label(format!(
                "Section: {} ({})",
                section.0,
                section_label(section.0)
            ));
            ui.label(format!("Figure: {:?}", *figure));
            ui.separator();

            let p = rig.0.position;
            ui.label(format!("Camera: ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z));
            let l = rig.0.look_at;
            ui.label(format!("Look-at: ({:.2}, {:.2}, {:.2})", l.x, l.y, l.z));
            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("Rebuild scene").clicked() {
                    rebuilds.write(RebuildScene);
                }
                if ui.button("Teardown").clicked() {
                    teardowns.write(TeardownScene);
                }
            });
        });

    Ok(())
}

// ============================================================================
// UI helpers
// ============================================================================

/// Hemisphere-qualified coordinate line, e.g. `43.4643°N • 80.5204°W`.
fn format_coordinates(lat: f32, long: f32) -> String {
    let ns = if lat >= 0.0 { 'N' } else { 'S' };
    let ew = if long >= 0.0 { 'E' } else { 'W' };
    format!("{:.4}°{ns} • {:.4}°{ew}", lat.abs(), long.abs())
}

fn section_label(index: u32) -> &'static str {
    SECTION_LABELS
        .get(index as usize)
        .copied()
        .unwrap_or(SECTION_LABELS[0])
}
