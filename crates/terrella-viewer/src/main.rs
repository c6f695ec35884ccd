//! Interactive 3D globe scene with section-driven camera framing.
//!
//! Renders a rotating globe with a shader-driven surface point layer,
//! orbiting streaks, a pointer-tracked figure, and a landmark overlay,
//! all steered by a discrete section index standing in for a host page's
//! scroll position.

mod bridge;
mod figure;
mod globe;
mod glow_material;
mod highlight;
mod input;
mod launch_params;
mod mesh;
mod pointer;
mod rig;
mod scene;
mod star_material;
mod starfield;
mod streaks;
mod surface_material;
mod ui;

use bevy::prelude::*;
use bridge::BridgePlugin;
use figure::FigurePlugin;
use globe::GlobePlugin;
use glow_material::GlowMaterialPlugin;
use highlight::HighlightPlugin;
use input::InputPlugin;
use pointer::PointerPlugin;
use rig::{CurrentSection, RigPlugin};
use scene::{SceneConfig, ScenePlugin};
use star_material::StarMaterialPlugin;
use starfield::StarfieldPlugin;
use streaks::StreaksPlugin;
use surface_material::SurfaceMaterialPlugin;
use ui::ViewerUiPlugin;

/// Plugin for the main application.
pub struct AppPlugin;

impl Plugin for AppPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            ScenePlugin,
            InputPlugin,
            PointerPlugin,
            RigPlugin,
            GlobePlugin,
            HighlightPlugin,
            StreaksPlugin,
            StarfieldPlugin,
            FigurePlugin,
            BridgePlugin,
            ViewerUiPlugin,
        ))
        .add_plugins((
            SurfaceMaterialPlugin,
            GlowMaterialPlugin,
            StarMaterialPlugin,
        ));
    }
}

fn main() {
    // Initialize tracing for native platforms.
    #[cfg(not(target_family = "wasm"))]
    {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer())
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }

    // Initialize tracing for WASM (logs to browser console).
    #[cfg(target_family = "wasm")]
    {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();
    }

    let params = launch_params::parse();

    let mut app = App::new();

    #[allow(unused_mut)]
    let mut window = Window {
        title: "terrella-viewer".to_string(),
        resolution: (1920, 1080).into(),
        position: WindowPosition::Centered(MonitorSelection::Primary),
        ..Default::default()
    };

    // WASM: Fit canvas to parent element and prevent browser event handling.
    #[cfg(target_family = "wasm")]
    {
        window.fit_canvas_to_parent = true;
        window.prevent_default_event_handling = true;
    }

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(window),
        ..Default::default()
    }));

    // Launch configuration feeds the scene before any plugin builds on it.
    app.insert_resource(SceneConfig::from_params(&params));
    app.insert_resource(CurrentSection(params.section));
    app.insert_resource(params);

    app.add_plugins(AppPlugin).run();
}
