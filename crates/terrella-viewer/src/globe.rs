//! The globe assembly: translucent shell, interactive point layer, rim glow,
//! markers, a local light rig, spin, and the landmark connector.
//!
//! Everything visual hangs off a single pivot entity at [`GLOBE_OFFSET`];
//! the spin system writes the pivot rotation, so the shell, points, markers
//! and lights all turn together.

use bevy::ecs::message::MessageReader;
use bevy::light::light_consts::lux;
use bevy::prelude::*;
use terrella::{GLOBE_OFFSET, Marker, point_lattice, project};

use crate::glow_material::GlowMaterial;
use crate::mesh::surface_points_mesh;
use crate::rig;
use crate::rig::{ConnectorVisible, GlobeOrientation};
use crate::scene::{SceneConfig, SceneSet, SceneTag, SpawnScene};
use crate::surface_material::SurfacePointsMaterial;

// ============================================================================
// Constants
// ============================================================================

/// Radius of the translucent base shell.
const SHELL_RADIUS: f32 = 1.0;
/// The interactive point lattice sits just above the shell.
const POINT_LAYER_RADIUS: f32 = 1.01;
/// Markers float slightly above the point layer.
const MARKER_RADIUS: f32 = 1.02;
/// The rim glow shell wraps the whole assembly.
const GLOW_RADIUS: f32 = 1.08;

/// Marker core and halo sphere radii.
const MARKER_CORE_RADIUS: f32 = 0.02;
const MARKER_HALO_RADIUS: f32 = 0.03;
/// Markers with no tint of their own render red.
const DEFAULT_MARKER_COLOR: Color = Color::srgb(1.0, 0.0, 0.0);

/// Globe-local offset from the landmark to the connector's far endpoint.
const CONNECTOR_REACH: Vec3 = Vec3::new(2.0, 0.5, 1.0);

// ============================================================================
// Components
// ============================================================================

/// The pivot entity all globe content is parented to.
#[derive(Component, Debug, Clone, Copy)]
pub struct GlobePivot;

/// Marker for the interactive surface point layer.
#[derive(Component, Debug, Clone, Copy)]
pub struct SurfaceLayer;

// ============================================================================
// Plugin
// ============================================================================

/// Plugin owning the globe assembly.
pub struct GlobePlugin;

impl Plugin for GlobePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                spawn_globe.in_set(SceneSet::Spawn),
                spin_globe.in_set(SceneSet::Animate).after(rig::step_rig),
                draw_connector.in_set(SceneSet::Project),
            ),
        );
    }
}

// ============================================================================
// Systems
// ============================================================================

/// Build the globe assembly for a fresh scene instance.
pub(crate) fn spawn_globe(
    mut commands: Commands,
    mut spawns: MessageReader<SpawnScene>,
    config: Res<SceneConfig>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut standard_materials: ResMut<Assets<StandardMaterial>>,
    mut surface_materials: ResMut<Assets<SurfacePointsMaterial>>,
    mut glow_materials: ResMut<Assets<GlowMaterial>>,
) {
    if spawns.read().count() == 0 {
        return;
    }

    let lattice = point_lattice(config.surface_points, POINT_LAYER_RADIUS);
    tracing::info!(
        points = lattice.len(),
        markers = config.markers.len() + 1,
        "spawning globe assembly"
    );

    commands
        .spawn((
            SceneTag,
            GlobePivot,
            Transform::from_translation(GLOBE_OFFSET),
            Visibility::default(),
        ))
        .with_children(|pivot| {
            // Translucent base shell under the point layer.
            pivot.spawn((
                Mesh3d(meshes.add(Sphere::new(SHELL_RADIUS))),
                MeshMaterial3d(standard_materials.add(StandardMaterial {
                    base_color: Color::srgba(0.0, 0.6, 1.0, 0.8),
                    metallic: 0.3,
                    perceptual_roughness: 0.7,
                    alpha_mode: AlphaMode::Blend,
                    ..default()
                })),
            ));

            // Interactive point layer; the highlight system rewrites its
            // uniform every frame the pointer ray lands on the globe.
            pivot.spawn((
                SurfaceLayer,
                Mesh3d(meshes.add(surface_points_mesh(&lattice))),
                MeshMaterial3d(surface_materials.add(SurfacePointsMaterial {
                    color_texture: Some(asset_server.load("textures/earth_color.jpg")),
                    accent_texture: Some(asset_server.load("textures/earth_accent.jpg")),
                    elevation_texture: Some(asset_server.load("textures/earth_elevation.jpg")),
                    alpha_texture: Some(asset_server.load("textures/earth_alpha.jpg")),
                    ..default()
                })),
            ));

            // Rim glow shell, culled front-face so only the halo shows.
            pivot.spawn((
                Mesh3d(meshes.add(Sphere::new(GLOW_RADIUS))),
                MeshMaterial3d(glow_materials.add(GlowMaterial::default())),
            ));

            for marker in std::iter::once(&config.landmark).chain(&config.markers) {
                let tint = marker_tint(marker);
                pivot
                    .spawn((
                        Mesh3d(meshes.add(Sphere::new(MARKER_CORE_RADIUS))),
                        MeshMaterial3d(standard_materials.add(StandardMaterial {
                            base_color: tint.with_alpha(0.8),
                            unlit: true,
                            alpha_mode: AlphaMode::Blend,
                            ..default()
                        })),
                        Transform::from_translation(project(
                            marker.lat,
                            marker.long,
                            MARKER_RADIUS,
                        )),
                    ))
                    .with_children(|core| {
                        core.spawn((
                            Mesh3d(meshes.add(Sphere::new(MARKER_HALO_RADIUS))),
                            MeshMaterial3d(standard_materials.add(StandardMaterial {
                                base_color: tint.with_alpha(0.3),
                                unlit: true,
                                alpha_mode: AlphaMode::Blend,
                                ..default()
                            })),
                        ));
                    });
            }

            // Key and accent lights rotate with the globe.
            pivot.spawn((
                DirectionalLight {
                    illuminance: lux::OVERCAST_DAY,
                    shadows_enabled: false,
                    ..default()
                },
                Transform::from_xyz(5.0, 3.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
            ));
            pivot.spawn((
                PointLight {
                    intensity: 200_000.0,
                    range: 10.0,
                    shadows_enabled: false,
                    ..default()
                },
                Transform::from_xyz(2.0, 2.0, 2.0),
            ));
        });
}

/// Copy the converged orientation onto the pivot transform.
fn spin_globe(
    orientation: Res<GlobeOrientation>,
    mut pivot: Single<&mut Transform, With<GlobePivot>>,
) {
    let r = orientation.0.rotation;
    pivot.rotation = Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z);
}

/// Draw the landmark connector while the landmark section holds it visible.
fn draw_connector(
    connector: Res<ConnectorVisible>,
    config: Res<SceneConfig>,
    pivot: Single<&Transform, With<GlobePivot>>,
    mut gizmos: Gizmos,
) {
    if !connector.0 {
        return;
    }
    let (start, end) = connector_endpoints(&pivot, &config.landmark);
    gizmos.line(start, end, Color::WHITE.with_alpha(0.6));
}

// ============================================================================
// Helpers
// ============================================================================

fn marker_tint(marker: &Marker) -> Color {
    match marker.color {
        Some([r, g, b]) => Color::linear_rgb(r, g, b),
        None => DEFAULT_MARKER_COLOR,
    }
}

/// World-space endpoints of the connector line for the current pivot pose.
fn connector_endpoints(pivot: &Transform, landmark: &Marker) -> (Vec3, Vec3) {
    let anchor = project(landmark.lat, landmark.long, MARKER_RADIUS);
    (
        pivot.transform_point(anchor),
        pivot.transform_point(anchor + CONNECTOR_REACH),
    )
}
