//! Streak entities: bright orbit heads trailing a chain of fading segments.
//!
//! The orbit math lives in [`terrella::streaks`]; this module owns the
//! entities and walks their transforms every frame. Streaks are children of
//! the globe pivot, so they inherit the globe's spin on top of their own
//! orbital motion.

use std::f32::consts::TAU;

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use rand::Rng;
use terrella::streaks::{HEAD_RADIUS, TAIL_SEGMENTS, tail_alpha, tail_radius};
use terrella::{StreakState, default_streaks};

use crate::globe::{self, GlobePivot};
use crate::scene::{SceneSet, SpawnScene};

/// Emissive boost on the head so bloom picks it up.
const HEAD_GLOW: f32 = 2.0;

// ============================================================================
// Components
// ============================================================================

/// Orbit state, carried by the head entity.
#[derive(Component, Debug, Clone, Copy)]
pub struct Streak(pub StreakState);

/// One tail segment, trailing the head it references.
#[derive(Component, Debug, Clone, Copy)]
pub struct StreakSegment {
    /// Head entity whose orbit this segment trails.
    pub head: Entity,
    /// Position in the chain, 0 closest to the head.
    pub index: usize,
}

// ============================================================================
// Plugin
// ============================================================================

/// Plugin owning the streak entities.
pub struct StreaksPlugin;

impl Plugin for StreaksPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                // The pivot must exist before streaks can attach to it.
                spawn_streaks
                    .in_set(SceneSet::Spawn)
                    .after(globe::spawn_globe),
                advance_streaks.in_set(SceneSet::Animate),
            ),
        );
    }
}

// ============================================================================
// Systems
// ============================================================================

/// Spawn the streak chains under the globe pivot.
///
/// Every streak starts at a random orbital phase so the chains never move
/// in lockstep after a rebuild.
fn spawn_streaks(
    mut commands: Commands,
    mut spawns: MessageReader<SpawnScene>,
    pivot: Query<Entity, With<GlobePivot>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if spawns.read().count() == 0 {
        return;
    }
    let Ok(pivot) = pivot.single() else {
        return;
    };

    let mut rng = rand::rng();
    let unit_sphere = meshes.add(Sphere::new(1.0));

    for config in default_streaks() {
        let mut state = StreakState::new(&config);
        state.angle = rng.random_range(0.0..TAU);

        let color = Color::linear_rgb(config.color[0], config.color[1], config.color[2]);
        let head_material = materials.add(StandardMaterial {
            base_color: color,
            emissive: color.to_linear() * HEAD_GLOW,
            ..default()
        });

        let head = commands
            .spawn((
                Streak(state),
                Mesh3d(unit_sphere.clone()),
                MeshMaterial3d(head_material),
                Transform::from_translation(state.head_position())
                    .with_scale(Vec3::splat(HEAD_RADIUS)),
                ChildOf(pivot),
            ))
            .id();

        for index in 0..TAIL_SEGMENTS {
            commands.spawn((
                StreakSegment { head, index },
                Mesh3d(unit_sphere.clone()),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: color.with_alpha(tail_alpha(index)),
                    unlit: true,
                    alpha_mode: AlphaMode::Blend,
                    ..default()
                })),
                Transform::from_translation(state.tail_position(index))
                    .with_scale(Vec3::splat(tail_radius(index))),
                ChildOf(pivot),
            ));
        }
    }
    tracing::debug!(streaks = default_streaks().len(), "streaks spawned");
}

/// Advance every orbit and rewrite head and tail transforms.
fn advance_streaks(
    time: Res<Time>,
    mut heads: Query<(&mut Streak, &mut Transform), Without<StreakSegment>>,
    mut segments: Query<(&StreakSegment, &mut Transform), Without<Streak>>,
) {
    let dt = time.delta_secs();
    for (mut streak, mut transform) in &mut heads {
        streak.0.advance(dt);
        transform.translation = streak.0.head_position();
    }
    for (segment, mut transform) in &mut segments {
        let Ok((streak, _)) = heads.get(segment.head) else {
            continue;
        };
        transform.translation = streak.0.tail_position(segment.index);
    }
}
