//! Material for the shader-displaced surface point layer.
//!
//! The vertex shader expands each point quad to a screen-constant sprite,
//! lifts it toward the camera by the sampled elevation, and adds a ripple
//! around the pointer's surface UV. The fragment shader blends the accent
//! map toward the color map inside the highlight radius and masks alpha
//! with the specular map so oceans fade out.

use bevy::asset::{LoadState, embedded_asset};
use bevy::mesh::MeshVertexBufferLayoutRef;
use bevy::pbr::{Material, MaterialPipeline, MaterialPipelineKey, MaterialPlugin};
use bevy::prelude::*;
use bevy::render::render_resource::{
    AsBindGroup, CompareFunction, RenderPipelineDescriptor, ShaderType,
    SpecializedMeshPipelineError,
};
use bevy::shader::ShaderRef;

/// Sprite size in pixels, constant regardless of camera distance.
pub const POINT_SIZE: f32 = 8.0;
/// View-space lift applied per unit of sampled elevation.
pub const DISPLACEMENT_SCALE: f32 = 0.35;
/// UV-space radius of the pointer highlight.
pub const HIGHLIGHT_THRESHOLD: f32 = 0.03;
/// Alpha applied after the specular mask.
pub const ALPHA_SCALE: f32 = 0.6;

/// Plugin that registers the surface point material and its shader.
pub struct SurfaceMaterialPlugin;

impl Plugin for SurfaceMaterialPlugin {
    fn build(&self, app: &mut App) {
        embedded_asset!(app, "surface_material.wgsl");
        app.add_plugins(MaterialPlugin::<SurfacePointsMaterial>::default())
            .add_systems(Update, degrade_failed_textures);
    }
}

/// Uniform block shared with `surface_material.wgsl`.
#[derive(ShaderType, Clone, Copy, Debug)]
#[repr(C)]
pub struct SurfaceParams {
    /// Surface UV under the pointer; drives the ripple and the color mix.
    pub highlight_uv: Vec2,
    /// Sprite size in pixels.
    pub point_size: f32,
    /// View-space lift per unit of elevation.
    pub displacement_scale: f32,
    /// UV radius of the highlight.
    pub highlight_threshold: f32,
    /// Alpha applied after the specular mask.
    pub alpha_scale: f32,
    /// Pads the block to 32 bytes for uniform-buffer layout.
    pub _padding: Vec2,
}

impl Default for SurfaceParams {
    fn default() -> Self {
        Self {
            highlight_uv: Vec2::ZERO,
            point_size: POINT_SIZE,
            displacement_scale: DISPLACEMENT_SCALE,
            highlight_threshold: HIGHLIGHT_THRESHOLD,
            alpha_scale: ALPHA_SCALE,
            _padding: Vec2::ZERO,
        }
    }
}

/// The surface point layer material.
///
/// Textures are optional so a failed load degrades that sampler to the
/// fallback image instead of keeping the whole layer off screen.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone, Default)]
pub struct SurfacePointsMaterial {
    #[uniform(0)]
    pub params: SurfaceParams,
    /// Natural color map, revealed inside the highlight.
    #[texture(1)]
    #[sampler(2)]
    pub color_texture: Option<Handle<Image>>,
    /// Accent map shown across the rest of the sphere.
    #[texture(3)]
    #[sampler(4)]
    pub accent_texture: Option<Handle<Image>>,
    /// Elevation map sampled in the vertex stage.
    #[texture(5)]
    #[sampler(6)]
    pub elevation_texture: Option<Handle<Image>>,
    /// Specular map; water is bright, so `1 - sample` masks oceans.
    #[texture(7)]
    #[sampler(8)]
    pub alpha_texture: Option<Handle<Image>>,
}

impl Material for SurfacePointsMaterial {
    fn vertex_shader() -> ShaderRef {
        "embedded://terrella_viewer/surface_material.wgsl".into()
    }

    fn fragment_shader() -> ShaderRef {
        "embedded://terrella_viewer/surface_material.wgsl".into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Blend
    }

    fn enable_shadows() -> bool {
        false
    }

    fn enable_prepass() -> bool {
        false
    }

    fn specialize(
        _pipeline: &MaterialPipeline,
        descriptor: &mut RenderPipelineDescriptor,
        _layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        // Quads always face the camera; the shader's own view-space normal
        // test culls the far hemisphere.
        descriptor.primitive.cull_mode = None;
        // The layer draws over the base sphere regardless of depth, like a
        // sprite overlay.
        if let Some(depth_stencil) = &mut descriptor.depth_stencil {
            depth_stencil.depth_compare = CompareFunction::Always;
            depth_stencil.depth_write_enabled = false;
        }
        Ok(())
    }
}

/// Drop texture slots whose asset failed to load.
///
/// A missing texture then samples the fallback image, keeping the layer
/// visible instead of waiting forever on a bind group that can never be
/// prepared.
fn degrade_failed_textures(
    asset_server: Res<AssetServer>,
    mut materials: ResMut<Assets<SurfacePointsMaterial>>,
) {
    let mut failed: Vec<(AssetId<SurfacePointsMaterial>, &'static str)> = Vec::new();
    for (id, material) in materials.iter() {
        for (slot, name) in [
            (&material.color_texture, "color"),
            (&material.accent_texture, "accent"),
            (&material.elevation_texture, "elevation"),
            (&material.alpha_texture, "alpha"),
        ] {
            if let Some(handle) = slot
                && matches!(asset_server.load_state(handle), LoadState::Failed(_))
            {
                failed.push((id, name));
            }
        }
    }

    for (id, name) in failed {
        let Some(material) = materials.get_mut(id) else {
            continue;
        };
        match name {
            "color" => material.color_texture = None,
            "accent" => material.accent_texture = None,
            "elevation" => material.elevation_texture = None,
            _ => material.alpha_texture = None,
        }
        tracing::warn!(texture = name, "surface texture failed to load, sampling fallback");
    }
}
