//! Additive fresnel glow shell around the globe.
//!
//! Rendered on an inside-out sphere slightly larger than the globe: front
//! faces are culled so only the far hemisphere draws, producing a soft halo
//! behind the surface rather than a film in front of it.

use bevy::asset::embedded_asset;
use bevy::mesh::MeshVertexBufferLayoutRef;
use bevy::pbr::{Material, MaterialPipeline, MaterialPipelineKey, MaterialPlugin};
use bevy::prelude::*;
use bevy::render::render_resource::{
    AsBindGroup, Face, RenderPipelineDescriptor, ShaderType, SpecializedMeshPipelineError,
};
use bevy::shader::ShaderRef;

/// Plugin that registers the glow material and its shader.
pub struct GlowMaterialPlugin;

impl Plugin for GlowMaterialPlugin {
    fn build(&self, app: &mut App) {
        embedded_asset!(app, "glow_material.wgsl");
        app.add_plugins(MaterialPlugin::<GlowMaterial>::default());
    }
}

/// Uniform block shared with `glow_material.wgsl`.
#[derive(ShaderType, Clone, Copy, Debug)]
#[repr(C)]
pub struct GlowParams {
    /// Glow color before intensity shaping.
    pub rim_color: Vec3,
    /// Exponent shaping the falloff from center to rim.
    pub exponent: f32,
    /// Color multiplier after shaping.
    pub strength: f32,
    /// Alpha multiplier on the shaped intensity.
    pub alpha_scale: f32,
    /// Pads the block to 32 bytes for uniform-buffer layout.
    pub _padding: Vec2,
}

impl Default for GlowParams {
    fn default() -> Self {
        Self {
            rim_color: Vec3::new(1.0, 0.1, 0.1),
            exponent: 1.5,
            strength: 3.0,
            alpha_scale: 0.5,
            _padding: Vec2::ZERO,
        }
    }
}

/// The glow shell material.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone, Default)]
pub struct GlowMaterial {
    #[uniform(0)]
    pub params: GlowParams,
}

impl Material for GlowMaterial {
    fn vertex_shader() -> ShaderRef {
        "embedded://terrella_viewer/glow_material.wgsl".into()
    }

    fn fragment_shader() -> ShaderRef {
        "embedded://terrella_viewer/glow_material.wgsl".into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Add
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
        // Inside-out shell: cull front faces, draw the far hemisphere.
        descriptor.primitive.cull_mode = Some(Face::Front);
        Ok(())
    }
}
