//! Sprite material for the background starfield.
//!
//! Stars are world-sized billboards: the vertex shader offsets quad corners
//! in view space by the per-star size carried in `UV_0`, so the field keeps
//! perspective depth while every sprite still faces the camera.

use bevy::asset::embedded_asset;
use bevy::mesh::MeshVertexBufferLayoutRef;
use bevy::pbr::{Material, MaterialPipeline, MaterialPipelineKey, MaterialPlugin};
use bevy::prelude::*;
use bevy::render::render_resource::{
    AsBindGroup, RenderPipelineDescriptor, SpecializedMeshPipelineError,
};
use bevy::shader::ShaderRef;

/// Plugin that registers the starfield material and its shader.
pub struct StarMaterialPlugin;

impl Plugin for StarMaterialPlugin {
    fn build(&self, app: &mut App) {
        embedded_asset!(app, "star_material.wgsl");
        app.add_plugins(MaterialPlugin::<StarfieldMaterial>::default());
    }
}

/// The starfield material; tint and size come from vertex attributes.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone, Default)]
pub struct StarfieldMaterial {
    /// Round sprite mask; a missing sprite degrades to square stars.
    #[texture(0)]
    #[sampler(1)]
    pub sprite: Option<Handle<Image>>,
}

impl Material for StarfieldMaterial {
    fn vertex_shader() -> ShaderRef {
        "embedded://terrella_viewer/star_material.wgsl".into()
    }

    fn fragment_shader() -> ShaderRef {
        "embedded://terrella_viewer/star_material.wgsl".into()
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
        // Billboards always face the camera.
        descriptor.primitive.cull_mode = None;
        Ok(())
    }
}
