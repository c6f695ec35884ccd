//! Billboard mesh builders for the surface point layer and the starfield.
//!
//! There is no point-sprite primitive on WebGPU, so every point becomes a
//! four-vertex quad that the vertex shader expands around the point center.
//! The corner offset rides in `UV_1`; per-point data (texture coordinate for
//! surface points, sprite size for stars) rides in the other attributes.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;
use terrella::{Star, SurfacePoint};

/// Quad corners in billboard space.
const QUAD_CORNERS: [[f32; 2]; 4] = [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]];

/// Indices of one quad, two counter-clockwise triangles.
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Build the surface point layer mesh.
///
/// Every vertex of a quad carries the point's center position; the shader
/// reads the corner from `UV_1` and offsets in clip space, keeping the
/// sprite a constant size on screen.
pub fn surface_points_mesh(points: &[SurfacePoint]) -> Mesh {
    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(points.len() * 4);
    let mut normals: Vec<[f32; 3]> = Vec::with_capacity(points.len() * 4);
    let mut uvs: Vec<[f32; 2]> = Vec::with_capacity(points.len() * 4);
    let mut corners: Vec<[f32; 2]> = Vec::with_capacity(points.len() * 4);
    let mut indices: Vec<u32> = Vec::with_capacity(points.len() * 6);

    for (quad, point) in points.iter().enumerate() {
        for corner in QUAD_CORNERS {
            positions.push(point.position.to_array());
            normals.push(point.normal.to_array());
            uvs.push(point.uv.to_array());
            corners.push(corner);
        }
        let base = (quad * 4) as u32;
        indices.extend(QUAD_INDICES.iter().map(|i| base + i));
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_1, corners);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

/// Build the starfield mesh.
///
/// Stars are world-sized billboards: the shader offsets corners in view
/// space by the per-star size stored in `UV_0.x`, so distant stars shrink
/// with perspective instead of staying screen-constant.
pub fn starfield_mesh(stars: &[Star]) -> Mesh {
    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(stars.len() * 4);
    let mut sizes: Vec<[f32; 2]> = Vec::with_capacity(stars.len() * 4);
    let mut colors: Vec<[f32; 4]> = Vec::with_capacity(stars.len() * 4);
    let mut corners: Vec<[f32; 2]> = Vec::with_capacity(stars.len() * 4);
    let mut indices: Vec<u32> = Vec::with_capacity(stars.len() * 6);

    for (quad, star) in stars.iter().enumerate() {
        for corner in QUAD_CORNERS {
            positions.push(star.position.to_array());
            sizes.push([star.size, 0.0]);
            colors.push(star.color);
            corners.push(corner);
        }
        let base = (quad * 4) as u32;
        indices.extend(QUAD_INDICES.iter().map(|i| base + i));
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, sizes);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_1, corners);
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}
