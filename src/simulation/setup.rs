//! Construction of the renderable mesh the cloth writes into.

use bevy::{
    prelude::*,
    render::{
        mesh::{Indices, PrimitiveTopology},
        render_asset::RenderAssetUsages,
    },
};

use super::cloth::Cloth;
use super::mesh_topology::initial_positions;

/// Build a triangle-list mesh whose vertex `i` is the point with buffer index `i`.
///
/// Positions are rewritten every tick, so the mesh stays in main-world memory
/// as well as on the GPU.
pub fn build_cloth_mesh(cloth: &Cloth) -> Mesh {
    let topology = cloth.topology();
    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::all())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, initial_positions(cloth.grid()))
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, topology.uvs.clone())
        .with_inserted_indices(Indices::U32(topology.indices.clone()))
}
