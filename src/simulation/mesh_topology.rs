//! Triangle layout of the rendered sheet and the (row, col) → buffer index table.

use super::point::PointGrid;

/// Index, uv and triangle data for the cloth mesh.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshTopology {
    /// Three buffer indices per triangle
    pub indices: Vec<u32>,
    /// One uv pair per buffer index
    pub uvs: Vec<[f32; 2]>,
}

impl MeshTopology {
    /// Assign buffer indices and lay out two triangles per grid cell.
    ///
    /// Every point is referenced once in row-major order before any triangle,
    /// so the buffer index of (row, col) ends up as `row * n + col`.
    pub fn build(grid: &mut PointGrid) -> Self {
        let n = grid.size();
        for row in 0..n {
            for col in 0..n {
                grid.buffer_index_or_assign(row, col);
            }
        }

        let mut indices = Vec::with_capacity(6 * (n - 1) * (n - 1));
        for row in 0..n - 1 {
            for col in 0..n - 1 {
                let top_left = grid.buffer_index_or_assign(row, col) as u32;
                let bottom_left = grid.buffer_index_or_assign(row + 1, col) as u32;
                let bottom_right = grid.buffer_index_or_assign(row + 1, col + 1) as u32;
                let top_right = grid.buffer_index_or_assign(row, col + 1) as u32;
                indices.extend_from_slice(&[top_left, bottom_left, bottom_right]);
                indices.extend_from_slice(&[top_left, top_right, bottom_right]);
            }
        }

        let mut uvs = vec![[0.0; 2]; grid.assigned_buffer_indices()];
        for point in grid.points() {
            if let Some(buffer_index) = point.buffer_index() {
                uvs[buffer_index] = [point.col() as f32 / n as f32, point.row() as f32 / n as f32];
            }
        }

        Self { indices, uvs }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Initial `[f32; 3]` positions in buffer order, ready for a mesh attribute.
pub fn initial_positions(grid: &PointGrid) -> Vec<[f32; 3]> {
    let mut positions = vec![[0.0; 3]; grid.assigned_buffer_indices()];
    for point in grid.points() {
        if let Some(buffer_index) = point.buffer_index() {
            positions[buffer_index] = point.position.as_vec3().to_array();
        }
    }
    positions
}
