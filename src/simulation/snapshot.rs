//! Post-setup copy of the grid used by reset.

use bevy::math::DVec3;

use super::point::PointGrid;
use crate::resources::PositionSink;

/// Positions of every point, captured once right after the springs are built.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    positions: Vec<DVec3>,
}

impl Snapshot {
    pub fn capture(grid: &PointGrid) -> Self {
        Self {
            positions: grid.positions(),
        }
    }

    pub fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    /// Copy the captured positions back into `grid` and push each to `sink`.
    ///
    /// Only positions change; springs and incident lists stay as they are.
    pub fn restore<S: PositionSink + ?Sized>(&self, grid: &mut PointGrid, sink: &mut S) {
        for (point, &saved) in grid.points_mut().iter_mut().zip(&self.positions) {
            point.position = saved;
            if let Some(buffer_index) = point.buffer_index() {
                sink.write(buffer_index, saved);
            }
        }
    }
}
