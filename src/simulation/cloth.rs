//! The assembled cloth: grid, springs, integrator, snapshot and run state.

use bevy::log::info;
use bevy::math::DVec3;
use bevy::prelude::Resource;

use super::integrator::{ForceIntegrator, TickClock};
use super::mesh_topology::MeshTopology;
use super::physics_config::grid;
use super::point::PointGrid;
use super::snapshot::Snapshot;
use super::spring::SpringNetwork;
use crate::error::ClothError;
use crate::resources::{ClothParams, PositionSink};

/// Whether ticks do anything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunState {
    #[default]
    Running,
    Paused,
}

impl RunState {
    pub fn toggled(self) -> Self {
        match self {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
        }
    }
}

/// Grid dimensions and spring layout used to build a cloth.
#[derive(Clone, Debug, PartialEq)]
pub struct ClothLayout {
    pub size: usize,
    pub edge_length: f64,
    pub spring_offsets: Vec<usize>,
}

impl Default for ClothLayout {
    fn default() -> Self {
        Self {
            size: grid::SIZE,
            edge_length: grid::EDGE_LENGTH,
            spring_offsets: grid::SPRING_OFFSETS.to_vec(),
        }
    }
}

/// The simulated sheet.
///
/// A tick runs in two phases that never interleave: every spring force is
/// computed from the same set of positions, then every free point moves.
#[derive(Resource, Clone, Debug)]
pub struct Cloth {
    grid: PointGrid,
    springs: SpringNetwork,
    integrator: ForceIntegrator,
    snapshot: Snapshot,
    topology: MeshTopology,
    state: RunState,
    ticks: u64,
}

impl Cloth {
    /// Build grid, mesh topology and springs, then capture the reset snapshot.
    pub fn new(layout: &ClothLayout) -> Result<Self, ClothError> {
        let mut grid = PointGrid::new(layout.size, layout.edge_length)?;
        let topology = MeshTopology::build(&mut grid);
        let springs = SpringNetwork::build(&mut grid, &layout.spring_offsets)?;
        let snapshot = Snapshot::capture(&grid);
        let integrator = ForceIntegrator::new(&grid);

        info!(
            "Cloth ready: {}x{} points, {} springs, {} triangles",
            layout.size,
            layout.size,
            springs.len(),
            topology.triangle_count()
        );

        Ok(Self {
            grid,
            springs,
            integrator,
            snapshot,
            topology,
            state: RunState::Running,
            ticks: 0,
        })
    }

    /// Advance one frame. Returns `false` without touching anything while paused.
    pub fn tick<S: PositionSink + ?Sized>(
        &mut self,
        params: &ClothParams,
        clock: TickClock,
        sink: &mut S,
    ) -> bool {
        if self.state == RunState::Paused {
            return false;
        }
        self.springs.update_forces(&self.grid, params.stiffness);
        self.integrator
            .integrate(&mut self.grid, &self.springs, params, clock, sink);
        self.ticks += 1;
        true
    }

    /// Flip between running and paused.
    pub fn toggle(&mut self) -> RunState {
        self.state = self.state.toggled();
        info!("Cloth {:?}", self.state);
        self.state
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Put every point back where it was after setup. Valid in any state.
    pub fn reset<S: PositionSink + ?Sized>(&mut self, sink: &mut S) {
        self.snapshot.restore(&mut self.grid, sink);
        info!("Cloth reset after {} ticks", self.ticks);
    }

    /// Ticks actually executed (paused ticks don't count).
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn grid(&self) -> &PointGrid {
        &self.grid
    }

    /// Direct access to positions, e.g. to displace a point for inspection.
    pub fn grid_mut(&mut self) -> &mut PointGrid {
        &mut self.grid
    }

    pub fn springs(&self) -> &SpringNetwork {
        &self.springs
    }

    pub fn integrator(&self) -> &ForceIntegrator {
        &self.integrator
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn topology(&self) -> &MeshTopology {
        &self.topology
    }

    pub fn position(&self, row: usize, col: usize) -> DVec3 {
        self.grid.position(row, col)
    }
}
