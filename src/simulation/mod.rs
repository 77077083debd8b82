//! Simulation module - mass-spring cloth core and the Bevy plugin that drives it.

pub mod cloth;
pub mod input;
pub mod integrator;
pub mod mesh_topology;
pub mod physics_config;
pub mod point;
pub mod setup;
pub mod snapshot;
pub mod spring;
pub mod systems;
pub mod wind;

use bevy::prelude::*;

pub use cloth::{Cloth, ClothLayout, RunState};
pub use integrator::{clamp_force, ForceIntegrator, TickClock};
pub use mesh_topology::MeshTopology;
pub use physics_config::{expected_spring_count, ParamRange, Tunable};
pub use point::{EndpointRole, IncidentSpring, Point, PointGrid};
pub use setup::build_cloth_mesh;
pub use snapshot::Snapshot;
pub use spring::{Spring, SpringKind, SpringNetwork};
pub use wind::WindModel;

use crate::resources::ClothParams;

/// Requests from the control surface that change run state rather than coefficients.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClothCommand {
    /// Flip between running and paused
    Toggle,
    /// Restore the post-setup positions
    Reset,
}

/// Marker for the mesh entity that mirrors the cloth's point positions.
#[derive(Component)]
pub struct ClothMesh;

/// Plugin that owns the cloth and ticks it once per frame.
pub struct SimulationPlugin {
    cloth: Cloth,
}

impl SimulationPlugin {
    pub fn new(cloth: Cloth) -> Self {
        Self { cloth }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.cloth.clone())
            .init_resource::<ClothParams>()
            .init_resource::<systems::FrameCounter>()
            .add_event::<ClothCommand>()
            .add_systems(
                Update,
                (
                    input::handle_cloth_input,
                    systems::apply_commands,
                    systems::tick_cloth,
                    systems::log_frame,
                )
                    .chain(),
            );
    }
}
