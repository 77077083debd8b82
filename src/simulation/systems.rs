//! Bevy systems driving the cloth: commands, tick, mesh sync.
//!
//! Order within `Update`:
//! 1. Apply pending commands (toggle / reset)
//! 2. Tick the cloth, writing moved points straight into the mesh positions
//!
//! Both run on the main schedule, so `ClothParams` is only ever written by the
//! input system and read here without locking.

use bevy::{
    prelude::*,
    render::mesh::VertexAttributeValues,
};

use super::cloth::Cloth;
use super::integrator::TickClock;
use super::{ClothCommand, ClothMesh};
use crate::resources::{ClothParams, PositionBuffer};

/// Borrow the position attribute of the cloth mesh, if there is one.
fn mesh_positions<'a>(
    meshes: Option<&'a mut Assets<Mesh>>,
    cloth_mesh: &Query<&Mesh3d, With<ClothMesh>>,
) -> Option<&'a mut Vec<[f32; 3]>> {
    let handle = cloth_mesh.get_single().ok()?;
    let mesh = meshes?.get_mut(&handle.0)?;
    match mesh.attribute_mut(Mesh::ATTRIBUTE_POSITION) {
        Some(VertexAttributeValues::Float32x3(positions)) => Some(positions),
        _ => None,
    }
}

/// Scratch sink for frames with no mesh to mirror into (headless apps, or
/// before the render startup systems have run).
fn scratch_for<'a>(scratch: &'a mut PositionBuffer, cloth: &Cloth) -> &'a mut PositionBuffer {
    if scratch.len() != cloth.grid().len() {
        *scratch = PositionBuffer::with_points(cloth.grid().len());
    }
    scratch
}

/// Apply toggle and reset requests.
///
/// Reset always restores the core; the mesh is updated too when it exists.
pub fn apply_commands(
    mut commands: EventReader<ClothCommand>,
    mut cloth: ResMut<Cloth>,
    mut meshes: Option<ResMut<Assets<Mesh>>>,
    cloth_mesh: Query<&Mesh3d, With<ClothMesh>>,
    mut scratch: Local<PositionBuffer>,
) {
    for command in commands.read() {
        match command {
            ClothCommand::Toggle => {
                cloth.toggle();
            }
            ClothCommand::Reset => match mesh_positions(meshes.as_deref_mut(), &cloth_mesh) {
                Some(positions) => cloth.reset(positions),
                None => {
                    debug!("No cloth mesh to mirror the reset into");
                    let sink = scratch_for(&mut scratch, &cloth);
                    cloth.reset(sink);
                }
            },
        }
    }
}

/// Advance the cloth one frame and mirror the moved points into the mesh.
pub fn tick_cloth(
    time: Res<Time>,
    params: Res<ClothParams>,
    mut cloth: ResMut<Cloth>,
    mut meshes: Option<ResMut<Assets<Mesh>>>,
    cloth_mesh: Query<&Mesh3d, With<ClothMesh>>,
    mut scratch: Local<PositionBuffer>,
) {
    if !cloth.is_running() {
        return;
    }

    let clock = TickClock::from_wall(
        time.elapsed_secs_f64(),
        time.delta_secs_f64(),
        params.time_scale,
    );
    match mesh_positions(meshes.as_deref_mut(), &cloth_mesh) {
        Some(positions) => {
            cloth.tick(&params, clock, positions);
        }
        None => {
            let sink = scratch_for(&mut scratch, &cloth);
            cloth.tick(&params, clock, sink);
        }
    }
}

/// Frame counter for logging
#[derive(Resource, Default)]
pub struct FrameCounter(pub u32);

/// Log every N frames
pub fn log_frame(mut counter: ResMut<FrameCounter>, cloth: Res<Cloth>, time: Res<Time>) {
    counter.0 += 1;
    if counter.0 % 60 == 0 {
        let fps = 1.0 / time.delta_secs_f64().max(f64::EPSILON);
        debug!(
            "Frame {}: {:?}, {} ticks, {:.1} per second",
            counter.0,
            cloth.state(),
            cloth.ticks(),
            fps
        );
    }
}
