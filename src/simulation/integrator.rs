//! Per-point force accumulation and position update.
//!
//! There is no velocity state. The clamped, summed force is treated as a
//! displacement rate and applied straight to the position:
//! `position += force * time_scale * frame_delta`.

use bevy::math::DVec3;

use super::point::PointGrid;
use super::spring::SpringNetwork;
use super::wind::WindModel;
use crate::resources::{ClothParams, PositionSink};

/// Simulation time for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickClock {
    /// Scaled simulation time fed to the wind
    pub sim_time: f64,
    /// Scaled duration of this frame
    pub scaled_delta: f64,
}

impl TickClock {
    /// Scale wall-clock `elapsed` and `delta` seconds by `time_scale`.
    pub fn from_wall(elapsed: f64, delta: f64, time_scale: f64) -> Self {
        Self {
            sim_time: time_scale * elapsed,
            scaled_delta: time_scale * delta,
        }
    }
}

/// Rescale `force` to `max` magnitude when it is longer than that.
pub fn clamp_force(force: DVec3, max: f64) -> DVec3 {
    let magnitude = force.length();
    if magnitude > max {
        force * (max / magnitude)
    } else {
        force
    }
}

/// Advances every non-anchor point once per tick.
#[derive(Clone, Debug)]
pub struct ForceIntegrator {
    /// Flat indices of the points that move; anchors are left out
    work_list: Vec<usize>,
    /// Last accumulated force per point
    accumulators: Vec<DVec3>,
}

impl ForceIntegrator {
    pub fn new(grid: &PointGrid) -> Self {
        let work_list = grid
            .points()
            .iter()
            .enumerate()
            .filter(|(_, p)| !grid.is_anchor(p.row(), p.col()))
            .map(|(idx, _)| idx)
            .collect();
        Self {
            work_list,
            accumulators: vec![DVec3::ZERO; grid.len()],
        }
    }

    /// Points that receive position updates.
    pub fn work_list(&self) -> &[usize] {
        &self.work_list
    }

    /// Force accumulated for point `idx` during the last integration, after
    /// clamping and with gravity and wind added. Anchors stay at zero.
    pub fn accumulated(&self, idx: usize) -> DVec3 {
        self.accumulators[idx]
    }

    /// Sum of incident spring forces on point `idx`, before clamping.
    pub fn spring_force(grid: &PointGrid, network: &SpringNetwork, idx: usize) -> DVec3 {
        grid.points()[idx]
            .incident()
            .iter()
            .fold(DVec3::ZERO, |acc, s| acc + network.spring(s.spring).force_on(s.role))
    }

    /// Move every point on the work list, writing each new position to `sink`.
    ///
    /// Spring forces must already be up to date for the current positions.
    pub fn integrate<S: PositionSink + ?Sized>(
        &mut self,
        grid: &mut PointGrid,
        network: &SpringNetwork,
        params: &ClothParams,
        clock: TickClock,
        sink: &mut S,
    ) {
        let wind = WindModel::new(params.wind_force_factor, params.wind_cycle_factor);
        for &idx in &self.work_list {
            let mut force = clamp_force(
                Self::spring_force(grid, network, idx),
                params.max_spring_force,
            );
            force.y += params.gravity;

            let point = &mut grid.points_mut()[idx];
            force += wind.force(clock.sim_time, point.col());
            self.accumulators[idx] = force;

            point.position += force * clock.scaled_delta;
            if let Some(buffer_index) = point.buffer_index() {
                sink.write(buffer_index, point.position);
            }
        }
    }
}
