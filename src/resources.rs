//! Plain-data structures shared between the cloth core and the Bevy shell.
//!
//! `ClothParams` is `#[repr(C)]` + `Pod` like every other parameter block in
//! this crate, and the position buffer is a flat `[f32; 3]` array that casts
//! straight into a mesh's `ATTRIBUTE_POSITION` data.

use bevy::math::DVec3;
use bevy::prelude::Resource;
use bytemuck::{Pod, Zeroable};

use crate::simulation::physics_config::{defaults, Tunable};

/// Live-mutable simulation coefficients.
///
/// Written by the input system, read by the tick system. Both run on the main
/// schedule so the resource needs no synchronisation.
#[repr(C)]
#[derive(Resource, Clone, Copy, Pod, Zeroable, Debug, PartialEq)]
pub struct ClothParams {
    /// Spring stiffness in the signed-quadratic force law
    pub stiffness: f64,
    /// Added to the y component of every point's force (y grows downward)
    pub gravity: f64,
    /// Wind amplitude
    pub wind_force_factor: f64,
    /// Wind angular frequency
    pub wind_cycle_factor: f64,
    /// Scales both simulation time and the per-frame displacement
    pub time_scale: f64,
    /// Magnitude cap applied to the summed spring force of a point
    pub max_spring_force: f64,
}

impl Default for ClothParams {
    fn default() -> Self {
        Self {
            stiffness: defaults::STIFFNESS,
            gravity: defaults::GRAVITY,
            wind_force_factor: defaults::WIND_FORCE_FACTOR,
            wind_cycle_factor: defaults::WIND_CYCLE_FACTOR,
            time_scale: defaults::TIME_SCALE,
            max_spring_force: defaults::MAX_SPRING_FORCE,
        }
    }
}

impl ClothParams {
    /// Read one coefficient.
    pub fn get(&self, tunable: Tunable) -> f64 {
        match tunable {
            Tunable::Stiffness => self.stiffness,
            Tunable::Gravity => self.gravity,
            Tunable::WindForce => self.wind_force_factor,
            Tunable::WindCycle => self.wind_cycle_factor,
            Tunable::TimeScale => self.time_scale,
            Tunable::MaxSpringForce => self.max_spring_force,
        }
    }

    /// Set one coefficient, clamped into its allowed range. Returns the stored value.
    pub fn set(&mut self, tunable: Tunable, value: f64) -> f64 {
        let value = tunable.range().clamp(value);
        let slot = match tunable {
            Tunable::Stiffness => &mut self.stiffness,
            Tunable::Gravity => &mut self.gravity,
            Tunable::WindForce => &mut self.wind_force_factor,
            Tunable::WindCycle => &mut self.wind_cycle_factor,
            Tunable::TimeScale => &mut self.time_scale,
            Tunable::MaxSpringForce => &mut self.max_spring_force,
        };
        *slot = value;
        value
    }

    /// Multiply one coefficient by `factor` (clamped). Returns the stored value.
    pub fn scale(&mut self, tunable: Tunable, factor: f64) -> f64 {
        self.set(tunable, self.get(tunable) * factor)
    }
}

/// Destination for updated point positions.
///
/// `index` is the point's fixed buffer index; implementors store x, y, z as
/// three consecutive scalars starting at `3 * index`.
pub trait PositionSink {
    fn write(&mut self, index: usize, position: DVec3);
}

impl PositionSink for [[f32; 3]] {
    fn write(&mut self, index: usize, position: DVec3) {
        let flat: &mut [f32] = bytemuck::cast_slice_mut(self);
        let base = 3 * index;
        flat[base] = position.x as f32;
        flat[base + 1] = position.y as f32;
        flat[base + 2] = position.z as f32;
    }
}

impl PositionSink for Vec<[f32; 3]> {
    fn write(&mut self, index: usize, position: DVec3) {
        self.as_mut_slice().write(index, position);
    }
}

/// Owned position buffer, one `[f32; 3]` per point.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PositionBuffer {
    positions: Vec<[f32; 3]>,
}

impl PositionBuffer {
    /// A zeroed buffer large enough for `count` points.
    pub fn with_points(count: usize) -> Self {
        Self {
            positions: vec![[0.0; 3]; count],
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position stored at `index`.
    pub fn get(&self, index: usize) -> [f32; 3] {
        self.positions[index]
    }

    /// The buffer as `3 * len` consecutive scalars.
    pub fn as_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }
}

impl PositionSink for PositionBuffer {
    fn write(&mut self, index: usize, position: DVec3) {
        self.positions.write(index, position);
    }
}
