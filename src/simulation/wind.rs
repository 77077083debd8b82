//! Time-varying wind.

use bevy::math::DVec3;

use super::physics_config::wind::{COLUMN_PHASE, DEPTH_AMPLITUDE_RATIO, HORIZONTAL_CYCLE_RATIO};

/// Wind as a pure function of simulation time and column.
///
/// Sideways gusts are uniform across the sheet; the depth component carries a
/// per-column phase so a ripple travels across the cloth's width. There is no
/// vertical component.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindModel {
    pub force_factor: f64,
    pub cycle_factor: f64,
}

impl WindModel {
    pub fn new(force_factor: f64, cycle_factor: f64) -> Self {
        Self {
            force_factor,
            cycle_factor,
        }
    }

    pub fn calm() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Wind force at simulation time `t` on column `col`.
    pub fn force(&self, t: f64, col: usize) -> DVec3 {
        let x = self.force_factor * (HORIZONTAL_CYCLE_RATIO * self.cycle_factor * t).sin();
        let z = DEPTH_AMPLITUDE_RATIO
            * self.force_factor
            * (self.cycle_factor * t + COLUMN_PHASE * col as f64).sin();
        DVec3::new(x, 0.0, z)
    }
}
