//! Physics configuration: grid constants, spring topology and coefficient ranges.
//!
//! Every number that shapes the cloth lives here instead of being scattered
//! across the integrator and the input handler. The defaults are empirically
//! tuned; to retune, change them here and run `cargo test` to verify the
//! regression suite still passes.

/// Grid and topology constants.
pub mod grid {
    /// Points per side of the square grid.
    pub const SIZE: usize = 20;
    /// Rest length of a structural spring, and the initial point spacing.
    pub const EDGE_LENGTH: f64 = 40.0;
    /// Column offsets of the horizontal springs. Offset 1 is the structural
    /// neighbour, the longer ones keep the cloth from folding.
    pub const SPRING_OFFSETS: [usize; 4] = [1, 2, 3, 5];
}

/// Tuned default values for the live coefficients.
pub mod defaults {
    /// If it's too high the simulation gets jumpy.
    pub const STIFFNESS: f64 = 2.6;
    pub const GRAVITY: f64 = 0.3048;
    pub const WIND_FORCE_FACTOR: f64 = 0.56;
    pub const WIND_CYCLE_FACTOR: f64 = 0.04;
    pub const TIME_SCALE: f64 = 57.2;
    pub const MAX_SPRING_FORCE: f64 = 1.0;
}

/// Wind shape constants.
pub mod wind {
    /// Horizontal gusts cycle this much slower than the depth ripple.
    pub const HORIZONTAL_CYCLE_RATIO: f64 = 0.3;
    /// Depth amplitude relative to the horizontal one.
    pub const DEPTH_AMPLITUDE_RATIO: f64 = 3.3;
    /// Phase advance per column; produces the travelling ripple.
    pub const COLUMN_PHASE: f64 = 0.1;
}

/// Inclusive range a coefficient may take.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
}

impl ParamRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp `value` into the range. NaN collapses to `min`.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// The externally adjustable coefficients.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tunable {
    Stiffness,
    Gravity,
    WindForce,
    WindCycle,
    TimeScale,
    MaxSpringForce,
}

impl Tunable {
    pub const ALL: [Tunable; 6] = [
        Tunable::Stiffness,
        Tunable::Gravity,
        Tunable::WindForce,
        Tunable::WindCycle,
        Tunable::TimeScale,
        Tunable::MaxSpringForce,
    ];

    /// Allowed range, matching the slider bounds of the control panel.
    pub fn range(self) -> ParamRange {
        match self {
            Tunable::Stiffness => ParamRange::new(0.0, 5.0),
            Tunable::Gravity => ParamRange::new(0.0, 1.0),
            Tunable::WindForce => ParamRange::new(0.0, 5.0),
            Tunable::WindCycle => ParamRange::new(0.0, 1.0),
            Tunable::TimeScale => ParamRange::new(0.0, 100.0),
            Tunable::MaxSpringForce => ParamRange::new(0.01, 10.0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Tunable::Stiffness => "stiffness",
            Tunable::Gravity => "gravity",
            Tunable::WindForce => "wind_force_factor",
            Tunable::WindCycle => "wind_cycle_factor",
            Tunable::TimeScale => "time_scale",
            Tunable::MaxSpringForce => "max_spring_force",
        }
    }
}

/// Number of springs a grid of side `n` gets with the given horizontal offsets.
pub fn expected_spring_count(n: usize, offsets: &[usize]) -> usize {
    let vertical = n.saturating_sub(1) * n;
    let horizontal: usize = offsets.iter().map(|&d| n.saturating_sub(d) * n).sum();
    vertical + horizontal
}
