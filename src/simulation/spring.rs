//! The static spring network and its signed-quadratic force law.
//!
//! Every point is joined to the point directly above it, and to the points
//! 1, 2, 3 and 5 columns to its left. The long horizontal springs stand in for
//! bending springs: they keep the sheet from folding without any angle math.
//!
//! The force on a spring is `f * (a - b)` where `f = -k * sign(d) * d^2` and
//! `d` is the stretch past rest length. Using the raw coordinate difference as
//! the direction means there is nothing to normalise, so coincident endpoints
//! just produce a zero force.

use bevy::log::debug;
use bevy::math::DVec3;

use super::point::{EndpointRole, PointGrid};
use crate::error::ClothError;

/// Which family a spring belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpringKind {
    /// Joins a point to the one directly above it
    Vertical,
    /// Joins a point to the one `offset` columns to its left
    Horizontal { offset: usize },
}

/// `sign(d) * d^2`
#[inline]
pub fn square_retain_sign(d: f64) -> f64 {
    d.abs() * d
}

/// An elastic link between two points.
#[derive(Clone, Debug)]
pub struct Spring {
    a: usize,
    b: usize,
    rest_length: f64,
    kind: SpringKind,
    force: DVec3,
}

impl Spring {
    pub fn new(a: usize, b: usize, rest_length: f64, kind: SpringKind) -> Self {
        Self {
            a,
            b,
            rest_length,
            kind,
            force: DVec3::ZERO,
        }
    }

    /// Flat index of endpoint A.
    pub fn a(&self) -> usize {
        self.a
    }

    /// Flat index of endpoint B.
    pub fn b(&self) -> usize {
        self.b
    }

    pub fn rest_length(&self) -> f64 {
        self.rest_length
    }

    pub fn kind(&self) -> SpringKind {
        self.kind
    }

    /// Force computed by the last `update_force`, as seen from endpoint A.
    pub fn force(&self) -> DVec3 {
        self.force
    }

    /// Contribution of this spring to the endpoint playing `role`.
    pub fn force_on(&self, role: EndpointRole) -> DVec3 {
        match role {
            EndpointRole::A => self.force,
            EndpointRole::B => -self.force,
        }
    }

    /// Spring force for endpoint positions `a` and `b`.
    pub fn force_between(a: DVec3, b: DVec3, rest_length: f64, stiffness: f64) -> DVec3 {
        let diff = a - b;
        let delta = diff.length() - rest_length;
        let f = -stiffness * square_retain_sign(delta);
        f * diff
    }

    /// Recompute the force from scratch for the given endpoint positions.
    pub fn update_force(&mut self, a: DVec3, b: DVec3, stiffness: f64) {
        self.force = Self::force_between(a, b, self.rest_length, stiffness);
    }
}

/// All springs of the cloth, built once over a `PointGrid`.
#[derive(Clone, Debug)]
pub struct SpringNetwork {
    springs: Vec<Spring>,
}

impl SpringNetwork {
    /// Build the topology and register every spring on both of its endpoints.
    ///
    /// Vertical springs come first in row-major order, then horizontal springs
    /// grouped by offset in the order given.
    pub fn build(grid: &mut PointGrid, offsets: &[usize]) -> Result<Self, ClothError> {
        if let Some(&offset) = offsets.iter().find(|&&d| d == 0) {
            return Err(ClothError::InvalidSpringOffset { offset });
        }
        for (i, &offset) in offsets.iter().enumerate() {
            if offsets[..i].contains(&offset) {
                return Err(ClothError::DuplicateSpringOffset { offset });
            }
        }

        let n = grid.size();
        let edge = grid.edge_length();
        let mut network = Self {
            springs: Vec::with_capacity(super::physics_config::expected_spring_count(n, offsets)),
        };

        for row in 1..n {
            for col in 0..n {
                let this = grid.index(row, col);
                let above = grid.index(row - 1, col);
                network.link(grid, this, above, edge, SpringKind::Vertical);
            }
        }

        for &offset in offsets {
            for row in 0..n {
                for col in offset..n {
                    let this = grid.index(row, col);
                    let left = grid.index(row, col - offset);
                    let rest = offset as f64 * edge;
                    network.link(grid, this, left, rest, SpringKind::Horizontal { offset });
                }
            }
        }

        debug!(
            "Built {} springs over a {}x{} grid (offsets {:?})",
            network.len(),
            n,
            n,
            offsets
        );
        Ok(network)
    }

    fn link(&mut self, grid: &mut PointGrid, a: usize, b: usize, rest: f64, kind: SpringKind) {
        let id = self.springs.len();
        self.springs.push(Spring::new(a, b, rest, kind));
        grid.points_mut()[a].attach_spring(id, EndpointRole::A);
        grid.points_mut()[b].attach_spring(id, EndpointRole::B);
    }

    /// Recompute every spring's force from the current positions.
    ///
    /// Reads positions only; nothing in the grid is mutated.
    pub fn update_forces(&mut self, grid: &PointGrid, stiffness: f64) {
        let points = grid.points();
        for spring in &mut self.springs {
            let a = points[spring.a].position;
            let b = points[spring.b].position;
            spring.update_force(a, b, stiffness);
        }
    }

    pub fn springs(&self) -> &[Spring] {
        &self.springs
    }

    pub fn spring(&self, id: usize) -> &Spring {
        &self.springs[id]
    }

    pub fn len(&self) -> usize {
        self.springs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.springs.is_empty()
    }

    pub fn count_of(&self, kind: SpringKind) -> usize {
        self.springs.iter().filter(|s| s.kind == kind).count()
    }

    /// Is there a spring joining flat indices `p` and `q`, in either direction?
    pub fn connects(&self, p: usize, q: usize) -> bool {
        self.springs
            .iter()
            .any(|s| (s.a == p && s.b == q) || (s.a == q && s.b == p))
    }
}
