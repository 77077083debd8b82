//! Point masses and the fixed n×n grid that owns them.

use bevy::math::DVec3;

use crate::error::ClothError;

/// Which end of a spring a point sits on. The spring's force vector is added
/// as-is at `A` and negated at `B`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndpointRole {
    A,
    B,
}

impl EndpointRole {
    /// +1 for `A`, -1 for `B`.
    pub fn sign(self) -> f64 {
        match self {
            EndpointRole::A => 1.0,
            EndpointRole::B => -1.0,
        }
    }
}

/// A spring handle stored on a point, tagged with the point's role in it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IncidentSpring {
    /// Index into the spring network
    pub spring: usize,
    pub role: EndpointRole,
}

/// A simulated point mass.
#[derive(Clone, Debug)]
pub struct Point {
    row: usize,
    col: usize,
    /// Current position
    pub position: DVec3,
    incident: Vec<IncidentSpring>,
    buffer_index: Option<usize>,
}

impl Point {
    fn new(row: usize, col: usize, position: DVec3) -> Self {
        Self {
            row,
            col,
            position,
            incident: Vec::new(),
            buffer_index: None,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    /// Springs this point takes part in, with its role in each.
    pub fn incident(&self) -> &[IncidentSpring] {
        &self.incident
    }

    /// Incident springs where this point is endpoint `role`.
    pub fn incident_as(&self, role: EndpointRole) -> impl Iterator<Item = usize> + '_ {
        self.incident
            .iter()
            .filter(move |s| s.role == role)
            .map(|s| s.spring)
    }

    /// Index in the render buffer, once assigned.
    pub fn buffer_index(&self) -> Option<usize> {
        self.buffer_index
    }

    pub(crate) fn attach_spring(&mut self, spring: usize, role: EndpointRole) {
        self.incident.push(IncidentSpring { spring, role });
    }

    pub fn distance(&self, other: &Point) -> f64 {
        self.position.distance(other.position)
    }
}

/// The fixed square grid of points, stored row-major.
#[derive(Clone, Debug)]
pub struct PointGrid {
    n: usize,
    edge_length: f64,
    points: Vec<Point>,
    next_buffer_index: usize,
}

impl PointGrid {
    /// Lay out an n×n sheet: point (row, col) starts at `(edge * col, edge * row, 0)`.
    pub fn new(n: usize, edge_length: f64) -> Result<Self, ClothError> {
        if n < 2 {
            return Err(ClothError::InvalidGridSize { n });
        }
        if !edge_length.is_finite() || edge_length <= 0.0 {
            return Err(ClothError::InvalidEdgeLength(edge_length));
        }

        let mut points = Vec::with_capacity(n * n);
        for row in 0..n {
            for col in 0..n {
                let position = DVec3::new(edge_length * col as f64, edge_length * row as f64, 0.0);
                points.push(Point::new(row, col, position));
            }
        }

        Ok(Self {
            n,
            edge_length,
            points,
            next_buffer_index: 0,
        })
    }

    /// Points per side.
    pub fn size(&self) -> usize {
        self.n
    }

    pub fn edge_length(&self) -> f64 {
        self.edge_length
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Flat index of (row, col).
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.n + col
    }

    pub fn point(&self, row: usize, col: usize) -> &Point {
        &self.points[self.index(row, col)]
    }

    pub fn point_mut(&mut self, row: usize, col: usize) -> &mut Point {
        let idx = self.index(row, col);
        &mut self.points[idx]
    }

    pub fn position(&self, row: usize, col: usize) -> DVec3 {
        self.point(row, col).position
    }

    pub fn set_position(&mut self, row: usize, col: usize, position: DVec3) {
        self.point_mut(row, col).position = position;
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn points_mut(&mut self) -> &mut [Point] {
        &mut self.points
    }

    /// Current position of every point, row-major.
    pub fn positions(&self) -> Vec<DVec3> {
        self.points.iter().map(|p| p.position).collect()
    }

    /// The two ends of the suspension rod: (0, 0) and (0, n - 1).
    pub fn anchors(&self) -> [(usize, usize); 2] {
        [(0, 0), (0, self.n - 1)]
    }

    pub fn is_anchor(&self, row: usize, col: usize) -> bool {
        row == 0 && (col == 0 || col == self.n - 1)
    }

    /// Buffer index of (row, col), assigning the next free one on first reference.
    pub fn buffer_index_or_assign(&mut self, row: usize, col: usize) -> usize {
        let idx = self.index(row, col);
        if let Some(existing) = self.points[idx].buffer_index {
            return existing;
        }
        let assigned = self.next_buffer_index;
        self.points[idx].buffer_index = Some(assigned);
        self.next_buffer_index += 1;
        assigned
    }

    /// How many buffer indices have been handed out.
    pub fn assigned_buffer_indices(&self) -> usize {
        self.next_buffer_index
    }
}
