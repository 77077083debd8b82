//! Error types for cloth construction.
//!
//! Ticking, toggling and resetting never fail; only building a cloth from
//! caller-supplied dimensions can.

use std::fmt;

/// Errors that can occur while building a cloth.
#[derive(Debug, Clone, PartialEq)]
pub enum ClothError {
    /// The grid needs at least two points per side so the two anchors differ.
    InvalidGridSize { n: usize },
    /// Edge length must be finite and positive.
    InvalidEdgeLength(f64),
    /// A horizontal spring offset of zero would join a point to itself.
    InvalidSpringOffset { offset: usize },
    /// Each horizontal offset may appear once; a repeat would double its springs.
    DuplicateSpringOffset { offset: usize },
}

impl fmt::Display for ClothError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClothError::InvalidGridSize { n } => {
                write!(f, "grid must be at least 2x2, got {}x{}", n, n)
            }
            ClothError::InvalidEdgeLength(edge) => {
                write!(f, "edge length must be finite and positive, got {}", edge)
            }
            ClothError::InvalidSpringOffset { offset } => {
                write!(f, "spring offset must be at least 1, got {}", offset)
            }
            ClothError::DuplicateSpringOffset { offset } => {
                write!(f, "spring offset {} listed more than once", offset)
            }
        }
    }
}

impl std::error::Error for ClothError {}
