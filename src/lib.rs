//! Mass-spring cloth simulation library
//!
//! Exposes the cloth core and its Bevy plugins for testing and reuse.

pub mod error;
pub mod render;
pub mod resources;
pub mod simulation;

pub use error::ClothError;
