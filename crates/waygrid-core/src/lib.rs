//! **waygrid-core**: building blocks for grid pathfinding.
//!
//! This crate provides the types shared across the *waygrid* workspace:
//! geometry primitives, the eight compass directions, and the map [`Node`]
//! that searches annotate.

pub mod direction;
pub mod geom;
pub mod node;

pub use direction::Direction;
pub use geom::{Point, Range};
pub use node::Node;
