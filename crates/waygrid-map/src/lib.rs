//! Grid topology and search bookkeeping for grid pathfinding.
//!
//! This crate does not search by itself. It provides what best-first
//! searches (A\*, Dijkstra, BFS) are built from:
//!
//! - a [`Grid`] of [`Node`](waygrid_core::Node)s with bounds and
//!   walkability checks,
//! - neighbor resolution under a [`DiagonalPolicy`]
//!   ([`Grid::neighbors`], [`Grid::steps`], [`Pather`]),
//! - frontier/visited bookkeeping with a high-water mark
//!   ([`SearchLists`]),
//! - per-run metadata kept off the grid ([`RunBuffer`]),
//! - path reconstruction from parent links ([`Grid::path`]).
//!
//! # Diagonal policies
//!
//! | Policy | Diagonal admitted when |
//! |---|---|
//! | [`Never`](DiagonalPolicy::Never) | never |
//! | [`OnlyWhenNoObstacles`](DiagonalPolicy::OnlyWhenNoObstacles) | both flanking cells are open |
//! | [`IfAtMostOneObstacle`](DiagonalPolicy::IfAtMostOneObstacle) | at least one flanking cell is open |
//! | [`Always`](DiagonalPolicy::Always) | always |
//!
//! In every case the diagonal target itself must be admissible.

mod config;
mod error;
mod grid;
mod lists;
mod neighbors;
mod path;
mod policy;
mod run;
mod traits;

pub use config::GridConfig;
pub use error::GridError;
pub use grid::Grid;
pub use lists::{ListRef, Membership, SearchLists};
pub use neighbors::{Neighbor, Resolve};
pub use policy::DiagonalPolicy;
pub use run::{RunBuffer, RunMeta};
pub use traits::Pather;
