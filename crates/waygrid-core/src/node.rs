//! The [`Node`] type: one map cell plus the scratch data a search writes
//! into it.

use crate::direction::Direction;
use crate::geom::Point;

/// A single map cell.
///
/// `pos` and `walkable` describe topology. Everything else is search
/// metadata that [`reset_search`](Node::reset_search) restores to defaults
/// between runs. `parent` is stored as a position so that nodes never own
/// each other.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub pos: Point,
    pub walkable: bool,
    /// Cost from the start.
    pub g: f64,
    /// Heuristic estimate to the goal.
    pub h: f64,
    pub cost: f64,
    pub parent: Option<Point>,
    pub tested: bool,
    pub collision: bool,
    pub retain_count: u32,
    /// Direction of the move that reached this node, if any.
    pub direction: Option<Direction>,
}

impl Node {
    /// A walkable node at `pos` with empty search metadata.
    pub fn new(pos: Point) -> Self {
        Self {
            pos,
            walkable: true,
            g: 0.0,
            h: 0.0,
            cost: 0.0,
            parent: None,
            tested: false,
            collision: false,
            retain_count: 0,
            direction: None,
        }
    }

    /// A private record of `target`, reached from `parent` by `direction`.
    ///
    /// Only topology is copied; scores and flags start from defaults.
    pub fn detached(target: &Node, parent: Point, direction: Direction) -> Self {
        Self {
            walkable: target.walkable,
            parent: Some(parent),
            direction: Some(direction),
            ..Self::new(target.pos)
        }
    }

    /// Builder: set walkability.
    #[inline]
    pub fn with_walkable(mut self, walkable: bool) -> Self {
        self.walkable = walkable;
        self
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.pos.y
    }

    /// `g + h`, the usual best-first ranking score.
    #[inline]
    pub fn f(&self) -> f64 {
        self.g + self.h
    }

    /// Restore all search metadata, keeping position and walkability.
    pub fn reset_search(&mut self) {
        *self = Self::new(self.pos).with_walkable(self.walkable);
    }
}
