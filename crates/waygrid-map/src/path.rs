//! Path reconstruction from parent links.

use waygrid_core::Point;

use crate::error::GridError;
use crate::grid::Grid;

/// Follow `parent_of` from `end` back to `start`.
///
/// Returns the chain in end-to-start order, both endpoints included. A chain
/// that stops early yields [`GridError::Unreachable`]; one that grows past
/// `limit` nodes must repeat a position and yields
/// [`GridError::ParentCycle`].
pub(crate) fn trace_parents(
    start: Point,
    end: Point,
    limit: usize,
    parent_of: impl Fn(Point) -> Option<Point>,
) -> Result<Vec<Point>, GridError> {
    let mut path = vec![end];
    let mut cur = end;
    while cur != start {
        let Some(parent) = parent_of(cur) else {
            return Err(GridError::Unreachable { partial: path });
        };
        if path.len() >= limit {
            return Err(GridError::ParentCycle);
        }
        path.push(parent);
        cur = parent;
    }
    Ok(path)
}

impl Grid {
    /// The path found by the last search, read from the `parent` links of
    /// the grid nodes, in end-to-start order.
    ///
    /// When `end == start` the path is just the start. Parents pointing
    /// outside the grid end the chain.
    pub fn path(&self) -> Result<Vec<Point>, GridError> {
        let result = trace_parents(self.start(), self.end(), self.len(), |p| {
            self.node(p).and_then(|n| n.parent)
        });
        if let Err(err) = &result {
            log::warn!("path reconstruction {} -> {} failed: {err}", self.end(), self.start());
        }
        result
    }
}
