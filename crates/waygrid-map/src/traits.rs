use waygrid_core::Point;

use crate::grid::Grid;

/// Neighbor enumeration for search algorithms.
pub trait Pather {
    /// Append the positions reachable in one move from `p` into `buf`. The
    /// caller clears `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// Walkable neighbors under the grid's own diagonal policy. Node data is
/// left untouched.
impl Pather for Grid {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        self.for_each_step(p, self.diagonal(), true, |_, to| buf.push(to));
    }
}
