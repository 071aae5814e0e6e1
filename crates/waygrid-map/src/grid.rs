//! The [`Grid`] type: the node array a search runs over.
//!
//! A `Grid` owns one [`Node`] per cell, stored row-major. It also carries
//! the diagonal policy, the start/end positions and the frontier/visited
//! [`SearchLists`] of the current run.
//!
//! Node fields are changed through `&mut Grid`, so concurrent searches
//! sharing a grid must serialize node mutation themselves. The lists only
//! need `&Grid`.

use std::ops::{Index, IndexMut};

use waygrid_core::{Node, Point, Range};

use crate::config::GridConfig;
use crate::error::GridError;
use crate::lists::{ListRef, SearchLists};
use crate::policy::DiagonalPolicy;

#[derive(Debug)]
pub struct Grid {
    nodes: Vec<Node>,
    width: i32,
    height: i32,
    diagonal: DiagonalPolicy,
    start: Point,
    end: Point,
    lists: SearchLists,
}

impl Grid {
    /// Create a `width`×`height` grid of walkable nodes, with the start in
    /// the top-left corner and the end in the bottom-right one.
    pub fn new(diagonal: DiagonalPolicy, width: i32, height: i32) -> Result<Self, GridError> {
        Self::from_config(&GridConfig::new(width, height).with_diagonal(diagonal))
    }

    /// Like [`new`](Self::new) with explicit endpoints.
    pub fn with_endpoints(
        diagonal: DiagonalPolicy,
        width: i32,
        height: i32,
        start: Point,
        end: Point,
    ) -> Result<Self, GridError> {
        Self::from_config(
            &GridConfig::new(width, height)
                .with_diagonal(diagonal)
                .with_start(start)
                .with_end(end),
        )
    }

    pub fn from_config(cfg: &GridConfig) -> Result<Self, GridError> {
        if cfg.width <= 0 || cfg.height <= 0 {
            return Err(GridError::InvalidDimensions {
                width: cfg.width,
                height: cfg.height,
            });
        }
        let mut grid = Self {
            nodes: Vec::new(),
            width: cfg.width,
            height: cfg.height,
            diagonal: cfg.diagonal,
            start: Point::ZERO,
            end: Point::ZERO,
            lists: SearchLists::new(),
        };
        grid.define_all_nodes();
        grid.set_start_at(cfg.start_or_default())?;
        grid.set_end_at(cfg.end_or_default())?;
        log::debug!(
            "grid {}x{} created (diagonal: {}, start {}, end {})",
            grid.width,
            grid.height,
            grid.diagonal,
            grid.start,
            grid.end
        );
        Ok(grid)
    }

    // -----------------------------------------------------------------------
    // Dimensions and policy
    // -----------------------------------------------------------------------

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.bounds().len()
    }

    /// Always false: a grid has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The grid rectangle `(0,0)-(width,height)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    #[inline]
    pub fn diagonal(&self) -> DiagonalPolicy {
        self.diagonal
    }

    pub fn set_diagonal(&mut self, diagonal: DiagonalPolicy) {
        self.diagonal = diagonal;
    }

    // -----------------------------------------------------------------------
    // Bounds and walkability
    // -----------------------------------------------------------------------

    /// Row-major index of `p`, or `None` outside the grid.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(p.y as usize * self.width as usize + p.x as usize)
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// Bounds check with row/column arguments.
    #[inline]
    pub fn is_inside(&self, y: i32, x: i32) -> bool {
        self.contains(Point::new(x, y))
    }

    /// Whether `p` is inside the grid and walkable.
    #[inline]
    pub fn is_walkable(&self, p: Point) -> bool {
        self.node(p).is_some_and(|n| n.walkable)
    }

    #[inline]
    pub fn is_walkable_at(&self, y: i32, x: i32) -> bool {
        self.is_walkable(Point::new(x, y))
    }

    /// Checks the node's own position and flag rather than the grid slot.
    #[inline]
    pub fn is_walkable_node(&self, node: &Node) -> bool {
        self.contains(node.pos) && node.walkable
    }

    pub fn set_walkable(&mut self, p: Point, walkable: bool) -> Result<(), GridError> {
        let node = self.node_mut(p).ok_or(GridError::OutOfBounds(p))?;
        node.walkable = walkable;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Node access
    // -----------------------------------------------------------------------

    #[inline]
    pub fn node(&self, p: Point) -> Option<&Node> {
        self.idx(p).map(|i| &self.nodes[i])
    }

    #[inline]
    pub fn node_mut(&mut self, p: Point) -> Option<&mut Node> {
        self.idx(p).map(|i| &mut self.nodes[i])
    }

    /// Row-major iterator over all nodes.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Install `node` at its own position, replacing the node there.
    pub fn define_node(&mut self, node: Node) -> Result<(), GridError> {
        let i = self.idx(node.pos).ok_or(GridError::OutOfBounds(node.pos))?;
        self.nodes[i] = node;
        Ok(())
    }

    /// Install every node of `nodes` at its own position. Stops at the first
    /// out-of-bounds node; the ones before it stay installed.
    pub fn define_nodes(&mut self, nodes: impl IntoIterator<Item = Node>) -> Result<(), GridError> {
        nodes.into_iter().try_for_each(|n| self.define_node(n))
    }

    /// Replace every slot with a fresh walkable node.
    pub fn define_all_nodes(&mut self) {
        self.nodes = self.bounds().iter().map(Node::new).collect();
        log::debug!("defined {} nodes", self.nodes.len());
    }

    // -----------------------------------------------------------------------
    // Endpoints
    // -----------------------------------------------------------------------

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }

    pub fn start_node(&self) -> &Node {
        &self[self.start]
    }

    pub fn end_node(&self) -> &Node {
        &self[self.end]
    }

    /// Install `node` at its position and make it the start.
    pub fn set_start(&mut self, node: Node) -> Result<(), GridError> {
        let p = node.pos;
        self.define_node(node)?;
        self.start = p;
        Ok(())
    }

    /// Install `node` at its position and make it the end.
    pub fn set_end(&mut self, node: Node) -> Result<(), GridError> {
        let p = node.pos;
        self.define_node(node)?;
        self.end = p;
        Ok(())
    }

    /// Make the node already at `p` the start.
    pub fn set_start_at(&mut self, p: Point) -> Result<(), GridError> {
        if !self.contains(p) {
            return Err(GridError::OutOfBounds(p));
        }
        self.start = p;
        Ok(())
    }

    /// Make the node already at `p` the end.
    pub fn set_end_at(&mut self, p: Point) -> Result<(), GridError> {
        if !self.contains(p) {
            return Err(GridError::OutOfBounds(p));
        }
        self.end = p;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Search bookkeeping
    // -----------------------------------------------------------------------

    #[inline]
    pub fn lists(&self) -> &SearchLists {
        &self.lists
    }

    /// Shortcut for `self.lists().frontier()`.
    #[inline]
    pub fn frontier(&self) -> ListRef<'_> {
        self.lists.frontier()
    }

    /// Shortcut for `self.lists().visited()`.
    #[inline]
    pub fn visited(&self) -> ListRef<'_> {
        self.lists.visited()
    }

    pub fn max_expanded_nodes(&self) -> usize {
        self.lists.max_expanded()
    }

    pub fn set_max_expanded_nodes(&self, n: usize) {
        self.lists.set_max_expanded(n);
    }

    /// Reset the search metadata of every node, empty both lists and reset
    /// the high-water mark. Topology is kept.
    pub fn clear(&mut self) {
        self.lists.clear();
        for node in &mut self.nodes {
            node.reset_search();
        }
        log::debug!("grid {}x{} cleared", self.width, self.height);
    }

    /// Structural self-check: every slot exists and sits at its own
    /// position, and both endpoints are inside the grid.
    pub fn is_valid(&self) -> bool {
        if self.nodes.len() != self.len() {
            log::warn!(
                "grid holds {} nodes, expected {}",
                self.nodes.len(),
                self.len()
            );
            return false;
        }
        if let Some((expected, node)) = self
            .bounds()
            .iter()
            .zip(&self.nodes)
            .find(|(p, n)| n.pos != *p)
        {
            log::warn!("slot {expected} holds a node positioned at {}", node.pos);
            return false;
        }
        if !self.contains(self.start) || !self.contains(self.end) {
            log::warn!("endpoints {} / {} outside the grid", self.start, self.end);
            return false;
        }
        true
    }
}

/// Unchecked access: panics when `p` is outside the grid. Check with
/// [`Grid::contains`] first.
impl Index<Point> for Grid {
    type Output = Node;

    #[inline]
    fn index(&self, p: Point) -> &Node {
        match self.idx(p) {
            Some(i) => &self.nodes[i],
            None => panic!("{p} is outside the {}x{} grid", self.width, self.height),
        }
    }
}

impl IndexMut<Point> for Grid {
    #[inline]
    fn index_mut(&mut self, p: Point) -> &mut Node {
        match self.idx(p) {
            Some(i) => &mut self.nodes[i],
            None => panic!("{p} is outside the {}x{} grid", self.width, self.height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waygrid_core::Direction;

    #[test]
    fn construction_places_every_node() {
        let g = Grid::new(DiagonalPolicy::Never, 6, 4).unwrap();
        assert_eq!(g.len(), 24);
        for p in g.bounds() {
            let n = &g[p];
            assert_eq!(n.pos, p);
            assert!(n.walkable);
        }
        assert!(g.is_valid());
        assert_eq!(g.start(), Point::new(0, 0));
        assert_eq!(g.end(), Point::new(5, 3));
    }

    #[test]
    fn explicit_endpoints_are_validated() {
        let g = Grid::with_endpoints(
            DiagonalPolicy::Always,
            3,
            3,
            Point::new(1, 0),
            Point::new(2, 1),
        )
        .unwrap();
        assert_eq!(g.start_node().pos, Point::new(1, 0));
        assert_eq!(g.end_node().pos, Point::new(2, 1));

        let err = Grid::with_endpoints(
            DiagonalPolicy::Always,
            3,
            3,
            Point::ZERO,
            Point::new(3, 0),
        )
        .unwrap_err();
        assert_eq!(err, GridError::OutOfBounds(Point::new(3, 0)));
    }

    #[test]
    fn rejects_empty_dimensions() {
        assert_eq!(
            Grid::new(DiagonalPolicy::Never, 0, 5).unwrap_err(),
            GridError::InvalidDimensions {
                width: 0,
                height: 5
            }
        );
        assert!(Grid::new(DiagonalPolicy::Never, 4, -1).is_err());
    }

    #[test]
    fn bounds_and_walkability_predicates() {
        let mut g = Grid::new(DiagonalPolicy::Never, 4, 3).unwrap();
        assert!(g.is_inside(2, 3));
        assert!(!g.is_inside(3, 0));
        assert!(!g.is_inside(0, -1));

        g.set_walkable(Point::new(1, 2), false).unwrap();
        assert!(!g.is_walkable_at(2, 1));
        assert!(g.is_walkable_at(2, 0));
        // Out of bounds is simply not walkable.
        assert!(!g.is_walkable_at(-1, 0));
        assert!(!g.is_walkable(Point::new(4, 0)));
        assert_eq!(
            g.set_walkable(Point::new(9, 9), false),
            Err(GridError::OutOfBounds(Point::new(9, 9)))
        );

        let outside = Node::new(Point::new(10, 0));
        assert!(!g.is_walkable_node(&outside));
        assert!(g.is_walkable_node(&g[Point::new(0, 0)]));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn unchecked_index_panics_out_of_bounds() {
        let g = Grid::new(DiagonalPolicy::Never, 2, 2).unwrap();
        let _ = &g[Point::new(2, 0)];
    }

    #[test]
    fn checked_access_returns_none_outside() {
        let mut g = Grid::new(DiagonalPolicy::Never, 2, 2).unwrap();
        assert!(g.node(Point::new(-1, 0)).is_none());
        assert!(g.node_mut(Point::new(0, 2)).is_none());
        assert!(g.node(Point::new(1, 1)).is_some());
    }

    #[test]
    fn set_start_reinstalls_node() {
        let mut g = Grid::new(DiagonalPolicy::Never, 3, 3).unwrap();
        let mut n = Node::new(Point::new(2, 0));
        n.g = 7.0;
        g.set_start(n).unwrap();
        assert_eq!(g.start(), Point::new(2, 0));
        assert_eq!(g.start_node().g, 7.0);

        g.set_end(Node::new(Point::new(0, 2)).with_walkable(false))
            .unwrap();
        assert!(!g.end_node().walkable);
        assert!(g.set_end(Node::new(Point::new(0, 3))).is_err());
        assert_eq!(g.end(), Point::new(0, 2));
    }

    #[test]
    fn is_valid_detects_misplaced_nodes() {
        let mut g = Grid::new(DiagonalPolicy::Never, 3, 3).unwrap();
        g[Point::new(1, 1)] = Node::new(Point::new(2, 2));
        assert!(!g.is_valid());

        g.define_all_nodes();
        assert!(g.is_valid());
    }

    #[test]
    fn define_all_nodes_resets_topology() {
        let mut g = Grid::new(DiagonalPolicy::Never, 3, 2).unwrap();
        g.set_walkable(Point::new(0, 1), false).unwrap();
        g.define_all_nodes();
        assert!(g.iter().all(|n| n.walkable));
        assert!(g.is_valid());
    }

    #[test]
    fn define_nodes_installs_at_own_position() {
        let mut g = Grid::new(DiagonalPolicy::Never, 3, 3).unwrap();
        let walls = [Point::new(1, 0), Point::new(1, 1)]
            .map(|p| Node::new(p).with_walkable(false));
        g.define_nodes(walls).unwrap();
        assert!(!g.is_walkable(Point::new(1, 0)));
        assert!(!g.is_walkable(Point::new(1, 1)));
        assert!(g.is_valid());

        let err = g.define_nodes([Node::new(Point::new(5, 5))]).unwrap_err();
        assert_eq!(err, GridError::OutOfBounds(Point::new(5, 5)));
    }

    #[test]
    fn clear_resets_metadata_and_lists() {
        let mut g = Grid::new(DiagonalPolicy::Always, 4, 4).unwrap();
        g.set_walkable(Point::new(2, 2), false).unwrap();
        for p in g.bounds() {
            let n = &mut g[p];
            n.g = 1.0;
            n.h = 2.0;
            n.cost = 3.0;
            n.parent = Some(Point::ZERO);
            n.tested = true;
            n.collision = true;
            n.retain_count = 5;
            n.direction = Some(Direction::Left);
        }
        g.frontier().add(Point::new(1, 1));
        g.visited().add(Point::new(0, 0));
        assert_eq!(g.max_expanded_nodes(), 2);

        g.clear();
        for n in g.iter() {
            let expected = Node::new(n.pos).with_walkable(n.pos != Point::new(2, 2));
            assert_eq!(*n, expected);
        }
        assert!(g.frontier().is_empty());
        assert!(g.visited().is_empty());
        assert_eq!(g.max_expanded_nodes(), 0);
        assert!(g.is_valid());
    }

    #[test]
    fn max_expanded_override() {
        let g = Grid::new(DiagonalPolicy::Never, 2, 2).unwrap();
        g.set_max_expanded_nodes(10);
        assert_eq!(g.max_expanded_nodes(), 10);
    }

    #[test]
    fn lists_are_usable_across_threads() {
        let g = Grid::new(DiagonalPolicy::Never, 8, 8).unwrap();
        std::thread::scope(|s| {
            for row in 0..4 {
                let g = &g;
                s.spawn(move || {
                    for x in 0..8 {
                        g.frontier().add(Point::new(x, row));
                    }
                });
            }
        });
        assert_eq!(g.frontier().count(), 32);
        assert_eq!(g.max_expanded_nodes(), 32);
    }
}
