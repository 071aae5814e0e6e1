//! Neighbor resolution and the diagonal corner-cutting rules.
//!
//! [`Grid::steps`] is the read-only core: it lists the admissible moves out
//! of a cell. [`Grid::resolve`] and [`Grid::neighbors`] build on it, tag the
//! direction on the grid node they reach, and hand back either the shared
//! node or a detached copy.

use rand::Rng;
use waygrid_core::{Direction, Node, Point};

use crate::grid::Grid;
use crate::policy::DiagonalPolicy;

/// Options for [`Grid::resolve`] and [`Grid::neighbors`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Resolve {
    /// Return the grid's own node instead of a detached copy.
    pub by_reference: bool,
    /// Only admit walkable targets. When false any in-bounds cell counts.
    pub require_walkable: bool,
}

impl Default for Resolve {
    /// Detached records, walkable targets only.
    fn default() -> Self {
        Self {
            by_reference: false,
            require_walkable: true,
        }
    }
}

impl Resolve {
    /// Shared grid nodes, walkable targets only.
    pub const SHARED: Resolve = Resolve {
        by_reference: true,
        require_walkable: true,
    };

    /// Builder: admit blocked cells too.
    pub fn any_cell(mut self) -> Self {
        self.require_walkable = false;
        self
    }
}

/// A resolved neighbor.
#[derive(Clone, Debug, PartialEq)]
pub enum Neighbor {
    /// Handle to the grid-owned node at this position.
    Shared(Point),
    /// A private record carrying its own parent and direction.
    Detached(Node),
}

impl Neighbor {
    #[inline]
    pub fn pos(&self) -> Point {
        match self {
            Neighbor::Shared(p) => *p,
            Neighbor::Detached(n) => n.pos,
        }
    }

    #[inline]
    pub fn is_shared(&self) -> bool {
        matches!(self, Neighbor::Shared(_))
    }

    /// The node this neighbor stands for: the grid's own for shared ones.
    pub fn node<'a>(&'a self, grid: &'a Grid) -> &'a Node {
        match self {
            Neighbor::Shared(p) => &grid[*p],
            Neighbor::Detached(n) => n,
        }
    }
}

impl Grid {
    /// Whether `p` can be entered under the walkability requirement.
    #[inline]
    fn admits(&self, p: Point, require_walkable: bool) -> bool {
        if require_walkable {
            self.is_walkable(p)
        } else {
            self.contains(p)
        }
    }

    /// Target of a single move from `from`, if admissible. Never touches
    /// node data.
    #[inline]
    pub fn step(&self, from: Point, dir: Direction, require_walkable: bool) -> Option<Point> {
        dir.step(from)
            .filter(|&to| self.admits(to, require_walkable))
    }

    /// Call `f` for every admissible move out of `from`, in resolution
    /// order: up, down, left, right, then up-right, up-left, down-left,
    /// down-right.
    pub fn for_each_step(
        &self,
        from: Point,
        policy: DiagonalPolicy,
        require_walkable: bool,
        mut f: impl FnMut(Direction, Point),
    ) {
        // Openness of Up, Down, Left, Right, in ORTHOGONAL order.
        let mut open = [false; 4];
        for (i, dir) in Direction::ORTHOGONAL.into_iter().enumerate() {
            if let Some(to) = self.step(from, dir, require_walkable) {
                open[i] = true;
                f(dir, to);
            }
        }
        if policy == DiagonalPolicy::Never {
            return;
        }

        let is_open = |d: Direction| {
            Direction::ORTHOGONAL
                .iter()
                .position(|&o| o == d)
                .is_some_and(|i| open[i])
        };
        for dir in Direction::DIAGONAL {
            let Some((vertical, horizontal)) = dir.flanks() else {
                continue;
            };
            if !policy.admits(is_open(vertical), is_open(horizontal)) {
                continue;
            }
            if let Some(to) = self.step(from, dir, require_walkable) {
                f(dir, to);
            }
        }
    }

    /// All admissible moves out of `from` as `(direction, target)` pairs.
    pub fn steps(
        &self,
        from: Point,
        policy: DiagonalPolicy,
        require_walkable: bool,
    ) -> Vec<(Direction, Point)> {
        let mut out = Vec::with_capacity(8);
        self.for_each_step(from, policy, require_walkable, |d, p| out.push((d, p)));
        out
    }

    /// Tag the node at `to` and wrap it according to `opts`.
    fn claim(&mut self, from: Point, dir: Direction, to: Point, opts: Resolve) -> Neighbor {
        let target = &mut self[to];
        target.direction = Some(dir);
        if opts.by_reference {
            Neighbor::Shared(to)
        } else {
            Neighbor::Detached(Node::detached(target, from, dir))
        }
    }

    /// Resolve the single move `dir` from `from`.
    ///
    /// On success the grid node reached is tagged with `dir`, whichever form
    /// is returned.
    pub fn resolve(&mut self, from: Point, dir: Direction, opts: Resolve) -> Option<Neighbor> {
        let to = self.step(from, dir, opts.require_walkable)?;
        Some(self.claim(from, dir, to, opts))
    }

    /// Resolve a move in a direction drawn uniformly from all eight.
    pub fn resolve_random(
        &mut self,
        from: Point,
        rng: &mut impl Rng,
        opts: Resolve,
    ) -> Option<Neighbor> {
        self.resolve(from, Direction::random(rng), opts)
    }

    /// Resolve every admissible neighbor of `from` under `policy`, in the
    /// order given by [`for_each_step`](Self::for_each_step).
    pub fn neighbors(&mut self, from: Point, policy: DiagonalPolicy, opts: Resolve) -> Vec<Neighbor> {
        self.steps(from, policy, opts.require_walkable)
            .into_iter()
            .map(|(dir, to)| self.claim(from, dir, to, opts))
            .collect()
    }

    /// [`neighbors`](Self::neighbors) under the grid's own policy.
    pub fn neighbors_default(&mut self, from: Point, opts: Resolve) -> Vec<Neighbor> {
        self.neighbors(from, self.diagonal(), opts)
    }
}
