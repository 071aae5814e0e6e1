use waygrid_core::{Direction, Point, Range};

use crate::error::GridError;
use crate::grid::Grid;
use crate::path::trace_parents;

/// Search metadata for one node during one run.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RunMeta {
    pub g: f64,
    pub h: f64,
    pub cost: f64,
    pub parent: Option<Point>,
    pub tested: bool,
    pub collision: bool,
    pub retain_count: u32,
    pub direction: Option<Direction>,
}

impl RunMeta {
    #[inline]
    pub fn f(&self) -> f64 {
        self.g + self.h
    }
}

#[derive(Copy, Clone, Default)]
struct Slot {
    meta: RunMeta,
    generation: u32,
}

/// Per-run search metadata kept outside the grid.
///
/// A search that writes its scores and parent links here can share one
/// [`Grid`] with other searches without touching its nodes. Entries are
/// invalidated lazily: [`begin_run`](Self::begin_run) bumps a generation
/// counter and every slot written in an older generation reads as default.
pub struct RunBuffer {
    bounds: Range,
    slots: Vec<Slot>,
    generation: u32,
}

impl RunBuffer {
    /// A buffer sized for `grid`.
    pub fn for_grid(grid: &Grid) -> Self {
        Self::new(grid.bounds())
    }

    pub fn new(bounds: Range) -> Self {
        Self {
            bounds,
            slots: vec![Slot::default(); bounds.len()],
            generation: 1,
        }
    }

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        let x = (p.x - self.bounds.min.x) as usize;
        let y = (p.y - self.bounds.min.y) as usize;
        Some(y * self.bounds.width() as usize + x)
    }

    /// Start a new run, forgetting all metadata of the previous one.
    pub fn begin_run(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: stale slots could now look current.
            self.slots.fill(Slot::default());
            self.generation = 1;
        }
    }

    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Metadata of `p` in the current run, or `None` outside the bounds.
    pub fn meta(&self, p: Point) -> Option<RunMeta> {
        let slot = self.slots[self.idx(p)?];
        Some(if slot.generation == self.generation {
            slot.meta
        } else {
            RunMeta::default()
        })
    }

    /// Mutable metadata of `p` in the current run, or `None` outside the
    /// bounds.
    pub fn meta_mut(&mut self, p: Point) -> Option<&mut RunMeta> {
        let generation = self.generation;
        let i = self.idx(p)?;
        let slot = &mut self.slots[i];
        if slot.generation != generation {
            *slot = Slot {
                meta: RunMeta::default(),
                generation,
            };
        }
        Some(&mut slot.meta)
    }

    /// Whether `p` has been written during the current run.
    pub fn touched(&self, p: Point) -> bool {
        self.idx(p)
            .is_some_and(|i| self.slots[i].generation == self.generation)
    }

    /// Path from `end` back to `start` through the parent links of the
    /// current run. Same contract as [`Grid::path`].
    pub fn path(&self, start: Point, end: Point) -> Result<Vec<Point>, GridError> {
        trace_parents(start, end, self.slots.len(), |p| {
            self.meta(p).and_then(|m| m.parent)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DiagonalPolicy;

    #[test]
    fn fresh_buffer_reads_defaults() {
        let buf = RunBuffer::new(Range::new(0, 0, 4, 4));
        assert_eq!(buf.meta(Point::new(3, 3)), Some(RunMeta::default()));
        assert_eq!(buf.meta(Point::new(4, 0)), None);
        assert!(!buf.touched(Point::new(0, 0)));
    }

    #[test]
    fn begin_run_invalidates_lazily() {
        let mut buf = RunBuffer::new(Range::new(0, 0, 3, 3));
        let p = Point::new(1, 2);
        {
            let m = buf.meta_mut(p).unwrap();
            m.g = 3.0;
            m.h = 1.5;
            m.direction = Some(Direction::Down);
        }
        assert_eq!(buf.meta(p).unwrap().f(), 4.5);
        assert!(buf.touched(p));

        buf.begin_run();
        assert!(!buf.touched(p));
        assert_eq!(buf.meta(p), Some(RunMeta::default()));
        assert_eq!(buf.meta_mut(p).unwrap().g, 0.0);
    }

    #[test]
    fn offset_bounds_are_honored() {
        let mut buf = RunBuffer::new(Range::new(5, 5, 8, 7));
        assert!(buf.meta_mut(Point::new(0, 0)).is_none());
        buf.meta_mut(Point::new(7, 6)).unwrap().tested = true;
        assert!(buf.meta(Point::new(7, 6)).unwrap().tested);
        assert!(!buf.meta(Point::new(5, 5)).unwrap().tested);
    }

    #[test]
    fn generation_wrap_resets_slots() {
        let mut buf = RunBuffer::new(Range::new(0, 0, 2, 2));
        buf.generation = u32::MAX;
        buf.meta_mut(Point::ZERO).unwrap().cost = 2.0;
        buf.begin_run();
        assert_eq!(buf.generation(), 1);
        assert_eq!(buf.meta(Point::ZERO).unwrap().cost, 0.0);
    }

    #[test]
    fn path_leaves_grid_untouched() {
        let g = Grid::new(DiagonalPolicy::Always, 3, 3).unwrap();
        let mut buf = RunBuffer::for_grid(&g);
        buf.meta_mut(Point::new(2, 2)).unwrap().parent = Some(Point::new(1, 1));
        buf.meta_mut(Point::new(1, 1)).unwrap().parent = Some(Point::new(0, 0));
        assert_eq!(
            buf.path(g.start(), g.end()).unwrap(),
            vec![Point::new(2, 2), Point::new(1, 1), Point::new(0, 0)]
        );
        assert!(g.iter().all(|n| n.parent.is_none()));

        buf.begin_run();
        assert!(matches!(
            buf.path(g.start(), g.end()),
            Err(GridError::Unreachable { .. })
        ));
    }
}
