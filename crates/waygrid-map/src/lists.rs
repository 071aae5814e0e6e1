//! Frontier (open list) and visited (closed list) bookkeeping.
//!
//! Both lists hold grid positions, never nodes: the [`Grid`](crate::Grid)
//! stays the only owner of node data. Each list sits behind its own lock.
//! Two separate queries (`frontier().contains(p)` then
//! `visited().contains(p)`) may observe a node moving between the lists;
//! use [`SearchLists::membership`] and [`SearchLists::promote`] when that
//! matters.

use std::cmp::Ordering;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

use parking_lot::Mutex;
use waygrid_core::Point;

// ---------------------------------------------------------------------------
// NodeList
// ---------------------------------------------------------------------------

/// An ordered, lock-guarded list of node positions. The end of the list is
/// the stack top.
///
/// `len` mirrors `items.len()` and is only written under the lock, so the
/// other list can read it without locking.
#[derive(Debug, Default)]
pub(crate) struct NodeList {
    items: Mutex<Vec<Point>>,
    len: AtomicUsize,
}

impl NodeList {
    /// Run `f` on the locked items, then call `observe` with the new length
    /// before the lock is released.
    fn mutate<R>(
        &self,
        f: impl FnOnce(&mut Vec<Point>) -> R,
        observe: impl FnOnce(usize),
    ) -> R {
        let mut items = self.items.lock();
        let r = f(&mut items);
        self.len.store(items.len(), AtomicOrdering::SeqCst);
        observe(items.len());
        r
    }

    fn len(&self) -> usize {
        self.len.load(AtomicOrdering::SeqCst)
    }

    fn contains(&self, p: Point) -> bool {
        self.items.lock().contains(&p)
    }

    fn count(&self) -> usize {
        self.items.lock().len()
    }

    fn snapshot(&self) -> Vec<Point> {
        self.items.lock().clone()
    }

    fn reorder_descending<K, F>(&self, mut rank: F)
    where
        K: PartialOrd,
        F: FnMut(Point) -> K,
    {
        loop {
            let seen = self.snapshot();
            // Ranked without the lock: `rank` is free to query any list.
            let mut keyed: Vec<(K, Point)> = seen.iter().map(|&p| (rank(p), p)).collect();
            // Stable: equal ranks keep insertion order. Incomparable keys
            // (NaN) count as equal.
            keyed.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

            let mut items = self.items.lock();
            if *items == seen {
                items.clear();
                items.extend(keyed.into_iter().map(|(_, p)| p));
                return;
            }
            log::trace!("list changed while ranking, ranking again");
        }
    }
}

// ---------------------------------------------------------------------------
// High-water mark
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct HighWater(AtomicUsize);

impl HighWater {
    fn observe(&self, total: usize) {
        let prev = self.0.fetch_max(total, AtomicOrdering::Relaxed);
        if total > prev {
            log::trace!("expanded-node high-water mark raised {prev} -> {total}");
        }
    }

    fn get(&self) -> usize {
        self.0.load(AtomicOrdering::Relaxed)
    }

    fn set(&self, n: usize) {
        self.0.store(n, AtomicOrdering::Relaxed);
    }
}

// ---------------------------------------------------------------------------
// SearchLists
// ---------------------------------------------------------------------------

/// Open/closed membership of one position, read atomically.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Membership {
    pub open: bool,
    pub closed: bool,
}

/// The frontier and visited lists of a search, plus the high-water mark of
/// their combined size.
///
/// Every mutation made through [`frontier`](Self::frontier) or
/// [`visited`](Self::visited) updates the mark. Whenever both locks are
/// needed they are taken frontier first.
#[derive(Debug, Default)]
pub struct SearchLists {
    frontier: NodeList,
    visited: NodeList,
    max_expanded: HighWater,
}

impl SearchLists {
    pub fn new() -> Self {
        Self::default()
    }

    /// The frontier (open list).
    #[inline]
    pub fn frontier(&self) -> ListRef<'_> {
        ListRef {
            list: &self.frontier,
            owner: self,
        }
    }

    /// The visited set (closed list).
    #[inline]
    pub fn visited(&self) -> ListRef<'_> {
        ListRef {
            list: &self.visited,
            owner: self,
        }
    }

    fn other(&self, list: &NodeList) -> &NodeList {
        if std::ptr::eq(list, &self.frontier) {
            &self.visited
        } else {
            &self.frontier
        }
    }

    /// Move `p` from the frontier to the visited list as one step.
    ///
    /// Returns whether `p` was on the frontier. `p` ends up on the visited
    /// list either way, at most once.
    pub fn promote(&self, p: Point) -> bool {
        let mut open = self.frontier.items.lock();
        let mut closed = self.visited.items.lock();
        let was_open = match open.iter().position(|&q| q == p) {
            Some(i) => {
                open.remove(i);
                true
            }
            None => false,
        };
        if !closed.contains(&p) {
            closed.push(p);
        }
        self.frontier.len.store(open.len(), AtomicOrdering::SeqCst);
        self.visited.len.store(closed.len(), AtomicOrdering::SeqCst);
        log::trace!("promoted {p} (was open: {was_open})");
        self.max_expanded.observe(open.len() + closed.len());
        was_open
    }

    /// Frontier and visited membership of `p`, read under both locks.
    pub fn membership(&self, p: Point) -> Membership {
        let open = self.frontier.items.lock();
        let closed = self.visited.items.lock();
        Membership {
            open: open.contains(&p),
            closed: closed.contains(&p),
        }
    }

    /// Combined size of both lists.
    pub fn total(&self) -> usize {
        let open = self.frontier.items.lock();
        let closed = self.visited.items.lock();
        open.len() + closed.len()
    }

    /// Raise the high-water mark to the current combined size if larger.
    pub fn update_max_expanded(&self) {
        self.max_expanded.observe(self.total());
    }

    /// Largest combined size seen since the last reset.
    pub fn max_expanded(&self) -> usize {
        self.max_expanded.get()
    }

    pub fn set_max_expanded(&self, n: usize) {
        self.max_expanded.set(n);
    }

    /// Empty both lists and reset the high-water mark to zero.
    pub fn clear(&self) {
        let mut open = self.frontier.items.lock();
        let mut closed = self.visited.items.lock();
        open.clear();
        closed.clear();
        self.frontier.len.store(0, AtomicOrdering::SeqCst);
        self.visited.len.store(0, AtomicOrdering::SeqCst);
        self.max_expanded.set(0);
    }
}

// ---------------------------------------------------------------------------
// ListRef
// ---------------------------------------------------------------------------

/// Handle to one of the two lists of a [`SearchLists`].
///
/// Every mutation raises the owner's high-water mark while the list lock is
/// still held, so no concurrent change to the same list can hide a peak.
/// The other list's size is read as of its last completed mutation.
#[derive(Clone, Copy)]
pub struct ListRef<'a> {
    list: &'a NodeList,
    owner: &'a SearchLists,
}

impl ListRef<'_> {
    fn mutate<R>(&self, f: impl FnOnce(&mut Vec<Point>) -> R) -> R {
        let other = self.owner.other(self.list);
        self.list
            .mutate(f, |len| self.owner.max_expanded.observe(len + other.len()))
    }

    /// Append `p`.
    pub fn add(&self, p: Point) {
        self.mutate(|items| items.push(p));
    }

    /// Push `p` on the stack top (the end of the list).
    pub fn push(&self, p: Point) {
        self.add(p);
    }

    /// Remove and return the last position.
    pub fn pop(&self) -> Option<Point> {
        self.mutate(|items| items.pop())
    }

    /// Remove the first occurrence of `p`. Returns whether it was present.
    pub fn remove(&self, p: Point) -> bool {
        self.mutate(|items| match items.iter().position(|&q| q == p) {
            Some(i) => {
                items.remove(i);
                true
            }
            None => false,
        })
    }

    pub fn contains(&self, p: Point) -> bool {
        self.list.contains(p)
    }

    pub fn count(&self) -> usize {
        self.list.count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Point-in-time copy of the list. Later mutations do not show up in it.
    pub fn snapshot(&self) -> Vec<Point> {
        self.list.snapshot()
    }

    /// Replace the whole list.
    pub fn replace_all(&self, items: Vec<Point>) {
        self.mutate(|cur| *cur = items);
    }

    /// Sort by `rank`, highest first, so that [`pop`](Self::pop) yields the
    /// lowest-ranked position next. Ties keep their insertion order.
    ///
    /// `rank` runs with no lock held and may query either list. If the list
    /// changes while it is being ranked, ranking starts over on the new
    /// contents, so `rank` must not itself add to or remove from this list.
    pub fn reorder_descending<K, F>(&self, rank: F)
    where
        K: PartialOrd,
        F: FnMut(Point) -> K,
    {
        self.list.reorder_descending(rank);
    }
}
