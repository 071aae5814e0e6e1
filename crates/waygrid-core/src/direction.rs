//! The eight compass [`Direction`]s a move on the map can take.

use std::fmt;

use rand::{Rng, RngExt};

use crate::geom::Point;

/// A single-cell move. Y grows downward, so `Up` is `(0, -1)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    /// Every direction, orthogonals first.
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];

    /// Orthogonal directions in neighbor-resolution order.
    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Diagonal directions in neighbor-resolution order.
    pub const DIAGONAL: [Direction; 4] = [
        Direction::UpRight,
        Direction::UpLeft,
        Direction::DownLeft,
        Direction::DownRight,
    ];

    /// Unit offset of this direction.
    #[inline]
    pub const fn delta(self) -> Point {
        match self {
            Direction::Up => Point::new(0, -1),
            Direction::Down => Point::new(0, 1),
            Direction::Left => Point::new(-1, 0),
            Direction::Right => Point::new(1, 0),
            Direction::UpLeft => Point::new(-1, -1),
            Direction::UpRight => Point::new(1, -1),
            Direction::DownLeft => Point::new(-1, 1),
            Direction::DownRight => Point::new(1, 1),
        }
    }

    /// The cell reached from `from` by moving one step this way, or `None`
    /// when that cell is not representable.
    #[inline]
    pub const fn step(self, from: Point) -> Option<Point> {
        let d = self.delta();
        from.checked_shift(d.x, d.y)
    }

    #[inline]
    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::UpLeft | Direction::UpRight | Direction::DownLeft | Direction::DownRight
        )
    }

    /// The two orthogonal moves flanking a diagonal, vertical one first.
    /// `None` for orthogonal directions.
    pub const fn flanks(self) -> Option<(Direction, Direction)> {
        match self {
            Direction::UpLeft => Some((Direction::Up, Direction::Left)),
            Direction::UpRight => Some((Direction::Up, Direction::Right)),
            Direction::DownLeft => Some((Direction::Down, Direction::Left)),
            Direction::DownRight => Some((Direction::Down, Direction::Right)),
            _ => None,
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::UpLeft => Direction::DownRight,
            Direction::UpRight => Direction::DownLeft,
            Direction::DownLeft => Direction::UpRight,
            Direction::DownRight => Direction::UpLeft,
        }
    }

    /// Pick one of the eight directions uniformly at random.
    pub fn random(rng: &mut impl Rng) -> Direction {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::UpLeft => "up-left",
            Direction::UpRight => "up-right",
            Direction::DownLeft => "down-left",
            Direction::DownRight => "down-right",
        };
        f.write_str(name)
    }
}
