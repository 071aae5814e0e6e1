use std::fmt;

use waygrid_core::Point;

/// Errors surfaced by grid construction, authoring and path reconstruction.
///
/// Every error is reported to the direct caller; nothing in this crate
/// retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A diagonal policy name or code that is not one of the four policies.
    UnknownDiagonalPolicy(String),
    /// Width or height is not positive.
    InvalidDimensions { width: i32, height: i32 },
    /// A start/end or authored position lies outside the grid.
    OutOfBounds(Point),
    /// The parent chain ended before reaching the start node. `partial`
    /// holds the walked chain in end-to-start order.
    Unreachable { partial: Vec<Point> },
    /// The parent chain loops back on itself.
    ParentCycle,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownDiagonalPolicy(s) => write!(f, "unknown diagonal movement policy: {s}"),
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid grid dimensions {width}x{height}")
            }
            Self::OutOfBounds(p) => write!(f, "position {p} is outside the grid"),
            Self::Unreachable { partial } => write!(
                f,
                "parent chain stops after {} node(s) without reaching the start",
                partial.len()
            ),
            Self::ParentCycle => write!(f, "parent chain contains a cycle"),
        }
    }
}

impl std::error::Error for GridError {}
