//! [`GridConfig`]: everything needed to build a [`Grid`](crate::Grid).

use waygrid_core::Point;

use crate::policy::DiagonalPolicy;

/// Grid construction parameters.
///
/// `start`/`end` default to the top-left and bottom-right corners when left
/// unset.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    pub width: i32,
    pub height: i32,
    pub diagonal: DiagonalPolicy,
    pub start: Option<Point>,
    pub end: Option<Point>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            diagonal: DiagonalPolicy::Never,
            start: None,
            end: None,
        }
    }
}

impl GridConfig {
    /// Config for a `width`×`height` grid with default endpoints.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_diagonal(mut self, diagonal: DiagonalPolicy) -> Self {
        self.diagonal = diagonal;
        self
    }

    pub fn with_start(mut self, start: Point) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_end(mut self, end: Point) -> Self {
        self.end = Some(end);
        self
    }

    /// The start position, falling back to `(0, 0)`.
    pub fn start_or_default(&self) -> Point {
        self.start.unwrap_or(Point::ZERO)
    }

    /// The end position, falling back to `(width - 1, height - 1)`.
    pub fn end_or_default(&self) -> Point {
        self.end
            .unwrap_or(Point::new(self.width - 1, self.height - 1))
    }
}
