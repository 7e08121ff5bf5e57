//! Grid coordinates
//!
//! Mapping between 2D tile coordinates and flat storage indices.

use serde::{Deserialize, Serialize};

/// Position on the tile grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance, the metric the FOV radius uses
    pub fn distance_squared(&self, other: &Position) -> i32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Offset this position by a delta
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Dimensions of a row-major tile grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: i32,
    pub height: i32,
}

impl GridSize {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Number of cells in the grid
    #[inline]
    pub fn len(&self) -> usize {
        (self.width.max(0) * self.height.max(0)) as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Strict validity test: 0 <= x < width and 0 <= y < height
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Convert 2D coordinates to a flat index.
    ///
    /// Coordinates must satisfy [`GridSize::contains`].
    #[inline]
    pub fn index(&self, x: i32, y: i32) -> usize {
        debug_assert!(self.contains(x, y), "({x}, {y}) outside {}x{} grid", self.width, self.height);
        (y * self.width + x) as usize
    }

    /// Convert a flat index back to 2D coordinates
    #[inline]
    pub fn coords(&self, idx: usize) -> (i32, i32) {
        let idx = idx as i32;
        (idx % self.width, idx / self.width)
    }

    /// Index for coordinates inside the grid, `None` otherwise
    pub fn checked_index(&self, x: i32, y: i32) -> Option<usize> {
        self.contains(x, y).then(|| self.index(x, y))
    }

    /// Raw row-major index `y * width + x`, kept only when it falls inside
    /// the storage range. Unlike [`GridSize::checked_index`] the axes are not
    /// checked individually, so an overhanging x wraps onto a neighbouring row.
    pub fn flat_index(&self, x: i32, y: i32) -> Option<usize> {
        let idx = i64::from(y) * i64::from(self.width) + i64::from(x);
        (idx >= 0 && (idx as u64) < self.len() as u64).then_some(idx as usize)
    }

    /// Iterate every coordinate in storage order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.len()).map(move |idx| {
            let (x, y) = self.coords(idx);
            Position::new(x, y)
        })
    }
}
