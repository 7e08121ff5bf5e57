//! Rectangular rooms

use super::grid::Position;
use serde::{Deserialize, Serialize};

/// A rectangular room. The outer cells form its wall border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
}

impl Room {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    pub fn x1(&self) -> i32 {
        self.x1
    }

    pub fn y1(&self) -> i32 {
        self.y1
    }

    pub fn x2(&self) -> i32 {
        self.x2
    }

    pub fn y2(&self) -> i32 {
        self.y2
    }

    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    /// Integer midpoint, used as the tunnel anchor
    pub fn center(&self) -> Position {
        Position::new((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }

    /// Inclusive interior bounds as `(x1, x2, y1, y2)`
    pub fn interior(&self) -> (i32, i32, i32, i32) {
        (self.x1 + 1, self.x2 - 1, self.y1 + 1, self.y2 - 1)
    }

    /// Iterate every interior cell
    pub fn interior_positions(&self) -> impl Iterator<Item = Position> {
        let (x1, x2, y1, y2) = self.interior();
        (y1..=y2).flat_map(move |y| (x1..=x2).map(move |x| Position::new(x, y)))
    }

    /// Edge-inclusive overlap test, so rooms sharing a border intersect
    pub fn intersects(&self, other: &Room) -> bool {
        self.x1 <= other.x2 && self.x2 >= other.x1 && self.y1 <= other.y2 && self.y2 >= other.y1
    }
}
