//! Tile definitions
//!
//! Tile kinds and the movement/sight properties they imply.

use serde::{Deserialize, Serialize};

/// A single tile in the level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub kind: TileKind,
    /// Blocks movement
    pub blocked: bool,
    /// Blocks line of sight
    pub opaque: bool,
    /// Has ever been in view. Never reset once set.
    pub seen: bool,
}

impl Tile {
    pub fn new(kind: TileKind) -> Self {
        Self {
            kind,
            blocked: kind.is_blocking(),
            opaque: kind.is_opaque(),
            seen: false,
        }
    }

    pub fn floor() -> Self {
        Self::new(TileKind::Floor)
    }

    pub fn wall() -> Self {
        Self::new(TileKind::Wall)
    }

    /// Change the kind, keeping the `seen` memory
    pub fn set_kind(&mut self, kind: TileKind) {
        self.kind = kind;
        self.blocked = kind.is_blocking();
        self.opaque = kind.is_opaque();
    }

    pub fn is_walkable(&self) -> bool {
        !self.blocked
    }

    pub fn glyph(&self) -> char {
        self.kind.glyph()
    }

    pub fn fg_color(&self, lit: bool) -> (u8, u8, u8) {
        if lit {
            self.kind.fg_color()
        } else {
            // Dimmed color for remembered tiles
            let (r, g, b) = self.kind.fg_color();
            (r / 3, g / 3, b / 3)
        }
    }

    pub fn bg_color(&self, lit: bool) -> (u8, u8, u8) {
        if lit {
            self.kind.bg_color()
        } else {
            let (r, g, b) = self.kind.bg_color();
            (r / 3, g / 3, b / 3)
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::wall()
    }
}

/// Types of tiles in the level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Floor,
    Wall,
}

impl TileKind {
    pub fn is_blocking(&self) -> bool {
        matches!(self, TileKind::Wall)
    }

    pub fn is_opaque(&self) -> bool {
        matches!(self, TileKind::Wall)
    }

    pub fn glyph(&self) -> char {
        match self {
            TileKind::Floor => '.',
            TileKind::Wall => '#',
        }
    }

    pub fn fg_color(&self) -> (u8, u8, u8) {
        match self {
            TileKind::Floor => (80, 80, 80),
            TileKind::Wall => (130, 110, 90),
        }
    }

    pub fn bg_color(&self) -> (u8, u8, u8) {
        match self {
            TileKind::Floor => (20, 18, 15),
            TileKind::Wall => (40, 35, 30),
        }
    }
}
