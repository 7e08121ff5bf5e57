//! Level data structure
//!
//! The tile grid, its rooms, and the observer's current view.

use super::fov::{FieldOfView, VisionMap};
use super::grid::{GridSize, Position};
use super::room::Room;
use super::tile::{Tile, TileKind};

/// A single dungeon level
#[derive(Debug, Clone)]
pub struct Level {
    size: GridSize,
    tiles: Vec<Tile>,
    rooms: Vec<Room>,
    view: FieldOfView,
}

impl Level {
    /// Create a new level filled with walls
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            tiles: vec![Tile::default(); size.len()],
            rooms: Vec::new(),
            view: FieldOfView::new(),
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn width(&self) -> i32 {
        self.size.width
    }

    pub fn height(&self) -> i32 {
        self.size.height
    }

    /// Convert 2D coordinates to a flat tile index
    #[inline]
    pub fn index(&self, x: i32, y: i32) -> usize {
        self.size.index(x, y)
    }

    /// Convert a flat tile index to 2D coordinates
    #[inline]
    pub fn coords(&self, idx: usize) -> (i32, i32) {
        self.size.coords(idx)
    }

    /// Loose bounds check, inclusive of `width` and `height`.
    ///
    /// This admits one guard column and row past the last tile, so it is
    /// not enough on its own before indexing; use [`Level::contains`] for that.
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x <= self.size.width && y >= 0 && y <= self.size.height
    }

    /// Strict check that (x, y) names a tile
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.size.contains(x, y)
    }

    /// Tile at (x, y). Panics if the coordinates are outside the grid.
    pub fn tile_at(&self, x: i32, y: i32) -> &Tile {
        &self.tiles[self.index(x, y)]
    }

    /// Get tile at position
    pub fn get_tile(&self, x: i32, y: i32) -> Option<&Tile> {
        self.size.checked_index(x, y).map(|idx| &self.tiles[idx])
    }

    fn get_tile_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        self.size.checked_index(x, y).map(move |idx| &mut self.tiles[idx])
    }

    /// Whether the tile at (x, y) blocks sight. Unchecked, like [`Level::tile_at`].
    pub fn is_opaque(&self, x: i32, y: i32) -> bool {
        self.tile_at(x, y).opaque
    }

    /// Whether the tile at (x, y) blocks movement. Unchecked, like [`Level::tile_at`].
    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        self.tile_at(x, y).blocked
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Rooms in the order they were placed
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub(crate) fn push_room(&mut self, room: Room) {
        self.rooms.push(room);
    }

    /// Turn the tile at (x, y) into floor. Out-of-range coordinates are ignored.
    pub fn carve(&mut self, x: i32, y: i32) {
        if let Some(tile) = self.get_tile_mut(x, y) {
            tile.set_kind(TileKind::Floor);
        }
    }

    /// Turn the tile at a flat index into floor. Out-of-range indices are ignored.
    pub fn carve_index(&mut self, idx: usize) {
        if let Some(tile) = self.tiles.get_mut(idx) {
            tile.set_kind(TileKind::Floor);
        }
    }

    /// Recompute the view from `origin` and remember every tile it reaches
    pub fn compute_fov(&mut self, origin: Position, radius: i32) {
        let mut view = std::mem::take(&mut self.view);
        view.compute(&*self, origin, radius);

        for pos in view.iter() {
            if let Some(tile) = self.get_tile_mut(pos.x, pos.y) {
                tile.seen = true;
            }
        }
        self.view = view;
    }

    /// Whether (x, y) is in the current view
    pub fn is_visible(&self, x: i32, y: i32) -> bool {
        self.view.is_visible(x, y)
    }

    pub fn view(&self) -> &FieldOfView {
        &self.view
    }

    /// Number of tiles that have ever been seen
    pub fn seen_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.seen).count()
    }
}

impl VisionMap for Level {
    fn size(&self) -> GridSize {
        self.size
    }

    fn is_opaque(&self, x: i32, y: i32) -> bool {
        Level::is_opaque(self, x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_level(width: i32, height: i32) -> Level {
        let mut level = Level::new(GridSize::new(width, height));
        for y in 1..height - 1 {
            for x in 1..width - 1 {
                level.carve(x, y);
            }
        }
        level
    }

    fn floor_count(level: &Level) -> usize {
        level.tiles().iter().filter(|t| t.is_walkable()).count()
    }

    #[test]
    fn test_new_level_is_all_wall() {
        let level = Level::new(GridSize::new(12, 7));
        assert_eq!(level.tiles().len(), 84);
        assert!(level.tiles().iter().all(|t| t.kind == TileKind::Wall));
        assert!(level.rooms().is_empty());
        assert!(level.view().is_empty());
    }

    #[test]
    fn test_in_bounds_includes_guard_band() {
        let level = Level::new(GridSize::new(10, 5));
        assert!(level.in_bounds(10, 5));
        assert!(!level.contains(10, 5));
        assert!(!level.in_bounds(11, 0));
        assert!(!level.in_bounds(0, -1));
    }

    #[test]
    fn test_carve_ignores_out_of_range() {
        let mut level = Level::new(GridSize::new(4, 4));
        level.carve(-1, 2);
        level.carve(4, 0);
        level.carve_index(16);
        assert_eq!(floor_count(&level), 0);

        level.carve(2, 1);
        assert!(!level.is_blocked(2, 1));
        assert!(!level.is_opaque(2, 1));
        assert_eq!(floor_count(&level), 1);
        assert!(level.tile_at(2, 1).is_walkable());
    }

    #[test]
    fn test_fov_marks_seen() {
        let mut level = open_level(20, 20);
        assert_eq!(level.seen_count(), 0);

        level.compute_fov(Position::new(5, 5), 3);
        assert!(level.is_visible(5, 5));
        assert!(level.tile_at(5, 5).seen);
        assert!(level.tile_at(7, 5).seen);
        assert!(!level.tile_at(15, 15).seen);
        assert_eq!(level.seen_count(), level.view().len());
    }

    #[test]
    fn test_seen_is_monotonic() {
        let mut level = open_level(30, 12);
        let mut previous = Vec::new();

        for x in [3, 10, 17, 24, 10] {
            level.compute_fov(Position::new(x, 5), 4);
            let seen: Vec<bool> = level.tiles().iter().map(|t| t.seen).collect();
            for (before, after) in previous.iter().zip(&seen) {
                assert!(!before || *after, "seen flag was reset");
            }
            previous = seen;
        }

        // Moved away, so the first spot is remembered but not visible
        assert!(level.tile_at(3, 5).seen);
        assert!(!level.is_visible(3, 5));
    }
}
