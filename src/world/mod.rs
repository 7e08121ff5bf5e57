//! World module
//!
//! Level data structures, tiles, rooms, generation and field of view.

pub mod grid;
pub mod tile;
pub mod room;
pub mod level;
pub mod fov;
pub mod generation;

pub use grid::{GridSize, Position};
pub use tile::{Tile, TileKind};
pub use room::Room;
pub use level::Level;
pub use fov::{FieldOfView, VisionMap};
pub use generation::generate_level;
