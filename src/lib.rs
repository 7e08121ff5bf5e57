//! Delve - a room-and-tunnel dungeon with field-of-view memory
//!
//! Generates a single tile level, tracks what an observer can currently
//! see, and remembers every tile that has ever been in view.

pub mod config;
pub mod game;
pub mod world;
pub mod ui;

// Re-export commonly used types
pub use config::{ConfigError, GameConfig};
pub use game::{Action, Game, GameError, GameState};
pub use world::{FieldOfView, GridSize, Level, Position, Room, Tile, TileKind};
