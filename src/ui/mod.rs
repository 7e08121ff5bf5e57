//! Terminal front-end: key mapping and level rendering

pub mod input;
pub mod render;

pub use input::action_for_key;
pub use render::{draw, LevelView};
