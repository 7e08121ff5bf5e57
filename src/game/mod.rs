//! Game module - observer movement and mode state machine

mod state;

pub use state::{Action, Game, GameError, GameState, QUIT_PROMPT};
