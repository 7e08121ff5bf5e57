//! Game state machine
//!
//! Owns the level and the observer, and gates movement behind the
//! quit confirmation prompt.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::config::{ConfigError, GameConfig};
use crate::world::{generate_level, Level, Position};

/// Text shown while waiting for quit confirmation
pub const QUIT_PROMPT: &str = "Do you really want to quit? [y/n]";

/// Errors that prevent a game from starting
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("dungeon generation placed no rooms in {attempts} attempts")]
    NoRooms { attempts: u32 },
}

/// Top-level game modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Movement input is processed
    Running,
    /// Waiting for a yes/no answer to the quit prompt
    Prompt,
    /// Terminal state, the process should exit
    Stop,
}

/// What the player asked for, independent of the input device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move { dx: i32, dy: i32 },
    Quit,
    Confirm,
    Decline,
}

/// The main game struct
pub struct Game {
    config: GameConfig,
    level: Level,
    observer: Position,
    state: GameState,
    prompt: Option<&'static str>,
    seed: Option<u64>,
}

impl Game {
    /// Generate a level and place the observer in the first room
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;

        // Always run from a known seed so a layout can be reproduced from the log
        let seed = config.seed.unwrap_or_else(|| StdRng::from_entropy().gen::<u64>());
        let mut rng = StdRng::seed_from_u64(seed);
        log::info!("Generating level with seed {}", seed);

        let level = generate_level(&config, &mut rng);
        let start = level
            .rooms()
            .first()
            .map(|room| room.center())
            .ok_or(GameError::NoRooms {
                attempts: config.room_attempts(),
            })?;

        let mut game = Self::from_level(level, start, config);
        game.seed = Some(seed);
        Ok(game)
    }

    /// Wrap an existing level, computing the initial view at `observer`
    pub fn from_level(mut level: Level, observer: Position, config: GameConfig) -> Self {
        level.compute_fov(observer, config.fov_radius);
        Self {
            config,
            level,
            observer,
            state: GameState::Running,
            prompt: None,
            seed: None,
        }
    }

    /// Move the observer to (x, y) and refresh the view.
    ///
    /// Returns false and changes nothing if the target is blocked or off the grid.
    pub fn move_observer(&mut self, x: i32, y: i32) -> bool {
        match self.level.get_tile(x, y) {
            Some(tile) if !tile.blocked => {}
            _ => return false,
        }

        self.observer = Position::new(x, y);
        self.level.compute_fov(self.observer, self.config.fov_radius);
        true
    }

    /// Move the observer by a delta
    pub fn move_by(&mut self, dx: i32, dy: i32) -> bool {
        let target = self.observer.offset(dx, dy);
        self.move_observer(target.x, target.y)
    }

    /// Apply a player action according to the current mode
    pub fn handle_action(&mut self, action: Action) {
        match (self.state, action) {
            (GameState::Running, Action::Move { dx, dy }) => {
                if !self.move_by(dx, dy) {
                    log::trace!("Move by ({}, {}) blocked", dx, dy);
                }
            }
            (GameState::Running, Action::Quit) => {
                self.prompt = Some(QUIT_PROMPT);
                self.set_state(GameState::Prompt);
            }
            (GameState::Prompt, Action::Confirm) => {
                self.set_state(GameState::Stop);
            }
            (GameState::Prompt, Action::Decline) => {
                self.prompt = None;
                self.set_state(GameState::Running);
            }
            (GameState::Prompt, Action::Quit) => {
                // Asking again keeps the question open; only y/n leaves it
                self.prompt = Some(QUIT_PROMPT);
            }
            _ => {}
        }
    }

    fn set_state(&mut self, state: GameState) {
        log::debug!("State transition: {:?} -> {:?}", self.state, state);
        self.state = state;
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Prompt text to display, if any
    pub fn prompt(&self) -> Option<&str> {
        self.prompt
    }

    pub fn is_running(&self) -> bool {
        self.state == GameState::Running
    }

    pub fn should_quit(&self) -> bool {
        self.state == GameState::Stop
    }

    pub fn observer(&self) -> Position {
        self.observer
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Seed the level was generated from
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::GridSize;

    /// 12x7 level with a single open room, interior (1..=10, 1..=5)
    fn small_game() -> Game {
        let mut level = Level::new(GridSize::new(12, 7));
        for y in 1..=5 {
            for x in 1..=10 {
                level.carve(x, y);
            }
        }
        let config = GameConfig {
            width: 12,
            height: 7,
            min_room_size: 2,
            max_room_size: 4,
            ..GameConfig::default()
        };
        Game::from_level(level, Position::new(3, 3), config)
    }

    #[test]
    fn test_new_game_starts_in_first_room() {
        let config = GameConfig {
            seed: Some(99),
            ..GameConfig::default()
        };
        let game = Game::new(config).unwrap();
        let first = game.level().rooms()[0];
        assert_eq!(game.observer(), first.center());
        assert_eq!(game.seed(), Some(99));
        assert_eq!(game.state(), GameState::Running);
        assert!(game.level().is_visible(game.observer().x, game.observer().y));
    }

    #[test]
    fn test_new_game_without_rooms_fails() {
        let config = GameConfig {
            max_rooms: 0,
            ..GameConfig::default()
        };
        assert!(matches!(Game::new(config), Err(GameError::NoRooms { attempts: 0 })));
    }

    #[test]
    fn test_new_game_rejects_invalid_config() {
        let config = GameConfig {
            fov_radius: -2,
            ..GameConfig::default()
        };
        assert!(matches!(Game::new(config), Err(GameError::Config(_))));
    }

    #[test]
    fn test_move_into_floor_recomputes_view() {
        let mut game = small_game();
        assert!(game.move_observer(4, 3));
        assert_eq!(game.observer(), Position::new(4, 3));
        assert_eq!(game.level().view().origin(), Some(Position::new(4, 3)));
    }

    #[test]
    fn test_move_into_wall_is_noop() {
        let mut game = small_game();
        let seen_before = game.level().seen_count();

        assert!(!game.move_observer(0, 3));
        assert!(!game.move_observer(-1, 3));
        assert!(!game.move_observer(12, 3));
        assert_eq!(game.observer(), Position::new(3, 3));
        assert_eq!(game.level().view().origin(), Some(Position::new(3, 3)));
        assert_eq!(game.level().seen_count(), seen_before);
    }

    #[test]
    fn test_quit_prompt_flow() {
        let mut game = small_game();

        game.handle_action(Action::Quit);
        assert_eq!(game.state(), GameState::Prompt);
        assert_eq!(game.prompt(), Some(QUIT_PROMPT));
        assert_eq!(game.observer(), Position::new(3, 3));

        // Movement is suppressed while prompting
        game.handle_action(Action::Move { dx: 1, dy: 0 });
        assert_eq!(game.observer(), Position::new(3, 3));

        game.handle_action(Action::Decline);
        assert_eq!(game.state(), GameState::Running);
        assert_eq!(game.prompt(), None);

        game.handle_action(Action::Move { dx: 1, dy: 1 });
        assert_eq!(game.observer(), Position::new(4, 4));

        game.handle_action(Action::Quit);
        game.handle_action(Action::Confirm);
        assert!(game.should_quit());

        // Stop is terminal
        game.handle_action(Action::Decline);
        game.handle_action(Action::Move { dx: 1, dy: 0 });
        assert_eq!(game.state(), GameState::Stop);
        assert_eq!(game.observer(), Position::new(4, 4));
    }

    #[test]
    fn test_repeated_quit_keeps_prompt_open() {
        let mut game = small_game();
        game.handle_action(Action::Quit);
        game.handle_action(Action::Quit);
        assert_eq!(game.state(), GameState::Prompt);
        assert_eq!(game.prompt(), Some(QUIT_PROMPT));
        assert_eq!(game.observer(), Position::new(3, 3));

        game.handle_action(Action::Decline);
        assert!(game.is_running());
    }

    #[test]
    fn test_confirm_ignored_while_running() {
        let mut game = small_game();
        game.handle_action(Action::Confirm);
        game.handle_action(Action::Decline);
        assert!(game.is_running());
    }
}
