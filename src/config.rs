use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::error::EngineError;

pub const DEFAULT_BOARD_SIZE: u16 = 20;
pub const DEFAULT_SNAKE_LENGTH: u16 = 3;
pub const DEFAULT_TICK_MS: u64 = 120;
pub const DEFAULT_LOG_FILE: &str = "snektorus.log";

pub const MIN_BOARD_SIZE: u16 = 4;
pub const MIN_SNAKE_LENGTH: u16 = 3;

/// Construction parameters for a [`crate::engine::GameEngine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Side length of the square board.
    pub size: u16,
    /// Number of segments the snake starts with.
    pub initial_length: u16,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            size: DEFAULT_BOARD_SIZE,
            initial_length: DEFAULT_SNAKE_LENGTH,
        }
    }
}

impl EngineConfig {
    pub fn with_size(size: u16) -> Self {
        EngineConfig {
            size,
            ..Default::default()
        }
    }

    /// The snake is laid out leftwards from the centre column, so its tail
    /// must not pass column 0.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.size < MIN_BOARD_SIZE {
            return Err(EngineError::BoardTooSmall {
                size: self.size,
                min: MIN_BOARD_SIZE,
            });
        }
        if self.initial_length < MIN_SNAKE_LENGTH {
            return Err(EngineError::SnakeTooShort {
                length: self.initial_length,
                min: MIN_SNAKE_LENGTH,
            });
        }
        if self.initial_length > self.size / 2 + 1 {
            return Err(EngineError::SnakeDoesNotFit {
                length: self.initial_length,
                size: self.size,
            });
        }
        Ok(())
    }
}

/// Command line for the terminal front end.
#[derive(Parser, Debug, Clone)]
#[command(name = "snektorus", version, about = "Snake on a wrap-around board")]
pub struct Args {
    /// Side length of the square board
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    pub size: u16,

    /// Milliseconds between ticks
    #[arg(long = "tick-ms", default_value_t = DEFAULT_TICK_MS)]
    pub tick_ms: u64,

    /// Seed for food placement; omit for a random game
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where log output goes (the terminal is busy drawing the board)
    #[arg(long = "log-file", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,
}

impl Args {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::with_size(self.size)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }
}
