//! The tick-driven game state machine.

use std::collections::VecDeque;

use log::{debug, info};
use rand::rngs::ThreadRng;

use crate::config::{EngineConfig, MIN_BOARD_SIZE};
use crate::error::EngineError;
use crate::food::{place_food, RandomSource};
use crate::grid::{Direction, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    Idle,
    Playing,
    Paused,
    GameOver,
    Won,
}

/// What a call to [`GameEngine::step`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Not playing, nothing changed.
    Halted,
    /// Moved one cell, length unchanged.
    Moved,
    /// Ate food and grew by one.
    Ate,
    /// Ran into its own body, game over.
    Collided,
    /// Ate the last food the board had room for.
    Won,
}

/// Everything there is to know about a game, as an owned value.
///
/// [`GameEngine::snapshot`] hands out copies of this, so whatever a caller
/// does to one never reaches the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub size: u16,
    /// Head first, tail last.
    pub snake: VecDeque<Point>,
    pub dir: Direction,
    pub pending_dir: Direction,
    pub food: Option<Point>,
    pub score: u32,
    pub status: Status,
}

impl GameState {
    /// A fresh idle game with the snake centred and heading right. Food is
    /// not placed yet.
    fn fresh(config: &EngineConfig) -> Self {
        let start = config.size / 2;
        let snake = (0..config.initial_length)
            .map(|i| Point::new(start - i, start))
            .collect();

        GameState {
            size: config.size,
            snake,
            dir: Direction::Right,
            pending_dir: Direction::Right,
            food: None,
            score: 0,
            status: Status::Idle,
        }
    }

    pub fn head(&self) -> Option<Point> {
        self.snake.front().copied()
    }

    pub fn tail(&self) -> Option<Point> {
        self.snake.back().copied()
    }

    fn validate(&self) -> Result<(), EngineError> {
        if self.size < MIN_BOARD_SIZE {
            return Err(EngineError::BoardTooSmall {
                size: self.size,
                min: MIN_BOARD_SIZE,
            });
        }
        if self.snake.is_empty() {
            return Err(EngineError::EmptySnake);
        }
        for point in self.snake.iter().chain(self.food.iter()) {
            if !point.in_bounds(self.size) {
                return Err(EngineError::OutOfBounds {
                    point: *point,
                    size: self.size,
                });
            }
        }
        Ok(())
    }
}

/// Owns one game and advances it when told to.
///
/// There is no clock inside; the driver calls [`GameEngine::step`] once per
/// tick. Food placement draws from the injected [`RandomSource`], so two
/// engines built with identical sources and fed identical commands stay in
/// lockstep.
pub struct GameEngine<R = ThreadRng> {
    config: EngineConfig,
    state: GameState,
    rng: R,
}

impl GameEngine<ThreadRng> {
    pub fn from_thread_rng() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl<R: RandomSource> GameEngine<R> {
    /// A 20x20 board with a three segment snake.
    pub fn new(rng: R) -> Self {
        let config = EngineConfig::default();
        let mut engine = GameEngine {
            config,
            state: GameState::fresh(&config),
            rng,
        };
        engine.reset();
        engine
    }

    pub fn with_config(config: EngineConfig, rng: R) -> Result<Self, EngineError> {
        config.validate()?;
        let mut engine = GameEngine {
            config,
            state: GameState::fresh(&config),
            rng,
        };
        engine.reset();
        Ok(engine)
    }

    /// Picks up from a snapshot. `reset` afterwards starts a default length
    /// snake on a board of the snapshot's size.
    ///
    /// Only bounds are checked. Food overlapping the snake is accepted as is.
    pub fn restore(state: GameState, rng: R) -> Result<Self, EngineError> {
        state.validate()?;
        let config = EngineConfig::with_size(state.size);
        Ok(GameEngine { config, state, rng })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn status(&self) -> Status {
        self.state.status
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    /// Queues a heading for the next step. A reversal of the heading the
    /// snake is actually moving in is ignored, however many turns were
    /// queued since the last step.
    pub fn set_direction(&mut self, next: Direction) {
        if next == self.state.dir.opposite() {
            debug!("ignoring reversal from {:?} to {:?}", self.state.dir, next);
            return;
        }
        self.state.pending_dir = next;
    }

    pub fn start(&mut self) {
        match self.state.status {
            Status::Idle | Status::GameOver | Status::Won => {
                info!("game started");
                self.state.status = Status::Playing;
            }
            Status::Playing | Status::Paused => {}
        }
    }

    pub fn toggle_pause(&mut self) {
        let toggled = match self.state.status {
            Status::Playing => Status::Paused,
            Status::Paused => Status::Playing,
            Status::Idle | Status::GameOver | Status::Won => return,
        };
        info!("{:?} -> {:?}", self.state.status, toggled);
        self.state.status = toggled;
    }

    /// Throws the current game away and sets up a fresh idle one.
    pub fn reset(&mut self) {
        let mut fresh = GameState::fresh(&self.config);
        fresh.food = place_food(fresh.size, &fresh.snake, &mut self.rng);
        self.state = fresh;
        debug!("reset, food at {:?}", self.state.food);
    }

    /// Advances the game by one tick. Does nothing unless playing.
    pub fn step(&mut self) -> StepOutcome {
        if self.state.status != Status::Playing {
            return StepOutcome::Halted;
        }

        let state = &mut self.state;
        state.dir = state.pending_dir;

        let (Some(head), Some(tail)) = (state.head(), state.tail()) else {
            return StepOutcome::Halted;
        };
        let next = head.wrapped_add(state.dir.into(), state.size);

        // The tail cell is treated as vacated even on a tick where eating
        // keeps it in place.
        if next != tail && state.snake.contains(&next) {
            info!("collided with itself at {} with score {}", next, state.score);
            state.status = Status::GameOver;
            return StepOutcome::Collided;
        }

        let ate_food = state.food == Some(next);
        state.snake.push_front(next);

        if !ate_food {
            state.snake.pop_back();
            return StepOutcome::Moved;
        }

        state.score += 1;
        state.food = place_food(state.size, &state.snake, &mut self.rng);
        match state.food {
            Some(food) => {
                debug!("ate food at {}, score {}, next food at {}", next, state.score, food);
                StepOutcome::Ate
            }
            None => {
                info!("board filled, won with score {}", state.score);
                state.status = Status::Won;
                StepOutcome::Won
            }
        }
    }
}
