//! Snake on a toroidal grid.
//!
//! [`engine::GameEngine`] is a tick-driven state machine with no clock of its
//! own. The terminal front end in `main.rs` drives it through
//! [`controls::dispatch`] and paints [`engine::GameState`] snapshots with the
//! widget in [`view`].

pub mod config;
pub mod controls;
pub mod engine;
pub mod error;
pub mod food;
pub mod grid;
pub mod view;

pub use config::EngineConfig;
pub use engine::{GameEngine, GameState, Status, StepOutcome};
pub use error::{EngineError, InvalidDirection};
pub use food::{place_food, FnSource, RandomSource, ScriptedSource};
pub use grid::{Delta, Direction, Point};
