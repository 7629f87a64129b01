//! Construction and input validation errors.
//!
//! Game-ending conditions are not errors; they are reported through
//! [`crate::engine::Status`].

use thiserror::Error;

use crate::grid::{Delta, Point};

/// Errors raised while building or restoring a [`crate::engine::GameEngine`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("board size {size} is below the minimum of {min}")]
    BoardTooSmall { size: u16, min: u16 },

    #[error("initial snake length {length} is below the minimum of {min}")]
    SnakeTooShort { length: u16, min: u16 },

    #[error("a snake of length {length} does not fit centred on a board of size {size}")]
    SnakeDoesNotFit { length: u16, size: u16 },

    #[error("snapshot has an empty snake")]
    EmptySnake,

    #[error("point {point} lies outside a board of size {size}")]
    OutOfBounds { point: Point, size: u16 },
}

/// A displacement that is not one of the four unit headings.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{0} is not a unit direction")]
pub struct InvalidDirection(pub Delta);
