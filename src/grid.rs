use std::fmt;

use crate::error::InvalidDirection;

/// A cell on the board. Coordinates are always in `0..size`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    pub const fn new(x: u16, y: u16) -> Self {
        Point { x, y }
    }

    /// Moves by `delta` and wraps around a `size` x `size` torus.
    pub fn wrapped_add(&self, delta: Delta, size: u16) -> Point {
        let size = i32::from(size);
        let x = (i32::from(self.x) + delta.dx).rem_euclid(size) as u16;
        let y = (i32::from(self.y) + delta.dy).rem_euclid(size) as u16;
        Point { x, y }
    }

    pub fn in_bounds(&self, size: u16) -> bool {
        self.x < size && self.y < size
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A signed displacement, the raw form an input layer hands over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Delta {
    pub dx: i32,
    pub dy: i32,
}

impl Delta {
    pub const fn new(dx: i32, dy: i32) -> Self {
        Delta { dx, dy }
    }
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.dx, self.dy)
    }
}

/// One of the four unit headings. `Up` is towards row 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl From<Direction> for Delta {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Up => Delta { dx: 0, dy: -1 },
            Direction::Down => Delta { dx: 0, dy: 1 },
            Direction::Left => Delta { dx: -1, dy: 0 },
            Direction::Right => Delta { dx: 1, dy: 0 },
        }
    }
}

impl TryFrom<Delta> for Direction {
    type Error = InvalidDirection;

    /// Only the four unit vectors are headings; everything else is rejected.
    fn try_from(delta: Delta) -> Result<Self, Self::Error> {
        match (delta.dx, delta.dy) {
            (0, -1) => Ok(Direction::Up),
            (0, 1) => Ok(Direction::Down),
            (-1, 0) => Ok(Direction::Left),
            (1, 0) => Ok(Direction::Right),
            _ => Err(InvalidDirection(delta)),
        }
    }
}
