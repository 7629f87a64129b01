use ratatui::prelude::*;

use crate::engine::{GameState, Status};
use crate::grid::Point;

pub const HEAD_SYMBOL: &str = "@";
pub const BODY_SYMBOL: &str = " ";
pub const FOOD_SYMBOL: &str = "♥";
pub const EMPTY_SYMBOL: &str = "·";

/// Shown on game over, one picked at random each time.
pub const SCOLDS: [&str; 6] = [
    "Is that all you've got?",
    "Pathetic. Try harder.",
    "You call that a snake?",
    "Do better. Much better.",
    "Embarrassing performance.",
    "Hopeless. Try again.",
];

/// Text drawn over the board, if any.
pub fn overlay_text(status: Status, scold: &str) -> Option<&str> {
    match status {
        Status::Idle => Some("Press Start"),
        Status::Paused => Some("Paused"),
        Status::GameOver => Some(scold),
        Status::Won => Some("You Win"),
        Status::Playing => None,
    }
}

pub fn start_label(status: Status) -> &'static str {
    if status == Status::Idle {
        "Start"
    } else {
        "Restart"
    }
}

pub fn pause_label(status: Status) -> &'static str {
    if status == Status::Paused {
        "Resume"
    } else {
        "Pause"
    }
}

fn cell_at(buf: &mut Buffer, area: Rect, point: Point) -> Option<&mut buffer::Cell> {
    if point.x >= area.width || point.y >= area.height {
        return None;
    }
    buf.cell_mut((area.x + point.x, area.y + point.y))
}

/// Paints the board one terminal cell per grid cell. Anything that does not
/// fit in `area` is clipped.
impl Widget for &GameState {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for y in 0..self.size {
            for x in 0..self.size {
                if let Some(cell) = cell_at(buf, area, Point::new(x, y)) {
                    cell.set_symbol(EMPTY_SYMBOL).set_fg(Color::DarkGray);
                }
            }
        }

        if let Some(food) = self.food {
            if let Some(cell) = cell_at(buf, area, food) {
                cell.set_symbol(FOOD_SYMBOL).set_fg(Color::LightRed);
            }
        }

        // Tail first so the head wins if they ever share a cell.
        for segment in self.snake.iter().skip(1).rev() {
            if let Some(cell) = cell_at(buf, area, *segment) {
                cell.set_symbol(BODY_SYMBOL).set_bg(Color::Green);
            }
        }

        if let Some(head) = self.head() {
            if let Some(cell) = cell_at(buf, area, head) {
                cell.set_symbol(HEAD_SYMBOL)
                    .set_fg(Color::Yellow)
                    .set_bg(Color::Green);
            }
        }
    }
}
