//! Turns raw key presses and pointer drags into engine commands.

use std::ops::ControlFlow;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use log::debug;

use crate::engine::{GameEngine, Status};
use crate::food::RandomSource;
use crate::grid::Direction;

/// Drag distance, in terminal cells, before a drag counts as a swipe.
pub const SWIPE_THRESHOLD: f32 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Steer, starting the game if it has not started yet.
    Turn(Direction),
    TogglePause,
    /// Throw the game away and play a new one right away.
    Restart,
    Start,
    /// The start button: starts an idle game, restarts anything else.
    NewGame,
    Quit,
}

pub fn command_for_key(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let command = match key.code {
        KeyCode::Up => Command::Turn(Direction::Up),
        KeyCode::Down => Command::Turn(Direction::Down),
        KeyCode::Left => Command::Turn(Direction::Left),
        KeyCode::Right => Command::Turn(Direction::Right),
        KeyCode::Char(' ') => Command::TogglePause,
        KeyCode::Enter => Command::Start,
        KeyCode::Esc => Command::Quit,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Command::Turn(Direction::Up),
            's' => Command::Turn(Direction::Down),
            'a' => Command::Turn(Direction::Left),
            'd' => Command::Turn(Direction::Right),
            'r' => Command::Restart,
            'n' => Command::NewGame,
            'q' => Command::Quit,
            _ => return None,
        },
        _ => return None,
    };
    Some(command)
}

/// Applies `command` to the engine. Breaks when the player asked to quit.
pub fn dispatch<R: RandomSource>(engine: &mut GameEngine<R>, command: Command) -> ControlFlow<()> {
    debug!("dispatching {:?}", command);
    match command {
        Command::Turn(dir) => {
            engine.set_direction(dir);
            if engine.status() == Status::Idle {
                engine.start();
            }
        }
        Command::TogglePause => engine.toggle_pause(),
        Command::Restart => {
            engine.reset();
            engine.start();
        }
        Command::Start => engine.start(),
        Command::NewGame => {
            if engine.status() != Status::Idle {
                engine.reset();
            }
            engine.start();
        }
        Command::Quit => return ControlFlow::Break(()),
    }
    ControlFlow::Continue(())
}

/// The heading of a drag by `(dx, dy)`, if it went far enough.
///
/// The longer axis wins; an exact diagonal counts as vertical.
pub fn swipe_direction(dx: f32, dy: f32, threshold: f32) -> Option<Direction> {
    let (abs_x, abs_y) = (dx.abs(), dy.abs());
    if abs_x.max(abs_y) < threshold {
        return None;
    }
    if abs_x > abs_y {
        Some(if dx > 0.0 { Direction::Right } else { Direction::Left })
    } else {
        Some(if dy > 0.0 { Direction::Down } else { Direction::Up })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture {
    Swipe(Direction),
    Tap,
}

/// Follows one press-drag-release at a time.
///
/// A gesture yields at most one swipe, as soon as the drag passes the
/// threshold. A release that never got that far is a tap.
#[derive(Debug)]
pub struct GestureTracker {
    threshold: f32,
    origin: Option<(f32, f32)>,
    swiped: bool,
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new(SWIPE_THRESHOLD)
    }
}

impl GestureTracker {
    pub fn new(threshold: f32) -> Self {
        GestureTracker {
            threshold,
            origin: None,
            swiped: false,
        }
    }

    pub fn press(&mut self, x: f32, y: f32) {
        self.origin = Some((x, y));
        self.swiped = false;
    }

    pub fn drag(&mut self, x: f32, y: f32) -> Option<Gesture> {
        let (ox, oy) = self.origin?;
        if self.swiped {
            return None;
        }
        let dir = swipe_direction(x - ox, y - oy, self.threshold)?;
        self.swiped = true;
        Some(Gesture::Swipe(dir))
    }

    pub fn release(&mut self, x: f32, y: f32) -> Option<Gesture> {
        let (ox, oy) = self.origin.take()?;
        if std::mem::take(&mut self.swiped) {
            return None;
        }
        Some(match swipe_direction(x - ox, y - oy, self.threshold) {
            Some(dir) => Gesture::Swipe(dir),
            None => Gesture::Tap,
        })
    }
}

/// Applies a finished gesture: swipes steer, taps start an idle game.
pub fn dispatch_gesture<R: RandomSource>(engine: &mut GameEngine<R>, gesture: Gesture) {
    match gesture {
        Gesture::Swipe(dir) => {
            let _ = dispatch(engine, Command::Turn(dir));
        }
        Gesture::Tap => {
            if engine.status() == Status::Idle {
                engine.start();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::food::ScriptedSource;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn engine() -> GameEngine<ScriptedSource> {
        GameEngine::new(ScriptedSource::constant(0.0))
    }

    #[test]
    fn test_arrow_and_wasd_keys() {
        let pairs = [
            (KeyCode::Up, Direction::Up),
            (KeyCode::Down, Direction::Down),
            (KeyCode::Left, Direction::Left),
            (KeyCode::Right, Direction::Right),
            (KeyCode::Char('w'), Direction::Up),
            (KeyCode::Char('S'), Direction::Down),
            (KeyCode::Char('a'), Direction::Left),
            (KeyCode::Char('D'), Direction::Right),
        ];
        for (code, dir) in pairs {
            assert_eq!(command_for_key(key(code)), Some(Command::Turn(dir)));
        }
    }

    #[test]
    fn test_lifecycle_keys() {
        assert_eq!(command_for_key(key(KeyCode::Char(' '))), Some(Command::TogglePause));
        assert_eq!(command_for_key(key(KeyCode::Char('r'))), Some(Command::Restart));
        assert_eq!(command_for_key(key(KeyCode::Char('R'))), Some(Command::Restart));
        assert_eq!(command_for_key(key(KeyCode::Enter)), Some(Command::Start));
        assert_eq!(command_for_key(key(KeyCode::Char('n'))), Some(Command::NewGame));
        assert_eq!(command_for_key(key(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(command_for_key(key(KeyCode::Char('q'))), Some(Command::Quit));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        assert_eq!(command_for_key(key(KeyCode::Char('x'))), None);
        assert_eq!(command_for_key(key(KeyCode::Tab)), None);
        assert_eq!(command_for_key(key(KeyCode::F(1))), None);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut release = key(KeyCode::Up);
        release.kind = KeyEventKind::Release;
        assert_eq!(command_for_key(release), None);
    }

    #[test]
    fn test_turn_starts_idle_game() {
        let mut engine = engine();
        assert!(dispatch(&mut engine, Command::Turn(Direction::Up)).is_continue());
        let state = engine.snapshot();
        assert_eq!(state.status, Status::Playing);
        assert_eq!(state.pending_dir, Direction::Up);
    }

    #[test]
    fn test_turn_does_not_resume_paused_game() {
        let mut engine = engine();
        engine.start();
        engine.toggle_pause();
        let _ = dispatch(&mut engine, Command::Turn(Direction::Down));
        assert_eq!(engine.status(), Status::Paused);
        assert_eq!(engine.snapshot().pending_dir, Direction::Down);
    }

    #[test]
    fn test_restart_plays_fresh_game() {
        let mut engine = engine();
        engine.start();
        engine.step();
        let _ = dispatch(&mut engine, Command::Restart);

        let state = engine.snapshot();
        assert_eq!(state.status, Status::Playing);
        assert_eq!(state.snake.front().map(|p| p.x), Some(10));
    }

    #[test]
    fn test_new_game_button() {
        let mut engine = engine();
        let _ = dispatch(&mut engine, Command::NewGame);
        assert_eq!(engine.status(), Status::Playing);

        engine.step();
        let moved = engine.snapshot();
        let _ = dispatch(&mut engine, Command::NewGame);
        let fresh = engine.snapshot();
        assert_eq!(fresh.status, Status::Playing);
        assert_ne!(fresh.snake, moved.snake);
    }

    #[test]
    fn test_quit_breaks() {
        let mut engine = engine();
        assert!(dispatch(&mut engine, Command::Quit).is_break());
    }

    #[test]
    fn test_swipe_direction() {
        assert_eq!(swipe_direction(1.0, 1.0, 2.0), None);
        assert_eq!(swipe_direction(3.0, 1.0, 2.0), Some(Direction::Right));
        assert_eq!(swipe_direction(-3.0, 1.0, 2.0), Some(Direction::Left));
        assert_eq!(swipe_direction(1.0, 3.0, 2.0), Some(Direction::Down));
        assert_eq!(swipe_direction(1.0, -3.0, 2.0), Some(Direction::Up));
        // Diagonal goes vertical
        assert_eq!(swipe_direction(4.0, -4.0, 2.0), Some(Direction::Up));
    }

    #[test]
    fn test_gesture_swipes_once() {
        let mut tracker = GestureTracker::new(2.0);
        tracker.press(10.0, 10.0);
        assert_eq!(tracker.drag(11.0, 10.0), None);
        assert_eq!(tracker.drag(13.0, 10.0), Some(Gesture::Swipe(Direction::Right)));
        assert_eq!(tracker.drag(13.0, 20.0), None);
        assert_eq!(tracker.release(13.0, 20.0), None);
    }

    #[test]
    fn test_gesture_resolved_on_release() {
        let mut tracker = GestureTracker::new(2.0);
        tracker.press(5.0, 5.0);
        assert_eq!(tracker.release(5.0, 1.0), Some(Gesture::Swipe(Direction::Up)));

        tracker.press(5.0, 5.0);
        assert_eq!(tracker.release(6.0, 5.0), Some(Gesture::Tap));
    }

    #[test]
    fn test_gesture_needs_press() {
        let mut tracker = GestureTracker::default();
        assert_eq!(tracker.drag(30.0, 30.0), None);
        assert_eq!(tracker.release(30.0, 30.0), None);
    }

    #[test]
    fn test_tap_starts_only_idle_game() {
        let mut engine = engine();
        dispatch_gesture(&mut engine, Gesture::Tap);
        assert_eq!(engine.status(), Status::Playing);

        engine.toggle_pause();
        dispatch_gesture(&mut engine, Gesture::Tap);
        assert_eq!(engine.status(), Status::Paused);
    }
}
