use std::fs::File;
use std::io;
use std::ops::ControlFlow;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, MouseButton, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use ratatui::{prelude::*, widgets::*};
use simplelog::{Config, LevelFilter, WriteLogger};

use snektorus::config::Args;
use snektorus::controls::{self, GestureTracker};
use snektorus::view::{self, SCOLDS};
use snektorus::{GameEngine, GameState, RandomSource, Status};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Set up logging before anything else
    let log_file = File::create(&args.log_file)
        .with_context(|| format!("creating log file {}", args.log_file.display()))?;
    WriteLogger::init(LevelFilter::Info, Config::default(), log_file)
        .context("initialising logger")?;

    info!("Starting snektorus with {:?}", args);

    let config = args.engine_config();
    match args.seed {
        Some(seed) => {
            let engine = GameEngine::with_config(config, StdRng::seed_from_u64(seed))?;
            run(engine, args.tick_interval())
        }
        None => {
            let engine = GameEngine::with_config(config, rand::thread_rng())?;
            run(engine, args.tick_interval())
        }
    }
}

fn run<R: RandomSource>(engine: GameEngine<R>, tick_rate: Duration) -> anyhow::Result<()> {
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = App::new(engine).run(&mut terminal, tick_rate);
    if let Err(e) = &result {
        error!("Game loop failed: {:#}", e);
    }

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("Exiting");
    result
}

struct App<R> {
    engine: GameEngine<R>,
    gestures: GestureTracker,
    board_area: Rect,
    last_status: Status,
    scold: &'static str,
}

impl<R: RandomSource> App<R> {
    fn new(engine: GameEngine<R>) -> Self {
        let last_status = engine.status();
        App {
            engine,
            gestures: GestureTracker::default(),
            board_area: Rect::default(),
            last_status,
            scold: SCOLDS[0],
        }
    }

    fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        tick_rate: Duration,
    ) -> anyhow::Result<()> {
        let mut last_tick = Instant::now();
        loop {
            let state = self.engine.snapshot();
            self.note_status(state.status);
            terminal.draw(|f| self.render(f, &state))?;

            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if event::poll(timeout)? {
                if self.handle_event(event::read()?).is_break() {
                    return Ok(());
                }
            }

            if last_tick.elapsed() >= tick_rate {
                self.engine.step();
                last_tick = Instant::now();
            }
        }
    }

    fn note_status(&mut self, status: Status) {
        if status == Status::GameOver && self.last_status != Status::GameOver {
            self.scold = SCOLDS
                .choose(&mut rand::thread_rng())
                .copied()
                .unwrap_or(SCOLDS[0]);
            info!("Game over with score {}", self.engine.score());
        }
        self.last_status = status;
    }

    fn handle_event(&mut self, event: Event) -> ControlFlow<()> {
        match event {
            Event::Key(key) => match controls::command_for_key(key) {
                Some(command) => controls::dispatch(&mut self.engine, command),
                None => ControlFlow::Continue(()),
            },
            Event::Mouse(mouse) => {
                let (x, y) = (f32::from(mouse.column), f32::from(mouse.row));
                let gesture = match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        if self.board_area.contains(Position::new(mouse.column, mouse.row)) {
                            self.gestures.press(x, y);
                        }
                        None
                    }
                    MouseEventKind::Drag(MouseButton::Left) => self.gestures.drag(x, y),
                    MouseEventKind::Up(MouseButton::Left) => self.gestures.release(x, y),
                    _ => None,
                };
                if let Some(gesture) = gesture {
                    controls::dispatch_gesture(&mut self.engine, gesture);
                }
                ControlFlow::Continue(())
            }
            _ => ControlFlow::Continue(()),
        }
    }

    fn render(&mut self, frame: &mut Frame, state: &GameState) {
        let score_text = format!(
            "SNEK    Score: {}    [n] {}  [space] {}  [r] Restart  [q] Quit",
            state.score,
            view::start_label(state.status),
            view::pause_label(state.status),
        );

        let size = frame.area();
        let layout = Layout::default()
            .direction(layout::Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title + score
                Constraint::Min(0),    // Game area
            ])
            .split(size);

        frame.render_widget(
            Paragraph::new(score_text)
                .alignment(Alignment::Left)
                .block(Block::default().borders(Borders::ALL)),
            layout[0],
        );

        let side = state.size.saturating_add(2);
        let board_rect = Rect {
            x: layout[1].x,
            y: layout[1].y,
            width: side.min(layout[1].width),
            height: side.min(layout[1].height),
        };
        let title = match state.status {
            Status::Playing => "Playing",
            Status::Paused => "Paused",
            Status::Idle => "Ready",
            Status::GameOver => "Game Over",
            Status::Won => "Won",
        };
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner_area = block.inner(board_rect);
        self.board_area = inner_area;

        frame.render_widget(block, board_rect);
        frame.render_widget(state, inner_area);

        if let Some(text) = view::overlay_text(state.status, self.scold) {
            let middle = Rect {
                y: inner_area.y + inner_area.height / 2,
                height: inner_area.height.min(1),
                ..inner_area
            };
            frame.render_widget(
                Paragraph::new(text)
                    .alignment(Alignment::Center)
                    .style(Style::default().bold()),
                middle,
            );
        }
    }
}
