//! Terminal Mordicus runner (default binary).
//!
//! Uses crossterm for input and the framebuffer-based renderer from the term
//! crate. Logging goes to the file named by `MORDICUS_LOG_PATH`, since the
//! terminal itself is taken over by the game.

use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use tui_mordicus::input::{direction_of, map_key, Command, RepeatHandler};
use tui_mordicus::levels::LevelPack;
use tui_mordicus::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_mordicus::types::Screen;
use tui_mordicus::{GameConfig, Session};

const TICK_MS: u64 = 16;

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    init_logging(&config)?;

    let levels = match &config.levels_path {
        Some(path) => LevelPack::from_path(path)
            .with_context(|| format!("cannot load level pack {}", path.display()))?,
        None => LevelPack::bundled().context("bundled level pack is broken")?,
    };
    let mut session = Session::new(levels, &config);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(config: &GameConfig) -> Result<()> {
    let Some(path) = config.log_path.as_ref() else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    info!("logging to {}", path.display());
    Ok(())
}

fn run(term: &mut TerminalRenderer, session: &mut Session, config: &GameConfig) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut repeat = RepeatHandler::with_move_delay(config.move_delay_ms)
        .with_key_release_timeout_ms(config.key_release_timeout_ms);

    let tick_duration = Duration::from_millis(TICK_MS);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&session.view(), Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => match map_key(key) {
                        Some(Command::Quit) => return Ok(()),
                        Some(Command::Move(dir)) => {
                            if let Some(dir) = repeat.handle_key_press(dir) {
                                session.handle(Command::Move(dir))?;
                            }
                        }
                        Some(command) => session.handle(command)?,
                        None => {}
                    },
                    KeyEventKind::Repeat => {
                        // Only keeps the hold alive; the repeat handler paces moves.
                        if let Some(dir) = direction_of(key.code) {
                            repeat.handle_key_press(dir);
                        }
                    }
                    KeyEventKind::Release => {
                        if let Some(dir) = direction_of(key.code) {
                            repeat.handle_key_release(dir);
                        }
                    }
                },
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            let elapsed_ms = elapsed.as_millis().min(u128::from(u32::MAX)) as u32;

            for dir in repeat.update(elapsed_ms) {
                session.handle(Command::Move(dir))?;
            }
            session.tick(elapsed_ms);

            // A key held through a capture or a clear must be pressed again.
            if session.screen() != Screen::Level {
                repeat.reset();
            }
        }
    }
}
