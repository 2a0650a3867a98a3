//! Game session: the screen state machine around the core engine.
//!
//! The session owns the level pack, the current [`StateSnapshot`], the
//! bookkeeping the core does not know about (stage, password, custom flag,
//! typed input, screen) and the [`Playback`] queue. Commands come in through
//! [`Session::handle`]; time comes in through [`Session::tick`], which
//! releases animation frames and applies the screen change once a script has
//! finished playing.

use std::error::Error;
use std::fmt;
use std::iter;

use log::{debug, info, warn};

use crate::config::GameConfig;
use crate::core::{resolve_chain, resolve_move_chain, CoreError, Grid, StateSnapshot};
use crate::input::Command;
use crate::levels::{Level, LevelError, LevelKind, LevelPack};
use crate::playback::Playback;
use crate::term::SessionView;
use crate::types::{Direction, Screen, Unit, INITIAL_BONUS, INITIAL_LIVES, INITIAL_SCORE, PASSWORD_LEN};

#[derive(Debug)]
pub enum SessionError {
    /// The engine rejected a move (no player on the grid).
    Core(CoreError),
    /// The level pack rejected a lookup.
    Level(LevelError),
    /// A list the session needs to start from is empty.
    MissingLevel { kind: LevelKind, stage: u32 },
    /// The current level's password no longer resolves.
    UnknownPassword(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Core(err) => write!(f, "{err}"),
            Self::Level(err) => write!(f, "{err}"),
            Self::MissingLevel { kind, stage } => {
                write!(f, "there is no stage #{stage} in the list of {kind} levels")
            }
            Self::UnknownPassword(password) => {
                write!(f, "could not find level with password {password}")
            }
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Core(err) => Some(err),
            Self::Level(err) => Some(err),
            Self::MissingLevel { .. } | Self::UnknownPassword(_) => None,
        }
    }
}

impl From<CoreError> for SessionError {
    fn from(err: CoreError) -> Self {
        Self::Core(err)
    }
}

impl From<LevelError> for SessionError {
    fn from(err: LevelError) -> Self {
        Self::Level(err)
    }
}

pub struct Session {
    levels: LevelPack,
    playback: Playback,
    state: StateSnapshot,
    stage: u32,
    is_custom: bool,
    password: String,
    input: String,
    screen: Screen,
    /// A script was queued and its outcome has not been applied yet.
    settle_pending: bool,
}

impl Session {
    pub fn new(levels: LevelPack, config: &GameConfig) -> Self {
        Self {
            levels,
            playback: Playback::from_config(config),
            state: StateSnapshot::initial(Grid::filled(1, 1, Unit::Empty)),
            stage: 1,
            is_custom: false,
            password: String::new(),
            input: String::new(),
            screen: Screen::Title,
            settle_pending: false,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn state(&self) -> &StateSnapshot {
        &self.state
    }

    pub fn stage(&self) -> u32 {
        self.stage
    }

    pub fn is_custom(&self) -> bool {
        self.is_custom
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn levels(&self) -> &LevelPack {
        &self.levels
    }

    /// An animation is running; moves are ignored until it ends.
    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    /// Borrowed data for the terminal view.
    pub fn view(&self) -> SessionView<'_> {
        SessionView {
            screen: self.screen,
            state: &self.state,
            stage: self.stage,
            is_custom: self.is_custom,
            password: &self.password,
            input: &self.input,
        }
    }

    /// Apply one command to the current screen. Commands a screen does not
    /// understand are ignored.
    pub fn handle(&mut self, command: Command) -> Result<(), SessionError> {
        match (self.screen, command) {
            (Screen::Title, Command::Confirm | Command::Enter) => {
                self.set_screen(Screen::UsePassword)
            }

            (Screen::UsePassword, Command::Digit('1')) => self.set_screen(Screen::InputPassword),
            (Screen::UsePassword, Command::Digit('2')) => self.start_first_level(self.is_custom)?,

            (Screen::InputPassword, Command::Digit(c)) => self.type_digit(c),
            (Screen::InputPassword, Command::Backspace) => {
                self.input.pop();
            }
            (Screen::InputPassword, Command::Enter) => self.submit_password(),
            (Screen::InputPassword, Command::Escape) => {
                let is_custom = self
                    .levels
                    .find_by_password(&self.password)
                    .is_some_and(|level| level.is_custom);
                self.input.clear();
                self.start_first_level(is_custom)?;
            }

            (Screen::Level, Command::Move(dir)) => self.play_move(dir)?,
            (Screen::Level, Command::Escape) => self.give_up(),

            (Screen::Retry, Command::Confirm | Command::Enter) => self.retry()?,

            (Screen::Complete, Command::Digit('1')) => self.complete(false)?,
            (Screen::Complete, Command::Digit('2')) => self.complete(true)?,

            (Screen::GameOver, Command::Confirm | Command::Enter) => {
                self.input = self.password.clone();
                self.set_screen(Screen::Title);
            }

            _ => {}
        }
        Ok(())
    }

    /// Advance the animation by `elapsed_ms`.
    pub fn tick(&mut self, elapsed_ms: u32) {
        for frame in self.playback.update(elapsed_ms) {
            self.state = frame;
        }
        if self.settle_pending && !self.playback.is_playing() {
            self.settle_pending = false;
            self.settle();
        }
    }

    /// Play whatever is queued to the end at once.
    pub fn finish_playback(&mut self) {
        self.tick(u32::MAX);
    }

    fn set_screen(&mut self, screen: Screen) {
        if self.screen != screen {
            info!("screen {} -> {}", self.screen.as_str(), screen.as_str());
        }
        self.screen = screen;
    }

    fn type_digit(&mut self, digit: char) {
        self.input = self
            .input
            .chars()
            .take(PASSWORD_LEN - 1)
            .chain(iter::once(digit))
            .collect();
    }

    fn submit_password(&mut self) {
        let found = self.levels.find_by_password(&self.input).cloned();
        match found {
            Some(level) => {
                self.input.clear();
                self.enter_level(level, INITIAL_LIVES, INITIAL_SCORE);
            }
            None => warn!("no level with password {:?}", self.input),
        }
    }

    fn start_first_level(&mut self, is_custom: bool) -> Result<(), SessionError> {
        let kind = LevelKind::from_custom(is_custom);
        let first = self
            .levels
            .find_by_stage(1, is_custom)?
            .cloned()
            .ok_or(SessionError::MissingLevel { kind, stage: 1 })?;
        self.enter_level(first, INITIAL_LIVES, INITIAL_SCORE);
        Ok(())
    }

    /// Load `level` with a fresh bonus and run its opening cascade.
    ///
    /// The outcome is only checked once a script has played, so a level
    /// that starts out cleared waits for the player's first move.
    fn enter_level(&mut self, level: Level, lives: u32, score: u32) {
        info!(
            "entering {} stage {} (password {})",
            level.kind(),
            level.stage,
            level.password
        );
        self.state = StateSnapshot::new(level.grid, lives, score, INITIAL_BONUS);
        self.stage = level.stage;
        self.is_custom = level.is_custom;
        self.password = level.password;
        self.playback.clear();
        self.set_screen(Screen::Level);

        let script = resolve_chain(&self.state);
        self.settle_pending = !script.is_empty();
        self.playback.queue_cascade(script);
    }

    fn play_move(&mut self, dir: Direction) -> Result<(), SessionError> {
        if self.playback.is_playing() {
            debug!("move {} ignored while animating", dir.as_str());
            return Ok(());
        }
        let script = resolve_move_chain(&self.state, dir)?;
        self.playback.queue_move(script);
        self.settle_pending = true;
        Ok(())
    }

    fn give_up(&mut self) {
        if self.state.is_player_dead() || self.state.is_success() {
            return;
        }
        self.playback.clear();
        self.settle_pending = false;
        self.state.lives = self.state.lives.saturating_sub(1);
        if self.state.is_game_over() {
            self.set_screen(Screen::GameOver);
        } else {
            self.set_screen(Screen::Retry);
        }
    }

    fn retry(&mut self) -> Result<(), SessionError> {
        let level = self
            .levels
            .find_by_password(&self.password)
            .cloned()
            .ok_or_else(|| SessionError::UnknownPassword(self.password.clone()))?;
        self.enter_level(level, self.state.lives, self.state.score);
        Ok(())
    }

    fn complete(&mut self, next: bool) -> Result<(), SessionError> {
        let target = if next { self.stage + 1 } else { self.stage };
        let total = self.state.score.saturating_add(self.state.bonus);

        let found = self.levels.find_by_stage(target, self.is_custom)?.cloned();
        match found {
            Some(level) => {
                let score = if next { total } else { self.state.score };
                self.enter_level(level, self.state.lives, score);
            }
            None => {
                self.state.score = total;
                info!("all stages cleared, final score {total}");
                self.set_screen(Screen::End);
            }
        }
        Ok(())
    }

    /// Pick the screen that follows the last frame of a script.
    fn settle(&mut self) {
        if self.state.is_game_over() {
            self.set_screen(Screen::GameOver);
        } else if self.state.is_player_dead() {
            self.set_screen(Screen::Retry);
        } else if self.state.is_success() {
            self.set_screen(Screen::Complete);
        }
    }
}
