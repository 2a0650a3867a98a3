//! Held-key repeat for movement in terminal environments.
//!
//! A held direction moves once on press, then again after an initial delay of
//! two move delays, then once per move delay. Terminals that never report key
//! releases are handled with a timeout: a key not seen again within it counts
//! as released.

use std::time::Instant;

use arrayvec::ArrayVec;

use crate::types::{Direction, DEFAULT_KEY_RELEASE_TIMEOUT_MS, DEFAULT_MOVE_DELAY_MS};

#[derive(Debug, Clone)]
pub struct RepeatHandler {
    held: Option<Direction>,
    last_key_time: Instant,
    delay_timer: u32,
    repeat_accumulator: u32,
    initial_delay: u32,
    repeat_rate: u32,
    key_release_timeout_ms: u32,
}

impl RepeatHandler {
    pub fn new() -> Self {
        Self::with_move_delay(DEFAULT_MOVE_DELAY_MS)
    }

    pub fn with_move_delay(move_delay_ms: u32) -> Self {
        Self {
            held: None,
            last_key_time: Instant::now(),
            delay_timer: 0,
            repeat_accumulator: 0,
            initial_delay: move_delay_ms.saturating_mul(2),
            repeat_rate: move_delay_ms.max(1),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn held(&self) -> Option<Direction> {
        self.held
    }

    /// Register a press. Returns the direction to move now, or `None` when
    /// this is the terminal's own auto-repeat of a key already held.
    pub fn handle_key_press(&mut self, dir: Direction) -> Option<Direction> {
        self.last_key_time = Instant::now();
        if self.held == Some(dir) {
            return None;
        }
        self.held = Some(dir);
        self.clear_timers();
        Some(dir)
    }

    pub fn handle_key_release(&mut self, dir: Direction) {
        if self.held == Some(dir) {
            self.held = None;
            self.clear_timers();
        }
    }

    /// Advance by `elapsed_ms` and collect the repeats that fell due.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<Direction, 16> {
        let mut repeats = ArrayVec::new();

        let since_last_key = self.last_key_time.elapsed().as_millis() as u32;
        if since_last_key > self.key_release_timeout_ms && self.held.is_some() {
            self.held = None;
            self.clear_timers();
        }

        let Some(dir) = self.held else {
            return repeats;
        };

        let prev_delay = self.delay_timer;
        self.delay_timer = self.delay_timer.saturating_add(elapsed_ms);
        if self.delay_timer >= self.initial_delay {
            let excess = if prev_delay < self.initial_delay {
                self.delay_timer - self.initial_delay
            } else {
                elapsed_ms
            };
            self.repeat_accumulator += excess;

            while self.repeat_accumulator >= self.repeat_rate {
                let _ = repeats.try_push(dir);
                self.repeat_accumulator -= self.repeat_rate;
            }
        }

        repeats
    }

    pub fn reset(&mut self) {
        self.held = None;
        self.last_key_time = Instant::now();
        self.clear_timers();
    }

    fn clear_timers(&mut self) {
        self.delay_timer = 0;
        self.repeat_accumulator = 0;
    }
}

impl Default for RepeatHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_repeats_after_double_delay() {
        let mut rh = RepeatHandler::with_move_delay(50).with_key_release_timeout_ms(10_000);

        assert_eq!(rh.handle_key_press(Direction::Up), Some(Direction::Up));

        assert!(rh.update(99).is_empty());
        // At the initial delay: nothing has accumulated past it yet.
        assert!(rh.update(1).is_empty());

        assert_eq!(rh.update(50).as_slice(), &[Direction::Up]);
        assert_eq!(
            rh.update(100).as_slice(),
            &[Direction::Up, Direction::Up]
        );
    }

    #[test]
    fn test_terminal_auto_repeat_is_absorbed() {
        let mut rh = RepeatHandler::with_move_delay(50);
        assert_eq!(rh.handle_key_press(Direction::Left), Some(Direction::Left));
        assert_eq!(rh.handle_key_press(Direction::Left), None);
        assert_eq!(rh.handle_key_press(Direction::Down), Some(Direction::Down));
        assert_eq!(rh.held(), Some(Direction::Down));
    }

    #[test]
    fn test_release_stops_repeats() {
        let mut rh = RepeatHandler::with_move_delay(50).with_key_release_timeout_ms(10_000);
        rh.handle_key_press(Direction::Right);
        rh.handle_key_release(Direction::Left);
        assert_eq!(rh.held(), Some(Direction::Right));

        rh.handle_key_release(Direction::Right);
        assert_eq!(rh.held(), None);
        assert!(rh.update(1_000).is_empty());
    }

    #[test]
    fn test_auto_release_after_timeout() {
        let mut rh = RepeatHandler::with_move_delay(50).with_key_release_timeout_ms(50);
        rh.handle_key_press(Direction::Left);

        // No release event arrives; age the last press instead.
        rh.last_key_time = Instant::now() - Duration::from_millis(51);

        assert!(rh.update(1_000).is_empty());
        assert_eq!(rh.held(), None);
    }

    #[test]
    fn test_default_key_release_timeout_is_non_zero() {
        assert!(RepeatHandler::new().key_release_timeout_ms() > 0);
    }

    #[test]
    fn test_reset_clears_held_state() {
        let mut rh = RepeatHandler::with_move_delay(50).with_key_release_timeout_ms(10_000);
        rh.handle_key_press(Direction::Down);
        assert!(!rh.update(300).is_empty(), "expected repeats before reset");

        rh.reset();
        assert!(rh.update(300).is_empty(), "reset should stop repeats");
    }
}
