//! Animation queue for resolve scripts.
//!
//! A script is released one frame at a time. Each frame is held on screen for
//! its delay before the next one is released: the player's own move uses the
//! move delay, cascade frames the cascade delay. The queue counts as playing
//! until the last frame's hold has run out, and the session ignores moves
//! while it is playing.

use std::collections::VecDeque;

use crate::config::GameConfig;
use crate::core::StateSnapshot;

#[derive(Debug, Clone)]
struct Frame {
    state: StateSnapshot,
    hold_ms: u32,
}

#[derive(Debug, Clone)]
pub struct Playback {
    frames: VecDeque<Frame>,
    /// Time left before the next release (or before the queue goes idle).
    wait_ms: u32,
    move_delay_ms: u32,
    cascade_delay_ms: u32,
}

impl Playback {
    pub fn new(move_delay_ms: u32, cascade_delay_ms: u32) -> Self {
        Self {
            frames: VecDeque::new(),
            wait_ms: 0,
            move_delay_ms,
            cascade_delay_ms,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.move_delay_ms, config.cascade_delay_ms)
    }

    /// Queue the script of a player move: the active move result first, then
    /// its cascade.
    pub fn queue_move(&mut self, script: Vec<StateSnapshot>) {
        for (i, state) in script.into_iter().enumerate() {
            let hold_ms = if i == 0 {
                self.move_delay_ms
            } else {
                self.cascade_delay_ms
            };
            self.frames.push_back(Frame { state, hold_ms });
        }
    }

    /// Queue a cascade on its own (a level that starts moving by itself).
    pub fn queue_cascade(&mut self, script: Vec<StateSnapshot>) {
        let hold_ms = self.cascade_delay_ms;
        self.frames
            .extend(script.into_iter().map(|state| Frame { state, hold_ms }));
    }

    pub fn is_playing(&self) -> bool {
        !self.frames.is_empty() || self.wait_ms > 0
    }

    /// Frames not released yet.
    pub fn pending(&self) -> usize {
        self.frames.len()
    }

    /// Advance by `elapsed_ms` and return the frames released, in order.
    ///
    /// The first frame of a script queued while idle is released on the next
    /// call, even with zero elapsed time.
    pub fn update(&mut self, elapsed_ms: u32) -> Vec<StateSnapshot> {
        let mut released = Vec::new();
        let mut budget = elapsed_ms;

        loop {
            if self.wait_ms > budget {
                self.wait_ms -= budget;
                break;
            }
            budget -= self.wait_ms;
            self.wait_ms = 0;

            match self.frames.pop_front() {
                Some(frame) => {
                    self.wait_ms = frame.hold_ms;
                    released.push(frame.state);
                }
                None => break,
            }
        }

        released
    }

    /// Drop everything still queued.
    pub fn clear(&mut self) {
        self.frames.clear();
        self.wait_ms = 0;
    }
}
