//! Game state machine: circle generation, click validation, countdown decay and
//! win / game-over detection.
//!
//! Everything here is plain Rust with no browser dependency. The DOM layer in
//! `crate::ui` and the virtual-time driver in [`sim`] both drive a [`Session`]
//! through the same three entry points: [`Session::start`], [`Session::click`] and
//! the auto-play toggle, plus the two periodic ticks.

pub mod autoplay;
mod circle;
pub mod sim;

pub use circle::Circle;

use crate::config::GameConfig;
use rand::Rng;

/// Lifecycle of one game. `Win` and `GameOver` are terminal until the next start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Ready,
    Playing,
    Win,
    GameOver,
}

/// Result of [`Session::click`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Not playing, unknown id, or circle already clicked.
    Ignored,
    Correct,
    /// Out-of-order click; the game is over.
    Wrong,
}

/// All mutable game state, owned in one place.
#[derive(Clone, Debug)]
pub struct Session {
    config: GameConfig,
    circles: Vec<Circle>,
    target_count: i64,
    elapsed_tenths: u32,
    next_expected: u32,
    auto_play: bool,
    status: Status,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        Self {
            target_count: config.default_points,
            config,
            circles: Vec::new(),
            elapsed_tenths: 0,
            next_expected: 1,
            auto_play: false,
            status: Status::Ready,
        }
    }

    /// Start (or restart) a game with `target_count` circles at random positions.
    ///
    /// Counts below one, or too large to allocate, give an empty board; the session
    /// still enters `Playing`.
    pub fn start<R: Rng>(&mut self, target_count: i64, rng: &mut R) {
        self.target_count = target_count;
        self.elapsed_tenths = 0;
        self.next_expected = 1;
        self.auto_play = false;
        self.status = Status::Playing;

        let n = target_count.clamp(0, u32::MAX as i64) as u32;
        let (w, h) = (self.config.spawn_width, self.config.spawn_height);
        self.circles = Vec::new();
        if let Some(mut circles) = circle_buffer(n as usize) {
            for id in 1..=n {
                circles.push(Circle::new(id, coord(rng, w), coord(rng, h)));
            }
            self.circles = circles;
        }
        log::info!("game started with {} circles", self.circles.len());
    }

    pub fn click(&mut self, id: u32) -> ClickOutcome {
        if self.status != Status::Playing {
            return ClickOutcome::Ignored;
        }
        match self.circle(id) {
            Some(c) if !c.clicked => {}
            _ => return ClickOutcome::Ignored,
        }

        let decay = self.config.decay_tenths;
        if id != self.next_expected {
            for c in &mut self.circles {
                if c.id == id {
                    c.miss(decay);
                } else if c.clicked {
                    c.frozen = true;
                }
            }
            self.status = Status::GameOver;
            log::info!("game over: {} clicked, {} expected", id, self.next_expected);
            return ClickOutcome::Wrong;
        }

        if let Some(c) = self.circles.iter_mut().find(|c| c.id == id) {
            c.hit(decay);
        }
        if (self.next_expected as i64) < self.target_count {
            self.next_expected += 1;
        }
        log::debug!("circle {} cleared, next {}", id, self.next_expected);
        ClickOutcome::Correct
    }

    /// Countdown interval body: decay every live countdown by 0.1 s and drop the
    /// circles that finished. Returns true when this tick won the game.
    pub fn tick_countdowns(&mut self) -> bool {
        let had_circles = !self.circles.is_empty();
        for c in &mut self.circles {
            c.decay();
        }
        self.circles.retain(|c| !c.is_expired());

        if self.status == Status::Playing && had_circles && self.circles.is_empty() {
            self.status = Status::Win;
            log::info!("all cleared in {:.1}s", self.elapsed_secs());
            return true;
        }
        false
    }

    /// Elapsed-time interval body. Only counts while playing.
    pub fn tick_elapsed(&mut self) {
        if self.status == Status::Playing {
            self.elapsed_tenths = self.elapsed_tenths.saturating_add(1);
        }
    }

    /// Enable or disable auto-play. Ignored outside `Playing`; returns whether the
    /// flag was applied.
    pub fn set_auto_play(&mut self, on: bool) -> bool {
        if self.status != Status::Playing {
            return false;
        }
        if self.auto_play != on {
            log::info!("auto-play {}", if on { "on" } else { "off" });
        }
        self.auto_play = on;
        true
    }

    pub fn toggle_auto_play(&mut self) -> bool {
        self.set_auto_play(!self.auto_play)
    }

    pub fn auto_play(&self) -> bool {
        self.auto_play
    }

    pub fn auto_play_active(&self) -> bool {
        self.auto_play && self.status == Status::Playing
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    pub fn circle(&self, id: u32) -> Option<&Circle> {
        self.circles.iter().find(|c| c.id == id)
    }

    pub fn next_expected(&self) -> u32 {
        self.next_expected
    }

    pub fn target_count(&self) -> i64 {
        self.target_count
    }

    /// Update the count used by the next start (the points input). Ignored while
    /// playing, since the count also caps `next_expected`; returns whether it applied.
    pub fn set_target_count(&mut self, count: i64) -> bool {
        if self.status == Status::Playing {
            return false;
        }
        self.target_count = count;
        true
    }

    pub fn elapsed_tenths(&self) -> u32 {
        self.elapsed_tenths
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_tenths as f64 / 10.0
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

/// Storage for `n` circles, or `None` when that many cannot be allocated.
fn circle_buffer(n: usize) -> Option<Vec<Circle>> {
    let mut buf = Vec::new();
    match buf.try_reserve_exact(n) {
        Ok(()) => Some(buf),
        Err(e) => {
            log::warn!("no room for {} circles: {}", n, e);
            None
        }
    }
}

fn coord<R: Rng>(rng: &mut R, max: f64) -> f64 {
    if max > 0.0 {
        rng.gen_range(0.0..max)
    } else {
        0.0
    }
}

/// Integer parsing for the points input: optional leading whitespace and sign,
/// then leading digits. Trailing junk is ignored; no digits gives `None`.
pub fn parse_point_count(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let run: &str = {
        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        &digits[..end]
    };
    if run.is_empty() {
        return None;
    }
    let magnitude = run.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add((b - b'0') as i64)
    });
    Some(if negative { -magnitude } else { magnitude })
}
