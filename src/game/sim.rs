//! Deterministic driver with the same timer cadence as the browser board.
//!
//! The browser runs a countdown interval for as long as the board is mounted, an
//! elapsed-time interval only while a game is being played, and an auto-play
//! timeout chain. [`Simulator`] replays that schedule on a virtual millisecond
//! clock so whole games can be played in tests without a browser.

use super::autoplay::{AutoPlayTask, AutoStep};
use super::{ClickOutcome, Session, Status};
use crate::config::GameConfig;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Event {
    Countdown,
    Elapsed,
    AutoPlay,
}

pub struct Simulator {
    session: Session,
    rng: StdRng,
    now_ms: u64,
    next_countdown: u64,
    next_elapsed: Option<u64>,
    auto: Option<(AutoPlayTask, u64)>,
    auto_clicks: Vec<u32>,
}

impl Simulator {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let tick = config.tick_ms as u64;
        Self {
            session: Session::new(config),
            rng: StdRng::seed_from_u64(seed),
            now_ms: 0,
            next_countdown: tick,
            next_elapsed: None,
            auto: None,
            auto_clicks: Vec::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Ids clicked by auto-play, in order.
    pub fn auto_clicks(&self) -> &[u32] {
        &self.auto_clicks
    }

    pub fn start(&mut self, count: i64) {
        self.cancel_auto();
        self.session.start(count, &mut self.rng);
        self.next_elapsed = Some(self.now_ms + self.tick());
    }

    pub fn click(&mut self, id: u32) -> ClickOutcome {
        let outcome = self.session.click(id);
        self.sync_timers();
        outcome
    }

    /// Flip auto-play. Turning it on polls once immediately, like pressing the button.
    pub fn set_auto_play(&mut self, on: bool) {
        let was = self.session.auto_play();
        if !self.session.set_auto_play(on) || was == on {
            return;
        }
        self.cancel_auto();
        if on {
            self.auto = Some((AutoPlayTask::new(), self.now_ms));
            self.fire(Event::AutoPlay);
        }
    }

    /// Run every timer due within the next `ms` milliseconds.
    pub fn advance(&mut self, ms: u64) {
        let until = self.now_ms + ms;
        loop {
            let (at, event) = self.next_event();
            if at > until {
                break;
            }
            self.now_ms = at;
            self.fire(event);
        }
        self.now_ms = until;
    }

    /// Step timers until `done` holds or `limit_ms` of virtual time passes.
    /// Returns whether the condition was met.
    pub fn run_until<F: Fn(&Session) -> bool>(&mut self, done: F, limit_ms: u64) -> bool {
        let until = self.now_ms + limit_ms;
        while !done(&self.session) {
            let (at, event) = self.next_event();
            if at > until {
                self.now_ms = until;
                return false;
            }
            self.now_ms = at;
            self.fire(event);
        }
        true
    }

    fn tick(&self) -> u64 {
        self.session.config().tick_ms.max(1) as u64
    }

    fn next_event(&self) -> (u64, Event) {
        let mut best = (self.next_countdown, Event::Countdown);
        if let Some(at) = self.next_elapsed {
            if at < best.0 {
                best = (at, Event::Elapsed);
            }
        }
        if let Some((_, at)) = &self.auto {
            if *at < best.0 {
                best = (*at, Event::AutoPlay);
            }
        }
        best
    }

    fn fire(&mut self, event: Event) {
        match event {
            Event::Countdown => {
                self.session.tick_countdowns();
                self.next_countdown = self.now_ms + self.tick();
            }
            Event::Elapsed => {
                self.session.tick_elapsed();
                self.next_elapsed = Some(self.now_ms + self.tick());
            }
            Event::AutoPlay => {
                if let Some((task, _)) = self.auto.take() {
                    let step = task.poll(&mut self.session);
                    if let AutoStep::Clicked(id) = step {
                        self.auto_clicks.push(id);
                    }
                    if let Some(delay) = step.delay_ms(self.session.config()) {
                        self.auto = Some((task, self.now_ms + delay as u64));
                    }
                }
            }
        }
        self.sync_timers();
    }

    // Disarm the timers whose owning condition no longer holds.
    fn sync_timers(&mut self) {
        if self.session.status() != Status::Playing {
            self.next_elapsed = None;
            self.cancel_auto();
        }
    }

    fn cancel_auto(&mut self) {
        if let Some((task, _)) = self.auto.take() {
            task.cancel_flag().cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_ticks_before_any_game() {
        let mut sim = Simulator::new(GameConfig::default(), 1);
        sim.advance(1_000);
        assert_eq!(sim.session().status(), Status::Ready);
        assert_eq!(sim.session().elapsed_tenths(), 0);
        assert_eq!(sim.now_ms(), 1_000);
    }

    #[test]
    fn test_elapsed_runs_only_while_playing() {
        let mut sim = Simulator::new(GameConfig::default(), 1);
        sim.start(3);
        sim.advance(1_000);
        assert_eq!(sim.session().elapsed_tenths(), 10);
        sim.click(3);
        sim.advance(1_000);
        assert_eq!(sim.session().elapsed_tenths(), 10);
    }

    #[test]
    fn test_auto_play_first_click_is_immediate() {
        let mut sim = Simulator::new(GameConfig::default(), 5);
        sim.start(3);
        sim.set_auto_play(true);
        assert_eq!(sim.auto_clicks(), &[1]);
        sim.advance(1_999);
        assert_eq!(sim.auto_clicks(), &[1]);
        sim.advance(1);
        assert_eq!(sim.auto_clicks(), &[1, 2]);
    }

    #[test]
    fn test_turning_auto_play_off_stops_clicks() {
        let mut sim = Simulator::new(GameConfig::default(), 5);
        sim.start(4);
        sim.set_auto_play(true);
        sim.set_auto_play(false);
        sim.advance(10_000);
        assert_eq!(sim.auto_clicks(), &[1]);
        assert_eq!(sim.session().next_expected(), 2);
    }
}
