//! Auto-play: a repeating task that clicks the expected circle on a fixed cadence.
//!
//! The task does not schedule itself. Its owner polls it, reads the returned
//! [`AutoStep`] and re-arms a timer for [`AutoStep::delay_ms`]. Every poll checks a
//! [`CancelFlag`] first, so replacing or dropping the task from the owner side is
//! enough to stop the loop.

use super::{ClickOutcome, Session};
use crate::config::GameConfig;
use std::cell::Cell;
use std::rc::Rc;

/// Shared stop switch between a running task and its owner.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Rc<Cell<bool>>);

impl CancelFlag {
    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// What one poll did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutoStep {
    /// Clicked this circle; wait the long delay.
    Clicked(u32),
    /// Expected circle not clickable right now; retry soon.
    Waiting,
    /// Cancelled, auto-play off, or the game left `Playing`. Do not reschedule.
    Stopped,
}

impl AutoStep {
    pub fn delay_ms(self, config: &GameConfig) -> Option<u32> {
        match self {
            AutoStep::Clicked(_) => Some(config.autoplay_click_ms),
            AutoStep::Waiting => Some(config.autoplay_retry_ms),
            AutoStep::Stopped => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct AutoPlayTask {
    cancel: CancelFlag,
}

impl AutoPlayTask {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    pub fn poll(&self, session: &mut Session) -> AutoStep {
        if self.cancel.is_cancelled() || !session.auto_play_active() {
            return AutoStep::Stopped;
        }
        let target = session.next_expected();
        let ready = session.circle(target).is_some_and(|c| !c.clicked);
        if !ready {
            return AutoStep::Waiting;
        }
        match session.click(target) {
            ClickOutcome::Correct => AutoStep::Clicked(target),
            // next_expected is never a wrong click; anything else means the state moved under us
            _ => AutoStep::Waiting,
        }
    }
}
