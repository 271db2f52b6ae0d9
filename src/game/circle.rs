// Numbered click target.

/// One numbered circle on the board.
///
/// The countdown is kept in whole tenths of a second so the 0.1 s decay step stays
/// exact; `countdown_secs` converts for display.
#[derive(Clone, Debug, PartialEq)]
pub struct Circle {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    countdown_tenths: u16,
    pub clicked: bool,
    /// Countdown held constant (set for every clicked circle on game over).
    pub frozen: bool,
}

impl Circle {
    pub fn new(id: u32, x: f64, y: f64) -> Self {
        Self {
            id,
            x,
            y,
            countdown_tenths: 0,
            clicked: false,
            frozen: false,
        }
    }

    pub fn countdown_tenths(&self) -> u16 {
        self.countdown_tenths
    }

    pub fn countdown_secs(&self) -> f64 {
        self.countdown_tenths as f64 / 10.0
    }

    /// True while a countdown is showing (decaying or frozen).
    pub fn is_counting(&self) -> bool {
        self.countdown_tenths > 0
    }

    /// Correct click: start decaying from `tenths`.
    pub(crate) fn hit(&mut self, tenths: u16) {
        self.clicked = true;
        self.countdown_tenths = tenths;
    }

    /// Wrong click: show a full countdown that never decays.
    pub(crate) fn miss(&mut self, tenths: u16) {
        self.clicked = true;
        self.frozen = true;
        self.countdown_tenths = tenths;
    }

    /// One 0.1 s decay step. Frozen or idle circles are left untouched.
    pub(crate) fn decay(&mut self) {
        if self.countdown_tenths > 0 && !self.frozen {
            self.countdown_tenths -= 1;
        }
    }

    /// Cleared circles leave the board: clicked, fully decayed, not frozen.
    pub(crate) fn is_expired(&self) -> bool {
        self.clicked && self.countdown_tenths == 0 && !self.frozen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decay_stops_at_zero_and_expires() {
        let mut c = Circle::new(1, 0.0, 0.0);
        c.hit(2);
        c.decay();
        assert_eq!(c.countdown_tenths(), 1);
        assert!(!c.is_expired());
        c.decay();
        c.decay();
        assert_eq!(c.countdown_tenths(), 0);
        assert!(c.is_expired());
    }

    #[test]
    fn test_frozen_circle_keeps_countdown() {
        let mut c = Circle::new(2, 0.0, 0.0);
        c.miss(30);
        for _ in 0..10 {
            c.decay();
        }
        assert_eq!(c.countdown_tenths(), 30);
        assert!((c.countdown_secs() - 3.0).abs() < 1e-9);
        assert!(!c.is_expired());
    }

    #[test]
    fn test_untouched_circle_never_expires() {
        let mut c = Circle::new(3, 10.0, 20.0);
        c.decay();
        assert!(!c.is_counting());
        assert!(!c.is_expired());
    }
}
