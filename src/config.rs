//! Tunable game constants.
//!
//! `GameConfig::default()` reproduces the stock game. With the `serde` feature the
//! struct can be partially overridden from JSON (missing fields keep defaults).

/// Board geometry, countdown length and timer cadence.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Horizontal range for circle positions (top-left corner of the circle box).
    pub spawn_width: f64,
    /// Vertical range for circle positions.
    pub spawn_height: f64,
    pub circle_radius: f64,
    /// Countdown started by a correct click, in tenths of a second.
    pub decay_tenths: u16,
    /// Period of both the countdown and the elapsed-time interval.
    pub tick_ms: u32,
    /// Auto-play pause after a successful click.
    pub autoplay_click_ms: u32,
    /// Auto-play pause when the expected circle is not available yet.
    pub autoplay_retry_ms: u32,
    /// Value shown in the points input before the first game.
    pub default_points: i64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            spawn_width: 450.0,
            spawn_height: 350.0,
            circle_radius: 25.0,
            decay_tenths: 30,
            tick_ms: 100,
            autoplay_click_ms: 2000,
            autoplay_retry_ms: 50,
            default_points: 5,
        }
    }
}

impl GameConfig {
    /// Canvas size needed so that every spawn position keeps its whole circle visible.
    pub fn board_size(&self) -> (f64, f64) {
        let d = self.circle_radius * 2.0;
        (self.spawn_width + d, self.spawn_height + d)
    }

    pub fn decay_secs(&self) -> f64 {
        self.decay_tenths as f64 / 10.0
    }

    /// Parse a (possibly partial) JSON override on top of the defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_game() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.board_size(), (500.0, 400.0));
        assert!((cfg.decay_secs() - 3.0).abs() < 1e-9);
        assert_eq!(cfg.tick_ms, 100);
        assert_eq!(cfg.default_points, 5);
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{"default_points": 12, "autoplay_click_ms": 500}"#;
        let cfg = GameConfig::from_json(json).unwrap();
        assert_eq!(cfg.default_points, 12);
        assert_eq!(cfg.autoplay_click_ms, 500);
        assert_eq!(cfg.tick_ms, 100);
    }
}
