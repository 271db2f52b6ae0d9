//! Read-only presentation of a [`Session`]: labels, button state and circle visuals.
//!
//! The DOM layer only copies these values into elements and the canvas.

use crate::config::GameConfig;
use crate::game::{Circle, Session, Status};

/// Heading text and the CSS modifier used to colour it.
pub fn title(status: Status) -> (&'static str, &'static str) {
    match status {
        Status::Win => ("ALL CLEARED", "win"),
        Status::GameOver => ("GAME OVER", "lose"),
        Status::Ready | Status::Playing => ("LET'S PLAY", ""),
    }
}

pub fn time_label(session: &Session) -> String {
    format!("Time: {:.1}s", session.elapsed_secs())
}

pub fn next_label(session: &Session) -> String {
    if session.status() == Status::Playing {
        format!("Next: {}", session.next_expected())
    } else {
        "Next: -".to_string()
    }
}

pub fn primary_button_label(status: Status) -> &'static str {
    if status == Status::Ready {
        "Play"
    } else {
        "Restart"
    }
}

/// Auto-play toggle label, or `None` when the button is hidden.
/// The label names the action the button performs.
pub fn auto_play_button(session: &Session) -> Option<&'static str> {
    if session.status() != Status::Playing {
        return None;
    }
    let label = if session.auto_play() {
        "Auto Play OFF"
    } else {
        "Auto Play ON"
    };
    Some(label)
}

pub fn points_input_disabled(status: Status) -> bool {
    status == Status::Playing
}

/// Everything needed to paint one circle.
#[derive(Clone, Debug, PartialEq)]
pub struct CircleVisual {
    pub id: u32,
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    /// 1.0 when idle, fading with the remaining countdown otherwise.
    pub opacity: f64,
    pub countdown: Option<String>,
    pub highlighted: bool,
}

impl CircleVisual {
    pub fn of(circle: &Circle, config: &GameConfig) -> Self {
        let r = config.circle_radius;
        let (opacity, countdown) = if circle.is_counting() {
            let decay = config.decay_secs();
            let fade = if decay > 0.0 {
                (circle.countdown_secs() / decay).clamp(0.0, 1.0)
            } else {
                0.0
            };
            (fade, Some(format!("{:.1}s", circle.countdown_secs())))
        } else {
            (1.0, None)
        };
        Self {
            id: circle.id,
            cx: circle.x + r,
            cy: circle.y + r,
            radius: r,
            opacity,
            countdown,
            highlighted: circle.is_counting(),
        }
    }

    fn contains(&self, x: f64, y: f64) -> bool {
        let (dx, dy) = (x - self.cx, y - self.cy);
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

/// Paint order: untouched circles in id order, clicked circles on top.
pub fn draw_order(session: &Session) -> Vec<CircleVisual> {
    let cfg = session.config();
    let mut out: Vec<(bool, CircleVisual)> = session
        .circles()
        .iter()
        .map(|c| (c.clicked, CircleVisual::of(c, cfg)))
        .collect();
    out.sort_by_key(|(clicked, _)| *clicked);
    out.into_iter().map(|(_, v)| v).collect()
}

/// Topmost circle under a board-local point.
pub fn hit_test(session: &Session, x: f64, y: f64) -> Option<u32> {
    draw_order(session)
        .iter()
        .rev()
        .find(|v| v.contains(x, y))
        .map(|v| v.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn session(n: i64) -> Session {
        let mut s = Session::new(GameConfig::default());
        s.start(n, &mut StdRng::seed_from_u64(21));
        s
    }

    #[test]
    fn test_labels_follow_status() {
        let mut s = Session::new(GameConfig::default());
        assert_eq!(title(s.status()).0, "LET'S PLAY");
        assert_eq!(primary_button_label(s.status()), "Play");
        assert_eq!(next_label(&s), "Next: -");
        assert_eq!(auto_play_button(&s), None);
        assert!(!points_input_disabled(s.status()));

        s.start(2, &mut StdRng::seed_from_u64(1));
        assert_eq!(primary_button_label(s.status()), "Restart");
        assert_eq!(next_label(&s), "Next: 1");
        assert_eq!(auto_play_button(&s), Some("Auto Play ON"));
        assert!(points_input_disabled(s.status()));
        s.set_auto_play(true);
        assert_eq!(auto_play_button(&s), Some("Auto Play OFF"));

        s.click(2);
        assert_eq!(title(s.status()), ("GAME OVER", "lose"));
        assert_eq!(auto_play_button(&s), None);
    }

    #[test]
    fn test_time_has_one_decimal() {
        let mut s = session(1);
        assert_eq!(time_label(&s), "Time: 0.0s");
        for _ in 0..13 {
            s.tick_elapsed();
        }
        assert_eq!(time_label(&s), "Time: 1.3s");
    }

    #[test]
    fn test_countdown_fades_circle() {
        let mut s = session(2);
        let idle = CircleVisual::of(s.circle(1).unwrap(), s.config());
        assert_eq!(idle.opacity, 1.0);
        assert_eq!(idle.countdown, None);

        s.click(1);
        for _ in 0..6 {
            s.tick_countdowns();
        }
        let v = CircleVisual::of(s.circle(1).unwrap(), s.config());
        assert!((v.opacity - 0.8).abs() < 1e-9);
        assert_eq!(v.countdown.as_deref(), Some("2.4s"));
        assert!(v.highlighted);
    }

    #[test]
    fn test_clicked_circles_draw_on_top() {
        let mut s = session(4);
        s.click(1);
        let order: Vec<u32> = draw_order(&s).iter().map(|v| v.id).collect();
        assert_eq!(order, vec![2, 3, 4, 1]);
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        // zero spawn area stacks every circle on the same spot
        let cfg = GameConfig {
            spawn_width: 0.0,
            spawn_height: 0.0,
            ..GameConfig::default()
        };
        let mut s = Session::new(cfg);
        s.start(3, &mut StdRng::seed_from_u64(2));
        assert_eq!(hit_test(&s, 25.0, 25.0), Some(3));
        s.click(1);
        assert_eq!(hit_test(&s, 25.0, 25.0), Some(1));
        assert_eq!(hit_test(&s, 49.0, 25.0), Some(1));
        assert_eq!(hit_test(&s, 49.0, 49.0), None);
        assert_eq!(hit_test(&s, -100.0, -100.0), None);
    }
}
