use serde::Serialize;
use tokio::time::{Duration, Instant};

/// Which way a tap moves the slideshow.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TapZone {
    Back,
    Forward,
}

impl TapZone {
    /// The left third of the screen goes back; everything else goes forward.
    pub fn from_position(x: f64, screen_width: f64) -> Self {
        if x < screen_width / 3.0 {
            TapZone::Back
        } else {
            TapZone::Forward
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressKind {
    Tap,
    Hold,
}

/// Tells a quick tap from a press-and-hold by how long the finger stayed down.
#[derive(Debug, Clone)]
pub struct PressTracker {
    threshold: Duration,
    pressed_at: Option<Instant>,
}

impl PressTracker {
    pub fn new(threshold_ms: u64) -> Self {
        Self {
            threshold: Duration::from_millis(threshold_ms),
            pressed_at: None,
        }
    }

    pub fn press(&mut self, now: Instant) {
        self.pressed_at = Some(now);
    }

    /// True once a press has lasted long enough to count as a hold.
    pub fn is_holding(&self, now: Instant) -> bool {
        self.pressed_at
            .map(|at| now.saturating_duration_since(at) >= self.threshold)
            .unwrap_or(false)
    }

    /// Ends the press. `None` when there was no press to release.
    pub fn release(&mut self, now: Instant) -> Option<PressKind> {
        let pressed_at = self.pressed_at.take()?;
        if now.saturating_duration_since(pressed_at) >= self.threshold {
            Some(PressKind::Hold)
        } else {
            Some(PressKind::Tap)
        }
    }

    pub fn cancel(&mut self) {
        self.pressed_at = None;
    }
}
