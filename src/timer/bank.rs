use std::cmp::Ordering;
use tokio::time::Instant;

use super::{ProgressTimer, TimerStatus};

// Set to true to trace bar transitions
const ENABLE_LOGS: bool = false;

use crate::log_debug;

/// One progress bar per slide, kept in step with the current slide index.
#[derive(Debug, Clone)]
pub struct ProgressBank {
    timers: Vec<ProgressTimer>,
    duration_ms: u64,
    active: Option<usize>,
}

impl ProgressBank {
    pub fn new(slide_count: usize, duration_ms: u64) -> Self {
        Self {
            timers: vec![ProgressTimer::new(); slide_count],
            duration_ms,
            active: None,
        }
    }

    /// Rebuilds every bar for a new slide list.
    pub fn rebuild(&mut self, slide_count: usize) {
        self.timers = vec![ProgressTimer::new(); slide_count];
        self.active = None;
    }

    /// Applies the per-bar rules for the given position:
    /// bars before `current` are full, bars after it are empty, and the
    /// current bar runs unless `paused`. A bar that just became current
    /// starts over from zero. A lone slide never runs its bar.
    pub fn sync(&mut self, current: usize, paused: bool, now: Instant) {
        let single = self.timers.len() == 1;
        for (index, timer) in self.timers.iter_mut().enumerate() {
            match index.cmp(&current) {
                Ordering::Less => timer.fill(),
                Ordering::Greater => timer.reset(),
                Ordering::Equal if single => timer.reset(),
                Ordering::Equal => {
                    if self.active != Some(index) {
                        log_debug!("bar {index} becomes active");
                        timer.start(self.duration_ms, now);
                    }
                    if paused {
                        timer.pause(now);
                    } else {
                        timer.resume(now);
                    }
                }
            }
        }
        self.active = Some(current);
    }

    /// Polls the current bar; true when it has just run out.
    pub fn poll(&mut self, current: usize, now: Instant) -> bool {
        self.timers
            .get_mut(current)
            .map(|timer| timer.poll(now))
            .unwrap_or(false)
    }

    pub fn fractions(&self, now: Instant) -> Vec<f64> {
        self.timers.iter().map(|timer| timer.fraction(now)).collect()
    }

    pub fn deadline(&self, current: usize, now: Instant) -> Option<Instant> {
        self.timers.get(current).and_then(|timer| timer.deadline(now))
    }

    pub fn status(&self, index: usize) -> Option<TimerStatus> {
        self.timers.get(index).map(|timer| timer.status)
    }

    /// Drops every running countdown.
    pub fn stop_all(&mut self) {
        for timer in &mut self.timers {
            if matches!(timer.status, TimerStatus::Running | TimerStatus::Paused) {
                timer.reset();
            }
        }
        self.active = None;
    }
}
