use serde::Serialize;
use std::cmp;
use tokio::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
    Completed,
}

impl Default for TimerStatus {
    fn default() -> Self {
        TimerStatus::Idle
    }
}

/// Countdown behind one progress bar.
///
/// Elapsed time is an accumulated baseline plus the window since
/// `running_anchor`. Pausing folds the open window into the baseline, so a
/// resume only runs the remaining `duration * (1 - fraction)`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressTimer {
    pub status: TimerStatus,
    pub duration_ms: u64,
    pub elapsed_ms: u64,
    #[serde(skip)]
    elapsed_ms_baseline: u64,
    #[serde(skip)]
    running_anchor: Option<Instant>,
}

impl Default for ProgressTimer {
    fn default() -> Self {
        Self {
            status: TimerStatus::Idle,
            duration_ms: 0,
            elapsed_ms: 0,
            elapsed_ms_baseline: 0,
            running_anchor: None,
        }
    }
}

impl ProgressTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from zero, discarding any earlier progress.
    pub fn start(&mut self, duration_ms: u64, now: Instant) {
        *self = Self {
            status: TimerStatus::Running,
            duration_ms,
            elapsed_ms: 0,
            elapsed_ms_baseline: 0,
            running_anchor: Some(now),
        };
    }

    pub fn pause(&mut self, now: Instant) {
        if self.status != TimerStatus::Running {
            return;
        }
        self.sync_elapsed(now);
        self.elapsed_ms_baseline = self.elapsed_ms;
        self.running_anchor = None;
        self.status = TimerStatus::Paused;
    }

    pub fn resume(&mut self, now: Instant) {
        if self.status != TimerStatus::Paused {
            return;
        }
        self.running_anchor = Some(now);
        self.status = TimerStatus::Running;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Marks the bar full without reporting a completion.
    pub fn fill(&mut self) {
        self.elapsed_ms = self.duration_ms;
        self.elapsed_ms_baseline = self.duration_ms;
        self.running_anchor = None;
        self.status = TimerStatus::Completed;
    }

    pub fn elapsed_ms(&self, now: Instant) -> u64 {
        match (self.status, self.running_anchor) {
            (TimerStatus::Running, Some(anchor)) => {
                let window = now.saturating_duration_since(anchor).as_millis() as u64;
                cmp::min(
                    self.elapsed_ms_baseline.saturating_add(window),
                    self.duration_ms,
                )
            }
            _ => self.elapsed_ms,
        }
    }

    pub fn remaining_ms(&self, now: Instant) -> u64 {
        self.duration_ms.saturating_sub(self.elapsed_ms(now))
    }

    /// Bar fill in `0.0..=1.0`.
    pub fn fraction(&self, now: Instant) -> f64 {
        if self.status == TimerStatus::Completed {
            return 1.0;
        }
        if self.duration_ms == 0 {
            return 0.0;
        }
        self.elapsed_ms(now) as f64 / self.duration_ms as f64
    }

    /// When a running timer will complete.
    pub fn deadline(&self, now: Instant) -> Option<Instant> {
        (self.status == TimerStatus::Running)
            .then(|| now + Duration::from_millis(self.remaining_ms(now)))
    }

    /// Returns true exactly once, on the poll that observes the countdown
    /// reaching its duration while running.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.status != TimerStatus::Running {
            return false;
        }
        self.sync_elapsed(now);
        if self.elapsed_ms < self.duration_ms {
            return false;
        }
        self.fill();
        true
    }

    fn sync_elapsed(&mut self, now: Instant) {
        if let (TimerStatus::Running, Some(_)) = (self.status, self.running_anchor) {
            self.elapsed_ms = self.elapsed_ms(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const D: u64 = 5_000;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn completes_exactly_once_after_full_duration() {
        let t0 = Instant::now();
        let mut timer = ProgressTimer::new();
        timer.start(D, t0);

        assert!(!timer.poll(t0 + ms(D - 1)));
        assert!(timer.poll(t0 + ms(D)));
        assert!(!timer.poll(t0 + ms(D + 1)));
        assert!(!timer.poll(t0 + ms(10 * D)));
        assert_eq!(timer.status, TimerStatus::Completed);
        assert_eq!(timer.fraction(t0 + ms(10 * D)), 1.0);
    }

    #[test]
    fn pause_freezes_and_resume_runs_only_the_remainder() {
        let t0 = Instant::now();
        let mut timer = ProgressTimer::new();
        timer.start(D, t0);

        timer.pause(t0 + ms(2_000));
        assert_eq!(timer.fraction(t0 + ms(60_000)), 0.4);
        assert!(!timer.poll(t0 + ms(60_000)));

        let resumed_at = t0 + ms(60_000);
        timer.resume(resumed_at);
        assert_eq!(timer.remaining_ms(resumed_at), 3_000);
        assert!(!timer.poll(resumed_at + ms(2_999)));
        assert!(timer.poll(resumed_at + ms(3_000)));
    }

    #[test]
    fn repeated_pauses_accumulate() {
        let t0 = Instant::now();
        let mut timer = ProgressTimer::new();
        timer.start(D, t0);
        timer.pause(t0 + ms(1_000));
        timer.resume(t0 + ms(1_500));
        timer.pause(t0 + ms(2_500));
        assert_eq!(timer.elapsed_ms(t0 + ms(9_000)), 2_000);
        timer.resume(t0 + ms(9_000));
        assert_eq!(timer.deadline(t0 + ms(9_000)), Some(t0 + ms(12_000)));
    }

    #[test]
    fn reset_clears_completion() {
        let t0 = Instant::now();
        let mut timer = ProgressTimer::new();
        timer.start(D, t0);
        assert!(timer.poll(t0 + ms(D)));
        timer.reset();
        assert_eq!(timer.status, TimerStatus::Idle);
        assert_eq!(timer.fraction(t0), 0.0);

        timer.start(D, t0 + ms(D));
        assert!(timer.poll(t0 + ms(2 * D)));
    }

    #[test]
    fn fill_never_reports_completion() {
        let t0 = Instant::now();
        let mut timer = ProgressTimer::new();
        timer.start(D, t0);
        timer.fill();
        assert!(!timer.poll(t0 + ms(D)));
        assert_eq!(timer.fraction(t0), 1.0);
    }

    #[test]
    fn resume_without_pause_is_ignored() {
        let t0 = Instant::now();
        let mut timer = ProgressTimer::new();
        timer.resume(t0);
        assert_eq!(timer.status, TimerStatus::Idle);
        assert!(!timer.poll(t0 + ms(D)));
    }
}
