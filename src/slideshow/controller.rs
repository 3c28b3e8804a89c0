use anyhow::{bail, Result};
use log::info;
use serde::Serialize;
use tokio::time::Instant;
use uuid::Uuid;

use crate::{
    metrics::{MetricSet, Period},
    slides::{build, SlideDescriptor},
    summary::SummaryCard,
    timer::ProgressBank,
};

use super::{
    input::{PressKind, PressTracker, TapZone},
    SlideshowConfig,
};

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SlideshowEvent {
    SlideChanged {
        index: usize,
        #[serde(rename = "slideId")]
        slide_id: &'static str,
    },
    Paused {
        index: usize,
    },
    Resumed {
        index: usize,
    },
    Progress {
        index: usize,
        fraction: f64,
    },
    /// The last slide's bar ran out; the slideshow stays on it.
    Finished,
    Closed,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideshowSnapshot {
    pub id: Uuid,
    pub header: String,
    pub current_index: usize,
    pub slide_count: usize,
    pub is_paused: bool,
    pub is_holding: bool,
    pub closed: bool,
    pub progress: Vec<f64>,
    pub slide: SlideDescriptor,
    pub counter_value: Option<u64>,
}

/// Owns the slide position and drives the progress bars.
///
/// Every method takes the current instant, so the controller is a plain
/// state machine; `SlideshowHandle` supplies real time.
#[derive(Debug)]
pub struct SlideshowController {
    id: Uuid,
    slides: Vec<SlideDescriptor>,
    metrics: MetricSet,
    period: Period,
    config: SlideshowConfig,
    current_index: usize,
    is_paused: bool,
    closed: bool,
    bars: ProgressBank,
    press: PressTracker,
    slide_shown_at: Instant,
}

impl SlideshowController {
    pub fn new(
        slides: Vec<SlideDescriptor>,
        metrics: MetricSet,
        period: Period,
        config: SlideshowConfig,
        now: Instant,
    ) -> Result<Self> {
        if slides.is_empty() {
            bail!("a slideshow needs at least one slide");
        }
        Ok(Self::assemble(slides, metrics, period, config, now))
    }

    /// Builds the slide list from `metrics` and mounts it.
    pub fn from_metrics(
        metrics: MetricSet,
        period: Period,
        config: SlideshowConfig,
        now: Instant,
    ) -> Self {
        let metrics = metrics.sanitized();
        let slides = build(&metrics, period.is_month());
        Self::assemble(slides, metrics, period, config, now)
    }

    fn assemble(
        slides: Vec<SlideDescriptor>,
        metrics: MetricSet,
        period: Period,
        config: SlideshowConfig,
        now: Instant,
    ) -> Self {
        let mut controller = Self {
            id: Uuid::new_v4(),
            bars: ProgressBank::new(slides.len(), config.slide_duration_ms),
            press: PressTracker::new(config.hold_threshold_ms),
            slides,
            metrics,
            period,
            config,
            current_index: 0,
            is_paused: false,
            closed: false,
            slide_shown_at: now,
        };
        controller.bars.sync(0, false, now);
        info!(
            "Slideshow {} mounted with {} slides for {}",
            controller.id,
            controller.slides.len(),
            controller.period.label()
        );
        controller
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &SlideshowConfig {
        &self.config
    }

    pub fn slides(&self) -> &[SlideDescriptor] {
        &self.slides
    }

    pub fn metrics(&self) -> &MetricSet {
        &self.metrics
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_slide(&self) -> &SlideDescriptor {
        &self.slides[self.current_index]
    }

    pub fn last_index(&self) -> usize {
        self.slides.len() - 1
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn header(&self) -> String {
        format!("YOUR {} HEALTH", self.period.label())
    }

    pub fn summary_card(&self) -> SummaryCard {
        SummaryCard::new(&self.metrics, self.period)
    }

    pub fn advance(&mut self, now: Instant) -> Option<SlideshowEvent> {
        if self.closed || self.current_index >= self.last_index() {
            return None;
        }
        self.current_index += 1;
        Some(self.on_index_changed(now))
    }

    pub fn retreat(&mut self, now: Instant) -> Option<SlideshowEvent> {
        if self.closed || self.current_index == 0 {
            return None;
        }
        self.current_index -= 1;
        Some(self.on_index_changed(now))
    }

    pub fn handle_tap(&mut self, x: f64, screen_width: f64, now: Instant) -> Option<SlideshowEvent> {
        match TapZone::from_position(x, screen_width) {
            TapZone::Back => self.retreat(now),
            TapZone::Forward => self.advance(now),
        }
    }

    pub fn set_paused(&mut self, paused: bool, now: Instant) -> Option<SlideshowEvent> {
        if self.closed || self.is_paused == paused {
            return None;
        }
        self.is_paused = paused;
        self.bars.sync(self.current_index, paused, now);
        let index = self.current_index;
        Some(if paused {
            SlideshowEvent::Paused { index }
        } else {
            SlideshowEvent::Resumed { index }
        })
    }

    /// Finger down: progress freezes right away.
    pub fn press_in(&mut self, now: Instant) -> Option<SlideshowEvent> {
        if self.closed {
            return None;
        }
        self.press.press(now);
        self.set_paused(true, now)
    }

    /// Finger up: progress resumes, and a press shorter than the hold
    /// threshold also navigates like a tap.
    pub fn press_out(&mut self, x: f64, screen_width: f64, now: Instant) -> Vec<SlideshowEvent> {
        if self.closed {
            return Vec::new();
        }
        let kind = self.press.release(now);
        let mut events: Vec<SlideshowEvent> = self.set_paused(false, now).into_iter().collect();
        if kind == Some(PressKind::Tap) {
            events.extend(self.handle_tap(x, screen_width, now));
        }
        events
    }

    /// Checks the active bar; advances when it has just run out.
    pub fn tick(&mut self, now: Instant) -> Option<SlideshowEvent> {
        if self.closed || !self.bars.poll(self.current_index, now) {
            return None;
        }
        if self.current_index < self.last_index() {
            self.advance(now)
        } else {
            Some(SlideshowEvent::Finished)
        }
    }

    /// Leaves the slideshow. Nothing is persisted and every countdown stops.
    pub fn close(&mut self) -> Option<SlideshowEvent> {
        if self.closed {
            return None;
        }
        self.closed = true;
        self.bars.stop_all();
        self.press.cancel();
        info!("Slideshow {} closed on slide {}", self.id, self.current_index);
        Some(SlideshowEvent::Closed)
    }

    /// Swaps in a new slide list and starts again from the first slide.
    pub fn replace_slides(
        &mut self,
        slides: Vec<SlideDescriptor>,
        metrics: MetricSet,
        now: Instant,
    ) -> Result<()> {
        if slides.is_empty() {
            bail!("a slideshow needs at least one slide");
        }
        self.bars.rebuild(slides.len());
        self.slides = slides;
        self.metrics = metrics;
        self.current_index = 0;
        self.is_paused = false;
        self.press.cancel();
        self.on_index_changed(now);
        Ok(())
    }

    pub fn progress(&self, now: Instant) -> Vec<f64> {
        self.bars.fractions(now)
    }

    /// When the active bar will run out, if it is running.
    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        if self.closed {
            return None;
        }
        self.bars.deadline(self.current_index, now)
    }

    /// Count-up value for the current metric slide.
    pub fn counter_value(&self, now: Instant) -> Option<u64> {
        let elapsed = now.saturating_duration_since(self.slide_shown_at).as_millis() as u64;
        self.current_slide()
            .as_metric()
            .map(|slide| slide.counter_value(elapsed))
    }

    pub fn snapshot(&self, now: Instant) -> SlideshowSnapshot {
        SlideshowSnapshot {
            id: self.id,
            header: self.header(),
            current_index: self.current_index,
            slide_count: self.slides.len(),
            is_paused: self.is_paused,
            is_holding: self.press.is_holding(now),
            closed: self.closed,
            progress: self.progress(now),
            slide: self.current_slide().clone(),
            counter_value: self.counter_value(now),
        }
    }

    fn on_index_changed(&mut self, now: Instant) -> SlideshowEvent {
        self.slide_shown_at = now;
        self.bars.sync(self.current_index, self.is_paused, now);
        SlideshowEvent::SlideChanged {
            index: self.current_index,
            slide_id: self.current_slide().id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Duration;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn metrics() -> MetricSet {
        MetricSet {
            steps: 1_200_000.0,
            swim_distance: 0.0,
            calories: 50_000.0,
            sleep: 400.0,
            flights: 0.0,
            exercise: 300.0,
        }
    }

    fn controller(now: Instant) -> SlideshowController {
        SlideshowController::from_metrics(
            metrics(),
            Period::year(2024),
            SlideshowConfig::default(),
            now,
        )
    }

    #[test]
    fn retreat_at_first_slide_is_a_no_op() {
        let t0 = Instant::now();
        let mut c = controller(t0);
        assert_eq!(c.retreat(t0), None);
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn advance_at_last_slide_does_not_wrap() {
        let t0 = Instant::now();
        let mut c = controller(t0);
        for _ in 0..10 {
            c.advance(t0);
        }
        assert_eq!(c.current_index(), c.last_index());
        assert!(c.current_slide().is_summary());
        assert_eq!(c.advance(t0), None);
        assert!(!c.is_closed());
    }

    #[test]
    fn tap_left_third_goes_back_rest_goes_forward() {
        let t0 = Instant::now();
        let mut c = controller(t0);
        let width = 390.0;

        c.handle_tap(width / 3.0 + 1.0, width, t0);
        assert_eq!(c.current_index(), 1);
        c.handle_tap(width / 3.0 - 1.0, width, t0);
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn bar_running_out_advances() {
        let t0 = Instant::now();
        let mut c = controller(t0);
        assert_eq!(c.tick(t0 + ms(4_999)), None);
        assert_eq!(
            c.tick(t0 + ms(5_000)),
            Some(SlideshowEvent::SlideChanged {
                index: 1,
                slide_id: "calories"
            })
        );
        assert_eq!(c.progress(t0 + ms(5_000)), vec![1.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn last_slide_finishes_once_without_wrapping() {
        let t0 = Instant::now();
        let mut c = controller(t0);
        let mut now = t0;
        for _ in 0..c.last_index() {
            now += ms(5_000);
            assert!(matches!(c.tick(now), Some(SlideshowEvent::SlideChanged { .. })));
        }
        now += ms(5_000);
        assert_eq!(c.tick(now), Some(SlideshowEvent::Finished));
        assert_eq!(c.tick(now + ms(5_000)), None);
        assert_eq!(c.current_index(), c.last_index());
    }

    #[test]
    fn pause_keeps_progress_and_resume_runs_the_rest() {
        let t0 = Instant::now();
        let mut c = controller(t0);

        assert_eq!(c.set_paused(true, t0 + ms(3_000)), Some(SlideshowEvent::Paused { index: 0 }));
        assert_eq!(c.tick(t0 + ms(20_000)), None);
        assert_eq!(c.progress(t0 + ms(20_000))[0], 0.6);

        c.set_paused(false, t0 + ms(20_000));
        assert_eq!(c.tick(t0 + ms(21_999)), None);
        assert!(c.tick(t0 + ms(22_000)).is_some());
        assert_eq!(c.current_index(), 1);
    }

    #[test]
    fn repeated_pause_requests_are_ignored() {
        let t0 = Instant::now();
        let mut c = controller(t0);
        assert!(c.set_paused(true, t0).is_some());
        assert_eq!(c.set_paused(true, t0), None);
        assert!(c.set_paused(false, t0).is_some());
        assert_eq!(c.set_paused(false, t0), None);
    }

    #[test]
    fn hold_pauses_without_navigating() {
        let t0 = Instant::now();
        let mut c = controller(t0);

        assert_eq!(c.press_in(t0 + ms(1_000)), Some(SlideshowEvent::Paused { index: 0 }));
        assert!(c.snapshot(t0 + ms(1_300)).is_holding);
        let events = c.press_out(300.0, 390.0, t0 + ms(4_000));
        assert_eq!(events, vec![SlideshowEvent::Resumed { index: 0 }]);
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.progress(t0 + ms(4_000))[0], 0.2);
    }

    #[test]
    fn quick_press_acts_as_tap() {
        let t0 = Instant::now();
        let mut c = controller(t0);

        c.press_in(t0);
        let events = c.press_out(300.0, 390.0, t0 + ms(80));
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], SlideshowEvent::Resumed { index: 0 });
        assert_eq!(c.current_index(), 1);
        assert!(!c.is_paused());
    }

    #[test]
    fn retreat_restarts_the_previous_bar() {
        let t0 = Instant::now();
        let mut c = controller(t0);
        c.advance(t0 + ms(1_000));
        c.advance(t0 + ms(2_000));
        c.retreat(t0 + ms(3_000));
        assert_eq!(c.progress(t0 + ms(3_000)), vec![1.0, 0.0, 0.0, 0.0, 0.0]);
        assert!(c.tick(t0 + ms(8_000)).is_some());
        assert_eq!(c.current_index(), 2);
    }

    #[test]
    fn all_zero_metrics_show_only_a_still_summary() {
        let t0 = Instant::now();
        let mut c = SlideshowController::from_metrics(
            MetricSet::zero(),
            Period::year(2024),
            SlideshowConfig::default(),
            t0,
        );
        assert_eq!(c.slides().len(), 1);
        assert!(c.current_slide().is_summary());
        assert_eq!(c.advance(t0), None);
        assert_eq!(c.retreat(t0), None);
        assert_eq!(c.tick(t0 + ms(60_000)), None);
        assert_eq!(c.progress(t0 + ms(60_000)), vec![0.0]);
        assert_eq!(c.next_deadline(t0), None);
    }

    #[test]
    fn close_stops_everything() {
        let t0 = Instant::now();
        let mut c = controller(t0);
        assert_eq!(c.close(), Some(SlideshowEvent::Closed));
        assert_eq!(c.close(), None);
        assert_eq!(c.tick(t0 + ms(5_000)), None);
        assert_eq!(c.advance(t0), None);
        assert_eq!(c.next_deadline(t0), None);
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn empty_slide_list_is_rejected() {
        let result = SlideshowController::new(
            Vec::new(),
            MetricSet::zero(),
            Period::year(2024),
            SlideshowConfig::default(),
            Instant::now(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn replacing_slides_rebuilds_bars() {
        let t0 = Instant::now();
        let mut c = controller(t0);
        c.advance(t0);
        let fresh = MetricSet {
            flights: 12.0,
            ..MetricSet::zero()
        };
        c.replace_slides(build(&fresh, false), fresh, t0).unwrap();
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.progress(t0).len(), 2);
        assert_eq!(c.current_slide().id(), "flights");
    }

    #[test]
    fn snapshot_reports_header_and_counter() {
        let t0 = Instant::now();
        let c = controller(t0);
        let snapshot = c.snapshot(t0 + ms(1_000));
        assert_eq!(snapshot.header, "YOUR 2024 HEALTH");
        assert_eq!(snapshot.slide_count, 5);
        assert_eq!(snapshot.counter_value, Some(600_000));
    }
}
