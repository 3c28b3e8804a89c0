use std::fs;

use chrono::NaiveDate;
use health_wrapped_lib::{
    health::{FileHealthSource, LocalEntitlements, WrappedSession},
    metrics::{MetricSet, Period},
    slideshow::{SlideshowConfig, SlideshowController, SlideshowEvent, SlideshowHandle},
};
use tokio::{
    sync::broadcast,
    time::{self, Duration, Instant},
};

const WIDTH: f64 = 390.0;

fn quiet_config() -> SlideshowConfig {
    SlideshowConfig {
        tick_interval_ms: 0,
        ..SlideshowConfig::default()
    }
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

fn mount() -> (SlideshowHandle, broadcast::Receiver<SlideshowEvent>) {
    let controller =
        SlideshowController::from_metrics(metrics(), Period::year(2024), quiet_config(), Instant::now());
    let handle = SlideshowHandle::mount(controller);
    let events = handle.subscribe();
    (handle, events)
}

async fn next_event(events: &mut broadcast::Receiver<SlideshowEvent>) -> SlideshowEvent {
    loop {
        match events.recv().await {
            Ok(SlideshowEvent::Progress { .. }) => continue,
            Ok(event) => return event,
            Err(broadcast::error::RecvError::Lagged(_)) => continue,
            Err(err) => panic!("event stream ended: {err}"),
        }
    }
}

#[tokio::test(start_paused = true)]
async fn slide_advances_when_its_bar_runs_out() {
    let started = Instant::now();
    let (handle, mut events) = mount();

    let event = next_event(&mut events).await;
    assert_eq!(
        event,
        SlideshowEvent::SlideChanged {
            index: 1,
            slide_id: "calories"
        }
    );
    let waited = started.elapsed();
    assert!(waited >= Duration::from_millis(5_000), "advanced after {waited:?}");
    assert!(waited < Duration::from_millis(5_100), "advanced after {waited:?}");

    handle.unmount().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn plays_through_to_the_summary_and_stops() {
    let (handle, mut events) = mount();

    let mut visited = Vec::new();
    loop {
        match next_event(&mut events).await {
            SlideshowEvent::SlideChanged { slide_id, .. } => visited.push(slide_id),
            SlideshowEvent::Finished => break,
            other => panic!("unexpected event {other:?}"),
        }
    }
    assert_eq!(visited, vec!["calories", "sleep", "exercise", "summary"]);

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.current_index, 4);
    assert!(snapshot.slide.is_summary());
    assert_eq!(snapshot.header, "YOUR 2024 HEALTH");

    // Stays on the summary; nothing wraps around.
    time::sleep(Duration::from_secs(30)).await;
    assert_eq!(handle.snapshot().await.unwrap().current_index, 4);

    handle.close().unwrap();
    assert_eq!(next_event(&mut events).await, SlideshowEvent::Closed);
    handle.unmount().await.unwrap();
    assert!(!handle.is_mounted());
}

#[tokio::test(start_paused = true)]
async fn pause_freezes_progress_until_resumed() {
    let (handle, mut events) = mount();

    time::sleep(Duration::from_millis(2_000)).await;
    handle.set_paused(true).unwrap();
    assert_eq!(next_event(&mut events).await, SlideshowEvent::Paused { index: 0 });

    time::sleep(Duration::from_secs(60)).await;
    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.current_index, 0);
    assert!(snapshot.is_paused);
    assert!((snapshot.progress[0] - 0.4).abs() < 0.01);

    let resumed_at = Instant::now();
    handle.set_paused(false).unwrap();
    assert_eq!(next_event(&mut events).await, SlideshowEvent::Resumed { index: 0 });
    assert!(matches!(
        next_event(&mut events).await,
        SlideshowEvent::SlideChanged { index: 1, .. }
    ));
    let remaining = resumed_at.elapsed();
    assert!(remaining >= Duration::from_millis(3_000), "advanced after {remaining:?}");
    assert!(remaining < Duration::from_millis(3_100), "advanced after {remaining:?}");

    handle.unmount().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn hold_pauses_and_quick_press_navigates() {
    let (handle, mut events) = mount();

    handle.press_in().unwrap();
    assert_eq!(next_event(&mut events).await, SlideshowEvent::Paused { index: 0 });
    time::sleep(Duration::from_millis(1_000)).await;
    handle.press_out(WIDTH - 10.0, WIDTH).unwrap();
    assert_eq!(next_event(&mut events).await, SlideshowEvent::Resumed { index: 0 });
    assert_eq!(handle.snapshot().await.unwrap().current_index, 0);

    handle.press_in().unwrap();
    handle.press_out(WIDTH - 10.0, WIDTH).unwrap();
    assert_eq!(next_event(&mut events).await, SlideshowEvent::Paused { index: 0 });
    assert_eq!(next_event(&mut events).await, SlideshowEvent::Resumed { index: 0 });
    assert_eq!(
        next_event(&mut events).await,
        SlideshowEvent::SlideChanged {
            index: 1,
            slide_id: "calories"
        }
    );

    handle.handle_tap(10.0, WIDTH).unwrap();
    assert_eq!(
        next_event(&mut events).await,
        SlideshowEvent::SlideChanged {
            index: 0,
            slide_id: "steps"
        }
    );

    handle.unmount().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn unmounted_slideshow_rejects_input() {
    let (handle, mut events) = mount();
    handle.unmount().await.unwrap();

    assert!(handle.advance().is_err());
    assert!(handle.snapshot().await.is_err());

    // No countdown survives the unmount.
    time::sleep(Duration::from_secs(30)).await;
    assert!(matches!(
        events.try_recv(),
        Err(broadcast::error::TryRecvError::Closed | broadcast::error::TryRecvError::Empty)
    ));
}

#[tokio::test(start_paused = true)]
async fn progress_events_follow_the_active_bar() {
    let controller = SlideshowController::from_metrics(
        metrics(),
        Period::year(2024),
        SlideshowConfig {
            tick_interval_ms: 1_000,
            ..SlideshowConfig::default()
        },
        Instant::now(),
    );
    let handle = SlideshowHandle::mount(controller);
    let mut events = handle.subscribe();

    let mut fractions = Vec::new();
    while fractions.len() < 3 {
        if let Ok(SlideshowEvent::Progress { index, fraction }) = events.recv().await {
            assert_eq!(index, 0);
            fractions.push(fraction);
        }
    }
    assert!(fractions.windows(2).all(|pair| pair[0] <= pair[1]));
    assert!(fractions.iter().all(|fraction| (0.0..=1.0).contains(fraction)));

    handle.unmount().await.unwrap();
}

#[test]
fn session_builds_slides_from_a_metrics_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("metrics.json");
    fs::write(
        &path,
        r#"{"steps": 0, "swimDistance": 1500, "calories": 0, "sleep": 0, "flights": 20, "exercise": 0}"#,
    )
    .unwrap();

    let now = NaiveDate::from_ymd_opt(2025, 3, 10)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    let mut session =
        WrappedSession::new(FileHealthSource::new(path), LocalEntitlements::new(false), now);
    let outcome = session.authenticate(now);
    assert!(outcome.authorized);
    assert!(outcome.advisory.is_some());

    let controller = session.start_slideshow(SlideshowConfig::default(), Instant::now());
    let ids: Vec<_> = controller.slides().iter().map(|slide| slide.id()).collect();
    assert_eq!(ids, vec!["swim", "flights", "summary"]);
    assert_eq!(controller.header(), "YOUR 2025 HEALTH");
}
