//! Story-style health recap engine.
//!
//! A `MetricSet` for a year or month becomes an ordered list of slides
//! (`slides::build`), which a `SlideshowController` walks through with timed
//! progress bars, tap navigation and press-and-hold pausing. The closing
//! summary card can be rendered to a PNG and shared.

mod cli;
pub mod formatter;
pub mod health;
pub mod metrics;
pub mod settings;
pub mod slides;
pub mod slideshow;
pub mod summary;
pub mod timer;
mod utils;

use anyhow::{bail, Result};
use chrono::Datelike;
use clap::Parser;
use log::{info, warn};
use tokio::{sync::broadcast::error::RecvError, time::Instant};

use formatter::group_thousands;
use health::{FileHealthSource, LocalEntitlements, WrappedSession};
use metrics::Period;
use settings::SettingsStore;
use slides::SlideDescriptor;
use slideshow::{SlideshowEvent, SlideshowHandle, SlideshowSnapshot};
use summary::{share_summary, DirectoryShareTarget, SummaryCard};

pub fn run() -> Result<()> {
    // RUST_LOG still wins over the Info default
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    log::info!("Health Wrapped starting up...");

    let args = cli::Args::parse();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(play(args))
}

async fn play(args: cli::Args) -> Result<()> {
    let settings = SettingsStore::new(args.settings.clone())?;
    if health::is_first_run(&settings) {
        info!("First launch, recording onboarding flag");
        health::mark_launched(&settings)?;
    }

    let now = chrono::Local::now().naive_local();
    let entitlements = if args.restore {
        LocalEntitlements::new(false).with_purchase_history()
    } else {
        LocalEntitlements::new(args.pro)
    };
    let mut session = WrappedSession::new(
        FileHealthSource::new(args.metrics.clone()),
        entitlements,
        now,
    );
    if args.restore {
        session.restore_purchases()?;
    }

    let outcome = session.authenticate(now);
    if !outcome.authorized {
        bail!("health access was not granted for {}", args.metrics.display());
    }
    if let Some(advisory) = outcome.advisory {
        warn!("{}: {}", advisory.title(), advisory.message());
    }

    let year = args.year.unwrap_or_else(|| now.year());
    let years = metrics::selectable_years(now.year());
    if !years.contains(&year) {
        bail!("{year} is not available; pick one of {years:?}");
    }
    let period = match args.month {
        Some(month) => Period::month(year, month - 1)?,
        None => Period::year(year),
    };
    if period != session.period() {
        session.select_period(period, now)?;
    }
    if session.metrics().is_empty() {
        warn!("No metrics recorded for {}, only the summary will show", period.label());
    }

    let controller = session.start_slideshow(settings.slideshow(), Instant::now());
    let card = controller.summary_card();
    let handle = SlideshowHandle::mount(controller);
    let mut events = handle.subscribe();

    let first = handle.snapshot().await?;
    print_slide(&first, &card);

    if first.slide_count > 1 {
        loop {
            match events.recv().await {
                Ok(SlideshowEvent::SlideChanged { .. }) => {
                    print_slide(&handle.snapshot().await?, &card)
                }
                Ok(SlideshowEvent::Finished | SlideshowEvent::Closed) => break,
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => warn!("Missed {skipped} slideshow events"),
                Err(RecvError::Closed) => break,
            }
        }
    }

    if let Some(dir) = args.share_dir {
        if card.is_empty() {
            warn!("Nothing to share for {}", card.period.label());
        } else {
            share_summary(&DirectoryShareTarget::new(dir), &card);
        }
    }

    if let Err(err) = handle.close() {
        warn!("Slideshow already stopped: {err}");
    }
    handle.unmount().await
}

fn print_slide(snapshot: &SlideshowSnapshot, card: &SummaryCard) {
    println!();
    println!(
        "{}  [{}/{}]",
        snapshot.header,
        snapshot.current_index + 1,
        snapshot.slide_count
    );
    match &snapshot.slide {
        SlideDescriptor::Metric(slide) => {
            println!("{}", slide.title);
            println!("{} {}", group_thousands(slide.value), slide.stat_label);
            println!("\"{}\"", slide.quote);
            println!("{}", slide.bottom_stat);
        }
        SlideDescriptor::Summary => {
            println!("{}", card.header);
            println!("{}", card.title);
            for row in &card.rows {
                println!("  {:<10} {}", row.label, row.value);
            }
            println!("{}", card.footer);
        }
    }
}
