use anyhow::{bail, Result};
use chrono::{Datelike, NaiveDateTime};
use log::{error, info, warn};
use serde::Serialize;
use tokio::time::Instant;

use crate::{
    metrics::{MetricSet, Period},
    slideshow::{SlideshowConfig, SlideshowController},
};

use super::{EntitlementSource, HealthSource, Offering};

pub const PRO_REQUIRED_MESSAGE: &str = "Subscribe to Pro to access historical data.";
pub const RESTORED_MESSAGE: &str = "Purchases restored successfully";
pub const NOTHING_TO_RESTORE_MESSAGE: &str = "No active subscription found to restore";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Advisory {
    /// Access was granted but the current year has no steps at all, which
    /// usually means the step permission is switched off.
    NoHealthData,
}

impl Advisory {
    pub fn title(&self) -> &'static str {
        match self {
            Advisory::NoHealthData => "No Health Data Found",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Advisory::NoHealthData => {
                "We couldn't find any steps data for this year. Please ensure you have granted \
                 'Steps' permission in Health settings.\n\n\
                 Go to Settings > Health > Data Access & Devices > Health Wrapped > Turn On All"
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthOutcome {
    pub authorized: bool,
    pub advisory: Option<Advisory>,
}

/// Holds the selected period and the metrics fetched for it.
///
/// Each fetch replaces the whole `MetricSet`; a failed fetch leaves a zeroed
/// set behind so the slideshow always has something valid to build from.
pub struct WrappedSession<H, E> {
    health: H,
    entitlements: E,
    authorized: bool,
    period: Period,
    metrics: MetricSet,
}

impl<H: HealthSource, E: EntitlementSource> WrappedSession<H, E> {
    pub fn new(health: H, entitlements: E, now: NaiveDateTime) -> Self {
        Self {
            health,
            entitlements,
            authorized: false,
            period: Period::year(now.year()),
            metrics: MetricSet::zero(),
        }
    }

    pub fn authorized(&self) -> bool {
        self.authorized
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn metrics(&self) -> &MetricSet {
        &self.metrics
    }

    pub fn is_entitled(&self) -> bool {
        self.entitlements.is_entitled()
    }

    /// Asks for health access and, once granted, loads the current year.
    pub fn authenticate(&mut self, now: NaiveDateTime) -> AuthOutcome {
        self.authorized = match self.health.authenticate() {
            Ok(granted) => granted,
            Err(err) => {
                error!("Error requesting health authorization: {err:#}");
                false
            }
        };

        if !self.authorized {
            return AuthOutcome {
                authorized: false,
                advisory: None,
            };
        }

        let fetched = self.load(Period::year(now.year()), now);
        let advisory = match fetched {
            Some(metrics) if metrics.steps == 0.0 => Some(Advisory::NoHealthData),
            _ => None,
        };

        AuthOutcome {
            authorized: true,
            advisory,
        }
    }

    /// Periods outside the current year need the subscription.
    pub fn is_selectable(&self, period: Period, now: NaiveDateTime) -> bool {
        period.year == now.year() || self.entitlements.is_entitled()
    }

    pub fn select_period(&mut self, period: Period, now: NaiveDateTime) -> Result<Option<MetricSet>> {
        if !self.is_selectable(period, now) {
            bail!(PRO_REQUIRED_MESSAGE);
        }
        Ok(self.load(period, now))
    }

    /// Fetches `period` and swaps it in. Returns what the store produced,
    /// `None` on failure.
    pub fn load(&mut self, period: Period, now: NaiveDateTime) -> Option<MetricSet> {
        let fetched = match period.query_window(now) {
            Ok(window) => match self.health.fetch_metrics(&window) {
                Ok(Some(metrics)) => Some(metrics.sanitized()),
                Ok(None) => {
                    warn!("Health store returned no data for {}", period.label());
                    None
                }
                Err(err) => {
                    error!("Error fetching health data for {}: {err:#}", period.label());
                    None
                }
            },
            Err(err) => {
                error!("Invalid period {}: {err:#}", period.label());
                None
            }
        };

        self.metrics = fetched.unwrap_or_default();
        self.period = period;
        info!("Loaded metrics for {}", period.label());
        fetched
    }

    pub fn list_offerings(&self) -> Result<Vec<Offering>> {
        self.entitlements.list_offerings()
    }

    pub fn purchase(&mut self, offering: &Offering) -> Result<bool> {
        let purchased = self.entitlements.purchase(offering)?;
        info!("Purchase of {} finished: {purchased}", offering.id);
        Ok(purchased)
    }

    /// Asks the store for earlier purchases. Entitlement follows whatever
    /// the store reports.
    pub fn restore_purchases(&mut self) -> Result<bool> {
        let restored = self.entitlements.restore_purchases()?;
        if restored {
            info!("{RESTORED_MESSAGE}");
        } else {
            warn!("{NOTHING_TO_RESTORE_MESSAGE}");
        }
        Ok(restored)
    }

    /// Mounts a slideshow over a copy of the current metrics and period.
    pub fn start_slideshow(&self, config: SlideshowConfig, now: Instant) -> SlideshowController {
        SlideshowController::from_metrics(self.metrics, self.period, config, now)
    }
}
