use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use log::info;

use crate::metrics::{MetricSet, QueryWindow};

use super::{EntitlementSource, HealthSource, Offering};

/// Reads one `MetricSet` from a JSON file, whatever the window.
pub struct FileHealthSource {
    path: PathBuf,
}

impl FileHealthSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl HealthSource for FileHealthSource {
    fn authenticate(&mut self) -> Result<bool> {
        Ok(self.path.exists())
    }

    fn fetch_metrics(&mut self, window: &QueryWindow) -> Result<Option<MetricSet>> {
        info!(
            "Reading metrics for {} .. {} from {}",
            window.start,
            window.end,
            self.path.display()
        );
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read metrics from {}", self.path.display()))?;
        let metrics = serde_json::from_str(&contents)
            .with_context(|| format!("malformed metrics in {}", self.path.display()))?;
        Ok(Some(metrics))
    }
}

/// Entitlement fixed at startup; purchases always succeed.
///
/// `owned` stands in for the store's purchase history: a restore brings
/// back whatever was bought, even after the entitlement was dropped.
pub struct LocalEntitlements {
    entitled: bool,
    owned: bool,
}

impl LocalEntitlements {
    pub fn new(entitled: bool) -> Self {
        Self {
            entitled,
            owned: entitled,
        }
    }

    /// A previously bought subscription that is not active on this device yet.
    pub fn with_purchase_history(mut self) -> Self {
        self.owned = true;
        self
    }
}

impl EntitlementSource for LocalEntitlements {
    fn is_entitled(&self) -> bool {
        self.entitled
    }

    fn list_offerings(&self) -> Result<Vec<Offering>> {
        Ok(vec![Offering {
            id: "health_wrapped_yearly".into(),
            title: "Health Wrapped Pro".into(),
            price: "local".into(),
        }])
    }

    fn purchase(&mut self, _offering: &Offering) -> Result<bool> {
        self.entitled = true;
        self.owned = true;
        Ok(true)
    }

    fn restore_purchases(&mut self) -> Result<bool> {
        self.entitled = self.owned;
        Ok(self.entitled)
    }
}
