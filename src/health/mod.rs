//! Seams to the platform: the health store, the subscription service and
//! local key-value storage. The slideshow never talks to these directly;
//! `WrappedSession` gathers what it needs and hands it over at mount time.

pub mod local;
pub mod session;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::metrics::{MetricSet, QueryWindow};

pub use local::{FileHealthSource, LocalEntitlements};
pub use session::{
    Advisory, AuthOutcome, WrappedSession, NOTHING_TO_RESTORE_MESSAGE, PRO_REQUIRED_MESSAGE,
    RESTORED_MESSAGE,
};

/// Key of the flag recording that onboarding already ran.
pub const FIRST_RUN_KEY: &str = "hasLaunched";

pub trait HealthSource {
    /// Requests read access; `Ok(false)` means the user declined.
    fn authenticate(&mut self) -> Result<bool>;

    /// `Ok(None)` when the store had nothing to say for the window.
    fn fetch_metrics(&mut self, window: &QueryWindow) -> Result<Option<MetricSet>>;
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Offering {
    pub id: String,
    pub title: String,
    pub price: String,
}

pub trait EntitlementSource {
    fn is_entitled(&self) -> bool;
    fn list_offerings(&self) -> Result<Vec<Offering>>;
    fn purchase(&mut self, offering: &Offering) -> Result<bool>;

    /// Re-checks past purchases with the store. `Ok(true)` when an active
    /// subscription came back.
    fn restore_purchases(&mut self) -> Result<bool>;
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&self, key: &str, value: Value) -> Result<()>;
}

pub fn is_first_run(store: &dyn KeyValueStore) -> bool {
    !matches!(store.get(FIRST_RUN_KEY), Some(Value::Bool(true)))
}

pub fn mark_launched(store: &dyn KeyValueStore) -> Result<()> {
    store.set(FIRST_RUN_KEY, Value::Bool(true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, collections::HashMap};

    #[derive(Default)]
    struct MemoryStore(RefCell<HashMap<String, Value>>);

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Option<Value> {
            self.0.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: Value) -> Result<()> {
            self.0.borrow_mut().insert(key.to_string(), value);
            Ok(())
        }
    }

    #[test]
    fn first_run_flag_flips_once_marked() {
        let store = MemoryStore::default();
        assert!(is_first_run(&store));
        mark_launched(&store).unwrap();
        assert!(!is_first_run(&store));
    }

    #[test]
    fn unexpected_flag_value_counts_as_first_run() {
        let store = MemoryStore::default();
        store.set(FIRST_RUN_KEY, Value::String("yes".into())).unwrap();
        assert!(is_first_run(&store));
    }
}
