//! # Event metric
//!
//! Records that something happened, with an optional set of key-value extras.
//! Events accumulate per ping in insertion order.
//!
//! Extras are validated against the allow-list the metric was registered
//! with, best-effort: unknown keys are dropped (`invalid_label`), overlong
//! values are truncated (`invalid_overflow`), and the event is recorded with
//! whatever survived. An event recording never fails outright over its
//! extras.

use std::collections::BTreeMap;

use super::recording_core;
use crate::error_recording::{record_error, test_get_num_recorded_errors, ErrorType};
use crate::meta::CommonMetricData;
use crate::storage::{RecordedEvent, StoredValue};
use crate::validation::{truncate_string_at_boundary, MAX_EXTRA_VALUE_BYTES};

pub struct EventMetric {
    meta: CommonMetricData,
    allowed_extra_keys: Vec<String>,
}

impl EventMetric {
    pub fn new(meta: CommonMetricData, allowed_extra_keys: Vec<String>) -> Self {
        Self {
            meta,
            allowed_extra_keys,
        }
    }

    /// Record an event
    ///
    /// `extras` is any iterable of key-value pairs; pass `None` to record
    /// without extras. Keys must be in the allow-list the metric was
    /// registered with and values are capped at 100 bytes.
    pub fn record<I>(&self, extras: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let Some(core) = recording_core(&self.meta) else {
            return;
        };
        // Marshal before crossing into the queue
        let extras: Vec<(String, String)> = extras.into_iter().collect();
        let timestamp = core.timestamp();
        let meta = self.meta.clone();
        let allowed = self.allowed_extra_keys.clone();

        core.dispatch(move |storage| {
            let mut extra = BTreeMap::new();
            for (key, value) in extras {
                if !allowed.contains(&key) {
                    record_error(
                        storage,
                        &meta,
                        ErrorType::InvalidLabel,
                        format!("unknown extra key {key:?}"),
                    );
                    continue;
                }
                let value = if value.len() > MAX_EXTRA_VALUE_BYTES {
                    record_error(
                        storage,
                        &meta,
                        ErrorType::InvalidOverflow,
                        format!(
                            "extra value for {key:?} is {} bytes, truncating",
                            value.len()
                        ),
                    );
                    truncate_string_at_boundary(value, MAX_EXTRA_VALUE_BYTES)
                } else {
                    value
                };
                extra.insert(key, value);
            }

            let event = RecordedEvent {
                timestamp,
                category: meta.category.clone(),
                name: meta.name.clone(),
                extra,
            };
            storage.add_event(&meta, event);
        });
    }

    /// Returns the recorded events in insertion order, for testing purposes
    /// only
    ///
    /// Waits for all pending recordings to apply first. `ping_name` defaults
    /// to the first ping the metric is sent in.
    pub fn test_get_value(&self, ping_name: Option<&str>) -> Option<Vec<RecordedEvent>> {
        let core = crate::core::global()?;
        let ping = ping_name.or_else(|| self.meta.default_ping())?.to_owned();
        let id = self.meta.identifier();
        core.execute(move |storage| match storage.get(&ping, &id) {
            Some(StoredValue::Events(events)) if !events.is_empty() => Some(events.clone()),
            _ => None,
        })
        .flatten()
    }

    /// Returns the number of errors recorded for this metric, for testing
    /// purposes only
    pub fn test_get_num_recorded_errors(&self, error: ErrorType, ping_name: Option<&str>) -> i32 {
        test_get_num_recorded_errors(&self.meta, error, ping_name)
    }
}
