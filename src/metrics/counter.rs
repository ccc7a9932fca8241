//! # Counter metric
//!
//! A monotonically increasing count per ping.

use super::recording_core;
use crate::error_recording::{record_error, test_get_num_recorded_errors, ErrorType};
use crate::meta::CommonMetricData;
use crate::storage::StoredValue;

pub struct CounterMetric {
    meta: CommonMetricData,
}

impl CounterMetric {
    pub fn new(meta: CommonMetricData) -> Self {
        Self { meta }
    }

    /// Increase the counter by `amount`
    ///
    /// Negative amounts are rejected outright and counted as an
    /// `invalid_value` error. The stored value saturates at `i32::MAX`.
    pub fn add(&self, amount: i32) {
        let Some(core) = recording_core(&self.meta) else {
            return;
        };
        let meta = self.meta.clone();
        core.dispatch(move |storage| {
            if amount < 0 {
                record_error(
                    storage,
                    &meta,
                    ErrorType::InvalidValue,
                    format!("added negative value {amount}"),
                );
                return;
            }
            storage.add_counter(&meta, amount);
        });
    }

    /// Returns the stored value, for testing purposes only
    ///
    /// Waits for all pending recordings to apply first. `ping_name` defaults
    /// to the first ping the metric is sent in.
    pub fn test_get_value(&self, ping_name: Option<&str>) -> Option<i32> {
        let core = crate::core::global()?;
        let ping = ping_name.or_else(|| self.meta.default_ping())?.to_owned();
        let id = self.meta.identifier();
        core.execute(move |storage| match storage.get(&ping, &id) {
            Some(StoredValue::Counter(value)) => Some(*value),
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
