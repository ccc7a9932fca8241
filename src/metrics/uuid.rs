//! # UUID metric
//!
//! Stores a single UUID per ping, for things like session or client
//! identifiers. Values are normalized to the canonical lowercase hyphenated
//! form before storage.

use uuid::Uuid;

use super::recording_core;
use crate::error_recording::{record_error, test_get_num_recorded_errors, ErrorType};
use crate::meta::CommonMetricData;
use crate::storage::StoredValue;

pub struct UuidMetric {
    meta: CommonMetricData,
}

impl UuidMetric {
    pub fn new(meta: CommonMetricData) -> Self {
        Self { meta }
    }

    /// Set to the given string, validating that it parses as a UUID
    ///
    /// A string that does not parse is dropped and counted as an
    /// `invalid_value` error; the previously stored value is untouched.
    pub fn set(&self, value: &str) {
        let Some(core) = recording_core(&self.meta) else {
            return;
        };
        let meta = self.meta.clone();
        let raw = value.to_owned();
        core.dispatch(move |storage| match Uuid::parse_str(&raw) {
            Ok(uuid) => storage.set_uuid(&meta, uuid.hyphenated().to_string()),
            Err(_) => record_error(
                storage,
                &meta,
                ErrorType::InvalidValue,
                format!("unexpected UUID value {raw:?}"),
            ),
        });
    }

    /// Set to an existing UUID; cannot fail validation
    pub fn set_from_uuid(&self, value: Uuid) {
        let Some(core) = recording_core(&self.meta) else {
            return;
        };
        let meta = self.meta.clone();
        core.dispatch(move |storage| storage.set_uuid(&meta, value.hyphenated().to_string()));
    }

    /// Generate a new random v4 UUID, set it and return it
    pub fn generate_and_set(&self) -> Uuid {
        let uuid = Uuid::new_v4();
        self.set_from_uuid(uuid);
        uuid
    }

    /// Returns the stored value, for testing purposes only
    ///
    /// Waits for all pending recordings to apply first. `ping_name` defaults
    /// to the first ping the metric is sent in.
    pub fn test_get_value(&self, ping_name: Option<&str>) -> Option<Uuid> {
        let core = crate::core::global()?;
        let ping = ping_name.or_else(|| self.meta.default_ping())?.to_owned();
        let id = self.meta.identifier();
        core.execute(move |storage| match storage.get(&ping, &id) {
            Some(StoredValue::Uuid(value)) => Uuid::parse_str(value).ok(),
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
