//! # Error accounting
//!
//! Rejected or partially accepted recordings never surface as errors to the
//! caller; they increment per-metric error counters instead. The counters are
//! stored alongside regular metric data and show up in collected payloads as
//! the `telemetry.error.*` labeled counters, labeled by the offending metric.

use std::fmt;

use tracing::warn;

use crate::core;
use crate::meta::CommonMetricData;
use crate::storage::PingStorage;

/// The kinds of recording failures tracked for each metric
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorType {
    /// Malformed or out-of-range input, recording dropped
    InvalidValue,
    /// Unknown key or label, the offending entry is dropped
    InvalidLabel,
    /// A value exceeded a length limit and was truncated
    InvalidOverflow,
    /// The metric was used in an invalid lifecycle state
    InvalidState,
    /// A value had the wrong type, recording dropped
    InvalidType,
}

impl ErrorType {
    /// The label used for this error kind in collected payloads
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorType::InvalidValue => "invalid_value",
            ErrorType::InvalidLabel => "invalid_label",
            ErrorType::InvalidOverflow => "invalid_overflow",
            ErrorType::InvalidState => "invalid_state",
            ErrorType::InvalidType => "invalid_type",
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Count a recording failure against `meta` in all of its pings.
///
/// Runs inside the dispatcher task that detected the failure and writes
/// storage directly, never re-enqueueing, so error accounting cannot feed
/// back into itself.
pub(crate) fn record_error(
    storage: &mut PingStorage,
    meta: &CommonMetricData,
    error: ErrorType,
    message: String,
) {
    let id = meta.identifier();
    warn!("{id}: {message}");
    for ping in &meta.send_in_pings {
        storage.bump_error(ping, error, &id);
    }
}

/// Shared implementation of `test_get_num_recorded_errors` for all metric
/// types; drains the dispatch queue before reading.
pub(crate) fn test_get_num_recorded_errors(
    meta: &CommonMetricData,
    error: ErrorType,
    ping_name: Option<&str>,
) -> i32 {
    let Some(core) = core::global() else {
        return 0;
    };
    let Some(ping) = ping_name.or_else(|| meta.default_ping()) else {
        return 0;
    };
    let ping = ping.to_owned();
    let id = meta.identifier();
    core.execute(move |storage| storage.num_errors(&ping, error, &id))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_labels() {
        assert_eq!(ErrorType::InvalidValue.as_str(), "invalid_value");
        assert_eq!(ErrorType::InvalidLabel.as_str(), "invalid_label");
        assert_eq!(ErrorType::InvalidOverflow.as_str(), "invalid_overflow");
        assert_eq!(ErrorType::InvalidState.as_str(), "invalid_state");
        assert_eq!(ErrorType::InvalidType.as_str(), "invalid_type");
    }

    #[test]
    fn record_error_counts_in_every_ping() {
        let mut storage = PingStorage::new();
        let meta = CommonMetricData {
            category: "session".into(),
            name: "id".into(),
            send_in_pings: vec!["store1".into(), "store2".into()],
            ..Default::default()
        };

        record_error(&mut storage, &meta, ErrorType::InvalidValue, "bad input".into());
        record_error(&mut storage, &meta, ErrorType::InvalidValue, "bad input".into());

        assert_eq!(storage.num_errors("store1", ErrorType::InvalidValue, "session.id"), 2);
        assert_eq!(storage.num_errors("store2", ErrorType::InvalidValue, "session.id"), 2);
        assert_eq!(storage.num_errors("store1", ErrorType::InvalidLabel, "session.id"), 0);
    }
}
