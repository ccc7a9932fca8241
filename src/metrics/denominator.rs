//! # Denominator metric
//!
//! The denominator of a rate whose numerators are tracked elsewhere. A
//! counter underneath.

use super::counter::CounterMetric;
use crate::error_recording::ErrorType;
use crate::meta::CommonMetricData;

pub struct DenominatorMetric(CounterMetric);

impl DenominatorMetric {
    pub fn new(meta: CommonMetricData) -> Self {
        Self(CounterMetric::new(meta))
    }

    /// Increase the denominator by `amount`; negative amounts are rejected
    /// and counted as an `invalid_value` error
    pub fn add(&self, amount: i32) {
        self.0.add(amount)
    }

    /// Returns the stored value, for testing purposes only
    pub fn test_get_value(&self, ping_name: Option<&str>) -> Option<i32> {
        self.0.test_get_value(ping_name)
    }

    /// Returns the number of errors recorded for this metric, for testing
    /// purposes only
    pub fn test_get_num_recorded_errors(&self, error: ErrorType, ping_name: Option<&str>) -> i32 {
        self.0.test_get_num_recorded_errors(error, ping_name)
    }
}
