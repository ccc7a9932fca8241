//! # Metric types
//!
//! The typed recording API. Every recording operation is fire-and-forget: it
//! marshals the value, enqueues a task on the dispatch queue and returns.
//! Validation happens inside the task; failures feed error accounting instead
//! of surfacing to the caller.
//!
//! The `test_get_value` and `test_get_num_recorded_errors` accessors are for
//! test code only. They wait for all pending recordings to apply before
//! reading, and signal a missing value as `None`.

use tracing::warn;

use crate::core::{self, Core};
use crate::meta::CommonMetricData;

mod counter;
mod denominator;
mod event;
mod uuid;

pub use self::counter::CounterMetric;
pub use self::denominator::DenominatorMetric;
pub use self::event::EventMetric;
pub use self::uuid::UuidMetric;

/// The core to record through, or `None` when the recording should be
/// dropped (core not initialized, or the metric is disabled)
pub(crate) fn recording_core(meta: &CommonMetricData) -> Option<&'static Core> {
    let Some(core) = core::global() else {
        warn!(
            "telemetry core not initialized, dropping recording for {}",
            meta.identifier()
        );
        return None;
    };
    if meta.disabled {
        return None;
    }
    Some(core)
}
