//! # Ping payloads
//!
//! Helpers for serializing collected pings via serde_json
//!
//! A collected ping groups its entries by metric kind; empty groups are
//! omitted so an idle ping serializes to small output.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::storage::RecordedEvent;

/// The snapshot of one ping returned by [`Core::collect`](crate::Core::collect)
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PingPayload {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub uuid: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub counter: BTreeMap<String, i32>,
    /// Error accounting shows up here as `telemetry.error.*` counters,
    /// labeled by the metric that caused them
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labeled_counter: BTreeMap<String, BTreeMap<String, i32>>,
    /// All events recorded into the ping, with timestamps relative to the
    /// earliest one
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<RecordedEvent>,
}

impl PingPayload {
    pub(crate) fn is_empty(&self) -> bool {
        self.uuid.is_empty()
            && self.counter.is_empty()
            && self.labeled_counter.is_empty()
            && self.events.is_empty()
    }
}
