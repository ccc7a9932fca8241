//! # Storage engine
//!
//! In-memory per-ping store for validated metric values. The store is owned
//! exclusively by the dispatcher worker thread; everything here is plain
//! single-threaded data manipulation.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::error_recording::ErrorType;
use crate::meta::{CommonMetricData, Lifetime};
use crate::payload::PingPayload;

/// A single recorded event, as returned by
/// [`EventMetric::test_get_value`](crate::metrics::EventMetric::test_get_value)
/// and serialized into ping payloads
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RecordedEvent {
    /// Milliseconds; absolute while stored, rebased relative to the earliest
    /// event in the ping on collection
    pub timestamp: u64,
    pub category: String,
    pub name: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

/// A validated value held in storage
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum StoredValue {
    /// Canonical lowercase hyphenated form
    Uuid(String),
    Counter(i32),
    /// Insertion order is load-bearing, events report relative timestamps
    Events(Vec<RecordedEvent>),
}

#[derive(Clone, Debug)]
struct StoredEntry {
    lifetime: Lifetime,
    value: StoredValue,
}

/// All pending pings: ping name → metric identifier → latest entry, plus the
/// error counters keyed the same way
#[derive(Default)]
pub(crate) struct PingStorage {
    pings: HashMap<String, BTreeMap<String, StoredEntry>>,
    errors: HashMap<String, BTreeMap<ErrorType, BTreeMap<String, i32>>>,
}

impl PingStorage {
    pub(crate) fn new() -> Self {
        Default::default()
    }

    /// Overwrite the stored UUID in every ping the metric is sent in
    pub(crate) fn set_uuid(&mut self, meta: &CommonMetricData, value: String) {
        let id = meta.identifier();
        for ping in &meta.send_in_pings {
            self.pings.entry(ping.clone()).or_default().insert(
                id.clone(),
                StoredEntry {
                    lifetime: meta.lifetime,
                    value: StoredValue::Uuid(value.clone()),
                },
            );
        }
    }

    /// Add to the stored counter in every ping the metric is sent in,
    /// saturating at `i32::MAX`
    pub(crate) fn add_counter(&mut self, meta: &CommonMetricData, amount: i32) {
        let id = meta.identifier();
        for ping in &meta.send_in_pings {
            let entry = self
                .pings
                .entry(ping.clone())
                .or_default()
                .entry(id.clone())
                .or_insert_with(|| StoredEntry {
                    lifetime: meta.lifetime,
                    value: StoredValue::Counter(0),
                });
            match &mut entry.value {
                StoredValue::Counter(current) => *current = current.saturating_add(amount),
                other => *other = StoredValue::Counter(amount),
            }
        }
    }

    /// Append an event in every ping the metric is sent in, preserving
    /// insertion order
    pub(crate) fn add_event(&mut self, meta: &CommonMetricData, event: RecordedEvent) {
        let id = meta.identifier();
        for ping in &meta.send_in_pings {
            let entry = self
                .pings
                .entry(ping.clone())
                .or_default()
                .entry(id.clone())
                .or_insert_with(|| StoredEntry {
                    lifetime: meta.lifetime,
                    value: StoredValue::Events(Vec::new()),
                });
            match &mut entry.value {
                StoredValue::Events(events) => events.push(event.clone()),
                other => *other = StoredValue::Events(vec![event.clone()]),
            }
        }
    }

    pub(crate) fn bump_error(&mut self, ping: &str, error: ErrorType, id: &str) {
        let count = self
            .errors
            .entry(ping.to_owned())
            .or_default()
            .entry(error)
            .or_default()
            .entry(id.to_owned())
            .or_default();
        *count = count.saturating_add(1);
    }

    pub(crate) fn get(&self, ping: &str, id: &str) -> Option<&StoredValue> {
        self.pings.get(ping)?.get(id).map(|entry| &entry.value)
    }

    pub(crate) fn num_errors(&self, ping: &str, error: ErrorType, id: &str) -> i32 {
        self.errors
            .get(ping)
            .and_then(|by_error| by_error.get(&error))
            .and_then(|by_id| by_id.get(id))
            .copied()
            .unwrap_or(0)
    }

    /// Snapshot a ping's entries grouped by metric kind, then clear its
    /// ping-lifetime entries and error counters. Application and user
    /// lifetime entries survive and show up in later collections again.
    pub(crate) fn collect(&mut self, ping: &str) -> Option<PingPayload> {
        let mut payload = PingPayload::default();

        if let Some(entries) = self.pings.get_mut(ping) {
            for (id, entry) in entries.iter() {
                match &entry.value {
                    StoredValue::Uuid(value) => {
                        payload.uuid.insert(id.clone(), value.clone());
                    }
                    StoredValue::Counter(value) => {
                        payload.counter.insert(id.clone(), *value);
                    }
                    StoredValue::Events(events) => {
                        payload.events.extend(events.iter().cloned());
                    }
                }
            }
            entries.retain(|_, entry| entry.lifetime != Lifetime::Ping);
            if entries.is_empty() {
                self.pings.remove(ping);
            }
        }

        // Events report relative to the earliest event in the ping; the sort
        // is stable so per-metric insertion order is kept
        payload.events.sort_by_key(|event| event.timestamp);
        if let Some(first) = payload.events.first().map(|event| event.timestamp) {
            for event in &mut payload.events {
                event.timestamp -= first;
            }
        }

        if let Some(by_error) = self.errors.remove(ping) {
            for (error, counts) in by_error {
                payload
                    .labeled_counter
                    .insert(format!("telemetry.error.{error}"), counts);
            }
        }

        if payload.is_empty() {
            None
        } else {
            Some(payload)
        }
    }
}
