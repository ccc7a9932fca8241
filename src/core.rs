//! # Core
//!
//! The process-wide telemetry core: configuration, the dispatch queue handle
//! and ping collection. Constructed once via [`Builder`](crate::Builder);
//! metric types reach it through [`global`].

use std::time::{SystemTime, UNIX_EPOCH};

use once_cell::sync::OnceCell;

use crate::dispatcher::Dispatcher;
use crate::payload::PingPayload;
use crate::storage::PingStorage;
use crate::Error;

static GLOBAL: OnceCell<Core> = OnceCell::new();

/// Configuration via Builder
pub struct Config {
    /// Fixed event timestamp in milliseconds, for deterministic output;
    /// wall clock when unset
    pub timestamp: Option<u64>,
}

/// The telemetry core behind every metric type
///
/// Use [Builder](crate::Builder) to construct
///
/// # Example
/// ```
/// use ping_telemetry::{Builder, CommonMetricData};
/// use ping_telemetry::metrics::CounterMetric;
///
/// let telemetry = Builder::new().init().unwrap();
///
/// let starts = CounterMetric::new(CommonMetricData {
///     category: "app".into(),
///     name: "starts".into(),
///     send_in_pings: vec!["baseline".into()],
///     ..Default::default()
/// });
/// starts.add(1);
///
/// telemetry.block_on_dispatcher();
/// assert_eq!(starts.test_get_value(None), Some(1));
/// ```
pub struct Core {
    dispatcher: Dispatcher,
    pub config: Config,
}

/// The installed core, or `None` before [`Builder::init`](crate::Builder::init)
pub fn global() -> Option<&'static Core> {
    GLOBAL.get()
}

impl Core {
    pub(crate) fn new(config: Config) -> Result<Self, Error> {
        Ok(Core {
            dispatcher: Dispatcher::launch()?,
            config,
        })
    }

    pub(crate) fn install(core: Core) -> Result<&'static Core, Error> {
        GLOBAL
            .try_insert(core)
            .map_err(|_| "telemetry core already initialized".into())
    }

    /// Event timestamp in milliseconds unless fixed via
    /// [Builder::with_timestamp](crate::Builder::with_timestamp)
    pub(crate) fn timestamp(&self) -> u64 {
        match self.config.timestamp {
            Some(t) => t,
            None => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("Time went backwards")
                .as_millis() as u64,
        }
    }

    /// Snapshot a ping's current payload and clear its ping-lifetime entries
    /// and error counters
    ///
    /// Rides the dispatch queue, so a collection never observes a
    /// half-applied recording. Returns `None` when the ping holds no data.
    pub fn collect(&self, ping_name: &str) -> Option<PingPayload> {
        let ping = ping_name.to_owned();
        self.dispatcher
            .execute(move |storage| storage.collect(&ping))
            .flatten()
    }

    /// Block until every previously enqueued recording has been applied
    ///
    /// The only synchronization primitive test code may rely on.
    pub fn block_on_dispatcher(&self) {
        self.dispatcher.block_on_queue()
    }

    pub(crate) fn dispatch(&self, task: impl FnOnce(&mut PingStorage) + Send + 'static) {
        self.dispatcher.dispatch(task)
    }

    pub(crate) fn execute<T, F>(&self, task: F) -> Option<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PingStorage) -> T + Send + 'static,
    {
        self.dispatcher.execute(task)
    }
}
