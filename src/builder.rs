use super::{core, Error};

/// Builder for the process-wide telemetry [Core](crate::Core)
///
/// # Example
/// ```
///  let telemetry = ping_telemetry::Builder::new()
///      .init()
///      .unwrap();
/// ```
pub struct Builder {
    timestamp: Option<u64>,
}

impl Builder {
    pub fn new() -> Self {
        Builder { timestamp: None }
    }

    /// Fix the event timestamp (milliseconds) instead of reading the wall
    /// clock, for deterministic payloads in tests
    pub fn with_timestamp(self, timestamp: u64) -> Self {
        Self {
            timestamp: Some(timestamp),
        }
    }

    /// Private helper for consuming the builder into core configuration
    fn build(self) -> core::Config {
        core::Config {
            timestamp: self.timestamp,
        }
    }

    /// Initialize the telemetry core and install it as the process global
    ///
    /// Fails if called more than once, or if the dispatcher worker thread
    /// cannot be spawned.
    pub fn init(self) -> Result<&'static core::Core, Error> {
        let config = self.build();
        core::Core::install(core::Core::new(config)?)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}
