pub type Error = Box<dyn std::error::Error + Send + Sync + 'static>;

pub use self::builder::Builder;
pub use self::core::{global, Core};
pub use self::error_recording::ErrorType;
pub use self::meta::{CommonMetricData, Lifetime};
pub use self::payload::PingPayload;
pub use self::storage::RecordedEvent;

mod builder;
mod core;
mod dispatcher;
mod error_recording;
mod meta;
pub mod metrics;
mod payload;
mod storage;
mod validation;
