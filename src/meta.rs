//! # Metric metadata
//!
//! Identity and registration data shared by every metric type

use serde::{Deserialize, Serialize};

/// How long a recorded value is kept before being cleared
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifetime {
    /// Cleared when the ping it was recorded into is collected
    #[default]
    Ping,
    /// Kept for the lifetime of the process
    Application,
    /// Kept until explicitly cleared
    User,
}

/// The metadata every metric is registered with
///
/// Immutable once the owning metric instance is constructed.
///
/// `send_in_pings` must not be empty; its first entry is the default ping
/// used by the test accessors when no ping name is given.
#[derive(Clone, Debug, Default)]
pub struct CommonMetricData {
    pub category: String,
    pub name: String,
    pub send_in_pings: Vec<String>,
    pub lifetime: Lifetime,
    pub disabled: bool,
}

impl CommonMetricData {
    /// The storage key for this metric: `category.name`, or just `name` for
    /// metrics without a category
    pub fn identifier(&self) -> String {
        if self.category.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.category, self.name)
        }
    }

    pub(crate) fn default_ping(&self) -> Option<&str> {
        self.send_in_pings.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_joins_category_and_name() {
        let meta = CommonMetricData {
            category: "session".into(),
            name: "id".into(),
            ..Default::default()
        };
        assert_eq!(meta.identifier(), "session.id");
    }

    #[test]
    fn identifier_without_category() {
        let meta = CommonMetricData {
            name: "startup".into(),
            ..Default::default()
        };
        assert_eq!(meta.identifier(), "startup");
    }

    #[test]
    fn default_ping_is_first_entry() {
        let meta = CommonMetricData {
            name: "id".into(),
            send_in_pings: vec!["store1".into(), "store2".into()],
            ..Default::default()
        };
        assert_eq!(meta.default_ping(), Some("store1"));

        let empty = CommonMetricData::default();
        assert_eq!(empty.default_ping(), None);
    }
}
