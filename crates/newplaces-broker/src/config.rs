//! Broker configuration

use serde::{Deserialize, Serialize};

/// Default capacity of each subscriber's delivery queue
pub const DEFAULT_SUBSCRIBER_CAPACITY: usize = 5;
/// Default capacity of the inbound publish queue
pub const DEFAULT_PUBLISH_CAPACITY: usize = 100;
/// Default capacity of the inbound subscribe/unsubscribe queue
pub const DEFAULT_CONTROL_CAPACITY: usize = 10;

/// Channel capacities for the broker.
///
/// The subscriber capacity bounds how far one listener may fall behind before
/// events are dropped for it. The publish and control capacities bound how many
/// requests may queue up in front of the control loop before callers wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerConfig {
    /// Per-subscriber delivery queue capacity
    #[serde(default = "default_subscriber_capacity")]
    pub subscriber_capacity: usize,
    /// Inbound publish queue capacity
    #[serde(default = "default_publish_capacity")]
    pub publish_capacity: usize,
    /// Inbound subscribe/unsubscribe queue capacity
    #[serde(default = "default_control_capacity")]
    pub control_capacity: usize,
}

fn default_subscriber_capacity() -> usize {
    DEFAULT_SUBSCRIBER_CAPACITY
}

fn default_publish_capacity() -> usize {
    DEFAULT_PUBLISH_CAPACITY
}

fn default_control_capacity() -> usize {
    DEFAULT_CONTROL_CAPACITY
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            subscriber_capacity: DEFAULT_SUBSCRIBER_CAPACITY,
            publish_capacity: DEFAULT_PUBLISH_CAPACITY,
            control_capacity: DEFAULT_CONTROL_CAPACITY,
        }
    }
}

impl BrokerConfig {
    /// Clamp every capacity to at least 1 (tokio channels reject zero)
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            subscriber_capacity: self.subscriber_capacity.max(1),
            publish_capacity: self.publish_capacity.max(1),
            control_capacity: self.control_capacity.max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BrokerConfig::default();
        assert_eq!(config.subscriber_capacity, 5);
        assert_eq!(config.publish_capacity, 100);
        assert_eq!(config.control_capacity, 10);
    }

    #[test]
    fn test_normalized_clamps_zero() {
        let config = BrokerConfig {
            subscriber_capacity: 0,
            publish_capacity: 0,
            control_capacity: 3,
        }
        .normalized();

        assert_eq!(config.subscriber_capacity, 1);
        assert_eq!(config.publish_capacity, 1);
        assert_eq!(config.control_capacity, 3);
    }
}
