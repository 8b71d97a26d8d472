//! Error types for newplaces-broker

use thiserror::Error;

/// Broker error type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BrokerError {
    /// The control loop has terminated; no further requests are processed
    #[error("broker is stopped")]
    Stopped,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, BrokerError>;
