//! newplaces Broker - Live Update Fan-out
//!
//! This crate decouples "a pixel was written" from "N listeners observe it":
//! - Broker: the single control-loop actor that owns the subscriber set
//! - BrokerHandle: cloneable front door for subscribe / unsubscribe / publish / stop
//! - Subscription: a bounded per-listener delivery queue
//! - Config: channel capacities
//!
//! The broker is generic over the event type, so it knows nothing about
//! canvases or pixels.
//!
//! ## Usage
//!
//! ```ignore
//! use newplaces_broker::{Broker, BrokerConfig};
//!
//! let (broker, handle) = Broker::<u32>::new(BrokerConfig::default());
//! let task = broker.spawn();
//!
//! let mut sub = handle.subscribe().await?;
//! handle.publish(7).await?;
//! assert_eq!(sub.recv().await, Some(7));
//!
//! handle.stop();
//! task.await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod broker;
pub mod config;
pub mod error;

pub use broker::{Broker, BrokerHandle, SubscriberId, Subscription};
pub use config::BrokerConfig;
pub use error::{BrokerError, Result};
