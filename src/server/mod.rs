//! Server module for newplaces
//!
//! Contains the server initialization and runtime logic.
//!
//! # Module Structure
//!
//! - `config`: Configuration structures for all server components
//! - `loader`: Configuration loading from files and environment
//! - `init`: Dependency wiring and the HTTP run loop
//! - `shutdown`: OS signal handling for graceful shutdown

pub mod config;
mod init;
mod loader;
mod shutdown;

// Re-export public API
pub use init::run;
pub use loader::load_config;
