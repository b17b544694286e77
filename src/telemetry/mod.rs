//! Logging setup for Filterkit.
//!
//! Library code only emits `tracing` events; installing a subscriber is up to
//! the application. The CLI does it with [`LoggingBuilder`]:
//!
//! ```rust,ignore
//! use filterkit::telemetry::{LoggingBuilder, LogLevel};
//!
//! LoggingBuilder::new().with_level(LogLevel::Debug).init()?;
//! ```

pub mod config;
pub mod logging;

pub use config::{LogFormat, LogLevel, LoggingConfig};
pub use logging::LoggingBuilder;
