//! Configuration system for the clr-trace stack trace renderer.
//!
//! This crate provides configuration loading, saving, validation and default
//! values for the renderer:
//!
//! - Line layout (frame prefix, separator, line-info suffix)
//! - Hidden-frame filtering override
//! - Framework namespace prefix used by type aliasing
//! - Debug log level

pub mod config;
pub mod error;
mod types;

pub use config::TraceConfig;
pub use error::ConfigError;
pub use types::LogLevel;
