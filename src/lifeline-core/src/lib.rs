//! # Lifeline Core
//!
//! Shared pieces of the Lifeline admin TUI:
//!
//! - [`style`] - palette constants and composed styles
//! - [`config`] - widget configuration loaded from TOML
//! - [`logging`] - tracing subscriber bootstrap

pub mod config;
pub mod logging;
pub mod style;

pub use config::{ConfigError, SelectConfig, TableConfig, WidgetConfig};
pub use logging::{LoggingError, init_logging};
