//! Log errors inline while propagating them unchanged.
//!
//! ```ignore
//! use elog_core::{ErrorLogger, ErrorWrap};
//!
//! let el = ErrorLogger::new();
//! el.set_error_wrap(Some(ErrorWrap::message("config")));
//! let text = std::fs::read_to_string(path).map_err(|e| el.err(e))?;
//! ```
mod global;
mod logger;
mod switch;
mod wrap;

pub use global::{ResultExt, err, global};
pub use logger::{ErrorLogger, ErrorLoggerOptions};
pub use switch::LoggerFunc;
pub use wrap::{ErrorWrap, SEPARATOR, Wrapped};

pub use elog_observe::{
    Field, LogOutput, LoggerConfig, LoggerError, LoggerFormat, LoggerLevel, LoggingEngine,
    TracingEngine,
};
