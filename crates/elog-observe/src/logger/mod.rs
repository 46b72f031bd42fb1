mod config;
mod engine;
mod error;
mod format;
mod level;
mod log;
mod output;

pub use config::{ENV_FORMAT, ENV_LEVEL, ENV_OUTPUT, LoggerConfig};
pub use engine::{Field, LoggingEngine};
pub use error::LoggerError;
pub use format::LoggerFormat;
pub use level::LoggerLevel;
pub use log::{RECORD_TARGET, TracingEngine};
pub use output::LogOutput;

/// Build an engine from `cfg` and install it as the global `tracing` default.
pub fn logger_init(cfg: &LoggerConfig) -> Result<TracingEngine, LoggerError> {
    let engine = TracingEngine::new(cfg)?;
    engine.install_global()?;
    Ok(engine)
}
