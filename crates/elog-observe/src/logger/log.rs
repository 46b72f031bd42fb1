use std::{
    fmt::{self as stdfmt, Display, Write as _},
    io::{self, Write},
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicU8, Ordering},
    },
};

use time::{UtcOffset, format_description::well_known::Rfc3339};
use tracing::{Dispatch, Metadata, debug, error, info, trace, warn};
use tracing_subscriber::{
    Layer,
    filter::{FilterFn, filter_fn},
    fmt,
    fmt::time::OffsetTime,
    layer::SubscriberExt,
};

use crate::logger::{
    config::LoggerConfig,
    engine::{Field, LoggingEngine},
    error::LoggerError,
    format::LoggerFormat,
    level::LoggerLevel,
    output::{LogOutput, Sink},
};

/// Target of records emitted through [`LoggingEngine::record`].
pub const RECORD_TARGET: &str = "elog";

struct Shared {
    level: AtomicU8,
    format: AtomicU8,
    sink: Sink,
    use_color: bool,
    // Colour is only ever written to a console stream.
    ansi: AtomicBool,
}

impl Shared {
    #[inline]
    fn level(&self) -> LoggerLevel {
        LoggerLevel::from_u8(self.level.load(Ordering::Relaxed))
    }

    #[inline]
    fn format(&self) -> LoggerFormat {
        LoggerFormat::from_u8(self.format.load(Ordering::Relaxed))
    }

    #[inline]
    fn ansi(&self) -> bool {
        self.ansi.load(Ordering::Relaxed)
    }

    // `record` checks its own level before emitting; panic and fatal
    // records travel as tracing ERROR events and must not be re-filtered.
    #[inline]
    fn admits(&self, meta: &Metadata<'_>) -> bool {
        meta.target() == RECORD_TARGET || LoggerLevel::from_tracing(meta.level()) <= self.level()
    }
}

/// [`LoggingEngine`] backed by a private `tracing` dispatcher.
///
/// The subscriber carries a text and a JSON fmt layer over one shared sink.
/// Per-layer filters read the active format and level on every event, so
/// reconfiguration never rebuilds the subscriber.
pub struct TracingEngine {
    shared: Arc<Shared>,
    dispatch: Dispatch,
}

impl TracingEngine {
    pub fn new(cfg: &LoggerConfig) -> Result<Self, LoggerError> {
        let writer = cfg.output.open()?;
        Ok(Self::build(cfg, writer))
    }

    fn build(cfg: &LoggerConfig, writer: Box<dyn Write + Send>) -> Self {
        let shared = Arc::new(Shared {
            level: AtomicU8::new(cfg.level as u8),
            format: AtomicU8::new(cfg.format.as_u8()),
            sink: Sink::new(writer),
            use_color: cfg.use_color,
            ansi: AtomicBool::new(cfg.use_color && cfg.output.is_console()),
        });

        let color_layer = fmt::layer()
            .with_writer(shared.sink.clone())
            .with_ansi(true)
            .with_target(cfg.with_targets)
            .with_timer(mk_timer())
            .with_filter(mk_filter(Arc::clone(&shared), LoggerFormat::Text, true));

        let text_layer = fmt::layer()
            .with_writer(shared.sink.clone())
            .with_ansi(false)
            .with_target(cfg.with_targets)
            .with_timer(mk_timer())
            .with_filter(mk_filter(Arc::clone(&shared), LoggerFormat::Text, false));

        let json_layer = fmt::layer()
            .json()
            .with_writer(shared.sink.clone())
            .with_ansi(false)
            .with_target(cfg.with_targets)
            .with_timer(mk_timer())
            .with_filter(mk_filter(Arc::clone(&shared), LoggerFormat::Json, false));

        let subscriber = tracing_subscriber::registry()
            .with(color_layer)
            .with(text_layer)
            .with(json_layer);

        Self {
            shared,
            dispatch: Dispatch::new(subscriber),
        }
    }

    /// Run `f` with this engine as the current dispatcher.
    ///
    /// Every `tracing` macro inside `f` is formatted and written by this engine.
    pub fn in_scope<R>(&self, f: impl FnOnce() -> R) -> R {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }

    /// Make this engine the process-wide `tracing` default.
    pub fn install_global(&self) -> Result<(), LoggerError> {
        tracing::dispatcher::set_global_default(self.dispatch.clone())
            .map_err(|_| LoggerError::AlreadyInitialized)
    }
}

impl Default for TracingEngine {
    fn default() -> Self {
        Self::build(&LoggerConfig::default(), Box::new(io::stderr()))
    }
}

impl stdfmt::Debug for TracingEngine {
    fn fmt(&self, f: &mut stdfmt::Formatter<'_>) -> stdfmt::Result {
        f.debug_struct("TracingEngine")
            .field("level", &self.shared.level())
            .field("format", &self.shared.format())
            .finish_non_exhaustive()
    }
}

impl LoggingEngine for TracingEngine {
    fn record(&self, level: LoggerLevel, message: &dyn Display, fields: &[Field<'_>]) {
        if self.is_level_enabled(level) {
            let rendered = render_fields(fields);
            self.in_scope(|| emit(level, message, rendered.as_deref()));
        }
        if level <= LoggerLevel::Fatal {
            self.shared.sink.flush();
        }
        match level {
            LoggerLevel::Panic => panic!("{message}"),
            LoggerLevel::Fatal => std::process::exit(1),
            _ => {}
        }
    }

    fn set_level(&self, level: LoggerLevel) {
        self.shared.level.store(level as u8, Ordering::Relaxed);
        trace!(target: "elog_observe", %level, "engine level changed");
    }

    fn level(&self) -> LoggerLevel {
        self.shared.level()
    }

    fn set_formatter(&self, format: LoggerFormat) {
        self.shared.format.store(format.as_u8(), Ordering::Relaxed);
        trace!(target: "elog_observe", %format, "engine format changed");
    }

    fn formatter(&self) -> LoggerFormat {
        self.shared.format()
    }

    fn set_output(&self, output: LogOutput) -> Result<(), LoggerError> {
        let writer = output.open()?;
        self.shared.sink.replace(writer);
        self.shared
            .ansi
            .store(self.shared.use_color && output.is_console(), Ordering::Relaxed);
        debug!(target: "elog_observe", ?output, "engine output replaced");
        Ok(())
    }
}

fn mk_filter(
    shared: Arc<Shared>,
    format: LoggerFormat,
    ansi: bool,
) -> FilterFn<impl Fn(&Metadata<'_>) -> bool> {
    filter_fn(move |meta| {
        shared.format() == format
            && (format == LoggerFormat::Json || shared.ansi() == ansi)
            && shared.admits(meta)
    })
}

fn mk_timer() -> OffsetTime<Rfc3339> {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    OffsetTime::new(offset, Rfc3339)
}

fn render_fields(fields: &[Field<'_>]) -> Option<String> {
    if fields.is_empty() {
        return None;
    }
    let mut out = String::new();
    for (i, (key, value)) in fields.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{key}={value}");
    }
    Some(out)
}

fn emit(level: LoggerLevel, message: &dyn Display, fields: Option<&str>) {
    match level {
        LoggerLevel::Panic => {
            error!(target: RECORD_TARGET, severity = "panic", fields, "{message}")
        }
        LoggerLevel::Fatal => {
            error!(target: RECORD_TARGET, severity = "fatal", fields, "{message}")
        }
        LoggerLevel::Error => error!(target: RECORD_TARGET, fields, "{message}"),
        LoggerLevel::Warn => warn!(target: RECORD_TARGET, fields, "{message}"),
        LoggerLevel::Info => info!(target: RECORD_TARGET, fields, "{message}"),
        LoggerLevel::Debug => debug!(target: RECORD_TARGET, fields, "{message}"),
        LoggerLevel::Trace => trace!(target: RECORD_TARGET, fields, "{message}"),
    }
}
