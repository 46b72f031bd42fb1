use std::{error::Error, fmt, fmt::Display, sync::Arc};

use arc_swap::ArcSwap;
use elog_observe::{
    Field, LogOutput, LoggerError, LoggerFormat, LoggerLevel, LoggingEngine, TracingEngine,
};
use tracing::debug;

use crate::{
    switch::{ErrState, LoggerFunc},
    wrap::ErrorWrap,
};

/// Construction options for [`ErrorLogger`].
///
/// Omitted values fall back to: enabled, error-level record on the engine,
/// no wrapping.
#[derive(Clone)]
pub struct ErrorLoggerOptions {
    pub enabled: bool,
    pub log_fn: Option<LoggerFunc>,
    pub wrap: Option<ErrorWrap>,
}

impl ErrorLoggerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_log_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&dyn Error) + Send + Sync + 'static,
    {
        self.log_fn = Some(Arc::new(f));
        self
    }

    pub fn with_wrap(mut self, wrap: ErrorWrap) -> Self {
        self.wrap = Some(wrap);
        self
    }
}

impl Default for ErrorLoggerOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            log_fn: None,
            wrap: None,
        }
    }
}

/// Logs errors on their way back to the caller.
///
/// ```ignore
/// let el = ErrorLogger::new();
/// let file = File::open(path).map_err(|e| el.err(e))?;
/// el.disable(); // hot section: `err` becomes a passthrough
/// ```
///
/// The configuration lives in one snapshot behind an [`ArcSwap`]. `err`
/// loads it without locking and calls the function it carries; setters
/// publish a new snapshot, so a concurrent `err` sees either the old or the
/// new configuration, never a mix.
pub struct ErrorLogger<L: ?Sized = TracingEngine> {
    state: ArcSwap<ErrState>,
    engine: Arc<L>,
}

impl ErrorLogger<TracingEngine> {
    /// Enabled logger over a text, stderr, info-level engine.
    pub fn new() -> Self {
        Self::with_options(ErrorLoggerOptions::default())
    }

    /// Run `f` with this logger's engine as the current `tracing` dispatcher.
    pub fn in_scope<R>(&self, f: impl FnOnce() -> R) -> R {
        self.engine.in_scope(f)
    }
}

impl Default for ErrorLogger<TracingEngine> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L> ErrorLogger<L>
where
    L: LoggingEngine + Default + 'static,
{
    pub fn with_options(opts: ErrorLoggerOptions) -> Self {
        Self::from_parts(Arc::new(L::default()), opts)
    }
}

impl<L> ErrorLogger<L>
where
    L: LoggingEngine + ?Sized + 'static,
{
    pub fn from_parts(engine: Arc<L>, opts: ErrorLoggerOptions) -> Self {
        let log_fn = opts
            .log_fn
            .unwrap_or_else(|| default_log_fn(Arc::clone(&engine)));
        Self {
            state: ArcSwap::from_pointee(ErrState::new(opts.enabled, opts.wrap, log_fn)),
            engine,
        }
    }

    /// Log `err` if enabled and hand it back unchanged.
    #[inline]
    pub fn err<E>(&self, err: E) -> E
    where
        E: Error + 'static,
    {
        self.err_dyn(&err);
        err
    }

    /// [`err`](Self::err) for borrowed or type-erased errors.
    #[inline]
    pub fn err_dyn<'a>(&self, err: &'a (dyn Error + 'static)) -> &'a (dyn Error + 'static) {
        self.state.load().call(err);
        err
    }

    /// `None` passes through without touching the logger.
    #[inline]
    pub fn err_opt<E>(&self, err: Option<E>) -> Option<E>
    where
        E: Error + 'static,
    {
        if let Some(e) = &err {
            self.err_dyn(e);
        }
        err
    }

    /// Log the `Err` side of `res`; `Ok` passes through without touching the logger.
    #[inline]
    pub fn result<T, E>(&self, res: Result<T, E>) -> Result<T, E>
    where
        E: Error + 'static,
    {
        if let Err(e) = &res {
            self.err_dyn(e);
        }
        res
    }

    pub fn enable(&self) {
        self.state.rcu(|s| s.with_enabled(true));
        debug!(target: "elog_core", "error logging enabled");
    }

    /// Turn `err` into a passthrough: no wrapping, no formatting, no sink call.
    pub fn disable(&self) {
        self.state.rcu(|s| s.with_enabled(false));
        debug!(target: "elog_core", "error logging disabled");
    }

    pub fn is_enabled(&self) -> bool {
        self.state.load().enabled()
    }

    /// Replace the sink used by `err`. Takes effect on the next call.
    pub fn set_logger_func<F>(&self, f: F)
    where
        F: Fn(&dyn Error) + Send + Sync + 'static,
    {
        let log_fn: LoggerFunc = Arc::new(f);
        self.state.rcu(|s| s.with_log_fn(Arc::clone(&log_fn)));
    }

    /// Replace the wrap template; `None` turns wrapping off.
    pub fn set_error_wrap(&self, wrap: Option<ErrorWrap>) {
        self.state.rcu(|s| s.with_wrap(wrap.clone()));
    }

    pub fn error_wrap(&self) -> Option<ErrorWrap> {
        self.state.load().wrap().cloned()
    }

    /// Set the engine level from a case-insensitive name.
    ///
    /// A rejected name goes through [`err`](Self::err) like any other error
    /// and leaves the level unchanged.
    pub fn set_log_level(&self, name: &str) -> Result<(), LoggerError> {
        let level = name.parse::<LoggerLevel>().map_err(|e| self.err(e))?;
        self.engine.set_level(level);
        Ok(())
    }

    pub fn log_level(&self) -> LoggerLevel {
        self.engine.level()
    }

    pub fn set_output(&self, output: LogOutput) -> Result<(), LoggerError> {
        self.engine.set_output(output)
    }

    pub fn set_formatter(&self, format: LoggerFormat) {
        self.engine.set_formatter(format);
    }

    pub fn enable_text(&self) {
        self.set_formatter(LoggerFormat::Text);
    }

    pub fn enable_json(&self) {
        self.set_formatter(LoggerFormat::Json);
    }

    /// Emit a record straight through the engine, bypassing the switch.
    pub fn record(&self, level: LoggerLevel, message: &dyn Display, fields: &[Field<'_>]) {
        self.engine.record(level, message, fields);
    }

    pub fn engine(&self) -> &Arc<L> {
        &self.engine
    }
}

impl<L: ?Sized> fmt::Debug for ErrorLogger<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.load();
        f.debug_struct("ErrorLogger")
            .field("enabled", &state.enabled())
            .field("wrap", &state.wrap())
            .finish_non_exhaustive()
    }
}

fn default_log_fn<L>(engine: Arc<L>) -> LoggerFunc
where
    L: LoggingEngine + ?Sized + 'static,
{
    Arc::new(move |err: &dyn Error| engine.record(LoggerLevel::Error, &err, &[]))
}
