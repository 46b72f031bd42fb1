//! Enable/disable switch behind `ErrorLogger::err`.
//!
//! The snapshot stores a plain function pointer chosen once, when the
//! snapshot is built: either `noop` or `active`. `err` calls through the
//! pointer without inspecting `enabled`, so a disabled logger costs one
//! indirect call and never touches the wrap template or the sink.
use std::{error::Error, sync::Arc};

use crate::wrap::ErrorWrap;

/// Sink receiving every error that passes through an enabled logger.
pub type LoggerFunc = Arc<dyn Fn(&dyn Error) + Send + Sync>;

type ErrFn = fn(&ErrState, &(dyn Error + 'static));

/// Immutable configuration snapshot. Changes produce a new snapshot.
#[derive(Clone)]
pub(crate) struct ErrState {
    enabled: bool,
    err_fn: ErrFn,
    wrap: Option<ErrorWrap>,
    log_fn: LoggerFunc,
}

impl ErrState {
    pub(crate) fn new(enabled: bool, wrap: Option<ErrorWrap>, log_fn: LoggerFunc) -> Self {
        Self {
            enabled,
            err_fn: select(enabled),
            wrap,
            log_fn,
        }
    }

    #[inline]
    pub(crate) fn enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub(crate) fn wrap(&self) -> Option<&ErrorWrap> {
        self.wrap.as_ref()
    }

    pub(crate) fn with_enabled(&self, enabled: bool) -> Self {
        Self::new(enabled, self.wrap.clone(), Arc::clone(&self.log_fn))
    }

    pub(crate) fn with_wrap(&self, wrap: Option<ErrorWrap>) -> Self {
        Self::new(self.enabled, wrap, Arc::clone(&self.log_fn))
    }

    pub(crate) fn with_log_fn(&self, log_fn: LoggerFunc) -> Self {
        Self::new(self.enabled, self.wrap.clone(), log_fn)
    }

    #[inline]
    pub(crate) fn call(&self, err: &(dyn Error + 'static)) {
        (self.err_fn)(self, err)
    }
}

fn select(enabled: bool) -> ErrFn {
    if enabled { active } else { noop }
}

#[inline]
fn noop(_: &ErrState, _: &(dyn Error + 'static)) {}

fn active(state: &ErrState, err: &(dyn Error + 'static)) {
    match &state.wrap {
        Some(wrap) => (state.log_fn)(&wrap.wrap(err)),
        None => (state.log_fn)(err),
    }
}
