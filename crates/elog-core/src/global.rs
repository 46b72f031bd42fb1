//! Process-wide default [`ErrorLogger`].
//!
//! Built on first use with the default configuration (enabled, text, stderr,
//! info). Code that needs isolation constructs its own logger instead.
use std::{error::Error, sync::LazyLock};

use crate::logger::ErrorLogger;

static DEFAULT: LazyLock<ErrorLogger> = LazyLock::new(ErrorLogger::new);

pub fn global() -> &'static ErrorLogger {
    &DEFAULT
}

/// [`ErrorLogger::err`] on the default instance.
#[inline]
pub fn err<E>(err: E) -> E
where
    E: Error + 'static,
{
    DEFAULT.err(err)
}

pub trait ResultExt {
    /// Log the `Err` side through the default instance; the result is unchanged.
    fn log_err(self) -> Self;
}

impl<T, E> ResultExt for Result<T, E>
where
    E: Error + 'static,
{
    #[inline]
    fn log_err(self) -> Self {
        DEFAULT.result(self)
    }
}
