use std::{error::Error, fmt, sync::Arc};

/// Placed between the template message and the cause message.
pub const SEPARATOR: &str = ": ";

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct WrapMessage(String);

/// Template applied to errors before they reach the log sink.
///
/// Wrapping only affects what is logged: callers of `err` always get their
/// own error back.
#[derive(Clone)]
pub struct ErrorWrap {
    template: Arc<dyn Error + Send + Sync>,
}

impl ErrorWrap {
    /// Use an existing error value (and its type) as the template.
    pub fn new<E>(template: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            template: Arc::new(template),
        }
    }

    /// Template carrying only a message.
    pub fn message(text: impl Into<String>) -> Self {
        Self::new(WrapMessage(text.into()))
    }

    pub fn template(&self) -> &(dyn Error + Send + Sync + 'static) {
        &*self.template
    }

    /// Borrow `cause` under this template. Allocates nothing.
    #[inline]
    pub fn wrap<'a>(&'a self, cause: &'a (dyn Error + 'static)) -> Wrapped<'a> {
        Wrapped {
            template: &*self.template,
            cause,
        }
    }
}

impl fmt::Debug for ErrorWrap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorWrap")
            .field("template", &self.template.to_string())
            .finish()
    }
}

/// An error seen through a wrap template.
///
/// Displays as `"{template}: {cause}"`; [`Error::source`] is the cause.
pub struct Wrapped<'a> {
    template: &'a (dyn Error + Send + Sync + 'static),
    cause: &'a (dyn Error + 'static),
}

impl<'a> Wrapped<'a> {
    pub fn template(&self) -> &'a (dyn Error + Send + Sync + 'static) {
        self.template
    }

    pub fn cause(&self) -> &'a (dyn Error + 'static) {
        self.cause
    }
}

impl fmt::Display for Wrapped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.template, self.cause)
    }
}

impl fmt::Debug for Wrapped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wrapped")
            .field("template", &self.template)
            .field("cause", &self.cause)
            .finish()
    }
}

impl Error for Wrapped<'_> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.cause)
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn message_template_prefixes_cause() {
        let wrap = ErrorWrap::message("wrapped");
        let cause = io::Error::other("x");

        assert_eq!(wrap.wrap(&cause).to_string(), "wrapped: x");
    }

    #[test]
    fn empty_template_keeps_separator() {
        let wrap = ErrorWrap::message("");
        let cause = io::Error::other("x");

        assert_eq!(wrap.wrap(&cause).to_string(), ": x");
    }

    #[test]
    fn source_is_the_original_error() {
        let wrap = ErrorWrap::message("db");
        let cause = io::Error::new(io::ErrorKind::NotFound, "missing row");
        let wrapped = wrap.wrap(&cause);

        let source = wrapped.source().expect("cause");
        let io_err = source.downcast_ref::<io::Error>().expect("io::Error");
        assert_eq!(io_err.kind(), io::ErrorKind::NotFound);
        assert!(std::ptr::addr_eq(source, &cause));
    }

    #[test]
    fn typed_template_keeps_its_type() {
        let wrap = ErrorWrap::new(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        let cause = io::Error::other("open /etc/shadow");
        let wrapped = wrap.wrap(&cause);

        let template = wrapped.template().downcast_ref::<io::Error>().unwrap();
        assert_eq!(template.kind(), io::ErrorKind::PermissionDenied);
        assert_eq!(wrapped.to_string(), "denied: open /etc/shadow");
    }

    #[test]
    fn wrapping_leaves_inputs_untouched() {
        let wrap = ErrorWrap::message("outer");
        let cause = io::Error::other("inner");

        let _ = wrap.wrap(&cause).to_string();
        let _ = wrap.wrap(&cause).to_string();

        assert_eq!(cause.to_string(), "inner");
        assert_eq!(wrap.template().to_string(), "outer");
    }
}
