use std::{
    fmt,
    fs::{self, File, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
    str::FromStr,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use serde::Deserialize;
use tracing_subscriber::fmt::MakeWriter;

use crate::logger::error::LoggerError;

/// Destination of formatted records.
#[derive(Clone, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum LogOutput {
    #[default]
    Stderr,
    Stdout,
    /// Appends to the file, creating it and its parent directories.
    File(PathBuf),
    /// Any caller-supplied writer.
    Writer(Arc<Mutex<dyn Write + Send>>),
}

impl LogOutput {
    pub fn writer<W>(w: W) -> Self
    where
        W: Write + Send + 'static,
    {
        LogOutput::Writer(Arc::new(Mutex::new(w)))
    }

    /// Whether the destination is a process console stream.
    #[inline]
    pub fn is_console(&self) -> bool {
        matches!(self, LogOutput::Stderr | LogOutput::Stdout)
    }

    /// Resolve the destination into an open writer.
    pub(crate) fn open(&self) -> Result<Box<dyn Write + Send>, LoggerError> {
        match self {
            LogOutput::Stderr => Ok(Box::new(io::stderr())),
            LogOutput::Stdout => Ok(Box::new(io::stdout())),
            LogOutput::File(path) => open_file(path)
                .map(|f| Box::new(f) as Box<dyn Write + Send>)
                .map_err(|e| LoggerError::InvalidWriter(format!("{}: {e}", path.display()))),
            LogOutput::Writer(w) => Ok(Box::new(SharedWriter(Arc::clone(w)))),
        }
    }
}

fn open_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

impl FromStr for LogOutput {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" => Err(LoggerError::InvalidWriter("empty output".to_string())),
            "stderr" => Ok(LogOutput::Stderr),
            "stdout" => Ok(LogOutput::Stdout),
            _ => Ok(LogOutput::File(PathBuf::from(trimmed))),
        }
    }
}

impl TryFrom<String> for LogOutput {
    type Error = LoggerError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Debug for LogOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogOutput::Stderr => f.write_str("Stderr"),
            LogOutput::Stdout => f.write_str("Stdout"),
            LogOutput::File(path) => f.debug_tuple("File").field(path).finish(),
            LogOutput::Writer(_) => f.write_str("Writer(..)"),
        }
    }
}

struct SharedWriter(Arc<Mutex<dyn Write + Send>>);

impl Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).flush()
    }
}

/// Swappable writer shared by every fmt layer of an engine.
#[derive(Clone)]
pub(crate) struct Sink {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Sink {
    pub(crate) fn new(w: Box<dyn Write + Send>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(w)),
        }
    }

    pub(crate) fn replace(&self, w: Box<dyn Write + Send>) {
        let mut guard = self.lock();
        let _ = guard.flush();
        *guard = w;
    }

    pub(crate) fn flush(&self) {
        let _ = self.lock().flush();
    }

    fn lock(&self) -> MutexGuard<'_, Box<dyn Write + Send>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub(crate) struct SinkWriter<'a>(MutexGuard<'a, Box<dyn Write + Send>>);

impl Write for SinkWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.0.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

impl<'a> MakeWriter<'a> for Sink {
    type Writer = SinkWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SinkWriter(self.lock())
    }
}
