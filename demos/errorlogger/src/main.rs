use std::{fs, io, path::Path, sync::Arc};

use elog_core::{
    ErrorLogger, ErrorLoggerOptions, ErrorWrap, LoggerConfig, LoggerLevel, ResultExt,
    TracingEngine,
};
use tracing::info;

fn read_config(el: &ErrorLogger, path: &Path) -> Result<String, io::Error> {
    fs::read_to_string(path).map_err(|e| el.err(e))
}

fn main() -> anyhow::Result<()> {
    // 1) Logger
    let cfg = LoggerConfig::from_env()?;
    let engine = Arc::new(TracingEngine::new(&cfg)?);
    let el = ErrorLogger::from_parts(engine, ErrorLoggerOptions::default());
    el.in_scope(|| info!(log_level = %el.log_level(), "error logger ready"));

    // 2) Errors are logged and returned unchanged
    let missing = Path::new("/definitely/not/here.toml");
    if let Err(e) = read_config(&el, missing) {
        println!("caller still sees: {e} ({:?})", e.kind());
    }

    // 3) Wrapping only changes the logged text
    el.set_error_wrap(Some(ErrorWrap::message("loading settings")));
    let _ = read_config(&el, missing);
    el.set_error_wrap(None);

    // 4) Hot loop with logging off
    el.disable();
    let failures = (0..10_000)
        .filter_map(|i| el.err_opt((i % 1000 == 0).then(|| io::Error::other("skipped"))))
        .count();
    el.enable();
    println!("{failures} errors passed through while disabled");

    // 5) JSON records and structured fields
    el.enable_json();
    el.record(LoggerLevel::Warn, &"cache miss ratio high", &[("ratio", &0.42)]);
    el.in_scope(|| info!(requests = 128, "structured fields through tracing"));

    // 6) Default instance
    let res: Result<(), io::Error> = Err(io::Error::other("via the default instance"));
    let _ = res.log_err();

    if let Err(e) = el.set_log_level("loud") {
        println!("rejected: {e}");
    }
    Ok(())
}
