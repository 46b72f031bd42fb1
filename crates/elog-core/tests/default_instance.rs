use std::{
    io,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use elog_core::{ErrorWrap, ResultExt, err, global};

// One test per binary: the default instance is process-wide.
#[test]
fn default_instance_logs_and_passes_errors_through() {
    let calls = Arc::new(AtomicUsize::new(0));
    let last = Arc::new(Mutex::new(String::new()));
    {
        let calls = Arc::clone(&calls);
        let last = Arc::clone(&last);
        global().set_logger_func(move |e| {
            calls.fetch_add(1, Ordering::SeqCst);
            *last.lock().unwrap() = e.to_string();
        });
    }
    assert!(global().is_enabled());

    let e = err(io::Error::other("x"));
    assert_eq!(e.to_string(), "x");
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let res: Result<u8, io::Error> = Err(io::Error::other("y"));
    assert_eq!(res.log_err().unwrap_err().to_string(), "y");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(Ok::<u8, io::Error>(1).log_err().unwrap(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    global().set_error_wrap(Some(ErrorWrap::message("global")));
    let _ = err(io::Error::other("z"));
    assert_eq!(*last.lock().unwrap(), "global: z");

    global().disable();
    let _ = err(io::Error::other("quiet"));
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    global().enable();
}
