//! Synchronous logging for the escalation client, inspired by
//! OpenBSD's `log.c`.
//!
//! Authentication attempts deserve a trail even when the tool itself
//! stays quiet, so the default drain is syslog with the `authpriv`
//! facility.  Foreground mode logs to stderr instead, for debugging.
//! Everything is synchronous; the client has no runtime to hand log
//! messages to.

use derive_more::{Display, From, Into};
use libc::openlog;
use slog::{Drain, Level, OwnedKVList, Record, KV};
use slog_scope::GlobalLoggerGuard;
use std::{
    ffi::{CStr, CString},
    fmt,
    io::{self, Write},
    pin::Pin,
    sync::{Mutex, Once},
};

mod envlogger;

/// Re-export the scoped logging macros.
pub use slog_scope::{debug, error, info, trace, warn};

static LOG_BRIDGE: Once = Once::new();

/// Configuration for the logging crate.
#[derive(Debug, Default, From)]
pub struct Config {
    /// Log to the foreground or to syslog (default: syslog).
    #[from(forward)]
    foreground: bool,
}

/// Logging errors.
#[derive(Debug, Display, From)]
pub enum Error {
    #[display(fmt = "{}", "_0")]
    NulError(std::ffi::NulError),
    #[display(fmt = "{}", "_0")]
    IoError(io::Error),
}

impl std::error::Error for Error {}

fn init(
    drain: Box<dyn Drain<Err = slog::Never, Ok = ()> + Send>,
    _config: Config,
) -> GlobalLoggerGuard {
    let drain = envlogger::Logger::with_default_filter(drain, "info");

    // This is required to make the drain `UnwindSafe`.
    let drain = Mutex::new(drain.fuse());

    let logger = slog::Logger::root(drain.fuse(), slog::o!()).into_erased();

    let guard = slog_scope::set_global_logger(logger);
    LOG_BRIDGE.call_once(|| {
        slog_stdlog::init().unwrap();
    });

    guard
}

/// Return a new global synchronous logger.
pub fn sync_logger<C: Into<Config>>(name: &str, config: C) -> Result<GlobalLoggerGuard, Error> {
    let config = config.into();

    let guard = if config.foreground {
        init(Box::new(Stderr::new(name).fuse()), config)
    } else {
        init(Box::new(Syslog::new(name)?.fuse()), config)
    };

    Ok(guard)
}

/// Foreground logger that writes to stderr.
pub struct Stderr {
    name: String,
}

impl Stderr {
    /// Create a new foreground logger.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl Drain for Stderr {
    type Ok = ();
    type Err = Error;

    fn log(&self, record: &Record<'_>, values: &OwnedKVList) -> Result<Self::Ok, Self::Err> {
        let message = format!("{}: {}\n", self.name, format_log(record, values));
        io::stderr()
            .write_all(message.as_bytes())
            .map_err(Into::into)
    }
}

/// Background logger that writes to syslog on the `authpriv`
/// facility.
pub struct Syslog {
    /// We need to keep a reference to the const char * around.
    _name: Pin<CString>,
}

impl Syslog {
    /// Create a new syslog logger.
    pub fn new(name: &str) -> Result<Self, Error> {
        let _name = CString::new(name)?;
        let c_str: &CStr = _name.as_c_str();

        unsafe {
            openlog(
                c_str.as_ptr(),
                libc::LOG_PID | libc::LOG_NDELAY,
                libc::LOG_AUTHPRIV,
            )
        };

        Ok(Self {
            _name: Pin::new(_name),
        })
    }
}

impl Drop for Syslog {
    /// Close syslog on shutdown.
    fn drop(&mut self) {
        unsafe {
            libc::closelog();
        }
    }
}

impl Drain for Syslog {
    type Ok = ();
    type Err = Error;

    fn log(&self, record: &Record<'_>, values: &OwnedKVList) -> Result<Self::Ok, Self::Err> {
        let message = CString::new(format_log(record, values))?;
        let c_message: &CStr = message.as_c_str();

        unsafe {
            libc::syslog(priority(record.level()), c_message.as_ptr());
        }

        Ok(())
    }
}

/// Map a slog level to the syslog priority.
fn priority(level: Level) -> libc::c_int {
    match level {
        Level::Critical => libc::LOG_CRIT,
        Level::Error => libc::LOG_ERR,
        Level::Warning => libc::LOG_WARNING,
        Level::Info => libc::LOG_INFO,
        Level::Debug | Level::Trace => libc::LOG_DEBUG,
    }
}

/// Format the log message to a string.
#[inline]
fn format_log(record: &Record<'_>, values: &OwnedKVList) -> String {
    let mut formatter = Formatter::new(record);
    let _ = record.kv().serialize(record, &mut formatter);
    let _ = values.serialize(record, &mut formatter);
    formatter.into()
}

/// Formatter to create a log message from a record.
#[derive(Into)]
struct Formatter {
    #[into]
    buf: String,
}

impl Formatter {
    /// Return a new formatter.
    fn new(record: &Record<'_>) -> Self {
        let mut buf = format!("{}", record.msg());

        if record.level() >= Level::Debug {
            buf.push_str(&format!(
                ", source: {}:{}, module: {}",
                record.file(),
                record.line(),
                record.module()
            ));
        };

        Self { buf }
    }
}

/// Serializer for key-value fields.
impl slog::Serializer for Formatter {
    fn emit_arguments(&mut self, key: &str, val: &fmt::Arguments<'_>) -> slog::Result {
        self.buf.push_str(&format!(", {}: {}", key, val));
        Ok(())
    }
}
