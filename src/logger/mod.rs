//! Leveled logging for the library and the CLI
//!
//! `error!` and `warn!` are always compiled in. `info!` needs the `log-info`
//! feature; `debug!` needs `log-debug` plus the runtime switch; `verbose!`
//! needs `verbose`. With `file-logging` and an open log file, tagged lines go
//! to the file instead of the terminal. Verbose output always goes to stdout.

use std::fmt::{self, Arguments};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Mutex;

/// Severity of a log line, most severe first
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Failures
    Error = 1,
    /// Recoverable problems
    Warn = 2,
    /// Progress messages
    Info = 3,
    /// Developer detail
    Debug = 4,
}

impl Level {
    const fn tag(self) -> &'static str {
        match self {
            Self::Error => "[ERROR]",
            Self::Warn => "[WARN]",
            Self::Info => "[INFO]",
            Self::Debug => "[DEBUG]",
        }
    }

    const fn compiled_in(self) -> bool {
        match self {
            Self::Error | Self::Warn => true,
            Self::Info => cfg!(feature = "log-info"),
            Self::Debug => cfg!(feature = "log-debug"),
        }
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" | "err" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            _ => Err(format!("Unknown log level: '{s}'")),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        })
    }
}

// Most detailed level the build supports until `set_level` says otherwise.
static MAX_LEVEL: AtomicU8 = AtomicU8::new(if cfg!(feature = "log-debug") {
    Level::Debug as u8
} else if cfg!(feature = "log-info") {
    Level::Info as u8
} else {
    Level::Warn as u8
});
static DEBUG_ON: AtomicBool = AtomicBool::new(false);
static VERBOSE_ON: AtomicBool = AtomicBool::new(false);
static SINK: Mutex<Option<File>> = Mutex::new(None);

/// Set the most detailed level that is emitted
pub fn set_level(level: Level) {
    MAX_LEVEL.store(level as u8, Ordering::SeqCst);
}

/// Parse a level name and apply it; `false` leaves the level unchanged
#[must_use]
pub fn set_level_from_str(level: &str) -> bool {
    level.parse().map(set_level).is_ok()
}

/// Turn on `debug!` output (no effect without `log-debug`)
pub fn enable_debug() {
    DEBUG_ON.store(true, Ordering::SeqCst);
}

/// Whether `debug!` lines can be emitted
#[must_use]
pub fn is_debug_enabled() -> bool {
    cfg!(feature = "log-debug") && DEBUG_ON.load(Ordering::SeqCst)
}

/// Turn on `verbose!` output (no effect without `verbose`)
pub fn enable_verbose() {
    VERBOSE_ON.store(true, Ordering::SeqCst);
}

/// Whether `verbose!` lines are printed
#[must_use]
pub fn is_verbose_enabled() -> bool {
    cfg!(feature = "verbose") && VERBOSE_ON.load(Ordering::SeqCst)
}

/// Append tagged lines to `path`, creating its directory if needed
///
/// Returns `false` if the file can't be opened or the build lacks
/// `file-logging`; output then stays on the terminal.
#[must_use]
pub fn init_file_logging(path: &Path) -> bool {
    if !cfg!(feature = "file-logging") {
        return false;
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if fs::create_dir_all(parent).is_err() {
            return false;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return false;
    };
    SINK.lock().map(|mut sink| *sink = Some(file)).is_ok()
}

fn write_to_sink(line: &str) -> bool {
    let Ok(mut sink) = SINK.lock() else {
        return false;
    };
    let Some(file) = sink.as_mut() else {
        return false;
    };
    // A failed write is dropped rather than echoed to the terminal.
    let _ = writeln!(file, "{line}").and_then(|()| file.flush());
    true
}

fn enabled(level: Level) -> bool {
    level.compiled_in()
        && level as u8 <= MAX_LEVEL.load(Ordering::SeqCst)
        && (level != Level::Debug || is_debug_enabled())
}

/// Backend of the logging macros
pub fn log_impl(level: Level, args: Arguments) {
    if !enabled(level) {
        return;
    }
    let line = format!("{} {args}", level.tag());
    if write_to_sink(&line) {
        return;
    }
    if level <= Level::Warn {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

/// Log at [`Level::Error`]
#[macro_export]
macro_rules! error { ($($arg:tt)*) => { $crate::logger::log_impl($crate::logger::Level::Error, format_args!($($arg)*)) }; }

/// Log at [`Level::Warn`]
#[macro_export]
macro_rules! warn { ($($arg:tt)*) => { $crate::logger::log_impl($crate::logger::Level::Warn, format_args!($($arg)*)) }; }

/// Log at [`Level::Info`]
#[macro_export]
macro_rules! info { ($($arg:tt)*) => { $crate::logger::log_impl($crate::logger::Level::Info, format_args!($($arg)*)) }; }

/// Log at [`Level::Debug`]
#[macro_export]
macro_rules! debug { ($($arg:tt)*) => { $crate::logger::log_impl($crate::logger::Level::Debug, format_args!($($arg)*)) }; }

/// Print an untagged line to stdout when verbose output is on
#[macro_export]
macro_rules! verbose {
    ($($arg:tt)*) => {
        if $crate::logger::is_verbose_enabled() {
            println!($($arg)*);
        }
    };
}
