#![forbid(unsafe_code)]
// Allow pedantic lints for early-stage API ergonomics.
#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

//! # Simplog
//!
//! A very basic logger for output of messages at various logging levels with
//! date/time stamp to standard out/err and a defined log file.
//!
//! Simplog provides:
//! - Six severity levels from fatal to verbose, filtered by a configurable
//!   verbosity threshold
//! - Simultaneous output to a log file and to the console (stderr for
//!   fatal/error, stdout for the rest), with per-level ANSI colors
//! - Optional reflowing of over-length records to 80 columns
//! - Captured call-stack traces appended to the log on demand
//! - Configuration set programmatically or loaded from a `key=value` file
//!
//! ## Example
//!
//! ```rust,no_run
//! use simplog::{Level, write_log};
//!
//! simplog::set_log_file("app.log");
//! write_log!(Level::Info, "Starting up");
//! write_log!(Level::Debug, "loaded {} modules", 3);
//! ```
//!
//! ## Contract
//!
//! Writing a record is best-effort: a destination file that cannot be opened
//! or a console stream that fails is ignored rather than surfaced, so the
//! logger is never the reason a host program fails. The one deliberate
//! exception is [`flush_log`], which terminates the process when an existing
//! log file cannot be deleted.
//!
//! The global configuration is guarded by a single mutex taken once per
//! operation; concurrent callers serialize on it and records never
//! interleave.

use std::fmt;
use std::path::{Path, PathBuf};

mod config;
mod dispatch;
mod level;
mod settings;
mod trace;
mod wrap;

pub use level::{InvalidLevelError, Level, ParseLevelError};
pub use wrap::{WRAP_COLUMNS, wrap_lines};

use settings::Settings;

/// Writes a record at the given level to the configured sinks.
///
/// The record carries a fresh local-time date stamp and the level's label.
/// Fatal and error records additionally report the platform error indicator
/// when it is set, and are never filtered; info always passes; warn, debug,
/// and verbose pass when at or below the current threshold.
///
/// A rendered message longer than the internal capacity is cut at the
/// capacity, and one diagnostic record follows reporting the bytes lost.
///
/// Prefer the [`write_log!`] macro, which accepts format arguments directly.
pub fn write_log(level: Level, args: fmt::Arguments<'_>) {
    let settings = settings::lock();
    log_with(&settings, level.ordinal(), args);
}

/// Captures the current call stack and writes it to the logs, most recent
/// calls first, at most fifteen frames.
///
/// Frames are resolved to `function (file:line)` form through an external
/// `addr2line` when one is available, and degrade to raw symbol-table names
/// otherwise. The trace is gated by the debug threshold and is exempt from
/// line wrapping.
pub fn write_stack_trace() {
    let settings = settings::lock();
    trace::write_stack_trace(&settings);
}

/// Sets the verbosity threshold for debug-class records.
///
/// Valid levels:
///
/// | value | meaning |
/// |-------|-----------------------------------------------|
/// | 0     | Info: necessary operational information only  |
/// | 1     | Warnings and below                            |
/// | 2     | Standard debug messages (default)             |
/// | 3     | All debug messages                            |
///
/// Anything else is rejected: the threshold reverts to the default and a
/// usage hint is written on the diagnostic channel.
pub fn set_log_debug_level(level: i32) {
    let mut settings = settings::lock();
    settings.apply_debug_level(level);
}

/// Sets the destination file for log records.
pub fn set_log_file(path: impl AsRef<Path>) {
    let mut settings = settings::lock();
    settings.apply_log_file(path.as_ref());
}

/// Enables or disables silent mode.
///
/// When silent mode is enabled nothing is written to the console; file
/// output continues normally.
pub fn set_log_silent_mode(silent: bool) {
    let mut settings = settings::lock();
    settings.apply_silent_mode(silent);
}

/// Enables or disables line wrapping.
///
/// When enabled, records over 80 characters are reflowed so every line stays
/// below the limit, with continuations aligned under the record prefix.
pub fn set_line_wrap(wrap: bool) {
    let mut settings = settings::lock();
    settings.apply_line_wrap(wrap);
}

/// Deletes the destination file and recreates it empty.
///
/// If an existing file cannot be deleted the platform error is reported and
/// the process exits with a non-zero status; this is the logger's single
/// fatal path.
pub fn flush_log() {
    let settings = settings::lock();
    settings.flush();
}

/// Loads logger settings from the `key=value` config file at `path`.
///
/// Supported keys:
///
/// - `silent` — enables/disables silent mode (see [`set_log_silent_mode`])
/// - `wrap` — enables/disables line wrapping (see [`set_line_wrap`])
/// - `flush` — clears the log file when `true` (see [`flush_log`])
/// - `debug` — sets the verbosity threshold (see [`set_log_debug_level`])
/// - `logfile` — sets the destination path (see [`set_log_file`])
///
/// Settings apply in a fixed order: file path, conditional flush, silent
/// mode, wrap mode, debug level. A missing or unreadable file logs one
/// diagnostic record and changes nothing.
pub fn load_config(path: impl AsRef<Path>) {
    let mut settings = settings::lock();
    config::load_config(&mut settings, path.as_ref());
}

/// Returns the current verbosity threshold.
#[must_use]
pub fn log_debug_level() -> Level {
    settings::lock().threshold
}

/// Returns the current destination file path.
#[must_use]
pub fn log_file() -> PathBuf {
    settings::lock().log_file.clone()
}

/// Returns whether silent mode is enabled.
#[must_use]
pub fn silent_mode() -> bool {
    settings::lock().silent
}

/// Returns whether line wrapping is enabled.
#[must_use]
pub fn line_wrap() -> bool {
    settings::lock().wrap
}

/// Dispatches one record and, when the render was truncated, follows up with
/// exactly one diagnostic record naming the bytes lost.
///
/// The follow-up itself is far below the render capacity and cannot recurse;
/// the diagnostic channel never carries an errno annotation, so a stale
/// indicator is never re-reported.
pub(crate) fn log_with(settings: &Settings, ordinal: i32, args: fmt::Arguments<'_>) {
    let lost = dispatch::dispatch(settings, ordinal, args);
    if lost > 0 {
        dispatch::dispatch(
            settings,
            level::LOGGER,
            format_args!("Previous message truncated by {lost} bytes to fit into buffer"),
        );
    }
}

/// Formats and writes one record at the given level.
///
/// Expands to [`write_log`] with [`format_args!`] semantics:
///
/// ```rust,no_run
/// use simplog::Level;
///
/// simplog::write_log!(Level::Warn, "disk {}% full", 93);
/// ```
#[macro_export]
macro_rules! write_log {
    ($level:expr, $($arg:tt)*) => {
        $crate::write_log($level, ::core::format_args!($($arg)*))
    };
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        InvalidLevelError, Level, ParseLevelError, WRAP_COLUMNS, flush_log, line_wrap,
        load_config, log_debug_level, log_file, set_line_wrap, set_log_debug_level, set_log_file,
        set_log_silent_mode, silent_mode, wrap_lines, write_log, write_stack_trace,
    };
}
