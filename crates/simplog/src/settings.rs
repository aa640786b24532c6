//! Process-wide logger configuration.
//!
//! There is exactly one active configuration per process, initialized to the
//! documented defaults on first use and reclaimed at process exit. All public
//! operations lock it once at entry; internal helpers receive a borrow, so
//! nothing on the dispatch path ever takes the lock twice.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

use colored::{Color, Colorize};

use crate::dispatch;
use crate::level::{self, Level};
use crate::wrap;

/// Default destination file for log records.
pub(crate) const DEFAULT_LOG_FILE: &str = "default.log";

/// Mutable logger state consumed by the dispatch pipeline.
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    /// Maximum debug-class level allowed through.
    pub threshold: Level,
    /// Destination file records are appended to.
    pub log_file: PathBuf,
    /// When set, console sinks are skipped; the file sink never is.
    pub silent: bool,
    /// When set, wrappable records are reflowed to the column limit.
    pub wrap: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            threshold: Level::Debug,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            silent: false,
            wrap: true,
        }
    }
}

static SETTINGS: LazyLock<Mutex<Settings>> = LazyLock::new(|| Mutex::new(Settings::default()));

/// Locks the global settings for the duration of one public operation.
///
/// The same lock serializes the whole dispatch path. A poisoned lock is
/// recovered with the inner value: the logger must keep working after an
/// unrelated thread panicked mid-log.
pub(crate) fn lock() -> MutexGuard<'static, Settings> {
    SETTINGS.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Settings {
    /// Sets the verbosity threshold.
    ///
    /// Out-of-range ordinals are rejected: the threshold falls back to the
    /// default and a usage hint goes out on the diagnostic channel.
    pub(crate) fn apply_debug_level(&mut self, requested: i32) {
        match Level::try_from(requested) {
            Ok(threshold) if threshold >= Level::Info => {
                self.threshold = threshold;
                crate::log_with(
                    self,
                    level::LOGGER,
                    format_args!("Debug level set to {requested}"),
                );
            }
            _ => {
                self.threshold = Level::Debug;
                crate::log_with(
                    self,
                    level::LOGGER,
                    format_args!(
                        "Invalid debug level of '{requested}'. Setting to default value of '{default}'\n\
                         {i}Valid Debug Levels:\n\
                         {i}0  : Info\n\
                         {i}1  : Warnings\n\
                         {i}2  : Debug\n\
                         {i}3  : Debug-Verbose",
                        default = Level::Debug.ordinal(),
                        i = wrap::INDENT
                    ),
                );
            }
        }
    }

    /// Sets the destination file for log records.
    pub(crate) fn apply_log_file(&mut self, path: &Path) {
        self.log_file = path.to_path_buf();
        crate::log_with(
            self,
            level::LOGGER,
            format_args!("Log file set to '{}'", self.log_file.display()),
        );
    }

    /// Enables or disables silent mode. File output continues either way.
    pub(crate) fn apply_silent_mode(&mut self, silent: bool) {
        self.silent = silent;
        crate::log_with(
            self,
            level::LOGGER,
            format_args!(
                "Silent mode {}",
                if silent { "enabled" } else { "disabled" }
            ),
        );
    }

    /// Enables or disables line wrapping for wrappable records.
    pub(crate) fn apply_line_wrap(&mut self, wrap: bool) {
        self.wrap = wrap;
        crate::log_with(
            self,
            level::LOGGER,
            format_args!(
                "Line wrapping {}",
                if wrap { "enabled" } else { "disabled" }
            ),
        );
    }

    /// Deletes and recreates the destination file as empty.
    ///
    /// Failing to delete an existing file is the single fatal path: the
    /// platform error is reported and the process exits non-zero.
    pub(crate) fn flush(&self) {
        if self.log_file.exists() {
            if let Err(err) = fs::remove_file(&self.log_file) {
                eprintln!("ERROR: Unable to flush logfile!: {err}");
                process::exit(1);
            }
        } else if !self.silent {
            // Console-only notice; there is no file to carry it yet.
            let notice = format!(
                "{}\t{:<5} : Logfile '{}' does not exist. It will be created now.\n",
                dispatch::datestamp(),
                "LOG",
                self.log_file.display()
            );
            print!("{}", notice.color(Color::BrightBlack));
            let _ = io::stdout().flush();
        }
        let _ = fs::File::create(&self.log_file);
        crate::log_with(
            self,
            level::LOGGER,
            format_args!("Log file '{}' cleared", self.log_file.display()),
        );
    }
}
