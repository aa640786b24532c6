//! Severity levels and the emission policy.
//!
//! Levels carry fixed ordinal values so that the verbosity threshold can be
//! compared numerically. Two additional channel ordinals above
//! [`Level::Verbose`] are reserved for the logger's own diagnostics and for
//! rendered stack traces; they are not constructible [`Level`] values and are
//! gated by the [`Level::Debug`] threshold.

use std::fmt;
use std::str::FromStr;

use colored::Color;
use thiserror::Error;

/// Channel ordinal for the logger's own diagnostic messages.
pub(crate) const LOGGER: i32 = 4;
/// Channel ordinal for rendered stack traces.
pub(crate) const TRACE: i32 = 5;

/// Log level for filtering messages.
///
/// `Fatal` and `Error` are below the filter floor and always emit. `Info`
/// through `Verbose` form the debug-class range a threshold selects from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Level {
    /// A fatal error has occurred: the program will exit immediately.
    Fatal = -2,
    /// An error has occurred: the program may not exit.
    Error = -1,
    /// Necessary information regarding program operation.
    Info = 0,
    /// Any circumstance that may not affect normal operation.
    Warn = 1,
    /// Standard debug messages (default threshold).
    Debug = 2,
    /// All debug messages.
    Verbose = 3,
}

impl Level {
    /// Returns the fixed ordinal value of the level.
    #[must_use]
    pub fn ordinal(self) -> i32 {
        self as i32
    }

    /// Returns the string representation of the level.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fatal => "fatal",
            Self::Error => "error",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Debug => "debug",
            Self::Verbose => "verbose",
        }
    }
}

impl PartialOrd for Level {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Level {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (*self as i32).cmp(&(*other as i32))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fatal" => Ok(Self::Fatal),
            "error" => Ok(Self::Error),
            "info" => Ok(Self::Info),
            "warn" => Ok(Self::Warn),
            "debug" => Ok(Self::Debug),
            "verbose" => Ok(Self::Verbose),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

impl TryFrom<i32> for Level {
    type Error = InvalidLevelError;

    fn try_from(ordinal: i32) -> Result<Self, InvalidLevelError> {
        match ordinal {
            -2 => Ok(Self::Fatal),
            -1 => Ok(Self::Error),
            0 => Ok(Self::Info),
            1 => Ok(Self::Warn),
            2 => Ok(Self::Debug),
            3 => Ok(Self::Verbose),
            _ => Err(InvalidLevelError(ordinal)),
        }
    }
}

/// Error returned when parsing an invalid log level string.
///
/// Accepted strings (case-insensitive): `"fatal"`, `"error"`, `"info"`,
/// `"warn"`, `"debug"`, `"verbose"`.
#[derive(Error, Debug, Clone)]
#[error("invalid level: {0:?}")]
pub struct ParseLevelError(String);

/// Error returned when converting an out-of-range ordinal to a [`Level`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid level ordinal: {0}")]
pub struct InvalidLevelError(pub i32);

/// Which console stream a record is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConsoleStream {
    Stdout,
    Stderr,
}

/// The resolved emission decision for one dispatch.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Directive {
    /// Label text, rendered padded to five columns.
    pub label: &'static str,
    /// Console color for the record.
    pub color: Color,
    /// Console stream for the record.
    pub stream: ConsoleStream,
    /// Whether the record is eligible for line wrapping.
    pub wrap: bool,
    /// Whether a non-zero error indicator is appended as a second line.
    pub errno: bool,
}

/// Resolves a channel ordinal against the current threshold.
///
/// Returns `None` when the record must not be emitted. Unrecognized ordinals
/// resolve to `None` rather than an error so that callers passing levels from
/// a newer revision degrade to silence.
pub(crate) fn directive(ordinal: i32, threshold: Level) -> Option<Directive> {
    let directive = match ordinal {
        // Fatal and Error are never filtered.
        -2 => Directive {
            label: "FATAL",
            color: Color::Red,
            stream: ConsoleStream::Stderr,
            wrap: true,
            errno: true,
        },
        -1 => Directive {
            label: "ERROR",
            color: Color::BrightRed,
            stream: ConsoleStream::Stderr,
            wrap: true,
            errno: true,
        },
        // Info is the floor of the threshold range and always passes.
        0 => Directive {
            label: "INFO",
            color: Color::White,
            stream: ConsoleStream::Stdout,
            wrap: true,
            errno: false,
        },
        1 if threshold >= Level::Warn => Directive {
            label: "WARN",
            color: Color::Yellow,
            stream: ConsoleStream::Stdout,
            wrap: true,
            errno: false,
        },
        2 if threshold >= Level::Debug => Directive {
            label: "DEBUG",
            color: Color::BrightBlue,
            stream: ConsoleStream::Stdout,
            wrap: true,
            errno: false,
        },
        // Verbose is extra debug detail, not a separate category to the
        // reader: same label as Debug, distinct color.
        3 if threshold >= Level::Verbose => Directive {
            label: "DEBUG",
            color: Color::Cyan,
            stream: ConsoleStream::Stdout,
            wrap: true,
            errno: false,
        },
        // Internal channels print pre-formatted content and are never
        // wrapped.
        LOGGER if threshold >= Level::Debug => Directive {
            label: "LOG",
            color: Color::BrightBlack,
            stream: ConsoleStream::Stdout,
            wrap: false,
            errno: false,
        },
        TRACE if threshold >= Level::Debug => Directive {
            label: "TRACE",
            color: Color::BrightMagenta,
            stream: ConsoleStream::Stdout,
            wrap: false,
            errno: false,
        },
        _ => return None,
    };
    Some(directive)
}
