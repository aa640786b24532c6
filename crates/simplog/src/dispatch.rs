//! Record rendering and sink dispatch.
//!
//! Every dispatch fully completes before returning: render, resolve the
//! emission directive, build the record text, append it to the destination
//! file (open/append/close on every call, so a crash never loses buffered
//! records), and mirror it to the console unless silent mode is on.

use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use chrono::Local;
use colored::Colorize;

use crate::level::{self, ConsoleStream};
use crate::settings::Settings;
use crate::wrap;

/// Upper bound on a rendered user message, sized for a fifteen-frame stack
/// trace plus a message.
pub(crate) const RENDER_CAPACITY: usize = 4146;

/// Current date/time as `[YYYY-MM-DD HH:MM:SS]` in the local timezone.
///
/// Computed fresh on every dispatch; never cached.
pub(crate) fn datestamp() -> String {
    Local::now().format("[%Y-%m-%d %H:%M:%S]").to_string()
}

/// Dispatches one record.
///
/// Returns the number of bytes the rendered message lost to truncation; the
/// public entry point reports a positive count through the diagnostic
/// channel. A record that the level policy filters out performs no I/O and
/// reports no truncation.
pub(crate) fn dispatch(settings: &Settings, ordinal: i32, args: fmt::Arguments<'_>) -> usize {
    // Snapshot the error indicator before this call makes any syscall of its
    // own; the file open below must not disturb what gets reported.
    let errno = io::Error::last_os_error();

    let mut rendered = fmt::format(args);
    let lost = truncate_to_capacity(&mut rendered, RENDER_CAPACITY);

    let Some(directive) = level::directive(ordinal, settings.threshold) else {
        return 0;
    };

    let stamp = datestamp();
    let mut text = format!("{stamp}\t{:<5} : {rendered}\n", directive.label);

    if directive.errno && errno.raw_os_error().is_some_and(|code| code != 0) {
        // Second line aligned under the record text.
        let pad = " ".repeat(stamp.len());
        text.push_str(&format!("{pad}\terrno : {errno}\n"));
    }

    if settings.wrap
        && directive.wrap
        && text.lines().any(|line| line.chars().count() > wrap::WRAP_COLUMNS)
    {
        text = wrap::wrap_lines(&text, wrap::WRAP_COLUMNS);
    }

    // Both sinks are best-effort: the logger must never be the reason the
    // host program fails.
    let _ = append_to_file(&settings.log_file, &text);

    if !settings.silent {
        let painted = text.color(directive.color);
        match directive.stream {
            ConsoleStream::Stderr => {
                let _ = write!(io::stderr(), "{painted}");
            }
            ConsoleStream::Stdout => {
                let _ = write!(io::stdout(), "{painted}");
            }
        }
    }

    lost
}

fn append_to_file(path: &Path, text: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(text.as_bytes())
}

/// Cuts `rendered` at the nearest char boundary at or below `capacity`,
/// returning how many bytes were dropped.
fn truncate_to_capacity(rendered: &mut String, capacity: usize) -> usize {
    if rendered.len() <= capacity {
        return 0;
    }
    let mut cut = capacity;
    while !rendered.is_char_boundary(cut) {
        cut -= 1;
    }
    let lost = rendered.len() - cut;
    rendered.truncate(cut);
    lost
}
