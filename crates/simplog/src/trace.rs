//! Call-stack capture and symbolization.
//!
//! Two symbolization strategies exist behind the [`Symbolizer`] trait. The
//! primary strategy shells out to `addr2line` once per return address for
//! `function (file:line)` descriptions; when the tool is missing or cannot
//! resolve anything, the raw symbol table carried by the `backtrace` crate
//! takes over. Selection happens at runtime on every capture, never at
//! compile time.

use std::io;
use std::path::PathBuf;
use std::process::Command;

use backtrace::{Backtrace, BacktraceFrame};
use thiserror::Error;

use crate::level;
use crate::settings::Settings;
use crate::wrap;

/// Most frames a trace will render.
const MAX_FRAMES: usize = 15;
/// Cap on the assembled trace text, 255 bytes per potential frame.
const MAX_TRACE_BYTES: usize = MAX_FRAMES * 255;
const TRUNCATION_MARKER: &str = " [backtrace truncated]";

/// Reasons the primary symbolizer is abandoned. Each degrades to the
/// standard backtrace with one diagnostic record; none propagates.
#[derive(Debug, Error)]
enum TraceError {
    #[error(
        "Function 'addr2line' unavailable. Defaulting to standard backtrace. \
         Please install package 'binutils' for better stacktrace output."
    )]
    ToolUnavailable,
    #[error("Unable to get execution path. Defaulting to standard backtrace.")]
    ExePath(#[source] io::Error),
    #[error("Failed to execute command: 'addr2line'. Defaulting to standard backtrace.")]
    Spawn(#[source] io::Error),
    #[error("Command 'addr2line' failed to evaluate addresses. Defaulting to standard backtrace.")]
    Unresolved,
}

/// A strategy for turning captured frames into one description per frame.
trait Symbolizer {
    fn describe(&self, frames: &[&BacktraceFrame]) -> Result<Vec<String>, TraceError>;
}

/// Primary strategy: out-of-process `addr2line`, one invocation per address,
/// against the current executable.
struct Addr2Line {
    exe: PathBuf,
}

impl Addr2Line {
    /// Runtime availability probe for the external tool.
    fn available() -> bool {
        Command::new("which")
            .arg("addr2line")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    fn new() -> Result<Self, TraceError> {
        if !Self::available() {
            return Err(TraceError::ToolUnavailable);
        }
        let exe = std::env::current_exe().map_err(TraceError::ExePath)?;
        Ok(Self { exe })
    }
}

impl Symbolizer for Addr2Line {
    fn describe(&self, frames: &[&BacktraceFrame]) -> Result<Vec<String>, TraceError> {
        let mut resolved_any = false;
        let mut descriptions = Vec::with_capacity(frames.len());
        for frame in frames {
            let addr = frame.ip() as usize;
            let output = Command::new("addr2line")
                .arg("-Cfispe")
                .arg(&self.exe)
                .arg(format!("{addr:x}"))
                .output()
                .map_err(TraceError::Spawn)?;
            let line = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string();
            if !line.is_empty() && line != "??" && line != "?? ??:0" {
                resolved_any = true;
            }
            descriptions.push(line);
        }
        if !resolved_any {
            return Err(TraceError::Unresolved);
        }
        Ok(descriptions)
    }
}

/// Fallback strategy: addresses plus the nearest symbol-table name, no
/// file/line detail.
struct SymbolTable;

impl Symbolizer for SymbolTable {
    fn describe(&self, frames: &[&BacktraceFrame]) -> Result<Vec<String>, TraceError> {
        let descriptions = frames
            .iter()
            .map(|frame| {
                let addr = frame.ip() as usize;
                let name = frame
                    .symbols()
                    .first()
                    .and_then(backtrace::BacktraceSymbol::name)
                    .map_or_else(|| "<unknown>".to_string(), |name| name.to_string());
                format!("{name} [{addr:#x}]")
            })
            .collect();
        Ok(descriptions)
    }
}

/// Captures the current call stack and routes the rendered trace through the
/// dispatcher at the trace channel.
pub(crate) fn write_stack_trace(settings: &Settings) {
    let backtrace = Backtrace::new();
    // The capture frame itself is excluded; most recent calls come first.
    let frames: Vec<&BacktraceFrame> = backtrace.frames().iter().skip(1).take(MAX_FRAMES).collect();

    let descriptions = match Addr2Line::new().and_then(|tool| tool.describe(&frames)) {
        Ok(descriptions) => descriptions,
        Err(err) => {
            crate::log_with(settings, level::LOGGER, format_args!("{err}"));
            SymbolTable
                .describe(&frames)
                .unwrap_or_else(|_| vec!["<unknown>".to_string()])
        }
    };

    let text = assemble(&descriptions);
    crate::log_with(settings, level::TRACE, format_args!("{text}"));
}

/// Joins frame descriptions under the trace header, one aligned line per
/// frame, stopping early rather than exceeding the trace byte cap.
fn assemble(descriptions: &[String]) -> String {
    let mut text = String::from("StackTrace - Most recent calls appear first:");
    for description in descriptions {
        let addition = format!("\n{}{description}", wrap::INDENT);
        if text.len() + addition.len() > MAX_TRACE_BYTES {
            if text.len() + TRUNCATION_MARKER.len() <= MAX_TRACE_BYTES {
                text.push_str(TRUNCATION_MARKER);
            }
            break;
        }
        text.push_str(&addition);
    }
    text
}
