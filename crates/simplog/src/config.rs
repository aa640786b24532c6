//! Loads logger settings from a `key=value` configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::level;
use crate::settings::Settings;

/// Parses the file at `path` and applies the recognized settings.
///
/// Recognized keys: `silent`, `wrap`, `flush` (booleans, literally `true` or
/// `false`), `debug` (decimal level ordinal), `logfile` (path). Lines without
/// a `=`, unknown keys, and malformed boolean values are skipped; a malformed
/// `debug` value degrades to 0. A missing or unreadable file logs one
/// diagnostic record and leaves every setting unchanged.
pub(crate) fn load_config(settings: &mut Settings, path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        crate::log_with(
            settings,
            level::LOGGER,
            format_args!("Unable to open config file: '{}'", path.display()),
        );
        return;
    };

    // Parsed values start from the current settings so that keys absent from
    // the file keep their prior state.
    let mut silent = settings.silent;
    let mut wrap = settings.wrap;
    let mut flush = false;
    let mut debug = settings.threshold.ordinal();
    let mut log_file = settings.log_file.clone();

    for line in contents.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        match key {
            "silent" => {
                if let Some(parsed) = parse_bool(value) {
                    silent = parsed;
                }
            }
            "wrap" => {
                if let Some(parsed) = parse_bool(value) {
                    wrap = parsed;
                }
            }
            "flush" => {
                if let Some(parsed) = parse_bool(value) {
                    flush = parsed;
                }
            }
            "debug" => debug = value.parse().unwrap_or(0),
            "logfile" => log_file = PathBuf::from(value),
            _ => {}
        }
    }

    // Fixed application order: file path, conditional flush, silent mode,
    // wrap mode, debug level.
    if silent {
        // The path changes without a confirmation record when the same file
        // also requests silent mode.
        settings.log_file = log_file;
    } else {
        settings.apply_log_file(&log_file);
    }
    if flush {
        settings.flush();
    }
    settings.apply_silent_mode(silent);
    settings.apply_line_wrap(wrap);
    settings.apply_debug_level(debug);
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
