//! Unit tests for simplog error types.
//!
//! Tests verify:
//! - Error creation from invalid level strings and ordinals
//! - Display formatting
//! - Clone/PartialEq derives
//! - FromStr and TryFrom integration

use simplog::{InvalidLevelError, Level, ParseLevelError};
use std::str::FromStr;

mod parse_level_tests {
    use super::*;

    #[test]
    fn invalid_strings_are_rejected() {
        let invalid_inputs = ["", "foobar", "123", "warning", "fatal "];
        for input in invalid_inputs {
            let result = Level::from_str(input);
            assert!(result.is_err(), "Expected error for input: {input}");
        }
    }

    #[test]
    fn parsing_is_case_insensitive() {
        assert_eq!(Level::from_str("VERBOSE").unwrap(), Level::Verbose);
        assert_eq!(Level::from_str("Fatal").unwrap(), Level::Fatal);
        assert_eq!("info".parse::<Level>().unwrap(), Level::Info);
    }

    #[test]
    fn display_names_the_rejected_input() {
        let error = Level::from_str("nonsense").unwrap_err();
        assert!(error.to_string().contains("nonsense"));
        assert!(error.to_string().contains("invalid level"));
    }

    #[test]
    fn error_is_cloneable() {
        let error: ParseLevelError = Level::from_str("bad").unwrap_err();
        let cloned = error.clone();
        assert_eq!(error.to_string(), cloned.to_string());
    }
}

mod invalid_ordinal_tests {
    use super::*;

    #[test]
    fn out_of_range_ordinals_are_rejected() {
        for ordinal in [-3, 4, 5, 42, i32::MIN] {
            assert_eq!(
                Level::try_from(ordinal),
                Err(InvalidLevelError(ordinal)),
                "Expected error for ordinal: {ordinal}"
            );
        }
    }

    #[test]
    fn in_range_ordinals_round_trip() {
        for ordinal in -2..=3 {
            let level = Level::try_from(ordinal).unwrap();
            assert_eq!(level.ordinal(), ordinal);
        }
    }

    #[test]
    fn display_names_the_rejected_ordinal() {
        let error = Level::try_from(99).unwrap_err();
        assert!(error.to_string().contains("99"));
    }
}

mod level_api_tests {
    use super::*;

    #[test]
    fn display_matches_as_str() {
        for level in [
            Level::Fatal,
            Level::Error,
            Level::Info,
            Level::Warn,
            Level::Debug,
            Level::Verbose,
        ] {
            assert_eq!(level.to_string(), level.as_str());
        }
    }

    #[test]
    fn ordering_tracks_verbosity() {
        assert!(Level::Fatal < Level::Info);
        assert!(Level::Info < Level::Verbose);
        assert_eq!(Level::Warn.max(Level::Debug), Level::Debug);
    }
}
