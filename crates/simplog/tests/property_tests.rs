//! Property tests for the line wrapper.

use proptest::prelude::*;
use simplog::{WRAP_COLUMNS, wrap_lines};

/// The continuation prefix wrapped overflow lines carry: 30 spaces + tab.
const CONTINUATION: &str = "\n                              \t";

/// Undoes wrapping by turning every break back into the space it replaced.
fn rejoin(wrapped: &str) -> String {
    wrapped.trim_end_matches('\n').replace(CONTINUATION, " ")
}

proptest! {
    #[test]
    fn short_input_passes_through_unchanged(input in "[ -~]{1,80}") {
        let wrapped = wrap_lines(&input, WRAP_COLUMNS);
        prop_assert_eq!(wrapped, format!("{input}\n"));
    }

    #[test]
    fn bounded_tokens_reflow_within_the_limit(
        tokens in prop::collection::vec("[a-zA-Z0-9]{1,20}", 10..60),
    ) {
        let input = tokens.join(" ");
        prop_assume!(input.chars().count() > WRAP_COLUMNS);

        let wrapped = wrap_lines(&input, WRAP_COLUMNS);
        for line in wrapped.lines() {
            prop_assert!(
                line.chars().count() <= WRAP_COLUMNS,
                "line too long: {:?}",
                line
            );
        }
        prop_assert_eq!(rejoin(&wrapped), input);
    }

    #[test]
    fn oversized_tokens_survive_wrapping_intact(
        tokens in prop::collection::vec("[a-z]{1,120}", 5..30),
    ) {
        let input = tokens.join(" ");
        prop_assume!(input.chars().count() > WRAP_COLUMNS);

        // Runs longer than the limit are never split, so the original text
        // reassembles exactly even when some lines overflow.
        let wrapped = wrap_lines(&input, WRAP_COLUMNS);
        prop_assert_eq!(rejoin(&wrapped), input);
    }

    #[test]
    fn wrapping_bounded_tokens_is_idempotent(
        tokens in prop::collection::vec("[a-zA-Z0-9]{1,20}", 10..60),
    ) {
        let input = tokens.join(" ");
        let once = wrap_lines(&input, WRAP_COLUMNS);
        let twice = wrap_lines(&once, WRAP_COLUMNS);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn output_always_ends_with_one_newline(input in "[ -~]{1,300}") {
        let wrapped = wrap_lines(&input, WRAP_COLUMNS);
        prop_assert!(wrapped.ends_with('\n'));
        prop_assert!(!wrapped.ends_with("\n\n"));
    }
}
