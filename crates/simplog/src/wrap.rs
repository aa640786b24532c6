//! Reflows over-length record text into multiple indented lines.

/// Column limit applied by the dispatcher when line wrapping is enabled.
pub const WRAP_COLUMNS: usize = 80;

/// Continuation indent: 30 spaces plus a tab, aligning wrapped text under the
/// timestamp + label prefix of a record.
pub(crate) const INDENT: &str = "                              \t";

/// Reflows `text` so that no line exceeds `max_width` columns.
///
/// Each input line is wrapped independently. A line is broken at the last
/// space at or before the limit; the overflow continues on a new line
/// prefixed with the continuation indent. A whitespace-free run longer than
/// the limit is not split; it takes a whole line in full. The result always
/// ends with exactly one trailing newline, and lines already within the limit
/// pass through unchanged.
#[must_use]
pub fn wrap_lines(text: &str, max_width: usize) -> String {
    let max_width = max_width.max(1);
    let mut out = String::with_capacity(text.len() + INDENT.len() * (text.len() / max_width + 1));
    for line in text.lines() {
        wrap_line(line, max_width, &mut out);
    }
    out
}

fn wrap_line(line: &str, max_width: usize, out: &mut String) {
    if line.chars().count() <= max_width {
        out.push_str(line);
        out.push('\n');
        return;
    }

    // Continuation lines reserve room for the indent prefix.
    let cont_width = max_width.saturating_sub(INDENT.chars().count()).max(1);
    let mut remaining = line;
    let mut width = max_width;
    loop {
        if remaining.chars().count() <= width {
            out.push_str(remaining);
            break;
        }
        let prefix_end = byte_offset_of_char(remaining, width);
        let split = match remaining[..prefix_end].rfind(' ') {
            Some(idx) => idx,
            // No break point within the limit: the leading run takes a whole
            // line unsplit.
            None => match remaining.find(' ') {
                Some(idx) => idx,
                None => {
                    out.push_str(remaining);
                    break;
                }
            },
        };
        out.push_str(&remaining[..split]);
        remaining = &remaining[split + 1..];
        if remaining.is_empty() {
            break;
        }
        out.push('\n');
        out.push_str(INDENT);
        width = cont_width;
    }
    out.push('\n');
}

fn byte_offset_of_char(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map_or(s.len(), |(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indent_is_thirty_spaces_and_a_tab() {
        assert_eq!(INDENT.len(), 31);
        assert!(INDENT[..30].chars().all(|c| c == ' '));
        assert!(INDENT.ends_with('\t'));
    }

    #[test]
    fn short_line_passes_through_with_trailing_newline() {
        assert_eq!(wrap_lines("hello world", WRAP_COLUMNS), "hello world\n");
        assert_eq!(wrap_lines("hello world\n", WRAP_COLUMNS), "hello world\n");
    }

    #[test]
    fn wrapping_short_lines_is_idempotent() {
        let text = "a short record line\n";
        let once = wrap_lines(text, WRAP_COLUMNS);
        let twice = wrap_lines(&once, WRAP_COLUMNS);
        assert_eq!(once, twice);
    }

    #[test]
    fn long_line_breaks_at_last_space_before_limit() {
        let words = "word ".repeat(30);
        let wrapped = wrap_lines(words.trim_end(), WRAP_COLUMNS);
        for line in wrapped.lines() {
            assert!(
                line.chars().count() <= WRAP_COLUMNS,
                "line too long: {line:?}"
            );
        }
        assert!(wrapped.lines().nth(1).unwrap().starts_with(INDENT));
    }

    #[test]
    fn record_prefix_tab_survives_wrapping() {
        let record = format!("[2014-02-01 12:00:00]\tDEBUG : {}", "word ".repeat(25));
        let wrapped = wrap_lines(record.trim_end(), WRAP_COLUMNS);
        assert!(wrapped.starts_with("[2014-02-01 12:00:00]\tDEBUG : "));
    }

    #[test]
    fn oversized_word_is_not_split() {
        let long_word = "x".repeat(120);
        let text = format!("prefix words before {long_word} after");
        let wrapped = wrap_lines(&text, WRAP_COLUMNS);
        assert!(
            wrapped.lines().any(|line| line.contains(&long_word)),
            "run was split across lines"
        );
    }

    #[test]
    fn break_spaces_are_the_only_bytes_changed() {
        let text = format!("[2014-02-01 12:00:00]\tINFO  : {}", "alpha beta ".repeat(12));
        let text = text.trim_end().to_string();
        let wrapped = wrap_lines(&text, WRAP_COLUMNS);
        let rejoined = wrapped
            .trim_end_matches('\n')
            .replace(&format!("\n{INDENT}"), " ");
        assert_eq!(rejoined, text);
    }

    #[test]
    fn each_input_line_wraps_independently() {
        let text = format!("{}\n{}", "word ".repeat(25).trim_end(), "short errno line");
        let wrapped = wrap_lines(&text, WRAP_COLUMNS);
        assert!(wrapped.ends_with("short errno line\n"));
    }

    #[test]
    fn exactly_one_trailing_newline() {
        let wrapped = wrap_lines(&"word ".repeat(40), WRAP_COLUMNS);
        assert!(wrapped.ends_with('\n'));
        assert!(!wrapped.ends_with("\n\n"));
    }
}
