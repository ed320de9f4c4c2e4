//! Content line folding for iCalendar (RFC 5545 §3.1).

use icalfx_core::config::LineEnding;
use icalfx_core::constants::MAX_LINE_OCTETS;

/// Folds a content line to comply with the 75-octet limit and terminates it.
///
/// Lines are folded by inserting a line break followed by a single space,
/// so continuation lines carry at most 74 octets of content. Multi-byte
/// UTF-8 sequences are never split.
#[must_use]
pub fn fold_line(line: &str, ending: LineEnding) -> String {
    let eol = ending.as_str();
    if line.len() <= MAX_LINE_OCTETS {
        return format!("{line}{eol}");
    }

    let mut result = String::with_capacity(line.len() + (line.len() / MAX_LINE_OCTETS + 1) * 3);
    let mut rest = line;
    let mut first_line = true;

    while !rest.is_empty() {
        let max_len = if first_line {
            MAX_LINE_OCTETS
        } else {
            MAX_LINE_OCTETS - 1
        };

        let mut end = rest.len().min(max_len);
        while !rest.is_char_boundary(end) {
            end -= 1;
        }
        if end == 0 {
            // A single code point wider than the budget; emit it whole.
            end = rest.chars().next().map_or(rest.len(), char::len_utf8);
        }

        if !first_line {
            result.push(' ');
        }
        result.push_str(&rest[..end]);
        result.push_str(eol);

        rest = &rest[end..];
        first_line = false;
    }

    result
}
