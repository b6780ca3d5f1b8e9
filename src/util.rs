//! Line and delimiter utilities

use regex::Regex;
use std::sync::LazyLock;

static RE_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r\n|\r|\n").unwrap());

/// Detect the line terminator used by a message body.
///
/// Returns the first terminator found among `\r\n`, `\r` and `\n`, falling
/// back to `\n` for single-line bodies so rejoining always has a delimiter.
#[must_use]
pub fn detect_delimiter(msg_body: &str) -> &'static str {
    match RE_DELIMITER.find(msg_body).map(|m| m.as_str()) {
        Some("\r\n") => "\r\n",
        Some("\r") => "\r",
        _ => "\n",
    }
}

/// Split a message body into lines on any of `\r\n`, `\r`, `\n`.
///
/// A trailing `\n` does not produce a spurious empty final element,
/// mirroring Python's `splitlines`:
///
/// ```rust
/// use reply_extract::split_lines;
///
/// assert_eq!(split_lines("hello\rworld\n"), vec!["hello", "world"]);
/// ```
#[must_use]
pub fn split_lines(msg_body: &str) -> Vec<&str> {
    let bytes = msg_body.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\r' => {
                lines.push(&msg_body[start..i]);
                i += if bytes.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
                start = i;
            }
            b'\n' => {
                lines.push(&msg_body[start..i]);
                i += 1;
                start = i;
            }
            _ => i += 1,
        }
    }
    lines.push(&msg_body[start..]);

    // drop exactly one empty entry produced by a terminating newline
    if msg_body.ends_with('\n') && lines.last() == Some(&"") {
        lines.pop();
    }

    lines
}
