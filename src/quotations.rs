//! Quotation stripping for plain-text message bodies.
//!
//! Works in two stages. [`mark_lines`] classifies every physical line into a
//! small marker alphabet (empty, quote-marked, splitter, forwarded, text).
//! [`resolve_quotation`] then matches structural patterns over the marker
//! sequence itself, encoded one ASCII character per symbol, to locate the
//! quoted tail and excise it. Marker symbols never mix with message content.

use crate::error::{ExtractError, Result};
use crate::types::{ContentType, QuotationMarker};
use crate::util::{detect_delimiter, split_lines};
use regex::{Captures, Regex};
use std::ops::Range;
use std::sync::LazyLock;
use tracing::debug;

/// A splitter takes 4 physical lines at most
const SPLITTER_MAX_LINES: usize = 4;

/// Messages longer than this are returned unchanged to cap matching cost
const MAX_LINES_COUNT: usize = 1000;

// 'On <date>, <person> wrote:' — the date part ends with a comma and the
// whole splitter may wrap onto up to 3 further lines
const ON_DATE_SMB_WROTE: &str = r"-* ?On .*,(?:.*\n){0,3}.*(?:wrote|sent):";

static RE_ON_DATE_SMB_WROTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ON_DATE_SMB_WROTE).unwrap());

static SPLITTER_PATTERNS: LazyLock<[Regex; 5]> = LazyLock::new(|| {
    [
        // ------Original Message------ or ---- Reply Message ----
        Regex::new(r"(?i)\A\s*-+[ ]*(?:Original|Reply) Message[ ]*-+").unwrap(),
        // <date> <person>
        Regex::new(r"\A(?:\d+/\d+/\d+|\d+\.\d+\.\d+).*@").unwrap(),
        Regex::new(&format!(r"\A{ON_DATE_SMB_WROTE}")).unwrap(),
        // header block, optionally preceded by an underscore divider
        Regex::new(r"\A(?:_+\r?\n)?\s*(?::?\*?From|Date):\*? .*").unwrap(),
        // compact one-line header ending in @domain:
        Regex::new(r"\A\S{3,10}, \d\d? \S{3,10} 20\d\d,? \d\d?:\d\d(?::\d\d)?(?: \S+){3,6}@\S+:")
            .unwrap(),
    ]
});

static RE_FWD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^-+[ ]*Forwarded message[ ]*-+$").unwrap());

static RE_QUOT_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^>+ ?").unwrap());

static RE_LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<(http://[^>]*)>").unwrap());

static RE_NORMALIZED_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@@(http://[^>@]*)@@").unwrap());

static RE_PARENTHESIS_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(https?://").unwrap());

static RE_PARENTHESIS_LINK_AT_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A\(https?://").unwrap());

// Patterns below run against the marker sequence, not message text.

// quotation border: a splitter line or a number of quote-marker lines,
// arbitrary marked lines in between, ending with a quote-marker line;
// after the quotation only text or empty lines are allowed
static RE_QUOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"((?:s|(?:me*){2,}).*me*)[te]*$").unwrap());

// same border but nothing except empty lines after it
static RE_EMPTY_QUOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"((?:s|(?:me*){2,}))e*").unwrap());

// unmarked content trailing one or more splitters, with no closing markers
static RE_UNMARKED_TAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:se*)+(?:[tf]+e*)+").unwrap());

static RE_FWD_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\A[te]*f").unwrap());

static RE_STRAY_MARKERS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:me*){3}").unwrap());

/// Extract the non-quoted part of a message for the given content type.
///
/// HTML stripping is an explicit capability gap rather than a silent
/// passthrough.
pub fn extract_reply_text(msg_body: &str, content_type: ContentType) -> Result<String> {
    match content_type {
        ContentType::Plain => Ok(extract_from_plain(msg_body)),
        ContentType::Html => Err(ExtractError::UnsupportedContentType(content_type)),
    }
}

/// Extract the non-quoted message from decoded plain text.
///
/// ```rust
/// let body = "Test reply\n\nOn 04/19/2011 07:10 AM, Roman Tkachenko wrote:\n\n> Hi";
/// assert_eq!(reply_extract::extract_from_plain(body), "Test reply");
/// ```
#[must_use]
pub fn extract_from_plain(msg_body: &str) -> String {
    let delimiter = detect_delimiter(msg_body);
    let prepared = preprocess(msg_body, delimiter);
    let lines = split_lines(&prepared);

    // don't process too long messages
    if lines.len() > MAX_LINES_COUNT {
        return msg_body.to_string();
    }

    let markers = mark_lines(&lines);
    let resolved = resolve_quotation(&lines, &markers);
    if let Some(range) = &resolved.removed {
        debug!("stripped quoted lines {}..{}", range.start, range.end);
    }

    postprocess(&resolved.lines.join(delimiter))
}

/// Prepare a message body for being stripped.
///
/// Replaces the `<` `>` wrapping a link with sentinel symbols so that the
/// closing `>` cannot be mistaken for a quotation marker, and pushes an
/// `On <date>, <person> wrote:` splitter sharing a physical line with reply
/// text onto its own line.
#[must_use]
pub fn preprocess(msg_body: &str, delimiter: &str) -> String {
    let guarded = guard_links(msg_body);
    wrap_splitters(&guarded, delimiter)
}

fn guard_links(msg_body: &str) -> String {
    let mut out = String::with_capacity(msg_body.len());
    let mut last = 0;
    for caps in RE_LINK.captures_iter(msg_body) {
        let (Some(whole), Some(url)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        out.push_str(&msg_body[last..whole.start()]);

        // a link inside a quoted line is legitimately bracketed
        let line_start = msg_body[..whole.start()].rfind('\n').map_or(0, |i| i + 1);
        if msg_body[line_start..].starts_with('>') {
            out.push_str(whole.as_str());
        } else {
            out.push_str("@@");
            out.push_str(url.as_str());
            out.push_str("@@");
        }
        last = whole.end();
    }
    out.push_str(&msg_body[last..]);
    out
}

fn wrap_splitters(msg_body: &str, delimiter: &str) -> String {
    let mut out = String::with_capacity(msg_body.len() + delimiter.len());
    let mut last = 0;
    for m in RE_ON_DATE_SMB_WROTE.find_iter(msg_body) {
        out.push_str(&msg_body[last..m.start()]);
        if m.start() > 0 && msg_body.as_bytes()[m.start() - 1] != b'\n' {
            out.push_str(delimiter);
        }
        out.push_str(m.as_str());
        last = m.end();
    }
    out.push_str(&msg_body[last..]);
    out
}

/// Classify message lines to distinguish quotation lines.
///
/// Runs a single left-to-right pass with a lookahead window of up to
/// [`SPLITTER_MAX_LINES`] lines for multi-line splitters; every line a
/// splitter match spans is marked [`QuotationMarker::Splitter`]. The returned
/// sequence is always aligned 1:1 with `lines`.
#[must_use]
pub fn mark_lines(lines: &[&str]) -> Vec<QuotationMarker> {
    let mut markers = vec![QuotationMarker::Text; lines.len()];
    let mut i = 0;
    while i < lines.len() {
        if lines[i].trim().is_empty() {
            markers[i] = QuotationMarker::Empty;
        } else if RE_QUOT_MARKER.is_match(lines[i]) {
            markers[i] = QuotationMarker::QuoteMark;
        } else if RE_FWD.is_match(lines[i]) {
            markers[i] = QuotationMarker::Forwarded;
        } else {
            let window = lines[i..lines.len().min(i + SPLITTER_MAX_LINES)].join("\n");
            if let Some(splitter) = splitter_match(&window) {
                let span = split_lines(splitter).len();
                for marker in markers.iter_mut().skip(i).take(span) {
                    *marker = QuotationMarker::Splitter;
                }
                i += span - 1;
            }
        }
        i += 1;
    }
    markers
}

/// Return the matched splitter text if the window starts with one
fn splitter_match(window: &str) -> Option<&str> {
    SPLITTER_PATTERNS
        .iter()
        .find_map(|pattern| pattern.find(window))
        .map(|m| m.as_str())
}

/// Outcome of [`resolve_quotation`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedQuotation<'a> {
    /// Surviving lines, a prefix-concatenated-with-suffix of the input
    pub lines: Vec<&'a str>,

    /// Half-open index range that was excised, if any (diagnostic only)
    pub removed: Option<Range<usize>>,
}

impl<'a> ResolvedQuotation<'a> {
    fn unchanged(lines: &[&'a str]) -> Self {
        Self {
            lines: lines.to_vec(),
            removed: None,
        }
    }
}

/// Match structural patterns over the marker sequence to strip quotations,
/// keeping only the last message's lines.
#[must_use]
pub fn resolve_quotation<'a>(lines: &[&'a str], markers: &[QuotationMarker]) -> ResolvedQuotation<'a> {
    let mut markers = markers.to_vec();
    let mut sequence: String = markers.iter().map(|m| m.symbol()).collect();

    // if there is no splitter there should be no markers: demote stray `>`
    // lines (ASCII art, emoticons) back to text
    if !sequence.contains('s') && !RE_STRAY_MARKERS.is_match(&sequence) {
        for marker in &mut markers {
            if *marker == QuotationMarker::QuoteMark {
                *marker = QuotationMarker::Text;
            }
        }
        sequence = markers.iter().map(|m| m.symbol()).collect();
    }

    // forwarded message with nothing quoted before it stays intact
    if RE_FWD_PREFIX.is_match(&sequence) {
        return ResolvedQuotation::unchanged(lines);
    }

    // interleaved reply/quote runs mean an inline reply, unless the run is
    // really a long link wrapped over several lines
    for start in inline_reply_starts(&sequence) {
        let wrapped_link = RE_PARENTHESIS_LINK.is_match(lines[start - 1])
            || RE_PARENTHESIS_LINK_AT_START.is_match(lines[start].trim());
        if !wrapped_link {
            return ResolvedQuotation::unchanged(lines);
        }
    }

    // text lines coming after a splitter with no markers are a quotation dump
    if let Some(m) = RE_UNMARKED_TAIL.find(&sequence) {
        return ResolvedQuotation {
            lines: lines[..m.start()].to_vec(),
            removed: Some(m.start()..lines.len()),
        };
    }

    // the general case with quote markers
    let quotation = RE_QUOTATION
        .captures(&sequence)
        .or_else(|| RE_EMPTY_QUOTATION.captures(&sequence));
    if let Some(group) = quotation.and_then(|caps| caps.get(1)) {
        let kept = lines[..group.start()]
            .iter()
            .chain(&lines[group.end()..])
            .copied()
            .collect();
        return ResolvedQuotation {
            lines: kept,
            removed: Some(group.start()..group.end()),
        };
    }

    ResolvedQuotation::unchanged(lines)
}

/// Start indexes of every maximal `(?<=m)e*(t+e*)+m` run in the sequence.
///
/// Runs are anchored right after a quote-marker line so overlapping
/// occurrences (e.g. both text runs in `mtmtm`) are all found.
fn inline_reply_starts(sequence: &str) -> Vec<usize> {
    let bytes = sequence.as_bytes();
    let mut starts = Vec::new();
    for (i, &byte) in bytes.iter().enumerate() {
        if byte != b'm' {
            continue;
        }
        let mut j = i + 1;
        while bytes.get(j) == Some(&b'e') {
            j += 1;
        }
        let mut saw_text = false;
        loop {
            let run = j;
            while bytes.get(j) == Some(&b't') {
                j += 1;
            }
            if j == run {
                break;
            }
            saw_text = true;
            while bytes.get(j) == Some(&b'e') {
                j += 1;
            }
        }
        if saw_text && bytes.get(j) == Some(&b'm') {
            starts.push(i + 1);
        }
    }
    starts
}

/// Make up for changes done while preprocessing: restore sentinel-wrapped
/// links to angle brackets and trim the final text.
#[must_use]
pub fn postprocess(msg_body: &str) -> String {
    RE_NORMALIZED_LINK
        .replace_all(msg_body, |caps: &Captures| format!("<{}>", &caps[1]))
        .trim()
        .to_string()
}
