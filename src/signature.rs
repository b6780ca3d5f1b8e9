//! Signature detection at the tail of a message.
//!
//! Independent of quotation stripping: a restricted suffix window of
//! non-empty lines is classified into its own marker alphabet (candidate,
//! long, dashed opener) and reduced, from the tail backward, against a small
//! resolution grammar. The winning candidate is then checked against common
//! signature openers.

use crate::types::{ExtractConfig, SignatureMarker};
use crate::util::{detect_delimiter, split_lines};
use regex::Regex;
use std::sync::LazyLock;

// generic signature opener: a dash line (optionally followed by a short
// lowercase word or initial) or a one-word closer
static RE_SIGNATURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)(?:^\s*-+\s*[a-z .^\r\n]*$|^thanks[\s,!]*$|^regards[\s,!]*$|^cheers[\s,!]*$|^best[ a-z]*[\s,!]*$)(?s:.*)",
    )
    .unwrap()
});

// signatures appended by phone email clients
static RE_PHONE_SIGNATURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)(?:^sent from my[\s,!\w]*$|^sent from Mailbox for iPhone.*$|^sent (?:\S+ )?from my BlackBerry.*$|^Enviado desde mi (?:\S+ ){0,2}BlackBerry.*$)(?s:.*)",
    )
    .unwrap()
});

// candidate resolution grammar, applied to the reversed marker string:
// candidates closed by a single dashed opener win over bare candidates,
// which win over a lone dashed opener not adjacent to another one
static RE_SIGNATURE_CANDIDATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(c+d)(?:[^d]|$)|(c+)|(d)(?:[^d]|$)").unwrap());

/// Split a message into its text and a trailing signature block, using the
/// default tunables.
///
/// ```rust
/// let (text, signature) = reply_extract::extract_signature("Hey man! How r u?\n\n--\nRoman");
/// assert_eq!(text, "Hey man! How r u?");
/// assert_eq!(signature.as_deref(), Some("--\nRoman"));
/// ```
#[must_use]
pub fn extract_signature(msg_body: &str) -> (String, Option<String>) {
    extract_signature_with(msg_body, &ExtractConfig::default())
}

/// Split a message into its text and a trailing signature block.
///
/// Returns the message without the signature and the signature itself, or
/// `None` when no signature block is recognized. Total for every input:
/// an empty body yields `("", None)`.
#[must_use]
pub fn extract_signature_with(msg_body: &str, config: &ExtractConfig) -> (String, Option<String>) {
    let delimiter = detect_delimiter(msg_body);
    let mut stripped_body = msg_body.trim().to_string();

    // strip off a phone-client signature first; it sits below any generic one
    let mut phone_signature = None;
    if let Some(phone) = RE_PHONE_SIGNATURE.find(&stripped_body) {
        phone_signature = Some(phone.as_str().to_string());
        stripped_body.truncate(phone.start());
    }

    let lines = split_lines(&stripped_body);
    let candidate = select_signature_candidate(&lines, config).join(delimiter);

    let Some(signature) = RE_SIGNATURE.find(&candidate) else {
        return (stripped_body.trim().to_string(), phone_signature);
    };
    let mut signature = signature.as_str().to_string();

    // the candidate is always a suffix of the lines rejoined with the same
    // delimiter, so the signature can be sliced off the end
    let rejoined = lines.join(delimiter);
    let remainder = rejoined
        .strip_suffix(signature.as_str())
        .unwrap_or(&rejoined)
        .to_string();

    if let Some(phone) = phone_signature {
        signature = format!("{signature}{delimiter}{phone}");
    }

    (
        remainder.trim().to_string(),
        Some(signature.trim().to_string()),
    )
}

/// Return the lines that could hold a signature.
///
/// The candidate lines are among the last `signature_max_lines` non-empty
/// lines, never include the first line, are shorter than
/// `too_long_signature_line` and include at most one line starting with
/// dashes. Blank lines inside the winning candidate are preserved.
#[must_use]
pub fn select_signature_candidate<'a>(lines: &[&'a str], config: &ExtractConfig) -> Vec<&'a str> {
    let non_empty: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, _)| i)
        .collect();

    // an empty or single-line message holds no signature
    if non_empty.len() <= 1 {
        return Vec::new();
    }

    // the signature is not expected to start at the first line
    let candidate = &non_empty[1..];
    let candidate = &candidate[candidate.len().saturating_sub(config.signature_max_lines)..];

    let markers = mark_candidate_indexes(lines, candidate, config);
    let surviving = resolve_marked_candidates(candidate, &markers);

    surviving
        .first()
        .map_or_else(Vec::new, |&first| lines[first..].to_vec())
}

/// Classify candidate indexes for the resolution grammar.
///
/// Surrounding whitespace is not considered when checking line length, and a
/// line of only dashes stays an ordinary candidate.
#[must_use]
pub fn mark_candidate_indexes(
    lines: &[&str],
    candidate: &[usize],
    config: &ExtractConfig,
) -> Vec<SignatureMarker> {
    candidate
        .iter()
        .map(|&index| {
            let trimmed = lines[index].trim();
            if trimmed.chars().count() > config.too_long_signature_line {
                SignatureMarker::Long
            } else if trimmed.starts_with('-') && trimmed.chars().any(|c| c != '-') {
                SignatureMarker::DashedOpener
            } else {
                SignatureMarker::Candidate
            }
        })
        .collect()
}

/// Reduce marked candidate indexes against the resolution grammar, scanning
/// from the tail backward. Returns the indexes that survive.
#[must_use]
pub fn resolve_marked_candidates(candidate: &[usize], markers: &[SignatureMarker]) -> Vec<usize> {
    let reversed: String = markers.iter().rev().map(|m| m.symbol()).collect();

    let Some(caps) = RE_SIGNATURE_CANDIDATE.captures(&reversed) else {
        return Vec::new();
    };
    let group = caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3));

    group.map_or_else(Vec::new, |g| {
        // the group end, measured in the reversed string, is the number of
        // surviving indexes counted from the tail
        candidate[candidate.len().saturating_sub(g.end())..].to_vec()
    })
}
