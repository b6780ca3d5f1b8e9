//! Core types shared by the quotation and signature algorithms

use serde::{Deserialize, Serialize};
use std::fmt;

/// Content type of a message body handed to the extractor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ContentType {
    /// Decoded plain text
    Plain,

    /// HTML body (quotation stripping not implemented)
    Html,
}

impl ContentType {
    /// Parse a MIME content-type string
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "text/plain" => Some(Self::Plain),
            "text/html" => Some(Self::Html),
            _ => None,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => write!(f, "text/plain"),
            Self::Html => write!(f, "text/html"),
        }
    }
}

/// Per-line classification produced by the quotation classifier.
///
/// The classifier assigns exactly one marker per physical line; the boundary
/// resolver then matches patterns over the resulting marker sequence rather
/// than over message content.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum QuotationMarker {
    /// Blank or whitespace-only line
    Empty,

    /// Line starting with one or more `>`
    QuoteMark,

    /// Line belonging to a splitter introducing quoted history
    Splitter,

    /// `---- Forwarded message ----` header line
    Forwarded,

    /// Presumably a line from the last message in the conversation
    Text,
}

impl QuotationMarker {
    /// Single-character encoding used when matching patterns over a marker
    /// sequence
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Empty => 'e',
            Self::QuoteMark => 'm',
            Self::Splitter => 's',
            Self::Forwarded => 'f',
            Self::Text => 't',
        }
    }
}

/// Classification of a line inside the signature candidate window
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SignatureMarker {
    /// Line that could be part of a signature
    Candidate,

    /// Trimmed line longer than the configured threshold
    Long,

    /// Line starting with dashes but holding other characters as well
    DashedOpener,
}

impl SignatureMarker {
    /// Single-character encoding used by the candidate resolution grammar
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Candidate => 'c',
            Self::Long => 'l',
            Self::DashedOpener => 'd',
        }
    }
}

/// Tunables for signature detection.
///
/// Passed explicitly per call so concurrent callers never race on shared
/// state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Cap on the number of non-empty lines eligible to be a signature
    pub signature_max_lines: usize,

    /// Trimmed-length threshold disqualifying a candidate line
    pub too_long_signature_line: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            signature_max_lines: 11,
            too_long_signature_line: 60,
        }
    }
}
