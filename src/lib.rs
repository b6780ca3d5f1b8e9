// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Email Reply Extractor
//!
//! Extracts the new, human-authored portion of a plain-text email reply by
//! stripping trailing signatures and quoted history from earlier messages in
//! a thread.
//!
//! # Features
//!
//! - Line-by-line quotation classification over a small marker alphabet
//! - Boundary resolution by pattern matching over the marker sequence
//! - Multi-line "On \<date\>, \<person\> wrote:" splitter handling
//! - Angle-bracketed link guarding against false quote markers
//! - Signature detection with its own candidate grammar
//! - Phone-client signature stripping ("Sent from my iPhone", ...)
//!
//! # Example
//!
//! ```rust
//! use reply_extract::{extract_reply_text, extract_signature, ContentType};
//!
//! let body = "Test reply\n\nOn 04/19/2011 07:10 AM, Roman Tkachenko wrote:\n\n> Hi";
//! let reply = extract_reply_text(body, ContentType::Plain).unwrap();
//! assert_eq!(reply, "Test reply");
//!
//! let (text, signature) = extract_signature("Hey!\n\n--\nRoman");
//! assert_eq!(text, "Hey!");
//! assert_eq!(signature.as_deref(), Some("--\nRoman"));
//! ```

mod error;
mod quotations;
mod signature;
mod types;
mod util;

pub use error::{ExtractError, Result};
pub use quotations::{
    ResolvedQuotation, extract_from_plain, extract_reply_text, mark_lines, postprocess,
    preprocess, resolve_quotation,
};
pub use signature::{
    extract_signature, extract_signature_with, mark_candidate_indexes,
    resolve_marked_candidates, select_signature_candidate,
};
pub use types::*;
pub use util::{detect_delimiter, split_lines};
