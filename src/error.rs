//! Error types for reply extraction

use crate::types::ContentType;
use thiserror::Error;

/// Errors that can occur during reply extraction.
///
/// Text processing itself is total; the only failure mode is asking for a
/// capability the crate does not implement.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Quotation stripping is not implemented for this body type
    #[error("cannot extract reply text from {0} content")]
    UnsupportedContentType(ContentType),
}

/// Result type for reply extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;
