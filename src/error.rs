use std::str::Utf8Error;

use ndef_sink::SinkError;
use winnow::error::{ContextError, ErrMode, Needed};

/// Broad class of a failure, every error maps to exactly one
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ErrorKind {
    /// Bounds or format violation in the bytes or values given
    Malformed,
    /// Valid NDEF that this codec does not handle
    Unsupported,
    /// The output sink could not grow
    Exhausted,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("unexpected end of input, need {needed} more bytes")]
    Truncated { needed: usize },

    #[error("malformed record: {0}")]
    Malformed(String),

    #[error("expected record type {expected:?}, found {found:?}")]
    UnexpectedType { expected: &'static str, found: String },

    #[error("chunked records are not supported")]
    ChunkedRecord,

    #[error("uri prefix id {0:#04x} is out of range")]
    InvalidPrefix(u8),

    #[error("record payload is empty")]
    EmptyPayload,

    #[error("language code of {language_length} bytes does not fit in the {available} remaining bytes")]
    LanguageOverrun {
        language_length: usize,
        available: usize,
    },

    #[error("utf-16 text records are not supported")]
    Utf16Text,

    #[error("string is not valid utf-8: {0}")]
    Utf8(#[from] Utf8Error),

    #[error("smart poster does not contain a uri record")]
    MissingUri,
}

impl DecodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::ChunkedRecord | DecodeError::InvalidPrefix(_) | DecodeError::Utf16Text => {
                ErrorKind::Unsupported
            }

            DecodeError::Truncated { .. }
            | DecodeError::Malformed(_)
            | DecodeError::UnexpectedType { .. }
            | DecodeError::EmptyPayload
            | DecodeError::LanguageOverrun { .. }
            | DecodeError::Utf8(_)
            | DecodeError::MissingUri => ErrorKind::Malformed,
        }
    }
}

impl From<ErrMode<ContextError>> for DecodeError {
    fn from(error: ErrMode<ContextError>) -> Self {
        match error {
            ErrMode::Incomplete(Needed::Size(needed)) => Self::Truncated {
                needed: needed.get(),
            },
            ErrMode::Incomplete(Needed::Unknown) => Self::Truncated { needed: 1 },
            ErrMode::Backtrack(error) | ErrMode::Cut(error) => Self::Malformed(error.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("record type of {0} bytes does not fit in a single length byte")]
    TypeTooLong(usize),

    #[error("payload of {0} bytes does not fit in a 32-bit length")]
    PayloadTooLong(usize),

    #[error("language code of {0} bytes exceeds the 63 byte maximum")]
    LanguageTooLong(usize),

    #[error("smart poster requires a non-empty uri")]
    EmptyUri,
}

impl EncodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EncodeError::Sink(_) => ErrorKind::Exhausted,
            EncodeError::TypeTooLong(_)
            | EncodeError::PayloadTooLong(_)
            | EncodeError::LanguageTooLong(_) => ErrorKind::Unsupported,
            EncodeError::EmptyUri => ErrorKind::Malformed,
        }
    }
}
