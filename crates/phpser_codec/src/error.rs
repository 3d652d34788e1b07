use alloc::string::String;
use std::io;

use thiserror::Error;

use crate::info::SerialKind;

/// Result type of every decode and encode operation.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Everything that can stop a decode or an encode.
///
/// The first error aborts the whole call; nothing is retried and no
/// partially decoded value is handed back.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The input ended in the middle of a token.
    #[error("unexpected end of input")]
    UnexpectedEof,
    /// The underlying reader or writer failed.
    #[error(transparent)]
    Io(io::Error),
    /// A fixed byte of the grammar is missing.
    #[error("expected byte '{expected}' found '{found}'")]
    Expected { expected: char, found: char },
    /// A value starts with a byte that opens no known token.
    #[error("unexpected value token '{found}'")]
    UnexpectedToken { found: char },
    #[error("invalid boolean value")]
    InvalidBool,
    #[error("invalid integer literal \"{literal}\"")]
    InvalidInt { literal: String },
    #[error("invalid float literal \"{literal}\"")]
    InvalidFloat { literal: String },
    #[error("invalid length \"{literal}\"")]
    InvalidLength { literal: String },
    /// A string payload targeting `String` is not UTF-8.
    #[error("string payload is not valid UTF-8")]
    InvalidUtf8,
    /// A numeric literal does not fit the target type.
    #[error("parsing \"{literal}\": value out of range for {width}")]
    OutOfRange { literal: String, width: &'static str },
    /// A list key is not the next position.
    #[error("expected offset '{expected}' found '{found}'")]
    KeyOrder { expected: usize, found: i64 },
    /// Arrays are nested deeper than the codec follows.
    #[error("arrays nested deeper than {limit} levels")]
    DepthLimit { limit: usize },
    /// A record key has no field and unknown fields are rejected.
    #[error("unknown field `{name}` for `{type_path}`")]
    UnknownField { name: String, type_path: &'static str },
    /// The type has no wire representation.
    #[error("unsupported type `{type_path}`")]
    Unsupported { type_path: &'static str },
    /// A value does not expose the view its descriptor promises.
    #[error("`{type_path}` does not behave as a {expected} value")]
    Mismatch {
        type_path: &'static str,
        expected: SerialKind,
    },
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => Self::UnexpectedEof,
            _ => Self::Io(err),
        }
    }
}

impl Error {
    /// Returns `true` if the input was cut short.
    #[inline]
    pub fn is_eof(&self) -> bool {
        matches!(self, Self::UnexpectedEof)
    }
}
