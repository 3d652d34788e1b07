//! The wire codec.
//!
//! [`Decoder`] and [`Encoder`] walk values through the strategies of the
//! [registry](crate::registry). The free functions below cover the usual
//! in-memory and `std::io` cases.

// -----------------------------------------------------------------------------
// Modules

mod config;
mod decoder;
mod encoder;
mod number;
mod sink;
mod source;

pub(crate) mod composite;
pub(crate) mod primitive;

// -----------------------------------------------------------------------------
// Exports

pub use config::{DecodeConfig, EncodeConfig, UnknownFields};
pub use decoder::{BYTES_ALLOC_LIMIT, LIST_ALLOC_LIMIT, MAP_ALLOC_LIMIT, MAX_DEPTH, MAX_LITERAL_LEN};
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use number::{Float, Integer};
pub use sink::{ByteSink, IoSink};
pub use source::{ByteSource, IoSource, SliceSource};

// -----------------------------------------------------------------------------
// Entry points

use alloc::string::String;
use alloc::vec::Vec;
use std::io::{BufReader, Read, Write};

use crate::{Error, Result, Serial};

/// Decodes a `T` from the start of `bytes`.
///
/// Bytes after the first complete value are ignored.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
///
/// let map: BTreeMap<i64, String> = phpser_codec::from_slice(b"a:1:{i:2;s:5:\"Hello\";}").unwrap();
/// assert_eq!(map[&2], "Hello");
/// ```
pub fn from_slice<T: Serial + Default>(bytes: &[u8]) -> Result<T> {
    let mut source = SliceSource::new(bytes);
    Decoder::new(&mut source).decode()
}

#[inline]
pub fn from_str<T: Serial + Default>(text: &str) -> Result<T> {
    from_slice(text.as_bytes())
}

/// Decodes a `T` from a reader, buffering it internally.
pub fn from_reader<T: Serial + Default, R: Read>(reader: R) -> Result<T> {
    let mut source = IoSource::new(BufReader::new(reader));
    Decoder::new(&mut source).decode()
}

/// Encodes `value` into a new buffer.
pub fn to_vec<T: Serial>(value: &T) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    Encoder::new(&mut out).encode(value)?;
    Ok(out)
}

/// Encodes `value` as text.
///
/// Only `String` payloads reach the output, so the result is always UTF-8.
pub fn to_string<T: Serial>(value: &T) -> Result<String> {
    String::from_utf8(to_vec(value)?).map_err(|_| Error::InvalidUtf8)
}

/// Encodes `value` into a writer and flushes it.
///
/// Output goes out in small chunks; pass a buffered writer for files and
/// sockets. On error the writer holds a prefix of the encoding.
pub fn to_writer<W: Write, T: Serial>(writer: W, value: &T) -> Result<()> {
    let mut sink = IoSink::new(writer);
    Encoder::new(&mut sink).encode(value)?;
    sink.flush()?;
    Ok(())
}
