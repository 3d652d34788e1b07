//! Reading and writing the PHP `serialize()` text format.
//!
//! ```
//! use phpser_codec::Serial;
//!
//! #[derive(Serial, Default, Debug, PartialEq)]
//! struct Entry {
//!     #[serial(php = "id")]
//!     id: String,
//!     #[serial(php = "value")]
//!     value: String,
//! }
//!
//! let text = r#"a:2:{i:0;a:2:{s:2:"id";s:1:"1";s:5:"value";s:3:"One";}i:1;a:2:{s:2:"id";s:1:"2";s:5:"value";s:3:"Two";}}"#;
//! let entries: Vec<Entry> = phpser_codec::from_str(text).unwrap();
//! assert_eq!(entries[1].value, "Two");
//! assert_eq!(phpser_codec::to_string(&entries).unwrap(), text);
//! ```
//!
//! # Layout
//!
//! - [`info`]: static descriptors of every supported type.
//! - [`ops`]: object-safe views the codec drives composites through.
//! - [`registry`]: the process-wide strategy and field caches.
//! - [`codec`]: the decoder, the encoder and the byte sources and sinks.
//! - [`impls`]: descriptors and views for the built-in types.
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Generated code names this crate `phpser_codec`, including in its own tests.
extern crate self as phpser_codec;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod serial;

pub mod codec;
pub mod impls;
pub mod info;
pub mod ops;
pub mod registry;

// -----------------------------------------------------------------------------
// Top-level exports

pub use codec::{Decoder, Encoder};
pub use codec::{from_reader, from_slice, from_str, to_string, to_vec, to_writer};
pub use error::{Error, Result};
pub use serial::{Serial, SerialMut, SerialRef};

/// Derives [`Serial`] for a struct with named fields.
///
/// See the [`phpser_codec_derive`] crate for the accepted attributes.
#[cfg(feature = "derive")]
pub use phpser_codec_derive::Serial;
