#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use phpser_codec as codec;
pub use phpser_utils as utils;

pub use phpser_codec::Serial;
pub use phpser_codec::{Error, Result};
pub use phpser_codec::{from_reader, from_slice, from_str};
pub use phpser_codec::{to_string, to_vec, to_writer};
