use alloc::vec::Vec;
use std::io::{self, Write};

/// Byte output of an [`Encoder`](crate::Encoder).
///
/// The encoder writes each token in a few small chunks (`i:`, the digits,
/// `;`), so a sink that fails partway leaves a prefix ending on a chunk
/// boundary.
pub trait ByteSink {
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()>;
}

impl ByteSink for Vec<u8> {
    #[inline]
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

/// A [`ByteSink`] over any writer.
///
/// Every chunk is a separate `write_all`; wrap unbuffered writers in a
/// [`BufWriter`](std::io::BufWriter).
#[derive(Debug)]
pub struct IoSink<W> {
    writer: W,
}

impl<W: Write> IoSink<W> {
    #[inline]
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    #[inline]
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    #[inline]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ByteSink for IoSink<W> {
    #[inline]
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.writer.write_all(bytes)
    }
}
