use std::io::{self, BufRead, ErrorKind};

/// Byte input with one byte of lookahead.
///
/// The decoder reads every token through this trait and never needs to
/// step back more than the single peeked byte.
pub trait ByteSource {
    /// Consumes and returns the next byte, or `None` at the end of input.
    fn next_byte(&mut self) -> io::Result<Option<u8>>;

    /// Returns the next byte without consuming it.
    fn peek_byte(&mut self) -> io::Result<Option<u8>>;

    /// Fills `buf` completely, failing with [`ErrorKind::UnexpectedEof`] if
    /// the input ends first.
    fn read_exact_into(&mut self, buf: &mut [u8]) -> io::Result<()> {
        for slot in buf.iter_mut() {
            *slot = self.next_byte()?.ok_or(ErrorKind::UnexpectedEof)?;
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// SliceSource

/// A [`ByteSource`] over an in-memory buffer.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> SliceSource<'a> {
    #[inline]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// Number of bytes consumed so far.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// The bytes not consumed yet.
    #[inline]
    pub fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.position..]
    }
}

impl ByteSource for SliceSource<'_> {
    #[inline]
    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = self.bytes.get(self.position).copied();
        if byte.is_some() {
            self.position += 1;
        }
        Ok(byte)
    }

    #[inline]
    fn peek_byte(&mut self) -> io::Result<Option<u8>> {
        Ok(self.bytes.get(self.position).copied())
    }

    fn read_exact_into(&mut self, buf: &mut [u8]) -> io::Result<()> {
        let Some(chunk) = self.remaining().get(..buf.len()) else {
            self.position = self.bytes.len();
            return Err(ErrorKind::UnexpectedEof.into());
        };
        buf.copy_from_slice(chunk);
        self.position += buf.len();
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// IoSource

/// A [`ByteSource`] over any buffered reader.
#[derive(Debug)]
pub struct IoSource<R> {
    reader: R,
}

impl<R: BufRead> IoSource<R> {
    #[inline]
    pub const fn new(reader: R) -> Self {
        Self { reader }
    }

    #[inline]
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: BufRead> ByteSource for IoSource<R> {
    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = self.peek_byte()?;
        if byte.is_some() {
            self.reader.consume(1);
        }
        Ok(byte)
    }

    fn peek_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
    }

    #[inline]
    fn read_exact_into(&mut self, buf: &mut [u8]) -> io::Result<()> {
        self.reader.read_exact(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::{ByteSource, IoSource, SliceSource};
    use std::io::{BufReader, ErrorKind};

    #[test]
    fn slice_peek_and_read() {
        let mut source = SliceSource::new(b"ab");
        assert_eq!(source.peek_byte().unwrap(), Some(b'a'));
        assert_eq!(source.next_byte().unwrap(), Some(b'a'));
        let mut buf = [0_u8; 2];
        let err = source.read_exact_into(&mut buf).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
        assert_eq!(source.next_byte().unwrap(), None);
    }

    #[test]
    fn reader_crosses_buffer_boundaries() {
        let mut source = IoSource::new(BufReader::with_capacity(2, &b"hello"[..]));
        let mut buf = [0_u8; 3];
        assert_eq!(source.next_byte().unwrap(), Some(b'h'));
        source.read_exact_into(&mut buf).unwrap();
        assert_eq!(&buf, b"ell");
        assert_eq!(source.peek_byte().unwrap(), Some(b'o'));
        assert_eq!(source.next_byte().unwrap(), Some(b'o'));
        assert_eq!(source.next_byte().unwrap(), None);
    }
}
