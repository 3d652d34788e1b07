use alloc::string::String;
use alloc::vec::Vec;

use phpser_utils::AllocLimit;

use crate::codec::number::{self, Float, Integer};
use crate::codec::{ByteSource, DecodeConfig};
use crate::registry::{Strategy, StrategyTable};
use crate::{Error, Result, Serial};

/// Per-step reservation ceiling for list elements.
pub const LIST_ALLOC_LIMIT: AllocLimit = AllocLimit::new(10_000);

/// Reservation ceiling for map entries.
pub const MAP_ALLOC_LIMIT: AllocLimit = AllocLimit::new(1_000_000);

/// Per-step reservation ceiling for string payload bytes.
pub const BYTES_ALLOC_LIMIT: AllocLimit = AllocLimit::new(1 << 20);

/// Longest numeric or length literal accepted before its delimiter.
pub const MAX_LITERAL_LEN: usize = 1024;

/// Deepest array nesting decoded into or encoded from a value.
///
/// Typed values are walked recursively, one call chain per array, so the
/// limit bounds stack use. [`Decoder::skip_value`] does not recurse and
/// ignores it.
pub const MAX_DEPTH: usize = 256;

#[derive(Clone, Copy)]
enum Literal {
    Int,
    Float,
    Length,
}

impl Literal {
    fn invalid(self, literal: &[u8]) -> Error {
        let literal = String::from_utf8_lossy(literal).into_owned();
        match self {
            Self::Int => Error::InvalidInt { literal },
            Self::Float => Error::InvalidFloat { literal },
            Self::Length => Error::InvalidLength { literal },
        }
    }
}

/// Reads values from a [`ByteSource`].
///
/// A decoder lives for one call. It holds the source, the options, the
/// current array depth and a scratch buffer for numeric literals.
///
/// # Examples
///
/// ```
/// use phpser_codec::Decoder;
/// use phpser_codec::codec::SliceSource;
///
/// let mut source = SliceSource::new(b"a:2:{i:0;i:10;i:1;i:92;}");
/// let list: Vec<i32> = Decoder::new(&mut source).decode().unwrap();
/// assert_eq!(list, [10, 92]);
/// ```
pub struct Decoder<'a> {
    source: &'a mut dyn ByteSource,
    config: DecodeConfig,
    depth: usize,
    scratch: Vec<u8>,
}

impl<'a> Decoder<'a> {
    #[inline]
    pub fn new(source: &'a mut dyn ByteSource) -> Self {
        Self::with_config(source, DecodeConfig::new())
    }

    #[inline]
    pub fn with_config(source: &'a mut dyn ByteSource, config: DecodeConfig) -> Self {
        Self {
            source,
            config,
            depth: 0,
            scratch: Vec::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &DecodeConfig {
        &self.config
    }

    /// Number of arrays opened and not yet closed.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    // -------------------------------------------------------------------------
    // Values

    /// Decodes a fresh `T`.
    ///
    /// Bytes after the first complete value are left unread.
    pub fn decode<T: Serial + Default>(&mut self) -> Result<T> {
        let mut value = T::default();
        self.decode_into(&mut value)?;
        Ok(value)
    }

    /// Decodes into an existing value.
    ///
    /// Lists and maps are cleared first. Records keep the fields the input
    /// does not mention.
    pub fn decode_into<T: Serial>(&mut self, value: &mut T) -> Result<()> {
        let any = value.as_any_mut();
        if let Some(slot) = any.downcast_mut::<String>() {
            *slot = self.decode_string()?;
            return Ok(());
        }
        if let Some(slot) = any.downcast_mut::<i64>() {
            *slot = self.decode_i64()?;
            return Ok(());
        }
        if let Some(slot) = any.downcast_mut::<bool>() {
            *slot = self.decode_bool()?;
            return Ok(());
        }
        if let Some(slot) = any.downcast_mut::<f64>() {
            *slot = self.decode_f64()?;
            return Ok(());
        }
        self.decode_value(value)
    }

    /// Decodes into a value known only through [`Serial`].
    pub fn decode_value(&mut self, value: &mut dyn Serial) -> Result<()> {
        let strategy = StrategyTable::global().resolve(value.serial_type_info());
        self.decode_with(strategy, value)
    }

    /// Decodes with an already resolved strategy.
    #[inline]
    pub fn decode_with(&mut self, strategy: &'static Strategy, value: &mut dyn Serial) -> Result<()> {
        strategy.decode(self, value)
    }

    // -------------------------------------------------------------------------
    // Bytes

    fn read_byte(&mut self) -> Result<u8> {
        self.source.next_byte()?.ok_or(Error::UnexpectedEof)
    }

    fn expect(&mut self, expected: u8) -> Result<()> {
        let found = self.read_byte()?;
        if found != expected {
            return Err(Error::Expected {
                expected: char::from(expected),
                found: char::from(found),
            });
        }
        Ok(())
    }

    /// Reads up to `delimiter` into the scratch buffer and consumes the
    /// delimiter.
    fn read_literal(&mut self, delimiter: u8, kind: Literal) -> Result<()> {
        self.scratch.clear();
        loop {
            let byte = self.read_byte()?;
            if byte == delimiter {
                return Ok(());
            }
            if self.scratch.len() == MAX_LITERAL_LEN {
                return Err(kind.invalid(&self.scratch));
            }
            self.scratch.push(byte);
        }
    }

    /// Reads `<digits>:` as used by strings and arrays.
    fn decode_length(&mut self) -> Result<usize> {
        self.read_literal(b':', Literal::Length)?;
        let literal = self.scratch.as_slice();
        if literal.is_empty() || !literal.iter().all(u8::is_ascii_digit) {
            return Err(Literal::Length.invalid(literal));
        }
        core::str::from_utf8(literal)
            .ok()
            .and_then(|text| text.parse().ok())
            .ok_or_else(|| Literal::Length.invalid(literal))
    }

    // -------------------------------------------------------------------------
    // Tokens

    /// Returns the first byte of the next value without consuming it.
    pub fn peek_code(&mut self) -> Result<u8> {
        self.source.peek_byte()?.ok_or(Error::UnexpectedEof)
    }

    /// Reads `N;`.
    pub fn decode_nil(&mut self) -> Result<()> {
        self.expect(b'N')?;
        self.expect(b';')
    }

    /// Reads `b:0;` or `b:1;`.
    pub fn decode_bool(&mut self) -> Result<bool> {
        self.expect(b'b')?;
        self.expect(b':')?;
        let value = match self.read_byte()? {
            b'0' => false,
            b'1' => true,
            _ => return Err(Error::InvalidBool),
        };
        self.expect(b';')?;
        Ok(value)
    }

    /// Reads `i:<n>;` at the width of `T`.
    ///
    /// ```
    /// use phpser_codec::{Decoder, Error};
    /// use phpser_codec::codec::SliceSource;
    ///
    /// let mut source = SliceSource::new(b"i:128;");
    /// let err = Decoder::new(&mut source).decode_int::<i8>().unwrap_err();
    /// assert!(matches!(err, Error::OutOfRange { width: "i8", .. }));
    /// ```
    pub fn decode_int<T: Integer>(&mut self) -> Result<T> {
        self.expect(b'i')?;
        self.expect(b':')?;
        self.read_literal(b';', Literal::Int)?;
        number::parse_int(&self.scratch)
    }

    #[inline]
    pub fn decode_i64(&mut self) -> Result<i64> {
        self.decode_int()
    }

    /// Reads `d:<literal>;` at the width of `T`.
    pub fn decode_float<T: Float>(&mut self) -> Result<T> {
        self.expect(b'd')?;
        self.expect(b':')?;
        self.read_literal(b';', Literal::Float)?;
        number::parse_float(&self.scratch)
    }

    #[inline]
    pub fn decode_f64(&mut self) -> Result<f64> {
        self.decode_float()
    }

    /// Reads `s:<len>:"<bytes>";` and returns the raw payload.
    pub fn decode_bytes(&mut self) -> Result<Vec<u8>> {
        self.expect(b's')?;
        self.expect(b':')?;
        let len = self.decode_length()?;
        self.expect(b'"')?;

        let mut bytes = Vec::new();
        let mut filled = 0;
        while filled < len {
            let step = BYTES_ALLOC_LIMIT.next_step(len, filled);
            bytes.resize(filled + step, 0);
            self.source.read_exact_into(&mut bytes[filled..])?;
            filled += step;
        }

        self.expect(b'"')?;
        self.expect(b';')?;
        Ok(bytes)
    }

    /// Reads a string token whose payload must be UTF-8.
    pub fn decode_string(&mut self) -> Result<String> {
        String::from_utf8(self.decode_bytes()?).map_err(|_| Error::InvalidUtf8)
    }

    /// Reads `a:<n>:{` and returns the declared pair count.
    ///
    /// The array counts toward [`MAX_DEPTH`] until the matching
    /// [`decode_array_end`](Self::decode_array_end). Past the limit nothing
    /// is consumed and [`Error::DepthLimit`] is returned.
    pub fn decode_array_len(&mut self) -> Result<usize> {
        if self.depth >= MAX_DEPTH {
            return Err(Error::DepthLimit { limit: MAX_DEPTH });
        }
        let len = self.read_array_open()?;
        self.depth += 1;
        Ok(len)
    }

    /// Reads the `}` closing an array.
    pub fn decode_array_end(&mut self) -> Result<()> {
        self.expect(b'}')?;
        self.depth = self.depth.saturating_sub(1);
        Ok(())
    }

    fn read_array_open(&mut self) -> Result<usize> {
        self.expect(b'a')?;
        self.expect(b':')?;
        let len = self.decode_length()?;
        self.expect(b'{')?;
        Ok(len)
    }

    /// Consumes one complete value without storing it.
    ///
    /// The grammar is still checked. Nesting is tracked on the heap, so deep
    /// arrays cannot overflow the stack.
    ///
    /// ```
    /// use phpser_codec::Decoder;
    /// use phpser_codec::codec::SliceSource;
    ///
    /// let mut source = SliceSource::new(b"a:1:{i:0;a:1:{s:1:\"k\";d:0.5;}}N;");
    /// let mut decoder = Decoder::new(&mut source);
    /// decoder.skip_value().unwrap();
    /// assert_eq!(decoder.peek_code().unwrap(), b'N');
    /// ```
    pub fn skip_value(&mut self) -> Result<()> {
        // Values still owed by each enclosing array.
        let mut enclosing: Vec<usize> = Vec::new();
        let mut remaining = 1_usize;

        loop {
            if remaining == 0 {
                let Some(outer) = enclosing.pop() else {
                    return Ok(());
                };
                self.expect(b'}')?;
                remaining = outer;
                continue;
            }
            remaining -= 1;

            match self.peek_code()? {
                b'N' => self.decode_nil()?,
                b'b' => {
                    self.decode_bool()?;
                }
                b'i' => self.skip_literal(b'i', Literal::Int, number::is_int_literal)?,
                b'd' => self.skip_literal(b'd', Literal::Float, number::is_float_literal)?,
                b's' => self.skip_string()?,
                b'a' => {
                    let len = self.read_array_open()?;
                    enclosing.push(remaining);
                    remaining = len.checked_mul(2).ok_or_else(|| Error::InvalidLength {
                        literal: alloc::format!("{len}"),
                    })?;
                }
                other => {
                    return Err(Error::UnexpectedToken {
                        found: char::from(other),
                    });
                }
            }
        }
    }

    fn skip_literal(&mut self, code: u8, kind: Literal, valid: fn(&[u8]) -> bool) -> Result<()> {
        self.expect(code)?;
        self.expect(b':')?;
        self.read_literal(b';', kind)?;
        if !valid(&self.scratch) {
            return Err(kind.invalid(&self.scratch));
        }
        Ok(())
    }

    fn skip_string(&mut self) -> Result<()> {
        self.expect(b's')?;
        self.expect(b':')?;
        let mut left = self.decode_length()?;
        self.expect(b'"')?;

        let mut sink = [0_u8; 512];
        while left > 0 {
            let step = left.min(sink.len());
            self.source.read_exact_into(&mut sink[..step])?;
            left -= step;
        }

        self.expect(b'"')?;
        self.expect(b';')
    }
}
