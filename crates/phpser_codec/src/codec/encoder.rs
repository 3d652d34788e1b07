use alloc::string::String;
use core::fmt::{self, Write as _};

use crate::codec::number::Float;
use crate::codec::{ByteSink, EncodeConfig, MAX_DEPTH};
use crate::registry::{Strategy, StrategyTable};
use crate::{Error, Result, Serial};

/// Writes values to a [`ByteSink`].
///
/// Tokens are emitted in small chunks. For a sink that starts failing after
/// a number of bytes, the bytes it accepted always end on one of these
/// boundaries:
///
/// | Token | Chunks |
/// |---|---|
/// | nil | `N;` |
/// | bool | `b:`, `0`/`1`, `;` |
/// | int | `i:`, digits, `;` |
/// | float | `d:`, literal, `;` |
/// | string | `s:`, length, `:"`, payload, `";` |
/// | array | `a:`, count, `:{`, pairs, `}` |
///
/// # Examples
///
/// ```
/// use phpser_codec::Encoder;
///
/// let mut out = Vec::new();
/// let mut encoder = Encoder::new(&mut out);
/// encoder.encode(&vec![String::from("a"), String::from("bc")]).unwrap();
/// assert_eq!(out, b"a:2:{i:0;s:1:\"a\";i:1;s:2:\"bc\";}");
/// ```
pub struct Encoder<'a> {
    sink: &'a mut dyn ByteSink,
    config: EncodeConfig,
    depth: usize,
    scratch: String,
}

impl<'a> Encoder<'a> {
    #[inline]
    pub fn new(sink: &'a mut dyn ByteSink) -> Self {
        Self::with_config(sink, EncodeConfig::new())
    }

    #[inline]
    pub fn with_config(sink: &'a mut dyn ByteSink, config: EncodeConfig) -> Self {
        Self {
            sink,
            config,
            depth: 0,
            scratch: String::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &EncodeConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Values

    /// Encodes `value` as one complete token.
    pub fn encode<T: Serial>(&mut self, value: &T) -> Result<()> {
        let any = value.as_any();
        if let Some(value) = any.downcast_ref::<String>() {
            return self.encode_str(value);
        }
        if let Some(&value) = any.downcast_ref::<i64>() {
            return self.encode_int(value);
        }
        if let Some(&value) = any.downcast_ref::<bool>() {
            return self.encode_bool(value);
        }
        if let Some(&value) = any.downcast_ref::<f64>() {
            return self.encode_float(value);
        }
        self.encode_value(value)
    }

    /// Encodes a value known only through [`Serial`].
    pub fn encode_value(&mut self, value: &dyn Serial) -> Result<()> {
        let strategy = StrategyTable::global().resolve(value.serial_type_info());
        self.encode_with(strategy, value)
    }

    /// Encodes with an already resolved strategy.
    #[inline]
    pub fn encode_with(&mut self, strategy: &'static Strategy, value: &dyn Serial) -> Result<()> {
        strategy.encode(self, value)
    }

    // -------------------------------------------------------------------------
    // Chunks

    #[inline]
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.sink.write_bytes(bytes)?;
        Ok(())
    }

    fn write_display(&mut self, value: impl fmt::Display) -> Result<()> {
        self.scratch.clear();
        // Formatting into a `String` only fails if `Display` itself does.
        let _ = write!(self.scratch, "{value}");
        self.sink.write_bytes(self.scratch.as_bytes())?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Tokens

    #[inline]
    pub fn encode_nil(&mut self) -> Result<()> {
        self.write(b"N;")
    }

    pub fn encode_bool(&mut self, value: bool) -> Result<()> {
        self.write(b"b:")?;
        self.write(if value { b"1" } else { b"0" })?;
        self.write(b";")
    }

    pub fn encode_int(&mut self, value: i64) -> Result<()> {
        self.write(b"i:")?;
        self.write_display(value)?;
        self.write(b";")
    }

    pub fn encode_uint(&mut self, value: u64) -> Result<()> {
        self.write(b"i:")?;
        self.write_display(value)?;
        self.write(b";")
    }

    /// Writes `d:<literal>;`.
    ///
    /// Infinities and NaN are spelled `INF`, `-INF` and `NAN`. Finite values
    /// use the shortest decimal that reads back to the same `T`, without an
    /// exponent.
    ///
    /// ```
    /// use phpser_codec::Encoder;
    ///
    /// let mut out = Vec::new();
    /// let mut encoder = Encoder::new(&mut out);
    /// encoder.encode_float(15.285325_f32).unwrap();
    /// encoder.encode_float(f64::NEG_INFINITY).unwrap();
    /// assert_eq!(out, b"d:15.285325;d:-INF;");
    /// ```
    pub fn encode_float<T: Float>(&mut self, value: T) -> Result<()> {
        self.write(b"d:")?;
        if value.is_nan() {
            self.write(b"NAN")?;
        } else if value.is_infinite() {
            self.write(if value.is_sign_negative() { &b"-INF"[..] } else { b"INF" })?;
        } else {
            self.write_display(value)?;
        }
        self.write(b";")
    }

    #[inline]
    pub fn encode_str(&mut self, value: &str) -> Result<()> {
        self.encode_bytes(value.as_bytes())
    }

    /// Writes `s:<len>:"<bytes>";` with the byte length of `value`.
    pub fn encode_bytes(&mut self, value: &[u8]) -> Result<()> {
        self.write(b"s:")?;
        self.write_display(value.len())?;
        self.write(b":\"")?;
        self.write(value)?;
        self.write(b"\";")
    }

    /// Writes `a:<len>:{`; the caller then writes `len` key/value pairs.
    ///
    /// Opening more than [`MAX_DEPTH`] arrays at once fails with
    /// [`Error::DepthLimit`] before anything is written.
    pub fn begin_array(&mut self, len: usize) -> Result<()> {
        if self.depth >= MAX_DEPTH {
            return Err(Error::DepthLimit { limit: MAX_DEPTH });
        }
        self.write(b"a:")?;
        self.write_display(len)?;
        self.write(b":{")?;
        self.depth += 1;
        Ok(())
    }

    pub fn end_array(&mut self) -> Result<()> {
        self.write(b"}")?;
        self.depth = self.depth.saturating_sub(1);
        Ok(())
    }
}
