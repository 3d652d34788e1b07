use alloc::string::String;
use core::fmt::Display;
use core::num::{IntErrorKind, ParseFloatError, ParseIntError};
use core::str::FromStr;

use crate::{Error, Result};

mod sealed {
    pub trait Sealed {}
}

// -----------------------------------------------------------------------------
// Integer

/// A fixed-width integer the codec reads with range checking.
///
/// Implemented for `i8`..`i64`, `isize`, `u8`..`u64` and `usize`.
pub trait Integer:
    sealed::Sealed + Copy + Display + FromStr<Err = ParseIntError> + Send + Sync + 'static
{
    const SIGNED: bool;
    /// Name used in [`Error::OutOfRange`].
    const NAME: &'static str;
}

macro_rules! impl_integer {
    ($($ty:ty => $signed:literal),* $(,)?) => {$(
        impl sealed::Sealed for $ty {}

        impl Integer for $ty {
            const SIGNED: bool = $signed;
            const NAME: &'static str = stringify!($ty);
        }
    )*};
}

impl_integer!(
    i8 => true,
    i16 => true,
    i32 => true,
    i64 => true,
    isize => true,
    u8 => false,
    u16 => false,
    u32 => false,
    u64 => false,
    usize => false,
);

// -----------------------------------------------------------------------------
// Float

/// An IEEE-754 float the codec reads and writes.
///
/// Implemented for `f32` and `f64`. Each width formats through its own
/// shortest round-trip representation.
pub trait Float:
    sealed::Sealed + Copy + Display + FromStr<Err = ParseFloatError> + Send + Sync + 'static
{
    const INFINITY: Self;
    const NEG_INFINITY: Self;
    const NAN: Self;
    /// Name used in [`Error::OutOfRange`].
    const NAME: &'static str;

    fn is_nan(self) -> bool;

    fn is_infinite(self) -> bool;

    fn is_sign_negative(self) -> bool;
}

macro_rules! impl_float {
    ($($ty:ident),*) => {$(
        impl sealed::Sealed for $ty {}

        impl Float for $ty {
            const INFINITY: Self = $ty::INFINITY;
            const NEG_INFINITY: Self = $ty::NEG_INFINITY;
            const NAN: Self = $ty::NAN;
            const NAME: &'static str = stringify!($ty);

            #[inline]
            fn is_nan(self) -> bool {
                $ty::is_nan(self)
            }

            #[inline]
            fn is_infinite(self) -> bool {
                $ty::is_infinite(self)
            }

            #[inline]
            fn is_sign_negative(self) -> bool {
                $ty::is_sign_negative(self)
            }
        }
    )*};
}

impl_float!(f32, f64);

// -----------------------------------------------------------------------------
// Literals

/// An optional `-` followed by at least one digit.
pub(crate) fn is_int_literal(literal: &[u8]) -> bool {
    let digits = literal.strip_prefix(b"-").unwrap_or(literal);
    !digits.is_empty() && digits.iter().all(u8::is_ascii_digit)
}

/// The byte set of a decimal float, or one of the special spellings.
pub(crate) fn is_float_literal(literal: &[u8]) -> bool {
    matches!(literal, b"INF" | b"-INF" | b"NAN")
        || (!literal.is_empty()
            && literal
                .iter()
                .all(|&byte| byte.is_ascii_digit() || matches!(byte, b'+' | b'-' | b'.' | b'e' | b'E')))
}

#[inline]
fn lossy(literal: &[u8]) -> String {
    String::from_utf8_lossy(literal).into_owned()
}

/// Parses an integer literal at the width of `T`.
///
/// A value outside the range of `T` is [`Error::OutOfRange`]; nothing is
/// truncated or wrapped. `-0` is accepted for unsigned targets.
pub(crate) fn parse_int<T: Integer>(literal: &[u8]) -> Result<T> {
    if !is_int_literal(literal) {
        return Err(Error::InvalidInt {
            literal: lossy(literal),
        });
    }
    let out_of_range = || Error::OutOfRange {
        literal: lossy(literal),
        width: T::NAME,
    };

    let mut text = core::str::from_utf8(literal).map_err(|_| Error::InvalidInt {
        literal: lossy(literal),
    })?;
    if !T::SIGNED && let Some(digits) = text.strip_prefix('-') {
        if digits.bytes().any(|byte| byte != b'0') {
            return Err(out_of_range());
        }
        text = digits;
    }

    text.parse::<T>().map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => out_of_range(),
        _ => Error::InvalidInt {
            literal: lossy(literal),
        },
    })
}

/// Parses a float literal at the width of `T`.
///
/// `INF`, `-INF` and `NAN` are matched exactly. A finite literal that
/// overflows to infinity is [`Error::OutOfRange`].
pub(crate) fn parse_float<T: Float>(literal: &[u8]) -> Result<T> {
    match literal {
        b"INF" => return Ok(T::INFINITY),
        b"-INF" => return Ok(T::NEG_INFINITY),
        b"NAN" => return Ok(T::NAN),
        _ => {}
    }
    let invalid = || Error::InvalidFloat {
        literal: lossy(literal),
    };
    if !is_float_literal(literal) {
        return Err(invalid());
    }

    let text = core::str::from_utf8(literal).map_err(|_| invalid())?;
    let value: T = text.parse().map_err(|_| invalid())?;
    if value.is_infinite() {
        return Err(Error::OutOfRange {
            literal: lossy(literal),
            width: T::NAME,
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::{parse_float, parse_int};
    use crate::Error;

    #[test]
    fn int_bounds() {
        assert_eq!(parse_int::<i8>(b"-128").unwrap(), i8::MIN);
        assert!(matches!(
            parse_int::<i8>(b"128"),
            Err(Error::OutOfRange { width: "i8", .. })
        ));
        assert!(matches!(
            parse_int::<u16>(b"-1"),
            Err(Error::OutOfRange { width: "u16", .. })
        ));
        assert_eq!(parse_int::<u16>(b"-0").unwrap(), 0);
        assert_eq!(parse_int::<u64>(b"18446744073709551615").unwrap(), u64::MAX);
    }

    #[test]
    fn int_grammar() {
        for literal in [&b"+5"[..], b"", b"-", b"1.0", b" 1", b"0x10"] {
            assert!(
                matches!(parse_int::<i64>(literal), Err(Error::InvalidInt { .. })),
                "{literal:?}"
            );
        }
    }

    #[test]
    fn float_specials_and_range() {
        assert_eq!(parse_float::<f64>(b"INF").unwrap(), f64::INFINITY);
        assert_eq!(parse_float::<f32>(b"-INF").unwrap(), f32::NEG_INFINITY);
        assert!(parse_float::<f64>(b"NAN").unwrap().is_nan());
        assert!(matches!(
            parse_float::<f64>(b"inf"),
            Err(Error::InvalidFloat { .. })
        ));
        assert!(matches!(
            parse_float::<f32>(b"3.402823466e+50"),
            Err(Error::OutOfRange { width: "f32", .. })
        ));
        assert_eq!(parse_float::<f64>(b"1.5e3").unwrap(), 1500.0);
        assert_eq!(parse_float::<f64>(b"-0").unwrap(), 0.0);
    }
}
