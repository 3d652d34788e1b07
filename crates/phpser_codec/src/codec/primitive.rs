//! Strategies of the scalar kinds and of opaque types.

use alloc::string::String;
use core::any::Any;

use crate::codec::number::{Float, Integer};
use crate::codec::{Decoder, Encoder};
use crate::registry::Strategy;
use crate::{Error, Result, Serial, SerialRef};

fn slot<'a, T: Any>(strategy: &Strategy, value: &'a mut dyn Serial) -> Result<&'a mut T> {
    value
        .as_any_mut()
        .downcast_mut::<T>()
        .ok_or_else(|| strategy.mismatch())
}

pub(crate) fn decode_nil(
    _strategy: &'static Strategy,
    decoder: &mut Decoder<'_>,
    _value: &mut dyn Serial,
) -> Result<()> {
    decoder.decode_nil()
}

pub(crate) fn decode_bool(
    strategy: &'static Strategy,
    decoder: &mut Decoder<'_>,
    value: &mut dyn Serial,
) -> Result<()> {
    let target = slot::<bool>(strategy, value)?;
    *target = decoder.decode_bool()?;
    Ok(())
}

pub(crate) fn decode_int<T: Integer>(
    strategy: &'static Strategy,
    decoder: &mut Decoder<'_>,
    value: &mut dyn Serial,
) -> Result<()> {
    let target = slot::<T>(strategy, value)?;
    *target = decoder.decode_int::<T>()?;
    Ok(())
}

pub(crate) fn decode_float<T: Float>(
    strategy: &'static Strategy,
    decoder: &mut Decoder<'_>,
    value: &mut dyn Serial,
) -> Result<()> {
    let target = slot::<T>(strategy, value)?;
    *target = decoder.decode_float::<T>()?;
    Ok(())
}

pub(crate) fn decode_string(
    strategy: &'static Strategy,
    decoder: &mut Decoder<'_>,
    value: &mut dyn Serial,
) -> Result<()> {
    let target = slot::<String>(strategy, value)?;
    *target = decoder.decode_string()?;
    Ok(())
}

/// Shared by every scalar kind; the value's read view carries the width.
pub(crate) fn encode_scalar(
    strategy: &'static Strategy,
    encoder: &mut Encoder<'_>,
    value: &dyn Serial,
) -> Result<()> {
    match value.serial_ref() {
        SerialRef::Nil => encoder.encode_nil(),
        SerialRef::Bool(value) => encoder.encode_bool(value),
        SerialRef::Int(value) => encoder.encode_int(value),
        SerialRef::Uint(value) => encoder.encode_uint(value),
        SerialRef::F32(value) => encoder.encode_float(value),
        SerialRef::F64(value) => encoder.encode_float(value),
        SerialRef::Str(value) => encoder.encode_str(value),
        _ => Err(strategy.mismatch()),
    }
}

pub(crate) fn reject_decode(
    strategy: &'static Strategy,
    _decoder: &mut Decoder<'_>,
    _value: &mut dyn Serial,
) -> Result<()> {
    Err(Error::Unsupported {
        type_path: strategy.type_path(),
    })
}

pub(crate) fn reject_encode(
    strategy: &'static Strategy,
    _encoder: &mut Encoder<'_>,
    _value: &dyn Serial,
) -> Result<()> {
    Err(Error::Unsupported {
        type_path: strategy.type_path(),
    })
}

#[cfg(test)]
mod tests {
    use crate::codec::{Decoder, Encoder, SliceSource};
    use crate::registry::strategy_of;
    use crate::Error;

    #[test]
    fn value_of_another_type_is_a_mismatch() {
        let mut source = SliceSource::new(b"i:1;");
        let mut decoder = Decoder::new(&mut source);
        let mut wrong = String::new();
        let err = decoder
            .decode_with(strategy_of::<i32>(), &mut wrong)
            .unwrap_err();
        assert!(matches!(err, Error::Mismatch { type_path: "i32", .. }));
    }

    #[test]
    fn opaque_leaves_the_stream_alone() {
        let mut source = SliceSource::new(b"i:1;");
        let mut decoder = Decoder::new(&mut source);
        let mut value = 'x';
        let err = decoder.decode_value(&mut value).unwrap_err();
        assert!(matches!(err, Error::Unsupported { type_path: "char" }));
        assert_eq!(decoder.decode_i64().unwrap(), 1);

        let mut out = Vec::new();
        let err = Encoder::new(&mut out).encode(&7_u128).unwrap_err();
        assert!(matches!(err, Error::Unsupported { type_path: "u128" }));
        assert!(out.is_empty());
    }
}
