//! Strategies of the composite kinds.
//!
//! Lists, maps and records share the array envelope `a:<n>:{ ... }` and
//! differ only in how keys are read and written.

use alloc::string::String;
use alloc::vec::Vec;

use crate::codec::decoder::{LIST_ALLOC_LIMIT, MAP_ALLOC_LIMIT};
use crate::codec::{Decoder, Encoder, UnknownFields};
use crate::registry::{FieldCache, FieldDescriptor, RecordFields, Strategy, TagConfig};
use crate::{Error, Result, Serial, SerialMut, SerialRef};

// -----------------------------------------------------------------------------
// Optional and pointer

pub(crate) fn decode_optional(
    strategy: &'static Strategy,
    decoder: &mut Decoder<'_>,
    value: &mut dyn Serial,
) -> Result<()> {
    let SerialMut::Optional(optional) = value.serial_mut() else {
        return Err(strategy.mismatch());
    };
    if decoder.peek_code()? == b'N' {
        decoder.decode_nil()?;
        optional.set_none();
        return Ok(());
    }
    strategy.item()?.decode(decoder, optional.get_or_insert_default())
}

pub(crate) fn encode_optional(
    strategy: &'static Strategy,
    encoder: &mut Encoder<'_>,
    value: &dyn Serial,
) -> Result<()> {
    let SerialRef::Optional(optional) = value.serial_ref() else {
        return Err(strategy.mismatch());
    };
    match optional.get() {
        Some(inner) => strategy.item()?.encode(encoder, inner),
        None => encoder.encode_nil(),
    }
}

pub(crate) fn decode_pointer(
    strategy: &'static Strategy,
    decoder: &mut Decoder<'_>,
    value: &mut dyn Serial,
) -> Result<()> {
    let SerialMut::Pointer(pointer) = value.serial_mut() else {
        return Err(strategy.mismatch());
    };
    strategy.item()?.decode(decoder, pointer.pointee_mut())
}

pub(crate) fn encode_pointer(
    strategy: &'static Strategy,
    encoder: &mut Encoder<'_>,
    value: &dyn Serial,
) -> Result<()> {
    let SerialRef::Pointer(pointer) = value.serial_ref() else {
        return Err(strategy.mismatch());
    };
    strategy.item()?.encode(encoder, pointer.pointee())
}

// -----------------------------------------------------------------------------
// List

pub(crate) fn decode_list(
    strategy: &'static Strategy,
    decoder: &mut Decoder<'_>,
    value: &mut dyn Serial,
) -> Result<()> {
    let SerialMut::List(list) = value.serial_mut() else {
        return Err(strategy.mismatch());
    };
    let item = strategy.item()?;

    let len = decoder.decode_array_len()?;
    list.clear();
    if LIST_ALLOC_LIMIT.exceeded_by(len) {
        log::debug!(
            "`{}` declares {len} items; reserving {} at a time",
            strategy.type_path(),
            LIST_ALLOC_LIMIT.ceiling(),
        );
    }
    list.reserve_exact(LIST_ALLOC_LIMIT.initial(len));

    for index in 0..len {
        let key = decoder.decode_i64()?;
        if usize::try_from(key).ok() != Some(index) {
            return Err(Error::KeyOrder {
                expected: index,
                found: key,
            });
        }
        if list.len() == list.capacity() {
            list.reserve_exact(LIST_ALLOC_LIMIT.next_step(len, index));
        }
        item.decode(decoder, list.push_default())?;
    }

    decoder.decode_array_end()
}

pub(crate) fn encode_list(
    strategy: &'static Strategy,
    encoder: &mut Encoder<'_>,
    value: &dyn Serial,
) -> Result<()> {
    let SerialRef::List(list) = value.serial_ref() else {
        return Err(strategy.mismatch());
    };
    let item = strategy.item()?;

    encoder.begin_array(list.len())?;
    for (index, element) in list.iter().enumerate() {
        encoder.encode_uint(index as u64)?;
        item.encode(encoder, element)?;
    }
    encoder.end_array()
}

// -----------------------------------------------------------------------------
// Map

pub(crate) fn decode_map(
    strategy: &'static Strategy,
    decoder: &mut Decoder<'_>,
    value: &mut dyn Serial,
) -> Result<()> {
    let SerialMut::Map(map) = value.serial_mut() else {
        return Err(strategy.mismatch());
    };
    let key_strategy = strategy.key()?;
    let value_strategy = strategy.item()?;

    let len = decoder.decode_array_len()?;
    map.clear();
    map.reserve(MAP_ALLOC_LIMIT.initial(len));

    for _ in 0..len {
        map.insert_with(&mut |key: &mut dyn Serial, slot: &mut dyn Serial| -> Result<()> {
            key_strategy.decode(decoder, key)?;
            value_strategy.decode(decoder, slot)
        })?;
    }

    decoder.decode_array_end()
}

pub(crate) fn encode_map(
    strategy: &'static Strategy,
    encoder: &mut Encoder<'_>,
    value: &dyn Serial,
) -> Result<()> {
    let SerialRef::Map(map) = value.serial_ref() else {
        return Err(strategy.mismatch());
    };
    let key_strategy = strategy.key()?;
    let value_strategy = strategy.item()?;

    encoder.begin_array(map.len())?;
    for (key, value) in map.iter() {
        key_strategy.encode(encoder, key)?;
        value_strategy.encode(encoder, value)?;
    }
    encoder.end_array()
}

// -----------------------------------------------------------------------------
// Record

fn record_fields(strategy: &'static Strategy, tags: TagConfig) -> Result<&'static RecordFields> {
    let info = strategy
        .info()
        .as_record()
        .map_err(|_| strategy.mismatch())?;
    Ok(FieldCache::global().fields(info, tags))
}

pub(crate) fn decode_record(
    strategy: &'static Strategy,
    decoder: &mut Decoder<'_>,
    value: &mut dyn Serial,
) -> Result<()> {
    let fields = record_fields(strategy, decoder.config().tags())?;

    let len = decoder.decode_array_len()?;
    for _ in 0..len {
        let name: String = decoder.decode_string()?;
        match fields.get(&name) {
            Some(field) => {
                let slot = field.locate_mut(value).ok_or_else(|| strategy.mismatch())?;
                field.strategy().decode(decoder, slot)?;
            }
            None => match decoder.config().unknown_fields() {
                UnknownFields::Lenient => {
                    log::trace!("skipping unknown field `{name}` of `{}`", strategy.type_path());
                    decoder.skip_value()?;
                }
                UnknownFields::Strict => {
                    return Err(Error::UnknownField {
                        name,
                        type_path: strategy.type_path(),
                    });
                }
            },
        }
    }

    decoder.decode_array_end()
}

pub(crate) fn encode_record(
    strategy: &'static Strategy,
    encoder: &mut Encoder<'_>,
    value: &dyn Serial,
) -> Result<()> {
    let fields = record_fields(strategy, encoder.config().tags())?;

    let mut present: Vec<(&FieldDescriptor, &dyn Serial)> = Vec::with_capacity(fields.len());
    for field in fields.iter() {
        let slot = field.locate(value).ok_or_else(|| strategy.mismatch())?;
        if field.omit_empty() && slot.serial_ref().is_empty() {
            continue;
        }
        present.push((field, slot));
    }

    encoder.begin_array(present.len())?;
    for (field, slot) in present {
        encoder.encode_str(field.name())?;
        field.strategy().encode(encoder, slot)?;
    }
    encoder.end_array()
}
