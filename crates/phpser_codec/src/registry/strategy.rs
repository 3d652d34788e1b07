use alloc::boxed::Box;
use core::fmt;
use std::sync::{OnceLock, PoisonError, RwLock};

use phpser_utils::TypeIdMap;

use crate::codec::{Decoder, Encoder, composite, primitive};
use crate::info::{FloatKind, IntKind, SerialKind, TypeInfo, Typed};
use crate::{Error, Result, Serial};

/// Reads one value from the decoder into `value`.
pub type DecodeFn = fn(&'static Strategy, &mut Decoder<'_>, &mut dyn Serial) -> Result<()>;

/// Writes `value` to the encoder.
pub type EncodeFn = fn(&'static Strategy, &mut Encoder<'_>, &dyn Serial) -> Result<()>;

// -----------------------------------------------------------------------------
// Strategy

/// The read/write pair chosen for one type.
///
/// A strategy is a pure function of its [`TypeInfo`]. Composite strategies
/// bind the strategies of their parts on first use, which lets a record
/// reach itself through `Option<Box<Self>>` without recursing at build time.
pub struct Strategy {
    info: &'static TypeInfo,
    decode: DecodeFn,
    encode: EncodeFn,
    item: OnceLock<&'static Strategy>,
    key: OnceLock<&'static Strategy>,
}

impl Strategy {
    /// Picks the functions for a descriptor.
    pub fn new(info: &'static TypeInfo) -> Self {
        let (decode, encode): (DecodeFn, EncodeFn) = match info {
            TypeInfo::Nil(_) => (primitive::decode_nil, primitive::encode_scalar),
            TypeInfo::Bool(_) => (primitive::decode_bool, primitive::encode_scalar),
            TypeInfo::Int(int) => (int_decoder(int.kind()), primitive::encode_scalar),
            TypeInfo::Float(float) => match float.kind() {
                FloatKind::F32 => (primitive::decode_float::<f32>, primitive::encode_scalar),
                FloatKind::F64 => (primitive::decode_float::<f64>, primitive::encode_scalar),
            },
            TypeInfo::String(_) => (primitive::decode_string, primitive::encode_scalar),
            TypeInfo::Optional(_) => (composite::decode_optional, composite::encode_optional),
            TypeInfo::Pointer(_) => (composite::decode_pointer, composite::encode_pointer),
            TypeInfo::List(_) => (composite::decode_list, composite::encode_list),
            TypeInfo::Map(_) => (composite::decode_map, composite::encode_map),
            TypeInfo::Record(_) => (composite::decode_record, composite::encode_record),
            TypeInfo::Opaque(_) => (primitive::reject_decode, primitive::reject_encode),
        };

        Self {
            info,
            decode,
            encode,
            item: OnceLock::new(),
            key: OnceLock::new(),
        }
    }

    #[inline]
    pub fn info(&self) -> &'static TypeInfo {
        self.info
    }

    #[inline]
    pub fn kind(&self) -> SerialKind {
        self.info.kind()
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.info.type_path()
    }

    /// Decodes one value into `value`, which must be of this strategy's type.
    #[inline]
    pub fn decode(&'static self, decoder: &mut Decoder<'_>, value: &mut dyn Serial) -> Result<()> {
        (self.decode)(self, decoder, value)
    }

    /// Encodes `value`, which must be of this strategy's type.
    #[inline]
    pub fn encode(&'static self, encoder: &mut Encoder<'_>, value: &dyn Serial) -> Result<()> {
        (self.encode)(self, encoder, value)
    }

    /// Strategy of the list item, map value, or optional/pointer target.
    pub fn item(&self) -> Result<&'static Strategy> {
        let info = self.info.item_info().ok_or_else(|| self.mismatch())?;
        Ok(*self
            .item
            .get_or_init(|| StrategyTable::global().resolve(info)))
    }

    /// Strategy of the map key.
    pub fn key(&self) -> Result<&'static Strategy> {
        let info = self.info.key_info().ok_or_else(|| self.mismatch())?;
        Ok(*self
            .key
            .get_or_init(|| StrategyTable::global().resolve(info)))
    }

    /// The error for a value that does not match this strategy's kind.
    pub(crate) fn mismatch(&self) -> Error {
        Error::Mismatch {
            type_path: self.type_path(),
            expected: self.kind(),
        }
    }
}

impl fmt::Debug for Strategy {
    // Nested strategies are left out; a recursive type would never finish.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Strategy")
            .field("type_path", &self.type_path())
            .field("kind", &self.kind())
            .finish_non_exhaustive()
    }
}

fn int_decoder(kind: IntKind) -> DecodeFn {
    match kind {
        IntKind::I8 => primitive::decode_int::<i8>,
        IntKind::I16 => primitive::decode_int::<i16>,
        IntKind::I32 => primitive::decode_int::<i32>,
        IntKind::I64 => primitive::decode_int::<i64>,
        IntKind::Isize => primitive::decode_int::<isize>,
        IntKind::U8 => primitive::decode_int::<u8>,
        IntKind::U16 => primitive::decode_int::<u16>,
        IntKind::U32 => primitive::decode_int::<u32>,
        IntKind::U64 => primitive::decode_int::<u64>,
        IntKind::Usize => primitive::decode_int::<usize>,
    }
}

// -----------------------------------------------------------------------------
// StrategyTable

/// Process-wide map from type to [`Strategy`].
///
/// Lookups take a read lock. On a miss the strategy is built outside any
/// lock and then stored; if another thread stored one first, that one is
/// kept and the new one dropped.
pub struct StrategyTable {
    entries: RwLock<TypeIdMap<&'static Strategy>>,
}

static GLOBAL_STRATEGIES: StrategyTable = StrategyTable::new();

impl StrategyTable {
    pub const fn new() -> Self {
        Self {
            entries: RwLock::new(TypeIdMap::new()),
        }
    }

    /// The table used by [`Decoder`] and [`Encoder`].
    #[inline]
    pub fn global() -> &'static Self {
        &GLOBAL_STRATEGIES
    }

    /// Returns the strategy for `info`, building it on first request.
    pub fn resolve(&self, info: &'static TypeInfo) -> &'static Strategy {
        let type_id = info.type_id();
        if let Some(found) = self.get(info) {
            return found;
        }

        log::trace!("building strategy for `{}` ({})", info.type_path(), info.kind());
        let strategy = Strategy::new(info);

        *self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, || Box::leak(Box::new(strategy)))
    }

    /// Returns the strategy for `info` if one was already built.
    pub fn get(&self, info: &TypeInfo) -> Option<&'static Strategy> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&info.type_id())
            .copied()
    }

    /// Number of types with a strategy.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Shorthand for resolving `T` in the global table.
///
/// ```
/// use phpser_codec::info::SerialKind;
/// use phpser_codec::registry::strategy_of;
///
/// let strategy = strategy_of::<Vec<String>>();
/// assert_eq!(strategy.kind(), SerialKind::List);
/// assert_eq!(strategy.item().unwrap().kind(), SerialKind::String);
/// assert!(core::ptr::eq(strategy, strategy_of::<Vec<String>>()));
/// ```
#[inline]
pub fn strategy_of<T: Typed>() -> &'static Strategy {
    StrategyTable::global().resolve(T::type_info())
}

#[cfg(test)]
mod tests {
    use super::{StrategyTable, strategy_of};
    use crate::info::{SerialKind, Typed};

    #[test]
    fn local_table_is_independent() {
        let table = StrategyTable::new();
        assert_eq!(table.len(), 0);
        let first = table.resolve(u16::type_info());
        let second = table.resolve(u16::type_info());
        assert!(core::ptr::eq(first, second));
        assert_eq!(table.len(), 1);
        assert!(table.get(u32::type_info()).is_none());
    }

    #[test]
    fn children_bind_lazily() {
        let strategy = strategy_of::<Option<Box<u8>>>();
        assert_eq!(strategy.kind(), SerialKind::Optional);
        let pointer = strategy.item().unwrap();
        assert_eq!(pointer.kind(), SerialKind::Pointer);
        assert_eq!(pointer.item().unwrap().kind(), SerialKind::Int);
        assert!(strategy.key().is_err());
    }
}
