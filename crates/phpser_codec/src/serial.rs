use core::any::Any;

use crate::info::{DynamicTyped, SerialKind};
use crate::ops::{List, Map, Optional, Pointer, Record};

// -----------------------------------------------------------------------------
// Serial

/// A value the codec can read from and write into.
///
/// The codec never knows concrete types. It reaches values through this
/// trait: [`Serial::serial_ref`] exposes a read view for encoding, and
/// [`Serial::serial_mut`] a write view for decoding. Scalars are written
/// through [`Serial::as_any_mut`] by the strategy matching their
/// [`TypeInfo`](crate::info::TypeInfo).
///
/// Implemented for the built-in scalars and containers, and by
/// `#[derive(Serial)]` for records.
pub trait Serial: DynamicTyped + Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Read view of the value.
    fn serial_ref(&self) -> SerialRef<'_>;

    /// Write view of the value.
    fn serial_mut(&mut self) -> SerialMut<'_>;
}

impl dyn Serial {
    /// Returns `true` if the underlying type is `T`.
    #[inline]
    pub fn is<T: Serial>(&self) -> bool {
        self.as_any().is::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Serial>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    #[inline]
    pub fn downcast_mut<T: Serial>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut()
    }
}

// -----------------------------------------------------------------------------
// SerialRef

/// Read view of a [`Serial`] value.
///
/// Integer widths are erased here: every signed value reads as `Int(i64)`
/// and every unsigned one as `Uint(u64)`.
#[derive(Clone, Copy)]
pub enum SerialRef<'a> {
    Nil,
    Bool(bool),
    Int(i64),
    Uint(u64),
    F32(f32),
    F64(f64),
    Str(&'a str),
    Optional(&'a dyn Optional),
    Pointer(&'a dyn Pointer),
    List(&'a dyn List),
    Map(&'a dyn Map),
    Record(&'a dyn Record),
    Opaque,
}

impl SerialRef<'_> {
    pub fn kind(&self) -> SerialKind {
        match self {
            Self::Nil => SerialKind::Nil,
            Self::Bool(_) => SerialKind::Bool,
            Self::Int(_) | Self::Uint(_) => SerialKind::Int,
            Self::F32(_) | Self::F64(_) => SerialKind::Float,
            Self::Str(_) => SerialKind::String,
            Self::Optional(_) => SerialKind::Optional,
            Self::Pointer(_) => SerialKind::Pointer,
            Self::List(_) => SerialKind::List,
            Self::Map(_) => SerialKind::Map,
            Self::Record(_) => SerialKind::Record,
            Self::Opaque => SerialKind::Opaque,
        }
    }

    /// Whether an `omitempty` field holding this value is left out.
    ///
    /// Empty values are `N;`, `false`, zero, the empty string, `None`, and
    /// empty lists or maps. Pointers report their target. Records and
    /// opaque values are never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Nil => true,
            Self::Bool(value) => !value,
            Self::Int(value) => *value == 0,
            Self::Uint(value) => *value == 0,
            Self::F32(value) => *value == 0.0,
            Self::F64(value) => *value == 0.0,
            Self::Str(value) => value.is_empty(),
            Self::Optional(value) => value.get().is_none(),
            Self::Pointer(value) => value.pointee().serial_ref().is_empty(),
            Self::List(value) => value.len() == 0,
            Self::Map(value) => value.len() == 0,
            Self::Record(_) | Self::Opaque => false,
        }
    }
}

// -----------------------------------------------------------------------------
// SerialMut

/// Write view of a [`Serial`] value.
///
/// Leaves report `Scalar`; the decoder then writes through
/// [`Serial::as_any_mut`].
pub enum SerialMut<'a> {
    Scalar,
    Optional(&'a mut dyn Optional),
    Pointer(&'a mut dyn Pointer),
    List(&'a mut dyn List),
    Map(&'a mut dyn Map),
    Record(&'a mut dyn Record),
    Opaque,
}

#[cfg(test)]
mod tests {
    use super::SerialRef;
    use crate::Serial;

    #[test]
    fn emptiness() {
        assert!(0_u8.serial_ref().is_empty());
        assert!(!7_i32.serial_ref().is_empty());
        assert!(String::new().serial_ref().is_empty());
        assert!(None::<u8>.serial_ref().is_empty());
        assert!(!Some(0_u8).serial_ref().is_empty());
        assert!(Vec::<u8>::new().serial_ref().is_empty());
        assert!(Box::new(false).serial_ref().is_empty());
        assert!(SerialRef::Nil.is_empty());
        assert!((-0.0_f64).serial_ref().is_empty());
    }

    #[test]
    fn downcast_through_dyn() {
        let mut value = 5_u16;
        let dynamic: &mut dyn Serial = &mut value;
        assert!(dynamic.is::<u16>());
        *dynamic.downcast_mut::<u16>().unwrap() = 9;
        assert_eq!(value, 9);
    }
}
