//! Static storage for [`TypeInfo`].
//!
//! A `static` declared inside a generic function is shared by every
//! instantiation, so generic types cannot keep their descriptor in a plain
//! [`OnceLock`]. [`GenericTypeInfoCell`] keys its descriptors by
//! [`TypeId`] instead.

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use phpser_utils::TypeIdMap;

use crate::info::TypeInfo;

/// Descriptor storage for a non-generic type.
///
/// ```
/// use phpser_codec::impls::NonGenericTypeInfoCell;
/// use phpser_codec::info::{Type, TypeInfo, Typed};
///
/// struct Token;
///
/// impl Typed for Token {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::Opaque(Type::of::<Token>()))
///     }
/// }
///
/// assert!(core::ptr::eq(Token::type_info(), Token::type_info()));
/// ```
pub struct NonGenericTypeInfoCell(OnceLock<TypeInfo>);

impl NonGenericTypeInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored descriptor, building it with `f` on first use.
    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> TypeInfo) -> &TypeInfo {
        self.0.get_or_init(f)
    }
}

/// Descriptor storage shared by every instantiation of a generic type.
///
/// ```
/// use phpser_codec::impls::GenericTypeInfoCell;
/// use phpser_codec::info::{PointerInfo, TypeInfo, Typed};
///
/// struct Shared<T>(T);
///
/// impl<T: Typed> Typed for Shared<T> {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
///         CELL.get_or_insert::<Self>(|| TypeInfo::Pointer(PointerInfo::new::<Self, T>()))
///     }
/// }
///
/// assert_eq!(<Shared<u8>>::type_info().item_info().unwrap().type_path(), "u8");
/// assert_eq!(<Shared<bool>>::type_info().item_info().unwrap().type_path(), "bool");
/// ```
pub struct GenericTypeInfoCell(RwLock<TypeIdMap<&'static TypeInfo>>);

impl GenericTypeInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the descriptor stored for `G`, building it with `f` on first
    /// use. Concurrent first uses may both run `f`; the first insert wins.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> TypeInfo) -> &TypeInfo {
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(&self, type_id: TypeId, f: impl FnOnce() -> TypeInfo) -> &TypeInfo {
        match self.get_by_type_id(type_id) {
            Some(info) => info,
            None => self.insert_by_type_id(type_id, f()),
        }
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&'static TypeInfo> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, value: TypeInfo) -> &'static TypeInfo {
        *self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, || Box::leak(Box::new(value)))
    }
}
