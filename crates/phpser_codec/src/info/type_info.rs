use core::any::TypeId;
use core::fmt;

use thiserror::Error;

use crate::info::{RecordInfo, Typed};

// -----------------------------------------------------------------------------
// SerialKind

/// The wire shape of a type.
///
/// Obtained through [`TypeInfo::kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SerialKind {
    Nil,
    Bool,
    Int,
    Float,
    String,
    Optional,
    Pointer,
    List,
    Map,
    Record,
    Opaque,
}

impl fmt::Display for SerialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => f.pad("Nil"),
            Self::Bool => f.pad("Bool"),
            Self::Int => f.pad("Int"),
            Self::Float => f.pad("Float"),
            Self::String => f.pad("String"),
            Self::Optional => f.pad("Optional"),
            Self::Pointer => f.pad("Pointer"),
            Self::List => f.pad("List"),
            Self::Map => f.pad("Map"),
            Self::Record => f.pad("Record"),
            Self::Opaque => f.pad("Opaque"),
        }
    }
}

/// Returned when a [`TypeInfo`] is not of the requested [`SerialKind`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("kind mismatch: expected {expected}, received {received}")]
pub struct KindError {
    pub expected: SerialKind,
    pub received: SerialKind,
}

// -----------------------------------------------------------------------------
// Type

/// Identity of a described type: its [`TypeId`] and its path.
#[derive(Clone, Copy, Debug)]
pub struct Type {
    id: TypeId,
    path: &'static str,
}

impl Type {
    /// Creates the [`Type`] of `T`.
    ///
    /// # Example
    ///
    /// ```
    /// # use core::any::TypeId;
    /// # use phpser_codec::info::Type;
    /// let ty = Type::of::<String>();
    /// assert_eq!(ty.id(), TypeId::of::<String>());
    /// assert_eq!(ty.path(), "alloc::string::String");
    /// ```
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: core::any::type_name::<T>(),
        }
    }

    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// The full path of the type, as given by [`core::any::type_name`].
    #[inline]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    #[inline]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

// -----------------------------------------------------------------------------
// Scalars

/// Exact integer type of an [`IntInfo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntKind {
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
}

impl IntKind {
    /// Width in bits; pointer-sized kinds follow the target.
    pub const fn bits(self) -> u32 {
        match self {
            Self::I8 | Self::U8 => 8,
            Self::I16 | Self::U16 => 16,
            Self::I32 | Self::U32 => 32,
            Self::I64 | Self::U64 => 64,
            Self::Isize | Self::Usize => usize::BITS,
        }
    }

    pub const fn is_signed(self) -> bool {
        matches!(
            self,
            Self::I8 | Self::I16 | Self::I32 | Self::I64 | Self::Isize
        )
    }
}

/// Descriptor of a fixed-width integer.
#[derive(Clone, Copy, Debug)]
pub struct IntInfo {
    ty: Type,
    kind: IntKind,
}

impl IntInfo {
    #[inline]
    pub fn new<T: Typed>(kind: IntKind) -> Self {
        Self {
            ty: Type::of::<T>(),
            kind,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub const fn kind(&self) -> IntKind {
        self.kind
    }
}

/// Exact float type of a [`FloatInfo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatKind {
    F32,
    F64,
}

/// Descriptor of an IEEE-754 float.
#[derive(Clone, Copy, Debug)]
pub struct FloatInfo {
    ty: Type,
    kind: FloatKind,
}

impl FloatInfo {
    #[inline]
    pub fn new<T: Typed>(kind: FloatKind) -> Self {
        Self {
            ty: Type::of::<T>(),
            kind,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub const fn kind(&self) -> FloatKind {
        self.kind
    }
}

// -----------------------------------------------------------------------------
// Wrappers and containers

// The nested descriptors are reached through fn pointers so that a
// recursive type can describe itself without evaluating its own cell.
macro_rules! impl_single_target_info {
    ($(#[$attr:meta])* $name:ident, $field:ident) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Debug)]
        pub struct $name {
            ty: Type,
            $field: fn() -> &'static TypeInfo,
        }

        impl $name {
            #[inline]
            pub fn new<T: Typed, Inner: Typed>() -> Self {
                Self {
                    ty: Type::of::<T>(),
                    $field: Inner::type_info,
                }
            }

            #[inline]
            pub const fn ty(&self) -> &Type {
                &self.ty
            }

            #[inline]
            pub fn $field(&self) -> &'static TypeInfo {
                (self.$field)()
            }
        }
    };
}

impl_single_target_info!(
    /// Descriptor of a nullable slot such as `Option<T>`: `N;` or the target.
    OptionalInfo,
    target
);

impl_single_target_info!(
    /// Descriptor of a transparent owning pointer such as `Box<T>`.
    PointerInfo,
    target
);

impl_single_target_info!(
    /// Descriptor of a growable sequence with 0-based positional keys.
    ListInfo,
    item
);

/// Descriptor of a key/value mapping.
#[derive(Clone, Copy, Debug)]
pub struct MapInfo {
    ty: Type,
    key: fn() -> &'static TypeInfo,
    value: fn() -> &'static TypeInfo,
}

impl MapInfo {
    #[inline]
    pub fn new<T: Typed, K: Typed, V: Typed>() -> Self {
        Self {
            ty: Type::of::<T>(),
            key: K::type_info,
            value: V::type_info,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn key(&self) -> &'static TypeInfo {
        (self.key)()
    }

    #[inline]
    pub fn value(&self) -> &'static TypeInfo {
        (self.value)()
    }
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Static description of how a type maps onto the wire.
///
/// | Variant | Wire form |
/// |---|---|
/// | `Nil` | `N;` |
/// | `Bool` | `b:0;` / `b:1;` |
/// | `Int` | `i:-12;` |
/// | `Float` | `d:0.5;`, `d:INF;`, `d:-INF;`, `d:NAN;` |
/// | `String` | `s:<bytes>:"...";` |
/// | `Optional` | `N;` or the target's form |
/// | `Pointer` | the target's form |
/// | `List`, `Map`, `Record` | `a:<count>:{ key value ... }` |
/// | `Opaque` | none; the codec rejects it |
#[derive(Clone, Debug)]
pub enum TypeInfo {
    Nil(Type),
    Bool(Type),
    Int(IntInfo),
    Float(FloatInfo),
    String(Type),
    Optional(OptionalInfo),
    Pointer(PointerInfo),
    List(ListInfo),
    Map(MapInfo),
    Record(RecordInfo),
    Opaque(Type),
}

macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $info:ident) => {
        /// Narrows to the descriptor of one kind.
        pub const fn $name(&self) -> Result<&$info, KindError> {
            match self {
                Self::$kind(info) => Ok(info),
                _ => Err(KindError {
                    expected: SerialKind::$kind,
                    received: self.kind(),
                }),
            }
        }
    };
}

impl TypeInfo {
    impl_cast_method!(as_int: Int => IntInfo);
    impl_cast_method!(as_float: Float => FloatInfo);
    impl_cast_method!(as_optional: Optional => OptionalInfo);
    impl_cast_method!(as_pointer: Pointer => PointerInfo);
    impl_cast_method!(as_list: List => ListInfo);
    impl_cast_method!(as_map: Map => MapInfo);
    impl_cast_method!(as_record: Record => RecordInfo);

    pub const fn kind(&self) -> SerialKind {
        match self {
            Self::Nil(_) => SerialKind::Nil,
            Self::Bool(_) => SerialKind::Bool,
            Self::Int(_) => SerialKind::Int,
            Self::Float(_) => SerialKind::Float,
            Self::String(_) => SerialKind::String,
            Self::Optional(_) => SerialKind::Optional,
            Self::Pointer(_) => SerialKind::Pointer,
            Self::List(_) => SerialKind::List,
            Self::Map(_) => SerialKind::Map,
            Self::Record(_) => SerialKind::Record,
            Self::Opaque(_) => SerialKind::Opaque,
        }
    }

    pub const fn ty(&self) -> &Type {
        match self {
            Self::Nil(ty) | Self::Bool(ty) | Self::String(ty) | Self::Opaque(ty) => ty,
            Self::Int(info) => info.ty(),
            Self::Float(info) => info.ty(),
            Self::Optional(info) => info.ty(),
            Self::Pointer(info) => info.ty(),
            Self::List(info) => info.ty(),
            Self::Map(info) => info.ty(),
            Self::Record(info) => info.ty(),
        }
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.ty().id()
    }

    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.ty().path()
    }

    /// The descriptor a composite delegates its values to: the list item,
    /// the map value, or the optional/pointer target.
    pub fn item_info(&self) -> Option<&'static TypeInfo> {
        match self {
            Self::Optional(info) => Some(info.target()),
            Self::Pointer(info) => Some(info.target()),
            Self::List(info) => Some(info.item()),
            Self::Map(info) => Some(info.value()),
            _ => None,
        }
    }

    /// The key descriptor of a map.
    pub fn key_info(&self) -> Option<&'static TypeInfo> {
        match self {
            Self::Map(info) => Some(info.key()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{IntKind, SerialKind};
    use crate::info::Typed;

    #[test]
    fn int_kinds() {
        assert_eq!(IntKind::U16.bits(), 16);
        assert_eq!(IntKind::Usize.bits(), usize::BITS);
        assert!(IntKind::Isize.is_signed());
        assert!(!IntKind::U64.is_signed());
    }

    #[test]
    fn casts_report_kinds() {
        let info = <Option<u8>>::type_info();
        assert!(info.as_optional().is_ok());
        let err = info.as_list().unwrap_err();
        assert_eq!(err.expected, SerialKind::List);
        assert_eq!(err.received, SerialKind::Optional);
        assert_eq!(info.item_info().map(|i| i.kind()), Some(SerialKind::Int));
    }
}
