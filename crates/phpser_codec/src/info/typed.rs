use crate::info::TypeInfo;

/// A type with a static [`TypeInfo`].
///
/// Implemented for the built-in scalars and containers, and by
/// `#[derive(Serial)]`. Hand-written impls store the descriptor in a
/// [`NonGenericTypeInfoCell`] or, for generic types, a
/// [`GenericTypeInfoCell`].
///
/// # Examples
///
/// ```
/// use phpser_codec::info::{SerialKind, Typed};
///
/// assert_eq!(<Vec<u8>>::type_info().kind(), SerialKind::List);
/// assert_eq!(<u8>::type_info().type_path(), "u8");
/// ```
///
/// [`NonGenericTypeInfoCell`]: crate::impls::NonGenericTypeInfoCell
/// [`GenericTypeInfoCell`]: crate::impls::GenericTypeInfoCell
pub trait Typed: 'static {
    /// Returns the descriptor of this type.
    fn type_info() -> &'static TypeInfo;
}

/// Object-safe access to [`Typed::type_info`].
///
/// Blanket-implemented for every [`Typed`] type, so a `&dyn Serial` can
/// report its own descriptor.
pub trait DynamicTyped {
    /// See [`Typed::type_info`].
    fn serial_type_info(&self) -> &'static TypeInfo;
}

impl<T: Typed> DynamicTyped for T {
    #[inline]
    fn serial_type_info(&self) -> &'static TypeInfo {
        Self::type_info()
    }
}
