use crate::impls::{NonGenericTypeInfoCell, serial_any_methods};
use crate::info::{Type, TypeInfo, Typed};
use crate::{Serial, SerialMut, SerialRef};

// Types with no wire form. They are described so that containers holding
// them can be built, and the codec rejects them with `Unsupported`.
macro_rules! impl_opaque {
    ($($ty:ty),* $(,)?) => {$(
        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| TypeInfo::Opaque(Type::of::<$ty>()))
            }
        }

        impl Serial for $ty {
            serial_any_methods!();

            #[inline]
            fn serial_ref(&self) -> SerialRef<'_> {
                SerialRef::Opaque
            }

            #[inline]
            fn serial_mut(&mut self) -> SerialMut<'_> {
                SerialMut::Opaque
            }
        }
    )*};
}

impl_opaque!(char, i128, u128);
