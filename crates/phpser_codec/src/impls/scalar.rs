use alloc::string::String;

use crate::impls::{NonGenericTypeInfoCell, serial_any_methods};
use crate::info::{FloatInfo, FloatKind, IntInfo, IntKind, Type, TypeInfo, Typed};
use crate::{Serial, SerialMut, SerialRef};

macro_rules! impl_scalar {
    ($ty:ty, |$this:ident| $view:expr, $info:expr) => {
        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| $info)
            }
        }

        impl Serial for $ty {
            serial_any_methods!();

            #[inline]
            fn serial_ref(&self) -> SerialRef<'_> {
                let $this = self;
                $view
            }

            #[inline]
            fn serial_mut(&mut self) -> SerialMut<'_> {
                SerialMut::Scalar
            }
        }
    };
}

macro_rules! impl_int {
    ($($ty:ty => $kind:ident as $view:ident($wide:ty)),* $(,)?) => {$(
        impl_scalar!(
            $ty,
            |this| SerialRef::$view(*this as $wide),
            TypeInfo::Int(IntInfo::new::<$ty>(IntKind::$kind))
        );
    )*};
}

impl_int!(
    i8 => I8 as Int(i64),
    i16 => I16 as Int(i64),
    i32 => I32 as Int(i64),
    i64 => I64 as Int(i64),
    isize => Isize as Int(i64),
    u8 => U8 as Uint(u64),
    u16 => U16 as Uint(u64),
    u32 => U32 as Uint(u64),
    u64 => U64 as Uint(u64),
    usize => Usize as Uint(u64),
);

impl_scalar!(
    f32,
    |this| SerialRef::F32(*this),
    TypeInfo::Float(FloatInfo::new::<f32>(FloatKind::F32))
);
impl_scalar!(
    f64,
    |this| SerialRef::F64(*this),
    TypeInfo::Float(FloatInfo::new::<f64>(FloatKind::F64))
);
impl_scalar!(
    bool,
    |this| SerialRef::Bool(*this),
    TypeInfo::Bool(Type::of::<bool>())
);
impl_scalar!(
    String,
    |this| SerialRef::Str(this.as_str()),
    TypeInfo::String(Type::of::<String>())
);
impl_scalar!(
    (),
    |_this| SerialRef::Nil,
    TypeInfo::Nil(Type::of::<()>())
);

#[cfg(test)]
mod tests {
    use crate::info::{IntKind, SerialKind, Typed};
    use crate::{Serial, SerialRef};

    #[test]
    fn views_widen() {
        assert!(matches!((-3_i8).serial_ref(), SerialRef::Int(-3)));
        assert!(matches!(u64::MAX.serial_ref(), SerialRef::Uint(u64::MAX)));
        assert!(matches!(().serial_ref(), SerialRef::Nil));
    }

    #[test]
    fn descriptors() {
        assert_eq!(u32::type_info().as_int().unwrap().kind(), IntKind::U32);
        assert_eq!(String::type_info().kind(), SerialKind::String);
        assert_eq!(<()>::type_info().kind(), SerialKind::Nil);
        assert!(core::ptr::eq(i64::type_info(), i64::type_info()));
    }
}
