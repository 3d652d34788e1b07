use alloc::boxed::Box;

use crate::impls::{GenericTypeInfoCell, serial_any_methods};
use crate::info::{OptionalInfo, PointerInfo, TypeInfo, Typed};
use crate::ops::{Optional, Pointer};
use crate::{Serial, SerialMut, SerialRef};

// -----------------------------------------------------------------------------
// Option

impl<T: Serial + Typed + Default> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Optional(OptionalInfo::new::<Self, T>()))
    }
}

impl<T: Serial + Typed + Default> Serial for Option<T> {
    serial_any_methods!();

    #[inline]
    fn serial_ref(&self) -> SerialRef<'_> {
        SerialRef::Optional(self)
    }

    #[inline]
    fn serial_mut(&mut self) -> SerialMut<'_> {
        SerialMut::Optional(self)
    }
}

impl<T: Serial + Typed + Default> Optional for Option<T> {
    #[inline]
    fn get(&self) -> Option<&dyn Serial> {
        self.as_ref().map(|value| value as &dyn Serial)
    }

    #[inline]
    fn set_none(&mut self) {
        *self = None;
    }

    #[inline]
    fn get_or_insert_default(&mut self) -> &mut dyn Serial {
        self.get_or_insert_with(T::default)
    }
}

// -----------------------------------------------------------------------------
// Box

impl<T: Serial + Typed> Typed for Box<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Pointer(PointerInfo::new::<Self, T>()))
    }
}

impl<T: Serial + Typed> Serial for Box<T> {
    serial_any_methods!();

    #[inline]
    fn serial_ref(&self) -> SerialRef<'_> {
        SerialRef::Pointer(self)
    }

    #[inline]
    fn serial_mut(&mut self) -> SerialMut<'_> {
        SerialMut::Pointer(self)
    }
}

impl<T: Serial + Typed> Pointer for Box<T> {
    #[inline]
    fn pointee(&self) -> &dyn Serial {
        &**self
    }

    #[inline]
    fn pointee_mut(&mut self) -> &mut dyn Serial {
        &mut **self
    }
}

#[cfg(test)]
mod tests {
    use crate::ops::Optional;

    #[test]
    fn optional_slot() {
        let mut slot: Option<u8> = None;
        assert!(Optional::get(&slot).is_none());
        *Optional::get_or_insert_default(&mut slot)
            .downcast_mut::<u8>()
            .unwrap() = 3;
        assert_eq!(slot, Some(3));
        slot.set_none();
        assert_eq!(slot, None);
    }
}
