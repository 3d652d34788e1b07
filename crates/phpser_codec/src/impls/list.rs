use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::impls::{GenericTypeInfoCell, serial_any_methods};
use crate::info::{ListInfo, TypeInfo, Typed};
use crate::ops::List;
use crate::{Serial, SerialMut, SerialRef};

impl<T: Serial + Typed + Default> Typed for Vec<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::List(ListInfo::new::<Self, T>()))
    }
}

impl<T: Serial + Typed + Default> Serial for Vec<T> {
    serial_any_methods!();

    #[inline]
    fn serial_ref(&self) -> SerialRef<'_> {
        SerialRef::List(self)
    }

    #[inline]
    fn serial_mut(&mut self) -> SerialMut<'_> {
        SerialMut::List(self)
    }
}

impl<T: Serial + Typed + Default> List for Vec<T> {
    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Serial> {
        self.as_slice().get(index).map(|item| item as &dyn Serial)
    }

    #[inline]
    fn capacity(&self) -> usize {
        Vec::capacity(self)
    }

    #[inline]
    fn reserve_exact(&mut self, additional: usize) {
        Vec::reserve_exact(self, additional);
    }

    #[inline]
    fn clear(&mut self) {
        Vec::clear(self);
    }

    fn push_default(&mut self) -> &mut dyn Serial {
        let index = Vec::len(self);
        self.push(T::default());
        &mut self[index]
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Serial> + '_> {
        Box::new(self.as_slice().iter().map(|item| item as &dyn Serial))
    }
}
