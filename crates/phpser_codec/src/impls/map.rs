use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use core::hash::{BuildHasher, Hash};
use std::collections::HashMap;

use crate::impls::{GenericTypeInfoCell, serial_any_methods};
use crate::info::{MapInfo, TypeInfo, Typed};
use crate::ops::{Map, MapEntryFill};
use crate::{Result, Serial, SerialMut, SerialRef};

macro_rules! impl_map_common {
    (impl<$($param:ident),*> for $ty:ty where [$($bounds:tt)*]) => {
        impl<$($param),*> Typed for $ty
        where
            $($bounds)*
        {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| TypeInfo::Map(MapInfo::new::<Self, K, V>()))
            }
        }

        impl<$($param),*> Serial for $ty
        where
            $($bounds)*
        {
            serial_any_methods!();

            #[inline]
            fn serial_ref(&self) -> SerialRef<'_> {
                SerialRef::Map(self)
            }

            #[inline]
            fn serial_mut(&mut self) -> SerialMut<'_> {
                SerialMut::Map(self)
            }
        }
    };
}

macro_rules! impl_map_ops {
    (impl<$($param:ident),*> for $ty:ty where [$($bounds:tt)*], reserve: $reserve:expr) => {
        impl<$($param),*> Map for $ty
        where
            $($bounds)*
        {
            #[inline]
            fn len(&self) -> usize {
                <$ty>::len(self)
            }

            fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Serial, &dyn Serial)> + '_> {
                Box::new(
                    <$ty>::iter(self).map(|(key, value)| (key as &dyn Serial, value as &dyn Serial)),
                )
            }

            #[inline]
            fn clear(&mut self) {
                <$ty>::clear(self);
            }

            #[inline]
            fn reserve(&mut self, additional: usize) {
                let reserve: fn(&mut Self, usize) = $reserve;
                reserve(self, additional);
            }

            fn insert_with(&mut self, fill: &mut MapEntryFill<'_>) -> Result<()> {
                let mut key = K::default();
                let mut value = V::default();
                fill(&mut key, &mut value)?;
                self.insert(key, value);
                Ok(())
            }
        }
    };
}

// -----------------------------------------------------------------------------
// std HashMap

impl_map_common!(
    impl<K, V, S> for HashMap<K, V, S>
    where [
        K: Serial + Typed + Default + Eq + Hash,
        V: Serial + Typed + Default,
        S: BuildHasher + Default + Send + Sync + 'static,
    ]
);

impl_map_ops!(
    impl<K, V, S> for HashMap<K, V, S>
    where [
        K: Serial + Typed + Default + Eq + Hash,
        V: Serial + Typed + Default,
        S: BuildHasher + Default + Send + Sync + 'static,
    ],
    reserve: |map, additional| HashMap::reserve(map, additional)
);

// -----------------------------------------------------------------------------
// hashbrown HashMap

impl_map_common!(
    impl<K, V, S> for phpser_utils::hash::hashbrown::HashMap<K, V, S>
    where [
        K: Serial + Typed + Default + Eq + Hash,
        V: Serial + Typed + Default,
        S: BuildHasher + Default + Send + Sync + 'static,
    ]
);

impl_map_ops!(
    impl<K, V, S> for phpser_utils::hash::hashbrown::HashMap<K, V, S>
    where [
        K: Serial + Typed + Default + Eq + Hash,
        V: Serial + Typed + Default,
        S: BuildHasher + Default + Send + Sync + 'static,
    ],
    reserve: |map, additional| phpser_utils::hash::hashbrown::HashMap::reserve(map, additional)
);

// -----------------------------------------------------------------------------
// BTreeMap

impl_map_common!(
    impl<K, V> for BTreeMap<K, V>
    where [
        K: Serial + Typed + Default + Ord,
        V: Serial + Typed + Default,
    ]
);

impl_map_ops!(
    impl<K, V> for BTreeMap<K, V>
    where [
        K: Serial + Typed + Default + Ord,
        V: Serial + Typed + Default,
    ],
    // Nodes are allocated as entries arrive.
    reserve: |_, _| {}
);

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;

    use crate::ops::Map;
    use crate::{Result, Serial};

    #[test]
    fn insert_with_replaces_value() {
        let mut map: BTreeMap<String, i64> = BTreeMap::new();
        for value in [1_i64, 2] {
            Map::insert_with(&mut map, &mut |key: &mut dyn Serial, slot: &mut dyn Serial| -> Result<()> {
                *key.downcast_mut::<String>().unwrap() = "k".into();
                *slot.downcast_mut::<i64>().unwrap() = value;
                Ok(())
            })
            .unwrap();
        }
        assert_eq!(map.len(), 1);
        assert_eq!(map["k"], 2);
        assert_eq!(Map::iter(&map).count(), 1);
    }
}
