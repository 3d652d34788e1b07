use crate::{Serial, SerialMut, SerialRef};

/// A struct with named fields, addressed by declaration index.
///
/// Implemented by `#[derive(Serial)]`; indices match
/// [`RecordInfo::field_at`](crate::info::RecordInfo::field_at).
pub trait Record: Serial {
    fn field_len(&self) -> usize;

    fn field_at(&self, index: usize) -> Option<&dyn Serial>;

    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Serial>;
}

/// Follows a path of field indices through nested records.
///
/// An empty path returns `value` itself.
///
/// # Examples
///
/// ```
/// use phpser_codec::Serial;
/// use phpser_codec::ops::field_by_path;
///
/// #[derive(Serial, Default)]
/// struct Inner { id: u32 }
///
/// #[derive(Serial, Default)]
/// struct Outer { name: String, inner: Inner }
///
/// let outer = Outer { name: String::new(), inner: Inner { id: 4 } };
/// let id = field_by_path(&outer, &[1, 0]).unwrap();
/// assert_eq!(id.downcast_ref::<u32>(), Some(&4));
/// ```
pub fn field_by_path<'a>(value: &'a dyn Serial, path: &[usize]) -> Option<&'a dyn Serial> {
    path.iter()
        .try_fold(value, |current, &index| match current.serial_ref() {
            SerialRef::Record(record) => record.field_at(index),
            _ => None,
        })
}

/// Mutable form of [`field_by_path`].
pub fn field_by_path_mut<'a>(
    value: &'a mut dyn Serial,
    path: &[usize],
) -> Option<&'a mut dyn Serial> {
    let Some((&first, rest)) = path.split_first() else {
        return Some(value);
    };
    match value.serial_mut() {
        SerialMut::Record(record) => field_by_path_mut(record.field_at_mut(first)?, rest),
        _ => None,
    }
}
