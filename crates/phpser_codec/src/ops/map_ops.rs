use alloc::boxed::Box;

use crate::{Result, Serial};

/// Callback that decodes one key and one value into default slots.
pub type MapEntryFill<'a> = dyn FnMut(&mut dyn Serial, &mut dyn Serial) -> Result<()> + 'a;

/// A key/value mapping.
///
/// Entries are encoded in the map's own iteration order.
pub trait Map: Serial {
    fn len(&self) -> usize;

    fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Serial, &dyn Serial)> + '_>;

    fn clear(&mut self);

    fn reserve(&mut self, additional: usize);

    /// Creates a default key and value, lets `fill` decode into them, then
    /// inserts the pair. An existing equal key has its value replaced.
    ///
    /// Nothing is inserted if `fill` fails.
    fn insert_with(&mut self, fill: &mut MapEntryFill<'_>) -> Result<()>;
}
