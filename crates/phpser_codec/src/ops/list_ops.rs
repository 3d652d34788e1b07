use alloc::boxed::Box;

use crate::Serial;

/// A growable sequence, encoded with keys `0..len`.
///
/// Decoding clears the list and appends elements one at a time; capacity
/// is reserved in bounded steps through [`List::reserve_exact`].
pub trait List: Serial {
    fn len(&self) -> usize;

    fn get(&self, index: usize) -> Option<&dyn Serial>;

    fn capacity(&self) -> usize;

    fn reserve_exact(&mut self, additional: usize);

    fn clear(&mut self);

    /// Appends a default element and returns it for decoding in place.
    fn push_default(&mut self) -> &mut dyn Serial;

    /// Visits the elements in order.
    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Serial> + '_> {
        Box::new((0..self.len()).filter_map(|index| self.get(index)))
    }
}
