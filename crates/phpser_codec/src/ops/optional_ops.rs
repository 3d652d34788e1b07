use crate::Serial;

/// A slot that may hold nothing, written as `N;` when empty.
pub trait Optional: Serial {
    fn get(&self) -> Option<&dyn Serial>;

    fn set_none(&mut self);

    /// Returns the held value, creating a default one first if empty.
    fn get_or_insert_default(&mut self) -> &mut dyn Serial;
}

/// An owning pointer that is transparent on the wire.
pub trait Pointer: Serial {
    fn pointee(&self) -> &dyn Serial;

    fn pointee_mut(&mut self) -> &mut dyn Serial;
}
