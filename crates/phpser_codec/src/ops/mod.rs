//! Object-safe views of composite values.
//!
//! A [`SerialRef`](crate::SerialRef) or [`SerialMut`](crate::SerialMut)
//! hands out one of these traits, and composite strategies drive the value
//! through it without knowing its concrete type.

// -----------------------------------------------------------------------------
// Modules

mod list_ops;
mod map_ops;
mod optional_ops;
mod record_ops;

// -----------------------------------------------------------------------------
// Exports

pub use list_ops::List;
pub use map_ops::{Map, MapEntryFill};
pub use optional_ops::{Optional, Pointer};
pub use record_ops::{Record, field_by_path, field_by_path_mut};
