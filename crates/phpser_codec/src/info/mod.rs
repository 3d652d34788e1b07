//! Static type descriptors.
//!
//! Every type the codec handles implements [`Typed`], which hands out a
//! `&'static` [`TypeInfo`]. The descriptor names the wire shape of the type
//! and, for composites, how to reach the descriptors of its parts.
//!
//! Descriptors are built on first request and never change afterwards.

// -----------------------------------------------------------------------------
// Modules

mod record_info;
mod type_info;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use record_info::{NamedField, RecordInfo};
pub use type_info::{FloatInfo, FloatKind, IntInfo, IntKind};
pub use type_info::{KindError, SerialKind, Type, TypeInfo};
pub use type_info::{ListInfo, MapInfo, OptionalInfo, PointerInfo};
pub use typed::{DynamicTyped, Typed};
