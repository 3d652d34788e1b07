//! Process-wide caches.
//!
//! - [`StrategyTable`]: type → decode/encode strategy.
//! - [`FieldCache`]: (record type, tag namespaces) → wire field list.
//!
//! Both grow on first use of a type and are never evicted. Entries are
//! leaked `&'static` values, so lookups hand out plain references that
//! outlive the lock guard.

// -----------------------------------------------------------------------------
// Modules

mod fields;
mod strategy;
mod tags;

// -----------------------------------------------------------------------------
// Exports

pub use fields::{FieldCache, FieldDescriptor, RecordFields};
pub use strategy::{DecodeFn, EncodeFn, Strategy, StrategyTable, strategy_of};
pub use tags::{FieldFlags, FieldTag, TagConfig};
