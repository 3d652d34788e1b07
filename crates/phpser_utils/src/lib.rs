//! Small containers shared by the `phpser` crates.
//!
//! - [`hash`]: `hashbrown` maps with fixed-seed and pass-through hashers.
//! - [`TypeIdMap`]: a map keyed by [`TypeId`](core::any::TypeId).
//! - [`AllocLimit`]: a ceiling for allocations whose size comes from untrusted input.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// No STD Support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod alloc_limit;
mod typeid_map;

pub mod hash;

// -----------------------------------------------------------------------------
// Top-level exports

pub use alloc_limit::AllocLimit;
pub use typeid_map::TypeIdMap;
