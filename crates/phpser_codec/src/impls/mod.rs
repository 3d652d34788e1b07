//! [`Typed`](crate::info::Typed) and [`Serial`](crate::Serial) for built-in types.
//!
//! | Rust | Kind |
//! |---|---|
//! | `()` | Nil |
//! | `bool` | Bool |
//! | `i8`..`i64`, `isize`, `u8`..`u64`, `usize` | Int |
//! | `f32`, `f64` | Float |
//! | `String` | String |
//! | `Option<T>` | Optional |
//! | `Box<T>` | Pointer |
//! | `Vec<T>` | List |
//! | `HashMap`, `BTreeMap`, `phpser_utils::hash::HashMap` | Map |
//! | `char`, `i128`, `u128` | Opaque |

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod list;
mod map;
mod opaque;
mod scalar;
mod wrapper;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, NonGenericTypeInfoCell};

// -----------------------------------------------------------------------------
// Internal API

/// Implements the `Any` accessors of [`Serial`](crate::Serial).
macro_rules! serial_any_methods {
    () => {
        #[inline]
        fn as_any(&self) -> &dyn ::core::any::Any {
            self
        }

        #[inline]
        fn as_any_mut(&mut self) -> &mut dyn ::core::any::Any {
            self
        }
    };
}

pub(crate) use serial_any_methods;
