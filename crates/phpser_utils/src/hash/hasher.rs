//! `FixedHasher` and `NoOpHasher`.
//!
//! `FixedHasher` is `foldhash` with a compile-time seed, so two processes
//! hash the same key to the same value.
//!
//! `NoOpHasher` uses a `u64` key as its own hash. It suits keys that are
//! already well distributed, such as [`TypeId`](core::any::TypeId).

use core::hash::{BuildHasher, Hasher};

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHasher

const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x5048_5053_4552_2d31);

/// A hasher whose output depends only on its input.
///
/// Alias of [`foldhash::fast::FoldHasher`], built by [`FixedHashState`].
pub type FixedHasher = FoldHasher<'static>;

/// [`BuildHasher`] for [`FixedHasher`].
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use phpser_utils::hash::FixedHashState;
///
/// let a = FixedHashState.hash_one("field");
/// let b = FixedHashState.hash_one("field");
/// assert_eq!(a, b);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// NoOpHasher

/// A hasher that passes a written `u64` through unchanged.
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHasher {
    hash: u64,
}

impl Hasher for NoOpHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        // Reverse order keeps `write_u32(n)` and `write_u64(n)` equal.
        for byte in bytes.iter().rev() {
            self.hash = self.hash.rotate_left(8).wrapping_add(*byte as u64);
        }
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }
}

/// [`BuildHasher`] for [`NoOpHasher`].
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use phpser_utils::hash::NoOpHashState;
///
/// assert_eq!(NoOpHashState.hash_one(7_u64), 7);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHashState;

impl BuildHasher for NoOpHashState {
    type Hasher = NoOpHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        NoOpHasher { hash: 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_widths_agree() {
        let mut a = NoOpHashState.build_hasher();
        a.write_u32(1234);
        let mut b = NoOpHashState.build_hasher();
        b.write_u64(1234);
        assert_eq!(a.finish(), b.finish());
    }

    #[test]
    fn fixed_state_is_stable() {
        assert_eq!(
            FixedHashState.hash_one(("a", 1_u8)),
            FixedHashState.hash_one(("a", 1_u8)),
        );
    }
}
