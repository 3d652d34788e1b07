/// A ceiling for allocations sized by a length read from untrusted input.
///
/// A stream may declare `a:4000000000:{` and then end. Reserving the
/// declared length up front would let a few bytes of input claim gigabytes,
/// so callers reserve at most [`AllocLimit::ceiling`] elements at a time and
/// grow as elements actually arrive.
///
/// # Examples
///
/// ```
/// use phpser_utils::AllocLimit;
///
/// const LIMIT: AllocLimit = AllocLimit::new(10_000);
///
/// assert_eq!(LIMIT.initial(3), 3);
/// assert_eq!(LIMIT.initial(1 << 40), 10_000);
/// assert!(LIMIT.exceeded_by(10_001));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocLimit {
    ceiling: usize,
}

impl AllocLimit {
    /// Creates a limit of `ceiling` elements per reservation.
    #[inline]
    pub const fn new(ceiling: usize) -> Self {
        Self { ceiling }
    }

    #[inline]
    pub const fn ceiling(self) -> usize {
        self.ceiling
    }

    /// Capacity to reserve before reading the first of `declared` elements.
    #[inline]
    pub const fn initial(self, declared: usize) -> usize {
        if declared < self.ceiling {
            declared
        } else {
            self.ceiling
        }
    }

    /// Additional capacity to reserve once `filled` of `declared` elements
    /// have arrived and the buffer is full.
    #[inline]
    pub const fn next_step(self, declared: usize, filled: usize) -> usize {
        self.initial(declared.saturating_sub(filled))
    }

    /// Returns `true` if `declared` cannot be reserved in one step.
    #[inline]
    pub const fn exceeded_by(self, declared: usize) -> bool {
        declared > self.ceiling
    }
}

#[cfg(test)]
mod tests {
    use super::AllocLimit;

    #[test]
    fn steps_never_pass_the_ceiling() {
        let limit = AllocLimit::new(4);
        assert_eq!(limit.initial(10), 4);
        assert_eq!(limit.next_step(10, 4), 4);
        assert_eq!(limit.next_step(10, 8), 2);
        assert_eq!(limit.next_step(10, 10), 0);
        assert!(!limit.exceeded_by(4));
    }
}
