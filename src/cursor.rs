// cursor.rs

/// Selection offset within the current match set.
///
/// Every method takes the match count so the cursor never holds on to a
/// stale length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pointer: usize,
}

impl Cursor {
    pub fn get(&self) -> usize {
        self.pointer
    }

    pub fn reset(&mut self) {
        self.pointer = 0;
    }

    /// Pulls the pointer back inside `0..len` after the set shrank.
    pub fn clamp(&mut self, len: usize) {
        if self.pointer >= len {
            self.pointer = len.saturating_sub(1);
        }
    }

    /// Moves toward older matches, wrapping from the oldest to the newest.
    pub fn cycle_older(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.pointer = (self.pointer + 1) % len;
    }

    /// Moves toward newer matches, wrapping from the newest to the oldest.
    pub fn cycle_newer(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.pointer = (self.pointer + len - 1) % len;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn wraps_both_ways() {
        let mut c = Cursor::default();
        c.cycle_newer(3);
        assert_eq!(c.get(), 2);
        c.cycle_older(3);
        assert_eq!(c.get(), 0);
    }

    #[test]
    fn empty_set_is_a_noop() {
        let mut c = Cursor::default();
        c.cycle_older(0);
        c.cycle_newer(0);
        assert_eq!(c.get(), 0);
    }

    #[test]
    fn clamp_guards_a_shrunken_set() {
        let mut c = Cursor::default();
        c.cycle_older(5);
        c.cycle_older(5);
        c.cycle_older(5);
        c.clamp(2);
        assert_eq!(c.get(), 1);
        c.clamp(0);
        assert_eq!(c.get(), 0);
    }

    proptest! {
        #[test]
        fn older_and_newer_are_inverse(len in 1usize..50, steps in 0usize..100) {
            let mut c = Cursor::default();
            for _ in 0..steps {
                c.cycle_older(len);
            }
            let before = c.get();
            c.cycle_older(len);
            c.cycle_newer(len);
            prop_assert_eq!(c.get(), before);
            c.cycle_newer(len);
            c.cycle_older(len);
            prop_assert_eq!(c.get(), before);
        }

        #[test]
        fn full_cycle_returns_to_start(len in 1usize..50, start in 0usize..50) {
            let mut c = Cursor::default();
            for _ in 0..start % len {
                c.cycle_older(len);
            }
            let before = c.get();
            for _ in 0..len {
                c.cycle_older(len);
            }
            prop_assert_eq!(c.get(), before);
        }
    }
}
