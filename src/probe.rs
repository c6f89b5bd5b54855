//! Linear probing over a fixed slot array.

/// Walks `home, home + 1, ...` modulo `capacity`, visiting every slot exactly
/// once. The step counter is a `usize`, so a full cycle completes for any
/// capacity the slot array can hold.
#[derive(Clone, Debug)]
pub struct ProbeSeq {
    pos: usize,
    capacity: usize,
    remaining: usize,
}

impl ProbeSeq {
    /// Starts a full probe cycle at `home`.
    #[inline]
    pub fn new(home: usize, capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        debug_assert!(home < capacity);
        Self {
            pos: home,
            capacity,
            remaining: capacity,
        }
    }
}

impl Iterator for ProbeSeq {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let pos = self.pos;
        // Not `% capacity`: pos < capacity so one compare is enough.
        self.pos = if pos + 1 == self.capacity { 0 } else { pos + 1 };
        Some(pos)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ProbeSeq {}
impl core::iter::FusedIterator for ProbeSeq {}
