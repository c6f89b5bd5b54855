//! Per-slot state of the open-addressing array.

/// One slot of a table.
///
/// `Tombstone` marks a slot whose key was removed. It holds no memory and is
/// never turned back into `Empty`, so probe chains running through it stay
/// intact for keys placed further along.
#[derive(Debug)]
pub(crate) enum Slot<P> {
    Empty,
    Occupied { key: Box<str>, payload: P },
    Tombstone,
}

impl<P> Slot<P> {
    /// True for slots that can receive a new key.
    #[inline]
    pub(crate) fn is_vacant(&self) -> bool {
        matches!(self, Slot::Empty | Slot::Tombstone)
    }

    #[inline]
    pub(crate) fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied { .. })
    }

    #[inline]
    pub(crate) fn entry(&self) -> Option<(&str, &P)> {
        match self {
            Slot::Occupied { key, payload } => Some((&**key, payload)),
            _ => None,
        }
    }

    /// Replaces an occupied slot with a tombstone and returns what it held.
    /// Empty and tombstone slots are left untouched.
    pub(crate) fn bury(&mut self) -> Option<(Box<str>, P)> {
        if !self.is_occupied() {
            return None;
        }
        match core::mem::replace(self, Slot::Tombstone) {
            Slot::Occupied { key, payload } => Some((key, payload)),
            _ => unreachable!("checked occupied above"),
        }
    }
}
