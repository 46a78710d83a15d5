use std::num::NonZeroUsize;

/// Cursor state of a rolling buffer, kept apart from the storage so iterators can carry a copy.
#[derive(Debug, Clone, Copy)]
pub(super) struct Pos {
    cap: NonZeroUsize,
    // Invariant: `len` <= `cap`
    len: usize,
    // Invariant: `next` < `cap`
    next: usize,
}

impl Pos {
    pub const fn zero(cap: NonZeroUsize) -> Self {
        Self { cap, len: 0, next: 0 }
    }

    #[inline(always)]
    pub const fn cap(&self) -> NonZeroUsize {
        self.cap
    }

    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub const fn is_full(&self) -> bool {
        self.len == self.cap.get()
    }

    /// Slot the next push will write to. Once the buffer is full this slot holds the oldest item.
    #[inline(always)]
    pub const fn next(&self) -> usize {
        self.next
    }

    /// Slot holding the newest item. Only meaningful while `len > 0`.
    #[inline(always)]
    pub const fn newest(&self) -> usize {
        if self.next == 0 {
            self.cap.get() - 1
        } else {
            self.next - 1
        }
    }

    /// Returns the slot in the underlying buffer corresponding to the given logical index,
    /// counting backwards from the newest item.
    /// The returned slot is always in bounds (i.e. < `cap`) as long as `index` <= `cap`,
    /// but the item in it is only initialized if `index < len`.
    #[inline(always)]
    pub const fn physical(&self, index: usize) -> usize {
        debug_assert!(index <= self.cap.get());
        let newest = self.newest();
        if index <= newest {
            newest - index
        } else {
            self.cap.get() - (index - newest)
        }
    }

    /// Moves the write cursor forward after a push, growing `len` unless already full.
    #[inline(always)]
    pub fn advance(&mut self) {
        self.next = if self.next + 1 == self.cap.get() {
            0
        } else {
            self.next + 1
        };
        if !self.is_full() {
            self.len += 1;
        }
    }

    /// Moves the write cursor back onto the newest slot after a pop.
    ///
    /// # Panics
    /// Panics in debug builds if `len == 0`.
    #[inline(always)]
    pub fn retreat(&mut self) {
        debug_assert!(!self.is_empty());
        self.next = self.newest();
        self.len -= 1;
    }

    pub fn reset(&mut self) {
        *self = Self::zero(self.cap);
    }
}
