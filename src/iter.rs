use std::{
    fmt::{self, Debug, Formatter},
    iter::FusedIterator,
    mem::MaybeUninit,
};

use crate::{pos::Pos, RollingBuffer};

/// Borrowing iterator over a [`RollingBuffer`], from the newest item to the oldest.
///
/// Created by [`RollingBuffer::iter`]. Use [`rev`](Iterator::rev) for oldest-to-newest order.
pub struct Iter<'buf, T> {
    buf: &'buf [MaybeUninit<T>],
    pos: Pos,
    // Invariant: `front` <= `back` <= `pos.len()`; logical indices in `front..back` are left to yield
    front: usize,
    back: usize,
}

impl<'buf, T> Iter<'buf, T> {
    pub(crate) fn new(buf: &'buf [MaybeUninit<T>], pos: Pos) -> Self {
        Self {
            buf,
            pos,
            front: 0,
            back: pos.len(),
        }
    }

    /// Returns the item at the given logical index without doing bounds checks.
    ///
    /// # Safety
    /// `index` must be less than `self.pos.len()`.
    #[inline(always)]
    unsafe fn get_unchecked(&self, index: usize) -> &'buf T {
        debug_assert!(index < self.pos.len());
        let buf = self.buf;
        buf.get_unchecked(self.pos.physical(index)).assume_init_ref()
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            buf: self.buf,
            pos: self.pos,
            front: self.front,
            back: self.back,
        }
    }
}

impl<'buf, T> Iterator for Iter<'buf, T> {
    type Item = &'buf T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        // SAFETY: `front < back <= pos.len()`
        let item = unsafe { self.get_unchecked(self.front) };
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }

    fn count(self) -> usize {
        self.len()
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        if n >= self.len() {
            self.front = self.back;
            return None;
        }
        self.front += n;
        self.next()
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        // SAFETY: `front <= back < pos.len()`
        Some(unsafe { self.get_unchecked(self.back) })
    }

    fn nth_back(&mut self, n: usize) -> Option<Self::Item> {
        if n >= self.len() {
            self.back = self.front;
            return None;
        }
        self.back -= n;
        self.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.back - self.front
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T: Debug> Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_tuple("Iter")
            .field(&self.clone().collect::<Vec<_>>())
            .finish()
    }
}

/// Owning iterator over a [`RollingBuffer`], popping items from the newest to the oldest.
///
/// Created by the [`IntoIterator`] implementation of [`RollingBuffer`].
pub struct IntoIter<T> {
    buf: RollingBuffer<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(buf: RollingBuffer<T>) -> Self {
        Self { buf }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.buf.try_pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.buf.len(), Some(self.buf.len()))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: Debug> Debug for IntoIter<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.buf).finish()
    }
}
