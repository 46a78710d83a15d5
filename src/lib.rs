//! A fixed-capacity last-in-first-out buffer that rolls over its oldest item instead of growing.
//!
//! [`RollingBuffer`] allocates its storage once, at construction. Pushing into a full buffer
//! overwrites (and drops) the oldest surviving item, so the buffer always holds the most recent
//! `capacity` pushes. Items are read newest-first: index `0` is the last item pushed.
//!
//! The buffer does no internal synchronization. Sharing it between threads for mutation requires
//! an external lock such as [`std::sync::Mutex`].
//!
//! ```
//! # use rolling_buffer::RollingBuffer;
//! let mut buf = RollingBuffer::new(3)?;
//! buf.extend([1, 2, 3, 4]);
//! assert_eq!(buf, [4, 3, 2]);
//! assert_eq!(buf.pop()?, 4);
//! assert_eq!(buf.peek()?, &3);
//! # Ok::<(), rolling_buffer::RollingBufferError>(())
//! ```

pub mod error;
pub mod iter;
mod pos;

use std::{
    fmt::{Debug, Formatter},
    mem::{self, MaybeUninit},
    num::NonZeroUsize,
    ops::Index,
};

use tracing::{debug, trace};

pub use self::{
    error::RollingBufferError,
    iter::{IntoIter, Iter},
};

use self::pos::Pos;

/// Last-in-first-out buffer holding up to a fixed number of items of type `T`.
pub struct RollingBuffer<T> {
    // Invariant: `buf.len() == pos.cap()`, and the `pos.len()` slots walking backwards
    // (circularly) from `pos.newest()` are initialized
    buf: Box<[MaybeUninit<T>]>,
    pos: Pos,
}

impl<T> RollingBuffer<T> {
    /// Creates a new empty buffer that holds up to `capacity` items.
    ///
    /// Returns [`RollingBufferError::InvalidConfiguration`] if `capacity` is 0.
    ///
    /// # Examples
    /// ```
    /// # use rolling_buffer::{RollingBuffer, RollingBufferError};
    /// let buf = RollingBuffer::<u8>::new(4).unwrap();
    /// assert_eq!(buf.capacity(), 4);
    /// assert!(buf.is_empty());
    /// assert_eq!(
    ///     RollingBuffer::<u8>::new(0).unwrap_err(),
    ///     RollingBufferError::InvalidConfiguration
    /// );
    /// ```
    pub fn new(capacity: usize) -> Result<Self, RollingBufferError> {
        match NonZeroUsize::new(capacity) {
            Some(capacity) => Ok(Self::with_capacity(capacity)),
            None => {
                debug!("rejecting rolling buffer with zero capacity");
                Err(RollingBufferError::InvalidConfiguration)
            }
        }
    }

    /// Creates a new empty buffer that holds up to `capacity` items.
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        debug!(capacity = capacity.get(), "allocating rolling buffer");
        let buf = std::iter::repeat_with(MaybeUninit::uninit)
            .take(capacity.get())
            .collect();
        Self {
            buf,
            pos: Pos::zero(capacity),
        }
    }

    /// Returns the number of items in the buffer.
    pub const fn len(&self) -> usize {
        self.pos.len()
    }

    /// Returns the maximum number of items the buffer holds before rolling over.
    pub const fn capacity(&self) -> usize {
        self.pos.cap().get()
    }

    /// Returns `true` if the buffer is empty.
    pub const fn is_empty(&self) -> bool {
        self.pos.is_empty()
    }

    /// Returns `true` if the buffer is full, i.e. the next push will drop the oldest item.
    pub const fn is_full(&self) -> bool {
        self.pos.is_full()
    }

    /// Adds an item on top of the buffer. If the buffer [is full](Self::is_full), the oldest item
    /// is dropped to make room.
    ///
    /// # Examples
    /// ```
    /// # use rolling_buffer::RollingBuffer;
    /// let mut buf = RollingBuffer::new(2).unwrap();
    /// buf.push('a');
    /// buf.push('b');
    /// assert_eq!(buf, ['b', 'a']);
    /// buf.push('c');
    /// assert_eq!(buf, ['c', 'b']);
    /// assert_eq!(buf.len(), 2);
    /// ```
    #[inline]
    pub fn push(&mut self, item: T) {
        let rollover = self.is_full();
        let slot = self.pos.next();
        let old = mem::replace(&mut self.buf[slot], MaybeUninit::new(item));
        self.pos.advance();

        if rollover {
            trace!(capacity = self.capacity(), "rolling over oldest item");
            // SAFETY: the buffer was full, so every slot (including the write slot, which held
            // the oldest item) was initialized; `pos` no longer counts the old value as live
            drop(unsafe { old.assume_init() });
        }
    }

    /// Removes the newest item from the buffer and returns it.
    ///
    /// Returns [`RollingBufferError::EmptyContainer`] if the buffer is empty.
    /// See also [`try_pop`](Self::try_pop).
    ///
    /// # Examples
    /// ```
    /// # use rolling_buffer::{RollingBuffer, RollingBufferError};
    /// let mut buf = RollingBuffer::new(3).unwrap();
    /// buf.extend([0, 1]);
    /// assert_eq!(buf.pop(), Ok(1));
    /// assert_eq!(buf.pop(), Ok(0));
    /// assert_eq!(buf.pop(), Err(RollingBufferError::EmptyContainer));
    /// ```
    #[inline]
    pub fn pop(&mut self) -> Result<T, RollingBufferError> {
        self.try_pop().ok_or(RollingBufferError::EmptyContainer)
    }

    /// Removes the newest item from the buffer and returns it, or `None` if the buffer
    /// [is empty](Self::is_empty).
    ///
    /// The freed slot is the one the next push writes to, so popping never loses capacity.
    ///
    /// # Examples
    /// ```
    /// # use rolling_buffer::RollingBuffer;
    /// let mut buf = RollingBuffer::<Option<u8>>::new(2).unwrap();
    /// assert_eq!(buf.try_pop(), None);
    /// buf.push(None);
    /// assert_eq!(buf.try_pop(), Some(None));
    /// assert_eq!(buf.try_pop(), None);
    /// ```
    #[inline]
    pub fn try_pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let slot = self.pos.newest();
        self.pos.retreat();
        // SAFETY: the buffer was non-empty, so the newest slot is initialized, and `retreat`
        // already stopped counting it as live, so the value is moved out exactly once
        Some(unsafe { self.buf[slot].assume_init_read() })
    }

    /// Returns a reference to the newest item without removing it.
    ///
    /// Returns [`RollingBufferError::EmptyContainer`] if the buffer is empty.
    /// See also [`try_peek`](Self::try_peek).
    pub fn peek(&self) -> Result<&T, RollingBufferError> {
        self.try_peek().ok_or(RollingBufferError::EmptyContainer)
    }

    /// Returns a reference to the newest item, or `None` if the buffer [is empty](Self::is_empty).
    ///
    /// # Examples
    /// ```
    /// # use rolling_buffer::RollingBuffer;
    /// let mut buf = RollingBuffer::<i32>::new(2).unwrap();
    /// assert_eq!(buf.try_peek(), None);
    /// buf.push(7);
    /// assert_eq!(buf.try_peek(), Some(&7));
    /// assert_eq!(buf.len(), 1);
    /// ```
    pub fn try_peek(&self) -> Option<&T> {
        self.get(0).ok()
    }

    /// Returns a reference to the item at the given index without doing bounds checks.
    /// Index `0` is the newest item.
    ///
    /// # Safety
    /// The given index must be less than `self.len()`.
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len());
        let slot = self.pos.physical(index);
        self.buf.get_unchecked(slot).assume_init_ref()
    }

    /// Returns a reference to the item at the given index, counting from the newest item.
    ///
    /// Returns [`RollingBufferError::IndexOutOfRange`] if `index >= self.len()`, even when the
    /// buffer has unused capacity at that position.
    ///
    /// # Examples
    /// ```
    /// # use rolling_buffer::{RollingBuffer, RollingBufferError};
    /// let mut buf = RollingBuffer::new(4).unwrap();
    /// buf.extend([0, 1]);
    /// assert_eq!(buf.get(0), Ok(&1));
    /// assert_eq!(buf.get(1), Ok(&0));
    /// assert_eq!(
    ///     buf.get(2),
    ///     Err(RollingBufferError::IndexOutOfRange { index: 2, len: 2 })
    /// );
    /// ```
    pub fn get(&self, index: usize) -> Result<&T, RollingBufferError> {
        if index >= self.len() {
            Err(RollingBufferError::IndexOutOfRange {
                index,
                len: self.len(),
            })
        } else {
            // SAFETY: `index < self.len()` was checked above
            Ok(unsafe { self.get_unchecked(index) })
        }
    }

    /// Returns an iterator over the items in the buffer, from the newest to the oldest.
    ///
    /// Every call starts a fresh traversal of the current contents; use
    /// [`rev`](Iterator::rev) to walk from the oldest item instead.
    ///
    /// # Examples
    /// ```
    /// # use rolling_buffer::RollingBuffer;
    /// let mut buf = RollingBuffer::new(3).unwrap();
    /// buf.extend([0, 1, 2, 3]);
    /// assert!(buf.iter().eq(&[3, 2, 1]));
    /// assert!(buf.iter().rev().eq(&[1, 2, 3]));
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.buf, self.pos)
    }

    /// Drops all items in the buffer, keeping its storage.
    pub fn clear(&mut self) {
        trace!(len = self.len(), "clearing rolling buffer");
        while self.try_pop().is_some() {}
        self.pos.reset();
    }
}

impl<T: Clone> RollingBuffer<T> {
    /// Copies the contents of the buffer into a `Vec`, newest item first.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T> Drop for RollingBuffer<T> {
    fn drop(&mut self) {
        while self.try_pop().is_some() {}
    }
}

impl<T: Clone> Clone for RollingBuffer<T> {
    fn clone(&self) -> Self {
        let mut buf = Self::with_capacity(self.pos.cap());
        buf.extend(self.iter().rev().cloned());
        buf
    }
}

/// Pushes every item of the iterator in order, rolling over the oldest items if necessary.
///
/// # Examples
/// ```
/// # use rolling_buffer::RollingBuffer;
/// let mut buf = RollingBuffer::new(3).unwrap();
/// buf.extend([0, 1]);
/// assert_eq!(buf, [1, 0]);
/// buf.extend([2, 3]);
/// assert_eq!(buf, [3, 2, 1]);
/// ```
impl<T> Extend<T> for RollingBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

/// # Panics
/// Panics if `index >= self.len()`.
impl<T> Index<usize> for RollingBuffer<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(item) => item,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T: PartialEq> PartialEq for RollingBuffer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for RollingBuffer<T> {}

/// Compares the items newest-first against the given slice.
impl<T: PartialEq, B: AsRef<[T]> + ?Sized> PartialEq<B> for RollingBuffer<T> {
    fn eq(&self, other: &B) -> bool {
        self.iter().eq(other.as_ref())
    }
}

impl<T: Debug> Debug for RollingBuffer<T> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'buf, T> IntoIterator for &'buf RollingBuffer<T> {
    type Item = &'buf T;
    type IntoIter = Iter<'buf, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for RollingBuffer<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}
