//! Random-access positions in a flat buffer.
//!
//! A cursor is the Rust counterpart of a raw element pointer: it can be moved
//! by any number of steps, compared, subtracted and dereferenced. Each step
//! skips a fixed `stride` of elements, so the same type walks both contiguous
//! buffers (stride 1) and axes of multi-dimensional arrays that are not
//! innermost.

use std::ops::{Add, AddAssign, Deref, DerefMut, Sub, SubAssign};

/// A read-only position in a buffer of `T`s.
///
/// A cursor may point one step past the end of its buffer, but dereferencing
/// it there panics.
///
/// ```
/// use marray::{Flat, FlatArray};
/// let a = FlatArray::from(vec![10, 11, 12]);
/// let mut c = a.begin();
/// assert_eq!(*c, 10);
/// c += 2;
/// assert_eq!(*c, 12);
/// assert_eq!(a.end() - a.begin(), 3);
/// ```
#[derive(Debug)]
pub struct Cursor<'a, T> {
    items: &'a [T],
    position: usize,
    stride: usize,
}

impl<'a, T> Cursor<'a, T> {
    /// Constructs a cursor at `position` in `items` that moves one element
    /// per step.
    pub fn new(items: &'a [T], position: usize) -> Self {
        Self::strided(items, position, 1)
    }

    /// Constructs a cursor at `position` in `items` that moves `stride`
    /// elements per step.
    ///
    /// # Panics
    ///
    /// Panics if `stride` is zero.
    pub fn strided(items: &'a [T], position: usize, stride: usize) -> Self {
        assert!(stride > 0, "Cursor stride must be positive");
        Self {items, position, stride}
    }

    /// The flat position in the buffer.
    pub fn position(&self) -> usize { self.position }

    /// The number of elements skipped per step.
    pub fn stride(&self) -> usize { self.stride }

    /// Returns the element under the cursor, or `None` past the end.
    pub fn get(&self) -> Option<&'a T> { self.items.get(self.position) }

    /// The number of steps from `origin` to `self`.
    ///
    /// # Panics
    ///
    /// Panics if the two cursors have different strides, or if `origin` is
    /// after `self`.
    pub fn steps_from(&self, origin: &Self) -> usize {
        assert_eq!(self.stride, origin.stride, "Cursors walk with different strides");
        assert!(origin.position <= self.position, "Cursor {} precedes origin {}", self.position, origin.position);
        (self.position - origin.position) / self.stride
    }
}

impl<'a, T> Clone for Cursor<'a, T> {
    fn clone(&self) -> Self { *self }
}

impl<'a, T> Copy for Cursor<'a, T> {}

impl<'a, T> PartialEq for Cursor<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.items.as_ptr(), other.items.as_ptr()) && self.position == other.position
    }
}

impl<'a, T> Eq for Cursor<'a, T> {}

impl<'a, T> Deref for Cursor<'a, T> {
    type Target = T;
    fn deref(&self) -> &T { &self.items[self.position] }
}

impl<'a, T> AddAssign<usize> for Cursor<'a, T> {
    fn add_assign(&mut self, n: usize) { self.position += n * self.stride; }
}

impl<'a, T> SubAssign<usize> for Cursor<'a, T> {
    fn sub_assign(&mut self, n: usize) { self.position -= n * self.stride; }
}

impl<'a, T> Add<usize> for Cursor<'a, T> {
    type Output = Self;
    fn add(mut self, n: usize) -> Self { self += n; self }
}

impl<'a, T> Sub<usize> for Cursor<'a, T> {
    type Output = Self;
    fn sub(mut self, n: usize) -> Self { self -= n; self }
}

impl<'a, T> Sub for Cursor<'a, T> {
    type Output = usize;
    fn sub(self, origin: Self) -> usize { self.steps_from(&origin) }
}

// ----------------------------------------------------------------------------

/// A read/write position in a buffer of `T`s.
///
/// Converts into a [`Cursor`] at the same position with `Cursor::from()`.
#[derive(Debug)]
pub struct CursorMut<'a, T> {
    items: &'a mut [T],
    position: usize,
    stride: usize,
}

impl<'a, T> CursorMut<'a, T> {
    /// Constructs a cursor at `position` in `items` that moves one element
    /// per step.
    pub fn new(items: &'a mut [T], position: usize) -> Self {
        Self::strided(items, position, 1)
    }

    /// Like [`Cursor::strided()`].
    pub fn strided(items: &'a mut [T], position: usize, stride: usize) -> Self {
        assert!(stride > 0, "Cursor stride must be positive");
        Self {items, position, stride}
    }

    pub fn position(&self) -> usize { self.position }

    pub fn stride(&self) -> usize { self.stride }

    /// Returns the element under the cursor, or `None` past the end.
    pub fn get_mut(&mut self) -> Option<&mut T> { self.items.get_mut(self.position) }

    /// A read-only cursor at the same position that borrows from `self`.
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor {items: &*self.items, position: self.position, stride: self.stride}
    }

    /// Like [`Cursor::steps_from()`].
    pub fn steps_from(&self, origin: &Self) -> usize {
        self.as_cursor().steps_from(&origin.as_cursor())
    }
}

impl<'a, T> From<CursorMut<'a, T>> for Cursor<'a, T> {
    fn from(c: CursorMut<'a, T>) -> Self {
        Cursor {items: c.items, position: c.position, stride: c.stride}
    }
}

impl<'a, T> Deref for CursorMut<'a, T> {
    type Target = T;
    fn deref(&self) -> &T { &self.items[self.position] }
}

impl<'a, T> DerefMut for CursorMut<'a, T> {
    fn deref_mut(&mut self) -> &mut T { &mut self.items[self.position] }
}

impl<'a, T> AddAssign<usize> for CursorMut<'a, T> {
    fn add_assign(&mut self, n: usize) { self.position += n * self.stride; }
}

impl<'a, T> SubAssign<usize> for CursorMut<'a, T> {
    fn sub_assign(&mut self, n: usize) { self.position -= n * self.stride; }
}

impl<'a, T> Add<usize> for CursorMut<'a, T> {
    type Output = Self;
    fn add(mut self, n: usize) -> Self { self += n; self }
}

impl<'a, T> Sub<usize> for CursorMut<'a, T> {
    type Output = Self;
    fn sub(mut self, n: usize) -> Self { self -= n; self }
}

impl<'a, T> Sub for CursorMut<'a, T> {
    type Output = usize;
    fn sub(self, origin: Self) -> usize { self.steps_from(&origin) }
}

// ----------------------------------------------------------------------------
