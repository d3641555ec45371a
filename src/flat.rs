//! One-dimensional arrays over contiguous memory.
//!
//! [`FlatArray`] owns its elements. [`FlatView`] and [`FlatViewMut`] are weak:
//! they refer to elements owned by something else and never allocate or free.
//! All three implement [`Flat`], so code that only reads elements can accept
//! any of them.

use std::ops::{Index, IndexMut};

use log::{trace};

use super::{Cursor, CursorMut};

/// Implemented by types that expose a contiguous run of `Self::T`s.
pub trait Flat {
    /// The element type.
    type T;

    /// All the elements, in order.
    fn as_slice(&self) -> &[Self::T];

    /// The number of elements.
    #[inline(always)]
    fn len(&self) -> usize { self.as_slice().len() }

    #[inline(always)]
    fn is_empty(&self) -> bool { self.as_slice().is_empty() }

    /// The index of the last element.
    ///
    /// Panics if `self` is empty.
    fn max_index(&self) -> usize {
        assert!(!self.is_empty(), "max_index() of an empty array");
        self.len() - 1
    }

    /// Returns element `index`, or `None` if it is out of bounds.
    #[inline(always)]
    fn get(&self, index: usize) -> Option<&Self::T> { self.as_slice().get(index) }

    /// The first element.
    ///
    /// Panics if `self` is empty.
    fn front(&self) -> &Self::T { &self.as_slice()[0] }

    /// The last element.
    ///
    /// Panics if `self` is empty.
    fn back(&self) -> &Self::T { &self.as_slice()[self.max_index()] }

    fn iter(&self) -> std::slice::Iter<'_, Self::T> { self.as_slice().iter() }

    /// A [`Cursor`] at the first element.
    fn begin(&self) -> Cursor<'_, Self::T> { Cursor::new(self.as_slice(), 0) }

    /// A [`Cursor`] one past the last element.
    fn end(&self) -> Cursor<'_, Self::T> { Cursor::new(self.as_slice(), self.len()) }
}

/// Implemented by [`Flat`] types whose elements can be modified.
pub trait FlatMut: Flat {
    fn as_mut_slice(&mut self) -> &mut [Self::T];

    /// Panics if `self` is empty.
    fn front_mut(&mut self) -> &mut Self::T { &mut self.as_mut_slice()[0] }

    /// Panics if `self` is empty.
    fn back_mut(&mut self) -> &mut Self::T {
        let last = self.max_index();
        &mut self.as_mut_slice()[last]
    }

    fn iter_mut(&mut self) -> std::slice::IterMut<'_, Self::T> { self.as_mut_slice().iter_mut() }

    /// A [`CursorMut`] at the first element.
    fn begin_mut(&mut self) -> CursorMut<'_, Self::T> { CursorMut::new(self.as_mut_slice(), 0) }

    /// A [`CursorMut`] one past the last element.
    fn end_mut(&mut self) -> CursorMut<'_, Self::T> {
        let len = self.len();
        CursorMut::new(self.as_mut_slice(), len)
    }
}

/// Implements `Index<usize>`, and optionally `IndexMut<usize>`, in terms of
/// [`Flat`] and [`FlatMut`].
macro_rules! impl_index_for_flat {
    ($v:ident<$($a:lifetime,)? T>) => {
        impl<$($a,)? T> Index<usize> for $v<$($a,)? T> {
            type Output = T;
            #[inline(always)]
            fn index(&self, index: usize) -> &T { &self.as_slice()[index] }
        }
    };
    ($v:ident<$($a:lifetime,)? T>, mut) => {
        impl_index_for_flat!($v<$($a,)? T>);

        impl<$($a,)? T> IndexMut<usize> for $v<$($a,)? T> {
            #[inline(always)]
            fn index_mut(&mut self, index: usize) -> &mut T { &mut self.as_mut_slice()[index] }
        }
    };
}

// ----------------------------------------------------------------------------

/// An owning array of `T`s.
///
/// ```
/// use marray::{Flat, FlatArray};
/// let mut a: FlatArray<f64> = FlatArray::new(3);
/// a[1] = 1.5;
/// assert_eq!(a.as_slice(), [0.0, 1.5, 0.0]);
/// let w = a.weak();
/// assert_eq!(w[1], 1.5);
/// ```
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct FlatArray<T> {
    items: Box<[T]>,
}

impl<T> FlatArray<T> {
    /// Allocates `len` default elements.
    pub fn new(len: usize) -> Self where T: Default {
        Self::from_fn(len, |_| T::default())
    }

    /// Allocates `len` copies of `t`.
    pub fn from_elem(len: usize, t: T) -> Self where T: Clone {
        Self::from(vec![t; len])
    }

    /// Allocates `len` elements computed by `f`.
    pub fn from_fn(len: usize, f: impl FnMut(usize) -> T) -> Self {
        Self::from((0..len).map(f).collect::<Vec<_>>())
    }

    /// A weak view of all the elements.
    pub fn weak(&self) -> FlatView<'_, T> { FlatView::new(&self.items) }

    /// A weak read/write view of all the elements.
    pub fn weak_mut(&mut self) -> FlatViewMut<'_, T> { FlatViewMut::new(&mut self.items) }

    /// Returns the raw array elements.
    pub fn into_raw(self) -> Box<[T]> { self.items }
}

impl<T> From<Box<[T]>> for FlatArray<T> {
    fn from(items: Box<[T]>) -> Self {
        trace!("flat array owns {} items", items.len());
        Self {items}
    }
}

impl<T> From<Vec<T>> for FlatArray<T> {
    fn from(items: Vec<T>) -> Self { Self::from(items.into_boxed_slice()) }
}

impl<T> Flat for FlatArray<T> {
    type T = T;
    #[inline(always)]
    fn as_slice(&self) -> &[T] { &self.items }
}

impl<T> FlatMut for FlatArray<T> {
    #[inline(always)]
    fn as_mut_slice(&mut self) -> &mut [T] { &mut self.items }
}

impl_index_for_flat!(FlatArray<T>, mut);

impl<'a, T> IntoIterator for &'a FlatArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter { self.items.iter() }
}

// ----------------------------------------------------------------------------

/// A weak, read-only array of `T`s.
#[derive(Debug, Hash, PartialEq, Eq)]
pub struct FlatView<'a, T> {
    items: &'a [T],
}

impl<'a, T> FlatView<'a, T> {
    pub fn new(items: &'a [T]) -> Self { Self {items} }

    /// Points `self` at different elements.
    pub fn reset(&mut self, items: &'a [T]) { self.items = items; }

    /// Like [`Flat::as_slice()`], but not tied to the lifetime of `self`.
    pub fn items(&self) -> &'a [T] { self.items }
}

impl<'a, T> Clone for FlatView<'a, T> {
    fn clone(&self) -> Self { *self }
}

impl<'a, T> Copy for FlatView<'a, T> {}

impl<'a, T> From<&'a FlatArray<T>> for FlatView<'a, T> {
    fn from(array: &'a FlatArray<T>) -> Self { array.weak() }
}

impl<'a, T> From<&'a [T]> for FlatView<'a, T> {
    fn from(items: &'a [T]) -> Self { Self::new(items) }
}

impl<'a, T> Flat for FlatView<'a, T> {
    type T = T;
    #[inline(always)]
    fn as_slice(&self) -> &[T] { self.items }
}

impl_index_for_flat!(FlatView<'a, T>);

impl<'a, T> IntoIterator for FlatView<'a, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter { self.items.iter() }
}

// ----------------------------------------------------------------------------

/// A weak, read/write array of `T`s.
#[derive(Debug, Hash, PartialEq, Eq)]
pub struct FlatViewMut<'a, T> {
    items: &'a mut [T],
}

impl<'a, T> FlatViewMut<'a, T> {
    pub fn new(items: &'a mut [T]) -> Self { Self {items} }

    /// Points `self` at different elements.
    pub fn reset(&mut self, items: &'a mut [T]) { self.items = items; }

    /// A read-only view of the same elements.
    pub fn view(&self) -> FlatView<'_, T> { FlatView::new(&*self.items) }
}

impl<'a, T> From<&'a mut FlatArray<T>> for FlatViewMut<'a, T> {
    fn from(array: &'a mut FlatArray<T>) -> Self { array.weak_mut() }
}

impl<'a, T> From<&'a mut [T]> for FlatViewMut<'a, T> {
    fn from(items: &'a mut [T]) -> Self { Self::new(items) }
}

impl<'a, T> From<FlatViewMut<'a, T>> for FlatView<'a, T> {
    fn from(v: FlatViewMut<'a, T>) -> Self { FlatView::new(v.items) }
}

impl<'a, T> Flat for FlatViewMut<'a, T> {
    type T = T;
    #[inline(always)]
    fn as_slice(&self) -> &[T] { &*self.items }
}

impl<'a, T> FlatMut for FlatViewMut<'a, T> {
    #[inline(always)]
    fn as_mut_slice(&mut self) -> &mut [T] { &mut *self.items }
}

impl_index_for_flat!(FlatViewMut<'a, T>, mut);

// ----------------------------------------------------------------------------
