//! Weak multi-dimensional arrays.
//!
//! A [`MultiView`] or [`MultiViewMut`] pairs a borrowed buffer with a
//! [`RectLayoutRef`]. It never allocates or frees elements. Views are what you
//! get when you take a [`row()`] or [`select()`] of a [`MultiArray`], and
//! they can be sliced again, down to rank 0.
//!
//! [`row()`]: MultiView::row()
//! [`select()`]: MultiView::select()

use log::{debug};

use super::{Cursor, FlatView, Layout, LayoutError, MultiArray, RectLayoutRef};

/// Implements `Index<[usize; N]>`, `Index<&[usize]>` and `Index<usize>` (for
/// rank-1 arrays only) in terms of an `at()` method, and the `IndexMut`
/// counterparts in terms of `at_mut()`.
macro_rules! impl_index_for_multi {
    ($v:ident<$($a:lifetime,)? T>) => {
        impl<$($a,)? T, const N: usize> std::ops::Index<[usize; N]> for $v<$($a,)? T> {
            type Output = T;
            #[inline(always)]
            fn index(&self, index: [usize; N]) -> &T { self.at(&index) }
        }

        impl<$($a,)? 'i, T> std::ops::Index<&'i [usize]> for $v<$($a,)? T> {
            type Output = T;
            #[inline(always)]
            fn index(&self, index: &'i [usize]) -> &T { self.at(index) }
        }

        impl<$($a,)? T> std::ops::Index<usize> for $v<$($a,)? T> {
            type Output = T;
            fn index(&self, index: usize) -> &T {
                assert_eq!(self.rank(), 1, "Only rank-1 arrays can be indexed by a usize");
                self.at(&[index])
            }
        }
    };
    ($v:ident<$($a:lifetime,)? T>, mut) => {
        impl_index_for_multi!($v<$($a,)? T>);

        impl<$($a,)? T, const N: usize> std::ops::IndexMut<[usize; N]> for $v<$($a,)? T> {
            #[inline(always)]
            fn index_mut(&mut self, index: [usize; N]) -> &mut T { self.at_mut(&index) }
        }

        impl<$($a,)? 'i, T> std::ops::IndexMut<&'i [usize]> for $v<$($a,)? T> {
            #[inline(always)]
            fn index_mut(&mut self, index: &'i [usize]) -> &mut T { self.at_mut(index) }
        }

        impl<$($a,)? T> std::ops::IndexMut<usize> for $v<$($a,)? T> {
            fn index_mut(&mut self, index: usize) -> &mut T {
                assert_eq!(self.rank(), 1, "Only rank-1 arrays can be indexed by a usize");
                self.at_mut(&[index])
            }
        }
    };
}

pub(crate) use impl_index_for_multi;

/// Returns the first flat position and the layout of the sub-array of
/// `layout` at position `i` along `axis`.
fn sub_array<'a>(layout: &RectLayoutRef<'a>, axis: usize, i: usize) -> (usize, RectLayoutRef<'a>) {
    let rank = layout.rank();
    assert!(axis < rank, "{}", LayoutError::AxisOutOfRange {axis, rank});
    let dim = layout.dim(axis);
    assert!(i < dim, "{}", LayoutError::OutOfBounds {axis, index: i, dim});
    (i * layout.stride(axis), layout.slice(axis))
}

/// Checks that `len` items are enough for `layout`, and returns how many of
/// them it uses.
fn check_span(layout: &RectLayoutRef<'_>, len: usize) -> Result<usize, LayoutError> {
    let span = layout.span();
    if len < span { return Err(LayoutError::BufferTooShort {span, got: len}); }
    Ok(span)
}

// ----------------------------------------------------------------------------

/// A weak, read-only multi-dimensional array.
///
/// Index with `[i, j, ...]` or a `&[usize]`. Indexing with a bare `usize`
/// only works at rank 1 and panics otherwise; use [`MultiView::row()`] to
/// take a slice along axis `0`.
///
/// ```
/// use marray::{MultiView, RectLayout};
/// let items: Vec<usize> = (0..24).collect();
/// let layout = RectLayout::new([2, 3, 4]);
/// let v = MultiView::new(&items, &layout);
/// assert_eq!(v[[1, 0, 1]], 13);
/// assert_eq!(v.row(1).row(0)[1], 13);
/// assert_eq!(v.select(2, 3).shape(), [2, 3]);
/// ```
#[derive(Debug)]
pub struct MultiView<'a, T> {
    items: &'a [T],
    layout: RectLayoutRef<'a>,
}

impl<'a, T> MultiView<'a, T> {
    /// Constructs a view of `items` laid out according to `layout`.
    ///
    /// # Panics
    ///
    /// Panics if `items` is shorter than `layout.span()`.
    pub fn new(items: &'a [T], layout: impl Into<RectLayoutRef<'a>>) -> Self {
        match Self::try_new(items, layout) {
            Ok(v) => v,
            Err(e) => panic!("{}", e),
        }
    }

    /// Checked version of [`MultiView::new()`].
    pub fn try_new(items: &'a [T], layout: impl Into<RectLayoutRef<'a>>) -> Result<Self, LayoutError> {
        let layout = layout.into();
        let span = check_span(&layout, items.len())?;
        Ok(Self {items: &items[..span], layout})
    }

    /// The items `self` can reach, in storage order.
    pub fn items(&self) -> &'a [T] { self.items }

    pub fn layout(&self) -> &RectLayoutRef<'a> { &self.layout }

    #[inline(always)]
    pub fn rank(&self) -> usize { self.layout.rank() }

    #[inline(always)]
    pub fn dim(&self, axis: usize) -> usize { self.layout.dim(axis) }

    pub fn shape(&self) -> Vec<usize> { self.layout.shape() }

    pub fn footprint(&self) -> usize { self.layout.footprint() }

    /// Returns the element at `index`.
    ///
    /// See [`Layout::offset()`] for the preconditions.
    #[inline(always)]
    pub fn at(&self, index: &[usize]) -> &'a T { &self.items[self.layout.offset(index)] }

    /// Checked version of [`MultiView::at()`].
    pub fn get(&self, index: &[usize]) -> Result<&'a T, LayoutError> {
        Ok(&self.items[self.layout.try_offset(index)?])
    }

    /// Returns the sub-array at position `i` along `axis`.
    ///
    /// The result has rank `self.rank() - 1` and shares `self`'s items.
    ///
    /// # Panics
    ///
    /// Panics if `axis` or `i` is out of bounds.
    pub fn select(&self, axis: usize, i: usize) -> MultiView<'a, T> {
        let (start, layout) = sub_array(&self.layout, axis, i);
        let end = start + layout.span();
        MultiView {items: &self.items[start..end], layout}
    }

    /// Returns the sub-array at position `i` along axis `0`.
    pub fn row(&self, i: usize) -> MultiView<'a, T> { self.select(0, i) }

    /// Calls `f` on every element, in row-major order.
    pub fn each(&self, mut f: impl FnMut(&'a T)) {
        let items = self.items;
        self.layout.each(|index| f(&items[self.layout.offset(index)]));
    }

    /// Copies the elements into a new, contiguous [`MultiArray`] of the same
    /// shape.
    pub fn to_array(&self) -> MultiArray<T> where T: Clone {
        let layout = self.layout.to_layout();
        debug!("copying a view of shape {:?} into an owning array", self.layout.shape());
        let mut items = Vec::with_capacity(layout.footprint());
        self.each(|t| items.push(t.clone()));
        MultiArray::from_vec(layout, items)
    }

    /// Returns the elements as a [`FlatView`] if `self` is contiguous.
    pub fn as_flat(&self) -> Option<FlatView<'a, T>> {
        if self.layout.is_contiguous() { Some(FlatView::new(self.items)) } else { None }
    }

    /// A [`Cursor`] at the first element of a rank-1 view.
    ///
    /// The cursor steps by the stride of the only axis, so it also walks
    /// views that are not contiguous, e.g. columns.
    ///
    /// # Panics
    ///
    /// Panics if `self.rank() != 1`.
    pub fn begin(&self) -> Cursor<'a, T> {
        assert_eq!(self.rank(), 1, "Only rank-1 arrays have cursors");
        Cursor::strided(self.items, 0, self.layout.stride(0))
    }

    /// A [`Cursor`] one step past the last element of a rank-1 view.
    pub fn end(&self) -> Cursor<'a, T> { self.begin() + self.dim(0) }

    /// Points `self` at different items and a different layout.
    ///
    /// # Panics
    ///
    /// Panics if `items` is shorter than `layout.span()`.
    pub fn reset(&mut self, items: &'a [T], layout: impl Into<RectLayoutRef<'a>>) {
        *self = Self::new(items, layout);
    }

    /// Points `self` at different items, keeping the layout.
    ///
    /// # Panics
    ///
    /// Panics if `items` is shorter than `self.layout().span()`.
    pub fn reset_items(&mut self, items: &'a [T]) {
        match check_span(&self.layout, items.len()) {
            Ok(span) => { self.items = &items[..span]; },
            Err(e) => panic!("{}", e),
        }
    }
}

impl<'a, T> Clone for MultiView<'a, T> {
    fn clone(&self) -> Self { Self {items: self.items, layout: self.layout.clone()} }
}

impl_index_for_multi!(MultiView<'a, T>);

// ----------------------------------------------------------------------------

/// A weak, read/write multi-dimensional array.
///
/// Indexes like [`MultiView`]: a bare `usize` index panics unless the rank
/// is 1. Use [`MultiViewMut::row_mut()`] for slices along axis `0`.
///
/// ```
/// use marray::{MultiViewMut, RectLayout};
/// let mut items = vec![0; 6];
/// let layout = RectLayout::new([2, 3]);
/// let mut v = MultiViewMut::new(&mut items, &layout);
/// v[[1, 2]] = 5;
/// v.row_mut(0).fill(7);
/// assert_eq!(items, [7, 7, 7, 0, 0, 5]);
/// ```
#[derive(Debug)]
pub struct MultiViewMut<'a, T> {
    items: &'a mut [T],
    layout: RectLayoutRef<'a>,
}

impl<'a, T> MultiViewMut<'a, T> {
    /// Like [`MultiView::new()`].
    pub fn new(items: &'a mut [T], layout: impl Into<RectLayoutRef<'a>>) -> Self {
        match Self::try_new(items, layout) {
            Ok(v) => v,
            Err(e) => panic!("{}", e),
        }
    }

    /// Checked version of [`MultiViewMut::new()`].
    pub fn try_new(items: &'a mut [T], layout: impl Into<RectLayoutRef<'a>>) -> Result<Self, LayoutError> {
        let layout = layout.into();
        let span = check_span(&layout, items.len())?;
        Ok(Self {items: &mut items[..span], layout})
    }

    pub fn layout(&self) -> &RectLayoutRef<'a> { &self.layout }

    #[inline(always)]
    pub fn rank(&self) -> usize { self.layout.rank() }

    #[inline(always)]
    pub fn dim(&self, axis: usize) -> usize { self.layout.dim(axis) }

    pub fn shape(&self) -> Vec<usize> { self.layout.shape() }

    pub fn footprint(&self) -> usize { self.layout.footprint() }

    /// A read-only view of the same elements.
    pub fn view(&self) -> MultiView<'_, T> {
        MultiView {items: &*self.items, layout: self.layout.clone()}
    }

    #[inline(always)]
    pub fn at(&self, index: &[usize]) -> &T { &self.items[self.layout.offset(index)] }

    #[inline(always)]
    pub fn at_mut(&mut self, index: &[usize]) -> &mut T { &mut self.items[self.layout.offset(index)] }

    /// Checked version of [`MultiViewMut::at_mut()`].
    pub fn get_mut(&mut self, index: &[usize]) -> Result<&mut T, LayoutError> {
        Ok(&mut self.items[self.layout.try_offset(index)?])
    }

    pub fn select(&self, axis: usize, i: usize) -> MultiView<'_, T> { self.view().select(axis, i) }

    pub fn row(&self, i: usize) -> MultiView<'_, T> { self.select(0, i) }

    /// Like [`MultiView::select()`], but the result can modify the elements.
    pub fn select_mut(&mut self, axis: usize, i: usize) -> MultiViewMut<'_, T> {
        let (start, layout) = sub_array(&self.layout, axis, i);
        let end = start + layout.span();
        MultiViewMut {items: &mut self.items[start..end], layout}
    }

    pub fn row_mut(&mut self, i: usize) -> MultiViewMut<'_, T> { self.select_mut(0, i) }

    /// Like [`MultiViewMut::select_mut()`], but consumes `self` so that the
    /// result can live as long as the items.
    pub fn into_select(self, axis: usize, i: usize) -> MultiViewMut<'a, T> {
        let (start, layout) = sub_array(&self.layout, axis, i);
        let end = start + layout.span();
        let items = self.items;
        MultiViewMut {items: &mut items[start..end], layout}
    }

    pub fn into_row(self, i: usize) -> MultiViewMut<'a, T> { self.into_select(0, i) }

    /// Calls `f` on every element, in row-major order.
    pub fn each(&self, f: impl FnMut(&T)) { self.view().each(f); }

    /// Calls `f` on every element, in row-major order.
    pub fn each_mut(&mut self, mut f: impl FnMut(&mut T)) {
        let layout = &self.layout;
        let items = &mut *self.items;
        layout.each(|index| f(&mut items[layout.offset(index)]));
    }

    /// Overwrites every element with a clone of `t`.
    pub fn fill(&mut self, t: T) where T: Clone {
        self.each_mut(|x| *x = t.clone());
    }

    /// Like [`MultiView::to_array()`].
    pub fn to_array(&self) -> MultiArray<T> where T: Clone { self.view().to_array() }

    /// Like [`MultiView::reset()`].
    pub fn reset(&mut self, items: &'a mut [T], layout: impl Into<RectLayoutRef<'a>>) {
        *self = Self::new(items, layout);
    }

    /// Like [`MultiView::reset_items()`].
    pub fn reset_items(&mut self, items: &'a mut [T]) {
        match check_span(&self.layout, items.len()) {
            Ok(span) => { self.items = &mut items[..span]; },
            Err(e) => panic!("{}", e),
        }
    }
}

impl<'a, T> From<MultiViewMut<'a, T>> for MultiView<'a, T> {
    fn from(v: MultiViewMut<'a, T>) -> Self { MultiView {items: v.items, layout: v.layout} }
}

impl_index_for_multi!(MultiViewMut<'a, T>, mut);

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RectLayout};

    fn counting(len: usize) -> Vec<usize> { (0..len).collect() }

    #[test]
    fn rows_share_items() {
        let items = counting(24);
        let layout = RectLayout::new([2, 3, 4]);
        let v = MultiView::new(&items, &layout);
        let page = v.row(1);
        assert_eq!(page.shape(), [3, 4]);
        assert_eq!(page.items().as_ptr(), items[12..].as_ptr());
        for j in 0..3 {
            for k in 0..4 {
                assert_eq!(page[[j, k]], v[[1, j, k]]);
            }
        }
        let line = page.row(2);
        assert_eq!(line.as_flat().map(|f| f.items()), Some(&items[20..24]));
        assert_eq!(*line.row(3).at(&[]), 23);
    }

    #[test]
    fn select_inner_axis() {
        let items = counting(24);
        let layout = RectLayout::new([2, 3, 4]);
        let v = MultiView::new(&items, &layout);
        let s = v.select(1, 2);
        assert_eq!(s.shape(), [2, 4]);
        assert!(s.as_flat().is_none());
        for i in 0..2 {
            for k in 0..4 {
                assert_eq!(s[[i, k]], i * 12 + 2 * 4 + k);
            }
        }
        let column = s.select(1, 1);
        assert_eq!(column.shape(), [2]);
        assert_eq!((column[0], column[1]), (9, 21));
    }

    #[test]
    fn strided_cursors() {
        let items = counting(12);
        let layout = RectLayout::new([3, 4]);
        let v = MultiView::new(&items, &layout);
        let column = v.select(1, 2);
        let (begin, end) = (column.begin(), column.end());
        assert_eq!(begin.stride(), 4);
        assert_eq!(end - begin, 3);
        let mut c = begin;
        let mut seen = Vec::new();
        while c != end {
            seen.push(*c);
            c += 1;
        }
        assert_eq!(seen, [2, 6, 10]);
    }

    #[test]
    fn each_visits_logical_order() {
        let items = counting(24);
        let layout = RectLayout::new([2, 3, 4]);
        let v = MultiView::new(&items, &layout);
        let mut seen = Vec::new();
        v.select(2, 0).each(|&x| seen.push(x));
        assert_eq!(seen, [0, 4, 8, 12, 16, 20]);
    }

    #[test]
    fn to_array_is_contiguous() {
        let items = counting(24);
        let layout = RectLayout::new([2, 3, 4]);
        let v = MultiView::new(&items, &layout);
        let a = v.select(1, 1).to_array();
        assert_eq!(a.layout(), &RectLayout::new([2, 4]));
        assert_eq!(a.as_ref(), [4, 5, 6, 7, 16, 17, 18, 19]);
    }

    #[test]
    fn short_buffer() {
        let items = counting(5);
        let layout = RectLayout::new([2, 3]);
        assert_eq!(
            MultiView::try_new(&items, &layout).map(|_| ()),
            Err(LayoutError::BufferTooShort {span: 6, got: 5}),
        );
    }

    #[test]
    fn checked_access() {
        let items = counting(24);
        let layout = RectLayout::new([2, 3, 4]);
        let v = MultiView::new(&items, &layout);
        assert_eq!(v.get(&[1, 0, 1]), Ok(&13));
        assert_eq!(v.row(1).get(&[2, 3]), Ok(&23));
        assert_eq!(v.get(&[1, 0]), Err(LayoutError::RankMismatch {expected: 3, got: 2}));
        assert_eq!(v.get(&[0, 3, 0]), Err(LayoutError::OutOfBounds {axis: 1, index: 3, dim: 3}));
        assert_eq!(
            v.select(1, 0).get(&[0, 4]),
            Err(LayoutError::OutOfBounds {axis: 1, index: 4, dim: 4}),
        );
    }

    #[test]
    fn checked_access_mut() {
        let mut items = vec![0; 6];
        let layout = RectLayout::new([2, 3]);
        let mut v = MultiViewMut::new(&mut items, &layout);
        *v.get_mut(&[1, 1]).unwrap() = 5;
        assert_eq!(v.get_mut(&[2, 0]), Err(LayoutError::OutOfBounds {axis: 0, index: 2, dim: 2}));
        assert_eq!(v.get_mut(&[0, 0, 0]), Err(LayoutError::RankMismatch {expected: 2, got: 3}));
        assert_eq!(items, [0, 0, 0, 0, 5, 0]);
    }

    #[test]
    fn reset() {
        let a = counting(6);
        let b: Vec<usize> = (100..112).collect();
        let small = RectLayout::new([2, 3]);
        let large = RectLayout::new([3, 4]);
        let mut v = MultiView::new(&a, &small);
        v.reset_items(&b);
        assert_eq!(v[[1, 0]], 103);
        v.reset(&b, &large);
        assert_eq!(v[[2, 3]], 111);
    }

    #[test]
    fn mutable_rows() {
        let mut items = vec![0; 24];
        let layout = RectLayout::new([2, 3, 4]);
        let mut v = MultiViewMut::new(&mut items, &layout);
        v.row_mut(1).row_mut(2)[3] = 7;
        v.select_mut(2, 0).fill(1);
        let mut k = 0;
        v.each_mut(|x| { *x += k; k += 1; });
        assert_eq!(v.row(0).row(0)[0], 1);
        assert_eq!(v[[1, 2, 3]], 30);
        let last = v.into_row(1).into_row(2);
        assert_eq!(last[3], 30);
        assert_eq!(items[23], 30);
        assert_eq!(items[20], 21);
    }

    #[test]
    #[should_panic]
    fn row_out_of_bounds() {
        let items = counting(6);
        let layout = RectLayout::new([2, 3]);
        MultiView::new(&items, &layout).row(2);
    }
}
