use log::{debug, trace};

use super::{Flat, FlatMut, Layout, LayoutError, MultiView, MultiViewMut, RectLayout};
use super::view::{impl_index_for_multi};

/// A dense, owning multi-dimensional array of `T`s in row-major order.
///
/// `Clone` makes a deep copy. Use [`MultiArray::view()`] and friends to
/// share the elements instead.
///
/// Index with `[i, j, ...]` or a `&[usize]`. Indexing with a bare `usize`
/// only works at rank 1 and panics otherwise; use [`MultiArray::row()`] to
/// take a slice along axis `0`.
///
/// With the `serde` feature, deserializing goes through
/// [`MultiArray::try_from_vec()`].
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "parts::MultiArrayParts<T>"))]
pub struct MultiArray<T> {
    layout: RectLayout,
    items: Box<[T]>,
}

impl<T> MultiArray<T> {
    fn new_inner(layout: RectLayout, items: Box<[T]>) -> Self {
        assert_eq!(layout.footprint(), items.len());
        trace!("multi-array {:?} owns {} items", layout.shape(), items.len());
        Self {layout, items}
    }

    /// Allocates an array of default elements.
    ///
    /// ```
    /// use marray::{MultiArray};
    /// let a: MultiArray<f64> = MultiArray::new([2, 3, 4]);
    /// assert_eq!(a.dim(2), 4);
    /// assert_eq!(a[[1, 2, 3]], 0.0);
    /// ```
    pub fn new(layout: impl Into<RectLayout>) -> Self where T: Default {
        Self::from_fn(layout, |_| T::default())
    }

    /// Allocates an array filled with copies of `t`.
    pub fn from_elem(layout: impl Into<RectLayout>, t: T) -> Self where T: Clone {
        let layout = layout.into();
        let items = vec![t; layout.footprint()];
        Self::new_inner(layout, items.into())
    }

    /// Allocates an array whose element at `index` is `f(index)`.
    ///
    /// `f` is called once for each index, in row-major order.
    ///
    /// ```
    /// use marray::{MultiArray};
    /// let a = MultiArray::from_fn([2, 3], |index| index[0] * 10 + index[1]);
    /// assert_eq!(a.as_ref(), [0, 1, 2, 10, 11, 12]);
    /// ```
    pub fn from_fn(
        layout: impl Into<RectLayout>,
        mut f: impl FnMut(&[usize]) -> T,
    ) -> Self {
        let layout = layout.into();
        let mut items = Vec::with_capacity(layout.footprint());
        layout.each(|index| items.push(f(index)));
        Self::new_inner(layout, items.into())
    }

    /// Constructs an array given its elements in row-major order.
    ///
    /// # Panics
    ///
    /// Panics if the number of elements differs from `layout.footprint()`.
    pub fn from_vec(layout: impl Into<RectLayout>, items: impl Into<Box<[T]>>) -> Self {
        match Self::try_from_vec(layout, items) {
            Ok(a) => a,
            Err(e) => panic!("{}", e),
        }
    }

    /// Checked version of [`MultiArray::from_vec()`].
    pub fn try_from_vec(
        layout: impl Into<RectLayout>,
        items: impl Into<Box<[T]>>,
    ) -> Result<Self, LayoutError> {
        let (layout, items) = (layout.into(), items.into());
        if layout.footprint() != items.len() {
            return Err(LayoutError::LengthMismatch {expected: layout.footprint(), got: items.len()});
        }
        Ok(Self::new_inner(layout, items))
    }

    pub fn layout(&self) -> &RectLayout { &self.layout }

    #[inline(always)]
    pub fn rank(&self) -> usize { self.layout.rank() }

    /// The extent of axis `axis`.
    #[inline(always)]
    pub fn dim(&self, axis: usize) -> usize { self.layout.dim(axis) }

    pub fn shape(&self) -> Vec<usize> { self.layout.shape() }

    #[inline(always)]
    pub fn footprint(&self) -> usize { self.layout.footprint() }

    /// Returns the element at `index`.
    ///
    /// See [`Layout::offset()`] for the preconditions.
    #[inline(always)]
    pub fn at(&self, index: &[usize]) -> &T { &self.items[self.layout.offset(index)] }

    #[inline(always)]
    pub fn at_mut(&mut self, index: &[usize]) -> &mut T { &mut self.items[self.layout.offset(index)] }

    /// Checked version of [`MultiArray::at()`].
    pub fn get_at(&self, index: &[usize]) -> Result<&T, LayoutError> {
        Ok(&self.items[self.layout.try_offset(index)?])
    }

    /// Checked version of [`MultiArray::at_mut()`].
    pub fn get_at_mut(&mut self, index: &[usize]) -> Result<&mut T, LayoutError> {
        Ok(&mut self.items[self.layout.try_offset(index)?])
    }

    /// A weak view of the whole array.
    pub fn view(&self) -> MultiView<'_, T> {
        MultiView::new(&self.items, &self.layout)
    }

    /// A weak read/write view of the whole array.
    pub fn view_mut(&mut self) -> MultiViewMut<'_, T> {
        MultiViewMut::new(&mut self.items, &self.layout)
    }

    /// Returns the sub-array at position `i` along axis `0`.
    ///
    /// ```
    /// use marray::{MultiArray};
    /// let a = MultiArray::from_vec([2, 3], vec![1, 2, 3, 4, 5, 6]);
    /// assert_eq!(a.row(1)[0], 4);
    /// ```
    pub fn row(&self, i: usize) -> MultiView<'_, T> { self.view().row(i) }

    pub fn row_mut(&mut self, i: usize) -> MultiViewMut<'_, T> { self.view_mut().into_row(i) }

    /// Returns the sub-array at position `i` along `axis`.
    pub fn select(&self, axis: usize, i: usize) -> MultiView<'_, T> { self.view().select(axis, i) }

    pub fn select_mut(&mut self, axis: usize, i: usize) -> MultiViewMut<'_, T> {
        self.view_mut().into_select(axis, i)
    }

    /// Gives `self` a new shape without moving any of the items.
    ///
    /// # Panics
    ///
    /// Panics if the footprint of `layout` differs from `self.footprint()`.
    pub fn reset(&mut self, layout: impl Into<RectLayout>) {
        if let Err(e) = self.try_reset(layout) { panic!("{}", e); }
    }

    /// Checked version of [`MultiArray::reset()`].
    pub fn try_reset(&mut self, layout: impl Into<RectLayout>) -> Result<(), LayoutError> {
        let layout = layout.into();
        if layout.footprint() != self.items.len() {
            return Err(LayoutError::LengthMismatch {expected: layout.footprint(), got: self.items.len()});
        }
        debug!("reshaping {:?} to {:?}", self.layout.shape(), layout.shape());
        self.layout = layout;
        Ok(())
    }

    /// Returns the raw array elements.
    pub fn into_raw(self) -> Box<[T]> { self.items }
}

impl<T> std::convert::AsRef<[T]> for MultiArray<T> {
    fn as_ref(&self) -> &[T] { &self.items }
}

impl<T> std::convert::AsMut<[T]> for MultiArray<T> {
    fn as_mut(&mut self) -> &mut [T] { &mut self.items }
}

impl<T> Flat for MultiArray<T> {
    type T = T;
    #[inline(always)]
    fn as_slice(&self) -> &[T] { &self.items }
}

impl<T> FlatMut for MultiArray<T> {
    #[inline(always)]
    fn as_mut_slice(&mut self) -> &mut [T] { &mut self.items }
}

impl_index_for_multi!(MultiArray<T>, mut);

impl<'a, T: Clone> From<MultiView<'a, T>> for MultiArray<T> {
    fn from(v: MultiView<'a, T>) -> Self { v.to_array() }
}

#[cfg(feature = "serde")]
mod parts {
    use super::{LayoutError, MultiArray, RectLayout};

    /// The serialized fields of a [`MultiArray`], before validation.
    #[derive(serde::Deserialize)]
    pub struct MultiArrayParts<T> {
        layout: RectLayout,
        items: Vec<T>,
    }

    impl<T> TryFrom<MultiArrayParts<T>> for MultiArray<T> {
        type Error = LayoutError;
        fn try_from(parts: MultiArrayParts<T>) -> Result<Self, LayoutError> {
            Self::try_from_vec(parts.layout, parts.items)
        }
    }
}

// ----------------------------------------------------------------------------
