//! Row-major layouts of hyper-rectangular arrays.
//!
//! A [`RectLayout`] stores the suffix products of its shape: `index()[a]` is
//! the number of flat elements spanned by axes `a..`. Strides, extents and the
//! footprint are all recovered from that one vector. Slicing a layout yields a
//! [`RectLayoutRef`], which borrows the same vector and remembers which of the
//! parent's axes survive.

use log::{trace};

use super::{LayoutError};

/// Implemented by types that map a multi-index onto a position in a flat
/// buffer.
///
/// Axes are numbered from the outermost (`0`) to the innermost
/// (`rank() - 1`). The innermost axis varies fastest.
pub trait Layout {
    /// The number of axes.
    fn rank(&self) -> usize;

    /// The extent of axis `axis`.
    ///
    /// Panics if `axis >= self.rank()`.
    fn dim(&self, axis: usize) -> usize;

    /// The number of flat elements between consecutive positions along
    /// `axis`.
    ///
    /// Panics if `axis >= self.rank()`.
    fn stride(&self, axis: usize) -> usize;

    /// The number of elements addressed by `self`.
    fn footprint(&self) -> usize {
        (0..self.rank()).map(|axis| self.dim(axis)).product()
    }

    /// The flat position of `index`.
    ///
    /// This is the fast path: the caller must ensure that `index` has length
    /// `self.rank()` and that every coordinate is in bounds. Consider
    /// [`Layout::try_offset()`] otherwise.
    fn offset(&self, index: &[usize]) -> usize {
        debug_assert_eq!(index.len(), self.rank());
        index.iter().enumerate().map(|(axis, &i)| i * self.stride(axis)).sum()
    }

    /// Checked version of [`Layout::offset()`].
    fn try_offset(&self, index: &[usize]) -> Result<usize, LayoutError> {
        if index.len() != self.rank() {
            return Err(LayoutError::RankMismatch {expected: self.rank(), got: index.len()});
        }
        for (axis, &i) in index.iter().enumerate() {
            let dim = self.dim(axis);
            if i >= dim { return Err(LayoutError::OutOfBounds {axis, index: i, dim}); }
        }
        Ok(self.offset(index))
    }

    /// One more than the largest flat position `self` can address.
    ///
    /// Equals [`Layout::footprint()`] if `self` is contiguous.
    fn span(&self) -> usize {
        1 + (0..self.rank()).map(|axis| (self.dim(axis) - 1) * self.stride(axis)).sum::<usize>()
    }

    /// Returns `true` if `self` addresses every position in `0..footprint()`.
    fn is_contiguous(&self) -> bool {
        let mut expected = 1;
        for axis in (0..self.rank()).rev() {
            if self.dim(axis) > 1 && self.stride(axis) != expected { return false; }
            expected *= self.dim(axis);
        }
        true
    }

    /// The extent of every axis, outermost first.
    fn shape(&self) -> Vec<usize> {
        (0..self.rank()).map(|axis| self.dim(axis)).collect()
    }

    /// Returns a contiguous [`RectLayout`] with the same shape as `self`.
    ///
    /// This is the layout of a freshly allocated copy of an array laid out
    /// according to `self`.
    fn to_layout(&self) -> RectLayout {
        RectLayout::new(self.shape())
    }

    /// Calls `f` on every multi-index of `self`, in row-major order.
    ///
    /// ```
    /// use marray::{Layout, RectLayout};
    /// let mut seen = Vec::new();
    /// RectLayout::new([2, 2]).each(|index| seen.push(index.to_vec()));
    /// assert_eq!(seen, [[0, 0], [0, 1], [1, 0], [1, 1]]);
    /// ```
    fn each(&self, mut f: impl FnMut(&[usize])) {
        let rank = self.rank();
        let mut index = vec![0; rank];
        loop {
            f(&index);
            let mut axis = rank;
            loop {
                if axis == 0 { return; }
                axis -= 1;
                index[axis] += 1;
                if index[axis] < self.dim(axis) { break; }
                index[axis] = 0;
            }
        }
    }
}

/// Removes position `axis` from `axes`.
fn drop_axis(axes: impl ExactSizeIterator<Item=usize>, axis: usize) -> Box<[usize]> {
    let rank = axes.len();
    assert!(axis < rank, "{}", LayoutError::AxisOutOfRange {axis, rank});
    axes.enumerate().filter(|&(a, _)| a != axis).map(|(_, parent_axis)| parent_axis).collect()
}

// ----------------------------------------------------------------------------

/// The layout of a dense hyper-rectangular array in row-major order.
///
/// ```
/// use marray::{Layout, RectLayout};
/// let layout = RectLayout::new([2, 3, 4]);
/// assert_eq!(layout.index(), [24, 12, 4]);
/// assert_eq!(layout.footprint(), 24);
/// assert_eq!(layout.dim(1), 3);
/// assert_eq!(layout.offset(&[1, 0, 1]), 13);
/// ```
///
/// With the `serde` feature, a `RectLayout` is serialized as its shape, and
/// deserializing goes through [`RectLayout::try_new()`].
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<usize>", into = "Vec<usize>"))]
pub struct RectLayout {
    index: Box<[usize]>,
}

impl RectLayout {
    /// Constructs the layout of an array with extents `shape`.
    ///
    /// # Panics
    ///
    /// Panics if any extent is zero, or if the footprint overflows `usize`.
    pub fn new(shape: impl AsRef<[usize]>) -> Self {
        match Self::try_new(shape) {
            Ok(layout) => layout,
            Err(e) => panic!("{}", e),
        }
    }

    /// Checked version of [`RectLayout::new()`].
    ///
    /// ```
    /// use marray::{LayoutError, RectLayout};
    /// assert_eq!(RectLayout::try_new([2, 0, 4]), Err(LayoutError::ZeroExtent {axis: 1}));
    /// ```
    pub fn try_new(shape: impl AsRef<[usize]>) -> Result<Self, LayoutError> {
        let shape = shape.as_ref();
        if let Some(axis) = shape.iter().position(|&d| d == 0) {
            return Err(LayoutError::ZeroExtent {axis});
        }
        let mut index: Box<[usize]> = shape.into();
        for axis in (1..index.len()).rev() {
            index[axis - 1] = index[axis - 1].checked_mul(index[axis])
                .ok_or_else(|| LayoutError::Overflow {shape: shape.to_vec()})?;
        }
        trace!("layout {:?} has index {:?}", shape, index);
        Ok(Self {index})
    }

    /// The suffix products of the shape: `index()[a]` is the product of the
    /// extents of axes `a..`.
    pub fn index(&self) -> &[usize] { &self.index }

    /// Returns a layout of rank `self.rank() - 1` that omits `axis`.
    ///
    /// The result borrows `self`'s index vector rather than copying it.
    ///
    /// ```
    /// use marray::{Layout, RectLayout};
    /// let layout = RectLayout::new([2, 3, 4]);
    /// let slice = layout.slice(1);
    /// assert_eq!(slice.shape(), [2, 4]);
    /// assert_eq!(slice.offset(&[1, 1]), 13);
    /// ```
    pub fn slice(&self, axis: usize) -> RectLayoutRef<'_> {
        RectLayoutRef {index: &self.index, axes: drop_axis(0..self.rank(), axis)}
    }

    /// Returns a full-rank [`RectLayoutRef`] over `self`.
    pub fn as_layout_ref(&self) -> RectLayoutRef<'_> {
        RectLayoutRef {index: &self.index, axes: (0..self.rank()).collect()}
    }
}

impl Layout for RectLayout {
    #[inline(always)]
    fn rank(&self) -> usize { self.index.len() }

    #[inline(always)]
    fn dim(&self, axis: usize) -> usize {
        match self.index.get(axis + 1) {
            Some(&inner) => self.index[axis] / inner,
            None => self.index[axis],
        }
    }

    #[inline(always)]
    fn stride(&self, axis: usize) -> usize {
        assert!(axis < self.rank(), "{}", LayoutError::AxisOutOfRange {axis, rank: self.rank()});
        self.index.get(axis + 1).copied().unwrap_or(1)
    }

    #[inline(always)]
    fn footprint(&self) -> usize { self.index.first().copied().unwrap_or(1) }

    fn offset(&self, index: &[usize]) -> usize {
        debug_assert_eq!(index.len(), self.rank());
        let Some((&last, outer)) = index.split_last() else { return 0; };
        let mut result = last;
        for axis in (0..outer.len()).rev() {
            result += outer[axis] * self.index[axis + 1];
        }
        result
    }

    #[inline(always)]
    fn span(&self) -> usize { self.footprint() }

    #[inline(always)]
    fn is_contiguous(&self) -> bool { true }

    fn to_layout(&self) -> RectLayout { self.clone() }
}

impl<const N: usize> From<[usize; N]> for RectLayout {
    fn from(shape: [usize; N]) -> Self { Self::new(shape) }
}

impl TryFrom<Vec<usize>> for RectLayout {
    type Error = LayoutError;
    fn try_from(shape: Vec<usize>) -> Result<Self, LayoutError> { Self::try_new(shape) }
}

impl From<RectLayout> for Vec<usize> {
    fn from(layout: RectLayout) -> Self { layout.shape() }
}

// ----------------------------------------------------------------------------

/// A layout that refers to some of the axes of a [`RectLayout`].
///
/// Obtained from [`RectLayout::slice()`], [`RectLayoutRef::slice()`] or
/// [`RectLayout::as_layout_ref()`]. It borrows the parent's index vector and
/// stores only the list of surviving parent axes, in order.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct RectLayoutRef<'a> {
    index: &'a [usize],
    axes: Box<[usize]>,
}

impl<'a> RectLayoutRef<'a> {
    /// The parent's index vector. See [`RectLayout::index()`].
    pub fn parent_index(&self) -> &'a [usize] { self.index }

    /// For each axis of `self`, the corresponding axis of the parent.
    pub fn axes(&self) -> &[usize] { &self.axes }

    /// Returns a layout of rank `self.rank() - 1` that omits `axis`.
    ///
    /// The result refers to the same parent as `self`.
    ///
    /// ```
    /// use marray::{Layout, RectLayout};
    /// let layout = RectLayout::new([2, 3, 4, 5]);
    /// let slice = layout.slice(0).slice(1);
    /// assert_eq!(slice.axes(), [1, 3]);
    /// assert_eq!(slice.shape(), [3, 5]);
    /// ```
    pub fn slice(&self, axis: usize) -> RectLayoutRef<'a> {
        RectLayoutRef {index: self.index, axes: drop_axis(self.axes.iter().copied(), axis)}
    }
}

impl<'a> Layout for RectLayoutRef<'a> {
    #[inline(always)]
    fn rank(&self) -> usize { self.axes.len() }

    #[inline(always)]
    fn dim(&self, axis: usize) -> usize {
        let a = self.axes[axis];
        match self.index.get(a + 1) {
            Some(&inner) => self.index[a] / inner,
            None => self.index[a],
        }
    }

    #[inline(always)]
    fn stride(&self, axis: usize) -> usize {
        self.index.get(self.axes[axis] + 1).copied().unwrap_or(1)
    }
}

impl<'a> From<&'a RectLayout> for RectLayoutRef<'a> {
    fn from(layout: &'a RectLayout) -> Self { layout.as_layout_ref() }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_shape(layout: &impl Layout, shape: &[usize]) {
        assert_eq!(layout.rank(), shape.len());
        for (axis, &d) in shape.iter().enumerate() {
            assert_eq!(layout.dim(axis), d, "axis {}", axis);
        }
        assert_eq!(layout.footprint(), shape.iter().product::<usize>());
    }

    #[test]
    fn dims_and_footprint() {
        assert_shape(&RectLayout::new([2, 3, 4]), &[2, 3, 4]);
        assert_shape(&RectLayout::new([2, 3]), &[2, 3]);
        assert_shape(&RectLayout::new([7]), &[7]);
        assert_shape(&RectLayout::new([1, 5, 1, 2]), &[1, 5, 1, 2]);
        assert_shape(&RectLayout::new(Vec::new()), &[]);
    }

    #[test]
    fn index_is_suffix_products() {
        let layout = RectLayout::new([2, 3, 4]);
        assert_eq!(layout.index(), [24, 12, 4]);
        assert_eq!(layout.footprint(), layout.index()[0]);
        assert_eq!((0..3).map(|a| layout.stride(a)).collect::<Vec<_>>(), [12, 4, 1]);
    }

    #[test]
    fn offset_is_row_major() {
        let layout = RectLayout::new([2, 3, 4]);
        for i in 0..2 {
            for j in 0..3 {
                for k in 0..4 {
                    assert_eq!(layout.offset(&[i, j, k]), i * 12 + j * 4 + k);
                }
            }
        }
        let rank2 = RectLayout::new([2, 3]);
        assert_eq!(rank2.offset(&[1, 2]), 5);
    }

    #[test]
    fn each_matches_offset() {
        let layout = RectLayout::new([3, 1, 2]);
        let mut next = 0;
        layout.each(|index| {
            assert_eq!(layout.offset(index), next);
            next += 1;
        });
        assert_eq!(next, 6);
    }

    #[test]
    fn slice_drops_axis() {
        let layout = RectLayout::new([2, 3, 4]);
        let slice = layout.slice(1);
        assert_shape(&slice, &[2, 4]);
        assert_eq!(slice.axes(), [0, 2]);
        assert_eq!(slice.parent_index().as_ptr(), layout.index().as_ptr());
        assert_eq!(slice.offset(&[1, 3]), 12 + 3);
        assert!(!slice.is_contiguous());
        assert_eq!(slice.span(), 16);

        let rows = layout.slice(0);
        assert_shape(&rows, &[3, 4]);
        assert!(rows.is_contiguous());
        assert_eq!(rows.span(), rows.footprint());
    }

    #[test]
    fn nested_slices() {
        let layout = RectLayout::new([2, 3, 4]);
        let column = layout.slice(0).slice(1);
        assert_eq!(column.axes(), [1]);
        assert_shape(&column, &[3]);
        assert_eq!(column.stride(0), 4);
        let scalar = column.slice(0);
        assert_eq!(scalar.rank(), 0);
        assert_eq!(scalar.footprint(), 1);
        assert_eq!(scalar.offset(&[]), 0);
    }

    #[test]
    fn to_layout_preserves_dims() {
        let layout = RectLayout::new([2, 3, 4]);
        let slice = layout.slice(1);
        let owned = slice.to_layout();
        assert_shape(&owned, &[2, 4]);
        assert_eq!(owned.index(), [8, 4]);
        assert_eq!(layout.as_layout_ref().to_layout(), layout);
    }

    #[test]
    fn try_offset() {
        let layout = RectLayout::new([2, 3]);
        assert_eq!(layout.try_offset(&[1, 2]), Ok(5));
        assert_eq!(layout.try_offset(&[1]), Err(LayoutError::RankMismatch {expected: 2, got: 1}));
        assert_eq!(layout.try_offset(&[0, 3]), Err(LayoutError::OutOfBounds {axis: 1, index: 3, dim: 3}));
    }

    #[test]
    fn try_new_rejects_bad_shapes() {
        assert_eq!(RectLayout::try_new([3, 0]), Err(LayoutError::ZeroExtent {axis: 1}));
        assert!(matches!(
            RectLayout::try_new([usize::MAX, 2]),
            Err(LayoutError::Overflow {..})
        ));
    }

    #[test]
    #[should_panic]
    fn slice_out_of_range() {
        RectLayout::new([2, 3]).slice(2);
    }

    #[test]
    fn shape_conversions() {
        let layout = RectLayout::try_from(vec![2, 3, 4]).unwrap();
        assert_eq!(layout.index(), [24, 12, 4]);
        assert_eq!(Vec::from(layout), [2, 3, 4]);
        assert_eq!(RectLayout::try_from(vec![5, 0]), Err(LayoutError::ZeroExtent {axis: 1}));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn serialized_as_shape() {
        let layout = RectLayout::new([2, 3, 4]);
        let json = serde_json::to_string(&layout).unwrap();
        assert_eq!(json, "[2,3,4]");
        let back: RectLayout = serde_json::from_str(&json).unwrap();
        assert_eq!(back, layout);
        assert_eq!(back.index(), [24, 12, 4]);
    }

    #[test]
    fn rejects_invalid_shapes() {
        assert!(serde_json::from_str::<RectLayout>("[5,0]").is_err());
        assert!(serde_json::from_str::<RectLayout>(r#"{"index":[5,0]}"#).is_err());
        assert!(serde_json::from_str::<RectLayout>(&format!("[{},2]", usize::MAX)).is_err());
    }
}
