//! A pure-Rust library for row-major multi-dimensional arrays over flat
//! buffers.
//!
//! Every array in this crate is a run of `T`s stored contiguously, plus a
//! description of how to find element `(i₀, i₁, ..., iₙ₋₁)` in it. The
//! description is a [`Layout`]. [`RectLayout`] is the layout of a dense
//! row-major array; it stores the suffix products of the shape, so that each
//! extent and stride can be read off without recomputation. Taking a
//! [`RectLayout::slice()`] removes one axis and yields a [`RectLayoutRef`],
//! which borrows the parent's products and keeps its strides.
//!
//! There are two flavours of each array type:
//!
//! - Owning arrays, [`FlatArray`] and [`MultiArray`], allocate and free their
//!   elements. Cloning one copies the elements.
//! - Weak arrays, [`FlatView`], [`FlatViewMut`], [`MultiView`] and
//!   [`MultiViewMut`], borrow elements owned by something else. The borrow
//!   checker guarantees they cannot outlive the owner.
//!
//! [`MultiArray::row()`] and [`MultiArray::select()`] return weak sub-arrays
//! of one lower rank. They can be nested, and writes through a
//! [`MultiViewMut`] are visible in the owner:
//!
//! ```
//! use marray::{MultiArray};
//! let mut a = MultiArray::from_fn([2, 3, 4], |index| index[0] * 12 + index[1] * 4 + index[2]);
//! assert_eq!(a[[1, 0, 1]], 13);
//! assert_eq!(a.row(1).row(0)[1], 13);
//! a.row_mut(1).row_mut(0)[1] = 0;
//! assert_eq!(a[[1, 0, 1]], 0);
//! ```
//!
//! Walking a flat array or one axis of a rank-1 view uses a [`Cursor`], which
//! behaves like a random-access pointer that steps by a fixed stride.
//!
//! Operations that can fail come in pairs: a `try_` method that returns a
//! [`LayoutError`], and a plain method that panics with the same message.

mod error;
pub use error::{LayoutError};

mod cursor;
pub use cursor::{Cursor, CursorMut};

mod flat;
pub use flat::{Flat, FlatMut, FlatArray, FlatView, FlatViewMut};

pub mod layout;
pub use layout::{Layout, RectLayout, RectLayoutRef};

mod view;
pub use view::{MultiView, MultiViewMut};

mod array;
pub use array::{MultiArray};
