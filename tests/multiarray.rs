use marray::{Cursor, Flat, FlatArray, FlatMut, Layout, MultiArray, RectLayout};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A `(2, 3, 4)` array holding its own flat positions, written in nested-loop
/// order.
fn counting() -> MultiArray<usize> {
    let mut a: MultiArray<usize> = MultiArray::new([2, 3, 4]);
    let mut next = 0;
    for i in 0..2 {
        for j in 0..3 {
            for k in 0..4 {
                a[[i, j, k]] = next;
                next += 1;
            }
        }
    }
    a
}

#[test]
fn layout_dims_and_footprint() {
    init_logging();
    for shape in [vec![7], vec![2, 3], vec![2, 3, 4], vec![5, 1, 2, 3]] {
        let layout = RectLayout::new(&shape);
        assert_eq!(layout.rank(), shape.len());
        assert_eq!(layout.footprint(), shape.iter().product::<usize>());
        for (axis, &d) in shape.iter().enumerate() {
            assert_eq!(layout.dim(axis), d);
        }
    }
}

#[test]
fn layout_offsets() {
    let layout = RectLayout::new([2, 3, 4]);
    for i in 0..2 {
        for j in 0..3 {
            for k in 0..4 {
                assert_eq!(layout.offset(&[i, j, k]), i * 12 + j * 4 + k);
            }
        }
    }
}

#[test]
fn layout_slice() {
    let layout = RectLayout::new([2, 3, 4]);
    let s = layout.slice(1);
    assert_eq!(s.rank(), 2);
    assert_eq!((s.dim(0), s.dim(1)), (2, 4));
    let owned = s.to_layout();
    assert_eq!(owned.shape(), [2, 4]);
    assert!(owned.is_contiguous());
}

#[test]
fn flat_round_trip() {
    init_logging();
    let mut owning: FlatArray<i64> = FlatArray::from_fn(10, |i| i as i64);
    {
        let weak = owning.weak();
        for i in 0..10 { assert_eq!(owning[i], weak[i]); }
    }
    owning[3] = -3;
    assert_eq!(owning.weak()[3], -3);
    {
        let mut weak = owning.weak_mut();
        weak[7] = -7;
    }
    assert_eq!(owning[7], -7);
    assert_eq!(owning.front(), &owning[0]);
    assert_eq!(owning.back(), &owning[9]);
}

#[test]
fn cursor_consistency() {
    let mut array = FlatArray::from_fn(10, |i| i * 3);
    let view = array.weak();
    let mut c = view.begin();
    for _ in 0..view.len() { c += 1; }
    assert_eq!(c, view.end());
    for k in 0..view.len() {
        assert_eq!(*(view.begin() + k), view[k]);
    }

    let p = 6;
    let direct = view.begin() + p;
    let (position, value) = (direct.position(), *direct);
    let from_mut = Cursor::from(array.begin_mut() + p);
    assert_eq!(from_mut.position(), position);
    assert_eq!(*from_mut, value);
}

#[test]
fn end_to_end() {
    init_logging();
    let array = counting();
    assert_eq!(array[[0, 0, 0]], 0);
    assert_eq!(array[[0, 0, 1]], 1);
    assert_eq!(array[[0, 1, 0]], 4);
    assert_eq!(array[[1, 0, 1]], 13);
    assert_eq!(array.row(1).row(0)[1], 13);
    assert!(array.iter().copied().eq(0..24));
}

#[test]
fn rows_and_selections() {
    let array = counting();
    let row = array.row(1);
    assert_eq!(row.shape(), [3, 4]);
    for j in 0..3 {
        for k in 0..4 {
            assert_eq!(row[[j, k]], array[[1, j, k]]);
        }
    }
    let column = array.select(1, 2);
    assert_eq!(column.shape(), [2, 4]);
    for i in 0..2 {
        for k in 0..4 {
            assert_eq!(column[[i, k]], array[[i, 2, k]]);
        }
    }
    let copy = column.to_array();
    assert_eq!(copy.as_ref(), [8, 9, 10, 11, 20, 21, 22, 23]);
}

#[test]
fn strided_column_cursor() {
    let array = counting();
    let column = array.row(0).select(1, 1);
    assert_eq!(column.shape(), [3]);
    let (begin, end) = (column.begin(), column.end());
    assert_eq!(end - begin, 3);
    let mut c = begin;
    let mut seen = Vec::new();
    while c != end {
        seen.push(*c);
        c += 1;
    }
    assert_eq!(seen, [1, 5, 9]);
}
