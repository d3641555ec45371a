/// Errors reported by the checked (`try_*`) entry points.
///
/// The unchecked entry points panic with the same messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum LayoutError {
    #[error("axis {axis} has extent 0")]
    ZeroExtent { axis: usize },

    #[error("footprint of shape {shape:?} overflows usize")]
    Overflow { shape: Vec<usize> },

    #[error("expected an index of rank {expected}, got rank {got}")]
    RankMismatch { expected: usize, got: usize },

    #[error("index {index} is out of bounds for axis {axis} of extent {dim}")]
    OutOfBounds { axis: usize, index: usize, dim: usize },

    #[error("axis {axis} out of range for a layout of rank {rank}")]
    AxisOutOfRange { axis: usize, rank: usize },

    #[error("expected {expected} items, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    #[error("layout reaches {span} items but the buffer holds {got}")]
    BufferTooShort { span: usize, got: usize },
}
