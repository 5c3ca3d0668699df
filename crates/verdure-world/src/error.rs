//! Error types for the verdure-world crate.

/// Errors that can occur during world operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The world was constructed with, or an operation assumed, a number of
    /// axes the grid logic does not implement.
    #[error("invalid world dimensionality: {dims} (only 1 and 2 are supported)")]
    InvalidDimensionality {
        /// The offending axis count.
        dims: usize,
    },

    /// A world axis was declared with zero cells.
    #[error("world axis {axis} has zero size")]
    EmptyAxis {
        /// Index of the zero-sized axis.
        axis: usize,
    },

    /// A resource grid's cell count does not match the world size.
    #[error("resource grid shape mismatch: expected {expected} cells, got {actual}")]
    ShapeMismatch {
        /// Cell count implied by the world size.
        expected: usize,
        /// Cell count actually provided.
        actual: usize,
    },

    /// A position lies outside the grid or has the wrong axis count.
    #[error("position {position:?} is not a valid cell of a world sized {size:?}")]
    PositionOutOfBounds {
        /// The offending coordinates.
        position: Vec<u32>,
        /// The world size per axis.
        size: Vec<u32>,
    },

    /// The tick counter would overflow.
    #[error("tick counter overflow: cannot advance beyond u64::MAX")]
    TickOverflow,
}
