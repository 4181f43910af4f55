use thiserror::Error;

/// Errors a [`Minefield`](crate::Minefield) command can fail with.
///
/// Everything else a caller might get "wrong" (revealing a flagged or
/// already-open cell, flagging twice, unflagging an unset flag) is a
/// defined no-op, not an error.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// The requested grid cannot be built: zero-sized, or every cell
    /// would hold a mine.
    #[error("invalid field configuration: {width}x{height} with {mines} mines")]
    InvalidConfiguration {
        width: usize,
        height: usize,
        mines: usize,
    },

    /// A per-cell command addressed a coordinate outside the grid.
    #[error("coordinates ({row}, {col}) are outside the {width}x{height} field")]
    CoordinateOutOfRange {
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    },
}
