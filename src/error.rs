//! Error types for [`Path`](crate::Path) operations.

use thiserror::Error;

/// Errors that can occur when editing or reading a [`Path`](crate::Path) by index.
///
/// Compilation itself never fails: degenerate geometry always has a fallback, and non-finite
/// numbers are passed through to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PathError {
    /// `index` was not a valid position in a path of `len` segments.  Insertion accepts
    /// `0..=len`, every other operation accepts `0..len`.
    #[error("segment index {index} is out of range for a path of {len} segments")]
    IndexOutOfRange { index: usize, len: usize },
}
