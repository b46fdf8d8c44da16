use std::error::Error;
use std::fmt::{Display, Formatter};

/// Common error type for CARET data operations.
///
/// Raised by the data model when a value cannot represent what was asked of
/// it (zero-sized grids, unparsable voxel text, out-of-range indices).
///
/// # Examples
/// ```
/// use caret_structures::{CaretDataError, VolumeDimensions};
///
/// assert!(matches!(
///     VolumeDimensions::new(0, 4, 4),
///     Err(CaretDataError::BadParameters(_))
/// ));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaretDataError {
    /// Invalid parameters provided to a function
    BadParameters(String),
    /// Text could not be parsed into a data type
    ParseError(String),
    /// An index fell outside the grid it addresses
    OutOfBounds(String),
    /// Internal error indicating a bug
    InternalError(String),
}

impl Display for CaretDataError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CaretDataError::BadParameters(msg) => write!(f, "Bad Parameters: {}", msg),
            CaretDataError::ParseError(msg) => write!(f, "Failed to Parse: {}", msg),
            CaretDataError::OutOfBounds(msg) => write!(f, "Out of Bounds: {}", msg),
            CaretDataError::InternalError(msg) => write!(f, "Internal Error: {}", msg),
        }
    }
}
impl Error for CaretDataError {}
