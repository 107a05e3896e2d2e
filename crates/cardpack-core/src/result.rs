//! Result type aliases for the draw engine.

use crate::CardpackError;

/// A specialized `Result` type for Cardpack operations.
pub type CardpackResult<T> = Result<T, CardpackError>;
