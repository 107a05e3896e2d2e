//! Timeout wrapper for async operations.

use cardpack_core::CardpackError;
use std::time::Duration;

/// Wraps an async operation with a timeout.
///
/// Elapsed deadlines surface as [`CardpackError::Timeout`].
pub async fn with_timeout<F, Fut, T>(duration: Duration, f: F) -> Result<T, CardpackError>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<T, CardpackError>>,
{
    tokio::time::timeout(duration, f())
        .await
        .map_err(|_| CardpackError::Timeout(format!("Operation timed out after {:?}", duration)))?
}
