//! Event publisher adapters.
//!
//! Both are best-effort: a publisher without an audience drops the event
//! and reports success.

mod broadcast_publisher;
mod tracing_publisher;

pub use broadcast_publisher::*;
pub use tracing_publisher::*;
