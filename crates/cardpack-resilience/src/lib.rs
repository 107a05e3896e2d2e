//! # Cardpack Resilience
//!
//! Resilience patterns for the draw engine.
//! Provides a bounded retry policy and a timeout wrapper.

pub mod retry;
pub mod timeout;

pub use retry::*;
pub use timeout::*;
