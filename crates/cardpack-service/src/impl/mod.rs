//! Draw service implementations.
//!
//! Trait definitions live in the parent module (`draw_service.rs`).

pub mod draw_service_impl;

pub use draw_service_impl::{DrawServiceImpl, DrawSettings};
