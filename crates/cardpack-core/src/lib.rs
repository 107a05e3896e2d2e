//! # Cardpack Core
//!
//! Core types, traits, and error definitions for the Cardpack draw engine.
//! This crate provides the foundational abstractions used across all layers
//! of the workspace.

pub mod error;
pub mod id;
pub mod result;
pub mod telemetry;
pub mod traits;

pub use error::*;
pub use id::*;
pub use result::*;
pub use telemetry::*;
pub use traits::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
