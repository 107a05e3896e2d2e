//! # Cardpack Service
//!
//! Draw orchestration for the cardpack engine: pack lookup, weighted
//! sampling, audit logging and best-effort event notification.

pub mod draw_service;
pub mod dto;
pub mod r#impl;
pub mod publishers;

pub use draw_service::*;
pub use dto::*;
pub use publishers::*;
pub use r#impl::{DrawServiceImpl, DrawSettings};
