//! # Cardpack Domain
//!
//! Domain entities, value objects, and events for the Cardpack draw engine,
//! plus the pure weighted draw service.

pub mod entities;
pub mod events;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use events::*;
pub use services::*;
pub use value_objects::*;
