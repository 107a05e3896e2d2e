//! MySQL adapters.

mod card_repository;
mod draw_log_repository;
mod pack_repository;

pub use card_repository::*;
pub use draw_log_repository::*;
pub use pack_repository::*;
