//! Domain entities.

mod card;
mod draw_log;
mod pack;

pub use card::*;
pub use draw_log::*;
pub use pack::*;
