//! Domain services.

mod random;
pub mod weighted_draw;

pub use random::*;
pub use weighted_draw::*;
