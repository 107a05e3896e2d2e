//! Domain value objects.

#[macro_use]
mod closed_tag;
mod frame_color;
mod holo_effect;
mod rarity;
mod text_style;
mod weight;

pub use frame_color::*;
pub use holo_effect::*;
pub use rarity::*;
pub use text_style::*;
pub use weight::*;
