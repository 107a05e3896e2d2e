//! Domain events.

mod draw_events;

pub use draw_events::*;
