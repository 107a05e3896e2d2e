//! Data Transfer Objects for the service layer.

mod card_dto;
mod draw_dto;

pub use card_dto::*;
pub use draw_dto::*;
