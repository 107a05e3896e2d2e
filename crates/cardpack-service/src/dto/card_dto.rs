//! Card DTOs.

use cardpack_domain::{Card, HoloEffect, Rarity, TextStyle};
use serde::{Deserialize, Serialize};

/// Card as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardResponse {
    pub id: u32,
    pub name: String,
    pub rarity: Rarity,
    pub holo_effect: HoloEffect,
    pub text_style: TextStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_color: Option<String>,
    pub description: String,
    pub icon_url: String,
}

impl From<Card> for CardResponse {
    fn from(card: Card) -> Self {
        Self {
            id: card.id.get(),
            name: card.name,
            rarity: card.rarity,
            holo_effect: card.holo_effect,
            text_style: card.text_style,
            frame_color: card.frame_color.map(|color| color.as_str().to_string()),
            description: card.description,
            icon_url: card.icon_url,
        }
    }
}
