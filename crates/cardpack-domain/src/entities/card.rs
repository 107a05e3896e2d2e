//! Card entity.

use crate::value_objects::{FrameColor, HoloEffect, Rarity, TextStyle};
use cardpack_core::{CardId, Entity};
use serde::{Deserialize, Deserializer, Serialize};

/// A collectible card as stored in the card catalog.
///
/// Cards are owned by the catalog; the draw flow only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Unique identifier for the card.
    pub id: CardId,

    /// Display name.
    pub name: String,

    /// Rarity tier.
    pub rarity: Rarity,

    /// Holographic finish, `none` when absent.
    #[serde(default)]
    pub holo_effect: HoloEffect,

    /// Typography treatment, `none` when absent.
    #[serde(default)]
    pub text_style: TextStyle,

    /// Frame color override; falls back to the rarity frame when unset.
    #[serde(default, deserialize_with = "deserialize_frame_color")]
    pub frame_color: Option<FrameColor>,

    /// Flavor or rules text.
    #[serde(default)]
    pub description: String,

    /// Reference to the card's icon asset.
    #[serde(default)]
    pub icon_url: String,
}

impl Card {
    /// Creates a card with no visual overrides.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, rarity: Rarity) -> Self {
        Self {
            id,
            name: name.into(),
            rarity,
            holo_effect: HoloEffect::None,
            text_style: TextStyle::None,
            frame_color: None,
            description: String::new(),
            icon_url: String::new(),
        }
    }

    /// Sets the holographic finish.
    #[must_use]
    pub fn with_holo_effect(mut self, holo_effect: HoloEffect) -> Self {
        self.holo_effect = holo_effect;
        self
    }

    /// Sets the typography treatment.
    #[must_use]
    pub fn with_text_style(mut self, text_style: TextStyle) -> Self {
        self.text_style = text_style;
        self
    }

    /// Sets the frame color override.
    #[must_use]
    pub fn with_frame_color(mut self, frame_color: FrameColor) -> Self {
        self.frame_color = Some(frame_color);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the icon reference.
    #[must_use]
    pub fn with_icon_url(mut self, icon_url: impl Into<String>) -> Self {
        self.icon_url = icon_url.into();
        self
    }
}

impl Entity<CardId> for Card {
    fn id(&self) -> &CardId {
        &self.id
    }
}

fn deserialize_frame_color<'de, D>(deserializer: D) -> Result<Option<FrameColor>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    FrameColor::parse_optional(raw.as_deref()).map_err(serde::de::Error::custom)
}
