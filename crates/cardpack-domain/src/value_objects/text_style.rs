//! Typography treatment for a card's name and text box.

closed_tag! {
    /// Typography treatment rendered on the card text.
    pub enum TextStyle {
        Bold => "bold",
        Italic => "italic",
        Outline => "outline",
        Shadow => "shadow",
        Embossed => "embossed",
        Engraved => "engraved",
        GoldFoil => "gold-foil",
        SilverFoil => "silver-foil",
        Neon => "neon",
        Glow => "glow",
        Gradient => "gradient",
        Rainbow => "rainbow",
        Chrome => "chrome",
        Metallic => "metallic",
        Glitch => "glitch",
        Retro => "retro",
        Pixel => "pixel",
        Gothic => "gothic",
        Script => "script",
        Handwritten => "handwritten",
        Typewriter => "typewriter",
        Stencil => "stencil",
        Graffiti => "graffiti",
        Comic => "comic",
        Fire => "fire",
        Ice => "ice",
        Electric => "electric",
        Shimmer => "shimmer",
        Sparkle => "sparkle",
        Holographic => "holographic",
        Inverted => "inverted",
        DoubleStroke => "double-stroke",
        Pastel => "pastel",
        Monochrome => "monochrome",
        Sepia => "sepia",
        Glass => "glass",
        Crystal => "crystal",
        Runic => "runic",
        Calligraphy => "calligraphy",
    }
}
