//! Holographic finish applied to a card.

closed_tag! {
    /// Holographic finish rendered on the card face.
    pub enum HoloEffect {
        RegularHolo => "regular-holo",
        ReverseHolo => "reverse-holo",
        CosmosHolo => "cosmos-holo",
        GalaxyHolo => "galaxy-holo",
        RadiantHolo => "radiant-holo",
        RainbowRare => "rainbow-rare",
        RainbowAlt => "rainbow-alt",
        SecretRare => "secret-rare",
        GoldSecret => "gold-secret",
        AmazingRare => "amazing-rare",
        ShinyRare => "shiny-rare",
        ShinyVault => "shiny-vault",
        TrainerGallery => "trainer-gallery",
        FullArt => "full-art",
        AltArt => "alt-art",
        VMax => "v-max",
        VStar => "v-star",
        Prism => "prism",
        Prismatic => "prismatic",
        Crystal => "crystal",
        Glitter => "glitter",
        Sparkle => "sparkle",
        Stardust => "stardust",
        Starlight => "starlight",
        Sunburst => "sunburst",
        Aurora => "aurora",
        Nebula => "nebula",
        Supernova => "supernova",
        Comet => "comet",
        Meteor => "meteor",
        Eclipse => "eclipse",
        Moonlight => "moonlight",
        Solar => "solar",
        Iridescent => "iridescent",
        Opal => "opal",
        Pearl => "pearl",
        Diamond => "diamond",
        Ruby => "ruby",
        Sapphire => "sapphire",
        Emerald => "emerald",
        Amethyst => "amethyst",
        Topaz => "topaz",
        Obsidian => "obsidian",
        Chrome => "chrome",
        Mirror => "mirror",
        Foil => "foil",
        Etched => "etched",
        Textured => "textured",
        Lenticular => "lenticular",
        Hologram => "hologram",
        Laser => "laser",
        Plasma => "plasma",
        Neon => "neon",
        Glow => "glow",
        Frost => "frost",
        Flame => "flame",
        Lightning => "lightning",
        Tidal => "tidal",
        Sakura => "sakura",
        Confetti => "confetti",
        Tinsel => "tinsel",
        CrackedIce => "cracked-ice",
        ShatteredGlass => "shattered-glass",
        Swirl => "swirl",
        Wave => "wave",
        Checker => "checker",
        Mosaic => "mosaic",
        Vortex => "vortex",
        Spectrum => "spectrum",
    }
}
