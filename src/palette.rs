//! # Palette Registry
//!
//! Static color triples keyed by niche or trending aesthetic. Lookups are total:
//! anything unknown resolves to the dark "luxury" default palette.

use std::fmt;

/// An sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub [u8; 3]);

impl Color {
    pub const BLACK: Color = Color([0, 0, 0]);
    pub const WHITE: Color = Color([255, 255, 255]);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Parse `#RRGGBB`, `RRGGBB` or the `#RGB` shorthand
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_string(),
            _ => return None,
        };

        let channel = |i: usize| u8::from_str_radix(expanded.get(i..i + 2)?, 16).ok();
        Some(Self([channel(0)?, channel(2)?, channel(4)?]))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0[0], self.0[1], self.0[2])
    }

    /// Linear interpolation towards `other` (t = 0 yields self)
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Color([
            mix(self.0[0], other.0[0]),
            mix(self.0[1], other.0[1]),
            mix(self.0[2], other.0[2]),
        ])
    }

    /// Lighten towards white by `amount` (0.0-1.0)
    pub fn lighten(self, amount: f32) -> Color {
        self.lerp(Color::WHITE, amount)
    }

    /// Darken towards black by `amount` (0.0-1.0)
    pub fn darken(self, amount: f32) -> Color {
        self.lerp(Color::BLACK, amount)
    }

    /// Rec. 601 luma in 0-255
    pub fn luma(self) -> u8 {
        luma(self.0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Rec. 601 luma of a raw RGB triple
pub fn luma(rgb: [u8; 3]) -> u8 {
    (0.299 * rgb[0] as f32 + 0.587 * rgb[1] as f32 + 0.114 * rgb[2] as f32).round() as u8
}

/// Background, accent and text colors of a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub accent: Color,
    pub text: Color,
    pub glow: Option<Color>,
}

impl Palette {
    pub const fn new(background: Color, accent: Color, text: Color) -> Self {
        Self { background, accent, text, glow: None }
    }

    /// Build a palette from up to three hex strings (background, accent, text)
    ///
    /// Missing or unparsable entries fall back to the default palette's slot.
    pub fn from_hex_list(colors: &[String]) -> Self {
        let slot = |i: usize, fallback: Color| {
            colors.get(i).and_then(|hex| Color::from_hex(hex)).unwrap_or(fallback)
        };
        Self::new(
            slot(0, DEFAULT_PALETTE.background),
            slot(1, DEFAULT_PALETTE.accent),
            slot(2, DEFAULT_PALETTE.text),
        )
    }

    /// Glow color, derived from the accent when none is set
    pub fn glow(&self) -> Color {
        self.glow.unwrap_or_else(|| self.accent.lighten(0.35))
    }
}

/// Dark luxury: deep navy, sky accent, near-white text
pub const DEFAULT_PALETTE: Palette = Palette::new(
    Color::rgb(15, 23, 42),
    Color::rgb(56, 189, 248),
    Color::rgb(248, 250, 252),
);

/// A trending visual aesthetic a pin can be styled after
#[derive(Debug, Clone, Copy)]
pub struct Aesthetic {
    pub key: &'static str,
    /// Descriptive clause appended to generation prompts
    pub description: &'static str,
    pub vibe: &'static str,
    pub palette: Palette,
}

const AESTHETICS: &[Aesthetic] = &[
    Aesthetic {
        key: "POETCORE",
        description: "moody, academic, vintage journaling, fountain pens, coffee stained paper",
        vibe: "Intellectual & Nostalgic",
        palette: Palette::new(Color::rgb(40, 30, 20), Color::rgb(180, 160, 140), Color::rgb(245, 235, 220)),
    },
    Aesthetic {
        key: "VAMP_ROMANTIC",
        description: "gothic, dark roses, burgundy lace, moody lighting, candles",
        vibe: "Emotional & Dark",
        palette: Palette::new(Color::rgb(20, 0, 0), Color::rgb(128, 0, 32), Color::rgb(250, 228, 232)),
    },
    Aesthetic {
        key: "CHERRY_CODED",
        description: "high-gloss red, cherry motifs, y2k aesthetic, vibrant and juicy",
        vibe: "Playful & Bold",
        palette: Palette::new(Color::rgb(255, 0, 0), Color::rgb(255, 255, 255), Color::rgb(255, 255, 255)),
    },
    Aesthetic {
        key: "EXPEDITION",
        description: "archaeology, safari, linen textures, maps, survival gear, earth tones",
        vibe: "Adventurous & Practical",
        palette: Palette::new(Color::rgb(100, 90, 70), Color::rgb(210, 180, 140), Color::rgb(250, 245, 235)),
    },
    Aesthetic {
        key: "FUNHAUS",
        description: "circus maximalism, primary colors, bold patterns, playful home decor",
        vibe: "Energetic & Eclectic",
        palette: Palette::new(Color::rgb(255, 0, 0), Color::rgb(255, 255, 0), Color::rgb(255, 255, 255)),
    },
];

const NICHE_PALETTES: &[(&str, Palette)] = &[
    ("wealth", Palette::new(Color::rgb(12, 12, 12), Color::rgb(212, 175, 55), Color::rgb(255, 255, 255))),
    ("ai automation", Palette::new(Color::rgb(15, 23, 42), Color::rgb(56, 189, 248), Color::rgb(248, 250, 252))),
    ("content creation", Palette::new(Color::rgb(30, 27, 75), Color::rgb(236, 72, 153), Color::rgb(255, 255, 255))),
    ("crypto tech", Palette::new(Color::rgb(10, 10, 25), Color::rgb(247, 147, 26), Color::rgb(240, 240, 255))),
    ("biohacking", Palette::new(Color::rgb(6, 40, 36), Color::rgb(52, 211, 153), Color::rgb(236, 253, 245))),
    ("green tech", Palette::new(Color::rgb(20, 45, 25), Color::rgb(132, 204, 22), Color::rgb(247, 254, 231))),
    ("health", Palette::new(Color::rgb(240, 249, 255), Color::rgb(14, 165, 233), Color::rgb(12, 74, 110))),
];

/// Look up a trending aesthetic by key (case-insensitive)
pub fn aesthetic(key: &str) -> Option<&'static Aesthetic> {
    let key = normalize(key);
    AESTHETICS.iter().find(|a| a.key.eq_ignore_ascii_case(&key))
}

/// Keys of every registered aesthetic
pub fn aesthetic_keys() -> impl Iterator<Item = &'static str> {
    AESTHETICS.iter().map(|a| a.key)
}

/// Resolve a palette from an aesthetic or niche key; never fails
pub fn lookup(key: &str) -> Palette {
    if let Some(aesthetic) = aesthetic(key) {
        return aesthetic.palette;
    }

    let key = key.trim().to_lowercase();
    NICHE_PALETTES
        .iter()
        .find(|(niche, _)| *niche == key)
        .map(|(_, palette)| *palette)
        .unwrap_or(DEFAULT_PALETTE)
}

/// Palette for a render: the aesthetic wins over the niche when both are known
pub fn resolve(niche: &str, aesthetic_key: Option<&str>) -> Palette {
    match aesthetic_key.and_then(aesthetic) {
        Some(aesthetic) => aesthetic.palette,
        None => lookup(niche),
    }
}

fn normalize(key: &str) -> String {
    key.trim().replace([' ', '-'], "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_key_returns_default() {
        assert_eq!(lookup("underwater basket weaving"), DEFAULT_PALETTE);
        assert_eq!(lookup(""), DEFAULT_PALETTE);
        assert_eq!(lookup("NONE"), DEFAULT_PALETTE);
        // Repeated lookups are stable
        assert_eq!(lookup("nope"), lookup("nope"));
    }

    #[test]
    fn test_aesthetic_lookup_is_case_insensitive() {
        let a = aesthetic("vamp romantic").unwrap();
        assert_eq!(a.key, "VAMP_ROMANTIC");
        assert_eq!(lookup("poetcore").background, Color::rgb(40, 30, 20));
    }

    #[test]
    fn test_every_aesthetic_key_resolves() {
        let keys: Vec<&str> = aesthetic_keys().collect();
        assert_eq!(keys, vec!["POETCORE", "VAMP_ROMANTIC", "CHERRY_CODED", "EXPEDITION", "FUNHAUS"]);
        for key in keys {
            assert_eq!(aesthetic(&key.to_lowercase()).map(|a| a.key), Some(key));
        }
    }

    #[test]
    fn test_resolve_prefers_aesthetic() {
        let palette = resolve("Health", Some("FUNHAUS"));
        assert_eq!(palette.accent, Color::rgb(255, 255, 0));

        let palette = resolve("Health", Some("NONE"));
        assert_eq!(palette, lookup("health"));
    }

    #[test]
    fn test_hex_parsing() {
        assert_eq!(Color::from_hex("#0F172A"), Some(Color::rgb(15, 23, 42)));
        assert_eq!(Color::from_hex("fff"), Some(Color::WHITE));
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#GGGGGG"), None);
        assert_eq!(Color::rgb(56, 189, 248).to_hex(), "#38BDF8");
    }

    #[test]
    fn test_palette_from_partial_hex_list() {
        let palette = Palette::from_hex_list(&["#FF0000".to_string(), "bogus".to_string()]);
        assert_eq!(palette.background, Color::rgb(255, 0, 0));
        assert_eq!(palette.accent, DEFAULT_PALETTE.accent);
        assert_eq!(palette.text, DEFAULT_PALETTE.text);
    }
}
