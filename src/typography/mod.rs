//! # Typography Engine
//!
//! Fits headline and subtitle text into a bounding width by shrinking the
//! font size step by step, wraps it over several lines and draws it with an
//! optional two-layer drop shadow.
//!
//! Wrapping first uses an approximate glyph width (`char_width_ratio` times
//! the font size), then the real measured width decides whether another
//! shrink pass is needed. Once the size floor is reached, lines are re-wrapped
//! by measured width and overlong words are broken, so the widest line never
//! exceeds the requested width.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{canvas::Canvas, config::TypographyConfig, palette::Color};

mod bitmap;
mod font;

pub use font::Typeface;

/// System fonts tried for headlines when none is configured
const DISPLAY_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// System fonts tried for body text when none is configured
const BODY_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFamily {
    /// Heavy face for headlines and buttons
    Display,
    /// Regular face for subtitles
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// Lines centered on the anchor's x coordinate
    Center,
    /// Lines start at the anchor's x coordinate
    Left,
}

/// A block of text to fit and draw
#[derive(Debug, Clone)]
pub struct TextBlock<'a> {
    pub text: &'a str,
    /// Top of the block; x is the center or the left edge depending on `align`
    pub anchor: (i32, i32),
    pub family: FontFamily,
    pub max_font_size: f32,
    pub max_width: u32,
    pub color: Color,
    pub align: Align,
    pub shadow: bool,
}

impl<'a> TextBlock<'a> {
    /// Centered display text without shadow
    pub fn centered(text: &'a str, anchor: (i32, i32), max_font_size: f32, max_width: u32, color: Color) -> Self {
        Self {
            text,
            anchor,
            family: FontFamily::Display,
            max_font_size,
            max_width,
            color,
            align: Align::Center,
            shadow: false,
        }
    }

    pub fn family(mut self, family: FontFamily) -> Self {
        self.family = family;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn shadow(mut self, shadow: bool) -> Self {
        self.shadow = shadow;
        self
    }
}

/// Result of fitting a block: chosen size and wrapped lines
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    pub font_size: f32,
    pub lines: Vec<String>,
    pub line_height: f32,
    /// Measured width of the widest line
    pub width: f32,
}

impl TextLayout {
    pub fn height(&self) -> f32 {
        self.lines.len() as f32 * self.line_height
    }
}

/// Owns the loaded typefaces and the fitting parameters
pub struct Typesetter {
    display: Typeface,
    body: Typeface,
    config: TypographyConfig,
}

impl Typesetter {
    /// Load fonts from configuration, then system locations, then the built-in font
    pub fn load(config: &TypographyConfig) -> Self {
        let display_face = load_family(config.display_font.as_deref(), DISPLAY_CANDIDATES, "display");
        let body_face = load_family(config.body_font.as_deref(), BODY_CANDIDATES, "body");
        debug!("Typefaces: display={} body={}", display_face.name(), body_face.name());

        Self {
            display: display_face,
            body: body_face,
            config: config.clone(),
        }
    }

    /// Typesetter using only the built-in bitmap font
    pub fn builtin(config: &TypographyConfig) -> Self {
        Self {
            display: Typeface::builtin(),
            body: Typeface::builtin(),
            config: config.clone(),
        }
    }

    pub fn typeface(&self, family: FontFamily) -> &Typeface {
        match family {
            FontFamily::Display => &self.display,
            FontFamily::Body => &self.body,
        }
    }

    /// Choose a font size and wrap `text` so it fits `max_width`
    pub fn fit(&self, text: &str, family: FontFamily, max_font_size: f32, max_width: u32) -> TextLayout {
        let face = self.typeface(family);
        let floor = self.config.min_font_size;
        let max_width = max_width.max(1) as f32;
        let mut size = max_font_size.max(floor);

        loop {
            let chars_per_line = (max_width / (size * self.config.char_width_ratio)).floor().max(1.0) as usize;
            let lines = wrap_by_chars(text, chars_per_line);
            let width = widest(face, &lines, size);

            if width <= max_width {
                return self.layout(lines, size, width);
            }
            if size <= floor {
                break;
            }
            size = (size - self.config.shrink_step).max(floor);
        }

        let lines = wrap_by_width(face, text, size, max_width);
        let width = widest(face, &lines, size);
        debug!("Text hit the {}px floor; re-wrapped into {} lines", size, lines.len());
        self.layout(lines, size, width)
    }

    /// Fit and draw a text block; returns the y coordinate just below it
    pub fn layout_text(&self, canvas: &mut Canvas, block: &TextBlock<'_>) -> i32 {
        let layout = self.fit(block.text, block.family, block.max_font_size, block.max_width);
        self.draw_layout(canvas, &layout, block);
        block.anchor.1 + layout.height().ceil() as i32
    }

    /// Draw an already fitted layout
    pub fn draw_layout(&self, canvas: &mut Canvas, layout: &TextLayout, block: &TextBlock<'_>) {
        let face = self.typeface(block.family);
        let (anchor_x, anchor_y) = block.anchor;
        let shadow_offset = (layout.font_size / 20.0).max(2.0);

        for (index, line) in layout.lines.iter().enumerate() {
            let line_width = face.measure(line, layout.font_size);
            let x = match block.align {
                Align::Center => anchor_x as f32 - line_width / 2.0,
                Align::Left => anchor_x as f32,
            };
            let y = anchor_y as f32 + index as f32 * layout.line_height;

            if block.shadow {
                face.draw(canvas, line, x + shadow_offset * 2.0, y + shadow_offset * 2.0, layout.font_size, Color::BLACK, 0.2);
                face.draw(canvas, line, x + shadow_offset, y + shadow_offset, layout.font_size, Color::BLACK, 0.45);
            }
            face.draw(canvas, line, x, y, layout.font_size, block.color, 1.0);
        }
    }

    /// Measured width of one line
    pub fn measure(&self, text: &str, family: FontFamily, size: f32) -> f32 {
        self.typeface(family).measure(text, size)
    }

    fn layout(&self, lines: Vec<String>, font_size: f32, width: f32) -> TextLayout {
        TextLayout {
            font_size,
            line_height: font_size * self.config.line_height,
            lines,
            width,
        }
    }
}

fn load_family(configured: Option<&Path>, candidates: &[&str], label: &str) -> Typeface {
    let mut paths: Vec<PathBuf> = Vec::new();
    if let Some(path) = configured {
        paths.push(path.to_path_buf());
    }
    paths.extend(candidates.iter().map(PathBuf::from));

    for path in &paths {
        match Typeface::load(path) {
            Ok(face) => return face,
            Err(e) if configured == Some(path.as_path()) => warn!("Configured {} font unusable: {}", label, e),
            Err(_) => {}
        }
    }

    warn!("No {} font found, falling back to the built-in bitmap font", label);
    Typeface::builtin()
}

fn widest(face: &Typeface, lines: &[String], size: f32) -> f32 {
    lines.iter().map(|line| face.measure(line, size)).fold(0.0, f32::max)
}

/// Greedy word wrap on an approximate character budget
///
/// Words longer than the budget sit alone on their line.
fn wrap_by_chars(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Greedy word wrap on measured width, breaking words that cannot fit
///
/// A single glyph wider than `max_width` is dropped.
fn wrap_by_width(face: &Typeface, text: &str, size: f32, max_width: f32) -> Vec<String> {
    let fits = |candidate: &str| face.measure(candidate, size) <= max_width;
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() { word.to_string() } else { format!("{current} {word}") };
        if fits(&candidate) {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if fits(word) {
            current = word.to_string();
            continue;
        }

        for ch in word.chars() {
            let mut extended = current.clone();
            extended.push(ch);
            if fits(&extended) {
                current = extended;
            } else if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                if fits(&ch.to_string()) {
                    current.push(ch);
                }
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typesetter() -> Typesetter {
        Typesetter::builtin(&TypographyConfig::default())
    }

    #[test]
    fn test_short_text_keeps_max_size() {
        let layout = typesetter().fit("Hi", FontFamily::Display, 80.0, 800);
        assert_eq!(layout.font_size, 80.0);
        assert_eq!(layout.lines, vec!["Hi"]);
    }

    #[test]
    fn test_long_title_wraps_and_fits() {
        let title = "THE GENIUS WAVE: HOW TO AWAKEN YOUR BRAIN PERFORMANCE IN 7 MINUTES";
        let layout = typesetter().fit(title, FontFamily::Display, 90.0, 800);

        assert!(layout.lines.len() > 1);
        assert!(layout.width <= 800.0);
        assert_eq!(layout.lines.join(" "), title);
    }

    #[test]
    fn test_width_invariant_at_floor() {
        let ts = typesetter();
        let cases = [
            ("Supercalifragilisticexpialidocious", 120),
            ("A B C", 5),
            ("MMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMM", 300),
            ("mixed sizes of words and AVERYVERYLONGTOKENTHATNEVERENDS here", 150),
            ("", 100),
        ];

        for (text, max_width) in cases {
            let layout = ts.fit(text, FontFamily::Display, 72.0, max_width);
            for line in &layout.lines {
                let width = ts.measure(line, FontFamily::Display, layout.font_size);
                assert!(width <= max_width as f32, "{line:?} is {width}px > {max_width}px");
            }
            assert!(layout.font_size >= TypographyConfig::default().min_font_size);
        }
    }

    #[test]
    fn test_shrinks_before_hitting_floor() {
        let layout = typesetter().fit("Twelve chars", FontFamily::Display, 120.0, 500);
        assert!(layout.font_size < 120.0);
        assert!(layout.font_size > TypographyConfig::default().min_font_size);
        assert!(layout.width <= 500.0);
    }

    #[test]
    fn test_layout_returns_offset_below_block() {
        let ts = typesetter();
        let mut canvas = Canvas::new_filled(1000, 600, Color::BLACK);
        let block = TextBlock::centered("Two words", (500, 100), 60.0, 900, Color::WHITE).shadow(true);

        let layout = ts.fit(block.text, block.family, block.max_font_size, block.max_width);
        let next = ts.layout_text(&mut canvas, &block);

        assert_eq!(next, 100 + layout.height().ceil() as i32);
        assert!(next > 100);
        // Nothing drawn above the anchor
        assert!((0..canvas.width()).all(|x| canvas.get_pixel(x, 99) == Color::BLACK));
    }

    #[test]
    fn test_left_alignment_starts_at_anchor() {
        let ts = typesetter();
        let mut canvas = Canvas::new_filled(400, 100, Color::BLACK);
        let block = TextBlock::centered("LEFT", (40, 10), 40.0, 300, Color::WHITE).align(Align::Left);
        ts.layout_text(&mut canvas, &block);

        assert!((0..100).all(|y| (0..40).all(|x| canvas.get_pixel(x, y) == Color::BLACK)));
        assert!((0..100).any(|y| canvas.get_pixel(40, y) == Color::WHITE));
    }

    #[test]
    fn test_wrap_by_chars() {
        assert_eq!(wrap_by_chars("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap_by_chars("  spaced   out  ", 100), vec!["spaced out"]);
        assert!(wrap_by_chars("", 10).is_empty());
    }

    #[test]
    fn test_missing_configured_font_falls_back() {
        let config = TypographyConfig {
            display_font: Some(PathBuf::from("/no/such/font.ttf")),
            ..Default::default()
        };
        // Renders with whatever is available, never panics
        let ts = Typesetter::load(&config);
        assert!(ts.measure("abc", FontFamily::Display, 20.0) > 0.0);
    }
}
