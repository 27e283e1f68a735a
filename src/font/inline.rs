// src/font/inline.rs
// In-memory glyph table implementing the font capability
// Exists for hosts that generate outlines themselves and for deterministic tests
// RELEVANT FILES:src/font/mod.rs,tests/test_layout_scenarios.rs

use std::collections::HashMap;

use super::{GlyphFont, PathCommand, PIXEL_SCALE};

#[derive(Clone, Debug, Default)]
struct InlineGlyph {
    advance: f32,
    outline: Vec<PathCommand>,
}

/// Font whose metrics and outlines are supplied directly.
///
/// Outlines are given in font units and scaled on the way out, like a parsed
/// font would be.
#[derive(Clone, Debug)]
pub struct InlineFont {
    ascender: f32,
    descender: f32,
    scale: f32,
    glyphs: HashMap<char, InlineGlyph>,
    kerning: HashMap<(char, char), f32>,
}

impl InlineFont {
    /// Empty font with unit scale.
    pub fn new(ascender: f32, descender: f32) -> Self {
        Self {
            ascender,
            descender,
            scale: 1.0,
            glyphs: HashMap::new(),
            kerning: HashMap::new(),
        }
    }

    /// Use the scale a parsed font with `units_per_em` would get.
    pub fn with_units_per_em(mut self, units_per_em: u16) -> Self {
        self.scale = PIXEL_SCALE / f32::from(units_per_em.max(1));
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_glyph(mut self, ch: char, advance: f32, outline: Vec<PathCommand>) -> Self {
        self.glyphs.insert(ch, InlineGlyph { advance, outline });
        self
    }

    /// Glyph with an advance but nothing to draw, such as a space.
    pub fn with_advance(self, ch: char, advance: f32) -> Self {
        self.with_glyph(ch, advance, Vec::new())
    }

    pub fn with_kerning(mut self, left: char, right: char, amount: f32) -> Self {
        self.kerning.insert((left, right), amount);
        self
    }

    pub fn contains(&self, ch: char) -> bool {
        self.glyphs.contains_key(&ch)
    }
}

impl GlyphFont for InlineFont {
    fn advance(&self, ch: char) -> f32 {
        self.glyphs.get(&ch).map_or(0.0, |g| g.advance)
    }

    fn kerning(&self, left: char, right: char) -> f32 {
        self.kerning.get(&(left, right)).copied().unwrap_or(0.0)
    }

    fn ascender(&self) -> f32 {
        self.ascender
    }

    fn descender(&self) -> f32 {
        self.descender
    }

    fn outline(&self, ch: char) -> Option<Vec<PathCommand>> {
        let scale = self.scale;
        self.glyphs
            .get(&ch)
            .map(|g| g.outline.iter().map(|c| c.scaled(scale)).collect())
    }

    fn scale_to_pixel_offset(&self) -> f32 {
        self.scale
    }
}
