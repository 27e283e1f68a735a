// src/layout/metrics.rs
// Line measurement in layout units
// RELEVANT FILES:src/layout/mod.rs,src/font/mod.rs

use crate::font::GlyphFont;
use crate::params::LayoutParameters;

/// Font metrics already multiplied by font scale and text size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaledMetrics {
    /// Font units to layout units.
    pub scale: f32,
    pub ascender: f32,
    pub line_height: f32,
}

impl ScaledMetrics {
    pub fn new<F: GlyphFont + ?Sized>(font: &F, size: f32) -> Self {
        let scale = font.scale_to_pixel_offset() * size;
        Self {
            scale,
            ascender: font.ascender() * scale,
            line_height: (font.ascender() - font.descender()) * scale,
        }
    }
}

/// Extent of one line along and across its writing direction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LineMetrics {
    pub width: f32,
    pub height: f32,
    /// Spaces strictly between the first and last visible glyph.
    pub interior_spaces: usize,
    /// Index of the first visible glyph, if any.
    pub first_visible: Option<usize>,
    /// Index of the last visible glyph, if any.
    pub last_visible: Option<usize>,
}

impl LineMetrics {
    pub fn is_interior(&self, index: usize) -> bool {
        match (self.first_visible, self.last_visible) {
            (Some(first), Some(last)) => index > first && index < last,
            _ => false,
        }
    }
}

pub fn is_visible(ch: char) -> bool {
    !ch.is_whitespace() && !ch.is_control()
}

pub fn measure_line<F: GlyphFont + ?Sized>(
    line: &[char],
    font: &F,
    metrics: &ScaledMetrics,
    params: &LayoutParameters,
) -> LineMetrics {
    let first_visible = line.iter().position(|&c| is_visible(c));
    let last_visible = line.iter().rposition(|&c| is_visible(c));
    let mut out = LineMetrics {
        first_visible,
        last_visible,
        ..LineMetrics::default()
    };
    let interior_spaces = line
        .iter()
        .enumerate()
        .filter(|&(i, &c)| c.is_whitespace() && out.is_interior(i))
        .count();
    out.interior_spaces = interior_spaces;

    if line.is_empty() {
        return out;
    }

    let gaps = (line.len() - 1) as f32 * params.glyph_spacing;
    if params.horizontal {
        let advances: f32 = line.iter().map(|&c| font.advance(c)).sum();
        let kerning: f32 = line
            .windows(2)
            .map(|pair| font.kerning(pair[0], pair[1]))
            .sum();
        out.width = (advances + kerning) * metrics.scale + gaps;
        out.height = metrics.line_height;
    } else {
        out.width = metrics.ascender;
        out.height = line.len() as f32 * metrics.line_height + gaps;
    }
    out
}
