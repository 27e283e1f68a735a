// src/font/ttf.rs
// TrueType/OpenType adapter over ttf-parser
// Exists so hosts holding font bytes get the glyph capability without a parser of their own
// RELEVANT FILES:src/font/mod.rs,src/font/inline.rs

use ttf_parser::{Face, GlyphId, OutlineBuilder};

use super::{GlyphFont, PathCommand, PIXEL_SCALE};
use crate::error::{TextMeshError, TextMeshResult};

struct CommandSink {
    scale: f32,
    commands: Vec<PathCommand>,
}

impl OutlineBuilder for CommandSink {
    fn move_to(&mut self, x: f32, y: f32) {
        self.commands
            .push(PathCommand::MoveTo(x, y).scaled(self.scale));
    }
    fn line_to(&mut self, x: f32, y: f32) {
        self.commands
            .push(PathCommand::LineTo(x, y).scaled(self.scale));
    }
    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.commands
            .push(PathCommand::CurveQuadratic(x1, y1, x, y).scaled(self.scale));
    }
    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.commands
            .push(PathCommand::CurveCubic(x1, y1, x2, y2, x, y).scaled(self.scale));
    }
    fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }
}

/// Font capability backed by a parsed font face borrowing its bytes.
pub struct TtfFont<'a> {
    face: Face<'a>,
    scale: f32,
}

impl<'a> TtfFont<'a> {
    pub fn parse(data: &'a [u8], index: u32) -> TextMeshResult<Self> {
        let face = Face::parse(data, index)
            .map_err(|e| TextMeshError::font_unavailable(format!("invalid font data: {e}")))?;
        let scale = PIXEL_SCALE / f32::from(face.units_per_em().max(1));
        Ok(Self { face, scale })
    }

    pub fn face(&self) -> &Face<'a> {
        &self.face
    }

    fn glyph(&self, ch: char) -> Option<GlyphId> {
        self.face.glyph_index(ch).filter(|id| id.0 != 0)
    }
}

impl std::fmt::Debug for TtfFont<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtfFont")
            .field("glyphs", &self.face.number_of_glyphs())
            .field("scale", &self.scale)
            .finish()
    }
}

impl GlyphFont for TtfFont<'_> {
    fn advance(&self, ch: char) -> f32 {
        let id = self.face.glyph_index(ch).unwrap_or(GlyphId(0));
        f32::from(self.face.glyph_hor_advance(id).unwrap_or(0))
    }

    fn kerning(&self, left: char, right: char) -> f32 {
        let (Some(l), Some(r)) = (self.glyph(left), self.glyph(right)) else {
            return 0.0;
        };
        let Some(kern) = self.face.tables().kern else {
            return 0.0;
        };
        kern.subtables
            .into_iter()
            .filter(|st| st.horizontal && !st.variable)
            .find_map(|st| st.glyphs_kerning(l, r))
            .map_or(0.0, f32::from)
    }

    fn ascender(&self) -> f32 {
        f32::from(self.face.ascender())
    }

    fn descender(&self) -> f32 {
        f32::from(self.face.descender())
    }

    fn recommended_line_spacing(&self) -> f32 {
        f32::from(self.face.ascender()) - f32::from(self.face.descender())
            + f32::from(self.face.line_gap())
    }

    fn outline(&self, ch: char) -> Option<Vec<PathCommand>> {
        let id = self.glyph(ch)?;
        let mut sink = CommandSink {
            scale: self.scale,
            commands: Vec::new(),
        };
        // glyphs without contours, such as spaces, report no bounds
        let _ = self.face.outline_glyph(id, &mut sink);
        Some(sink.commands)
    }

    fn scale_to_pixel_offset(&self) -> f32 {
        self.scale
    }
}
