// src/font/mod.rs
// Font capability trait, outline commands and the cache-owning font handle
// Exists to decouple glyph geometry from how a host obtains font data
// RELEVANT FILES:src/font/cache.rs,src/font/inline.rs,src/font/ttf.rs,src/glyph/builder.rs

mod cache;
mod inline;
mod ttf;

pub use cache::{CacheFingerprint, GlyphCache};
pub use inline::InlineFont;
pub use ttf::TtfFont;

use std::sync::{Arc, Mutex, MutexGuard};

use crate::geometry::MeshAttributes;

/// Factor that brings font units to layout units for a typical face.
pub const PIXEL_SCALE: f32 = 1.333_333_3;

/// One outline drawing command in layout units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(f32, f32),
    LineTo(f32, f32),
    CurveQuadratic(f32, f32, f32, f32),
    CurveCubic(f32, f32, f32, f32, f32, f32),
    Close,
}

impl PathCommand {
    pub fn scaled(self, s: f32) -> Self {
        match self {
            PathCommand::MoveTo(x, y) => PathCommand::MoveTo(x * s, y * s),
            PathCommand::LineTo(x, y) => PathCommand::LineTo(x * s, y * s),
            PathCommand::CurveQuadratic(cx, cy, x, y) => {
                PathCommand::CurveQuadratic(cx * s, cy * s, x * s, y * s)
            }
            PathCommand::CurveCubic(c1x, c1y, c2x, c2y, x, y) => {
                PathCommand::CurveCubic(c1x * s, c1y * s, c2x * s, c2y * s, x * s, y * s)
            }
            PathCommand::Close => PathCommand::Close,
        }
    }
}

/// What glyph construction and layout need from a font.
///
/// Metrics are in font units; multiply by `scale_to_pixel_offset` to get
/// layout units. Outlines are returned already scaled.
pub trait GlyphFont {
    fn advance(&self, ch: char) -> f32;

    fn kerning(&self, left: char, right: char) -> f32;

    fn ascender(&self) -> f32;

    fn descender(&self) -> f32;

    fn recommended_line_spacing(&self) -> f32 {
        self.ascender() - self.descender()
    }

    /// Outline in layout units, or `None` when the font has no such glyph.
    fn outline(&self, ch: char) -> Option<Vec<PathCommand>>;

    fn scale_to_pixel_offset(&self) -> f32;
}

impl<T: GlyphFont + ?Sized> GlyphFont for Arc<T> {
    fn advance(&self, ch: char) -> f32 {
        (**self).advance(ch)
    }

    fn kerning(&self, left: char, right: char) -> f32 {
        (**self).kerning(left, right)
    }

    fn ascender(&self) -> f32 {
        (**self).ascender()
    }

    fn descender(&self) -> f32 {
        (**self).descender()
    }

    fn recommended_line_spacing(&self) -> f32 {
        (**self).recommended_line_spacing()
    }

    fn outline(&self, ch: char) -> Option<Vec<PathCommand>> {
        (**self).outline(ch)
    }

    fn scale_to_pixel_offset(&self) -> f32 {
        (**self).scale_to_pixel_offset()
    }
}

/// A font together with the front faces built from it.
#[derive(Debug)]
pub struct FontHandle<F> {
    font: F,
    cache: Mutex<GlyphCache>,
}

impl<F: GlyphFont> FontHandle<F> {
    pub fn new(font: F) -> Self {
        Self {
            font,
            cache: Mutex::new(GlyphCache::default()),
        }
    }

    pub fn font(&self) -> &F {
        &self.font
    }

    fn lock_cache(&self) -> MutexGuard<'_, GlyphCache> {
        // entries are inserted whole, so a poisoned cache is still consistent
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Cached front face for `ch` built under `fingerprint`.
    pub fn cached_glyph(&self, ch: char, fingerprint: CacheFingerprint) -> Option<MeshAttributes> {
        let mut cache = self.lock_cache();
        cache.sync_fingerprint(fingerprint);
        cache.get(ch).cloned()
    }

    pub fn store_glyph(&self, ch: char, fingerprint: CacheFingerprint, mesh: &MeshAttributes) {
        let mut cache = self.lock_cache();
        cache.sync_fingerprint(fingerprint);
        cache.insert(ch, mesh.clone());
    }

    pub fn clear_cache(&self) {
        self.lock_cache().clear();
    }

    pub fn cached_glyph_count(&self) -> usize {
        self.lock_cache().len()
    }
}

/// Font as handed to a session by whatever loaded it.
#[derive(Debug)]
pub enum FontState<F> {
    Ready(Arc<FontHandle<F>>),
    Unavailable(String),
}

impl<F: GlyphFont> FontState<F> {
    pub fn ready(font: F) -> Self {
        FontState::Ready(Arc::new(FontHandle::new(font)))
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        FontState::Unavailable(reason.into())
    }

    pub fn handle(&self) -> Option<&Arc<FontHandle<F>>> {
        match self {
            FontState::Ready(handle) => Some(handle),
            FontState::Unavailable(_) => None,
        }
    }
}

impl<F> Clone for FontState<F> {
    fn clone(&self) -> Self {
        match self {
            FontState::Ready(handle) => FontState::Ready(Arc::clone(handle)),
            FontState::Unavailable(reason) => FontState::Unavailable(reason.clone()),
        }
    }
}
