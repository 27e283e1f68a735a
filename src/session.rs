// src/session.rs
// Text session: owns parameters and font state, drives layout and glyph builds into a host sink
// Exists to apply parameter edits once and hand finished glyph meshes to whatever hosts them
// RELEVANT FILES:src/layout/mod.rs,src/glyph/builder.rs,src/params/mod.rs,src/font/mod.rs

use crate::error::{TextMeshError, TextMeshResult};
use crate::font::{FontState, GlyphFont};
use crate::geometry::MeshAttributes;
use crate::glyph::GlyphBuilder;
use crate::layout::{GlyphPlacement, Layouter};
use crate::params::{classify_change, ParameterChange, TextParameters};

/// Receives finished glyphs; implemented by whatever instantiates them.
pub trait GlyphSink {
    /// Called once before a rebuild delivers glyphs.
    fn begin(&mut self) {}

    /// Mesh is already scaled by the layout size.
    fn place_glyph(&mut self, placement: &GlyphPlacement, mesh: &MeshAttributes);
}

/// Sink that keeps everything it is given.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub glyphs: Vec<(GlyphPlacement, MeshAttributes)>,
    pub rebuilds: usize,
}

impl GlyphSink for CollectingSink {
    fn begin(&mut self) {
        self.glyphs.clear();
        self.rebuilds += 1;
    }

    fn place_glyph(&mut self, placement: &GlyphPlacement, mesh: &MeshAttributes) {
        self.glyphs.push((*placement, mesh.clone()));
    }
}

/// Outcome of one rebuild.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BuildReport {
    pub placed: usize,
    /// Characters the font could not provide; they were skipped.
    pub missing: Vec<char>,
}

pub struct TextSession<F> {
    params: TextParameters,
    font: FontState<F>,
}

impl<F: GlyphFont> TextSession<F> {
    pub fn new(params: TextParameters, font: FontState<F>) -> TextMeshResult<Self> {
        Ok(Self {
            params: params.validated()?,
            font,
        })
    }

    pub fn params(&self) -> &TextParameters {
        &self.params
    }

    pub fn font_state(&self) -> &FontState<F> {
        &self.font
    }

    /// Swap the font; cached glyphs belong to the old handle and go with it.
    pub fn set_font(&mut self, font: FontState<F>) {
        self.font = font;
    }

    /// Lay out the text and deliver every buildable glyph to `sink`.
    pub fn build<S: GlyphSink + ?Sized>(&self, sink: &mut S) -> TextMeshResult<BuildReport> {
        let handle = match &self.font {
            FontState::Ready(handle) => handle,
            FontState::Unavailable(reason) => {
                log::warn!("Skipping text build, font unavailable: {}", reason);
                return Err(TextMeshError::font_unavailable(reason));
            }
        };

        let layout = &self.params.layout;
        let placements =
            Layouter::new(layout, self.params.mesh.depth).layout(&self.params.text, handle.font());
        let builder = GlyphBuilder::new(&self.params.mesh, handle);

        sink.begin();
        let mut report = BuildReport::default();
        for placement in &placements {
            match builder.build_glyph(placement.character)? {
                Some(mesh) => {
                    sink.place_glyph(placement, &mesh.scaled(layout.size));
                    report.placed += 1;
                }
                None => {
                    let missing = TextMeshError::MissingGlyph(placement.character);
                    log::warn!("{} ({}), skipping", missing, missing.category());
                    report.missing.push(placement.character);
                }
            }
        }

        log::info!(
            "Built {} glyphs for {:?} ({} missing, {} cached)",
            report.placed,
            self.params.text,
            report.missing.len(),
            handle.cached_glyph_count()
        );
        Ok(report)
    }

    /// Apply an edit, rebuilding only when something changed.
    pub fn update<S: GlyphSink + ?Sized>(
        &mut self,
        params: TextParameters,
        sink: &mut S,
    ) -> TextMeshResult<ParameterChange> {
        let params = params.validated()?;
        let change = classify_change(&self.params, &params);
        if change == ParameterChange::FullRebuild && self.params.mesh.invalidates_cache(&params.mesh)
        {
            if let Some(handle) = self.font.handle() {
                handle.clear_cache();
            }
        }
        self.params = params;
        if change != ParameterChange::NoChange {
            self.build(sink)?;
        }
        Ok(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{InlineFont, PathCommand};

    fn unit_square() -> Vec<PathCommand> {
        vec![
            PathCommand::MoveTo(0.0, 0.0),
            PathCommand::LineTo(0.0, 1.0),
            PathCommand::LineTo(1.0, 1.0),
            PathCommand::LineTo(1.0, 0.0),
            PathCommand::Close,
        ]
    }

    fn font() -> FontState<InlineFont> {
        FontState::ready(
            InlineFont::new(800.0, -200.0)
                .with_glyph('a', 1.0, unit_square())
                .with_advance(' ', 0.5),
        )
    }

    #[test]
    fn unavailable_font_does_no_work() {
        let session =
            TextSession::<InlineFont>::new(TextParameters::new("a"), FontState::unavailable("404"))
                .unwrap();
        let mut sink = CollectingSink::default();
        let err = session.build(&mut sink).unwrap_err();
        assert!(matches!(err, TextMeshError::FontUnavailable(_)));
        assert_eq!(sink.rebuilds, 0);
    }

    #[test]
    fn missing_glyphs_are_reported_and_skipped() {
        let session = TextSession::new(TextParameters::new("a?a"), font()).unwrap();
        let mut sink = CollectingSink::default();
        let report = session.build(&mut sink).unwrap();
        assert_eq!(report.placed, 2);
        assert_eq!(report.missing, vec!['?']);
        assert_eq!(sink.glyphs.len(), 2);
        assert_eq!(sink.glyphs[1].0.slot, 2);
    }

    #[test]
    fn meshes_are_scaled_by_size() {
        let mut params = TextParameters::new("a");
        params.layout.size = 3.0;
        let session = TextSession::new(params, font()).unwrap();
        let mut sink = CollectingSink::default();
        session.build(&mut sink).unwrap();
        let mesh = &sink.glyphs[0].1;
        let max_x = mesh.positions.iter().map(|p| p.x).fold(f32::MIN, f32::max);
        assert!((max_x - 3.0).abs() < 1e-5);
    }

    #[test]
    fn update_rebuilds_only_on_change() {
        let params = TextParameters::new("aa");
        let mut session = TextSession::new(params.clone(), font()).unwrap();
        let mut sink = CollectingSink::default();
        session.build(&mut sink).unwrap();

        assert_eq!(
            session.update(params.clone(), &mut sink).unwrap(),
            ParameterChange::NoChange
        );
        assert_eq!(sink.rebuilds, 1);

        let mut moved = params.clone();
        moved.layout.glyph_spacing = 0.5;
        assert_eq!(
            session.update(moved.clone(), &mut sink).unwrap(),
            ParameterChange::RelayoutOnly
        );
        assert_eq!(sink.rebuilds, 2);
        let handle = session.font_state().handle().unwrap();
        assert_eq!(handle.cached_glyph_count(), 1);

        let mut deeper = moved;
        deeper.mesh.depth = 0.4;
        assert_eq!(
            session.update(deeper, &mut sink).unwrap(),
            ParameterChange::FullRebuild
        );
        assert_eq!(sink.rebuilds, 3);
        assert_eq!(sink.glyphs[0].1.submesh_count(), 3);
    }

    #[test]
    fn invalid_update_leaves_session_untouched() {
        let mut session = TextSession::new(TextParameters::new("a"), font()).unwrap();
        let mut bad = TextParameters::new("a");
        bad.mesh.resolution = f32::NAN;
        let mut sink = CollectingSink::default();
        assert!(session.update(bad, &mut sink).is_err());
        assert_eq!(session.params().mesh.resolution, 0.01);
    }
}
