//! Extruded, beveled 3D text meshes from vector glyph outlines.
//! Rust: glam 0.25, lyon 1.0, ttf-parser 0.20. Produces per-glyph submeshed buffers plus placements.
//!
//! The pipeline runs layout first, then builds one mesh per visible
//! character: outline flattening and non-zero tessellation for the face,
//! per-corner bevel attributes, a bevel strip in one of five styles, and
//! extruded sides. Front faces are cached per font handle.

pub mod bevel;
pub mod error;
pub mod font;
pub mod geometry;
pub mod glyph;
pub mod layout;
pub mod params;
pub mod session;

pub use bevel::{BevelBuilder, BevelStyle};
pub use error::{TextMeshError, TextMeshResult};
pub use font::{FontHandle, FontState, GlyphFont, InlineFont, PathCommand, TtfFont};
pub use geometry::{GlyphVertex, MeshAttributes, SUBMESH_BEVEL, SUBMESH_FACES, SUBMESH_SIDES};
pub use glyph::GlyphBuilder;
pub use layout::{GlyphPlacement, Layouter};
pub use params::{
    classify_change, Align, CircularBend, Curve, Keyframe, LayoutParameters, MeshParameters,
    ParameterChange, TextParameters,
};
pub use session::{BuildReport, CollectingSink, GlyphSink, TextSession};
