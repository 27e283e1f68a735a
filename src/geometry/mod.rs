// src/geometry/mod.rs
// Geometry module hub for outline flattening, tessellation and mesh containers
// Exists to centralize the planar stages every glyph build runs through
// RELEVANT FILES:src/geometry/bezier.rs,src/geometry/tessellator.rs,src/geometry/attributes.rs,src/geometry/mesh.rs

//! Planar glyph geometry: curves to polylines, polylines to triangles and
//! oriented contours, contours to per-corner bevel attributes.

pub mod attributes;
pub mod bezier;
pub mod contour;
pub mod mesh;
pub mod tangents;
pub mod tessellator;
mod validate;

pub use attributes::{
    compute_vertex_attributes, contour_vertex_attributes, ContourVertexAttribute, CornerKind,
};
pub use bezier::CubicBezier;
pub use contour::Contour;
pub use mesh::{GlyphVertex, MeshAttributes, SUBMESH_BEVEL, SUBMESH_FACES, SUBMESH_SIDES};
pub use tangents::generate_tangents;
pub use tessellator::{tessellate_commands, ContourTessellator, TessellatedOutline};
pub use validate::{validate_mesh, MeshStats, MeshValidationIssue, MeshValidationReport};
