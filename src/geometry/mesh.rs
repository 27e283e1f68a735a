// src/geometry/mesh.rs
// Multi-submesh glyph mesh container and GPU-ready vertex export
// Exists to carry positions, normals, UVs and contour attributes between build stages
// RELEVANT FILES:src/geometry/validate.rs,src/bevel/mod.rs,src/glyph/builder.rs

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3, Vec4};

use super::attributes::ContourVertexAttribute;

/// Front and back faces.
pub const SUBMESH_FACES: usize = 0;
/// Bevel strips.
pub const SUBMESH_BEVEL: usize = 1;
/// Extruded side walls.
pub const SUBMESH_SIDES: usize = 2;

/// Interleaved vertex layout for upload.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GlyphVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    /// Tangent with handedness in `w`; `[1, 0, 0, 1]` when none were generated.
    pub tangent: [f32; 4],
}

/// Geometry of a single glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshAttributes {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    /// Empty unless tangent generation was requested.
    pub tangents: Vec<Vec4>,
    /// Triangle index lists, one per submesh.
    pub submeshes: Vec<Vec<u32>>,
    /// Per-contour corner attributes used by bevel and side construction.
    pub vertex_attributes: Vec<Vec<ContourVertexAttribute>>,
}

impl Default for MeshAttributes {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshAttributes {
    /// Empty mesh with the face submesh in place.
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            uvs: Vec::new(),
            tangents: Vec::new(),
            submeshes: vec![Vec::new()],
            vertex_attributes: Vec::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.submeshes.iter().map(|s| s.len() / 3).sum()
    }

    pub fn submesh_count(&self) -> usize {
        self.submeshes.len()
    }

    pub fn submesh(&self, index: usize) -> &[u32] {
        self.submeshes.get(index).map_or(&[][..], |s| s.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() || self.submeshes.iter().all(|s| s.is_empty())
    }

    /// Index the next pushed vertex will get.
    pub fn next_index(&self) -> u32 {
        self.positions.len() as u32
    }

    pub fn push_vertex(&mut self, position: Vec3, normal: Vec3, uv: Vec2) {
        self.positions.push(position);
        self.normals.push(normal);
        self.uvs.push(uv);
    }

    /// Grow the submesh list so `index` exists and return it.
    pub fn submesh_mut(&mut self, index: usize) -> &mut Vec<u32> {
        if self.submeshes.len() <= index {
            self.submeshes.resize_with(index + 1, Vec::new);
        }
        &mut self.submeshes[index]
    }

    /// Copy with positions and UVs multiplied by `scale`.
    ///
    /// UVs scale with the positions, so tangent directions are unchanged; a
    /// negative scale mirrors the frame and flips their handedness.
    pub fn scaled(&self, scale: f32) -> Self {
        let mut out = self.clone();
        out.positions.iter_mut().for_each(|p| *p *= scale);
        out.uvs.iter_mut().for_each(|uv| *uv *= scale);
        if scale < 0.0 {
            out.tangents.iter_mut().for_each(|t| t.w = -t.w);
        }
        out
    }

    /// Interleave positions, normals, UVs and tangents for upload.
    pub fn interleaved(&self) -> Vec<GlyphVertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .zip(&self.uvs)
            .enumerate()
            .map(|(i, ((p, n), uv))| GlyphVertex {
                position: p.to_array(),
                normal: n.to_array(),
                uv: uv.to_array(),
                tangent: self
                    .tangents
                    .get(i)
                    .map_or([1.0, 0.0, 0.0, 1.0], |t| t.to_array()),
            })
            .collect()
    }

    /// All submeshes concatenated, for hosts without submesh support.
    pub fn flattened_indices(&self) -> Vec<u32> {
        self.submeshes.iter().flatten().copied().collect()
    }
}

/// Append the two-triangle quads joining consecutive vertex pairs of a strip.
///
/// The strip is `count` pairs laid out as `(row0, row1)` starting at
/// `offset`. Front winding is `(0,1,2),(2,1,3)`; back reverses it.
pub(crate) fn append_strip(indices: &mut Vec<u32>, offset: u32, count: usize, back: bool) {
    let span = (count * 2).saturating_sub(2) as u32;
    for i in (0..span).step_by(2) {
        let o = offset + i;
        if back {
            indices.extend_from_slice(&[o + 3, o + 1, o + 2, o + 2, o + 1, o]);
        } else {
            indices.extend_from_slice(&[o, o + 1, o + 2, o + 2, o + 1, o + 3]);
        }
    }
}
