// src/glyph/builder.rs
// Per-character mesh assembly: front face, back face, bevel and sides
// Exists to combine tessellation, corner attributes and bevel strategies into one glyph mesh
// RELEVANT FILES:src/geometry/tessellator.rs,src/bevel/mod.rs,src/font/mod.rs,src/session.rs

use glam::{Vec2, Vec3};

use crate::bevel::BevelBuilder;
use crate::error::TextMeshResult;
use crate::font::{CacheFingerprint, FontHandle, GlyphFont};
use crate::geometry::mesh::append_strip;
use crate::geometry::{
    compute_vertex_attributes, generate_tangents, ContourTessellator, MeshAttributes, SUBMESH_BEVEL, SUBMESH_FACES,
    SUBMESH_SIDES,
};
use crate::params::MeshParameters;

/// Builds glyph meshes for one font under one set of shape parameters.
pub struct GlyphBuilder<'a, F> {
    params: &'a MeshParameters,
    font: &'a FontHandle<F>,
    bevel: BevelBuilder,
    fingerprint: CacheFingerprint,
}

impl<'a, F: GlyphFont> GlyphBuilder<'a, F> {
    /// `params` should already be validated.
    pub fn new(params: &'a MeshParameters, font: &'a FontHandle<F>) -> Self {
        Self {
            params,
            font,
            bevel: BevelBuilder::from_params(params),
            fingerprint: CacheFingerprint::from_params(params),
        }
    }

    pub fn bevel(&self) -> &BevelBuilder {
        &self.bevel
    }

    /// Complete mesh for `ch`, or `None` when the font lacks the glyph.
    ///
    /// Front faces are cached per character; back face, bevel and sides are
    /// rebuilt on every call.
    pub fn build_glyph(&self, ch: char) -> TextMeshResult<Option<MeshAttributes>> {
        let mut mesh = match self.font.cached_glyph(ch, self.fingerprint) {
            Some(front) => {
                log::debug!("Glyph cache hit for {:?}", ch);
                front
            }
            None => match self.build_front_face(ch)? {
                Some(front) => {
                    self.font.store_glyph(ch, self.fingerprint, &front);
                    front
                }
                None => return Ok(None),
            },
        };
        self.finish(&mut mesh);
        Ok(Some(mesh))
    }

    /// Same as `build_glyph` without touching the cache.
    pub fn build_glyph_uncached(&self, ch: char) -> TextMeshResult<Option<MeshAttributes>> {
        let Some(mut mesh) = self.build_front_face(ch)? else {
            return Ok(None);
        };
        self.finish(&mut mesh);
        Ok(Some(mesh))
    }

    /// Tessellated front face with per-contour attributes.
    pub fn build_front_face(&self, ch: char) -> TextMeshResult<Option<MeshAttributes>> {
        let Some(commands) = self.font.font().outline(ch) else {
            log::warn!("Font does not contain a definition for {:?}", ch);
            return Ok(None);
        };

        let extrude = self.params.depth > 0.0 || self.params.bevel > 0.0;
        let mut tess = ContourTessellator::new(self.params.resolution, extrude);
        tess.begin_read(commands.len() / 4);
        tess.apply_commands(&commands);
        let outline = tess.end_read()?;

        let mut mesh = MeshAttributes::new();
        for &p in &outline.vertices {
            mesh.push_vertex(p, Vec3::NEG_Z, p.truncate());
        }
        mesh.submeshes[SUBMESH_FACES] = outline.indices;
        mesh.vertex_attributes = compute_vertex_attributes(&outline.contours, self.params.bevel);

        log::debug!(
            "Built front face for {:?}: {} vertices, {} triangles, {} contours",
            ch,
            mesh.vertex_count(),
            mesh.triangle_count(),
            mesh.vertex_attributes.len()
        );
        Ok(Some(mesh))
    }

    fn finish(&self, mesh: &mut MeshAttributes) {
        if self.params.has_backface {
            self.add_back_face(mesh);
        }
        if self.params.bevel > 0.0 {
            self.bevel.add_front_faces(mesh);
            if self.params.has_backface {
                self.bevel.add_back_faces(mesh);
            }
        }
        if self.params.depth > 0.0 {
            self.add_sides(mesh);
        }
        if self.params.generate_tangents {
            mesh.tangents = generate_tangents(mesh);
        }
    }

    /// Mirror the front face onto the back plane with flipped winding.
    fn add_back_face(&self, mesh: &mut MeshAttributes) {
        let offset = mesh.next_index();
        let back = Vec3::Z * (self.params.depth + 2.0 * self.params.bevel);
        let front_vertices = offset as usize;
        for i in 0..front_vertices {
            let p = mesh.positions[i];
            let uv = mesh.uvs[i];
            mesh.push_vertex(p + back, Vec3::Z, uv);
        }
        let faces = mesh.submesh_mut(SUBMESH_FACES);
        let reversed: Vec<u32> = faces
            .chunks_exact(3)
            .flat_map(|t| [t[2] + offset, t[1] + offset, t[0] + offset])
            .collect();
        faces.extend(reversed);
    }

    /// Side walls from the bevel rim, extruded by the depth.
    fn add_sides(&self, mesh: &mut MeshAttributes) {
        let (bevel, depth) = (self.params.bevel, self.params.depth);
        // keep sides at their index even without a bevel strip
        mesh.submesh_mut(SUBMESH_BEVEL);

        let contours = std::mem::take(&mut mesh.vertex_attributes);
        let mut indices = std::mem::take(mesh.submesh_mut(SUBMESH_SIDES));
        for attributes in &contours {
            let offset = mesh.next_index();
            for attr in attributes {
                let rim = attr.bevel_position(bevel);
                mesh.push_vertex(rim, attr.normal, Vec2::new(0.0, attr.v_bevel));
                mesh.push_vertex(
                    rim + Vec3::Z * depth,
                    attr.normal,
                    Vec2::new(depth, attr.v_bevel),
                );
            }
            append_strip(&mut indices, offset, attributes.len(), false);
        }
        *mesh.submesh_mut(SUBMESH_SIDES) = indices;
        mesh.vertex_attributes = contours;
    }
}
