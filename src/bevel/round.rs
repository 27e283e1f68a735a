// src/bevel/round.rs
// Single-segment bevel smoothed from the face normal into the corner normal
// RELEVANT FILES:src/bevel/mod.rs,src/bevel/flat.rs

use glam::Vec3;
use std::f32::consts::SQRT_2;

use super::{emit_strips, BevelExtent};
use crate::geometry::{MeshAttributes, SUBMESH_BEVEL};

#[derive(Clone, Debug, PartialEq)]
pub struct RoundBevel {
    extent: BevelExtent,
}

impl RoundBevel {
    pub(crate) fn new(extent: BevelExtent) -> Self {
        Self { extent }
    }

    pub fn add_front_faces(&self, mesh: &mut MeshAttributes) {
        let e = self.extent;
        if e.is_empty() {
            return;
        }
        emit_strips(mesh, SUBMESH_BEVEL, false, |attr| {
            let outer = attr.bevel_position(e.bevel);
            [
                (
                    attr.position,
                    Vec3::NEG_Z,
                    e.strip_uv(attr.position, 0.0, attr.v_contour),
                ),
                (
                    outer,
                    attr.normal,
                    e.strip_uv(outer, SQRT_2 * e.bevel, attr.v_bevel),
                ),
            ]
        });
    }

    pub fn add_back_faces(&self, mesh: &mut MeshAttributes) {
        let e = self.extent;
        if e.is_empty() {
            return;
        }
        let back = e.back_offset();
        emit_strips(mesh, SUBMESH_BEVEL, true, |attr| {
            let outer = attr.bevel_position(e.bevel);
            [
                (
                    attr.position + back,
                    Vec3::Z,
                    e.strip_uv(attr.position, 0.0, attr.v_contour),
                ),
                (
                    outer + Vec3::Z * e.depth,
                    attr.normal,
                    e.strip_uv(outer, SQRT_2 * e.bevel, attr.v_bevel),
                ),
            ]
        });
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::bevel::{BevelBuilder, BevelStyle};

    #[test]
    fn front_strip_has_two_rows_per_attribute() {
        let mut mesh = square_mesh(0.1);
        let attrs = mesh.vertex_attributes[0].len();
        BevelBuilder::new(BevelStyle::Round, &params(0.1, 0.0)).add_front_faces(&mut mesh);
        assert_eq!(mesh.vertex_count(), attrs * 2);
        assert_eq!(mesh.submesh(SUBMESH_BEVEL).len(), (attrs - 1) * 6);
        assert_eq!(mesh.normals[0], Vec3::NEG_Z);
        assert!((mesh.positions[1].z - 0.1).abs() < 1e-6);
        assert_outward(&mesh);
    }

    #[test]
    fn back_strip_sits_behind_the_extrusion() {
        let mut mesh = square_mesh(0.1);
        let builder = BevelBuilder::new(BevelStyle::Round, &params(0.1, 0.5));
        builder.add_front_faces(&mut mesh);
        let front_vertices = mesh.vertex_count();
        builder.add_back_faces(&mut mesh);
        assert_eq!(mesh.vertex_count(), front_vertices * 2);
        // back rim at depth + 2 * bevel, inner row at bevel + depth
        assert!((mesh.positions[front_vertices].z - 0.7).abs() < 1e-6);
        assert!((mesh.positions[front_vertices + 1].z - 0.6).abs() < 1e-6);
        assert_eq!(mesh.normals[front_vertices], Vec3::Z);
        assert_outward(&mesh);
    }

    #[test]
    fn side_uvs_follow_contour_length() {
        let mut mesh = square_mesh(0.1);
        BevelBuilder::new(BevelStyle::Round, &params(0.1, 0.0)).add_front_faces(&mut mesh);
        // attribute 4 is the first vertex of corner 1, one unit along the contour
        assert!((mesh.uvs[8].y - 1.0).abs() < 1e-6);
        assert!((mesh.uvs[9].x - SQRT_2 * 0.1).abs() < 1e-6);
    }

    #[test]
    fn face_uvs_use_positions() {
        let mut mesh = square_mesh(0.1);
        let params = params(0.1, 0.0).with_face_uvs(true);
        BevelBuilder::new(BevelStyle::Round, &params).add_front_faces(&mut mesh);
        for (p, uv) in mesh.positions.iter().zip(&mesh.uvs) {
            assert_eq!(p.truncate(), *uv);
        }
    }
}
