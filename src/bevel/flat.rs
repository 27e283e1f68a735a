// src/bevel/flat.rs
// Single-segment bevel lit as one planar facet per edge
// RELEVANT FILES:src/bevel/mod.rs,src/bevel/round.rs

use glam::Vec3;
use std::f32::consts::SQRT_2;

use super::{emit_strips, BevelExtent};
use crate::geometry::{ContourVertexAttribute, MeshAttributes, SUBMESH_BEVEL};

#[derive(Clone, Debug, PartialEq)]
pub struct FlatBevel {
    extent: BevelExtent,
}

/// 45 degree facet normal; `z_sign` is -1 at the front, +1 at the back.
fn facet_normal(attr: &ContourVertexAttribute, z_sign: f32) -> Vec3 {
    Vec3::new(attr.normal.x, attr.normal.y, z_sign).normalize_or_zero()
}

impl FlatBevel {
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
            let normal = facet_normal(attr, -1.0);
            [
                (
                    attr.position,
                    normal,
                    e.strip_uv(attr.position, 0.0, attr.v_contour),
                ),
                (outer, normal, e.strip_uv(outer, SQRT_2 * e.bevel, attr.v_bevel)),
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
            let normal = facet_normal(attr, 1.0);
            [
                (
                    attr.position + back,
                    normal,
                    e.strip_uv(attr.position, 0.0, attr.v_contour),
                ),
                (
                    outer + Vec3::Z * e.depth,
                    normal,
                    e.strip_uv(outer, SQRT_2 * e.bevel, attr.v_bevel),
                ),
            ]
        });
    }
}
