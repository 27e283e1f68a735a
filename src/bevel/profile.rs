// src/bevel/profile.rs
// Multi-segment bevel following a keyframed cross-section
// Exists to back user profiles and the built-in chiseled and stepped shapes
// RELEVANT FILES:src/bevel/mod.rs,src/bevel/chiseled.rs,src/bevel/step.rs,src/params/curve.rs

use glam::Vec3;

use super::{emit_strips, BevelExtent};
use crate::geometry::{ContourVertexAttribute, MeshAttributes, SUBMESH_BEVEL};
use crate::params::{Curve, Keyframe};

/// Cross-section as `(time, value)` keys: time runs along the extrusion
/// axis, value outward along the bevel direction, both in bevel units.
#[derive(Clone, Debug, PartialEq)]
pub struct ProfileBevel {
    extent: BevelExtent,
    keys: Vec<Keyframe>,
}

impl ProfileBevel {
    /// Keys from a user curve; fewer than two keys yields the straight
    /// `(0,0)`, `(bevel,bevel)` profile.
    pub(crate) fn from_curve(extent: BevelExtent, curve: &Curve) -> Self {
        let keys = if curve.len() < 2 {
            vec![
                Keyframe::new(0.0, 0.0),
                Keyframe::new(extent.bevel, extent.bevel),
            ]
        } else {
            curve.keys().to_vec()
        };
        Self::with_keys(extent, keys)
    }

    pub(crate) fn with_keys(extent: BevelExtent, keys: Vec<Keyframe>) -> Self {
        Self { extent, keys }
    }

    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    pub fn add_front_faces(&self, mesh: &mut MeshAttributes) {
        self.emit(mesh, false);
    }

    pub fn add_back_faces(&self, mesh: &mut MeshAttributes) {
        self.emit(mesh, true);
    }

    fn emit(&self, mesh: &mut MeshAttributes, back: bool) {
        let e = self.extent;
        if e.is_empty() {
            return;
        }

        let (origin, z_axis) = if back {
            (e.back_offset(), -1.0)
        } else {
            (Vec3::ZERO, 1.0)
        };

        let mut u = 0.0f32;
        for window in self.keys.windows(2) {
            let (k0, k1) = (window[0], window[1]);
            let dt = k1.time - k0.time;
            let dv = k1.value - k0.value;
            let (u0, u1) = (u, u + (dt * dt + dv * dv).sqrt() * e.bevel);
            u = u1;

            let place = |attr: &ContourVertexAttribute, key: Keyframe| {
                let target = (attr.bevel_direction * e.bevel).truncate().extend(0.0);
                attr.position + origin + Vec3::Z * (z_axis * key.time * e.bevel) + target * key.value
            };
            let v_at = |attr: &ContourVertexAttribute, key: Keyframe| {
                attr.v_contour + (attr.v_bevel - attr.v_contour) * key.value
            };

            emit_strips(mesh, SUBMESH_BEVEL, back, |attr| {
                let n = attr.normal;
                let normal = Vec3::new(n.x * dt, n.y * dt, -z_axis * dv).normalize_or_zero();
                let p0 = place(attr, k0);
                let p1 = place(attr, k1);
                [
                    (p0, normal, e.strip_uv(p0, u0, v_at(attr, k0))),
                    (p1, normal, e.strip_uv(p1, u1, v_at(attr, k1))),
                ]
            });
        }
    }
}
