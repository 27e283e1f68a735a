// src/bevel/chiseled.rs
// Concave quarter-arc bevel carved into the glyph edge
// RELEVANT FILES:src/bevel/profile.rs,src/bevel/mod.rs

use std::f32::consts::FRAC_PI_2;

use super::{BevelExtent, ProfileBevel};
use crate::geometry::MeshAttributes;
use crate::params::Keyframe;

/// Arc segments across the bevel.
const ARC_SEGMENTS: usize = 4;

/// Quarter circle centred on the outer corner of the bevel box, so the cut
/// leaves the face perpendicular and meets the side wall flush.
#[derive(Clone, Debug, PartialEq)]
pub struct ChiseledBevel {
    profile: ProfileBevel,
}

fn arc_keys() -> Vec<Keyframe> {
    (0..=ARC_SEGMENTS)
        .map(|i| {
            let theta = i as f32 / ARC_SEGMENTS as f32 * FRAC_PI_2;
            Keyframe::new(theta.sin(), 1.0 - theta.cos())
        })
        .collect()
}

impl ChiseledBevel {
    pub(crate) fn new(extent: BevelExtent) -> Self {
        Self {
            profile: ProfileBevel::with_keys(extent, arc_keys()),
        }
    }

    pub fn keys(&self) -> &[Keyframe] {
        self.profile.keys()
    }

    pub fn add_front_faces(&self, mesh: &mut MeshAttributes) {
        self.profile.add_front_faces(mesh);
    }

    pub fn add_back_faces(&self, mesh: &mut MeshAttributes) {
        self.profile.add_back_faces(mesh);
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::bevel::{BevelBuilder, BevelStyle};
    use crate::geometry::SUBMESH_BEVEL;

    #[test]
    fn arc_runs_from_face_to_side() {
        let keys = arc_keys();
        assert_eq!(keys.len(), ARC_SEGMENTS + 1);
        assert_eq!(keys[0], Keyframe::new(0.0, 0.0));
        let last = keys[ARC_SEGMENTS];
        assert!((last.time - 1.0).abs() < 1e-6 && (last.value - 1.0).abs() < 1e-6);
        // concave: the cut first goes deep, then out
        assert!(keys[1].time > keys[1].value);
    }

    #[test]
    fn builds_outward_strips() {
        let params = params(0.1, 0.3).with_bevel(0.1, BevelStyle::Chiseled);
        let builder = BevelBuilder::from_params(&params);
        let mut mesh = square_mesh(0.1);
        let attrs = mesh.vertex_attributes[0].len();
        builder.add_front_faces(&mut mesh);
        builder.add_back_faces(&mut mesh);
        assert_eq!(
            mesh.submesh(SUBMESH_BEVEL).len(),
            2 * ARC_SEGMENTS * (attrs - 1) * 6
        );
        assert_outward(&mesh);
    }
}
