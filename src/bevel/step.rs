// src/bevel/step.rs
// Staircase bevel with alternating treads and risers
// RELEVANT FILES:src/bevel/profile.rs,src/bevel/mod.rs

use super::{BevelExtent, ProfileBevel};
use crate::geometry::MeshAttributes;
use crate::params::Keyframe;

const STEP_COUNT: usize = 3;

/// Treads face the viewer and risers face the corner normal.
#[derive(Clone, Debug, PartialEq)]
pub struct StepBevel {
    profile: ProfileBevel,
}

fn stair_keys() -> Vec<Keyframe> {
    let step = 1.0 / STEP_COUNT as f32;
    let mut keys = vec![Keyframe::new(0.0, 0.0)];
    for i in 0..STEP_COUNT {
        let lo = i as f32 * step;
        let hi = (i + 1) as f32 * step;
        keys.push(Keyframe::new(lo, hi));
        keys.push(Keyframe::new(hi, hi));
    }
    keys
}

impl StepBevel {
    pub(crate) fn new(extent: BevelExtent) -> Self {
        Self {
            profile: ProfileBevel::with_keys(extent, stair_keys()),
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
    use glam::Vec3;

    #[test]
    fn stairs_alternate_tread_and_riser() {
        let keys = stair_keys();
        assert_eq!(keys.len(), 2 * STEP_COUNT + 1);
        for (i, pair) in keys.windows(2).enumerate() {
            let tread = pair[0].time == pair[1].time;
            let riser = pair[0].value == pair[1].value;
            assert!(tread != riser, "segment {i} is diagonal");
            assert_eq!(tread, i % 2 == 0);
        }
    }

    #[test]
    fn treads_face_the_viewer() {
        let params = params(0.3, 0.3).with_bevel(0.3, BevelStyle::Step);
        let builder = BevelBuilder::from_params(&params);
        let mut mesh = square_mesh(0.3);
        builder.add_front_faces(&mut mesh);
        // the first strip is a tread
        assert!((mesh.normals[0] - Vec3::NEG_Z).length() < 1e-6);
        builder.add_back_faces(&mut mesh);
        assert_outward(&mesh);
    }
}
