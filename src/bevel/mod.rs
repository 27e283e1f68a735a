// src/bevel/mod.rs
// Bevel style selection and strategy dispatch
// Exists to let glyph assembly swap bevel shapes without touching face or side construction
// RELEVANT FILES:src/bevel/round.rs,src/bevel/flat.rs,src/bevel/profile.rs,src/bevel/chiseled.rs,src/bevel/step.rs

//! Bevel builders append a strip per contour between the glyph face and the
//! side wall. Front strips start the bevel submesh; back strips mirror them
//! onto the back face with reversed winding.

mod chiseled;
mod flat;
mod profile;
mod round;
mod step;

pub use chiseled::ChiseledBevel;
pub use flat::FlatBevel;
pub use profile::ProfileBevel;
pub use round::RoundBevel;
pub use step::StepBevel;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TextMeshError;
use crate::geometry::{ContourVertexAttribute, MeshAttributes};
use crate::params::{normalize_key, MeshParameters};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BevelStyle {
    #[default]
    Round,
    Flat,
    Chiseled,
    Step,
    Profile,
}

impl BevelStyle {
    pub const ALL: [BevelStyle; 5] = [
        BevelStyle::Round,
        BevelStyle::Flat,
        BevelStyle::Chiseled,
        BevelStyle::Step,
        BevelStyle::Profile,
    ];

    pub fn canonical(self) -> &'static str {
        match self {
            Self::Round => "round",
            Self::Flat => "flat",
            Self::Chiseled => "chiseled",
            Self::Step => "step",
            Self::Profile => "profile",
        }
    }
}

impl fmt::Display for BevelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical())
    }
}

impl FromStr for BevelStyle {
    type Err = TextMeshError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let key = normalize_key(value);
        Ok(match key.as_str() {
            "round" => Self::Round,
            "flat" => Self::Flat,
            "chiseled" | "chiselled" => Self::Chiseled,
            "step" | "stepped" => Self::Step,
            "profile" | "custom" => Self::Profile,
            _ => return Err(TextMeshError::InvalidBevelStyle(value.to_string())),
        })
    }
}

/// Shared strip geometry inputs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct BevelExtent {
    pub bevel: f32,
    pub depth: f32,
    pub use_face_uvs: bool,
}

impl BevelExtent {
    pub fn from_params(params: &MeshParameters) -> Self {
        Self {
            bevel: params.bevel,
            depth: params.depth,
            use_face_uvs: params.use_face_uvs,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bevel <= 0.0
    }

    /// Offset of the back face from the front face.
    pub fn back_offset(&self) -> Vec3 {
        Vec3::Z * (self.depth + 2.0 * self.bevel)
    }

    /// UV for a strip vertex: face xy, or length along the contour and bevel.
    pub fn strip_uv(&self, position: Vec3, u: f32, v: f32) -> Vec2 {
        if self.use_face_uvs {
            position.truncate()
        } else {
            Vec2::new(u, v)
        }
    }
}

/// A single-segment strip row: where it sits, how it is lit, how it is mapped.
pub(crate) type StripRow = (Vec3, Vec3, Vec2);

/// Append one strip per contour built from two rows per attribute.
pub(crate) fn emit_strips<F>(
    mesh: &mut MeshAttributes,
    indices_submesh: usize,
    back: bool,
    mut rows: F,
) where
    F: FnMut(&ContourVertexAttribute) -> [StripRow; 2],
{
    let contours = std::mem::take(&mut mesh.vertex_attributes);
    let mut indices = std::mem::take(mesh.submesh_mut(indices_submesh));
    for attributes in &contours {
        let offset = mesh.next_index();
        for attr in attributes {
            for (position, normal, uv) in rows(attr) {
                mesh.push_vertex(position, normal, uv);
            }
        }
        crate::geometry::mesh::append_strip(&mut indices, offset, attributes.len(), back);
    }
    *mesh.submesh_mut(indices_submesh) = indices;
    mesh.vertex_attributes = contours;
}

/// Closed set of bevel strategies.
#[derive(Clone, Debug, PartialEq)]
pub enum BevelBuilder {
    Round(RoundBevel),
    Flat(FlatBevel),
    Chiseled(ChiseledBevel),
    Step(StepBevel),
    Profile(ProfileBevel),
}

impl BevelBuilder {
    /// Pick the strategy for `style` using the shape values in `params`.
    pub fn new(style: BevelStyle, params: &MeshParameters) -> Self {
        let extent = BevelExtent::from_params(params);
        match style {
            BevelStyle::Round => BevelBuilder::Round(RoundBevel::new(extent)),
            BevelStyle::Flat => BevelBuilder::Flat(FlatBevel::new(extent)),
            BevelStyle::Chiseled => BevelBuilder::Chiseled(ChiseledBevel::new(extent)),
            BevelStyle::Step => BevelBuilder::Step(StepBevel::new(extent)),
            BevelStyle::Profile => BevelBuilder::Profile(ProfileBevel::from_curve(
                extent,
                &params.bevel_profile,
            )),
        }
    }

    pub fn from_params(params: &MeshParameters) -> Self {
        Self::new(params.bevel_style, params)
    }

    pub fn style(&self) -> BevelStyle {
        match self {
            BevelBuilder::Round(_) => BevelStyle::Round,
            BevelBuilder::Flat(_) => BevelStyle::Flat,
            BevelBuilder::Chiseled(_) => BevelStyle::Chiseled,
            BevelBuilder::Step(_) => BevelStyle::Step,
            BevelBuilder::Profile(_) => BevelStyle::Profile,
        }
    }

    /// Append front bevel strips into the bevel submesh.
    pub fn add_front_faces(&self, mesh: &mut MeshAttributes) {
        match self {
            BevelBuilder::Round(b) => b.add_front_faces(mesh),
            BevelBuilder::Flat(b) => b.add_front_faces(mesh),
            BevelBuilder::Chiseled(b) => b.add_front_faces(mesh),
            BevelBuilder::Step(b) => b.add_front_faces(mesh),
            BevelBuilder::Profile(b) => b.add_front_faces(mesh),
        }
    }

    /// Append back bevel strips into the bevel submesh.
    pub fn add_back_faces(&self, mesh: &mut MeshAttributes) {
        match self {
            BevelBuilder::Round(b) => b.add_back_faces(mesh),
            BevelBuilder::Flat(b) => b.add_back_faces(mesh),
            BevelBuilder::Chiseled(b) => b.add_back_faces(mesh),
            BevelBuilder::Step(b) => b.add_back_faces(mesh),
            BevelBuilder::Profile(b) => b.add_back_faces(mesh),
        }
    }
}
