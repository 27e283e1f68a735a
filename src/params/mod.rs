// src/params/mod.rs
// Mesh, layout and text parameters with serde defaults and validation
// Exists to give hosts one JSON-loadable configuration surface and to classify edits
// RELEVANT FILES:src/params/curve.rs,src/session.rs,src/bevel/mod.rs,src/layout/mod.rs

mod curve;

pub use curve::{Curve, Keyframe};

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::bevel::BevelStyle;
use crate::error::{TextMeshError, TextMeshResult};

pub fn normalize_key(value: &str) -> String {
    value
        .trim()
        .to_ascii_lowercase()
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' ' | '.'))
        .collect()
}

/// Alignment along one layout axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Align {
    #[default]
    Base,
    Start,
    Center,
    End,
    Justified,
}

impl FromStr for Align {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let key = normalize_key(value);
        Ok(match key.as_str() {
            "base" | "baseline" => Self::Base,
            "start" => Self::Start,
            "center" | "centre" => Self::Center,
            "end" => Self::End,
            "justified" | "justify" => Self::Justified,
            _ => return Err("unknown alignment"),
        })
    }
}

/// Shape parameters. Changing resolution, bevel or depth invalidates cached
/// glyph front faces.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeshParameters {
    #[serde(default)]
    pub depth: f32,
    #[serde(default)]
    pub bevel: f32,
    #[serde(default)]
    pub bevel_style: BevelStyle,
    #[serde(default)]
    pub bevel_profile: Curve,
    #[serde(default)]
    pub use_face_uvs: bool,
    #[serde(default = "MeshParameters::default_resolution")]
    pub resolution: f32,
    #[serde(default)]
    pub has_backface: bool,
    /// Fill `MeshAttributes::tangents` after the side walls are built.
    #[serde(default)]
    pub generate_tangents: bool,
}

impl MeshParameters {
    const fn default_resolution() -> f32 {
        0.01
    }

    pub fn with_depth(mut self, depth: f32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_bevel(mut self, bevel: f32, style: BevelStyle) -> Self {
        self.bevel = bevel;
        self.bevel_style = style;
        self
    }

    pub fn with_bevel_profile(mut self, profile: Curve) -> Self {
        self.bevel_profile = profile;
        self
    }

    pub fn with_resolution(mut self, resolution: f32) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_backface(mut self, enabled: bool) -> Self {
        self.has_backface = enabled;
        self
    }

    pub fn with_tangents(mut self, enabled: bool) -> Self {
        self.generate_tangents = enabled;
        self
    }

    pub fn with_face_uvs(mut self, enabled: bool) -> Self {
        self.use_face_uvs = enabled;
        self
    }

    /// Checked copy; negative depth and bevel clamp to zero.
    pub fn validated(&self) -> TextMeshResult<Self> {
        if !self.resolution.is_finite() || self.resolution == 0.0 {
            return Err(TextMeshError::invalid_parameter(format!(
                "mesh.resolution must be finite and non-zero, got {}",
                self.resolution
            )));
        }
        if !self.depth.is_finite() || !self.bevel.is_finite() {
            return Err(TextMeshError::invalid_parameter(
                "mesh.depth and mesh.bevel must be finite",
            ));
        }
        if !self.bevel_profile.is_finite() {
            return Err(TextMeshError::invalid_parameter(
                "mesh.bevel_profile keys must be finite",
            ));
        }
        let mut out = self.clone();
        out.depth = out.depth.max(0.0);
        out.bevel = out.bevel.max(0.0);
        Ok(out)
    }

    /// True when cached front faces built under `self` are stale under `other`.
    pub fn invalidates_cache(&self, other: &MeshParameters) -> bool {
        self.resolution != other.resolution
            || self.bevel != other.bevel
            || self.depth != other.depth
    }
}

impl Default for MeshParameters {
    fn default() -> Self {
        Self {
            depth: 0.0,
            bevel: 0.0,
            bevel_style: BevelStyle::default(),
            bevel_profile: Curve::default(),
            use_face_uvs: false,
            resolution: Self::default_resolution(),
            has_backface: false,
            generate_tangents: false,
        }
    }
}

/// Bend that wraps the line around the Y axis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CircularBend {
    #[serde(default)]
    pub enabled: bool,
    /// Degrees at the start of the line.
    #[serde(default)]
    pub start_angle: f32,
    /// Degrees at the end of the line.
    #[serde(default = "CircularBend::default_end_angle")]
    pub end_angle: f32,
    #[serde(default = "CircularBend::default_radius")]
    pub radius: f32,
    /// Multiplies the radius along the normalized line position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius_curve: Option<Curve>,
    /// Sample the circle at each glyph's horizontal centre instead of its
    /// pen position.
    #[serde(default = "CircularBend::default_center_glyphs")]
    pub center_glyphs: bool,
}

impl CircularBend {
    const fn default_end_angle() -> f32 {
        180.0
    }

    const fn default_radius() -> f32 {
        10.0
    }

    const fn default_center_glyphs() -> bool {
        true
    }

    pub fn arc(start_angle: f32, end_angle: f32, radius: f32) -> Self {
        Self {
            enabled: true,
            start_angle,
            end_angle,
            radius,
            ..Self::default()
        }
    }
}

impl Default for CircularBend {
    fn default() -> Self {
        Self {
            enabled: false,
            start_angle: 0.0,
            end_angle: Self::default_end_angle(),
            radius: Self::default_radius(),
            radius_curve: None,
            center_glyphs: Self::default_center_glyphs(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutParameters {
    /// Lines run left to right when set, top to bottom otherwise.
    #[serde(default = "LayoutParameters::default_horizontal")]
    pub horizontal: bool,
    #[serde(default)]
    pub major: Align,
    #[serde(default)]
    pub minor: Align,
    #[serde(default = "LayoutParameters::default_size")]
    pub size: f32,
    /// Line spacing factor.
    #[serde(default = "LayoutParameters::default_spacing")]
    pub spacing: f32,
    /// Extra space between glyphs in layout units.
    #[serde(default)]
    pub glyph_spacing: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curve_xy: Option<Curve>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curve_xz: Option<Curve>,
    #[serde(default)]
    pub orient_xy: bool,
    #[serde(default)]
    pub orient_xz: bool,
    #[serde(default)]
    pub circular: CircularBend,
}

impl LayoutParameters {
    const fn default_horizontal() -> bool {
        true
    }

    const fn default_size() -> f32 {
        1.0
    }

    const fn default_spacing() -> f32 {
        1.0
    }

    pub fn with_alignment(mut self, major: Align, minor: Align) -> Self {
        self.major = major;
        self.minor = minor;
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_circular(mut self, circular: CircularBend) -> Self {
        self.circular = circular;
        self
    }

    pub fn validated(&self) -> TextMeshResult<Self> {
        if !self.size.is_finite() || self.size < 0.0 {
            return Err(TextMeshError::invalid_parameter(format!(
                "layout.size must be finite and non-negative, got {}",
                self.size
            )));
        }
        let finite = [
            ("layout.spacing", self.spacing),
            ("layout.glyph_spacing", self.glyph_spacing),
            ("layout.circular.start_angle", self.circular.start_angle),
            ("layout.circular.end_angle", self.circular.end_angle),
            ("layout.circular.radius", self.circular.radius),
        ];
        if let Some((label, value)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(TextMeshError::invalid_parameter(format!(
                "{label} must be finite, got {value}"
            )));
        }
        let curves = [
            &self.curve_xy,
            &self.curve_xz,
            &self.circular.radius_curve,
        ];
        if curves.iter().flat_map(|c| c.iter()).any(|c| !c.is_finite()) {
            return Err(TextMeshError::invalid_parameter(
                "layout curve keys must be finite",
            ));
        }
        Ok(self.clone())
    }
}

impl Default for LayoutParameters {
    fn default() -> Self {
        Self {
            horizontal: Self::default_horizontal(),
            major: Align::default(),
            minor: Align::default(),
            size: Self::default_size(),
            spacing: Self::default_spacing(),
            glyph_spacing: 0.0,
            curve_xy: None,
            curve_xz: None,
            orient_xy: false,
            orient_xz: false,
            circular: CircularBend::default(),
        }
    }
}

/// Everything a text session needs besides the font.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TextParameters {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub mesh: MeshParameters,
    #[serde(default)]
    pub layout: LayoutParameters,
}

impl TextParameters {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_mesh(mut self, mesh: MeshParameters) -> Self {
        self.mesh = mesh;
        self
    }

    pub fn with_layout(mut self, layout: LayoutParameters) -> Self {
        self.layout = layout;
        self
    }

    /// Parse and validate a JSON document; missing fields take defaults.
    pub fn from_json_str(json: &str) -> TextMeshResult<Self> {
        let params: TextParameters = serde_json::from_str(json)?;
        params.validated()
    }

    pub fn validated(&self) -> TextMeshResult<Self> {
        Ok(Self {
            text: self.text.clone(),
            mesh: self.mesh.validated()?,
            layout: self.layout.validated()?,
        })
    }
}

/// Work needed after a parameter edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ParameterChange {
    NoChange,
    /// Placements move; cached glyph geometry stays valid.
    RelayoutOnly,
    /// Glyph meshes must be rebuilt.
    FullRebuild,
}

pub fn classify_change(old: &TextParameters, new: &TextParameters) -> ParameterChange {
    if old.mesh != new.mesh {
        ParameterChange::FullRebuild
    } else if old.layout != new.layout || old.text != new.text {
        ParameterChange::RelayoutOnly
    } else {
        ParameterChange::NoChange
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_yields_defaults() {
        let params = TextParameters::from_json_str("{}").unwrap();
        assert_eq!(params, TextParameters::default());
        assert_eq!(params.mesh.resolution, 0.01);
        assert_eq!(params.layout.size, 1.0);
        assert_eq!(params.layout.circular.end_angle, 180.0);
        assert_eq!(params.layout.circular.radius, 10.0);
        assert!(params.layout.horizontal);
    }

    #[test]
    fn json_overrides_selected_fields() {
        let params = TextParameters::from_json_str(
            r#"{
                "text": "Hi",
                "mesh": { "depth": 0.2, "bevel": 0.05, "bevel_style": "chiseled" },
                "layout": { "major": "center", "minor": "justified" }
            }"#,
        )
        .unwrap();
        assert_eq!(params.text, "Hi");
        assert_eq!(params.mesh.bevel_style, BevelStyle::Chiseled);
        assert_eq!(params.layout.major, Align::Center);
        assert_eq!(params.layout.minor, Align::Justified);
        assert!(!params.mesh.has_backface);
    }

    #[test]
    fn unknown_style_is_a_config_error() {
        let err = TextParameters::from_json_str(r#"{"mesh":{"bevel_style":"wavy"}}"#).unwrap_err();
        assert!(matches!(err, TextMeshError::Config(_)));
    }

    #[test]
    fn negative_shape_values_clamp() {
        let mesh = MeshParameters::default()
            .with_depth(-1.0)
            .with_bevel(-0.5, BevelStyle::Round)
            .validated()
            .unwrap();
        assert_eq!(mesh.depth, 0.0);
        assert_eq!(mesh.bevel, 0.0);
    }

    #[test]
    fn rejects_invalid_values() {
        let zero_res = MeshParameters::default().with_resolution(0.0);
        assert!(matches!(
            zero_res.validated(),
            Err(TextMeshError::InvalidParameter(_))
        ));
        let negative_size = LayoutParameters::default().with_size(-2.0);
        assert!(negative_size.validated().is_err());
    }

    #[test]
    fn classifies_edits() {
        let base = TextParameters::new("abc");
        assert_eq!(classify_change(&base, &base.clone()), ParameterChange::NoChange);

        let mut relayout = base.clone();
        relayout.layout.major = Align::End;
        assert_eq!(classify_change(&base, &relayout), ParameterChange::RelayoutOnly);

        let mut retext = base.clone();
        retext.text.push('d');
        assert_eq!(classify_change(&base, &retext), ParameterChange::RelayoutOnly);

        let mut rebuild = relayout.clone();
        rebuild.mesh.depth = 1.0;
        assert_eq!(classify_change(&base, &rebuild), ParameterChange::FullRebuild);
        assert!(base.mesh.invalidates_cache(&rebuild.mesh));

        let mut style = base.clone();
        style.mesh.has_backface = true;
        assert_eq!(classify_change(&base, &style), ParameterChange::FullRebuild);
        assert!(!base.mesh.invalidates_cache(&style.mesh));
    }

    #[test]
    fn align_parses_loose_names() {
        assert_eq!("Centre".parse::<Align>(), Ok(Align::Center));
        assert_eq!("JUSTIFY".parse::<Align>(), Ok(Align::Justified));
        assert!("middle".parse::<Align>().is_err());
    }
}
