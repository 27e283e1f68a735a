// src/layout/mod.rs
// Text layout: line breaking, alignment, justification, curve and circular bends
// Exists to produce one positioned, oriented placement per visible character
// RELEVANT FILES:src/layout/metrics.rs,src/params/mod.rs,src/font/mod.rs,src/session.rs

//! Places glyphs for horizontal or vertical text.
//!
//! Horizontal lines run along +X and stack downward along -Y; vertical
//! columns run downward and stack along +X. Unless centered or end-aligned,
//! the first horizontal line hangs one ascender below the origin. Bends are applied after the
//! flat layout using the glyph's position normalized across the widest line.

mod metrics;

pub use metrics::{is_visible, measure_line, LineMetrics, ScaledMetrics};

use glam::{Mat4, Quat, Vec3};

use crate::font::GlyphFont;
use crate::params::{Align, LayoutParameters};

/// Normalized step used to estimate the slope of bend curves.
const SLOPE_DELTA: f32 = 0.01;

/// Where one character goes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphPlacement {
    pub character: char,
    pub line: usize,
    /// Index of the character within its line.
    pub column: usize,
    /// Running index over visible characters; hosts map it to glyph slots.
    pub slot: usize,
    pub position: Vec3,
    pub rotation: Quat,
}

impl GlyphPlacement {
    pub fn transform(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }
}

/// Overall block size of a laid out text.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextExtent {
    pub width: f32,
    pub height: f32,
    pub lines: Vec<LineMetrics>,
}

pub struct Layouter<'a> {
    params: &'a LayoutParameters,
    /// Mesh depth, used to push the circular radius out to the glyph back.
    depth: f32,
}

impl<'a> Layouter<'a> {
    pub fn new(params: &'a LayoutParameters, depth: f32) -> Self {
        Self { params, depth }
    }

    fn split_lines(text: &str) -> Vec<Vec<char>> {
        text.lines()
            .map(|line| line.chars().filter(|c| !c.is_control()).collect())
            .collect()
    }

    /// Line metrics and the block size they add up to.
    pub fn measure<F: GlyphFont + ?Sized>(&self, text: &str, font: &F) -> TextExtent {
        let metrics = ScaledMetrics::new(font, self.params.size);
        let lines: Vec<LineMetrics> = Self::split_lines(text)
            .iter()
            .map(|line| measure_line(line, font, &metrics, self.params))
            .collect();
        self.extent(lines)
    }

    fn extent(&self, lines: Vec<LineMetrics>) -> TextExtent {
        let widest = lines.iter().map(|l| l.width).fold(0.0, f32::max);
        let tallest = lines.iter().map(|l| l.height).fold(0.0, f32::max);
        let (width, height) = if self.params.horizontal {
            (widest, lines.iter().map(|l| l.height).sum())
        } else {
            (lines.iter().map(|l| l.width).sum(), tallest)
        };
        TextExtent {
            width,
            height,
            lines,
        }
    }

    pub fn layout<F: GlyphFont + ?Sized>(&self, text: &str, font: &F) -> Vec<GlyphPlacement> {
        let p = self.params;
        let metrics = ScaledMetrics::new(font, p.size);
        let lines = Self::split_lines(text);
        let extent = self.extent(
            lines
                .iter()
                .map(|line| measure_line(line, font, &metrics, p))
                .collect(),
        );

        let line_step = extent.lines.iter().map(|l| l.height).fold(0.0, f32::max) * p.spacing;
        let column_step = metrics.ascender * p.spacing;
        let start_x = match (p.horizontal, p.major, p.minor) {
            (true, Align::Center, _) | (false, _, Align::Center) => -extent.width * 0.5,
            (true, Align::End, _) | (false, _, Align::End) => -extent.width,
            _ => 0.0,
        };

        let mut placements = Vec::new();
        let mut slot = 0;
        for (k, (line, size)) in lines.iter().zip(&extent.lines).enumerate() {
            let (mut x, mut y) = if p.horizontal {
                let x = match p.major {
                    Align::Center => -size.width * 0.5,
                    Align::End => -size.width,
                    _ => 0.0,
                };
                let y = match p.minor {
                    Align::Center => extent.height * 0.5 - metrics.ascender,
                    Align::End => extent.height - metrics.ascender,
                    Align::Base | Align::Start | Align::Justified => -metrics.ascender,
                };
                (x, y - k as f32 * line_step)
            } else {
                let y = match p.major {
                    Align::Center => size.height * 0.5,
                    Align::End => size.height - metrics.ascender,
                    _ => 0.0,
                };
                let x = match p.minor {
                    Align::Center => -extent.width * 0.5,
                    Align::End => -extent.width,
                    _ => 0.0,
                };
                (x + k as f32 * column_step, y)
            };

            let slack = if p.horizontal {
                extent.width - size.width
            } else {
                extent.height - size.height
            };
            let space_extra = if p.major == Align::Justified && size.interior_spaces > 0 {
                (slack / size.interior_spaces as f32).max(0.0)
            } else {
                0.0
            };

            let mut prev: Option<char> = None;
            for (j, &c) in line.iter().enumerate() {
                let advance = font.advance(c) * metrics.scale;
                if p.horizontal {
                    if let Some(prev) = prev {
                        x += font.kerning(prev, c) * metrics.scale;
                    }
                }

                if is_visible(c) {
                    let pen = if p.horizontal {
                        Vec3::new(x, y, 0.0)
                    } else {
                        Vec3::new(x - advance * 0.5, y, 0.0)
                    };
                    let (position, rotation) = self.bend(pen, advance, start_x, extent.width);
                    placements.push(GlyphPlacement {
                        character: c,
                        line: k,
                        column: j,
                        slot,
                        position,
                        rotation,
                    });
                    slot += 1;
                }

                let extra = if c.is_whitespace() && size.is_interior(j) {
                    space_extra
                } else {
                    0.0
                };
                if p.horizontal {
                    x += advance + p.glyph_spacing + extra;
                } else {
                    y -= metrics.line_height + p.glyph_spacing + extra;
                }
                prev = Some(c);
            }
        }

        log::debug!(
            "Laid out {} glyphs on {} lines ({:.3} x {:.3})",
            placements.len(),
            lines.len(),
            extent.width,
            extent.height
        );
        placements
    }

    /// Apply curve and circular bends to a flat pen position.
    fn bend(&self, pen: Vec3, advance: f32, start_x: f32, width: f32) -> (Vec3, Quat) {
        let p = self.params;
        let mut position = pen;
        let mut rotation = Quat::IDENTITY;
        let norm_x = if width > 0.0 {
            (pen.x - start_x) / width
        } else {
            0.0
        };

        if let Some(curve) = &p.curve_xy {
            let y0 = curve.evaluate(norm_x);
            position.y += y0;
            if p.orient_xy && width > 0.0 {
                let slope = (curve.evaluate(norm_x + SLOPE_DELTA) - y0) / width;
                rotation *= Quat::from_axis_angle(Vec3::Z, slope.atan2(SLOPE_DELTA));
            }
        }

        if let Some(curve) = &p.curve_xz {
            let z0 = curve.evaluate(norm_x);
            position.z = z0;
            if p.orient_xz && width > 0.0 {
                let slope = (curve.evaluate(norm_x + SLOPE_DELTA) - z0) / width;
                rotation *= Quat::from_axis_angle(Vec3::NEG_Y, slope.atan2(SLOPE_DELTA));
            }
        }

        let circle = &p.circular;
        if circle.enabled {
            let mut t = norm_x;
            if circle.center_glyphs && width > 0.0 {
                t += advance * 0.5 / width;
            }
            let t = t.clamp(0.0, 1.0);
            let degrees = -circle.start_angle + (circle.start_angle - circle.end_angle) * t;
            let spin = Quat::from_axis_angle(Vec3::Y, degrees.to_radians());

            let mut radius = circle.radius + self.depth * p.size;
            if let Some(curve) = &circle.radius_curve {
                radius *= curve.evaluate(t);
            }
            position.x = 0.0;
            position += spin * (Vec3::NEG_Z * radius);
            rotation *= spin;
        }

        (position, rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::InlineFont;
    use crate::params::{CircularBend, Curve};

    fn font() -> InlineFont {
        InlineFont::new(800.0, -200.0)
            .with_advance('a', 0.5)
            .with_advance('b', 0.5)
            .with_advance(' ', 0.25)
    }

    #[test]
    fn spaces_and_newlines_get_no_slot() {
        let params = LayoutParameters::default();
        let placements = Layouter::new(&params, 0.0).layout("a b\nba", &font());
        let chars: String = placements.iter().map(|p| p.character).collect();
        assert_eq!(chars, "abba");
        let slots: Vec<usize> = placements.iter().map(|p| p.slot).collect();
        assert_eq!(slots, vec![0, 1, 2, 3]);
        assert_eq!(placements[1].column, 2);
        assert_eq!(placements[2].line, 1);
    }

    #[test]
    fn base_alignment_starts_one_ascender_down() {
        let params = LayoutParameters::default();
        let placements = Layouter::new(&params, 0.0).layout("ab", &font());
        assert_eq!(placements[0].position, Vec3::new(0.0, -800.0, 0.0));
        assert_eq!(placements[1].position, Vec3::new(0.5, -800.0, 0.0));
        assert_eq!(placements[0].rotation, Quat::IDENTITY);
    }

    #[test]
    fn base_and_start_minor_alignment_agree_horizontally() {
        let minor_y = |minor: Align| {
            let params = LayoutParameters::default().with_alignment(Align::Base, minor);
            Layouter::new(&params, 0.0)
                .layout("a\nb", &font())
                .iter()
                .map(|p| p.position.y)
                .collect::<Vec<_>>()
        };
        assert_eq!(minor_y(Align::Start), vec![-800.0, -1800.0]);
        assert_eq!(minor_y(Align::Base), minor_y(Align::Start));
        assert_eq!(minor_y(Align::Justified), minor_y(Align::Start));
    }

    #[test]
    fn end_alignment_ends_at_origin() {
        let params = LayoutParameters::default().with_alignment(Align::End, Align::Base);
        let placements = Layouter::new(&params, 0.0).layout("ab", &font());
        assert!((placements[1].position.x + 0.5).abs() < 1e-6);
    }

    #[test]
    fn xy_curve_lifts_and_tilts_glyphs() {
        let params = LayoutParameters {
            curve_xy: Some(Curve::linear(0.0, 1.0)),
            orient_xy: true,
            ..LayoutParameters::default()
        };
        let placements = Layouter::new(&params, 0.0).layout("ab", &font());
        assert!((placements[1].position.y - (-800.0 + 0.5)).abs() < 1e-3);
        // slope of one unit per unit width: 45 degrees about +Z
        let (axis, angle) = placements[0].rotation.to_axis_angle();
        assert!((angle - std::f32::consts::FRAC_PI_4).abs() < 1e-4);
        assert!(axis.z > 0.99);
    }

    #[test]
    fn xz_curve_sets_depth() {
        let params = LayoutParameters {
            curve_xz: Some(Curve::linear(2.0, 4.0)),
            ..LayoutParameters::default()
        };
        let placements = Layouter::new(&params, 0.0).layout("ab", &font());
        assert!((placements[0].position.z - 2.0).abs() < 1e-5);
        assert!((placements[1].position.z - 3.0).abs() < 1e-5);
    }

    #[test]
    fn circular_radius_includes_depth_and_curve() {
        let mut circle = CircularBend::arc(0.0, 180.0, 10.0);
        circle.center_glyphs = false;
        circle.radius_curve = Some(Curve::constant(0.5));
        let params = LayoutParameters::default().with_circular(circle);
        let placements = Layouter::new(&params, 2.0).layout("ab", &font());
        assert!((placements[0].position - Vec3::new(0.0, -800.0, -6.0)).length() < 1e-3);
    }

    #[test]
    fn measure_reports_block_size() {
        let params = LayoutParameters::default();
        let extent = Layouter::new(&params, 0.0).measure("ab\na", &font());
        assert_eq!(extent.lines.len(), 2);
        assert!((extent.width - 1.0).abs() < 1e-6);
        assert_eq!(extent.height, 2000.0);
    }
}
