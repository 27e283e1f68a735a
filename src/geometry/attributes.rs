// src/geometry/attributes.rs
// Per-corner bevel directions, normals and running texture lengths
// Exists to classify contour corners once so every bevel style can reuse them
// RELEVANT FILES:src/geometry/contour.rs,src/bevel/mod.rs,src/glyph/builder.rs

use glam::Vec3;

use super::contour::Contour;

/// Attribute of one bevel vertex on a contour corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourVertexAttribute {
    pub position: Vec3,
    /// Outward offset in xy with +1 in z; scaled by the bevel amount it
    /// reaches the bevel's far edge.
    pub bevel_direction: Vec3,
    pub normal: Vec3,
    /// Running contour length at the face edge.
    pub v_contour: f32,
    /// Running contour length at the bevel edge.
    pub v_bevel: f32,
}

impl ContourVertexAttribute {
    /// Position where the bevel meets the side wall.
    pub fn bevel_position(&self, bevel: f32) -> Vec3 {
        self.position + self.bevel_direction * bevel
    }
}

/// Corner classes keyed on the signed turn angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CornerKind {
    /// Concave beyond 45 degrees: hard split into the two face normals.
    Concave,
    /// Nearly straight: one smoothed vertex.
    Smooth,
    /// Convex between 45 and 135 degrees.
    Convex,
    /// Convex at or beyond 135 degrees.
    Sharp,
}

impl CornerKind {
    pub fn classify(angle_degrees: f32) -> Self {
        if angle_degrees < -45.0 {
            CornerKind::Concave
        } else if angle_degrees < 45.0 {
            CornerKind::Smooth
        } else if angle_degrees < 135.0 {
            CornerKind::Convex
        } else {
            CornerKind::Sharp
        }
    }

    /// Number of attributes the corner contributes.
    pub fn attribute_count(self) -> usize {
        match self {
            CornerKind::Concave => 2,
            CornerKind::Smooth => 1,
            CornerKind::Convex | CornerKind::Sharp => 4,
        }
    }
}

/// Attributes for a single contour, or `None` when the contour is degenerate.
///
/// Corners are visited for `0..=len` so the loop closes on a duplicate of the
/// first corner with the full perimeter as its running length.
pub fn contour_vertex_attributes(
    contour: &Contour,
    bevel: f32,
) -> Option<Vec<ContourVertexAttribute>> {
    if !contour.is_valid() {
        return None;
    }

    let count = contour.len() as isize;
    let mut attributes = Vec::with_capacity(contour.len() * 2);
    let mut v_dist = 0.0f32;

    for i in 0..=count {
        let position = contour.point(i);
        let prev_normal = contour.prev_face_normal(i);
        let next_normal = contour.next_face_normal(i);
        let prev_bevel = contour.prev_face_bevel_direction(i);
        let next_bevel = contour.next_face_bevel_direction(i);

        let attr = |bevel_direction: Vec3, normal: Vec3, v_bevel: f32| ContourVertexAttribute {
            position,
            bevel_direction,
            normal,
            v_contour: v_dist,
            v_bevel,
        };

        match CornerKind::classify(contour.signed_angle(i)) {
            CornerKind::Concave => {
                attributes.push(attr(prev_bevel, prev_normal, v_dist));
                attributes.push(attr(next_bevel, next_normal, v_dist));
            }
            CornerKind::Smooth => {
                attributes.push(attr(
                    contour.intersecting_bevel_direction(i),
                    contour.average_face_normal(i),
                    v_dist,
                ));
            }
            kind => {
                let corner = if kind == CornerKind::Convex {
                    contour.intersecting_bevel_direction(i)
                } else {
                    // TODO: sharp corners should intersect too; the averaged
                    // direction undershoots the side wall past 135 degrees
                    contour.average_bevel_direction(i)
                };
                let from_prev = (corner - prev_bevel).length() * bevel;
                let to_next = (corner - next_bevel).length() * bevel;
                attributes.push(attr(prev_bevel, prev_normal, v_dist));
                attributes.push(attr(corner, prev_normal, v_dist + from_prev));
                attributes.push(attr(corner, next_normal, v_dist - to_next));
                attributes.push(attr(next_bevel, next_normal, v_dist));
            }
        }

        v_dist += (contour.next(i) - position).length();
    }

    Some(attributes)
}

/// Attributes for every valid contour; degenerate contours are skipped.
pub fn compute_vertex_attributes(
    contours: &[Contour],
    bevel: f32,
) -> Vec<Vec<ContourVertexAttribute>> {
    contours
        .iter()
        .filter_map(|contour| contour_vertex_attributes(contour, bevel))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn clockwise_square() -> Contour {
        Contour::from_xy(&[
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 0.0),
        ])
    }

    #[test]
    fn classification_thresholds() {
        assert_eq!(CornerKind::classify(-90.0), CornerKind::Concave);
        assert_eq!(CornerKind::classify(-45.0), CornerKind::Smooth);
        assert_eq!(CornerKind::classify(44.9), CornerKind::Smooth);
        assert_eq!(CornerKind::classify(45.0), CornerKind::Convex);
        assert_eq!(CornerKind::classify(135.0), CornerKind::Sharp);
    }

    #[test]
    fn square_corners_emit_four_attributes_each() {
        let attrs = contour_vertex_attributes(&clockwise_square(), 0.1).unwrap();
        // five corner visits, the last repeating the first
        assert_eq!(attrs.len(), 5 * 4);
        assert_eq!(attrs[0].position, attrs[16].position);
        assert!((attrs[16].v_contour - 4.0).abs() < 1e-5);
    }

    #[test]
    fn running_length_accumulates_edge_lengths() {
        let attrs = contour_vertex_attributes(&clockwise_square(), 0.1).unwrap();
        let corner_lengths: Vec<f32> = attrs.chunks(4).map(|c| c[0].v_contour).collect();
        assert_eq!(corner_lengths, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn interior_pair_spans_the_corner_in_v() {
        let bevel = 0.1;
        let attrs = contour_vertex_attributes(&clockwise_square(), bevel).unwrap();
        let corner = &attrs[4..8];
        // |(-1,1,1) - (-1,0,1)| = 1
        assert!((corner[1].v_bevel - (1.0 + bevel)).abs() < 1e-5);
        assert!((corner[2].v_bevel - (1.0 - bevel)).abs() < 1e-5);
        assert_eq!(corner[0].normal, corner[1].normal);
        assert_eq!(corner[2].normal, corner[3].normal);
    }

    #[test]
    fn degenerate_contours_are_skipped() {
        let two_points = Contour::from_xy(&[Vec2::ZERO, Vec2::X]);
        assert!(contour_vertex_attributes(&two_points, 0.1).is_none());
        let all = compute_vertex_attributes(&[two_points, clockwise_square()], 0.1);
        assert_eq!(all.len(), 1);
    }
}
