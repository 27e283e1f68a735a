// src/geometry/contour.rs
// Closed glyph boundary loops with cyclic neighbour queries
// Exists to answer the per-corner questions the bevel attribute pass asks
// RELEVANT FILES:src/geometry/tessellator.rs,src/geometry/attributes.rs

use glam::{Vec2, Vec3};

/// Below this the two corner edges are treated as parallel.
const PARALLEL_EPSILON: f32 = 1e-12;

/// An ordered, implicitly closed loop of points in the z = 0 plane.
///
/// Indices wrap modulo the point count, so `point(-1)` is the last point
/// and `point(len)` is the first. No closing duplicate is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    points: Vec<Vec3>,
    normal: Vec3,
}

impl Contour {
    pub fn new(points: Vec<Vec3>, normal: Vec3) -> Self {
        Self { points, normal }
    }

    /// Build a contour in the glyph plane facing the viewer (`-Z`).
    pub fn from_xy(points: &[Vec2]) -> Self {
        Self::new(
            points.iter().map(|p| p.extend(0.0)).collect(),
            Vec3::NEG_Z,
        )
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// A contour needs at least three points to enclose anything.
    pub fn is_valid(&self) -> bool {
        self.points.len() > 2
    }

    fn wrap(&self, index: isize) -> usize {
        index.rem_euclid(self.points.len() as isize) as usize
    }

    pub fn point(&self, index: isize) -> Vec3 {
        self.points[self.wrap(index)]
    }

    pub fn prev(&self, index: isize) -> Vec3 {
        self.point(index - 1)
    }

    pub fn next(&self, index: isize) -> Vec3 {
        self.point(index + 1)
    }

    /// Outward normal of the edge arriving at `index`.
    pub fn prev_face_normal(&self, index: isize) -> Vec3 {
        (self.point(index) - self.prev(index))
            .cross(self.normal)
            .normalize_or_zero()
    }

    /// Outward normal of the edge leaving `index`.
    pub fn next_face_normal(&self, index: isize) -> Vec3 {
        (self.next(index) - self.point(index))
            .cross(self.normal)
            .normalize_or_zero()
    }

    pub fn average_face_normal(&self, index: isize) -> Vec3 {
        (self.prev_face_normal(index) + self.next_face_normal(index)).normalize_or_zero()
    }

    pub fn prev_face_bevel_direction(&self, index: isize) -> Vec3 {
        self.prev_face_normal(index) + Vec3::Z
    }

    pub fn next_face_bevel_direction(&self, index: isize) -> Vec3 {
        self.next_face_normal(index) + Vec3::Z
    }

    pub fn average_bevel_direction(&self, index: isize) -> Vec3 {
        self.average_face_normal(index) + Vec3::Z
    }

    /// Corner offset where the two edges, each pushed out by one unit along
    /// its face normal, intersect. Falls back to the leaving edge's normal
    /// when the edges are parallel.
    pub fn intersecting_bevel_direction(&self, index: isize) -> Vec3 {
        let curr = self.point(index);
        let next_dir = self.next(index) - curr;
        let prev_dir = self.prev(index) - curr;
        let prev_normal = self.prev_face_normal(index);
        let next_normal = self.next_face_normal(index);
        let next_to_prev = prev_normal - next_normal;

        let t = next_dir.x * prev_dir.y - next_dir.y * prev_dir.x;
        let mut direction = next_normal;
        if t.abs() > PARALLEL_EPSILON {
            let s = (next_to_prev.x * prev_dir.y - next_to_prev.y * prev_dir.x) / t;
            direction = next_normal + next_dir * s;
        }
        direction + Vec3::Z
    }

    /// Signed turn between the incoming and outgoing face normals in degrees,
    /// measured about the contour normal. Convex corners are positive.
    pub fn signed_angle(&self, index: isize) -> f32 {
        let from = self.prev_face_normal(index);
        let to = self.next_face_normal(index);
        if from == Vec3::ZERO || to == Vec3::ZERO {
            return 0.0;
        }
        let angle = from.angle_between(to).to_degrees();
        if self.normal.dot(from.cross(to)) < 0.0 {
            -angle
        } else {
            angle
        }
    }

    /// Shoelace area in the xy plane; positive for counter-clockwise loops.
    pub fn signed_area_xy(&self) -> f32 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let twice: f32 = (0..n)
            .map(|i| {
                let a = self.points[i];
                let b = self.points[(i + 1) % n];
                a.x * b.y - b.x * a.y
            })
            .sum();
        twice * 0.5
    }

    /// Same loop traversed the other way.
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self::new(points, self.normal)
    }

    /// Total boundary length including the closing edge.
    pub fn perimeter(&self) -> f32 {
        let n = self.points.len();
        (0..n)
            .map(|i| (self.points[(i + 1) % n] - self.points[i]).length())
            .sum()
    }
}
