// src/geometry/bezier.rs
// Cubic bezier flattening by adaptive forward differencing
// Exists to turn glyph outline curves into polylines at a caller-chosen tolerance
// RELEVANT FILES:src/geometry/tessellator.rs,tests/test_flatten_properties.rs

use glam::Vec2;

/// Upper bound on points emitted per curved segment.
pub const MAX_SEGMENT_POINTS: usize = 10;

/// Lower bound on points emitted per curved segment once it is not flat.
pub const MIN_SEGMENT_POINTS: usize = 3;

/// A single cubic bezier segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub from: Vec2,
    pub ctrl1: Vec2,
    pub ctrl2: Vec2,
    pub to: Vec2,
}

impl CubicBezier {
    pub fn new(from: Vec2, ctrl1: Vec2, ctrl2: Vec2, to: Vec2) -> Self {
        Self {
            from,
            ctrl1,
            ctrl2,
            to,
        }
    }

    /// Promote a quadratic segment to the equivalent cubic.
    pub fn from_quadratic(from: Vec2, ctrl: Vec2, to: Vec2) -> Self {
        const TWO_THIRDS: f32 = 2.0 / 3.0;
        Self {
            from,
            ctrl1: from + (ctrl - from) * TWO_THIRDS,
            ctrl2: to + (ctrl - to) * TWO_THIRDS,
            to,
        }
    }

    fn control_points(&self) -> [Vec2; 4] {
        [self.from, self.ctrl1, self.ctrl2, self.to]
    }

    /// Evaluate the curve at `t` with de Casteljau.
    pub fn sample(&self, t: f32) -> Vec2 {
        let s = 1.0 - t;
        let q0 = self.from * s + self.ctrl1 * t;
        let q1 = self.ctrl1 * s + self.ctrl2 * t;
        let q2 = self.ctrl2 * s + self.to * t;

        let r0 = q0 * s + q1 * t;
        let r1 = q1 * s + q2 * t;

        r0 * s + r1 * t
    }

    /// Curvedness heuristic: the longer of the two control-triangle medians.
    pub fn curvature(&self) -> f32 {
        let p = self.control_points();
        (1..=2)
            .map(|i| ((p[i - 1] + p[i + 1]) * 0.5 - p[i]).length())
            .fold(0.0, f32::max)
    }

    /// Number of points the segment flattens to, or `None` when it is flat
    /// enough that the end point alone will do.
    pub fn point_count(&self, tolerance: f32) -> Option<usize> {
        let tolerance = tolerance.abs();
        let curvature = self.curvature();
        if curvature <= 0.5 * tolerance {
            return None;
        }

        // curvature falls off with the square of the point count
        let count = ((curvature / tolerance).sqrt().floor() + MIN_SEGMENT_POINTS as f32)
            .min(MAX_SEGMENT_POINTS as f32);
        Some(count as usize)
    }

    /// Flatten into a fresh polyline. The start point is not included; the
    /// last point is always exactly `to`.
    pub fn flatten(&self, tolerance: f32) -> Vec<Vec2> {
        let mut points = Vec::with_capacity(MAX_SEGMENT_POINTS);
        self.flatten_into(tolerance, &mut points);
        points
    }

    /// Flatten, appending to `out`.
    pub fn flatten_into(&self, tolerance: f32, out: &mut Vec<Vec2>) {
        let count = match self.point_count(tolerance) {
            Some(count) => count,
            None => {
                out.push(self.to);
                return;
            }
        };

        let d = 1.0 / count as f32;
        let mut q = [self.from, Vec2::ZERO, Vec2::ZERO, Vec2::ZERO];
        for i in 1..=3 {
            q[i] = self.sample(i as f32 * d);
            out.push(q[i]);
        }

        // replace the buffer with first, second and third order differences
        for i in 1..=3 {
            for k in 0..=(3 - i) {
                q[k] = q[k + 1] - q[k];
            }
        }

        for _ in 4..=count {
            for k in 1..=3 {
                q[k] += q[k - 1];
            }
            out.push(q[3]);
        }

        // forward differencing drifts; pin the segment end exactly
        if let Some(last) = out.last_mut() {
            *last = self.to;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collinear_segment_collapses_to_end_point() {
        let curve = CubicBezier::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(3.0, 0.0),
        );
        assert_eq!(curve.flatten(0.01), vec![Vec2::new(3.0, 0.0)]);
    }

    #[test]
    fn point_count_is_clamped() {
        let curve = CubicBezier::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 100.0),
            Vec2::new(100.0, 100.0),
            Vec2::new(100.0, 0.0),
        );
        assert_eq!(curve.point_count(1e-4), Some(MAX_SEGMENT_POINTS));
        assert_eq!(curve.flatten(1e-4).len(), MAX_SEGMENT_POINTS);
    }

    #[test]
    fn coarser_tolerance_emits_fewer_points() {
        let curve = CubicBezier::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 0.0),
        );
        let fine = curve.flatten(0.01);
        let coarse = curve.flatten(0.2);
        assert!(coarse.len() < fine.len());
        assert_eq!(*fine.last().unwrap(), Vec2::new(1.0, 0.0));
        assert_eq!(*coarse.last().unwrap(), Vec2::new(1.0, 0.0));
        assert!(fine.len() >= MIN_SEGMENT_POINTS);
    }

    #[test]
    fn forward_differencing_tracks_de_casteljau() {
        let curve = CubicBezier::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(0.2, 0.9),
            Vec2::new(0.8, 0.9),
            Vec2::new(1.0, 0.0),
        );
        let points = curve.flatten(0.001);
        let count = points.len();
        for (i, p) in points.iter().enumerate() {
            let expected = curve.sample((i + 1) as f32 / count as f32);
            assert!((*p - expected).length() < 1e-4, "point {i} drifted");
        }
    }

    #[test]
    fn quadratic_promotion_preserves_shape() {
        let from = Vec2::new(0.0, 0.0);
        let ctrl = Vec2::new(0.5, 1.0);
        let to = Vec2::new(1.0, 0.0);
        let cubic = CubicBezier::from_quadratic(from, ctrl, to);
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            let s = 1.0 - t;
            let quad = from * s * s + ctrl * 2.0 * s * t + to * t * t;
            assert!((cubic.sample(t) - quad).length() < 1e-5);
        }
    }
}
