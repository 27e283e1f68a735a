// tests/test_tessellation_properties.rs
// Property tests for outline tessellation on random simple polygons
// Exists to check index bounds, covered area and boundary recovery in both windings
// RELEVANT FILES:src/geometry/tessellator.rs,src/geometry/contour.rs

use glam::{Vec2, Vec3};
use glyph3d::geometry::tessellate_commands;
use glyph3d::PathCommand;
use proptest::prelude::*;
use std::f32::consts::TAU;

/// Star-shaped around the origin: strictly increasing angles, positive radii.
fn star_polygon() -> impl Strategy<Value = Vec<Vec2>> {
    (prop::collection::vec((0.2f32..1.0, 0.0f32..1.0), 3..24), any::<bool>()).prop_map(
        |(spokes, clockwise)| {
            let n = spokes.len() as f32;
            let mut points: Vec<Vec2> = spokes
                .iter()
                .enumerate()
                .map(|(i, &(radius, jitter))| {
                    let angle = TAU * (i as f32 + 0.1 + 0.8 * jitter) / n;
                    Vec2::new(angle.cos(), angle.sin()) * radius
                })
                .collect();
            if clockwise {
                points.reverse();
            }
            points
        },
    )
}

fn shoelace(points: &[Vec2]) -> f32 {
    let n = points.len();
    (0..n)
        .map(|i| points[i].perp_dot(points[(i + 1) % n]))
        .sum::<f32>()
        * 0.5
}

fn commands(points: &[Vec2]) -> Vec<PathCommand> {
    let mut out = vec![PathCommand::MoveTo(points[0].x, points[0].y)];
    out.extend(points[1..].iter().map(|p| PathCommand::LineTo(p.x, p.y)));
    out.push(PathCommand::Close);
    out
}

fn triangle_area(a: Vec3, b: Vec3, c: Vec3) -> f32 {
    (b - a).truncate().perp_dot((c - a).truncate()) * 0.5
}

proptest! {
    #[test]
    fn triangles_cover_the_polygon_exactly(points in star_polygon()) {
        let area = shoelace(&points).abs();
        let outline = tessellate_commands(&commands(&points), 0.01, false).unwrap();

        prop_assert_eq!(outline.indices.len() % 3, 0);
        prop_assert!(outline.indices.iter().all(|&i| (i as usize) < outline.vertices.len()));

        let mut covered = 0.0;
        for t in outline.indices.chunks_exact(3) {
            let signed = triangle_area(
                outline.vertices[t[0] as usize],
                outline.vertices[t[1] as usize],
                outline.vertices[t[2] as usize],
            );
            // front faces look down -Z, so every triangle is clockwise in xy
            prop_assert!(signed <= 1e-6, "counter-clockwise triangle {:?}", t);
            covered += signed.abs();
        }
        let slack = 1e-4 * area.max(1.0);
        prop_assert!(
            (covered - area).abs() <= slack,
            "covered {} vs polygon {}",
            covered,
            area
        );
    }

    #[test]
    fn boundary_is_one_clockwise_loop(points in star_polygon()) {
        let area = shoelace(&points).abs();
        let outline = tessellate_commands(&commands(&points), 0.01, true).unwrap();

        prop_assert_eq!(outline.contours.len(), 1);
        let contour = &outline.contours[0];
        prop_assert!(contour.len() >= 3 && contour.len() <= points.len());
        let slack = 1e-3 * area.max(1.0);
        prop_assert!(
            (contour.signed_area_xy() + area).abs() <= slack,
            "boundary area {} vs polygon {}",
            contour.signed_area_xy(),
            area
        );
    }
}
