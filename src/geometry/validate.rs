// src/geometry/validate.rs
// Glyph mesh validation across every submesh
// Exists to provide diagnostics covering stats, index ranges, and degenerate triangles
// RELEVANT FILES:src/geometry/mesh.rs,tests/test_glyph_pipeline.rs

use glam::Vec3;

use super::mesh::MeshAttributes;

/// Basic statistics collected for a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshStats {
    pub vertex_count: usize,
    pub triangle_count: usize,
    /// Triangles whose corners coincide or are collinear. Bevel strips
    /// produce these at concave corners, so they are counted, not reported.
    pub degenerate_triangles: usize,
    pub bbox_min: [f32; 3],
    pub bbox_max: [f32; 3],
}

impl Default for MeshStats {
    fn default() -> Self {
        Self {
            vertex_count: 0,
            triangle_count: 0,
            degenerate_triangles: 0,
            bbox_min: [0.0; 3],
            bbox_max: [0.0; 3],
        }
    }
}

/// Issue categories detected by validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshValidationIssue {
    IndexOutOfBounds { submesh: usize, index: u32 },
    PartialTriangle { submesh: usize, len: usize },
    AttributeLengthMismatch { positions: usize, normals: usize, uvs: usize },
    NonFiniteVertex { vertex: usize },
    /// Tangents were generated but do not cover every vertex.
    TangentLengthMismatch { positions: usize, tangents: usize },
}

/// Complete validation report.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshValidationReport {
    pub stats: MeshStats,
    pub issues: Vec<MeshValidationIssue>,
}

impl MeshValidationReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Run validation across topology, geometry, and statistics.
pub fn validate_mesh(mesh: &MeshAttributes) -> MeshValidationReport {
    let mut issues = Vec::new();

    let vertex_count = mesh.vertex_count();
    if mesh.normals.len() != vertex_count || mesh.uvs.len() != vertex_count {
        issues.push(MeshValidationIssue::AttributeLengthMismatch {
            positions: vertex_count,
            normals: mesh.normals.len(),
            uvs: mesh.uvs.len(),
        });
    }

    if !mesh.tangents.is_empty() && mesh.tangents.len() != vertex_count {
        issues.push(MeshValidationIssue::TangentLengthMismatch {
            positions: vertex_count,
            tangents: mesh.tangents.len(),
        });
    }

    for (vertex, p) in mesh.positions.iter().enumerate() {
        if !p.is_finite() {
            issues.push(MeshValidationIssue::NonFiniteVertex { vertex });
        }
    }

    for (submesh, indices) in mesh.submeshes.iter().enumerate() {
        if indices.len() % 3 != 0 {
            issues.push(MeshValidationIssue::PartialTriangle {
                submesh,
                len: indices.len(),
            });
        }
        for &index in indices {
            if index as usize >= vertex_count {
                issues.push(MeshValidationIssue::IndexOutOfBounds { submesh, index });
            }
        }
    }

    let stats = compute_stats(mesh);
    MeshValidationReport { stats, issues }
}

fn compute_stats(mesh: &MeshAttributes) -> MeshStats {
    if mesh.positions.is_empty() {
        return MeshStats::default();
    }

    let mut min = Vec3::splat(f32::INFINITY);
    let mut max = Vec3::splat(f32::NEG_INFINITY);
    for p in &mesh.positions {
        min = min.min(*p);
        max = max.max(*p);
    }

    MeshStats {
        vertex_count: mesh.vertex_count(),
        triangle_count: mesh.triangle_count(),
        degenerate_triangles: count_degenerate_triangles(mesh),
        bbox_min: min.to_array(),
        bbox_max: max.to_array(),
    }
}

fn count_degenerate_triangles(mesh: &MeshAttributes) -> usize {
    let vertex_count = mesh.vertex_count();
    mesh.submeshes
        .iter()
        .flat_map(|s| s.chunks_exact(3))
        .filter(|tri| {
            if tri.iter().any(|&i| i as usize >= vertex_count) {
                return false;
            }
            let p0 = mesh.positions[tri[0] as usize];
            let p1 = mesh.positions[tri[1] as usize];
            let p2 = mesh.positions[tri[2] as usize];
            (p1 - p0).cross(p2 - p0).length_squared() <= 1e-12
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn make_triangle_mesh() -> MeshAttributes {
        let mut mesh = MeshAttributes::new();
        mesh.push_vertex(Vec3::ZERO, Vec3::NEG_Z, Vec2::ZERO);
        mesh.push_vertex(Vec3::Y, Vec3::NEG_Z, Vec2::ZERO);
        mesh.push_vertex(Vec3::X, Vec3::NEG_Z, Vec2::ZERO);
        mesh.submeshes[0] = vec![0, 1, 2];
        mesh
    }

    #[test]
    fn detects_clean_mesh() {
        let report = validate_mesh(&make_triangle_mesh());
        assert!(report.is_clean());
        assert_eq!(report.stats.vertex_count, 3);
        assert_eq!(report.stats.triangle_count, 1);
        assert_eq!(report.stats.bbox_max, [1.0, 1.0, 0.0]);
    }

    #[test]
    fn detects_out_of_range_index_in_any_submesh() {
        let mut mesh = make_triangle_mesh();
        mesh.submesh_mut(2).extend_from_slice(&[0, 1, 7]);
        let report = validate_mesh(&mesh);
        assert_eq!(
            report.issues,
            vec![MeshValidationIssue::IndexOutOfBounds {
                submesh: 2,
                index: 7
            }]
        );
    }

    #[test]
    fn counts_degenerate_triangles_without_failing() {
        let mut mesh = make_triangle_mesh();
        mesh.submesh_mut(1).extend_from_slice(&[0, 0, 1]);
        let report = validate_mesh(&mesh);
        assert!(report.is_clean());
        assert_eq!(report.stats.degenerate_triangles, 1);
    }

    #[test]
    fn detects_attribute_mismatch() {
        let mut mesh = make_triangle_mesh();
        mesh.normals.pop();
        let report = validate_mesh(&mesh);
        assert!(matches!(
            report.issues[0],
            MeshValidationIssue::AttributeLengthMismatch { normals: 2, .. }
        ));
    }

    #[test]
    fn partial_tangents_are_reported() {
        let mut mesh = make_triangle_mesh();
        mesh.tangents = vec![glam::Vec4::X; 2];
        let report = validate_mesh(&mesh);
        assert_eq!(
            report.issues,
            vec![MeshValidationIssue::TangentLengthMismatch {
                positions: 3,
                tangents: 2
            }]
        );
    }
}
