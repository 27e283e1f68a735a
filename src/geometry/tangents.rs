// src/geometry/tangents.rs
// Tangent generation (per-triangle accumulation over every submesh, Lengyel style)
// Exists so normal-mapped glyph materials get a tangent frame matching the glyph UVs
// RELEVANT FILES:src/geometry/mesh.rs,src/glyph/builder.rs

use glam::{Vec3, Vec4};

use super::mesh::MeshAttributes;

/// Per-vertex tangents with handedness in `w`.
///
/// Triangles with a degenerate UV mapping contribute nothing; vertices left
/// without a tangent get an arbitrary unit vector perpendicular to the normal.
pub fn generate_tangents(mesh: &MeshAttributes) -> Vec<Vec4> {
    let n_verts = mesh.vertex_count();
    if mesh.uvs.len() != n_verts || mesh.normals.len() != n_verts {
        return vec![Vec4::new(1.0, 0.0, 0.0, 1.0); n_verts];
    }

    let mut tan1 = vec![Vec3::ZERO; n_verts];
    let mut tan2 = vec![Vec3::ZERO; n_verts];

    for tri in mesh.submeshes.iter().flat_map(|s| s.chunks_exact(3)) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if i0.max(i1).max(i2) >= n_verts {
            continue;
        }

        let p0 = mesh.positions[i0];
        let e1 = mesh.positions[i1] - p0;
        let e2 = mesh.positions[i2] - p0;

        let uv0 = mesh.uvs[i0];
        let d1 = mesh.uvs[i1] - uv0;
        let d2 = mesh.uvs[i2] - uv0;

        let denom = d1.x * d2.y - d2.x * d1.y;
        if denom.abs() < 1e-12 {
            continue; // degenerate UV mapping
        }
        let r = 1.0 / denom;
        let sdir = (e1 * d2.y - e2 * d1.y) * r;
        let tdir = (e2 * d1.x - e1 * d2.x) * r;

        for idx in [i0, i1, i2] {
            tan1[idx] += sdir;
            tan2[idx] += tdir;
        }
    }

    mesh.normals
        .iter()
        .zip(tan1.iter().zip(&tan2))
        .map(|(&n, (&t, &b))| {
            // Gram-Schmidt orthogonalize
            let t = (t - n * n.dot(t))
                .try_normalize()
                .unwrap_or_else(|| n.any_orthonormal_vector());
            let handed = if n.cross(t).dot(b) < 0.0 { -1.0 } else { 1.0 };
            t.extend(handed)
        })
        .collect()
}
