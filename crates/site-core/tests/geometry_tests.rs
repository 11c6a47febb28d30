// Host-side tests for procedural mesh generation.

use site_core::geometry::{cylinder, icosphere, torus, torus_knot, MeshData};

fn assert_well_formed(mesh: &MeshData, label: &str) {
    assert!(!mesh.vertices.is_empty(), "{label}: empty mesh");
    assert_eq!(mesh.indices.len() % 3, 0, "{label}: dangling indices");
    let n = mesh.vertices.len() as u32;
    for &i in &mesh.indices {
        assert!(i < n, "{label}: index {i} out of bounds ({n} vertices)");
    }
    for (vi, v) in mesh.vertices.iter().enumerate() {
        for c in v.position {
            assert!(c.is_finite(), "{label}: non-finite position at {vi}");
        }
        let len = (v.normal[0] * v.normal[0]
            + v.normal[1] * v.normal[1]
            + v.normal[2] * v.normal[2])
            .sqrt();
        assert!(
            (len - 1.0).abs() < 1e-3,
            "{label}: normal not unit length at {vi}: {len}"
        );
    }
}

#[test]
fn icosahedron_has_the_classic_counts() {
    let mesh = icosphere(0);
    assert_eq!(mesh.vertex_count(), 12);
    assert_eq!(mesh.triangle_count(), 20);
    // 30 unique edges, flattened to pairs
    assert_eq!(mesh.edge_indices().len(), 60);
    assert_well_formed(&mesh, "icosahedron");
}

#[test]
fn icosphere_subdivision_grows_by_fours() {
    for level in 0..3u32 {
        let mesh = icosphere(level);
        assert_eq!(
            mesh.triangle_count(),
            20 * 4usize.pow(level),
            "triangles at level {level}"
        );
        // closed sphere: V - E + F == 2
        let e = mesh.edge_indices().len() / 2;
        assert_eq!(
            mesh.vertex_count() as i64 - e as i64 + mesh.triangle_count() as i64,
            2,
            "Euler characteristic broken at level {level}"
        );
        assert_well_formed(&mesh, "icosphere");
        // all vertices on the unit sphere
        for v in &mesh.vertices {
            let r = (v.position[0] * v.position[0]
                + v.position[1] * v.position[1]
                + v.position[2] * v.position[2])
                .sqrt();
            assert!((r - 1.0).abs() < 1e-4);
        }
    }
}

#[test]
fn torus_grid_counts_and_radii() {
    let mesh = torus(1.0, 0.25, 24, 12);
    assert_eq!(mesh.vertex_count(), 25 * 13);
    assert_eq!(mesh.triangle_count(), 24 * 12 * 2);
    assert_well_formed(&mesh, "torus");
    // every vertex sits within the tube envelope
    for v in &mesh.vertices {
        let ring = (v.position[0] * v.position[0] + v.position[1] * v.position[1]).sqrt();
        assert!(ring >= 1.0 - 0.25 - 1e-4 && ring <= 1.0 + 0.25 + 1e-4);
        assert!(v.position[2].abs() <= 0.25 + 1e-4);
    }
}

#[test]
fn torus_knot_tube_closes_on_itself() {
    let mesh = torus_knot(2, 3, 1.1, 0.3, 64, 8);
    assert_eq!(mesh.vertex_count(), 65 * 9);
    assert_well_formed(&mesh, "torus knot");
    // seam rows coincide: the first and last rings are the same circle
    let stride = 9;
    let last_ring = 64 * stride;
    for j in 0..stride {
        let a = mesh.vertices[j].position;
        let b = mesh.vertices[last_ring + j].position;
        for k in 0..3 {
            assert!(
                (a[k] - b[k]).abs() < 1e-2,
                "knot seam open at radial index {j}"
            );
        }
    }
}

#[test]
fn cylinder_tapers_and_caps() {
    let mesh = cylinder(0.3, 0.5, 1.2, 16);
    assert_well_formed(&mesh, "cylinder");
    // side rows + two caps (centre + seam-duplicated ring each)
    assert_eq!(mesh.vertex_count(), 2 * 17 + 2 * (1 + 17));
    let half = 0.6;
    for v in &mesh.vertices {
        assert!(v.position[1].abs() <= half + 1e-4);
        let r = (v.position[0] * v.position[0] + v.position[2] * v.position[2]).sqrt();
        assert!(r <= 0.5 + 1e-4, "radius exceeds the wide end");
    }
}

#[test]
fn edge_extraction_deduplicates_shared_edges() {
    // two triangles sharing one edge -> 5 unique edges
    let mut mesh = icosphere(0);
    mesh.indices = vec![0, 1, 2, 1, 2, 3];
    let edges = mesh.edge_indices();
    assert_eq!(edges.len(), 10);
    // every pair is emitted (min, max)
    for pair in edges.chunks_exact(2) {
        assert!(pair[0] < pair[1]);
    }
}
