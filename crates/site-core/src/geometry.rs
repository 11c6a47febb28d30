//! Procedural meshes for the ambient scene.
//!
//! Everything here is pure data generation: interleaved vertices plus
//! triangle indices, with a unique-edge extraction used by the wireframe
//! pipelines. Subdivision levels are chosen by the quality tier in `scene`.

use fnv::{FnvHashMap, FnvHashSet};
use glam::Vec3;

/// Interleaved vertex layout shared with the WGSL pipelines.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Unique undirected edges, flattened as index pairs for a line list.
    pub fn edge_indices(&self) -> Vec<u32> {
        let mut seen: FnvHashSet<(u32, u32)> = FnvHashSet::default();
        let mut out = Vec::new();
        for tri in self.indices.chunks_exact(3) {
            for &(a, b) in &[(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                let key = (a.min(b), a.max(b));
                if seen.insert(key) {
                    out.push(key.0);
                    out.push(key.1);
                }
            }
        }
        out
    }
}

fn push_vertex(mesh: &mut MeshData, position: Vec3, normal: Vec3) -> u32 {
    let idx = mesh.vertices.len() as u32;
    mesh.vertices.push(Vertex {
        position: position.to_array(),
        normal: normal.normalize_or_zero().to_array(),
    });
    idx
}

/// Unit icosphere. `subdivisions == 0` is the raw icosahedron (12 vertices,
/// 20 faces); each level splits every triangle in four.
pub fn icosphere(subdivisions: u32) -> MeshData {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let raw = [
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ];
    let mut mesh = MeshData::default();
    for v in raw {
        let n = v.normalize();
        push_vertex(&mut mesh, n, n);
    }
    let mut indices: Vec<u32> = vec![
        0, 11, 5, 0, 5, 1, 0, 1, 7, 0, 7, 10, 0, 10, 11, //
        1, 5, 9, 5, 11, 4, 11, 10, 2, 10, 7, 6, 7, 1, 8, //
        3, 9, 4, 3, 4, 2, 3, 2, 6, 3, 6, 8, 3, 8, 9, //
        4, 9, 5, 2, 4, 11, 6, 2, 10, 8, 6, 7, 9, 8, 1,
    ];

    for _ in 0..subdivisions {
        let mut midpoints: FnvHashMap<(u32, u32), u32> = FnvHashMap::default();
        let mut next = Vec::with_capacity(indices.len() * 4);
        for tri in indices.chunks_exact(3) {
            let mid = |mesh: &mut MeshData, cache: &mut FnvHashMap<(u32, u32), u32>, a: u32, b: u32| {
                let key = (a.min(b), a.max(b));
                if let Some(&m) = cache.get(&key) {
                    return m;
                }
                let pa = Vec3::from(mesh.vertices[a as usize].position);
                let pb = Vec3::from(mesh.vertices[b as usize].position);
                let p = ((pa + pb) * 0.5).normalize();
                let m = push_vertex(mesh, p, p);
                cache.insert(key, m);
                m
            };
            let (a, b, c) = (tri[0], tri[1], tri[2]);
            let ab = mid(&mut mesh, &mut midpoints, a, b);
            let bc = mid(&mut mesh, &mut midpoints, b, c);
            let ca = mid(&mut mesh, &mut midpoints, c, a);
            next.extend_from_slice(&[a, ab, ca, b, bc, ab, c, ca, bc, ab, bc, ca]);
        }
        indices = next;
    }
    mesh.indices = indices;
    mesh
}

/// Torus in the XY plane, centred at the origin.
pub fn torus(major_radius: f32, minor_radius: f32, major_segments: u32, minor_segments: u32) -> MeshData {
    let mut mesh = MeshData::default();
    for i in 0..=major_segments {
        let u = i as f32 / major_segments as f32 * std::f32::consts::TAU;
        let (su, cu) = u.sin_cos();
        let ring_center = Vec3::new(cu * major_radius, su * major_radius, 0.0);
        for j in 0..=minor_segments {
            let v = j as f32 / minor_segments as f32 * std::f32::consts::TAU;
            let (sv, cv) = v.sin_cos();
            let normal = Vec3::new(cu * cv, su * cv, sv);
            push_vertex(&mut mesh, ring_center + normal * minor_radius, normal);
        }
    }
    let stride = minor_segments + 1;
    for i in 0..major_segments {
        for j in 0..minor_segments {
            let a = i * stride + j;
            let b = (i + 1) * stride + j;
            mesh.indices
                .extend_from_slice(&[a, b, a + 1, b, b + 1, a + 1]);
        }
    }
    mesh
}

fn knot_point(p: f32, q: f32, t: f32) -> Vec3 {
    let r = 2.0 + (q * t).cos();
    Vec3::new(r * (p * t).cos(), r * (p * t).sin(), (q * t).sin())
}

/// (p,q) torus knot tube. The centre curve is sampled with seam duplication
/// so the tube closes cleanly; the frame is derived from the local tangent.
pub fn torus_knot(
    p: u32,
    q: u32,
    radius: f32,
    tube_radius: f32,
    tubular_segments: u32,
    radial_segments: u32,
) -> MeshData {
    let mut mesh = MeshData::default();
    let (pf, qf) = (p as f32, q as f32);
    let scale = radius / 3.0;
    for i in 0..=tubular_segments {
        let t = i as f32 / tubular_segments as f32 * std::f32::consts::TAU;
        let p1 = knot_point(pf, qf, t);
        let p2 = knot_point(pf, qf, t + 0.01);
        let tangent = p2 - p1;
        let bitangent = tangent.cross(p2 + p1).normalize();
        let normal = bitangent.cross(tangent).normalize();
        for j in 0..=radial_segments {
            let v = j as f32 / radial_segments as f32 * std::f32::consts::TAU;
            let (sv, cv) = v.sin_cos();
            let dir = normal * cv + bitangent * sv;
            push_vertex(&mut mesh, (p1 + dir * tube_radius) * scale, dir);
        }
    }
    let stride = radial_segments + 1;
    for i in 0..tubular_segments {
        for j in 0..radial_segments {
            let a = i * stride + j;
            let b = (i + 1) * stride + j;
            mesh.indices
                .extend_from_slice(&[a, b, a + 1, b, b + 1, a + 1]);
        }
    }
    mesh
}

/// Capped, optionally tapered cylinder along +Y.
pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> MeshData {
    let mut mesh = MeshData::default();
    let half = height / 2.0;
    let slope = (radius_bottom - radius_top) / height.max(1e-6);

    // side rows, seam duplicated
    for (y, r) in [(half, radius_top), (-half, radius_bottom)] {
        for i in 0..=radial_segments {
            let u = i as f32 / radial_segments as f32 * std::f32::consts::TAU;
            let (su, cu) = u.sin_cos();
            let normal = Vec3::new(cu, slope, su);
            push_vertex(&mut mesh, Vec3::new(cu * r, y, su * r), normal);
        }
    }
    let stride = radial_segments + 1;
    for i in 0..radial_segments {
        let a = i;
        let b = i + stride;
        mesh.indices
            .extend_from_slice(&[a, b, a + 1, b, b + 1, a + 1]);
    }

    // caps as triangle fans around a centre vertex
    for (y, r, up) in [(half, radius_top, 1.0), (-half, radius_bottom, -1.0)] {
        let normal = Vec3::new(0.0, up, 0.0);
        let center = push_vertex(&mut mesh, Vec3::new(0.0, y, 0.0), normal);
        let ring_start = mesh.vertices.len() as u32;
        for i in 0..=radial_segments {
            let u = i as f32 / radial_segments as f32 * std::f32::consts::TAU;
            let (su, cu) = u.sin_cos();
            push_vertex(&mut mesh, Vec3::new(cu * r, y, su * r), normal);
        }
        for i in 0..radial_segments {
            let a = ring_start + i;
            let b = ring_start + i + 1;
            if up > 0.0 {
                mesh.indices.extend_from_slice(&[center, b, a]);
            } else {
                mesh.indices.extend_from_slice(&[center, a, b]);
            }
        }
    }
    mesh
}
