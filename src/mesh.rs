//! Built-in geometry and the OBJ loader adapter.
//!
//! Everything here produces plain triangle lists. Faces wind so that
//! `cross(v2 - v1, v3 - v1)` points out of the solid.

use std::f32::consts::{PI, TAU};
use std::path::Path;

use crate::error::LoadError;
use crate::math::{wrap_unit, Vec3, Vec4};
use crate::triangle::{Texel, Triangle};

pub const CUBE_VERTICES: [Vec3; 8] = [
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(0.0, 1.0, 0.0),
    Vec3::new(1.0, 1.0, 0.0),
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(1.0, 0.0, 1.0),
    Vec3::new(0.0, 1.0, 1.0),
    Vec3::new(0.0, 0.0, 1.0),
];

/// Vertex indices into [`CUBE_VERTICES`], two triangles per face.
pub const CUBE_FACES: [[usize; 3]; 12] = [
    // South (z = 0)
    [0, 1, 2],
    [0, 2, 3],
    // East (x = 1)
    [3, 2, 4],
    [3, 4, 5],
    // North (z = 1)
    [5, 4, 6],
    [5, 6, 7],
    // West (x = 0)
    [7, 6, 1],
    [7, 1, 0],
    // Top (y = 1)
    [1, 6, 4],
    [1, 4, 2],
    // Bottom (y = 0)
    [5, 7, 0],
    [5, 0, 3],
];

const CUBE_UVS: [[Texel; 3]; 2] = [
    [Texel::new(0.0, 1.0), Texel::new(0.0, 0.0), Texel::new(1.0, 0.0)],
    [Texel::new(0.0, 1.0), Texel::new(1.0, 0.0), Texel::new(1.0, 1.0)],
];

/// Unit cube spanning `[0, 1]` on every axis: 8 vertices, 12 triangles.
///
/// Each face maps the whole texture.
pub fn cube() -> Vec<Triangle> {
    CUBE_FACES
        .iter()
        .enumerate()
        .map(|(i, face)| {
            Triangle::new(
                face.map(|v| Vec4::from(CUBE_VERTICES[v])),
                CUBE_UVS[i % 2],
            )
        })
        .collect()
}

/// UV sphere of radius 1 centered at the origin.
///
/// `segments` is the number of slices in both latitude and longitude and is
/// raised to at least 3. U runs once around the equator, V from the south
/// pole (0) to the north pole (1).
pub fn sphere(segments: u32) -> Vec<Triangle> {
    let n = segments.max(3) as usize;

    let vertex = |i: usize, j: usize| {
        let theta = PI * i as f32 / n as f32;
        let phi = TAU * j as f32 / n as f32;
        let position = Vec4::point(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin());
        let texel = Texel::new(j as f32 / n as f32, 1.0 - i as f32 / n as f32);
        (position, texel)
    };

    let mut triangles = Vec::with_capacity(2 * n * (n - 1));
    for i in 0..n {
        for j in 0..n {
            let (p00, t00) = vertex(i, j);
            let (p01, t01) = vertex(i, j + 1);
            let (p10, t10) = vertex(i + 1, j);
            let (p11, t11) = vertex(i + 1, j + 1);

            // Rows 0 and n collapse to the poles.
            if i + 1 < n {
                triangles.push(Triangle::new([p00, p11, p10], [t00, t11, t10]));
            }
            if i > 0 {
                triangles.push(Triangle::new([p00, p01, p11], [t00, t01, t11]));
            }
        }
    }
    triangles
}

/// Loads every object in an OBJ file as one triangulated triangle list.
///
/// Faces without texture coordinates get the default texel. V coordinates
/// outside `[0, 1]` are wrapped into it.
pub fn load_obj(path: impl AsRef<Path>) -> Result<Vec<Triangle>, LoadError> {
    let path = path.as_ref();
    let options = tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    };
    let (models, _materials) = tobj::load_obj(path, &options)?;

    let mut triangles = Vec::new();
    for model in &models {
        let mesh = &model.mesh;
        let position = |i: u32| {
            let i = i as usize * 3;
            Vec4::point(mesh.positions[i], mesh.positions[i + 1], mesh.positions[i + 2])
        };
        let texel = |i: u32| {
            let i = i as usize * 2;
            match mesh.texcoords.get(i..i + 2) {
                Some(&[u, v]) => {
                    let v = if (0.0..=1.0).contains(&v) { v } else { wrap_unit(v) };
                    Texel::new(u, v)
                }
                _ => Texel::default(),
            }
        };

        for face in mesh.indices.chunks_exact(3) {
            triangles.push(Triangle::new(
                [position(face[0]), position(face[1]), position(face[2])],
                [texel(face[0]), texel(face[1]), texel(face[2])],
            ));
        }
        log::trace!("OBJ object '{}': {} triangles", model.name, mesh.indices.len() / 3);
    }

    if triangles.is_empty() {
        return Err(LoadError::EmptyMesh);
    }
    log::debug!("Loaded {} ({} triangles)", path.display(), triangles.len());
    Ok(triangles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn centroid(t: &Triangle) -> Vec3 {
        let [a, b, c] = t.positions.map(Vec4::xyz);
        (a + b + c) / 3.0
    }

    #[test]
    fn cube_has_twelve_outward_triangles() {
        let tris = cube();
        assert_eq!(tris.len(), 12);
        let center = Vec3::new(0.5, 0.5, 0.5);
        for t in &tris {
            assert!(t.surface_normal().dot(centroid(t) - center) > 0.0);
        }
    }

    #[test]
    fn cube_south_face_matches_layout() {
        let tris = cube();
        assert_eq!(tris[0].positions[2], Vec4::point(1.0, 1.0, 0.0));
        assert_eq!(tris[1].texels[2], Texel::new(1.0, 1.0));
        assert_relative_eq!(tris[0].surface_normal(), Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn sphere_vertices_on_unit_sphere_and_faces_outward() {
        let n = 8;
        let tris = sphere(n);
        assert_eq!(tris.len(), 2 * 8 * 7);
        for t in &tris {
            for p in &t.positions {
                assert_relative_eq!(p.length(), 1.0, epsilon = 1e-5);
            }
            assert!(t.surface_normal().dot(centroid(t)) > 0.0);
        }
    }

    #[test]
    fn sphere_clamps_segments() {
        assert_eq!(sphere(0).len(), 2 * 3 * 2);
    }

    #[test]
    fn load_obj_triangulates_and_wraps_v() {
        let path = std::env::temp_dir().join(format!("softpipe-quad-{}.obj", std::process::id()));
        let obj = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 -0.25
vt 1 1
vt 0 1.5
f 1/1 2/2 3/3 4/4
";
        std::fs::write(&path, obj).unwrap();
        let tris = load_obj(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(tris.len(), 2);
        let texels: Vec<Texel> = tris.iter().flat_map(|t| t.texels).collect();
        assert!(texels.iter().all(|t| (0.0..=1.0).contains(&t.v)));
        assert!(texels.iter().any(|t| (t.v - 0.75).abs() < 1e-6));
        assert!(texels.iter().any(|t| (t.v - 0.5).abs() < 1e-6));
    }

    #[test]
    fn load_obj_reports_missing_file() {
        assert!(matches!(
            load_obj("definitely/missing.obj"),
            Err(LoadError::Obj(_))
        ));
    }
}
