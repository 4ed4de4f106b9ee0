//! # Primitive Shape Generation
//!
//! Generator functions for the primitive shapes mesh resources can be built
//! from. Everything here is Z-up: planes lie in XY, cylinders extend along Z.

use std::collections::HashMap;
use std::f32::consts::PI;

use super::GeometryData;

/// Generate a plane in the XY plane, centered at the origin, normal +Z.
///
/// # Arguments
/// * `width`, `height` - Plane extent along X and Y
/// * `segments_x`, `segments_y` - Number of subdivisions along each axis
/// * `uv_tiling` - How many times the texture repeats across the full plane
pub fn generate_plane(
    width: f32,
    height: f32,
    segments_x: u32,
    segments_y: u32,
    uv_tiling: [f32; 2],
) -> GeometryData {
    let mut data = GeometryData::new();

    let sx = segments_x.max(1);
    let sy = segments_y.max(1);

    for y in 0..=sy {
        let v = y as f32 / sy as f32;
        for x in 0..=sx {
            let u = x as f32 / sx as f32;
            data.positions.push([(u - 0.5) * width, (v - 0.5) * height, 0.0]);
            data.normals.push([0.0, 0.0, 1.0]);
            data.tex_coords.push([u * uv_tiling[0], v * uv_tiling[1]]);
        }
    }

    // Counter-clockwise when viewed from above
    for y in 0..sy {
        for x in 0..sx {
            let i = y * (sx + 1) + x;
            let next_row = i + sx + 1;
            data.indices.extend_from_slice(&[i, next_row, i + 1]);
            data.indices.extend_from_slice(&[next_row, next_row + 1, i + 1]);
        }
    }

    data
}

/// Generate a box centered at the origin with the given edge lengths.
///
/// Each face gets its own four vertices so normals stay hard-edged,
/// with UV coordinates from 0 to 1 per face.
pub fn generate_cube(size: [f32; 3]) -> GeometryData {
    let mut data = GeometryData::new();

    let [hx, hy, hz] = [size[0] * 0.5, size[1] * 0.5, size[2] * 0.5];

    // (normal, four corners counter-clockwise seen from outside)
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        // +Z
        ([0.0, 0.0, 1.0], [[-hx, -hy, hz], [hx, -hy, hz], [hx, hy, hz], [-hx, hy, hz]]),
        // -Z
        ([0.0, 0.0, -1.0], [[hx, -hy, -hz], [-hx, -hy, -hz], [-hx, hy, -hz], [hx, hy, -hz]]),
        // +X
        ([1.0, 0.0, 0.0], [[hx, -hy, hz], [hx, -hy, -hz], [hx, hy, -hz], [hx, hy, hz]]),
        // -X
        ([-1.0, 0.0, 0.0], [[-hx, -hy, -hz], [-hx, -hy, hz], [-hx, hy, hz], [-hx, hy, -hz]]),
        // +Y
        ([0.0, 1.0, 0.0], [[-hx, hy, hz], [hx, hy, hz], [hx, hy, -hz], [-hx, hy, -hz]]),
        // -Y
        ([0.0, -1.0, 0.0], [[-hx, -hy, -hz], [hx, -hy, -hz], [hx, -hy, hz], [-hx, -hy, hz]]),
    ];

    let face_uvs = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

    for (normal, corners) in faces {
        let base = data.positions.len() as u32;
        for (corner, uv) in corners.iter().zip(face_uvs.iter()) {
            data.positions.push(*corner);
            data.normals.push(normal);
            data.tex_coords.push(*uv);
        }
        data.indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    data
}

/// Generate a unit ico-sphere centered at the origin.
///
/// Starts from a regular icosahedron and subdivides each face `tessellation`
/// times, pushing every vertex onto the unit sphere. Shared edges reuse
/// midpoint vertices, so the mesh stays watertight.
///
/// Normals equal positions for a unit sphere; UVs are equirectangular.
pub fn generate_ico_sphere(tessellation: u32) -> GeometryData {
    // Golden-ratio icosahedron
    let t = (1.0 + 5.0f32.sqrt()) / 2.0;
    let mut positions: Vec<[f32; 3]> = [
        [-1.0, t, 0.0], [1.0, t, 0.0], [-1.0, -t, 0.0], [1.0, -t, 0.0],
        [0.0, -1.0, t], [0.0, 1.0, t], [0.0, -1.0, -t], [0.0, 1.0, -t],
        [t, 0.0, -1.0], [t, 0.0, 1.0], [-t, 0.0, -1.0], [-t, 0.0, 1.0],
    ]
    .iter()
    .map(|p| normalize(*p))
    .collect();

    let mut indices: Vec<u32> = vec![
        0, 11, 5, 0, 5, 1, 0, 1, 7, 0, 7, 10, 0, 10, 11,
        1, 5, 9, 5, 11, 4, 11, 10, 2, 10, 7, 6, 7, 1, 8,
        3, 9, 4, 3, 4, 2, 3, 2, 6, 3, 6, 8, 3, 8, 9,
        4, 9, 5, 2, 4, 11, 6, 2, 10, 8, 6, 7, 9, 8, 1,
    ];

    for _ in 0..tessellation.min(6) {
        let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
        let mut next = Vec::with_capacity(indices.len() * 4);

        for tri in indices.chunks_exact(3) {
            let (a, b, c) = (tri[0], tri[1], tri[2]);
            let ab = midpoint(&mut positions, &mut midpoints, a, b);
            let bc = midpoint(&mut positions, &mut midpoints, b, c);
            let ca = midpoint(&mut positions, &mut midpoints, c, a);

            next.extend_from_slice(&[a, ab, ca]);
            next.extend_from_slice(&[b, bc, ab]);
            next.extend_from_slice(&[c, ca, bc]);
            next.extend_from_slice(&[ab, bc, ca]);
        }

        indices = next;
    }

    let mut data = GeometryData::new();
    for p in &positions {
        data.positions.push(*p);
        data.normals.push(*p);
        let u = p[1].atan2(p[0]) / (2.0 * PI) + 0.5;
        let v = p[2] * 0.5 + 0.5;
        data.tex_coords.push([u, v]);
    }
    data.indices = indices;

    data
}

/// Generate a capped cylinder extending along Z from -height/2 to height/2.
///
/// # Arguments
/// * `radius` - Radius of the cylinder
/// * `height` - Height along the Z axis
/// * `segments` - Number of circular segments (minimum 3)
pub fn generate_cylinder(radius: f32, height: f32, segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = segments.max(3);
    let half = height * 0.5;

    // Side wall, with a duplicated seam vertex so UVs wrap cleanly
    for i in 0..=segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        let (sin_a, cos_a) = angle.sin_cos();
        let u = i as f32 / segs as f32;

        data.positions.push([radius * cos_a, radius * sin_a, -half]);
        data.normals.push([cos_a, sin_a, 0.0]);
        data.tex_coords.push([u, 0.0]);

        data.positions.push([radius * cos_a, radius * sin_a, half]);
        data.normals.push([cos_a, sin_a, 0.0]);
        data.tex_coords.push([u, 1.0]);
    }

    for i in 0..segs {
        let bottom = i * 2;
        let top = bottom + 1;
        data.indices.extend_from_slice(&[bottom, bottom + 2, top]);
        data.indices.extend_from_slice(&[top, bottom + 2, bottom + 3]);
    }

    // Caps share a center vertex each
    for (z, normal) in [(-half, [0.0, 0.0, -1.0f32]), (half, [0.0, 0.0, 1.0])] {
        let center = data.positions.len() as u32;
        data.positions.push([0.0, 0.0, z]);
        data.normals.push(normal);
        data.tex_coords.push([0.5, 0.5]);

        let ring = data.positions.len() as u32;
        for i in 0..segs {
            let angle = i as f32 * 2.0 * PI / segs as f32;
            let (sin_a, cos_a) = angle.sin_cos();
            data.positions.push([radius * cos_a, radius * sin_a, z]);
            data.normals.push(normal);
            data.tex_coords.push([cos_a * 0.5 + 0.5, sin_a * 0.5 + 0.5]);
        }

        for i in 0..segs {
            let a = ring + i;
            let b = ring + (i + 1) % segs;
            if normal[2] > 0.0 {
                data.indices.extend_from_slice(&[center, a, b]);
            } else {
                data.indices.extend_from_slice(&[center, b, a]);
            }
        }
    }

    data
}

fn normalize(p: [f32; 3]) -> [f32; 3] {
    let len = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
    [p[0] / len, p[1] / len, p[2] / len]
}

/// Returns the index of the unit-sphere midpoint of edge (a, b), creating it
/// on first use and reusing it for the neighbouring triangle.
fn midpoint(
    positions: &mut Vec<[f32; 3]>,
    cache: &mut HashMap<(u32, u32), u32>,
    a: u32,
    b: u32,
) -> u32 {
    let key = if a < b { (a, b) } else { (b, a) };
    if let Some(&idx) = cache.get(&key) {
        return idx;
    }

    let (pa, pb) = (positions[a as usize], positions[b as usize]);
    let mid = normalize([
        (pa[0] + pb[0]) * 0.5,
        (pa[1] + pb[1]) * 0.5,
        (pa[2] + pb[2]) * 0.5,
    ]);

    let idx = positions.len() as u32;
    positions.push(mid);
    cache.insert(key, idx);
    idx
}
