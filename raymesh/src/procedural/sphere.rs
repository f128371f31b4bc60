//! Unit UV-sphere with pole vertices

use std::f32::consts::PI;
use tracing::warn;

use crate::axis::UpAxis;
use crate::mesh::MeshBuilder;

/// Largest band count accepted per direction; keeps every index within `u32`
pub const MAX_BANDS: u32 = 1 << 14;

fn clamp_bands(lat_bands: u32, lon_bands: u32) -> (usize, usize) {
    (
        lat_bands.clamp(1, MAX_BANDS) as usize,
        lon_bands.clamp(3, MAX_BANDS) as usize,
    )
}

/// Number of vertices produced by [`generate_sphere`]: `(2T-1)·U + 2`
pub fn sphere_vertex_count(lat_bands: u32, lon_bands: u32) -> usize {
    let (t, u) = clamp_bands(lat_bands, lon_bands);
    (2 * t - 1) * u + 2
}

/// Number of triangles produced by [`generate_sphere`]: `2U + (2T-2)·2U`
pub fn sphere_triangle_count(lat_bands: u32, lon_bands: u32) -> usize {
    let (t, u) = clamp_bands(lat_bands, lon_bands);
    2 * u + (2 * t - 2) * 2 * u
}

/// Generate a unit UV-sphere centred at the origin
///
/// # Arguments
/// * `lat_bands` - Latitude bands per hemisphere, `T` (1..=[`MAX_BANDS`])
/// * `lon_bands` - Longitudinal divisions, `U` (3..=[`MAX_BANDS`])
/// * `up` - Axis the poles lie on
///
/// # Layout
/// Vertex 0 is the south pole, followed by `2T-1` rings of `U` vertices at
/// `lat = π·(i-T+1)/(2T)` and `lon = 2π·j/U`, then the north pole. Ring 0 is
/// the southernmost ring.
///
/// Normals equal positions, which is exact only because the surface is the
/// unit sphere. All triangles wind counter-clockwise seen from outside.
pub fn generate_sphere<M: MeshBuilder>(lat_bands: u32, lon_bands: u32, up: UpAxis) -> M {
    let lat_bands = if lat_bands < 1 {
        warn!("generate_sphere: lat_bands must be >= 1, clamping to 1");
        1
    } else if lat_bands > MAX_BANDS {
        warn!("generate_sphere: lat_bands {lat_bands} exceeds {MAX_BANDS}, clamping");
        MAX_BANDS
    } else {
        lat_bands
    };
    let lon_bands = if lon_bands < 3 {
        warn!("generate_sphere: lon_bands must be >= 3, clamping to 3");
        3
    } else if lon_bands > MAX_BANDS {
        warn!("generate_sphere: lon_bands {lon_bands} exceeds {MAX_BANDS}, clamping");
        MAX_BANDS
    } else {
        lon_bands
    };

    let mut mesh = M::default();
    let ring_count = 2 * lat_bands - 1;

    let south = up.compose(0.0, -1.0, 0.0);
    let south_index = mesh.add_vertex(south, south);

    // Rings, south to north
    let mut ring_start = Vec::with_capacity(ring_count as usize);
    for i in 0..ring_count {
        let lat = PI * (i as f32 - lat_bands as f32 + 1.0) / (2.0 * lat_bands as f32);
        let (sin_lat, cos_lat) = lat.sin_cos();

        let mut first = None;
        for j in 0..lon_bands {
            let lon = 2.0 * PI * j as f32 / lon_bands as f32;
            let (sin_lon, cos_lon) = lon.sin_cos();

            let position = up.compose(cos_lat * cos_lon, sin_lat, cos_lat * sin_lon);
            let index = mesh.add_vertex(position, position);
            first.get_or_insert(index);
        }
        ring_start.extend(first);
    }

    let north = up.compose(0.0, 1.0, 0.0);
    let north_index = mesh.add_vertex(north, north);

    // Winding below is derived in the Y-up frame
    let flip = up.flips_winding();
    let mut add_triangle = |a: u32, b: u32, c: u32| {
        if flip {
            mesh.add_triangle(a, c, b);
        } else {
            mesh.add_triangle(a, b, c);
        }
    };

    let ring_vertex = |ring: usize, j: u32| ring_start[ring] + (j % lon_bands);

    // South cap
    for j in 0..lon_bands {
        add_triangle(south_index, ring_vertex(0, j), ring_vertex(0, j + 1));
    }

    // Quad strips between adjacent rings
    for ring in 0..ring_start.len() - 1 {
        for j in 0..lon_bands {
            let a = ring_vertex(ring, j);
            let b = ring_vertex(ring + 1, j);
            let c = ring_vertex(ring, j + 1);
            let d = ring_vertex(ring + 1, j + 1);

            add_triangle(a, b, c);
            add_triangle(c, b, d);
        }
    }

    // North cap
    let top = ring_start.len() - 1;
    for j in 0..lon_bands {
        add_triangle(ring_vertex(top, j), north_index, ring_vertex(top, j + 1));
    }

    mesh
}
