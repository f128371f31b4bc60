//! Procedural mesh generation
//!
//! Parametric primitives for the ray-traced scene. Generators are generic
//! over [`MeshBuilder`](crate::mesh::MeshBuilder) and write full-precision
//! f32 data.

mod sphere;


pub use sphere::{MAX_BANDS, generate_sphere, sphere_triangle_count, sphere_vertex_count};
