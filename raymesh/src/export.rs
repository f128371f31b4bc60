//! Wavefront OBJ export

use std::io::{self, Write};

use crate::mesh::Mesh;

/// Write a mesh as OBJ
///
/// Emits one `v` and one `vn` line per vertex and one `f a//a b//b c//c`
/// line per triangle (indices are 1-based, normal index equals vertex index).
pub fn write_obj<W: Write>(mesh: &Mesh, mut out: W) -> io::Result<()> {
    writeln!(
        out,
        "# raymesh: {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    )?;
    for [x, y, z] in &mesh.vertices {
        writeln!(out, "v {x} {y} {z}")?;
    }
    for [x, y, z] in &mesh.normals {
        writeln!(out, "vn {x} {y} {z}")?;
    }
    for [a, b, c] in mesh.triangles() {
        let (a, b, c) = (a + 1, b + 1, c + 1);
        writeln!(out, "f {a}//{a} {b}//{b} {c}//{c}")?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::UpAxis;
    use crate::procedural::generate_sphere;

    #[test]
    fn test_obj_records() {
        let mesh = Mesh {
            vertices: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.5, 0.0]],
            normals: vec![[0.0, 0.0, 1.0]; 3],
            indices: vec![0, 1, 2],
        };
        let mut buf = Vec::new();
        write_obj(&mesh, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().skip(1).collect();

        assert_eq!(
            lines,
            vec![
                "v 0 0 0",
                "v 1 0 0",
                "v 0 1.5 0",
                "vn 0 0 1",
                "vn 0 0 1",
                "vn 0 0 1",
                "f 1//1 2//2 3//3",
            ]
        );
    }

    #[test]
    fn test_obj_line_counts_for_sphere() {
        let mesh: Mesh = generate_sphere(3, 8, UpAxis::Y);
        let mut buf = Vec::new();
        write_obj(&mesh, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let count = |prefix: &str| text.lines().filter(|l| l.starts_with(prefix)).count();
        assert_eq!(count("v "), mesh.vertex_count());
        assert_eq!(count("vn "), mesh.vertex_count());
        assert_eq!(count("f "), mesh.triangle_count());
    }
}
