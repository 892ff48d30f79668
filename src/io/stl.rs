//! STL export, ASCII and binary.

use crate::solid::Solid;
use std::io::Cursor;

/// Convert a solid to an **ASCII STL** string with the given `name`.
///
/// ```rust
/// # use drilljig::profile::Profile;
/// let cube = Profile::rectangle(1.0, 1.0).extrude(1.0);
/// let text = cube.to_stl_ascii("cube");
/// assert!(text.starts_with("solid cube"));
/// ```
pub fn to_stl_ascii(solid: &Solid, name: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("solid {name}\n"));

    for tri in solid.triangles() {
        let n = tri[0].normal;
        out.push_str(&format!(
            "  facet normal {:.6} {:.6} {:.6}\n",
            n.x, n.y, n.z
        ));
        out.push_str("    outer loop\n");
        for v in &tri {
            let p = v.pos;
            out.push_str(&format!(
                "      vertex {:.6} {:.6} {:.6}\n",
                p.x, p.y, p.z
            ));
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    }

    out.push_str(&format!("endsolid {name}\n"));
    out
}

/// Convert a solid to a **binary STL** byte vector.
///
/// The resulting `Vec<u8>` can then be written to a file or handled in
/// memory.
pub fn to_stl_binary(solid: &Solid) -> std::io::Result<Vec<u8>> {
    use stl_io::{Normal, Triangle, Vertex, write_stl};

    let mut triangles = Vec::<Triangle>::new();

    for tri in solid.triangles() {
        let n = tri[0].normal;
        #[allow(clippy::unnecessary_cast)]
        triangles.push(Triangle {
            normal: Normal::new([n.x as f32, n.y as f32, n.z as f32]),
            vertices: tri.map(|v| {
                let p = v.pos;
                Vertex::new([p.x as f32, p.y as f32, p.z as f32])
            }),
        });
    }

    let mut cursor = Cursor::new(Vec::new());
    write_stl(&mut cursor, triangles.iter())?;
    Ok(cursor.into_inner())
}

impl Solid {
    pub fn to_stl_ascii(&self, name: &str) -> String {
        self::to_stl_ascii(self, name)
    }
    pub fn to_stl_binary(&self) -> std::io::Result<Vec<u8>> {
        self::to_stl_binary(self)
    }
}
