//! `Solid`: a closed polygon mesh with boolean operations and rigid
//! transforms, backing every part of the jig.

use crate::bsp::Node;
use crate::float_types::Real;
use crate::float_types::parry3d::{
    bounding_volume::{Aabb, BoundingVolume},
    shape::{Shape, TriMesh},
};
use crate::plane::Plane;
use crate::polygon::Polygon;
use crate::vertex::Vertex;
use nalgebra::{
    Matrix4, Point3, Rotation3, Translation3, Vector3, partial_max, partial_min,
};
use std::sync::OnceLock;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A solid body as a soup of convex planar polygons.
#[derive(Debug, Clone, Default)]
pub struct Solid {
    pub polygons: Vec<Polygon>,

    /// Lazily calculated AABB that spans `polygons`.
    pub bounding_box: OnceLock<Aabb>,
}

impl Solid {
    /// Returns a new empty Solid.
    pub fn new() -> Self {
        Solid {
            polygons: Vec::new(),
            bounding_box: OnceLock::new(),
        }
    }

    /// Build a Solid from an existing polygon list.
    pub fn from_polygons(polygons: &[Polygon]) -> Self {
        Solid {
            polygons: polygons.to_vec(),
            bounding_box: OnceLock::new(),
        }
    }

    /// Split polygons into (may_touch, cannot_touch) using bounding-box tests.
    fn partition_polys(polys: &[Polygon], other_bb: &Aabb) -> (Vec<Polygon>, Vec<Polygon>) {
        let mut maybe = Vec::new();
        let mut never = Vec::new();
        for p in polys {
            if p.bounding_box().intersects(other_bb) {
                maybe.push(p.clone());
            } else {
                never.push(p.clone());
            }
        }
        (maybe, never)
    }

    /// Helper to collect all vertices from the solid.
    #[cfg(not(feature = "parallel"))]
    pub fn vertices(&self) -> Vec<Vertex> {
        self.polygons
            .iter()
            .flat_map(|p| p.vertices.clone())
            .collect()
    }

    /// Parallel helper to collect all vertices from the solid.
    #[cfg(feature = "parallel")]
    pub fn vertices(&self) -> Vec<Vertex> {
        self.polygons
            .par_iter()
            .flat_map(|p| p.vertices.clone())
            .collect()
    }

    /// Return a new Solid representing the union of the two solids.
    ///
    /// ```text
    /// let c = a.union(b);
    ///     +-------+            +-------+
    ///     |       |            |       |
    ///     |   a   |            |   c   |
    ///     |    +--+----+   =   |       +----+
    ///     +----+--+    |       +----+       |
    ///          |   b   |            |   c   |
    ///          |       |            |       |
    ///          +-------+            +-------+
    /// ```
    pub fn union(&self, other: &Solid) -> Solid {
        // avoid splitting obvious non-intersecting faces
        let (a_clip, a_passthru) =
            Self::partition_polys(&self.polygons, &other.bounding_box());
        let (b_clip, b_passthru) =
            Self::partition_polys(&other.polygons, &self.bounding_box());

        let mut a = Node::from_polygons(&a_clip);
        let mut b = Node::from_polygons(&b_clip);

        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(&b.all_polygons());

        // combine results and untouched faces
        let mut final_polys = a.all_polygons();
        final_polys.extend(a_passthru);
        final_polys.extend(b_passthru);

        Solid {
            polygons: final_polys,
            bounding_box: OnceLock::new(),
        }
    }

    /// Return a new Solid representing the difference of the two solids.
    ///
    /// ```text
    /// let c = a.difference(b);
    ///     +-------+            +-------+
    ///     |       |            |       |
    ///     |   a   |            |   c   |
    ///     |    +--+----+   =   |    +--+
    ///     +----+--+    |       +----+
    ///          |   b   |
    ///          |       |
    ///          +-------+
    /// ```
    pub fn difference(&self, other: &Solid) -> Solid {
        // avoid splitting obvious non-intersecting faces
        let (a_clip, a_passthru) =
            Self::partition_polys(&self.polygons, &other.bounding_box());
        let (b_clip, _b_passthru) =
            Self::partition_polys(&other.polygons, &self.bounding_box());

        let mut a = Node::from_polygons(&a_clip);
        let mut b = Node::from_polygons(&b_clip);

        a.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(&b.all_polygons());
        a.invert();

        // combine results and untouched faces
        let mut final_polys = a.all_polygons();
        final_polys.extend(a_passthru);

        Solid {
            polygons: final_polys,
            bounding_box: OnceLock::new(),
        }
    }

    /// Apply an arbitrary 3D transform (as a 4x4 matrix) to the solid.
    /// Normals transform by the inverse transpose.
    pub fn transform(&self, mat: &Matrix4<Real>) -> Solid {
        let mat_inv_transpose = mat
            .try_inverse()
            .expect("transform matrix not invertible")
            .transpose();
        let mut solid = self.clone();

        for poly in &mut solid.polygons {
            for vert in &mut poly.vertices {
                let homog_pos = mat * vert.pos.to_homogeneous();
                vert.pos = Point3::from_homogeneous(homog_pos)
                    .expect("transform produced a point at infinity");
                vert.normal = mat_inv_transpose.transform_vector(&vert.normal).normalize();
            }

            // keep the cached plane consistent with the new vertex positions
            poly.plane = Plane::from_vertices(&poly.vertices);
        }

        // invalidate the old cached bounding box
        solid.bounding_box = OnceLock::new();

        solid
    }

    /// Returns a new Solid translated by vector.
    pub fn translate_vector(&self, vector: Vector3<Real>) -> Solid {
        self.transform(&Translation3::from(vector).to_homogeneous())
    }

    /// Returns a new Solid translated by x, y, and z.
    pub fn translate(&self, x: Real, y: Real, z: Real) -> Solid {
        self.translate_vector(Vector3::new(x, y, z))
    }

    /// Rotates the solid by x_degrees, y_degrees, z_degrees (applied x, y, z).
    pub fn rotate(&self, x_deg: Real, y_deg: Real, z_deg: Real) -> Solid {
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), x_deg.to_radians());
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), y_deg.to_radians());
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), z_deg.to_radians());
        let rot = rz * ry * rx;
        self.transform(&rot.to_homogeneous())
    }

    /// Returns an [`Aabb`] indicating the 3D bounds of all polygons.
    pub fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            let mut min_x = Real::MAX;
            let mut min_y = Real::MAX;
            let mut min_z = Real::MAX;
            let mut max_x = -Real::MAX;
            let mut max_y = -Real::MAX;
            let mut max_z = -Real::MAX;

            for poly in &self.polygons {
                for v in &poly.vertices {
                    min_x = *partial_min(&min_x, &v.pos.x).unwrap();
                    min_y = *partial_min(&min_y, &v.pos.y).unwrap();
                    min_z = *partial_min(&min_z, &v.pos.z).unwrap();

                    max_x = *partial_max(&max_x, &v.pos.x).unwrap();
                    max_y = *partial_max(&max_y, &v.pos.y).unwrap();
                    max_z = *partial_max(&max_z, &v.pos.z).unwrap();
                }
            }

            // No polygons: a trivial AABB at the origin
            if min_x > max_x {
                return Aabb::new(Point3::origin(), Point3::origin());
            }

            Aabb::new(
                Point3::new(min_x, min_y, min_z),
                Point3::new(max_x, max_y, max_z),
            )
        })
    }

    /// Invalidates the cached bounding box.
    pub fn invalidate_bounding_box(&mut self) {
        self.bounding_box = OnceLock::new();
    }

    /// Triangle list over all polygons (fan triangulation).
    pub fn triangles(&self) -> Vec<[Vertex; 3]> {
        self.polygons
            .iter()
            .flat_map(|poly| poly.triangulate())
            .collect()
    }

    /// Extracts flat vertex and index buffers from the triangulated solid.
    fn vertices_and_indices(&self) -> (Vec<Point3<Real>>, Vec<[u32; 3]>) {
        let triangles = self.triangles();
        let vertices = triangles
            .iter()
            .flat_map(|t| [t[0].pos, t[1].pos, t[2].pos])
            .collect();
        let indices = (0..triangles.len())
            .map(|i| {
                let offset = i as u32 * 3;
                [offset, offset + 1, offset + 2]
            })
            .collect();
        (vertices, indices)
    }

    /// Convert the polygons in this solid to a parry `TriMesh`.
    pub fn to_trimesh(&self) -> Option<TriMesh> {
        let (vertices, indices) = self.vertices_and_indices();
        TriMesh::new(vertices, indices).ok()
    }

    /// Enclosed volume, computed from mass properties at unit density.
    /// Zero for an empty or degenerate solid.
    pub fn volume(&self) -> Real {
        self.to_trimesh()
            .map(|trimesh| trimesh.mass_properties(1.0).mass())
            .unwrap_or(0.0)
    }

    /// Edge-parity manifold check: every undirected edge of the triangulated
    /// surface must be used by exactly two triangles. Holds for the solids
    /// produced by extrusion; boolean results may carry benign T-junctions
    /// and are not expected to pass.
    #[cfg(feature = "hashmap")]
    pub fn is_manifold(&self) -> bool {
        use hashbrown::HashMap;

        // mm-scale geometry: quantizing to 1e-5 merges vertices that the
        // kernel already treats as identical
        fn key(p: &Point3<Real>) -> (i64, i64, i64) {
            (
                (p.x * 1e5).round() as i64,
                (p.y * 1e5).round() as i64,
                (p.z * 1e5).round() as i64,
            )
        }

        let mut edge_uses: HashMap<((i64, i64, i64), (i64, i64, i64)), u32> =
            HashMap::new();

        for tri in self.triangles() {
            for i in 0..3 {
                let a = key(&tri[i].pos);
                let b = key(&tri[(i + 1) % 3].pos);
                if a == b {
                    return false; // degenerate edge
                }
                let edge = if a < b { (a, b) } else { (b, a) };
                *edge_uses.entry(edge).or_insert(0) += 1;
            }
        }

        edge_uses.values().all(|&count| count == 2)
    }
}
