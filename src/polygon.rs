//! A planar `Polygon` with a cached `Plane`, the unit of geometry the BSP
//! tree splits and the exporters triangulate.

use crate::float_types::Real;
use crate::float_types::parry3d::bounding_volume::Aabb;
use crate::plane::Plane;
use crate::vertex::Vertex;
use nalgebra::{Point3, partial_max, partial_min};

/// A convex polygon of at least three vertices lying in one plane.
///
/// Every constructor in this crate (extrusion caps, side walls, BSP split
/// fragments) preserves convexity, which keeps triangulation a simple fan.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<Vertex>,
    pub plane: Plane,
}

impl Polygon {
    /// Build a polygon from vertices; the plane is recomputed from them.
    pub fn new(vertices: Vec<Vertex>) -> Self {
        debug_assert!(
            vertices.len() >= 3,
            "degenerate polygon: fewer than three vertices"
        );
        let plane = Plane::from_vertices(&vertices);
        Polygon { vertices, plane }
    }

    /// Reverse winding, flip vertex normals and the plane.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        for v in &mut self.vertices {
            v.flip();
        }
        self.plane.flip();
    }

    /// Recompute the cached plane from the current vertex positions and
    /// assign its normal to all vertices.
    pub fn set_new_normal(&mut self) {
        self.plane = Plane::from_vertices(&self.vertices);
        let n = self.plane.normal();
        for v in &mut self.vertices {
            v.normal = n;
        }
    }

    /// Fan triangulation from the first vertex.
    pub fn triangulate(&self) -> Vec<[Vertex; 3]> {
        let mut triangles = Vec::with_capacity(self.vertices.len().saturating_sub(2));
        for i in 1..self.vertices.len().saturating_sub(1) {
            triangles.push([self.vertices[0], self.vertices[i], self.vertices[i + 1]]);
        }
        triangles
    }

    /// Axis-aligned bounds of this polygon alone.
    pub fn bounding_box(&self) -> Aabb {
        let mut mins = Point3::new(Real::MAX, Real::MAX, Real::MAX);
        let mut maxs = Point3::new(-Real::MAX, -Real::MAX, -Real::MAX);
        for v in &self.vertices {
            mins.x = *partial_min(&mins.x, &v.pos.x).unwrap();
            mins.y = *partial_min(&mins.y, &v.pos.y).unwrap();
            mins.z = *partial_min(&mins.z, &v.pos.z).unwrap();
            maxs.x = *partial_max(&maxs.x, &v.pos.x).unwrap();
            maxs.y = *partial_max(&maxs.y, &v.pos.y).unwrap();
            maxs.z = *partial_max(&maxs.z, &v.pos.z).unwrap();
        }
        Aabb::new(mins, maxs)
    }
}
