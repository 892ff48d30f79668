//! 2D `Profile`s in the XY plane and their linear extrusion into
//! [`Solid`](crate::solid::Solid)s.
//!
//! Every solid in the jig starts life here: plates and walls as (rounded)
//! rectangles, the hinge opening as a slot, counterbores as circles, ribs
//! as triangles.

use crate::float_types::{EPSILON, FRAC_PI_2, PI, Real, TAU};
use crate::polygon::Polygon;
use crate::solid::Solid;
use crate::vertex::Vertex;
use geo::{
    Area, Coord, CoordsIter, Geometry, GeometryCollection, LineString, MapCoords, Orient,
    Polygon as GeoPolygon, TriangulateEarcut, line_string, orient::Direction,
};
use nalgebra::{Point3, Vector3};

/// A collection of closed 2D regions in the XY plane.
#[derive(Debug, Clone, Default)]
pub struct Profile {
    pub geometry: GeometryCollection<Real>,
}

impl Profile {
    pub fn new() -> Self {
        Profile {
            geometry: GeometryCollection::default(),
        }
    }

    /// Wrap a geometry collection, normalizing ring orientation so that
    /// exteriors wind counter-clockwise and holes clockwise.
    pub fn from_geo(geometry: GeometryCollection<Real>) -> Self {
        let oriented = GeometryCollection(
            geometry
                .0
                .into_iter()
                .map(|geom| match geom {
                    Geometry::Polygon(poly) => {
                        Geometry::Polygon(poly.orient(Direction::Default))
                    },
                    other => other,
                })
                .collect(),
        );
        Profile { geometry: oriented }
    }

    /// Creates a 2D rectangle in the XY plane with one corner at the origin.
    pub fn rectangle(width: Real, length: Real) -> Self {
        let outer = line_string![
            (x: 0.0,   y: 0.0),
            (x: width, y: 0.0),
            (x: width, y: length),
            (x: 0.0,   y: length),
            (x: 0.0,   y: 0.0), // close explicitly
        ];
        let polygon_2d = GeoPolygon::new(outer, vec![]);

        Profile::from_geo(GeometryCollection(vec![Geometry::Polygon(polygon_2d)]))
    }

    /// Rounded rectangle in the XY plane, from (0,0) to (width,height) with
    /// radius for corners. `corner_segments` controls the smoothness of each
    /// rounded corner.
    pub fn rounded_rectangle(
        width: Real,
        height: Real,
        corner_radius: Real,
        corner_segments: usize,
    ) -> Self {
        let r = corner_radius.min(width * 0.5).min(height * 0.5);
        if r <= EPSILON || corner_segments == 0 {
            return Profile::rectangle(width, height);
        }
        // Approximate each 90° corner with `corner_segments` arcs
        let step = FRAC_PI_2 / corner_segments as Real;

        let corner = |cx: Real, cy: Real, start_angle: Real| {
            (0..=corner_segments).map(move |i| {
                let angle = start_angle + (i as Real) * step;
                (cx + r * angle.cos(), cy + r * angle.sin())
            })
        };

        let mut coords: Vec<(Real, Real)> = corner(r, r, PI) // Bottom-left
            .chain(corner(width - r, r, 1.5 * PI)) // Bottom-right
            .chain(corner(width - r, height - r, 0.0)) // Top-right
            .chain(corner(r, height - r, 0.5 * PI)) // Top-left
            .collect();

        coords.push(coords[0]); // close

        let polygon_2d = GeoPolygon::new(LineString::from(coords), vec![]);
        Profile::from_geo(GeometryCollection(vec![Geometry::Polygon(polygon_2d)]))
    }

    /// Creates a 2D circle centred at the origin.
    pub fn circle(radius: Real, segments: usize) -> Self {
        if segments < 3 {
            return Profile::new();
        }
        let mut coords: Vec<(Real, Real)> = (0..segments)
            .map(|i| {
                let theta = TAU * (i as Real) / (segments as Real);
                (radius * theta.cos(), radius * theta.sin())
            })
            .collect();
        coords.push(coords[0]); // close

        let polygon_2d = GeoPolygon::new(LineString::from(coords), vec![]);
        Profile::from_geo(GeometryCollection(vec![Geometry::Polygon(polygon_2d)]))
    }

    /// Slot (stadium) centred at the origin: overall `length` along X,
    /// `width` across Y, semicircular ends. This is the opening shape of the
    /// hinge body. `segments` controls the smoothness of each end cap.
    pub fn slot(length: Real, width: Real, segments: usize) -> Self {
        let r = width * 0.5;
        if length <= width {
            // Fully round: the slot degenerates to a circle
            return Profile::circle(r, (segments * 2).max(3));
        }
        let half = length * 0.5 - r;
        let step = PI / segments.max(1) as Real;

        let cap = |cx: Real, start_angle: Real| {
            (0..=segments.max(1)).map(move |i| {
                let angle = start_angle + (i as Real) * step;
                (cx + r * angle.cos(), r * angle.sin())
            })
        };

        // Right cap sweeps -90°..90°, left cap 90°..270°, counter-clockwise.
        let mut coords: Vec<(Real, Real)> = cap(half, -FRAC_PI_2)
            .chain(cap(-half, FRAC_PI_2))
            .collect();
        coords.push(coords[0]); // close

        let polygon_2d = GeoPolygon::new(LineString::from(coords), vec![]);
        Profile::from_geo(GeometryCollection(vec![Geometry::Polygon(polygon_2d)]))
    }

    /// Creates a 2D polygon in the XY plane from a list of `[x, y]` points.
    pub fn polygon(points: &[[Real; 2]]) -> Self {
        if points.len() < 3 {
            return Profile::new();
        }
        let mut coords: Vec<(Real, Real)> = points.iter().map(|p| (p[0], p[1])).collect();
        if coords[0] != *coords.last().unwrap() {
            coords.push(coords[0]); // close
        }
        let polygon_2d = GeoPolygon::new(LineString::from(coords), vec![]);
        Profile::from_geo(GeometryCollection(vec![Geometry::Polygon(polygon_2d)]))
    }

    /// Returns a copy translated by (dx, dy).
    pub fn translate(&self, dx: Real, dy: Real) -> Self {
        Profile {
            geometry: self.geometry.map_coords(|c| Coord {
                x: c.x + dx,
                y: c.y + dy,
            }),
        }
    }

    /// Total enclosed area (holes subtracted).
    pub fn area(&self) -> Real {
        self.geometry
            .0
            .iter()
            .map(|geom| match geom {
                Geometry::Polygon(poly) => poly.unsigned_area(),
                _ => 0.0,
            })
            .sum()
    }

    /// Ear-cut triangulation of all polygons, embedded at z = 0.
    pub fn triangulate(&self) -> Vec<[Point3<Real>; 3]> {
        let mut result = Vec::new();
        for geom in &self.geometry {
            let Geometry::Polygon(polygon) = geom else {
                continue;
            };
            let triangulation = polygon.earcut_triangles_raw();
            let triangle_indices = triangulation.triangle_indices;
            let vertices = triangulation.vertices;

            for tri in triangle_indices.chunks_exact(3) {
                result.push([
                    Point3::new(vertices[2 * tri[0]], vertices[2 * tri[0] + 1], 0.0),
                    Point3::new(vertices[2 * tri[1]], vertices[2 * tri[1] + 1], 0.0),
                    Point3::new(vertices[2 * tri[2]], vertices[2 * tri[2] + 1], 0.0),
                ]);
            }
        }
        result
    }

    /// Linearly extrude the profile from z = 0 to z = `height`, producing a
    /// closed solid: triangulated caps plus one wall quad per ring edge.
    pub fn extrude(&self, height: Real) -> Solid {
        if height <= EPSILON {
            return Solid::new();
        }

        let mut polygons: Vec<Polygon> = Vec::new();

        // Caps. Ear-cut winding is not guaranteed, so orient each triangle
        // explicitly: top faces +Z, bottom faces -Z.
        for tri in self.triangulate() {
            let n = (tri[1] - tri[0]).cross(&(tri[2] - tri[0]));
            let ccw = n.z > 0.0;

            let top: [Point3<Real>; 3] = if ccw {
                [tri[0], tri[1], tri[2]]
            } else {
                [tri[0], tri[2], tri[1]]
            };
            let bottom: [Point3<Real>; 3] = [top[0], top[2], top[1]];

            polygons.push(Polygon::new(
                top.iter()
                    .map(|p| Vertex::new(Point3::new(p.x, p.y, height), Vector3::z()))
                    .collect(),
            ));
            polygons.push(Polygon::new(
                bottom
                    .iter()
                    .map(|p| Vertex::new(*p, -Vector3::z()))
                    .collect(),
            ));
        }

        // Walls. Exterior rings wind CCW and holes CW (normalized in
        // `from_geo`), so the same quad recipe faces outward for both.
        for geom in &self.geometry {
            let Geometry::Polygon(polygon) = geom else {
                continue;
            };
            let rings =
                std::iter::once(polygon.exterior()).chain(polygon.interiors().iter());
            for ring in rings {
                let coords: Vec<Coord<Real>> = ring.coords_iter().collect();
                if coords.len() < 2 {
                    continue;
                }
                // closed rings repeat the first coordinate at the end
                for pair in coords.windows(2) {
                    let (a, b) = (pair[0], pair[1]);
                    let d = Vector3::new(b.x - a.x, b.y - a.y, 0.0);
                    if d.norm_squared() < EPSILON * EPSILON {
                        continue;
                    }
                    let normal = Vector3::new(d.y, -d.x, 0.0).normalize();
                    polygons.push(Polygon::new(vec![
                        Vertex::new(Point3::new(a.x, a.y, 0.0), normal),
                        Vertex::new(Point3::new(b.x, b.y, 0.0), normal),
                        Vertex::new(Point3::new(b.x, b.y, height), normal),
                        Vertex::new(Point3::new(a.x, a.y, height), normal),
                    ]));
                }
            }
        }

        Solid::from_polygons(&polygons)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rectangle_area() {
        let rect = Profile::rectangle(2.0, 3.0);
        assert!((rect.area() - 6.0).abs() < 1e-9);
    }

    #[test]
    fn slot_area_matches_stadium_formula() {
        let (length, width) = (61.5, 13.5);
        let slot = Profile::slot(length, width, 64);
        let r = width / 2.0;
        let exact = (length - width) * width + PI * r * r;
        // polygonal approximation stays within a quarter percent at 64 segments
        assert!((slot.area() - exact).abs() / exact < 2.5e-3);
    }

    #[test]
    fn slot_shorter_than_wide_is_a_circle() {
        let slot = Profile::slot(5.0, 10.0, 16);
        let exact = PI * 25.0;
        assert!((slot.area() - exact).abs() / exact < 1e-2);
    }

    #[test]
    fn rounded_rectangle_loses_corner_area() {
        let square = Profile::rectangle(10.0, 10.0);
        let rounded = Profile::rounded_rectangle(10.0, 10.0, 2.0, 32);
        assert!(rounded.area() < square.area());
        // four corners lose (1 - π/4)·r² each
        let expected = 100.0 - (4.0 - PI) * 4.0;
        assert!((rounded.area() - expected).abs() < 0.05);
    }

    #[test]
    fn extrude_rectangle_bounds() {
        let solid = Profile::rectangle(2.0, 3.0).extrude(4.0);
        let bb = solid.bounding_box();
        assert!((bb.mins.x - 0.0).abs() < 1e-9 && (bb.maxs.x - 2.0).abs() < 1e-9);
        assert!((bb.mins.y - 0.0).abs() < 1e-9 && (bb.maxs.y - 3.0).abs() < 1e-9);
        assert!((bb.mins.z - 0.0).abs() < 1e-9 && (bb.maxs.z - 4.0).abs() < 1e-9);
    }

    #[test]
    fn extrude_rectangle_volume() {
        let solid = Profile::rectangle(2.0, 3.0).extrude(4.0);
        assert!((solid.volume() - 24.0).abs() < 1e-6);
    }

    #[test]
    fn extrude_zero_height_is_empty() {
        let solid = Profile::rectangle(1.0, 1.0).extrude(0.0);
        assert!(solid.polygons.is_empty());
    }
}
