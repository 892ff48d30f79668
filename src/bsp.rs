//! Binary space partitioning tree over polygons, the engine behind the
//! boolean operations on [`Solid`](crate::solid::Solid).

use crate::plane::{FRONT, Plane};
use crate::polygon::Polygon;

/// A node in the BSP tree.
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub plane: Option<Plane>,
    pub front: Option<Box<Node>>,
    pub back: Option<Box<Node>>,
    pub polygons: Vec<Polygon>,
}

impl Node {
    pub fn new() -> Self {
        Node {
            plane: None,
            front: None,
            back: None,
            polygons: Vec::new(),
        }
    }

    pub fn from_polygons(polygons: &[Polygon]) -> Self {
        let mut node = Node::new();
        node.build(polygons);
        node
    }

    /// Convert solid space to empty space and vice versa, iteratively.
    pub fn invert(&mut self) {
        let mut stack = vec![self];

        while let Some(current) = stack.pop() {
            current.polygons.iter_mut().for_each(|p| p.flip());
            if let Some(ref mut plane) = current.plane {
                plane.flip();
            }

            std::mem::swap(&mut current.front, &mut current.back);

            if let Some(ref mut front) = current.front {
                stack.push(front.as_mut());
            }
            if let Some(ref mut back) = current.back {
                stack.push(back.as_mut());
            }
        }
    }

    /// Remove all parts of `polygons` inside the solid this tree describes.
    pub fn clip_polygons(&self, polygons: &[Polygon]) -> Vec<Polygon> {
        let Some(plane) = &self.plane else {
            return polygons.to_vec();
        };

        let mut front_polys = Vec::with_capacity(polygons.len());
        let mut back_polys = Vec::with_capacity(polygons.len());

        for polygon in polygons {
            let (coplanar_front, coplanar_back, mut front_parts, mut back_parts) =
                plane.split_polygon(polygon);

            coplanar_front
                .into_iter()
                .chain(coplanar_back)
                .for_each(|coplanar_poly| {
                    if plane.orient_plane(&coplanar_poly.plane) == FRONT {
                        front_parts.push(coplanar_poly);
                    } else {
                        back_parts.push(coplanar_poly);
                    }
                });

            front_polys.append(&mut front_parts);
            back_polys.append(&mut back_parts);
        }

        let mut result = if let Some(front_node) = &self.front {
            front_node.clip_polygons(&front_polys)
        } else {
            front_polys
        };

        if let Some(back_node) = &self.back {
            result.extend(back_node.clip_polygons(&back_polys));
        }
        // No back child: back polygons are inside the solid and are dropped.

        result
    }

    /// Remove all polygons in this tree that are inside the `bsp` tree.
    pub fn clip_to(&mut self, bsp: &Node) {
        self.polygons = bsp.clip_polygons(&self.polygons);

        if let Some(ref mut front) = self.front {
            front.clip_to(bsp);
        }
        if let Some(ref mut back) = self.back {
            back.clip_to(bsp);
        }
    }

    /// Collect every polygon in the tree, iteratively.
    pub fn all_polygons(&self) -> Vec<Polygon> {
        let mut result = Vec::new();
        let mut stack = vec![self];

        while let Some(current) = stack.pop() {
            result.extend_from_slice(&current.polygons);
            stack.extend(
                [&current.front, &current.back]
                    .iter()
                    .filter_map(|child| child.as_ref().map(|boxed| boxed.as_ref())),
            );
        }
        result
    }

    /// Build (or extend) the tree from `polygons`. The first polygon's
    /// plane seeds each node.
    pub fn build(&mut self, polygons: &[Polygon]) {
        if polygons.is_empty() {
            return;
        }

        if self.plane.is_none() {
            self.plane = Some(polygons[0].plane.clone());
        }
        let plane = self.plane.clone().unwrap();

        let mut front = Vec::with_capacity(polygons.len() / 2);
        let mut back = Vec::with_capacity(polygons.len() / 2);

        for polygon in polygons {
            let (coplanar_front, coplanar_back, mut front_parts, mut back_parts) =
                plane.split_polygon(polygon);

            self.polygons.extend(coplanar_front);
            self.polygons.extend(coplanar_back);
            front.append(&mut front_parts);
            back.append(&mut back_parts);
        }

        if !front.is_empty() {
            self.front
                .get_or_insert_with(|| Box::new(Node::new()))
                .build(&front);
        }
        if !back.is_empty() {
            self.back
                .get_or_insert_with(|| Box::new(Node::new()))
                .build(&back);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::vertex::Vertex;
    use nalgebra::{Point3, Vector3};

    fn tri(z: f64) -> Polygon {
        Polygon::new(vec![
            Vertex::new(Point3::new(0.0, 0.0, z), Vector3::z()),
            Vertex::new(Point3::new(1.0, 0.0, z), Vector3::z()),
            Vertex::new(Point3::new(0.0, 1.0, z), Vector3::z()),
        ])
    }

    #[test]
    fn build_and_collect_round_trips() {
        let node = Node::from_polygons(&[tri(0.0), tri(1.0), tri(-1.0)]);
        assert_eq!(node.all_polygons().len(), 3);
    }

    #[test]
    fn invert_flips_every_polygon() {
        let mut node = Node::from_polygons(&[tri(0.0), tri(2.0)]);
        let before: Vec<_> = node
            .all_polygons()
            .iter()
            .map(|p| p.plane.normal())
            .collect();
        node.invert();
        let after: Vec<_> = node
            .all_polygons()
            .iter()
            .map(|p| p.plane.normal())
            .collect();
        assert_eq!(before.len(), after.len());
        for n in &after {
            assert!((n + Vector3::z()).norm() < 1e-12);
        }
    }
}
