mod support;

use drilljig::{Profile, Solid, float_types::EPSILON};

use crate::support::{approx_eq, bounding_box, cuboid};

#[test]
fn union() {
    let box1 = cuboid(2.0, 2.0, 2.0).translate(-1.0, -1.0, -1.0); // from -1 to +1 in all coords
    let box2 = cuboid(1.0, 1.0, 1.0).translate(0.5, 0.5, 0.5);

    let union = box1.union(&box2);
    assert!(
        !union.polygons.is_empty(),
        "Union of two boxes should produce polygons"
    );

    // Check bounding box => should now at least range from -1 to (0.5+1) = 1.5
    let bb = bounding_box(&union.polygons);
    assert!(approx_eq(bb[0], -1.0, 1e-8));
    assert!(approx_eq(bb[1], -1.0, 1e-8));
    assert!(approx_eq(bb[2], -1.0, 1e-8));
    assert!(approx_eq(bb[3], 1.5, 1e-8));
    assert!(approx_eq(bb[4], 1.5, 1e-8));
    assert!(approx_eq(bb[5], 1.5, 1e-8));
}

#[test]
fn union_volume_of_disjoint_boxes_adds_up() {
    let a = cuboid(1.0, 1.0, 1.0);
    let b = cuboid(1.0, 1.0, 1.0).translate(5.0, 0.0, 0.0);
    let union = a.union(&b);
    approx::assert_relative_eq!(union.volume(), 2.0, epsilon = 1e-6);
}

#[test]
fn difference() {
    // Subtract a smaller box from a bigger one
    let big = cuboid(4.0, 4.0, 4.0).translate(-2.0, -2.0, -2.0); // spans [-2,2]
    let small = cuboid(2.0, 2.0, 2.0).translate(-1.0, -1.0, -1.0); // spans [-1,1]

    let result = big.difference(&small);
    assert!(
        !result.polygons.is_empty(),
        "Subtracting a smaller box should leave polygons"
    );

    // The shell keeps the outer bounds but loses the inner volume
    let bb = bounding_box(&result.polygons);
    assert!(approx_eq(bb[0], -2.0, 1e-8));
    assert!(approx_eq(bb[3], 2.0, 1e-8));
    approx::assert_relative_eq!(result.volume(), 64.0 - 8.0, epsilon = 1e-6);
}

#[test]
fn difference_through_hole_keeps_bounds() {
    // A thin pillar cut all the way through a slab
    let slab = cuboid(10.0, 10.0, 2.0);
    let pillar = cuboid(2.0, 2.0, 4.0).translate(4.0, 4.0, -1.0);

    let result = slab.difference(&pillar);
    let bb = bounding_box(&result.polygons);
    assert!(approx_eq(bb[3], 10.0, 1e-8) && approx_eq(bb[5], 2.0, 1e-8));
    assert!(approx_eq(result.volume(), 200.0 - 8.0, 1e-6));
}

#[test]
fn difference_of_disjoint_solids_changes_nothing() {
    let a = cuboid(2.0, 2.0, 2.0);
    let b = cuboid(1.0, 1.0, 1.0).translate(10.0, 10.0, 10.0);
    let result = a.difference(&b);
    assert!(approx_eq(result.volume(), a.volume(), 1e-9));
}

#[test]
fn transform_round_trip() {
    let solid = cuboid(2.0, 3.0, 4.0);
    let moved = solid.translate(5.0, -1.0, 0.5).translate(-5.0, 1.0, -0.5);
    let bb = bounding_box(&moved.polygons);
    assert!(approx_eq(bb[0], 0.0, 1e-9));
    assert!(approx_eq(bb[3], 2.0, 1e-9));
    assert!(approx_eq(bb[4], 3.0, 1e-9));
    assert!(approx_eq(bb[5], 4.0, 1e-9));
}

#[test]
fn rotate_quarter_turn_about_x() {
    // A box rotated 90° about X swaps its Y and Z extents
    let solid = cuboid(1.0, 2.0, 3.0).rotate(90.0, 0.0, 0.0);
    let bb = solid.bounding_box();
    assert!(approx_eq(bb.maxs.x - bb.mins.x, 1.0, 1e-9));
    assert!(approx_eq(bb.maxs.y - bb.mins.y, 3.0, 1e-9));
    assert!(approx_eq(bb.maxs.z - bb.mins.z, 2.0, 1e-9));
}

#[test]
fn extruded_box_is_manifold() {
    #[cfg(feature = "hashmap")]
    {
        assert!(cuboid(2.0, 2.0, 2.0).is_manifold());
        assert!(Profile::slot(10.0, 4.0, 16).extrude(3.0).is_manifold());
    }
}

#[test]
fn empty_solid_has_trivial_bounds() {
    let empty = Solid::new();
    let bb = empty.bounding_box();
    assert!(bb.mins.x.abs() < EPSILON && bb.maxs.x.abs() < EPSILON);
    assert!(approx_eq(empty.volume(), 0.0, 1e-12));
}
