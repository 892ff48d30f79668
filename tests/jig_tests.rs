mod support;

use drilljig::jig::{self, JigParams, JigVariant};

use crate::support::approx_eq;

#[test]
fn every_variant_builds_with_defaults() {
    let params = JigParams::default();
    for variant in JigVariant::ALL {
        let jig = jig::build(variant, &params)
            .unwrap_or_else(|e| panic!("variant {} failed: {e}", variant.name()));
        assert!(!jig.polygons.is_empty());
    }
}

#[test]
fn jig_footprint_matches_the_plate() {
    let params = JigParams::default();
    let jig = jig::build(JigVariant::Edge, &params).expect("edge builds");
    let bb = jig.bounding_box();

    let half_w = params.fixture.plate_width / 2.0;
    let half_d = params.fixture.plate_depth / 2.0;
    assert!(approx_eq(bb.mins.x, -half_w, 1e-6) && approx_eq(bb.maxs.x, half_w, 1e-6));
    assert!(approx_eq(bb.mins.y, -half_d, 1e-6) && approx_eq(bb.maxs.y, half_d, 1e-6));
}

#[test]
fn jig_reaches_from_wall_bottom_to_plate_top() {
    let params = JigParams::default();
    let jig = jig::build(JigVariant::Edge, &params).expect("edge builds");
    let bb = jig.bounding_box();

    let top = params.top_height();
    let wall_bottom = top - params.fixture.plate_thickness - params.fixture.wall_height;
    assert!(approx_eq(bb.maxs.z, top, 1e-6));
    assert!(approx_eq(bb.mins.z, wall_bottom, 1e-6));
}

#[test]
fn top_cuts_remove_exactly_their_prisms() {
    // Edge and drill share everything except the top-plate cut, and the
    // material in both cutter footprints is solid from the board edge
    // (z = 0) to the plate top. The volume difference between the two
    // variants therefore equals (slot area - guide area) × top height.
    let params = JigParams::default();
    let edge = jig::build(JigVariant::Edge, &params).expect("edge builds");
    let drill = jig::build(JigVariant::Drill, &params).expect("drill builds");

    let slot_area = drilljig::Profile::slot(
        params.hinge.length,
        params.hinge.diameter,
        params.fixture.segments,
    )
    .area();
    let guide_area = 2.0
        * drilljig::Profile::circle(params.hinge.diameter / 2.0, params.fixture.segments * 2)
            .area();

    let delta = drill.volume() - edge.volume();
    let expected = (slot_area - guide_area) * params.top_height();
    assert!(
        (delta - expected).abs() / expected < 0.01,
        "slot/guide volume mismatch: got {delta}, expected {expected}"
    );
}

#[test]
fn pocketed_cavity_registers_a_tongue() {
    let params = JigParams::default();
    let edge = jig::build(JigVariant::Edge, &params).expect("edge builds");
    let pocket = jig::build(JigVariant::Pocket, &params).expect("pocket builds");

    let plain_board = jig::board(&params).volume();
    let pocketed_board = jig::pocketed_board(&params).volume();
    let tongue = plain_board - pocketed_board;

    assert!(tongue > 0.0, "the pocket must have positive volume");
    assert!(
        approx_eq(pocket.volume() - edge.volume(), tongue, tongue * 0.02),
        "the pocket jig must keep material matching the board's pocket"
    );
}

#[test]
fn invalid_params_are_refused_by_build() {
    let mut params = JigParams::default();
    params.hinge.length = -1.0;
    assert!(jig::build(JigVariant::Edge, &params).is_err());
}
