//! The workpiece board and its hinge pocket.
//!
//! The board stands in the XZ plane: length along X, thickness centred on
//! Y, top edge (the one being drilled) in the z = 0 plane, width hanging
//! down to z = -width. The hinge pocket is cut into that top edge.

use crate::jig::params::JigParams;
use crate::profile::Profile;
use crate::solid::Solid;

/// How far cutters overshoot the surface they cut through.
pub(crate) const CUT_OVERSHOOT: crate::float_types::Real = 1.0;

/// The plain workpiece board.
pub fn board(params: &JigParams) -> Solid {
    let b = &params.board;
    Profile::rectangle(b.length, b.thickness)
        .translate(-b.length * 0.5, -b.thickness * 0.5)
        .extrude(b.width)
        .translate(0.0, 0.0, -b.width)
}

/// The negative of the hinge body: outer pocket to `depth`, inner pocket to
/// `inner_depth`, counterbore hole to `inner_depth`. Centred on the origin
/// of the board's top edge, overshooting upward so the cut is clean.
pub fn hinge_pocket_cutter(params: &JigParams) -> Solid {
    let h = &params.hinge;
    let segments = params.fixture.segments;

    let outer = Profile::slot(h.length, h.diameter, segments)
        .extrude(h.depth + CUT_OVERSHOOT)
        .translate(0.0, 0.0, -h.depth);

    let inner = Profile::slot(h.inner_length, h.diameter, segments)
        .extrude(h.inner_depth + CUT_OVERSHOOT)
        .translate(0.0, 0.0, -h.inner_depth);

    let counterbore = Profile::circle(h.diameter * 0.5, segments * 2)
        .translate(params.counterbore_offset(), 0.0)
        .extrude(h.inner_depth + CUT_OVERSHOOT)
        .translate(0.0, 0.0, -h.inner_depth);

    outer.union(&inner).union(&counterbore)
}

/// The board after the hinge pocket has been machined into its top edge,
/// the workpiece the second drilling step starts from.
pub fn pocketed_board(params: &JigParams) -> Solid {
    board(params).difference(&hinge_pocket_cutter(params))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn board_spans_expected_bounds() {
        let params = JigParams::default();
        let bb = board(&params).bounding_box();
        assert!((bb.mins.x + 100.0).abs() < 1e-9 && (bb.maxs.x - 100.0).abs() < 1e-9);
        assert!((bb.mins.y + 14.0).abs() < 1e-9 && (bb.maxs.y - 14.0).abs() < 1e-9);
        assert!((bb.mins.z + 100.0).abs() < 1e-9 && bb.maxs.z.abs() < 1e-9);
    }

    #[test]
    fn pocket_removes_material() {
        let params = JigParams::default();
        let plain = board(&params).volume();
        let pocketed = pocketed_board(&params).volume();
        assert!(pocketed < plain, "pocket must remove material");
        // the pocket is no deeper than the inner depth and no longer than
        // the hinge opening
        let h = &params.hinge;
        let upper_bound = h.length * h.diameter * h.inner_depth;
        assert!(plain - pocketed < upper_bound);
    }
}
