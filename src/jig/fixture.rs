//! The fixture body: filleted top plate, clamping wall, stability ribs,
//! board cavity and the per-variant cuts through the top plate.

use crate::errors::JigError;
use crate::float_types::Real;
use crate::jig::board::{CUT_OVERSHOOT, board, pocketed_board};
use crate::jig::params::JigParams;
use crate::profile::Profile;
use crate::solid::Solid;
use tracing::debug;

/// The three members of the jig family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JigVariant {
    /// Clamp jig for an uncut board: the top slot guides the router or bit
    /// that opens the hinge slot.
    Edge,
    /// Registers against a board whose hinge pocket is already cut; the
    /// cavity keeps a tongue matching the pocket.
    Pocket,
    /// Guide holes instead of the open slot, for drilling the counterbores.
    Drill,
}

impl JigVariant {
    pub const ALL: [JigVariant; 3] = [JigVariant::Edge, JigVariant::Pocket, JigVariant::Drill];

    /// Short name used in file stems and logs.
    pub const fn name(&self) -> &'static str {
        match self {
            JigVariant::Edge => "edge",
            JigVariant::Pocket => "pocket",
            JigVariant::Drill => "drill",
        }
    }
}

/// Top plate with filleted vertical corners. The fillet is produced by
/// extruding a rounded-rectangle profile, so only the vertical edges are
/// rounded. Top face at `top_height`.
fn plate(params: &JigParams) -> Solid {
    let f = &params.fixture;
    Profile::rounded_rectangle(f.plate_width, f.plate_depth, f.corner_radius, f.segments)
        .translate(-f.plate_width * 0.5, -f.plate_depth * 0.5)
        .extrude(f.plate_thickness)
        .translate(0.0, 0.0, params.top_height() - f.plate_thickness)
}

/// Clamping wall, descending from the plate underside down the board.
fn wall(params: &JigParams) -> Solid {
    let f = &params.fixture;
    let thickness = params.wall_thickness();
    Profile::rectangle(f.plate_width, thickness)
        .translate(-f.plate_width * 0.5, -thickness * 0.5)
        .extrude(f.wall_height)
        .translate(
            0.0,
            0.0,
            params.top_height() - f.plate_thickness - f.wall_height,
        )
}

/// One triangular stability rib in its final position. The triangle is
/// sketched in the XY plane, extruded to the rib thickness, then rotated
/// into the YZ plane: base along Y under the plate, apex dropping down
/// against the wall.
fn rib(params: &JigParams, x_center: Real) -> Solid {
    let f = &params.fixture;
    let span = f.plate_depth * f.rib_span_factor;
    let drop = span * f.rib_drop_factor;

    Profile::polygon(&[[-span * 0.5, 0.0], [span * 0.5, 0.0], [0.0, -drop]])
        .extrude(f.rib_thickness)
        .rotate(90.0, 0.0, 90.0)
        .translate(x_center - f.rib_thickness * 0.5, 0.0, params.top_height())
}

/// Plate, wall and both ribs joined, before the board cavity is cut.
fn base(params: &JigParams) -> Solid {
    let f = &params.fixture;
    let span = f.plate_depth * f.rib_span_factor;
    let rib_offset = f.plate_width * 0.5 - span * 0.5;

    let mut base = plate(params).union(&wall(params));
    base = base.union(&rib(params, rib_offset));
    base = base.union(&rib(params, -rib_offset));
    base
}

/// Through-cutter for the hinge opening in the top plate. Reaches from the
/// board edge (z = 0) up past the plate's top face, so it opens the plate
/// and the wall block above the board without touching the cavity below.
fn slot_cutter(params: &JigParams) -> Solid {
    let h = &params.hinge;
    Profile::slot(h.length, h.diameter, params.fixture.segments)
        .extrude(params.top_height() + CUT_OVERSHOOT)
}

/// Through-cutter for the two counterbore drill guides.
fn guide_cutter(params: &JigParams) -> Solid {
    let h = &params.hinge;
    let segments = params.fixture.segments * 2;
    let offset = params.counterbore_offset();
    let height = params.top_height() + CUT_OVERSHOOT;

    let left = Profile::circle(h.diameter * 0.5, segments)
        .translate(-offset, 0.0)
        .extrude(height);
    let right = Profile::circle(h.diameter * 0.5, segments)
        .translate(offset, 0.0)
        .extrude(height);

    left.union(&right)
}

/// Build the finished jig for `variant`.
pub fn build(variant: JigVariant, params: &JigParams) -> Result<Solid, JigError> {
    params.validate()?;

    debug!(variant = variant.name(), "building jig base");
    let base = base(params);

    let workpiece = match variant {
        JigVariant::Pocket => pocketed_board(params),
        JigVariant::Edge | JigVariant::Drill => board(params),
    };

    debug!(variant = variant.name(), "cutting board cavity");
    let cavity_cut = base.difference(&workpiece);

    debug!(variant = variant.name(), "cutting top plate openings");
    let jig = match variant {
        JigVariant::Edge | JigVariant::Pocket => cavity_cut.difference(&slot_cutter(params)),
        JigVariant::Drill => cavity_cut.difference(&guide_cutter(params)),
    };

    if jig.polygons.is_empty() {
        return Err(JigError::DegenerateGeometry(format!(
            "variant `{}` produced an empty solid",
            variant.name()
        )));
    }

    Ok(jig)
}
