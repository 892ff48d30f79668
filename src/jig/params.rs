//! Jig parameters: the workpiece board, the hinge hardware, and the fixture
//! body. Defaults describe the Hettich 9133179 hinge in a 28 mm board; any
//! field can be overridden from a TOML parameter file.

use crate::errors::JigError;
use crate::float_types::{INCH, Real};
use serde::Deserialize;
use std::path::Path;

/// The workpiece the jig clamps onto. Dimensions in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct BoardParams {
    /// Panel thickness (the hinge is inset into this edge).
    pub thickness: Real,
    /// Panel width, measured down from the edge being drilled.
    pub width: Real,
    /// Panel length along the edge.
    pub length: Real,
}

impl Default for BoardParams {
    fn default() -> Self {
        BoardParams {
            thickness: 28.0,
            width: 100.0,
            length: 200.0,
        }
    }
}

/// The hinge hardware model. Defaults are the Hettich 9133179.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct HingeParams {
    /// Body (and drill) diameter.
    pub diameter: Real,
    /// Overall length of the hinge opening.
    pub length: Real,
    /// Length of the deeper inner pocket.
    pub inner_length: Real,
    /// Counterbore centre, measured from the slot's reference end.
    pub counter_distance: Real,
    /// Depth of the outer pocket.
    pub depth: Real,
    /// Depth of the inner pocket and counterbore.
    pub inner_depth: Real,
}

impl Default for HingeParams {
    fn default() -> Self {
        HingeParams {
            diameter: 13.5,
            length: 61.5,
            inner_length: 31.7,
            counter_distance: 46.5,
            depth: 6.5,
            inner_depth: 18.5,
        }
    }
}

/// The fixture body around board and hinge.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct FixtureParams {
    /// Top plate size along the board edge (X).
    pub plate_width: Real,
    /// Top plate size across the board (Y).
    pub plate_depth: Real,
    /// Top plate thickness.
    pub plate_thickness: Real,
    /// Radius of the plate's vertical corner fillets.
    pub corner_radius: Real,
    /// Arc segments per filleted corner and slot end cap.
    pub segments: usize,
    /// Extra wall thickness beyond the board, split across both sides.
    pub wall_clearance: Real,
    /// How far the clamping wall reaches down the board.
    pub wall_height: Real,
    /// Rib thickness along X.
    pub rib_thickness: Real,
    /// Rib span as a fraction of `plate_depth`.
    pub rib_span_factor: Real,
    /// Rib drop as a fraction of its span.
    pub rib_drop_factor: Real,
    /// Extra plate height above the bit's cut length.
    pub top_clearance: Real,
    /// Cutting length of the drill bit (default one inch).
    pub bit_cut_length: Real,
}

impl Default for FixtureParams {
    fn default() -> Self {
        FixtureParams {
            plate_width: 150.0,
            plate_depth: 150.0,
            plate_thickness: 10.0,
            corner_radius: 25.0,
            segments: 16,
            wall_clearance: 10.0,
            wall_height: 100.0,
            rib_thickness: 10.0,
            rib_span_factor: 0.75,
            rib_drop_factor: 0.75,
            top_clearance: 10.0,
            bit_cut_length: INCH,
        }
    }
}

/// Everything needed to generate one jig family.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct JigParams {
    /// Hardware model name, used for file stems and the STEP product name.
    pub model: Option<String>,
    pub board: BoardParams,
    pub hinge: HingeParams,
    pub fixture: FixtureParams,
}

impl JigParams {
    /// Load parameters from a TOML file; absent tables and fields keep
    /// their defaults.
    pub fn from_toml_path(path: &Path) -> Result<Self, JigError> {
        let text = std::fs::read_to_string(path)?;
        let params: JigParams = toml::from_str(&text)?;
        Ok(params)
    }

    /// The hardware model name, defaulting to the Hettich part number.
    pub fn model_name(&self) -> &str {
        self.model.as_deref().unwrap_or("hettich-9133179")
    }

    /// Height of the plate's top face above the board edge.
    pub fn top_height(&self) -> Real {
        self.fixture.bit_cut_length - self.hinge.depth + self.fixture.top_clearance
    }

    /// Full wall thickness: board plus clearance.
    pub fn wall_thickness(&self) -> Real {
        self.board.thickness + self.fixture.wall_clearance
    }

    /// Counterbore centre in jig coordinates (slot centred on the origin,
    /// distance measured from the slot's -X end).
    pub fn counterbore_offset(&self) -> Real {
        self.hinge.counter_distance - self.hinge.length * 0.5
    }

    pub fn validate(&self) -> Result<(), JigError> {
        fn positive(field: &'static str, value: Real) -> Result<(), JigError> {
            if value > 0.0 {
                Ok(())
            } else {
                Err(JigError::InvalidParameter {
                    field,
                    constraint: "must be positive",
                    value,
                })
            }
        }

        positive("board.thickness", self.board.thickness)?;
        positive("board.width", self.board.width)?;
        positive("board.length", self.board.length)?;
        positive("hinge.diameter", self.hinge.diameter)?;
        positive("hinge.length", self.hinge.length)?;
        positive("hinge.inner_length", self.hinge.inner_length)?;
        positive("hinge.depth", self.hinge.depth)?;
        positive("hinge.inner_depth", self.hinge.inner_depth)?;
        positive("fixture.plate_width", self.fixture.plate_width)?;
        positive("fixture.plate_depth", self.fixture.plate_depth)?;
        positive("fixture.plate_thickness", self.fixture.plate_thickness)?;
        positive("fixture.wall_height", self.fixture.wall_height)?;
        positive("fixture.rib_thickness", self.fixture.rib_thickness)?;
        positive("fixture.bit_cut_length", self.fixture.bit_cut_length)?;

        if self.hinge.inner_length >= self.hinge.length {
            return Err(JigError::InvalidParameter {
                field: "hinge.inner_length",
                constraint: "must be shorter than hinge.length",
                value: self.hinge.inner_length,
            });
        }
        if self.hinge.depth >= self.hinge.inner_depth {
            return Err(JigError::InvalidParameter {
                field: "hinge.depth",
                constraint: "must be shallower than hinge.inner_depth",
                value: self.hinge.depth,
            });
        }
        if self.hinge.inner_depth >= self.board.width {
            return Err(JigError::InvalidParameter {
                field: "hinge.inner_depth",
                constraint: "must be shallower than the board is wide",
                value: self.hinge.inner_depth,
            });
        }
        if self.hinge.diameter >= self.board.thickness {
            return Err(JigError::InvalidParameter {
                field: "hinge.diameter",
                constraint: "must fit within board.thickness",
                value: self.hinge.diameter,
            });
        }
        if self.hinge.length >= self.fixture.plate_width {
            return Err(JigError::InvalidParameter {
                field: "hinge.length",
                constraint: "slot must fit within fixture.plate_width",
                value: self.hinge.length,
            });
        }
        if self.counterbore_offset() + self.hinge.diameter * 0.5
            > self.hinge.length * 0.5
        {
            return Err(JigError::InvalidParameter {
                field: "hinge.counter_distance",
                constraint: "counterbore must stay inside the hinge opening",
                value: self.hinge.counter_distance,
            });
        }
        if self.wall_thickness() >= self.fixture.plate_depth {
            return Err(JigError::InvalidParameter {
                field: "fixture.wall_clearance",
                constraint: "wall must fit within fixture.plate_depth",
                value: self.fixture.wall_clearance,
            });
        }
        if self.top_height() <= self.fixture.plate_thickness {
            return Err(JigError::InvalidParameter {
                field: "fixture.bit_cut_length",
                constraint: "plate would sit below the board edge",
                value: self.fixture.bit_cut_length,
            });
        }

        Ok(())
    }
}
