//! The jig model: parameters, the workpiece board, and the fixture builders.

pub mod board;
pub mod fixture;
pub mod params;

pub use board::{board, hinge_pocket_cutter, pocketed_board};
pub use fixture::{JigVariant, build};
pub use params::{BoardParams, FixtureParams, HingeParams, JigParams};
