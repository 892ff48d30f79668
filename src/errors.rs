//! Crate errors

use crate::float_types::Real;

/// Everything that can go wrong while building or exporting a jig.
#[derive(Debug, thiserror::Error)]
pub enum JigError {
    /// A parameter failed validation. Carries the offending field and the
    /// constraint it violated.
    #[error("invalid parameter `{field}`: {constraint} (got {value})")]
    InvalidParameter {
        field: &'static str,
        constraint: &'static str,
        value: Real,
    },

    /// A profile or solid came out degenerate (empty, zero-area, ...).
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Parameter file could not be parsed.
    #[error("parameter file: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
