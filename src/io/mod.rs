//! File export: STL meshes and STEP boundary representations.

#[cfg(feature = "stl-io")]
pub mod stl;

#[cfg(feature = "step-io")]
pub mod step;

/// Write `solid` under `dir` as both `<stem>.stl` (binary) and
/// `<stem>.step`, returning the paths written.
#[cfg(all(feature = "stl-io", feature = "step-io"))]
pub fn export_solid(
    solid: &crate::solid::Solid,
    dir: &std::path::Path,
    stem: &str,
) -> Result<(std::path::PathBuf, std::path::PathBuf), crate::errors::JigError> {
    let stl_path = dir.join(format!("{stem}.stl"));
    std::fs::write(&stl_path, solid.to_stl_binary()?)?;

    let step_path = dir.join(format!("{stem}.step"));
    std::fs::write(&step_path, solid.to_step(stem))?;

    Ok((stl_path, step_path))
}
