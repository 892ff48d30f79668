mod support;

use drilljig::Profile;

use crate::support::cuboid;

#[cfg(feature = "stl-io")]
mod stl {
    use super::*;

    #[test]
    fn ascii_stl_lists_every_facet() {
        let solid = cuboid(1.0, 1.0, 1.0);
        let stl = solid.to_stl_ascii("unit_box");

        assert!(stl.starts_with("solid unit_box"));
        assert!(stl.trim_end().ends_with("endsolid unit_box"));

        let facets = stl.matches("facet normal").count();
        assert_eq!(facets, solid.triangles().len());
        // a box: two cap triangles per cap plus one quad (two triangles) per side
        assert_eq!(facets, 12);
    }

    #[test]
    fn binary_stl_has_the_right_length() {
        let solid = Profile::slot(10.0, 4.0, 8).extrude(2.0);
        let bytes = solid.to_stl_binary().expect("serializes");
        let triangles = solid.triangles().len();
        // 80-byte header + u32 count + 50 bytes per triangle
        assert_eq!(bytes.len(), 84 + triangles * 50);
        let count = u32::from_le_bytes(bytes[80..84].try_into().unwrap());
        assert_eq!(count as usize, triangles);
    }
}

#[cfg(feature = "step-io")]
mod step {
    use super::*;

    #[test]
    fn step_file_is_framed_and_closed() {
        let solid = cuboid(2.0, 2.0, 2.0);
        let step = solid.to_step("unit_box");

        assert!(step.starts_with("ISO-10303-21;"));
        assert!(step.trim_end().ends_with("END-ISO-10303-21;"));
        assert_eq!(step.matches("FACETED_BREP").count(), 1);
        assert_eq!(step.matches("CLOSED_SHELL").count(), 1);
        assert!(step.contains("FILE_SCHEMA(('AUTOMOTIVE_DESIGN_CC2'))"));
        assert!(step.contains("PRODUCT('unit_box'"));

        let faces = step.matches("ADVANCED_FACE").count();
        assert_eq!(faces, solid.triangles().len());
        // three corner points per triangular face
        assert_eq!(step.matches("CARTESIAN_POINT").count(), faces * 3);
    }

    #[test]
    fn step_units_are_millimetres() {
        let step = cuboid(1.0, 1.0, 1.0).to_step("mm_box");
        assert!(step.contains("SI_UNIT(.MILLI.,.METRE.)"));
    }
}

#[cfg(all(feature = "stl-io", feature = "step-io"))]
mod files {
    use drilljig::io::export_solid;
    use drilljig::jig::{self, JigParams, JigVariant};

    #[test]
    fn export_writes_both_formats() {
        let dir = tempfile::tempdir().expect("tempdir");
        let params = JigParams::default();
        let solid = jig::build(JigVariant::Edge, &params).expect("builds");

        let (stl_path, step_path) =
            export_solid(&solid, dir.path(), "jig-test-edge").expect("exports");

        let stl_len = std::fs::metadata(&stl_path).expect("stl written").len();
        let step_len = std::fs::metadata(&step_path).expect("step written").len();
        assert!(stl_len > 84, "binary STL must carry triangles");
        assert!(step_len > 0);
    }
}
