//! STEP (ISO 10303-21, AP214) export as a faceted boundary representation.
//!
//! Each triangle of the solid becomes a planar `ADVANCED_FACE` bounded by a
//! `POLY_LOOP`; the faces close into a `FACETED_BREP` wired to a minimal
//! product structure.

use crate::float_types::{EPSILON, Real};
use crate::solid::Solid;
use crate::vertex::Vertex;
use nalgebra::Vector3;

fn num(value: Real) -> String {
    format!("{:.6}", value)
}

fn cartesian_point(id: usize, v: &Vertex) -> String {
    format!(
        "#{id} = CARTESIAN_POINT('',({},{},{}));",
        num(v.pos.x),
        num(v.pos.y),
        num(v.pos.z)
    )
}

fn direction(id: usize, d: &Vector3<Real>) -> String {
    format!(
        "#{id} = DIRECTION('',({},{},{}));",
        num(d.x),
        num(d.y),
        num(d.z)
    )
}

/// Any unit vector perpendicular to `normal`, used as the plane's reference
/// direction.
fn reference_direction(normal: &Vector3<Real>) -> Vector3<Real> {
    let candidate = if normal.z.abs() > normal.x.abs() || normal.z.abs() > normal.y.abs() {
        Vector3::x().cross(normal)
    } else {
        Vector3::z().cross(normal)
    };
    if candidate.norm_squared() < EPSILON * EPSILON {
        return Vector3::y();
    }
    candidate.normalize()
}

/// Serialize `solid` as a STEP AP214 file with the given product `name`.
pub fn to_step(solid: &Solid, name: &str) -> String {
    let mut data: Vec<String> = Vec::new();
    let mut face_ids: Vec<usize> = Vec::new();
    let mut id: usize = 1000;
    let mut next_id = || {
        id += 1;
        id
    };

    for tri in solid.triangles() {
        // Degenerate fragments carry no area; leave them out of the B-rep.
        let normal = (tri[1].pos - tri[0].pos).cross(&(tri[2].pos - tri[0].pos));
        if normal.norm_squared() < EPSILON * EPSILON {
            continue;
        }
        let normal = normal.normalize();

        let point_ids: Vec<usize> = tri
            .iter()
            .map(|v| {
                let pid = next_id();
                data.push(cartesian_point(pid, v));
                pid
            })
            .collect();

        let loop_id = next_id();
        data.push(format!(
            "#{loop_id} = POLY_LOOP('',({}));",
            point_ids
                .iter()
                .map(|p| format!("#{p}"))
                .collect::<Vec<_>>()
                .join(",")
        ));

        let bound_id = next_id();
        data.push(format!("#{bound_id} = FACE_OUTER_BOUND('',#{loop_id},.T.);"));

        // A plane through the first corner, oriented along the facet normal.
        let normal_id = next_id();
        data.push(direction(normal_id, &normal));
        let ref_id = next_id();
        data.push(direction(ref_id, &reference_direction(&normal)));
        let axis_id = next_id();
        data.push(format!(
            "#{axis_id} = AXIS2_PLACEMENT_3D('',#{},#{normal_id},#{ref_id});",
            point_ids[0]
        ));
        let plane_id = next_id();
        data.push(format!("#{plane_id} = PLANE('',#{axis_id});"));

        let face_id = next_id();
        data.push(format!(
            "#{face_id} = ADVANCED_FACE('',(#{bound_id}),#{plane_id},.T.);"
        ));
        face_ids.push(face_id);
    }

    let shell_id = next_id();
    data.push(format!(
        "#{shell_id} = CLOSED_SHELL('',({}));",
        face_ids
            .iter()
            .map(|f| format!("#{f}"))
            .collect::<Vec<_>>()
            .join(",")
    ));
    let brep_id = next_id();
    data.push(format!("#{brep_id} = FACETED_BREP('{name}',#{shell_id});"));

    format!(
        "ISO-10303-21;
HEADER;
  FILE_DESCRIPTION(('STEP AP214'),'2;1');
  FILE_NAME('{name}.step','',('drilljig'),('drilljig'),'','','');
  FILE_SCHEMA(('AUTOMOTIVE_DESIGN_CC2'));
ENDSEC;
DATA;

/* context and units */
#100 = APPLICATION_CONTEXT('mechanical design');
#101 = APPLICATION_PROTOCOL_DEFINITION('international standard','automotive_design',2000,#100);

#110 = (LENGTH_UNIT() NAMED_UNIT(*) SI_UNIT(.MILLI.,.METRE.));
#111 = (PLANE_ANGLE_UNIT() NAMED_UNIT(*) SI_UNIT($,.RADIAN.));
#112 = (SOLID_ANGLE_UNIT() NAMED_UNIT(*) SI_UNIT($,.STERADIAN.));
#113 = UNCERTAINTY_MEASURE_WITH_UNIT(LENGTH_MEASURE(1.E-06),#110,'distance_accuracy_value','confusion');
#114 = (GEOMETRIC_REPRESENTATION_CONTEXT(3)
         GLOBAL_UNCERTAINTY_ASSIGNED_CONTEXT((#113))
         GLOBAL_UNIT_ASSIGNED_CONTEXT((#110,#111,#112))
         REPRESENTATION_CONTEXT('',''));

/* product structure */
#20 = PRODUCT('{name}','{name}','',(#100));
#21 = PRODUCT_DEFINITION_FORMATION('','',#20);
#22 = DESIGN_CONTEXT('design',#100,'design');
#23 = PRODUCT_DEFINITION('','',#21,#22);

/* faceted boundary representation */
{data}

#30 = SHAPE_REPRESENTATION('',(#{brep_id}),#114);
#31 = PRODUCT_DEFINITION_SHAPE('','',#23);
#32 = SHAPE_DEFINITION_REPRESENTATION(#31,#30);

ENDSEC;
END-ISO-10303-21;
",
        name = name,
        data = data.join("\n"),
        brep_id = brep_id,
    )
}

impl Solid {
    pub fn to_step(&self, name: &str) -> String {
        self::to_step(self, name)
    }
}
