// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dihedral classification for planar faces of a [`Solid`].
//!
//! For two planar faces with outward normals `na` and `nb` sharing an edge
//! that face A traverses in direction `d` (counter-clockwise around `na`),
//! the transition is convex when `(na × nb) · d > 0` and concave when it is
//! negative. The reported angle is the angle between the normals, so a cube
//! corner edge reads 90° and two coplanar faces read 0°.
//!
//! Pairs involving a non-planar face are reported as
//! [`AngleType::Undefined`]; curved geometry is left to a real kernel.

use crate::attributes::AngleType;
use crate::keys::{EdgeKey, FaceKey};
use crate::provider::{AngleClassifier, Classification};
use crate::solid::Solid;

/// Normals closer than this (radians) are treated as parallel.
const PARALLEL_TOLERANCE: f64 = 1e-9;

/// Classifier for solids built from planar polygons.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanarDihedralClassifier;

impl AngleClassifier<Solid> for PlanarDihedralClassifier {
    fn classify(
        &self,
        solid: &Solid,
        a: FaceKey,
        b: FaceKey,
        allow_smooth: bool,
        smooth_tolerance: f64,
    ) -> Classification<EdgeKey> {
        let edges_b = solid.face_edges(b);
        let shared: Vec<EdgeKey> = solid
            .face_edges(a)
            .into_iter()
            .filter(|e| edges_b.contains(e))
            .collect();

        let normals = (
            solid.face_surface(a).and_then(|s| s.plane_normal()),
            solid.face_surface(b).and_then(|s| s.plane_normal()),
        );
        let (Some(na), Some(nb)) = normals else {
            return Classification::undefined(shared);
        };

        let radians = na.angle(&nb);
        if radians < PARALLEL_TOLERANCE {
            return Classification {
                angle: AngleType::Smooth,
                radians,
                shared_edges: shared,
            };
        }

        let cross = na.cross(&nb);
        let side = shared
            .iter()
            .filter_map(|&e| solid.oriented_edge_direction(a, e))
            .filter_map(|d| d.try_normalize(1e-12))
            .map(|d| cross.dot(&d))
            .find(|s| s.abs() > 1e-12);

        let Some(side) = side else {
            return Classification::undefined(shared);
        };

        let angle = match (allow_smooth && radians < smooth_tolerance, side > 0.0) {
            (true, true) => AngleType::SmoothConvex,
            (true, false) => AngleType::SmoothConcave,
            (false, true) => AngleType::Convex,
            (false, false) => AngleType::Concave,
        };

        Classification {
            angle,
            radians,
            shared_edges: shared,
        }
    }

    fn classify_self(&self, solid: &Solid, face: FaceKey) -> (AngleType, f64) {
        match solid.face_surface(face) {
            Some(surface) if surface.is_periodic() => (AngleType::Smooth, 0.0),
            _ => (AngleType::Undefined, 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::TopologyProvider;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn box_edges_are_convex_right_angles() {
        let mut solid = Solid::new();
        solid.make_box([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]).unwrap();
        let faces = solid.faces();

        // bottom / front
        let c = PlanarDihedralClassifier.classify(&solid, faces[0], faces[2], false, 0.0);
        assert_eq!(c.angle, AngleType::Convex);
        assert_relative_eq!(c.radians, FRAC_PI_2, epsilon = 1e-12);
        assert_eq!(c.shared_edges.len(), 1);

        // classification does not depend on argument order
        let c = PlanarDihedralClassifier.classify(&solid, faces[2], faces[0], false, 0.0);
        assert_eq!(c.angle, AngleType::Convex);
    }

    #[test]
    fn opposite_faces_share_nothing() {
        let mut solid = Solid::new();
        solid.make_box([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]).unwrap();
        let faces = solid.faces();

        let c = PlanarDihedralClassifier.classify(&solid, faces[0], faces[1], false, 0.0);
        assert_eq!(c.angle, AngleType::Undefined);
        assert!(c.shared_edges.is_empty());
    }

    #[test]
    fn l_prism_inner_corner_is_concave() {
        let mut solid = Solid::new();
        let profile = [[0.0, 0.0], [2.0, 0.0], [2.0, 1.0], [1.0, 1.0], [1.0, 2.0], [0.0, 2.0]];
        solid.make_prism(&profile, 0.0, 1.0).unwrap();
        let faces = solid.faces();

        // sides start at index 2; the notch sits between sides 2 and 3
        let c = PlanarDihedralClassifier.classify(&solid, faces[4], faces[5], false, 0.0);
        assert_eq!(c.angle, AngleType::Concave);
        assert_relative_eq!(c.radians, FRAC_PI_2, epsilon = 1e-12);

        let c = PlanarDihedralClassifier.classify(&solid, faces[2], faces[3], false, 0.0);
        assert_eq!(c.angle, AngleType::Convex);
    }

    #[test]
    fn shallow_fold_is_smooth_only_when_allowed() {
        // A roof: two planes meeting at a ridge with a 2 degree kink.
        let mut solid = Solid::new();
        let slope = 1.0_f64.to_radians().tan();
        let v = [
            solid.add_vertex(-1.0, 0.0, 0.0),
            solid.add_vertex(0.0, 0.0, slope),
            solid.add_vertex(0.0, 1.0, slope),
            solid.add_vertex(-1.0, 1.0, 0.0),
            solid.add_vertex(1.0, 0.0, 0.0),
            solid.add_vertex(1.0, 1.0, 0.0),
        ];
        let left = solid.make_polygon_face(&[v[0], v[1], v[2], v[3]]).unwrap();
        let right = solid.make_polygon_face(&[v[1], v[4], v[5], v[2]]).unwrap();

        let sharp = PlanarDihedralClassifier.classify(&solid, left, right, false, 0.0);
        assert_eq!(sharp.angle, AngleType::Convex);
        assert_relative_eq!(sharp.radians, 2.0_f64.to_radians(), epsilon = 1e-9);

        let smooth =
            PlanarDihedralClassifier.classify(&solid, left, right, true, 3.0_f64.to_radians());
        assert_eq!(smooth.angle, AngleType::SmoothConvex);
    }

    #[test]
    fn curved_faces_are_undefined() {
        let mut solid = Solid::new();
        solid.make_cylinder([0.0, 0.0, 0.0], 1.0, 1.0).unwrap();
        let faces = solid.faces();

        let c = PlanarDihedralClassifier.classify(&solid, faces[0], faces[1], false, 0.0);
        assert_eq!(c.angle, AngleType::Undefined);
        assert_eq!(c.shared_edges.len(), 1);

        assert_eq!(
            PlanarDihedralClassifier.classify_self(&solid, faces[0]),
            (AngleType::Smooth, 0.0)
        );
        assert_eq!(
            PlanarDihedralClassifier.classify_self(&solid, faces[1]).0,
            AngleType::Undefined
        );
    }
}
