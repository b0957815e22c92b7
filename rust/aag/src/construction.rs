// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Construction of shapes, from single edges up to whole primitive solids.
//!
//! Every shape is created through the [`Solid`], which checks that referenced
//! sub-shapes exist and keeps the incidence indices current. The primitive
//! builders share edges between neighboring faces, so the result is a proper
//! closed shell rather than a soup of independent polygons.

use nalgebra::{Point3, Vector3};

use crate::error::{Error, Result};
use crate::keys::*;
use crate::solid::*;

impl Solid {
    /// Creates an edge between two existing vertices. Passing the same vertex
    /// twice creates a closed edge.
    pub fn add_edge(&mut self, start: VertexKey, end: VertexKey) -> Result<EdgeKey> {
        if !self.vertices.contains_key(start) {
            return Err(Error::VertexNotFound(start));
        }
        if !self.vertices.contains_key(end) {
            return Err(Error::VertexNotFound(end));
        }

        let key = self.edges.insert(EdgeData { start, end });
        self.link_vertex_edge(start, key);
        self.link_vertex_edge(end, key);
        Ok(key)
    }

    /// Returns the open edge joining `a` and `b` in either direction,
    /// creating it if the solid has none yet.
    pub fn edge_between(&mut self, a: VertexKey, b: VertexKey) -> Result<EdgeKey> {
        match self.find_edge(a, b) {
            Some(edge) => Ok(edge),
            None => self.add_edge(a, b),
        }
    }

    /// Creates a closed wire from an ordered list of edges.
    ///
    /// Consecutive edges must share a vertex and the last edge must end where
    /// the first one starts. The same edge may appear twice, traversed in
    /// opposite directions, which is how a seam is recorded.
    pub fn add_wire(&mut self, edge_keys: &[EdgeKey]) -> Result<WireKey> {
        if edge_keys.is_empty() {
            return Err(Error::EmptyWire);
        }

        for &ek in edge_keys {
            if !self.edges.contains_key(ek) {
                return Err(Error::EdgeNotFound(ek));
            }
        }

        let mut orientations = Vec::with_capacity(edge_keys.len());

        if edge_keys.len() == 1 {
            orientations.push(true);
        } else {
            // The first edge's direction is fixed by the vertex it shares
            // with the second one.
            let first = &self.edges[edge_keys[0]];
            let second = &self.edges[edge_keys[1]];

            if first.end == second.start || first.end == second.end {
                orientations.push(true);
            } else if first.start == second.start || first.start == second.end {
                orientations.push(false);
            } else {
                return Err(Error::DisconnectedWire(0, 1));
            }

            for i in 1..edge_keys.len() {
                let prev_edge = &self.edges[edge_keys[i - 1]];
                let curr_edge = &self.edges[edge_keys[i]];

                let prev_end = if orientations[i - 1] {
                    prev_edge.end
                } else {
                    prev_edge.start
                };

                if prev_end == curr_edge.start {
                    orientations.push(true);
                } else if prev_end == curr_edge.end {
                    orientations.push(false);
                } else {
                    return Err(Error::DisconnectedWire(i - 1, i));
                }
            }
        }

        let first = &self.edges[edge_keys[0]];
        let last = &self.edges[edge_keys[edge_keys.len() - 1]];
        let wire_start = if orientations[0] { first.start } else { first.end };
        let wire_end = if orientations[edge_keys.len() - 1] {
            last.end
        } else {
            last.start
        };
        if wire_start != wire_end {
            return Err(Error::OpenWire);
        }

        let key = self.wires.insert(WireData {
            edges: edge_keys.to_vec(),
            orientations,
        });

        for &ek in edge_keys {
            self.link_edge_wire(ek, key);
        }

        Ok(key)
    }

    /// Creates a face on `surface` bounded by an outer wire.
    pub fn add_face(&mut self, surface: Surface, outer_wire: WireKey) -> Result<FaceKey> {
        self.add_face_with_holes(surface, outer_wire, &[])
    }

    /// Creates a face with an outer boundary and inner boundaries (holes).
    pub fn add_face_with_holes(
        &mut self,
        surface: Surface,
        outer_wire: WireKey,
        inner_wires: &[WireKey],
    ) -> Result<FaceKey> {
        let wire = self
            .wires
            .get(outer_wire)
            .ok_or(Error::WireNotFound(outer_wire))?;

        let closed_loop = wire.edges.len() == 1 && self.edges[wire.edges[0]].is_closed();
        if wire.edges.len() < 3 && !closed_loop {
            return Err(Error::DegenerateFace);
        }

        for &iw in inner_wires {
            if !self.wires.contains_key(iw) {
                return Err(Error::WireNotFound(iw));
            }
        }

        let key = self.faces.insert(FaceData {
            surface,
            outer_wire,
            inner_wires: inner_wires.to_vec(),
        });

        self.link_wire_face(outer_wire, key);
        for &iw in inner_wires {
            self.link_wire_face(iw, key);
        }

        Ok(key)
    }

    /// Creates a shell from a list of faces.
    pub fn add_shell(&mut self, face_keys: &[FaceKey]) -> Result<ShellKey> {
        if face_keys.is_empty() {
            return Err(Error::EmptyShell);
        }

        for &fk in face_keys {
            if !self.faces.contains_key(fk) {
                return Err(Error::FaceNotFound(fk));
            }
        }

        Ok(self.shells.insert(ShellData {
            faces: face_keys.to_vec(),
        }))
    }

    // =========================================================================
    // Builders
    // =========================================================================

    /// Creates a planar face through a closed polygon of vertices.
    ///
    /// The polygon is taken counter-clockwise around the outward normal,
    /// which is derived from the vertex order (Newell's method). Edges
    /// already joining two consecutive vertices are reused.
    pub fn make_polygon_face(&mut self, corners: &[VertexKey]) -> Result<FaceKey> {
        if corners.len() < 3 {
            return Err(Error::DegenerateFace);
        }

        let mut points = Vec::with_capacity(corners.len());
        for &vk in corners {
            points.push(self.vertex_point(vk).ok_or(Error::VertexNotFound(vk))?);
        }

        let normal = newell_normal(&points).ok_or(Error::DegenerateFace)?;

        let mut edges = Vec::with_capacity(corners.len());
        for i in 0..corners.len() {
            let next = corners[(i + 1) % corners.len()];
            edges.push(self.edge_between(corners[i], next)?);
        }

        let wire = self.add_wire(&edges)?;
        self.add_face(
            Surface::Plane {
                origin: points[0],
                normal,
            },
            wire,
        )
    }

    /// Builds an axis-aligned box spanning `min` to `max`.
    ///
    /// Faces are created bottom, top, front (y = min), back, left (x = min),
    /// right.
    pub fn make_box(&mut self, min: [f64; 3], max: [f64; 3]) -> Result<ShellKey> {
        if (0..3).any(|i| max[i] <= min[i]) {
            return Err(Error::InvalidProfile(format!(
                "box extent is empty: {min:?} .. {max:?}"
            )));
        }

        let v = [
            self.add_vertex(min[0], min[1], min[2]),
            self.add_vertex(max[0], min[1], min[2]),
            self.add_vertex(max[0], max[1], min[2]),
            self.add_vertex(min[0], max[1], min[2]),
            self.add_vertex(min[0], min[1], max[2]),
            self.add_vertex(max[0], min[1], max[2]),
            self.add_vertex(max[0], max[1], max[2]),
            self.add_vertex(min[0], max[1], max[2]),
        ];

        let faces = [
            self.make_polygon_face(&[v[0], v[3], v[2], v[1]])?,
            self.make_polygon_face(&[v[4], v[5], v[6], v[7]])?,
            self.make_polygon_face(&[v[0], v[1], v[5], v[4]])?,
            self.make_polygon_face(&[v[3], v[7], v[6], v[2]])?,
            self.make_polygon_face(&[v[0], v[4], v[7], v[3]])?,
            self.make_polygon_face(&[v[1], v[2], v[6], v[5]])?,
        ];

        self.add_shell(&faces)
    }

    /// Extrudes a closed 2D profile along +Z from `z0` by `height`.
    ///
    /// Faces are created bottom, top, then one side face per profile
    /// segment in profile order. Clockwise profiles are reversed first.
    pub fn make_prism(&mut self, profile: &[[f64; 2]], z0: f64, height: f64) -> Result<ShellKey> {
        if profile.len() < 3 {
            return Err(Error::InvalidProfile(format!(
                "profile needs at least 3 points, got {}",
                profile.len()
            )));
        }
        if height <= 0.0 {
            return Err(Error::InvalidProfile(format!(
                "extrusion height must be positive, got {height}"
            )));
        }

        let area = signed_area(profile);
        if area.abs() < f64::EPSILON {
            return Err(Error::InvalidProfile("profile has zero area".to_string()));
        }

        let mut points = profile.to_vec();
        if area < 0.0 {
            points.reverse();
        }

        let bottom: Vec<VertexKey> = points
            .iter()
            .map(|p| self.add_vertex(p[0], p[1], z0))
            .collect();
        let top: Vec<VertexKey> = points
            .iter()
            .map(|p| self.add_vertex(p[0], p[1], z0 + height))
            .collect();

        let n = points.len();
        let mut faces = Vec::with_capacity(n + 2);

        let bottom_reversed: Vec<VertexKey> = bottom.iter().rev().copied().collect();
        faces.push(self.make_polygon_face(&bottom_reversed)?);
        faces.push(self.make_polygon_face(&top)?);

        for i in 0..n {
            let j = (i + 1) % n;
            faces.push(self.make_polygon_face(&[bottom[i], bottom[j], top[j], top[i]])?);
        }

        self.add_shell(&faces)
    }

    /// Builds a closed cylinder standing on `base` along +Z.
    ///
    /// Faces are created lateral, bottom, top. The lateral face is bounded by
    /// both circles and a seam edge that its wire traverses twice.
    pub fn make_cylinder(&mut self, base: [f64; 3], radius: f64, height: f64) -> Result<ShellKey> {
        if radius <= 0.0 || height <= 0.0 {
            return Err(Error::InvalidProfile(format!(
                "cylinder needs positive radius and height, got r={radius} h={height}"
            )));
        }

        let origin = Point3::new(base[0], base[1], base[2]);
        let v0 = self.add_vertex(base[0] + radius, base[1], base[2]);
        let v1 = self.add_vertex(base[0] + radius, base[1], base[2] + height);

        let bottom_circle = self.add_edge(v0, v0)?;
        let top_circle = self.add_edge(v1, v1)?;
        let seam = self.add_edge(v0, v1)?;

        let lateral_wire = self.add_wire(&[bottom_circle, seam, top_circle, seam])?;
        let bottom_wire = self.add_wire(&[bottom_circle])?;
        let top_wire = self.add_wire(&[top_circle])?;

        let lateral = self.add_face(
            Surface::Cylinder {
                origin,
                axis: Vector3::z(),
                radius,
            },
            lateral_wire,
        )?;
        let bottom = self.add_face(
            Surface::Plane {
                origin,
                normal: -Vector3::z(),
            },
            bottom_wire,
        )?;
        let top = self.add_face(
            Surface::Plane {
                origin: Point3::new(base[0], base[1], base[2] + height),
                normal: Vector3::z(),
            },
            top_wire,
        )?;

        self.add_shell(&[lateral, bottom, top])
    }
}

/// Unit normal of a closed polygon, or `None` if it is degenerate.
fn newell_normal(points: &[Point3<f64>]) -> Option<Vector3<f64>> {
    let mut normal = Vector3::zeros();
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        normal.x += (a.y - b.y) * (a.z + b.z);
        normal.y += (a.z - b.z) * (a.x + b.x);
        normal.z += (a.x - b.x) * (a.y + b.y);
    }
    normal.try_normalize(1e-12)
}

/// Shoelace area, positive for counter-clockwise profiles.
fn signed_area(profile: &[[f64; 2]]) -> f64 {
    let mut twice = 0.0;
    for i in 0..profile.len() {
        let a = profile[i];
        let b = profile[(i + 1) % profile.len()];
        twice += a[0] * b[1] - b[0] * a[1];
    }
    twice / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn wire_orientation_tracking() {
        let mut solid = Solid::new();
        let a = solid.add_vertex(0.0, 0.0, 0.0);
        let b = solid.add_vertex(1.0, 0.0, 0.0);
        let c = solid.add_vertex(0.0, 1.0, 0.0);

        let ab = solid.add_edge(a, b).unwrap();
        let cb = solid.add_edge(c, b).unwrap();
        let ca = solid.add_edge(c, a).unwrap();

        let wire = solid.add_wire(&[ab, cb, ca]).unwrap();
        assert_eq!(solid.wire(wire).unwrap().orientations, vec![true, false, true]);
    }

    #[test]
    fn disconnected_wire_is_rejected() {
        let mut solid = Solid::new();
        let v: Vec<VertexKey> = (0..4).map(|i| solid.add_vertex(i as f64, 0.0, 0.0)).collect();
        let e0 = solid.add_edge(v[0], v[1]).unwrap();
        let e1 = solid.add_edge(v[2], v[3]).unwrap();

        assert!(matches!(
            solid.add_wire(&[e0, e1]),
            Err(Error::DisconnectedWire(0, 1))
        ));
    }

    #[test]
    fn open_wire_is_rejected() {
        let mut solid = Solid::new();
        let v: Vec<VertexKey> = (0..3).map(|i| solid.add_vertex(i as f64, 0.0, 0.0)).collect();
        let e0 = solid.add_edge(v[0], v[1]).unwrap();
        let e1 = solid.add_edge(v[1], v[2]).unwrap();

        assert!(matches!(solid.add_wire(&[e0, e1]), Err(Error::OpenWire)));
        assert!(matches!(solid.add_wire(&[]), Err(Error::EmptyWire)));
    }

    #[test]
    fn polygon_face_normal_follows_vertex_order() {
        let mut solid = Solid::new();
        let v = [
            solid.add_vertex(0.0, 0.0, 0.0),
            solid.add_vertex(1.0, 0.0, 0.0),
            solid.add_vertex(1.0, 1.0, 0.0),
            solid.add_vertex(0.0, 1.0, 0.0),
        ];

        let up = solid.make_polygon_face(&v).unwrap();
        let normal = solid.face_surface(up).unwrap().plane_normal().unwrap();
        assert_relative_eq!(normal, Vector3::z(), epsilon = 1e-12);

        // Same corners reversed: the edges are shared, the normal flips.
        let down = solid.make_polygon_face(&[v[3], v[2], v[1], v[0]]).unwrap();
        let normal = solid.face_surface(down).unwrap().plane_normal().unwrap();
        assert_relative_eq!(normal, -Vector3::z(), epsilon = 1e-12);
        assert_eq!(solid.edge_count(), 4);
    }

    #[test]
    fn collinear_polygon_is_degenerate() {
        let mut solid = Solid::new();
        let v: Vec<VertexKey> = (0..3).map(|i| solid.add_vertex(i as f64, 0.0, 0.0)).collect();
        assert!(matches!(
            solid.make_polygon_face(&v),
            Err(Error::DegenerateFace)
        ));
    }

    #[test]
    fn box_shares_edges() {
        let mut solid = Solid::new();
        let shell = solid.make_box([0.0, 0.0, 0.0], [2.0, 1.0, 1.0]).unwrap();

        assert_eq!(solid.shell(shell).unwrap().faces.len(), 6);
        assert_eq!(solid.vertex_count(), 8);
        assert_eq!(solid.edge_count(), 12);
        assert_eq!(solid.wire_count(), 6);
    }

    #[test]
    fn box_rejects_empty_extent() {
        let mut solid = Solid::new();
        assert!(matches!(
            solid.make_box([0.0, 0.0, 0.0], [1.0, 0.0, 1.0]),
            Err(Error::InvalidProfile(_))
        ));
    }

    #[test]
    fn prism_from_l_profile() {
        let mut solid = Solid::new();
        let profile = [[0.0, 0.0], [2.0, 0.0], [2.0, 1.0], [1.0, 1.0], [1.0, 2.0], [0.0, 2.0]];
        solid.make_prism(&profile, 0.0, 1.0).unwrap();

        assert_eq!(solid.face_count(), 8);
        assert_eq!(solid.vertex_count(), 12);
        assert_eq!(solid.edge_count(), 18);
    }

    #[test]
    fn clockwise_profile_is_reversed() {
        let mut solid = Solid::new();
        let profile = [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]];
        let shell = solid.make_prism(&profile, 0.0, 1.0).unwrap();

        let bottom = solid.shell(shell).unwrap().faces[0];
        let normal = solid.face_surface(bottom).unwrap().plane_normal().unwrap();
        assert_relative_eq!(normal, -Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn prism_rejects_bad_input() {
        let mut solid = Solid::new();
        assert!(solid.make_prism(&[[0.0, 0.0], [1.0, 0.0]], 0.0, 1.0).is_err());
        assert!(solid
            .make_prism(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]], 0.0, 0.0)
            .is_err());
        assert!(solid
            .make_prism(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]], 0.0, 1.0)
            .is_err());
    }

    #[test]
    fn cylinder_has_seam_wire() {
        let mut solid = Solid::new();
        let shell = solid.make_cylinder([0.0, 0.0, 0.0], 1.0, 2.0).unwrap();

        let faces = &solid.shell(shell).unwrap().faces;
        assert_eq!(faces.len(), 3);
        assert_eq!(solid.edge_count(), 3);

        let lateral = solid.face(faces[0]).unwrap();
        let wire = solid.wire(lateral.outer_wire).unwrap();
        assert_eq!(wire.edges.len(), 4);
        assert_eq!(wire.orientations, vec![true, true, true, false]);
    }

    #[test]
    fn signed_area_orientation() {
        assert_relative_eq!(signed_area(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]), 0.5);
        assert_relative_eq!(signed_area(&[[0.0, 0.0], [0.0, 1.0], [1.0, 0.0]]), -0.5);
    }
}
