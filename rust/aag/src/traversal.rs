// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Navigation of the solid's shape hierarchy, and the solid's
//! implementation of [`TopologyProvider`].
//!
//! Downward queries follow the stored references (face → wires → edges →
//! vertices); upward queries go through the incidence indices. Results that
//! come out of hash sets are sorted by key so that callers always see
//! creation order.

use nalgebra::Vector3;

use crate::keys::*;
use crate::provider::TopologyProvider;
use crate::solid::Solid;

// =============================================================================
// Downward traversal
// =============================================================================

impl Solid {
    /// Returns the start and end vertices of an edge.
    pub fn edge_vertices(&self, key: EdgeKey) -> Option<(VertexKey, VertexKey)> {
        self.edges.get(key).map(|e| (e.start, e.end))
    }

    /// Returns the edges of a wire in traversal order.
    pub fn wire_edges(&self, key: WireKey) -> Option<&[EdgeKey]> {
        self.wires.get(key).map(|w| w.edges.as_slice())
    }

    /// Returns the wires of a face, outer wire first.
    pub fn face_wires(&self, key: FaceKey) -> Option<Vec<WireKey>> {
        let face = self.faces.get(key)?;
        let mut wires = Vec::with_capacity(1 + face.inner_wires.len());
        wires.push(face.outer_wire);
        wires.extend(face.inner_wires.iter().copied());
        Some(wires)
    }

    /// Returns the distinct edges bounding a face, in traversal order.
    pub fn face_edges(&self, key: FaceKey) -> Vec<EdgeKey> {
        let mut edges: Vec<EdgeKey> = Vec::new();
        for wk in self.face_wires(key).unwrap_or_default() {
            for &ek in self.wire_edges(wk).unwrap_or_default() {
                if !edges.contains(&ek) {
                    edges.push(ek);
                }
            }
        }
        edges
    }

    /// Returns the faces of a shell.
    pub fn shell_faces(&self, key: ShellKey) -> Option<&[FaceKey]> {
        self.shells.get(key).map(|s| s.faces.as_slice())
    }

    /// Counts how many times a face's wires traverse an edge.
    pub fn edge_occurrences(&self, face: FaceKey, edge: EdgeKey) -> usize {
        self.face_wires(face)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|wk| self.wire_edges(wk))
            .map(|edges| edges.iter().filter(|&&ek| ek == edge).count())
            .sum()
    }

    /// Direction of an edge as the face's boundary traverses it, from the
    /// oriented start vertex to the oriented end vertex. Uses the first
    /// traversal if there are several.
    pub fn oriented_edge_direction(&self, face: FaceKey, edge: EdgeKey) -> Option<Vector3<f64>> {
        for wk in self.face_wires(face)? {
            let wire = self.wires.get(wk)?;
            for (i, &ek) in wire.edges.iter().enumerate() {
                if ek != edge {
                    continue;
                }
                let data = self.edges.get(ek)?;
                let (from, to) = if wire.orientations[i] {
                    (data.start, data.end)
                } else {
                    (data.end, data.start)
                };
                return Some(self.vertex_point(to)? - self.vertex_point(from)?);
            }
        }
        None
    }
}

// =============================================================================
// Upward traversal
// =============================================================================

impl Solid {
    /// Returns the edges that use a vertex.
    pub fn vertex_edges(&self, key: VertexKey) -> Vec<EdgeKey> {
        let mut edges: Vec<EdgeKey> = self
            .vertex_to_edges
            .get(&key)
            .map(|s| s.iter().copied().collect())
            .unwrap_or_default();
        edges.sort_unstable();
        edges
    }

    /// Returns the wires that contain an edge.
    pub fn edge_wires(&self, key: EdgeKey) -> Vec<WireKey> {
        let mut wires: Vec<WireKey> = self
            .edge_to_wires
            .get(&key)
            .map(|s| s.iter().copied().collect())
            .unwrap_or_default();
        wires.sort_unstable();
        wires
    }

    /// Returns the faces that use a wire.
    pub fn wire_faces(&self, key: WireKey) -> Vec<FaceKey> {
        let mut faces: Vec<FaceKey> = self
            .wire_to_faces
            .get(&key)
            .map(|s| s.iter().copied().collect())
            .unwrap_or_default();
        faces.sort_unstable();
        faces
    }

    /// Returns the distinct faces bounded by an edge.
    pub fn edge_faces(&self, key: EdgeKey) -> Vec<FaceKey> {
        let mut faces: Vec<FaceKey> = self
            .edge_wires(key)
            .into_iter()
            .flat_map(|wk| self.wire_faces(wk))
            .collect();
        faces.sort_unstable();
        faces.dedup();
        faces
    }

    /// Finds an open edge joining two vertices, in either direction.
    pub fn find_edge(&self, a: VertexKey, b: VertexKey) -> Option<EdgeKey> {
        self.vertex_edges(a).into_iter().find(|&ek| {
            self.edges.get(ek).is_some_and(|e| {
                !e.is_closed() && ((e.start == a && e.end == b) || (e.start == b && e.end == a))
            })
        })
    }
}

impl TopologyProvider for Solid {
    type Face = FaceKey;
    type Edge = EdgeKey;
    type Vertex = VertexKey;
    type SubShape = ShapeKey;

    fn faces(&self) -> Vec<FaceKey> {
        self.faces.keys().collect()
    }

    fn edges(&self) -> Vec<EdgeKey> {
        self.edges.keys().collect()
    }

    fn vertices(&self) -> Vec<VertexKey> {
        self.vertices.keys().collect()
    }

    /// Shells, faces, wires, edges, vertices, each group in creation order.
    fn sub_shapes(&self) -> Vec<ShapeKey> {
        self.shells
            .keys()
            .map(ShapeKey::Shell)
            .chain(self.faces.keys().map(ShapeKey::Face))
            .chain(self.wires.keys().map(ShapeKey::Wire))
            .chain(self.edges.keys().map(ShapeKey::Edge))
            .chain(self.vertices.keys().map(ShapeKey::Vertex))
            .collect()
    }

    fn face_edges(&self, face: FaceKey) -> Vec<EdgeKey> {
        Solid::face_edges(self, face)
    }

    fn edge_faces(&self, edge: EdgeKey) -> Vec<FaceKey> {
        Solid::edge_faces(self, edge)
    }

    fn vertex_edges(&self, vertex: VertexKey) -> Vec<EdgeKey> {
        Solid::vertex_edges(self, vertex)
    }

    fn is_seam(&self, face: FaceKey, edge: EdgeKey) -> bool {
        self.edge_occurrences(face, edge) > 1
    }

    fn surface_name(&self, face: FaceKey) -> String {
        self.face_surface(face)
            .map(|s| s.name().to_string())
            .unwrap_or_else(|| "undefined".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_box() -> Solid {
        let mut solid = Solid::new();
        solid.make_box([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]).unwrap();
        solid
    }

    #[test]
    fn every_box_edge_has_two_faces() {
        let solid = unit_box();
        for edge in TopologyProvider::edges(&solid) {
            assert_eq!(solid.edge_faces(edge).len(), 2);
        }
    }

    #[test]
    fn every_box_face_has_four_edges() {
        let solid = unit_box();
        for face in TopologyProvider::faces(&solid) {
            assert_eq!(solid.face_edges(face).len(), 4);
        }
    }

    #[test]
    fn box_vertices_have_three_edges() {
        let solid = unit_box();
        for vertex in TopologyProvider::vertices(&solid) {
            assert_eq!(solid.vertex_edges(vertex).len(), 3);
        }
    }

    #[test]
    fn faces_enumerate_in_creation_order() {
        let solid = unit_box();
        let faces = TopologyProvider::faces(&solid);
        let mut sorted = faces.clone();
        sorted.sort_unstable();
        assert_eq!(faces, sorted);
        assert_eq!(faces.len(), 6);
    }

    #[test]
    fn sub_shapes_cover_the_hierarchy() {
        let solid = unit_box();
        let shapes = solid.sub_shapes();
        // 1 shell + 6 faces + 6 wires + 12 edges + 8 vertices
        assert_eq!(shapes.len(), 33);
        assert_eq!(shapes[0].shape_type(), ShapeType::Shell);
        assert_eq!(shapes[32].shape_type(), ShapeType::Vertex);
    }

    #[test]
    fn seam_is_detected_on_cylinder_only() {
        let mut solid = Solid::new();
        let shell = solid.make_cylinder([0.0, 0.0, 0.0], 1.0, 1.0).unwrap();
        let faces = solid.shell_faces(shell).unwrap().to_vec();
        let lateral = faces[0];
        let bottom = faces[1];

        let seam = solid
            .face_edges(lateral)
            .into_iter()
            .find(|&e| solid.is_seam(lateral, e))
            .unwrap();
        assert_eq!(solid.edge_faces(seam), vec![lateral]);

        for edge in solid.face_edges(bottom) {
            assert!(!solid.is_seam(bottom, edge));
        }
    }

    #[test]
    fn oriented_direction_flips_between_faces() {
        let solid = unit_box();
        let faces = TopologyProvider::faces(&solid);
        let (bottom, front) = (faces[0], faces[2]);

        let shared = solid
            .face_edges(bottom)
            .into_iter()
            .find(|e| solid.face_edges(front).contains(e))
            .unwrap();

        let a = solid.oriented_edge_direction(bottom, shared).unwrap();
        let b = solid.oriented_edge_direction(front, shared).unwrap();
        assert_relative_eq!(a, -b, epsilon = 1e-12);
    }

    #[test]
    fn surface_names() {
        let solid = unit_box();
        let face = TopologyProvider::faces(&solid)[0];
        assert_eq!(solid.surface_name(face), "plane");
    }

    #[test]
    fn find_edge_in_either_direction() {
        let mut solid = Solid::new();
        let a = solid.add_vertex(0.0, 0.0, 0.0);
        let b = solid.add_vertex(1.0, 0.0, 0.0);
        let ab = solid.add_edge(a, b).unwrap();

        assert_eq!(solid.find_edge(a, b), Some(ab));
        assert_eq!(solid.find_edge(b, a), Some(ab));
        assert_eq!(solid.find_edge(a, a), None);
    }
}
