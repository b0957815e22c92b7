// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arena-based B-Rep store.
//!
//! [`Solid`] is a minimal boundary representation: vertices, edges, wires,
//! faces and shells live in slot maps with stable keys, and upward incidence
//! indices (vertex → edges, edge → wires, wire → faces) make "which faces
//! meet at this edge?" an O(1) lookup. It carries just enough geometry
//! (vertex points and surface descriptors) for the planar dihedral
//! classifier and for diagnostics; it is not a geometric kernel.

use nalgebra::{Point3, Vector3};
use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::SlotMap;

use crate::keys::*;

/// Data stored for a vertex.
#[derive(Debug, Clone)]
pub struct VertexData {
    pub point: Point3<f64>,
}

/// Data stored for an edge. An edge whose start and end coincide is closed
/// (a full circle, for instance).
#[derive(Debug, Clone)]
pub struct EdgeData {
    pub start: VertexKey,
    pub end: VertexKey,
}

impl EdgeData {
    pub fn is_closed(&self) -> bool {
        self.start == self.end
    }
}

/// Data stored for a wire: a closed chain of edges.
#[derive(Debug, Clone)]
pub struct WireData {
    pub edges: Vec<EdgeKey>,
    /// `true` if edge[i] is traversed start→end, `false` if reversed.
    pub orientations: Vec<bool>,
}

/// Host surface of a face.
///
/// Plane normals point out of the material; builders keep wire traversal
/// counter-clockwise around them.
#[derive(Debug, Clone, PartialEq)]
pub enum Surface {
    Plane {
        origin: Point3<f64>,
        normal: Vector3<f64>,
    },
    Cylinder {
        origin: Point3<f64>,
        axis: Vector3<f64>,
        radius: f64,
    },
    Cone {
        apex: Point3<f64>,
        axis: Vector3<f64>,
        half_angle: f64,
    },
    Sphere {
        center: Point3<f64>,
        radius: f64,
    },
    Torus {
        center: Point3<f64>,
        axis: Vector3<f64>,
        major_radius: f64,
        minor_radius: f64,
    },
    Other(String),
}

impl Surface {
    /// Short lowercase name, as shown in graph dumps.
    pub fn name(&self) -> &str {
        match self {
            Surface::Plane { .. } => "plane",
            Surface::Cylinder { .. } => "cylinder",
            Surface::Cone { .. } => "cone",
            Surface::Sphere { .. } => "sphere",
            Surface::Torus { .. } => "torus",
            Surface::Other(name) => name,
        }
    }

    /// Returns `true` for surfaces that close onto themselves and so need a
    /// seam edge to be bounded by a single face.
    pub fn is_periodic(&self) -> bool {
        matches!(
            self,
            Surface::Cylinder { .. }
                | Surface::Cone { .. }
                | Surface::Sphere { .. }
                | Surface::Torus { .. }
        )
    }

    /// The outward normal of a planar surface.
    pub fn plane_normal(&self) -> Option<Vector3<f64>> {
        match self {
            Surface::Plane { normal, .. } => Some(*normal),
            _ => None,
        }
    }
}

/// Data stored for a face: one outer wire and zero or more holes.
#[derive(Debug, Clone)]
pub struct FaceData {
    pub surface: Surface,
    pub outer_wire: WireKey,
    pub inner_wires: Vec<WireKey>,
}

/// Data stored for a shell.
#[derive(Debug, Clone)]
pub struct ShellData {
    pub faces: Vec<FaceKey>,
}

/// The store that owns all shapes of one solid and their incidence indices.
///
/// # Example
///
/// ```
/// use brep_aag::Solid;
///
/// let mut solid = Solid::new();
/// solid.make_box([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]).unwrap();
///
/// assert_eq!(solid.face_count(), 6);
/// assert_eq!(solid.edge_count(), 12);
/// assert_eq!(solid.vertex_count(), 8);
/// ```
#[derive(Debug, Clone)]
pub struct Solid {
    pub(crate) vertices: SlotMap<VertexKey, VertexData>,
    pub(crate) edges: SlotMap<EdgeKey, EdgeData>,
    pub(crate) wires: SlotMap<WireKey, WireData>,
    pub(crate) faces: SlotMap<FaceKey, FaceData>,
    pub(crate) shells: SlotMap<ShellKey, ShellData>,

    // Upward incidence: child → parents
    pub(crate) vertex_to_edges: FxHashMap<VertexKey, FxHashSet<EdgeKey>>,
    pub(crate) edge_to_wires: FxHashMap<EdgeKey, FxHashSet<WireKey>>,
    pub(crate) wire_to_faces: FxHashMap<WireKey, FxHashSet<FaceKey>>,
}

impl Solid {
    pub fn new() -> Self {
        Self {
            vertices: SlotMap::with_key(),
            edges: SlotMap::with_key(),
            wires: SlotMap::with_key(),
            faces: SlotMap::with_key(),
            shells: SlotMap::with_key(),

            vertex_to_edges: FxHashMap::default(),
            edge_to_wires: FxHashMap::default(),
            wire_to_faces: FxHashMap::default(),
        }
    }

    // --- Vertices ---

    pub fn add_vertex(&mut self, x: f64, y: f64, z: f64) -> VertexKey {
        self.vertices.insert(VertexData {
            point: Point3::new(x, y, z),
        })
    }

    pub fn vertex(&self, key: VertexKey) -> Option<&VertexData> {
        self.vertices.get(key)
    }

    pub fn vertex_point(&self, key: VertexKey) -> Option<Point3<f64>> {
        self.vertices.get(key).map(|v| v.point)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    // --- Edges ---

    pub fn edge(&self, key: EdgeKey) -> Option<&EdgeData> {
        self.edges.get(key)
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    // --- Wires ---

    pub fn wire(&self, key: WireKey) -> Option<&WireData> {
        self.wires.get(key)
    }

    pub fn wire_count(&self) -> usize {
        self.wires.len()
    }

    // --- Faces ---

    pub fn face(&self, key: FaceKey) -> Option<&FaceData> {
        self.faces.get(key)
    }

    pub fn face_surface(&self, key: FaceKey) -> Option<&Surface> {
        self.faces.get(key).map(|f| &f.surface)
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    // --- Shells ---

    pub fn shell(&self, key: ShellKey) -> Option<&ShellData> {
        self.shells.get(key)
    }

    pub fn shell_count(&self) -> usize {
        self.shells.len()
    }

    /// Returns `true` if the handle references a shape of this solid.
    pub fn contains(&self, key: ShapeKey) -> bool {
        match key {
            ShapeKey::Shell(k) => self.shells.contains_key(k),
            ShapeKey::Face(k) => self.faces.contains_key(k),
            ShapeKey::Wire(k) => self.wires.contains_key(k),
            ShapeKey::Edge(k) => self.edges.contains_key(k),
            ShapeKey::Vertex(k) => self.vertices.contains_key(k),
        }
    }

    // --- Incidence index helpers ---

    pub(crate) fn link_vertex_edge(&mut self, vertex: VertexKey, edge: EdgeKey) {
        self.vertex_to_edges
            .entry(vertex)
            .or_default()
            .insert(edge);
    }

    pub(crate) fn link_edge_wire(&mut self, edge: EdgeKey, wire: WireKey) {
        self.edge_to_wires.entry(edge).or_default().insert(wire);
    }

    pub(crate) fn link_wire_face(&mut self, wire: WireKey, face: FaceKey) {
        self.wire_to_faces.entry(wire).or_default().insert(face);
    }
}

impl Default for Solid {
    fn default() -> Self {
        Self::new()
    }
}
