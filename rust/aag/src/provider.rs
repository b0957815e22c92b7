// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Contracts the graph consumes from the geometric kernel.
//!
//! The graph never looks at geometry itself. It asks a [`TopologyProvider`]
//! for faces, edges and their incidence, and an [`AngleClassifier`] for the
//! dihedral type of each pair of adjacent faces. [`Solid`](crate::Solid) and
//! [`PlanarDihedralClassifier`](crate::PlanarDihedralClassifier) are the
//! in-crate implementations; a binding to another kernel implements the same
//! two traits over its own handle types.

use std::fmt::Debug;
use std::hash::Hash;

use crate::attributes::AngleType;

/// Read-only access to the topology of one solid.
///
/// Every enumeration must be deterministic: calling it twice on the same
/// solid returns the same handles in the same order. Face and edge ids are
/// assigned from these orders.
pub trait TopologyProvider {
    type Face: Copy + Eq + Hash + Debug;
    type Edge: Copy + Eq + Hash + Debug;
    type Vertex: Copy + Eq + Hash + Debug;
    type SubShape: Copy + Eq + Hash + Debug;

    /// All faces, each once.
    fn faces(&self) -> Vec<Self::Face>;

    /// All edges, each once.
    fn edges(&self) -> Vec<Self::Edge>;

    /// All vertices, each once.
    fn vertices(&self) -> Vec<Self::Vertex>;

    /// All sub-shapes of every type, each once.
    fn sub_shapes(&self) -> Vec<Self::SubShape>;

    /// Edges bounding a face, each once.
    fn face_edges(&self, face: Self::Face) -> Vec<Self::Edge>;

    /// Faces bounded by an edge, each once. A seam edge lists its face once.
    fn edge_faces(&self, edge: Self::Edge) -> Vec<Self::Face>;

    /// Edges ending at a vertex, each once.
    fn vertex_edges(&self, vertex: Self::Vertex) -> Vec<Self::Edge>;

    /// Returns `true` if `edge` is a seam of `face`, i.e. the face meets
    /// itself along it.
    fn is_seam(&self, face: Self::Face, edge: Self::Edge) -> bool;

    /// Name of the face's host surface, for diagnostics.
    fn surface_name(&self, _face: Self::Face) -> String {
        "undefined".to_string()
    }
}

/// Outcome of classifying the transition between two faces.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification<E> {
    pub angle: AngleType,
    /// Angle between the face normals across the shared edges, in radians.
    pub radians: f64,
    /// The edges the two faces share.
    pub shared_edges: Vec<E>,
}

impl<E> Classification<E> {
    pub fn undefined(shared_edges: Vec<E>) -> Self {
        Self {
            angle: AngleType::Undefined,
            radians: 0.0,
            shared_edges,
        }
    }
}

/// Dihedral angle classification between faces of a solid.
///
/// Both methods are treated as pure functions of their inputs.
pub trait AngleClassifier<T: TopologyProvider + ?Sized> {
    /// Classifies the transition between two distinct adjacent faces.
    fn classify(
        &self,
        topology: &T,
        a: T::Face,
        b: T::Face,
        allow_smooth: bool,
        smooth_tolerance: f64,
    ) -> Classification<T::Edge>;

    /// Classifies the transition of a face onto itself across its seam.
    fn classify_self(&self, topology: &T, face: T::Face) -> (AngleType, f64);
}
