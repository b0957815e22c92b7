// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shape handles for the reference B-Rep store.
//!
//! Handles are `slotmap` keys: cheap to copy, hashable, and ordered by slot
//! index. Since a [`Solid`](crate::Solid) only ever grows, ordering by key is
//! the same as ordering by creation, which the graph relies on for
//! deterministic face and edge numbering.

use slotmap::new_key_type;

new_key_type! {
    /// Handle of a vertex (point in 3D space).
    pub struct VertexKey;

    /// Handle of an edge (curve bounded by two vertices, possibly the same one).
    pub struct EdgeKey;

    /// Handle of a wire (closed chain of oriented edges).
    pub struct WireKey;

    /// Handle of a face (bounded patch of a surface).
    pub struct FaceKey;

    /// Handle of a shell (connected set of faces).
    pub struct ShellKey;
}

/// A handle to any sub-shape of a solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeKey {
    Shell(ShellKey),
    Face(FaceKey),
    Wire(WireKey),
    Edge(EdgeKey),
    Vertex(VertexKey),
}

impl ShapeKey {
    /// Returns the shape type of this handle.
    pub fn shape_type(&self) -> ShapeType {
        match self {
            ShapeKey::Shell(_) => ShapeType::Shell,
            ShapeKey::Face(_) => ShapeType::Face,
            ShapeKey::Wire(_) => ShapeType::Wire,
            ShapeKey::Edge(_) => ShapeType::Edge,
            ShapeKey::Vertex(_) => ShapeType::Vertex,
        }
    }
}

/// Discriminant for shape types, from the top of the hierarchy down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeType {
    Shell = 0,
    Face = 1,
    Wire = 2,
    Edge = 3,
    Vertex = 4,
}

impl ShapeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeType::Shell => "Shell",
            ShapeType::Face => "Face",
            ShapeType::Wire => "Wire",
            ShapeType::Edge => "Edge",
            ShapeType::Vertex => "Vertex",
        }
    }
}

impl std::fmt::Display for ShapeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ShellKey> for ShapeKey {
    fn from(k: ShellKey) -> Self {
        ShapeKey::Shell(k)
    }
}

impl From<FaceKey> for ShapeKey {
    fn from(k: FaceKey) -> Self {
        ShapeKey::Face(k)
    }
}

impl From<WireKey> for ShapeKey {
    fn from(k: WireKey) -> Self {
        ShapeKey::Wire(k)
    }
}

impl From<EdgeKey> for ShapeKey {
    fn from(k: EdgeKey) -> Self {
        ShapeKey::Edge(k)
    }
}

impl From<VertexKey> for ShapeKey {
    fn from(k: VertexKey) -> Self {
        ShapeKey::Vertex(k)
    }
}
