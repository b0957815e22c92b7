// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for solid construction and graph queries.

use crate::feature::FaceId;
use crate::keys::{EdgeKey, FaceKey, VertexKey, WireKey};

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a solid or querying the graph.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Vertex key not found in the solid.
    #[error("vertex not found: {0:?}")]
    VertexNotFound(VertexKey),

    /// Edge key not found in the solid.
    #[error("edge not found: {0:?}")]
    EdgeNotFound(EdgeKey),

    /// Wire key not found in the solid.
    #[error("wire not found: {0:?}")]
    WireNotFound(WireKey),

    /// Face key not found in the solid.
    #[error("face not found: {0:?}")]
    FaceNotFound(FaceKey),

    /// A wire must have at least one edge.
    #[error("wire must have at least one edge")]
    EmptyWire,

    /// Edges in a wire are not connected end-to-end.
    #[error("wire edges are not connected: edge {0} endpoint does not match edge {1} startpoint")]
    DisconnectedWire(usize, usize),

    /// The wire does not close back onto its first vertex.
    #[error("wire is not closed")]
    OpenWire,

    /// A face boundary needs three edges, unless it is a single closed edge.
    #[error("face outer wire is degenerate")]
    DegenerateFace,

    /// A shell must have at least one face.
    #[error("shell must have at least one face")]
    EmptyShell,

    /// A 2D profile handed to a builder is unusable.
    #[error("invalid profile: {0}")]
    InvalidProfile(String),

    /// The face id is not part of the current graph view.
    #[error("face {0} is not in the current graph view")]
    NodeNotInView(FaceId),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Writing a dump failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
