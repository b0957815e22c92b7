// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # B-Rep AAG
//!
//! Attributed adjacency graph over the faces of a boundary-representation
//! solid, the working structure of rule-based feature recognition.
//!
//! Nodes are faces with stable 1-based ids. Arcs join faces sharing an
//! edge and carry the dihedral classification of the transition (convex,
//! concave, smooth, ...). On top of that the graph offers:
//!
//! - scoped sub-graph views, pushed and popped on a stack,
//! - permanent removal of faces,
//! - connected components and homogeneous-angle face detection,
//! - text and JSON dumps.
//!
//! The graph is generic over a [`TopologyProvider`] and an
//! [`AngleClassifier`]. The crate ships a small arena-based B-Rep store,
//! [`Solid`], and a [`PlanarDihedralClassifier`] for polyhedral solids.
//!
//! ```
//! use brep_aag::{Aag, AngleType, PlanarDihedralClassifier, Solid};
//!
//! let mut solid = Solid::new();
//! solid.make_box([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]).unwrap();
//!
//! let aag = Aag::new(&solid, &PlanarDihedralClassifier);
//! assert_eq!(aag.number_of_nodes(), 6);
//! assert_eq!(aag.angle(1, 3), Some(AngleType::Convex));
//! ```

pub mod aag;
pub mod adjacency;
pub mod analysis;
pub mod attributes;
pub mod classify;
pub mod config;
pub mod construction;
pub mod dictionary;
pub mod dump;
pub mod error;
pub mod feature;
pub mod index_map;
pub mod iterators;
pub mod keys;
pub mod provider;
pub mod solid;
pub mod traversal;

pub use aag::Aag;
pub use adjacency::{AdjacencyMatrix, AdjacencyStack};
pub use attributes::{
    AngleType, ArcAttribute, ArcAttributeTable, ArcKey, NodeAttribute, NodeAttributeTable,
};
pub use classify::PlanarDihedralClassifier;
pub use config::{AagConfig, DEFAULT_SMOOTH_TOLERANCE_DEG};
pub use dictionary::{DictValue, Dictionary};
pub use dump::{AagSnapshot, NodeSnapshot};
pub use error::{Error, Result};
pub use feature::{FaceId, Feature};
pub use index_map::{CachedMaps, EdgeId, IndexedMap, ShapeId, VertexId};
pub use iterators::{NeighborhoodIterator, RandomIterator, SeqIterator};
pub use keys::{EdgeKey, FaceKey, ShapeKey, ShapeType, ShellKey, VertexKey, WireKey};
pub use provider::{AngleClassifier, Classification, TopologyProvider};
pub use solid::{Solid, Surface};
