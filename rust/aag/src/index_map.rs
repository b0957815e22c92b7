// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stable 1-based ids for shape handles, and the per-graph index caches.
//!
//! The face map is built with the graph. Every other map is computed from
//! the solid the first time somebody asks for it and then kept for the
//! lifetime of the graph, unless [`CachedMaps`] requests it up front.

use std::cell::OnceCell;
use std::fmt;
use std::hash::Hash;
use std::ops::{BitOr, BitOrAssign};

use rustc_hash::FxHashMap;

use crate::provider::TopologyProvider;

/// 1-based id of an edge within one graph.
pub type EdgeId = usize;

/// 1-based id of a vertex within one graph.
pub type VertexId = usize;

/// 1-based id of any sub-shape within one graph.
pub type ShapeId = usize;

/// Bidirectional registry between handles and 1-based ids.
///
/// Ids are handed out in insertion order and never change.
#[derive(Debug, Clone)]
pub struct IndexedMap<K> {
    keys: Vec<K>,
    ids: FxHashMap<K, usize>,
}

impl<K: Copy + Eq + Hash> IndexedMap<K> {
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            ids: FxHashMap::default(),
        }
    }

    /// Builds a map from handles in the given order. Repeated handles keep
    /// their first id.
    pub fn from_keys(keys: impl IntoIterator<Item = K>) -> Self {
        let mut map = Self::new();
        for key in keys {
            map.add(key);
        }
        map
    }

    /// Registers a handle and returns its id, reusing the existing id if the
    /// handle is already known.
    pub fn add(&mut self, key: K) -> usize {
        if let Some(&id) = self.ids.get(&key) {
            return id;
        }
        self.keys.push(key);
        let id = self.keys.len();
        self.ids.insert(key, id);
        id
    }

    pub fn index_of(&self, key: &K) -> Option<usize> {
        self.ids.get(key).copied()
    }

    pub fn key(&self, id: usize) -> Option<K> {
        id.checked_sub(1).and_then(|i| self.keys.get(i)).copied()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.ids.contains_key(key)
    }

    /// Number of registered handles.
    pub fn extent(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterates `(id, handle)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, K)> + '_ {
        self.keys.iter().enumerate().map(|(i, &k)| (i + 1, k))
    }
}

impl<K: Copy + Eq + Hash> Default for IndexedMap<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Bitmask naming the index caches to build together with the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CachedMaps(u8);

impl CachedMaps {
    pub const NONE: Self = Self(0);
    pub const EDGES: Self = Self(1);
    pub const VERTICES: Self = Self(1 << 1);
    pub const SUB_SHAPES: Self = Self(1 << 2);
    pub const EDGE_FACES: Self = Self(1 << 3);
    pub const VERTEX_EDGES: Self = Self(1 << 4);
    pub const ALL: Self = Self(0b1_1111);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    /// Parses a comma-separated list such as `"edges,vertex_edges"`.
    /// Unknown names are skipped; `"all"` and `"none"` are accepted.
    pub fn parse_list(list: &str) -> Self {
        list.split(',')
            .map(|name| match name.trim().to_ascii_lowercase().as_str() {
                "edges" => Self::EDGES,
                "vertices" => Self::VERTICES,
                "sub_shapes" | "subshapes" => Self::SUB_SHAPES,
                "edge_faces" => Self::EDGE_FACES,
                "vertex_edges" => Self::VERTEX_EDGES,
                "all" => Self::ALL,
                _ => Self::NONE,
            })
            .fold(Self::NONE, |acc, m| acc | m)
    }
}

impl BitOr for CachedMaps {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for CachedMaps {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// All handle ↔ id maps of one graph.
pub struct ShapeIndices<T: TopologyProvider + ?Sized> {
    faces: IndexedMap<T::Face>,
    edges: OnceCell<IndexedMap<T::Edge>>,
    vertices: OnceCell<IndexedMap<T::Vertex>>,
    sub_shapes: OnceCell<IndexedMap<T::SubShape>>,
    edge_faces: OnceCell<FxHashMap<T::Edge, Vec<T::Face>>>,
    vertex_edges: OnceCell<FxHashMap<T::Vertex, Vec<T::Edge>>>,
}

impl<T: TopologyProvider + ?Sized> ShapeIndices<T> {
    /// Builds the face map and whichever other maps `eager` names.
    pub fn new(topology: &T, eager: CachedMaps) -> Self {
        let indices = Self {
            faces: IndexedMap::from_keys(topology.faces()),
            edges: OnceCell::new(),
            vertices: OnceCell::new(),
            sub_shapes: OnceCell::new(),
            edge_faces: OnceCell::new(),
            vertex_edges: OnceCell::new(),
        };

        if eager.contains(CachedMaps::EDGES) {
            indices.edges(topology);
        }
        if eager.contains(CachedMaps::VERTICES) {
            indices.vertices(topology);
        }
        if eager.contains(CachedMaps::SUB_SHAPES) {
            indices.sub_shapes(topology);
        }
        if eager.contains(CachedMaps::EDGE_FACES) {
            indices.edge_faces(topology);
        }
        if eager.contains(CachedMaps::VERTEX_EDGES) {
            indices.vertex_edges(topology);
        }

        indices
    }

    pub fn faces(&self) -> &IndexedMap<T::Face> {
        &self.faces
    }

    pub fn edges(&self, topology: &T) -> &IndexedMap<T::Edge> {
        self.edges.get_or_init(|| {
            let map = IndexedMap::from_keys(topology.edges());
            tracing::debug!(count = map.extent(), "Built edge index");
            map
        })
    }

    pub fn vertices(&self, topology: &T) -> &IndexedMap<T::Vertex> {
        self.vertices.get_or_init(|| {
            let map = IndexedMap::from_keys(topology.vertices());
            tracing::debug!(count = map.extent(), "Built vertex index");
            map
        })
    }

    pub fn sub_shapes(&self, topology: &T) -> &IndexedMap<T::SubShape> {
        self.sub_shapes.get_or_init(|| {
            let map = IndexedMap::from_keys(topology.sub_shapes());
            tracing::debug!(count = map.extent(), "Built sub-shape index");
            map
        })
    }

    /// Edge → faces incidence over every edge of the solid.
    pub fn edge_faces(&self, topology: &T) -> &FxHashMap<T::Edge, Vec<T::Face>> {
        self.edge_faces.get_or_init(|| {
            let map: FxHashMap<_, _> = topology
                .edges()
                .into_iter()
                .map(|edge| (edge, topology.edge_faces(edge)))
                .collect();
            tracing::debug!(count = map.len(), "Built edge-face incidence");
            map
        })
    }

    /// Vertex → edges incidence over every vertex of the solid.
    pub fn vertex_edges(&self, topology: &T) -> &FxHashMap<T::Vertex, Vec<T::Edge>> {
        self.vertex_edges.get_or_init(|| {
            let map: FxHashMap<_, _> = topology
                .vertices()
                .into_iter()
                .map(|vertex| (vertex, topology.vertex_edges(vertex)))
                .collect();
            tracing::debug!(count = map.len(), "Built vertex-edge incidence");
            map
        })
    }

    /// Returns the caches that have been computed so far.
    pub fn cached(&self) -> CachedMaps {
        let mut cached = CachedMaps::NONE;
        if self.edges.get().is_some() {
            cached |= CachedMaps::EDGES;
        }
        if self.vertices.get().is_some() {
            cached |= CachedMaps::VERTICES;
        }
        if self.sub_shapes.get().is_some() {
            cached |= CachedMaps::SUB_SHAPES;
        }
        if self.edge_faces.get().is_some() {
            cached |= CachedMaps::EDGE_FACES;
        }
        if self.vertex_edges.get().is_some() {
            cached |= CachedMaps::VERTEX_EDGES;
        }
        cached
    }
}

impl<T: TopologyProvider + ?Sized> Clone for ShapeIndices<T> {
    fn clone(&self) -> Self {
        Self {
            faces: self.faces.clone(),
            edges: self.edges.clone(),
            vertices: self.vertices.clone(),
            sub_shapes: self.sub_shapes.clone(),
            edge_faces: self.edge_faces.clone(),
            vertex_edges: self.vertex_edges.clone(),
        }
    }
}

impl<T: TopologyProvider + ?Sized> fmt::Debug for ShapeIndices<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeIndices")
            .field("faces", &self.faces.extent())
            .field("cached", &self.cached())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Solid;

    #[test]
    fn ids_are_one_based_and_stable() {
        let mut map = IndexedMap::new();
        assert_eq!(map.add('a'), 1);
        assert_eq!(map.add('b'), 2);
        assert_eq!(map.add('a'), 1);

        assert_eq!(map.extent(), 2);
        assert_eq!(map.key(1), Some('a'));
        assert_eq!(map.key(0), None);
        assert_eq!(map.key(3), None);
        assert_eq!(map.index_of(&'b'), Some(2));
    }

    #[test]
    fn iteration_follows_ids() {
        let map = IndexedMap::from_keys(['x', 'y', 'x', 'z']);
        let pairs: Vec<(usize, char)> = map.iter().collect();
        assert_eq!(pairs, vec![(1, 'x'), (2, 'y'), (3, 'z')]);
    }

    #[test]
    fn cached_maps_bitmask() {
        let mask = CachedMaps::EDGES | CachedMaps::VERTEX_EDGES;
        assert!(mask.contains(CachedMaps::EDGES));
        assert!(!mask.contains(CachedMaps::VERTICES));
        assert!(CachedMaps::ALL.contains(mask));
        assert!(CachedMaps::NONE.is_empty());
    }

    #[test]
    fn cached_maps_from_list() {
        assert_eq!(
            CachedMaps::parse_list("edges, Vertices,bogus"),
            CachedMaps::EDGES | CachedMaps::VERTICES
        );
        assert_eq!(CachedMaps::parse_list("all"), CachedMaps::ALL);
        assert_eq!(CachedMaps::parse_list(""), CachedMaps::NONE);
    }

    #[test]
    fn lazy_maps_are_built_once_on_demand() {
        let mut solid = Solid::new();
        solid.make_box([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]).unwrap();

        let indices = ShapeIndices::new(&solid, CachedMaps::NONE);
        assert_eq!(indices.faces().extent(), 6);
        assert!(indices.cached().is_empty());

        assert_eq!(indices.edges(&solid).extent(), 12);
        assert_eq!(indices.cached(), CachedMaps::EDGES);

        assert_eq!(indices.vertex_edges(&solid).len(), 8);
        assert!(indices.cached().contains(CachedMaps::VERTEX_EDGES));
    }

    #[test]
    fn eager_maps_are_built_up_front() {
        let mut solid = Solid::new();
        solid.make_box([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]).unwrap();

        let indices = ShapeIndices::new(&solid, CachedMaps::ALL);
        assert_eq!(indices.cached(), CachedMaps::ALL);
        assert_eq!(indices.sub_shapes(&solid).extent(), 33);
    }
}
