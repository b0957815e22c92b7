// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The attributed adjacency graph of one solid.
//!
//! Nodes are faces, arcs connect faces sharing at least one edge. Every arc
//! carries the dihedral classification computed at construction time, and
//! every node can carry attributes keyed by kind.
//!
//! Visibility and attributes are scoped differently:
//! - the **view** is the top frame of an [`AdjacencyStack`]; sub-graph
//!   pushes narrow it temporarily and pops restore it,
//! - **attributes** live in tables shared by all frames, so a face hidden by
//!   a pushed view keeps its attributes when the view is popped.
//!
//! [`Aag::remove`] is the only permanent mutation. It edits the top frame
//! and the attribute tables and leaves the id maps alone, so ids never
//! change during the lifetime of the graph.

use std::collections::BTreeSet;
use std::fmt;

use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

use crate::adjacency::{AdjacencyMatrix, AdjacencyStack};
use crate::attributes::{
    AngleType, ArcAttribute, ArcAttributeTable, ArcKey, NodeAttribute, NodeAttributeTable,
};
use crate::config::AagConfig;
use crate::error::{Error, Result};
use crate::feature::{FaceId, Feature};
use crate::index_map::{CachedMaps, EdgeId, IndexedMap, ShapeId, ShapeIndices, VertexId};
use crate::provider::{AngleClassifier, TopologyProvider};

/// Attributed adjacency graph over the faces of a solid.
///
/// The graph borrows the solid for its whole lifetime and owns everything
/// else. [`Clone`] yields a fully independent copy, which is how "what-if"
/// analyses are run without touching the original.
pub struct Aag<'a, T: TopologyProvider + ?Sized> {
    solid: &'a T,
    config: AagConfig,
    maps: ShapeIndices<T>,
    stack: AdjacencyStack,
    arc_attributes: ArcAttributeTable,
    node_attributes: NodeAttributeTable,
    selected: Feature,
}

impl<'a, T: TopologyProvider + ?Sized> Aag<'a, T> {
    /// Builds the graph with default options and no selected faces.
    pub fn new<C>(solid: &'a T, classifier: &C) -> Self
    where
        C: AngleClassifier<T> + ?Sized,
    {
        Self::build(solid, classifier, &[], AagConfig::default())
    }

    /// Builds the graph.
    ///
    /// Faces get ids in the provider's face order. Edges are then visited in
    /// edge-id order and every pair of faces meeting at an edge is linked
    /// and classified once. Faces with a seam get a
    /// [`NodeAttribute::SelfAngle`]. Selected faces the solid does not know
    /// are ignored.
    pub fn build<C>(solid: &'a T, classifier: &C, selected: &[T::Face], config: AagConfig) -> Self
    where
        C: AngleClassifier<T> + ?Sized,
    {
        let maps = ShapeIndices::new(solid, config.cached_maps);
        let face_ids = maps.faces();

        let mut base = AdjacencyMatrix::new();
        for (id, _) in face_ids.iter() {
            base.bind(id, Feature::new());
        }

        let mut node_attributes = NodeAttributeTable::new();
        for (id, face) in face_ids.iter() {
            let has_seam = solid
                .face_edges(face)
                .into_iter()
                .any(|edge| solid.is_seam(face, edge));
            if has_seam {
                let (angle, radians) = classifier.classify_self(solid, face);
                trace!(face = id, %angle, "Classified seam");
                node_attributes.set(id, NodeAttribute::SelfAngle { angle, radians });
            }
        }

        let mut arc_attributes = ArcAttributeTable::new();
        let edge_ids = maps.edges(solid);
        let edge_faces = maps.edge_faces(solid);
        for (_, edge) in edge_ids.iter() {
            let Some(faces) = edge_faces.get(&edge) else {
                continue;
            };

            let mut group: Vec<(FaceId, T::Face)> = faces
                .iter()
                .filter_map(|face| face_ids.index_of(face).map(|id| (id, *face)))
                .collect();
            group.sort_by_key(|&(id, _)| id);
            group.dedup_by_key(|&mut (id, _)| id);

            for (i, &(a, face_a)) in group.iter().enumerate() {
                for &(b, face_b) in &group[i + 1..] {
                    base.link(a, b);

                    let arc = ArcKey::new(a, b);
                    if arc_attributes.contains(arc) {
                        continue;
                    }

                    let classification = classifier.classify(
                        solid,
                        face_a,
                        face_b,
                        config.allow_smooth,
                        config.smooth_tolerance,
                    );
                    let edges: BTreeSet<EdgeId> = classification
                        .shared_edges
                        .iter()
                        .filter_map(|e| edge_ids.index_of(e))
                        .collect();
                    trace!(
                        %arc,
                        angle = %classification.angle,
                        degrees = classification.radians.to_degrees(),
                        "Classified arc"
                    );
                    arc_attributes.bind(
                        arc,
                        ArcAttribute {
                            angle: classification.angle,
                            radians: classification.radians,
                            edges,
                        },
                    );
                }
            }
        }

        let mut selected_ids = Feature::new();
        for face in selected {
            match face_ids.index_of(face) {
                Some(id) => {
                    selected_ids.add(id);
                }
                None => warn!(?face, "Ignoring selected face unknown to the solid"),
            }
        }

        debug!(
            faces = base.len(),
            arcs = arc_attributes.len(),
            seams = node_attributes.len(),
            selected = selected_ids.extent(),
            "Built adjacency graph"
        );

        Self {
            solid,
            config,
            maps,
            stack: AdjacencyStack::new(base),
            arc_attributes,
            node_attributes,
            selected: selected_ids,
        }
    }

    pub fn solid(&self) -> &'a T {
        self.solid
    }

    pub fn config(&self) -> &AagConfig {
        &self.config
    }

    // =========================================================================
    // Ids and index maps
    // =========================================================================

    pub fn face_id(&self, face: &T::Face) -> Option<FaceId> {
        self.maps.faces().index_of(face)
    }

    pub fn face(&self, id: FaceId) -> Option<T::Face> {
        self.maps.faces().key(id)
    }

    pub fn edge_id(&self, edge: &T::Edge) -> Option<EdgeId> {
        self.maps.edges(self.solid).index_of(edge)
    }

    pub fn edge(&self, id: EdgeId) -> Option<T::Edge> {
        self.maps.edges(self.solid).key(id)
    }

    pub fn vertex_id(&self, vertex: &T::Vertex) -> Option<VertexId> {
        self.maps.vertices(self.solid).index_of(vertex)
    }

    pub fn vertex(&self, id: VertexId) -> Option<T::Vertex> {
        self.maps.vertices(self.solid).key(id)
    }

    pub fn sub_shape_id(&self, shape: &T::SubShape) -> Option<ShapeId> {
        self.maps.sub_shapes(self.solid).index_of(shape)
    }

    pub fn sub_shape(&self, id: ShapeId) -> Option<T::SubShape> {
        self.maps.sub_shapes(self.solid).key(id)
    }

    /// Face map as built. Removal never shrinks it.
    pub fn face_map(&self) -> &IndexedMap<T::Face> {
        self.maps.faces()
    }

    pub fn edge_map(&self) -> &IndexedMap<T::Edge> {
        self.maps.edges(self.solid)
    }

    pub fn vertex_map(&self) -> &IndexedMap<T::Vertex> {
        self.maps.vertices(self.solid)
    }

    pub fn sub_shape_map(&self) -> &IndexedMap<T::SubShape> {
        self.maps.sub_shapes(self.solid)
    }

    pub fn edge_faces_map(&self) -> &FxHashMap<T::Edge, Vec<T::Face>> {
        self.maps.edge_faces(self.solid)
    }

    pub fn vertex_edges_map(&self) -> &FxHashMap<T::Vertex, Vec<T::Edge>> {
        self.maps.vertex_edges(self.solid)
    }

    /// Index caches computed so far.
    pub fn cached_maps(&self) -> CachedMaps {
        self.maps.cached()
    }

    // =========================================================================
    // Graph queries over the current view
    // =========================================================================

    pub fn number_of_nodes(&self) -> usize {
        self.stack.top().len()
    }

    pub fn number_of_arcs(&self) -> usize {
        self.stack
            .top()
            .iter()
            .map(|(face, neighbors)| neighbors.iter().filter(|&n| n > face).count())
            .sum()
    }

    /// Visible arcs in ascending `(first, second)` order.
    pub fn arcs(&self) -> Vec<ArcKey> {
        self.stack
            .top()
            .iter()
            .flat_map(|(face, neighbors)| {
                neighbors
                    .iter()
                    .filter(move |&n| n > face)
                    .map(move |n| ArcKey::new(face, n))
            })
            .collect()
    }

    /// All faces in the current view.
    pub fn all_faces(&self) -> Feature {
        self.stack.top().faces()
    }

    pub fn has_face(&self, face: FaceId) -> bool {
        self.stack.top().contains(face)
    }

    /// Returns `true` if both faces are visible and adjacent.
    pub fn has_arc(&self, a: FaceId, b: FaceId) -> bool {
        self.stack
            .top()
            .find(a)
            .is_some_and(|neighbors| neighbors.contains(b))
    }

    pub fn has_neighbors(&self, face: FaceId) -> bool {
        self.stack
            .top()
            .find(face)
            .is_some_and(|neighbors| !neighbors.is_empty())
    }

    /// Visible neighbors of a visible face.
    pub fn neighbors(&self, face: FaceId) -> Result<&Feature> {
        self.stack.top().find(face).ok_or(Error::NodeNotInView(face))
    }

    /// Neighbors reached through the given edge.
    pub fn neighbors_thru(&self, face: FaceId, edge: EdgeId) -> Result<Feature> {
        self.neighbors_where(face, |shared| shared.contains(&edge))
    }

    /// Neighbors reached through any of the given edges.
    pub fn neighbors_thru_any(&self, face: FaceId, edges: &BTreeSet<EdgeId>) -> Result<Feature> {
        self.neighbors_where(face, |shared| !shared.is_disjoint(edges))
    }

    /// Neighbors reached through at least one edge outside `excluded`.
    pub fn neighbors_thru_except(
        &self,
        face: FaceId,
        excluded: &BTreeSet<EdgeId>,
    ) -> Result<Feature> {
        self.neighbors_where(face, |shared| !shared.is_subset(excluded))
    }

    /// Neighbors whose arc classification satisfies `accept`. Arcs without
    /// a classification never match.
    pub fn neighbors_by_angle<F>(&self, face: FaceId, accept: F) -> Result<Feature>
    where
        F: Fn(AngleType) -> bool,
    {
        Ok(self
            .neighbors(face)?
            .iter()
            .filter(|&n| self.angle(face, n).is_some_and(&accept))
            .collect())
    }

    fn neighbors_where<F>(&self, face: FaceId, mut keep: F) -> Result<Feature>
    where
        F: FnMut(&BTreeSet<EdgeId>) -> bool,
    {
        let neighbors = self.neighbors(face)?;
        Ok(neighbors
            .iter()
            .filter(|&n| {
                self.arc_attributes
                    .find(ArcKey::new(face, n))
                    .is_some_and(|attr| keep(&attr.edges))
            })
            .collect())
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    /// Classification of an arc. Attributes outlive views, so this answers
    /// for arcs hidden by a pushed sub-graph as well.
    pub fn arc_attribute(&self, a: FaceId, b: FaceId) -> Option<&ArcAttribute> {
        self.arc_attributes.find(ArcKey::new(a, b))
    }

    pub fn angle(&self, a: FaceId, b: FaceId) -> Option<AngleType> {
        self.arc_attribute(a, b).map(|attr| attr.angle)
    }

    pub fn arc_attributes(&self) -> &ArcAttributeTable {
        &self.arc_attributes
    }

    /// Attaches an attribute to a face. Returns `false`, leaving the
    /// existing one in place, if the face already has one of that kind.
    pub fn set_node_attribute(&mut self, face: FaceId, attribute: NodeAttribute) -> bool {
        self.node_attributes.set(face, attribute)
    }

    pub fn node_attribute(&self, face: FaceId, kind: &str) -> Option<&NodeAttribute> {
        self.node_attributes.get(face, kind)
    }

    pub fn has_node_attribute(&self, face: FaceId, kind: &str) -> bool {
        self.node_attributes.contains(face, kind)
    }

    pub fn remove_node_attribute(&mut self, face: FaceId, kind: &str) -> Option<NodeAttribute> {
        self.node_attributes.remove(face, kind)
    }

    /// Attributes of a face, ordered by kind.
    pub fn node_attributes(&self, face: FaceId) -> impl Iterator<Item = &NodeAttribute> {
        self.node_attributes.attributes(face)
    }

    // =========================================================================
    // Views and removal
    // =========================================================================

    /// Faces selected at construction.
    pub fn selected_faces(&self) -> &Feature {
        &self.selected
    }

    /// Number of frames on the view stack, base included.
    pub fn stack_depth(&self) -> usize {
        self.stack.size()
    }

    /// Narrows the view to `keep`.
    pub fn push_subgraph(&mut self, keep: &Feature) {
        let view = self.stack.top().restricted_to(keep);
        debug!(depth = self.stack.size() + 1, faces = view.len(), "Pushed sub-graph");
        self.stack.push(view);
    }

    /// Narrows the view by hiding `exclude`.
    pub fn push_subgraph_excluding(&mut self, exclude: &Feature) {
        let view = self.stack.top().excluding(exclude);
        debug!(depth = self.stack.size() + 1, faces = view.len(), "Pushed sub-graph");
        self.stack.push(view);
    }

    /// Restores the previous view. Returns `false` if only the base frame
    /// was left.
    pub fn pop_subgraph(&mut self) -> bool {
        let popped = self.stack.pop().is_some();
        if popped {
            debug!(depth = self.stack.size(), "Popped sub-graph");
        }
        popped
    }

    /// Restores the base view, returning the number of frames popped.
    pub fn pop_subgraphs(&mut self) -> usize {
        let popped = self.stack.pop_to_base();
        debug!(popped, "Popped all sub-graphs");
        popped
    }

    /// Removes faces from the current view for good, together with their
    /// node attributes and the attributes of their visible arcs.
    ///
    /// Lower frames and the id maps are left as they are.
    pub fn remove(&mut self, faces: &Feature) {
        let top = self.stack.top_mut();
        let mut removed = 0usize;

        for face in faces.iter() {
            self.node_attributes.remove_all(face);

            let Some(neighbors) = top.unbind(face) else {
                continue;
            };
            removed += 1;

            for neighbor in neighbors.iter() {
                self.arc_attributes.unbind(ArcKey::new(face, neighbor));
                if let Some(row) = top.find_mut(neighbor) {
                    row.remove(face);
                }
            }
        }

        debug!(requested = faces.extent(), removed, "Removed faces");
    }

    /// Removes faces given by handle. Unknown handles are skipped.
    pub fn remove_faces(&mut self, faces: &[T::Face]) {
        let ids: Feature = faces.iter().filter_map(|f| self.face_id(f)).collect();
        self.remove(&ids);
    }
}

impl<T: TopologyProvider + ?Sized> Clone for Aag<'_, T> {
    fn clone(&self) -> Self {
        Self {
            solid: self.solid,
            config: self.config,
            maps: self.maps.clone(),
            stack: self.stack.clone(),
            arc_attributes: self.arc_attributes.clone(),
            node_attributes: self.node_attributes.clone(),
            selected: self.selected.clone(),
        }
    }
}

impl<T: TopologyProvider + ?Sized> fmt::Debug for Aag<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aag")
            .field("nodes", &self.number_of_nodes())
            .field("arcs", &self.number_of_arcs())
            .field("stack_depth", &self.stack.size())
            .field("maps", &self.maps)
            .field("config", &self.config)
            .finish()
    }
}
