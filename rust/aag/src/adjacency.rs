// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Adjacency matrices and the stack of graph views.

use std::collections::BTreeMap;

use crate::feature::{FaceId, Feature};

/// Face → neighbor set for one state of the graph.
///
/// Kept symmetric and free of self-loops by the graph that owns it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdjacencyMatrix {
    rows: BTreeMap<FaceId, Feature>,
}

impl AdjacencyMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the neighbor set of a face, replacing any previous one.
    pub fn bind(&mut self, face: FaceId, neighbors: Feature) {
        self.rows.insert(face, neighbors);
    }

    pub fn find(&self, face: FaceId) -> Option<&Feature> {
        self.rows.get(&face)
    }

    pub fn find_mut(&mut self, face: FaceId) -> Option<&mut Feature> {
        self.rows.get_mut(&face)
    }

    /// Removes a face's row, returning its former neighbors.
    pub fn unbind(&mut self, face: FaceId) -> Option<Feature> {
        self.rows.remove(&face)
    }

    pub fn contains(&self, face: FaceId) -> bool {
        self.rows.contains_key(&face)
    }

    /// Records `a` and `b` as mutual neighbors. Both rows must exist.
    pub fn link(&mut self, a: FaceId, b: FaceId) {
        if a == b {
            return;
        }
        if let Some(row) = self.rows.get_mut(&a) {
            row.add(b);
        }
        if let Some(row) = self.rows.get_mut(&b) {
            row.add(a);
        }
    }

    /// Number of faces with a row.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Faces with a row, as a set.
    pub fn faces(&self) -> Feature {
        self.rows.keys().copied().collect()
    }

    /// Iterates rows in ascending face order.
    pub fn iter(&self) -> impl Iterator<Item = (FaceId, &Feature)> {
        self.rows.iter().map(|(&face, neighbors)| (face, neighbors))
    }

    /// Derives the view that keeps only `keep`: other rows are dropped and
    /// removed from the surviving neighbor sets.
    pub fn restricted_to(&self, keep: &Feature) -> Self {
        let rows = self
            .rows
            .iter()
            .filter(|(face, _)| keep.contains(**face))
            .map(|(&face, neighbors)| (face, neighbors & keep))
            .collect();
        Self { rows }
    }

    /// Derives the view without `exclude`.
    pub fn excluding(&self, exclude: &Feature) -> Self {
        let rows = self
            .rows
            .iter()
            .filter(|(face, _)| !exclude.contains(**face))
            .map(|(&face, neighbors)| (face, neighbors - exclude))
            .collect();
        Self { rows }
    }
}

/// Ordered stack of adjacency matrices. The base frame is the full graph as
/// built; the top frame is the active view. The base can never be popped.
#[derive(Debug, Clone)]
pub struct AdjacencyStack {
    base: AdjacencyMatrix,
    pushed: Vec<AdjacencyMatrix>,
}

impl AdjacencyStack {
    pub fn new(base: AdjacencyMatrix) -> Self {
        Self {
            base,
            pushed: Vec::new(),
        }
    }

    pub fn push(&mut self, matrix: AdjacencyMatrix) {
        self.pushed.push(matrix);
    }

    /// Pops the top frame. Returns `None` when only the base frame is left.
    pub fn pop(&mut self) -> Option<AdjacencyMatrix> {
        self.pushed.pop()
    }

    /// Unwinds to the base frame, returning how many frames were popped.
    pub fn pop_to_base(&mut self) -> usize {
        let popped = self.pushed.len();
        self.pushed.clear();
        popped
    }

    pub fn top(&self) -> &AdjacencyMatrix {
        self.pushed.last().unwrap_or(&self.base)
    }

    pub fn top_mut(&mut self) -> &mut AdjacencyMatrix {
        match self.pushed.last_mut() {
            Some(top) => top,
            None => &mut self.base,
        }
    }

    pub fn base(&self) -> &AdjacencyMatrix {
        &self.base
    }

    /// Number of frames, base included. Always at least 1.
    pub fn size(&self) -> usize {
        self.pushed.len() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 1 - 2 - 3 - 4, plus 1 - 3.
    fn sample() -> AdjacencyMatrix {
        let mut matrix = AdjacencyMatrix::new();
        for face in 1..=4 {
            matrix.bind(face, Feature::new());
        }
        matrix.link(1, 2);
        matrix.link(2, 3);
        matrix.link(3, 4);
        matrix.link(1, 3);
        matrix
    }

    #[test]
    fn link_is_symmetric_and_ignores_self_loops() {
        let mut matrix = sample();
        matrix.link(2, 2);

        assert_eq!(matrix.find(1), Some(&Feature::from([2, 3])));
        assert_eq!(matrix.find(3), Some(&Feature::from([1, 2, 4])));
        assert!(!matrix.find(2).unwrap().contains(2));
    }

    #[test]
    fn restricted_view_drops_outside_faces() {
        let view = sample().restricted_to(&Feature::from([1, 2, 9]));

        assert_eq!(view.len(), 2);
        assert_eq!(view.find(1), Some(&Feature::from([2])));
        assert_eq!(view.find(2), Some(&Feature::from([1])));
        assert!(!view.contains(9));
    }

    #[test]
    fn excluding_view_subtracts_from_neighbors() {
        let view = sample().excluding(&Feature::from([3]));

        assert_eq!(view.faces(), Feature::from([1, 2, 4]));
        assert_eq!(view.find(1), Some(&Feature::from([2])));
        assert!(view.find(4).unwrap().is_empty());
    }

    #[test]
    fn stack_never_drops_the_base() {
        let mut stack = AdjacencyStack::new(sample());
        assert_eq!(stack.size(), 1);
        assert!(stack.pop().is_none());
        assert_eq!(stack.size(), 1);

        let view = stack.top().excluding(&Feature::from([1]));
        stack.push(view);
        let view = stack.top().excluding(&Feature::from([2]));
        stack.push(view);
        assert_eq!(stack.size(), 3);
        assert_eq!(stack.top().len(), 2);

        assert_eq!(stack.pop_to_base(), 2);
        assert_eq!(stack.size(), 1);
        assert_eq!(stack.top(), &sample());
    }

    #[test]
    fn top_mut_edits_only_the_top_frame() {
        let mut stack = AdjacencyStack::new(sample());
        let view = stack.top().clone();
        stack.push(view);

        stack.top_mut().unbind(4);
        assert!(!stack.top().contains(4));
        assert!(stack.base().contains(4));
    }
}
