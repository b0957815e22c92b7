// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Traversals over the current view of an [`Aag`].
//!
//! Each iterator captures what it needs when created and borrows the graph
//! immutably, so the view cannot change underneath it.

use std::collections::VecDeque;

use crate::aag::Aag;
use crate::feature::{FaceId, Feature};
use crate::provider::TopologyProvider;

/// Visits every visible face in ascending id order.
pub struct SeqIterator {
    faces: std::collections::btree_set::IntoIter<FaceId>,
}

impl SeqIterator {
    pub fn new<T: TopologyProvider + ?Sized>(aag: &Aag<'_, T>) -> Self {
        Self {
            faces: aag.all_faces().into_iter(),
        }
    }
}

impl Iterator for SeqIterator {
    type Item = FaceId;

    fn next(&mut self) -> Option<FaceId> {
        self.faces.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.faces.size_hint()
    }
}

/// Depth-first walk through adjacency from a seed face.
///
/// Each reachable face is yielded once. From the current face the walk
/// steps to its smallest unvisited neighbor, backtracking when there is
/// none, so the order follows the shape of the graph rather than the ids.
pub struct RandomIterator<'g, 'a, T: TopologyProvider + ?Sized> {
    aag: &'g Aag<'a, T>,
    visited: Feature,
    path: Vec<FaceId>,
    pending: Option<FaceId>,
}

impl<'g, 'a, T: TopologyProvider + ?Sized> RandomIterator<'g, 'a, T> {
    /// Starts at `seed`. A seed outside the view yields nothing.
    pub fn new(aag: &'g Aag<'a, T>, seed: FaceId) -> Self {
        Self {
            aag,
            visited: Feature::new(),
            path: Vec::new(),
            pending: aag.has_face(seed).then_some(seed),
        }
    }

    /// Starts at the smallest visible face.
    pub fn from_first(aag: &'g Aag<'a, T>) -> Self {
        let seed = aag.all_faces().minimal_mapped().unwrap_or(0);
        Self::new(aag, seed)
    }

    fn next_unvisited(&self, face: FaceId) -> Option<FaceId> {
        self.aag
            .neighbors(face)
            .ok()?
            .iter()
            .find(|&n| !self.visited.contains(n))
    }
}

impl<T: TopologyProvider + ?Sized> Iterator for RandomIterator<'_, '_, T> {
    type Item = FaceId;

    fn next(&mut self) -> Option<FaceId> {
        if let Some(face) = self.pending.take() {
            self.visited.add(face);
            self.path.push(face);
            return Some(face);
        }

        while let Some(&current) = self.path.last() {
            if let Some(next) = self.next_unvisited(current) {
                self.visited.add(next);
                self.path.push(next);
                return Some(next);
            }
            self.path.pop();
        }
        None
    }
}

/// Breadth-first rings around a seed face, yielding `(face, depth)` with the
/// seed at depth 0.
pub struct NeighborhoodIterator<'g, 'a, T: TopologyProvider + ?Sized> {
    aag: &'g Aag<'a, T>,
    visited: Feature,
    queue: VecDeque<(FaceId, usize)>,
    max_depth: Option<usize>,
}

impl<'g, 'a, T: TopologyProvider + ?Sized> NeighborhoodIterator<'g, 'a, T> {
    /// Starts at `seed`. A seed outside the view yields nothing.
    pub fn new(aag: &'g Aag<'a, T>, seed: FaceId) -> Self {
        let mut visited = Feature::new();
        let mut queue = VecDeque::new();
        if aag.has_face(seed) {
            visited.add(seed);
            queue.push_back((seed, 0));
        }
        Self {
            aag,
            visited,
            queue,
            max_depth: None,
        }
    }

    /// Stops after the given ring.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
}

impl<T: TopologyProvider + ?Sized> Iterator for NeighborhoodIterator<'_, '_, T> {
    type Item = (FaceId, usize);

    fn next(&mut self) -> Option<(FaceId, usize)> {
        let (face, depth) = self.queue.pop_front()?;

        if self.max_depth.map_or(true, |max| depth < max) {
            if let Ok(neighbors) = self.aag.neighbors(face) {
                for neighbor in neighbors.iter() {
                    if self.visited.add(neighbor) {
                        self.queue.push_back((neighbor, depth + 1));
                    }
                }
            }
        }

        Some((face, depth))
    }
}

impl<'a, T: TopologyProvider + ?Sized> Aag<'a, T> {
    /// Visible faces in ascending id order.
    pub fn iter_seq(&self) -> SeqIterator {
        SeqIterator::new(self)
    }

    /// Depth-first walk from `seed`.
    pub fn iter_random(&self, seed: FaceId) -> RandomIterator<'_, 'a, T> {
        RandomIterator::new(self, seed)
    }

    /// Breadth-first rings around `seed`.
    pub fn iter_neighborhood(&self, seed: FaceId) -> NeighborhoodIterator<'_, 'a, T> {
        NeighborhoodIterator::new(self, seed)
    }
}
