// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Connectivity and homogeneous-angle analysis over the current view.

use std::collections::VecDeque;

use tracing::debug;

use crate::aag::Aag;
use crate::attributes::AngleType;
use crate::feature::Feature;
use crate::provider::TopologyProvider;

impl<T: TopologyProvider + ?Sized> Aag<'_, T> {
    /// Splits `seeds` into connected components.
    ///
    /// Only faces that are both seeds and visible take part, and expansion
    /// follows only such faces. Components are reported in ascending order
    /// of their smallest face.
    pub fn connected_components(&self, seeds: &Feature) -> Vec<Feature> {
        let domain = &self.all_faces() & seeds;
        let mut visited = Feature::new();
        let mut components = Vec::new();

        for start in domain.iter() {
            if visited.contains(start) {
                continue;
            }

            let mut component = Feature::new();
            let mut queue = VecDeque::new();
            visited.add(start);
            queue.push_back(start);

            while let Some(face) = queue.pop_front() {
                component.add(face);
                let Ok(neighbors) = self.neighbors(face) else {
                    continue;
                };
                for next in neighbors.iter() {
                    if domain.contains(next) && visited.add(next) {
                        queue.push_back(next);
                    }
                }
            }

            components.push(component);
        }

        debug!(
            seeds = domain.extent(),
            components = components.len(),
            "Computed connected components"
        );
        components
    }

    /// Connected components of the whole view.
    pub fn all_connected_components(&self) -> Vec<Feature> {
        self.connected_components(&self.all_faces())
    }

    /// Connected components of the view once `excluded` is removed.
    ///
    /// Works on a copy; `self` is left as it is.
    pub fn connected_components_without(&self, excluded: &Feature) -> Vec<Feature> {
        let mut copy = self.clone();
        copy.remove(excluded);
        copy.all_connected_components()
    }

    /// Faces whose every visible arc is convex or smooth-convex.
    ///
    /// Faces without visible neighbors never qualify, and an arc without a
    /// classification disqualifies both of its faces.
    pub fn find_convex_only(&self) -> Feature {
        self.find_homogeneous(AngleType::is_convex)
    }

    /// Faces whose every visible arc is concave or smooth-concave.
    pub fn find_concave_only(&self) -> Feature {
        self.find_homogeneous(AngleType::is_concave)
    }

    fn find_homogeneous(&self, accept: fn(&AngleType) -> bool) -> Feature {
        let mut found = Feature::new();
        let mut rejected = Feature::new();

        for face in self.all_faces().iter() {
            if rejected.contains(face) {
                continue;
            }
            let Ok(neighbors) = self.neighbors(face) else {
                continue;
            };
            if neighbors.is_empty() {
                continue;
            }

            let mut qualifies = true;
            for neighbor in neighbors.iter() {
                let accepted = self
                    .angle(face, neighbor)
                    .is_some_and(|angle| accept(&angle));
                if !accepted {
                    qualifies = false;
                    rejected.add(neighbor);
                }
            }
            if qualifies {
                found.add(face);
            }
        }

        found
    }
}

#[cfg(test)]
mod tests {
    use crate::{Aag, Feature, PlanarDihedralClassifier, Solid};

    fn l_prism() -> Solid {
        let mut solid = Solid::new();
        let profile = [[0.0, 0.0], [2.0, 0.0], [2.0, 1.0], [1.0, 1.0], [1.0, 2.0], [0.0, 2.0]];
        solid.make_prism(&profile, 0.0, 1.0).unwrap();
        solid
    }

    #[test]
    fn cube_is_one_component() {
        let mut solid = Solid::new();
        solid.make_box([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]).unwrap();
        let aag = Aag::new(&solid, &PlanarDihedralClassifier);

        let components = aag.all_connected_components();
        assert_eq!(components, vec![Feature::from([1, 2, 3, 4, 5, 6])]);
    }

    #[test]
    fn seeds_limit_expansion() {
        let mut solid = Solid::new();
        solid.make_box([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]).unwrap();
        let aag = Aag::new(&solid, &PlanarDihedralClassifier);

        // bottom and top are only joined through the sides
        let components = aag.connected_components(&Feature::from([2, 1, 99]));
        assert_eq!(components, vec![Feature::from([1]), Feature::from([2])]);
    }

    #[test]
    fn removing_a_ring_splits_the_cube() {
        let mut solid = Solid::new();
        solid.make_box([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]).unwrap();
        let aag = Aag::new(&solid, &PlanarDihedralClassifier);

        let components = aag.connected_components_without(&Feature::from([3, 4, 5, 6]));
        assert_eq!(components, vec![Feature::from([1]), Feature::from([2])]);
        assert_eq!(aag.number_of_nodes(), 6);
    }

    #[test]
    fn cube_faces_are_all_convex() {
        let mut solid = Solid::new();
        solid.make_box([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]).unwrap();
        let aag = Aag::new(&solid, &PlanarDihedralClassifier);

        assert_eq!(aag.find_convex_only().extent(), 6);
        assert!(aag.find_concave_only().is_empty());
    }

    #[test]
    fn notch_faces_are_not_convex_only() {
        let solid = l_prism();
        let aag = Aag::new(&solid, &PlanarDihedralClassifier);

        // 1 bottom, 2 top, 3..8 sides; 5 and 6 meet at the inner corner
        assert_eq!(aag.angle(5, 6), Some(crate::AngleType::Concave));
        assert_eq!(aag.find_convex_only(), Feature::from([1, 2, 3, 4, 7, 8]));
        // the notch faces still have convex arcs to bottom and top
        assert!(aag.find_concave_only().is_empty());
    }

    #[test]
    fn isolated_faces_do_not_qualify() {
        let mut solid = Solid::new();
        solid.make_box([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]).unwrap();
        let mut aag = Aag::new(&solid, &PlanarDihedralClassifier);
        aag.push_subgraph(&Feature::from([1, 2]));

        assert!(aag.find_convex_only().is_empty());
        assert!(aag.find_concave_only().is_empty());
        assert_eq!(aag.all_connected_components().len(), 2);
    }
}
