// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sets of face ids.
//!
//! A [`Feature`] is the currency of every graph query: neighbor sets,
//! connected components, selections and recognition results are all plain
//! sets of face ids. Iteration is always in ascending id order.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::{BitAnd, BitOr, Sub};

use serde::{Deserialize, Serialize};

/// 1-based id of a face within one graph.
pub type FaceId = usize;

/// An unordered set of face ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feature(BTreeSet<FaceId>);

impl Feature {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a face. Returns `false` if it was already present.
    pub fn add(&mut self, face: FaceId) -> bool {
        self.0.insert(face)
    }

    /// Removes a face. Returns `false` if it was absent.
    pub fn remove(&mut self, face: FaceId) -> bool {
        self.0.remove(&face)
    }

    pub fn contains(&self, face: FaceId) -> bool {
        self.0.contains(&face)
    }

    /// Removes every face of `other` from this set.
    pub fn subtract(&mut self, other: &Feature) {
        if other.0.len() < self.0.len() {
            for face in &other.0 {
                self.0.remove(face);
            }
        } else {
            self.0.retain(|face| !other.0.contains(face));
        }
    }

    /// Keeps only the faces also present in `other`.
    pub fn intersect(&mut self, other: &Feature) {
        self.0.retain(|face| other.0.contains(face));
    }

    /// Adds every face of `other` to this set.
    pub fn unite(&mut self, other: &Feature) {
        self.0.extend(other.0.iter().copied());
    }

    /// Number of faces in the set.
    pub fn extent(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Iterates the face ids in ascending order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = FaceId> + '_ {
        self.0.iter().copied()
    }

    /// The smallest face id in the set, if any.
    pub fn minimal_mapped(&self) -> Option<FaceId> {
        self.0.first().copied()
    }

    /// Returns `true` if the two sets have at least one face in common.
    pub fn intersects(&self, other: &Feature) -> bool {
        let (small, large) = if self.0.len() <= other.0.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.0.iter().any(|face| large.0.contains(face))
    }

    pub fn is_subset(&self, other: &Feature) -> bool {
        self.0.is_subset(&other.0)
    }
}

impl FromIterator<FaceId> for Feature {
    fn from_iter<I: IntoIterator<Item = FaceId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<FaceId> for Feature {
    fn extend<I: IntoIterator<Item = FaceId>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl<const N: usize> From<[FaceId; N]> for Feature {
    fn from(faces: [FaceId; N]) -> Self {
        faces.into_iter().collect()
    }
}

impl IntoIterator for Feature {
    type Item = FaceId;
    type IntoIter = std::collections::btree_set::IntoIter<FaceId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Feature {
    type Item = FaceId;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, FaceId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}

impl BitOr for &Feature {
    type Output = Feature;

    fn bitor(self, rhs: &Feature) -> Feature {
        let mut out = self.clone();
        out.unite(rhs);
        out
    }
}

impl BitAnd for &Feature {
    type Output = Feature;

    fn bitand(self, rhs: &Feature) -> Feature {
        let mut out = self.clone();
        out.intersect(rhs);
        out
    }
}

impl Sub for &Feature {
    type Output = Feature;

    fn sub(self, rhs: &Feature) -> Feature {
        let mut out = self.clone();
        out.subtract(rhs);
        out
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, face) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{face}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_idempotent() {
        let mut feature = Feature::new();
        assert!(feature.add(3));
        assert!(!feature.add(3));
        assert_eq!(feature.extent(), 1);
        assert!(feature.contains(3));
    }

    #[test]
    fn set_algebra() {
        let a = Feature::from([1, 2, 3, 4]);
        let b = Feature::from([3, 4, 5]);

        assert_eq!(&a | &b, Feature::from([1, 2, 3, 4, 5]));
        assert_eq!(&a & &b, Feature::from([3, 4]));
        assert_eq!(&a - &b, Feature::from([1, 2]));
        assert_eq!(&b - &a, Feature::from([5]));
    }

    #[test]
    fn subtract_large_from_small() {
        let mut small = Feature::from([2, 9]);
        let large: Feature = (1..=8).collect();
        small.subtract(&large);
        assert_eq!(small, Feature::from([9]));
    }

    #[test]
    fn minimal_mapped() {
        assert_eq!(Feature::new().minimal_mapped(), None);
        assert_eq!(Feature::from([7, 3, 5]).minimal_mapped(), Some(3));
    }

    #[test]
    fn iteration_is_ascending() {
        let feature = Feature::from([9, 1, 4]);
        let ids: Vec<FaceId> = feature.iter().collect();
        assert_eq!(ids, vec![1, 4, 9]);
    }

    #[test]
    fn intersects_and_subset() {
        let a = Feature::from([1, 2]);
        assert!(a.intersects(&Feature::from([2, 8])));
        assert!(!a.intersects(&Feature::from([3])));
        assert!(a.is_subset(&Feature::from([1, 2, 3])));
    }

    #[test]
    fn display_and_json() {
        let feature = Feature::from([2, 1]);
        assert_eq!(feature.to_string(), "{1 2}");
        assert_eq!(serde_json::to_string(&feature).unwrap(), "[1,2]");
        assert_eq!(Feature::new().to_string(), "{}");
    }
}
