// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Attributes decorating graph nodes (faces) and arcs (face pairs).
//!
//! Arcs carry exactly one record, the dihedral classification computed when
//! the graph is built. Nodes carry any number of attributes, at most one per
//! kind. Both tables belong to the graph as a whole: pushing a sub-graph view
//! hides nodes but leaves their attributes queryable.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::dictionary::Dictionary;
use crate::feature::FaceId;
use crate::index_map::EdgeId;

// =============================================================================
// Angle classification
// =============================================================================

/// Dihedral type of the transition between two faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleType {
    Undefined,
    Convex,
    Concave,
    Smooth,
    SmoothConvex,
    SmoothConcave,
}

impl AngleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AngleType::Undefined => "undefined",
            AngleType::Convex => "convex",
            AngleType::Concave => "concave",
            AngleType::Smooth => "smooth",
            AngleType::SmoothConvex => "smooth_convex",
            AngleType::SmoothConcave => "smooth_concave",
        }
    }

    /// Convex, sharply or tangentially.
    pub fn is_convex(&self) -> bool {
        matches!(self, AngleType::Convex | AngleType::SmoothConvex)
    }

    /// Concave, sharply or tangentially.
    pub fn is_concave(&self) -> bool {
        matches!(self, AngleType::Concave | AngleType::SmoothConcave)
    }

    pub fn is_smooth(&self) -> bool {
        matches!(
            self,
            AngleType::Smooth | AngleType::SmoothConvex | AngleType::SmoothConcave
        )
    }
}

impl fmt::Display for AngleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Arcs
// =============================================================================

/// Unordered pair of distinct faces, stored smaller id first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ArcKey {
    first: FaceId,
    second: FaceId,
}

impl ArcKey {
    pub fn new(a: FaceId, b: FaceId) -> Self {
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    pub fn first(&self) -> FaceId {
        self.first
    }

    pub fn second(&self) -> FaceId {
        self.second
    }

    pub fn contains(&self, face: FaceId) -> bool {
        self.first == face || self.second == face
    }

    /// The opposite end of the arc, if `face` is one of its ends.
    pub fn other(&self, face: FaceId) -> Option<FaceId> {
        if face == self.first {
            Some(self.second)
        } else if face == self.second {
            Some(self.first)
        } else {
            None
        }
    }
}

impl fmt::Display for ArcKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}

/// Classification of one arc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcAttribute {
    pub angle: AngleType,
    pub radians: f64,
    /// Ids of the edges shared by the two faces.
    pub edges: BTreeSet<EdgeId>,
}

impl ArcAttribute {
    pub fn degrees(&self) -> f64 {
        self.radians.to_degrees()
    }
}

/// Arc → classification.
#[derive(Debug, Clone, Default)]
pub struct ArcAttributeTable {
    map: FxHashMap<ArcKey, ArcAttribute>,
}

impl ArcAttributeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds an attribute unless the arc already has one. Returns whether
    /// the attribute was stored.
    pub fn bind(&mut self, arc: ArcKey, attribute: ArcAttribute) -> bool {
        if self.map.contains_key(&arc) {
            return false;
        }
        self.map.insert(arc, attribute);
        true
    }

    pub fn find(&self, arc: ArcKey) -> Option<&ArcAttribute> {
        self.map.get(&arc)
    }

    pub fn contains(&self, arc: ArcKey) -> bool {
        self.map.contains_key(&arc)
    }

    pub fn unbind(&mut self, arc: ArcKey) -> Option<ArcAttribute> {
        self.map.remove(&arc)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterates all bound arcs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&ArcKey, &ArcAttribute)> {
        self.map.iter()
    }
}

// =============================================================================
// Node attributes
// =============================================================================

/// An attribute attached to a face.
///
/// The kind string identifies the attribute within its node; a node holds
/// at most one attribute of each kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeAttribute {
    /// Classification of a face meeting itself across a seam.
    SelfAngle { angle: AngleType, radians: f64 },
    /// Membership in a recognized feature.
    Feature { id: usize, label: String },
    /// Free-form payload under a caller-chosen kind.
    Custom { name: String, values: Dictionary },
}

impl NodeAttribute {
    pub const SELF_ANGLE: &'static str = "self_angle";
    pub const FEATURE: &'static str = "feature";

    pub fn kind(&self) -> &str {
        match self {
            NodeAttribute::SelfAngle { .. } => Self::SELF_ANGLE,
            NodeAttribute::Feature { .. } => Self::FEATURE,
            NodeAttribute::Custom { name, .. } => name,
        }
    }

    pub fn custom(name: impl Into<String>, values: Dictionary) -> Self {
        NodeAttribute::Custom {
            name: name.into(),
            values,
        }
    }
}

impl fmt::Display for NodeAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeAttribute::SelfAngle { angle, radians } => {
                write!(f, "self_angle ({angle}, {:.2} deg)", radians.to_degrees())
            }
            NodeAttribute::Feature { id, label } => write!(f, "feature #{id} '{label}'"),
            NodeAttribute::Custom { name, values } => {
                write!(f, "{name} [{} value(s)]", values.len())
            }
        }
    }
}

/// Face → attributes keyed by kind.
#[derive(Debug, Clone, Default)]
pub struct NodeAttributeTable {
    map: FxHashMap<FaceId, BTreeMap<String, NodeAttribute>>,
}

impl NodeAttributeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches an attribute unless the face already has one of that kind.
    /// Returns whether the attribute was stored.
    pub fn set(&mut self, face: FaceId, attribute: NodeAttribute) -> bool {
        let slot = self.map.entry(face).or_default();
        if slot.contains_key(attribute.kind()) {
            return false;
        }
        slot.insert(attribute.kind().to_string(), attribute);
        true
    }

    pub fn get(&self, face: FaceId, kind: &str) -> Option<&NodeAttribute> {
        self.map.get(&face).and_then(|attrs| attrs.get(kind))
    }

    pub fn contains(&self, face: FaceId, kind: &str) -> bool {
        self.get(face, kind).is_some()
    }

    /// Detaches one attribute.
    pub fn remove(&mut self, face: FaceId, kind: &str) -> Option<NodeAttribute> {
        let attrs = self.map.get_mut(&face)?;
        let removed = attrs.remove(kind);
        if attrs.is_empty() {
            self.map.remove(&face);
        }
        removed
    }

    /// Detaches every attribute of a face. Returns `false` if it had none.
    pub fn remove_all(&mut self, face: FaceId) -> bool {
        self.map.remove(&face).is_some()
    }

    /// Attributes of a face, ordered by kind.
    pub fn attributes(&self, face: FaceId) -> impl Iterator<Item = &NodeAttribute> {
        self.map.get(&face).into_iter().flat_map(|attrs| attrs.values())
    }

    /// Number of faces carrying at least one attribute.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::DictValue;

    fn convex(edges: &[EdgeId]) -> ArcAttribute {
        ArcAttribute {
            angle: AngleType::Convex,
            radians: std::f64::consts::FRAC_PI_2,
            edges: edges.iter().copied().collect(),
        }
    }

    #[test]
    fn arc_key_is_canonical() {
        assert_eq!(ArcKey::new(5, 2), ArcKey::new(2, 5));
        let arc = ArcKey::new(5, 2);
        assert_eq!(arc.first(), 2);
        assert_eq!(arc.second(), 5);
        assert_eq!(arc.other(2), Some(5));
        assert_eq!(arc.other(3), None);
        assert_eq!(arc.to_string(), "(2, 5)");
    }

    #[test]
    fn arc_binding_skips_existing() {
        let mut table = ArcAttributeTable::new();
        assert!(table.bind(ArcKey::new(1, 2), convex(&[1])));
        assert!(!table.bind(ArcKey::new(2, 1), convex(&[7])));

        let attr = table.find(ArcKey::new(1, 2)).unwrap();
        assert_eq!(attr.edges.iter().copied().collect::<Vec<_>>(), vec![1]);
        assert!((attr.degrees() - 90.0).abs() < 1e-9);

        assert!(table.unbind(ArcKey::new(2, 1)).is_some());
        assert!(table.is_empty());
    }

    #[test]
    fn angle_type_families() {
        assert!(AngleType::SmoothConvex.is_convex());
        assert!(AngleType::SmoothConvex.is_smooth());
        assert!(!AngleType::Smooth.is_convex());
        assert!(!AngleType::Smooth.is_concave());
        assert!(AngleType::Concave.is_concave());
        assert!(!AngleType::Undefined.is_smooth());
        assert_eq!(AngleType::SmoothConcave.to_string(), "smooth_concave");
    }

    #[test]
    fn one_node_attribute_per_kind() {
        let mut table = NodeAttributeTable::new();
        let first = NodeAttribute::Feature {
            id: 1,
            label: "hole".to_string(),
        };
        let second = NodeAttribute::Feature {
            id: 2,
            label: "pocket".to_string(),
        };

        assert!(table.set(4, first.clone()));
        assert!(!table.set(4, second));
        assert_eq!(table.get(4, NodeAttribute::FEATURE), Some(&first));
    }

    #[test]
    fn node_attributes_are_listed_by_kind() {
        let mut table = NodeAttributeTable::new();
        let mut values = Dictionary::new();
        values.insert("radius".to_string(), DictValue::Double(2.0));

        table.set(1, NodeAttribute::custom("blend", values));
        table.set(
            1,
            NodeAttribute::SelfAngle {
                angle: AngleType::Smooth,
                radians: 0.0,
            },
        );

        let kinds: Vec<&str> = table.attributes(1).map(NodeAttribute::kind).collect();
        assert_eq!(kinds, vec!["blend", "self_angle"]);
        assert_eq!(table.attributes(2).count(), 0);
    }

    #[test]
    fn removing_last_attribute_drops_the_node() {
        let mut table = NodeAttributeTable::new();
        table.set(
            3,
            NodeAttribute::SelfAngle {
                angle: AngleType::Smooth,
                radians: 0.0,
            },
        );

        assert!(table.remove(3, "blend").is_none());
        assert!(table.remove(3, NodeAttribute::SELF_ANGLE).is_some());
        assert!(table.is_empty());
        assert!(!table.remove_all(3));
    }

    #[test]
    fn node_attribute_json_is_tagged() {
        let attr = NodeAttribute::SelfAngle {
            angle: AngleType::Smooth,
            radians: 0.0,
        };
        let json = serde_json::to_value(&attr).unwrap();
        assert_eq!(json["kind"], "self_angle");
        assert_eq!(json["angle"], "smooth");
    }
}
