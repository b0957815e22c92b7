// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Text and JSON exports of the current view.
//!
//! The JSON layout is
//!
//! ```json
//! {
//!   "nodes": { "1": { "surface": "plane", "attributes": [] }, ... },
//!   "arcs": [ [1, 3, "convex", 90.0], ... ]
//! }
//! ```
//!
//! Nodes appear in ascending id order and each visible arc appears once,
//! so exporting an unchanged graph twice yields identical text.

use std::collections::BTreeMap;
use std::io;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::aag::Aag;
use crate::attributes::{AngleType, ArcKey, NodeAttribute};
use crate::error::Result;
use crate::feature::FaceId;
use crate::provider::TopologyProvider;

/// Serializable picture of the current view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AagSnapshot {
    pub nodes: BTreeMap<FaceId, NodeSnapshot>,
    /// `(first, second, angle label, angle in degrees)`.
    pub arcs: Vec<(FaceId, FaceId, String, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub surface: String,
    pub attributes: Vec<NodeAttribute>,
}

impl<T: TopologyProvider + ?Sized> Aag<'_, T> {
    /// Captures the current view.
    pub fn snapshot(&self) -> AagSnapshot {
        let mut nodes = BTreeMap::new();
        let mut arcs = Vec::new();
        let mut visited: FxHashSet<ArcKey> = FxHashSet::default();

        for face in self.all_faces().iter() {
            let surface = self
                .face(face)
                .map(|handle| self.solid().surface_name(handle))
                .unwrap_or_else(|| "undefined".to_string());
            nodes.insert(
                face,
                NodeSnapshot {
                    surface,
                    attributes: self.node_attributes(face).cloned().collect(),
                },
            );

            let Ok(neighbors) = self.neighbors(face) else {
                continue;
            };
            for neighbor in neighbors.iter() {
                let arc = ArcKey::new(face, neighbor);
                if !visited.insert(arc) {
                    continue;
                }
                let (angle, degrees) = self
                    .arc_attribute(arc.first(), arc.second())
                    .map(|attr| (attr.angle, attr.degrees()))
                    .unwrap_or((AngleType::Undefined, 0.0));
                arcs.push((arc.first(), arc.second(), angle.as_str().to_string(), degrees));
            }
        }

        AagSnapshot { nodes, arcs }
    }

    /// Exports the current view as pretty-printed JSON.
    pub fn dump_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    /// Writes a human-readable listing of the current view.
    pub fn dump<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "=== AAG: {} node(s), {} arc(s), stack depth {} ===",
            self.number_of_nodes(),
            self.number_of_arcs(),
            self.stack_depth()
        )?;

        for face in self.all_faces().iter() {
            let surface = self
                .face(face)
                .map(|handle| self.solid().surface_name(handle))
                .unwrap_or_else(|| "undefined".to_string());
            let neighbors = self.neighbors(face).cloned().unwrap_or_default();
            let selected = if self.selected_faces().contains(face) {
                " *"
            } else {
                ""
            };
            writeln!(out, "Face {face} [{surface}]{selected} -> {neighbors}")?;
            for attribute in self.node_attributes(face) {
                writeln!(out, "    {attribute}")?;
            }
        }

        for arc in self.arcs() {
            match self.arc_attribute(arc.first(), arc.second()) {
                Some(attr) => {
                    let edges: Vec<String> = attr.edges.iter().map(|e| e.to_string()).collect();
                    writeln!(
                        out,
                        "Arc {arc}: {} {:.2} deg via edge(s) [{}]",
                        attr.angle,
                        attr.degrees(),
                        edges.join(", ")
                    )?;
                }
                None => writeln!(out, "Arc {arc}: unclassified")?,
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Feature, PlanarDihedralClassifier, Solid};

    fn cube() -> Solid {
        let mut solid = Solid::new();
        solid.make_box([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]).unwrap();
        solid
    }

    #[test]
    fn snapshot_lists_each_arc_once() {
        let solid = cube();
        let aag = Aag::new(&solid, &PlanarDihedralClassifier);
        let snapshot = aag.snapshot();

        assert_eq!(snapshot.nodes.len(), 6);
        assert_eq!(snapshot.arcs.len(), 12);
        assert!(snapshot.arcs.iter().all(|(a, b, _, _)| a < b));
        assert_eq!(snapshot.nodes[&1].surface, "plane");

        let (a, b, label, degrees) = &snapshot.arcs[0];
        assert_eq!((*a, *b), (1, 3));
        assert_eq!(label, "convex");
        assert!((degrees - 90.0).abs() < 1e-9);
    }

    #[test]
    fn json_is_stable_and_ordered() {
        let solid = cube();
        let aag = Aag::new(&solid, &PlanarDihedralClassifier);

        let first = aag.dump_json().unwrap();
        let second = aag.dump_json().unwrap();
        assert_eq!(first, second);

        let value: serde_json::Value = serde_json::from_str(&first).unwrap();
        let keys: Vec<&String> = value["nodes"].as_object().unwrap().keys().collect();
        assert_eq!(keys, ["1", "2", "3", "4", "5", "6"]);
        assert_eq!(value["arcs"][0][2], "convex");
    }

    #[test]
    fn json_follows_the_view() {
        let solid = cube();
        let mut aag = Aag::new(&solid, &PlanarDihedralClassifier);
        aag.push_subgraph_excluding(&Feature::from([1]));

        let snapshot: AagSnapshot = serde_json::from_str(&aag.dump_json().unwrap()).unwrap();
        assert!(!snapshot.nodes.contains_key(&1));
        assert_eq!(snapshot.arcs.len(), 8);
    }

    #[test]
    fn seam_attribute_is_exported() {
        let mut solid = Solid::new();
        solid.make_cylinder([0.0, 0.0, 0.0], 1.0, 1.0).unwrap();
        let aag = Aag::new(&solid, &PlanarDihedralClassifier);
        let snapshot = aag.snapshot();

        assert_eq!(snapshot.nodes[&1].surface, "cylinder");
        assert_eq!(snapshot.nodes[&1].attributes.len(), 1);
        assert_eq!(snapshot.nodes[&1].attributes[0].kind(), NodeAttribute::SELF_ANGLE);
    }

    #[test]
    fn text_dump_mentions_faces_and_arcs() {
        let solid = cube();
        let aag = Aag::new(&solid, &PlanarDihedralClassifier);
        let mut out = Vec::new();
        aag.dump(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("=== AAG: 6 node(s), 12 arc(s), stack depth 1 ==="));
        assert!(text.contains("Face 1 [plane] -> {3 4 5 6}"));
        assert!(text.contains("Arc (1, 3): convex 90.00 deg"));
    }
}
