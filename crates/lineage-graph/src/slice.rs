//! Strict-lineage subgraph slicing
//!
//! A slice walks strictly up (ancestors) or strictly down (descendants) the
//! acyclic parent edges from one focus individual. Siblings, cousins and
//! in-laws are excluded by construction: they are never on a strict parent
//! chain, so the BFS simply never reaches them.

use std::collections::VecDeque;

use lineage_model::{PersonId, RelationshipEdge};
use roaring::RoaringBitmap;
use serde::Serialize;

use crate::adjacency::FamilyGraph;
use crate::GraphError;

/// The strict-lineage subgraph around one focus individual: the member id
/// set (BFS discovery order, focus first) and the parent edges connecting
/// members to members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineageSlice {
    pub focus: PersonId,
    pub members: Vec<PersonId>,
    pub edges: Vec<RelationshipEdge>,
}

#[derive(Clone, Copy)]
enum Direction {
    Up,
    Down,
}

impl FamilyGraph<'_> {
    /// Everyone on a strict parent chain above the focus.
    pub fn ancestor_slice(&self, focus: PersonId) -> Result<LineageSlice, GraphError> {
        self.slice(focus, Direction::Up)
    }

    /// Everyone on a strict parent chain below the focus.
    pub fn descendant_slice(&self, focus: PersonId) -> Result<LineageSlice, GraphError> {
        self.slice(focus, Direction::Down)
    }

    fn slice(&self, focus: PersonId, direction: Direction) -> Result<LineageSlice, GraphError> {
        self.require(focus)?;

        let mut seen = RoaringBitmap::new();
        let mut members = Vec::new();
        let mut queue = VecDeque::new();
        seen.insert(focus.raw());
        members.push(focus);
        queue.push_back(focus);

        while let Some(id) = queue.pop_front() {
            let step: Vec<PersonId> = match direction {
                Direction::Up => self.parents_of(id).collect(),
                Direction::Down => self.children_of(id).collect(),
            };
            for next in step {
                if seen.insert(next.raw()) {
                    members.push(next);
                    queue.push_back(next);
                }
            }
        }

        // Lineage edges with both endpoints inside the slice, suppressed
        // back-edges excluded.
        let edges = self
            .parental_edges()
            .iter()
            .filter(|e| {
                seen.contains(e.source_temp_id.raw())
                    && seen.contains(e.target_temp_id.raw())
                    && !self
                        .suppressed_edges()
                        .contains(&(e.source_temp_id, e.target_temp_id))
            })
            .map(|&e| e.clone())
            .collect();

        Ok(LineageSlice {
            focus,
            members,
            edges,
        })
    }
}
