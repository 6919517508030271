//! Kinship resolution: common ancestors and relationship labels
//!
//! Answers "how are these two people related?" over the acyclic parent
//! edges of a [`FamilyGraph`]. The approach is layered the same way the
//! graph crate's queries are: build per-person ancestor maps once (BFS with
//! distance + predecessor), then answer from the maps.
//!
//! The common ancestor chosen is the one minimizing the *sum* of both
//! generation distances, not the minimum of either side. Picking by one
//! side's minimum mislabels half-relations and multi-path families: a
//! shared parent must beat a shared great-grandparent even when the latter
//! is closer to one of the two.

use std::collections::{HashMap, VecDeque};

use lineage_graph::{FamilyGraph, GraphError};
use lineage_model::PersonId;
use serde::Serialize;

/// Minimum generation distances to every reachable ancestor, with BFS
/// predecessor pointers for path reconstruction.
#[derive(Debug, Clone)]
pub struct AncestorMap {
    start: PersonId,
    distance: HashMap<PersonId, u32>,
    predecessor: HashMap<PersonId, PersonId>,
}

impl AncestorMap {
    /// BFS strictly up the acyclic parent edges. Distance 0 is the person
    /// themselves.
    pub fn build(graph: &FamilyGraph<'_>, start: PersonId) -> Result<Self, GraphError> {
        if graph.individual(start).is_none() {
            return Err(GraphError::UnknownIndividual(start));
        }

        let mut distance = HashMap::new();
        let mut predecessor = HashMap::new();
        let mut queue = VecDeque::new();
        distance.insert(start, 0u32);
        queue.push_back(start);

        while let Some(id) = queue.pop_front() {
            let next_distance = distance[&id] + 1;
            for parent in graph.parents_of(id) {
                if !distance.contains_key(&parent) {
                    distance.insert(parent, next_distance);
                    predecessor.insert(parent, id);
                    queue.push_back(parent);
                }
            }
        }

        Ok(Self {
            start,
            distance,
            predecessor,
        })
    }

    pub fn distance_to(&self, ancestor: PersonId) -> Option<u32> {
        self.distance.get(&ancestor).copied()
    }

    /// Parent chain start → … → ancestor, following BFS predecessors
    /// backwards from the ancestor.
    pub fn path_to(&self, ancestor: PersonId) -> Vec<PersonId> {
        let mut path = vec![ancestor];
        let mut cursor = ancestor;
        while let Some(&prev) = self.predecessor.get(&cursor) {
            path.push(prev);
            cursor = prev;
        }
        path.reverse();
        debug_assert_eq!(path.first(), Some(&self.start));
        path
    }
}

/// A resolved relationship between two people.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Kinship {
    /// Human label for A's relation to B ("1st cousin once removed").
    pub label: String,
    pub common_ancestor: PersonId,
    /// A's parent chain: A → … → common ancestor.
    pub path_a: Vec<PersonId>,
    /// B's parent chain: B → … → common ancestor.
    pub path_b: Vec<PersonId>,
    pub generations_a: u32,
    pub generations_b: u32,
}

/// Resolve how `a` relates to `b`; `Ok(None)` when they share no ancestor.
pub fn find_kinship(
    graph: &FamilyGraph<'_>,
    a: PersonId,
    b: PersonId,
) -> Result<Option<Kinship>, GraphError> {
    let map_a = AncestorMap::build(graph, a)?;
    let map_b = AncestorMap::build(graph, b)?;

    // Minimize the distance sum; ties go to the smaller id so results are
    // stable across runs.
    let mut best: Option<(u32, PersonId, u32, u32)> = None;
    for (&ancestor, &da) in &map_a.distance {
        let Some(db) = map_b.distance_to(ancestor) else {
            continue;
        };
        let sum = da + db;
        let candidate = (sum, ancestor, da, db);
        best = Some(match best {
            Some(current) if (current.0, current.1) <= (sum, ancestor) => current,
            _ => candidate,
        });
    }

    let Some((_, ancestor, gen_a, gen_b)) = best else {
        return Ok(None);
    };

    Ok(Some(Kinship {
        label: relationship_label(gen_a, gen_b),
        common_ancestor: ancestor,
        path_a: map_a.path_to(ancestor),
        path_b: map_b.path_to(ancestor),
        generations_a: gen_a,
        generations_b: gen_b,
    }))
}

/// Label for A's relation to B given both generation distances to their
/// chosen common ancestor.
pub fn relationship_label(gen_a: u32, gen_b: u32) -> String {
    match (gen_a, gen_b) {
        (0, 0) => "same person".to_string(),
        // One of the two *is* the common ancestor: direct lineage.
        (0, down) => direct_label("parent", down),
        (up, 0) => direct_label("child", up),
        (1, 1) => "sibling".to_string(),
        // A is a sibling of B's ancestor, or the mirror image.
        (1, down) => collateral_label("aunt/uncle", down),
        (up, 1) => collateral_label("niece/nephew", up),
        (up, down) => {
            let degree = up.min(down) - 1;
            let removed = up.abs_diff(down);
            let mut label = format!("{} cousin", ordinal(degree));
            match removed {
                0 => {}
                1 => label.push_str(" once removed"),
                2 => label.push_str(" twice removed"),
                n => label.push_str(&format!(" {n} times removed")),
            }
            label
        }
    }
}

/// "parent", "grandparent", then "great-" repeated (gen − 2) times in front
/// of "grandparent"; same shape for the child direction.
fn direct_label(base: &str, gen: u32) -> String {
    match gen {
        1 => base.to_string(),
        _ => format!("{}grand{base}", "great-".repeat(gen as usize - 2)),
    }
}

/// "aunt/uncle", then "great-" prefixes for each generation past 2.
fn collateral_label(base: &str, gen: u32) -> String {
    format!("{}{base}", "great-".repeat(gen as usize - 2))
}

fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (1, 11) | (2, 12) | (3, 13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}
