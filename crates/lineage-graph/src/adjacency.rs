//! Adjacency construction over an individuals + edges snapshot
//!
//! `FamilyGraph` indexes one immutable snapshot: directed parent→child and
//! child→parent maps plus a symmetric spouse map. Edges whose endpoints are
//! outside the working set are silently dropped — expected when a caller
//! hands us a filtered subset, not an error.
//!
//! Cycle suppression runs once at construction (see [`crate::cycles`]);
//! every acyclic view reads through [`FamilyGraph::children_of`] /
//! [`FamilyGraph::parents_of`], which skip suppressed back-edges.

use std::collections::{HashMap, HashSet};

use lineage_model::{Individual, PersonId, RelationshipEdge};

use crate::cycles::suppressed_back_edges;
use crate::GraphError;

pub struct FamilyGraph<'a> {
    individuals: HashMap<PersonId, &'a Individual>,
    /// Document-ordered ids, for deterministic iteration.
    ids: Vec<PersonId>,
    children: HashMap<PersonId, Vec<PersonId>>,
    parents: HashMap<PersonId, Vec<PersonId>>,
    spouses: HashMap<PersonId, Vec<PersonId>>,
    spousal_edges: Vec<&'a RelationshipEdge>,
    parental_edges: Vec<&'a RelationshipEdge>,
    /// Parent→child back-edges excluded from all acyclic views.
    suppressed: HashSet<(PersonId, PersonId)>,
}

impl<'a> FamilyGraph<'a> {
    /// Index a snapshot. Dangling edges are dropped silently.
    pub fn build(individuals: &'a [Individual], edges: &'a [RelationshipEdge]) -> Self {
        let by_id: HashMap<PersonId, &Individual> =
            individuals.iter().map(|i| (i.temp_id, i)).collect();
        let ids: Vec<PersonId> = individuals.iter().map(|i| i.temp_id).collect();

        let mut children: HashMap<PersonId, Vec<PersonId>> = HashMap::new();
        let mut parents: HashMap<PersonId, Vec<PersonId>> = HashMap::new();
        let mut spouses: HashMap<PersonId, Vec<PersonId>> = HashMap::new();
        let mut spousal_edges = Vec::new();
        let mut parental_edges = Vec::new();

        for edge in edges {
            let (s, t) = (edge.source_temp_id, edge.target_temp_id);
            if !by_id.contains_key(&s) || !by_id.contains_key(&t) {
                continue;
            }
            if edge.kind.is_parental() {
                children.entry(s).or_default().push(t);
                parents.entry(t).or_default().push(s);
                parental_edges.push(edge);
            } else {
                spouses.entry(s).or_default().push(t);
                spouses.entry(t).or_default().push(s);
                spousal_edges.push(edge);
            }
        }

        let suppressed = suppressed_back_edges(&ids, &children);

        Self {
            individuals: by_id,
            ids,
            children,
            parents,
            spouses,
            spousal_edges,
            parental_edges,
            suppressed,
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: PersonId) -> bool {
        self.individuals.contains_key(&id)
    }

    pub fn individual(&self, id: PersonId) -> Option<&'a Individual> {
        self.individuals.get(&id).copied()
    }

    /// Ids in snapshot order.
    pub fn ids(&self) -> &[PersonId] {
        &self.ids
    }

    /// Require a known id; the one caller-contract check in this crate.
    pub(crate) fn require(&self, id: PersonId) -> Result<(), GraphError> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(GraphError::UnknownIndividual(id))
        }
    }

    /// Children via acyclic parent edges (suppressed back-edges skipped).
    pub fn children_of(&self, id: PersonId) -> impl Iterator<Item = PersonId> + '_ {
        self.children
            .get(&id)
            .into_iter()
            .flatten()
            .copied()
            .filter(move |&c| !self.suppressed.contains(&(id, c)))
    }

    /// Parents via acyclic parent edges.
    pub fn parents_of(&self, id: PersonId) -> impl Iterator<Item = PersonId> + '_ {
        self.parents
            .get(&id)
            .into_iter()
            .flatten()
            .copied()
            .filter(move |&p| !self.suppressed.contains(&(p, id)))
    }

    /// Children via raw parent edges, suppression ignored. Callers must
    /// bound traversal with a visited set.
    pub fn children_raw(&self, id: PersonId) -> impl Iterator<Item = PersonId> + '_ {
        self.children.get(&id).into_iter().flatten().copied()
    }

    /// Parents via raw parent edges, suppression ignored.
    pub fn parents_raw(&self, id: PersonId) -> impl Iterator<Item = PersonId> + '_ {
        self.parents.get(&id).into_iter().flatten().copied()
    }

    /// Spouses/partners, current and former, symmetric.
    pub fn spouses_of(&self, id: PersonId) -> impl Iterator<Item = PersonId> + '_ {
        self.spouses.get(&id).into_iter().flatten().copied()
    }

    /// Inbound parent-edge count (raw, pre-suppression).
    pub fn inbound_parent_count(&self, id: PersonId) -> usize {
        self.parents.get(&id).map_or(0, Vec::len)
    }

    /// Total edge degree: parent + child + spouse incidences.
    pub fn degree(&self, id: PersonId) -> usize {
        self.parents.get(&id).map_or(0, Vec::len)
            + self.children.get(&id).map_or(0, Vec::len)
            + self.spouses.get(&id).map_or(0, Vec::len)
    }

    pub fn spousal_edges(&self) -> &[&'a RelationshipEdge] {
        &self.spousal_edges
    }

    pub fn parental_edges(&self) -> &[&'a RelationshipEdge] {
        &self.parental_edges
    }

    /// Back-edges excluded from acyclic views.
    pub fn suppressed_edges(&self) -> &HashSet<(PersonId, PersonId)> {
        &self.suppressed
    }
}
