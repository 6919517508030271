//! Root selection for tree rendering
//!
//! Rendering collaborators want one sensible person to hang a drawing off.
//! Candidates are individuals with no recorded parents; malformed data where
//! everyone has a parent (cycles) falls back to highest total edge degree.

use std::collections::VecDeque;

use lineage_model::PersonId;
use roaring::RoaringBitmap;

use crate::adjacency::FamilyGraph;

impl FamilyGraph<'_> {
    /// Number of distinct descendants reachable down acyclic parent edges,
    /// the focus excluded. Once-visited BFS, so multi-path descendants count
    /// once.
    pub fn descendant_count(&self, id: PersonId) -> u64 {
        if !self.contains(id) {
            return 0;
        }
        let mut visited = RoaringBitmap::new();
        let mut queue = VecDeque::new();
        visited.insert(id.raw());
        queue.push_back(id);
        while let Some(node) = queue.pop_front() {
            for child in self.children_of(node) {
                if visited.insert(child.raw()) {
                    queue.push_back(child);
                }
            }
        }
        visited.len() - 1
    }

    /// Pick the best individual to root a rendering at, or `None` on an
    /// empty snapshot.
    ///
    /// Ranking: descendant count (desc), then earliest birth year (unknown
    /// last), then reverse-alphabetical name.
    pub fn select_root(&self) -> Option<PersonId> {
        if self.is_empty() {
            return None;
        }

        let mut candidates: Vec<PersonId> = self
            .ids()
            .iter()
            .copied()
            .filter(|&id| self.inbound_parent_count(id) == 0)
            .collect();

        // Cyclic data can leave nobody parentless; fall back to the
        // best-connected individuals.
        if candidates.is_empty() {
            let max_degree = self.ids().iter().map(|&id| self.degree(id)).max()?;
            candidates = self
                .ids()
                .iter()
                .copied()
                .filter(|&id| self.degree(id) == max_degree)
                .collect();
        }

        // Prefer candidates that actually have a subtree to draw.
        let counted: Vec<(PersonId, u64)> = candidates
            .iter()
            .map(|&id| (id, self.descendant_count(id)))
            .collect();
        let fertile: Vec<(PersonId, u64)> = counted
            .iter()
            .copied()
            .filter(|&(_, n)| n >= 1)
            .collect();
        let pool = if fertile.is_empty() { counted } else { fertile };

        // max_by treats "better" as greater: more descendants, earlier birth
        // (operands reversed below), later-sorting name, smaller id.
        pool.into_iter()
            .max_by(|&(a, na), &(b, nb)| {
                na.cmp(&nb)
                    .then_with(|| birth_rank(self, b).cmp(&birth_rank(self, a)))
                    .then_with(|| self.name_of(a).cmp(self.name_of(b)))
                    .then_with(|| b.cmp(&a))
            })
            .map(|(id, _)| id)
    }

    fn name_of(&self, id: PersonId) -> &str {
        self.individual(id).map_or("", |i| i.display_name.as_str())
    }
}

/// Earlier birth ranks higher; unknown sorts last.
fn birth_rank(graph: &FamilyGraph<'_>, id: PersonId) -> (bool, i32) {
    match graph.individual(id).and_then(|i| i.birth_year) {
        Some(year) => (false, year),
        None => (true, 0),
    }
}
