//! Connected components over parent ∪ spouse edges

use std::collections::VecDeque;

use lineage_model::PersonId;
use roaring::RoaringBitmap;

use crate::adjacency::FamilyGraph;
use crate::GraphError;

impl FamilyGraph<'_> {
    /// Reachable id set from `start`, treating every edge as undirected.
    ///
    /// The visited bitmap guards against loops, so this runs over the raw
    /// (unsuppressed) adjacency. A lone individual yields just itself.
    pub fn connected_component(&self, start: PersonId) -> Result<RoaringBitmap, GraphError> {
        self.require(start)?;

        let mut visited = RoaringBitmap::new();
        let mut queue = VecDeque::new();
        visited.insert(start.raw());
        queue.push_back(start);

        while let Some(id) = queue.pop_front() {
            let neighbors = self
                .children_raw(id)
                .chain(self.parents_raw(id))
                .chain(self.spouses_of(id));
            for next in neighbors {
                if visited.insert(next.raw()) {
                    queue.push_back(next);
                }
            }
        }

        Ok(visited)
    }
}
