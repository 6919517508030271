//! Property tests for cycle suppression

use std::collections::{HashMap, HashSet, VecDeque};

use lineage_graph::cycles::suppressed_back_edges;
use lineage_model::PersonId;
use proptest::prelude::*;

fn children_map(n: u32, raw_edges: &[(u32, u32)]) -> HashMap<PersonId, Vec<PersonId>> {
    let mut map: HashMap<PersonId, Vec<PersonId>> = HashMap::new();
    for &(p, c) in raw_edges {
        map.entry(PersonId::new(p % n))
            .or_default()
            .push(PersonId::new(c % n));
    }
    map
}

/// True when the kept edges admit no directed cycle (Kahn's algorithm).
fn is_acyclic(n: u32, kept: &[(u32, u32)]) -> bool {
    let mut indegree = vec![0usize; n as usize];
    let mut out: Vec<Vec<u32>> = vec![Vec::new(); n as usize];
    for &(p, c) in kept {
        out[p as usize].push(c);
        indegree[c as usize] += 1;
    }
    let mut queue: VecDeque<u32> = (0..n).filter(|&i| indegree[i as usize] == 0).collect();
    let mut removed = 0u32;
    while let Some(node) = queue.pop_front() {
        removed += 1;
        for &c in &out[node as usize] {
            indegree[c as usize] -= 1;
            if indegree[c as usize] == 0 {
                queue.push_back(c);
            }
        }
    }
    removed == n
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    /// For any parent-edge set, the surviving edges are acyclic.
    #[test]
    fn surviving_edges_are_acyclic(
        n in 1u32..24,
        raw in prop::collection::vec((0u32..24, 0u32..24), 0..80),
    ) {
        let ids: Vec<PersonId> = (0..n).map(PersonId::new).collect();
        let children = children_map(n, &raw);
        let suppressed = suppressed_back_edges(&ids, &children);

        let mut kept: Vec<(u32, u32)> = Vec::new();
        for (&p, kids) in &children {
            for &c in kids {
                if !suppressed.contains(&(p, c)) {
                    kept.push((p.raw(), c.raw()));
                }
            }
        }
        prop_assert!(is_acyclic(n, &kept), "kept edges still cyclic: {kept:?}");
    }

    /// Suppression only removes edges that were present.
    #[test]
    fn suppressed_edges_come_from_the_input(
        n in 1u32..24,
        raw in prop::collection::vec((0u32..24, 0u32..24), 0..80),
    ) {
        let ids: Vec<PersonId> = (0..n).map(PersonId::new).collect();
        let children = children_map(n, &raw);
        let suppressed = suppressed_back_edges(&ids, &children);

        let present: HashSet<(PersonId, PersonId)> = children
            .iter()
            .flat_map(|(&p, kids)| kids.iter().map(move |&c| (p, c)))
            .collect();
        for edge in &suppressed {
            prop_assert!(present.contains(edge));
        }
    }

    /// Every node stays reachable from some surviving root (a node with no
    /// kept inbound edge), so cycle members are not orphaned.
    #[test]
    fn all_nodes_reachable_from_surviving_roots(
        n in 1u32..24,
        raw in prop::collection::vec((0u32..24, 0u32..24), 0..80),
    ) {
        let ids: Vec<PersonId> = (0..n).map(PersonId::new).collect();
        let children = children_map(n, &raw);
        let suppressed = suppressed_back_edges(&ids, &children);

        let mut kept_out: Vec<Vec<u32>> = vec![Vec::new(); n as usize];
        let mut has_inbound = vec![false; n as usize];
        for (&p, kids) in &children {
            for &c in kids {
                if !suppressed.contains(&(p, c)) {
                    kept_out[p.raw() as usize].push(c.raw());
                    has_inbound[c.raw() as usize] = true;
                }
            }
        }

        let mut visited = vec![false; n as usize];
        let mut queue: VecDeque<u32> = (0..n).filter(|&i| !has_inbound[i as usize]).collect();
        for &node in &queue {
            visited[node as usize] = true;
        }
        while let Some(node) = queue.pop_front() {
            for &c in &kept_out[node as usize] {
                if !visited[c as usize] {
                    visited[c as usize] = true;
                    queue.push_back(c);
                }
            }
        }
        for (i, &v) in visited.iter().enumerate() {
            prop_assert!(v, "node {i} unreachable from every surviving root");
        }
    }
}
