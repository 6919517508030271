//! Cycle suppression over parent→child edges
//!
//! Hand-typed source data can contain impossible ancestry loops (someone
//! listed as their own great-grandparent). A three-color DFS marks every
//! back-edge to a node on the active DFS stack; derived acyclic views skip
//! those edges, so traversals never loop while every node stays reachable
//! from some surviving root.
//!
//! Iterative on an explicit frame stack: imports with thousands of
//! generations must not exhaust the call stack.

use std::collections::{HashMap, HashSet};

use lineage_model::PersonId;

#[derive(Clone, Copy, PartialEq)]
enum Color {
    White,
    Gray,
    Black,
}

/// Parent→child edges that close a cycle, in deterministic (id-sorted
/// start) DFS discovery order.
pub fn suppressed_back_edges(
    ids: &[PersonId],
    children: &HashMap<PersonId, Vec<PersonId>>,
) -> HashSet<(PersonId, PersonId)> {
    let mut color: HashMap<PersonId, Color> = ids.iter().map(|&id| (id, Color::White)).collect();
    let mut suppressed = HashSet::new();

    let mut starts: Vec<PersonId> = ids.to_vec();
    starts.sort();

    for start in starts {
        if color[&start] != Color::White {
            continue;
        }
        // (node, next child index) frames.
        let mut stack: Vec<(PersonId, usize)> = vec![(start, 0)];
        color.insert(start, Color::Gray);

        while let Some(frame) = stack.last_mut() {
            let (node, next) = *frame;
            let kids = children.get(&node).map(Vec::as_slice).unwrap_or(&[]);
            if next < kids.len() {
                frame.1 += 1;
                let child = kids[next];
                match color.get(&child).copied().unwrap_or(Color::Black) {
                    Color::White => {
                        color.insert(child, Color::Gray);
                        stack.push((child, 0));
                    }
                    // Gray = on the active DFS stack: a back-edge.
                    Color::Gray => {
                        suppressed.insert((node, child));
                    }
                    Color::Black => {}
                }
            } else {
                color.insert(node, Color::Black);
                stack.pop();
            }
        }
    }

    suppressed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u32]) -> Vec<PersonId> {
        raw.iter().copied().map(PersonId::new).collect()
    }

    fn edges(pairs: &[(u32, u32)]) -> HashMap<PersonId, Vec<PersonId>> {
        let mut map: HashMap<PersonId, Vec<PersonId>> = HashMap::new();
        for &(p, c) in pairs {
            map.entry(PersonId::new(p)).or_default().push(PersonId::new(c));
        }
        map
    }

    #[test]
    fn acyclic_chain_suppresses_nothing() {
        let got = suppressed_back_edges(&ids(&[0, 1, 2]), &edges(&[(0, 1), (1, 2)]));
        assert!(got.is_empty());
    }

    #[test]
    fn two_cycle_drops_exactly_one_direction() {
        let got = suppressed_back_edges(&ids(&[0, 1]), &edges(&[(0, 1), (1, 0)]));
        assert_eq!(got.len(), 1);
        assert!(got.contains(&(PersonId::new(1), PersonId::new(0))));
    }

    #[test]
    fn self_loop_is_a_back_edge() {
        let got = suppressed_back_edges(&ids(&[0]), &edges(&[(0, 0)]));
        assert!(got.contains(&(PersonId::new(0), PersonId::new(0))));
    }

    #[test]
    fn diamond_is_not_a_cycle() {
        // Two paths to the same node are fine; only active-stack hits count.
        let got = suppressed_back_edges(&ids(&[0, 1, 2, 3]), &edges(&[(0, 1), (0, 2), (1, 3), (2, 3)]));
        assert!(got.is_empty());
    }

    #[test]
    fn long_cycle_keeps_everyone_reachable() {
        let got = suppressed_back_edges(&ids(&[0, 1, 2, 3]), &edges(&[(0, 1), (1, 2), (2, 3), (3, 1)]));
        assert_eq!(got.len(), 1);
        assert!(got.contains(&(PersonId::new(3), PersonId::new(1))));
    }

    #[test]
    fn deep_chain_is_stack_safe() {
        let n = 50_000u32;
        let id_vec: Vec<u32> = (0..n).collect();
        let pair_vec: Vec<(u32, u32)> = (0..n - 1).map(|i| (i, i + 1)).collect();
        let got = suppressed_back_edges(&ids(&id_vec), &edges(&pair_vec));
        assert!(got.is_empty());
    }
}
