//! Indentation tree building
//!
//! Ordered lines plus leading whitespace become a rooted forest: a line
//! attaches under the nearest still-open line with strictly smaller
//! indentation, equal indentation makes siblings. Tabs count as 4 columns.
//! No single global root is required.

/// Tab stop width in normalized columns.
const TAB_COLUMNS: usize = 4;

/// A forest over arbitrary payloads, nodes addressed by index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forest<T> {
    pub nodes: Vec<ForestNode<T>>,
    pub roots: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForestNode<T> {
    pub payload: T,
    pub children: Vec<usize>,
}

impl<T> Forest<T> {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Measure leading whitespace in normalized columns and return the rest of
/// the line.
pub fn measure_indent(line: &str) -> (usize, &str) {
    let mut columns = 0usize;
    for (i, ch) in line.char_indices() {
        match ch {
            ' ' => columns += 1,
            '\t' => columns += TAB_COLUMNS,
            _ => return (columns, &line[i..]),
        }
    }
    (columns, "")
}

/// Build a forest from (indent, payload) pairs in document order.
///
/// A stack of open nodes tracks ancestry; attachment pops to the nearest
/// open node with strictly smaller indentation.
pub fn build_forest<T>(items: Vec<(usize, T)>) -> Forest<T> {
    let mut forest = Forest {
        nodes: Vec::with_capacity(items.len()),
        roots: Vec::new(),
    };
    // (indent, node index) for the chain of open ancestors.
    let mut open: Vec<(usize, usize)> = Vec::new();

    for (indent, payload) in items {
        let idx = forest.nodes.len();
        forest.nodes.push(ForestNode {
            payload,
            children: Vec::new(),
        });

        while matches!(open.last(), Some(&(d, _)) if d >= indent) {
            open.pop();
        }
        match open.last() {
            Some(&(_, parent)) => forest.nodes[parent].children.push(idx),
            None => forest.roots.push(idx),
        }
        open.push((indent, idx));
    }

    forest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names<'a>(forest: &Forest<&'a str>, ids: &[usize]) -> Vec<&'a str> {
        ids.iter().map(|&i| forest.nodes[i].payload).collect()
    }

    #[test]
    fn measures_tabs_as_four_columns() {
        assert_eq!(measure_indent("\tBob"), (4, "Bob"));
        assert_eq!(measure_indent("  \tBob"), (6, "Bob"));
        assert_eq!(measure_indent("Bob"), (0, "Bob"));
        assert_eq!(measure_indent("   "), (3, ""));
    }

    #[test]
    fn equal_indent_makes_siblings() {
        let forest = build_forest(vec![(0, "gp"), (4, "a"), (4, "b"), (8, "a1")]);
        assert_eq!(names(&forest, &forest.roots), vec!["gp"]);
        assert_eq!(names(&forest, &forest.nodes[0].children), vec!["a", "b"]);
        // a1 is indented past b, so it attaches under b, not a.
        assert_eq!(names(&forest, &forest.nodes[2].children), vec!["a1"]);
        assert!(forest.nodes[1].children.is_empty());
    }

    #[test]
    fn dedent_attaches_to_nearest_smaller_open_node() {
        let forest = build_forest(vec![(0, "r"), (4, "a"), (8, "a1"), (2, "odd")]);
        // 2 columns is smaller than a's 4, so "odd" pops back to the root.
        assert_eq!(names(&forest, &forest.nodes[0].children), vec!["a", "odd"]);
    }

    #[test]
    fn multiple_roots_form_a_forest() {
        let forest = build_forest(vec![(0, "x"), (4, "x1"), (0, "y")]);
        assert_eq!(names(&forest, &forest.roots), vec!["x", "y"]);
    }

    #[test]
    fn deep_nesting_does_not_recurse() {
        // Purely iterative; thousands of levels must not blow the stack.
        let items: Vec<(usize, usize)> = (0..10_000).map(|i| (i, i)).collect();
        let forest = build_forest(items);
        assert_eq!(forest.roots.len(), 1);
        assert_eq!(forest.nodes[9_998].children, vec![9_999]);
    }
}
