//! Forest walk: parsed lines become individuals and typed edges
//!
//! The assembler walks the indentation forest with an explicit work stack,
//! materializing individuals through the identity resolver and emitting
//! parent and spouse edges. Each frame carries the co-parent ids and the
//! surname its children inherit; only the primary plus the LAST listed
//! spouse act as co-parents of the frame's children — earlier, superseded
//! spouses do not.

use std::collections::HashSet;

use lineage_model::{Individual, PersonId, RelationshipEdge};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::identity::{
    apply_surname, inherit_surname, is_first_name_only, GenderLookup, IdentityResolver,
    NameFrequencyTable,
};
use crate::indent::{build_forest, measure_indent, Forest};
use crate::line::{LineOutcome, LineParser, ParsedLine};

/// Everything one parse invocation produces. Warnings are non-fatal; zero
/// individuals is the only condition a caller must treat as hard failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseOutcome {
    pub individuals: Vec<Individual>,
    pub edges: Vec<RelationshipEdge>,
    pub warnings: Vec<String>,
}

impl ParseOutcome {
    /// True when a caller should treat the parse as failed.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }
}

/// One parse invocation's id namespace and heuristics.
///
/// The temp-id counter lives inside the per-call resolver, never in the
/// session and never in a global, so a session is freely shareable across
/// callers that each own their input snapshot.
pub struct ParseSession {
    lines: LineParser,
    lookup: Box<dyn GenderLookup + Send + Sync>,
}

impl ParseSession {
    pub fn new() -> Self {
        Self::with_lookup(Box::new(NameFrequencyTable::new()))
    }

    pub fn with_lookup(lookup: Box<dyn GenderLookup + Send + Sync>) -> Self {
        Self {
            lines: LineParser::new(),
            lookup,
        }
    }

    /// Parse indented genealogical text into individuals + edges.
    pub fn parse(&self, text: &str) -> ParseOutcome {
        let mut warnings = Vec::new();

        let mut items = Vec::new();
        for (line_no, raw_line) in text.lines().enumerate() {
            if raw_line.trim().is_empty() {
                continue;
            }
            let (indent, content) = measure_indent(raw_line);
            match self.lines.parse(content) {
                LineOutcome::Person(parsed) => items.push((indent, *parsed)),
                LineOutcome::Unparseable { reason } => {
                    let message = format!("line {}: skipped ({reason})", line_no + 1);
                    warn!(line = line_no + 1, %reason, "skipping unparseable line");
                    warnings.push(message);
                }
            }
        }

        let forest = build_forest(items);
        let mut resolver = IdentityResolver::new(self.lookup.as_ref());
        let edges = assemble(&forest, &mut resolver);

        let individuals = resolver.into_individuals();
        if individuals.is_empty() {
            warnings.push("no individuals could be parsed".to_string());
        }
        debug!(
            individuals = individuals.len(),
            edges = edges.len(),
            warnings = warnings.len(),
            "parse complete"
        );

        ParseOutcome {
            individuals,
            edges,
            warnings,
        }
    }
}

impl Default for ParseSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Assembly context for one forest node.
struct Frame {
    node: usize,
    co_parents: Vec<PersonId>,
    inherited_surname: Option<String>,
}

/// Pre-order walk with an explicit stack; large imports must not exhaust
/// the call stack.
fn assemble(forest: &Forest<ParsedLine>, resolver: &mut IdentityResolver<'_>) -> Vec<RelationshipEdge> {
    let mut edges: Vec<RelationshipEdge> = Vec::new();
    let mut seen: HashSet<(PersonId, PersonId, lineage_model::EdgeKind)> = HashSet::new();
    let mut push_edge = |edges: &mut Vec<RelationshipEdge>, edge: RelationshipEdge| {
        if seen.insert(edge.identity_key()) {
            edges.push(edge);
        }
    };

    let mut stack: Vec<Frame> = forest
        .roots
        .iter()
        .rev()
        .map(|&node| Frame {
            node,
            co_parents: Vec::new(),
            inherited_surname: None,
        })
        .collect();

    while let Some(frame) = stack.pop() {
        let node = &forest.nodes[frame.node];
        let line = &node.payload;

        // Amend a first-name-only child with the surname its frame carries.
        let primary_name = match (&frame.inherited_surname, is_first_name_only(&line.primary.display_name)) {
            (Some(surname), true) => apply_surname(&line.primary.display_name, surname),
            _ => line.primary.display_name.clone(),
        };
        let primary_id = resolver.resolve_named(
            &primary_name,
            line.primary.birth_year,
            line.primary.death_year,
        );

        for &parent in &frame.co_parents {
            push_edge(
                &mut edges,
                RelationshipEdge::parental(parent, primary_id, line.child_link),
            );
        }

        let mut last_spouse: Option<PersonId> = None;
        let mut last_spouse_name: Option<&str> = None;
        for union in &line.unions {
            let spouse_id = resolver.resolve(&union.segment);
            push_edge(
                &mut edges,
                RelationshipEdge::spouse_between(
                    primary_id,
                    spouse_id,
                    union.kind,
                    union.start_year,
                    union.end_year,
                ),
            );
            last_spouse = Some(spouse_id);
            last_spouse_name = Some(&union.segment.display_name);
        }

        // Children of this line: primary + last-listed spouse only.
        let mut co_parents = vec![primary_id];
        co_parents.extend(last_spouse);

        let primary_gender = resolver.gender_of(primary_id);
        let partner = last_spouse.map(|id| {
            (
                last_spouse_name.unwrap_or_default(),
                resolver.gender_of(id),
            )
        });
        let child_surname = inherit_surname(
            &primary_name,
            primary_gender,
            partner,
            frame.inherited_surname.as_deref(),
        );

        for &child in node.children.iter().rev() {
            stack.push(Frame {
                node: child,
                co_parents: co_parents.clone(),
                inherited_surname: child_surname.clone(),
            });
        }
    }

    edges
}
