//! Integration tests for the complete lineage pipeline
//!
//! These tests verify end-to-end functionality across crates:
//! - text → parse → individuals + edges
//! - edges → graph views (components, roots, slices, unions)
//! - graph → kinship labels
//!
//! Run with: cargo test --test integration_tests

use lineage_graph::FamilyGraph;
use lineage_kinship::find_kinship;
use lineage_model::{EdgeKind, PersonId};
use lineage_parse::{parse_lineage, ParseOutcome};

fn id_of(out: &ParseOutcome, name: &str) -> PersonId {
    out.individuals
        .iter()
        .find(|i| i.display_name == name)
        .unwrap_or_else(|| panic!("{name} not parsed"))
        .temp_id
}

// ============================================================================
// Text → graph → views, one realistic family
// ============================================================================

const BRANNIGAN: &str = "\
Patrick McGinty (1884-1951) & Nora McGinty (1890-?)
    Margaret (Peggy) McGinty & James Brannigan (1910-1980)
        Jim (1936-2006) & Charlene (Divorced) & Sharon
            Kevin (b. 1961)
        Timothy (b. 1938)
    Edward (1912-?)
";

#[test]
fn pipeline_produces_a_coherent_graph() {
    let out = parse_lineage(BRANNIGAN);
    assert!(out.warnings.is_empty(), "warnings: {:?}", out.warnings);

    let graph = FamilyGraph::build(&out.individuals, &out.edges);

    // Everyone is one connected component.
    let component = graph
        .connected_component(id_of(&out, "Kevin Brannigan"))
        .unwrap();
    assert_eq!(component.len() as usize, out.individuals.len());

    // Patrick has the most descendants and no parents: he roots the tree.
    assert_eq!(graph.select_root(), Some(id_of(&out, "Patrick McGinty")));
}

#[test]
fn ex_spouse_is_recorded_but_not_a_co_parent() {
    let out = parse_lineage(BRANNIGAN);
    let graph = FamilyGraph::build(&out.individuals, &out.edges);

    let jim = id_of(&out, "Jim Brannigan");
    let unions = graph.unions_of(jim).unwrap();
    assert_eq!(unions.len(), 2);
    assert!(unions.iter().any(|u| u.kind == EdgeKind::ExSpouse));
    assert!(unions.iter().any(|u| u.kind == EdgeKind::Spouse));

    let kevin = id_of(&out, "Kevin Brannigan");
    let charlene = id_of(&out, "Charlene");
    let parent_ids: Vec<PersonId> = out
        .edges
        .iter()
        .filter(|e| e.kind.is_parental() && e.target_temp_id == kevin)
        .map(|e| e.source_temp_id)
        .collect();
    assert!(!parent_ids.contains(&charlene));
    assert!(parent_ids.contains(&id_of(&out, "Sharon")));
}

#[test]
fn kinship_end_to_end() {
    let out = parse_lineage(BRANNIGAN);
    let graph = FamilyGraph::build(&out.individuals, &out.edges);

    let kevin = id_of(&out, "Kevin Brannigan");
    let timothy = id_of(&out, "Timothy Brannigan");
    let kin = find_kinship(&graph, kevin, timothy).unwrap().expect("related");
    assert_eq!(kin.label, "niece/nephew");

    let edward = id_of(&out, "Edward McGinty");
    let kin = find_kinship(&graph, timothy, edward).unwrap().expect("related");
    assert_eq!(kin.label, "niece/nephew");
}

#[test]
fn ancestor_slice_feeds_rendering_without_siblings() {
    let out = parse_lineage(BRANNIGAN);
    let graph = FamilyGraph::build(&out.individuals, &out.edges);

    let kevin = id_of(&out, "Kevin Brannigan");
    let slice = graph.ancestor_slice(kevin).unwrap();
    assert!(!slice.members.contains(&id_of(&out, "Timothy Brannigan")));
    assert!(!slice.members.contains(&id_of(&out, "Edward McGinty")));
    assert!(slice.members.contains(&id_of(&out, "Patrick McGinty")));
}

#[test]
fn parse_outcome_round_trips_through_json() -> anyhow::Result<()> {
    let out = parse_lineage(BRANNIGAN);
    let json = serde_json::to_string(&out)?;
    let back: ParseOutcome = serde_json::from_str(&json)?;
    assert_eq!(out, back);
    Ok(())
}

// ============================================================================
// Malformed input stays usable end to end
// ============================================================================

#[test]
fn garbage_heavy_input_still_yields_views() {
    let text = "???\nAda Vale\n    Bo\n    ---\n        deeper under garbage\nNell Kerr\n";
    let out = parse_lineage(text);
    assert!(!out.is_empty());
    assert_eq!(out.warnings.len(), 2);

    let graph = FamilyGraph::build(&out.individuals, &out.edges);
    assert!(graph.select_root().is_some());
}

#[test]
fn edges_into_a_filtered_subset_are_dropped_silently() {
    let out = parse_lineage("Ada Vale & Ned Vale\n    Bo\n");
    // Render only Ada and Bo: the spouse edge to Ned and Ned's parent edge
    // dangle and must vanish without a warning.
    let subset: Vec<_> = out
        .individuals
        .iter()
        .filter(|i| i.display_name != "Ned Vale")
        .cloned()
        .collect();
    let graph = FamilyGraph::build(&subset, &out.edges);
    assert_eq!(graph.spousal_edges().len(), 0);
    assert_eq!(graph.parental_edges().len(), 1);
}
