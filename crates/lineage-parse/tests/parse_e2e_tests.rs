//! Parse pipeline E2E tests

use lineage_model::EdgeKind;
use lineage_parse::{parse_lineage, ParseSession};

const FAMILY: &str = "\
Patrick McGinty (1884-1951) & Nora McGinty (1890-?)
    Margaret (Peggy) & James Brannigan (1910-1980)
        Timothy (b. 1936)
        Rose (1938)
    Edward (1912-1912) (stillborn)
Walter Doyle - Frances Doyle (divorced)
    Joan (1940)
";

#[test]
fn full_fixture_parses_without_warnings() {
    let out = parse_lineage(FAMILY);
    assert!(out.warnings.is_empty(), "warnings: {:?}", out.warnings);
    assert!(!out.is_empty());

    let names: Vec<&str> = out
        .individuals
        .iter()
        .map(|i| i.display_name.as_str())
        .collect();
    assert!(names.contains(&"Patrick McGinty"));
    // Peggy's child inherits her husband's surname, not McGinty.
    assert!(names.contains(&"Timothy Brannigan"));
    assert!(names.contains(&"Rose Brannigan"));
    // Edward inherits from male primary Patrick.
    assert!(names.contains(&"Edward McGinty"));
    assert!(names.contains(&"Joan Doyle"));
}

#[test]
fn stillborn_child_has_equal_birth_and_death_years() {
    let out = parse_lineage(FAMILY);
    let edward = out
        .individuals
        .iter()
        .find(|i| i.display_name == "Edward McGinty")
        .expect("Edward parsed");
    // The explicit lifespan wins; the stillborn marker would have set
    // death = birth anyway.
    assert_eq!(edward.birth_year, Some(1912));
    assert_eq!(edward.death_year, Some(1912));
}

#[test]
fn dash_shorthand_divorce_produces_ex_spouse_edge() {
    let out = parse_lineage(FAMILY);
    let walter = out
        .individuals
        .iter()
        .find(|i| i.display_name == "Walter Doyle")
        .expect("Walter parsed");
    let kinds: Vec<EdgeKind> = out
        .edges
        .iter()
        .filter(|e| e.kind.is_spousal() && e.partner_of(walter.temp_id).is_some())
        .map(|e| e.kind)
        .collect();
    assert_eq!(kinds, vec![EdgeKind::ExSpouse]);
}

#[test]
fn every_edge_references_a_parsed_individual() {
    let out = parse_lineage(FAMILY);
    let ids: Vec<_> = out.individuals.iter().map(|i| i.temp_id).collect();
    for edge in &out.edges {
        assert!(ids.contains(&edge.source_temp_id), "dangling source: {edge:?}");
        assert!(ids.contains(&edge.target_temp_id), "dangling target: {edge:?}");
    }
}

#[test]
fn no_duplicate_edge_triples() {
    let out = parse_lineage(FAMILY);
    let mut keys: Vec<_> = out.edges.iter().map(|e| e.identity_key()).collect();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), out.edges.len());
}

#[test]
fn two_sessions_agree() {
    let a = ParseSession::new().parse(FAMILY);
    let b = ParseSession::new().parse(FAMILY);
    assert_eq!(a, b);
}

#[test]
fn union_years_reach_the_edge() {
    let out = parse_lineage("Ann Cole & Ben Cole (m. 1936) (div. 1950)");
    let edge = out
        .edges
        .iter()
        .find(|e| e.kind == EdgeKind::ExSpouse)
        .expect("ex-spouse edge");
    assert_eq!(edge.start_year, Some(1936));
    assert_eq!(edge.end_year, Some(1950));
}

#[test]
fn mixed_garbage_lines_do_not_abort_the_parse() {
    let out = parse_lineage("???\nAnn Cole\n  -\n  Ben\n%%%%\n");
    assert_eq!(out.warnings.len(), 3);
    assert_eq!(out.individuals.len(), 2);
}
