//! Shared data model for the lineage core
//!
//! Everything downstream of the parser speaks in terms of these types:
//! `Individual` records keyed by session-scoped `PersonId`s, and a flat
//! `RelationshipEdge` list connecting them. The model is deliberately
//! storage-agnostic: a persistence collaborator re-identifies individuals
//! with durable ids after parsing, so nothing here assumes ids survive
//! beyond one parse invocation.
//!
//! Wire shape: all public types serialize with camelCase field names so the
//! JSON seen by external collaborators matches the documented contract
//! (`tempId`, `birthYear`, ...).

use serde::{Deserialize, Serialize};

/// Session-scoped temporary person id (4 bytes).
///
/// Valid only within the parse invocation that allocated it; a storage
/// collaborator replaces it with a durable identifier on import.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct PersonId(u32);

impl PersonId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// Tri-state inferred gender.
///
/// Inferred from first-name frequency tables, never authoritative; graph
/// logic must tolerate `Unknown` everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Unknown,
}

impl Default for Gender {
    fn default() -> Self {
        Self::Unknown
    }
}

/// One parsed person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Individual {
    pub temp_id: PersonId,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_year: Option<i32>,
    #[serde(default)]
    pub gender: Gender,
}

/// Relationship edge kind.
///
/// Parent kinds are directed parent→child. Spouse kinds are logically
/// undirected: stored once (see [`RelationshipEdge::spouse_between`]) and
/// treated symmetrically by every reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeKind {
    BiologicalParent,
    AdoptiveParent,
    StepParent,
    Spouse,
    ExSpouse,
    Partner,
}

impl EdgeKind {
    /// True for the directed parent→child kinds.
    pub fn is_parental(self) -> bool {
        matches!(
            self,
            EdgeKind::BiologicalParent | EdgeKind::AdoptiveParent | EdgeKind::StepParent
        )
    }

    /// True for the undirected union kinds.
    pub fn is_spousal(self) -> bool {
        matches!(self, EdgeKind::Spouse | EdgeKind::ExSpouse | EdgeKind::Partner)
    }
}

/// A typed relationship between two individuals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipEdge {
    pub source_temp_id: PersonId,
    pub target_temp_id: PersonId,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_year: Option<i32>,
}

impl RelationshipEdge {
    /// Directed parent→child edge.
    pub fn parental(parent: PersonId, child: PersonId, kind: EdgeKind) -> Self {
        debug_assert!(kind.is_parental());
        Self {
            source_temp_id: parent,
            target_temp_id: child,
            kind,
            start_year: None,
            end_year: None,
        }
    }

    /// Spouse-kind edge, canonicalized lower-id-first so the undirected pair
    /// has exactly one stored representation.
    pub fn spouse_between(
        a: PersonId,
        b: PersonId,
        kind: EdgeKind,
        start_year: Option<i32>,
        end_year: Option<i32>,
    ) -> Self {
        debug_assert!(kind.is_spousal());
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        Self {
            source_temp_id: lo,
            target_temp_id: hi,
            kind,
            start_year,
            end_year,
        }
    }

    /// Given one endpoint of a spousal edge, the other endpoint.
    pub fn partner_of(&self, id: PersonId) -> Option<PersonId> {
        if !self.kind.is_spousal() {
            return None;
        }
        if self.source_temp_id == id {
            Some(self.target_temp_id)
        } else if self.target_temp_id == id {
            Some(self.source_temp_id)
        } else {
            None
        }
    }

    /// Dedup key: spousal pairs are order-insensitive.
    pub fn identity_key(&self) -> (PersonId, PersonId, EdgeKind) {
        if self.kind.is_spousal() && self.target_temp_id < self.source_temp_id {
            (self.target_temp_id, self.source_temp_id, self.kind)
        } else {
            (self.source_temp_id, self.target_temp_id, self.kind)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spouse_edges_are_canonicalized() {
        let a = PersonId::new(7);
        let b = PersonId::new(2);
        let e = RelationshipEdge::spouse_between(a, b, EdgeKind::Spouse, Some(1950), None);
        assert_eq!(e.source_temp_id, b);
        assert_eq!(e.target_temp_id, a);
        assert_eq!(e.partner_of(a), Some(b));
        assert_eq!(e.partner_of(b), Some(a));
        assert_eq!(e.partner_of(PersonId::new(9)), None);
    }

    #[test]
    fn identity_key_ignores_spouse_order() {
        let e1 = RelationshipEdge::spouse_between(
            PersonId::new(1),
            PersonId::new(2),
            EdgeKind::ExSpouse,
            None,
            None,
        );
        let e2 = RelationshipEdge::spouse_between(
            PersonId::new(2),
            PersonId::new(1),
            EdgeKind::ExSpouse,
            None,
            None,
        );
        assert_eq!(e1.identity_key(), e2.identity_key());
    }

    #[test]
    fn edge_serializes_with_contract_field_names() {
        let e = RelationshipEdge::parental(
            PersonId::new(0),
            PersonId::new(1),
            EdgeKind::BiologicalParent,
        );
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["sourceTempId"], 0);
        assert_eq!(json["targetTempId"], 1);
        assert_eq!(json["type"], "biological-parent");
        assert!(json.get("startYear").is_none());
    }
}
