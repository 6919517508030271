//! Marriage/union timelines for one individual

use lineage_model::{EdgeKind, PersonId};
use serde::Serialize;

use crate::adjacency::FamilyGraph;
use crate::GraphError;

/// One union from a person's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Union {
    pub partner: PersonId,
    pub kind: EdgeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_year: Option<i32>,
}

impl FamilyGraph<'_> {
    /// All unions of one person, ordered by start year ascending (undated
    /// last), ties broken alphabetically by partner name.
    pub fn unions_of(&self, id: PersonId) -> Result<Vec<Union>, GraphError> {
        self.require(id)?;

        let mut unions: Vec<Union> = self
            .spousal_edges()
            .iter()
            .filter_map(|e| {
                e.partner_of(id).map(|partner| Union {
                    partner,
                    kind: e.kind,
                    start_year: e.start_year,
                    end_year: e.end_year,
                })
            })
            .collect();

        unions.sort_by(|a, b| {
            let rank = |u: &Union| match u.start_year {
                Some(y) => (false, y),
                None => (true, 0),
            };
            rank(a)
                .cmp(&rank(b))
                .then_with(|| self.partner_name(a.partner).cmp(self.partner_name(b.partner)))
        });

        Ok(unions)
    }

    fn partner_name(&self, id: PersonId) -> &str {
        self.individual(id).map_or("", |i| i.display_name.as_str())
    }
}
