//! Graph views over parsed lineage data
//!
//! Consumes the individuals + edges snapshot the parser produces and
//! answers the questions rendering/storage collaborators ask: which ids are
//! connected, where to root a drawing, what the strict ancestor/descendant
//! lineage of one person is, and in what order to show their unions.
//!
//! Everything is a pure function of one immutable snapshot. Malformed data
//! (ancestry cycles, dangling edges) is tolerated by construction: dangling
//! edges are dropped while indexing, and cycle suppression guarantees the
//! acyclic views terminate. The only error this crate produces is a focus
//! id the snapshot does not contain — a caller contract violation, not a
//! data-quality problem.

pub mod adjacency;
pub mod component;
pub mod cycles;
pub mod roots;
pub mod slice;
pub mod unions;

use lineage_model::PersonId;
use thiserror::Error;

pub use adjacency::FamilyGraph;
pub use slice::LineageSlice;
pub use unions::Union;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("unknown individual {0}")]
    UnknownIndividual(PersonId),
}
