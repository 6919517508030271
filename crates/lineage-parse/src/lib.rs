//! Forgiving genealogical text parser
//!
//! Turns hand-typed, indented family-tree notation into a typed relationship
//! graph: individuals keyed by session-scoped temp ids plus parent/spouse
//! edges, ready for the graph and kinship crates (and for a storage
//! collaborator to re-identify durably).
//!
//! The pipeline, leaf-first:
//! - [`annotation`]: dates/nicknames/markers out of parenthetical groups
//! - [`line`]: one line → primary individual + unions
//! - [`indent`]: ordered lines + leading whitespace → rooted forest
//! - [`identity`]: dedup by name+birth-year, gender inference, surnames
//! - [`assemble`]: forest walk emitting typed edges
//!
//! Nothing in this crate performs I/O or throws for data-quality problems:
//! bad lines become warnings, and the only hard-failure signal a caller must
//! honor is an outcome with zero individuals.

pub mod annotation;
pub mod assemble;
pub mod identity;
pub mod indent;
pub mod line;

pub use annotation::{Annotated, AnnotationExtractor};
pub use assemble::{ParseOutcome, ParseSession};
pub use identity::{GenderLookup, NameFrequencyTable};
pub use indent::{build_forest, measure_indent, Forest, ForestNode};
pub use line::{LineOutcome, LineParser, ParsedLine, ParsedSegment, ParsedUnion};

/// Parse with the default heuristics. Shorthand for
/// `ParseSession::new().parse(text)`.
pub fn parse_lineage(text: &str) -> ParseOutcome {
    ParseSession::new().parse(text)
}
