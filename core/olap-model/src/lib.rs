//! FILENAME: core/olap-model/src/lib.rs
//! PURPOSE: The OLAP metadata facades.
//! CONTEXT: Four thin views over a `catalog::SchemaReader`: a Cube yields
//! Dimensions, a Dimension yields Hierarchies, a Hierarchy yields Members,
//! and a Member yields further Members. Every operation is a synchronous
//! delegation to the reader; the facades add qualified-name parsing and
//! per-instance memoization, nothing else.
//!
//! PIPELINE: SchemaReader --> Cube --> Dimension --> Hierarchy --> Member
//!
//! Lookup misses are absent values, never errors. The one exception is a
//! malformed qualified name passed to `Cube::member`, which is a
//! `QnameError` rather than a silent mis-parse.

pub mod cube;
pub mod dimension;
pub mod hierarchy;
pub mod member;

// Shared schema fixture for the facade unit tests
#[cfg(test)]
pub(crate) mod test_schema;

pub use cube::Cube;
pub use dimension::{Dimension, DimensionType};
pub use hierarchy::Hierarchy;
pub use member::Member;
