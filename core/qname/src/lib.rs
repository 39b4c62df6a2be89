//! FILENAME: core/qname/src/lib.rs
//! PURPOSE: Library root for qualified member-name parsing.
//! CONTEXT: OLAP members are addressed by bracketed, dot-delimited paths
//! such as `[Store].[USA].[CA]`. This crate converts that textual form into
//! an ordered list of plain segment names, and back again.
//!
//! PIPELINE: Qualified name --> Scanner --> Segments
//!
//! SUPPORTED SYNTAX:
//! - Bracketed segments: [Store], [All Stores]
//! - A literal `.` between segments: [Store].[USA]
//! - Doubled closing bracket as an escaped literal `]`: [Store ]] Annex]

pub mod parser;


// Re-export commonly used items for convenience
pub use parser::{join, parse, quote_segment, QnameError, Segments};
