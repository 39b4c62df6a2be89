//! FILENAME: core/olap-model/src/dimension.rs
//! PURPOSE: The Dimension facade.
//! CONTEXT: Wraps one catalog dimension handle. Knows its hierarchies, the
//! dimension-default-hierarchy convention (a hierarchy named like the
//! dimension), and the closed dimension-type mapping.

use catalog::{DimensionKind, DimensionRef, SchemaReader};
use once_cell::unsync::OnceCell;

use crate::hierarchy::Hierarchy;

/// Dimension type as presented to callers.
///
/// `Unknown` is a real value, not an absence: it marks a catalog kind this
/// model does not recognize, so callers can tell "no mapped type" apart
/// from "dimension not found".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionType {
    Standard,
    Time,
    Measures,
    Unknown,
}

/// A dimension of a cube. Immutable view; name, full name, and hierarchies
/// are computed once per instance.
pub struct Dimension<'c> {
    reader: &'c dyn SchemaReader,
    raw: DimensionRef,
    name: OnceCell<String>,
    full_name: OnceCell<String>,
    hierarchies: OnceCell<Vec<Hierarchy<'c>>>,
}

impl<'c> Dimension<'c> {
    pub(crate) fn new(reader: &'c dyn SchemaReader, raw: DimensionRef) -> Self {
        Dimension {
            reader,
            raw,
            name: OnceCell::new(),
            full_name: OnceCell::new(),
            hierarchies: OnceCell::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.name.get_or_init(|| self.raw.name().to_string())
    }

    /// The bracketed unique name, e.g. `[Store]`.
    pub fn full_name(&self) -> &str {
        self.full_name
            .get_or_init(|| self.raw.unique_name().to_string())
    }

    /// The dimension's hierarchies, in catalog order.
    pub fn hierarchies(&self) -> &[Hierarchy<'c>] {
        self.hierarchies.get_or_init(|| {
            self.raw
                .hierarchies()
                .into_iter()
                .map(|h| Hierarchy::new(self.reader, h))
                .collect()
        })
    }

    pub fn hierarchy_names(&self) -> Vec<String> {
        self.hierarchies()
            .iter()
            .map(|h| h.name().to_string())
            .collect()
    }

    /// The hierarchy with the given name, or with the dimension's own name
    /// when `None` (the dimension-default-hierarchy convention).
    pub fn hierarchy(&self, name: Option<&str>) -> Option<&Hierarchy<'c>> {
        let target = name.unwrap_or_else(|| self.name());
        self.hierarchies().iter().find(|h| h.name() == target)
    }

    /// Whether this is the catalog's reserved measures dimension.
    pub fn is_measures(&self) -> bool {
        self.raw.is_measures()
    }

    /// Maps the catalog's dimension kind onto the closed set of types.
    pub fn dimension_type(&self) -> DimensionType {
        match self.raw.dimension_kind() {
            DimensionKind::Standard => DimensionType::Standard,
            DimensionKind::Time => DimensionType::Time,
            DimensionKind::Measures => DimensionType::Measures,
            DimensionKind::Other => DimensionType::Unknown,
        }
    }
}
