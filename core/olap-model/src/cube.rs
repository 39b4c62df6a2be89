//! FILENAME: core/olap-model/src/cube.rs
//! PURPOSE: The Cube facade.
//! CONTEXT: Entry point of the metadata model. A Cube wraps one catalog
//! cube handle, enumerates its dimensions, and resolves members by
//! bracketed qualified name.

use catalog::{CubeRef, LookupScope, SchemaReader};
use once_cell::unsync::OnceCell;
use qname::QnameError;

use crate::dimension::Dimension;
use crate::member::Member;

/// A cube of the catalog. Immutable view; name and dimensions are computed
/// once per instance, on first access.
pub struct Cube<'c> {
    reader: &'c dyn SchemaReader,
    raw: CubeRef,
    name: OnceCell<String>,
    dimensions: OnceCell<Vec<Dimension<'c>>>,
}

impl<'c> Cube<'c> {
    /// Resolves a cube by name. Absent when the catalog has no such cube.
    pub fn get(reader: &'c dyn SchemaReader, name: &str) -> Option<Cube<'c>> {
        reader.lookup_cube(name).map(|raw| Cube::new(reader, raw))
    }

    pub(crate) fn new(reader: &'c dyn SchemaReader, raw: CubeRef) -> Self {
        Cube {
            reader,
            raw,
            name: OnceCell::new(),
            dimensions: OnceCell::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.name.get_or_init(|| self.raw.name().to_string())
    }

    /// The cube's dimensions, in catalog order.
    pub fn dimensions(&self) -> &[Dimension<'c>] {
        self.dimensions.get_or_init(|| {
            self.raw
                .dimensions()
                .into_iter()
                .map(|d| Dimension::new(self.reader, d))
                .collect()
        })
    }

    pub fn dimension_names(&self) -> Vec<String> {
        self.dimensions()
            .iter()
            .map(|d| d.name().to_string())
            .collect()
    }

    /// The first dimension whose name matches exactly.
    pub fn dimension(&self, name: &str) -> Option<&Dimension<'c>> {
        self.dimensions().iter().find(|d| d.name() == name)
    }

    /// Resolves a member by its bracketed qualified name, e.g.
    /// `[Store].[USA].[CA]`.
    ///
    /// A malformed path is an error; a well-formed path that resolves to
    /// nothing is `Ok(None)`.
    pub fn member(&self, qualified_name: &str) -> Result<Option<Member<'c>>, QnameError> {
        let segments = qname::parse(qualified_name)?;
        let names: Vec<&str> = segments.iter().map(String::as_str).collect();
        Ok(self
            .reader
            .lookup_member(LookupScope::Cube(self.raw.as_ref()), &names)
            .map(|raw| Member::new(self.reader, raw)))
    }
}
