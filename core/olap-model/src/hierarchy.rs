//! FILENAME: core/olap-model/src/hierarchy.rs
//! PURPOSE: The Hierarchy facade.
//! CONTEXT: Wraps one catalog hierarchy handle. Root members always come
//! from the schema reader, never through the all member, even when one
//! exists; `child_names` is the operation that treats the all member as
//! the implicit parent.

use catalog::{HierarchyRef, LookupScope, SchemaReader};
use once_cell::unsync::OnceCell;

use crate::member::Member;

/// A hierarchy of a dimension. Immutable view; the name is computed once
/// per instance.
pub struct Hierarchy<'c> {
    reader: &'c dyn SchemaReader,
    raw: HierarchyRef,
    name: OnceCell<String>,
}

impl<'c> Hierarchy<'c> {
    pub(crate) fn new(reader: &'c dyn SchemaReader, raw: HierarchyRef) -> Self {
        Hierarchy {
            reader,
            raw,
            name: OnceCell::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.name.get_or_init(|| self.raw.name().to_string())
    }

    /// Level names ordered from root to leaf.
    pub fn level_names(&self) -> Vec<String> {
        self.raw
            .levels()
            .iter()
            .map(|l| l.name().to_string())
            .collect()
    }

    /// Whether the hierarchy has a synthetic "All" root level.
    pub fn has_all(&self) -> bool {
        self.raw.has_all()
    }

    /// The all member's name. Present only when `has_all` is true.
    pub fn all_member_name(&self) -> Option<String> {
        if self.raw.has_all() {
            self.raw.all_member().map(|m| m.name().to_string())
        } else {
            None
        }
    }

    /// Root members, straight from the schema reader.
    pub fn root_members(&self) -> Vec<Member<'c>> {
        self.reader
            .hierarchy_root_members(self.raw.as_ref())
            .into_iter()
            .map(|raw| Member::new(self.reader, raw))
            .collect()
    }

    pub fn root_member_names(&self) -> Vec<String> {
        self.reader
            .hierarchy_root_members(self.raw.as_ref())
            .iter()
            .map(|m| m.name().to_string())
            .collect()
    }

    pub fn root_member_full_names(&self) -> Vec<String> {
        self.reader
            .hierarchy_root_members(self.raw.as_ref())
            .iter()
            .map(|m| m.unique_name().to_string())
            .collect()
    }

    /// Names of the children under the parent named by `parent`, given as
    /// plain segment names.
    ///
    /// With an empty `parent`: when the hierarchy has no all member the
    /// root member names are returned as-is; otherwise the all member is
    /// the implicit parent. Absent when the parent cannot be resolved.
    pub fn child_names(&self, parent: &[&str]) -> Option<Vec<String>> {
        let parent_member = if parent.is_empty() {
            if !self.raw.has_all() {
                return Some(self.root_member_names());
            }
            self.raw.all_member()?
        } else {
            self.reader
                .lookup_member(LookupScope::Hierarchy(self.raw.as_ref()), parent)?
        };
        Some(
            self.reader
                .member_children(parent_member.as_ref())
                .iter()
                .map(|m| m.name().to_string())
                .collect(),
        )
    }
}
