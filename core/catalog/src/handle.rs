//! FILENAME: core/catalog/src/handle.rs
//! PURPOSE: Opaque handle traits and the schema-reader interface.
//! CONTEXT: Facades never see a concrete catalog type. They hold reference-
//! counted trait objects for the schema entities and a `SchemaReader` for
//! every navigation query. Handles are immutable views; the catalog owns
//! their lifecycle.
//!
//! This layer is single-threaded by design (`Rc`, no interior locking).
//! Callers that share a catalog across threads must synchronize externally.

use serde::{Deserialize, Serialize};
use std::rc::Rc;

pub type CubeRef = Rc<dyn CubeHandle>;
pub type DimensionRef = Rc<dyn DimensionHandle>;
pub type HierarchyRef = Rc<dyn HierarchyHandle>;
pub type LevelRef = Rc<dyn LevelHandle>;
pub type MemberRef = Rc<dyn MemberHandle>;

/// The catalog's dimension-kind tag.
///
/// `Other` carries kinds this model does not recognize, so the facade layer
/// can surface "unknown kind" instead of silently dropping it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DimensionKind {
    Standard,
    Time,
    Measures,
    Other,
}

impl Default for DimensionKind {
    fn default() -> Self {
        DimensionKind::Standard
    }
}

/// A cube in the catalog.
pub trait CubeHandle {
    fn name(&self) -> &str;

    /// The cube's dimensions in catalog order.
    fn dimensions(&self) -> Vec<DimensionRef>;
}

/// A dimension of a cube.
pub trait DimensionHandle {
    fn name(&self) -> &str;

    /// Bracketed unique name, e.g. `[Store]`.
    fn unique_name(&self) -> &str;

    /// The dimension's hierarchies in catalog order.
    fn hierarchies(&self) -> Vec<HierarchyRef>;

    /// Whether this is the catalog's reserved measures dimension.
    fn is_measures(&self) -> bool;

    fn dimension_kind(&self) -> DimensionKind;
}

/// A hierarchy of a dimension.
pub trait HierarchyHandle {
    fn name(&self) -> &str;

    /// Bracketed unique name, e.g. `[Store]` or `[Time].[Weekly]`.
    fn unique_name(&self) -> &str;

    /// Levels ordered from root to leaf, including the synthetic all level
    /// when `has_all` is true.
    fn levels(&self) -> Vec<LevelRef>;

    /// Whether the hierarchy has a synthetic "All" root level.
    fn has_all(&self) -> bool;

    /// The synthetic all member. Present exactly when `has_all` is true.
    fn all_member(&self) -> Option<MemberRef>;
}

/// One level of a hierarchy.
pub trait LevelHandle {
    fn name(&self) -> &str;

    /// The next level down, or `None` at the leaf level.
    fn child_level(&self) -> Option<LevelRef>;
}

/// A member of a hierarchy.
pub trait MemberHandle {
    fn name(&self) -> &str;

    /// Bracketed unique name, e.g. `[Store].[All Stores].[USA]`.
    fn unique_name(&self) -> &str;

    /// Depth within the hierarchy. The all member is depth 0; each
    /// generation below a member is exactly one deeper.
    fn depth(&self) -> u32;

    fn level(&self) -> LevelRef;
}

/// Scope for a compound member lookup.
///
/// A cube-scoped lookup resolves its first segment as a dimension name; a
/// hierarchy-scoped lookup resolves its first segment among the
/// hierarchy's entry members.
pub enum LookupScope<'a> {
    Cube(&'a dyn CubeHandle),
    Hierarchy(&'a dyn HierarchyHandle),
}

/// Navigation queries against the catalog.
///
/// Every lookup is non-strict: an unresolved name is an absent result,
/// never an error.
pub trait SchemaReader {
    /// Resolves a cube by name.
    fn lookup_cube(&self, name: &str) -> Option<CubeRef>;

    /// The hierarchy's root members: the all member's children when an all
    /// member exists, otherwise the externally defined top members.
    fn hierarchy_root_members(&self, hierarchy: &dyn HierarchyHandle) -> Vec<MemberRef>;

    /// Compound member lookup by plain (unbracketed) segment names.
    fn lookup_member(&self, scope: LookupScope<'_>, segments: &[&str]) -> Option<MemberRef>;

    /// Direct children of a member, in catalog order.
    fn member_children(&self, member: &dyn MemberHandle) -> Vec<MemberRef>;

    /// Whether the member has at least one navigable child.
    fn is_drillable(&self, member: &dyn MemberHandle) -> bool;
}
