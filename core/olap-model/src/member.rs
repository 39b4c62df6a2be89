//! FILENAME: core/olap-model/src/member.rs
//! PURPOSE: The Member facade.
//! CONTEXT: Wraps one catalog member handle. Carries the only algorithm in
//! the model: the level-relative descendant walk.

use catalog::{MemberRef, SchemaReader};

/// A member of a hierarchy. Immutable view; accessors delegate straight
/// to the handle and the reader.
pub struct Member<'c> {
    reader: &'c dyn SchemaReader,
    raw: MemberRef,
}

impl<'c> Member<'c> {
    pub(crate) fn new(reader: &'c dyn SchemaReader, raw: MemberRef) -> Self {
        Member { reader, raw }
    }

    pub fn name(&self) -> &str {
        self.raw.name()
    }

    /// The bracketed qualified name, e.g. `[Store].[All Stores].[USA]`.
    pub fn full_name(&self) -> &str {
        self.raw.unique_name()
    }

    /// Depth within the hierarchy. Each generation of children is exactly
    /// one deeper.
    pub fn depth(&self) -> u32 {
        self.raw.depth()
    }

    /// Whether the catalog reports this member as having navigable
    /// children. The reader's answer is never overridden here.
    pub fn drillable(&self) -> bool {
        self.reader.is_drillable(self.raw.as_ref())
    }

    /// Direct children, in catalog order.
    pub fn children(&self) -> Vec<Member<'c>> {
        self.reader
            .member_children(self.raw.as_ref())
            .into_iter()
            .map(|raw| Member::new(self.reader, raw))
            .collect()
    }

    /// All descendants of this member at the level named `level_name`.
    ///
    /// Walks child levels from this member's own level, counting steps
    /// until a level with that name is found; the starting level itself is
    /// never compared. Absent when no descendant level carries the name.
    /// On success, the member set is widened one generation per counted
    /// step: each pass replaces the set with the union of every member's
    /// children.
    pub fn descendants_at_level(&self, level_name: &str) -> Option<Vec<Member<'c>>> {
        let mut relative_depth = 0usize;
        let mut level = self.raw.level();
        let mut found = false;
        while let Some(child) = level.child_level() {
            relative_depth += 1;
            let matches = child.name() == level_name;
            level = child;
            if matches {
                found = true;
                break;
            }
        }
        if !found {
            return None;
        }

        let mut members = vec![Member::new(self.reader, self.raw.clone())];
        for _ in 0..relative_depth {
            members = members.iter().flat_map(|m| m.children()).collect();
        }
        Some(members)
    }
}
