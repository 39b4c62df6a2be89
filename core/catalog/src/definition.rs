//! FILENAME: core/catalog/src/definition.rs
//! PURPOSE: Schema Definition - the serializable catalog configuration.
//! CONTEXT: This module contains all the types needed to DESCRIBE a static
//! schema. These structures are designed to be:
//! - Serializable (fixtures, embedded catalogs, config files)
//! - Immutable once built into a `MemorySchema`
//!
//! A definition says what exists: cubes, dimensions, hierarchies, level
//! names, and the member tree under each hierarchy. Resolution behavior
//! lives in `memory`, not here.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::SchemaError;
use crate::handle::DimensionKind;

/// The complete, serializable definition of a catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaDefinition {
    pub cubes: Vec<CubeDefinition>,
}

impl SchemaDefinition {
    pub fn new(cubes: Vec<CubeDefinition>) -> Self {
        SchemaDefinition { cubes }
    }

    /// Parses a definition from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a definition from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

/// One cube and its dimensions, in display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CubeDefinition {
    pub name: String,
    pub dimensions: Vec<DimensionDefinition>,
}

impl CubeDefinition {
    pub fn new(name: impl Into<String>, dimensions: Vec<DimensionDefinition>) -> Self {
        CubeDefinition {
            name: name.into(),
            dimensions,
        }
    }
}

/// One dimension of a cube.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionDefinition {
    pub name: String,

    /// Dimension-kind tag. Defaults to `Standard`.
    #[serde(default)]
    pub kind: DimensionKind,

    pub hierarchies: Vec<HierarchyDefinition>,
}

impl DimensionDefinition {
    pub fn new(
        name: impl Into<String>,
        kind: DimensionKind,
        hierarchies: Vec<HierarchyDefinition>,
    ) -> Self {
        DimensionDefinition {
            name: name.into(),
            kind,
            hierarchies,
        }
    }
}

/// One hierarchy: its level names (root to leaf, not counting the
/// synthetic all level) and its top-level member tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HierarchyDefinition {
    pub name: String,

    /// Whether to synthesize an "(All)" root level and all member.
    #[serde(default)]
    pub has_all: bool,

    /// Name for the all member. Only meaningful when `has_all` is true;
    /// defaults to `All <hierarchy name>s`.
    #[serde(default)]
    pub all_member_name: Option<String>,

    /// User level names, root to leaf.
    pub levels: Vec<String>,

    /// Top-level members (the all member's children when `has_all`).
    #[serde(default)]
    pub members: Vec<MemberDefinition>,
}

impl HierarchyDefinition {
    pub fn new(name: impl Into<String>, levels: Vec<String>) -> Self {
        HierarchyDefinition {
            name: name.into(),
            has_all: false,
            all_member_name: None,
            levels,
            members: Vec::new(),
        }
    }

    pub fn with_all(mut self, all_member_name: Option<String>) -> Self {
        self.has_all = true;
        self.all_member_name = all_member_name;
        self
    }

    pub fn with_members(mut self, members: Vec<MemberDefinition>) -> Self {
        self.members = members;
        self
    }
}

/// One member and its children. Depth is implied by tree position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberDefinition {
    pub name: String,

    #[serde(default)]
    pub children: Vec<MemberDefinition>,
}

impl MemberDefinition {
    /// A member with no children.
    pub fn leaf(name: impl Into<String>) -> Self {
        MemberDefinition {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(name: impl Into<String>, children: Vec<MemberDefinition>) -> Self {
        MemberDefinition {
            name: name.into(),
            children,
        }
    }
}
