//! FILENAME: core/catalog/src/memory.rs
//! PURPOSE: In-memory catalog built from a `SchemaDefinition`.
//! CONTEXT: This is the crate's own `SchemaReader` implementation: it
//! materializes the handle graph up front and answers every navigation
//! query from hash indexes. It doubles as the test backend for the facade
//! layer, so no real analytical engine is needed for unit tests.
//!
//! Build rules:
//! - When `has_all` is true, a synthetic "(All)" level is prepended to the
//!   level chain and an all member is created at depth 0. The definition's
//!   top members become the all member's children at depth 1.
//! - Without an all member, top members sit at depth 0 on the first level.
//! - Each generation below a member is exactly one level deeper.
//! - Unique names are bracketed qualified paths (`]` escaped as `]]`),
//!   rooted at the hierarchy's unique name and passing through the all
//!   member when one exists.

use log::debug;
use rustc_hash::FxHashMap;
use std::rc::Rc;

use crate::definition::{HierarchyDefinition, MemberDefinition, SchemaDefinition};
use crate::error::SchemaError;
use crate::handle::{
    CubeHandle, CubeRef, DimensionHandle, DimensionKind, DimensionRef,
    HierarchyHandle, HierarchyRef, LevelHandle, LevelRef, LookupScope,
    MemberHandle, MemberRef, SchemaReader,
};

/// Level name synthesized for hierarchies with an all member.
const ALL_LEVEL_NAME: &str = "(All)";

// ============================================================================
// HANDLE NODES
// ============================================================================

struct LevelNode {
    name: String,
    /// The next level down. Levels form a root-to-leaf chain.
    child: Option<Rc<LevelNode>>,
}

impl LevelHandle for LevelNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn child_level(&self) -> Option<LevelRef> {
        self.child.clone().map(|l| l as LevelRef)
    }
}

struct MemberNode {
    name: String,
    unique_name: String,
    depth: u32,
    level: Rc<LevelNode>,
}

impl MemberHandle for MemberNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn unique_name(&self) -> &str {
        &self.unique_name
    }

    fn depth(&self) -> u32 {
        self.depth
    }

    fn level(&self) -> LevelRef {
        self.level.clone() as LevelRef
    }
}

struct HierarchyNode {
    name: String,
    unique_name: String,
    has_all: bool,
    all_member: Option<Rc<MemberNode>>,
    /// Root-to-leaf level chain, including the synthetic all level.
    levels: Vec<Rc<LevelNode>>,
}

impl HierarchyHandle for HierarchyNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn unique_name(&self) -> &str {
        &self.unique_name
    }

    fn levels(&self) -> Vec<LevelRef> {
        self.levels.iter().map(|l| l.clone() as LevelRef).collect()
    }

    fn has_all(&self) -> bool {
        self.has_all
    }

    fn all_member(&self) -> Option<MemberRef> {
        self.all_member.clone().map(|m| m as MemberRef)
    }
}

struct DimensionNode {
    name: String,
    unique_name: String,
    kind: DimensionKind,
    hierarchies: Vec<Rc<HierarchyNode>>,
}

impl DimensionHandle for DimensionNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn unique_name(&self) -> &str {
        &self.unique_name
    }

    fn hierarchies(&self) -> Vec<HierarchyRef> {
        self.hierarchies
            .iter()
            .map(|h| h.clone() as HierarchyRef)
            .collect()
    }

    fn is_measures(&self) -> bool {
        self.kind == DimensionKind::Measures
    }

    fn dimension_kind(&self) -> DimensionKind {
        self.kind
    }
}

struct CubeNode {
    name: String,
    dimensions: Vec<Rc<DimensionNode>>,
}

impl CubeHandle for CubeNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn dimensions(&self) -> Vec<DimensionRef> {
        self.dimensions
            .iter()
            .map(|d| d.clone() as DimensionRef)
            .collect()
    }
}

// ============================================================================
// MEMORY SCHEMA
// ============================================================================

/// An immutable catalog materialized from a `SchemaDefinition`.
pub struct MemorySchema {
    /// Cubes by name.
    cubes: FxHashMap<String, Rc<CubeNode>>,

    /// Root members by hierarchy unique name. These are the all member's
    /// children when the hierarchy has one, else its top members.
    root_members: FxHashMap<String, Vec<MemberRef>>,

    /// Direct children by member unique name. Leaves have no entry.
    children: FxHashMap<String, Vec<MemberRef>>,
}

impl MemorySchema {
    /// Builds the handle graph and reader indexes from a definition.
    pub fn build(definition: SchemaDefinition) -> Result<Self, SchemaError> {
        let mut schema = MemorySchema {
            cubes: FxHashMap::default(),
            root_members: FxHashMap::default(),
            children: FxHashMap::default(),
        };

        for cube_def in definition.cubes {
            if schema.cubes.contains_key(&cube_def.name) {
                return Err(SchemaError::DuplicateCube(cube_def.name));
            }

            let mut dimensions = Vec::with_capacity(cube_def.dimensions.len());
            for dim_def in cube_def.dimensions {
                let dim_unique = qname::quote_segment(&dim_def.name);
                let mut hierarchies = Vec::with_capacity(dim_def.hierarchies.len());
                for hier_def in dim_def.hierarchies {
                    hierarchies.push(schema.build_hierarchy(
                        &dim_def.name,
                        &dim_unique,
                        hier_def,
                    )?);
                }
                dimensions.push(Rc::new(DimensionNode {
                    name: dim_def.name,
                    unique_name: dim_unique,
                    kind: dim_def.kind,
                    hierarchies,
                }));
            }

            let cube = Rc::new(CubeNode {
                name: cube_def.name.clone(),
                dimensions,
            });
            schema.cubes.insert(cube_def.name, cube);
        }

        Ok(schema)
    }

    /// Loads and builds a catalog from a JSON definition string.
    pub fn from_json_str(json: &str) -> Result<Self, SchemaError> {
        Self::build(SchemaDefinition::from_json_str(json)?)
    }

    /// Loads and builds a catalog from a JSON definition file.
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self, SchemaError> {
        Self::build(SchemaDefinition::from_json_file(path)?)
    }

    fn build_hierarchy(
        &mut self,
        dimension_name: &str,
        dimension_unique: &str,
        def: HierarchyDefinition,
    ) -> Result<Rc<HierarchyNode>, SchemaError> {
        if def.levels.is_empty() {
            return Err(SchemaError::NoLevels(def.name));
        }
        if !def.has_all && def.all_member_name.is_some() {
            return Err(SchemaError::AllMemberWithoutHasAll(def.name));
        }

        // The default hierarchy shares its dimension's unique name.
        let unique_name = if def.name == dimension_name {
            dimension_unique.to_string()
        } else {
            format!("{}.{}", dimension_unique, qname::quote_segment(&def.name))
        };

        // Build the level chain leaf-first so each node owns its child.
        let mut level_names: Vec<String> = Vec::with_capacity(def.levels.len() + 1);
        if def.has_all {
            level_names.push(ALL_LEVEL_NAME.to_string());
        }
        level_names.extend(def.levels);

        let mut next: Option<Rc<LevelNode>> = None;
        let mut levels: Vec<Rc<LevelNode>> = Vec::with_capacity(level_names.len());
        for name in level_names.into_iter().rev() {
            let node = Rc::new(LevelNode { name, child: next });
            next = Some(node.clone());
            levels.push(node);
        }
        levels.reverse();

        // Synthesize the all member, then hang the top members under it.
        let (all_member, top_parent_unique, top_depth) = if def.has_all {
            let all_name = def
                .all_member_name
                .unwrap_or_else(|| format!("All {}s", def.name));
            let all_unique =
                format!("{}.{}", unique_name, qname::quote_segment(&all_name));
            let all = Rc::new(MemberNode {
                name: all_name,
                unique_name: all_unique.clone(),
                depth: 0,
                level: levels[0].clone(),
            });
            (Some(all), all_unique, 1u32)
        } else {
            (None, unique_name.clone(), 0u32)
        };

        let top_members = self.build_members(
            &def.members,
            &top_parent_unique,
            top_depth,
            &levels,
            &def.name,
        )?;

        if let Some(ref all) = all_member {
            self.children
                .insert(all.unique_name.clone(), top_members.clone());
        }
        self.root_members.insert(unique_name.clone(), top_members);

        Ok(Rc::new(HierarchyNode {
            name: def.name,
            unique_name,
            has_all: def.has_all,
            all_member,
            levels,
        }))
    }

    fn build_members(
        &mut self,
        defs: &[MemberDefinition],
        parent_unique: &str,
        depth: u32,
        levels: &[Rc<LevelNode>],
        hierarchy_name: &str,
    ) -> Result<Vec<MemberRef>, SchemaError> {
        let mut members: Vec<MemberRef> = Vec::with_capacity(defs.len());
        for def in defs {
            let level = levels.get(depth as usize).ok_or_else(|| {
                SchemaError::MemberTooDeep {
                    hierarchy: hierarchy_name.to_string(),
                    member: def.name.clone(),
                }
            })?;
            let unique_name =
                format!("{}.{}", parent_unique, qname::quote_segment(&def.name));
            let node = Rc::new(MemberNode {
                name: def.name.clone(),
                unique_name: unique_name.clone(),
                depth,
                level: level.clone(),
            });

            let children = self.build_members(
                &def.children,
                &unique_name,
                depth + 1,
                levels,
                hierarchy_name,
            )?;
            if !children.is_empty() {
                self.children.insert(unique_name, children);
            }

            members.push(node as MemberRef);
        }
        Ok(members)
    }

    /// The member a bare dimension path resolves to: the all member when
    /// present, else the first root member.
    fn default_member(&self, hierarchy: &HierarchyNode) -> Option<MemberRef> {
        if let Some(all) = hierarchy.all_member() {
            return Some(all);
        }
        self.root_members
            .get(&hierarchy.unique_name)?
            .first()
            .cloned()
    }

    /// Resolves `segments` inside one hierarchy. The first segment matches
    /// the all member itself or any root member; later segments descend
    /// through children by name.
    fn lookup_in_hierarchy(
        &self,
        hierarchy: &dyn HierarchyHandle,
        segments: &[&str],
    ) -> Option<MemberRef> {
        let roots = self.root_members.get(hierarchy.unique_name())?;
        let first = segments[0];

        let mut current: MemberRef = match hierarchy.all_member() {
            Some(all) if all.name() == first => all,
            _ => roots.iter().find(|m| m.name() == first)?.clone(),
        };
        for segment in &segments[1..] {
            let children = self.children.get(current.unique_name())?;
            current = children.iter().find(|m| m.name() == *segment)?.clone();
        }
        Some(current)
    }
}

impl SchemaReader for MemorySchema {
    fn lookup_cube(&self, name: &str) -> Option<CubeRef> {
        let cube = self.cubes.get(name).cloned().map(|c| c as CubeRef);
        if cube.is_none() {
            debug!("cube lookup miss: {name}");
        }
        cube
    }

    fn hierarchy_root_members(&self, hierarchy: &dyn HierarchyHandle) -> Vec<MemberRef> {
        match self.root_members.get(hierarchy.unique_name()) {
            Some(members) => members.clone(),
            None => {
                debug!("unknown hierarchy: {}", hierarchy.unique_name());
                Vec::new()
            }
        }
    }

    fn lookup_member(&self, scope: LookupScope<'_>, segments: &[&str]) -> Option<MemberRef> {
        if segments.is_empty() {
            return None;
        }
        let member = match scope {
            LookupScope::Cube(cube) => {
                let cube = self.cubes.get(cube.name())?;
                let dimension = cube
                    .dimensions
                    .iter()
                    .find(|d| d.name == segments[0])?;
                // Dimension-default-hierarchy convention: the same-named
                // hierarchy if one exists, else the first.
                let hierarchy = dimension
                    .hierarchies
                    .iter()
                    .find(|h| h.name == dimension.name)
                    .or_else(|| dimension.hierarchies.first())?;
                if segments.len() == 1 {
                    self.default_member(hierarchy)
                } else {
                    self.lookup_in_hierarchy(hierarchy.as_ref(), &segments[1..])
                }
            }
            LookupScope::Hierarchy(hierarchy) => {
                self.lookup_in_hierarchy(hierarchy, segments)
            }
        };
        if member.is_none() {
            debug!("member lookup miss: {}", segments.join("."));
        }
        member
    }

    fn member_children(&self, member: &dyn MemberHandle) -> Vec<MemberRef> {
        self.children
            .get(member.unique_name())
            .cloned()
            .unwrap_or_default()
    }

    fn is_drillable(&self, member: &dyn MemberHandle) -> bool {
        self.children.contains_key(member.unique_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{
        CubeDefinition, DimensionDefinition, HierarchyDefinition, MemberDefinition,
    };

    fn store_dimension() -> DimensionDefinition {
        DimensionDefinition::new(
            "Store",
            DimensionKind::Standard,
            vec![HierarchyDefinition::new(
                "Store",
                vec!["Country".into(), "State".into(), "City".into()],
            )
            .with_all(Some("All Stores".into()))
            .with_members(vec![
                MemberDefinition::with_children(
                    "USA",
                    vec![
                        MemberDefinition::with_children(
                            "CA",
                            vec![
                                MemberDefinition::leaf("San Francisco"),
                                MemberDefinition::leaf("Los Angeles"),
                            ],
                        ),
                        MemberDefinition::with_children(
                            "WA",
                            vec![MemberDefinition::leaf("Seattle")],
                        ),
                    ],
                ),
                MemberDefinition::with_children(
                    "Canada",
                    vec![MemberDefinition::with_children(
                        "BC",
                        vec![MemberDefinition::leaf("Vancouver")],
                    )],
                ),
            ])],
        )
    }

    fn time_dimension() -> DimensionDefinition {
        DimensionDefinition::new(
            "Time",
            DimensionKind::Time,
            vec![HierarchyDefinition::new(
                "Time",
                vec!["Year".into(), "Quarter".into()],
            )
            .with_members(vec![
                MemberDefinition::with_children(
                    "1997",
                    vec![MemberDefinition::leaf("Q1"), MemberDefinition::leaf("Q2")],
                ),
                MemberDefinition::with_children(
                    "1998",
                    vec![MemberDefinition::leaf("Q1")],
                ),
            ])],
        )
    }

    fn test_schema() -> MemorySchema {
        let definition = SchemaDefinition::new(vec![CubeDefinition::new(
            "Sales",
            vec![store_dimension(), time_dimension()],
        )]);
        MemorySchema::build(definition).unwrap()
    }

    fn sales_hierarchy(schema: &MemorySchema, dimension: &str) -> HierarchyRef {
        let cube = schema.lookup_cube("Sales").unwrap();
        let dim = cube
            .dimensions()
            .into_iter()
            .find(|d| d.name() == dimension)
            .unwrap();
        dim.hierarchies().into_iter().next().unwrap()
    }

    #[test]
    fn test_lookup_cube() {
        let schema = test_schema();
        assert_eq!(schema.lookup_cube("Sales").unwrap().name(), "Sales");
        assert!(schema.lookup_cube("Inventory").is_none());
    }

    #[test]
    fn test_dimension_order_and_unique_names() {
        let schema = test_schema();
        let cube = schema.lookup_cube("Sales").unwrap();
        let dims = cube.dimensions();
        assert_eq!(dims.len(), 2);
        assert_eq!(dims[0].name(), "Store");
        assert_eq!(dims[0].unique_name(), "[Store]");
        assert_eq!(dims[1].name(), "Time");
    }

    #[test]
    fn test_all_level_is_synthesized() {
        let schema = test_schema();
        let store = sales_hierarchy(&schema, "Store");
        let names: Vec<String> =
            store.levels().iter().map(|l| l.name().to_string()).collect();
        assert_eq!(names, vec!["(All)", "Country", "State", "City"]);
        assert!(store.has_all());
        assert_eq!(store.all_member().unwrap().name(), "All Stores");
        assert_eq!(store.all_member().unwrap().depth(), 0);
    }

    #[test]
    fn test_level_chain_links_root_to_leaf() {
        let schema = test_schema();
        let time = sales_hierarchy(&schema, "Time");
        let year = time.levels().into_iter().next().unwrap();
        assert_eq!(year.name(), "Year");
        let quarter = year.child_level().unwrap();
        assert_eq!(quarter.name(), "Quarter");
        assert!(quarter.child_level().is_none());
    }

    #[test]
    fn test_root_members_and_depth() {
        let schema = test_schema();
        let store = sales_hierarchy(&schema, "Store");
        let roots = schema.hierarchy_root_members(store.as_ref());
        let names: Vec<&str> = roots.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["USA", "Canada"]);
        // Children of the all member start at depth 1.
        assert_eq!(roots[0].depth(), 1);

        let time = sales_hierarchy(&schema, "Time");
        let roots = schema.hierarchy_root_members(time.as_ref());
        // No all member: top members sit at depth 0.
        assert_eq!(roots[0].depth(), 0);
        assert_eq!(roots[0].level().name(), "Year");
    }

    #[test]
    fn test_unique_names_pass_through_all_member() {
        let schema = test_schema();
        let store = sales_hierarchy(&schema, "Store");
        let usa = schema
            .lookup_member(LookupScope::Hierarchy(store.as_ref()), &["USA"])
            .unwrap();
        assert_eq!(usa.unique_name(), "[Store].[All Stores].[USA]");

        let time = sales_hierarchy(&schema, "Time");
        let y1997 = schema
            .lookup_member(LookupScope::Hierarchy(time.as_ref()), &["1997"])
            .unwrap();
        assert_eq!(y1997.unique_name(), "[Time].[1997]");
    }

    #[test]
    fn test_cube_scoped_lookup() {
        let schema = test_schema();
        let cube = schema.lookup_cube("Sales").unwrap();
        let ca = schema
            .lookup_member(LookupScope::Cube(cube.as_ref()), &["Store", "USA", "CA"])
            .unwrap();
        assert_eq!(ca.name(), "CA");
        assert_eq!(ca.depth(), 2);
        assert_eq!(ca.level().name(), "State");
    }

    #[test]
    fn test_cube_scoped_lookup_through_all_member() {
        let schema = test_schema();
        let cube = schema.lookup_cube("Sales").unwrap();
        // The all member may be spelled out or omitted.
        let explicit = schema
            .lookup_member(
                LookupScope::Cube(cube.as_ref()),
                &["Store", "All Stores", "USA"],
            )
            .unwrap();
        let implicit = schema
            .lookup_member(LookupScope::Cube(cube.as_ref()), &["Store", "USA"])
            .unwrap();
        assert_eq!(explicit.unique_name(), implicit.unique_name());
    }

    #[test]
    fn test_bare_dimension_resolves_to_default_member() {
        let schema = test_schema();
        let cube = schema.lookup_cube("Sales").unwrap();
        let store_default = schema
            .lookup_member(LookupScope::Cube(cube.as_ref()), &["Store"])
            .unwrap();
        assert_eq!(store_default.name(), "All Stores");
        let time_default = schema
            .lookup_member(LookupScope::Cube(cube.as_ref()), &["Time"])
            .unwrap();
        assert_eq!(time_default.name(), "1997");
    }

    #[test]
    fn test_lookup_misses_are_absent() {
        let schema = test_schema();
        let cube = schema.lookup_cube("Sales").unwrap();
        let scope = || LookupScope::Cube(cube.as_ref());
        assert!(schema.lookup_member(scope(), &[]).is_none());
        assert!(schema.lookup_member(scope(), &["Product"]).is_none());
        assert!(schema.lookup_member(scope(), &["Store", "Mexico"]).is_none());
        assert!(schema
            .lookup_member(scope(), &["Store", "USA", "CA", "Fresno"])
            .is_none());
    }

    #[test]
    fn test_member_children_and_drillable() {
        let schema = test_schema();
        let cube = schema.lookup_cube("Sales").unwrap();
        let usa = schema
            .lookup_member(LookupScope::Cube(cube.as_ref()), &["Store", "USA"])
            .unwrap();
        let children = schema.member_children(usa.as_ref());
        let names: Vec<&str> = children.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["CA", "WA"]);
        assert!(schema.is_drillable(usa.as_ref()));

        let seattle = schema
            .lookup_member(
                LookupScope::Cube(cube.as_ref()),
                &["Store", "USA", "WA", "Seattle"],
            )
            .unwrap();
        assert!(schema.member_children(seattle.as_ref()).is_empty());
        assert!(!schema.is_drillable(seattle.as_ref()));
    }

    #[test]
    fn test_duplicate_cube_name_is_rejected() {
        let definition = SchemaDefinition::new(vec![
            CubeDefinition::new("Sales", vec![]),
            CubeDefinition::new("Sales", vec![]),
        ]);
        assert!(matches!(
            MemorySchema::build(definition),
            Err(SchemaError::DuplicateCube(name)) if name == "Sales"
        ));
    }

    #[test]
    fn test_hierarchy_without_levels_is_rejected() {
        let definition = SchemaDefinition::new(vec![CubeDefinition::new(
            "Sales",
            vec![DimensionDefinition::new(
                "Store",
                DimensionKind::Standard,
                vec![HierarchyDefinition::new("Store", vec![])],
            )],
        )]);
        assert!(matches!(
            MemorySchema::build(definition),
            Err(SchemaError::NoLevels(name)) if name == "Store"
        ));
    }

    #[test]
    fn test_member_deeper_than_level_chain_is_rejected() {
        let definition = SchemaDefinition::new(vec![CubeDefinition::new(
            "Sales",
            vec![DimensionDefinition::new(
                "Time",
                DimensionKind::Time,
                vec![HierarchyDefinition::new("Time", vec!["Year".into()])
                    .with_members(vec![MemberDefinition::with_children(
                        "1997",
                        vec![MemberDefinition::leaf("Q1")],
                    )])],
            )],
        )]);
        assert!(matches!(
            MemorySchema::build(definition),
            Err(SchemaError::MemberTooDeep { member, .. }) if member == "Q1"
        ));
    }

    #[test]
    fn test_all_member_name_without_has_all_is_rejected() {
        let mut hierarchy = HierarchyDefinition::new("Store", vec!["Country".into()]);
        hierarchy.all_member_name = Some("All Stores".into());
        let definition = SchemaDefinition::new(vec![CubeDefinition::new(
            "Sales",
            vec![DimensionDefinition::new(
                "Store",
                DimensionKind::Standard,
                vec![hierarchy],
            )],
        )]);
        assert!(matches!(
            MemorySchema::build(definition),
            Err(SchemaError::AllMemberWithoutHasAll(name)) if name == "Store"
        ));
    }

    #[test]
    fn test_schema_definition_json_round_trip() {
        let definition = SchemaDefinition::new(vec![CubeDefinition::new(
            "Sales",
            vec![store_dimension(), time_dimension()],
        )]);
        let json = serde_json::to_string(&definition).unwrap();
        let reparsed = SchemaDefinition::from_json_str(&json).unwrap();
        assert_eq!(reparsed.cubes.len(), 1);
        assert_eq!(reparsed.cubes[0].dimensions[1].kind, DimensionKind::Time);
        // The rebuilt catalog answers the same queries.
        let schema = MemorySchema::build(reparsed).unwrap();
        assert!(schema.lookup_cube("Sales").is_some());
    }

    #[test]
    fn test_from_json_file() {
        use std::io::Write;

        let json = r#"{
            "cubes": [{
                "name": "Sales",
                "dimensions": [{
                    "name": "Gender",
                    "hierarchies": [{
                        "name": "Gender",
                        "has_all": true,
                        "levels": ["Gender"],
                        "members": [{"name": "F"}, {"name": "M"}]
                    }]
                }]
            }]
        }"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let schema = MemorySchema::from_json_file(file.path()).unwrap();
        let cube = schema.lookup_cube("Sales").unwrap();
        let gender = cube.dimensions()[0].hierarchies()[0].clone();
        // `kind` was omitted, so the dimension defaults to Standard.
        assert_eq!(
            cube.dimensions()[0].dimension_kind(),
            DimensionKind::Standard
        );
        // `all_member_name` was omitted, so the all member name is derived.
        assert_eq!(gender.all_member().unwrap().name(), "All Genders");
        let roots = schema.hierarchy_root_members(gender.as_ref());
        assert_eq!(roots.len(), 2);
    }
}
