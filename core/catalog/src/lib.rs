//! FILENAME: core/catalog/src/lib.rs
//! PURPOSE: Catalog boundary for the OLAP metadata layer.
//! CONTEXT: This crate owns the seam between the metadata facades and
//! whatever engine actually holds the schema. It defines the handle traits
//! and the `SchemaReader` trait the facades delegate to, plus an in-memory
//! catalog that implements them from a serializable schema definition.
//!
//! Layers:
//! - `handle`: Opaque handle traits and the `SchemaReader` interface
//! - `definition`: Serializable schema configuration (what the catalog IS)
//! - `memory`: In-memory catalog built from a definition (HOW we resolve)
//! - `error`: Schema loading and validation errors

pub mod definition;
pub mod error;
pub mod handle;
pub mod memory;

pub use definition::{
    CubeDefinition, DimensionDefinition, HierarchyDefinition, MemberDefinition,
    SchemaDefinition,
};
pub use error::SchemaError;
pub use handle::{
    CubeHandle, CubeRef, DimensionHandle, DimensionKind, DimensionRef,
    HierarchyHandle, HierarchyRef, LevelHandle, LevelRef, LookupScope,
    MemberHandle, MemberRef, SchemaReader,
};
pub use memory::MemorySchema;
