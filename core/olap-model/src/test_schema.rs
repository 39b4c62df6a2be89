//! FILENAME: core/olap-model/src/test_schema.rs
//! PURPOSE: Shared in-memory schema fixture for the facade unit tests.
//! CONTEXT: A small Sales cube with a Store hierarchy (all member, three
//! levels), a Time hierarchy (no all member), a measures dimension, and a
//! dimension with an unrecognized kind.

use catalog::{
    CubeDefinition, DimensionDefinition, DimensionKind, HierarchyDefinition,
    MemberDefinition, MemorySchema, SchemaDefinition,
};

pub fn sales_schema() -> MemorySchema {
    let store = DimensionDefinition::new(
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
                            MemberDefinition::leaf("San Diego"),
                        ],
                    ),
                    MemberDefinition::with_children(
                        "WA",
                        vec![
                            MemberDefinition::leaf("Seattle"),
                            MemberDefinition::leaf("Spokane"),
                            MemberDefinition::leaf("Tacoma"),
                        ],
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
    );

    let time = DimensionDefinition::new(
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
                vec![MemberDefinition::leaf("Q1"), MemberDefinition::leaf("Q2")],
            ),
        ])],
    );

    let measures = DimensionDefinition::new(
        "Measures",
        DimensionKind::Measures,
        vec![HierarchyDefinition::new(
            "Measures",
            vec!["MeasuresLevel".into()],
        )
        .with_members(vec![
            MemberDefinition::leaf("Unit Sales"),
            MemberDefinition::leaf("Store Sales"),
        ])],
    );

    let scenario = DimensionDefinition::new(
        "Scenario",
        DimensionKind::Other,
        vec![HierarchyDefinition::new("Scenario", vec!["Scenario".into()])
            .with_members(vec![
                MemberDefinition::leaf("Actual"),
                MemberDefinition::leaf("Budget"),
            ])],
    );

    let definition = SchemaDefinition::new(vec![CubeDefinition::new(
        "Sales",
        vec![store, time, measures, scenario],
    )]);
    MemorySchema::build(definition).unwrap()
}
