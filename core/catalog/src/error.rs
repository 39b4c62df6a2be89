//! FILENAME: core/catalog/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate cube name: {0}")]
    DuplicateCube(String),

    #[error("hierarchy {0} declares no levels")]
    NoLevels(String),

    #[error("member {member} in hierarchy {hierarchy} is deeper than the level chain")]
    MemberTooDeep { hierarchy: String, member: String },

    #[error("hierarchy {0} sets all_member_name but has_all is false")]
    AllMemberWithoutHasAll(String),
}
