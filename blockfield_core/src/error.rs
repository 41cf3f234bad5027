// Error types for the derivation pipeline.
//
// `ImportError` covers everything that aborts an import run: a block whose
// name does not parse, a type code outside the closed vocabulary, a slot
// marker with an unreadable footprint or a rotation the slot-grid builder
// does not support, or a block or marker placed too far out for `i32`
// coordinates. None of these are recovered locally; the first one ends the
// run and no partial output is emitted.
//
// A missing container is deliberately not an error; see `import.rs`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("block name {name:?} does not match <Shape>:<Type>_<Density>_<NNN>")]
    MalformedName { name: String },
    #[error("unknown block type code {code:?}")]
    UnknownTypeCode { code: String },
    #[error("slot marker {node:?} has unsupported rotation {rotation}")]
    UnsupportedRotation { node: String, rotation: i32 },
    #[error("slot marker {name:?} has no readable WxH footprint")]
    MalformedFootprint { name: String },
    #[error("{node:?} lies outside the supported canvas range")]
    CoordinateOutOfRange { node: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse layout config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid layout config: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to parse scene document: {0}")]
    Json(#[from] serde_json::Error),
}
