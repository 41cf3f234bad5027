// blockfield_core: slot-layout derivation engine for field blocks.
//
// A field is a grid of square "blocks" drawn on a design canvas. Each block is
// named `<Shape>:<Type>_<Density>_<NNN>` and carries child markers named
// `Slot <WxH>` that outline where buildings of a given footprint fit. This
// crate turns one authored block into the eight derived layouts (original,
// mirror, and the three quarter-turn rotations of each) needed to fill every
// rotational quadrant of a symmetric field.
//
// Module overview:
// - `types.rs`:    Point, Slot, Sector, Block and its closed vocabularies
//                  (shape, type, density, postfix), Layout.
// - `config.rs`:   LayoutConfig: slot size, block spacing, field width, and
//                  the values derived from them (half diagonal, id stride).
// - `error.rs`:    ImportError / ConfigError / SceneError.
// - `geometry.rs`: Rounding, top-left derivation, the three slot placement
//                  formulas, and the quarter-turn rotation of a point.
// - `slots.rs`:    Slot-grid builder: footprint + anchor + rotation -> slots.
// - `parse.rs`:    Block name parser and sector detection from child markers.
// - `variants.rs`: Mirror / rotate transforms and the eight-variant expansion.
// - `import.rs`:   Import orchestrator: container lookup, id seeding,
//                  per-block registration.
// - `scene.rs`:    SceneNode / SceneHost capability traits plus a JSON scene
//                  document adapter.
//
// The crate has no dependency on any host canvas API. Hosts implement
// `SceneHost` (see `scene.rs`) and hand it to `import::run_import`.
//
// **Critical constraint: output stability.** Slot ids, sector ids and layout
// ids are assigned in encounter order and consumed downstream as stable keys.
// Every loop here iterates in a fixed order; nothing is hashed or sorted.

pub mod config;
pub mod error;
pub mod geometry;
pub mod import;
pub mod parse;
pub mod scene;
pub mod slots;
pub mod types;
pub mod variants;

pub use config::LayoutConfig;
pub use error::{ConfigError, ImportError, SceneError};
pub use import::{ImportReport, LayoutIds, run_import};
pub use scene::{SceneDocument, SceneHost, SceneNode, SceneNodeData};
pub use types::{Block, BlockShape, BlockType, Density, Layout, LayoutId, Point, Postfix, Sector, Slot};
