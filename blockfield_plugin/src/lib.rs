// blockfield_plugin: plugin host for the blockfield layout importer.
//
// Stands in for the design tool's plugin runtime. The panel (or a script
// playing its part) sends `PluginMessage`s; the plugin runs the import
// orchestrator from `blockfield_core` against a scene and answers with
// `HostEvent`s. The binary (`main.rs`) wires stdin and stdout to a session
// over a scene document loaded from disk.
//
// Module overview:
// - `session.rs`:  `PluginSession`, the message-driven state machine, and
//                  `run`, its stream driver.
// - `load.rs`:     Reading the scene document and layout config from disk.
// - `error.rs`:    `PluginError`.
//
// Dependencies: `blockfield_core` (derivation engine) and
// `blockfield_protocol` (messages and framing).

pub mod error;
pub mod load;
pub mod session;

pub use error::PluginError;
pub use session::{OutputMode, PluginSession, RunSummary};
