// Messages between the UI panel and the plugin.
//
// Two enums define the full vocabulary:
// - `PluginMessage`: sent by the panel when the user presses a button.
// - `HostEvent`: sent back by the plugin as an import progresses.
//
// Both are internally tagged by a `"type"` field so the panel can build them
// as plain object literals:
//
//   {"type": "import", "frameName": "Field A", "idDiff": "2"}
//   {"type": "cancel"}
//
// The panel forwards the id offset straight from a text input, so `idDiff`
// arrives as a string as often as a number. `lenient_id_offset` accepts both,
// and treats an empty, null, missing or non-numeric value as offset 0.
//
// Layouts travel as opaque JSON values. The plugin serializes them and the
// panel hands them on unchanged, which keeps this crate independent of the
// derivation engine.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Messages sent by the UI panel to the plugin.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PluginMessage {
    /// Import every block of the named frame.
    Import {
        #[serde(rename = "frameName")]
        frame_name: String,
        /// Artboard index used to seed layout ids.
        #[serde(
            rename = "idDiff",
            alias = "idDiffOffset",
            default,
            deserialize_with = "lenient_id_offset"
        )]
        id_offset: u32,
    },
    /// Close the plugin without importing.
    Cancel,
}

/// Events sent by the plugin back to the panel (or to stdout).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    /// An import finished; `layouts` is the serialized layout array.
    ImportCompleted { layouts: Vec<Value> },
    /// An import aborted on malformed input. The plugin stays open.
    ImportFailed { reason: String },
    /// No frame with the requested name exists. Nothing was imported.
    FrameNotFound {
        #[serde(rename = "frameName")]
        frame_name: String,
    },
    /// The plugin is done and will not answer further messages.
    Closed,
}

fn lenient_id_offset<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    let offset = match value {
        Some(Value::Number(n)) => match n.as_u64() {
            Some(v) => Some(v),
            None if n.as_f64().is_some_and(|f| f >= 0.0 && f.fract() == 0.0) => {
                n.as_f64().map(|f| f as u64)
            }
            None => return Err(D::Error::custom(format!("invalid id offset {n}"))),
        },
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    match offset {
        None => Ok(0),
        Some(v) => u32::try_from(v)
            .map_err(|_| D::Error::custom(format!("id offset {v} out of range"))),
    }
}
