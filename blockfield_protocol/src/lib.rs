// blockfield_protocol: messages exchanged between the UI panel and the plugin.
//
// This crate defines the message types and framing the panel and the plugin
// use to talk to each other. It is shared between both sides and has no
// dependency on the derivation engine.
//
// Module overview:
// - `message.rs`:  `PluginMessage` (panel to plugin) and `HostEvent` (plugin
//                  to panel), plus lenient parsing of the id offset field.
// - `framing.rs`:  Newline-delimited framing over any `BufRead`/`Write`
//                  stream: one JSON document per line.
//
// Design decisions:
// - **JSON serialization.** The panel is a web view and speaks JSON natively.
// - **Layouts as opaque `serde_json::Value`s.** The protocol never inspects
//   layout contents, so it does not need the engine's types.
// - **No async runtime.** Framing uses `std::io` traits, compatible with
//   stdin/stdout and in-memory buffers alike.

pub mod framing;
pub mod message;

pub use framing::{FramingError, MAX_MESSAGE_SIZE, read_message, write_message};
pub use message::{HostEvent, PluginMessage};
